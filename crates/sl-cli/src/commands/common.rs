//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use sl_core::config::{Config, SourcesConfig, StoresConfig};
use sl_db::DuckDbBackend;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::GlobalArgs;

/// Error type representing a non-zero process exit code.
///
/// Use `return Err(ExitCode(N).into())` instead of `std::process::exit(N)`
/// so that RAII destructors run and cleanup happens properly.
#[derive(Debug)]
pub(crate) struct ExitCode(pub(crate) i32);

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // ExitCode is a control-flow mechanism; the failure it stands for
        // has already been reported by the command.
        write!(f, "")
    }
}

impl std::error::Error for ExitCode {}

/// Exit code for staging failures
pub(crate) const EXIT_STAGING: i32 = 2;
/// Exit code for warehouse build / view publish failures
pub(crate) const EXIT_WAREHOUSE: i32 = 3;
/// Exit code for store connection failures
pub(crate) const EXIT_DATABASE: i32 = 4;

/// Loaded project: configuration plus target-resolved paths
pub(crate) struct ProjectContext {
    pub(crate) root: PathBuf,
    pub(crate) config: Config,
    pub(crate) sources: SourcesConfig,
    pub(crate) stores: StoresConfig,
}

impl ProjectContext {
    pub(crate) fn crm_source_dir(&self) -> PathBuf {
        self.sources.crm_dir(&self.root)
    }

    pub(crate) fn erp_source_dir(&self) -> PathBuf {
        self.sources.erp_dir(&self.root)
    }

    pub(crate) fn crm_store(&self) -> PathBuf {
        self.stores.crm_path(&self.root)
    }

    pub(crate) fn erp_store(&self) -> PathBuf {
        self.stores.erp_path(&self.root)
    }

    pub(crate) fn warehouse_store(&self) -> PathBuf {
        self.stores.warehouse_path(&self.root)
    }
}

/// Load the project configuration and resolve the active target
pub(crate) fn load_project(global: &GlobalArgs) -> Result<ProjectContext> {
    let root = PathBuf::from(&global.project_dir);
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path)),
        None => Config::load_from_dir(&root),
    }
    .context("Failed to load project configuration")?;

    let target = Config::resolve_target(global.target.as_deref());
    if global.verbose {
        eprintln!(
            "[verbose] project '{}', target: {}",
            config.name,
            target.as_deref().unwrap_or("(default)")
        );
    }

    let sources = config.get_sources(target.as_deref())?;
    let stores = config.get_stores(target.as_deref())?;

    Ok(ProjectContext {
        root,
        config,
        sources,
        stores,
    })
}

/// Open a store file, creating parent directories as needed.
///
/// Connection failures are reported here and mapped to the database exit
/// code.
pub(crate) fn open_store(path: &Path) -> Result<DuckDbBackend> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create store directory {}", parent.display())
            })?;
        }
    }
    match DuckDbBackend::from_path(path) {
        Ok(db) => Ok(db),
        Err(e) => {
            eprintln!("Error: {}", e);
            Err(ExitCode(EXIT_DATABASE).into())
        }
    }
}

/// True when the error already carries a process exit code
pub(crate) fn carries_exit_code(err: &anyhow::Error) -> bool {
    err.downcast_ref::<ExitCode>().is_some()
}
