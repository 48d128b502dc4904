//! Configuration types and parsing for starlift.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main project configuration from starlift.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Project name
    pub name: String,

    /// Project version
    #[serde(default = "default_version")]
    pub version: String,

    /// Directories holding the raw CRM and ERP extracts
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Paths of the staging and warehouse store files
    #[serde(default)]
    pub stores: StoresConfig,

    /// Named target configurations (e.g., dev, prod)
    /// Each target can override source directories and store paths
    #[serde(default)]
    pub targets: HashMap<String, TargetConfig>,
}

/// Directories containing the raw CSV extracts, one per source system
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    /// CRM extract directory
    #[serde(default = "default_crm_source_dir")]
    pub crm: String,

    /// ERP extract directory
    #[serde(default = "default_erp_source_dir")]
    pub erp: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            crm: default_crm_source_dir(),
            erp: default_erp_source_dir(),
        }
    }
}

impl SourcesConfig {
    /// Get the absolute CRM extract directory relative to a project root
    pub fn crm_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.crm)
    }

    /// Get the absolute ERP extract directory relative to a project root
    pub fn erp_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.erp)
    }
}

/// Paths of the three DuckDB store files.
///
/// Pipeline stages exchange data only through these files: the staging
/// normalizers each write one store, and the warehouse build attaches the
/// two staging stores read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoresConfig {
    /// CRM staging store
    #[serde(default = "default_crm_store")]
    pub crm: String,

    /// ERP staging store
    #[serde(default = "default_erp_store")]
    pub erp: String,

    /// Warehouse store (dimensions, fact, views)
    #[serde(default = "default_warehouse_store")]
    pub warehouse: String,
}

impl Default for StoresConfig {
    fn default() -> Self {
        Self {
            crm: default_crm_store(),
            erp: default_erp_store(),
            warehouse: default_warehouse_store(),
        }
    }
}

impl StoresConfig {
    /// Get the absolute CRM staging store path relative to a project root
    pub fn crm_path(&self, root: &Path) -> PathBuf {
        root.join(&self.crm)
    }

    /// Get the absolute ERP staging store path relative to a project root
    pub fn erp_path(&self, root: &Path) -> PathBuf {
        root.join(&self.erp)
    }

    /// Get the absolute warehouse store path relative to a project root
    pub fn warehouse_path(&self, root: &Path) -> PathBuf {
        root.join(&self.warehouse)
    }
}

/// Target-specific configuration overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Source directory overrides
    #[serde(default)]
    pub sources: Option<SourcesConfig>,

    /// Store path overrides
    #[serde(default)]
    pub stores: Option<StoresConfig>,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_crm_source_dir() -> String {
    "data/source_crm".to_string()
}

fn default_erp_source_dir() -> String {
    "data/source_erp".to_string()
}

fn default_crm_store() -> String {
    "data/staging_crm.duckdb".to_string()
}

fn default_erp_store() -> String {
    "data/staging_erp.duckdb".to_string()
}

fn default_warehouse_store() -> String {
    "data/warehouse.duckdb".to_string()
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a project directory
    /// Looks for starlift.yml or starlift.yaml
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        let yml_path = dir.join("starlift.yml");
        let yaml_path = dir.join("starlift.yaml");

        if yml_path.exists() {
            Self::load(&yml_path)
        } else if yaml_path.exists() {
            Self::load(&yaml_path)
        } else {
            Err(CoreError::ConfigNotFound {
                path: dir.join("starlift.yml").display().to_string(),
            })
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if self.name.is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "Project name cannot be empty".to_string(),
            });
        }

        for (target, stores) in std::iter::once((None, &self.stores)).chain(
            self.targets
                .iter()
                .filter_map(|(name, tc)| tc.stores.as_ref().map(|s| (Some(name.as_str()), s))),
        ) {
            for (store, path) in [
                ("crm", &stores.crm),
                ("erp", &stores.erp),
                ("warehouse", &stores.warehouse),
            ] {
                if path.is_empty() || path == ":memory:" {
                    let scope = target.map_or(String::new(), |t| format!(" (target '{}')", t));
                    return Err(CoreError::ConfigInvalid {
                        message: format!(
                            "Store '{}'{} must be a file path: stages exchange data through store files",
                            store, scope
                        ),
                    });
                }
            }
        }

        Ok(())
    }

    /// Get the list of available target names
    pub fn available_targets(&self) -> Vec<&str> {
        self.targets.keys().map(|s| s.as_str()).collect()
    }

    /// Look up a target, with an error listing the available names
    fn target(&self, name: &str) -> CoreResult<&TargetConfig> {
        self.targets
            .get(name)
            .ok_or_else(|| CoreError::ConfigInvalid {
                message: format!(
                    "Target '{}' not found. Available targets: {}",
                    name,
                    self.targets
                        .keys()
                        .map(|k| k.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }

    /// Get source directories, optionally applying target overrides
    pub fn get_sources(&self, target: Option<&str>) -> CoreResult<SourcesConfig> {
        match target {
            Some(name) => Ok(self
                .target(name)?
                .sources
                .clone()
                .unwrap_or_else(|| self.sources.clone())),
            None => Ok(self.sources.clone()),
        }
    }

    /// Get store paths, optionally applying target overrides
    pub fn get_stores(&self, target: Option<&str>) -> CoreResult<StoresConfig> {
        match target {
            Some(name) => Ok(self
                .target(name)?
                .stores
                .clone()
                .unwrap_or_else(|| self.stores.clone())),
            None => Ok(self.stores.clone()),
        }
    }

    /// Resolve target from CLI flag or STARLIFT_TARGET environment variable
    ///
    /// Priority: CLI flag > STARLIFT_TARGET env var > None
    pub fn resolve_target(cli_target: Option<&str>) -> Option<String> {
        cli_target
            .map(String::from)
            .or_else(|| std::env::var("STARLIFT_TARGET").ok())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
