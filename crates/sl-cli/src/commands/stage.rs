//! Stage command implementation

use anyhow::Result;
use sl_core::catalog::SourceSystem;
use sl_staging::{stage_crm, stage_erp, StagedTable};

use crate::cli::{GlobalArgs, StageArgs, StageSystem};
use crate::commands::common::{
    carries_exit_code, load_project, open_store, ExitCode, ProjectContext, EXIT_STAGING,
};

/// Execute the stage command
pub async fn execute(args: &StageArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    let systems: &[SourceSystem] = match args.system {
        StageSystem::Crm => &[SourceSystem::Crm],
        StageSystem::Erp => &[SourceSystem::Erp],
        StageSystem::All => &[SourceSystem::Crm, SourceSystem::Erp],
    };

    for &system in systems {
        match stage_system(&project, system).await {
            Ok(staged) => {
                println!("Staged {} extracts:", system);
                for table in &staged {
                    println!("  \u{2713} {} ({} rows)", table.relation, table.rows);
                }
            }
            Err(e) => {
                if carries_exit_code(&e) {
                    return Err(e);
                }
                println!("  \u{2717} {} staging - {:#}", system, e);
                return Err(ExitCode(EXIT_STAGING).into());
            }
        }
    }

    Ok(())
}

/// Stage one source system into its store.
///
/// The store connection lives only for the duration of this call.
pub(crate) async fn stage_system(
    project: &ProjectContext,
    system: SourceSystem,
) -> Result<Vec<StagedTable>> {
    let (store, source_dir) = match system {
        SourceSystem::Crm => (project.crm_store(), project.crm_source_dir()),
        SourceSystem::Erp => (project.erp_store(), project.erp_source_dir()),
    };

    let db = open_store(&store)?;
    let staged = match system {
        SourceSystem::Crm => stage_crm(&db, &source_dir).await?,
        SourceSystem::Erp => stage_erp(&db, &source_dir).await?,
    };
    Ok(staged)
}
