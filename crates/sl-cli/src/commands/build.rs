//! Build command implementation

use anyhow::Result;
use sl_core::catalog::{CRM_ATTACH_ALIAS, ERP_ATTACH_ALIAS};
use sl_db::Database;
use sl_warehouse::{build_warehouse, BuiltRelation, StagingRefs};

use crate::cli::{BuildArgs, GlobalArgs};
use crate::commands::common::{
    carries_exit_code, load_project, open_store, ExitCode, ProjectContext, EXIT_WAREHOUSE,
};

/// Execute the build command
pub async fn execute(_args: &BuildArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    match build(&project, global.verbose).await {
        Ok(built) => {
            println!("Built warehouse relations:");
            for relation in &built {
                println!("  \u{2713} {} ({} rows)", relation.relation, relation.rows);
            }
            Ok(())
        }
        Err(e) => {
            if carries_exit_code(&e) {
                return Err(e);
            }
            println!("  \u{2717} warehouse build - {:#}", e);
            Err(ExitCode(EXIT_WAREHOUSE).into())
        }
    }
}

/// Build the warehouse relations from the attached staging stores.
///
/// The warehouse connection, with both staging stores attached read-only,
/// lives only for the duration of this call.
pub(crate) async fn build(
    project: &ProjectContext,
    verbose: bool,
) -> Result<Vec<BuiltRelation>> {
    let db = open_store(&project.warehouse_store())?;

    db.attach_read_only(
        &project.crm_store().display().to_string(),
        CRM_ATTACH_ALIAS,
    )
    .await?;
    db.attach_read_only(
        &project.erp_store().display().to_string(),
        ERP_ATTACH_ALIAS,
    )
    .await?;
    if verbose {
        eprintln!("[verbose] attached staging stores read-only");
    }

    let result = build_warehouse(&db, &StagingRefs::attached()).await;

    // best-effort; the connection is dropped right after
    let _ = db.detach(CRM_ATTACH_ALIAS).await;
    let _ = db.detach(ERP_ATTACH_ALIAS).await;

    Ok(result?)
}
