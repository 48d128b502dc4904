//! Publish command implementation

use anyhow::Result;
use sl_core::catalog;
use sl_warehouse::{publish_views, ViewsStatus};

use crate::cli::{GlobalArgs, PublishArgs};
use crate::commands::common::{
    carries_exit_code, load_project, open_store, ExitCode, ProjectContext, EXIT_WAREHOUSE,
};

/// Execute the publish command
pub async fn execute(_args: &PublishArgs, global: &GlobalArgs) -> Result<()> {
    let project = load_project(global)?;

    match publish(&project).await {
        Ok(ViewsStatus::Ready) => {
            println!("Published views:");
            for view in catalog::VIEWS {
                println!("  \u{2713} {}", view);
            }
            Ok(())
        }
        Ok(ViewsStatus::NotReady { missing }) => {
            // not an error: callers fall back to the base relations
            println!(
                "Warehouse not ready - view publication skipped (missing: {})",
                missing.join(", ")
            );
            Ok(())
        }
        Err(e) => {
            if carries_exit_code(&e) {
                return Err(e);
            }
            println!("  \u{2717} view publication - {:#}", e);
            Err(ExitCode(EXIT_WAREHOUSE).into())
        }
    }
}

/// Publish the analytical views over the warehouse store.
///
/// The warehouse connection lives only for the duration of this call.
pub(crate) async fn publish(project: &ProjectContext) -> Result<ViewsStatus> {
    let db = open_store(&project.warehouse_store())?;
    Ok(publish_views(&db).await?)
}
