//! sl-staging - Staging normalizers for the CRM and ERP extracts
//!
//! Each normalizer ingests one source system's CSV extracts into its
//! staging store: the raw file is bulk-loaded into a transient relation,
//! then the staging relation is rebuilt with a single
//! `CREATE OR REPLACE TABLE ... AS SELECT` applying the source-specific
//! coercions. Row counts are preserved exactly; a staging relation is
//! either fully replaced or left in its prior state.

pub mod crm;
pub mod erp;
pub mod error;

pub use crm::stage_crm;
pub use erp::stage_erp;
pub use error::{StagingError, StagingResult};

use sl_core::catalog::SourceTable;
use sl_core::sql::quote_ident;
use sl_db::{CsvLoadOptions, Database};
use std::path::Path;

/// Row count reported for one staged relation
#[derive(Debug, Clone)]
pub struct StagedTable {
    /// Staging relation name
    pub relation: String,
    /// Rows staged (equals the raw file's row count)
    pub rows: usize,
}

/// Stage one source extract: existence check, raw load, transform, cleanup.
///
/// The raw file is loaded with `all_varchar` so every coercion is owned by
/// the transform SELECT. The transient raw relation is dropped whether or
/// not the transform succeeds.
async fn stage_table(
    db: &dyn Database,
    source_dir: &Path,
    table: &SourceTable,
    select: &str,
) -> StagingResult<StagedTable> {
    let path = source_dir.join(table.file_name);
    if !path.exists() {
        return Err(StagingError::SourceMissing {
            path: path.display().to_string(),
        });
    }

    db.load_csv(
        table.raw_relation,
        &path.display().to_string(),
        CsvLoadOptions { all_varchar: true },
    )
    .await
    .map_err(|e| StagingError::Stage {
        relation: table.staging_relation.to_string(),
        source: e,
    })?;

    let result = db.create_table_as(table.staging_relation, select, true).await;
    let _ = db.drop_if_exists(table.raw_relation).await;
    result.map_err(|e| StagingError::Stage {
        relation: table.staging_relation.to_string(),
        source: e,
    })?;

    let rows = db
        .query_count(&format!(
            "SELECT * FROM {}",
            quote_ident(table.staging_relation)
        ))
        .await?;

    log::info!(
        "staged {} from {} ({} rows)",
        table.staging_relation,
        table.file_name,
        rows
    );

    Ok(StagedTable {
        relation: table.staging_relation.to_string(),
        rows,
    })
}
