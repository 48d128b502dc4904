//! Error types for sl-warehouse

use sl_db::DbError;
use thiserror::Error;

/// Warehouse build and publish errors
#[derive(Error, Debug)]
pub enum WarehouseError {
    /// W001: Prerequisite relation missing; nothing was written
    #[error("[W001] Required relation not found: {name}")]
    MissingRelation { name: String },

    /// W002: Database error
    #[error("[W002] Database error: {0}")]
    Db(#[from] DbError),
}

/// Result type alias for WarehouseError
pub type WarehouseResult<T> = Result<T, WarehouseError>;
