//! Error types for sl-staging

use sl_db::DbError;
use thiserror::Error;

/// Staging normalizer errors
#[derive(Error, Debug)]
pub enum StagingError {
    /// S001: Source extract file missing; nothing was written
    #[error("[S001] Source file not found: {path}")]
    SourceMissing { path: String },

    /// S002: Failed to load or transform a source extract
    #[error("[S002] Failed to stage {relation}: {source}")]
    Stage { relation: String, source: DbError },

    /// S003: Database error outside a specific table's load
    #[error("[S003] Database error: {0}")]
    Db(#[from] DbError),
}

/// Result type alias for StagingError
pub type StagingResult<T> = Result<T, StagingError>;
