//! Database trait definition

use crate::error::DbResult;
use async_trait::async_trait;

/// Options controlling CSV ingestion
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoadOptions {
    /// Load every column as VARCHAR instead of letting the reader sniff
    /// types. The staging transforms own all type coercion, so raw loads
    /// set this to keep parsing behavior independent of the sniffer.
    pub all_varchar: bool,
}

/// Database abstraction trait for Starlift
///
/// Implementations must be Send + Sync for async operation.
#[async_trait]
pub trait Database: Send + Sync {
    /// Execute SQL that modifies data, returns affected rows
    async fn execute(&self, sql: &str) -> DbResult<usize>;

    /// Execute multiple SQL statements
    async fn execute_batch(&self, sql: &str) -> DbResult<()>;

    /// Create table from SELECT statement
    async fn create_table_as(&self, name: &str, select: &str, replace: bool) -> DbResult<()>;

    /// Create view from SELECT statement
    async fn create_view_as(&self, name: &str, select: &str, replace: bool) -> DbResult<()>;

    /// Check if a table or view exists
    async fn relation_exists(&self, name: &str) -> DbResult<bool>;

    /// Execute query returning row count
    async fn query_count(&self, sql: &str) -> DbResult<usize>;

    /// Query and return sample rows as formatted strings
    /// Returns up to `limit` rows, each as a comma-separated string
    async fn query_sample_rows(&self, sql: &str, limit: usize) -> DbResult<Vec<String>>;

    /// Load a CSV file into a table, replacing any previous contents
    async fn load_csv(&self, table: &str, path: &str, options: CsvLoadOptions) -> DbResult<()>;

    /// Drop a table or view if it exists
    async fn drop_if_exists(&self, name: &str) -> DbResult<()>;

    /// Attach another store file read-only under a catalog alias
    async fn attach_read_only(&self, path: &str, alias: &str) -> DbResult<()>;

    /// Detach a previously attached store
    async fn detach(&self, alias: &str) -> DbResult<()>;

    /// Database type identifier for logging
    fn db_type(&self) -> &'static str;
}
