//! DuckDB database backend implementation

use crate::error::{DbError, DbResult};
use crate::traits::{CsvLoadOptions, Database};
use async_trait::async_trait;
use duckdb::Connection;
use sl_core::sql::{quote_ident, quote_qualified, str_literal};
use std::path::Path;
use std::sync::Mutex;

/// DuckDB database backend
pub struct DuckDbBackend {
    conn: Mutex<Connection>,
}

impl DuckDbBackend {
    /// Create a new in-memory DuckDB connection
    pub fn in_memory() -> DbResult<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create a new DuckDB connection from a file path
    pub fn from_path(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(|e| DbError::ConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create from path string (handles :memory: special case)
    pub fn new(path: &str) -> DbResult<Self> {
        if path == ":memory:" {
            Self::in_memory()
        } else {
            Self::from_path(Path::new(path))
        }
    }

    /// Execute SQL synchronously
    fn execute_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.conn.lock().unwrap();
        conn.execute(sql, [])
            .map_err(|e| DbError::ExecutionError(format!("{}: {}", e, sql)))
    }

    /// Execute batch SQL synchronously
    fn execute_batch_sync(&self, sql: &str) -> DbResult<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(sql)
            .map_err(|e| DbError::ExecutionError(e.to_string()))
    }

    /// Query count synchronously
    fn query_count_sync(&self, sql: &str) -> DbResult<usize> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM ({})", sql), [], |row| {
                row.get(0)
            })
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;
        Ok(count as usize)
    }

    /// Check if relation exists synchronously.
    ///
    /// A qualified name may be qualified by either a schema or an attached
    /// catalog alias, so the qualifier is matched against both columns.
    fn relation_exists_sync(&self, name: &str) -> DbResult<bool> {
        let conn = self.conn.lock().unwrap();

        let sql = match name.rfind('.') {
            Some(pos) => format!(
                "SELECT COUNT(*) FROM information_schema.tables \
                 WHERE table_name = {} AND (table_schema = {} OR table_catalog = {})",
                str_literal(&name[pos + 1..]),
                str_literal(&name[..pos]),
                str_literal(&name[..pos]),
            ),
            None => format!(
                "SELECT COUNT(*) FROM information_schema.tables WHERE table_name = {}",
                str_literal(name)
            ),
        };

        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;

        Ok(count > 0)
    }

    /// Query sample rows synchronously
    fn query_sample_rows_sync(&self, sql: &str, limit: usize) -> DbResult<Vec<String>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare(&format!("SELECT * FROM ({}) LIMIT {}", sql, limit))
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;

        let rows: Vec<String> = stmt
            .query_map([], |row| {
                let col_count = row.as_ref().column_count();
                Ok((0..col_count)
                    .map(|i| column_as_string(row, i))
                    .collect::<Vec<_>>()
                    .join(", "))
            })
            .map_err(|e| DbError::ExecutionError(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DbError::ExecutionError(e.to_string()))?;

        Ok(rows)
    }
}

/// Read a column value as a String, trying multiple DuckDB types.
///
/// DuckDB integer columns return `None` for `Option<String>`, so we try
/// String -> i64 -> f64 -> bool, then fall back to the raw `Value` for
/// temporal columns, and finally "null".
fn column_as_string(row: &duckdb::Row<'_>, idx: usize) -> String {
    if let Ok(Some(s)) = row.get::<_, Option<String>>(idx) {
        return s;
    }
    if let Ok(Some(n)) = row.get::<_, Option<i64>>(idx) {
        return n.to_string();
    }
    if let Ok(Some(f)) = row.get::<_, Option<f64>>(idx) {
        return f.to_string();
    }
    if let Ok(Some(b)) = row.get::<_, Option<bool>>(idx) {
        return b.to_string();
    }
    if let Ok(value) = row.get::<_, duckdb::types::Value>(idx) {
        if let Some(s) = temporal_value_as_string(&value) {
            return s;
        }
    }
    "null".to_string()
}

/// Render DATE and TIMESTAMP values, which have no FromSql conversion to
/// the primitive types tried above.
fn temporal_value_as_string(value: &duckdb::types::Value) -> Option<String> {
    use duckdb::types::{TimeUnit, Value};

    match value {
        Value::Date32(days) => {
            let epoch = chrono::NaiveDate::from_ymd_opt(1970, 1, 1)?;
            let date = epoch.checked_add_signed(chrono::Duration::days(*days as i64))?;
            Some(date.to_string())
        }
        Value::Timestamp(unit, raw) => {
            let micros = match unit {
                TimeUnit::Second => raw.checked_mul(1_000_000)?,
                TimeUnit::Millisecond => raw.checked_mul(1_000)?,
                TimeUnit::Microsecond => *raw,
                TimeUnit::Nanosecond => raw / 1_000,
            };
            let ts = chrono::DateTime::from_timestamp_micros(micros)?;
            Some(ts.naive_utc().to_string())
        }
        _ => None,
    }
}

#[async_trait]
impl Database for DuckDbBackend {
    async fn execute(&self, sql: &str) -> DbResult<usize> {
        self.execute_sync(sql)
    }

    async fn execute_batch(&self, sql: &str) -> DbResult<()> {
        self.execute_batch_sync(sql)
    }

    async fn create_table_as(&self, name: &str, select: &str, replace: bool) -> DbResult<()> {
        let sql = if replace {
            format!(
                "CREATE OR REPLACE TABLE {} AS {}",
                quote_qualified(name),
                select
            )
        } else {
            format!("CREATE TABLE {} AS {}", quote_qualified(name), select)
        };
        self.execute_sync(&sql)?;
        Ok(())
    }

    async fn create_view_as(&self, name: &str, select: &str, replace: bool) -> DbResult<()> {
        let sql = if replace {
            format!(
                "CREATE OR REPLACE VIEW {} AS {}",
                quote_qualified(name),
                select
            )
        } else {
            format!("CREATE VIEW {} AS {}", quote_qualified(name), select)
        };
        self.execute_sync(&sql)?;
        Ok(())
    }

    async fn relation_exists(&self, name: &str) -> DbResult<bool> {
        self.relation_exists_sync(name)
    }

    async fn query_count(&self, sql: &str) -> DbResult<usize> {
        self.query_count_sync(sql)
    }

    async fn query_sample_rows(&self, sql: &str, limit: usize) -> DbResult<Vec<String>> {
        self.query_sample_rows_sync(sql, limit)
    }

    async fn load_csv(&self, table: &str, path: &str, options: CsvLoadOptions) -> DbResult<()> {
        let mut reader_args = vec![str_literal(path), "header = true".to_string()];
        if options.all_varchar {
            reader_args.push("all_varchar = true".to_string());
        }
        let sql = format!(
            "CREATE OR REPLACE TABLE {} AS SELECT * FROM read_csv({})",
            quote_qualified(table),
            reader_args.join(", ")
        );
        self.execute_sync(&sql)
            .map_err(|e| DbError::CsvError(format!("{}: {}", path, e)))?;
        Ok(())
    }

    async fn drop_if_exists(&self, name: &str) -> DbResult<()> {
        // Try dropping as view first, then as table
        let quoted = quote_qualified(name);
        let _ = self.execute_sync(&format!("DROP VIEW IF EXISTS {}", quoted));
        let _ = self.execute_sync(&format!("DROP TABLE IF EXISTS {}", quoted));
        Ok(())
    }

    async fn attach_read_only(&self, path: &str, alias: &str) -> DbResult<()> {
        let sql = format!(
            "ATTACH {} AS {} (READ_ONLY)",
            str_literal(path),
            quote_ident(alias)
        );
        self.execute_sync(&sql).map_err(|e| DbError::AttachError {
            path: path.to_string(),
            alias: alias.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    async fn detach(&self, alias: &str) -> DbResult<()> {
        self.execute_sync(&format!("DETACH {}", quote_ident(alias)))?;
        Ok(())
    }

    fn db_type(&self) -> &'static str {
        "duckdb"
    }
}
