//! sl-db - Database abstraction layer for Starlift
//!
//! This crate provides the `Database` trait and the DuckDB implementation
//! used for the staging and warehouse stores.

pub mod duckdb;
pub mod error;
pub mod traits;

pub use duckdb::DuckDbBackend;
pub use error::{DbError, DbResult};
pub use traits::{CsvLoadOptions, Database};
