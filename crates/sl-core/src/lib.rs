//! sl-core - Core library for Starlift
//!
//! Shared types used across the pipeline crates: project configuration,
//! error types, the fixed catalog of source extracts and warehouse
//! relations, and SQL identifier quoting utilities.

pub mod catalog;
pub mod config;
pub mod error;
pub mod sql;

pub use config::Config;
pub use error::{CoreError, CoreResult};
