//! sl-warehouse - Warehouse builder and view publisher
//!
//! Reads the two staging stores, reconciles customer and product identity
//! across source systems, and produces the conformed star schema:
//! `dim_customers`, `dim_products`, `fact_sales`, plus three analytical
//! views derived from them. All outputs are rebuilt with a single
//! `CREATE OR REPLACE` per relation on every run.

pub mod builder;
pub mod error;
pub mod views;

pub use builder::{build_warehouse, BuiltRelation, StagingRefs};
pub use error::{WarehouseError, WarehouseResult};
pub use views::{publish_views, ViewsStatus};
