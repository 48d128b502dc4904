//! Analytical view publication
//!
//! The three views are live definitions over the warehouse base relations,
//! recreated idempotently on every publish. Their column sets, joins,
//! grouping, and ordering are a fixed contract with the dashboard reader.

use crate::error::WarehouseResult;
use sl_core::catalog;
use sl_db::Database;

/// Outcome of a publish attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewsStatus {
    /// All three views were (re)created
    Ready,
    /// Base relations absent; nothing was created or dropped
    NotReady { missing: Vec<String> },
}

impl ViewsStatus {
    /// True when the views exist and reflect the latest load
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewsStatus::Ready)
    }
}

/// Per-customer sales rollup: full name, country, order count, total sales
pub fn sales_by_customer_select() -> String {
    "SELECT\n    \
        c.customer_id,\n    \
        c.first_name || ' ' || c.last_name AS customer_name,\n    \
        c.country,\n    \
        COUNT(s.order_number) AS order_count,\n    \
        SUM(s.sales_amount) AS total_sales\n\
    FROM fact_sales s\n\
    JOIN dim_customers c ON s.customer_id = c.customer_id\n\
    GROUP BY c.customer_id, customer_name, c.country\n\
    ORDER BY total_sales DESC"
        .to_string()
}

/// Per-product sales rollup: name, category, subcategory, counts, totals
pub fn sales_by_product_select() -> String {
    "SELECT\n    \
        p.product_id,\n    \
        p.product_name,\n    \
        p.category,\n    \
        p.subcategory,\n    \
        COUNT(s.order_number) AS order_count,\n    \
        SUM(s.quantity) AS total_quantity,\n    \
        SUM(s.sales_amount) AS total_sales\n\
    FROM fact_sales s\n\
    JOIN dim_products p ON s.product_key = p.product_key\n\
    GROUP BY p.product_id, p.product_name, p.category, p.subcategory\n\
    ORDER BY total_sales DESC"
        .to_string()
}

/// Per-calendar-month sales rollup from the order date
pub fn sales_by_date_select() -> String {
    "SELECT\n    \
        EXTRACT(YEAR FROM order_date) AS year,\n    \
        EXTRACT(MONTH FROM order_date) AS month,\n    \
        COUNT(order_number) AS order_count,\n    \
        SUM(sales_amount) AS total_sales\n\
    FROM fact_sales\n\
    GROUP BY year, month\n\
    ORDER BY year, month"
        .to_string()
}

/// (Re)define the three analytical views over the current base relations.
///
/// When any base relation is missing the publish is skipped entirely and
/// `NotReady` is returned so the caller can fall back to direct queries;
/// existing views are left untouched in that case.
pub async fn publish_views(db: &dyn Database) -> WarehouseResult<ViewsStatus> {
    let mut missing = Vec::new();
    for name in catalog::WAREHOUSE_RELATIONS {
        if !db.relation_exists(name).await? {
            missing.push(name.to_string());
        }
    }
    if !missing.is_empty() {
        log::warn!(
            "warehouse not ready, skipping view publication (missing: {})",
            missing.join(", ")
        );
        return Ok(ViewsStatus::NotReady { missing });
    }

    let views = [
        (catalog::VW_SALES_BY_CUSTOMER, sales_by_customer_select()),
        (catalog::VW_SALES_BY_PRODUCT, sales_by_product_select()),
        (catalog::VW_SALES_BY_DATE, sales_by_date_select()),
    ];

    for (name, select) in views {
        db.create_view_as(name, &select, true).await?;
        log::info!("published view {}", name);
    }

    Ok(ViewsStatus::Ready)
}

#[cfg(test)]
#[path = "views_test.rs"]
mod tests;
