//! CRM staging normalizer
//!
//! The CRM extract is the authoritative row set for customers, products,
//! and sales orders. Customer and product dates must parse: a malformed
//! value fails the `CAST` and aborts the stage. Sales dates arrive in an
//! 8-digit `YYYYMMDD` encoding and are coerced leniently — an unparsable
//! value becomes NULL and the order still loads.

use crate::{stage_table, StagedTable, StagingResult};
use sl_core::catalog::{CRM_CUSTOMER_INFO, CRM_PRODUCT_INFO, CRM_SALES_DETAILS};
use sl_core::sql::quote_ident;
use sl_db::Database;
use std::path::Path;

/// Stage the three CRM extracts into their staging relations
pub async fn stage_crm(db: &dyn Database, source_dir: &Path) -> StagingResult<Vec<StagedTable>> {
    let steps = [
        (
            &CRM_CUSTOMER_INFO,
            customer_info_select(CRM_CUSTOMER_INFO.raw_relation),
        ),
        (
            &CRM_PRODUCT_INFO,
            product_info_select(CRM_PRODUCT_INFO.raw_relation),
        ),
        (
            &CRM_SALES_DETAILS,
            sales_details_select(CRM_SALES_DETAILS.raw_relation),
        ),
    ];

    let mut staged = Vec::with_capacity(steps.len());
    for (table, select) in steps {
        staged.push(stage_table(db, source_dir, table, &select).await?);
    }
    Ok(staged)
}

/// Transform for `crm_customer_info`: strict create date, trimmed names
pub fn customer_info_select(raw: &str) -> String {
    format!(
        "SELECT\n    \
            CAST(cst_id AS INTEGER) AS cst_id,\n    \
            cst_key,\n    \
            TRIM(cst_firstname) AS cst_firstname,\n    \
            TRIM(cst_lastname) AS cst_lastname,\n    \
            cst_marital_status,\n    \
            cst_gndr,\n    \
            CAST(cst_create_date AS DATE) AS cst_create_date\n\
        FROM {}",
        quote_ident(raw)
    )
}

/// Transform for `crm_product_info`: strict validity window, cost default 0
pub fn product_info_select(raw: &str) -> String {
    format!(
        "SELECT\n    \
            CAST(prd_id AS INTEGER) AS prd_id,\n    \
            prd_key,\n    \
            prd_nm,\n    \
            COALESCE(CAST(prd_cost AS DOUBLE), 0) AS prd_cost,\n    \
            prd_line,\n    \
            CAST(prd_start_dt AS DATE) AS prd_start_dt,\n    \
            CAST(prd_end_dt AS DATE) AS prd_end_dt\n\
        FROM {}",
        quote_ident(raw)
    )
}

/// Transform for `crm_sales_details`: lenient `YYYYMMDD` order/ship/due dates
pub fn sales_details_select(raw: &str) -> String {
    format!(
        "SELECT\n    \
            sls_ord_num,\n    \
            sls_prd_key,\n    \
            CAST(sls_cust_id AS INTEGER) AS sls_cust_id,\n    \
            {},\n    \
            {},\n    \
            {},\n    \
            CAST(sls_sales AS DOUBLE) AS sls_sales,\n    \
            CAST(sls_quantity AS INTEGER) AS sls_quantity,\n    \
            CAST(sls_price AS DOUBLE) AS sls_price\n\
        FROM {}",
        lenient_yyyymmdd("sls_order_dt"),
        lenient_yyyymmdd("sls_ship_dt"),
        lenient_yyyymmdd("sls_due_dt"),
        quote_ident(raw)
    )
}

/// Coerce an 8-digit `YYYYMMDD` column to DATE, NULL on any parse failure
fn lenient_yyyymmdd(column: &str) -> String {
    format!(
        "TRY_CAST(try_strptime({col}, '%Y%m%d') AS DATE) AS {col}",
        col = column
    )
}

#[cfg(test)]
#[path = "crm_test.rs"]
mod tests;
