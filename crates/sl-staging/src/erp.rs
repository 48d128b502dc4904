//! ERP staging normalizer
//!
//! ERP identifiers carry source-system formatting that must be stripped
//! before they can match CRM natural keys: demographics ids wear a fixed
//! literal prefix, location ids are hyphenated. Free-text categorical
//! codes are recoded into a closed vocabulary; values already in the
//! vocabulary, or outside the known variants, pass through unchanged.

use crate::{stage_table, StagedTable, StagingResult};
use sl_core::catalog::{
    ERP_CUSTOMER_DEMOGRAPHICS, ERP_CUSTOMER_LOCATION, ERP_DEMOGRAPHICS_ID_PREFIX,
    ERP_PRODUCT_CATEGORIES,
};
use sl_core::sql::{quote_ident, str_literal};
use sl_db::Database;
use std::path::Path;

/// Stage the three ERP extracts into their staging relations
pub async fn stage_erp(db: &dyn Database, source_dir: &Path) -> StagingResult<Vec<StagedTable>> {
    let steps = [
        (
            &ERP_CUSTOMER_DEMOGRAPHICS,
            customer_demographics_select(ERP_CUSTOMER_DEMOGRAPHICS.raw_relation),
        ),
        (
            &ERP_CUSTOMER_LOCATION,
            customer_location_select(ERP_CUSTOMER_LOCATION.raw_relation),
        ),
        (
            &ERP_PRODUCT_CATEGORIES,
            product_categories_select(ERP_PRODUCT_CATEGORIES.raw_relation),
        ),
    ];

    let mut staged = Vec::with_capacity(steps.len());
    for (table, select) in steps {
        staged.push(stage_table(db, source_dir, table, &select).await?);
    }
    Ok(staged)
}

/// Transform for `erp_customer_demographics`: prefix-stripped id, strict
/// birth date, gender recode
pub fn customer_demographics_select(raw: &str) -> String {
    let prefix = str_literal(ERP_DEMOGRAPHICS_ID_PREFIX);
    format!(
        "SELECT\n    \
            CASE WHEN starts_with(CID, {prefix}) \
                THEN substr(CID, {offset}) ELSE CID END AS cid,\n    \
            CAST(BDATE AS DATE) AS bdate,\n    \
            CASE WHEN GEN = 'Male' THEN 'M' WHEN GEN = 'Female' THEN 'F' ELSE GEN END AS gen\n\
        FROM {raw}",
        prefix = prefix,
        offset = ERP_DEMOGRAPHICS_ID_PREFIX.len() + 1,
        raw = quote_ident(raw)
    )
}

/// Transform for `erp_customer_location`: hyphen-stripped id
pub fn customer_location_select(raw: &str) -> String {
    format!(
        "SELECT\n    \
            REPLACE(CID, '-', '') AS cid,\n    \
            CNTRY AS cntry\n\
        FROM {}",
        quote_ident(raw)
    )
}

/// Transform for `erp_product_categories`: maintenance flag recode
pub fn product_categories_select(raw: &str) -> String {
    format!(
        "SELECT\n    \
            ID AS id,\n    \
            CAT AS cat,\n    \
            SUBCAT AS subcat,\n    \
            CASE WHEN MAINTENANCE = 'Yes' THEN 'true' \
                 WHEN MAINTENANCE = 'No' THEN 'false' \
                 ELSE MAINTENANCE END AS maintenance\n\
        FROM {}",
        quote_ident(raw)
    )
}

#[cfg(test)]
#[path = "erp_test.rs"]
mod tests;
