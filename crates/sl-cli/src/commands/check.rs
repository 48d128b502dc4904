//! Check command: parse-validate every generated SQL statement
//!
//! Renders the staging transforms, warehouse assembly SELECTs, and view
//! definitions exactly as the pipeline would execute them, and runs each
//! through the sqlparser DuckDB dialect. No database is touched.

use anyhow::Result;
use sl_core::catalog;
use sl_staging::{crm, erp};
use sl_warehouse::builder::{
    customer_dimension_select, product_dimension_select, sales_fact_select,
};
use sl_warehouse::{views, StagingRefs};
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser;

use crate::cli::{CheckArgs, GlobalArgs};
use crate::commands::common::ExitCode;

/// Execute the check command
pub async fn execute(_args: &CheckArgs, global: &GlobalArgs) -> Result<()> {
    let statements = collect_statements();
    let dialect = DuckDbDialect {};
    let mut failures = 0;

    for (name, sql) in &statements {
        if global.verbose {
            eprintln!("[verbose] {}:\n{}\n", name, sql);
        }
        match Parser::parse_sql(&dialect, sql) {
            Ok(_) => println!("  \u{2713} {}", name),
            Err(e) => {
                failures += 1;
                println!("  \u{2717} {} - {}", name, e);
            }
        }
    }

    println!(
        "\nChecked {} statements, {} failed",
        statements.len(),
        failures
    );
    if failures > 0 {
        return Err(ExitCode(1).into());
    }
    Ok(())
}

/// Every SELECT the pipeline generates, labeled for reporting
fn collect_statements() -> Vec<(String, String)> {
    let refs = StagingRefs::attached();

    vec![
        (
            format!("staging {}", catalog::CRM_CUSTOMER_INFO.staging_relation),
            crm::customer_info_select(catalog::CRM_CUSTOMER_INFO.raw_relation),
        ),
        (
            format!("staging {}", catalog::CRM_PRODUCT_INFO.staging_relation),
            crm::product_info_select(catalog::CRM_PRODUCT_INFO.raw_relation),
        ),
        (
            format!("staging {}", catalog::CRM_SALES_DETAILS.staging_relation),
            crm::sales_details_select(catalog::CRM_SALES_DETAILS.raw_relation),
        ),
        (
            format!(
                "staging {}",
                catalog::ERP_CUSTOMER_DEMOGRAPHICS.staging_relation
            ),
            erp::customer_demographics_select(catalog::ERP_CUSTOMER_DEMOGRAPHICS.raw_relation),
        ),
        (
            format!("staging {}", catalog::ERP_CUSTOMER_LOCATION.staging_relation),
            erp::customer_location_select(catalog::ERP_CUSTOMER_LOCATION.raw_relation),
        ),
        (
            format!(
                "staging {}",
                catalog::ERP_PRODUCT_CATEGORIES.staging_relation
            ),
            erp::product_categories_select(catalog::ERP_PRODUCT_CATEGORIES.raw_relation),
        ),
        (
            format!("table {}", catalog::DIM_CUSTOMERS),
            customer_dimension_select(&refs),
        ),
        (
            format!("table {}", catalog::DIM_PRODUCTS),
            product_dimension_select(&refs),
        ),
        (
            format!("table {}", catalog::FACT_SALES),
            sales_fact_select(&refs),
        ),
        (
            format!("view {}", catalog::VW_SALES_BY_CUSTOMER),
            views::sales_by_customer_select(),
        ),
        (
            format!("view {}", catalog::VW_SALES_BY_PRODUCT),
            views::sales_by_product_select(),
        ),
        (
            format!("view {}", catalog::VW_SALES_BY_DATE),
            views::sales_by_date_select(),
        ),
    ]
}

#[cfg(test)]
#[path = "check_test.rs"]
mod tests;
