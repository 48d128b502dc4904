//! Warehouse assembly: customer/product reconciliation and fact projection
//!
//! The CRM staging relations are the authoritative row sets. Both
//! dimensions are built with left outer joins so the anchor side is never
//! dropped or duplicated; ERP attributes are NULL where no normalized key
//! matches. The fact table is a pure column-renaming projection of the
//! staged sales orders.

use crate::error::{WarehouseError, WarehouseResult};
use sl_core::catalog;
use sl_core::sql::{quote_ident, quote_qualified};
use sl_db::Database;

/// Qualified names of the six staging relations feeding the warehouse.
///
/// The pipeline reaches staging through attached store catalogs; tests
/// can point the builders at relations on the local connection instead.
#[derive(Debug, Clone)]
pub struct StagingRefs {
    pub customer_info: String,
    pub product_info: String,
    pub sales_details: String,
    pub customer_demographics: String,
    pub customer_location: String,
    pub product_categories: String,
}

impl StagingRefs {
    /// Staging relations reached through the attached store catalogs
    pub fn attached() -> Self {
        Self::qualified(catalog::CRM_ATTACH_ALIAS, catalog::ERP_ATTACH_ALIAS)
    }

    /// Staging relations qualified by explicit catalog aliases
    pub fn qualified(crm: &str, erp: &str) -> Self {
        Self {
            customer_info: format!("{}.{}", crm, catalog::CRM_CUSTOMER_INFO.staging_relation),
            product_info: format!("{}.{}", crm, catalog::CRM_PRODUCT_INFO.staging_relation),
            sales_details: format!("{}.{}", crm, catalog::CRM_SALES_DETAILS.staging_relation),
            customer_demographics: format!(
                "{}.{}",
                erp,
                catalog::ERP_CUSTOMER_DEMOGRAPHICS.staging_relation
            ),
            customer_location: format!(
                "{}.{}",
                erp,
                catalog::ERP_CUSTOMER_LOCATION.staging_relation
            ),
            product_categories: format!(
                "{}.{}",
                erp,
                catalog::ERP_PRODUCT_CATEGORIES.staging_relation
            ),
        }
    }

    /// Unqualified staging relations on the current connection
    pub fn local() -> Self {
        Self {
            customer_info: catalog::CRM_CUSTOMER_INFO.staging_relation.to_string(),
            product_info: catalog::CRM_PRODUCT_INFO.staging_relation.to_string(),
            sales_details: catalog::CRM_SALES_DETAILS.staging_relation.to_string(),
            customer_demographics: catalog::ERP_CUSTOMER_DEMOGRAPHICS
                .staging_relation
                .to_string(),
            customer_location: catalog::ERP_CUSTOMER_LOCATION.staging_relation.to_string(),
            product_categories: catalog::ERP_PRODUCT_CATEGORIES.staging_relation.to_string(),
        }
    }

    fn all(&self) -> [&str; 6] {
        [
            &self.customer_info,
            &self.product_info,
            &self.sales_details,
            &self.customer_demographics,
            &self.customer_location,
            &self.product_categories,
        ]
    }
}

/// Row count reported for one built warehouse relation
#[derive(Debug, Clone)]
pub struct BuiltRelation {
    /// Warehouse relation name
    pub relation: String,
    /// Rows written
    pub rows: usize,
}

/// Customer dimension: CRM customers left-joined with normalized ERP
/// demographics, then location, on the shared natural key.
///
/// CRM gender and marital status are kept verbatim even when an ERP
/// demographics row matches; the ERP gender column is not consulted.
pub fn customer_dimension_select(refs: &StagingRefs) -> String {
    format!(
        "SELECT\n    \
            c.cst_id AS customer_id,\n    \
            c.cst_key AS customer_key,\n    \
            c.cst_firstname AS first_name,\n    \
            c.cst_lastname AS last_name,\n    \
            c.cst_gndr AS gender,\n    \
            c.cst_marital_status AS marital_status,\n    \
            d.bdate AS birth_date,\n    \
            l.cntry AS country,\n    \
            c.cst_create_date AS create_date\n\
        FROM {customers} c\n\
        LEFT JOIN {demographics} d ON c.cst_key = d.cid\n\
        LEFT JOIN {locations} l ON c.cst_key = l.cid",
        customers = quote_qualified(&refs.customer_info),
        demographics = quote_qualified(&refs.customer_demographics),
        locations = quote_qualified(&refs.customer_location),
    )
}

/// Product dimension: CRM products left-joined with ERP categories on the
/// category code derived from the product key's first hyphen segment.
pub fn product_dimension_select(refs: &StagingRefs) -> String {
    format!(
        "SELECT\n    \
            p.prd_id AS product_id,\n    \
            p.prd_key AS product_key,\n    \
            p.prd_nm AS product_name,\n    \
            p.prd_cost AS product_cost,\n    \
            p.prd_line AS product_line,\n    \
            c.cat AS category,\n    \
            c.subcat AS subcategory,\n    \
            c.maintenance AS maintenance_required,\n    \
            p.prd_start_dt AS start_date,\n    \
            p.prd_end_dt AS end_date\n\
        FROM {products} p\n\
        LEFT JOIN {categories} c ON split_part(p.prd_key, '-', 1) = c.id",
        products = quote_qualified(&refs.product_info),
        categories = quote_qualified(&refs.product_categories),
    )
}

/// Sales fact: column-renaming projection of the staged sales orders
pub fn sales_fact_select(refs: &StagingRefs) -> String {
    format!(
        "SELECT\n    \
            sls_ord_num AS order_number,\n    \
            sls_prd_key AS product_key,\n    \
            sls_cust_id AS customer_id,\n    \
            sls_order_dt AS order_date,\n    \
            sls_ship_dt AS ship_date,\n    \
            sls_due_dt AS due_date,\n    \
            sls_sales AS sales_amount,\n    \
            sls_quantity AS quantity,\n    \
            sls_price AS unit_price\n\
        FROM {sales}",
        sales = quote_qualified(&refs.sales_details),
    )
}

/// Build the three warehouse relations with full-replace semantics.
///
/// All six staging relations must exist before anything is written; each
/// output then transitions from old content to new in a single statement.
/// There is no transaction spanning the three writes — a concurrent reader
/// may observe a mix of old and new relations mid-build.
pub async fn build_warehouse(
    db: &dyn Database,
    refs: &StagingRefs,
) -> WarehouseResult<Vec<BuiltRelation>> {
    for name in refs.all() {
        if !db.relation_exists(name).await? {
            return Err(WarehouseError::MissingRelation {
                name: name.to_string(),
            });
        }
    }

    let targets = [
        (catalog::DIM_CUSTOMERS, customer_dimension_select(refs)),
        (catalog::DIM_PRODUCTS, product_dimension_select(refs)),
        (catalog::FACT_SALES, sales_fact_select(refs)),
    ];

    let mut built = Vec::with_capacity(targets.len());
    for (name, select) in targets {
        db.create_table_as(name, &select, true).await?;
        let rows = db
            .query_count(&format!("SELECT * FROM {}", quote_ident(name)))
            .await?;
        log::info!("built {} ({} rows)", name, rows);
        built.push(BuiltRelation {
            relation: name.to_string(),
            rows,
        });
    }

    Ok(built)
}

#[cfg(test)]
#[path = "builder_test.rs"]
mod tests;
