//! Fixed catalog of source extracts and warehouse relations
//!
//! The pipeline works over a closed set of inputs and outputs: six CSV
//! extracts (three per source system), six staging relations, three
//! warehouse relations, and three analytical views. This module is the
//! single place their names are defined.

use std::fmt;

/// Source system a staging relation originates from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSystem {
    /// Customer relationship management extract
    Crm,
    /// Enterprise resource planning extract
    Erp,
}

impl fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSystem::Crm => write!(f, "crm"),
            SourceSystem::Erp => write!(f, "erp"),
        }
    }
}

/// One raw extract file and the staging relation it feeds
#[derive(Debug, Clone, Copy)]
pub struct SourceTable {
    /// Owning source system
    pub system: SourceSystem,
    /// CSV file name inside the system's extract directory
    pub file_name: &'static str,
    /// Transient relation the raw file is bulk-loaded into
    pub raw_relation: &'static str,
    /// Staging relation produced by the normalizer
    pub staging_relation: &'static str,
}

/// CRM customer master: surrogate id, natural key, names, demographics
pub const CRM_CUSTOMER_INFO: SourceTable = SourceTable {
    system: SourceSystem::Crm,
    file_name: "cust_info.csv",
    raw_relation: "raw_cust_info",
    staging_relation: "crm_customer_info",
};

/// CRM product master: identity, cost, line, validity window
pub const CRM_PRODUCT_INFO: SourceTable = SourceTable {
    system: SourceSystem::Crm,
    file_name: "prd_info.csv",
    raw_relation: "raw_prd_info",
    staging_relation: "crm_product_info",
};

/// CRM sales orders, keyed by order number
pub const CRM_SALES_DETAILS: SourceTable = SourceTable {
    system: SourceSystem::Crm,
    file_name: "sales_details.csv",
    raw_relation: "raw_sales_details",
    staging_relation: "crm_sales_details",
};

/// ERP customer demographics; ids carry the `NASA` prefix
pub const ERP_CUSTOMER_DEMOGRAPHICS: SourceTable = SourceTable {
    system: SourceSystem::Erp,
    file_name: "CUST_AZ12.csv",
    raw_relation: "raw_cust_az12",
    staging_relation: "erp_customer_demographics",
};

/// ERP customer location; ids are hyphenated
pub const ERP_CUSTOMER_LOCATION: SourceTable = SourceTable {
    system: SourceSystem::Erp,
    file_name: "LOC_A101.csv",
    raw_relation: "raw_loc_a101",
    staging_relation: "erp_customer_location",
};

/// ERP product category lookup, keyed by category code
pub const ERP_PRODUCT_CATEGORIES: SourceTable = SourceTable {
    system: SourceSystem::Erp,
    file_name: "PX_CAT_G1V2.csv",
    raw_relation: "raw_px_cat_g1v2",
    staging_relation: "erp_product_categories",
};

/// The three CRM extracts, in staging order
pub const CRM_TABLES: [SourceTable; 3] =
    [CRM_CUSTOMER_INFO, CRM_PRODUCT_INFO, CRM_SALES_DETAILS];

/// The three ERP extracts, in staging order
pub const ERP_TABLES: [SourceTable; 3] = [
    ERP_CUSTOMER_DEMOGRAPHICS,
    ERP_CUSTOMER_LOCATION,
    ERP_PRODUCT_CATEGORIES,
];

/// All extracts for a source system
pub fn tables_for(system: SourceSystem) -> &'static [SourceTable] {
    match system {
        SourceSystem::Crm => &CRM_TABLES,
        SourceSystem::Erp => &ERP_TABLES,
    }
}

/// Customer dimension relation
pub const DIM_CUSTOMERS: &str = "dim_customers";
/// Product dimension relation
pub const DIM_PRODUCTS: &str = "dim_products";
/// Sales fact relation
pub const FACT_SALES: &str = "fact_sales";

/// Warehouse base relations, in build order
pub const WAREHOUSE_RELATIONS: [&str; 3] = [DIM_CUSTOMERS, DIM_PRODUCTS, FACT_SALES];

/// Sales aggregated per customer
pub const VW_SALES_BY_CUSTOMER: &str = "vw_sales_by_customer";
/// Sales aggregated per product
pub const VW_SALES_BY_PRODUCT: &str = "vw_sales_by_product";
/// Sales aggregated per calendar month
pub const VW_SALES_BY_DATE: &str = "vw_sales_by_date";

/// Analytical views, in publish order
pub const VIEWS: [&str; 3] = [VW_SALES_BY_CUSTOMER, VW_SALES_BY_PRODUCT, VW_SALES_BY_DATE];

/// Fixed literal prefix on ERP demographics customer ids, stripped during
/// staging to recover the natural key shared with the CRM
pub const ERP_DEMOGRAPHICS_ID_PREFIX: &str = "NASA";

/// Catalog alias the CRM staging store is attached under during the build
pub const CRM_ATTACH_ALIAS: &str = "crm";
/// Catalog alias the ERP staging store is attached under during the build
pub const ERP_ATTACH_ALIAS: &str = "erp";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_for_crm() {
        let tables = tables_for(SourceSystem::Crm);
        assert_eq!(tables.len(), 3);
        assert!(tables.iter().all(|t| t.system == SourceSystem::Crm));
    }

    #[test]
    fn test_tables_for_erp() {
        let tables = tables_for(SourceSystem::Erp);
        assert_eq!(tables.len(), 3);
        assert!(tables.iter().all(|t| t.system == SourceSystem::Erp));
    }

    #[test]
    fn test_relation_names_are_distinct() {
        let mut names: Vec<&str> = CRM_TABLES
            .iter()
            .chain(ERP_TABLES.iter())
            .flat_map(|t| [t.raw_relation, t.staging_relation])
            .chain(WAREHOUSE_RELATIONS)
            .chain(VIEWS)
            .collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn test_source_system_display() {
        assert_eq!(SourceSystem::Crm.to_string(), "crm");
        assert_eq!(SourceSystem::Erp.to_string(), "erp");
    }
}
