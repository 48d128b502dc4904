//! Integration tests for the full Starlift pipeline
//!
//! Drives the library crates the way the CLI does: stage the fixture
//! extracts into file-backed staging stores, build the warehouse over the
//! attached stores, publish the views, and inspect the results.

use sl_core::catalog::{self, CRM_ATTACH_ALIAS, ERP_ATTACH_ALIAS};
use sl_core::Config;
use sl_db::{Database, DuckDbBackend};
use sl_staging::{stage_crm, stage_erp};
use sl_warehouse::{build_warehouse, publish_views, StagingRefs, ViewsStatus};
use std::path::{Path, PathBuf};

fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sample_project")
}

/// Run the whole pipeline against the fixture extracts, using store files
/// under `work_dir`. Returns the warehouse backend with views published.
async fn run_pipeline(work_dir: &Path) -> DuckDbBackend {
    let root = fixture_root();
    let crm_store = work_dir.join("staging_crm.duckdb");
    let erp_store = work_dir.join("staging_erp.duckdb");

    {
        let crm = DuckDbBackend::from_path(&crm_store).unwrap();
        stage_crm(&crm, &root.join("data/source_crm")).await.unwrap();

        let erp = DuckDbBackend::from_path(&erp_store).unwrap();
        stage_erp(&erp, &root.join("data/source_erp")).await.unwrap();
    }

    let warehouse = DuckDbBackend::from_path(&work_dir.join("warehouse.duckdb")).unwrap();
    warehouse
        .attach_read_only(&crm_store.display().to_string(), CRM_ATTACH_ALIAS)
        .await
        .unwrap();
    warehouse
        .attach_read_only(&erp_store.display().to_string(), ERP_ATTACH_ALIAS)
        .await
        .unwrap();

    build_warehouse(&warehouse, &StagingRefs::attached())
        .await
        .unwrap();

    warehouse.detach(CRM_ATTACH_ALIAS).await.unwrap();
    warehouse.detach(ERP_ATTACH_ALIAS).await.unwrap();

    assert!(publish_views(&warehouse).await.unwrap().is_ready());
    warehouse
}

#[test]
fn test_load_sample_project_config() {
    let config = Config::load_from_dir(&fixture_root()).unwrap();

    assert_eq!(config.name, "sample_project");
    assert_eq!(config.sources.crm, "data/source_crm");
    assert_eq!(config.stores.warehouse, "target/warehouse.duckdb");

    let prod = config.get_stores(Some("prod")).unwrap();
    assert_eq!(prod.warehouse, "/srv/starlift/warehouse.duckdb");
}

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let work = tempfile::tempdir().unwrap();
    let warehouse = run_pipeline(work.path()).await;

    // row-count preservation across the whole pipeline
    assert_eq!(
        warehouse
            .query_count("SELECT * FROM dim_customers")
            .await
            .unwrap(),
        3
    );
    assert_eq!(
        warehouse
            .query_count("SELECT * FROM dim_products")
            .await
            .unwrap(),
        2
    );
    assert_eq!(
        warehouse
            .query_count("SELECT * FROM fact_sales")
            .await
            .unwrap(),
        2
    );

    // 'AW001' matches neither normalized ERP key ('001', '13')
    let unmatched = warehouse
        .query_sample_rows(
            "SELECT birth_date, country FROM dim_customers WHERE customer_key = 'AW001'",
            1,
        )
        .await
        .unwrap();
    assert_eq!(unmatched, vec!["null, null".to_string()]);

    // 'NASA13' and '1-3' both normalize to '13' and reconcile
    let matched = warehouse
        .query_sample_rows(
            "SELECT birth_date, country FROM dim_customers WHERE customer_key = '13'",
            1,
        )
        .await
        .unwrap();
    assert_eq!(matched, vec!["1985-06-15, Germany".to_string()]);

    // category derived from the product key's first hyphen segment
    let product = warehouse
        .query_sample_rows(
            "SELECT category, maintenance_required FROM dim_products \
             WHERE product_key = 'BIKE-RED-01'",
            1,
        )
        .await
        .unwrap();
    assert_eq!(product, vec!["Bikes, true".to_string()]);

    // the lenient order date (20231301) loaded as NULL
    let null_dates = warehouse
        .query_count("SELECT * FROM fact_sales WHERE order_date IS NULL")
        .await
        .unwrap();
    assert_eq!(null_dates, 1);
}

#[tokio::test]
async fn test_views_over_pipeline_output() {
    let work = tempfile::tempdir().unwrap();
    let warehouse = run_pipeline(work.path()).await;

    let by_customer = warehouse
        .query_sample_rows("SELECT * FROM vw_sales_by_customer", 10)
        .await
        .unwrap();
    assert_eq!(
        by_customer,
        vec![
            "1, Jon Yang, null, 1, 1200.5".to_string(),
            "3, Ruben Torres, Germany, 1, 10".to_string(),
        ]
    );

    let by_date = warehouse
        .query_sample_rows("SELECT * FROM vw_sales_by_date", 10)
        .await
        .unwrap();
    // the NULL order date groups into its own bucket; DuckDB orders
    // NULLS LAST ascending
    assert_eq!(
        by_date,
        vec!["2024, 1, 1, 1200.5".to_string(), "null, null, 1, 10".to_string()]
    );
}

#[tokio::test]
async fn test_pipeline_is_idempotent() {
    let work = tempfile::tempdir().unwrap();

    let first = run_pipeline(work.path()).await;
    let mut snapshots = Vec::new();
    for relation in catalog::WAREHOUSE_RELATIONS.iter().chain(catalog::VIEWS.iter()) {
        snapshots.push(
            first
                .query_sample_rows(
                    &format!("SELECT * FROM {} ORDER BY 1", relation),
                    100,
                )
                .await
                .unwrap(),
        );
    }
    drop(first);

    let second = run_pipeline(work.path()).await;
    for (i, relation) in catalog::WAREHOUSE_RELATIONS
        .iter()
        .chain(catalog::VIEWS.iter())
        .enumerate()
    {
        let rows = second
            .query_sample_rows(&format!("SELECT * FROM {} ORDER BY 1", relation), 100)
            .await
            .unwrap();
        assert_eq!(rows, snapshots[i], "{} changed between runs", relation);
    }
}

#[tokio::test]
async fn test_publish_before_build_reports_not_ready() {
    let work = tempfile::tempdir().unwrap();
    let warehouse = DuckDbBackend::from_path(&work.path().join("warehouse.duckdb")).unwrap();

    let status = publish_views(&warehouse).await.unwrap();

    assert!(matches!(status, ViewsStatus::NotReady { ref missing } if missing.len() == 3));
    for view in catalog::VIEWS {
        assert!(!warehouse.relation_exists(view).await.unwrap());
    }
}
