use super::*;
use sl_core::catalog;
use sl_db::{Database, DuckDbBackend};

/// Seed minimal warehouse base relations directly.
async fn seed_warehouse(db: &DuckDbBackend) {
    db.execute_batch(
        "CREATE TABLE dim_customers (
            customer_id INTEGER, customer_key VARCHAR, first_name VARCHAR, last_name VARCHAR,
            gender VARCHAR, marital_status VARCHAR, birth_date DATE, country VARCHAR,
            create_date DATE
        );
        CREATE TABLE dim_products (
            product_id INTEGER, product_key VARCHAR, product_name VARCHAR, product_cost DOUBLE,
            product_line VARCHAR, category VARCHAR, subcategory VARCHAR,
            maintenance_required VARCHAR, start_date DATE, end_date DATE
        );
        CREATE TABLE fact_sales (
            order_number VARCHAR, product_key VARCHAR, customer_id INTEGER,
            order_date DATE, ship_date DATE, due_date DATE,
            sales_amount DOUBLE, quantity INTEGER, unit_price DOUBLE
        );
        INSERT INTO dim_customers VALUES
            (1, 'AW001', 'Jon', 'Yang', 'M', 'M', NULL, 'Australia', DATE '2025-10-06'),
            (2, 'AW002', 'Eugene', 'Huang', 'M', 'S', NULL, 'Germany', DATE '2025-10-07');
        INSERT INTO dim_products VALUES
            (210, 'BIKE-RED-01', 'Red Road Bike', 1200.50, 'R', 'Bikes', 'Road Bikes', 'true',
             DATE '2024-01-01', DATE '2024-12-31');
        INSERT INTO fact_sales VALUES
            ('SO001', 'BIKE-RED-01', 1, DATE '2024-01-05', DATE '2024-01-10', DATE '2024-01-15', 100.0, 1, 100.0),
            ('SO002', 'BIKE-RED-01', 2, DATE '2024-01-20', DATE '2024-01-25', DATE '2024-01-30', 300.0, 1, 300.0),
            ('SO003', 'BIKE-RED-01', 2, DATE '2024-02-01', DATE '2024-02-05', DATE '2024-02-10', 50.0, 1, 50.0);",
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_not_ready_when_warehouse_empty() {
    let db = DuckDbBackend::in_memory().unwrap();

    let status = publish_views(&db).await.unwrap();

    assert!(!status.is_ready());
    assert_eq!(
        status,
        ViewsStatus::NotReady {
            missing: vec![
                "dim_customers".to_string(),
                "dim_products".to_string(),
                "fact_sales".to_string(),
            ]
        }
    );
    for view in catalog::VIEWS {
        assert!(!db.relation_exists(view).await.unwrap());
    }
}

#[tokio::test]
async fn test_not_ready_when_partially_built() {
    let db = DuckDbBackend::in_memory().unwrap();
    db.execute_batch("CREATE TABLE dim_customers (customer_id INTEGER);")
        .await
        .unwrap();

    let status = publish_views(&db).await.unwrap();

    assert_eq!(
        status,
        ViewsStatus::NotReady {
            missing: vec!["dim_products".to_string(), "fact_sales".to_string()]
        }
    );
}

#[tokio::test]
async fn test_publish_creates_all_views() {
    let db = DuckDbBackend::in_memory().unwrap();
    seed_warehouse(&db).await;

    let status = publish_views(&db).await.unwrap();

    assert!(status.is_ready());
    for view in catalog::VIEWS {
        assert!(db.relation_exists(view).await.unwrap());
    }
}

#[tokio::test]
async fn test_sales_by_customer_ordering_and_name() {
    let db = DuckDbBackend::in_memory().unwrap();
    seed_warehouse(&db).await;
    publish_views(&db).await.unwrap();

    let rows = db
        .query_sample_rows("SELECT * FROM vw_sales_by_customer", 10)
        .await
        .unwrap();
    // Eugene has 350.0 across two orders and sorts first
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], "2, Eugene Huang, Germany, 2, 350");
    assert_eq!(rows[1], "1, Jon Yang, Australia, 1, 100");
}

#[tokio::test]
async fn test_sales_by_product_totals() {
    let db = DuckDbBackend::in_memory().unwrap();
    seed_warehouse(&db).await;
    publish_views(&db).await.unwrap();

    let rows = db
        .query_sample_rows("SELECT * FROM vw_sales_by_product", 10)
        .await
        .unwrap();
    assert_eq!(
        rows,
        vec!["210, Red Road Bike, Bikes, Road Bikes, 3, 3, 450".to_string()]
    );
}

#[tokio::test]
async fn test_sales_by_date_groups_by_month_ascending() {
    let db = DuckDbBackend::in_memory().unwrap();
    seed_warehouse(&db).await;
    publish_views(&db).await.unwrap();

    let rows = db
        .query_sample_rows("SELECT * FROM vw_sales_by_date", 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], "2024, 1, 2, 400");
    assert_eq!(rows[1], "2024, 2, 1, 50");
}

#[tokio::test]
async fn test_views_are_live_over_base_tables() {
    let db = DuckDbBackend::in_memory().unwrap();
    seed_warehouse(&db).await;
    publish_views(&db).await.unwrap();

    db.execute_batch("DELETE FROM fact_sales WHERE order_number <> 'SO001';")
        .await
        .unwrap();

    let rows = db
        .query_sample_rows("SELECT * FROM vw_sales_by_customer", 10)
        .await
        .unwrap();
    assert_eq!(rows, vec!["1, Jon Yang, Australia, 1, 100".to_string()]);
}

#[tokio::test]
async fn test_republish_is_idempotent() {
    let db = DuckDbBackend::in_memory().unwrap();
    seed_warehouse(&db).await;

    assert!(publish_views(&db).await.unwrap().is_ready());
    assert!(publish_views(&db).await.unwrap().is_ready());

    let rows = db
        .query_sample_rows("SELECT * FROM vw_sales_by_product", 10)
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn test_not_ready_leaves_existing_views_untouched() {
    let db = DuckDbBackend::in_memory().unwrap();
    seed_warehouse(&db).await;
    publish_views(&db).await.unwrap();

    db.execute_batch("DROP TABLE fact_sales;").await.unwrap();
    let status = publish_views(&db).await.unwrap();

    assert_eq!(
        status,
        ViewsStatus::NotReady {
            missing: vec!["fact_sales".to_string()]
        }
    );
    // prior definitions are not dropped by a skipped publish
    assert!(db
        .relation_exists(catalog::VW_SALES_BY_CUSTOMER)
        .await
        .unwrap());
}
