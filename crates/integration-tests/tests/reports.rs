//! Integration tests for the aggregation reports.
//!
//! These tests require a running `MongoDB` reachable via `MONGO_URL`.
//!
//! Run with: cargo test -p eshop-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use mongodb::bson::doc;
use rand::SeedableRng;
use rand::rngs::StdRng;

use eshop_admin::db::{DocumentRepository, LIST_LIMIT, ReportRepository};
use eshop_admin::models::Product;
use eshop_admin::services::{DataGenerator, SeedPlan};
use eshop_core::CollectionName;
use eshop_integration_tests::TestContext;

async fn seeded() -> TestContext {
    let ctx = TestContext::new().await.unwrap();
    let mut rng = StdRng::seed_from_u64(21);
    DataGenerator::new(&ctx.db)
        .seed(SeedPlan::default(), &mut rng)
        .await
        .unwrap();
    ctx
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_stock_by_category_totals() {
    let ctx = seeded().await;

    let products = DocumentRepository::new(&ctx.db)
        .list(CollectionName::Products, LIST_LIMIT)
        .await
        .unwrap();
    let total_stock: i64 = products
        .into_iter()
        .map(|d| i64::from(Product::from_document(d).unwrap().stock))
        .sum();

    let rows = ReportRepository::new(&ctx.db)
        .stock_by_category()
        .await
        .unwrap();

    assert_eq!(rows.iter().map(|r| r.total_stock).sum::<i64>(), total_stock);
    assert_eq!(rows.iter().map(|r| r.total_products).sum::<i64>(), 50);
    assert!(rows.windows(2).all(|w| w[0].total_stock >= w[1].total_stock));

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_actions_by_type_totals() {
    let ctx = seeded().await;

    let rows = ReportRepository::new(&ctx.db)
        .actions_by_type()
        .await
        .unwrap();

    assert_eq!(rows.iter().map(|r| r.count).sum::<i64>(), 1000);
    assert!(rows.len() <= 4);
    assert!(rows.windows(2).all(|w| w[0].count >= w[1].count));

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_reports_on_empty_database() {
    let ctx = TestContext::new().await.unwrap();
    let reports = ReportRepository::new(&ctx.db);

    assert!(reports.stock_by_category().await.unwrap().is_empty());
    assert!(reports.actions_by_type().await.unwrap().is_empty());

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
#[ignore = "Requires running MongoDB"]
async fn test_stock_report_groups_raw_stored_documents() {
    let ctx = TestContext::new().await.unwrap();

    ctx.db
        .collection(CollectionName::Products)
        .insert_many([
            doc! { "nome": "Mesa", "categoria": "Casa", "preco": 12.5, "estoque": 7 },
            doc! { "nome": "Sofá", "categoria": "Casa", "preco": 39.9, "estoque": 3 },
            doc! { "nome": "Bola", "categoria": "Esportes", "preco": 5.0, "estoque": 20 },
        ])
        .await
        .unwrap();

    let rows = ReportRepository::new(&ctx.db)
        .stock_by_category()
        .await
        .unwrap();

    let summary: Vec<(&str, i64, i64)> = rows
        .iter()
        .map(|r| (r.category.as_str(), r.total_products, r.total_stock))
        .collect();
    assert_eq!(summary, vec![("Esportes", 1, 20), ("Casa", 2, 10)]);

    ctx.cleanup().await.unwrap();
}
