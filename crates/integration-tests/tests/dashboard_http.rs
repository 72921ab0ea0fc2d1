//! HTTP tests against a running dashboard.
//!
//! These tests require:
//! - A running `MongoDB`
//! - The dashboard running (cargo run -p eshop-admin)
//!
//! Run with: cargo test -p eshop-integration-tests -- --ignored

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode, redirect};

use eshop_integration_tests::admin_base_url;

fn client() -> Client {
    Client::builder()
        .redirect(redirect::Policy::none())
        .build()
        .unwrap()
}

#[tokio::test]
#[ignore = "Requires running dashboard and MongoDB"]
async fn test_health_endpoints() {
    let base_url = admin_base_url();

    let resp = client().get(format!("{base_url}/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = client()
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running dashboard and MongoDB"]
async fn test_views_render() {
    let base_url = admin_base_url();

    for path in [
        "/",
        "/manage",
        "/manage?collection=users",
        "/manage?collection=logs",
        "/analysis",
        "/analysis?report=stock",
        "/analysis?report=actions",
    ] {
        let resp = client().get(format!("{base_url}{path}")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "GET {path}");

        let body = resp.text().await.unwrap();
        assert!(body.contains("Big-Data Analysis"), "sidebar missing on {path}");
    }
}

#[tokio::test]
#[ignore = "Requires running dashboard and MongoDB"]
async fn test_bad_parameters_rejected() {
    let base_url = admin_base_url();

    let resp = client()
        .get(format!("{base_url}/manage?collection=orders"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = client()
        .post(format!("{base_url}/manage/products/not-an-id/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running dashboard and MongoDB"]
async fn test_unknown_id_shows_warning() {
    let base_url = admin_base_url();

    let resp = client()
        .get(format!(
            "{base_url}/manage?collection=products&id=000000000000000000000000"
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.unwrap().contains("Document not found"));
}

#[tokio::test]
#[ignore = "Requires running dashboard and MongoDB"]
async fn test_delete_missing_id_redirects() {
    let base_url = admin_base_url();

    let resp = client()
        .post(format!(
            "{base_url}/manage/products/000000000000000000000000/delete"
        ))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_redirection());
    assert_eq!(
        resp.headers().get("location").unwrap(),
        "/manage?collection=products&notice=deleted"
    );
}
