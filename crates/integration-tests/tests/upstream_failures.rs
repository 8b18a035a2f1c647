//! Integration tests for configuration and upstream failures on `/run`.

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::json;
use storefront_mcp_integration_tests::{
    FakeStorefront, TEST_STORE, TEST_TOKEN, app, closed_endpoint, config, config_for, invoke,
};

fn search_request() -> serde_json::Value {
    json!({
        "tool": "Shopify_MCP",
        "arguments": {"mode": "search", "searchTerm": "pineapple"}
    })
}

#[tokio::test]
async fn test_missing_token_reported_without_value() {
    let (status, body) = invoke(
        app(config(&[("SHOPIFY_STORE", TEST_STORE)])),
        &search_request(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "error": "Missing Shopify configuration",
            "SHOPIFY_STORE": TEST_STORE,
            "SHOPIFY_STOREFRONT_TOKEN": "MISSING"
        })
    );
}

#[tokio::test]
async fn test_missing_store_never_echoes_token() {
    let (status, body) = invoke(
        app(config(&[("SHOPIFY_STOREFRONT_TOKEN", TEST_TOKEN)])),
        &search_request(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["SHOPIFY_STORE"], "MISSING");
    assert_eq!(body["SHOPIFY_STOREFRONT_TOKEN"], "SET");
    assert!(!body.to_string().contains(TEST_TOKEN));
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let (status, body) = invoke(app(config_for(&closed_endpoint().await)), &search_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error fetching from Shopify");
    assert!(body["details"].as_str().is_some_and(|d| !d.is_empty()));
    assert!(!body.to_string().contains(TEST_TOKEN));
}

#[tokio::test]
async fn test_non_json_upstream_body() {
    let fake = FakeStorefront::raw(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>").await;

    let (status, body) = invoke(app(config_for(&fake.endpoint())), &search_request()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error fetching from Shopify");
    assert!(
        body["details"]
            .as_str()
            .is_some_and(|d| d.contains("HTTP 502"))
    );
}

#[tokio::test]
async fn test_upstream_error_status_with_json_is_tolerated() {
    let fake = FakeStorefront::raw(
        StatusCode::UNAUTHORIZED,
        r#"{"errors":[{"message":"Invalid Storefront access token"}]}"#,
    )
    .await;

    let (status, body) = invoke(app(config_for(&fake.endpoint())), &search_request()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"products": [], "matchedRootIntent": "search"}));
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let fake = FakeStorefront::delayed(
        &json!({"data": {"products": {"nodes": []}}}),
        Duration::from_secs(5),
    )
    .await;
    let endpoint = fake.endpoint();

    let (status, body) = invoke(
        app(config(&[
            ("SHOPIFY_STORE", TEST_STORE),
            ("SHOPIFY_STOREFRONT_TOKEN", TEST_TOKEN),
            ("SHOPIFY_STOREFRONT_ENDPOINT", &endpoint),
            ("SHOPIFY_TIMEOUT_SECS", "1"),
        ])),
        &search_request(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Error fetching from Shopify");
}
