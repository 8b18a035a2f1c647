//! Integration tests for `/run` against a fake Storefront API.

use axum::http::StatusCode;
use serde_json::json;
use storefront_mcp_integration_tests::{
    FakeStorefront, TEST_TOKEN, app, config, config_for, invoke, product_node,
};

#[tokio::test]
async fn test_search_maps_availability() {
    let fake = FakeStorefront::json(&json!({
        "data": {
            "products": {
                "nodes": [
                    product_node("pineapple-rings", true, &[Some(0), Some(0), Some(5)]),
                    product_node("pineapple-chips", true, &[Some(0), Some(0)]),
                    product_node("pineapple-jam", false, &[Some(5)])
                ]
            }
        }
    }))
    .await;

    let (status, body) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({
            "tool": "Shopify_MCP",
            "arguments": {"mode": "search", "searchTerm": "pineapple"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedRootIntent"], "search");

    let availability: Vec<_> = body["products"]
        .as_array()
        .expect("products array")
        .iter()
        .map(|p| (p["handle"].clone(), p["availability"].clone()))
        .collect();
    assert_eq!(
        availability,
        vec![
            (json!("pineapple-rings"), json!("in_stock")),
            (json!("pineapple-chips"), json!("backorder_possible")),
            (json!("pineapple-jam"), json!("sold_out")),
        ]
    );

    let variant = &body["products"][0]["variants"][2];
    assert_eq!(variant["quantityAvailable"], 5);
    assert_eq!(variant["availableForSale"], true);
    assert!(variant.get("currentlyNotInStock").is_none());
}

#[tokio::test]
async fn test_search_sends_query_and_default_limit() {
    let fake = FakeStorefront::json(&json!({"data": {"products": {"nodes": []}}})).await;

    let (status, body) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({
            "tool": "Shopify_MCP",
            "arguments": {"mode": "search", "searchTerm": "dried mango"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"products": [], "matchedRootIntent": "search"}));

    let requests = fake.requests();
    assert_eq!(requests.len(), 1, "exactly one upstream call");
    let request = requests.first().expect("one request");
    assert_eq!(request.body["operationName"], "SearchProducts");
    assert_eq!(request.body["variables"], json!({"q": "dried mango", "limit": 5}));
    assert_eq!(
        request.headers["x-shopify-storefront-access-token"],
        TEST_TOKEN
    );
    assert_eq!(request.headers["content-type"], "application/json");
}

#[tokio::test]
async fn test_search_passes_explicit_limit() {
    let fake = FakeStorefront::json(&json!({"data": {"products": {"nodes": []}}})).await;

    let (status, _) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({
            "tool": "Shopify_MCP",
            "arguments": {"mode": "search", "searchTerm": "tea", "limit": 12}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let requests = fake.requests();
    assert_eq!(requests[0].body["variables"]["limit"], 12);
}

#[tokio::test]
async fn test_by_handle_wins_over_search_term() {
    let fake = FakeStorefront::json(&json!({
        "data": {"product": product_node("dried-pineapple", true, &[Some(3)])}
    }))
    .await;

    let (status, body) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({
            "tool": "Shopify_MCP",
            "arguments": {
                "mode": "byHandle",
                "handle": "dried-pineapple",
                "searchTerm": "ignored"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["matchedRootIntent"], "byHandle");
    assert_eq!(body["products"].as_array().map(Vec::len), Some(1));
    assert_eq!(body["products"][0]["handle"], "dried-pineapple");
    assert_eq!(body["products"][0]["availability"], "in_stock");

    let requests = fake.requests();
    assert_eq!(requests[0].body["operationName"], "ProductByHandle");
    assert_eq!(requests[0].body["variables"], json!({"h": "dried-pineapple"}));
}

#[tokio::test]
async fn test_by_handle_missing_product_is_empty() {
    let fake = FakeStorefront::json(&json!({"data": {"product": null}})).await;

    let (status, body) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({
            "tool": "Shopify_MCP",
            "arguments": {"mode": "byHandle", "handle": "no-such-product"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"products": [], "matchedRootIntent": "byHandle"}));
}

#[tokio::test]
async fn test_graphql_errors_are_treated_as_empty() {
    let fake = FakeStorefront::json(&json!({
        "errors": [{"message": "Throttled", "extensions": {"code": "THROTTLED"}}]
    }))
    .await;

    let (status, body) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({
            "tool": "Shopify_MCP",
            "arguments": {"mode": "search", "searchTerm": "tea"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], json!([]));
}

#[tokio::test]
async fn test_private_token_header() {
    let fake = FakeStorefront::json(&json!({"data": {"products": {"nodes": []}}})).await;
    let endpoint = fake.endpoint();

    let (status, _) = invoke(
        app(config(&[
            ("SHOPIFY_STORE", "test-shop.myshopify.com"),
            ("SHOPIFY_STOREFRONT_TOKEN", TEST_TOKEN),
            ("SHOPIFY_STOREFRONT_TOKEN_KIND", "private"),
            ("SHOPIFY_STOREFRONT_ENDPOINT", &endpoint),
        ])),
        &json!({"tool": "Shopify_MCP", "arguments": {"searchTerm": "tea"}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let requests = fake.requests();
    let headers = &requests[0].headers;
    assert_eq!(headers["shopify-storefront-private-token"], TEST_TOKEN);
    assert!(!headers.contains_key("x-shopify-storefront-access-token"));
}

#[tokio::test]
async fn test_missing_mode_omits_intent() {
    let fake = FakeStorefront::json(&json!({"data": {"products": {"nodes": []}}})).await;

    let (status, body) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({"tool": "Shopify_MCP", "arguments": {"searchTerm": "tea"}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"products": []}));
}

#[tokio::test]
async fn test_invalid_input_never_reaches_upstream() {
    let fake = FakeStorefront::json(&json!({"data": {}})).await;
    let app = app(config_for(&fake.endpoint()));

    for (request, error) in [
        (
            json!({"tool": "Other", "arguments": {"searchTerm": "tea"}}),
            "Unknown tool",
        ),
        (
            json!({"tool": "Shopify_MCP", "arguments": {"mode": "byHandle"}}),
            "Missing handle or searchTerm",
        ),
        (
            json!({"tool": "Shopify_MCP", "arguments": {"handle": "tea"}}),
            "Missing handle or searchTerm",
        ),
    ] {
        let (status, body) = invoke(app.clone(), &request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], error);
    }

    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_zero_limit_is_sent_and_returns_nothing() {
    let fake = FakeStorefront::json(&json!({
        "data": {"products": {"nodes": [product_node("green-tea", true, &[Some(4)])]}}
    }))
    .await;

    let (status, body) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({"tool": "Shopify_MCP", "arguments": {"searchTerm": "tea", "limit": 0}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"products": []}));
    let requests = fake.requests();
    assert_eq!(requests[0].body["variables"], json!({"q": "tea", "limit": 0}));
}

#[tokio::test]
async fn test_negative_limit_is_sent_unchanged() {
    let fake = FakeStorefront::json(&json!({
        "data": {"products": {"nodes": [product_node("green-tea", true, &[Some(4)])]}}
    }))
    .await;

    let (status, body) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({"tool": "Shopify_MCP", "arguments": {"searchTerm": "tea", "limit": -3}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"], json!([]));
    assert_eq!(fake.requests()[0].body["variables"]["limit"], -3);
}

#[tokio::test]
async fn test_float_limit_is_sent_as_integer() {
    let fake = FakeStorefront::json(&json!({"data": {"products": {"nodes": []}}})).await;

    let (status, _) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({"tool": "Shopify_MCP", "arguments": {"searchTerm": "tea", "limit": 5.0}}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let requests = fake.requests();
    let limit = &requests[0].body["variables"]["limit"];
    assert!(limit.is_i64() || limit.is_u64(), "limit sent as {limit}");
    assert_eq!(limit.as_i64(), Some(5));
}

#[tokio::test]
async fn test_non_object_arguments_report_missing_selector() {
    let fake = FakeStorefront::json(&json!({"data": {}})).await;

    let (status, body) = invoke(
        app(config_for(&fake.endpoint())),
        &json!({"tool": "Shopify_MCP", "arguments": "oops"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing handle or searchTerm"}));
    assert!(fake.requests().is_empty());
}
