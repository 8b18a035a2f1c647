//! Integration tests for tool discovery and routing.

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use storefront_mcp_core::{TOOL_NAME, ToolDescriptor};
use storefront_mcp_integration_tests::{app, config};
use tower::ServiceExt;

#[tokio::test]
async fn test_toollist_without_credentials() {
    // Discovery never needs Storefront credentials
    let response = app(config(&[]))
        .oneshot(
            Request::builder()
                .uri("/toollist")
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("router is infallible");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("body should read");
    let tools: Vec<ToolDescriptor> =
        serde_json::from_slice(&bytes).expect("descriptors should deserialize");

    assert_eq!(tools.len(), 1);
    let tool = tools.first().expect("one descriptor");
    assert_eq!(tool.name, TOOL_NAME);
    assert_eq!(
        tool.description,
        "Lookup products and availability in Shopify Storefront"
    );
    assert_eq!(tool.input_schema["searchTerm"], "string");
}

#[tokio::test]
async fn test_unknown_path_is_plain_not_found() {
    let response = app(config(&[]))
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .body(Body::from("{}"))
                .expect("request should build"),
        )
        .await
        .expect("router is infallible");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let bytes = to_bytes(response.into_body(), 1024)
        .await
        .expect("body should read");
    assert_eq!(&bytes[..], b"Not Found");
}
