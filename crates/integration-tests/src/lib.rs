//! Integration tests for the Storefront MCP router.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p storefront-mcp-integration-tests
//! ```
//!
//! No Shopify store is needed: [`FakeStorefront`] serves canned GraphQL
//! responses on an ephemeral local port and records what the router sent.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::State,
    http::{HeaderMap, Request, StatusCode, header},
    routing::post,
};
use serde_json::Value;
use storefront_mcp::config::McpConfig;
use storefront_mcp::state::AppState;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower::ServiceExt;

/// Path the fake serves, mirroring the real Storefront endpoint.
pub const GRAPHQL_PATH: &str = "/api/2026-01/graphql.json";

/// Store domain used by test configurations.
pub const TEST_STORE: &str = "test-shop.myshopify.com";

/// Access token used by test configurations.
pub const TEST_TOKEN: &str = "shpat_test_9f8e7d6c5b4a";

/// A request received by the fake Storefront API.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request headers.
    pub headers: HeaderMap,
    /// Parsed JSON body (`{query, variables, operationName}`).
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: Arc<String>,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// In-process stand-in for the Shopify Storefront GraphQL endpoint.
pub struct FakeStorefront {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl FakeStorefront {
    /// Serve `body` with status 200 for every request.
    pub async fn json(body: &Value) -> Self {
        Self::start(StatusCode::OK, body.to_string(), Duration::ZERO).await
    }

    /// Serve a raw `body` with the given status for every request.
    pub async fn raw(status: StatusCode, body: &str) -> Self {
        Self::start(status, body.to_string(), Duration::ZERO).await
    }

    /// Serve `body` after sleeping for `delay`.
    pub async fn delayed(body: &Value, delay: Duration) -> Self {
        Self::start(StatusCode::OK, body.to_string(), delay).await
    }

    async fn start(status: StatusCode, body: String, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status,
            body: Arc::new(body),
            delay,
            requests: Arc::clone(&requests),
        };

        let router = Router::new()
            .route(GRAPHQL_PATH, post(graphql))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("fake storefront should bind");
        let addr = listener.local_addr().expect("listener has an address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("fake storefront should serve");
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// Full GraphQL endpoint URL of the fake.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("http://{}{GRAPHQL_PATH}", self.addr)
    }

    /// Requests received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .expect("request log lock poisoned")
            .clone()
    }
}

impl Drop for FakeStorefront {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn graphql(
    State(state): State<FakeState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, HeaderMap, String) {
    let body = serde_json::from_str(&body).unwrap_or(Value::Null);
    state
        .requests
        .lock()
        .expect("request log lock poisoned")
        .push(RecordedRequest { headers, body });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("application/json"),
    );
    (state.status, response_headers, state.body.as_str().to_string())
}

/// Address nothing is listening on.
pub async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("probe listener should bind");
    let addr = listener.local_addr().expect("listener has an address");
    drop(listener);
    format!("http://{addr}{GRAPHQL_PATH}")
}

/// Build a router configuration from `(key, value)` variables.
pub fn config(vars: &[(&str, &str)]) -> McpConfig {
    let vars: Vec<(String, String)> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();

    McpConfig::from_lookup(|key| {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test configuration should load")
}

/// Configuration pointing the router at `endpoint` with test credentials.
pub fn config_for(endpoint: &str) -> McpConfig {
    config(&[
        ("SHOPIFY_STORE", TEST_STORE),
        ("SHOPIFY_STOREFRONT_TOKEN", TEST_TOKEN),
        ("SHOPIFY_STOREFRONT_ENDPOINT", endpoint),
    ])
}

/// Build the application router for `config`.
pub fn app(config: McpConfig) -> Router {
    storefront_mcp::app(AppState::new(config).expect("state should build"))
}

/// POST `body` to `/run` and return the status and JSON response.
pub async fn invoke(app: Router, body: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/run")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("router is infallible");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body should read");
    let json = serde_json::from_slice(&bytes).expect("response should be JSON");
    (status, json)
}

/// A Storefront product node with one variant per quantity.
#[must_use]
pub fn product_node(handle: &str, available_for_sale: bool, quantities: &[Option<i64>]) -> Value {
    let variants: Vec<Value> = quantities
        .iter()
        .enumerate()
        .map(|(i, quantity)| {
            serde_json::json!({
                "id": format!("gid://shopify/ProductVariant/{handle}-{i}"),
                "title": format!("Option {i}"),
                "availableForSale": available_for_sale,
                "currentlyNotInStock": quantity.is_none_or(|q| q <= 0),
                "quantityAvailable": quantity
            })
        })
        .collect();

    serde_json::json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "title": handle.replace('-', " "),
        "availableForSale": available_for_sale,
        "variants": { "nodes": variants }
    })
}
