//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /toollist   - Tool descriptors for agent discovery
//! POST /run        - Invoke the Shopify_MCP tool
//! *    anything    - 404 "Not Found"
//! ```
//!
//! A wrong method on a known path is also a 404, not a 405.

pub mod run;
pub mod tools;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the router with all tool routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/toollist", get(tools::list).fallback(not_found))
        .route("/run", post(run::run).fallback(not_found))
        .fallback(not_found)
}

/// Plain-text 404 for unknown paths and methods.
pub async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
