//! Tool invocation handler.

use axum::{Json, body::Bytes, extract::State};
use storefront_mcp_core::{InvocationRequest, InvocationResponse};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Invoke the `Shopify_MCP` tool.
///
/// Validation runs before the credential check so client mistakes are
/// reported as 400 even on a misconfigured deployment. At most one upstream
/// call is made.
///
/// # Errors
///
/// - 400 for invalid JSON, an unknown tool, bad arguments, or no selector
/// - 500 for missing credentials or an upstream transport failure
#[instrument(skip_all)]
pub async fn run(State(state): State<AppState>, body: Bytes) -> Result<Json<InvocationResponse>> {
    let body: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| AppError::InvalidJson)?;

    let InvocationRequest { arguments, .. } = InvocationRequest::from_value(body)?;
    let selector = arguments.selector()?;

    let credentials = state.config().shopify.credentials()?;
    let products = state
        .storefront()
        .lookup_products(&credentials, &selector)
        .await?;

    tracing::info!(
        kind = selector.kind(),
        mode = arguments.mode.as_deref().unwrap_or_default(),
        count = products.len(),
        "Tool invocation complete"
    );

    Ok(Json(InvocationResponse {
        products,
        matched_root_intent: arguments.mode,
    }))
}
