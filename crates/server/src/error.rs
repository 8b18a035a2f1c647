//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Route handlers return `Result<T, AppError>`.
//!
//! Every error body is JSON with an `error` message. Client errors are 400,
//! configuration and upstream failures are 500.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use storefront_mcp_core::InvocationError;
use thiserror::Error;

use crate::config::{ConfigError, store_marker, token_marker};
use crate::shopify::ShopifyError;

/// Application-level error type for the router.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request body is not valid JSON.
    #[error("Invalid JSON body")]
    InvalidJson,

    /// Body is JSON but not an acceptable invocation.
    #[error(transparent)]
    Invocation(#[from] InvocationError),

    /// Storefront configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Storefront API call failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::Invocation(_) => StatusCode::BAD_REQUEST,
            Self::Config(_) | Self::Shopify(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// JSON body for this error.
    ///
    /// Configuration errors report which credential is missing but never the
    /// token itself.
    #[must_use]
    pub fn body(&self) -> serde_json::Value {
        match self {
            Self::InvalidJson => json!({ "error": "Invalid JSON body" }),
            Self::Invocation(InvocationError::InvalidArguments(details)) => {
                json!({ "error": "Invalid arguments", "details": details })
            }
            Self::Invocation(err) => json!({ "error": err.to_string() }),
            Self::Config(ConfigError::MissingCredentials { store, token_set }) => json!({
                "error": "Missing Shopify configuration",
                "SHOPIFY_STORE": store_marker(store),
                "SHOPIFY_STOREFRONT_TOKEN": token_marker(token_set),
            }),
            Self::Config(err) => json!({
                "error": "Invalid Shopify configuration",
                "details": err.to_string(),
            }),
            Self::Shopify(err) => json!({
                "error": "Error fetching from Shopify",
                "details": err.to_string(),
            }),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Rejected invocation");
        }

        (status, Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
