//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` envelopes with `reqwest` 0.13 for HTTP. Each lookup
//! is a single POST; nothing is cached or retried.

mod conversions;
pub mod queries;

use std::sync::Arc;

use graphql_client::{QueryBody, Response};
use secrecy::ExposeSecret;
use serde::Serialize;
use storefront_mcp_core::{Product, ProductSelector};
use tracing::{debug, instrument, warn};

use crate::config::{ShopifyStorefrontConfig, StorefrontCredentials};
use crate::shopify::{GraphQLError, ShopifyError, format_graphql_errors};

use conversions::convert_lookup;
use queries::StorefrontData;

/// Longest upstream body excerpt written to logs.
const LOG_EXCERPT_CHARS: usize = 500;

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Holds only the HTTP connection pool. Credentials are passed per call so a
/// missing store domain or token is detected on the request that needs them.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialization failure).
    pub fn new(config: &ShopifyStorefrontConfig) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(StorefrontClientInner { client }),
        })
    }

    /// Execute a GraphQL query.
    ///
    /// GraphQL `errors` and non-success statuses are logged and tolerated:
    /// whatever `data` came back (possibly none) is returned.
    async fn execute<V>(
        &self,
        credentials: &StorefrontCredentials<'_>,
        request_body: &QueryBody<V>,
    ) -> Result<StorefrontData, ShopifyError>
    where
        V: Serialize,
    {
        let response = self
            .inner
            .client
            .post(credentials.endpoint.clone())
            .header(
                credentials.token_kind.header_name(),
                credentials.access_token.expose_secret(),
            )
            .header("Content-Type", "application/json")
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        let response: Response<StorefrontData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    status = %status,
                    error = %e,
                    body = %excerpt(&response_text),
                    "Failed to parse Shopify GraphQL response"
                );
                return Err(ShopifyError::InvalidResponse {
                    status: status.as_u16(),
                    source: e,
                });
            }
        };

        if !status.is_success() {
            warn!(
                status = %status,
                body = %excerpt(&response_text),
                "Shopify API returned non-success status"
            );
        }

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            let errors: Vec<GraphQLError> = errors.into_iter().map(GraphQLError::from).collect();
            warn!(
                operation = request_body.operation_name,
                errors = %format_graphql_errors(&errors),
                "GraphQL errors in response, treating missing data as empty"
            );
        }

        Ok(response.data.unwrap_or_default())
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Look up products for a tool invocation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails in transport or the response is
    /// not a JSON GraphQL envelope. Absent data yields an empty list.
    #[instrument(skip(self, credentials), fields(kind = selector.kind()))]
    pub async fn lookup_products(
        &self,
        credentials: &StorefrontCredentials<'_>,
        selector: &ProductSelector,
    ) -> Result<Vec<Product>, ShopifyError> {
        let data = match selector {
            ProductSelector::ByHandle { handle } => {
                self.execute(credentials, &queries::product_by_handle(handle))
                    .await?
            }
            ProductSelector::Search { query, limit } => {
                self.execute(credentials, &queries::search_products(query, limit.clone()))
                    .await?
            }
        };

        let products = convert_lookup(selector, data);
        debug!(count = products.len(), "Storefront lookup complete");

        Ok(products)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(LOG_EXCERPT_CHARS).collect()
}
