//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::McpConfig;
use crate::shopify::{ShopifyError, StorefrontClient};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and read-only after startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: McpConfig,
    storefront: StorefrontClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Storefront HTTP client cannot be built.
    pub fn new(config: McpConfig) -> Result<Self, ShopifyError> {
        let storefront = StorefrontClient::new(&config.shopify)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, storefront }),
        })
    }

    /// Get a reference to the router configuration.
    #[must_use]
    pub fn config(&self) -> &McpConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify Storefront API client.
    #[must_use]
    pub fn storefront(&self) -> &StorefrontClient {
        &self.inner.storefront
    }
}
