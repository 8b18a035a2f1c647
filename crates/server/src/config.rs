//! Router configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Storefront credentials
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_TOKEN` - Storefront API access token
//!
//! Neither is required at startup. Their presence is checked on every `/run`
//! request so a misconfigured deployment reports which value is missing.
//!
//! ## Optional
//! - `MCP_HOST` - Bind address (default: 127.0.0.1)
//! - `MCP_PORT` - Listen port (default: 8787)
//! - `SHOPIFY_STOREFRONT_TOKEN_KIND` - `public` or `private` (default: public)
//! - `SHOPIFY_API_VERSION` - API version (default: 2026-01)
//! - `SHOPIFY_STOREFRONT_ENDPOINT` - Full GraphQL endpoint override
//! - `SHOPIFY_TIMEOUT_SECS` - Upstream request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 0.1)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_VERSION: &str = "2026-01";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration errors that can occur during loading or credential lookup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error(
        "Missing Shopify configuration: SHOPIFY_STORE={}, SHOPIFY_STOREFRONT_TOKEN={}",
        store_marker(.store),
        token_marker(.token_set)
    )]
    MissingCredentials {
        /// Store domain, if configured.
        store: Option<String>,
        /// Whether an access token is configured. The value is never reported.
        token_set: bool,
    },
}

/// Router application configuration.
#[derive(Debug, Clone)]
pub struct McpConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Which kind of Storefront access token is configured.
///
/// Shopify expects public and private tokens in different headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenKind {
    /// Public token, safe to expose in browsers.
    #[default]
    Public,
    /// Private token, server-side only.
    Private,
}

impl TokenKind {
    /// HTTP header that carries this kind of token.
    #[must_use]
    pub const fn header_name(self) -> &'static str {
        match self {
            Self::Public => "X-Shopify-Storefront-Access-Token",
            Self::Private => "Shopify-Storefront-Private-Token",
        }
    }
}

impl std::str::FromStr for TokenKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            _ => Err(format!("expected 'public' or 'private', got '{s}'")),
        }
    }
}

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: Option<String>,
    /// Storefront API access token
    pub access_token: Option<SecretString>,
    /// Header the token is sent in
    pub token_kind: TokenKind,
    /// Shopify API version (e.g., 2026-01)
    pub api_version: String,
    /// Full endpoint override; the store domain is still required
    pub endpoint: Option<Url>,
    /// Upstream request timeout
    pub timeout: Duration,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store", &self.store)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("token_kind", &self.token_kind)
            .field("api_version", &self.api_version)
            .field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Credentials resolved for a single upstream call.
#[derive(Debug, Clone)]
pub struct StorefrontCredentials<'a> {
    /// GraphQL endpoint URL
    pub endpoint: Url,
    /// Access token
    pub access_token: &'a SecretString,
    /// Header the token is sent in
    pub token_kind: TokenKind,
}

impl McpConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an optional variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through a variable lookup function.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env.parse_or("MCP_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = env.parse_or("MCP_PORT", 8787_u16)?;
        let shopify = ShopifyStorefrontConfig::from_lookup(&env)?;
        let sentry_dsn = env.optional("SENTRY_DSN");
        let sentry_environment = env.optional("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env.parse_or("SENTRY_SAMPLE_RATE", 1.0_f32)?;
        let sentry_traces_sample_rate = env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.1_f32)?;

        Ok(Self {
            host,
            port,
            shopify,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ShopifyStorefrontConfig {
    fn from_lookup<F>(env: &Env<F>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = env
            .optional("SHOPIFY_STOREFRONT_ENDPOINT")
            .map(|raw| {
                Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar(
                        "SHOPIFY_STOREFRONT_ENDPOINT".to_string(),
                        e.to_string(),
                    )
                })
            })
            .transpose()?;

        Ok(Self {
            store: env.optional("SHOPIFY_STORE"),
            access_token: env.optional("SHOPIFY_STOREFRONT_TOKEN").map(SecretString::from),
            token_kind: env.parse_or("SHOPIFY_STOREFRONT_TOKEN_KIND", TokenKind::Public)?,
            api_version: env
                .optional("SHOPIFY_API_VERSION")
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            endpoint,
            timeout: Duration::from_secs(
                env.parse_or("SHOPIFY_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
            ),
        })
    }

    /// Resolve the credentials for an upstream call.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingCredentials` if the store domain or access
    /// token is absent, and `ConfigError::InvalidEnvVar` if the store domain
    /// does not form a valid URL.
    pub fn credentials(&self) -> Result<StorefrontCredentials<'_>, ConfigError> {
        let (Some(store), Some(access_token)) = (&self.store, &self.access_token) else {
            return Err(ConfigError::MissingCredentials {
                store: self.store.clone(),
                token_set: self.access_token.is_some(),
            });
        };

        let endpoint = match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => Url::parse(&format!(
                "https://{store}/api/{}/graphql.json",
                self.api_version
            ))
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPIFY_STORE".to_string(), e.to_string()))?,
        };

        Ok(StorefrontCredentials {
            endpoint,
            access_token,
            token_kind: self.token_kind,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Store domain as reported in missing-credential errors.
pub(crate) fn store_marker(store: &Option<String>) -> &str {
    store.as_deref().unwrap_or("MISSING")
}

/// Token presence as reported in missing-credential errors.
pub(crate) const fn token_marker(token_set: &bool) -> &'static str {
    if *token_set { "SET" } else { "MISSING" }
}

/// Variable lookup wrapper shared by the config loaders.
struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    /// Parse a variable, falling back to a default when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}
