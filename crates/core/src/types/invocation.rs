//! Tool invocation requests and query selection.
//!
//! An invocation arrives as `{"tool": "...", "arguments": {...}}`. The
//! arguments pick one of two lookups: a single product by handle, or a
//! free-text product search.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use thiserror::Error;

use super::tool::TOOL_NAME;

/// Mode value that requests a lookup by product handle.
pub const BY_HANDLE_MODE: &str = "byHandle";

/// Number of products returned by a search when `limit` is absent.
pub const DEFAULT_LIMIT: i64 = 5;

/// Reasons an invocation is rejected before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvocationError {
    /// The `tool` field is missing or names a tool this router does not serve.
    #[error("Unknown tool")]
    UnknownTool,

    /// The `arguments` object has fields of the wrong type.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Neither a usable handle (in `byHandle` mode) nor a search term was given.
    #[error("Missing handle or searchTerm")]
    MissingSelector,
}

/// Arguments accepted by the `Shopify_MCP` tool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolArguments {
    /// Requested mode, echoed back as `matchedRootIntent`.
    pub mode: Option<String>,
    /// Free-text search query.
    pub search_term: Option<String>,
    /// Product handle, used when `mode` is `byHandle`.
    pub handle: Option<String>,
    /// Maximum number of products for a search. Any JSON number is accepted.
    pub limit: Option<Number>,
}

impl ToolArguments {
    /// Search page size sent upstream: `limit` as given, default 5.
    ///
    /// Integer-valued floats such as `5.0` are sent as integers. Other numbers
    /// are passed through unchanged for Shopify to accept or reject.
    #[must_use]
    pub fn limit(&self) -> Number {
        self.limit.as_ref().map_or_else(
            || Number::from(DEFAULT_LIMIT),
            |limit| integral(limit).map_or_else(|| limit.clone(), Number::from),
        )
    }

    /// Choose the upstream lookup for these arguments.
    ///
    /// `byHandle` mode with a handle wins over any search term. Empty strings
    /// count as absent.
    ///
    /// # Errors
    ///
    /// Returns `InvocationError::MissingSelector` if neither lookup applies.
    pub fn selector(&self) -> Result<ProductSelector, InvocationError> {
        if self.mode.as_deref() == Some(BY_HANDLE_MODE)
            && let Some(handle) = non_empty(self.handle.as_deref())
        {
            return Ok(ProductSelector::ByHandle {
                handle: handle.to_string(),
            });
        }

        if let Some(query) = non_empty(self.search_term.as_deref()) {
            return Ok(ProductSelector::Search {
                query: query.to_string(),
                limit: self.limit(),
            });
        }

        Err(InvocationError::MissingSelector)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// Integer value of `number`, if it has one within GraphQL `Int` range.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integral(number: &Number) -> Option<i64> {
    number.as_i64().or_else(|| {
        number
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .filter(|f| (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(f))
            .map(|f| f as i64)
    })
}

/// The upstream lookup chosen for an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductSelector {
    /// Fetch a single product by its handle.
    ByHandle {
        /// Product handle (URL slug).
        handle: String,
    },
    /// Search products by free text.
    Search {
        /// Shopify search query.
        query: String,
        /// Maximum number of products to return.
        limit: Number,
    },
}

impl ProductSelector {
    /// Short label for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ByHandle { .. } => "by_handle",
            Self::Search { .. } => "search",
        }
    }

    /// Most products a response may carry for this lookup.
    ///
    /// A search never returns more than an integer `limit`, and none when it
    /// is zero or negative. `None` means no cap beyond what Shopify returns.
    #[must_use]
    pub fn max_results(&self) -> Option<usize> {
        match self {
            Self::ByHandle { .. } => Some(1),
            Self::Search { limit, .. } => {
                integral(limit).map(|n| usize::try_from(n).unwrap_or_default())
            }
        }
    }
}

/// A validated invocation of the `Shopify_MCP` tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    /// Tool name (always [`TOOL_NAME`] once validated).
    pub tool: String,
    /// Tool arguments; an absent or `null` object is treated as empty.
    pub arguments: ToolArguments,
}

impl InvocationRequest {
    /// Validate a parsed JSON body as an invocation.
    ///
    /// # Errors
    ///
    /// Returns `InvocationError::UnknownTool` if `tool` is not [`TOOL_NAME`]
    /// (including non-object bodies), or `InvocationError::InvalidArguments`
    /// if an `arguments` object has fields of the wrong type. Non-object
    /// `arguments` read as empty.
    pub fn from_value(mut body: Value) -> Result<Self, InvocationError> {
        let tool = body
            .get("tool")
            .and_then(Value::as_str)
            .filter(|name| *name == TOOL_NAME)
            .ok_or(InvocationError::UnknownTool)?
            .to_string();

        let arguments = match body.get_mut("arguments").map(Value::take) {
            Some(arguments @ Value::Object(_)) => serde_json::from_value(arguments)
                .map_err(|e| InvocationError::InvalidArguments(e.to_string()))?,
            _ => ToolArguments::default(),
        };

        Ok(Self { tool, arguments })
    }
}
