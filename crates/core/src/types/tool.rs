//! Tool descriptors advertised to agent runtimes for discovery.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::json;

/// Name of the single supported tool.
pub const TOOL_NAME: &str = "Shopify_MCP";

/// Static metadata describing an invocable tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Tool name, matched against `tool` on invocation.
    pub name: String,
    /// Human-readable summary of what the tool does.
    pub description: String,
    /// Argument names mapped to their JSON type names.
    pub input_schema: serde_json::Value,
    /// Result field names mapped to their JSON type names.
    pub output_schema: serde_json::Value,
}

static TOOL_DESCRIPTORS: LazyLock<Vec<ToolDescriptor>> = LazyLock::new(|| {
    vec![ToolDescriptor {
        name: TOOL_NAME.to_string(),
        description: "Lookup products and availability in Shopify Storefront".to_string(),
        input_schema: json!({
            "mode": "string",
            "searchTerm": "string",
            "handle": "string",
            "limit": "number"
        }),
        output_schema: json!({
            "products": "array",
            "matchedRootIntent": "string"
        }),
    }]
});

/// Get the descriptors of every tool this router serves.
///
/// Built once on first access and never mutated.
#[must_use]
pub fn tool_descriptors() -> &'static [ToolDescriptor] {
    &TOOL_DESCRIPTORS
}
