//! Tool discovery handler.

use axum::Json;
use storefront_mcp_core::{ToolDescriptor, tool_descriptors};

/// List the tools this router serves.
pub async fn list() -> Json<&'static [ToolDescriptor]> {
    Json(tool_descriptors())
}
