//! Core types for the Storefront MCP router.

pub mod availability;
pub mod invocation;
pub mod product;
pub mod tool;

pub use availability::Availability;
pub use invocation::{
    BY_HANDLE_MODE, DEFAULT_LIMIT, InvocationError, InvocationRequest, ProductSelector,
    ToolArguments,
};
pub use product::{InvocationResponse, Product, ProductVariant};
pub use tool::{TOOL_NAME, ToolDescriptor, tool_descriptors};
