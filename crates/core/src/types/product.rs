//! Normalized product model returned by the `Shopify_MCP` tool.

use serde::{Deserialize, Serialize};

use super::availability::Availability;

/// A purchasable variant of a product.
///
/// Same shape upstream and downstream, so it also deserializes the raw
/// Storefront variant node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductVariant {
    /// Shopify variant GID.
    pub id: String,
    /// Variant title (e.g., "Large / Red").
    pub title: String,
    /// Whether the variant can be purchased.
    pub available_for_sale: bool,
    /// Stock on hand, `None` when the access token cannot read inventory.
    pub quantity_available: Option<i64>,
}

/// A product with its derived availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Shopify product GID.
    pub id: String,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Availability derived from the product flag and variant stock.
    pub availability: Availability,
    /// Variants (at most 10 are fetched).
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// Build a product, deriving availability from its variants.
    #[must_use]
    pub fn new(
        id: String,
        handle: String,
        title: String,
        available_for_sale: bool,
        variants: Vec<ProductVariant>,
    ) -> Self {
        let availability = Availability::from_inventory(
            available_for_sale,
            variants.iter().map(|v| v.quantity_available),
        );

        Self {
            id,
            handle,
            title,
            availability,
            variants,
        }
    }
}

/// Result envelope of a `Shopify_MCP` invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    /// Matching products (empty when nothing matched).
    pub products: Vec<Product>,
    /// Echo of the requested `mode`; omitted when no mode was sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_root_intent: Option<String>,
}
