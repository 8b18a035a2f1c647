//! Conversions from Storefront payloads to the tool's product model.

use storefront_mcp_core::{Product, ProductSelector};

use super::queries::{RawProduct, StorefrontData};

/// Convert a raw product node, deriving its availability.
pub fn convert_product(product: RawProduct) -> Product {
    let variants = product
        .variants
        .map(super::queries::Connection::into_nodes)
        .unwrap_or_default();

    Product::new(
        product.id,
        product.handle,
        product.title,
        product.available_for_sale,
        variants,
    )
}

/// Extract the products relevant to the lookup that produced `data`.
///
/// A by-handle lookup yields zero or one product; a search yields the
/// connection's nodes in upstream order, never more than the selector allows.
pub fn convert_lookup(selector: &ProductSelector, data: StorefrontData) -> Vec<Product> {
    let mut products: Vec<Product> = match selector {
        ProductSelector::ByHandle { .. } => {
            data.product.into_iter().map(convert_product).collect()
        }
        ProductSelector::Search { .. } => data
            .products
            .map(super::queries::Connection::into_nodes)
            .unwrap_or_default()
            .into_iter()
            .map(convert_product)
            .collect(),
    };

    if let Some(max) = selector.max_results() {
        products.truncate(max);
    }
    products
}
