//! GraphQL documents and payload types for the Storefront API.
//!
//! Both queries share one response shape: `product` is populated by
//! `ProductByHandle`, `products.nodes` by `SearchProducts`. Every level is
//! optional so partial or empty payloads deserialize instead of failing.

use graphql_client::QueryBody;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use storefront_mcp_core::ProductVariant;

/// Variants fetched per product.
pub const VARIANTS_PER_PRODUCT: i64 = 10;

pub const PRODUCT_BY_HANDLE_OPERATION: &str = "ProductByHandle";
pub const SEARCH_PRODUCTS_OPERATION: &str = "SearchProducts";

pub const PRODUCT_BY_HANDLE_QUERY: &str = r"
query ProductByHandle($h: String!) {
  product(handle: $h) {
    id handle title availableForSale
    variants(first: 10) {
      nodes {
        id title availableForSale currentlyNotInStock quantityAvailable
      }
    }
  }
}
";

pub const SEARCH_PRODUCTS_QUERY: &str = r"
query SearchProducts($q: String!, $limit: Int!) {
  products(first: $limit, query: $q) {
    nodes {
      id handle title availableForSale
      variants(first: 10) {
        nodes {
          id title availableForSale currentlyNotInStock quantityAvailable
        }
      }
    }
  }
}
";

/// Variables for `ProductByHandle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductByHandleVariables {
    pub h: String,
}

/// Variables for `SearchProducts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchProductsVariables {
    pub q: String,
    pub limit: Number,
}

/// Build the request body for a by-handle lookup.
#[must_use]
pub fn product_by_handle(handle: &str) -> QueryBody<ProductByHandleVariables> {
    QueryBody {
        variables: ProductByHandleVariables {
            h: handle.to_string(),
        },
        query: PRODUCT_BY_HANDLE_QUERY,
        operation_name: PRODUCT_BY_HANDLE_OPERATION,
    }
}

/// Build the request body for a product search.
#[must_use]
pub fn search_products(query: &str, limit: Number) -> QueryBody<SearchProductsVariables> {
    QueryBody {
        variables: SearchProductsVariables {
            q: query.to_string(),
            limit,
        },
        query: SEARCH_PRODUCTS_QUERY,
        operation_name: SEARCH_PRODUCTS_OPERATION,
    }
}

/// `data` payload of either query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorefrontData {
    pub product: Option<RawProduct>,
    pub products: Option<Connection<RawProduct>>,
}

/// A `nodes`-style connection.
#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    pub nodes: Option<Vec<T>>,
}

impl<T> Connection<T> {
    /// Nodes of the connection, empty when absent.
    pub fn into_nodes(self) -> Vec<T> {
        self.nodes.unwrap_or_default()
    }
}

/// Product node as returned by the Storefront API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub available_for_sale: bool,
    pub variants: Option<Connection<ProductVariant>>,
}
