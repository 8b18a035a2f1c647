//! Product availability derived from Storefront inventory fields.

use serde::{Deserialize, Serialize};

/// Simplified availability of a product.
///
/// Derived from the product-level `availableForSale` flag and the
/// `quantityAvailable` of its variants. See [`Availability::from_inventory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// Sellable and at least one variant has stock on hand.
    InStock,
    /// Sellable, but no variant reports positive stock (overselling allowed).
    BackorderPossible,
    /// Not available for sale.
    SoldOut,
}

impl Availability {
    /// Derive availability from the product flag and variant quantities.
    ///
    /// A `None` quantity (inventory not exposed to the access token) never
    /// counts as stock on hand.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use storefront_mcp_core::Availability;
    /// let availability = Availability::from_inventory(true, [Some(0), None, Some(5)]);
    /// assert_eq!(availability, Availability::InStock);
    /// ```
    #[must_use]
    pub fn from_inventory<I>(available_for_sale: bool, quantities: I) -> Self
    where
        I: IntoIterator<Item = Option<i64>>,
    {
        if !available_for_sale {
            return Self::SoldOut;
        }

        if quantities.into_iter().flatten().any(|quantity| quantity > 0) {
            Self::InStock
        } else {
            Self::BackorderPossible
        }
    }
}
