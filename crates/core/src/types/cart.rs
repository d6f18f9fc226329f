//! Cart item type.
//!
//! Cart items embed a full [`Product`] snapshot instead of referencing one by
//! id. Nothing keeps the snapshot in sync with the live catalog; there are no
//! cart routes, the type exists for consumers that build carts on top of the
//! catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::CartItemId;
use super::product::Product;

/// A product snapshot paired with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CartItemId>,
    pub product: Product,
    /// Expected to be positive; not enforced.
    pub quantity: i64,
}

impl CartItem {
    /// Create an unsaved cart item.
    #[must_use]
    pub const fn new(product: Product, quantity: i64) -> Self {
        Self {
            id: None,
            product,
            quantity,
        }
    }

    /// Price of the embedded product times the quantity.
    ///
    /// Returns `None` if the product overflows the decimal range.
    #[must_use]
    pub fn subtotal(&self) -> Option<Decimal> {
        self.product.price.checked_mul(Decimal::from(self.quantity))
    }
}
