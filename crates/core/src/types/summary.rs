//! Order summary derived from cart contents.

use serde::Serialize;

use super::cart::Cart;
use super::price::Price;

/// Item count above which the bulk shipping rate applies.
pub const BULK_SHIPPING_THRESHOLD: u32 = 4;

/// Shipping charged for `item_count <= BULK_SHIPPING_THRESHOLD`, including an empty cart.
pub const STANDARD_SHIPPING_UNITS: u32 = 5;

/// Shipping charged for `item_count > BULK_SHIPPING_THRESHOLD`.
pub const BULK_SHIPPING_UNITS: u32 = 10;

/// Pricing totals for a cart. Derived on demand, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    /// Sum of line quantities.
    pub item_count: u32,
    /// Sum of unit price times quantity.
    pub subtotal: Price,
    pub shipping: Price,
    /// `subtotal + shipping`.
    pub total: Price,
}

impl OrderSummary {
    /// Compute the summary for `cart`.
    #[must_use]
    pub fn of(cart: &Cart) -> Self {
        let item_count = cart
            .lines()
            .iter()
            .fold(0_u32, |count, line| count.saturating_add(line.quantity));
        let subtotal: Price = cart.lines().iter().map(|line| line.line_total()).sum();
        let shipping = shipping_for(item_count);

        Self {
            item_count,
            subtotal,
            shipping,
            total: subtotal + shipping,
        }
    }
}

/// Tiered shipping: the bulk rate once more than four items are in the cart.
#[must_use]
pub fn shipping_for(item_count: u32) -> Price {
    if item_count > BULK_SHIPPING_THRESHOLD {
        Price::from_units(BULK_SHIPPING_UNITS)
    } else {
        Price::from_units(STANDARD_SHIPPING_UNITS)
    }
}
