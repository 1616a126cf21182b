//! Derived views over a cart.
//!
//! Pure functions recomputed on every refresh; nothing here is cached.

use rust_decimal::Decimal;

use crate::types::{Cart, format_amount};

/// Sum of all line quantities. Drives the cart badge.
#[must_use]
pub fn item_count(cart: &Cart) -> u32 {
    cart.iter().map(|line| line.quantity().get()).sum()
}

/// Sum of `unit_price * quantity` over all lines, unrounded.
///
/// Saturates at [`Decimal::MAX`] instead of overflowing.
#[must_use]
pub fn total(cart: &Cart) -> Decimal {
    cart.iter()
        .map(crate::LineItem::line_total)
        .fold(Decimal::ZERO, |sum, line| {
            sum.checked_add(line).unwrap_or(Decimal::MAX)
        })
}

/// Cart total formatted with two decimals, e.g. `"74.97"`.
#[must_use]
pub fn formatted_total(cart: &Cart) -> String {
    format_amount(total(cart))
}
