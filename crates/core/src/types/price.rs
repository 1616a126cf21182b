//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts keep full precision in the model; rounding to two decimal places
//! happens only when formatting for display.
//!
//! Unit prices are bounded by [`Price::MAX_UNITS`] so that a line total
//! (at most 99 units) and the sum over any realistic cart stay far inside
//! the range of [`Decimal`].

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// A unit price in the store currency, within `0..=Price::MAX_UNITS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest accepted unit price, in whole currency units.
    pub const MAX_UNITS: i64 = 1_000_000_000;

    /// Largest accepted unit price.
    #[must_use]
    pub fn max() -> Self {
        Self(Decimal::from(Self::MAX_UNITS))
    }

    /// Create a new price, clamping the amount into `0..=MAX_UNITS`.
    #[must_use]
    pub fn new(amount: Decimal) -> Self {
        Self(amount.clamp(Decimal::ZERO, Self::max().0))
    }

    /// Create a price only if `amount` is already in range.
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use sidecart_core::Price;
    ///
    /// assert!(Price::checked(Decimal::new(2499, 2)).is_some());
    /// assert!(Price::checked(Decimal::new(-1, 0)).is_none());
    /// assert!(Price::checked(Decimal::new(5_000_000_000, 0)).is_none());
    /// ```
    #[must_use]
    pub fn checked(amount: Decimal) -> Option<Self> {
        (amount >= Decimal::ZERO && amount <= Self::max().0).then_some(Self(amount))
    }

    /// Parse a price from listing text such as `"24.99"` or `" 5 "`.
    ///
    /// Returns `None` for empty or non-numeric input, and for amounts above
    /// [`Price::MAX_UNITS`], so the caller can substitute its own fallback.
    /// Negative amounts floor to zero.
    ///
    /// ```
    /// use sidecart_core::Price;
    ///
    /// assert_eq!(Price::parse("24.99").map(|p| p.display()), Some("24.99".to_string()));
    /// assert!(Price::parse("free").is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let amount = Decimal::from_str(trimmed).ok()?;
        (amount <= Self::max().0).then(|| Self::new(amount))
    }

    /// Get the underlying amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display with exactly two decimals (e.g. `"19.90"`).
    #[must_use]
    pub fn display(&self) -> String {
        format_amount(self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

/// Format a monetary amount with exactly two decimal places.
///
/// Midpoints round away from zero.
///
/// ```
/// use rust_decimal::Decimal;
/// use sidecart_core::format_amount;
///
/// assert_eq!(format_amount(Decimal::new(21, 0)), "21.00");
/// assert_eq!(format_amount(Decimal::new(74_97, 2)), "74.97");
/// assert_eq!(format_amount(Decimal::new(1_005, 3)), "1.01");
/// ```
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_floors_to_zero() {
        assert_eq!(Price::new(Decimal::new(-500, 2)), Price::ZERO);
    }

    #[test]
    fn test_new_clamps_to_max() {
        assert_eq!(Price::new(Decimal::MAX), Price::max());
        assert_eq!(Price::max().display(), "1000000000.00");
    }

    #[test]
    fn test_parse_rejects_above_max() {
        assert_eq!(Price::parse("50000000000000000000000000000"), None);
        assert_eq!(Price::parse("1000000000.01"), None);
        assert_eq!(Price::parse("1000000000"), Some(Price::max()));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(Price::parse(" 5.50 "), Some(Price::new(Decimal::new(550, 2))));
    }

    #[test]
    fn test_parse_rejects_empty_and_text() {
        assert_eq!(Price::parse(""), None);
        assert_eq!(Price::parse("   "), None);
        assert_eq!(Price::parse("abc"), None);
    }

    #[test]
    fn test_format_amount_pads_zero() {
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
        assert_eq!(format_amount(Decimal::new(5, 1)), "0.50");
    }

    #[test]
    fn test_format_amount_rounds_long_scale() {
        assert_eq!(format_amount(Decimal::new(24_994, 3)), "24.99");
        assert_eq!(format_amount(Decimal::new(24_995, 3)), "25.00");
    }
}
