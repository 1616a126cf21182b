//! Line item quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`] strictly.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is below [`Quantity::MIN`].
    #[error("quantity must be at least {min} (got {value})")]
    BelowMinimum {
        /// Minimum allowed quantity.
        min: u32,
        /// Rejected value.
        value: i64,
    },
    /// The value is above [`Quantity::MAX`].
    #[error("quantity must be at most {max} (got {value})")]
    AboveMaximum {
        /// Maximum allowed quantity.
        max: u32,
        /// Rejected value.
        value: i64,
    },
}

/// Number of units of a product in the cart.
///
/// ## Constraints
///
/// - Always within `1..=99`
///
/// A cart never holds a zero quantity: callers that would drive a quantity
/// below one remove the line instead.
///
/// ## Examples
///
/// ```
/// use sidecart_core::Quantity;
///
/// assert_eq!(Quantity::saturating(250).get(), 99);
/// assert_eq!(Quantity::saturating(-4).get(), 1);
/// assert!(Quantity::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest quantity a line item can hold.
    pub const MIN: u32 = 1;
    /// Largest quantity a line item can hold.
    pub const MAX: u32 = 99;

    /// A single unit.
    pub const ONE: Self = Self(1);

    /// Create a quantity, rejecting values outside `1..=99`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is below 1 or above 99.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        if value < i64::from(Self::MIN) {
            return Err(QuantityError::BelowMinimum {
                min: Self::MIN,
                value,
            });
        }
        if value > i64::from(Self::MAX) {
            return Err(QuantityError::AboveMaximum {
                max: Self::MAX,
                value,
            });
        }
        // In range, so the narrowing cannot fail.
        Ok(Self(u32::try_from(value).unwrap_or(Self::MIN)))
    }

    /// Create a quantity, clamping the value into `1..=99`.
    #[must_use]
    pub fn saturating(value: i64) -> Self {
        let clamped = value.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u32::try_from(clamped).unwrap_or(Self::MIN))
    }

    /// Add two quantities, capping the sum at [`Quantity::MAX`].
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0).min(Self::MAX))
    }

    /// Get the quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}
