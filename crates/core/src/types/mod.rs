//! Core types for Sidecart.
//!
//! This module provides type-safe wrappers for the cart domain.

pub mod cart;
pub mod id;
pub mod price;
pub mod quantity;

pub use cart::{Cart, LineItem};
pub use id::LineItemId;
pub use price::{Price, format_amount};
pub use quantity::{Quantity, QuantityError};
