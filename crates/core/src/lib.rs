//! Sidecart Core - Cart domain types.
//!
//! This crate provides the in-memory cart model shared by every Sidecart
//! component:
//! - `storefront` - Cart store, persistence, rendering and the HTTP widget
//! - `cli` - Command-line access to the persisted cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! persistence, no templates. Everything that touches storage or markup lives
//! in the storefront crate.
//!
//! # Modules
//!
//! - [`types`] - Line items, quantities, prices and the cart itself
//! - [`views`] - Derived values (item count, total) computed from a cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod views;

pub use types::*;
