//! Sidecart Storefront library.
//!
//! The cart state manager and the HTMX wiring around it:
//!
//! - [`storage`] - Origin-scoped cart slot (file or memory) and its layout
//! - [`store`] - Cart store, the single mutator, writing through on every change
//! - [`render`] - Render controller, snapshots and Askama fragments
//! - [`widget`] - Action dispatch tying store, renderer and listings together
//! - [`checkout`] - Order summary and messaging hand-off
//! - [`listing`] - Product listings read from the page
//! - [`routes`] - Axum handlers serving the widget

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod error;
pub mod listing;
pub mod render;
pub mod routes;
pub mod state;
pub mod storage;
pub mod store;
pub mod widget;

pub use checkout::{CheckoutChannel, CheckoutError, CheckoutLink};
pub use listing::{Catalog, Media, ProductListing};
pub use render::{Badge, CartRow, CartSnapshot, RenderController};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::CartStore;
pub use widget::{CartAction, CartWidget};
