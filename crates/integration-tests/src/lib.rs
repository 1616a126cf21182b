//! Integration tests for Sidecart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sidecart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenario` - Add, adjust and remove through the widget
//! - `persistence` - Cart slots surviving reloads, legacy and corrupt payloads
//! - `checkout` - Order message and hand-off link
//! - `http_routes` - Axum router driven in-process
//!
//! Nothing here needs a running server or network access; every test builds
//! its own storage in memory or in a temporary directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rust_decimal::Decimal;
use sidecart_core::Price;
use sidecart_storefront::checkout::CheckoutChannel;
use sidecart_storefront::config::{ConfigError, WidgetConfig};
use sidecart_storefront::listing::{Catalog, Media, ProductListing};
use sidecart_storefront::state::AppState;
use sidecart_storefront::storage::{DynStorage, MemoryStorage};
use sidecart_storefront::widget::CartWidget;
use url::Url;

/// Endpoint used by every checkout in the tests.
pub const TEST_ENDPOINT: &str = "https://api.whatsapp.com/send";

/// Fallback price used by every test catalog (29.99).
#[must_use]
pub fn fallback_price() -> Price {
    Price::new(Decimal::new(2999, 2))
}

/// Price from integer cents.
#[must_use]
pub fn cents(amount: i64) -> Price {
    Price::new(Decimal::new(amount, 2))
}

/// Build a listing.
#[must_use]
pub fn listing(name: &str, price: Option<&str>, media: Media) -> ProductListing {
    ProductListing {
        name: Some(name.to_string()),
        price: price.map(String::from),
        media,
    }
}

/// Catalog with an imaged serum, a video-only multivitamin and an unpriced
/// softgel listing.
#[must_use]
pub fn test_catalog() -> Catalog {
    Catalog::new(
        vec![
            listing(
                "Vitamin C Serum",
                Some("24.99"),
                Media::Image {
                    src: "serum.jpg".to_string(),
                },
            ),
            listing(
                "Daily Multivitamin",
                Some("19.50"),
                Media::Video {
                    src: Some("multi.mp4".to_string()),
                    poster: Some("multi.jpg".to_string()),
                },
            ),
            listing("Omega-3 Softgels", None, Media::None),
        ],
        fallback_price(),
    )
}

/// Checkout channel pointing at [`TEST_ENDPOINT`].
///
/// # Errors
///
/// Returns an error if the endpoint does not parse.
pub fn test_channel(phone: Option<&str>) -> Result<CheckoutChannel, url::ParseError> {
    Ok(CheckoutChannel::new(
        Url::parse(TEST_ENDPOINT)?,
        phone.map(String::from),
    ))
}

/// Configuration with every variable unset.
///
/// # Errors
///
/// Never in practice; defaults always parse.
pub fn default_config() -> Result<WidgetConfig, ConfigError> {
    WidgetConfig::from_lookup(|_| None)
}

/// Application state over a shared in-memory slot.
///
/// The returned [`MemoryStorage`] shares its slot with the one inside the
/// state, so tests can inspect what the server persisted.
///
/// # Errors
///
/// Returns an error if the default configuration fails to load.
pub fn memory_state() -> Result<(AppState, MemoryStorage), ConfigError> {
    let config = default_config()?;
    let slot = MemoryStorage::new();
    let storage: DynStorage = Box::new(slot.clone());
    let widget = CartWidget::open(storage, test_catalog(), config.checkout_channel());
    Ok((AppState::new(widget), slot))
}
