//! Cart commands.
//!
//! Every command opens the slot for the configured origin, applies one change
//! through the [`CartStore`] (which writes it back) and returns the text to
//! print.
//!
//! # Environment Variables
//!
//! Same as the storefront: `SIDECART_ORIGIN`, `SIDECART_STORAGE_DIR`,
//! `SIDECART_FALLBACK_PRICE`, `CHECKOUT_ENDPOINT` and `CHECKOUT_PHONE`.

use std::fmt::Write as _;

use sidecart_core::{Cart, Price, format_amount, views};
use sidecart_storefront::checkout::{CheckoutChannel, CheckoutError};
use sidecart_storefront::config::{ConfigError, WidgetConfig};
use sidecart_storefront::storage::{CartStorage, FileStorage};
use sidecart_storefront::store::CartStore;
use thiserror::Error;

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Checkout was refused.
    #[error("{0}")]
    Checkout(#[from] CheckoutError),
}

/// An open cart slot plus the settings commands need.
pub struct Session<S> {
    store: CartStore<S>,
    fallback_price: Price,
    channel: CheckoutChannel,
}

impl Session<FileStorage> {
    /// Open the slot described by the environment.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Config` if the environment is invalid.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = WidgetConfig::from_env()?;
        let storage = config.storage();
        tracing::debug!(path = %storage.path().display(), "Opening cart slot");
        Ok(Self::new(
            storage,
            config.fallback_price,
            config.checkout_channel(),
        ))
    }
}

impl<S: CartStorage> Session<S> {
    pub fn new(storage: S, fallback_price: Price, channel: CheckoutChannel) -> Self {
        Self {
            store: CartStore::open(storage),
            fallback_price,
            channel,
        }
    }

    /// Describe the cart.
    #[must_use]
    pub fn show(&self) -> String {
        describe(self.store.cart())
    }

    /// Add a product. An absent, unparsable or out-of-range price uses the
    /// fallback.
    pub fn add(&mut self, name: &str, price: Option<&str>, image: &str, quantity: i64) -> String {
        let unit_price = price
            .and_then(Price::parse)
            .unwrap_or(self.fallback_price);
        self.store.add_item(name, unit_price, image, quantity);
        describe(self.store.cart())
    }

    /// Remove the line at `index`.
    pub fn remove(&mut self, index: usize) -> String {
        if !self.store.remove_item(index) {
            tracing::warn!(index, "No line at position");
        }
        describe(self.store.cart())
    }

    /// Set the quantity of the line at `index`.
    pub fn set(&mut self, index: usize, quantity: i64) -> String {
        if !self.store.set_quantity(index, quantity) {
            tracing::warn!(index, "No line at position");
        }
        describe(self.store.cart())
    }

    /// Remove every line.
    pub fn clear(&mut self) -> String {
        self.store.clear();
        describe(self.store.cart())
    }

    /// Order message and hand-off link.
    ///
    /// # Errors
    ///
    /// Returns `CommandError::Checkout` if the cart is empty.
    pub fn checkout(&self) -> Result<String, CommandError> {
        let link = self.channel.link(self.store.cart())?;
        Ok(format!("{}\n\n{}", link.message, link.url))
    }
}

/// Numbered lines followed by item count and total.
#[must_use]
pub fn describe(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty".to_string();
    }
    let mut out = String::new();
    for (index, line) in cart.iter().enumerate() {
        let _ = writeln!(
            out,
            "{index}. {} x{} @ ${} = ${}",
            line.name(),
            line.quantity(),
            line.unit_price(),
            format_amount(line.line_total()),
        );
    }
    let _ = write!(
        out,
        "\nItems: {}\nTotal: ${}",
        views::item_count(cart),
        views::formatted_total(cart)
    );
    out
}
