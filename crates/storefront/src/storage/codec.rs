//! Serialized cart layout.
//!
//! # Layout
//!
//! ```json
//! {
//!   "version": 1,
//!   "saved_at": "2026-10-16T12:00:00Z",
//!   "items": [
//!     { "id": "…uuid…", "name": "Vitamin C Serum", "price": 24.99, "image": "", "quantity": 3 }
//!   ]
//! }
//! ```
//!
//! Prices are written as exact JSON numbers (no round trip through `f64`).
//!
//! Version 0 is the unversioned layout: a bare array of
//! `{name, price, image, quantity}` objects. It is still accepted on load;
//! ids are generated and quantities clamped while migrating.
//!
//! Lines with a quantity below one, or a price that is negative or above
//! [`Price::MAX_UNITS`], are treated as corrupt and dropped on load.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sidecart_core::{Cart, LineItem, LineItemId, Price, Quantity};

use super::StorageError;

/// Current schema version written by [`encode`].
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoredLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<LineItemId>,
    name: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    price: Decimal,
    #[serde(default)]
    image: String,
    quantity: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    version: u32,
    #[serde(default)]
    saved_at: Option<DateTime<Utc>>,
    items: Vec<StoredLine>,
}

impl From<&LineItem> for StoredLine {
    fn from(line: &LineItem) -> Self {
        Self {
            id: Some(line.id()),
            name: line.name().to_owned(),
            price: line.unit_price().amount(),
            image: line.image_ref().to_owned(),
            quantity: i64::from(line.quantity().get()),
        }
    }
}

impl StoredLine {
    /// Restore the line, or `None` if its quantity or price is out of range.
    fn restore(self) -> Option<LineItem> {
        if self.quantity < i64::from(Quantity::MIN) {
            return None;
        }
        let Some(unit_price) = Price::checked(self.price) else {
            tracing::warn!(name = %self.name, price = %self.price, "Dropping stored line with out-of-range price");
            return None;
        };
        Some(LineItem::with_id(
            self.id.unwrap_or_else(LineItemId::generate),
            self.name,
            unit_price,
            self.image,
            Quantity::saturating(self.quantity),
        ))
    }
}

/// Encode a cart into the current layout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(cart: &Cart) -> Result<String, StorageError> {
    let envelope = Envelope {
        version: SCHEMA_VERSION,
        saved_at: Some(Utc::now()),
        items: cart.iter().map(StoredLine::from).collect(),
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Decode a payload written by any supported layout version.
///
/// Out-of-range lines are dropped; duplicate names are merged.
///
/// # Errors
///
/// Returns an error if the payload is not valid JSON for either layout, or
/// if it carries a version newer than [`SCHEMA_VERSION`].
pub fn decode(payload: &str) -> Result<Cart, StorageError> {
    let lines = if payload.trim_start().starts_with('[') {
        let items: Vec<StoredLine> = serde_json::from_str(payload)?;
        tracing::info!(lines = items.len(), "Migrating unversioned cart payload");
        items
    } else {
        let envelope: Envelope = serde_json::from_str(payload)?;
        if envelope.version > SCHEMA_VERSION {
            return Err(StorageError::UnsupportedVersion {
                found: envelope.version,
                supported: SCHEMA_VERSION,
            });
        }
        envelope.items
    };

    Ok(Cart::from_items(
        lines.into_iter().filter_map(StoredLine::restore),
    ))
}
