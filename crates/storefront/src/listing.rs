//! Product listings shown on the page.
//!
//! Listings are collaborator data: the cart reads them when an "add" action
//! fires and again at render time to fill in missing images. They are never
//! validated beyond defaulting a missing name or price.

use std::path::Path;

use serde::{Deserialize, Serialize};
use sidecart_core::Price;
use thiserror::Error;

/// Name used when a listing carries no title.
pub const DEFAULT_PRODUCT_NAME: &str = "Product";

/// Errors loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Visual media attached to a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Media {
    Image {
        src: String,
    },
    Video {
        #[serde(default)]
        src: Option<String>,
        #[serde(default)]
        poster: Option<String>,
    },
    #[default]
    None,
}

impl Media {
    /// Reference stored on a line item at add time: image, else video
    /// source, else video poster.
    #[must_use]
    pub fn add_time_ref(&self) -> Option<&str> {
        match self {
            Self::Image { src } => non_empty(Some(src.as_str())),
            Self::Video { src, poster } => non_empty(src.as_deref()).or(non_empty(poster.as_deref())),
            Self::None => None,
        }
    }

    /// Reference used to fill a missing image at render time: image, else
    /// video poster, else video source.
    #[must_use]
    pub fn render_ref(&self) -> Option<&str> {
        match self {
            Self::Image { src } => non_empty(Some(src.as_str())),
            Self::Video { src, poster } => non_empty(poster.as_deref()).or(non_empty(src.as_deref())),
            Self::None => None,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

/// A product as displayed on the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListing {
    #[serde(default)]
    pub name: Option<String>,
    /// Raw price text; may be missing or unparsable.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub media: Media,
}

impl ProductListing {
    /// Display name, defaulting to [`DEFAULT_PRODUCT_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        non_empty(self.name.as_deref()).unwrap_or(DEFAULT_PRODUCT_NAME)
    }

    /// Parsed price, or `fallback` if absent or unparsable.
    #[must_use]
    pub fn price_or(&self, fallback: Price) -> Price {
        self.price
            .as_deref()
            .and_then(Price::parse)
            .unwrap_or(fallback)
    }
}

/// The listings currently on display plus the fallback price.
#[derive(Debug, Clone)]
pub struct Catalog {
    listings: Vec<ProductListing>,
    fallback_price: Price,
}

impl Catalog {
    #[must_use]
    pub const fn new(listings: Vec<ProductListing>, fallback_price: Price) -> Self {
        Self {
            listings,
            fallback_price,
        }
    }

    /// Load listings from a JSON array file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path, fallback_price: Price) -> Result<Self, CatalogError> {
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: display.clone(),
            source,
        })?;
        let listings: Vec<ProductListing> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: display,
                source,
            })?;
        tracing::info!(listings = listings.len(), "Catalog loaded");
        Ok(Self::new(listings, fallback_price))
    }

    #[must_use]
    pub fn listings(&self) -> &[ProductListing] {
        &self.listings
    }

    #[must_use]
    pub const fn fallback_price(&self) -> Price {
        self.fallback_price
    }

    /// Listing whose display name equals `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&ProductListing> {
        self.listings.iter().find(|l| l.display_name() == name)
    }

    /// Image for a cart line that was saved without one.
    #[must_use]
    pub fn resolve_image(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(|l| l.media.render_ref())
    }
}
