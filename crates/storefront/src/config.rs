//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `SIDECART_HOST` - Bind address (default: 127.0.0.1)
//! - `SIDECART_PORT` - Listen port (default: 3000)
//! - `SIDECART_ORIGIN` - Origin the cart slot is scoped to (default: `http://127.0.0.1:3000`)
//! - `SIDECART_STORAGE_DIR` - Root directory for cart slots (default: .sidecart)
//! - `SIDECART_CATALOG` - Product listing JSON file (default: crates/storefront/catalog.json)
//! - `SIDECART_FALLBACK_PRICE` - Price for listings without a usable price (default: 29.99)
//! - `CHECKOUT_ENDPOINT` - Messaging endpoint for the order hand-off (default: `https://api.whatsapp.com/send`)
//! - `CHECKOUT_PHONE` - Recipient passed to the endpoint
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use sidecart_core::Price;
use thiserror::Error;
use url::Url;

use crate::checkout::CheckoutChannel;
use crate::storage::FileStorage;

const DEFAULT_FALLBACK_PRICE: &str = "29.99";
const DEFAULT_CHECKOUT_ENDPOINT: &str = "https://api.whatsapp.com/send";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Widget configuration.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Origin the persisted cart belongs to
    pub origin: String,
    /// Root directory holding one slot per origin
    pub storage_dir: PathBuf,
    /// Product listing file
    pub catalog_path: PathBuf,
    /// Price used when a listing has none
    pub fallback_price: Price,
    /// Checkout hand-off settings
    pub checkout: CheckoutConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Messaging endpoint settings.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub endpoint: Url,
    pub phone: Option<String>,
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparsable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Lookup(lookup);

        let host = env
            .or_default("SIDECART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SIDECART_HOST".to_string(), e.to_string()))?;
        let port = env
            .or_default("SIDECART_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SIDECART_PORT".to_string(), e.to_string()))?;
        let origin = env.or_default("SIDECART_ORIGIN", &format!("http://{host}:{port}"));
        let storage_dir = PathBuf::from(env.or_default("SIDECART_STORAGE_DIR", ".sidecart"));
        let catalog_path = PathBuf::from(
            env.or_default("SIDECART_CATALOG", "crates/storefront/catalog.json"),
        );

        let raw_price = env.or_default("SIDECART_FALLBACK_PRICE", DEFAULT_FALLBACK_PRICE);
        let fallback_price = Price::parse(&raw_price).ok_or_else(|| {
            ConfigError::InvalidEnvVar(
                "SIDECART_FALLBACK_PRICE".to_string(),
                format!("not a decimal amount: {raw_price}"),
            )
        })?;

        let checkout = CheckoutConfig::from_lookup(&env)?;

        Ok(Self {
            host,
            port,
            origin,
            storage_dir,
            catalog_path,
            fallback_price,
            checkout,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Storage slot for the configured origin.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir, &self.origin)
    }

    /// Checkout channel for the configured endpoint.
    #[must_use]
    pub fn checkout_channel(&self) -> CheckoutChannel {
        CheckoutChannel::new(self.checkout.endpoint.clone(), self.checkout.phone.clone())
    }
}

impl CheckoutConfig {
    fn from_lookup<F: Fn(&str) -> Option<String>>(env: &Lookup<F>) -> Result<Self, ConfigError> {
        let raw = env.or_default("CHECKOUT_ENDPOINT", DEFAULT_CHECKOUT_ENDPOINT);
        let endpoint = Url::parse(&raw).map_err(|e| {
            ConfigError::InvalidEnvVar("CHECKOUT_ENDPOINT".to_string(), e.to_string())
        })?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidEnvVar(
                "CHECKOUT_ENDPOINT".to_string(),
                format!("unsupported scheme: {}", endpoint.scheme()),
            ));
        }
        Ok(Self {
            endpoint,
            phone: env.optional("CHECKOUT_PHONE"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Lookup<F>(F);

impl<F: Fn(&str) -> Option<String>> Lookup<F> {
    /// Get an optional variable; empty values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}
