//! Cart persistence.
//!
//! The cart lives in a single key-value slot named `cart`, scoped to the
//! storefront origin. Adapters only move opaque payloads in and out of that
//! slot; [`codec`] owns the serialized layout.
//!
//! Loading never fails from the caller's point of view: a missing slot or a
//! payload that cannot be decoded yields an empty cart and a log line.

pub mod codec;
pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use sidecart_core::Cart;
use thiserror::Error;

/// Name of the storage slot holding the cart.
pub const CART_SLOT: &str = "cart";

/// Errors raised while reading or writing the cart slot.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be encoded or decoded.
    #[error("malformed cart payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Payload was written by a newer schema than this build understands.
    #[error("unsupported cart schema version {found} (expected at most {supported})")]
    UnsupportedVersion {
        /// Version found in the payload.
        found: u32,
        /// Newest version this build reads.
        supported: u32,
    },

    /// The slot refused the write.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable slot the cart is persisted to.
///
/// Implementors provide raw slot access; [`CartStorage::load`] and
/// [`CartStorage::save`] layer the codec and the recovery policy on top.
pub trait CartStorage {
    /// Read the raw slot contents, `None` if the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn read(&self) -> Result<Option<String>, StorageError>;

    /// Overwrite the slot unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store rejects the write.
    fn write(&self, payload: &str) -> Result<(), StorageError>;

    /// Load the persisted cart, falling back to an empty cart.
    fn load(&self) -> Cart {
        match self.read() {
            Ok(Some(payload)) => codec::decode(&payload).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Discarding unreadable cart, starting empty");
                Cart::new()
            }),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart slot, starting empty");
                Cart::new()
            }
        }
    }

    /// Serialize the full cart and overwrite the slot (last writer wins).
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or writing fails.
    fn save(&self, cart: &Cart) -> Result<(), StorageError> {
        let payload = codec::encode(cart)?;
        self.write(&payload)
    }
}

impl<T: CartStorage + ?Sized> CartStorage for Box<T> {
    fn read(&self) -> Result<Option<String>, StorageError> {
        (**self).read()
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        (**self).write(payload)
    }
}

/// Boxed storage used where the adapter is chosen at runtime.
pub type DynStorage = Box<dyn CartStorage + Send>;
