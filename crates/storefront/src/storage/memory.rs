//! In-process cart slot.

use std::sync::{Arc, Mutex, PoisonError};

use super::{CartStorage, StorageError};

#[derive(Debug, Default)]
struct Slot {
    payload: Option<String>,
    reject_writes: bool,
    writes: usize,
}

/// Cart slot held in memory.
///
/// Clones share the same slot, so a second store opened over a clone sees
/// what the first one saved, the same way a page reload sees browser storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Arc<Mutex<Slot>>,
}

impl MemoryStorage {
    /// Empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with a raw payload.
    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.lock().payload = Some(payload.into());
        storage
    }

    /// Make every subsequent write fail, simulating a full or revoked store.
    pub fn reject_writes(&self, reject: bool) {
        self.lock().reject_writes = reject;
    }

    /// Raw slot contents.
    #[must_use]
    pub fn payload(&self) -> Option<String> {
        self.lock().payload.clone()
    }

    /// Number of successful writes so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        Ok(self.lock().payload.clone())
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        let mut slot = self.lock();
        if slot.reject_writes {
            return Err(StorageError::Unavailable("writes rejected".to_string()));
        }
        slot.payload = Some(payload.to_owned());
        slot.writes += 1;
        Ok(())
    }
}
