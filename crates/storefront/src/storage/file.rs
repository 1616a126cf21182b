//! File-backed cart slot.
//!
//! Each origin gets its own directory under the storage root:
//!
//! ```text
//! <root>/<origin-slug>/cart.json
//! ```
//!
//! Writes go to a uniquely named temp file in the same directory that is
//! then renamed over the slot, so a crash mid-write leaves the previous cart
//! intact and concurrent writers (server and CLI) never share a temp file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{CART_SLOT, CartStorage, StorageError};

/// Cart slot stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Slot for `origin` under `root`.
    #[must_use]
    pub fn new(root: impl AsRef<Path>, origin: &str) -> Self {
        let path = root
            .as_ref()
            .join(origin_slug(origin))
            .join(format!("{CART_SLOT}.json"));
        Self { path }
    }

    /// Path of the slot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

impl CartStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, payload: &str) -> Result<(), StorageError> {
        let dir = self.dir();
        fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(payload.as_bytes())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        tracing::debug!(path = %self.path.display(), bytes = payload.len(), "Cart slot written");
        Ok(())
    }
}

/// Filesystem-safe directory name for an origin.
///
/// `http://127.0.0.1:3000` becomes `http-127-0-0-1-3000`.
#[must_use]
pub fn origin_slug(origin: &str) -> String {
    let mut slug = String::with_capacity(origin.len());
    for c in origin.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "default".to_string()
    } else {
        slug.to_string()
    }
}
