//! Page-scoped key-value storage.
//!
//! The widget keeps three things in storage: the resolved identity, the raw
//! user object written at login, and the cart mirror. Storage is best-effort:
//! writes never fail from the caller's point of view, mirroring how browser
//! storage behaves for a widget that must not break the page.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Fixed storage keys.
pub mod keys {
    /// Direct identity string.
    pub const IDENTITY: &str = "usuarioEmail";
    /// JSON user object with a `correo` field, written at login.
    pub const USER: &str = "usuario";
    /// JSON array mirror of the cart.
    pub const CART_MIRROR: &str = "carrito";
}

/// Errors opening a [`FileStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading the store file failed.
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a JSON object of strings.
    #[error("Malformed store file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// String key-value storage with browser `localStorage` semantics.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str);

    /// Delete a value. Deleting a missing key is a no-op.
    fn remove(&mut self, key: &str);
}

/// In-memory storage; lives as long as the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// JSON-file-backed storage for hosts without a browser.
///
/// The whole file is rewritten on every change. Write failures are logged
/// and the in-memory value is kept.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        Ok(Self { path, entries })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        let result = serde_json::to_string_pretty(&self.entries)
            .map_err(std::io::Error::other)
            .and_then(|json| std::fs::write(&self.path, json));

        if let Err(e) = result {
            tracing::warn!(path = %self.path.display(), error = %e, "Failed to persist store");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert_eq!(store.get(keys::IDENTITY), None);

        store.set(keys::IDENTITY, "a@b.com");
        assert_eq!(store.get(keys::IDENTITY).as_deref(), Some("a@b.com"));

        store.remove(keys::IDENTITY);
        assert_eq!(store.get(keys::IDENTITY), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("store.json")).unwrap();
        assert_eq!(store.get(keys::CART_MIRROR), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path).unwrap();
        store.set(keys::USER, r#"{"correo":"a@b.com"}"#);
        store.set(keys::CART_MIRROR, "[]");
        store.remove(keys::CART_MIRROR);

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(
            reopened.get(keys::USER).as_deref(),
            Some(r#"{"correo":"a@b.com"}"#)
        );
        assert_eq!(reopened.get(keys::CART_MIRROR), None);
    }

    #[test]
    fn test_file_store_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2]").unwrap();

        assert!(matches!(FileStore::open(&path), Err(StoreError::Json { .. })));
    }
}
