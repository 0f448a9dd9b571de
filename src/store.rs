//! Persistent key-value store
//!
//! A single JSON document on disk holding every persisted value: the daily
//! quote slots, the recent-quotes list, and the user preferences. Mutations
//! write through immediately using an atomic temp-file + rename so a crash
//! never leaves a half-written document.
//!
//! A value that is missing, or that no longer deserializes to the requested
//! type, reads as `None` (logged at warn) rather than an error - callers
//! treat the store like browser local storage.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use thiserror::Error;

/// Persistent key-value store backed by one JSON file
pub struct Store {
    path: PathBuf,
    data: RwLock<HashMap<String, Value>>,
}

impl Store {
    /// Open (or create) a store at the given file path.
    ///
    /// Parent directories are created if needed. A missing file starts the
    /// store empty; an unreadable document is an error so corruption is
    /// surfaced at startup rather than silently wiped.
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value, or `None` if absent or no longer deserializable
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        let value = data.get(key)?;

        match serde_json::from_value(value.clone()) {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("Stored value at {:?} no longer deserializes: {}", key, e);
                None
            }
        }
    }

    /// Write a value and persist the document
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
        let encoded = serde_json::to_value(value)?;
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.insert(key.to_string(), encoded);
        self.persist(&data)
    }

    /// Remove a key and persist the document. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        if data.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&data)
    }

    /// Drop every key and persist the now-empty document
    pub fn clear(&self) -> StoreResult<()> {
        let mut data = self.data.write().unwrap_or_else(|e| e.into_inner());
        data.clear();
        self.persist(&data)
    }

    /// Whether a key currently holds a value
    pub fn contains(&self, key: &str) -> bool {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data.contains_key(key)
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        let data = self.data.read().unwrap_or_else(|e| e.into_inner());
        data.len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the full document atomically: temp file in the same directory,
    /// then rename over the target.
    fn persist(&self, data: &HashMap<String, Value>) -> StoreResult<()> {
        let serialized = serde_json::to_string_pretty(data)?;

        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serialized)?;
        std::fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

/// Errors that can occur in the store layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open(dir.path().join("store.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_set_get_roundtrip() {
        let (_dir, store) = temp_store();

        store.set("theme", &"dark".to_string()).unwrap();
        assert_eq!(store.get::<String>("theme"), Some("dark".to_string()));
        assert_eq!(store.get::<String>("missing"), None);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        {
            let store = Store::open(&path).unwrap();
            store.set("count", &42u32).unwrap();
        }

        let reopened = Store::open(&path).unwrap();
        assert_eq!(reopened.get::<u32>("count"), Some(42));
    }

    #[test]
    fn test_remove_and_clear() {
        let (_dir, store) = temp_store();

        store.set("a", &1u32).unwrap();
        store.set("b", &2u32).unwrap();

        store.remove("a").unwrap();
        assert!(!store.contains("a"));
        assert!(store.contains("b"));

        // Removing again is a no-op
        store.remove("a").unwrap();

        store.clear().unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_type_mismatch_reads_as_none() {
        let (_dir, store) = temp_store();

        store.set("entry", &"not a number".to_string()).unwrap();
        assert_eq!(store.get::<u32>("entry"), None);
        // The raw value is still there
        assert!(store.contains("entry"));
    }

    #[test]
    fn test_empty_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "").unwrap();

        let store = Store::open(&path).unwrap();
        assert!(store.is_empty());
    }
}
