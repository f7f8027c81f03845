//! Opaque key-value storage.
//!
//! The domain treats storage as string-in, string-out under a fixed key;
//! which backend actually holds the strings is the collaborator's concern.
//! Last write wins; there is no cross-session arbitration.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

/// Storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not complete the read/write.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// A stored payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Opaque string storage under string keys.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory key-value store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        entries.remove(key);
        Ok(())
    }
}
