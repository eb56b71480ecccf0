//! KeyValueStore enum implementation with dispatch methods

use crate::storage::StorageError;
use std::path::Path;
use tracing::info;

use super::local::LocalStore;
use super::memory::MemoryStore;
use super::types::KeyValueStore;

impl KeyValueStore {
    /// Create a file-backed store rooted at `path`
    pub async fn local(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        Ok(KeyValueStore::Local(LocalStore::new(path).await?))
    }

    /// Create an empty in-memory store
    pub fn memory() -> Self {
        info!("Initializing in-memory key-value store");
        KeyValueStore::Memory(MemoryStore::new())
    }

    /// Read the value stored under `key`
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        validate_key(key)?;
        match self {
            KeyValueStore::Local(store) => store.get(key).await,
            KeyValueStore::Memory(store) => store.get(key),
        }
    }

    /// Replace the value stored under `key`
    pub async fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        validate_key(key)?;
        match self {
            KeyValueStore::Local(store) => store.set(key, value).await,
            KeyValueStore::Memory(store) => store.set(key, value),
        }
    }

    /// Remove `key`; removing a missing key is not an error
    pub async fn delete(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        match self {
            KeyValueStore::Local(store) => store.delete(key).await,
            KeyValueStore::Memory(store) => store.delete(key),
        }
    }

    /// Check if a key exists
    pub async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get(key).await?.is_some())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<(), StorageError> {
        match self {
            KeyValueStore::Local(store) => store.health_check().await,
            KeyValueStore::Memory(_) => Ok(()),
        }
    }
}

/// Keys become file names, so only a conservative character set is allowed
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 128
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
