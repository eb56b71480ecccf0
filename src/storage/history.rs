//! Persisted generation history
//!
//! The whole list lives in one record, rewritten on every change.

use super::{KeyValueStore, StorageError};
use crate::core::types::HistoryEntry;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Record name holding the history list
pub const HISTORY_KEY: &str = "outpaint_history";

/// Load/save access to the newest-first history list
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Read the stored list. Absent or malformed data yields an empty list.
    async fn load(&self) -> Vec<HistoryEntry>;

    /// Replace the stored list
    async fn save(&self, entries: &[HistoryEntry]) -> Result<(), StorageError>;
}

/// [`HistoryRepository`] backed by a [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct HistoryStore {
    store: KeyValueStore,
    key: String,
}

impl HistoryStore {
    pub fn new(store: KeyValueStore) -> Self {
        Self::with_key(store, HISTORY_KEY)
    }

    pub fn with_key(store: KeyValueStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &KeyValueStore {
        &self.store
    }
}

#[async_trait]
impl HistoryRepository for HistoryStore {
    async fn load(&self) -> Vec<HistoryEntry> {
        let bytes = match self.store.get(&self.key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read history, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<HistoryEntry>>(&bytes) {
            Ok(entries) => {
                debug!(key = %self.key, count = entries.len(), "Loaded history");
                entries
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Malformed history, starting empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, entries: &[HistoryEntry]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(entries)?;
        self.store.set(&self.key, &bytes).await?;
        debug!(key = %self.key, count = entries.len(), "Saved history");
        Ok(())
    }
}
