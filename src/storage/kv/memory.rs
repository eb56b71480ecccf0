//! In-memory store

use crate::storage::StorageError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Process-local store; clones share the same map
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    pub fn set(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
