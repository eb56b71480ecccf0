//! Storage layer
//!
//! A small key-value byte store and the generation history persisted in it.

/// History repository
pub mod history;
/// Key-value store module
pub mod kv;

pub use history::{HISTORY_KEY, HistoryRepository, HistoryStore};
pub use kv::{KeyValueStore, LocalStore, MemoryStore};

use thiserror::Error;

/// Storage failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Key outside the allowed character set
    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),

    /// Backend read/write failure
    #[error("{0}")]
    Io(String),

    /// History could not be encoded
    #[error("Failed to encode history: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}
