//! Key-value store types and enums

use super::{LocalStore, MemoryStore};

/// Key-value store backend
#[derive(Debug, Clone)]
pub enum KeyValueStore {
    /// One file per key under a directory
    Local(LocalStore),
    /// Process-local map
    Memory(MemoryStore),
}
