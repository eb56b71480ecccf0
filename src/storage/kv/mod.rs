//! Key-value byte store
//!
//! Backs the persisted history with a single named record per key.

pub mod local;
pub mod memory;
pub mod storage;
pub mod types;

pub use local::LocalStore;
pub use memory::MemoryStore;
pub use types::KeyValueStore;
