//! Configuration data models
//!
//! This module defines the configuration structures used throughout the app.

#![allow(missing_docs)]

pub mod logging;
pub mod provider;
pub mod storage;

// Re-export all configuration types
pub use logging::*;
pub use provider::*;
pub use storage::*;

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    120
}

/// Default connect timeout in seconds
pub fn default_connect_timeout() -> u64 {
    10
}

/// Default image decode timeout in seconds
pub fn default_decode_timeout() -> u64 {
    30
}

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
