//! Error handling for outpaint-rs
//!
//! Crate-level error type used by configuration loading and the CLI. The
//! per-layer errors (compositor, provider, storage, session) convert into it.

use crate::core::compositor::CompositorError;
use crate::core::providers::ProviderError;
use crate::core::session::SessionError;
use crate::storage::StorageError;
use thiserror::Error;

/// Result type alias for outpaint-rs
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Image compositing errors
    #[error("Compositor error: {0}")]
    Compositor(#[from] CompositorError),

    /// Remote provider errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// History storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Session controller errors
    #[error("{}", .0.user_message())]
    Session(#[from] SessionError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Whether the failure was caused by a missing or rejected credential
    pub fn is_credential_error(&self) -> bool {
        match self {
            Error::Provider(e) => e.is_credential_error(),
            Error::Session(e) => e.is_credential_error(),
            _ => false,
        }
    }
}
