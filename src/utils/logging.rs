//! Logging setup
//!
//! `tracing` is used throughout the crate; this module installs the global
//! subscriber for the binary and provides key masking for log output.

use crate::config::LoggingSettings;
use crate::utils::error::{Error, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this twice
/// returns an error instead of panicking.
pub fn init_logging(settings: &LoggingSettings) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.level).map_err(|e| {
            Error::Config(format!("Invalid log level '{}': {}", settings.level, e))
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    let installed = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}

/// Mask an API key for display, keeping the first and last four characters.
pub fn mask_api_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }

    let start: String = chars[..4].iter().collect();
    let end: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", start, "*".repeat(chars.len() - 8), end)
}
