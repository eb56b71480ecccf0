//! Configuration management
//!
//! Settings are read from an optional YAML file and then overridden by
//! environment variables. Every section has defaults, so an empty file (or
//! no file at all) is a valid configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Environment variables checked for the API key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote image provider
    pub provider: ProviderSettings,
    /// History persistence
    pub storage: StorageSettings,
    /// Tracing output
    pub logging: LoggingSettings,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(content)
                .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// Override settings from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// Override settings from `lookup`, validating the result
    pub fn apply_env_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(key) = API_KEY_ENV_VARS.iter().find_map(|name| lookup(*name)) {
            self.provider.api_key = Some(key.trim().to_string());
        }
        if let Some(base_url) = lookup("OUTPAINT_BASE_URL") {
            self.provider.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup("OUTPAINT_IMAGE_MODEL") {
            self.provider.image_model = model;
        }
        if let Some(timeout) = lookup("OUTPAINT_TIMEOUT_SECS") {
            self.provider.timeout_secs = timeout
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("Invalid timeout: {}", e)))?;
        }
        if let Some(proxy) = lookup("OUTPAINT_PROXY_URL") {
            self.provider.proxy_url = Some(proxy);
        }
        if let Some(dir) = lookup("OUTPAINT_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = lookup("OUTPAINT_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(json) = lookup("OUTPAINT_LOG_JSON") {
            self.logging.json = matches!(json.trim(), "1" | "true" | "yes");
        }

        self.validate()
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.provider
            .validate()
            .map_err(|e| Error::Config(format!("Provider config error: {}", e)))?;

        self.storage
            .validate()
            .map_err(|e| Error::Config(format!("Storage config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| Error::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Configured API key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.provider.api_key.as_deref()
    }

    /// Directory holding the history store
    pub fn data_dir(&self) -> PathBuf {
        self.storage.resolve_data_dir()
    }

    pub fn decode_timeout(&self) -> Duration {
        Duration::from_secs(self.storage.decode_timeout_secs)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
