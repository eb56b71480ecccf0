//! Section validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Check that `url_str` is an absolute http(s) URL with a host
pub fn validate_base_url(url_str: &str, context: &str) -> Result<(), String> {
    let url = Url::parse(url_str)
        .map_err(|e| format!("{} has invalid URL format: {}", context, e))?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(format!(
                "{} must use http:// or https:// scheme, got: {}",
                context, scheme
            ));
        }
    }

    if url.host_str().is_none() {
        return Err(format!("{} URL must have a valid host", context));
    }

    Ok(())
}

impl Validate for ProviderSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating provider configuration");

        validate_base_url(&self.base_url, "Provider base_url")?;

        if self.api_version.trim().is_empty() {
            return Err("Provider api_version cannot be empty".to_string());
        }

        if self.image_model.trim().is_empty() {
            return Err("Provider image_model cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Provider timeout must be greater than 0".to_string());
        }

        if self.connect_timeout_secs == 0 {
            return Err("Provider connect timeout must be greater than 0".to_string());
        }

        if self.connect_timeout_secs > self.timeout_secs {
            return Err("Provider connect timeout cannot exceed the request timeout".to_string());
        }

        if let Some(proxy) = &self.proxy_url {
            validate_base_url(proxy, "Provider proxy_url")?;
        }

        if matches!(&self.api_key, Some(key) if key.trim().is_empty()) {
            return Err("Provider api_key cannot be blank; omit it instead".to_string());
        }

        Ok(())
    }
}

impl Validate for StorageSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating storage configuration");

        crate::storage::kv::storage::validate_key(&self.history_key)
            .map_err(|e| format!("Storage history_key is invalid: {}", e))?;

        if self.decode_timeout_secs == 0 {
            return Err("Storage decode timeout must be greater than 0".to_string());
        }

        if matches!(&self.data_dir, Some(dir) if dir.as_os_str().is_empty()) {
            return Err("Storage data_dir cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for LoggingSettings {
    fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))
    }
}
