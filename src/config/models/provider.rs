//! Provider configuration

use super::*;
use crate::core::providers::ProviderType;
use crate::core::providers::gemini::config::{
    DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_IMAGE_MODEL,
};
use serde::{Deserialize, Serialize};

/// Remote image provider settings
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Provider backend
    #[serde(rename = "type")]
    pub provider_type: ProviderType,
    /// API key; usually supplied through the environment instead
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// API version path segment
    pub api_version: String,
    /// Model used for every image operation
    pub image_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
    /// Optional HTTP(S) proxy
    pub proxy_url: Option<String>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider_type: ProviderType::default(),
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            proxy_url: None,
        }
    }
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("provider_type", &self.provider_type)
            .field(
                "api_key",
                &self.api_key.as_deref().map(crate::utils::logging::mask_api_key),
            )
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("image_model", &self.image_model)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("proxy_url", &self.proxy_url)
            .finish()
    }
}
