//! Gemini client settings

use std::time::Duration;

use crate::config::ProviderSettings;

/// Google AI Studio endpoint
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";
/// Image-capable model used for every operation
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    /// Scheme and host, without a trailing slash
    pub base_url: String,
    pub api_version: String,
    /// Model for outpaint, enhance and text-to-image alike
    pub image_model: String,
    /// Whole-request deadline
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::from_settings(&ProviderSettings::default())
    }
}

impl GeminiConfig {
    pub fn from_settings(settings: &ProviderSettings) -> Self {
        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_version: settings.api_version.clone(),
            image_model: settings.image_model.clone(),
            timeout: Duration::from_secs(settings.timeout_secs),
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
            proxy_url: settings.proxy_url.clone(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_proxy(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    /// `{base}/{version}/models/{model}:{method}`
    pub fn model_url(&self, method: &str) -> String {
        format!(
            "{}/{}/models/{}:{}",
            self.base_url, self.api_version, self.image_model, method
        )
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base URL must not be empty".to_string());
        }
        if self.image_model.trim().is_empty() {
            return Err("image model must not be empty".to_string());
        }
        if self.timeout.is_zero() || self.connect_timeout.is_zero() {
            return Err("timeouts must be at least one second".to_string());
        }
        if self.connect_timeout > self.timeout {
            return Err(format!(
                "connect timeout ({}s) exceeds request timeout ({}s)",
                self.connect_timeout.as_secs(),
                self.timeout.as_secs()
            ));
        }
        Ok(())
    }
}
