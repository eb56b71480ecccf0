//! Image providers
//!
//! [`Provider`] dispatches over the configured backend without boxing.

pub mod gemini;
pub mod unified_provider;

use crate::config::ProviderSettings;
use crate::core::traits::ImageGenerator;
use crate::core::types::{GenerationResult, ImagePayload};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use gemini::{GeminiClient, GeminiConfig};
pub use unified_provider::{ErrorKind, ProviderError};

/// Provider type enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType {
    #[default]
    Gemini,
}

impl std::fmt::Display for ProviderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderType::Gemini => write!(f, "gemini"),
        }
    }
}

/// Configured image provider
#[derive(Debug, Clone)]
pub enum Provider {
    Gemini(GeminiClient),
}

impl Provider {
    /// Create the provider selected by `settings`
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self, ProviderError> {
        match settings.provider_type {
            ProviderType::Gemini => {
                let client = GeminiClient::new(GeminiConfig::from_settings(settings))?;
                Ok(Provider::Gemini(client))
            }
        }
    }

    pub fn provider_type(&self) -> ProviderType {
        match self {
            Provider::Gemini(_) => ProviderType::Gemini,
        }
    }
}

#[async_trait]
impl ImageGenerator for Provider {
    async fn text_to_image(
        &self,
        prompt: &str,
        credential: &str,
    ) -> Result<ImagePayload, ProviderError> {
        match self {
            Provider::Gemini(client) => client.text_to_image(prompt, credential).await,
        }
    }

    async fn outpaint(
        &self,
        template: &ImagePayload,
        prompt: &str,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError> {
        match self {
            Provider::Gemini(client) => client.outpaint(template, prompt, credential).await,
        }
    }

    async fn enhance(
        &self,
        image: &ImagePayload,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError> {
        match self {
            Provider::Gemini(client) => client.enhance(image, credential).await,
        }
    }
}
