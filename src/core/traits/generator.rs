//! Remote image generation interface

use crate::core::providers::ProviderError;
use crate::core::types::{GenerationResult, ImagePayload};
use async_trait::async_trait;

/// The three remote operations the session controller relies on.
///
/// Every call takes the caller's credential. An empty credential fails with
/// [`ProviderError::Configuration`] before any network attempt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Synthesize a picture from a text prompt
    async fn text_to_image(
        &self,
        prompt: &str,
        credential: &str,
    ) -> Result<ImagePayload, ProviderError>;

    /// Fill the transparent area of `template` guided by `prompt`
    async fn outpaint(
        &self,
        template: &ImagePayload,
        prompt: &str,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError>;

    /// Sharpen/upscale an existing result without changing its content
    async fn enhance(
        &self,
        image: &ImagePayload,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError>;
}

#[async_trait]
impl<T: ImageGenerator + ?Sized> ImageGenerator for std::sync::Arc<T> {
    async fn text_to_image(
        &self,
        prompt: &str,
        credential: &str,
    ) -> Result<ImagePayload, ProviderError> {
        (**self).text_to_image(prompt, credential).await
    }

    async fn outpaint(
        &self,
        template: &ImagePayload,
        prompt: &str,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError> {
        (**self).outpaint(template, prompt, credential).await
    }

    async fn enhance(
        &self,
        image: &ImagePayload,
        credential: &str,
    ) -> Result<GenerationResult, ProviderError> {
        (**self).enhance(image, credential).await
    }
}
