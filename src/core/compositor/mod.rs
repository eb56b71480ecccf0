//! Image template compositor
//!
//! Places an arbitrary source picture, scaled to fit and centered, on a
//! transparent 1280×720 canvas and exports it as PNG. The result is the
//! template sent to the outpaint operation.

pub mod layout;
mod render;

pub use layout::{DrawRect, TemplateLayout};
pub use render::{compose_image, compose_template, compose_template_async};

use crate::core::types::{SourceImage, Template};
use std::time::Duration;
use thiserror::Error;

/// Template canvas width in pixels
pub const TEMPLATE_WIDTH: u32 = 1280;
/// Template canvas height in pixels
pub const TEMPLATE_HEIGHT: u32 = 720;
/// Encoding of every template
pub const TEMPLATE_MIME_TYPE: &str = "image/png";
/// Default limit for one decode/resize/encode pass
pub const DEFAULT_DECODE_TIMEOUT: Duration = Duration::from_secs(30);

/// Compositor failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositorError {
    /// The drawing surface could not be allocated
    #[error("Render context unavailable")]
    RenderContextUnavailable,

    /// The source could not be decoded
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// The exported canvas is not a well-formed payload
    #[error("Failed to encode template: {0}")]
    Encode(String),
}

impl CompositorError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode(message.into())
    }
}

impl From<image::ImageError> for CompositorError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::Encoding(e) => Self::Encode(e.to_string()),
            other => Self::Decode(other.to_string()),
        }
    }
}

/// Compositor with a bounded decode time
#[derive(Debug, Clone, Copy)]
pub struct Compositor {
    decode_timeout: Duration,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(DEFAULT_DECODE_TIMEOUT)
    }
}

impl Compositor {
    /// Create
    pub fn new(decode_timeout: Duration) -> Self {
        Self { decode_timeout }
    }

    pub fn decode_timeout(&self) -> Duration {
        self.decode_timeout
    }

    /// Compose on the current thread
    pub fn compose(&self, source: &SourceImage) -> Result<Template, CompositorError> {
        compose_template(source)
    }

    /// Compose on the blocking pool
    pub async fn compose_async(&self, source: SourceImage) -> Result<Template, CompositorError> {
        compose_template_async(source, self.decode_timeout).await
    }
}
