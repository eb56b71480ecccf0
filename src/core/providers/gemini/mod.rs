//! Google Gemini Provider
//!
//! Image generation through Gemini's image-capable models on Google AI Studio:
//! text-to-image, outpainting of a template and enhancement of a result.

pub mod client;
pub mod config;
pub mod error;

// Re-export main types
pub use client::{GeminiClient, GeminiOutput};
pub use config::GeminiConfig;
pub use error::{GeminiError, GeminiErrorMapper};
