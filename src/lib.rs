//! # outpaint-rs
//!
//! Turn any picture into a 16:9 panorama with a generative image model.
//!
//! ## Features
//!
//! - **Template compositing**: letterbox/pillarbox an arbitrary image onto a
//!   transparent 1280×720 canvas, centered, never cropped or stretched
//! - **Outpainting**: send the template plus a prompt to Gemini and receive the
//!   filled-in panorama
//! - **Enhancement**: one-click sharpness/resolution pass on the current result
//! - **Text-to-image sources**: synthesize the source picture from a description
//! - **History**: every generation persisted newest-first in a local key-value store
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use outpaint_rs::core::providers::gemini::{GeminiClient, GeminiConfig};
//! use outpaint_rs::core::session::SessionController;
//! use outpaint_rs::core::types::SourceImage;
//! use outpaint_rs::storage::{HistoryStore, KeyValueStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GeminiClient::new(GeminiConfig::default())?;
//!     let history = HistoryStore::new(KeyValueStore::local("./.outpaint").await?);
//!
//!     let mut session = SessionController::open(client, history).await;
//!     session.set_credential(std::env::var("GEMINI_API_KEY").ok());
//!     session.upload_source(SourceImage::from_file("photo.jpg").await?).await?;
//!     session.set_prompt("a sunny beach at golden hour");
//!
//!     let result = session.generate_panorama().await?;
//!     println!("{}", result.text.as_deref().unwrap_or("done"));
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod cli;
pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Error, Result};

pub use core::compositor::{Compositor, CompositorError, TemplateLayout};
pub use core::providers::{ErrorKind, ProviderError};
pub use core::session::{Phase, SessionController, SessionError};
pub use core::traits::ImageGenerator;
pub use core::types::{GenerationResult, HistoryEntry, ImagePayload, SourceImage, Template};
pub use storage::{HistoryRepository, HistoryStore, KeyValueStore};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Provenance of the running binary, stamped in by `build.rs`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the Unix epoch
    pub build_time: &'static str,
    pub git_hash: &'static str,
    pub rust_version: &'static str,
}

impl BuildInfo {
    const fn current() -> Self {
        Self {
            version: VERSION,
            build_time: stamp(option_env!("BUILD_TIME")),
            git_hash: stamp(option_env!("GIT_HASH")),
            rust_version: stamp(option_env!("RUST_VERSION")),
        }
    }
}

impl std::fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}, built {} with {})",
            NAME, self.version, self.git_hash, self.build_time, self.rust_version
        )
    }
}

const fn stamp(value: Option<&'static str>) -> &'static str {
    match value {
        Some(value) => value,
        None => "unknown",
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::current()
}
