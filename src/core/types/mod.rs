//! Shared data types
//!
//! Image payloads, data URIs, the outpaint request and the persisted
//! history entry.

pub mod data_url;
pub mod history;
pub mod image;
pub mod request;

pub use data_url::DataUrlError;
pub use history::HistoryEntry;
pub use image::{GenerationResult, ImagePayload, SourceImage, Template};
pub use request::GenerationRequest;
