//! Core traits module
//!
//! Abstract interfaces at the provider seam

pub mod generator;

pub use generator::ImageGenerator;

#[cfg(test)]
pub use generator::MockImageGenerator;
