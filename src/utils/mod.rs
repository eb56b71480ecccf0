//! Utility modules
//!
//! Crate-wide error type, logging setup and small helpers shared by the
//! library and the CLI.

pub mod error;
pub mod logging;

pub use error::{Error, Result};
pub use logging::{init_logging, mask_api_key};
