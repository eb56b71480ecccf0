//! Core functionality
//!
//! This module contains the template compositor, the remote image provider,
//! the generation session controller and the data types they share.

pub mod compositor;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod traits;
pub mod types;
