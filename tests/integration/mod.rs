//! Integration tests for outpaint-rs
//!
//! These tests verify the interaction between multiple components
//! without real network access.

pub mod compositor_tests;
pub mod config_tests;
pub mod gemini_client_tests;
pub mod history_store_tests;
