//! End-to-end tests for outpaint-rs
//!
//! These tests make real Gemini calls and require an API key.
//! Run with: GEMINI_API_KEY=xxx cargo test -- --ignored
//!
//! Required environment variables:
//! - GEMINI_API_KEY: Google AI Studio key with image generation access

pub mod gemini;
