//! Common test utilities for outpaint-rs
//!
//! - Encoded image fixtures
//! - A scripted [`ImageGenerator`](outpaint_rs::ImageGenerator) for driving the session
//! - Pixel-level assertions on composited templates

pub mod assertions;
pub mod fixtures;
pub mod generators;

// Re-export commonly used items
pub use assertions::TemplateAssertions;
pub use generators::{GeneratorCall, ScriptedGenerator};

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
