//! Generation session
//!
//! The state machine behind the app: acquire a source, outpaint it,
//! enhance the result and manage the persisted history.

pub mod controller;
pub mod error;
pub mod phase;
pub mod progress;

pub use controller::{ProgressSchedules, SessionController, SessionSnapshot};
pub use error::{MissingField, SessionError};
pub use phase::{InitialImagePhase, Phase};
pub use progress::{ProgressSchedule, StatusSender, with_progress};
