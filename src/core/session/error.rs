//! Session errors and their user-facing messages

use crate::core::compositor::CompositorError;
use crate::core::providers::ProviderError;
use crate::core::types::DataUrlError;
use crate::storage::StorageError;
use std::fmt;
use thiserror::Error;

/// Input an action needed but did not have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingField {
    Template,
    Prompt,
    Credential,
    Description,
    Result,
}

impl MissingField {
    /// Message shown to the user
    pub fn message(self) -> &'static str {
        match self {
            MissingField::Template => "Please upload an image first.",
            MissingField::Prompt => "Please enter a prompt first.",
            MissingField::Credential => "Please enter your API key first.",
            MissingField::Description => "Please describe the image you want to generate.",
            MissingField::Result => "There is no result to enhance yet.",
        }
    }
}

impl fmt::Display for MissingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MissingField::Template => "template",
            MissingField::Prompt => "prompt",
            MissingField::Credential => "credential",
            MissingField::Description => "description",
            MissingField::Result => "result",
        };
        f.write_str(name)
    }
}

/// Failure of one session action
#[derive(Debug, Clone, Error)]
pub enum SessionError {
    /// Source could not be decoded or composited
    #[error("Image processing failed: {0}")]
    ImageProcessing(#[from] CompositorError),

    /// Text-to-image requested without a credential
    #[error("Missing API key")]
    MissingCredential,

    /// A required input is absent
    #[error("Missing {0}")]
    Precondition(MissingField),

    /// The remote call failed
    #[error("Generation failed: {0}")]
    Generation(#[from] ProviderError),

    /// The current result reference cannot be decoded
    #[error("Malformed result: {0}")]
    MalformedResult(#[from] DataUrlError),

    /// No history entry has this id
    #[error("History entry {0} not found")]
    EntryNotFound(i64),

    /// The newest history id is already the largest representable one
    #[error("History ids exhausted")]
    HistoryIdsExhausted,

    /// History could not be persisted
    #[error("Failed to save history: {0}")]
    Storage(#[from] StorageError),
}

impl SessionError {
    /// Whether a missing or rejected credential caused the failure
    pub fn is_credential_error(&self) -> bool {
        match self {
            SessionError::MissingCredential => true,
            SessionError::Precondition(field) => *field == MissingField::Credential,
            SessionError::Generation(e) => e.is_credential_error(),
            _ => false,
        }
    }

    /// Message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            SessionError::ImageProcessing(_) => {
                "Could not process the image. Please try a different file.".to_string()
            }
            SessionError::MissingCredential => MissingField::Credential.message().to_string(),
            SessionError::Precondition(field) => field.message().to_string(),
            SessionError::Generation(e) if e.is_credential_error() => {
                "Your API key is missing, invalid, or lacks permission for this model. \
                 Please check it and try again."
                    .to_string()
            }
            SessionError::Generation(e) => format!("Generation failed: {}", e),
            SessionError::MalformedResult(_) => {
                "The current result could not be read. Please generate it again.".to_string()
            }
            SessionError::EntryNotFound(id) => format!("History entry {} no longer exists.", id),
            SessionError::HistoryIdsExhausted => {
                "History cannot take another entry. Delete the newest entry or clear history."
                    .to_string()
            }
            SessionError::Storage(e) => format!("Could not save history: {}", e),
        }
    }
}
