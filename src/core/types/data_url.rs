//! `data:` URI handling
//!
//! Results and templates travel as `data:<mime>;base64,<payload>` references.
//! Parsing enforces the single-separator structure: exactly one `,` between
//! the header and a non-empty base64 payload.

use base64::{Engine as _, engine::general_purpose};
use thiserror::Error;

/// Errors produced while parsing a `data:` URI
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUrlError {
    #[error("missing 'data:' scheme")]
    MissingScheme,

    #[error("expected exactly one payload separator, found {0}")]
    SeparatorCount(usize),

    #[error("payload is not base64 encoded")]
    NotBase64,

    #[error("missing mime type")]
    MissingMimeType,

    #[error("empty payload")]
    EmptyPayload,

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Build a base64 `data:` URI
pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        general_purpose::STANDARD.encode(bytes)
    )
}

/// Split a `data:` URI into its mime type and base64 payload without decoding
pub fn split(data_url: &str) -> Result<(&str, &str), DataUrlError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or(DataUrlError::MissingScheme)?;

    let separators = rest.matches(',').count();
    if separators != 1 {
        return Err(DataUrlError::SeparatorCount(separators));
    }

    let (header, payload) = rest.split_once(',').ok_or(DataUrlError::SeparatorCount(0))?;

    let mut params = header.split(';');
    let mime_type = params.next().unwrap_or_default().trim();
    if mime_type.is_empty() {
        return Err(DataUrlError::MissingMimeType);
    }
    if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
        return Err(DataUrlError::NotBase64);
    }
    if payload.is_empty() {
        return Err(DataUrlError::EmptyPayload);
    }

    Ok((mime_type, payload))
}

/// Parse a `data:` URI into its mime type and decoded bytes
pub fn decode(data_url: &str) -> Result<(String, Vec<u8>), DataUrlError> {
    let (mime_type, payload) = split(data_url)?;
    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))?;
    Ok((mime_type.to_string(), bytes))
}
