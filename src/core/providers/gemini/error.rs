//! Gemini error mapping
//!
//! Google returns failures as `{"error": {"code", "message", "status", "details"}}`.
//! The `status` string and `details[].reason` are more precise than the
//! HTTP code, so they win when present.

use serde::Deserialize;
use serde_json::Value;

use crate::core::providers::unified_provider::ProviderError;

pub type GeminiError = ProviderError;

const PROVIDER: &str = "gemini";

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: Option<GoogleRpcError>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GoogleRpcError {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
    details: Vec<ErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorDetail {
    reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

impl GoogleRpcError {
    fn has_reason(&self, reason: &str) -> bool {
        self.details
            .iter()
            .any(|detail| detail.reason.as_deref() == Some(reason))
    }

    fn into_provider_error(self) -> ProviderError {
        let code = self.code.unwrap_or(500);
        let key_invalid = self.has_reason("API_KEY_INVALID");
        let message = self.message.unwrap_or_else(|| "unknown error".to_string());

        if key_invalid {
            return ProviderError::authentication(PROVIDER, message);
        }

        match (self.status.as_deref().unwrap_or_default(), code) {
            ("UNAUTHENTICATED" | "PERMISSION_DENIED", _) | (_, 401 | 403) => {
                ProviderError::authentication(PROVIDER, message)
            }
            ("RESOURCE_EXHAUSTED", _) | (_, 429) => ProviderError::rate_limit(PROVIDER, message),
            ("NOT_FOUND", _) | (_, 404) => ProviderError::model_not_found(PROVIDER, message),
            ("INVALID_ARGUMENT" | "FAILED_PRECONDITION", _) | (_, 400) => {
                ProviderError::invalid_request(PROVIDER, message)
            }
            ("UNAVAILABLE", _) | (_, 503) => {
                ProviderError::provider_unavailable(PROVIDER, message)
            }
            _ => ProviderError::api_error(PROVIDER, code, message),
        }
    }
}

/// Turns Gemini failure responses into [`ProviderError`]s
pub struct GeminiErrorMapper;

impl GeminiErrorMapper {
    /// Map a non-success response; falls back to the bare status when the
    /// body is not a Google error object
    pub fn from_http_status(status: u16, body: &str) -> ProviderError {
        if let Ok(ErrorEnvelope {
            error: Some(error), ..
        }) = serde_json::from_str::<ErrorEnvelope>(body)
        {
            return error.into_provider_error();
        }

        match status {
            401 | 403 => ProviderError::authentication(PROVIDER, "API key rejected"),
            400 => ProviderError::invalid_request(PROVIDER, body),
            404 => ProviderError::model_not_found(PROVIDER, "model or endpoint not found"),
            429 => ProviderError::rate_limit(PROVIDER, "too many requests"),
            503 => ProviderError::provider_unavailable(PROVIDER, "service unavailable"),
            _ => ProviderError::api_error(PROVIDER, status, body),
        }
    }

    /// Map an error object or a blocked prompt found in a parsed body
    pub fn from_api_response(response: &Value) -> ProviderError {
        let envelope = ErrorEnvelope::deserialize(response).unwrap_or_default();

        if let Some(error) = envelope.error {
            return error.into_provider_error();
        }

        match envelope.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => ProviderError::content_filtered(PROVIDER, reason),
            None => ProviderError::api_error(PROVIDER, 500, "unrecognized error response"),
        }
    }
}

pub fn gemini_config_error(msg: impl Into<String>) -> ProviderError {
    ProviderError::configuration(PROVIDER, msg)
}

pub fn gemini_network_error(msg: impl Into<String>) -> ProviderError {
    ProviderError::network(PROVIDER, msg)
}

pub fn gemini_timeout_error(msg: impl Into<String>) -> ProviderError {
    ProviderError::timeout(PROVIDER, msg)
}

pub fn gemini_parse_error(msg: impl Into<String>) -> ProviderError {
    ProviderError::serialization(PROVIDER, msg)
}

pub fn gemini_no_image_error(msg: impl Into<String>) -> ProviderError {
    ProviderError::no_image(PROVIDER, msg)
}

pub fn gemini_safety_error(reason: impl Into<String>) -> ProviderError {
    ProviderError::content_filtered(PROVIDER, reason)
}
