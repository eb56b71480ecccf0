//! Provider error
//!
//! Every way a remote image call can fail, tagged with the provider that
//! produced it. The session only needs one distinction out of this, see
//! [`ErrorKind`]: was the credential at fault, or did generation fail?
//!
//! ```rust,ignore
//! use outpaint_rs::ProviderError;
//!
//! let err = ProviderError::authentication("gemini", "API key not valid");
//! assert!(err.is_credential_error());
//! ```

use thiserror::Error;

/// What the user should be told to fix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing, rejected or under-privileged credential
    Config,
    Generation,
}

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("{provider} is not configured: {message}")]
    Configuration {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} rejected the credential: {message}")]
    Authentication {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} is throttling requests: {message}")]
    RateLimit {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} refused the request: {message}")]
    InvalidRequest {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} has no model named '{model}'")]
    ModelNotFound {
        provider: &'static str,
        model: String,
    },

    #[error("{provider} blocked the content ({reason})")]
    ContentFiltered {
        provider: &'static str,
        reason: String,
    },

    /// The model answered, but only with text
    #[error("{provider} returned no image: {message}")]
    NoImage {
        provider: &'static str,
        message: String,
    },

    #[error("could not reach {provider}: {message}")]
    Network {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} did not answer in time: {message}")]
    Timeout {
        provider: &'static str,
        message: String,
    },

    #[error("unreadable response from {provider}: {message}")]
    Serialization {
        provider: &'static str,
        message: String,
    },

    #[error("{provider} answered HTTP {status}: {message}")]
    ApiError {
        provider: &'static str,
        status: u16,
        message: String,
    },

    #[error("{provider} is temporarily unavailable: {message}")]
    ProviderUnavailable {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    pub fn configuration(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Configuration { provider, message }
    }

    pub fn authentication(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Authentication { provider, message }
    }

    pub fn rate_limit(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::RateLimit { provider, message }
    }

    pub fn invalid_request(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::InvalidRequest { provider, message }
    }

    pub fn model_not_found(provider: &'static str, model: impl Into<String>) -> Self {
        let model = model.into();
        Self::ModelNotFound { provider, model }
    }

    pub fn content_filtered(provider: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::ContentFiltered { provider, reason }
    }

    pub fn no_image(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::NoImage { provider, message }
    }

    pub fn network(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Network { provider, message }
    }

    pub fn timeout(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Timeout { provider, message }
    }

    pub fn serialization(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::Serialization { provider, message }
    }

    /// Non-success status that none of the other variants describe
    pub fn api_error(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::ApiError {
            provider,
            status,
            message,
        }
    }

    pub fn provider_unavailable(provider: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        Self::ProviderUnavailable { provider, message }
    }

    pub fn provider(&self) -> &'static str {
        use ProviderError::*;

        match *self {
            Configuration { provider, .. }
            | Authentication { provider, .. }
            | RateLimit { provider, .. }
            | InvalidRequest { provider, .. }
            | ModelNotFound { provider, .. }
            | ContentFiltered { provider, .. }
            | NoImage { provider, .. }
            | Network { provider, .. }
            | Timeout { provider, .. }
            | Serialization { provider, .. }
            | ApiError { provider, .. }
            | ProviderUnavailable { provider, .. } => provider,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        if matches!(
            self,
            Self::Configuration { .. } | Self::Authentication { .. }
        ) {
            ErrorKind::Config
        } else {
            ErrorKind::Generation
        }
    }

    /// True when asking again with a different API key could help
    pub fn is_credential_error(&self) -> bool {
        self.kind() == ErrorKind::Config
    }

    /// Closest HTTP status, for logs
    pub fn http_status(&self) -> u16 {
        match *self {
            Self::Authentication { .. } => 401,
            Self::ModelNotFound { .. } => 404,
            Self::RateLimit { .. } => 429,
            Self::Serialization { .. } => 500,
            Self::NoImage { .. } => 502,
            Self::Network { .. } | Self::Timeout { .. } | Self::ProviderUnavailable { .. } => 503,
            Self::ApiError { status, .. } => status,
            Self::Configuration { .. }
            | Self::InvalidRequest { .. }
            | Self::ContentFiltered { .. } => 400,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        match err.is_timeout() {
            true => Self::timeout("http", err.to_string()),
            false => Self::network("http", err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization("json", err.to_string())
    }
}
