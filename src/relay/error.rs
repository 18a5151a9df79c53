//! Relay error taxonomy and central response mapping

use super::handler::RawResponse;

/// Everything that can terminate a relay invocation before a provider
/// success. Each variant maps to exactly one HTTP response.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Caller sent a bad method, body or prompt
    #[error("{message}")]
    ClientInput { status: u16, message: String },

    /// The deployment is missing its provider credential
    #[error("{0}")]
    Configuration(String),

    /// The provider answered with a non-success status
    #[error("Error from provider: {detail}")]
    Upstream { status: u16, detail: String },

    /// The provider could not be reached at all
    #[error("Server error: {0}")]
    Transport(String),
}

impl RelayError {
    pub fn method_not_allowed() -> Self {
        RelayError::ClientInput {
            status: 405,
            message: "Method Not Allowed".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        RelayError::ClientInput {
            status: 400,
            message: message.into(),
        }
    }

    pub fn missing_api_key() -> Self {
        RelayError::Configuration("API key not configured".to_string())
    }

    /// HTTP status this error maps to
    pub fn status(&self) -> u16 {
        match self {
            RelayError::ClientInput { status, .. } => *status,
            RelayError::Configuration(_) => 500,
            RelayError::Upstream { status, .. } => *status,
            RelayError::Transport(_) => 500,
        }
    }

    /// Map the error to its terminal HTTP response.
    ///
    /// Relay-generated errors become `{"error": "..."}` JSON; upstream error
    /// bodies pass through as received so callers see the provider's detail.
    pub fn into_response(self) -> RawResponse {
        let status = self.status();
        match self {
            RelayError::Upstream { detail, .. } => RawResponse::json(status, detail),
            other => RawResponse::error(status, &other.to_string()),
        }
    }
}
