//! Error types for the analysis client

use thiserror::Error;

/// Message shown when the analyze call fails without a server-supplied reason
pub const GENERIC_ANALYZE_FAILURE: &str = "Analyze failed";

/// Message shown when the analysis service cannot be reached
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the analysis service";

/// Message shown when the service answers with an unexpected payload
pub const MALFORMED_MESSAGE: &str = "The analysis service returned an unexpected response";

/// Errors raised while talking to the analysis service
#[derive(Debug, Error)]
pub enum ClearTradeError {
    /// Input rejected locally, before any request is issued
    #[error("Validation error: {0}")]
    Validation(String),

    /// No response was received (connection refused, DNS, timeout)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Request failed ({status}): {message}")]
    Request {
        status: u16,
        message: String,
    },

    /// The payload could not be parsed as the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unparseable front-end command
    #[error("Command error: {0}")]
    Command(String),
}

impl ClearTradeError {
    /// The single line a front-end should display for this error
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(reason) => reason.clone(),
            Self::Transport(_) => UNREACHABLE_MESSAGE.to_string(),
            Self::Request { message, .. } => message.clone(),
            Self::MalformedResponse(_) => MALFORMED_MESSAGE.to_string(),
            Self::Config(reason) => format!("Configuration error: {reason}"),
            Self::Command(reason) => reason.clone(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for ClearTradeError {
    fn from(err: reqwest::Error) -> Self {
        // A body that times out mid-read is reported as a decode error.
        if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
            ClearTradeError::Transport(err.to_string())
        } else if err.is_decode() {
            ClearTradeError::MalformedResponse(err.to_string())
        } else {
            ClearTradeError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClearTradeError {
    fn from(err: serde_json::Error) -> Self {
        ClearTradeError::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for ClearTradeError {
    fn from(err: url::ParseError) -> Self {
        ClearTradeError::Config(format!("invalid url: {err}"))
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClearTradeError>;
