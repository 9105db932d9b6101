use thiserror::Error;

use crate::params::FieldKind;

/// Error types for the Diffbot client.
#[derive(Error, Debug)]
pub enum AppError {
    /// An option name that the resource schema does not declare.
    #[error("Unknown {resource} option '{field}'")]
    UnknownField {
        resource: &'static str,
        field: String,
    },

    /// A recognized option was given a value of the wrong kind.
    #[error("Option '{field}' expects a {expected} value")]
    InvalidFieldValue {
        field: &'static str,
        expected: FieldKind,
    },

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The endpoint plus query string did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A request built in test mode reached a transport with no stub for it.
    #[error("No stub registered for mocked request to {0}")]
    StubNotFound(String),

    /// Invalid configuration (environment variables and the like).
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl AppError {
    /// Returns true for errors raised while assembling a request, before any I/O.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            AppError::UnknownField { .. }
                | AppError::InvalidFieldValue { .. }
                | AppError::ConfigError(_)
        )
    }
}
