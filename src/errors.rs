//! Error types for the status collector

use std::fmt;

pub type Result<T> = std::result::Result<T, StatusError>;

#[derive(Debug)]
pub enum StatusError {
    /// IO operation failed
    Io(std::io::Error),

    /// HTTP request failed
    Http(reqwest::Error),

    /// JSON serialization/deserialization failed
    Json(serde_json::Error),

    /// An unrecognized color token reached the Color constructor.
    /// Always a parser bug, never a recoverable upstream condition.
    InvalidColor(String),

    /// An upstream payload is missing fields its parser requires
    MalformedPayload { service: String, reason: String },

    /// A service key appears in both the shown and hidden partitions
    AmbiguousVisibility(String),

    /// Configuration error
    Config(String),

    /// Transport error
    Transport(String),
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusError::Io(err) => write!(f, "IO error: {}", err),
            StatusError::Http(err) => write!(f, "HTTP error: {}", err),
            StatusError::Json(err) => write!(f, "JSON error: {}", err),
            StatusError::InvalidColor(token) => {
                write!(f, "Invalid color token: {}", token)
            }
            StatusError::MalformedPayload { service, reason } => {
                write!(f, "Malformed payload from {}: {}", service, reason)
            }
            StatusError::AmbiguousVisibility(keys) => {
                write!(f, "Service keys marked both shown and hidden: {}", keys)
            }
            StatusError::Config(msg) => write!(f, "Configuration error: {}", msg),
            StatusError::Transport(msg) => write!(f, "Transport error: {}", msg),
        }
    }
}

impl std::error::Error for StatusError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatusError::Io(err) => Some(err),
            StatusError::Http(err) => Some(err),
            StatusError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StatusError {
    fn from(err: std::io::Error) -> Self {
        StatusError::Io(err)
    }
}

impl From<reqwest::Error> for StatusError {
    fn from(err: reqwest::Error) -> Self {
        StatusError::Http(err)
    }
}

impl From<serde_json::Error> for StatusError {
    fn from(err: serde_json::Error) -> Self {
        StatusError::Json(err)
    }
}
