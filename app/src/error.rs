//! Error types for alquran

use thiserror::Error;

/// A request to the upstream API failed.
///
/// Failures are only distinguished by whether an HTTP status was received.
/// `Display` yields the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// Client-side failure with no HTTP status (connect, DNS, timeout, body read).
    #[error("{0}")]
    Transport(String),

    #[error("Error Code: {status}\nMessage: {message}")]
    Status { status: u16, message: String },

    /// The body arrived but did not match the expected schema.
    #[error("{0}")]
    Decode(String),
}

impl RequestError {
    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            RequestError::Transport(_) | RequestError::Decode(_) => None,
        }
    }

    /// Whether another attempt may succeed
    pub fn is_retryable(&self) -> bool {
        !matches!(self, RequestError::Decode(_))
    }
}

impl serde::Serialize for RequestError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
