//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response not covered by a more specific variant
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server rejected the payload
    #[error("Validation error: {0}")]
    Validation(String),

    /// Name already taken (reference enums)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Build the error for a non-2xx status and its (already decoded) message
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 | 422 => Self::Validation(message),
            404 => Self::NotFound(message),
            409 => Self::Conflict(message),
            _ => Self::Status { status, message },
        }
    }

    /// HTTP status code, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Status { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(400),
            Self::Conflict(_) => Some(409),
            Self::InvalidResponse(_) | Self::Serialization(_) => None,
        }
    }

    /// Non-2xx response or transport failure
    pub fn is_network(&self) -> bool {
        !matches!(self, Self::Serialization(_))
    }

    /// The endpoint does not exist on this server (404/405)
    pub fn is_unsupported_endpoint(&self) -> bool {
        matches!(self.status(), Some(404) | Some(405))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
