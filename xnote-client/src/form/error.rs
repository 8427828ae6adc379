//! Form error types

use shared::ValidationErrors;
use thiserror::Error;

use crate::ClientError;

/// Why a form operation did not complete
#[derive(Debug, Error)]
pub enum FormError {
    /// Blocking field errors; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Request failed before anything was changed
    #[error("Failed to {operation}: {source}")]
    Network {
        operation: String,
        #[source]
        source: ClientError,
    },

    /// A multi-step save stopped part way. Records `0..completed` exist on
    /// the server; step `failed_index` was rejected.
    #[error("Saved {completed} record(s), then step {} failed: {source}", .failed_index + 1)]
    PartialFailure {
        completed: usize,
        failed_index: usize,
        #[source]
        source: ClientError,
    },

    /// The modal was closed or retargeted while a request was in flight
    #[error("Form was closed or switched to another record")]
    Stale,

    /// No modal is open
    #[error("No form is open")]
    NotOpen,
}

impl FormError {
    pub fn network(operation: impl Into<String>, source: ClientError) -> Self {
        Self::Network { operation: operation.into(), source }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub type FormResult<T> = Result<T, FormError>;
