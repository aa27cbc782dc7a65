//! Error types for audio generation.

use scream_spec::ParamError;
use thiserror::Error;

/// Result type for audio operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur during PCM generation.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Parameters failed validation; nothing was generated.
    #[error("invalid params: {0}")]
    InvalidParams(#[from] ParamError),

    /// Internal synthesis error.
    #[error("synthesis error: {message}")]
    Synthesis {
        /// Error message.
        message: String,
    },

    /// An external generator backend failed.
    #[error("{backend} backend failed: {source}")]
    Backend {
        /// Backend name.
        backend: &'static str,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl AudioError {
    /// Creates a synthesis error.
    pub fn synthesis(message: impl Into<String>) -> Self {
        Self::Synthesis {
            message: message.into(),
        }
    }

    /// Returns the underlying validation error, if any.
    pub fn param_error(&self) -> Option<&ParamError> {
        match self {
            AudioError::InvalidParams(err) => Some(err),
            AudioError::Synthesis { .. } | AudioError::Backend { .. } => None,
        }
    }
}
