//! Error types for the scream service.

use std::io;
use std::path::PathBuf;

use scream_backend_audio::AudioError;
use scream_encoding::EncodeError;
use scream_voice::PlaybackError;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unknown preset name '{0}'")]
    InvalidPreset(String),

    #[error("duration must be positive")]
    InvalidDuration,

    #[error("volume must be between 0.0 and 1.0, got {0}")]
    InvalidVolume(f64),

    #[error("format must be 'ogg' or 'wav', got '{0}'")]
    InvalidFormat(String),

    #[error("backend must be 'native' or 'ffmpeg', got '{0}'")]
    InvalidBackend(String),
}

/// Errors returned by [`crate::ScreamService`].
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("unknown preset name '{0}'")]
    UnknownPreset(String),

    /// Playback was requested but no voice player is configured.
    #[error("voice player not configured")]
    NoPlayer,

    #[error("guild ID is required")]
    MissingGuildId,

    #[error("audio generation failed: {0}")]
    Generate(#[from] AudioError),

    #[error("encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("playback failed: {0}")]
    Play(#[source] PlaybackError),

    #[error("cancelled")]
    Cancelled,
}

impl ServiceError {
    /// True when the operation stopped because it was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ServiceError::Cancelled)
    }
}

impl From<PlaybackError> for ServiceError {
    fn from(err: PlaybackError) -> Self {
        if err.is_cancelled() {
            ServiceError::Cancelled
        } else {
            ServiceError::Play(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_playback_maps_to_cancelled() {
        let err = ServiceError::from(PlaybackError::Cancelled);
        assert!(err.is_cancelled());
    }

    #[test]
    fn test_playback_failure_wrapped() {
        let err = ServiceError::from(PlaybackError::SinkClosed);
        assert!(matches!(err, ServiceError::Play(PlaybackError::SinkClosed)));
        assert_eq!(err.to_string(), "playback failed: voice send sink closed");
    }

    #[test]
    fn test_config_error_wrapped() {
        let err = ServiceError::from(ConfigError::InvalidVolume(1.5));
        assert_eq!(
            err.to_string(),
            "invalid configuration: volume must be between 0.0 and 1.0, got 1.5"
        );
    }
}
