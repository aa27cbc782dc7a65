//! Error types for the ffmpeg backend.

use scream_backend_audio::AudioError;
use scream_spec::ParamError;
use thiserror::Error;

/// Result type for ffmpeg backend operations.
pub type FfmpegResult<T> = Result<T, FfmpegError>;

/// Errors that can occur while generating PCM with ffmpeg.
#[derive(Debug, Error)]
pub enum FfmpegError {
    /// The ffmpeg executable is not on PATH.
    #[error("ffmpeg executable not found on PATH: {0}")]
    NotFound(#[source] which::Error),

    /// Parameters failed validation; ffmpeg was not started.
    #[error("invalid params: {0}")]
    InvalidParams(#[from] ParamError),

    /// The process could not be started.
    #[error("failed to spawn ffmpeg: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// ffmpeg exited with a non-zero status.
    #[error("ffmpeg exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },
}

impl FfmpegError {
    /// Creates a process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Stable error code.
    pub fn code(&self) -> &'static str {
        match self {
            FfmpegError::NotFound(_) => "FFMPEG_001",
            FfmpegError::InvalidParams(_) => "FFMPEG_002",
            FfmpegError::SpawnFailed(_) => "FFMPEG_003",
            FfmpegError::ProcessFailed { .. } => "FFMPEG_004",
        }
    }
}

impl From<FfmpegError> for AudioError {
    fn from(err: FfmpegError) -> Self {
        match err {
            FfmpegError::InvalidParams(err) => AudioError::InvalidParams(err),
            other => AudioError::Backend {
                backend: "ffmpeg",
                source: Box::new(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_process_failed_message() {
        let err = FfmpegError::process_failed(1, "Invalid argument");
        assert_eq!(err.code(), "FFMPEG_004");
        assert_eq!(
            err.to_string(),
            "ffmpeg exited with status 1: Invalid argument"
        );
    }

    #[test]
    fn test_invalid_params_keeps_variant_in_audio_error() {
        let err = AudioError::from(FfmpegError::from(ParamError::InvalidChannels { channels: 3 }));
        assert_eq!(
            err.param_error(),
            Some(&ParamError::InvalidChannels { channels: 3 })
        );
    }

    #[test]
    fn test_process_failure_becomes_backend_error() {
        let err = AudioError::from(FfmpegError::process_failed(2, "boom"));
        match err {
            AudioError::Backend { backend, source } => {
                assert_eq!(backend, "ffmpeg");
                assert!(source.to_string().contains("boom"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
