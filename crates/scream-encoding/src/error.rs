//! Error types for encoding.

use std::io;

use thiserror::Error;

/// Result type for encoding operations.
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Errors that can occur while encoding PCM.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Sample rate not accepted by the target format.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The rejected rate in Hz.
        rate: u32,
    },

    /// Channel count other than 1 or 2.
    #[error("channels must be 1 or 2, got {channels}")]
    InvalidChannels {
        /// The rejected channel count.
        channels: u16,
    },

    /// Opus codec creation or frame encoding failed.
    #[error("opus encoding failed: {0}")]
    Opus(#[from] opus::Error),

    /// Reading the PCM source failed.
    #[error("reading PCM failed: {0}")]
    Read(#[source] io::Error),

    /// Writing the OGG container failed.
    #[error("OGG write failed: {0}")]
    OggWrite(#[source] io::Error),

    /// Writing the WAV file failed.
    #[error("WAV write failed: {0}")]
    WavWrite(#[source] io::Error),

    /// The encoder worker went away without reporting a result.
    #[error("opus encoder worker exited without reporting a result")]
    WorkerLost,
}

impl EncodeError {
    /// Returns a stable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            EncodeError::InvalidSampleRate { .. } => "ENC_001",
            EncodeError::InvalidChannels { .. } => "ENC_002",
            EncodeError::Opus(_) => "ENC_003",
            EncodeError::Read(_) => "ENC_004",
            EncodeError::OggWrite(_) => "ENC_005",
            EncodeError::WavWrite(_) => "ENC_006",
            EncodeError::WorkerLost => "ENC_007",
        }
    }
}
