//! Error types for parameter validation.

use thiserror::Error;

/// Result type for parameter validation.
pub type ParamResult<T> = Result<T, ParamError>;

/// Errors produced when [`crate::SynthParams`] fails validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    /// Duration is zero, negative or not finite.
    #[error("duration must be positive, got {duration} seconds")]
    InvalidDuration {
        /// The rejected duration.
        duration: f64,
    },

    /// Sample rate is zero.
    #[error("sample rate must be positive, got {rate}")]
    InvalidSampleRate {
        /// The rejected sample rate.
        rate: u32,
    },

    /// Channel count is neither 1 nor 2.
    #[error("channels must be 1 or 2, got {channels}")]
    InvalidChannels {
        /// The rejected channel count.
        channels: u16,
    },

    /// A layer amplitude lies outside [0, 1].
    #[error("layer {layer}: amplitude must be between 0 and 1, got {amplitude}")]
    InvalidAmplitude {
        /// Index of the offending layer.
        layer: usize,
        /// The rejected amplitude.
        amplitude: f64,
    },

    /// A highpass or lowpass cutoff is negative.
    #[error("filter cutoff '{name}' must be non-negative, got {cutoff}")]
    InvalidFilterCutoff {
        /// Which cutoff was rejected (`highpass` or `lowpass`).
        name: &'static str,
        /// The rejected cutoff.
        cutoff: f64,
    },

    /// Bitcrusher depth lies outside [1, 16].
    #[error("crusher bits must be between 1 and 16, got {bits}")]
    InvalidCrusherBits {
        /// The rejected bit depth.
        bits: u32,
    },

    /// Limiter level lies outside (0, 1].
    #[error("limiter level must be in (0, 1], got {level}")]
    InvalidLimiterLevel {
        /// The rejected level.
        level: f64,
    },
}

impl ParamError {
    /// Returns a stable code string for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ParamError::InvalidDuration { .. } => "PARAM_001",
            ParamError::InvalidSampleRate { .. } => "PARAM_002",
            ParamError::InvalidChannels { .. } => "PARAM_003",
            ParamError::InvalidAmplitude { .. } => "PARAM_004",
            ParamError::InvalidFilterCutoff { .. } => "PARAM_005",
            ParamError::InvalidCrusherBits { .. } => "PARAM_006",
            ParamError::InvalidLimiterLevel { .. } => "PARAM_007",
        }
    }
}
