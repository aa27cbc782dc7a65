//! Scream synthesis parameter types.

use serde::{Deserialize, Serialize};

use crate::error::{ParamError, ParamResult};

/// Default output sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48_000;

/// Default output channel count.
pub const DEFAULT_CHANNELS: u16 = 2;

/// Number of synthesis layers in every scream.
pub const LAYER_COUNT: usize = 5;

/// Synthesis method of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    /// Rising, stepwise-jittered main tone.
    PrimaryScream,
    /// Linearly swept tone with jittered offset.
    HarmonicSweep,
    /// High-pitched variant of the primary scream.
    HighShriek,
    /// Gated white noise bursts.
    NoiseBurst,
    /// Constant low-level noise floor.
    BackgroundNoise,
}

impl LayerKind {
    /// Step-decorrelation constant for layers that use the seeded hash.
    ///
    /// Background noise draws only from a continuous stream and has none.
    pub fn coprime(&self) -> Option<u64> {
        match self {
            LayerKind::PrimaryScream => Some(137),
            LayerKind::HarmonicSweep => Some(251),
            LayerKind::HighShriek => Some(89),
            LayerKind::NoiseBurst => Some(173),
            LayerKind::BackgroundNoise => None,
        }
    }
}

/// Parameters for a single synthesis layer.
///
/// Only the fields relevant to [`LayerParams::kind`] are consulted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayerParams {
    /// Synthesis method.
    pub kind: LayerKind,
    /// Base frequency in Hz.
    #[serde(default)]
    pub base_freq: f64,
    /// Frequency jump range in Hz.
    #[serde(default)]
    pub freq_range: f64,
    /// Linear sweep rate in Hz per second (harmonic sweep only).
    #[serde(default)]
    pub sweep_rate: f64,
    /// Frequency jumps per second.
    #[serde(default)]
    pub jump_rate: f64,
    /// Layer amplitude (0.0 to 1.0).
    #[serde(default)]
    pub amplitude: f64,
    /// Amplitude rise coefficient per second.
    #[serde(default)]
    pub rise: f64,
    /// Per-layer seed.
    #[serde(default)]
    pub seed: u64,
}

impl LayerParams {
    /// Creates parameters of the given kind with every other field zeroed.
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            base_freq: 0.0,
            freq_range: 0.0,
            sweep_rate: 0.0,
            jump_rate: 0.0,
            amplitude: 0.0,
            rise: 0.0,
            seed: 0,
        }
    }
}

/// Parameters shared by the two noise layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NoiseParams {
    /// Gate re-evaluations per second.
    pub burst_rate: f64,
    /// Gate threshold (0.0 to 1.0); the gate opens above it.
    pub threshold: f64,
    /// Amplitude of open bursts.
    pub burst_amp: f64,
    /// Amplitude of the background floor.
    pub floor_amp: f64,
    /// Seed for burst gating and both noise streams.
    pub burst_seed: u64,
}

/// Post-processing filter chain parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterParams {
    /// Highpass cutoff in Hz.
    pub highpass_cutoff: f64,
    /// Lowpass cutoff in Hz.
    pub lowpass_cutoff: f64,
    /// Bitcrusher depth (1 to 16).
    pub crusher_bits: u32,
    /// Bitcrusher wet/dry mix (0.0 = clean, 1.0 = fully crushed).
    pub crusher_mix: f64,
    /// Compressor ratio (e.g. 8.0 for 8:1).
    pub comp_ratio: f64,
    /// Compressor threshold in dBFS.
    pub comp_threshold_db: f64,
    /// Compressor attack in milliseconds.
    pub comp_attack_ms: f64,
    /// Compressor release in milliseconds.
    pub comp_release_ms: f64,
    /// Fixed gain in dB.
    pub volume_boost_db: f64,
    /// Hard limiter level in (0, 1].
    pub limiter_level: f64,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            highpass_cutoff: 120.0,
            lowpass_cutoff: 8000.0,
            crusher_bits: 8,
            crusher_mix: 0.5,
            comp_ratio: 8.0,
            comp_threshold_db: -20.0,
            comp_attack_ms: 5.0,
            comp_release_ms: 50.0,
            volume_boost_db: 9.0,
            limiter_level: 0.95,
        }
    }
}

/// Complete parameter set for one scream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynthParams {
    /// Duration of the audio in seconds.
    pub duration_seconds: f64,
    /// Sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Output channel count (1 or 2).
    #[serde(default = "default_channels")]
    pub channels: u16,
    /// Global seed mixed into every layer seed.
    #[serde(default)]
    pub seed: u64,
    /// The five synthesis layers, in mixing-slot order.
    pub layers: [LayerParams; LAYER_COUNT],
    /// Noise layer parameters.
    pub noise: NoiseParams,
    /// Filter chain parameters.
    #[serde(default)]
    pub filter: FilterParams,
}

fn default_sample_rate() -> u32 {
    DEFAULT_SAMPLE_RATE
}

fn default_channels() -> u16 {
    DEFAULT_CHANNELS
}

impl SynthParams {
    /// Number of sample frames (per channel) these parameters produce.
    pub fn total_samples(&self) -> usize {
        (self.duration_seconds * self.sample_rate as f64) as usize
    }

    /// Size in bytes of the 16-bit interleaved PCM these parameters produce.
    pub fn pcm_len(&self) -> usize {
        self.total_samples() * self.channels as usize * 2
    }

    /// Checks that every parameter lies within its valid range.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> ParamResult<()> {
        if !self.duration_seconds.is_finite() || self.duration_seconds <= 0.0 {
            return Err(ParamError::InvalidDuration {
                duration: self.duration_seconds,
            });
        }
        if self.sample_rate == 0 {
            return Err(ParamError::InvalidSampleRate {
                rate: self.sample_rate,
            });
        }
        if self.channels != 1 && self.channels != 2 {
            return Err(ParamError::InvalidChannels {
                channels: self.channels,
            });
        }
        for (layer, params) in self.layers.iter().enumerate() {
            if !(0.0..=1.0).contains(&params.amplitude) {
                return Err(ParamError::InvalidAmplitude {
                    layer,
                    amplitude: params.amplitude,
                });
            }
        }
        self.filter.validate()
    }
}

impl FilterParams {
    /// Checks cutoffs, crusher depth and limiter level.
    pub fn validate(&self) -> ParamResult<()> {
        if self.highpass_cutoff.is_nan() || self.highpass_cutoff < 0.0 {
            return Err(ParamError::InvalidFilterCutoff {
                name: "highpass",
                cutoff: self.highpass_cutoff,
            });
        }
        if self.lowpass_cutoff.is_nan() || self.lowpass_cutoff < 0.0 {
            return Err(ParamError::InvalidFilterCutoff {
                name: "lowpass",
                cutoff: self.lowpass_cutoff,
            });
        }
        if !(1..=16).contains(&self.crusher_bits) {
            return Err(ParamError::InvalidCrusherBits {
                bits: self.crusher_bits,
            });
        }
        if self.limiter_level.is_nan() || self.limiter_level <= 0.0 || self.limiter_level > 1.0 {
            return Err(ParamError::InvalidLimiterLevel {
                level: self.limiter_level,
            });
        }
        Ok(())
    }
}
