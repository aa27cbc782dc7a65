//! PCM generation entry point.

use std::io::Cursor;

use scream_spec::SynthParams;

use crate::error::AudioResult;
use crate::filter::{Filter, FilterChain};
use crate::layer::build_layers;
use crate::mixer::LayerMixer;

/// Raw PCM produced by [`generate`].
#[derive(Debug, Clone)]
pub struct PcmResult {
    /// Interleaved signed 16-bit little-endian samples.
    pub pcm: Vec<u8>,
    /// BLAKE3 hash of `pcm`.
    pub pcm_hash: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Channel count.
    pub channels: u16,
    /// Number of samples per channel.
    pub num_samples: usize,
}

impl PcmResult {
    /// Wraps interleaved s16le bytes, hashing them and deriving the sample count.
    pub fn from_pcm(pcm: Vec<u8>, sample_rate: u32, channels: u16) -> Self {
        let frame_bytes = usize::from(channels.max(1)) * 2;
        Self {
            num_samples: pcm.len() / frame_bytes,
            pcm_hash: blake3::hash(&pcm).to_hex().to_string(),
            pcm,
            sample_rate,
            channels,
        }
    }

    /// Consumes the result into a byte reader, for feeding an encoder.
    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.pcm)
    }

    /// Duration of the audio in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / self.sample_rate as f64
    }
}

/// Generates PCM audio for `params`.
///
/// Parameters are validated before anything is allocated. The output holds
/// exactly `floor(duration * sample_rate) * channels * 2` bytes; every channel
/// carries the same mono signal.
pub fn generate(params: &SynthParams) -> AudioResult<PcmResult> {
    params.validate()?;

    let num_samples = params.total_samples();
    let channels = params.channels as usize;
    let rate = params.sample_rate as f64;

    tracing::debug!(
        duration = params.duration_seconds,
        sample_rate = params.sample_rate,
        channels = params.channels,
        seed = params.seed,
        "generating PCM audio"
    );

    let mut mixer = LayerMixer::new(build_layers(params));
    let mut chain = FilterChain::from_params(&params.filter, params.sample_rate);

    let mut pcm = Vec::with_capacity(num_samples * channels * 2);
    for i in 0..num_samples {
        let t = i as f64 / rate;
        let filtered = chain.process(mixer.sample(t));
        let bytes = quantize(filtered).to_le_bytes();
        for _ in 0..channels {
            pcm.extend_from_slice(&bytes);
        }
    }

    let result = PcmResult::from_pcm(pcm, params.sample_rate, params.channels);
    tracing::debug!(bytes = result.pcm.len(), hash = %result.pcm_hash, "PCM generation complete");
    Ok(result)
}

/// Scales a float sample to 16-bit, clamping before rounding.
#[inline]
fn quantize(sample: f64) -> i16 {
    (sample * 32767.0).clamp(-32768.0, 32767.0).round() as i16
}
