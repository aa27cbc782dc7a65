//! Pluggable PCM generators.

use scream_spec::SynthParams;

use crate::error::AudioResult;
use crate::generate::{generate, PcmResult};

/// Produces interleaved s16le PCM for a parameter set.
///
/// Implementations validate `params` before doing any work and return
/// [`crate::AudioError::InvalidParams`] when they are rejected.
pub trait PcmGenerator: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Generates PCM for `params`. May block.
    fn generate(&self, params: &SynthParams) -> AudioResult<PcmResult>;
}

/// The in-process synthesizer, see [`generate`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeGenerator;

impl NativeGenerator {
    /// Creates the native generator.
    pub fn new() -> Self {
        Self
    }
}

impl PcmGenerator for NativeGenerator {
    fn name(&self) -> &'static str {
        "native"
    }

    fn generate(&self, params: &SynthParams) -> AudioResult<PcmResult> {
        generate(params)
    }
}
