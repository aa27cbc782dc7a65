//! Synthesis layers.
//!
//! Each layer is a small state machine advanced by the sample time `t`.
//! Layers are built fresh for every generation run and never shared.

use rand::Rng;
use rand_pcg::Pcg32;
use scream_spec::{LayerKind, LayerParams, NoiseParams, SynthParams};

use crate::oscillator::Oscillator;
use crate::rng::{
    create_noise_rng, mix_seed, seeded_random, BACKGROUND_DECORRELATION, SEED_MIX_LAYERS,
    SEED_MIX_NOISE,
};

/// A sound source producing one sample per time step.
pub trait Layer {
    /// Returns the sample at time `t` seconds and advances internal state.
    fn sample(&mut self, t: f64) -> f64;
}

/// Caches the hashed value for the current step, recomputing it only when
/// `floor(t * rate)` changes.
#[derive(Debug, Clone)]
struct StepCache {
    seed: u64,
    coprime: u64,
    rate: f64,
    step: Option<i64>,
    value: f64,
}

impl StepCache {
    fn new(seed: u64, coprime: u64, rate: f64) -> Self {
        Self {
            seed,
            coprime,
            rate,
            step: None,
            value: 0.0,
        }
    }

    #[inline]
    fn at(&mut self, t: f64) -> f64 {
        let step = (t * self.rate).floor() as i64;
        if self.step != Some(step) {
            self.step = Some(step);
            self.value = seeded_random(self.seed, step, self.coprime);
        }
        self.value
    }
}

fn coprime_of(kind: LayerKind) -> u64 {
    kind.coprime().unwrap_or(1)
}

/// Rising-envelope tone whose frequency jumps to a new hashed value at every
/// step. Used for both the primary scream and the high shriek.
#[derive(Debug, Clone)]
pub struct SweepJumpLayer {
    osc: Oscillator,
    steps: StepCache,
    base: f64,
    freq_range: f64,
    amp: f64,
    rise: f64,
}

impl SweepJumpLayer {
    fn with_coprime(params: &LayerParams, coprime: u64, sample_rate: f64) -> Self {
        Self {
            osc: Oscillator::new(sample_rate),
            steps: StepCache::new(params.seed, coprime, params.jump_rate),
            base: params.base_freq,
            freq_range: params.freq_range,
            amp: params.amplitude,
            rise: params.rise,
        }
    }

    /// Creates a primary scream layer.
    pub fn primary_scream(params: &LayerParams, sample_rate: f64) -> Self {
        Self::with_coprime(params, coprime_of(LayerKind::PrimaryScream), sample_rate)
    }

    /// Creates a high shriek layer.
    pub fn high_shriek(params: &LayerParams, sample_rate: f64) -> Self {
        Self::with_coprime(params, coprime_of(LayerKind::HighShriek), sample_rate)
    }
}

impl Layer for SweepJumpLayer {
    fn sample(&mut self, t: f64) -> f64 {
        let freq = self.base + self.freq_range * self.steps.at(t);
        let envelope = self.amp * (1.0 + self.rise * t);
        envelope * self.osc.sin(freq)
    }
}

/// Tone swept linearly from its base frequency, with a hashed jitter offset
/// that changes at every step.
#[derive(Debug, Clone)]
pub struct HarmonicSweepLayer {
    osc: Oscillator,
    steps: StepCache,
    base: f64,
    sweep: f64,
    freq_range: f64,
    amp: f64,
}

impl HarmonicSweepLayer {
    /// Creates a harmonic sweep layer.
    pub fn new(params: &LayerParams, sample_rate: f64) -> Self {
        Self {
            osc: Oscillator::new(sample_rate),
            steps: StepCache::new(
                params.seed,
                coprime_of(LayerKind::HarmonicSweep),
                params.jump_rate,
            ),
            base: params.base_freq,
            sweep: params.sweep_rate,
            freq_range: params.freq_range,
            amp: params.amplitude,
        }
    }
}

impl Layer for HarmonicSweepLayer {
    fn sample(&mut self, t: f64) -> f64 {
        let freq = self.base + self.sweep * t + self.freq_range * self.steps.at(t);
        self.amp * self.osc.sin(freq)
    }
}

/// White noise gated open or shut at every burst step.
///
/// The gate comes from the seeded hash; the noise itself comes from a private
/// PCG32 stream so open bursts sound continuous.
#[derive(Debug, Clone)]
pub struct NoiseBurstLayer {
    gate: StepCache,
    noise: Pcg32,
    threshold: f64,
    amp: f64,
}

impl NoiseBurstLayer {
    /// Creates a noise burst layer.
    pub fn new(noise: &NoiseParams) -> Self {
        Self {
            gate: StepCache::new(
                noise.burst_seed,
                coprime_of(LayerKind::NoiseBurst),
                noise.burst_rate,
            ),
            noise: create_noise_rng(noise.burst_seed),
            threshold: noise.threshold,
            amp: noise.burst_amp,
        }
    }
}

impl Layer for NoiseBurstLayer {
    fn sample(&mut self, t: f64) -> f64 {
        if self.gate.at(t) <= self.threshold {
            return 0.0;
        }
        self.amp * (2.0 * self.noise.gen::<f64>() - 1.0)
    }
}

/// Constant low-level noise floor, independent of `t`.
#[derive(Debug, Clone)]
pub struct BackgroundNoiseLayer {
    noise: Pcg32,
    amp: f64,
}

impl BackgroundNoiseLayer {
    /// Creates a background noise layer.
    pub fn new(noise: &NoiseParams) -> Self {
        Self {
            noise: create_noise_rng(noise.burst_seed ^ BACKGROUND_DECORRELATION),
            amp: noise.floor_amp,
        }
    }
}

impl Layer for BackgroundNoiseLayer {
    fn sample(&mut self, _t: f64) -> f64 {
        self.amp * (2.0 * self.noise.gen::<f64>() - 1.0)
    }
}

/// Builds the five layers for one generation run.
///
/// The global seed is mixed into every slot's layer seed and into the noise
/// seed, so changing only [`SynthParams::seed`] perturbs every layer even when
/// a preset pins the per-layer seeds. Layers are built in slot order; the
/// kind recorded in each slot selects the synthesis method.
pub fn build_layers(params: &SynthParams) -> Vec<Box<dyn Layer>> {
    let sample_rate = params.sample_rate as f64;
    let mut noise = params.noise;
    noise.burst_seed = mix_seed(noise.burst_seed, params.seed, SEED_MIX_NOISE);

    params
        .layers
        .iter()
        .zip(SEED_MIX_LAYERS)
        .map(|(layer, multiplier)| {
            let mut layer = *layer;
            layer.seed = mix_seed(layer.seed, params.seed, multiplier);
            build_layer(&layer, &noise, sample_rate)
        })
        .collect()
}

fn build_layer(layer: &LayerParams, noise: &NoiseParams, sample_rate: f64) -> Box<dyn Layer> {
    match layer.kind {
        LayerKind::PrimaryScream => Box::new(SweepJumpLayer::primary_scream(layer, sample_rate)),
        LayerKind::HarmonicSweep => Box::new(HarmonicSweepLayer::new(layer, sample_rate)),
        LayerKind::HighShriek => Box::new(SweepJumpLayer::high_shriek(layer, sample_rate)),
        LayerKind::NoiseBurst => Box::new(NoiseBurstLayer::new(noise)),
        LayerKind::BackgroundNoise => Box::new(BackgroundNoiseLayer::new(noise)),
    }
}
