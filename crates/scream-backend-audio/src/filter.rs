//! Per-sample filter stages.
//!
//! Every stage is a small stateful struct implementing [`Filter`]. A
//! [`FilterChain`] owns its stages and is built fresh for each generation run.

use std::f64::consts::PI;

use scream_spec::FilterParams;

/// A single-sample audio processor.
pub trait Filter {
    /// Processes one sample, updating internal state.
    fn process(&mut self, sample: f64) -> f64;
}

/// Converts decibels to a linear gain factor.
#[inline]
pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

fn rc_dt(cutoff: f64, sample_rate: f64) -> (f64, f64) {
    (1.0 / (2.0 * PI * cutoff), 1.0 / sample_rate)
}

/// First-order IIR high-pass filter.
#[derive(Debug, Clone)]
pub struct Highpass {
    alpha: f64,
    prev_in: f64,
    prev_out: f64,
}

impl Highpass {
    /// Creates a high-pass filter. A zero cutoff passes the signal unchanged.
    pub fn new(cutoff: f64, sample_rate: f64) -> Self {
        let alpha = if cutoff > 0.0 {
            let (rc, dt) = rc_dt(cutoff, sample_rate);
            rc / (rc + dt)
        } else {
            1.0
        };
        Self {
            alpha,
            prev_in: 0.0,
            prev_out: 0.0,
        }
    }
}

impl Filter for Highpass {
    fn process(&mut self, sample: f64) -> f64 {
        let out = self.alpha * (self.prev_out + sample - self.prev_in);
        self.prev_in = sample;
        self.prev_out = out;
        out
    }
}

/// First-order IIR low-pass filter.
#[derive(Debug, Clone)]
pub struct Lowpass {
    alpha: f64,
    prev: f64,
}

impl Lowpass {
    /// Creates a low-pass filter. A zero cutoff blocks everything.
    pub fn new(cutoff: f64, sample_rate: f64) -> Self {
        let alpha = if cutoff > 0.0 {
            let (rc, dt) = rc_dt(cutoff, sample_rate);
            dt / (rc + dt)
        } else {
            0.0
        };
        Self { alpha, prev: 0.0 }
    }
}

impl Filter for Lowpass {
    fn process(&mut self, sample: f64) -> f64 {
        self.prev += self.alpha * (sample - self.prev);
        self.prev
    }
}

/// Bit-depth reducer blended with the clean signal.
#[derive(Debug, Clone)]
pub struct Bitcrusher {
    levels: f64,
    mix: f64,
}

impl Bitcrusher {
    /// Creates a bitcrusher quantizing to `2^bits` levels. `mix` of 1 is fully crushed.
    pub fn new(bits: u32, mix: f64) -> Self {
        Self {
            levels: 2f64.powi(bits as i32),
            mix,
        }
    }
}

impl Filter for Bitcrusher {
    fn process(&mut self, sample: f64) -> f64 {
        let crushed = (sample * self.levels).floor() / self.levels;
        self.mix * crushed + (1.0 - self.mix) * sample
    }
}

/// Envelope-following dynamic range compressor.
#[derive(Debug, Clone)]
pub struct Compressor {
    threshold: f64,
    attack_coef: f64,
    release_coef: f64,
    ratio_exp: f64,
    envelope: f64,
}

impl Compressor {
    /// Creates a compressor. Threshold is in dBFS, times in milliseconds.
    pub fn new(
        ratio: f64,
        threshold_db: f64,
        attack_ms: f64,
        release_ms: f64,
        sample_rate: f64,
    ) -> Self {
        let attack_samples = attack_ms / 1000.0 * sample_rate;
        let release_samples = release_ms / 1000.0 * sample_rate;
        Self {
            threshold: db_to_linear(threshold_db),
            attack_coef: (-1.0 / attack_samples).exp(),
            release_coef: (-1.0 / release_samples).exp(),
            ratio_exp: 1.0 / ratio - 1.0,
            envelope: 0.0,
        }
    }

    /// Current envelope level.
    pub fn envelope(&self) -> f64 {
        self.envelope
    }
}

impl Filter for Compressor {
    fn process(&mut self, sample: f64) -> f64 {
        let level = sample.abs();
        let coef = if level > self.envelope {
            self.attack_coef
        } else {
            self.release_coef
        };
        self.envelope = coef * self.envelope + (1.0 - coef) * level;

        if self.envelope > self.threshold {
            let gain = (self.ratio_exp * (self.envelope / self.threshold).ln()).exp();
            sample * gain
        } else {
            sample
        }
    }
}

/// Fixed gain stage.
#[derive(Debug, Clone)]
pub struct VolumeBoost {
    gain: f64,
}

impl VolumeBoost {
    /// Creates a boost of `db` decibels. Negative values attenuate.
    pub fn new(db: f64) -> Self {
        Self {
            gain: db_to_linear(db),
        }
    }

    /// Linear gain factor.
    pub fn gain(&self) -> f64 {
        self.gain
    }
}

impl Filter for VolumeBoost {
    fn process(&mut self, sample: f64) -> f64 {
        sample * self.gain
    }
}

/// Hard clipper to `[-level, level]`.
#[derive(Debug, Clone)]
pub struct Limiter {
    level: f64,
}

impl Limiter {
    /// Creates a limiter clipping at `level`, which should lie in (0, 1].
    pub fn new(level: f64) -> Self {
        Self { level }
    }
}

impl Filter for Limiter {
    fn process(&mut self, sample: f64) -> f64 {
        sample.clamp(-self.level, self.level)
    }
}

/// Ordered cascade of filter stages.
pub struct FilterChain {
    stages: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates a chain applying `stages` in order.
    pub fn new(stages: Vec<Box<dyn Filter>>) -> Self {
        Self { stages }
    }

    /// Builds the standard chain:
    /// highpass, lowpass, bitcrusher, compressor, boost, limiter.
    ///
    /// The limiter is last so its clip bounds the final output.
    pub fn from_params(params: &FilterParams, sample_rate: u32) -> Self {
        let rate = sample_rate as f64;
        Self::new(vec![
            Box::new(Highpass::new(params.highpass_cutoff, rate)),
            Box::new(Lowpass::new(params.lowpass_cutoff, rate)),
            Box::new(Bitcrusher::new(params.crusher_bits, params.crusher_mix)),
            Box::new(Compressor::new(
                params.comp_ratio,
                params.comp_threshold_db,
                params.comp_attack_ms,
                params.comp_release_ms,
                rate,
            )),
            Box::new(VolumeBoost::new(params.volume_boost_db)),
            Box::new(Limiter::new(params.limiter_level)),
        ])
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl Filter for FilterChain {
    fn process(&mut self, sample: f64) -> f64 {
        self.stages
            .iter_mut()
            .fold(sample, |acc, stage| stage.process(acc))
    }
}
