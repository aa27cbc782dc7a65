//! Seeded random parameter generation.
//!
//! Every field is drawn from a PCG32 stream seeded with the caller's seed, so
//! a given non-zero seed always produces the same parameter set.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::params::{
    FilterParams, LayerKind, LayerParams, NoiseParams, SynthParams, DEFAULT_CHANNELS,
    DEFAULT_SAMPLE_RATE,
};

/// Picks a seed from the wall clock, never returning zero.
fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    nanos.max(1)
}

impl SynthParams {
    /// Generates a random scream.
    ///
    /// A `seed` of 0 picks a seed from the clock; the chosen seed is stored in
    /// [`SynthParams::seed`] so the result can be reproduced.
    pub fn randomize(seed: u64) -> SynthParams {
        let seed = if seed == 0 { clock_seed() } else { seed };
        let mut rng = Pcg32::seed_from_u64(seed);

        let duration_seconds = rng.gen_range(2.5..4.0);

        let primary = LayerParams {
            base_freq: rng.gen_range(300.0..700.0),
            freq_range: rng.gen_range(800.0..2500.0),
            jump_rate: rng.gen_range(5.0..15.0),
            amplitude: rng.gen_range(0.3..0.5),
            rise: rng.gen_range(0.5..2.0),
            seed: rng.gen_range(1..=9999),
            ..LayerParams::new(LayerKind::PrimaryScream)
        };
        let harmonic = LayerParams {
            base_freq: rng.gen_range(200.0..500.0),
            sweep_rate: rng.gen_range(300.0..900.0),
            freq_range: rng.gen_range(400.0..1200.0),
            jump_rate: rng.gen_range(3.0..10.0),
            amplitude: rng.gen_range(0.15..0.3),
            seed: rng.gen_range(1..=9999),
            ..LayerParams::new(LayerKind::HarmonicSweep)
        };
        let shriek = LayerParams {
            base_freq: rng.gen_range(900.0..1800.0),
            freq_range: rng.gen_range(800.0..2400.0),
            jump_rate: rng.gen_range(10.0..25.0),
            amplitude: rng.gen_range(0.15..0.3),
            rise: rng.gen_range(1.0..3.0),
            seed: rng.gen_range(1..=9999),
            ..LayerParams::new(LayerKind::HighShriek)
        };
        let burst = LayerParams {
            amplitude: rng.gen_range(0.1..0.25),
            seed: rng.gen_range(1..=9999),
            ..LayerParams::new(LayerKind::NoiseBurst)
        };
        let floor = LayerParams {
            amplitude: rng.gen_range(0.05..0.15),
            ..LayerParams::new(LayerKind::BackgroundNoise)
        };

        let noise = NoiseParams {
            burst_rate: rng.gen_range(3.0..12.0),
            threshold: rng.gen_range(0.5..0.85),
            burst_amp: rng.gen_range(0.1..0.25),
            floor_amp: rng.gen_range(0.05..0.15),
            burst_seed: rng.gen_range(1..=9999),
        };

        let filter = FilterParams {
            highpass_cutoff: rng.gen_range(80.0..200.0),
            lowpass_cutoff: rng.gen_range(6000.0..12000.0),
            crusher_bits: rng.gen_range(6..=12),
            crusher_mix: rng.gen_range(0.3..0.7),
            comp_ratio: rng.gen_range(4.0..12.0),
            comp_threshold_db: -20.0,
            comp_attack_ms: 5.0,
            comp_release_ms: 50.0,
            volume_boost_db: rng.gen_range(6.0..12.0),
            limiter_level: 0.95,
        };

        SynthParams {
            duration_seconds,
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: DEFAULT_CHANNELS,
            seed,
            layers: [primary, harmonic, shriek, burst, floor],
            noise,
            filter,
        }
    }
}
