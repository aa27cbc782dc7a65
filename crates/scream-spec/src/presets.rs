//! Named scream presets.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::params::{
    FilterParams, LayerKind, LayerParams, NoiseParams, SynthParams, DEFAULT_CHANNELS,
    DEFAULT_SAMPLE_RATE,
};

/// Returned when a preset name does not match any known preset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset '{0}'")]
pub struct UnknownPresetError(pub String);

/// Identifies a hand-tuned parameter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetName {
    /// Balanced default scream.
    Classic,
    /// Quiet, breathy, noise-heavy.
    Whisper,
    /// Low, loud and heavily crushed.
    DeathMetal,
    /// Fast jumps and dense bursts.
    Glitch,
    /// Long, high and rising.
    Banshee,
    /// Steady, crushed and mechanical.
    Robot,
}

impl PresetName {
    /// Every preset, in listing order.
    pub fn all() -> [PresetName; 6] {
        [
            PresetName::Classic,
            PresetName::Whisper,
            PresetName::DeathMetal,
            PresetName::Glitch,
            PresetName::Banshee,
            PresetName::Robot,
        ]
    }

    /// The preset's canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetName::Classic => "classic",
            PresetName::Whisper => "whisper",
            PresetName::DeathMetal => "death-metal",
            PresetName::Glitch => "glitch",
            PresetName::Banshee => "banshee",
            PresetName::Robot => "robot",
        }
    }
}

impl fmt::Display for PresetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetName {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PresetName::all()
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPresetError(s.to_string()))
    }
}

fn sweep_jump(
    kind: LayerKind,
    base: f64,
    range: f64,
    jump: f64,
    amp: f64,
    rise: f64,
    seed: u64,
) -> LayerParams {
    LayerParams {
        base_freq: base,
        freq_range: range,
        jump_rate: jump,
        amplitude: amp,
        rise,
        seed,
        ..LayerParams::new(kind)
    }
}

fn harmonic(base: f64, sweep: f64, range: f64, jump: f64, amp: f64, seed: u64) -> LayerParams {
    LayerParams {
        base_freq: base,
        sweep_rate: sweep,
        freq_range: range,
        jump_rate: jump,
        amplitude: amp,
        seed,
        ..LayerParams::new(LayerKind::HarmonicSweep)
    }
}

fn noise_layers(burst_amp: f64, burst_seed: u64, floor_amp: f64) -> [LayerParams; 2] {
    [
        LayerParams {
            amplitude: burst_amp,
            seed: burst_seed,
            ..LayerParams::new(LayerKind::NoiseBurst)
        },
        LayerParams {
            amplitude: floor_amp,
            ..LayerParams::new(LayerKind::BackgroundNoise)
        },
    ]
}

fn filter(
    highpass: f64,
    lowpass: f64,
    bits: u32,
    mix: f64,
    ratio: f64,
    boost_db: f64,
) -> FilterParams {
    FilterParams {
        highpass_cutoff: highpass,
        lowpass_cutoff: lowpass,
        crusher_bits: bits,
        crusher_mix: mix,
        comp_ratio: ratio,
        volume_boost_db: boost_db,
        ..FilterParams::default()
    }
}

struct Tones {
    primary: LayerParams,
    harmonic: LayerParams,
    shriek: LayerParams,
}

fn assemble(duration: f64, tones: Tones, noise: NoiseParams, filter: FilterParams) -> SynthParams {
    let [burst, floor] = noise_layers(noise.burst_amp, noise.burst_seed, noise.floor_amp);
    SynthParams {
        duration_seconds: duration,
        sample_rate: DEFAULT_SAMPLE_RATE,
        channels: DEFAULT_CHANNELS,
        seed: 0,
        layers: [tones.primary, tones.harmonic, tones.shriek, burst, floor],
        noise,
        filter,
    }
}

impl SynthParams {
    /// Returns the parameter table for a named preset.
    pub fn preset(name: PresetName) -> SynthParams {
        use LayerKind::{HighShriek, PrimaryScream};

        match name {
            PresetName::Classic => assemble(
                3.0,
                Tones {
                    primary: sweep_jump(PrimaryScream, 500.0, 1500.0, 10.0, 0.4, 1.2, 4242),
                    harmonic: harmonic(350.0, 500.0, 800.0, 6.0, 0.25, 3000),
                    shriek: sweep_jump(HighShriek, 1200.0, 1600.0, 20.0, 0.25, 2.5, 7000),
                },
                NoiseParams {
                    burst_rate: 8.0,
                    threshold: 0.7,
                    burst_amp: 0.18,
                    floor_amp: 0.1,
                    burst_seed: 4000,
                },
                filter(120.0, 8000.0, 8, 0.5, 8.0, 9.0),
            ),
            PresetName::Whisper => assemble(
                2.0,
                Tones {
                    primary: sweep_jump(PrimaryScream, 300.0, 500.0, 5.0, 0.15, 0.3, 1111),
                    harmonic: harmonic(200.0, 150.0, 300.0, 3.0, 0.1, 2222),
                    shriek: sweep_jump(HighShriek, 900.0, 400.0, 8.0, 0.08, 0.5, 3333),
                },
                NoiseParams {
                    burst_rate: 3.0,
                    threshold: 0.85,
                    burst_amp: 0.05,
                    floor_amp: 0.12,
                    burst_seed: 4444,
                },
                filter(200.0, 6000.0, 12, 0.2, 4.0, 6.0),
            ),
            PresetName::DeathMetal => assemble(
                4.0,
                Tones {
                    primary: sweep_jump(PrimaryScream, 150.0, 800.0, 15.0, 0.5, 2.0, 6660),
                    harmonic: harmonic(100.0, 200.0, 600.0, 10.0, 0.3, 6661),
                    shriek: sweep_jump(HighShriek, 600.0, 2400.0, 25.0, 0.3, 3.0, 6662),
                },
                NoiseParams {
                    burst_rate: 12.0,
                    threshold: 0.5,
                    burst_amp: 0.25,
                    floor_amp: 0.15,
                    burst_seed: 6663,
                },
                filter(80.0, 12000.0, 6, 0.7, 12.0, 12.0),
            ),
            PresetName::Glitch => assemble(
                3.0,
                Tones {
                    primary: sweep_jump(PrimaryScream, 700.0, 2500.0, 15.0, 0.35, 0.5, 1337),
                    harmonic: harmonic(500.0, 900.0, 1200.0, 10.0, 0.2, 1338),
                    shriek: sweep_jump(HighShriek, 1800.0, 2400.0, 25.0, 0.2, 1.0, 1339),
                },
                NoiseParams {
                    burst_rate: 12.0,
                    threshold: 0.5,
                    burst_amp: 0.22,
                    floor_amp: 0.05,
                    burst_seed: 1340,
                },
                filter(100.0, 10000.0, 6, 0.7, 6.0, 8.0),
            ),
            PresetName::Banshee => assemble(
                4.0,
                Tones {
                    primary: sweep_jump(PrimaryScream, 600.0, 2000.0, 8.0, 0.45, 2.0, 9001),
                    harmonic: harmonic(400.0, 800.0, 1000.0, 5.0, 0.25, 9002),
                    shriek: sweep_jump(HighShriek, 1500.0, 2400.0, 12.0, 0.3, 3.0, 9003),
                },
                NoiseParams {
                    burst_rate: 5.0,
                    threshold: 0.8,
                    burst_amp: 0.1,
                    floor_amp: 0.08,
                    burst_seed: 9004,
                },
                filter(150.0, 11000.0, 10, 0.4, 6.0, 10.0),
            ),
            PresetName::Robot => assemble(
                3.0,
                Tones {
                    primary: sweep_jump(PrimaryScream, 400.0, 1000.0, 12.0, 0.4, 0.5, 8080),
                    harmonic: harmonic(300.0, 600.0, 500.0, 8.0, 0.2, 8081),
                    shriek: sweep_jump(HighShriek, 1000.0, 1200.0, 20.0, 0.2, 1.0, 8082),
                },
                NoiseParams {
                    burst_rate: 10.0,
                    threshold: 0.6,
                    burst_amp: 0.15,
                    floor_amp: 0.07,
                    burst_seed: 8083,
                },
                filter(100.0, 7000.0, 6, 0.65, 10.0, 8.0),
            ),
        }
    }
}
