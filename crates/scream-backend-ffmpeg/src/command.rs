//! ffmpeg argument construction.
//!
//! Layer formulas mirror the native synthesizer: the same coprime per layer
//! kind selects the jump step, and the global seed is folded into every
//! per-layer seed. ffmpeg's `random(idx)` has its own generator, so the
//! output is not sample-identical to the native backend.

use scream_spec::{FilterParams, LayerKind, LayerParams, NoiseParams, SynthParams};

/// Rate at which noise terms are re-drawn, independent of the output rate.
const NOISE_RATE: &str = "48000";

/// Background noise index offset.
const BACKGROUND_OFFSET: u32 = 7777;

/// Builds the full ffmpeg argument list. Raw s16le PCM goes to stdout.
pub fn build_args(params: &SynthParams) -> Vec<String> {
    let sample_rate = params.sample_rate.to_string();
    let channels = params.channels.to_string();
    let source = format!(
        "aevalsrc='{}':s={}:d={}",
        source_expr(params),
        sample_rate,
        params.duration_seconds
    );
    let filters = filter_chain(&params.filter);

    [
        "-nostdin",
        "-v",
        "quiet",
        "-f",
        "lavfi",
        "-i",
        source.as_str(),
        "-af",
        filters.as_str(),
        "-f",
        "s16le",
        "-acodec",
        "pcm_s16le",
        "-ac",
        channels.as_str(),
        "-ar",
        sample_rate.as_str(),
        "pipe:1",
    ]
    .iter()
    .map(|arg| arg.to_string())
    .collect()
}

/// Sums every layer expression into one `aevalsrc` expression.
pub fn source_expr(params: &SynthParams) -> String {
    params
        .layers
        .iter()
        .enumerate()
        .map(|(index, layer)| layer_expr(layer, &params.noise, params.seed, index))
        .collect::<Vec<_>>()
        .join("+")
}

/// Expression for one layer slot. Silent layers render as `0`.
pub fn layer_expr(layer: &LayerParams, noise: &NoiseParams, global_seed: u64, index: usize) -> String {
    match layer.kind {
        LayerKind::PrimaryScream | LayerKind::HighShriek => {
            if layer.amplitude == 0.0 {
                return "0".to_string();
            }
            format!(
                "{}*(1+{}*t)*sin(2*PI*t*({}+{}*random(floor(t*{})*{}+{})))",
                fmt_float(layer.amplitude),
                fmt_float(layer.rise),
                fmt_float(layer.base_freq),
                fmt_float(layer.freq_range),
                fmt_float(layer.jump_rate),
                coprime(layer.kind),
                derive_seed(global_seed, layer.seed, index),
            )
        }
        LayerKind::HarmonicSweep => {
            if layer.amplitude == 0.0 {
                return "0".to_string();
            }
            format!(
                "{}*sin(2*PI*t*({}+{}*t+{}*random(floor(t*{})*{}+{})))",
                fmt_float(layer.amplitude),
                fmt_float(layer.base_freq),
                fmt_float(layer.sweep_rate),
                fmt_float(layer.freq_range),
                fmt_float(layer.jump_rate),
                coprime(layer.kind),
                derive_seed(global_seed, layer.seed, index),
            )
        }
        LayerKind::NoiseBurst => {
            if noise.burst_amp == 0.0 {
                return "0".to_string();
            }
            format!(
                "{}*gt(random(floor(t*{})*{}+{}),{})*(2*random(t*{})-1)",
                fmt_float(noise.burst_amp),
                fmt_float(noise.burst_rate),
                coprime(layer.kind),
                derive_seed(global_seed, noise.burst_seed, index),
                fmt_float(noise.threshold),
                NOISE_RATE,
            )
        }
        LayerKind::BackgroundNoise => {
            if noise.floor_amp == 0.0 {
                return "0".to_string();
            }
            format!(
                "{}*(2*random(t*{}+{})-1)",
                fmt_float(noise.floor_amp),
                NOISE_RATE,
                BACKGROUND_OFFSET,
            )
        }
    }
}

/// The `-af` chain: highpass, lowpass, acrusher, acompressor, volume, alimiter.
pub fn filter_chain(filter: &FilterParams) -> String {
    [
        format!("highpass=f={}", fmt_float(filter.highpass_cutoff)),
        format!("lowpass=f={}", fmt_float(filter.lowpass_cutoff)),
        format!(
            "acrusher=bits={}:mix={}:mode=log:aa=1",
            filter.crusher_bits,
            fmt_float(filter.crusher_mix)
        ),
        format!(
            "acompressor=ratio={}:attack={}:release={}:threshold={}dB",
            fmt_float(filter.comp_ratio),
            fmt_float(filter.comp_attack_ms),
            fmt_float(filter.comp_release_ms),
            fmt_float(filter.comp_threshold_db)
        ),
        format!("volume={}dB", fmt_float(filter.volume_boost_db)),
        format!(
            "alimiter=limit={}:attack=1:release=10",
            fmt_float(filter.limiter_level)
        ),
    ]
    .join(",")
}

/// Non-negative per-layer seed from the global seed, layer seed and slot.
///
/// ffmpeg expression integers are signed, so the mix is done in `i64` and
/// folded to its absolute value; `i64::MIN` maps to 0.
pub fn derive_seed(global_seed: u64, layer_seed: u64, index: usize) -> i64 {
    let mixed = (global_seed as i64).wrapping_mul(1_000_003)
        ^ layer_seed as i64
        ^ (index as i64).wrapping_mul(7919);
    mixed.checked_abs().unwrap_or(0)
}

fn coprime(kind: LayerKind) -> u64 {
    kind.coprime().unwrap_or(1)
}

fn fmt_float(v: f64) -> String {
    format!("{:.6}", v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use scream_spec::PresetName;

    #[test]
    fn test_args_layout() {
        let mut params = SynthParams::preset(PresetName::Classic);
        params.duration_seconds = 2.5;
        let args = build_args(&params);

        assert_eq!(&args[..6], &["-nostdin", "-v", "quiet", "-f", "lavfi", "-i"]);
        assert!(args[6].starts_with("aevalsrc='"));
        assert!(args[6].ends_with("':s=48000:d=2.5"));
        assert_eq!(args[7], "-af");
        assert_eq!(
            &args[9..],
            &["-f", "s16le", "-acodec", "pcm_s16le", "-ac", "2", "-ar", "48000", "pipe:1"]
        );
    }

    #[test]
    fn test_default_filter_chain() {
        assert_eq!(
            filter_chain(&FilterParams::default()),
            "highpass=f=120.000000,lowpass=f=8000.000000,\
             acrusher=bits=8:mix=0.500000:mode=log:aa=1,\
             acompressor=ratio=8.000000:attack=5.000000:release=50.000000:threshold=-20.000000dB,\
             volume=9.000000dB,\
             alimiter=limit=0.950000:attack=1:release=10"
        );
    }

    #[test]
    fn test_silent_layers_render_zero() {
        let noise = NoiseParams {
            burst_rate: 8.0,
            threshold: 0.7,
            burst_amp: 0.0,
            floor_amp: 0.0,
            burst_seed: 1,
        };
        for kind in [
            LayerKind::PrimaryScream,
            LayerKind::HarmonicSweep,
            LayerKind::HighShriek,
            LayerKind::NoiseBurst,
            LayerKind::BackgroundNoise,
        ] {
            assert_eq!(layer_expr(&LayerParams::new(kind), &noise, 9, 0), "0");
        }
    }

    #[test]
    fn test_primary_expr() {
        let layer = LayerParams {
            base_freq: 500.0,
            freq_range: 1500.0,
            jump_rate: 10.0,
            amplitude: 0.4,
            rise: 1.2,
            seed: 4242,
            ..LayerParams::new(LayerKind::PrimaryScream)
        };
        let noise = SynthParams::preset(PresetName::Classic).noise;
        assert_eq!(
            layer_expr(&layer, &noise, 0, 0),
            "0.400000*(1+1.200000*t)*sin(2*PI*t*(500.000000+1500.000000*random(floor(t*10.000000)*137+4242)))"
        );
    }

    #[test]
    fn test_every_slot_follows_global_seed() {
        let params = SynthParams::preset(PresetName::Classic);
        let mut other = params.clone();
        other.seed = params.seed.wrapping_add(1);
        for index in 0..4 {
            let a = layer_expr(&params.layers[index], &params.noise, params.seed, index);
            let b = layer_expr(&other.layers[index], &other.noise, other.seed, index);
            if a != "0" {
                assert_ne!(a, b, "slot {index}");
            }
        }
    }

    #[test]
    fn test_derive_seed_non_negative() {
        assert_eq!(derive_seed(0, 42, 0), 42);
        assert_eq!(derive_seed(0, 0, 1), 7919);
        assert!(derive_seed(u64::MAX, 0, 3) >= 0);
        assert_eq!(derive_seed(0, i64::MIN as u64, 0), 0);
        assert_eq!(derive_seed(0, -5i64 as u64, 0), 5);
    }
}
