//! Property-based checks for the filter chain and generator.

use proptest::prelude::*;

use scream_backend_audio::filter::{Filter, FilterChain, Limiter};
use scream_backend_audio::generate;
use scream_spec::{FilterParams, PresetName, SynthParams};

// ============================================================================
// Strategies
// ============================================================================

fn filter_params() -> impl Strategy<Value = FilterParams> {
    (
        0.0..2000.0f64,
        0.0..20000.0f64,
        1u32..=16,
        0.0..=1.0f64,
        1.0..20.0f64,
        -40.0..0.0f64,
        0.1..50.0f64,
        1.0..500.0f64,
        -24.0..48.0f64,
        0.01..=1.0f64,
    )
        .prop_map(
            |(hp, lp, bits, mix, ratio, threshold, attack, release, boost, limit)| FilterParams {
                highpass_cutoff: hp,
                lowpass_cutoff: lp,
                crusher_bits: bits,
                crusher_mix: mix,
                comp_ratio: ratio,
                comp_threshold_db: threshold,
                comp_attack_ms: attack,
                comp_release_ms: release,
                volume_boost_db: boost,
                limiter_level: limit,
            },
        )
}

fn preset() -> impl Strategy<Value = PresetName> {
    prop::sample::select(PresetName::all().to_vec())
}

// ============================================================================
// Laws
// ============================================================================

proptest! {
    /// The limiter never lets a sample past its level.
    #[test]
    fn limiter_bounds_any_input(level in 0.01..=1.0f64, x in -100.0..100.0f64) {
        let mut limiter = Limiter::new(level);
        prop_assert!(limiter.process(x).abs() <= level);
    }

    /// Any valid filter configuration keeps mixed-range input bounded and finite.
    #[test]
    fn chain_output_bounded(params in filter_params(), input in prop::collection::vec(-1.0..=1.0f64, 1..512)) {
        prop_assert!(params.validate().is_ok());
        let mut chain = FilterChain::from_params(&params, 48000);
        for x in input {
            let y = chain.process(x);
            prop_assert!(y.is_finite());
            prop_assert!(y.abs() <= params.limiter_level + 1e-12, "{} > {}", y, params.limiter_level);
        }
    }

    /// Byte count depends only on duration, rate and channel count.
    #[test]
    fn pcm_length_matches_params(
        name in preset(),
        millis in 1u64..120,
        channels in 1u16..=2,
    ) {
        let mut params = SynthParams::preset(name);
        params.duration_seconds = millis as f64 / 1000.0;
        params.channels = channels;
        let result = generate(&params).unwrap();
        prop_assert_eq!(result.pcm.len(), params.pcm_len());
        prop_assert_eq!(result.num_samples, params.total_samples());
    }

    /// Randomized parameters always validate.
    #[test]
    fn randomized_params_validate(seed in 1u64..u64::MAX) {
        prop_assert!(SynthParams::randomize(seed).validate().is_ok());
    }
}
