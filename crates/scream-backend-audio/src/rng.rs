//! Deterministic randomness for synthesis.
//!
//! Two sources are used:
//! - a stateless seeded hash for stepwise decisions (frequency jumps, burst
//!   gates), so any `(seed, step)` pair can be evaluated in any order
//! - PCG32 streams for continuous noise, one per layer instance

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Global-seed multipliers, one per layer slot.
pub const SEED_MIX_LAYERS: [u64; 5] = [1_000_003, 1_000_033, 1_000_037, 1_000_039, 1_000_099];

/// Global-seed multiplier for the noise seed.
pub const SEED_MIX_NOISE: u64 = 1_000_081;

/// XOR constant separating the background stream from the burst stream.
pub const BACKGROUND_DECORRELATION: u64 = 0x5a5a_5a5a_5a5a_5a5a;

/// Maps a 64-bit key to a uniform float in [0, 1).
///
/// Pure bijective mixing; no state is read or written.
#[inline]
pub fn splitmix64(seed: u64) -> f64 {
    let mut s = seed;
    s = (s ^ (s >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    s = (s ^ (s >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    s ^= s >> 31;
    (s >> 11) as f64 / (1u64 << 53) as f64
}

/// Deterministic value in [0, 1) for a `(layer_seed, step, coprime)` triple.
#[inline]
pub fn seeded_random(layer_seed: u64, step: i64, coprime: u64) -> f64 {
    splitmix64(layer_seed ^ (step as u64).wrapping_mul(coprime))
}

/// Mixes the global seed into a per-slot seed.
#[inline]
pub fn mix_seed(seed: u64, global_seed: u64, multiplier: u64) -> u64 {
    seed ^ global_seed.wrapping_mul(multiplier)
}

/// Creates a noise stream from a 64-bit seed.
pub fn create_noise_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
