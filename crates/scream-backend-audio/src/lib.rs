//! Scream Audio Backend
//!
//! This crate turns a validated [`scream_spec::SynthParams`] into raw 16-bit PCM.
//!
//! # Overview
//!
//! Five synthesis layers are summed by the [`mixer`], clamped to [-1, 1] and
//! pushed sample by sample through a fixed [`filter`] chain:
//!
//! ```text
//! layers -> mixer -> highpass -> lowpass -> bitcrusher -> compressor -> boost -> limiter -> s16le
//! ```
//!
//! # Determinism
//!
//! Identical parameters always yield byte-identical PCM. Frequency jumps come
//! from a stateless seeded hash ([`rng::seeded_random`]) and noise from PCG32
//! streams owned by each layer; nothing is shared between runs.
//!
//! # Example
//!
//! ```
//! use scream_backend_audio::generate;
//! use scream_spec::{PresetName, SynthParams};
//!
//! let mut params = SynthParams::preset(PresetName::Whisper);
//! params.duration_seconds = 0.1;
//!
//! let result = generate(&params).unwrap();
//! assert_eq!(result.pcm.len(), params.pcm_len());
//! ```
//!
//! # Crate Structure
//!
//! - [`generate()`] - Main entry point for PCM generation
//! - [`generator`] - The [`PcmGenerator`] seam and the native implementation
//! - [`filter`] - Per-sample filter stages and the filter chain
//! - [`layer`] - The five synthesis layers
//! - [`mixer`] - Layer summing and clamping
//! - [`oscillator`] - Phase accumulator oscillator
//! - [`rng`] - Seeded hash and noise stream construction

pub mod error;
pub mod filter;
pub mod generate;
pub mod generator;
pub mod layer;
pub mod mixer;
pub mod oscillator;
pub mod rng;

pub use error::{AudioError, AudioResult};
pub use generate::{generate, PcmResult};
pub use generator::{NativeGenerator, PcmGenerator};
