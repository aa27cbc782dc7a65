//! Scream Parameter Library
//!
//! This crate provides the parameter model for procedural scream synthesis:
//! the top-level [`SynthParams`], the per-layer [`LayerParams`], the shared
//! [`NoiseParams`] and the post-processing [`FilterParams`].
//!
//! # Overview
//!
//! A scream is built from five layers mixed together and pushed through a
//! fixed filter chain. Parameters are plain data: they are validated once
//! with [`SynthParams::validate`] and never mutated by the synthesis backend.
//!
//! Parameters come from one of two places:
//!
//! - **Presets**: named, hand-tuned parameter tables ([`PresetName`])
//! - **Randomization**: [`SynthParams::randomize`] draws every field from a
//!   seeded PCG stream, so a non-zero seed always yields the same scream
//!
//! # Example
//!
//! ```
//! use scream_spec::{PresetName, SynthParams};
//!
//! let mut params = SynthParams::preset(PresetName::Classic);
//! params.duration_seconds = 1.5;
//! assert!(params.validate().is_ok());
//!
//! let random = SynthParams::randomize(42);
//! assert_eq!(random, SynthParams::randomize(42));
//! ```
//!
//! # Modules
//!
//! - [`error`]: Parameter validation errors
//! - [`params`]: Parameter types and validation
//! - [`presets`]: Named presets
//! - [`randomize`]: Seeded random parameter generation

pub mod error;
pub mod params;
pub mod presets;
pub mod randomize;

pub use error::{ParamError, ParamResult};
pub use params::{
    FilterParams, LayerKind, LayerParams, NoiseParams, SynthParams, DEFAULT_CHANNELS,
    DEFAULT_SAMPLE_RATE, LAYER_COUNT,
};
pub use presets::{PresetName, UnknownPresetError};
