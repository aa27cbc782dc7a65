//! Scream ffmpeg Backend
//!
//! Generates scream PCM by running `ffmpeg` as a subprocess instead of the
//! in-process synthesizer.
//!
//! # Overview
//!
//! The five layers are rendered into one `aevalsrc` expression and the filter
//! parameters into an `-af` chain of stock ffmpeg filters:
//!
//! ```text
//! aevalsrc -> highpass -> lowpass -> acrusher -> acompressor -> volume -> alimiter -> s16le on stdout
//! ```
//!
//! The output has the same shape as the native backend (interleaved s16le at
//! the requested rate and channel count) but is not sample-identical to it.
//!
//! # Crate Structure
//!
//! - [`FfmpegGenerator`] - Locates ffmpeg and implements [`scream_backend_audio::PcmGenerator`]
//! - [`command`] - Argument and expression construction
//! - [`error`] - Error types

pub mod command;
pub mod error;
pub mod generator;

pub use error::{FfmpegError, FfmpegResult};
pub use generator::FfmpegGenerator;
