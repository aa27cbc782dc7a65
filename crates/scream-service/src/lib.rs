//! Scream Service
//!
//! Ties the workspace together: configuration, parameter resolution, file
//! output and voice playback.
//!
//! # Overview
//!
//! ```text
//! ServiceConfig -> resolve_params -> PcmGenerator -> OGG / WAV file
//!                                                \-> Opus frames -> Player
//! ```
//!
//! PCM comes from the in-process synthesizer or, with `backend: ffmpeg`, from
//! an `ffmpeg` subprocess. Any [`scream_backend_audio::PcmGenerator`] can be
//! injected with [`ScreamService::with_generator`].
//!
//! Configuration is layered: [`ServiceConfig::default`], then a YAML file
//! from [`ServiceConfig::load`], then `SCREAM_*` environment variables via
//! [`ServiceConfig::apply_env`].
//!
//! # Example
//!
//! ```no_run
//! use scream_service::{logging, ScreamService, ServiceConfig};
//!
//! let mut config = ServiceConfig::default().merge(&ServiceConfig::load("scream.yaml")?);
//! config.apply_env();
//! logging::init(config.verbose);
//!
//! let service = ScreamService::new(config)?;
//! let mut file = std::fs::File::create("scream.ogg").unwrap();
//! service.generate(&mut file)?;
//! # Ok::<(), scream_service::ServiceError>(())
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod resolve;
pub mod service;

pub use config::{Backend, OutputFormat, ServiceConfig, DEFAULT_DURATION, DEFAULT_PRESET};
pub use error::{ConfigError, ConfigResult, ServiceError, ServiceResult};
pub use resolve::{list_presets, resolve_params};
pub use service::{NoVoice, ScreamService};
