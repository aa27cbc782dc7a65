//! Turns a service configuration into synthesis parameters.

use scream_spec::{PresetName, SynthParams};

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};

/// Builds the parameters for one scream.
///
/// A configured preset is looked up by name; without one, parameters are
/// randomized from a clock seed. A positive duration replaces the preset
/// duration, and a positive volume adds `20 * log10(volume)` dB to the
/// volume boost.
pub fn resolve_params(config: &ServiceConfig) -> ServiceResult<SynthParams> {
    let mut params = match config.preset.as_deref().filter(|p| !p.is_empty()) {
        Some(name) => {
            let preset: PresetName = name
                .parse()
                .map_err(|_| ServiceError::UnknownPreset(name.to_string()))?;
            SynthParams::preset(preset)
        }
        None => SynthParams::randomize(0),
    };

    if let Some(duration) = config.duration.filter(|d| !d.is_zero()) {
        params.duration_seconds = duration.as_secs_f64();
    }
    if config.volume > 0.0 {
        params.filter.volume_boost_db += 20.0 * config.volume.log10();
    }

    tracing::debug!(
        preset = config.preset.as_deref().unwrap_or("random"),
        seed = params.seed,
        duration = params.duration_seconds,
        boost_db = params.filter.volume_boost_db,
        "resolved scream parameters"
    );
    Ok(params)
}

/// Names of every available preset, in listing order.
pub fn list_presets() -> Vec<&'static str> {
    PresetName::all().iter().map(PresetName::as_str).collect()
}
