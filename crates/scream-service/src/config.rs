//! Service configuration.
//!
//! Configuration comes in layers: built-in defaults, then a YAML file, then
//! environment variables. Each layer is a [`ServiceConfig`] whose unset
//! values are `None`, zero or `false`, and [`ServiceConfig::merge`] lays one
//! over another.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use scream_spec::PresetName;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Preset used when nothing else is configured.
pub const DEFAULT_PRESET: &str = "classic";

/// Duration used when nothing else is configured.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(3);

/// File container for generated audio.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Ogg,
    Wav,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Ogg => "ogg",
            OutputFormat::Wav => "wav",
        }
    }

    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ogg" => Ok(OutputFormat::Ogg),
            "wav" => Ok(OutputFormat::Wav),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

/// PCM generator backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The in-process synthesizer.
    #[default]
    Native,
    /// An `ffmpeg` executable found on PATH.
    Ffmpeg,
}

impl Backend {
    /// Lowercase name as used in config files and `SCREAM_BACKEND`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Native => "native",
            Backend::Ffmpeg => "ffmpeg",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" => Ok(Backend::Native),
            "ffmpeg" => Ok(Backend::Ffmpeg),
            _ => Err(ConfigError::InvalidBackend(s.to_string())),
        }
    }
}

/// Settings for a [`crate::ScreamService`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default = "ServiceConfig::empty", deny_unknown_fields)]
pub struct ServiceConfig {
    /// Generator backend, `native` or `ffmpeg`.
    pub backend: Option<Backend>,
    /// Preset name. `None` selects randomized parameters.
    pub preset: Option<String>,
    /// Overrides the preset duration. Written as seconds, or a string such
    /// as `"2.5s"` or `"800ms"`.
    #[serde(with = "duration_serde")]
    pub duration: Option<Duration>,
    /// Output volume in [0, 1]. Zero leaves the preset level untouched.
    pub volume: f64,
    pub format: Option<OutputFormat>,
    /// Encode frames but skip the voice connection.
    pub dry_run: bool,
    pub verbose: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend: Some(Backend::Native),
            preset: Some(DEFAULT_PRESET.to_string()),
            duration: Some(DEFAULT_DURATION),
            volume: 1.0,
            format: Some(OutputFormat::Ogg),
            dry_run: false,
            verbose: false,
        }
    }
}

impl ServiceConfig {
    /// A configuration with every value unset.
    pub fn empty() -> Self {
        Self {
            backend: None,
            preset: None,
            duration: None,
            volume: 0.0,
            format: None,
            dry_run: false,
            verbose: false,
        }
    }

    /// Parses a YAML document. Missing keys stay unset.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::empty());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a YAML config file. Missing keys stay unset.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.to_path_buf(),
                    source,
                }
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_yaml_str(&text)
    }

    /// Returns `self` with every value that is set in `overlay` replaced.
    pub fn merge(&self, overlay: &ServiceConfig) -> ServiceConfig {
        let mut merged = self.clone();
        if overlay.backend.is_some() {
            merged.backend = overlay.backend;
        }
        if let Some(preset) = overlay.preset.as_ref().filter(|p| !p.is_empty()) {
            merged.preset = Some(preset.clone());
        }
        if let Some(duration) = overlay.duration.filter(|d| !d.is_zero()) {
            merged.duration = Some(duration);
        }
        if overlay.volume != 0.0 {
            merged.volume = overlay.volume;
        }
        if overlay.format.is_some() {
            merged.format = overlay.format;
        }
        merged.dry_run |= overlay.dry_run;
        merged.verbose |= overlay.verbose;
        merged
    }

    /// Applies `SCREAM_*` environment variables.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Applies `SCREAM_*` variables read through `lookup`.
    ///
    /// Empty values are ignored. Values that fail to parse are logged and
    /// ignored; validation catches anything left out of range.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(text) = var("SCREAM_BACKEND") {
            match text.parse::<Backend>() {
                Ok(backend) => self.backend = Some(backend),
                Err(err) => tracing::warn!(error = %err, "ignoring SCREAM_BACKEND"),
            }
        }
        if let Some(preset) = var("SCREAM_PRESET") {
            self.preset = Some(preset);
        }
        if let Some(text) = var("SCREAM_DURATION") {
            match parse_duration(&text) {
                Ok(duration) => self.duration = Some(duration),
                Err(err) => tracing::warn!(value = %text, error = %err, "ignoring SCREAM_DURATION"),
            }
        }
        if let Some(text) = var("SCREAM_VOLUME") {
            match text.trim().parse::<f64>() {
                Ok(volume) => self.volume = volume,
                Err(err) => tracing::warn!(value = %text, error = %err, "ignoring SCREAM_VOLUME"),
            }
        }
        if let Some(text) = var("SCREAM_FORMAT") {
            match text.parse::<OutputFormat>() {
                Ok(format) => self.format = Some(format),
                Err(err) => tracing::warn!(error = %err, "ignoring SCREAM_FORMAT"),
            }
        }
        if let Some(text) = var("SCREAM_DRY_RUN") {
            match parse_bool(&text) {
                Some(flag) => self.dry_run = flag,
                None => tracing::warn!(value = %text, "ignoring SCREAM_DRY_RUN"),
            }
        }
        if let Some(text) = var("SCREAM_VERBOSE") {
            match parse_bool(&text) {
                Some(flag) => self.verbose = flag,
                None => tracing::warn!(value = %text, "ignoring SCREAM_VERBOSE"),
            }
        }
    }

    /// Checks preset name, duration and volume.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(preset) = self.preset.as_deref().filter(|p| !p.is_empty()) {
            if preset.parse::<PresetName>().is_err() {
                return Err(ConfigError::InvalidPreset(preset.to_string()));
            }
        }
        match self.duration {
            Some(duration) if !duration.is_zero() => {}
            _ => return Err(ConfigError::InvalidDuration),
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::InvalidVolume(self.volume));
        }
        Ok(())
    }

    /// Generator backend, defaulting to native.
    pub fn backend(&self) -> Backend {
        self.backend.unwrap_or_default()
    }

    /// Output format, defaulting to OGG.
    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

/// Parses `"3"`, `"2.5s"` or `"800ms"` into a duration.
pub fn parse_duration(text: &str) -> Result<Duration, String> {
    let text = text.trim();
    let (number, scale) = if let Some(ms) = text.strip_suffix("ms") {
        (ms, 1e-3)
    } else if let Some(s) = text.strip_suffix('s') {
        (s, 1.0)
    } else {
        (text, 1.0)
    };
    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| format!("invalid duration '{}'", text))?;
    Duration::try_from_secs_f64(value * scale).map_err(|_| format!("invalid duration '{}'", text))
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" | "yes" | "on" => Some(true),
        "0" | "f" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

mod duration_serde {
    use std::time::Duration;

    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => s.serialize_some(&duration.as_secs_f64()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        match Option::<Raw>::deserialize(d)? {
            None => Ok(None),
            Some(Raw::Seconds(secs)) => Duration::try_from_secs_f64(secs)
                .map(Some)
                .map_err(de::Error::custom),
            Some(Raw::Text(text)) => super::parse_duration(&text)
                .map(Some)
                .map_err(de::Error::custom),
        }
    }
}
