//! The ffmpeg subprocess generator.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use scream_backend_audio::{AudioResult, PcmGenerator, PcmResult};
use scream_spec::SynthParams;

use crate::command::build_args;
use crate::error::{FfmpegError, FfmpegResult};

const FFMPEG: &str = "ffmpeg";

/// Generates PCM by running an ffmpeg executable.
#[derive(Debug, Clone)]
pub struct FfmpegGenerator {
    path: PathBuf,
}

impl FfmpegGenerator {
    /// Finds `ffmpeg` on PATH.
    pub fn locate() -> FfmpegResult<Self> {
        which::which(FFMPEG)
            .map(Self::with_path)
            .map_err(FfmpegError::NotFound)
    }

    /// Finds `ffmpeg` in an explicit search path (PATH syntax).
    pub fn locate_in(search_path: impl AsRef<OsStr>) -> FfmpegResult<Self> {
        which::which_in(FFMPEG, Some(search_path), ".")
            .map(Self::with_path)
            .map_err(FfmpegError::NotFound)
    }

    /// Uses the given executable. The path is not checked until it is run.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the executable.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validates `params`, runs ffmpeg and collects its stdout as PCM.
    ///
    /// Stdout and stderr are drained together, so a chatty process cannot
    /// stall on a full pipe.
    pub fn run(&self, params: &SynthParams) -> FfmpegResult<PcmResult> {
        params.validate()?;

        let args = build_args(params);
        tracing::debug!(path = %self.path.display(), ?args, "running ffmpeg");

        let output = Command::new(&self.path)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .map_err(FfmpegError::SpawnFailed)?;

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(FfmpegError::process_failed(
                exit_code,
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }

        tracing::debug!(bytes = output.stdout.len(), "ffmpeg complete");
        Ok(PcmResult::from_pcm(
            output.stdout,
            params.sample_rate,
            params.channels,
        ))
    }
}

impl PcmGenerator for FfmpegGenerator {
    fn name(&self) -> &'static str {
        FFMPEG
    }

    fn generate(&self, params: &SynthParams) -> AudioResult<PcmResult> {
        Ok(self.run(params)?)
    }
}
