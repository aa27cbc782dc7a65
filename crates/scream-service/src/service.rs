//! Scream orchestration.

use std::io::Write;
use std::sync::Arc;

use scream_backend_audio::{AudioError, NativeGenerator, PcmGenerator, PcmResult};
use scream_backend_ffmpeg::FfmpegGenerator;
use scream_encoding::{
    EncodedFrames, FileEncoder, FrameEncoder, OggEncoder, OpusFrameEncoder, WavEncoder,
};
use scream_spec::SynthParams;
use scream_voice::{
    CancelToken, Player, TransportError, VoiceConnection, VoiceSession, VoiceState,
};
use tokio::sync::mpsc;

use crate::config::{Backend, OutputFormat, ServiceConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::resolve::resolve_params;

/// Voice session type of a service built without a player.
///
/// Uninhabited; it only fills the session type parameter.
#[derive(Debug)]
pub enum NoVoice {}

impl VoiceSession for NoVoice {
    type Connection = NoVoice;

    fn join(&self, _: &str, _: &str, _: bool, _: bool) -> Result<NoVoice, TransportError> {
        match *self {}
    }

    fn guild_voice_states(&self, _: &str) -> Result<Vec<VoiceState>, TransportError> {
        match *self {}
    }
}

impl VoiceConnection for NoVoice {
    fn speaking(&self, _: bool) -> Result<(), TransportError> {
        match *self {}
    }

    fn opus_sender(&self) -> mpsc::Sender<Vec<u8>> {
        match *self {}
    }

    fn disconnect(&self) -> Result<(), TransportError> {
        match *self {}
    }
}

/// Generates screams and routes them to a file or a voice channel.
pub struct ScreamService<S = NoVoice> {
    config: ServiceConfig,
    player: Option<Player<S>>,
    generator: Arc<dyn PcmGenerator>,
    frame_encoder: Box<dyn FrameEncoder>,
}

impl ScreamService<NoVoice> {
    /// Creates a service that can only write files, or play in dry-run mode.
    pub fn new(config: ServiceConfig) -> ServiceResult<Self> {
        Self::build(config, None)
    }
}

impl<S: VoiceSession> ScreamService<S> {
    /// Creates a service that plays through `player`.
    pub fn with_player(config: ServiceConfig, player: Player<S>) -> ServiceResult<Self> {
        Self::build(config, Some(player))
    }

    fn build(config: ServiceConfig, player: Option<Player<S>>) -> ServiceResult<Self> {
        config.validate()?;
        let generator: Arc<dyn PcmGenerator> = match config.backend() {
            Backend::Native => Arc::new(NativeGenerator::new()),
            Backend::Ffmpeg => Arc::new(FfmpegGenerator::locate().map_err(AudioError::from)?),
        };
        Ok(Self {
            config,
            player,
            generator,
            frame_encoder: Box::new(OpusFrameEncoder::new()),
        })
    }

    /// Replaces the PCM generator chosen from the configured backend.
    pub fn with_generator(mut self, generator: impl PcmGenerator + 'static) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    /// Replaces the frame encoder used for voice playback.
    pub fn with_frame_encoder(mut self, encoder: impl FrameEncoder + 'static) -> Self {
        self.frame_encoder = Box::new(encoder);
        self
    }

    /// The validated configuration this service was built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The voice player, if one was supplied.
    pub fn player(&self) -> Option<&Player<S>> {
        self.player.as_ref()
    }

    /// Name of the active PCM generator.
    pub fn backend_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Resolves the configured parameters.
    pub fn params(&self) -> ServiceResult<SynthParams> {
        resolve_params(&self.config)
    }

    /// Generates a scream and writes it to `dst` in the configured format.
    ///
    /// Blocks while encoding; call it from a blocking context, not from an
    /// async task.
    pub fn generate(&self, dst: &mut dyn Write) -> ServiceResult<()> {
        let params = self.params()?;
        let pcm = self.generator.generate(&params)?;
        let format = self.config.output_format();

        tracing::info!(
            backend = self.generator.name(),
            format = %format,
            bytes = pcm.pcm.len(),
            "encoding scream"
        );
        let encoder: Box<dyn FileEncoder> = match format {
            OutputFormat::Ogg => Box::new(OggEncoder::new()),
            OutputFormat::Wav => Box::new(WavEncoder::new()),
        };
        let (sample_rate, channels) = (pcm.sample_rate, pcm.channels);
        encoder.encode(dst, Box::new(pcm.into_reader()), sample_rate, channels)?;
        Ok(())
    }

    /// Generates a scream and streams it into a voice channel.
    ///
    /// In dry-run mode the frames are encoded and discarded without touching
    /// the player. A playback failure is reported ahead of an encoding
    /// failure; cancellation yields [`ServiceError::Cancelled`].
    pub async fn play(
        &self,
        cancel: &CancelToken,
        guild_id: &str,
        channel_id: &str,
    ) -> ServiceResult<()> {
        if guild_id.is_empty() {
            return Err(ServiceError::MissingGuildId);
        }
        let player = if self.config.dry_run {
            None
        } else {
            Some(self.player.as_ref().ok_or(ServiceError::NoPlayer)?)
        };
        if cancel.is_cancelled() {
            return Err(ServiceError::Cancelled);
        }

        let params = self.params()?;
        let pcm = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ServiceError::Cancelled),
            pcm = generate_blocking(Arc::clone(&self.generator), params) => pcm?,
        };

        let (sample_rate, channels) = (pcm.sample_rate, pcm.channels);
        tracing::info!(sample_rate, channels, bytes = pcm.pcm.len(), "streaming scream");
        let source = Box::new(pcm.into_reader());
        let EncodedFrames { frames, completion } =
            self.frame_encoder.encode_frames(source, sample_rate, channels);

        let Some(player) = player else {
            let count = drain(cancel, frames).await?;
            completion.wait().await?;
            tracing::info!(frames = count, "dry run complete");
            return Ok(());
        };

        let played = player.play(cancel, guild_id, channel_id, frames).await;
        let encoded = completion.wait().await;
        played?;
        encoded?;
        tracing::info!(guild_id, channel_id, "scream played");
        Ok(())
    }
}

async fn generate_blocking(
    generator: Arc<dyn PcmGenerator>,
    params: SynthParams,
) -> ServiceResult<PcmResult> {
    let pcm = tokio::task::spawn_blocking(move || generator.generate(&params))
        .await
        .map_err(|err| AudioError::synthesis(format!("generation task failed: {}", err)))??;
    Ok(pcm)
}

async fn drain(cancel: &CancelToken, mut frames: mpsc::Receiver<Vec<u8>>) -> ServiceResult<usize> {
    let mut count = 0;
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ServiceError::Cancelled),
            frame = frames.recv() => match frame {
                Some(_) => count += 1,
                None => return Ok(count),
            },
        }
    }
}
