//! Opus frame encoding.
//!
//! PCM is read in fixed 20 ms chunks (960 samples per channel) on a worker
//! thread. Each chunk becomes one Opus frame sent over a bounded channel. The
//! final result goes to a single-slot [`Completion`] once the frame channel
//! has been closed.

use std::io::{self, Read};
use std::thread;

use tokio::sync::{mpsc, oneshot};

use crate::error::{EncodeError, EncodeResult};

/// Samples per channel in one Opus frame.
pub const OPUS_FRAME_SAMPLES: usize = 960;

/// Upper bound on the size of one encoded frame.
pub const MAX_OPUS_FRAME_BYTES: usize = 3840;

/// Default encoder bitrate in bits per second.
pub const OPUS_BITRATE: i32 = 64_000;

/// Capacity of the frame channel.
pub const FRAME_CHANNEL_CAPACITY: usize = 50;

/// Sample rates the Opus codec accepts.
pub const OPUS_SAMPLE_RATES: [u32; 5] = [8000, 12000, 16000, 24000, 48000];

/// Single-slot result of an encoding run.
///
/// Resolves after the frame channel has been closed.
#[derive(Debug)]
pub struct Completion {
    rx: oneshot::Receiver<EncodeResult<()>>,
}

impl Completion {
    /// Creates a linked sender and completion.
    pub fn channel() -> (oneshot::Sender<EncodeResult<()>>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }

    /// Creates a completion that is already resolved.
    pub fn ready(result: EncodeResult<()>) -> Self {
        let (tx, completion) = Self::channel();
        let _ = tx.send(result);
        completion
    }

    /// Waits for the encoding result.
    pub async fn wait(self) -> EncodeResult<()> {
        self.rx.await.unwrap_or(Err(EncodeError::WorkerLost))
    }

    /// Blocks the current thread until the encoding result is available.
    ///
    /// Must not be called from within an async runtime.
    pub fn blocking_wait(self) -> EncodeResult<()> {
        self.rx.blocking_recv().unwrap_or(Err(EncodeError::WorkerLost))
    }
}

/// A stream of encoded frames plus its completion slot.
#[derive(Debug)]
pub struct EncodedFrames {
    /// Encoded Opus frames in order. Closed when encoding stops.
    pub frames: mpsc::Receiver<Vec<u8>>,
    /// Final encoding result.
    pub completion: Completion,
}

impl EncodedFrames {
    /// A closed, empty stream whose completion holds `err`.
    pub fn failed(err: EncodeError) -> Self {
        let (_, frames) = mpsc::channel(1);
        Self {
            frames,
            completion: Completion::ready(Err(err)),
        }
    }

    /// Blocks until every frame has been received, then returns them with the
    /// encoding result.
    ///
    /// Must not be called from within an async runtime.
    pub fn blocking_collect(mut self) -> (Vec<Vec<u8>>, EncodeResult<()>) {
        let mut frames = Vec::new();
        while let Some(frame) = self.frames.blocking_recv() {
            frames.push(frame);
        }
        (frames, self.completion.blocking_wait())
    }
}

/// Produces a stream of encoded frames from a PCM source.
pub trait FrameEncoder: Send + Sync {
    /// Starts encoding `src` (s16le interleaved PCM).
    ///
    /// Invalid arguments yield a closed, empty frame stream and an error in
    /// the completion slot. The frame stream and completion are always
    /// finalized, so consumers can drain to the end safely.
    fn encode_frames(
        &self,
        src: Box<dyn Read + Send>,
        sample_rate: u32,
        channels: u16,
    ) -> EncodedFrames;
}

/// Checks sample rate and channel count against what Opus supports.
pub fn validate_opus_format(sample_rate: u32, channels: u16) -> EncodeResult<()> {
    if !OPUS_SAMPLE_RATES.contains(&sample_rate) {
        return Err(EncodeError::InvalidSampleRate { rate: sample_rate });
    }
    if channels != 1 && channels != 2 {
        return Err(EncodeError::InvalidChannels { channels });
    }
    Ok(())
}

/// Frame encoder backed by libopus.
#[derive(Debug, Clone)]
pub struct OpusFrameEncoder {
    bitrate: i32,
}

impl Default for OpusFrameEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl OpusFrameEncoder {
    /// Creates an encoder at the default bitrate.
    pub fn new() -> Self {
        Self::with_bitrate(OPUS_BITRATE)
    }

    /// Creates an encoder at a custom bitrate.
    pub fn with_bitrate(bitrate: i32) -> Self {
        Self { bitrate }
    }

    /// Configured bitrate in bits per second.
    pub fn bitrate(&self) -> i32 {
        self.bitrate
    }
}

impl FrameEncoder for OpusFrameEncoder {
    fn encode_frames(
        &self,
        src: Box<dyn Read + Send>,
        sample_rate: u32,
        channels: u16,
    ) -> EncodedFrames {
        if let Err(err) = validate_opus_format(sample_rate, channels) {
            return EncodedFrames::failed(err);
        }

        let (frame_tx, frames) = mpsc::channel(FRAME_CHANNEL_CAPACITY);
        let (done_tx, completion) = Completion::channel();
        let bitrate = self.bitrate;

        let spawned = thread::Builder::new()
            .name("opus-encoder".into())
            .spawn(move || {
                let result = encode_stream(src, sample_rate, channels, bitrate, &frame_tx);
                drop(frame_tx);
                let _ = done_tx.send(result);
            });
        if let Err(err) = spawned {
            // The closure was dropped with both senders; the completion
            // resolves to WorkerLost.
            tracing::error!(error = %err, "failed to spawn opus encoder thread");
        }

        EncodedFrames { frames, completion }
    }
}

fn encode_stream(
    mut src: Box<dyn Read + Send>,
    sample_rate: u32,
    channels: u16,
    bitrate: i32,
    frames: &mpsc::Sender<Vec<u8>>,
) -> EncodeResult<()> {
    tracing::debug!(sample_rate, channels, bitrate, "encoding opus frames");

    let layout = if channels == 1 {
        opus::Channels::Mono
    } else {
        opus::Channels::Stereo
    };
    let mut encoder = opus::Encoder::new(sample_rate, layout, opus::Application::Audio)?;
    encoder.set_bitrate(opus::Bitrate::Bits(bitrate))?;

    let frame_bytes = OPUS_FRAME_SAMPLES * channels as usize * 2;
    let mut pcm = vec![0u8; frame_bytes];
    let mut samples = vec![0i16; frame_bytes / 2];
    let mut out = vec![0u8; MAX_OPUS_FRAME_BYTES];
    let mut count = 0usize;

    loop {
        pcm.fill(0);
        let filled = read_full(&mut src, &mut pcm).map_err(EncodeError::Read)?;
        if filled == 0 {
            break;
        }

        // A short read leaves zero padding in place.
        for (sample, bytes) in samples.iter_mut().zip(pcm.chunks_exact(2)) {
            *sample = i16::from_le_bytes([bytes[0], bytes[1]]);
        }
        let len = encoder.encode(&samples, &mut out)?;
        if frames.blocking_send(out[..len].to_vec()).is_err() {
            tracing::debug!(frames = count, "frame receiver dropped, stopping encoder");
            return Ok(());
        }
        count += 1;

        if filled < frame_bytes {
            break;
        }
    }

    tracing::debug!(frames = count, "opus encoding complete");
    Ok(())
}

/// Reads until `buf` is full or the source is exhausted. Returns bytes read.
fn read_full(src: &mut dyn Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match src.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
