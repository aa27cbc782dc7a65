//! Scream Encoding
//!
//! Turns raw s16le PCM into Opus frames, OGG/Opus files or WAV files.
//!
//! # Overview
//!
//! - [`OpusFrameEncoder`] reads PCM on a worker thread in 20 ms chunks and
//!   sends one encoded frame per chunk over a bounded channel. A trailing
//!   partial chunk is zero-padded and still emitted.
//! - [`OggEncoder`] wraps each frame in an RTP packet and writes its payload
//!   as an Ogg page behind the OpusHead and OpusTags headers, using the `ogg`
//!   crate for paging.
//! - [`WavEncoder`] writes a canonical 44-byte header followed by the PCM.
//!
//! Both file encoders implement [`FileEncoder`] so callers can pick the
//! output format at runtime.
//!
//! # Example
//!
//! ```no_run
//! use std::io::Cursor;
//! use scream_encoding::{FileEncoder, OggEncoder};
//!
//! let pcm = vec![0u8; 960 * 2 * 2 * 10];
//! let mut out = Vec::new();
//! OggEncoder::new()
//!     .encode(&mut out, Box::new(Cursor::new(pcm)), 48000, 2)
//!     .unwrap();
//! ```

use std::io::{Read, Write};

pub mod container;
pub mod error;
pub mod frame;
pub mod rtp;
pub mod wav;

pub use error::{EncodeError, EncodeResult};
pub use frame::{
    Completion, EncodedFrames, FrameEncoder, OpusFrameEncoder, MAX_OPUS_FRAME_BYTES,
    OPUS_BITRATE, OPUS_FRAME_SAMPLES,
};
pub use container::{OggEncoder, OggWriter};
pub use wav::WavEncoder;

/// Writes PCM to a file container.
pub trait FileEncoder: Send + Sync {
    /// Reads s16le interleaved PCM from `src` and writes the encoded file to `dst`.
    fn encode(
        &self,
        dst: &mut dyn Write,
        src: Box<dyn Read + Send>,
        sample_rate: u32,
        channels: u16,
    ) -> EncodeResult<()>;
}
