//! OGG/Opus container output (RFC 7845).
//!
//! Paging, lacing and checksums come from the `ogg` crate. This module lays
//! out the Opus stream on top: the two header pages, then one page per RTP
//! payload with its granule position, the last one flagged end-of-stream.

use std::io::{self, Read, Write};

use ogg::{PacketWriteEndInfo, PacketWriter};
use tokio::sync::mpsc;

use crate::error::{EncodeError, EncodeResult};
use crate::frame::{EncodedFrames, FrameEncoder, OpusFrameEncoder, OPUS_FRAME_SAMPLES};
use crate::rtp::{RtpPacket, RtpPacketizer};
use crate::FileEncoder;

/// Samples of encoder delay declared in the OpusHead pre-skip field.
pub const OPUS_PRE_SKIP: u16 = 3840;

/// Default logical bitstream serial number.
pub const DEFAULT_SERIAL: u32 = 0x5343_524d;

/// Granule positions in Ogg Opus always count 48 kHz samples.
const GRANULE_RATE: u64 = 48_000;

const VENDOR: &str = "scream";

fn opus_head(sample_rate: u32, channels: u16) -> Vec<u8> {
    let mut head = Vec::with_capacity(19);
    head.extend_from_slice(b"OpusHead");
    head.push(1);
    head.push(channels as u8);
    head.extend_from_slice(&OPUS_PRE_SKIP.to_le_bytes());
    head.extend_from_slice(&sample_rate.to_le_bytes());
    head.extend_from_slice(&0u16.to_le_bytes());
    head.push(0);
    head
}

fn opus_tags() -> Vec<u8> {
    let mut tags = Vec::with_capacity(16 + VENDOR.len());
    tags.extend_from_slice(b"OpusTags");
    tags.extend_from_slice(&(VENDOR.len() as u32).to_le_bytes());
    tags.extend_from_slice(VENDOR.as_bytes());
    tags.extend_from_slice(&0u32.to_le_bytes());
    tags
}

/// Writes one Opus stream as Ogg pages, one packet per page.
///
/// The identification and comment headers are written on construction. The
/// most recent data packet is held back so [`OggWriter::finish`] can mark it
/// end-of-stream.
pub struct OggWriter<W: Write> {
    packets: PacketWriter<'static, W>,
    sample_rate: u32,
    serial: u32,
    pages: u32,
    granule: u64,
    last_timestamp: u32,
    pending: Option<(Vec<u8>, u64)>,
}

impl<W: Write> OggWriter<W> {
    /// Creates a writer and emits the OpusHead and OpusTags pages.
    pub fn new(inner: W, sample_rate: u32, channels: u16) -> io::Result<Self> {
        Self::with_serial(inner, sample_rate, channels, DEFAULT_SERIAL)
    }

    /// Like [`OggWriter::new`] with an explicit bitstream serial number.
    pub fn with_serial(
        inner: W,
        sample_rate: u32,
        channels: u16,
        serial: u32,
    ) -> io::Result<Self> {
        let mut writer = Self {
            packets: PacketWriter::new(inner),
            sample_rate,
            serial,
            pages: 0,
            granule: 0,
            last_timestamp: 0,
            pending: None,
        };
        writer.write_packet(opus_head(sample_rate, channels), PacketWriteEndInfo::EndPage, 0)?;
        writer.write_packet(opus_tags(), PacketWriteEndInfo::EndPage, 0)?;
        Ok(writer)
    }

    /// Appends the payload of an RTP packet on its own page.
    ///
    /// The granule position advances by the timestamp delta since the
    /// previous packet, scaled to 48 kHz. Empty payloads are skipped.
    pub fn write_rtp(&mut self, packet: &RtpPacket) -> io::Result<()> {
        if packet.payload.is_empty() {
            return Ok(());
        }
        let delta = packet.header.timestamp.wrapping_sub(self.last_timestamp) as u64;
        self.last_timestamp = packet.header.timestamp;
        self.granule += delta * GRANULE_RATE / u64::from(self.sample_rate.max(1));

        if let Some((payload, granule)) = self.pending.take() {
            self.write_packet(payload, PacketWriteEndInfo::EndPage, granule)?;
        }
        self.pending = Some((packet.payload.clone(), self.granule));
        Ok(())
    }

    /// Writes the held packet as the end-of-stream page and returns the sink.
    ///
    /// Without any data packet, an empty end-of-stream page is written.
    pub fn finish(mut self) -> io::Result<W> {
        let (payload, granule) = self.pending.take().unwrap_or((Vec::new(), self.granule));
        self.write_packet(payload, PacketWriteEndInfo::EndStream, granule)?;
        let mut inner = self.packets.into_inner();
        inner.flush()?;
        Ok(inner)
    }

    /// Number of pages written so far.
    pub fn pages_written(&self) -> u32 {
        self.pages
    }

    /// Granule position of the latest data packet.
    pub fn granule(&self) -> u64 {
        self.granule
    }

    fn write_packet(
        &mut self,
        payload: Vec<u8>,
        end: PacketWriteEndInfo,
        granule: u64,
    ) -> io::Result<()> {
        self.packets.write_packet(payload, self.serial, end, granule)?;
        self.pages += 1;
        Ok(())
    }
}

/// Encodes PCM as an OGG/Opus file.
#[derive(Debug, Clone, Default)]
pub struct OggEncoder<E = OpusFrameEncoder> {
    opus: E,
}

impl OggEncoder {
    /// Creates an OGG encoder with the default libopus frame encoder.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: FrameEncoder> OggEncoder<E> {
    /// Creates an OGG encoder with a custom frame encoder.
    pub fn with_frame_encoder(opus: E) -> Self {
        Self { opus }
    }
}

impl<E: FrameEncoder> FileEncoder for OggEncoder<E> {
    /// Blocks until every frame has been written. Must not be called from
    /// within an async runtime.
    ///
    /// The frame stream is always drained and the completion always read.
    /// A container write error takes precedence over a frame encoder error;
    /// frame encoder errors are returned unchanged.
    fn encode(
        &self,
        dst: &mut dyn Write,
        src: Box<dyn Read + Send>,
        sample_rate: u32,
        channels: u16,
    ) -> EncodeResult<()> {
        tracing::debug!(sample_rate, channels, "writing OGG container");

        let EncodedFrames {
            mut frames,
            completion,
        } = self.opus.encode_frames(src, sample_rate, channels);

        let mut writer = match OggWriter::new(dst, sample_rate, channels) {
            Ok(writer) => writer,
            Err(err) => {
                while frames.blocking_recv().is_some() {}
                let _ = completion.blocking_wait();
                return Err(EncodeError::OggWrite(err));
            }
        };

        let (frame_count, write_err) = write_frames(&mut writer, &mut frames);
        tracing::debug!(frames = frame_count, "OGG encoding complete");

        let opus_result = completion.blocking_wait();
        let finish_result = writer.finish();

        if let Some(err) = write_err {
            return Err(EncodeError::OggWrite(err));
        }
        opus_result?;
        finish_result.map_err(EncodeError::OggWrite)?;
        Ok(())
    }
}

/// Packetizes and writes every frame until the stream closes.
///
/// Returns the number of frames received and the first write error. After a
/// write error the remaining frames are still drained but not written.
fn write_frames<W: Write>(
    writer: &mut OggWriter<W>,
    frames: &mut mpsc::Receiver<Vec<u8>>,
) -> (usize, Option<io::Error>) {
    let mut packetizer = RtpPacketizer::new(OPUS_FRAME_SAMPLES as u32);
    let mut frame_count = 0usize;
    let mut write_err = None;
    while let Some(frame) = frames.blocking_recv() {
        frame_count += 1;
        let packet = packetizer.packetize(frame);
        if write_err.is_none() {
            if let Err(err) = writer.write_rtp(&packet) {
                write_err = Some(err);
            }
        }
    }
    (frame_count, write_err)
}
