//! WAV file output.

use std::io::{self, Read, Write};

use crate::error::{EncodeError, EncodeResult};
use crate::FileEncoder;

/// WAV format parameters for 16-bit PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// 16-bit PCM with the given layout.
    pub fn pcm16(sample_rate: u32, channels: u16) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Bytes per sample frame across all channels.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Bytes per second of audio.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }
}

/// Size of the canonical RIFF/WAVE header.
pub const WAV_HEADER_SIZE: usize = 44;

/// Data chunk and RIFF chunk sizes for `data_len` bytes of samples.
///
/// Both must fit the 32-bit header fields; larger inputs are rejected with
/// `InvalidInput`.
fn chunk_sizes(data_len: usize) -> io::Result<(u32, u32)> {
    let too_large = || {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} bytes of PCM exceed the WAV size limit", data_len),
        )
    };
    let data_size = u32::try_from(data_len).map_err(|_| too_large())?;
    // RIFF size excludes the first 8 bytes.
    let riff_size = data_size
        .checked_add((WAV_HEADER_SIZE - 8) as u32)
        .ok_or_else(too_large)?;
    Ok((data_size, riff_size))
}

/// Writes a canonical 44-byte header followed by `pcm_data`.
///
/// Fails with `InvalidInput`, before writing anything, when `pcm_data` is too
/// large for the header's 32-bit size fields.
pub fn write_wav<W: Write + ?Sized>(
    writer: &mut W,
    format: &WavFormat,
    pcm_data: &[u8],
) -> io::Result<()> {
    let (data_size, file_size) = chunk_sizes(pcm_data.len())?;

    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&1u16.to_le_bytes())?; // PCM
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    if !pcm_data.is_empty() {
        writer.write_all(pcm_data)?;
    }
    Ok(())
}

/// Wraps s16le PCM in a WAV container.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl WavEncoder {
    /// Creates a WAV encoder.
    pub fn new() -> Self {
        Self
    }
}

impl FileEncoder for WavEncoder {
    fn encode(
        &self,
        dst: &mut dyn Write,
        mut src: Box<dyn Read + Send>,
        sample_rate: u32,
        channels: u16,
    ) -> EncodeResult<()> {
        if sample_rate == 0 {
            return Err(EncodeError::InvalidSampleRate { rate: sample_rate });
        }
        if channels != 1 && channels != 2 {
            return Err(EncodeError::InvalidChannels { channels });
        }

        let mut pcm = Vec::new();
        src.read_to_end(&mut pcm).map_err(EncodeError::Read)?;

        tracing::debug!(sample_rate, channels, data_bytes = pcm.len(), "writing WAV file");

        write_wav(dst, &WavFormat::pcm16(sample_rate, channels), &pcm)
            .map_err(EncodeError::WavWrite)
    }
}
