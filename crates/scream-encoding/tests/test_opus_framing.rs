//! Opus frame encoder integration tests.

use std::io::{self, Cursor, Read};

use scream_encoding::{EncodeError, FrameEncoder, OpusFrameEncoder, OPUS_FRAME_SAMPLES};

fn silent_pcm(frames: f64, channels: usize) -> Vec<u8> {
    vec![0u8; (OPUS_FRAME_SAMPLES as f64 * channels as f64 * 2.0 * frames) as usize]
}

fn encode(
    pcm: Vec<u8>,
    sample_rate: u32,
    channels: u16,
) -> (Vec<Vec<u8>>, Result<(), EncodeError>) {
    OpusFrameEncoder::new()
        .encode_frames(Box::new(Cursor::new(pcm)), sample_rate, channels)
        .blocking_collect()
}

/// Yields `ok` bytes of silence, then fails.
struct FailingReader {
    ok: usize,
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.ok == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "source went away"));
        }
        let n = buf.len().min(self.ok);
        buf[..n].fill(0);
        self.ok -= n;
        Ok(n)
    }
}

#[test]
fn test_exact_frames() {
    for n in [1usize, 5, 60] {
        let (frames, result) = encode(silent_pcm(n as f64, 2), 48000, 2);
        assert!(result.is_ok());
        assert_eq!(frames.len(), n);
    }
}

#[test]
fn test_partial_trailing_frame_is_padded_not_dropped() {
    let (frames, result) = encode(silent_pcm(1.5, 2), 48000, 2);
    assert!(result.is_ok());
    assert_eq!(frames.len(), 2);
}

#[test]
fn test_single_byte_yields_one_frame() {
    let (frames, result) = encode(vec![0u8; 1], 48000, 1);
    assert!(result.is_ok());
    assert_eq!(frames.len(), 1);
}

#[test]
fn test_empty_source_yields_no_frames() {
    let (frames, result) = encode(Vec::new(), 48000, 2);
    assert!(result.is_ok());
    assert!(frames.is_empty());
}

#[test]
fn test_frames_fit_max_size() {
    let pcm: Vec<u8> = (0..OPUS_FRAME_SAMPLES * 2 * 2 * 10)
        .map(|i| (i * 31 % 251) as u8)
        .collect();
    let (frames, result) = encode(pcm, 48000, 2);
    assert!(result.is_ok());
    assert_eq!(frames.len(), 10);
    for frame in frames {
        assert!(!frame.is_empty());
        assert!(frame.len() <= scream_encoding::MAX_OPUS_FRAME_BYTES);
    }
}

#[test]
fn test_every_opus_rate_and_layout() {
    for rate in [8000, 12000, 16000, 24000, 48000] {
        for channels in [1u16, 2] {
            let (frames, result) = encode(silent_pcm(3.0, channels as usize), rate, channels);
            assert!(result.is_ok(), "{} Hz x{}", rate, channels);
            assert_eq!(frames.len(), 3);
        }
    }
}

#[test]
fn test_invalid_sample_rate_closes_stream() {
    let (frames, result) = encode(silent_pcm(2.0, 2), 44100, 2);
    assert!(frames.is_empty());
    assert!(matches!(result, Err(EncodeError::InvalidSampleRate { rate: 44100 })));
}

#[test]
fn test_invalid_channels_closes_stream() {
    let (frames, result) = encode(silent_pcm(2.0, 3), 48000, 3);
    assert!(frames.is_empty());
    assert!(matches!(result, Err(EncodeError::InvalidChannels { channels: 3 })));
}

#[test]
fn test_read_error_after_frames() {
    let ok = OPUS_FRAME_SAMPLES * 2 * 2 * 2;
    let (frames, result) = OpusFrameEncoder::new()
        .encode_frames(Box::new(FailingReader { ok }), 48000, 2)
        .blocking_collect();
    assert_eq!(frames.len(), 2);
    match result {
        Err(EncodeError::Read(err)) => assert_eq!(err.to_string(), "source went away"),
        other => panic!("expected read error, got {:?}", other),
    }
}

#[test]
fn test_dropped_receiver_stops_worker() {
    let stream = OpusFrameEncoder::new().encode_frames(
        Box::new(Cursor::new(silent_pcm(500.0, 2))),
        48000,
        2,
    );
    drop(stream.frames);
    assert!(stream.completion.blocking_wait().is_ok());
}
