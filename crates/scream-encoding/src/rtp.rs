//! Minimal RTP packet (RFC 3550) used to carry Opus frames into the Ogg writer.

/// Dynamic payload type for Opus.
pub const OPUS_PAYLOAD_TYPE: u8 = 111;

/// Synchronization source identifier for locally produced streams.
pub const LOCAL_SSRC: u32 = 1;

/// Fixed 12-byte RTP header, without CSRCs or extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtpHeader {
    pub version: u8,
    pub marker: bool,
    pub payload_type: u8,
    pub sequence_number: u16,
    pub timestamp: u32,
    pub ssrc: u32,
}

impl RtpHeader {
    /// Size of the marshalled header in bytes.
    pub const SIZE: usize = 12;

    /// Header for an Opus payload with the given sequence number and timestamp.
    pub fn opus(sequence_number: u16, timestamp: u32) -> Self {
        Self {
            version: 2,
            marker: false,
            payload_type: OPUS_PAYLOAD_TYPE,
            sequence_number,
            timestamp,
            ssrc: LOCAL_SSRC,
        }
    }

    /// Serializes the header in network byte order.
    pub fn marshal(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[0] = (self.version & 0x03) << 6;
        out[1] = ((self.marker as u8) << 7) | (self.payload_type & 0x7f);
        out[2..4].copy_from_slice(&self.sequence_number.to_be_bytes());
        out[4..8].copy_from_slice(&self.timestamp.to_be_bytes());
        out[8..12].copy_from_slice(&self.ssrc.to_be_bytes());
        out
    }
}

/// An RTP header plus payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RtpPacket {
    pub header: RtpHeader,
    pub payload: Vec<u8>,
}

impl RtpPacket {
    /// Pairs a header with its payload.
    pub fn new(header: RtpHeader, payload: Vec<u8>) -> Self {
        Self { header, payload }
    }

    /// Serializes header and payload.
    pub fn marshal(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(RtpHeader::SIZE + self.payload.len());
        out.extend_from_slice(&self.header.marshal());
        out.extend_from_slice(&self.payload);
        out
    }
}

/// Assigns sequence numbers and timestamps to consecutive frames.
///
/// Both counters advance before each packet, so the first packet carries
/// sequence 1 and timestamp `samples_per_frame`.
#[derive(Debug, Clone)]
pub struct RtpPacketizer {
    samples_per_frame: u32,
    sequence_number: u16,
    timestamp: u32,
}

impl RtpPacketizer {
    /// Starts both counters at zero; `samples_per_frame` is the timestamp
    /// step per packet.
    pub fn new(samples_per_frame: u32) -> Self {
        Self {
            samples_per_frame,
            sequence_number: 0,
            timestamp: 0,
        }
    }

    /// Wraps the next frame in a packet.
    pub fn packetize(&mut self, payload: Vec<u8>) -> RtpPacket {
        self.sequence_number = self.sequence_number.wrapping_add(1);
        self.timestamp = self.timestamp.wrapping_add(self.samples_per_frame);
        RtpPacket::new(
            RtpHeader::opus(self.sequence_number, self.timestamp),
            payload,
        )
    }

    /// Number of packets produced so far, modulo 2^16.
    pub fn sequence_number(&self) -> u16 {
        self.sequence_number
    }
}
