//! Error types for voice playback.

use thiserror::Error;

use crate::session::TransportError;

/// Result type for playback operations.
pub type PlaybackResult<T> = Result<T, PlaybackError>;

/// Errors that can occur while streaming to a voice channel.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("guild ID must not be empty")]
    EmptyGuildId,

    #[error("channel ID must not be empty")]
    EmptyChannelId,

    /// Joining the voice channel failed; nothing else was attempted.
    #[error("failed to join voice channel: {0}")]
    JoinFailed(#[source] TransportError),

    /// Setting the speaking flag failed.
    #[error("failed to set speaking state: {0}")]
    SpeakingFailed(#[source] TransportError),

    /// The connection's send sink closed while frames were still being sent.
    #[error("voice send sink closed")]
    SinkClosed,

    /// Playback was cancelled. Callers usually treat this as a clean stop.
    #[error("playback cancelled")]
    Cancelled,

    /// Disconnecting failed after an otherwise successful playback.
    #[error("failed to disconnect from voice: {0}")]
    Disconnect(#[source] TransportError),

    /// Voice states for the guild could not be read.
    #[error("failed to retrieve guild state: {0}")]
    GuildState(#[source] TransportError),

    #[error("no populated voice channel found")]
    NoPopulatedChannel,
}

impl PlaybackError {
    /// True for cancellation, which is an expected way to stop.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PlaybackError::Cancelled)
    }

    /// Returns a stable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            PlaybackError::EmptyGuildId => "VOICE_001",
            PlaybackError::EmptyChannelId => "VOICE_002",
            PlaybackError::JoinFailed(_) => "VOICE_003",
            PlaybackError::SpeakingFailed(_) => "VOICE_004",
            PlaybackError::SinkClosed => "VOICE_005",
            PlaybackError::Cancelled => "VOICE_006",
            PlaybackError::Disconnect(_) => "VOICE_007",
            PlaybackError::GuildState(_) => "VOICE_008",
            PlaybackError::NoPopulatedChannel => "VOICE_009",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cancelled() {
        assert!(PlaybackError::Cancelled.is_cancelled());
        assert!(!PlaybackError::SinkClosed.is_cancelled());
        assert!(!PlaybackError::JoinFailed("nope".into()).is_cancelled());
    }

    #[test]
    fn test_transport_cause_in_message() {
        let err = PlaybackError::SpeakingFailed("gateway timeout".into());
        assert_eq!(err.to_string(), "failed to set speaking state: gateway timeout");
        assert_eq!(err.code(), "VOICE_004");
    }
}
