//! Voice transport seams.
//!
//! A real gateway client implements these traits; tests use in-memory mocks.

use std::error::Error;

use tokio::sync::mpsc;

/// Opaque error from the underlying voice transport.
pub type TransportError = Box<dyn Error + Send + Sync>;

/// A user's presence in a voice channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceState {
    pub user_id: String,
    /// Empty when the user is not in a voice channel.
    pub channel_id: String,
    pub guild_id: String,
}

/// Access to voice channels of a chat service.
pub trait VoiceSession: Send + Sync {
    type Connection: VoiceConnection;

    /// Joins a voice channel.
    fn join(
        &self,
        guild_id: &str,
        channel_id: &str,
        mute: bool,
        deaf: bool,
    ) -> Result<Self::Connection, TransportError>;

    /// Current voice states in a guild.
    fn guild_voice_states(&self, guild_id: &str) -> Result<Vec<VoiceState>, TransportError>;
}

/// An established voice connection.
pub trait VoiceConnection: Send + Sync {
    /// Sets the speaking flag.
    fn speaking(&self, speaking: bool) -> Result<(), TransportError>;

    /// Sink accepting encoded Opus frames.
    fn opus_sender(&self) -> mpsc::Sender<Vec<u8>>;

    /// Leaves the voice channel.
    fn disconnect(&self) -> Result<(), TransportError>;
}
