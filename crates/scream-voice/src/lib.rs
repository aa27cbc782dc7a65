//! Scream Voice
//!
//! Streams Opus frames into a live voice channel under cooperative
//! cancellation.
//!
//! The transport itself sits behind [`VoiceSession`] and [`VoiceConnection`];
//! this crate owns the protocol around it: join, speaking flag, frame
//! forwarding, trailing silence and guaranteed disconnect.

pub mod cancel;
pub mod channel;
pub mod error;
pub mod player;
pub mod session;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use channel::find_populated_channel;
pub use error::{PlaybackError, PlaybackResult};
pub use player::{Player, SILENCE_FLUSH_TIMEOUT, SILENCE_FRAME, SILENCE_FRAME_COUNT};
pub use session::{TransportError, VoiceConnection, VoiceSession, VoiceState};
