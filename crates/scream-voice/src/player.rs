//! Streaming playback protocol.
//!
//! A playback run moves through
//! `validating -> joining -> speaking -> streaming -> draining silence -> stopped`.
//! Once joined, the connection is disconnected exactly once on every exit path.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::cancel::CancelToken;
use crate::error::{PlaybackError, PlaybackResult};
use crate::session::{VoiceConnection, VoiceSession};

/// Opus payload for a 20 ms frame of digital silence.
pub const SILENCE_FRAME: [u8; 3] = [0xF8, 0xFF, 0xFE];

/// Silence frames appended after the last data frame.
pub const SILENCE_FRAME_COUNT: usize = 5;

/// Upper bound on the silence flush after cancellation.
pub const SILENCE_FLUSH_TIMEOUT: Duration = Duration::from_millis(500);

/// Streams encoded frames into voice channels of one session.
#[derive(Debug)]
pub struct Player<S> {
    session: S,
}

impl<S: VoiceSession> Player<S> {
    /// Creates a player over `session`.
    pub fn new(session: S) -> Self {
        Self { session }
    }

    /// The underlying voice session.
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Plays `frames` into a voice channel until the stream closes or
    /// `cancel` fires.
    ///
    /// Joins muted=false, deafened=true. After the last frame, five silence
    /// frames are sent and the speaking flag is cleared. On cancellation the
    /// same silence burst is attempted for at most
    /// [`SILENCE_FLUSH_TIMEOUT`], then [`PlaybackError::Cancelled`] is
    /// returned. A disconnect failure is only reported when nothing else
    /// failed.
    pub async fn play(
        &self,
        cancel: &CancelToken,
        guild_id: &str,
        channel_id: &str,
        frames: mpsc::Receiver<Vec<u8>>,
    ) -> PlaybackResult<()> {
        if guild_id.is_empty() {
            return Err(PlaybackError::EmptyGuildId);
        }
        if channel_id.is_empty() {
            return Err(PlaybackError::EmptyChannelId);
        }
        if cancel.is_cancelled() {
            return Err(PlaybackError::Cancelled);
        }

        tracing::debug!(guild_id, channel_id, "joining voice channel");
        let conn = self
            .session
            .join(guild_id, channel_id, false, true)
            .map_err(PlaybackError::JoinFailed)?;

        let result = stream(&conn, cancel, frames).await;

        tracing::debug!(guild_id, channel_id, "disconnecting from voice");
        match (result, conn.disconnect()) {
            (Err(err), Err(disconnect_err)) => {
                tracing::warn!(error = %disconnect_err, "disconnect failed after playback error");
                Err(err)
            }
            (Err(err), Ok(())) => Err(err),
            (Ok(()), Err(disconnect_err)) => Err(PlaybackError::Disconnect(disconnect_err)),
            (Ok(()), Ok(())) => Ok(()),
        }
    }
}

async fn stream<C: VoiceConnection>(
    conn: &C,
    cancel: &CancelToken,
    mut frames: mpsc::Receiver<Vec<u8>>,
) -> PlaybackResult<()> {
    conn.speaking(true).map_err(PlaybackError::SpeakingFailed)?;
    let sink = conn.opus_sender();
    let mut sent = 0usize;

    loop {
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return abort(conn, &sink, sent).await,
            frame = frames.recv() => frame,
        };
        let Some(frame) = next else {
            break;
        };

        tokio::select! {
            biased;
            _ = cancel.cancelled() => return abort(conn, &sink, sent).await,
            delivered = sink.send(frame) => {
                if delivered.is_err() {
                    return Err(PlaybackError::SinkClosed);
                }
            }
        }
        sent += 1;
    }

    tracing::debug!(frames = sent, "frame stream finished");
    send_silence(&sink).await?;
    conn.speaking(false).map_err(PlaybackError::SpeakingFailed)?;
    Ok(())
}

/// Cancellation path: bounded silence flush, best-effort speaking off.
async fn abort<C: VoiceConnection>(
    conn: &C,
    sink: &mpsc::Sender<Vec<u8>>,
    sent: usize,
) -> PlaybackResult<()> {
    tracing::debug!(frames = sent, "playback cancelled");
    if tokio::time::timeout(SILENCE_FLUSH_TIMEOUT, send_silence(sink))
        .await
        .is_err()
    {
        tracing::warn!("silence flush timed out");
    }
    let _ = conn.speaking(false);
    Err(PlaybackError::Cancelled)
}

async fn send_silence(sink: &mpsc::Sender<Vec<u8>>) -> PlaybackResult<()> {
    for _ in 0..SILENCE_FRAME_COUNT {
        sink.send(SILENCE_FRAME.to_vec())
            .await
            .map_err(|_| PlaybackError::SinkClosed)?;
    }
    Ok(())
}
