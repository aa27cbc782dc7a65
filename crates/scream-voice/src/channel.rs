//! Voice channel discovery.

use crate::error::{PlaybackError, PlaybackResult};
use crate::session::VoiceSession;

/// Returns the first voice channel in `guild_id` occupied by someone other
/// than `bot_user_id`.
pub fn find_populated_channel<S: VoiceSession>(
    session: &S,
    guild_id: &str,
    bot_user_id: &str,
) -> PlaybackResult<String> {
    if guild_id.is_empty() {
        return Err(PlaybackError::EmptyGuildId);
    }

    let states = session
        .guild_voice_states(guild_id)
        .map_err(PlaybackError::GuildState)?;

    states
        .into_iter()
        .find(|state| !state.channel_id.is_empty() && state.user_id != bot_user_id)
        .map(|state| state.channel_id)
        .ok_or(PlaybackError::NoPopulatedChannel)
}
