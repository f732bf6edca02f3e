//! Choice button taps

use crate::error::CommandError;
use crate::gateway::ChatId;
use crate::state::AppState;
use soul_core::RequesterId;
use tracing::info;

/// Resolve a choice token and play the chosen track
pub async fn choose(
    state: &AppState,
    requester: &RequesterId,
    chat: ChatId,
    token: &str,
) -> Result<(), CommandError> {
    let resolution = state.selections.resolve(requester, token).await?;
    let track = state
        .library
        .lookup(resolution.generation, &resolution.track_id)?;

    info!(requester = %requester, track_id = %track.id, file = %track.filename, "Playing chosen track");
    state.playback.play_track(&track.filename).await?;

    state
        .gateway
        .send_text(chat, &format!("Now playing {}", track.title))
        .await?;
    Ok(())
}
