//! pause, next, prev

use super::report_now_playing;
use crate::error::CommandError;
use crate::gateway::ChatId;
use crate::state::AppState;

pub const PAUSED: &str = "Paused.";

pub async fn pause(state: &AppState, chat: ChatId) -> Result<(), CommandError> {
    state.playback.pause().await?;
    state.gateway.send_text(chat, PAUSED).await?;
    Ok(())
}

pub async fn next(state: &AppState, chat: ChatId) -> Result<(), CommandError> {
    state.playback.next().await?;
    report_now_playing(state, chat).await
}

pub async fn previous(state: &AppState, chat: ChatId) -> Result<(), CommandError> {
    state.playback.previous().await?;
    report_now_playing(state, chat).await
}
