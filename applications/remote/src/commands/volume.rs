//! /volume and the up/down buttons

use super::{VOLUME_DOWN, VOLUME_UP};
use crate::error::CommandError;
use crate::gateway::{Button, ChatId, Keyboard, MessageRef};
use crate::state::AppState;
use soul_playback::Volume;

pub async fn volume(state: &AppState, chat: ChatId, payload: &str) -> Result<(), CommandError> {
    let payload = payload.trim();
    if payload.is_empty() {
        let current = state.playback.volume().await?;
        state
            .gateway
            .send_keyboard(chat, &volume_text(current), &volume_keyboard())
            .await?;
        return Ok(());
    }

    let level: i64 = payload
        .parse()
        .map_err(|_| CommandError::validation("The volume should be a number."))?;
    let applied = state.playback.set_volume(level).await?;
    state.gateway.send_text(chat, &volume_text(applied)).await?;
    Ok(())
}

/// Adjust by `delta` and refresh the volume message in place
pub async fn step(state: &AppState, message: &MessageRef, delta: i64) -> Result<(), CommandError> {
    let applied = state.playback.adjust_volume(delta).await?;
    state
        .gateway
        .edit_message(message, &volume_text(applied), Some(&volume_keyboard()))
        .await?;
    Ok(())
}

pub fn volume_text(volume: Volume) -> String {
    format!("Current volume is: {volume}")
}

pub fn volume_keyboard() -> Keyboard {
    vec![vec![
        Button::new("UP", VOLUME_UP),
        Button::new("DOWN", VOLUME_DOWN),
    ]]
}
