//! /play: resume, or search and offer choices

use super::{report_now_playing, CHOICE_PREFIX};
use crate::error::CommandError;
use crate::gateway::{Button, ChatId, Keyboard};
use crate::state::AppState;
use soul_core::{RequesterId, TrackId};
use soul_search::{SearchPage, SearchRequest};
use soul_selection::layout;
use tracing::info;

pub const NO_MUSIC_FOUND: &str = "No music found.";

/// Numbered result lines, plus a footer when the list was cut short
pub fn listing(page: &SearchPage) -> String {
    let mut lines: Vec<String> = page
        .hits
        .iter()
        .enumerate()
        .map(|(i, hit)| format!("{}. {}", i + 1, hit.track.display_name()))
        .collect();
    if page.total > page.hits.len() {
        lines.push(format!(
            "Showing {} of {} matches. Refine your search to see more.",
            page.hits.len(),
            page.total
        ));
    }
    lines.join("\n")
}

pub async fn play(
    state: &AppState,
    requester: &RequesterId,
    chat: ChatId,
    payload: &str,
) -> Result<(), CommandError> {
    if payload.trim().is_empty() {
        state.playback.play().await?;
        return report_now_playing(state, chat).await;
    }
    search_and_offer(state, requester, chat, payload).await
}

/// Search, mint a choice set, and send the numbered result list with buttons
async fn search_and_offer(
    state: &AppState,
    requester: &RequesterId,
    chat: ChatId,
    text: &str,
) -> Result<(), CommandError> {
    let request = SearchRequest::new(text).with_limit(state.settings.max_results);
    let page = state.library.search(&request)?;
    info!(requester = %requester, query = text, total = page.total, "Search");

    if page.hits.is_empty() {
        // The new search still supersedes any older prompt
        state.selections.discard(requester).await;
        state.gateway.send_text(chat, NO_MUSIC_FOUND).await?;
        return Ok(());
    }

    let ids: Vec<TrackId> = page.hits.iter().map(|hit| hit.track.id.clone()).collect();
    let set = state
        .selections
        .create(requester, page.generation, &ids)
        .await?;

    let buttons: Vec<Button> = set
        .choices()
        .enumerate()
        .map(|(i, (token, _))| Button::new((i + 1).to_string(), format!("{CHOICE_PREFIX}{token}")))
        .collect();
    let keyboard: Keyboard = layout(&buttons, state.settings.max_row_width)?
        .into_iter()
        .map(<[Button]>::to_vec)
        .collect();

    state
        .gateway
        .send_keyboard(chat, &listing(&page), &keyboard)
        .await?;
    Ok(())
}
