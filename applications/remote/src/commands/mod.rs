//! Command handlers
//!
//! [`dispatch`] is the error boundary: every failure below it is logged with
//! full detail here and turned into a short reply for the requester.

pub mod choice;
pub mod play;
pub mod transport;
pub mod volume;

use crate::error::CommandError;
use crate::gateway::{ChatId, InboundEvent, MessageRef};
use crate::state::AppState;
use soul_core::RequesterId;
use tracing::{debug, error, warn};

/// Button data prefix for search choices (`choice:<token>`)
pub const CHOICE_PREFIX: &str = "choice:";
/// Button data for volume up
pub const VOLUME_UP: &str = "volume:up";
/// Button data for volume down
pub const VOLUME_DOWN: &str = "volume:down";

const HELP_TEXT: &str = "/play - resume playback\n\
/play <words> - search for music and pick from the results\n\
/pause - pause the music\n\
/next - next music\n\
/prev - previous music\n\
/volume - show the volume\n\
/volume <0-100> - set the volume";

/// Handle one inbound event end to end
pub async fn dispatch(state: &AppState, event: InboundEvent) {
    match event {
        InboundEvent::Command {
            requester,
            chat,
            command,
            payload,
        } => {
            debug!(requester = %requester, command = %command, "Command received");
            if let Err(e) = run_command(state, &requester, chat, &command, &payload).await {
                log_failure(&requester, &command, &e);
                if let Err(send_err) = state.gateway.send_text(chat, e.user_message()).await {
                    error!(chat = %chat, error = %send_err, "Failed to send error reply");
                }
            }
        }
        InboundEvent::ButtonTap {
            requester,
            chat,
            message,
            tap_id,
            data,
        } => {
            debug!(requester = %requester, data = %data, "Button tapped");
            let notice = match run_tap(state, &requester, chat, &message, &data).await {
                Ok(()) => None,
                Err(e) => {
                    log_failure(&requester, &data, &e);
                    Some(e.user_message().to_string())
                }
            };
            if let Err(e) = state.gateway.answer_tap(&tap_id, notice.as_deref()).await {
                error!(error = %e, "Failed to answer button tap");
            }
        }
    }
}

async fn run_command(
    state: &AppState,
    requester: &RequesterId,
    chat: ChatId,
    command: &str,
    payload: &str,
) -> Result<(), CommandError> {
    match command {
        "play" => play::play(state, requester, chat, payload).await,
        "pause" => transport::pause(state, chat).await,
        "next" => transport::next(state, chat).await,
        "prev" => transport::previous(state, chat).await,
        "volume" => volume::volume(state, chat, payload).await,
        "help" | "start" => {
            state.gateway.send_text(chat, HELP_TEXT).await?;
            Ok(())
        }
        other => {
            debug!(command = other, "Ignoring unknown command");
            Ok(())
        }
    }
}

async fn run_tap(
    state: &AppState,
    requester: &RequesterId,
    chat: ChatId,
    message: &MessageRef,
    data: &str,
) -> Result<(), CommandError> {
    if let Some(token) = data.strip_prefix(CHOICE_PREFIX) {
        return choice::choose(state, requester, chat, token).await;
    }
    match data {
        VOLUME_UP => volume::step(state, message, state.settings.volume_step).await,
        VOLUME_DOWN => volume::step(state, message, -state.settings.volume_step).await,
        other => {
            debug!(data = other, "Ignoring unknown button");
            Ok(())
        }
    }
}

fn log_failure(requester: &RequesterId, action: &str, err: &CommandError) {
    if err.is_user_error() {
        warn!(requester = %requester, action, error = %err, "Command rejected");
    } else {
        error!(requester = %requester, action, error = ?err, "Command failed");
    }
}

/// Reply with the current song title, if the engine reports one
///
/// Best effort: a failed read is logged, not reported.
pub(crate) async fn report_now_playing(state: &AppState, chat: ChatId) -> Result<(), CommandError> {
    match state.playback.now_playing().await {
        Ok(Some(title)) => {
            state
                .gateway
                .send_text(chat, &format!("Now playing {title}"))
                .await?;
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "Failed to read current song"),
    }
    Ok(())
}
