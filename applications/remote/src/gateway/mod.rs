//! Messaging gateway: the chat transport seen from the bot
//!
//! Handlers only talk to [`MessagingGateway`]; inbound traffic arrives
//! through [`EventSource`]. [`TelegramGateway`] implements both.

mod telegram;
mod types;

pub use telegram::{parse_command, TelegramGateway, BOT_COMMANDS};
pub use types::{Button, ChatId, InboundEvent, Keyboard, MessageRef};

use crate::error::GatewayResult;
use async_trait::async_trait;

/// Outbound side of the chat transport
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    /// Send a plain text message
    async fn send_text(&self, chat: ChatId, text: &str) -> GatewayResult<MessageRef>;

    /// Send a message with an inline button grid
    async fn send_keyboard(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: &Keyboard,
    ) -> GatewayResult<MessageRef>;

    /// Replace the text (and optionally the buttons) of a sent message
    async fn edit_message(
        &self,
        message: &MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> GatewayResult<()>;

    /// Acknowledge a button tap, optionally with a short notice
    async fn answer_tap(&self, tap_id: &str, notice: Option<&str>) -> GatewayResult<()>;
}

/// Inbound side of the chat transport
#[async_trait]
pub trait EventSource: Send + Sync {
    /// Wait for the next batch of events (may be empty after a poll timeout)
    async fn next_batch(&self) -> GatewayResult<Vec<InboundEvent>>;
}
