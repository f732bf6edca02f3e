//! Telegram Bot API gateway (long polling)

use super::types::{Button, ChatId, InboundEvent, Keyboard, MessageRef};
use super::{EventSource, MessagingGateway};
use crate::config::TelegramSettings;
use crate::error::{GatewayError, GatewayResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use soul_core::RequesterId;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Commands advertised in the client's command menu
pub const BOT_COMMANDS: [(&str, &str); 5] = [
    ("play", "Start playing, or search for music"),
    ("pause", "Pause the music"),
    ("next", "Next music"),
    ("prev", "Previous music"),
    ("volume", "Show or set the volume"),
];

/// Gateway talking to the Telegram Bot API
///
/// Updates are fetched with `getUpdates` long polling; the offset advances
/// past every update received, so each is delivered once.
pub struct TelegramGateway {
    http: Client,
    base_url: String,
    poll_timeout: Duration,
    offset: AtomicI64,
}

impl std::fmt::Debug for TelegramGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // base_url carries the token
        f.debug_struct("TelegramGateway")
            .field("poll_timeout", &self.poll_timeout)
            .finish_non_exhaustive()
    }
}

impl TelegramGateway {
    pub fn new(settings: &TelegramSettings) -> GatewayResult<Self> {
        let poll_timeout = Duration::from_secs(settings.poll_timeout_secs);
        let http = Client::builder()
            .timeout(poll_timeout + Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("SoulRemote/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: format!(
                "{}/bot{}",
                settings.api_url.trim_end_matches('/'),
                settings.token
            ),
            poll_timeout,
            offset: AtomicI64::new(0),
        })
    }

    /// Register the command menu
    pub async fn set_commands(&self) -> GatewayResult<()> {
        let commands: Vec<Value> = BOT_COMMANDS
            .iter()
            .map(|(command, description)| json!({ "command": command, "description": description }))
            .collect();
        let _: bool = self
            .call("setMyCommands", &json!({ "commands": commands }))
            .await?;
        Ok(())
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: &Value) -> GatewayResult<T> {
        let url = format!("{}/{}", self.base_url, method);
        debug!(method, "Calling Bot API");

        let response = self.http.post(&url).json(body).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                GatewayError::Unreachable(e.without_url().to_string())
            } else {
                GatewayError::Request(e.without_url())
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(reqwest::Error::without_url)?;

        let parsed: ApiResponse<T> = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(e) if status.is_success() => {
                return Err(GatewayError::Parse(format!("{method}: {e}")));
            }
            Err(_) => {
                return Err(GatewayError::Api {
                    code: i64::from(status.as_u16()),
                    description: text,
                });
            }
        };

        match parsed {
            ApiResponse {
                ok: true,
                result: Some(result),
                ..
            } => Ok(result),
            ApiResponse {
                ok: true,
                result: None,
                ..
            } => Err(GatewayError::Parse(format!("{method}: missing result"))),
            ApiResponse {
                error_code,
                description,
                ..
            } => Err(GatewayError::Api {
                code: error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                description: description.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    async fn send_text(&self, chat: ChatId, text: &str) -> GatewayResult<MessageRef> {
        let sent: ApiMessage = self
            .call("sendMessage", &json!({ "chat_id": chat.0, "text": text }))
            .await?;
        Ok(sent.message_ref())
    }

    async fn send_keyboard(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: &Keyboard,
    ) -> GatewayResult<MessageRef> {
        let sent: ApiMessage = self
            .call(
                "sendMessage",
                &json!({
                    "chat_id": chat.0,
                    "text": text,
                    "reply_markup": inline_keyboard(keyboard),
                }),
            )
            .await?;
        Ok(sent.message_ref())
    }

    async fn edit_message(
        &self,
        message: &MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> GatewayResult<()> {
        let mut body = json!({
            "chat_id": message.chat.0,
            "message_id": message.message_id,
            "text": text,
        });
        if let Some(keyboard) = keyboard {
            body["reply_markup"] = inline_keyboard(keyboard);
        }

        // Result is the edited message, or `true` for inline messages
        let _: Value = self.call("editMessageText", &body).await?;
        Ok(())
    }

    async fn answer_tap(&self, tap_id: &str, notice: Option<&str>) -> GatewayResult<()> {
        let mut body = json!({ "callback_query_id": tap_id });
        if let Some(notice) = notice {
            body["text"] = Value::from(notice);
        }
        let _: bool = self.call("answerCallbackQuery", &body).await?;
        Ok(())
    }
}

#[async_trait]
impl EventSource for TelegramGateway {
    async fn next_batch(&self) -> GatewayResult<Vec<InboundEvent>> {
        let body = json!({
            "offset": self.offset.load(Ordering::SeqCst),
            "timeout": self.poll_timeout.as_secs(),
            "allowed_updates": ["message", "callback_query"],
        });
        let updates: Vec<ApiUpdate> = self.call("getUpdates", &body).await?;

        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.offset.store(last + 1, Ordering::SeqCst);
        }

        Ok(updates.into_iter().filter_map(ApiUpdate::into_event).collect())
    }
}

/// Split `/command@bot payload` into the lowercased command and trimmed payload
///
/// Returns `None` for text that is not a command.
pub fn parse_command(text: &str) -> Option<(String, String)> {
    let rest = text.trim_start().strip_prefix('/')?;
    let (head, payload) = rest
        .split_once(char::is_whitespace)
        .map_or((rest, ""), |(head, payload)| (head, payload.trim()));

    let command = head.split('@').next().unwrap_or(head);
    if command.is_empty() {
        return None;
    }
    Some((command.to_lowercase(), payload.to_string()))
}

fn inline_keyboard(keyboard: &Keyboard) -> Value {
    let rows: Vec<Vec<Value>> = keyboard
        .iter()
        .map(|row| {
            row.iter()
                .map(|Button { label, data }| json!({ "text": label, "callback_data": data }))
                .collect()
        })
        .collect();
    json!({ "inline_keyboard": rows })
}

// Bot API wire types

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ApiUpdate {
    update_id: i64,
    message: Option<ApiMessage>,
    callback_query: Option<ApiCallbackQuery>,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message_id: i64,
    chat: ApiChat,
    from: Option<ApiUser>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiChat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct ApiCallbackQuery {
    id: String,
    from: ApiUser,
    message: Option<ApiMessage>,
    data: Option<String>,
}

impl ApiMessage {
    fn message_ref(&self) -> MessageRef {
        MessageRef {
            chat: ChatId(self.chat.id),
            message_id: self.message_id,
        }
    }
}

impl ApiUpdate {
    fn into_event(self) -> Option<InboundEvent> {
        if let Some(message) = self.message {
            let (command, payload) = parse_command(message.text.as_deref()?)?;
            let requester = message.from.as_ref().map_or(message.chat.id, |u| u.id);
            return Some(InboundEvent::Command {
                requester: RequesterId::from(requester),
                chat: ChatId(message.chat.id),
                command,
                payload,
            });
        }

        if let Some(query) = self.callback_query {
            let Some(message) = query.message.as_ref() else {
                warn!(update_id = self.update_id, "Button tap without message, ignoring");
                return None;
            };
            let message = message.message_ref();
            return Some(InboundEvent::ButtonTap {
                requester: RequesterId::from(query.from.id),
                chat: message.chat,
                message,
                tap_id: query.id,
                data: query.data.unwrap_or_default(),
            });
        }

        None
    }
}
