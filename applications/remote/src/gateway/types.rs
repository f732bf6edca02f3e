//! Transport-neutral message types

use serde::{Deserialize, Serialize};
use soul_core::RequesterId;
use std::fmt;

/// Conversation a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message already sent, for editing in place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat: ChatId,
    pub message_id: i64,
}

/// One tappable button
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    /// Opaque payload delivered back in the tap event
    pub data: String,
}

impl Button {
    pub fn new(label: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            data: data.into(),
        }
    }
}

/// Button rows, top to bottom
pub type Keyboard = Vec<Vec<Button>>;

/// Event delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// `/command payload`
    Command {
        requester: RequesterId,
        chat: ChatId,
        command: String,
        payload: String,
    },

    /// Tap on an inline button
    ButtonTap {
        requester: RequesterId,
        chat: ChatId,
        message: MessageRef,
        tap_id: String,
        data: String,
    },
}

impl InboundEvent {
    pub fn requester(&self) -> &RequesterId {
        match self {
            Self::Command { requester, .. } | Self::ButtonTap { requester, .. } => requester,
        }
    }

    pub fn chat(&self) -> ChatId {
        match self {
            Self::Command { chat, .. } | Self::ButtonTap { chat, .. } => *chat,
        }
    }
}
