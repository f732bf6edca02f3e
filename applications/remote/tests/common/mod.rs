//! Common test doubles and fixtures
#![allow(dead_code)]

use async_trait::async_trait;
use soul_core::{
    EngineError, PlayState, PlaybackEngine, PlayerStatus, RawTrackAttrs, RequesterId,
};
use soul_playback::PlaybackController;
use soul_remote::error::GatewayResult;
use soul_remote::gateway::{ChatId, InboundEvent, Keyboard, MessageRef, MessagingGateway};
use soul_remote::{AppState, CommandSettings};
use soul_search::SearchLibrary;
use soul_selection::SelectionRegistry;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const CHAT: ChatId = ChatId(777);

/// In-memory playback engine recording every call
#[derive(Default)]
pub struct FakeEngine {
    pub tracks: Mutex<Vec<RawTrackAttrs>>,
    pub volume: Mutex<Option<u8>>,
    pub state: Mutex<PlayState>,
    pub current: Mutex<Option<RawTrackAttrs>>,
    pub calls: Mutex<Vec<String>>,
    pub unreachable: Mutex<bool>,
    /// Listing never answers
    pub stuck: Mutex<bool>,
}

impl FakeEngine {
    pub fn with_tracks(tracks: &[(&str, &str)]) -> Self {
        let engine = Self::default();
        *engine.tracks.lock().unwrap() = tracks
            .iter()
            .map(|(file, title)| [("file", *file), ("Title", *title)].into_iter().collect())
            .collect();
        *engine.volume.lock().unwrap() = Some(50);
        engine
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.lock().unwrap() = unreachable;
    }

    pub fn set_stuck(&self, stuck: bool) {
        *self.stuck.lock().unwrap() = stuck;
    }

    fn record(&self, call: impl Into<String>) -> Result<(), EngineError> {
        self.calls.lock().unwrap().push(call.into());
        if *self.unreachable.lock().unwrap() {
            return Err(EngineError::unreachable("Connection refused"));
        }
        Ok(())
    }
}

#[async_trait]
impl PlaybackEngine for FakeEngine {
    async fn list_all_tracks(&self) -> soul_core::Result<Vec<RawTrackAttrs>> {
        self.record("listallinfo")?;
        let stuck = *self.stuck.lock().unwrap();
        if stuck {
            std::future::pending::<()>().await;
        }
        Ok(self.tracks.lock().unwrap().clone())
    }

    async fn enqueue_and_play(&self, filename: &str) -> soul_core::Result<()> {
        self.record(format!("enqueue_and_play {filename}"))?;
        let attrs = self
            .tracks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.file() == Some(filename))
            .cloned();
        *self.current.lock().unwrap() = attrs;
        *self.state.lock().unwrap() = PlayState::Play;
        Ok(())
    }

    async fn set_playing(&self, playing: bool) -> soul_core::Result<()> {
        self.record(format!("set_playing {playing}"))?;
        *self.state.lock().unwrap() = if playing {
            PlayState::Play
        } else {
            PlayState::Pause
        };
        Ok(())
    }

    async fn skip_next(&self) -> soul_core::Result<()> {
        self.record("next")
    }

    async fn skip_previous(&self) -> soul_core::Result<()> {
        self.record("previous")
    }

    async fn get_status(&self) -> soul_core::Result<PlayerStatus> {
        self.record("status")?;
        Ok(PlayerStatus {
            volume: *self.volume.lock().unwrap(),
            state: *self.state.lock().unwrap(),
            song_id: None,
            queue_length: 0,
        })
    }

    async fn set_volume(&self, volume: u8) -> soul_core::Result<()> {
        self.record(format!("set_volume {volume}"))?;
        *self.volume.lock().unwrap() = Some(volume);
        Ok(())
    }

    async fn current_track(&self) -> soul_core::Result<Option<RawTrackAttrs>> {
        self.record("currentsong")?;
        Ok(self.current.lock().unwrap().clone())
    }

    async fn ping(&self) -> soul_core::Result<()> {
        self.record("ping")
    }
}

/// Something the bot sent through the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text {
        chat: ChatId,
        text: String,
    },
    Keyboard {
        chat: ChatId,
        text: String,
        keyboard: Keyboard,
    },
    Edit {
        message: MessageRef,
        text: String,
        keyboard: Option<Keyboard>,
    },
    Answer {
        tap_id: String,
        notice: Option<String>,
    },
}

/// Gateway that records outbound traffic instead of delivering it
#[derive(Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<Sent>>,
    next_message_id: Mutex<i64>,
}

impl RecordingGateway {
    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    /// Text of every plain message, in order
    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// The most recent keyboard message
    pub fn last_keyboard(&self) -> Option<(String, Keyboard)> {
        self.sent().into_iter().rev().find_map(|s| match s {
            Sent::Keyboard { text, keyboard, .. } => Some((text, keyboard)),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
    }

    fn message_ref(&self, chat: ChatId) -> MessageRef {
        let mut id = self.next_message_id.lock().unwrap();
        *id += 1;
        MessageRef {
            chat,
            message_id: *id,
        }
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_text(&self, chat: ChatId, text: &str) -> GatewayResult<MessageRef> {
        self.sent.lock().unwrap().push(Sent::Text {
            chat,
            text: text.to_string(),
        });
        Ok(self.message_ref(chat))
    }

    async fn send_keyboard(
        &self,
        chat: ChatId,
        text: &str,
        keyboard: &Keyboard,
    ) -> GatewayResult<MessageRef> {
        self.sent.lock().unwrap().push(Sent::Keyboard {
            chat,
            text: text.to_string(),
            keyboard: keyboard.clone(),
        });
        Ok(self.message_ref(chat))
    }

    async fn edit_message(
        &self,
        message: &MessageRef,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> GatewayResult<()> {
        self.sent.lock().unwrap().push(Sent::Edit {
            message: *message,
            text: text.to_string(),
            keyboard: keyboard.cloned(),
        });
        Ok(())
    }

    async fn answer_tap(&self, tap_id: &str, notice: Option<&str>) -> GatewayResult<()> {
        self.sent.lock().unwrap().push(Sent::Answer {
            tap_id: tap_id.to_string(),
            notice: notice.map(str::to_string),
        });
        Ok(())
    }
}

/// Bot wired to a fake engine and a recording gateway
pub struct Harness {
    pub state: AppState,
    pub engine: Arc<FakeEngine>,
    pub gateway: Arc<RecordingGateway>,
}

impl Harness {
    /// Build the harness and index the engine's tracks
    pub fn new(engine: FakeEngine) -> Self {
        let harness = Self::unindexed(engine);
        harness.reindex();
        harness
    }

    /// Build the harness without publishing any library generation
    pub fn unindexed(engine: FakeEngine) -> Self {
        let engine = Arc::new(engine);
        let gateway = Arc::new(RecordingGateway::default());
        let library = Arc::new(SearchLibrary::new());

        let state = AppState::new(
            library,
            Arc::new(SelectionRegistry::new(Duration::from_secs(300))),
            PlaybackController::new(engine.clone(), Duration::from_secs(1)),
            gateway.clone(),
            CommandSettings::default(),
        );

        Self {
            state,
            engine,
            gateway,
        }
    }

    /// Publish a new library generation from the engine's current tracks
    pub fn reindex(&self) {
        self.state
            .library
            .rebuild(&self.engine.tracks.lock().unwrap());
    }

    pub async fn send(&self, event: InboundEvent) {
        soul_remote::commands::dispatch(&self.state, event).await;
    }
}

pub fn requester() -> RequesterId {
    RequesterId::from(42)
}

pub fn command(command: &str, payload: &str) -> InboundEvent {
    InboundEvent::Command {
        requester: requester(),
        chat: CHAT,
        command: command.to_string(),
        payload: payload.to_string(),
    }
}

pub fn tap(data: &str) -> InboundEvent {
    InboundEvent::ButtonTap {
        requester: requester(),
        chat: CHAT,
        message: MessageRef {
            chat: CHAT,
            message_id: 1,
        },
        tap_id: "tap-1".to_string(),
        data: data.to_string(),
    }
}
