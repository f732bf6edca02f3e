//! MPD client.

use crate::connection::Connection;
use crate::error::{MpdError, Result};
use crate::protocol::{self, Pairs};
use crate::types::MpdConfig;
use async_trait::async_trait;
use soul_core::{PlayState, PlaybackEngine, PlayerStatus, RawTrackAttrs};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Client for one MPD server.
///
/// Commands are serialized over a single lazily opened connection. If an
/// exchange fails for any reason other than an `ACK`, the connection is
/// discarded and the next command reconnects.
pub struct MpdClient {
    config: MpdConfig,
    connection: Mutex<Option<Connection>>,
}

impl std::fmt::Debug for MpdClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MpdClient")
            .field("address", &self.config.address())
            .finish_non_exhaustive()
    }
}

impl MpdClient {
    /// Create a client. No connection is made until the first command.
    pub fn new(config: MpdConfig) -> Self {
        Self {
            config,
            connection: Mutex::new(None),
        }
    }

    pub fn config(&self) -> &MpdConfig {
        &self.config
    }

    /// Run one command line, bounded by the configured timeout
    pub async fn run(&self, command: &str) -> Result<Pairs> {
        let name = command.split(' ').next().unwrap_or(command);
        let mut slot = self.connection.lock().await;

        let outcome =
            match tokio::time::timeout(self.config.timeout, self.exchange(&mut slot, command)).await
            {
                Ok(outcome) => outcome,
                Err(_) => Err(MpdError::Timeout(
                    u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX),
                )),
            };

        match &outcome {
            Ok(pairs) => debug!(command = name, lines = pairs.len(), "MPD command done"),
            Err(e) if e.breaks_connection() => {
                warn!(command = name, error = %e, "MPD connection dropped");
                *slot = None;
            }
            Err(e) => debug!(command = name, error = %e, "MPD refused command"),
        }
        outcome
    }

    async fn exchange(&self, slot: &mut Option<Connection>, command: &str) -> Result<Pairs> {
        if slot.is_none() {
            let address = self.config.address();
            let conn = Connection::open(&address, self.config.password.as_deref()).await?;
            *slot = Some(conn);
        }
        match slot.as_mut() {
            Some(conn) => conn.execute(command).await,
            None => Err(MpdError::Closed),
        }
    }
}

#[async_trait]
impl PlaybackEngine for MpdClient {
    async fn list_all_tracks(&self) -> soul_core::Result<Vec<RawTrackAttrs>> {
        let pairs = self.run("listallinfo").await?;
        Ok(protocol::entries(pairs))
    }

    async fn enqueue_and_play(&self, filename: &str) -> soul_core::Result<()> {
        let added = self.run(&protocol::command("addid", &[filename])).await?;
        let id = protocol::added_id(&added)?.to_string();
        self.run(&protocol::command("playid", &[&id])).await?;
        Ok(())
    }

    async fn set_playing(&self, playing: bool) -> soul_core::Result<()> {
        if !playing {
            self.run("pause 1").await?;
            return Ok(());
        }

        // `pause 0` does nothing on a stopped player
        let status = self.get_status().await?;
        let command = if status.state == PlayState::Stop {
            "play"
        } else {
            "pause 0"
        };
        self.run(command).await?;
        Ok(())
    }

    async fn skip_next(&self) -> soul_core::Result<()> {
        self.run("next").await?;
        Ok(())
    }

    async fn skip_previous(&self) -> soul_core::Result<()> {
        self.run("previous").await?;
        Ok(())
    }

    async fn get_status(&self) -> soul_core::Result<PlayerStatus> {
        let pairs = self.run("status").await?;
        Ok(protocol::status(&pairs)?)
    }

    async fn set_volume(&self, volume: u8) -> soul_core::Result<()> {
        self.run(&protocol::command("setvol", &[&volume.to_string()]))
            .await?;
        Ok(())
    }

    async fn current_track(&self) -> soul_core::Result<Option<RawTrackAttrs>> {
        let pairs = self.run("currentsong").await?;
        Ok(protocol::current_song(pairs))
    }

    async fn ping(&self) -> soul_core::Result<()> {
        self.run("ping").await?;
        Ok(())
    }
}
