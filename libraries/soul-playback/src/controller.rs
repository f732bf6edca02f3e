//! Playback controller
//!
//! Every transition re-reads what it needs from the engine and wraps the
//! engine call in a timeout.

use crate::error::{PlaybackError, Result};
use crate::volume::Volume;
use soul_core::{PlaybackEngine, PlayerStatus, RawTrackAttrs};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on a single engine call
pub const DEFAULT_ENGINE_TIMEOUT: Duration = Duration::from_secs(5);

/// Validated transport and volume control over a playback engine
#[derive(Clone)]
pub struct PlaybackController {
    engine: Arc<dyn PlaybackEngine>,
    timeout: Duration,
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl PlaybackController {
    pub fn new(engine: Arc<dyn PlaybackEngine>, timeout: Duration) -> Self {
        Self { engine, timeout }
    }

    /// Underlying engine, for callers that need raw access (library snapshots)
    pub fn engine(&self) -> &Arc<dyn PlaybackEngine> {
        &self.engine
    }

    /// Resume playback
    pub async fn play(&self) -> Result<()> {
        self.call("play", self.engine.set_playing(true)).await
    }

    /// Pause playback (pausing while paused is fine)
    pub async fn pause(&self) -> Result<()> {
        self.call("pause", self.engine.set_playing(false)).await
    }

    pub async fn next(&self) -> Result<()> {
        self.call("next", self.engine.skip_next()).await
    }

    pub async fn previous(&self) -> Result<()> {
        self.call("previous", self.engine.skip_previous()).await
    }

    /// Append `filename` to the queue and jump to it
    pub async fn play_track(&self, filename: &str) -> Result<()> {
        debug!(filename, "Playing track");
        self.call("play_track", self.engine.enqueue_and_play(filename))
            .await
    }

    /// Set the absolute volume
    ///
    /// # Errors
    /// Returns `InvalidVolume` without contacting the engine if `level` is
    /// outside 0-100
    pub async fn set_volume(&self, level: i64) -> Result<Volume> {
        let volume = Volume::new(level)?;
        self.apply_volume(volume).await?;
        Ok(volume)
    }

    /// Move the volume by `delta`, saturating at 0 and 100
    ///
    /// A failed read of the current volume is returned as is; no baseline is
    /// guessed.
    pub async fn adjust_volume(&self, delta: i64) -> Result<Volume> {
        let current = self.volume().await?;
        let target = current.saturating_add(delta);
        debug!(from = %current, to = %target, delta, "Adjusting volume");
        self.apply_volume(target).await?;
        Ok(target)
    }

    /// Current volume
    ///
    /// # Errors
    /// Returns `InvalidState` if the engine reports no volume (no mixer)
    pub async fn volume(&self) -> Result<Volume> {
        self.status()
            .await?
            .volume
            .map(Volume::from_engine)
            .ok_or_else(|| PlaybackError::InvalidState("Volume is not available".to_string()))
    }

    pub async fn status(&self) -> Result<PlayerStatus> {
        self.call("status", self.engine.get_status()).await
    }

    /// Title of the current song, falling back to its file name
    pub async fn now_playing(&self) -> Result<Option<String>> {
        let current = self
            .call("now_playing", self.engine.current_track())
            .await?;
        Ok(current.as_ref().and_then(display_title))
    }

    pub async fn ping(&self) -> Result<()> {
        self.call("ping", self.engine.ping()).await
    }

    async fn apply_volume(&self, volume: Volume) -> Result<()> {
        self.call("set_volume", self.engine.set_volume(volume.level()))
            .await
    }

    async fn call<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = soul_core::Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!(operation, error = %e, "Engine call failed");
                Err(e.into())
            }
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(operation, timeout_ms, "Engine call timed out");
                Err(PlaybackError::EngineUnreachable(format!(
                    "{operation} timed out after {timeout_ms}ms"
                )))
            }
        }
    }
}

fn display_title(attrs: &RawTrackAttrs) -> Option<String> {
    attrs
        .title()
        .or_else(|| attrs.file())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_title_prefers_title() {
        let attrs: RawTrackAttrs = [("file", "a.flac"), ("Title", "So What")]
            .into_iter()
            .collect();
        assert_eq!(display_title(&attrs).as_deref(), Some("So What"));

        let untitled: RawTrackAttrs = [("file", "a.flac")].into_iter().collect();
        assert_eq!(display_title(&untitled).as_deref(), Some("a.flac"));

        assert_eq!(display_title(&RawTrackAttrs::new()), None);
    }
}
