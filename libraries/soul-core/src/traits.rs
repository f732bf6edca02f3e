/// Core traits for Soul Remote
use crate::error::Result;
use crate::types::{PlayerStatus, RawTrackAttrs};
use async_trait::async_trait;

/// Playback engine trait
///
/// The narrow contract Soul Remote needs from the player daemon. Decoding,
/// queue persistence and audio output all live on the other side of it.
///
/// Transport calls (`set_playing`, `skip_next`, `skip_previous`) are assumed
/// idempotent at this boundary: pausing while paused is not an error.
#[async_trait]
pub trait PlaybackEngine: Send + Sync {
    /// List every track in the engine's library (used at index build only)
    async fn list_all_tracks(&self) -> Result<Vec<RawTrackAttrs>>;

    /// Append a file to the play queue and start playing it right away
    ///
    /// Existing queue entries are neither removed nor reordered.
    async fn enqueue_and_play(&self, filename: &str) -> Result<()>;

    /// Resume (`true`) or pause (`false`) playback
    async fn set_playing(&self, playing: bool) -> Result<()>;

    /// Skip to the next queue entry
    async fn skip_next(&self) -> Result<()>;

    /// Skip to the previous queue entry
    async fn skip_previous(&self) -> Result<()>;

    /// Read the current player status
    async fn get_status(&self) -> Result<PlayerStatus>;

    /// Set the absolute volume (0-100)
    async fn set_volume(&self, volume: u8) -> Result<()>;

    /// Attributes of the currently selected song, if any
    async fn current_track(&self) -> Result<Option<RawTrackAttrs>>;

    /// Liveness check
    async fn ping(&self) -> Result<()>;
}
