/// Player status types, as observed from the engine
use serde::{Deserialize, Serialize};

/// Transport state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayState {
    #[default]
    Stop,
    Play,
    Pause,
}

impl PlayState {
    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Play => "play",
            Self::Pause => "pause",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "stop" => Some(Self::Stop),
            "play" => Some(Self::Play),
            "pause" => Some(Self::Pause),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of the engine's player state
///
/// Never cached: every request re-reads it from the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Volume level (0-100), `None` when the engine has no mixer
    pub volume: Option<u8>,

    /// Transport state
    pub state: PlayState,

    /// Engine id of the selected queue entry
    pub song_id: Option<u32>,

    /// Number of entries in the play queue
    pub queue_length: u32,
}

impl PlayerStatus {
    /// Whether audio is currently playing
    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Play
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_state_round_trips_through_str() {
        for state in [PlayState::Stop, PlayState::Play, PlayState::Pause] {
            assert_eq!(PlayState::from_str(state.as_str()), Some(state));
        }
        assert_eq!(PlayState::from_str("rewind"), None);
    }

    #[test]
    fn default_status_is_stopped() {
        let status = PlayerStatus::default();
        assert!(!status.is_playing());
        assert!(status.volume.is_none());
    }
}
