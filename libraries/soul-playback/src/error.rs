//! Error types for playback control

use soul_core::EngineError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Requested volume is outside 0-100; the engine was not contacted
    #[error("Invalid volume: {0} (expected 0-100)")]
    InvalidVolume(i64),

    /// Engine could not be reached or did not answer in time
    #[error("Playback engine unreachable: {0}")]
    EngineUnreachable(String),

    /// Engine refused the transition in its current state
    #[error("Invalid player state: {0}")]
    InvalidState(String),

    /// Any other engine failure
    #[error("Playback engine error: {0}")]
    Unknown(EngineError),
}

impl PlaybackError {
    /// Whether the same command may succeed if retried later
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::EngineUnreachable(_))
    }

    /// Whether the caller's input was at fault
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidVolume(_))
    }
}

impl From<EngineError> for PlaybackError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Unreachable(msg) => Self::EngineUnreachable(msg),
            EngineError::Rejected { .. } => Self::InvalidState(err.to_string()),
            other => Self::Unknown(other),
        }
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
