/// Engine-facing error types for Soul Remote
use thiserror::Error;

/// Result type alias using `EngineError`
pub type Result<T> = std::result::Result<T, EngineError>;

/// Failure reported by a playback engine implementation
///
/// Implementations classify their native failures into these buckets so
/// callers can tell transient infrastructure trouble apart from a command
/// the engine refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Connection could not be established, was lost, or timed out
    #[error("Engine unreachable: {0}")]
    Unreachable(String),

    /// Engine understood the command but refused it in its current state
    #[error("Engine rejected {command}: {message}")]
    Rejected { command: String, message: String },

    /// Engine answered with something we could not interpret
    #[error("Engine protocol error: {0}")]
    Protocol(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl EngineError {
    /// Create an unreachable error
    pub fn unreachable(msg: impl Into<String>) -> Self {
        Self::Unreachable(msg.into())
    }

    /// Create a rejected error
    pub fn rejected(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Rejected {
            command: command.into(),
            message: message.into(),
        }
    }

    /// Create a protocol error
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Whether retrying the same call later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}
