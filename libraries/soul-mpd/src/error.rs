//! Error types for the MPD client.

use soul_core::EngineError;
use thiserror::Error;

/// ACK codes meaning the server refused the command in its current state
/// (`ACK_ERROR_ARG`, `ACK_ERROR_NO_EXIST`, `ACK_ERROR_PLAYER_SYNC`)
const STATE_ACK_CODES: [u32; 3] = [2, 50, 55];

/// Errors that can occur when talking to MPD.
#[derive(Error, Debug)]
pub enum MpdError {
    /// Socket failure (connect, read, write)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Connecting or one exchange took longer than allowed
    #[error("Timed out after {0}ms")]
    Timeout(u64),

    /// Server closed the connection
    #[error("Connection closed by server")]
    Closed,

    /// Server answered with `ACK [code@index] {command} message`
    #[error("MPD refused {command} (code {code}): {message}")]
    Ack {
        code: u32,
        command: String,
        message: String,
    },

    /// Server sent something that is not valid protocol
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl MpdError {
    /// Whether the connection must be dropped after this error
    pub fn breaks_connection(&self) -> bool {
        !matches!(self, Self::Ack { .. })
    }
}

impl From<MpdError> for EngineError {
    fn from(err: MpdError) -> Self {
        match err {
            MpdError::Io(_) | MpdError::Timeout(_) | MpdError::Closed => {
                EngineError::unreachable(err.to_string())
            }
            MpdError::Ack {
                code,
                command,
                message,
            } if STATE_ACK_CODES.contains(&code) => EngineError::rejected(command, message),
            MpdError::Ack { .. } => EngineError::Other(err.to_string()),
            MpdError::Protocol(msg) => EngineError::protocol(msg),
        }
    }
}

/// Result type for MPD operations.
pub type Result<T> = std::result::Result<T, MpdError>;
