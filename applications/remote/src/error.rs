/// Bot error types
use soul_core::EngineError;
use soul_playback::PlaybackError;
use soul_search::SearchError;
use soul_selection::{LayoutError, ResolveError, SelectionError};
use thiserror::Error;

/// Reply for any failure whose detail stays in the logs
pub const GENERIC_FAILURE: &str = "Your command returns an error.";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gateway unreachable: {0}")]
    Unreachable(String),

    #[error("Bot API error ({code}): {description}")]
    Api { code: i64, description: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Failed to list tracks: {0}")]
    Engine(#[from] EngineError),

    #[error("Listing tracks timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("Build task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Failure of one command, as seen at the handler boundary
///
/// Everything a handler can hit ends up here, and every variant has a short
/// reply for the requester. Internal detail is only ever logged.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Bad user input; the message is shown as is
    #[error("{0}")]
    Validation(String),

    #[error("Playback engine unreachable: {0}")]
    EngineUnreachable(String),

    #[error("Index not ready")]
    IndexUnavailable,

    #[error("Choice no longer valid: {0}")]
    ChoiceInvalid(ResolveError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Internal error: {0}")]
    Unknown(String),
}

impl CommandError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Reply shown to the requester
    pub fn user_message(&self) -> &str {
        match self {
            Self::Validation(msg) => msg,
            Self::EngineUnreachable(_) => {
                "The music player is not reachable right now. Please try again later."
            }
            Self::IndexUnavailable => "The music library is not ready yet. Please try again later.",
            Self::ChoiceInvalid(_) => "That choice is no longer valid.",
            Self::Gateway(_) | Self::Unknown(_) => GENERIC_FAILURE,
        }
    }

    /// Whether the requester, not the system, caused this failure
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::ChoiceInvalid(_))
    }
}

impl From<PlaybackError> for CommandError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::InvalidVolume(_) => {
                Self::validation("The volume should be between 0 and 100.")
            }
            PlaybackError::EngineUnreachable(msg) => Self::EngineUnreachable(msg),
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<SearchError> for CommandError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::IndexUnavailable => Self::IndexUnavailable,
            // Ids from a replaced library generation name nothing reliable
            SearchError::StaleGeneration { .. } | SearchError::TrackNotFound(_) => {
                Self::ChoiceInvalid(ResolveError::Expired)
            }
        }
    }
}

impl From<ResolveError> for CommandError {
    fn from(err: ResolveError) -> Self {
        Self::ChoiceInvalid(err)
    }
}

impl From<SelectionError> for CommandError {
    fn from(err: SelectionError) -> Self {
        Self::Unknown(err.to_string())
    }
}

impl From<LayoutError> for CommandError {
    fn from(err: LayoutError) -> Self {
        Self::Unknown(err.to_string())
    }
}
