//! Error types for track search

use soul_core::TrackId;
use thiserror::Error;

/// Search errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// No index has been published yet
    #[error("Index not ready")]
    IndexUnavailable,

    /// A track id was minted by a different index generation
    #[error("Index generation {requested} was replaced by {current}")]
    StaleGeneration { requested: u64, current: u64 },

    /// Track id is not in the current catalog
    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
