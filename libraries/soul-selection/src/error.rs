//! Error types for selection and layout

use thiserror::Error;

/// Errors creating a choice set
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// A choice set needs at least one hit
    #[error("Nothing to choose from")]
    Empty,
}

/// Outcome of a failed token resolution
///
/// All three are reported to the requester the same way; they are kept
/// apart for logging and tests.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// Token is malformed or names no slot in the set
    #[error("Choice not found")]
    NotFound,

    /// Set was replaced, timed out, or belongs to an older library
    #[error("Choice expired")]
    Expired,

    /// Set already resolved once
    #[error("Choice already used")]
    AlreadyConsumed,
}

/// Layout errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
