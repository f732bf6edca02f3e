//! Soul Remote Core
//!
//! Shared types and traits for Soul Remote, the chat-driven remote control
//! for a music player daemon.
//!
//! This crate provides the foundational building blocks used by the search,
//! selection, playback and bot crates.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `RawTrackAttrs`, `PlayerStatus`
//! - **Identifiers**: `TrackId`, `RequesterId`
//! - **Core Traits**: `PlaybackEngine`, the narrow contract with the player daemon
//! - **Error Handling**: `EngineError` and its `Result` alias
//!
//! # Example
//!
//! ```rust
//! use soul_core::types::{RawTrackAttrs, Track, TrackId};
//!
//! let attrs: RawTrackAttrs = [
//!     ("file", "lofi/beats.flac"),
//!     ("Title", "Lo-Fi Beats"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let track = Track::from_attrs(TrackId::from_position(0), &attrs).unwrap();
//! assert_eq!(track.id.as_str(), "m-0");
//! assert_eq!(track.title, "Lo-Fi Beats");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{EngineError, Result};
pub use traits::PlaybackEngine;

pub use types::{
    PlayState, PlayerStatus, RawTrackAttrs, RequesterId, Track, TrackError, TrackId,
};
