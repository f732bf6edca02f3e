//! Soul Remote - MPD Client
//!
//! Talks to a Music Player Daemon over its text protocol and exposes it as a
//! [`PlaybackEngine`](soul_core::PlaybackEngine).
//!
//! The connection is opened lazily, reused across calls, and dropped on any
//! I/O failure so the next call reconnects. Every exchange is bounded by the
//! configured timeout.
//!
//! # Example
//!
//! ```ignore
//! use soul_core::PlaybackEngine;
//! use soul_mpd::{MpdClient, MpdConfig};
//!
//! let client = MpdClient::new(MpdConfig::default());
//! client.ping().await?;
//!
//! let tracks = client.list_all_tracks().await?;
//! println!("Library has {} entries", tracks.len());
//! ```

pub mod client;
mod connection;
pub mod error;
pub mod protocol;
pub mod types;

pub use client::MpdClient;
pub use error::{MpdError, Result};
pub use types::MpdConfig;
