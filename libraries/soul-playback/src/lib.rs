//! Soul Remote - Playback Control
//!
//! Bounded state transitions against a [`PlaybackEngine`](soul_core::PlaybackEngine).
//!
//! This crate provides:
//! - Transport control (play, pause, next, previous, play a file)
//! - Absolute volume with fail-fast validation (0-100)
//! - Relative volume adjustment with saturating arithmetic
//! - A timeout around every engine call, so a stuck engine surfaces as
//!   `EngineUnreachable` instead of hanging the caller
//! - Translation of engine failures into `EngineUnreachable`,
//!   `InvalidState` and `Unknown`
//!
//! Player state is never cached: every read goes to the engine.
//!
//! # Example
//!
//! ```rust,no_run
//! use soul_playback::PlaybackController;
//! use soul_core::PlaybackEngine;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example(engine: Arc<dyn PlaybackEngine>) -> soul_playback::Result<()> {
//! let controller = PlaybackController::new(engine, Duration::from_secs(5));
//!
//! controller.play_track("jazz/so_what.flac").await?;
//! let volume = controller.adjust_volume(2).await?;
//! println!("Volume is now {volume}");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod controller;
mod error;
mod volume;

pub use controller::{PlaybackController, DEFAULT_ENGINE_TIMEOUT};
pub use error::{PlaybackError, Result};
pub use volume::Volume;
