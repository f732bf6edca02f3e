//! Soul Remote Library
//!
//! Chat bot that searches an MPD library and controls playback.
//!
//! This library exposes the bot's components for the binary and for testing.

pub mod commands;
pub mod config;
pub mod error;
pub mod gateway;
pub mod jobs;
pub mod runtime;
pub mod state;

// Re-export commonly used types for convenience
pub use config::RemoteConfig;
pub use error::{CommandError, ConfigError, GatewayError, RefreshError};
pub use gateway::{EventSource, InboundEvent, MessagingGateway, TelegramGateway};
pub use state::{AppState, CommandSettings};
