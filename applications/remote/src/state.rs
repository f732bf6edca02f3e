/// Shared application state
use crate::config::RemoteConfig;
use crate::gateway::MessagingGateway;
use soul_playback::PlaybackController;
use soul_search::SearchLibrary;
use soul_selection::SelectionRegistry;
use std::sync::Arc;

/// Tunables the command handlers read on every request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSettings {
    pub max_results: usize,
    pub max_row_width: usize,
    pub volume_step: i64,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self::from(&RemoteConfig::default())
    }
}

impl From<&RemoteConfig> for CommandSettings {
    fn from(config: &RemoteConfig) -> Self {
        Self {
            max_results: config.search.max_results,
            max_row_width: config.search.max_row_width,
            volume_step: config.volume.step,
        }
    }
}

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<SearchLibrary>,
    pub selections: Arc<SelectionRegistry>,
    pub playback: PlaybackController,
    pub gateway: Arc<dyn MessagingGateway>,
    pub settings: CommandSettings,
}

impl AppState {
    pub fn new(
        library: Arc<SearchLibrary>,
        selections: Arc<SelectionRegistry>,
        playback: PlaybackController,
        gateway: Arc<dyn MessagingGateway>,
        settings: CommandSettings,
    ) -> Self {
        Self {
            library,
            selections,
            playback,
            gateway,
            settings,
        }
    }
}
