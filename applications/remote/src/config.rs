/// Bot configuration
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use soul_mpd::MpdConfig;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when no `--config` is given, if it exists
pub const DEFAULT_CONFIG_FILE: &str = "soul-remote.toml";

/// Environment variable prefix (`SOUL_REMOTE__MPD__HOST`, ...)
pub const ENV_PREFIX: &str = "SOUL_REMOTE";

/// Fallback environment variable for the bot token
pub const TOKEN_ENV_FALLBACK: &str = "TELEGRAM_TOKEN";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RemoteConfig {
    #[serde(default = "default_telegram")]
    pub telegram: TelegramSettings,

    #[serde(default = "default_mpd")]
    pub mpd: MpdSettings,

    #[serde(default = "default_search")]
    pub search: SearchSettings,

    #[serde(default = "default_selection")]
    pub selection: SelectionSettings,

    #[serde(default = "default_liveness")]
    pub liveness: LivenessSettings,

    #[serde(default = "default_library")]
    pub library: LibrarySettings,

    #[serde(default = "default_volume")]
    pub volume: VolumeSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramSettings {
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MpdSettings {
    #[serde(default = "default_mpd_host")]
    pub host: String,

    #[serde(default = "default_mpd_port")]
    pub port: u16,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default = "default_mpd_timeout_ms")]
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchSettings {
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    #[serde(default = "default_max_row_width")]
    pub max_row_width: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SelectionSettings {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LivenessSettings {
    #[serde(default = "default_liveness_interval_secs")]
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// Periodic rebuild interval; 0 builds once at startup
    #[serde(default)]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_retry_interval_secs")]
    pub retry_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VolumeSettings {
    /// Change applied by one up/down tap
    #[serde(default = "default_volume_step")]
    pub step: i64,
}

impl RemoteConfig {
    /// Load configuration from defaults, a TOML file and the environment
    ///
    /// With `path` set the file must exist; otherwise `soul-remote.toml` is
    /// read if present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (SOUL_REMOTE__SECTION__KEY)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let mut config: Self = settings.build()?.try_deserialize()?;

        if config.telegram.token.is_empty() {
            if let Ok(token) = std::env::var(TOKEN_ENV_FALLBACK) {
                config.telegram.token = token;
            }
        }

        Ok(config)
    }

    /// Validate settings every subcommand relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.max_results == 0 {
            return Err(ConfigError::Invalid(
                "search.max_results must be positive".to_string(),
            ));
        }
        if self.search.max_row_width == 0 {
            return Err(ConfigError::Invalid(
                "search.max_row_width must be positive".to_string(),
            ));
        }
        if self.selection.ttl_secs == 0 {
            return Err(ConfigError::Invalid(
                "selection.ttl_secs must be positive".to_string(),
            ));
        }

        let intervals = [
            ("telegram.poll_timeout_secs", self.telegram.poll_timeout_secs),
            ("mpd.timeout_ms", self.mpd.timeout_ms),
            ("selection.sweep_interval_secs", self.selection.sweep_interval_secs),
            ("liveness.interval_secs", self.liveness.interval_secs),
            ("library.retry_interval_secs", self.library.retry_interval_secs),
        ];
        if let Some((name, _)) = intervals.iter().find(|(_, value)| *value == 0) {
            return Err(ConfigError::Invalid(format!("{name} must be positive")));
        }

        if !(1..=100).contains(&self.volume.step) {
            return Err(ConfigError::Invalid(format!(
                "volume.step must be between 1 and 100, got {}",
                self.volume.step
            )));
        }

        Ok(())
    }

    /// Validate settings needed to run the bot
    pub fn validate_for_serve(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if self.telegram.token.trim().is_empty() {
            return Err(ConfigError::Invalid(format!(
                "Telegram token is required (set {ENV_PREFIX}__TELEGRAM__TOKEN or {TOKEN_ENV_FALLBACK})"
            )));
        }
        Ok(())
    }

    /// Connection settings for the MPD client
    pub fn mpd_config(&self) -> MpdConfig {
        let mut mpd = MpdConfig::new(self.mpd.host.clone(), self.mpd.port)
            .with_timeout(self.engine_timeout());
        mpd.password = self.mpd.password.clone().filter(|p| !p.is_empty());
        mpd
    }

    pub fn engine_timeout(&self) -> Duration {
        Duration::from_millis(self.mpd.timeout_ms)
    }
}

// Default values
fn default_telegram() -> TelegramSettings {
    TelegramSettings {
        token: String::new(),
        api_url: default_api_url(),
        poll_timeout_secs: default_poll_timeout_secs(),
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_poll_timeout_secs() -> u64 {
    10
}

fn default_mpd() -> MpdSettings {
    MpdSettings {
        host: default_mpd_host(),
        port: default_mpd_port(),
        password: None,
        timeout_ms: default_mpd_timeout_ms(),
    }
}

fn default_mpd_host() -> String {
    soul_mpd::types::DEFAULT_HOST.to_string()
}

fn default_mpd_port() -> u16 {
    soul_mpd::types::DEFAULT_PORT
}

fn default_mpd_timeout_ms() -> u64 {
    5000
}

fn default_search() -> SearchSettings {
    SearchSettings {
        max_results: default_max_results(),
        max_row_width: default_max_row_width(),
    }
}

fn default_max_results() -> usize {
    10
}

fn default_max_row_width() -> usize {
    5
}

fn default_selection() -> SelectionSettings {
    SelectionSettings {
        ttl_secs: default_ttl_secs(),
        sweep_interval_secs: default_sweep_interval_secs(),
    }
}

fn default_ttl_secs() -> u64 {
    300
}

fn default_sweep_interval_secs() -> u64 {
    60
}

fn default_liveness() -> LivenessSettings {
    LivenessSettings {
        interval_secs: default_liveness_interval_secs(),
    }
}

fn default_liveness_interval_secs() -> u64 {
    15
}

fn default_library() -> LibrarySettings {
    LibrarySettings {
        refresh_interval_secs: 0,
        retry_interval_secs: default_retry_interval_secs(),
    }
}

fn default_retry_interval_secs() -> u64 {
    30
}

fn default_volume() -> VolumeSettings {
    VolumeSettings {
        step: default_volume_step(),
    }
}

fn default_volume_step() -> i64 {
    2
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            telegram: default_telegram(),
            mpd: default_mpd(),
            search: default_search(),
            selection: default_selection(),
            liveness: default_liveness(),
            library: default_library(),
            volume: default_volume(),
        }
    }
}
