//! Configuration types for the MPD client.

use std::time::Duration;

/// Default MPD host
pub const DEFAULT_HOST: &str = "localhost";
/// Default MPD port
pub const DEFAULT_PORT: u16 = 6600;
/// Default bound on one request/response exchange
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for an MPD server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MpdConfig {
    pub host: String,
    pub port: u16,
    /// Sent with `password` right after connecting, when set
    pub password: Option<String>,
    /// Bound on connecting plus one command exchange
    pub timeout: Duration,
}

impl Default for MpdConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            password: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl MpdConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// `host:port` for connecting
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
