//! Volume level (0-100)

use crate::error::{PlaybackError, Result};
use serde::Serialize;
use std::fmt;

/// Validated volume level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Volume(u8);

impl Volume {
    pub const MIN: Volume = Volume(0);
    pub const MAX: Volume = Volume(100);

    /// Validate an absolute level
    ///
    /// # Errors
    /// Returns `InvalidVolume` if `level` is outside 0-100
    pub fn new(level: i64) -> Result<Self> {
        u8::try_from(level)
            .ok()
            .filter(|l| *l <= Self::MAX.0)
            .map(Self)
            .ok_or(PlaybackError::InvalidVolume(level))
    }

    /// Volume reported by the engine, clamped into range
    pub fn from_engine(level: u8) -> Self {
        Self(level.min(Self::MAX.0))
    }

    /// Add `delta`, saturating at 0 and 100
    #[must_use]
    pub fn saturating_add(self, delta: i64) -> Self {
        let level = i64::from(self.0).saturating_add(delta).clamp(0, 100);
        Self(u8::try_from(level).unwrap_or(Self::MAX.0))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
