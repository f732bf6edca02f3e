/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Attribute key holding the engine-relative file name
pub const FILE_KEY: &str = "file";
/// Attribute key holding the track title
pub const TITLE_KEY: &str = "Title";
/// Attribute key holding the artist name
pub const ARTIST_KEY: &str = "Artist";
/// Attribute key holding the album name
pub const ALBUM_KEY: &str = "Album";

/// Raw attribute map for one library entry, as reported by the engine
///
/// Keys are matched case-insensitively. When the engine repeats a key
/// (multi-artist tags, for instance) the first value wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawTrackAttrs(BTreeMap<String, String>);

impl RawTrackAttrs {
    /// Create an empty attribute map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value unless the key is already present
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if self.get(&key).is_none() {
            self.0.insert(key, value.into());
        }
    }

    /// Look up a value by key, ignoring ASCII case
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// Engine-relative file name
    pub fn file(&self) -> Option<&str> {
        self.get(FILE_KEY)
    }

    /// Track title
    pub fn title(&self) -> Option<&str> {
        self.get(TITLE_KEY)
    }

    /// Number of attributes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no attributes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawTrackAttrs
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Self::new();
        for (key, value) in iter {
            attrs.insert(key, value);
        }
        attrs
    }
}

/// Reasons a raw entry cannot become a `Track`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackError {
    /// Entry has no file name (directories, playlists)
    #[error("entry has no file")]
    MissingFile,

    /// Entry has no usable title
    #[error("{file} has no title")]
    MissingTitle { file: String },
}

/// Library track
///
/// Immutable once built; one instance per catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Identifier, unique within one index build
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Engine-relative file name, used to enqueue the track
    pub filename: String,

    /// Artist name
    pub artist: Option<String>,

    /// Album name
    pub album: Option<String>,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(id: TrackId, title: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            filename: filename.into(),
            artist: None,
            album: None,
        }
    }

    /// Build a track from raw engine attributes
    ///
    /// # Errors
    /// Returns an error if the entry has no file or a blank title
    pub fn from_attrs(id: TrackId, attrs: &RawTrackAttrs) -> Result<Self, TrackError> {
        let filename = attrs
            .file()
            .filter(|f| !f.trim().is_empty())
            .ok_or(TrackError::MissingFile)?;

        let title = attrs
            .title()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TrackError::MissingTitle {
                file: filename.to_string(),
            })?;

        Ok(Self {
            id,
            title: title.to_string(),
            filename: filename.to_string(),
            artist: non_blank(attrs.get(ARTIST_KEY)),
            album: non_blank(attrs.get(ALBUM_KEY)),
        })
    }

    /// Title with the artist appended when known
    pub fn display_name(&self) -> String {
        match &self.artist {
            Some(artist) => format!("{} - {}", self.title, artist),
            None => self.title.clone(),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
