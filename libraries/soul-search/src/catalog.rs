//! Track catalog: `TrackId` -> `Track`

use soul_core::{Track, TrackId};
use std::collections::BTreeMap;

/// Immutable map of every indexed track
///
/// Built together with the index in one pass, so every id here has exactly
/// one document in the matching index and vice versa.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tracks: BTreeMap<TrackId, Track>,
}

impl Catalog {
    pub(crate) fn from_tracks(tracks: BTreeMap<TrackId, Track>) -> Self {
        Self { tracks }
    }

    /// Look up a track by id
    pub fn get(&self, id: &TrackId) -> Option<&Track> {
        self.tracks.get(id)
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.tracks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in id order
    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }
}
