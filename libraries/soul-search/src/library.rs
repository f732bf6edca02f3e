//! Generation-tracked catalog/index pair
//!
//! Rebuilds happen off to the side and are published with a single pointer
//! swap: readers see either the complete old pair or the complete new one,
//! never a mix.

use crate::catalog::Catalog;
use crate::error::{Result, SearchError};
use crate::index::{build, BuildReport, Index, SearchHit};
use arc_swap::ArcSwapOption;
use serde::Serialize;
use soul_core::{RawTrackAttrs, Track, TrackId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Default page size for searches
pub const DEFAULT_LIMIT: usize = 10;

/// One published catalog/index generation
#[derive(Debug)]
pub struct LibrarySnapshot {
    /// Monotonic generation number, starting at 1
    pub generation: u64,
    pub catalog: Catalog,
    pub index: Index,
    /// Outcome of the build that produced this generation
    pub report: BuildReport,
}

/// Search input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub text: String,
    pub offset: usize,
    pub limit: usize,
}

impl SearchRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }

    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

/// Hit resolved against the catalog
#[derive(Debug, Clone, Serialize)]
pub struct PageHit {
    pub track: Track,
    pub score: f64,
}

/// One page of ranked results
#[derive(Debug, Clone, Serialize)]
pub struct SearchPage {
    /// Generation the hits belong to
    pub generation: u64,
    /// Total number of matches before paging
    pub total: usize,
    pub hits: Vec<PageHit>,
}

/// Owner of the current library generation
#[derive(Debug, Default)]
pub struct SearchLibrary {
    current: ArcSwapOption<LibrarySnapshot>,
    next_generation: AtomicU64,
    build_lock: Mutex<()>,
}

impl SearchLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a new generation from an engine snapshot and publish it
    ///
    /// Concurrent rebuilds are serialized so generations are published in
    /// the order they were numbered. Searches keep running against the old
    /// generation until the swap.
    pub fn rebuild(&self, snapshot: &[RawTrackAttrs]) -> BuildReport {
        let _guard = self
            .build_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let (catalog, index, report) = build(snapshot);
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.current.store(Some(Arc::new(LibrarySnapshot {
            generation,
            catalog,
            index,
            report,
        })));

        info!(
            generation,
            indexed = report.indexed,
            skipped = report.skipped,
            "Library generation published"
        );
        report
    }

    /// Current generation, 0 before the first publish
    pub fn generation(&self) -> u64 {
        self.current
            .load()
            .as_ref()
            .map_or(0, |snapshot| snapshot.generation)
    }

    /// Whether a generation has been published
    pub fn is_ready(&self) -> bool {
        self.current.load().is_some()
    }

    /// Current catalog/index pair
    pub fn snapshot(&self) -> Result<Arc<LibrarySnapshot>> {
        self.current.load_full().ok_or(SearchError::IndexUnavailable)
    }

    /// All hits for a query string, best first
    pub fn query(&self, text: &str) -> Result<Vec<SearchHit>> {
        Ok(self.snapshot()?.index.query(text))
    }

    /// Ranked, paged, catalog-resolved search
    pub fn search(&self, request: &SearchRequest) -> Result<SearchPage> {
        let snapshot = self.snapshot()?;
        let hits = snapshot.index.query(&request.text);
        let total = hits.len();

        let hits = hits
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .filter_map(|hit| {
                snapshot.catalog.get(&hit.track_id).map(|track| PageHit {
                    track: track.clone(),
                    score: hit.score,
                })
            })
            .collect();

        Ok(SearchPage {
            generation: snapshot.generation,
            total,
            hits,
        })
    }

    /// Look up a track minted by a specific generation
    ///
    /// Ids are positional, so an id from an older generation may now name a
    /// different track. Those lookups fail with `StaleGeneration`.
    pub fn lookup(&self, generation: u64, id: &TrackId) -> Result<Track> {
        let snapshot = self.snapshot()?;
        if snapshot.generation != generation {
            return Err(SearchError::StaleGeneration {
                requested: generation,
                current: snapshot.generation,
            });
        }
        snapshot
            .catalog
            .get(id)
            .cloned()
            .ok_or_else(|| SearchError::TrackNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(file: &str, title: &str) -> RawTrackAttrs {
        [("file", file), ("Title", title)].into_iter().collect()
    }

    #[test]
    fn not_ready_before_first_build() {
        let library = SearchLibrary::new();
        assert!(!library.is_ready());
        assert_eq!(library.generation(), 0);
        assert_eq!(
            library.search(&SearchRequest::new("x")).unwrap_err(),
            SearchError::IndexUnavailable
        );
    }

    #[test]
    fn generations_increase() {
        let library = SearchLibrary::new();
        library.rebuild(&[entry("a.flac", "One")]);
        assert_eq!(library.generation(), 1);
        library.rebuild(&[]);
        assert_eq!(library.generation(), 2);
        assert!(library.is_ready());
    }

    #[test]
    fn paging() {
        let library = SearchLibrary::new();
        let snapshot: Vec<_> = (0..15)
            .map(|i| entry(&format!("{i}.flac"), &format!("Jazz {i}")))
            .collect();
        library.rebuild(&snapshot);

        let first = library.search(&SearchRequest::new("jazz")).unwrap();
        assert_eq!(first.total, 15);
        assert_eq!(first.hits.len(), 10);

        let second = library
            .search(&SearchRequest::new("jazz").with_offset(10))
            .unwrap();
        assert_eq!(second.hits.len(), 5);
    }

    #[test]
    fn lookup_rejects_other_generations() {
        let library = SearchLibrary::new();
        library.rebuild(&[entry("a.flac", "One")]);
        let id = TrackId::from_position(0);
        assert_eq!(library.lookup(1, &id).unwrap().title, "One");

        library.rebuild(&[entry("b.flac", "Two")]);
        assert_eq!(
            library.lookup(1, &id).unwrap_err(),
            SearchError::StaleGeneration {
                requested: 1,
                current: 2
            }
        );
        assert_eq!(
            library.lookup(2, &TrackId::new("m-9")).unwrap_err(),
            SearchError::TrackNotFound(TrackId::new("m-9"))
        );
    }
}
