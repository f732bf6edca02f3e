//! Soul Remote - Track Search
//!
//! In-memory full-text index over the engine's track metadata.
//!
//! This crate provides:
//! - A normalizing analyzer (Unicode word segmentation, diacritic folding, lowercasing)
//! - The track catalog (`TrackId` -> `Track`) built alongside the index
//! - A query-string parser that never fails on malformed input
//! - TF-IDF ranking with deterministic tie-breaking
//! - `SearchLibrary`, which publishes each catalog/index generation atomically
//!
//! # Example
//!
//! ```rust
//! use soul_core::RawTrackAttrs;
//! use soul_search::{SearchLibrary, SearchRequest};
//!
//! let snapshot: Vec<RawTrackAttrs> = vec![
//!     [("file", "a.flac"), ("Title", "Lo-Fi Beats")].into_iter().collect(),
//!     [("file", "b.flac"), ("Title", "Lofi Dreams")].into_iter().collect(),
//! ];
//!
//! let library = SearchLibrary::new();
//! library.rebuild(&snapshot);
//!
//! let page = library.search(&SearchRequest::new("lofi")).unwrap();
//! assert_eq!(page.total, 2);
//! ```

mod analyzer;
mod catalog;
mod error;
mod index;
mod library;
mod query;

pub use analyzer::{analyze, fold_diacritics, Token};
pub use catalog::Catalog;
pub use error::{Result, SearchError};
pub use index::{build, BuildReport, Field, Index, SearchHit};
pub use library::{LibrarySnapshot, PageHit, SearchLibrary, SearchPage, SearchRequest};
pub use query::{Clause, Occur, Query};
