//! Inverted index over track metadata
//!
//! Built once per library snapshot and never mutated afterwards. Ranking is
//! plain TF-IDF: every matched term contributes `sqrt(tf) * idf^2`, and the
//! total is scaled by the fraction of optional clauses that matched.

use crate::analyzer::analyze;
use crate::catalog::Catalog;
use crate::query::{Clause, Occur, Query};
use serde::Serialize;
use soul_core::{RawTrackAttrs, Track, TrackId};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, warn};

/// Indexed metadata field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Title,
    Artist,
    Album,
}

impl Field {
    /// All indexed fields
    pub const ALL: [Field; 3] = [Field::Title, Field::Artist, Field::Album];

    /// Field name as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Artist => "artist",
            Self::Album => "album",
        }
    }

    /// Parse a query-string field name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
    }

    fn value(self, track: &Track) -> Option<&str> {
        match self {
            Self::Title => Some(track.title.as_str()),
            Self::Artist => track.artist.as_deref(),
            Self::Album => track.album.as_deref(),
        }
    }
}

/// Ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub track_id: TrackId,
    pub score: f64,
}

/// Outcome of an index build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// Entries in the engine snapshot
    pub total: usize,
    /// Entries indexed and added to the catalog
    pub indexed: usize,
    /// Entries skipped because they could not become a document
    pub skipped: usize,
}

type DocIdx = u32;

/// Term occurrence: word position plus number of positions covered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Occurrence {
    position: u32,
    span: u32,
}

#[derive(Debug, Clone)]
struct Posting {
    doc: DocIdx,
    field: Field,
    occurrences: Vec<Occurrence>,
}

/// Read-only inverted index
#[derive(Debug, Clone, Default)]
pub struct Index {
    docs: Vec<TrackId>,
    postings: HashMap<String, Vec<Posting>>,
    doc_freq: HashMap<String, u32>,
}

/// Build the catalog and index from a full engine snapshot
///
/// Track ids come from each entry's position in `snapshot`. Entries that
/// cannot become a document (no file, no title, a title with nothing
/// searchable in it) are logged and skipped; they never abort the build.
pub fn build(snapshot: &[RawTrackAttrs]) -> (Catalog, Index, BuildReport) {
    let mut tracks = BTreeMap::new();
    let mut index = Index::default();
    let mut report = BuildReport {
        total: snapshot.len(),
        ..BuildReport::default()
    };

    for (position, attrs) in snapshot.iter().enumerate() {
        let id = TrackId::from_position(position);
        let track = match Track::from_attrs(id, attrs) {
            Ok(track) => track,
            Err(e) => {
                warn!(position, error = %e, "Skipping library entry");
                report.skipped += 1;
                continue;
            }
        };

        if !index.add_document(&track) {
            warn!(file = %track.filename, title = %track.title, "Skipping track with unsearchable title");
            report.skipped += 1;
            continue;
        }

        tracks.insert(track.id.clone(), track);
        report.indexed += 1;
    }

    debug!(
        total = report.total,
        indexed = report.indexed,
        skipped = report.skipped,
        terms = index.postings.len(),
        "Index built"
    );

    (Catalog::from_tracks(tracks), index, report)
}

impl Index {
    /// Number of indexed documents
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether no documents are indexed
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Whether a document with this id is indexed
    pub fn contains(&self, id: &TrackId) -> bool {
        self.docs.contains(id)
    }

    /// Add one document; returns `false` (and adds nothing) if the title
    /// analyzes to no terms
    fn add_document(&mut self, track: &Track) -> bool {
        let fields: Vec<(Field, Vec<crate::analyzer::Token>)> = Field::ALL
            .into_iter()
            .filter_map(|field| field.value(track).map(|v| (field, analyze(v))))
            .collect();

        let title_searchable = fields
            .iter()
            .any(|(field, tokens)| *field == Field::Title && !tokens.is_empty());
        if !title_searchable {
            return false;
        }

        let Ok(doc) = DocIdx::try_from(self.docs.len()) else {
            return false;
        };
        self.docs.push(track.id.clone());

        let mut seen_terms = HashSet::new();
        for (field, tokens) in fields {
            let mut by_term: BTreeMap<String, Vec<Occurrence>> = BTreeMap::new();
            for token in tokens {
                by_term.entry(token.text).or_default().push(Occurrence {
                    position: token.position,
                    span: token.span,
                });
            }

            for (term, occurrences) in by_term {
                if seen_terms.insert(term.clone()) {
                    *self.doc_freq.entry(term.clone()).or_insert(0) += 1;
                }
                self.postings.entry(term).or_default().push(Posting {
                    doc,
                    field,
                    occurrences,
                });
            }
        }

        true
    }

    /// Run a query string against the index
    ///
    /// Results are ordered best score first, ties broken by ascending track
    /// id. Blank input, or input that analyzes to nothing, matches nothing.
    pub fn query(&self, text: &str) -> Vec<SearchHit> {
        let query = Query::parse(text);
        if !query.has_positive_clause() {
            return Vec::new();
        }
        self.execute(&query)
    }

    fn execute(&self, query: &Query) -> Vec<SearchHit> {
        let mut must: Vec<HashMap<DocIdx, f64>> = Vec::new();
        let mut should: Vec<HashMap<DocIdx, f64>> = Vec::new();
        let mut excluded: HashSet<DocIdx> = HashSet::new();

        for clause in &query.clauses {
            let scores = self.score_clause(clause);
            match clause.occur {
                Occur::Must => must.push(scores),
                Occur::Should => should.push(scores),
                Occur::MustNot => excluded.extend(scores.into_keys()),
            }
        }

        let candidates: HashSet<DocIdx> = if let Some((first, rest)) = must.split_first() {
            first
                .keys()
                .filter(|doc| rest.iter().all(|m| m.contains_key(doc)))
                .copied()
                .collect()
        } else {
            should.iter().flat_map(|s| s.keys().copied()).collect()
        };

        let optional_total = should.len() + must.len();
        let mut hits: Vec<SearchHit> = candidates
            .into_iter()
            .filter(|doc| !excluded.contains(doc))
            .filter_map(|doc| {
                let must_score: f64 = must.iter().filter_map(|m| m.get(&doc)).sum();
                let mut matched = must.len();
                let mut should_score = 0.0;
                for s in &should {
                    if let Some(score) = s.get(&doc) {
                        should_score += score;
                        matched += 1;
                    }
                }

                let coord = matched as f64 / optional_total as f64;
                let score = (must_score + should_score) * coord;
                let track_id = self.docs.get(doc as usize)?.clone();
                Some(SearchHit { track_id, score })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.track_id.cmp(&b.track_id))
        });
        hits
    }

    fn idf(&self, term: &str) -> f64 {
        let df = f64::from(self.doc_freq.get(term).copied().unwrap_or(0));
        let n = self.docs.len() as f64;
        1.0 + (n / (df + 1.0)).ln()
    }

    fn term_weight(&self, term: &str, occurrences: usize) -> f64 {
        let idf = self.idf(term);
        let tf = occurrences as f64;
        tf.sqrt() * idf * idf
    }

    fn field_postings<'a>(
        &'a self,
        term: &str,
        field: Option<Field>,
    ) -> impl Iterator<Item = &'a Posting> {
        self.postings
            .get(term)
            .into_iter()
            .flatten()
            .filter(move |p| field.map_or(true, |f| p.field == f))
    }

    /// Per-document score for one clause; absent documents did not match
    fn score_clause(&self, clause: &Clause) -> HashMap<DocIdx, f64> {
        if clause.phrase {
            return self.score_phrase(clause);
        }

        let mut scores: HashMap<DocIdx, f64> = HashMap::new();
        let mut terms_seen = HashSet::new();
        for token in &clause.tokens {
            if !terms_seen.insert(token.text.as_str()) {
                continue;
            }
            for posting in self.field_postings(&token.text, clause.field) {
                let weight = self.term_weight(&token.text, posting.occurrences.len());
                *scores.entry(posting.doc).or_insert(0.0) += weight;
            }
        }
        scores
    }

    fn score_phrase(&self, clause: &Clause) -> HashMap<DocIdx, f64> {
        let terms: Vec<&str> = clause.phrase_terms().collect();
        let mut scores = HashMap::new();
        let Some((first, _)) = terms.split_first() else {
            return scores;
        };

        // (doc, field) -> occurrences, one map per phrase term
        let lookups: Vec<HashMap<(DocIdx, Field), &Posting>> = terms
            .iter()
            .map(|term| {
                self.field_postings(term, clause.field)
                    .map(|p| ((p.doc, p.field), p))
                    .collect()
            })
            .collect();

        for posting in self.field_postings(first, clause.field) {
            let key = (posting.doc, posting.field);
            let Some(per_term) = lookups
                .iter()
                .map(|lookup| lookup.get(&key).map(|p| p.occurrences.as_slice()))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };

            if phrase_matches(&per_term) {
                let weight: f64 = terms
                    .iter()
                    .zip(&per_term)
                    .map(|(term, occ)| self.term_weight(term, occ.len()))
                    .sum();
                let entry = scores.entry(posting.doc).or_insert(0.0);
                if weight > *entry {
                    *entry = weight;
                }
            }
        }
        scores
    }
}

/// Whether some chain of occurrences places each term right after the previous one
fn phrase_matches(per_term: &[&[Occurrence]]) -> bool {
    fn follows(per_term: &[&[Occurrence]], expected: u32) -> bool {
        let Some((occurrences, rest)) = per_term.split_first() else {
            return true;
        };
        occurrences
            .iter()
            .filter(|o| o.position == expected)
            .any(|o| follows(rest, o.position.saturating_add(o.span)))
    }

    let Some((first, rest)) = per_term.split_first() else {
        return false;
    };
    first
        .iter()
        .any(|o| follows(rest, o.position.saturating_add(o.span)))
}
