//! Query-string parsing
//!
//! Supported syntax, loosely modelled on classic query strings:
//! - `word` should match
//! - `+word` must match, `-word` must not match
//! - `"two words"` must appear adjacent, in order
//! - `title:word`, `artist:word`, `album:word` restrict a clause to one field
//!
//! Parsing never fails. Anything that does not fit the grammar (an unclosed
//! quote, an unknown field, a lone operator) is read as plain text and goes
//! through the analyzer like any other word.

use crate::analyzer::{analyze, Token};
use crate::index::Field;

/// How a clause participates in matching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occur {
    Should,
    Must,
    MustNot,
}

/// One parsed query clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    /// Matching mode
    pub occur: Occur,
    /// Field restriction, `None` searches every field
    pub field: Option<Field>,
    /// Analyzed terms
    pub tokens: Vec<Token>,
    /// Whether the terms must appear adjacent and in order
    pub phrase: bool,
}

impl Clause {
    /// Terms used for adjacency checks (joined compounds excluded)
    pub fn phrase_terms(&self) -> impl Iterator<Item = &str> {
        self.tokens
            .iter()
            .filter(|t| !t.is_compound())
            .map(|t| t.text.as_str())
    }
}

/// Parsed query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Clauses in input order
    pub clauses: Vec<Clause>,
}

impl Query {
    /// Parse a query string
    pub fn parse(input: &str) -> Self {
        let mut clauses = Vec::new();
        let mut rest = input.trim_start();

        while !rest.is_empty() {
            let (raw, remaining) = next_raw_clause(rest);
            rest = remaining.trim_start();

            let tokens = analyze(raw.text);
            if tokens.is_empty() {
                continue;
            }

            // A single analyzed word in quotes is just a word
            let phrase = raw.phrase && tokens.iter().filter(|t| !t.is_compound()).count() > 1;

            clauses.push(Clause {
                occur: raw.occur,
                field: raw.field,
                tokens,
                phrase,
            });
        }

        Self { clauses }
    }

    /// Whether nothing searchable was left after analysis
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// Whether at least one clause can produce matches
    pub fn has_positive_clause(&self) -> bool {
        self.clauses.iter().any(|c| c.occur != Occur::MustNot)
    }
}

struct RawClause<'a> {
    occur: Occur,
    field: Option<Field>,
    text: &'a str,
    phrase: bool,
}

/// Split off the next clause; `input` is non-empty and starts with non-whitespace
fn next_raw_clause(input: &str) -> (RawClause<'_>, &str) {
    let mut cursor = input;

    let mut occur = Occur::Should;
    if let Some(stripped) = strip_operator(cursor, '+') {
        occur = Occur::Must;
        cursor = stripped;
    } else if let Some(stripped) = strip_operator(cursor, '-') {
        occur = Occur::MustNot;
        cursor = stripped;
    }

    let mut field = None;
    if let Some((name, after)) = cursor.split_once(':') {
        if let Some(parsed) = Field::from_name(name) {
            if after.starts_with(|c: char| !c.is_whitespace()) {
                field = Some(parsed);
                cursor = after;
            }
        }
    }

    if let Some(quoted) = cursor.strip_prefix('"') {
        if let Some(end) = quoted.find('"') {
            let raw = RawClause {
                occur,
                field,
                text: &quoted[..end],
                phrase: true,
            };
            return (raw, &quoted[end + 1..]);
        }
        // Unclosed quote: keep reading plain words
        cursor = quoted;
    }

    let end = cursor.find(char::is_whitespace).unwrap_or(cursor.len());
    let raw = RawClause {
        occur,
        field,
        text: &cursor[..end],
        phrase: false,
    };
    (raw, &cursor[end..])
}

/// Strip a leading operator only when something follows it
fn strip_operator(input: &str, op: char) -> Option<&str> {
    input
        .strip_prefix(op)
        .filter(|rest| rest.starts_with(|c: char| !c.is_whitespace()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(clause: &Clause) -> Vec<&str> {
        clause.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn bare_words_are_should_clauses() {
        let query = Query::parse("miles davis");
        assert_eq!(query.clauses.len(), 2);
        assert!(query.clauses.iter().all(|c| c.occur == Occur::Should));
        assert_eq!(words(&query.clauses[0]), vec!["miles"]);
    }

    #[test]
    fn operators_and_fields() {
        let query = Query::parse("+blue -live artist:Davis");
        assert_eq!(query.clauses[0].occur, Occur::Must);
        assert_eq!(query.clauses[1].occur, Occur::MustNot);
        assert_eq!(query.clauses[2].field, Some(Field::Artist));
        assert_eq!(words(&query.clauses[2]), vec!["davis"]);
    }

    #[test]
    fn quoted_phrase() {
        let query = Query::parse("title:\"so what\" kind");
        assert_eq!(query.clauses.len(), 2);
        assert!(query.clauses[0].phrase);
        assert_eq!(query.clauses[0].field, Some(Field::Title));
        assert_eq!(words(&query.clauses[0]), vec!["so", "what"]);
        assert!(!query.clauses[1].phrase);
    }

    #[test]
    fn malformed_syntax_degrades_to_words() {
        let unclosed = Query::parse("\"so what");
        assert_eq!(unclosed.clauses.len(), 2);
        assert!(unclosed.clauses.iter().all(|c| !c.phrase));

        let unknown_field = Query::parse("genre:jazz");
        assert_eq!(unknown_field.clauses[0].field, None);
        assert_eq!(
            words(&unknown_field.clauses[0]),
            vec!["genrejazz", "genre", "jazz"]
        );

        let lone_ops = Query::parse("+ - : \"\"");
        assert!(lone_ops.is_empty());

        let brackets = Query::parse("((jazz]] AND~");
        assert_eq!(brackets.clauses.len(), 2);
    }

    #[test]
    fn exclusions_only_has_no_positive_clause() {
        assert!(!Query::parse("-live -remix").has_positive_clause());
        assert!(Query::parse("-live jazz").has_positive_clause());
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(Query::parse("").is_empty());
        assert!(Query::parse("    ").is_empty());
    }
}
