//! The basic unit of TF-IDF: a stemmed ngram plus every place it occurred.
//!
//! Entries keep the original-text span of every occurrence, so the surface
//! wording can be recovered from a stemmed form ("run" back to "running").

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Half-open byte range into a document's cleaned text.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Slice the surface text this span covers.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// One sighting of an ngram: which document, and where in its text.
///
/// `document` is identity only (the corpus key), never an owning reference;
/// ad-hoc documents built from raw text carry `None`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Occurrence {
    pub document: Option<Arc<str>>,
    pub span: Span,
}

impl Occurrence {
    pub fn new(document: Option<Arc<str>>, span: Span) -> Self {
        Self { document, span }
    }
}

/// A stemmed ngram and the set of places it occurs in one document.
///
/// Occurrences are a set keyed by `(document, start, end)`, so re-adding an
/// identical sighting is a no-op, and iteration order is deterministic
/// (earliest span first).
#[derive(Debug, Clone)]
pub struct KeywordEntry {
    stem: String,
    occurrences: BTreeSet<Occurrence>,
}

impl KeywordEntry {
    pub fn new(stem: impl Into<String>) -> Self {
        Self { stem: stem.into(), occurrences: BTreeSet::new() }
    }

    pub fn with_occurrence(stem: impl Into<String>, occurrence: Occurrence) -> Self {
        let mut entry = Self::new(stem);
        entry.push(occurrence);
        entry
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Record a sighting. Returns false if this exact occurrence was already
    /// present.
    pub fn push(&mut self, occurrence: Occurrence) -> bool {
        self.occurrences.insert(occurrence)
    }

    /// Union another entry's occurrences into this one. Both entries must
    /// describe the same stem. Commutative and idempotent.
    pub fn merge(&mut self, other: KeywordEntry) {
        debug_assert_eq!(self.stem, other.stem);
        self.occurrences.extend(other.occurrences);
    }

    /// Number of recorded occurrences.
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }

    pub fn occurrences(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter()
    }

    /// The earliest recorded span, used to pick a representative surface
    /// form. `None` only for an entry with no occurrences.
    pub fn first_span(&self) -> Option<Span> {
        self.occurrences.iter().next().map(|o| o.span)
    }

    /// Distinct surface realizations of this stem within `text`, in span
    /// order.
    pub fn surface_texts<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut out: Vec<&str> = Vec::new();
        for occ in &self.occurrences {
            let surface = occ.span.slice(text);
            if !out.contains(&surface) {
                out.push(surface);
            }
        }
        out
    }
}

/// A scored keyword: the surface term as seen in text, its stemmed ngram,
/// and the TF-IDF score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub term: String,
    pub stem: String,
    pub score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occ(start: usize, end: usize) -> Occurrence {
        Occurrence::new(None, Span::new(start, end))
    }

    #[test]
    fn duplicate_occurrences_collapse() {
        let mut entry = KeywordEntry::new("cat");
        assert!(entry.push(occ(0, 3)));
        assert!(!entry.push(occ(0, 3)));
        assert_eq!(entry.count(), 1);
    }

    #[test]
    fn merge_is_commutative_and_idempotent() {
        let a = KeywordEntry::with_occurrence("cat", occ(0, 3));
        let mut b = KeywordEntry::with_occurrence("cat", occ(10, 13));

        let mut ab = a.clone();
        ab.merge(b.clone());
        b.merge(a);
        assert_eq!(ab.count(), 2);
        assert_eq!(b.count(), 2);
        let spans_ab: Vec<_> = ab.occurrences().map(|o| o.span).collect();
        let spans_ba: Vec<_> = b.occurrences().map(|o| o.span).collect();
        assert_eq!(spans_ab, spans_ba);

        // Re-merging the same spans changes nothing.
        ab.merge(b.clone());
        assert_eq!(ab.count(), 2);
    }

    #[test]
    fn first_span_is_earliest() {
        let mut entry = KeywordEntry::with_occurrence("cat", occ(10, 13));
        entry.push(occ(0, 3));
        assert_eq!(entry.first_span(), Some(Span::new(0, 3)));
    }

    #[test]
    fn surface_texts_dedupe() {
        let text = "cats chased cats";
        let mut entry = KeywordEntry::with_occurrence("cat", occ(0, 4));
        entry.push(occ(12, 16));
        assert_eq!(entry.surface_texts(text), vec!["cats"]);
    }
}
