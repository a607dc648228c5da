//! A document: one body of text, its keyword index, and term frequency (TF).

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use crate::clean::clean_text;
use crate::error::{Error, Result};
use crate::keyword::{KeywordEntry, Occurrence, Span};
use crate::preprocess::Preprocessor;

/// Term-frequency weighting schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TfWeight {
    /// `occurrences / total ngrams` in the document.
    Raw,
    /// `1 + ln(raw)`.
    Log,
    /// 1 if the ngram is present, 0 otherwise.
    Binary,
    /// Double normalization 0.5: `0.5 + 0.5 * occurrences / max occurrences`.
    /// Guards against a bias toward long documents.
    Norm50,
}

impl FromStr for TfWeight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "raw" | "basic" => Ok(Self::Raw),
            "log" => Ok(Self::Log),
            "binary" => Ok(Self::Binary),
            "norm_50" | "double-normalized" => Ok(Self::Norm50),
            other => Err(Error::UnknownWeight(other.to_string())),
        }
    }
}

/// A body of cleaned text plus its ngram index.
///
/// Built once from text and a preprocessor, immutable afterwards. The
/// derived counts are computed on first use; recomputation is idempotent, so
/// concurrent readers are safe.
#[derive(Debug)]
pub struct Document {
    id: Option<Arc<str>>,
    text: String,
    index: HashMap<String, KeywordEntry>,
    ngram_count: OnceLock<usize>,
    max_raw_frequency: OnceLock<usize>,
}

impl Document {
    /// Build the index from already-cleaned text. `id` is the corpus key,
    /// or `None` for an ad-hoc document.
    pub(crate) fn build(id: Option<Arc<str>>, text: String, preprocessor: &Preprocessor) -> Self {
        let mut index: HashMap<String, KeywordEntry> = HashMap::new();
        for (stem, span) in preprocessor.tokenize(&text) {
            let occurrence = Occurrence::new(id.clone(), span);
            match index.entry(stem) {
                Entry::Occupied(mut slot) => {
                    slot.get_mut().push(occurrence);
                }
                Entry::Vacant(slot) => {
                    let stem = slot.key().clone();
                    slot.insert(KeywordEntry::with_occurrence(stem, occurrence));
                }
            }
        }
        Self {
            id,
            text,
            index,
            ngram_count: OnceLock::new(),
            max_raw_frequency: OnceLock::new(),
        }
    }

    /// Clean raw text and build an ad-hoc document from it. The result is
    /// not attached to any corpus.
    pub fn from_raw(raw_text: &str, preprocessor: &Preprocessor) -> Self {
        Self::build(None, clean_text(raw_text), preprocessor)
    }

    /// Corpus key this document was stored under, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The cleaned text the spans index into.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// True if the stemmed ngram occurs in this document.
    pub fn contains(&self, ngram: &str) -> bool {
        self.index.contains_key(ngram)
    }

    /// The keyword entry for a stemmed ngram, with all its occurrences.
    pub fn entry(&self, ngram: &str) -> Option<&KeywordEntry> {
        self.index.get(ngram)
    }

    /// Occurrence count of a stemmed ngram, 0 if absent.
    pub fn count(&self, ngram: &str) -> usize {
        self.index.get(ngram).map_or(0, KeywordEntry::count)
    }

    /// Every distinct stemmed ngram in the document.
    pub fn stems(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &KeywordEntry> {
        self.index.values()
    }

    /// Number of distinct stemmed ngrams.
    pub fn distinct_ngrams(&self) -> usize {
        self.index.len()
    }

    /// Surface text covered by a span of this document.
    pub fn surface(&self, span: Span) -> &str {
        span.slice(&self.text)
    }

    /// Total ngram occurrences across all stems, the TF denominator.
    pub fn ngram_count(&self) -> usize {
        *self
            .ngram_count
            .get_or_init(|| self.index.values().map(KeywordEntry::count).sum())
    }

    /// Highest occurrence count of any single stemmed ngram.
    pub fn max_raw_frequency(&self) -> usize {
        *self
            .max_raw_frequency
            .get_or_init(|| self.index.values().map(KeywordEntry::count).max().unwrap_or(0))
    }

    /// Raw frequency of an ngram: occurrences over total occurrences.
    pub fn tf_raw(&self, ngram: &str) -> Result<f64> {
        let total = self.ngram_count();
        if total == 0 {
            return Err(Error::EmptyDocument);
        }
        Ok(self.count(ngram) as f64 / total as f64)
    }

    /// Log frequency, `1 + ln(raw)`.
    ///
    /// Precondition: the ngram occurs in this document. With zero
    /// occurrences the result is negative infinity; it is propagated, not
    /// guarded.
    pub fn tf_log(&self, ngram: &str) -> Result<f64> {
        Ok(1.0 + self.tf_raw(ngram)?.ln())
    }

    /// Binary frequency: 1.0 if present, 0.0 if not.
    pub fn tf_binary(&self, ngram: &str) -> f64 {
        if self.contains(ngram) {
            1.0
        } else {
            0.0
        }
    }

    /// Double-normalized frequency, in `[0.5, 1.0]` for present ngrams.
    pub fn tf_norm_50(&self, ngram: &str) -> Result<f64> {
        let max = self.max_raw_frequency();
        if max == 0 {
            return Err(Error::EmptyDocument);
        }
        Ok(0.5 + 0.5 * self.count(ngram) as f64 / max as f64)
    }

    /// Term frequency of a stemmed ngram under the chosen weighting.
    pub fn tf(&self, ngram: &str, weight: TfWeight) -> Result<f64> {
        match weight {
            TfWeight::Raw => self.tf_raw(ngram),
            TfWeight::Log => self.tf_log(ngram),
            TfWeight::Binary => Ok(self.tf_binary(ngram)),
            TfWeight::Norm50 => self.tf_norm_50(ngram),
        }
    }
}
