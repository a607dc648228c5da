//! Text preprocessing: stopword filtering, cached stemming, and the
//! sentence-aware ngram tokenizer.
//!
//! Ngrams never cross a hard boundary character. In
//! `"although he saw the car, he ran across the street"` the comma stops
//! `"car he"` from ever forming a bigram.

use lazy_static::lazy_static;
use lru::LruCache;
use parking_lot::Mutex;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use std::num::NonZeroUsize;

use crate::clean::clean_text;
use crate::error::{Error, Result};
use crate::keyword::Span;
use crate::stopwords;

/// Words cached by the stem cache. Stemming dominates tokenization cost on
/// larger documents, and natural text repeats words heavily.
pub const STEM_CACHE_CAPACITY: usize = 10_000;

lazy_static! {
    // Inverse match: a segment is a maximal run of characters none of which
    // is a hard ngram boundary.
    static ref SEGMENT: Regex =
        Regex::new(r#"[^:;!^,?.\[|\]()"`]+"#).expect("valid regex");
    static ref WORD: Regex = Regex::new(r"\S+").expect("valid regex");
    // Contraction suffixes stripped when checking the stopword list, so
    // "it's" still matches the entry "it".
    static ref CONTRACTION: Regex = Regex::new(r"(n't|'s|'re)$").expect("valid regex");
}

/// A pluggable word stemmer. Must be deterministic and side-effect-free.
pub type StemFn = Box<dyn Fn(&str) -> String + Send + Sync>;

/// Languages with a built-in stemmer.
pub const SUPPORTED_LANGUAGES: &[&str] = &[
    "arabic", "danish", "dutch", "english", "finnish", "french", "german", "greek",
    "hungarian", "italian", "norwegian", "portuguese", "romanian", "russian", "spanish",
    "swedish", "tamil", "turkish",
];

fn algorithm_for(language: &str) -> Result<Algorithm> {
    match language.to_lowercase().as_str() {
        "arabic" => Ok(Algorithm::Arabic),
        "danish" => Ok(Algorithm::Danish),
        "dutch" => Ok(Algorithm::Dutch),
        "english" => Ok(Algorithm::English),
        "finnish" => Ok(Algorithm::Finnish),
        "french" => Ok(Algorithm::French),
        "german" => Ok(Algorithm::German),
        "greek" => Ok(Algorithm::Greek),
        "hungarian" => Ok(Algorithm::Hungarian),
        "italian" => Ok(Algorithm::Italian),
        "norwegian" => Ok(Algorithm::Norwegian),
        "portuguese" => Ok(Algorithm::Portuguese),
        "romanian" => Ok(Algorithm::Romanian),
        "russian" => Ok(Algorithm::Russian),
        "spanish" => Ok(Algorithm::Spanish),
        "swedish" => Ok(Algorithm::Swedish),
        "tamil" => Ok(Algorithm::Tamil),
        "turkish" => Ok(Algorithm::Turkish),
        other => Err(Error::UnsupportedLanguage(other.to_string())),
    }
}

/// A word inside one segment, with global byte offsets into the cleaned text.
#[derive(Debug, Clone, Copy)]
struct PositionalWord<'a> {
    text: &'a str,
    start: usize,
    end: usize,
}

/// Preps text for TF-IDF: stopword removal, cached stemming, and ngram
/// assembly that respects sentence boundaries.
///
/// One `Preprocessor` configuration must be shared by every document that
/// will be compared: mixing gram sizes, stopword sets, or stemmers across
/// documents of one corpus produces incomparable statistics.
pub struct Preprocessor {
    stopwords: HashSet<String>,
    stemmer: StemFn,
    stem_cache: Mutex<LruCache<String, String>>,
    gram_size: usize,
    all_ngrams: bool,
}

impl Preprocessor {
    /// English stemmer and the built-in English stopword list.
    pub fn new(gram_size: usize, all_ngrams: bool) -> Result<Self> {
        Self::build(Algorithm::English, stopwords::english(), gram_size, all_ngrams)
    }

    /// Stemmer and stopwords for the named language. Only English ships a
    /// stopword list; other languages start with an empty set, which can be
    /// replaced via [`with_stopwords`](Self::with_stopwords).
    pub fn for_language(language: &str, gram_size: usize, all_ngrams: bool) -> Result<Self> {
        let algorithm = algorithm_for(language)?;
        let stopwords = if language.eq_ignore_ascii_case("english") {
            stopwords::english()
        } else {
            stopwords::none()
        };
        Self::build(algorithm, stopwords, gram_size, all_ngrams)
    }

    fn build(
        algorithm: Algorithm,
        stopwords: HashSet<String>,
        gram_size: usize,
        all_ngrams: bool,
    ) -> Result<Self> {
        if gram_size < 1 {
            return Err(Error::InvalidGramSize(gram_size));
        }
        let stemmer = Stemmer::create(algorithm);
        Ok(Self {
            stopwords,
            stemmer: Box::new(move |word| stemmer.stem(word).into_owned()),
            stem_cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(STEM_CACHE_CAPACITY).expect("nonzero capacity"),
            )),
            gram_size,
            all_ngrams,
        })
    }

    /// Replace the stopword set. The set is fixed for the lifetime of the
    /// preprocessor once documents are built with it.
    pub fn with_stopwords(mut self, stopwords: HashSet<String>) -> Self {
        self.stopwords = stopwords;
        self
    }

    /// Replace the stemmer. Drops any cached stems from the previous one.
    pub fn with_stemmer(mut self, stemmer: StemFn) -> Self {
        self.stem_cache.get_mut().clear();
        self.stemmer = stemmer;
        self
    }

    /// Number of words in the ngram. Not editable post-init.
    pub fn gram_size(&self) -> usize {
        self.gram_size
    }

    /// True if ngrams of size `gram_size` and smaller are generated; false
    /// if only ngrams of exactly `gram_size` are.
    pub fn all_ngrams(&self) -> bool {
        self.all_ngrams
    }

    /// Stem a single word through the LRU cache.
    pub fn stem_word(&self, word: &str) -> String {
        let mut cache = self.stem_cache.lock();
        if let Some(stem) = cache.get(word) {
            return stem.clone();
        }
        let stem = (self.stemmer)(word);
        cache.put(word.to_string(), stem.clone());
        stem
    }

    /// Stem every space-separated word of an already-cleaned term. Returns
    /// the canonical (stemmed) ngram.
    pub fn stem_term(&self, term: &str) -> String {
        term.split(' ')
            .map(|word| self.stem_word(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Remove stopwords from cleaned text, preserving the remaining words'
    /// relative order.
    pub fn handle_stopwords(&self, text: &str) -> String {
        text.split(' ')
            .filter(|word| !self.is_stopword(word))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Full single-term pipeline: clean, drop stopwords, stem. Assumes the
    /// input already has the number of words wanted for the ngram.
    pub fn normalize_term(&self, term: &str) -> String {
        let text = clean_text(term);
        let text = self.handle_stopwords(&text);
        self.stem_term(&text)
    }

    fn is_stopword(&self, word: &str) -> bool {
        let check_me = CONTRACTION.replace(word, "");
        self.stopwords.contains(check_me.as_ref())
    }

    /// Scan cleaned text into `(stemmed ngram, span)` pairs, in scan order.
    ///
    /// Segments are split on hard boundary characters and ngrams never cross
    /// a segment. For each target length `L`, `L` phase-offset passes are
    /// made, each an internally non-overlapping window walk; together the
    /// phases give full coverage (bigram phase 0 pairs words 0-1, 2-3, ...;
    /// phase 1 pairs words 1-2, 3-4, ...). Partial trailing windows are
    /// discarded. Downstream frequency counts assume exactly this coverage.
    pub fn tokenize(&self, text: &str) -> Vec<(String, Span)> {
        let sizes: Vec<usize> = if self.all_ngrams {
            (1..=self.gram_size).collect()
        } else {
            vec![self.gram_size]
        };

        let mut out = Vec::new();
        for segment in SEGMENT.find_iter(text) {
            let base = segment.start();
            let words: Vec<PositionalWord> = WORD
                .find_iter(segment.as_str())
                .filter(|m| !self.is_stopword(m.as_str()))
                .map(|m| PositionalWord {
                    text: m.as_str(),
                    start: base + m.start(),
                    end: base + m.end(),
                })
                .collect();

            for &gram_size in &sizes {
                for offset in 0..gram_size {
                    if offset >= words.len() {
                        break;
                    }
                    for window in words[offset..].chunks_exact(gram_size) {
                        let stem = window
                            .iter()
                            .map(|w| self.stem_word(w.text))
                            .collect::<Vec<_>>()
                            .join(" ");
                        let span = Span::new(window[0].start, window[gram_size - 1].end);
                        out.push((stem, span));
                    }
                }
            }
        }
        out
    }
}

impl std::fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Preprocessor")
            .field("stopwords", &self.stopwords.len())
            .field("gram_size", &self.gram_size)
            .field("all_ngrams", &self.all_ngrams)
            .finish_non_exhaustive()
    }
}
