//! TF-IDF keyword extraction over an in-memory corpus.
//!
//! Answers "which ngrams best characterize this document relative to the
//! rest of the corpus?" with a sentence-aware ngram tokenizer, cached
//! stemming, and interchangeable TF / IDF weighting schemes.
//!
//! Vocabulary:
//! - *stem*: the root form of a word produced by the stemmer
//!   (`winningly` -> `win`).
//! - *term*: a one- or multi-word string as it appears in text, unstemmed.
//! - *ngram*: a term that has been preprocessed and stemmed. Stemming need
//!   not be idempotent, so ngrams are never re-processed.
//! - *document*: a body of text with its keyword index.
//! - *corpus*: a keyed collection of comparable documents. Keep a single
//!   language per corpus.
//! - *TF / IDF*: term frequency within a document; inverse document
//!   frequency across the corpus. Their product scores how well an ngram
//!   characterizes a document.
//!
//! ```
//! use tfidf_core::{Corpus, IdfWeight, TfWeight};
//!
//! let mut corpus = Corpus::new(2, true)?;
//! corpus.set_document("mary", "Mary had a little lamb, its fleece was white as snow.");
//! corpus.set_document("weather", "Snow fell on the hills all through the night.");
//!
//! let keywords = corpus.get_keywords("mary", TfWeight::Raw, IdfWeight::Basic, 5)?;
//! assert!(keywords.len() <= 5);
//! # Ok::<(), tfidf_core::Error>(())
//! ```

pub mod clean;
pub mod corpus;
pub mod document;
pub mod error;
pub mod keyword;
pub mod preprocess;
pub mod stopwords;

pub use clean::clean_text;
pub use corpus::{Corpus, IdfWeight};
pub use document::{Document, TfWeight};
pub use error::{Error, Result};
pub use keyword::{Keyword, KeywordEntry, Occurrence, Span};
pub use preprocess::{Preprocessor, StemFn, SUPPORTED_LANGUAGES};
