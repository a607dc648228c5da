use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the engine. None of these are retryable: every
/// scoring call is deterministic, so a failed call fails the same way again.
#[derive(Debug, Error)]
pub enum Error {
    /// Gram size must be at least 1.
    #[error("gram size must be at least 1, got {0}")]
    InvalidGramSize(usize),

    /// No stemmer is available for the requested language.
    #[error("unsupported language: {0:?}")]
    UnsupportedLanguage(String),

    /// Unrecognized TF or IDF weighting scheme name.
    #[error("unknown weighting scheme: {0:?}")]
    UnknownWeight(String),

    /// The corpus holds no document under the given id.
    #[error("document not found: {0:?}")]
    DocumentNotFound(String),

    /// IDF was requested for an ngram absent from every document in the
    /// corpus. Callers must only query ngrams that occur somewhere.
    #[error("ngram {0:?} does not occur in any document of the corpus")]
    ZeroDocumentFrequency(String),

    /// TF was requested on a document with zero ngram occurrences, so the
    /// frequency denominator would be zero.
    #[error("document contains no ngrams")]
    EmptyDocument,
}
