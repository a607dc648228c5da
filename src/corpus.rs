//! A corpus: a keyed collection of documents plus inverse document
//! frequency (IDF) and combined TF-IDF scoring.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use crate::clean::clean_text;
use crate::document::{Document, TfWeight};
use crate::error::{Error, Result};
use crate::keyword::Keyword;
use crate::preprocess::Preprocessor;

/// Inverse-document-frequency weighting schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdfWeight {
    /// `ln(D / df)`.
    Basic,
    /// `ln(1 + D / df)`.
    Smooth,
    /// `ln(1 + M / df)`, with `M` the highest raw frequency in the corpus.
    Max,
    /// `ln((D - df) / df)`. Non-positive or non-finite when the ngram
    /// occurs in every document; the value is propagated as-is.
    Probabilistic,
}

impl FromStr for IdfWeight {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "basic" => Ok(Self::Basic),
            "smooth" => Ok(Self::Smooth),
            "max" => Ok(Self::Max),
            "prob" | "probabilistic" => Ok(Self::Probabilistic),
            other => Err(Error::UnknownWeight(other.to_string())),
        }
    }
}

/// A collection of documents sharing one preprocessor configuration.
///
/// Assign text bodies under string keys; each becomes an indexed
/// [`Document`]. Re-assigning a key replaces its document wholesale.
///
/// Writers must be serialized by the caller. Read-only scoring against a
/// built corpus is safe to run concurrently: nothing mutates during scoring
/// and the cached derived values recompute idempotently.
#[derive(Debug)]
pub struct Corpus {
    documents: HashMap<String, Document>,
    preprocessor: Preprocessor,
    max_frequency: OnceLock<usize>,
}

impl Corpus {
    /// English-language corpus with the built-in stopword list.
    pub fn new(gram_size: usize, all_ngrams: bool) -> Result<Self> {
        Ok(Self::with_preprocessor(Preprocessor::new(gram_size, all_ngrams)?))
    }

    /// Corpus for the named language. Keeping a single language per corpus
    /// is strongly recommended; IDF across languages is meaningless.
    pub fn for_language(language: &str, gram_size: usize, all_ngrams: bool) -> Result<Self> {
        Ok(Self::with_preprocessor(Preprocessor::for_language(
            language, gram_size, all_ngrams,
        )?))
    }

    /// Corpus over a manually configured preprocessor.
    pub fn with_preprocessor(preprocessor: Preprocessor) -> Self {
        Self {
            documents: HashMap::new(),
            preprocessor,
            max_frequency: OnceLock::new(),
        }
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    /// Number of words in the ngram. Not editable post-init.
    pub fn gram_size(&self) -> usize {
        self.preprocessor.gram_size()
    }

    /// Clean raw text, index it, and store it under `id`, replacing any
    /// previous document with that key. Invalidates cached corpus-wide
    /// statistics.
    pub fn set_document(&mut self, id: impl Into<String>, raw_text: &str) {
        let id = id.into();
        let key: Arc<str> = Arc::from(id.as_str());
        let document = Document::build(Some(key), clean_text(raw_text), &self.preprocessor);
        tracing::debug!(
            id = %id,
            ngrams = document.ngram_count(),
            distinct = document.distinct_ngrams(),
            "document indexed"
        );
        self.documents.insert(id, document);
        self.max_frequency = OnceLock::new();
    }

    /// Fetch a document by its id.
    pub fn get_document(&self, id: &str) -> Result<&Document> {
        self.documents
            .get(id)
            .ok_or_else(|| Error::DocumentNotFound(id.to_string()))
    }

    /// Drop a document, returning it if it was present. Invalidates cached
    /// corpus-wide statistics.
    pub fn remove_document(&mut self, id: &str) -> Option<Document> {
        let removed = self.documents.remove(id);
        if removed.is_some() {
            self.max_frequency = OnceLock::new();
        }
        removed
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The document ids in the corpus, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.documents.keys().map(String::as_str)
    }

    /// Document frequency: how many documents contain the ngram at least
    /// once. Binary per document, not a total occurrence count.
    pub fn count_doc_occurrences(&self, ngram: &str) -> usize {
        self.documents.values().filter(|d| d.contains(ngram)).count()
    }

    /// Highest raw frequency across all documents. Cached until the next
    /// document mutation; recomputation is idempotent.
    pub fn max_raw_frequency(&self) -> usize {
        *self.max_frequency.get_or_init(|| {
            self.documents
                .values()
                .map(Document::max_raw_frequency)
                .max()
                .unwrap_or(0)
        })
    }

    fn document_frequency(&self, ngram: &str) -> Result<usize> {
        match self.count_doc_occurrences(ngram) {
            0 => Err(Error::ZeroDocumentFrequency(ngram.to_string())),
            df => Ok(df),
        }
    }

    /// `ln(D / df)`.
    pub fn idf_basic(&self, ngram: &str) -> Result<f64> {
        let df = self.document_frequency(ngram)?;
        Ok((self.len() as f64 / df as f64).ln())
    }

    /// `ln(1 + D / df)`.
    pub fn idf_smooth(&self, ngram: &str) -> Result<f64> {
        let df = self.document_frequency(ngram)?;
        Ok((1.0 + self.len() as f64 / df as f64).ln())
    }

    /// `ln(1 + M / df)`.
    pub fn idf_max(&self, ngram: &str) -> Result<f64> {
        let df = self.document_frequency(ngram)?;
        Ok((1.0 + self.max_raw_frequency() as f64 / df as f64).ln())
    }

    /// `ln((D - df) / df)`.
    ///
    /// Known quirk: an ngram present in every document gives `ln(0)`,
    /// negative infinity. The mathematically defined value is returned
    /// rather than an error.
    pub fn idf_probabilistic(&self, ngram: &str) -> Result<f64> {
        let df = self.document_frequency(ngram)?;
        Ok(((self.len() - df) as f64 / df as f64).ln())
    }

    /// Inverse document frequency of a stemmed ngram under the chosen
    /// weighting. `Error::ZeroDocumentFrequency` if no document contains it.
    pub fn idf(&self, ngram: &str, weight: IdfWeight) -> Result<f64> {
        match weight {
            IdfWeight::Basic => self.idf_basic(ngram),
            IdfWeight::Smooth => self.idf_smooth(ngram),
            IdfWeight::Max => self.idf_max(ngram),
            IdfWeight::Probabilistic => self.idf_probabilistic(ngram),
        }
    }

    /// TF-IDF score of one term against a stored document.
    ///
    /// With `normalize` set, the term runs through the full preprocessor
    /// pipeline first; otherwise it is treated as an already-stemmed ngram.
    pub fn tf_idf(
        &self,
        term: &str,
        document_id: &str,
        tf_weight: TfWeight,
        idf_weight: IdfWeight,
        normalize: bool,
    ) -> Result<Keyword> {
        let document = self.get_document(document_id)?;
        self.score_term(term, document, tf_weight, idf_weight, normalize)
    }

    /// TF-IDF score of one term against an ad-hoc text body. The throwaway
    /// document is never added to the corpus and does not affect its
    /// statistics.
    pub fn tf_idf_for_text(
        &self,
        term: &str,
        raw_text: &str,
        tf_weight: TfWeight,
        idf_weight: IdfWeight,
        normalize: bool,
    ) -> Result<Keyword> {
        let document = Document::from_raw(raw_text, &self.preprocessor);
        self.score_term(term, &document, tf_weight, idf_weight, normalize)
    }

    fn score_term(
        &self,
        term: &str,
        document: &Document,
        tf_weight: TfWeight,
        idf_weight: IdfWeight,
        normalize: bool,
    ) -> Result<Keyword> {
        let stem = if normalize {
            self.preprocessor.normalize_term(term)
        } else {
            term.to_string()
        };
        let score = document.tf(&stem, tf_weight)? * self.idf(&stem, idf_weight)?;
        Ok(Keyword { term: term.to_string(), stem, score })
    }

    /// Ranked keywords for a stored document: every stem in its index,
    /// scored TF×IDF, sorted descending, truncated to `limit`. The reported
    /// term is the first recorded surface text for each stem.
    pub fn get_keywords(
        &self,
        document_id: &str,
        tf_weight: TfWeight,
        idf_weight: IdfWeight,
        limit: usize,
    ) -> Result<Vec<Keyword>> {
        let document = self.get_document(document_id)?;
        self.rank_document(document, tf_weight, idf_weight, limit)
    }

    /// Ranked keywords for an ad-hoc text body. Stems absent from every
    /// corpus document fail with `Error::ZeroDocumentFrequency`; no partial
    /// list is returned.
    pub fn get_keywords_for_text(
        &self,
        raw_text: &str,
        tf_weight: TfWeight,
        idf_weight: IdfWeight,
        limit: usize,
    ) -> Result<Vec<Keyword>> {
        let document = Document::from_raw(raw_text, &self.preprocessor);
        self.rank_document(&document, tf_weight, idf_weight, limit)
    }

    fn rank_document(
        &self,
        document: &Document,
        tf_weight: TfWeight,
        idf_weight: IdfWeight,
        limit: usize,
    ) -> Result<Vec<Keyword>> {
        let mut out = Vec::with_capacity(document.distinct_ngrams());
        for entry in document.entries() {
            let stem = entry.stem();
            let score = document.tf(stem, tf_weight)? * self.idf(stem, idf_weight)?;
            let term = entry
                .first_span()
                .map(|span| document.surface(span).to_string())
                .unwrap_or_default();
            out.push(Keyword { term, stem: stem.to_string(), score });
        }
        // Stable sort keeps enumeration order for equal scores.
        out.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        out.truncate(limit);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stopwords;

    fn bare_corpus(gram_size: usize, all_ngrams: bool) -> Corpus {
        let pp = Preprocessor::new(gram_size, all_ngrams)
            .unwrap()
            .with_stopwords(stopwords::none());
        Corpus::with_preprocessor(pp)
    }

    #[test]
    fn set_and_get_documents() {
        let mut c = bare_corpus(1, false);
        c.set_document("doc1", "Mary had a little lamb");
        assert_eq!(c.len(), 1);
        assert!(c.get_document("doc1").is_ok());
        assert!(matches!(
            c.get_document("nope"),
            Err(Error::DocumentNotFound(_))
        ));
    }

    #[test]
    fn reassigning_a_key_replaces_the_document() {
        let mut c = bare_corpus(1, false);
        c.set_document("d", "cat cat cat");
        assert_eq!(c.max_raw_frequency(), 3);
        c.set_document("d", "dog");
        assert_eq!(c.max_raw_frequency(), 1);
        assert_eq!(c.count_doc_occurrences("cat"), 0);
    }

    #[test]
    fn removal_invalidates_cached_statistics() {
        let mut c = bare_corpus(1, false);
        c.set_document("a", "lamb lamb lamb");
        c.set_document("b", "snow");
        assert_eq!(c.max_raw_frequency(), 3);
        c.remove_document("a");
        assert_eq!(c.max_raw_frequency(), 1);
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn weight_names_parse() {
        assert_eq!("smooth".parse::<IdfWeight>().unwrap(), IdfWeight::Smooth);
        assert_eq!("prob".parse::<IdfWeight>().unwrap(), IdfWeight::Probabilistic);
        assert!(matches!(
            "tfidf".parse::<IdfWeight>(),
            Err(Error::UnknownWeight(_))
        ));
    }
}
