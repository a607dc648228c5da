//! Stopword sets.
//!
//! The built-in list covers English; other languages take a caller-supplied
//! set, either built inline or loaded line-per-word with [`from_reader`].

use std::collections::HashSet;
use std::io::{self, BufRead};

/// Built-in English stopword list, lowercase, contractions included.
pub const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does",
    "doesn't", "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had",
    "hadn't", "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her",
    "here", "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd",
    "i'll", "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself",
    "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off",
    "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over",
    "own", "same", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such",
    "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there",
    "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't", "would",
    "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours", "yourself",
    "yourselves",
];

/// The built-in English stopword set.
pub fn english() -> HashSet<String> {
    ENGLISH.iter().map(|w| (*w).to_string()).collect()
}

/// An empty stopword set, for callers that want every word kept.
pub fn none() -> HashSet<String> {
    HashSet::new()
}

/// Load a stopword set from a reader, one word per line. Lines are trimmed;
/// blank lines are skipped. Entries are expected to already be lowercase.
pub fn from_reader<R: BufRead>(reader: R) -> io::Result<HashSet<String>> {
    let mut words = HashSet::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() {
            words.insert(word.to_string());
        }
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_contains_common_words() {
        let set = english();
        assert!(set.contains("the"));
        assert!(set.contains("it's"));
        assert!(!set.contains("cat"));
    }

    #[test]
    fn reads_one_word_per_line() {
        let input = "the\n  and  \n\nor\n";
        let set = from_reader(input.as_bytes()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("and"));
    }
}
