use std::collections::HashSet;

use tfidf_core::{clean_text, stopwords, Preprocessor};

fn stems(tokens: &[(String, tfidf_core::Span)]) -> HashSet<String> {
    tokens.iter().map(|(s, _)| s.clone()).collect()
}

#[test]
fn clean_is_idempotent() {
    let samples = [
        "Mary had a little lamb; its fleece was white as snow.",
        "<div>Fish &amp; chips</div> \u{201c}again\u{201d} - always",
        "Tabs\tand\nnewlines   galore",
    ];
    for raw in samples {
        let once = clean_text(raw);
        assert_eq!(clean_text(&once), once, "clean not idempotent for {raw:?}");
    }
}

#[test]
fn stopword_removal_is_pure_subtraction() {
    let text = clean_text("The quick brown fox and the lazy dog");
    let with_stopwords = Preprocessor::new(1, true).unwrap();
    let without = Preprocessor::new(1, true)
        .unwrap()
        .with_stopwords(stopwords::none());

    let filtered = stems(&with_stopwords.tokenize(&text));
    let unfiltered = stems(&without.tokenize(&text));

    assert!(filtered.is_subset(&unfiltered));
    assert!(!filtered.contains("the"));
    assert!(!filtered.contains("and"));
    assert!(filtered.contains("fox"));
}

#[test]
fn ngrams_never_cross_hard_boundaries() {
    let text = clean_text("Although he saw the car, he ran across the street");
    let pp = Preprocessor::new(2, true)
        .unwrap()
        .with_stopwords(stopwords::none());

    // "car" ends just before the comma; no span may cover both "car" and
    // the following "he".
    let comma = text.find(',').unwrap();
    for (_, span) in pp.tokenize(&text) {
        assert!(
            span.end <= comma || span.start > comma,
            "span {span:?} crosses the comma at {comma}"
        );
    }
}

#[test]
fn bigram_phases_give_full_coverage() {
    let text = "alpha beta gamma delta epsilon";
    let pp = Preprocessor::new(2, false)
        .unwrap()
        .with_stopwords(stopwords::none());
    let got = stems(&pp.tokenize(text));

    for expected in ["alpha beta", "beta gamma", "gamma delta", "delta epsilon"] {
        assert!(got.contains(expected), "missing bigram {expected:?}");
    }
}

#[test]
fn all_ngrams_covers_every_size_up_to_gram_size() {
    let text = "alpha beta gamma";
    let pp = Preprocessor::new(3, true)
        .unwrap()
        .with_stopwords(stopwords::none());
    let got = stems(&pp.tokenize(text));

    assert!(got.contains("alpha"));
    assert!(got.contains("alpha beta"));
    assert!(got.contains("alpha beta gamma"));
}

#[test]
fn exact_size_only_when_all_ngrams_is_off() {
    let text = "alpha beta gamma";
    let pp = Preprocessor::new(2, false)
        .unwrap()
        .with_stopwords(stopwords::none());
    let got = stems(&pp.tokenize(text));

    assert!(got.contains("alpha beta"));
    assert!(!got.contains("alpha"));
    assert!(!got.contains("alpha beta gamma"));
}

#[test]
fn spans_recover_surface_text() {
    let text = clean_text("All the cars were honking their horns.");
    let pp = Preprocessor::new(1, false)
        .unwrap()
        .with_stopwords(stopwords::none());

    for (stem, span) in pp.tokenize(&text) {
        let surface = &text[span.start..span.end];
        // The surface form must stem back to the emitted ngram.
        assert_eq!(pp.stem_word(surface), stem);
    }
}

#[test]
fn stopword_gaps_do_not_respan() {
    // "saw" and "street" become adjacent after filtering; the bigram span
    // must still cover the original surface distance between them.
    let text = clean_text("he saw the street");
    let pp = Preprocessor::new(2, false).unwrap();
    let tokens = pp.tokenize(&text);
    let (stem, span) = tokens.first().expect("one bigram");
    assert_eq!(stem, "saw street");
    assert_eq!(&text[span.start..span.end], "saw the street");
}

#[test]
fn stemming_is_cached_and_stable() {
    let pp = Preprocessor::new(1, false).unwrap();
    let first = pp.stem_word("honking");
    let second = pp.stem_word("honking");
    assert_eq!(first, second);
    assert_eq!(first, "honk");
}

#[test]
fn custom_stemmer_is_pluggable() {
    let pp = Preprocessor::new(1, false)
        .unwrap()
        .with_stopwords(stopwords::none())
        .with_stemmer(Box::new(|w: &str| w.to_uppercase()));
    let tokens = pp.tokenize("loud horns");
    let got = stems(&tokens);
    assert!(got.contains("LOUD"));
    assert!(got.contains("HORNS"));
}
