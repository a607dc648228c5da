use criterion::{criterion_group, criterion_main, Criterion};
use tfidf_core::{clean_text, Preprocessor};

fn bench_tokenize(c: &mut Criterion) {
    let text = clean_text(include_str!("../README.md"));
    let pp = Preprocessor::new(2, true).expect("valid config");
    c.bench_function("tokenize_readme_bigrams", |b| b.iter(|| pp.tokenize(&text)));
}

criterion_group!(benches, bench_tokenize);
criterion_main!(benches);
