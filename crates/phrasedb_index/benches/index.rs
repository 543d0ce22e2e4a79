//! Benchmarks for index insertion and lookup.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phrasedb_index::PrefixIndex;

fn seeded_index(phrases: usize) -> PrefixIndex {
    let mut index = PrefixIndex::new();
    for i in 0..phrases {
        let phrase = format!("the subject {} did the thing {}", i % 100, i);
        index.insert_or_increment(&phrase);
    }
    index
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("insert_or_increment", |b| {
        let mut index = seeded_index(10_000);
        b.iter(|| index.insert_or_increment(black_box("the subject 42 did the thing 42")));
    });
}

fn bench_suggest(c: &mut Criterion) {
    let index = seeded_index(10_000);
    c.bench_function("suggest_short_prefix", |b| {
        b.iter(|| index.suggest(black_box("the subject 4")));
    });
}

fn bench_best_match(c: &mut Criterion) {
    let index = seeded_index(10_000);
    c.bench_function("best_match_short_prefix", |b| {
        b.iter(|| index.best_match(black_box("the subject 4")));
    });
}

criterion_group!(benches, bench_insert, bench_suggest, bench_best_match);
criterion_main!(benches);
