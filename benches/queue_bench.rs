//! Benchmark suite for kapian
//!
//! Run with: cargo bench

use std::collections::HashSet;

use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use kapian::filter::filter_words;
use kapian::queue::build_queue;
use kapian::WordCatalog;

fn bench_filter_words(c: &mut Criterion) {
    let catalog = WordCatalog::builtin();
    let filter = catalog.all_filter();
    c.bench_function("filter_words/builtin", |b| {
        b.iter(|| filter_words(catalog.entries(), &filter))
    });
}

fn bench_build_queue(c: &mut Criterion) {
    let catalog = WordCatalog::builtin();
    let filter = catalog.all_filter();
    let exclude = HashSet::new();
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    c.bench_function("build_queue/builtin", |b| {
        b.iter(|| build_queue(catalog.entries(), &filter, &exclude, &mut rng))
    });
}

criterion_group!(benches, bench_filter_words, bench_build_queue);
criterion_main!(benches);
