#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use sporhund_matcher::{scan, AutomatonBuilder};

const PATTERNS: &[&str] = &[
    "pursuant to",
    "notwithstanding",
    "force majeure",
    "indemnification",
    "herein",
    "breach of contract",
    "governing law",
    "intellectual property",
];

const SHORT_TEXT: &str = "The parties agree that, pursuant to the governing law, \
     any breach of contract shall trigger indemnification.";

fn bench_build(c: &mut Criterion) {
    c.bench_function("automaton_build", |b| {
        b.iter(|| {
            AutomatonBuilder::new()
                .build(black_box(PATTERNS).iter().copied())
                .unwrap()
        })
    });
}

fn bench_scan(c: &mut Criterion) {
    let automaton = AutomatonBuilder::new()
        .build(PATTERNS.iter().copied())
        .unwrap();
    let long_text = SHORT_TEXT.repeat(64);

    let mut group = c.benchmark_group("scan_throughput");
    for (name, text) in [("short", SHORT_TEXT.to_string()), ("long", long_text)] {
        group.throughput(criterion::Throughput::Bytes(text.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| scan(&automaton, black_box(text.as_bytes())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_scan);
criterion_main!(benches);
