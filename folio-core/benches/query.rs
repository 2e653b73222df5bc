//! Query benchmarks

use criterion::{criterion_group, criterion_main, Criterion};
use folio_core::{filter_by_query, ingest, sort_by, RawRecord, SortKey};

fn catalog(size: usize) -> Vec<RawRecord> {
    (0..size)
        .map(|i| {
            RawRecord::new(i as i64, format!("Volume {} of the collected works", size - i))
                .with_author(format!("Author {}", i % 37))
                .with_published_date(format!("{}-{:02}", 1950 + i % 70, 1 + i % 12))
        })
        .collect()
}

fn query_benchmark(c: &mut Criterion) {
    let records = catalog(2_000);

    c.bench_function("filter_by_query", |b| {
        b.iter(|| filter_by_query(std::hint::black_box(&records), "author 12"))
    });
    c.bench_function("sort_by_title", |b| {
        b.iter(|| sort_by(std::hint::black_box(&records), SortKey::Title))
    });
    c.bench_function("sort_by_date", |b| {
        b.iter(|| sort_by(std::hint::black_box(&records), SortKey::Date))
    });
    c.bench_function("ingest_overlapping_page", |b| {
        let page = &records[1_990..];
        b.iter(|| ingest(std::hint::black_box(&records), page))
    });
}

criterion_group!(benches, query_benchmark);
criterion_main!(benches);
