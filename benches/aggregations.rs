//! Aggregation benchmarks
//!
//! Measures describe / grouped describe over synthetic experiment output,
//! and the parse + normalize path for a metrics file of the same size.
//!
//! Run with: cargo bench --bench aggregations

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pow_analytics::normalize::DurationNormalizer;
use pow_analytics::record::{MetricRecord, RecordParser};
use pow_analytics::stats::{describe, describe_grouped, describe_table, MetricField};

const SMALL_SIZE: usize = 1_000; // 1K blocks
const MEDIUM_SIZE: usize = 100_000; // 100K blocks

fn metrics_text(rows: usize) -> String {
    (0..rows)
        .map(|i| {
            let source = if i % 2 == 0 { "Quantum" } else { "Classical" };
            format!("{i},{source},{},{}.{}ms\n", (i * 37) % 5000, i % 900, i % 10)
        })
        .collect()
}

fn normalized_metrics(rows: usize) -> Vec<MetricRecord> {
    let mut records: Vec<MetricRecord> = RecordParser::new()
        .parse_str(&metrics_text(rows))
        .expect("synthetic metrics parse");
    DurationNormalizer::new().normalize(&mut records);
    records
}

/// Benchmark the single-series describe kernel
#[allow(clippy::cast_precision_loss)]
fn bench_describe(c: &mut Criterion) {
    let mut group = c.benchmark_group("describe_f64");

    for size in [SMALL_SIZE, MEDIUM_SIZE] {
        let data: Vec<f64> = (0..size).map(|i| ((i * 7919) % 65_536) as f64).collect();
        group.bench_with_input(BenchmarkId::new("describe", size), &data, |b, data| {
            b.iter(|| describe(black_box(data)));
        });
    }

    group.finish();
}

/// Benchmark overall vs grouped table aggregation
fn bench_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("describe_tables");

    for size in [SMALL_SIZE, MEDIUM_SIZE] {
        let records = normalized_metrics(size);
        group.bench_with_input(BenchmarkId::new("overall", size), &records, |b, records| {
            b.iter(|| describe_table(black_box(records), &MetricField::ALL));
        });
        group.bench_with_input(BenchmarkId::new("by_source", size), &records, |b, records| {
            b.iter(|| describe_grouped(black_box(records), &MetricField::ALL));
        });
    }

    group.finish();
}

/// Benchmark parse + normalize of a metrics file held in memory
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_metrics");
    let text = metrics_text(MEDIUM_SIZE);
    let normalizer = DurationNormalizer::new();

    group.bench_function(BenchmarkId::new("parse_normalize", MEDIUM_SIZE), |b| {
        b.iter(|| {
            let mut records: Vec<MetricRecord> =
                RecordParser::new().parse_str(black_box(&text)).expect("parse");
            normalizer.normalize(&mut records)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_describe, bench_tables, bench_load);
criterion_main!(benches);
