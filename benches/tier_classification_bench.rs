//! Benchmarks for heat tier classification and view building.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kpiboard::data::{builtin_snapshot, CohortRow, COHORT_WEEKS};
use kpiboard::metrics::{classify_row, period_delta, Classifier};
use kpiboard::{DashboardBuilder, DashboardConfig};
use std::hint::black_box;

fn synthetic_cohorts(count: usize) -> Vec<CohortRow> {
    (0..count)
        .map(|i| {
            let mut weekly_retention = [None; COHORT_WEEKS];
            for (week, slot) in weekly_retention.iter_mut().enumerate() {
                if week <= i % COHORT_WEEKS {
                    *slot = Some(100.0 / (week as f64 + 1.0));
                }
            }
            CohortRow {
                cohort: format!("cohort-{i}"),
                weekly_retention,
            }
        })
        .collect()
}

fn bench_classify_values(c: &mut Criterion) {
    let classifier = Classifier::default();
    let values: Vec<f64> = (0..1000).map(|i| (i % 120) as f64 - 10.0).collect();

    c.bench_function("classify_1000_values", |b| {
        b.iter(|| {
            for v in &values {
                black_box(classifier.classify(black_box(*v)));
            }
        })
    });
}

fn bench_classify_rows(c: &mut Criterion) {
    let classifier = Classifier::default();
    let mut group = c.benchmark_group("classify_cohort_rows");

    for size in [8, 64, 512] {
        let rows = synthetic_cohorts(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &rows, |b, rows| {
            b.iter(|| {
                for row in rows {
                    black_box(classify_row(row, &classifier));
                }
            })
        });
    }
    group.finish();
}

fn bench_period_delta(c: &mut Criterion) {
    let series: Vec<f64> = (1..=12).map(|m| m as f64 * 750.0).collect();
    c.bench_function("period_delta_12_points", |b| {
        b.iter(|| black_box(period_delta(black_box(&series))))
    });
}

fn bench_build_view(c: &mut Criterion) {
    let data = builtin_snapshot();
    let builder = DashboardBuilder::new(&DashboardConfig::default());
    c.bench_function("build_builtin_view", |b| {
        b.iter(|| black_box(builder.build(black_box(&data))))
    });
}

criterion_group!(
    benches,
    bench_classify_values,
    bench_classify_rows,
    bench_period_delta,
    bench_build_view
);
criterion_main!(benches);
