//! Filter list and query benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `to_query` | Serializing lists of mixed filters, growing in length |
//! | `filter_changed` | Merging one edit into a list (linear key scan + dedup) |
//! | `store` | A publish through `FilterStore`, with and without a subscriber |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench query_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use facets_core::{
    default_filters, filter_changed, to_query, BooleanFilter, DateFilter, Filter, FilterStore,
    KeywordFilter, StatusFilter, StringFilter,
};
use std::hint::black_box;

/// A list of `n` filters with distinct keys and a mix of variants.
fn mixed_list(n: usize) -> Vec<Filter> {
    let mut filters = default_filters(true);
    filters.push(StatusFilter::new(["open", "fixed", "regressed"]).into());
    filters.push(KeywordFilter::new("null pointer").into());
    for i in 0..n {
        let term = format!("field_{i}");
        let filter: Filter = match i % 3 {
            0 => StringFilter::new(term, Some(format!("value {i}"))).into(),
            1 => BooleanFilter::new(term, Some(i % 2 == 0)).into(),
            _ => DateFilter::new(term, Some("last 24 hours".into())).into(),
        };
        filters.push(filter);
    }
    facets_core::process_filter_rules(filters)
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

fn to_query_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("to_query");

    for n in [10usize, 100, 1_000] {
        let list = mixed_list(n);
        group.throughput(Throughput::Elements(list.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &list, |b, list| {
            b.iter(|| black_box(to_query(black_box(list))))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

fn filter_changed_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_changed");

    for n in [10usize, 100, 1_000] {
        let list = mixed_list(n);

        // Worst case for the key scan: the edit targets the last entry.
        let last: Filter = StringFilter::new(format!("field_{}", n - 1), Some("x".into())).into();
        group.bench_with_input(BenchmarkId::new("update_last", n), &list, |b, list| {
            b.iter(|| black_box(filter_changed(list.clone(), last.clone())))
        });

        let status: Filter = StatusFilter::new(["ignored"]).into();
        group.bench_with_input(BenchmarkId::new("status_union", n), &list, |b, list| {
            b.iter(|| black_box(filter_changed(list.clone(), status.clone())))
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

fn store_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");
    let edit: Filter = KeywordFilter::new("timeout").into();

    group.bench_function("publish_no_subscriber", |b| {
        let store = FilterStore::new(mixed_list(100));
        b.iter(|| store.filter_changed(black_box(edit.clone())))
    });

    group.bench_function("publish_one_subscriber", |b| {
        let store = FilterStore::new(mixed_list(100));
        let mut rx = store.subscribe();
        b.iter(|| {
            store.filter_changed(black_box(edit.clone()));
            black_box(rx.borrow_and_update().len())
        })
    });

    group.finish();
}

criterion_group!(query_benches, to_query_bench, filter_changed_bench, store_bench);
criterion_main!(query_benches);
