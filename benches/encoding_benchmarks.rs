/*!
# Encoding Benchmarks

Benchmarks for building flat and nested CRNK query parameters.

## Usage

```bash
# Run all benchmarks
cargo bench --bench encoding_benchmarks

# Run specific benchmark group
cargo bench --bench encoding_benchmarks -- "Nested Encoding"

# Quick benchmark with fewer samples
cargo bench --bench encoding_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use crnk_query::{
    BasicFilter, FilterCollection, FilterOperator, FilterSpec, FilterValue, NestedFilter,
    NestingOperator, PaginationSpec, SortSpec,
};
use std::time::Duration;

// Filters over dotted paths of increasing depth, with a mix of operators and values
fn generate_filters(count: usize) -> Vec<FilterSpec> {
    (0..count)
        .map(|i| {
            let path = match i % 3 {
                0 => format!("user.field{i}"),
                1 => format!("user.contact.field{i}"),
                _ => format!("user.address.city.street.field{i}"),
            };
            match i % 4 {
                0 => FilterSpec::new(path, format!("  value{i}  "), FilterOperator::Like),
                1 => FilterSpec::new(path, i64::try_from(i).unwrap_or(i64::MAX), FilterOperator::Ge),
                2 => FilterSpec::equals(path, vec![Some("a"), None, Some("  "), Some("b")]),
                _ => FilterSpec::nullable(path, FilterValue::Null, FilterOperator::Eq),
            }
        })
        .collect()
}

fn bench_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Validation");

    for size in [10, 100, 1000] {
        let specs = generate_filters(size);
        group.bench_with_input(BenchmarkId::new("filter_collection", size), &specs, |b, specs| {
            b.iter(|| FilterCollection::new(std::hint::black_box(specs.clone())));
        });
    }

    group.finish();
}

fn bench_basic_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Basic Encoding");

    for size in [10, 100, 1000] {
        let mut filter = BasicFilter::new(generate_filters(size)).include(["user", "client"]);
        filter.sort_by([SortSpec::asc("user.name"), SortSpec::desc("user.number")]);

        group.bench_with_input(BenchmarkId::new("http_params", size), &filter, |b, filter| {
            b.iter(|| std::hint::black_box(filter.http_params()));
        });
    }

    group.finish();
}

fn bench_nested_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Nested Encoding");

    for size in [10, 100, 1000] {
        let inner = NestedFilter::new(generate_filters(size / 2));
        let filter = NestedFilter::new(generate_filters(size))
            .with_nesting_condition(NestingOperator::Or)
            .with_inner_filter(&inner);

        group.bench_with_input(
            BenchmarkId::new("build_filter_string", size),
            &filter,
            |b, filter| {
                b.iter(|| std::hint::black_box(filter.build_filter_string()));
            },
        );

        let pagination = PaginationSpec::default();
        group.bench_with_input(
            BenchmarkId::new("encoded_with_pagination", size),
            &filter,
            |b, filter| {
                b.iter(|| {
                    std::hint::black_box(
                        pagination
                            .set_http_params(filter.http_params())
                            .to_encoded_string(),
                    )
                });
            },
        );
    }

    group.finish();
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
        .with_plots()
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_validation, bench_basic_encoding, bench_nested_encoding
}
criterion_main!(benches);
