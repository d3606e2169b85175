//! Benchmarks for owners-client-core
//!
//! Run with: cargo bench -p owners-client-core --features generate
//!
//! Filter benchmarks:
//!   cargo bench -- "suggest"
//!   cargo bench -- "combinations"

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use owners_client_core::generate::generate_owners_file;
use owners_client_core::local::parse_owners_file;
use owners_client_core::suggest::OwnerCombinations;
use owners_client_core::{SuggestConfig, suggest_owners};

mod fixtures;
use fixtures::fixtures;

/// Benchmark the suggestion search across all fixture sizes
fn bench_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");
    let config = SuggestConfig::default();

    for (name, fixture) in fixtures() {
        group.throughput(Throughput::Elements(fixture.paths.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("suggest_owners", name),
            fixture,
            |b, fixture| {
                b.iter(|| {
                    suggest_owners(
                        std::hint::black_box(&fixture.paths),
                        &fixture.owners_by_path,
                        &config,
                    )
                })
            },
        );
    }
    group.finish();
}

/// Benchmark raw combination enumeration
fn bench_combinations(c: &mut Criterion) {
    let mut group = c.benchmark_group("combinations");

    for (len, k) in [(10, 2), (16, 3), (20, 4)] {
        group.bench_function(BenchmarkId::new("enumerate", format!("{len}C{k}")), |b| {
            b.iter(|| OwnerCombinations::new(std::hint::black_box(len), k).count())
        });
    }
    group.finish();
}

/// Benchmark OWNERS file parsing
fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    for (name, fixture) in fixtures() {
        let content = generate_owners_file(fixture);
        group.throughput(Throughput::Bytes(content.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("parse_owners_file", name),
            &content,
            |b, input| b.iter(|| parse_owners_file(std::hint::black_box(input))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_suggest, bench_combinations, bench_parsing);
criterion_main!(benches);
