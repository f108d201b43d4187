//! TOC merging benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use quire_core::toc::merge_tocs;
use quire_core::Converter;

/// Fragments of `count` documents with three heading levels each
fn fragments(count: usize) -> Vec<String> {
    let converter = Converter::default();
    (0..count)
        .map(|i| {
            let markdown = format!(
                "# Chapter {i}\n\n## Part one\n\n### Detail\n\n## Part two\n\n### Detail\n"
            );
            converter.convert(&markdown).unwrap().toc_fragment
        })
        .collect()
}

fn toc_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_tocs");
    for count in [10, 100] {
        let input = fragments(count);
        for depth in [0, 1, 2] {
            group.bench_with_input(
                BenchmarkId::new(format!("depth_{depth}"), count),
                &input,
                |b, input| b.iter(|| merge_tocs(std::hint::black_box(input), depth)),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, toc_benchmark);
criterion_main!(benches);
