//! Benchmarks for Honeycomb Topology
//!
//! Measures performance of:
//! - Closed-form spiral index to coordinate mapping
//! - Incremental cursor walk vs. batch generation
//! - Pixel projection

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use honeycomb_topology::{
    coord_to_spiral, spiral_coords, spiral_to_coord, HexLayout, Spiral, SpiralIndex,
};

/// Benchmark spiral index to coordinate conversion
fn bench_spiral_to_coord(c: &mut Criterion) {
    let mut group = c.benchmark_group("spiral_to_coord");

    for &index in &[0u64, 10, 100, 1000, 10_000, 100_000, 1_000_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(index), &index, |b, &idx| {
            b.iter(|| spiral_to_coord(black_box(SpiralIndex(idx))))
        });
    }
    group.finish();
}

/// Benchmark the inverse mapping
fn bench_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("roundtrip");

    for &index in &[0u64, 100, 1000, 10_000] {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(index), &index, |b, &idx| {
            b.iter(|| coord_to_spiral(spiral_to_coord(SpiralIndex(black_box(idx)))))
        });
    }
    group.finish();
}

/// Incremental walk against the closed-form batch
fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");

    for &count in &[30usize, 1000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("cursor", count), &count, |b, &n| {
            b.iter(|| Spiral::new().take(black_box(n)).count())
        });
        group.bench_with_input(BenchmarkId::new("batch", count), &count, |b, &n| {
            b.iter(|| spiral_coords(black_box(n)))
        });
    }
    group.finish();
}

/// Projection of a full grid
fn bench_projection(c: &mut Criterion) {
    let mut group = c.benchmark_group("projection");
    let layout = HexLayout::default();

    for &count in &[100usize, 1000] {
        let coords = spiral_coords(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &coords, |b, coords| {
            b.iter(|| {
                coords
                    .iter()
                    .map(|&c| layout.project(black_box(c)))
                    .fold(0.0f32, |acc, p| acc + p.x)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_spiral_to_coord,
    bench_roundtrip,
    bench_generation,
    bench_projection,
);

criterion_main!(benches);
