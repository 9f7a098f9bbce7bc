//! Benchmark for noise and spline sampling.
//!
//! Run with: cargo bench --package terravox_procedural --bench noise_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use terravox_procedural::{PerlinNoise, SplineCurve, SplineConfig, WorldSeed};

fn benchmark_single_sample(c: &mut Criterion) {
    let noise = PerlinNoise::new(WorldSeed::new(42), 0.01);

    c.bench_function("perlin_single_sample", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.sample(black_box(x), black_box(x * 0.7)))
        });
    });
}

fn benchmark_million_samples(c: &mut Criterion) {
    let noise = PerlinNoise::new(WorldSeed::new(42), 0.01);

    let mut group = c.benchmark_group("million_samples");
    group.throughput(Throughput::Elements(1_000_000));
    group.sample_size(10);

    group.bench_function("1M_perlin_samples", |b| {
        b.iter(|| {
            for i in 0..1_000_000 {
                let x = f64::from(i % 1000);
                let y = f64::from(i / 1000);
                black_box(noise.sample(x, y));
            }
        });
    });

    group.finish();
}

fn benchmark_fractal(c: &mut Criterion) {
    let noise = PerlinNoise::new(WorldSeed::new(42), 0.01);

    c.bench_function("fractal_4_octaves", |b| {
        let mut x = 0.0f64;
        b.iter(|| {
            x += 0.1;
            black_box(noise.fractal(black_box(x), black_box(x * 0.7), 4, 0.5, 2.0))
        });
    });
}

fn benchmark_spline(c: &mut Criterion) {
    let spline = SplineCurve::from_pairs("stone", &SplineConfig::default().stone).unwrap();

    c.bench_function("stone_spline_interpolate", |b| {
        let mut x = -1.0f64;
        b.iter(|| {
            x = if x > 1.0 { -1.0 } else { x + 0.001 };
            black_box(spline.interpolate(black_box(x)))
        });
    });
}

criterion_group!(
    benches,
    benchmark_single_sample,
    benchmark_million_samples,
    benchmark_fractal,
    benchmark_spline
);
criterion_main!(benches);
