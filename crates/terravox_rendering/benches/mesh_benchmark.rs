//! Benchmark for surface extraction.
//!
//! Run with: cargo bench --package terravox_rendering --bench mesh_benchmark

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use terravox_procedural::{ElevationModel, GenerationConfig, VoxelGrid};
use terravox_rendering::SurfaceMesher;

fn benchmark_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("surface_extract");
    group.sample_size(10);

    for size in [32usize, 64] {
        let mut config = GenerationConfig::default();
        config.world.size_x = size;
        config.world.size_z = size;
        let model = ElevationModel::new(&config).unwrap();
        let grid = VoxelGrid::build(config.dimensions().unwrap(), &model);
        let mesher = SurfaceMesher::new();

        group.throughput(Throughput::Elements(grid.dims().volume() as u64));
        group.bench_function(format!("extract_{size}x{}x{size}", grid.dims().height), |b| {
            b.iter(|| black_box(mesher.extract(black_box(&grid))));
        });
    }

    group.finish();
}

fn benchmark_interleave(c: &mut Criterion) {
    let mut config = GenerationConfig::default();
    config.world.size_x = 64;
    config.world.size_z = 64;
    let model = ElevationModel::new(&config).unwrap();
    let grid = VoxelGrid::build(config.dimensions().unwrap(), &model);
    let mesh = SurfaceMesher::new().extract(&grid);

    c.bench_function("interleave_64", |b| {
        b.iter(|| black_box(mesh.interleaved()));
    });
}

criterion_group!(benches, benchmark_extract, benchmark_interleave);
criterion_main!(benches);
