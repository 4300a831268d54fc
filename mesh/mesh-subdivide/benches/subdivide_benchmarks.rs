//! Benchmarks for mesh-subdivide operations.
//!
//! Run with: cargo bench -p mesh-subdivide
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p mesh-subdivide -- --save-baseline main
//! 2. After changes: cargo bench -p mesh-subdivide -- --baseline main

#![allow(clippy::cast_precision_loss)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mesh_subdivide::{
    ChaikinParams, SubdivideParams, SubdivisionMethod, subdivide_mesh, subdivide_polyline,
};
use mesh_types::{PolyMesh, Point3, octahedron, triangulated_cube, unit_cube};

// =============================================================================
// Test Mesh Generation
// =============================================================================

/// Refine a seed with Butterfly so the input has many regular vertices
/// without being smoothed away.
fn dense(seed: &PolyMesh, levels: u32) -> PolyMesh {
    let params = SubdivideParams::butterfly().with_iterations(levels);
    subdivide_mesh(seed, &params).map_or_else(|_| seed.clone(), |r| r.mesh)
}

/// Points on a helix.
fn helix(points: usize) -> Vec<Point3<f64>> {
    (0..points)
        .map(|i| {
            let t = i as f64 * 0.2;
            Point3::new(t.cos(), t.sin(), t * 0.1)
        })
        .collect()
}

// =============================================================================
// Mesh Scheme Benchmarks
// =============================================================================

fn bench_single_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("SinglePass");

    let triangle_cases = [
        ("octahedron_512tri", dense(&octahedron(), 3)),
        ("cube_3072tri", dense(&triangulated_cube(), 4)),
    ];

    for method in SubdivisionMethod::ALL {
        let params = SubdivideParams::default().with_method(method);
        for (name, mesh) in &triangle_cases {
            group.throughput(Throughput::Elements(mesh.faces.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(format!("{method:?}"), name),
                mesh,
                |b, mesh| {
                    b.iter(|| subdivide_mesh(black_box(mesh), black_box(&params)));
                },
            );
        }
    }

    group.finish();
}

fn bench_catmull_clark_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("CatmullClarkLevels");
    group.sample_size(20); // Level 5 is ~6k faces per pass at the end

    let cube = unit_cube();
    for levels in 1..=5u32 {
        let params = SubdivideParams::catmull_clark().with_iterations(levels);
        group.bench_with_input(BenchmarkId::new("cube", levels), &params, |b, params| {
            b.iter(|| subdivide_mesh(black_box(&cube), black_box(params)));
        });
    }

    group.finish();
}

// =============================================================================
// Chaikin Benchmarks
// =============================================================================

fn bench_chaikin(c: &mut Criterion) {
    let mut group = c.benchmark_group("Chaikin");

    for points in [100usize, 1_000, 10_000] {
        let line = helix(points);
        let params = ChaikinParams::classic().with_iterations(3);
        group.throughput(Throughput::Elements(points as u64));
        group.bench_with_input(BenchmarkId::new("helix", points), &line, |b, line| {
            b.iter(|| subdivide_polyline(black_box(line), black_box(&params)));
        });
    }

    group.finish();
}

// =============================================================================
// Criterion Setup
// =============================================================================

criterion_group!(
    benches,
    bench_single_pass,
    bench_catmull_clark_levels,
    bench_chaikin
);
criterion_main!(benches);
