// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_bvh::{Bvh, RandomTieBreak, SplitMethod};
use canopy_geom::{Direction, Triangle};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn gen_grid_triangles(n: usize, cell: f64) -> Vec<Triangle> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Triangle::new(
                (x0, y0),
                (x0 + cell, y0),
                (x0 + 0.5 * cell, y0 + cell),
            ));
        }
    }
    out
}

fn gen_random_triangles(count: usize, extent: f64, size: f64) -> Vec<Triangle> {
    let mut rng = StdRng::seed_from_u64(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| {
            let x0 = rng.gen_range(0.0..extent);
            let y0 = rng.gen_range(0.0..extent);
            let w = rng.gen_range(1.0..size);
            let h = rng.gen_range(1.0..size);
            Triangle::new((x0, y0), (x0 + w, y0), (x0, y0 + h))
        })
        .collect()
}

fn seeded() -> Bvh<Triangle, RandomTieBreak> {
    Bvh::with_tie_break(RandomTieBreak::seeded(7))
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[32usize, 64, 128] {
        let shapes = gen_grid_triangles(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        for method in SplitMethod::ALL {
            group.bench_function(format!("{method:?}_grid_n{n}"), |b| {
                b.iter_batched(
                    || shapes.clone(),
                    |shapes| {
                        let mut bvh = seeded().with_split_method(method);
                        bvh.build(shapes);
                        black_box(bvh.height());
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_insert_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("incremental");
    let shapes = gen_random_triangles(4096, 2000.0, 20.0);
    group.throughput(Throughput::Elements(shapes.len() as u64));
    group.bench_function("insert_random", |b| {
        b.iter_batched(
            seeded,
            |mut bvh| {
                for s in &shapes {
                    bvh.insert(*s);
                }
                black_box(bvh.len());
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("remove_half_random", |b| {
        b.iter_batched(
            || {
                let mut bvh = seeded();
                bvh.build(shapes.iter().copied());
                bvh
            },
            |mut bvh| {
                for s in shapes.iter().step_by(2) {
                    bvh.remove(s);
                }
                black_box(bvh.len());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let shapes = gen_random_triangles(8192, 2000.0, 40.0);
    let bvh = Bvh::from_shapes(shapes);
    let mut rng = StdRng::seed_from_u64(0xBADC_F00D_1234_5678);
    let points: Vec<Point> = (0..256)
        .map(|_| Point::new(rng.gen_range(0.0..2000.0), rng.gen_range(0.0..2000.0)))
        .collect();
    group.bench_function("find_collision_256", |b| {
        b.iter(|| {
            let total: usize = points.iter().map(|p| bvh.find_collision(*p).len()).sum();
            black_box(total);
        });
    });

    // A fan of rays cast from the middle of the field.
    let center = Point::new(1000.0, 1000.0);
    let fan: Vec<Direction> = (0..256)
        .filter_map(|i| {
            let angle = f64::from(i) * core::f64::consts::TAU / 256.0;
            Direction::new(angle.cos(), angle.sin()).ok()
        })
        .collect();
    group.bench_function("intersect_ray_fan_256", |b| {
        b.iter(|| {
            let hits = fan
                .iter()
                .filter(|d| bvh.intersect_ray(center, **d).is_some())
                .count();
            black_box(hits);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_insert_remove, bench_queries);
criterion_main!(benches);
