// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray sweep.
//!
//! Scatter random triangles, then sweep rays around a point and report the
//! nearest hit for each heading.
//!
//! Run:
//! - `cargo run -p canopy_demos --example ray_sweep`

use canopy_bvh::{Bvh, RandomTieBreak, SplitMethod};
use canopy_geom::{Direction, Triangle};
use kurbo::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(2025);
    let shapes: Vec<Triangle> = (0..500)
        .map(|_| {
            let x = rng.gen_range(-400.0..400.0);
            let y = rng.gen_range(-400.0..400.0);
            Triangle::new((x, y), (x + 12.0, y + 3.0), (x + 4.0, y + 10.0))
        })
        .collect();

    let mut bvh = Bvh::with_tie_break(RandomTieBreak::seeded(1))
        .with_split_method(SplitMethod::SurfaceArea);
    bvh.build(shapes);
    log::info!(
        "indexed {} triangles, height {:?}, bounds {:?}",
        bvh.len(),
        bvh.height(),
        bvh.bounds()
    );

    let eye = Point::ORIGIN;
    for step in 0..16 {
        let angle = f64::from(step) * core::f64::consts::TAU / 16.0;
        let Ok(dir) = Direction::new(angle.cos(), angle.sin()) else {
            continue;
        };
        match bvh.cast_ray(eye, dir) {
            Some(hit) => println!(
                "{:>6.1}°: hit at ({:.1}, {:.1}), distance {:.1}",
                angle.to_degrees(),
                hit.point.x,
                hit.point.y,
                hit.distance
            ),
            None => println!("{:>6.1}°: clear", angle.to_degrees()),
        }
    }
}
