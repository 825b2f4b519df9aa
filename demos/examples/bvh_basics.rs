// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! BVH basics.
//!
//! Build a small hierarchy, print its dump, query it, then remove a shape.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p canopy_demos --example bvh_basics`

use canopy_bvh::{Bvh, FixedTieBreak};
use canopy_geom::{Direction, Triangle};
use kurbo::Point;

fn main() {
    env_logger::init();

    let left = Triangle::new((-12.0, -4.0), (-8.0, 2.0), (-5.0, -3.0));
    let middle = Triangle::new((5.0, 1.0), (8.0, 6.0), (10.0, 2.0));
    let right = Triangle::new((15.0, -6.0), (18.0, -2.0), (20.0, -5.0));

    let mut bvh = Bvh::with_tie_break(FixedTieBreak::Left);
    bvh.build([left, middle, right]);
    print!("{bvh}");

    let hits = bvh.find_collision(Point::new(-8.0, -1.0));
    println!("shapes under (-8, -1): {}", hits.len());
    assert!(hits.contains(&left));

    let hit = bvh
        .cast_ray(Point::new(0.0, 3.0), Direction::POS_X)
        .expect("the ray crosses the middle triangle");
    println!("ray hit {} at {:?}, distance {:.3}", hit.shape, hit.point, hit.distance);
    assert_eq!(*hit.shape, middle);

    assert!(bvh.remove(&middle));
    assert!(!bvh.remove(&middle), "second removal is a no-op");
    print!("{bvh}");

    // Without the middle triangle the same ray runs into nothing.
    assert!(bvh.intersect_ray(Point::new(0.0, 3.0), Direction::POS_X).is_none());
}
