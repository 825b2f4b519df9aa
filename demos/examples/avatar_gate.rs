// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Avatar gate.
//!
//! A square avatar walks through a field of obstacles. Before each step it probes
//! its four corners and center at the destination with `find_collision`, and only
//! moves when all five probes come back empty. When blocked it tries the next
//! heading in its list, so it slides around obstacles.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p canopy_demos --example avatar_gate`

use canopy_bvh::Bvh;
use canopy_geom::{Aabb, Primitive, Shape, Triangle};
use kurbo::{Point, Vec2};

const HALF: f64 = 2.0;
const STEP: f64 = 1.5;

fn probes(center: Point) -> [Point; 5] {
    [
        center,
        center + Vec2::new(-HALF, -HALF),
        center + Vec2::new(HALF, -HALF),
        center + Vec2::new(HALF, HALF),
        center + Vec2::new(-HALF, HALF),
    ]
}

fn is_free(field: &Bvh<Primitive>, center: Point) -> bool {
    probes(center)
        .into_iter()
        .all(|p| field.find_collision(p).is_empty())
}

fn main() {
    env_logger::init();

    let mut field: Bvh<Primitive> = Bvh::new();
    field.build([
        Aabb::new((20.0, -10.0), (24.0, 10.0)).into(),
        Triangle::new((40.0, 4.0), (50.0, 4.0), (45.0, 20.0)).into(),
        Triangle::new((40.0, -4.0), (50.0, -4.0), (45.0, -20.0)).into(),
        Aabb::new((70.0, -30.0), (74.0, 2.0)).into(),
    ]);
    print!("{field}");

    let headings = [
        Vec2::new(STEP, 0.0),
        Vec2::new(0.0, STEP),
        Vec2::new(0.0, -STEP),
    ];
    let goal_x = 90.0;
    let mut avatar = Point::new(0.0, 0.0);
    let mut moves = 0;
    while avatar.x < goal_x && moves < 500 {
        moves += 1;
        let Some(next) = headings
            .iter()
            .map(|h| avatar + *h)
            .find(|p| is_free(&field, *p))
        else {
            log::warn!("avatar stuck at {avatar:?}");
            break;
        };
        if next.y != avatar.y {
            log::debug!("blocked ahead of {avatar:?}; sliding to {next:?}");
        }
        avatar = next;
    }
    println!("avatar reached ({:.1}, {:.1}) after {moves} moves", avatar.x, avatar.y);

    // Every position the avatar stands on keeps all five probes clear.
    assert!(probes(avatar).iter().all(|p| {
        field
            .iter()
            .all(|shape| !shape.contains_point(*p))
    }));
}
