// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Triangles.

use core::fmt;
use core::hash::{Hash, Hasher};

use kurbo::Point;

use crate::direction::Direction;
use crate::ray::nearest_edge_hit;
use crate::shape::Shape;
use crate::tolerance::{canonical_bits, is_close_relative};

/// A triangle given by three corner points.
///
/// Equality ignores vertex order: any permutation of the same three corners is
/// the same triangle, and [`Hash`] agrees with that. Coordinates are assumed to be
/// finite.
#[derive(Copy, Clone, Debug)]
pub struct Triangle {
    /// First corner.
    pub a: Point,
    /// Second corner.
    pub b: Point,
    /// Third corner.
    pub c: Point,
}

impl Triangle {
    /// Create a triangle from three corners.
    pub fn new(a: impl Into<Point>, b: impl Into<Point>, c: impl Into<Point>) -> Self {
        let (a, b, c) = (a.into(), b.into(), c.into());
        debug_assert!(
            [a, b, c].iter().all(|p| p.is_finite()),
            "triangle corners must be finite"
        );
        Self { a, b, c }
    }

    /// The three corners in construction order.
    pub const fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edges: `a–b`, `a–c`, `b–c`.
    pub const fn edges(&self) -> [(Point, Point); 3] {
        [(self.a, self.b), (self.a, self.c), (self.b, self.c)]
    }

    /// Unsigned area.
    pub fn area(&self) -> f64 {
        area3(self.a, self.b, self.c)
    }

    fn sorted_vertices(&self) -> [Point; 3] {
        // `+ 0.0` folds `-0.0` into `0.0` so equal triangles sort the same way.
        let mut v = self.vertices().map(|p| Point::new(p.x + 0.0, p.y + 0.0));
        v.sort_by(|p, q| p.x.total_cmp(&q.x).then(p.y.total_cmp(&q.y)));
        v
    }
}

fn area3(a: Point, b: Point, c: Point) -> f64 {
    ((a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) / 2.0).abs()
}

impl Shape for Triangle {
    fn min_corner(&self) -> Point {
        Point::new(
            self.a.x.min(self.b.x).min(self.c.x),
            self.a.y.min(self.b.y).min(self.c.y),
        )
    }

    fn max_corner(&self) -> Point {
        Point::new(
            self.a.x.max(self.b.x).max(self.c.x),
            self.a.y.max(self.b.y).max(self.c.y),
        )
    }

    fn centroid(&self) -> Point {
        Point::new(
            (self.a.x + self.b.x + self.c.x) / 3.0,
            (self.a.y + self.b.y + self.c.y) / 3.0,
        )
    }

    /// Area-sum test: `p` is inside (or on an edge) when the three triangles it
    /// forms with the edges add up to the whole area.
    fn contains_point(&self, p: Point) -> bool {
        let whole = self.area();
        let parts = area3(p, self.b, self.c) + area3(self.a, p, self.c) + area3(self.a, self.b, p);
        is_close_relative(whole, parts)
    }

    fn find_intersection(&self, origin: Point, direction: Direction) -> Option<Point> {
        nearest_edge_hit(origin, direction, self.edges())
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        let [a, b, c] = other.vertices();
        [[a, b, c], [a, c, b], [b, a, c], [b, c, a], [c, a, b], [c, b, a]]
            .iter()
            .any(|perm| *perm == self.vertices())
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for p in self.sorted_vertices() {
            canonical_bits(p.x).hash(state);
            canonical_bits(p.y).hash(state);
        }
    }
}

impl fmt::Display for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) ({}, {}) ({}, {})",
            self.a.x, self.a.y, self.b.x, self.b.y, self.c.x, self.c.y
        )
    }
}
