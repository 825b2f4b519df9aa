// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ray against segment intersection.
//!
//! Each segment is extended to an infinite line and intersected with the line
//! carrying the ray by solving the 2×2 system `a·x + b·y = c`. A candidate point
//! is accepted when it lies inside the segment's bounding box and is in front of
//! the ray on *each axis independently*: on an axis, the point must be at or past
//! the origin in the sign of the unit heading, and a zero component accepts either
//! side on that axis.
//!
//! Parallel lines are checked for coincidence by comparing normalized line
//! coefficients. A segment lying on the ray's line reports its endpoint nearest
//! the origin.

use kurbo::{Point, Vec2};

use crate::direction::Direction;
use crate::tolerance::{EPSILON, is_close, is_close_or_greater};

/// Implicit line `a·x + b·y = c`.
#[derive(Copy, Clone, Debug)]
struct Line {
    a: f64,
    b: f64,
    c: f64,
}

impl Line {
    fn through(p: Point, q: Point) -> Self {
        let a = q.y - p.y;
        let b = p.x - q.x;
        Self {
            a,
            b,
            c: a * p.x + b * p.y,
        }
    }

    fn intersect(self, other: Self) -> Option<Point> {
        let det = self.a * other.b - other.a * self.b;
        if is_close(det, 0.0) {
            return None;
        }
        let x = (other.b * self.c - self.b * other.c) / det;
        let y = (self.a * other.c - other.a * self.c) / det;
        Some(Point::new(x, y))
    }

    /// Unit-normal form with a canonical sign, or `None` for a degenerate line.
    fn normalized(self) -> Option<Self> {
        let len = self.a.hypot(self.b);
        if len < EPSILON {
            return None;
        }
        let flip = self.a < -EPSILON || (is_close(self.a, 0.0) && self.b < 0.0);
        let s = if flip { -1.0 / len } else { 1.0 / len };
        Some(Self {
            a: self.a * s,
            b: self.b * s,
            c: self.c * s,
        })
    }

    fn coincides(self, other: Self) -> bool {
        match (self.normalized(), other.normalized()) {
            (Some(l), Some(m)) => is_close(l.a, m.a) && is_close(l.b, m.b) && is_close(l.c, m.c),
            _ => false,
        }
    }
}

fn in_segment_box(hit: Point, p: Point, q: Point) -> bool {
    is_close_or_greater(hit.x, p.x.min(q.x))
        && is_close_or_greater(p.x.max(q.x), hit.x)
        && is_close_or_greater(hit.y, p.y.min(q.y))
        && is_close_or_greater(p.y.max(q.y), hit.y)
}

fn ahead_on_axis(hit: f64, origin: f64, d: f64) -> bool {
    (is_close_or_greater(hit, origin) && is_close_or_greater(d, 0.0))
        || (is_close_or_greater(origin, hit) && is_close_or_greater(0.0, d))
}

fn ahead_of(hit: Point, origin: Point, heading: Vec2) -> bool {
    ahead_on_axis(hit.x, origin.x, heading.x) && ahead_on_axis(hit.y, origin.y, heading.y)
}

/// Where the ray from `origin` along `direction` meets the segment `p`–`q`.
pub fn segment_hit(origin: Point, direction: Direction, p: Point, q: Point) -> Option<Point> {
    // The ray's line is built from the unit heading so the parallel test does not
    // depend on the caller's direction length.
    let heading = direction.unit();
    let ray = Line::through(origin, origin + heading);
    let edge = Line::through(p, q);
    let hit = match ray.intersect(edge) {
        Some(hit) => hit,
        None if ray.coincides(edge) => {
            if origin.distance(p) < origin.distance(q) {
                p
            } else {
                q
            }
        }
        None => return None,
    };
    (in_segment_box(hit, p, q) && ahead_of(hit, origin, heading)).then_some(hit)
}

/// Nearest hit of the ray against any of `edges`, by Euclidean distance to `origin`.
///
/// On equal distances the earlier edge wins.
pub fn nearest_edge_hit(
    origin: Point,
    direction: Direction,
    edges: impl IntoIterator<Item = (Point, Point)>,
) -> Option<Point> {
    edges
        .into_iter()
        .filter_map(|(p, q)| segment_hit(origin, direction, p, q))
        .min_by(|a, b| origin.distance(*a).total_cmp(&origin.distance(*b)))
}
