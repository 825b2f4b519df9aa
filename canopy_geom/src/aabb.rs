// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned boxes and the box algebra used by the hierarchy.

use core::fmt;
use core::hash::{Hash, Hasher};

use kurbo::{Point, Rect};

use crate::direction::Direction;
use crate::ray::nearest_edge_hit;
use crate::shape::Shape;
use crate::tolerance::canonical_bits;
use crate::triangle::Triangle;

/// Axis-aligned bounding box, given by its minimum and maximum corners.
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y`. Bounds are inclusive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point,
    /// Maximum corner.
    pub max: Point,
}

impl Aabb {
    /// Create a box spanning two opposite corners, in any order.
    pub fn new(p: impl Into<Point>, q: impl Into<Point>) -> Self {
        let (p, q) = (p.into(), q.into());
        Self {
            min: Point::new(p.x.min(q.x), p.y.min(q.y)),
            max: Point::new(p.x.max(q.x), p.y.max(q.y)),
        }
    }

    /// Smallest box containing every point, or `None` when there are none.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        Some(it.fold(Self::new(first, first), |acc, p| {
            acc.union_with(&Self::new(p, p))
        }))
    }

    /// Union of all `boxes`: componentwise min of the minimum corners and max of
    /// the maximum corners. `None` when there are no boxes.
    pub fn union(boxes: impl IntoIterator<Item = Self>) -> Option<Self> {
        let mut it = boxes.into_iter();
        let first = it.next()?;
        Some(it.fold(first, |acc, b| acc.union_with(&b)))
    }

    /// Union of two boxes.
    pub fn union_with(&self, other: &Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Extent along `x`.
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along `y`.
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// `2 · (width + height)`.
    pub fn perimeter(&self) -> f64 {
        2.0 * (self.width() + self.height())
    }

    /// `width · height`.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// Whether the point lies inside or on the boundary.
    pub fn contains_point(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Whether `inner` lies entirely within this box (inclusive on both axes).
    pub fn contains_box(&self, inner: &Self) -> bool {
        self.min.x <= inner.min.x
            && inner.max.x <= self.max.x
            && self.min.y <= inner.min.y
            && inner.max.y <= self.max.y
    }

    /// The two triangles obtained by cutting the box along its
    /// `(min.x, max.y)`–`(max.x, min.y)` diagonal.
    pub fn diagonal_triangles(&self) -> [Triangle; 2] {
        let top_left = Point::new(self.min.x, self.max.y);
        let bottom_right = Point::new(self.max.x, self.min.y);
        [
            Triangle::new(self.min, top_left, bottom_right),
            Triangle::new(self.max, top_left, bottom_right),
        ]
    }

    /// Whether a ray from `origin` along `direction` touches the box.
    ///
    /// Reuses the triangle ray test against both halves of the box, so it follows
    /// the same tolerances and forward-of-origin rule.
    pub fn does_ray_intersect(&self, origin: Point, direction: Direction) -> bool {
        self.diagonal_triangles()
            .iter()
            .any(|t| t.find_intersection(origin, direction).is_some())
    }

    /// The four boundary edges.
    pub fn edges(&self) -> [(Point, Point); 4] {
        let top_left = Point::new(self.min.x, self.max.y);
        let bottom_right = Point::new(self.max.x, self.min.y);
        [
            (self.min, bottom_right),
            (bottom_right, self.max),
            (self.max, top_left),
            (top_left, self.min),
        ]
    }

    /// Convert to a Kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::from_points(self.min, self.max)
    }
}

impl From<Rect> for Aabb {
    fn from(r: Rect) -> Self {
        Self::new((r.x0, r.y0), (r.x1, r.y1))
    }
}

impl Shape for Aabb {
    fn min_corner(&self) -> Point {
        self.min
    }

    fn max_corner(&self) -> Point {
        self.max
    }

    fn bounds(&self) -> Aabb {
        *self
    }

    fn centroid(&self) -> Point {
        self.center()
    }

    fn contains_point(&self, p: Point) -> bool {
        Self::contains_point(self, p)
    }

    fn find_intersection(&self, origin: Point, direction: Direction) -> Option<Point> {
        nearest_edge_hit(origin, direction, self.edges())
    }
}

impl Eq for Aabb {}

impl Hash for Aabb {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in [self.min.x, self.min.y, self.max.x, self.max.y] {
            canonical_bits(v).hash(state);
        }
    }
}

impl fmt::Display for Aabb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}), ({}, {})]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}
