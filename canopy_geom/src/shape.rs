// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The capability set shared by indexable shapes.

use core::fmt;

use kurbo::Point;

use crate::aabb::Aabb;
use crate::direction::Direction;
use crate::triangle::Triangle;

/// A 2D shape that can be stored in a bounding volume hierarchy.
pub trait Shape {
    /// Minimum corner of the tight bounding box.
    fn min_corner(&self) -> Point;

    /// Maximum corner of the tight bounding box.
    fn max_corner(&self) -> Point;

    /// Tight bounding box, spanning [`min_corner`](Self::min_corner) to
    /// [`max_corner`](Self::max_corner).
    fn bounds(&self) -> Aabb {
        Aabb {
            min: self.min_corner(),
            max: self.max_corner(),
        }
    }

    /// Representative center used to order shapes when building a hierarchy.
    fn centroid(&self) -> Point;

    /// Whether the point lies inside the shape or on its boundary.
    fn contains_point(&self, point: Point) -> bool;

    /// Nearest point where a ray from `origin` along `direction` meets the
    /// shape's boundary, or `None` when it misses.
    fn find_intersection(&self, origin: Point, direction: Direction) -> Option<Point>;
}

/// Any of the built-in shapes, for hierarchies that mix shape kinds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// A triangle.
    Triangle(Triangle),
    /// An axis-aligned rectangle.
    Rect(Aabb),
}

impl Primitive {
    fn as_shape(&self) -> &dyn Shape {
        match self {
            Self::Triangle(t) => t,
            Self::Rect(r) => r,
        }
    }
}

impl Shape for Primitive {
    fn min_corner(&self) -> Point {
        self.as_shape().min_corner()
    }

    fn max_corner(&self) -> Point {
        self.as_shape().max_corner()
    }

    fn centroid(&self) -> Point {
        self.as_shape().centroid()
    }

    fn contains_point(&self, point: Point) -> bool {
        self.as_shape().contains_point(point)
    }

    fn find_intersection(&self, origin: Point, direction: Direction) -> Option<Point> {
        self.as_shape().find_intersection(origin, direction)
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Self {
        Self::Triangle(t)
    }
}

impl From<Aabb> for Primitive {
    fn from(r: Aabb) -> Self {
        Self::Rect(r)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Triangle(t) => fmt::Display::fmt(t, f),
            Self::Rect(r) => fmt::Display::fmt(r, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_delegates() {
        let t: Primitive = Triangle::new((0.0, 0.0), (4.0, 0.0), (0.0, 4.0)).into();
        let r: Primitive = Aabb::new((10.0, 10.0), (12.0, 14.0)).into();

        assert!(t.contains_point(Point::new(1.0, 1.0)));
        assert!(!r.contains_point(Point::new(1.0, 1.0)));
        assert_eq!(r.bounds(), Aabb::new((10.0, 10.0), (12.0, 14.0)));
        assert_eq!(r.centroid(), Point::new(11.0, 12.0));
        assert_eq!(
            r.find_intersection(Point::new(11.0, 0.0), Direction::POS_Y),
            Some(Point::new(11.0, 10.0))
        );
        assert_eq!(t.to_string(), "(0, 0) (4, 0) (0, 4)");
        assert_eq!(r.to_string(), "[(10, 10), (12, 14)]");
    }

    #[test]
    fn different_kinds_are_never_equal() {
        let t: Primitive = Triangle::new((0.0, 0.0), (1.0, 0.0), (0.0, 1.0)).into();
        let r: Primitive = Aabb::new((0.0, 0.0), (1.0, 1.0)).into();
        assert_ne!(t, r);
    }
}
