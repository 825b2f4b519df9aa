// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Geom: the 2D shapes indexed by Canopy's bounding volume hierarchy.
//!
//! - [`Direction`]: a validated, non-zero ray heading.
//! - [`Triangle`]: order-insensitive equality, area-sum containment, and nearest-edge ray hits.
//! - [`Aabb`]: axis-aligned boxes with the union/perimeter/containment algebra a hierarchy needs.
//! - [`Shape`]: the capability set every indexable shape provides, and [`Primitive`] to mix kinds.
//!
//! Points and vectors are [Kurbo](kurbo) types with `f64` coordinates. Coordinates are
//! assumed to be finite. Tolerant comparisons use the absolute [`EPSILON`].
//!
//! # Example
//!
//! ```rust
//! use canopy_geom::{Direction, Shape, Triangle};
//! use kurbo::Point;
//!
//! let t = Triangle::new((10.0, -5.0), (10.0, 5.0), (20.0, 0.0));
//! assert!(t.contains_point(Point::new(12.0, 0.0)));
//!
//! let hit = t.find_intersection(Point::ORIGIN, Direction::POS_X);
//! assert_eq!(hit, Some(Point::new(10.0, 0.0)));
//!
//! assert!(Direction::new(0.0, 0.0).is_err());
//! ```
//!
//! ## Ray rule
//!
//! A ray hit is accepted when it is in front of the origin on each axis separately rather
//! than by a single parametric test; see the [`ray`] module.

pub mod aabb;
pub mod direction;
pub mod ray;
pub mod shape;
pub mod tolerance;
pub mod triangle;

pub use aabb::Aabb;
pub use direction::{Direction, DirectionError};
pub use shape::{Primitive, Shape};
pub use tolerance::EPSILON;
pub use triangle::Triangle;
