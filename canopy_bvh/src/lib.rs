// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy BVH: a self-balancing bounding volume hierarchy over 2D shapes.
//!
//! - Batch [`build`](Bvh::build) by recursive centroid splitting ([`SplitMethod`]).
//! - Incremental [`insert`](Bvh::insert) and [`remove`](Bvh::remove) with AVL rotations.
//! - [`find_collision`](Bvh::find_collision): every shape containing a point.
//! - [`intersect_ray`](Bvh::intersect_ray): the shape whose boundary a ray meets first.
//! - A tab-indented pre-order text dump through [`Display`](core::fmt::Display).
//!
//! Any type implementing [`Shape`](canopy_geom::Shape) can be indexed; the
//! [`Triangle`](canopy_geom::Triangle) and [`Primitive`](canopy_geom::Primitive)
//! types from `canopy_geom` are the usual choices.
//!
//! # Example
//!
//! ```rust
//! use canopy_bvh::{Bvh, FixedTieBreak};
//! use canopy_geom::{Direction, Triangle};
//! use kurbo::Point;
//!
//! let near = Triangle::new((10.0, -5.0), (10.0, 5.0), (20.0, 0.0));
//! let far = Triangle::new((40.0, -5.0), (40.0, 5.0), (55.0, 0.0));
//!
//! let mut bvh = Bvh::with_tie_break(FixedTieBreak::Left);
//! bvh.build([far, near]);
//!
//! assert_eq!(bvh.intersect_ray(Point::ORIGIN, Direction::POS_X), Some(&near));
//! assert!(bvh.find_collision(Point::new(12.0, 0.0)).contains(&near));
//!
//! assert!(bvh.remove(&near));
//! assert!(!bvh.remove(&near));
//! assert_eq!(bvh.len(), 1);
//! ```
//!
//! ## Balance
//!
//! Every internal node keeps its children's heights within one of each other. A
//! freshly built tree has height `⌈log₂ n⌉` whichever [`SplitMethod`] is used.
//!
//! ## Determinism
//!
//! The only nondeterminism is the insertion tie-break. It is injectable through
//! [`TieBreak`]; use [`RandomTieBreak::seeded`] or [`FixedTieBreak`] for
//! reproducible trees.

mod build;
mod node;
mod tree;
mod types;

pub use tree::{Bvh, Iter};
pub use types::{FixedTieBreak, RandomTieBreak, RayHit, SplitMethod, TieBreak};
