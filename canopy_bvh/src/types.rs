// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public configuration and result types for the hierarchy.

use core::fmt;

use kurbo::Point;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Strategy used by [`Bvh::build`](crate::Bvh::build) to split a set of shapes in two.
///
/// Every strategy picks its split index from a window that keeps the built tree
/// height-balanced, so a freshly built hierarchy always satisfies the AVL
/// invariant. Axes alternate `x`, `y`, `x`, … from the root down.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SplitMethod {
    /// Sort by centroid on the active axis and cut at the middle index.
    #[default]
    Median,
    /// Cut at the midpoint of the centroid range on the active axis.
    Midrange,
    /// Minimize `area(L)·|L| + area(R)·|R|` over both axes.
    SurfaceArea,
}

impl SplitMethod {
    /// All strategies, in declaration order.
    pub const ALL: [Self; 3] = [Self::Median, Self::Midrange, Self::SurfaceArea];
}

/// Decides insertion placement when both children are equally good.
///
/// During [`Bvh::insert`](crate::Bvh::insert), a child is chosen by the smaller
/// perimeter of `child ∪ shape`, then by the smaller subtree height. Only when
/// both tie is the decision deferred here.
pub trait TieBreak {
    /// Return `true` to descend into the left child.
    fn prefer_left(&mut self) -> bool;
}

impl<T: TieBreak + ?Sized> TieBreak for &mut T {
    fn prefer_left(&mut self) -> bool {
        (**self).prefer_left()
    }
}

/// Uniformly random tie-break. This is the default.
pub struct RandomTieBreak {
    rng: StdRng,
}

impl RandomTieBreak {
    /// Seed from the operating system's entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence from a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomTieBreak {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl TieBreak for RandomTieBreak {
    fn prefer_left(&mut self) -> bool {
        self.rng.gen_bool(0.5)
    }
}

impl fmt::Debug for RandomTieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RandomTieBreak").finish_non_exhaustive()
    }
}

/// Always breaks ties the same way.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FixedTieBreak {
    /// Always descend left.
    Left,
    /// Always descend right.
    Right,
}

impl TieBreak for FixedTieBreak {
    fn prefer_left(&mut self) -> bool {
        matches!(self, Self::Left)
    }
}

/// Nearest hit found by [`Bvh::cast_ray`](crate::Bvh::cast_ray).
#[derive(Debug)]
pub struct RayHit<'a, S> {
    /// The shape that was hit.
    pub shape: &'a S,
    /// Where the ray meets the shape's boundary.
    pub point: Point,
    /// Euclidean distance from the ray origin to `point`.
    pub distance: f64,
}
