// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Batch construction by recursive splitting.
//!
//! Shapes are ordered by centroid along the active axis (`x` at the root, then
//! alternating) and cut into two halves that are built recursively. The cut is
//! restricted to a balance window: for `n` shapes with `h = ⌈log₂ n⌉`, both halves
//! hold at most `2^(h-1)` shapes and more than `2^(h-3)` shapes. A subtree built
//! this way always has height `⌈log₂ n⌉`, so every node is AVL-balanced no matter
//! which strategy chose the cut. The median index is always inside the window.

use core::ops::RangeInclusive;

use canopy_geom::{Aabb, Shape};
use kurbo::Point;

use crate::node::Node;
use crate::types::SplitMethod;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn other(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    fn coord(self, p: Point) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }
}

type Item<S> = (Point, S);

/// Build a subtree over `shapes`. Callers guarantee at least one shape.
pub(crate) fn build_subtree<S: Shape>(shapes: Vec<S>, method: SplitMethod) -> Box<Node<S>> {
    debug_assert!(!shapes.is_empty(), "cannot build a subtree with no shapes");
    let items = shapes.into_iter().map(|s| (s.centroid(), s)).collect();
    build_recursive(items, Axis::X, method)
}

/// Build a whole tree; `None` when there are no shapes.
pub(crate) fn build<S: Shape>(shapes: Vec<S>, method: SplitMethod) -> Option<Box<Node<S>>> {
    if shapes.is_empty() {
        return None;
    }
    Some(build_subtree(shapes, method))
}

fn build_recursive<S: Shape>(
    mut items: Vec<Item<S>>,
    axis: Axis,
    method: SplitMethod,
) -> Box<Node<S>> {
    if items.len() == 1
        && let Some((_, shape)) = items.pop()
    {
        return Node::leaf(shape);
    }
    let (k, used) = match method {
        SplitMethod::Median => (split_median(&mut items, axis), axis),
        SplitMethod::Midrange => (split_midrange(&mut items, axis), axis),
        SplitMethod::SurfaceArea => split_sah(&mut items),
    };
    let right = items.split_off(k);
    let next = used.other();
    Node::internal(
        build_recursive(items, next, method),
        build_recursive(right, next, method),
    )
}

fn ceil_log2(n: usize) -> u32 {
    debug_assert!(n >= 2, "only defined for splittable sets");
    usize::BITS - (n - 1).leading_zeros()
}

/// Split indices that keep a subtree of `n >= 2` shapes height-balanced.
fn balanced_window(n: usize) -> RangeInclusive<usize> {
    let h = ceil_log2(n);
    let cap = 1_usize << (h - 1);
    let floor = if h >= 3 { (1_usize << (h - 3)) + 1 } else { 1 };
    let lo = floor.max(n.saturating_sub(cap));
    let hi = cap.min(n - floor);
    lo..=hi
}

fn sort_along<S>(items: &mut [Item<S>], axis: Axis) {
    items.sort_by(|a, b| axis.coord(a.0).total_cmp(&axis.coord(b.0)));
}

fn split_median<S>(items: &mut [Item<S>], axis: Axis) -> usize {
    sort_along(items, axis);
    items.len() / 2
}

fn split_midrange<S>(items: &mut [Item<S>], axis: Axis) -> usize {
    sort_along(items, axis);
    let n = items.len();
    let lo = axis.coord(items[0].0);
    let hi = axis.coord(items[n - 1].0);
    let mid = 0.5 * (lo + hi);
    let k = items.partition_point(|(c, _)| axis.coord(*c) < mid);
    let window = balanced_window(n);
    k.clamp(*window.start(), *window.end())
}

/// SAH-like split: for each axis, sort, precompute prefix/suffix boxes, and pick
/// the `k` in the balance window minimizing `area(L_k)·k + area(R_k)·(n - k)`.
fn split_sah<S: Shape>(items: &mut [Item<S>]) -> (usize, Axis) {
    let n = items.len();
    let window = balanced_window(n);
    let mut best: Option<(f64, Axis, usize)> = None;
    for axis in [Axis::X, Axis::Y] {
        sort_along(items, axis);
        let boxes: Vec<Aabb> = items.iter().map(|(_, s)| s.bounds()).collect();
        let prefix: Vec<Aabb> = boxes
            .iter()
            .scan(None, |acc: &mut Option<Aabb>, b| {
                let next = acc.map_or(*b, |a| a.union_with(b));
                *acc = Some(next);
                Some(next)
            })
            .collect();
        let mut suffix: Vec<Aabb> = boxes
            .iter()
            .rev()
            .scan(None, |acc: &mut Option<Aabb>, b| {
                let next = acc.map_or(*b, |a| a.union_with(b));
                *acc = Some(next);
                Some(next)
            })
            .collect();
        suffix.reverse();

        for k in window.clone() {
            let cost = prefix[k - 1].area() * k as f64 + suffix[k].area() * (n - k) as f64;
            if best.is_none_or(|(c, _, _)| cost < c) {
                best = Some((cost, axis, k));
            }
        }
    }
    let (axis, k) = best.map_or((Axis::X, n / 2), |(_, axis, k)| (axis, k));
    // Items are left sorted by the last axis tried.
    if axis != Axis::Y {
        sort_along(items, axis);
    }
    (k, axis)
}
