// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hierarchy: construction, incremental updates, queries, and the text dump.

use core::cmp::Ordering;
use core::fmt::{self, Write as _};
use core::hash::Hash;
use std::collections::HashSet;

use canopy_geom::{Aabb, Direction, EPSILON, Shape};
use kurbo::Point;

use crate::build;
use crate::node::{Kind, Node, rebalance};
use crate::types::{RandomTieBreak, RayHit, SplitMethod, TieBreak};

/// A self-balancing bounding volume hierarchy over 2D shapes.
///
/// Leaves hold one shape each; internal nodes cache the union of their children's
/// boxes and their height. After every [`insert`](Self::insert) and
/// [`remove`](Self::remove), sibling heights differ by at most one.
pub struct Bvh<S, B = RandomTieBreak> {
    root: Option<Box<Node<S>>>,
    len: usize,
    split_method: SplitMethod,
    tie_break: B,
}

impl<S: Shape> Bvh<S> {
    /// Create an empty hierarchy that breaks insertion ties at random.
    pub fn new() -> Self {
        Self::with_tie_break(RandomTieBreak::from_entropy())
    }

    /// Create a hierarchy built from `shapes` with the default split method.
    pub fn from_shapes(shapes: impl IntoIterator<Item = S>) -> Self {
        let mut bvh = Self::new();
        bvh.build(shapes);
        bvh
    }
}

impl<S: Shape> Default for Bvh<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Shape, B: TieBreak> Bvh<S, B> {
    /// Create an empty hierarchy with an explicit insertion tie-break.
    pub fn with_tie_break(tie_break: B) -> Self {
        Self {
            root: None,
            len: 0,
            split_method: SplitMethod::default(),
            tie_break,
        }
    }

    /// Use `method` for subsequent [`build`](Self::build) calls.
    #[must_use]
    pub fn with_split_method(mut self, method: SplitMethod) -> Self {
        self.split_method = method;
        self
    }

    /// Change the split method used by [`build`](Self::build).
    ///
    /// The current tree is left as it is.
    pub fn set_split_method(&mut self, method: SplitMethod) {
        self.split_method = method;
    }

    /// The split method used by [`build`](Self::build).
    pub fn split_method(&self) -> SplitMethod {
        self.split_method
    }

    /// Replace the contents with a tree built from `shapes`.
    ///
    /// An empty input leaves the hierarchy empty; that is reported through the
    /// `log` facade, not as an error.
    pub fn build(&mut self, shapes: impl IntoIterator<Item = S>) {
        let shapes: Vec<S> = shapes.into_iter().collect();
        if shapes.is_empty() {
            log::warn!("build called with no shapes; the hierarchy is now empty");
        }
        self.len = shapes.len();
        self.root = build::build(shapes, self.split_method);
        log::debug!(
            "built hierarchy of {} shapes, height {:?}, {:?} split",
            self.len,
            self.height(),
            self.split_method
        );
    }

    /// Add one shape, rebalancing on the way back up.
    pub fn insert(&mut self, shape: S) {
        self.len += 1;
        self.root = Some(match self.root.take() {
            None => Node::leaf(shape),
            Some(root) => {
                let bbox = shape.bounds();
                insert_node(root, shape, &bbox, &mut self.tie_break)
            }
        });
    }

    /// Remove every leaf holding a shape equal to `shape`.
    ///
    /// The descent only enters children whose box fully contains `shape`'s box.
    /// Returns whether anything was removed; removing an absent shape is a no-op.
    pub fn remove(&mut self, shape: &S) -> bool
    where
        S: PartialEq,
    {
        let Some(root) = self.root.take() else {
            return false;
        };
        let mut removed = 0;
        self.root = remove_node(root, shape, &shape.bounds(), &mut removed);
        self.len -= removed;
        if removed > 0 {
            log::debug!("removed {removed} leaves, {} shapes remain", self.len);
        }
        removed > 0
    }

    /// All shapes containing `point`, including on their boundary.
    pub fn find_collision(&self, point: Point) -> HashSet<&S>
    where
        S: Eq + Hash,
    {
        let mut out = HashSet::new();
        let Some(root) = self.root.as_deref() else {
            return out;
        };
        let mut stack = vec![root];
        while let Some(n) = stack.pop() {
            match &n.kind {
                Kind::Leaf(shape) => {
                    if shape.contains_point(point) {
                        out.insert(shape);
                    }
                }
                Kind::Internal { left, right } => {
                    if n.bbox.contains_point(point) {
                        stack.push(right);
                        stack.push(left);
                    }
                }
            }
        }
        out
    }

    /// The shape whose boundary a ray from `origin` along `direction` meets first.
    ///
    /// When two shapes are hit at exactly the same distance either may be returned.
    pub fn intersect_ray(&self, origin: Point, direction: Direction) -> Option<&S> {
        self.cast_ray(origin, direction).map(|hit| hit.shape)
    }

    /// Like [`intersect_ray`](Self::intersect_ray), also reporting the hit point
    /// and its distance from `origin`.
    pub fn cast_ray(&self, origin: Point, direction: Direction) -> Option<RayHit<'_, S>> {
        let root = self.root.as_deref()?;
        let mut best: Option<RayHit<'_, S>> = None;
        let mut stack = vec![root];
        while let Some(n) = stack.pop() {
            // A hit inside this box can be no closer than the box itself.
            if let Some(b) = &best
                && distance_to_box(&n.bbox, origin) > b.distance + EPSILON
            {
                continue;
            }
            if !n.bbox.does_ray_intersect(origin, direction) {
                continue;
            }
            match &n.kind {
                Kind::Leaf(shape) => {
                    let Some(point) = shape.find_intersection(origin, direction) else {
                        continue;
                    };
                    let distance = origin.distance(point);
                    if best.as_ref().is_none_or(|b| distance < b.distance) {
                        best = Some(RayHit {
                            shape,
                            point,
                            distance,
                        });
                    }
                }
                Kind::Internal { left, right } => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        best
    }

    /// Number of indexed shapes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no shapes are indexed.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree (a single leaf has height 0), or `None` when empty.
    pub fn height(&self) -> Option<u32> {
        self.root.as_ref().map(|r| r.height)
    }

    /// Box enclosing every indexed shape, or `None` when empty.
    pub fn bounds(&self) -> Option<Aabb> {
        self.root.as_ref().map(|r| r.bbox)
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Iterate over the indexed shapes in pre-order (left before right).
    pub fn iter(&self) -> Iter<'_, S> {
        Iter {
            stack: self.root.as_deref().into_iter().collect(),
        }
    }
}

/// Pre-order iterator over the shapes of a [`Bvh`].
pub struct Iter<'a, S> {
    stack: Vec<&'a Node<S>>,
}

impl<'a, S> Iterator for Iter<'a, S> {
    type Item = &'a S;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(n) = self.stack.pop() {
            match &n.kind {
                Kind::Leaf(shape) => return Some(shape),
                Kind::Internal { left, right } => {
                    self.stack.push(right);
                    self.stack.push(left);
                }
            }
        }
        None
    }
}

impl<S> fmt::Debug for Iter<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("pending", &self.stack.len())
            .finish_non_exhaustive()
    }
}

impl<'a, S: Shape, B: TieBreak> IntoIterator for &'a Bvh<S, B> {
    type Item = &'a S;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn distance_to_box(b: &Aabb, p: Point) -> f64 {
    let dx = (b.min.x - p.x).max(0.0).max(p.x - b.max.x);
    let dy = (b.min.y - p.y).max(0.0).max(p.y - b.max.y);
    dx.hypot(dy)
}

/// Descend towards the child whose box grows least (by perimeter) to take the
/// shape, then the shorter child, then whatever `tie_break` says.
fn prefer_left<S>(
    left: &Node<S>,
    right: &Node<S>,
    bbox: &Aabb,
    tie_break: &mut impl TieBreak,
) -> bool {
    let lp = left.bbox.union_with(bbox).perimeter();
    let rp = right.bbox.union_with(bbox).perimeter();
    match lp.partial_cmp(&rp) {
        Some(Ordering::Less) => true,
        Some(Ordering::Greater) => false,
        _ => match left.height.cmp(&right.height) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => tie_break.prefer_left(),
        },
    }
}

fn insert_node<S: Shape>(
    node: Box<Node<S>>,
    shape: S,
    bbox: &Aabb,
    tie_break: &mut impl TieBreak,
) -> Box<Node<S>> {
    let (left, right) = match node.into_children() {
        Ok(children) => children,
        // A leaf splits into the old shape on the left and the new one on the right.
        Err(leaf) => return Node::internal(leaf, Node::leaf(shape)),
    };
    let (left, right) = if prefer_left(&left, &right, bbox, tie_break) {
        (insert_node(left, shape, bbox, tie_break), right)
    } else {
        (left, insert_node(right, shape, bbox, tie_break))
    };
    rebalance(Node::internal(left, right))
}

fn remove_node<S: Shape + PartialEq>(
    node: Box<Node<S>>,
    target: &S,
    target_box: &Aabb,
    removed: &mut usize,
) -> Option<Box<Node<S>>> {
    let (into_left, into_right) = match &node.kind {
        Kind::Leaf(shape) => {
            if shape == target {
                *removed += 1;
                return None;
            }
            return Some(node);
        }
        Kind::Internal { left, right } => (
            left.bbox.contains_box(target_box),
            right.bbox.contains_box(target_box),
        ),
    };
    if !into_left && !into_right {
        return Some(node);
    }
    let (left, right) = match node.into_children() {
        Ok(children) => children,
        Err(leaf) => return Some(leaf),
    };
    let before = *removed;
    let left = if into_left {
        remove_node(left, target, target_box, removed)
    } else {
        Some(left)
    };
    let right = if into_right {
        remove_node(right, target, target_box, removed)
    } else {
        Some(right)
    };
    match (left, right) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only),
        (Some(left), Some(right)) => {
            let node = Node::internal(left, right);
            Some(if *removed == before {
                node
            } else {
                rebalance(node)
            })
        }
    }
}

/// Pre-order dump, one node per line, indented with one tab per depth level.
///
/// Internal nodes print their box as `[(minX, minY), (maxX, maxY)]` and leaves
/// print their shape. An empty hierarchy prints nothing.
impl<S: fmt::Display, B> fmt::Display for Bvh<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = self.root.as_deref() else {
            return Ok(());
        };
        let mut stack = vec![(root, 0_usize)];
        while let Some((n, depth)) = stack.pop() {
            for _ in 0..depth {
                f.write_char('\t')?;
            }
            match &n.kind {
                Kind::Leaf(shape) => writeln!(f, "{shape}")?,
                Kind::Internal { left, right } => {
                    writeln!(f, "{}", n.bbox)?;
                    stack.push((right, depth + 1));
                    stack.push((left, depth + 1));
                }
            }
        }
        Ok(())
    }
}

impl<S, B: fmt::Debug> fmt::Debug for Bvh<S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bvh")
            .field("len", &self.len)
            .field("height", &self.root.as_ref().map(|r| r.height))
            .field("bounds", &self.root.as_ref().map(|r| r.bbox))
            .field("split_method", &self.split_method)
            .field("tie_break", &self.tie_break)
            .finish()
    }
}
