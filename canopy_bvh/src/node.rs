// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes and the height-balancing rotations.
//!
//! Children are owned exclusively by their parent. Rotations and rebalancing take
//! subtrees by value and return the replacement subtree; box and height are always
//! recomputed from the children, bottom-up.

use canopy_geom::{Aabb, Shape};

use crate::build;
use crate::types::SplitMethod;

pub(crate) enum Kind<S> {
    Leaf(S),
    Internal { left: Box<Node<S>>, right: Box<Node<S>> },
}

pub(crate) struct Node<S> {
    /// Leaf: the shape's bounds. Internal: union of both children.
    pub(crate) bbox: Aabb,
    /// Leaf: 0. Internal: 1 + the taller child.
    pub(crate) height: u32,
    pub(crate) kind: Kind<S>,
}

impl<S: Shape> Node<S> {
    pub(crate) fn leaf(shape: S) -> Box<Self> {
        Box::new(Self {
            bbox: shape.bounds(),
            height: 0,
            kind: Kind::Leaf(shape),
        })
    }
}

impl<S> Node<S> {
    pub(crate) fn internal(left: Box<Self>, right: Box<Self>) -> Box<Self> {
        Box::new(Self {
            bbox: left.bbox.union_with(&right.bbox),
            height: 1 + left.height.max(right.height),
            kind: Kind::Internal { left, right },
        })
    }

    /// `height(left) - height(right)`; zero for a leaf.
    pub(crate) fn balance(&self) -> i64 {
        match &self.kind {
            Kind::Leaf(_) => 0,
            Kind::Internal { left, right } => i64::from(left.height) - i64::from(right.height),
        }
    }

    /// Split an internal node into its children; a leaf is handed back unchanged.
    pub(crate) fn into_children(self: Box<Self>) -> Result<(Box<Self>, Box<Self>), Box<Self>> {
        match *self {
            Self {
                kind: Kind::Internal { left, right },
                ..
            } => Ok((left, right)),
            leaf => Err(Box::new(leaf)),
        }
    }

    /// Move every shape out of the subtree, in pre-order.
    pub(crate) fn into_shapes(self: Box<Self>, out: &mut Vec<S>) {
        match self.kind {
            Kind::Leaf(shape) => out.push(shape),
            Kind::Internal { left, right } => {
                left.into_shapes(out);
                right.into_shapes(out);
            }
        }
    }
}

/// Right rotation around `y`: its left child `x` becomes the subtree root, `y`
/// becomes `x`'s right child, and `x`'s former right child becomes `y`'s left.
pub(crate) fn rotate_right<S>(y: Box<Node<S>>) -> Box<Node<S>> {
    let (x, c) = match y.into_children() {
        Ok(children) => children,
        Err(leaf) => return leaf,
    };
    match x.into_children() {
        Ok((a, b)) => Node::internal(a, Node::internal(b, c)),
        Err(x) => Node::internal(x, c),
    }
}

/// Mirror image of [`rotate_right`].
pub(crate) fn rotate_left<S>(x: Box<Node<S>>) -> Box<Node<S>> {
    let (a, y) = match x.into_children() {
        Ok(children) => children,
        Err(leaf) => return leaf,
    };
    match y.into_children() {
        Ok((b, c)) => Node::internal(Node::internal(a, b), c),
        Err(y) => Node::internal(a, y),
    }
}

/// Restore the AVL invariant at `node`, assuming both children already satisfy it.
///
/// A skew of two is repaired with a single or double rotation. A larger skew can
/// only follow a removal that took out several equal leaves at once; that subtree
/// is rebuilt with the median splitter instead.
pub(crate) fn rebalance<S: Shape>(node: Box<Node<S>>) -> Box<Node<S>> {
    let balance = node.balance();
    if balance.abs() <= 1 {
        return node;
    }
    if balance.abs() > 2 {
        log::trace!("subtree skewed by {balance}; rebuilding it");
        let mut shapes = Vec::new();
        node.into_shapes(&mut shapes);
        return build::build_subtree(shapes, SplitMethod::Median);
    }
    let (left, right) = match node.into_children() {
        Ok(children) => children,
        Err(leaf) => return leaf,
    };
    if balance > 1 {
        let left = if left.balance() >= 0 {
            left
        } else {
            log::trace!("left-right rotation");
            rotate_left(left)
        };
        rotate_right(Node::internal(left, right))
    } else {
        let right = if right.balance() <= 0 {
            right
        } else {
            log::trace!("right-left rotation");
            rotate_right(right)
        };
        rotate_left(Node::internal(left, right))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_geom::Triangle;

    fn leaf(x: f64) -> Box<Node<Triangle>> {
        Node::leaf(Triangle::new((x, 0.0), (x + 1.0, 0.0), (x, 1.0)))
    }

    fn leaf_xs(node: &Node<Triangle>, out: &mut Vec<f64>) {
        match &node.kind {
            Kind::Leaf(t) => out.push(t.a.x),
            Kind::Internal { left, right } => {
                leaf_xs(left, out);
                leaf_xs(right, out);
            }
        }
    }

    #[test]
    fn internal_caches_box_and_height() {
        let n = Node::internal(leaf(0.0), Node::internal(leaf(5.0), leaf(9.0)));
        assert_eq!(n.height, 2);
        assert_eq!(n.bbox, Aabb::new((0.0, 0.0), (10.0, 1.0)));
        assert_eq!(n.balance(), -1);
    }

    #[test]
    fn right_rotation_keeps_order() {
        // ((a b) c) -> (a (b c))
        let n = Node::internal(Node::internal(leaf(0.0), leaf(1.0)), leaf(2.0));
        let r = rotate_right(n);
        let mut xs = Vec::new();
        leaf_xs(&r, &mut xs);
        assert_eq!(xs, [0.0, 1.0, 2.0]);
        match &r.kind {
            Kind::Internal { left, right } => {
                assert!(matches!(left.kind, Kind::Leaf(_)));
                assert_eq!(right.height, 1);
                assert_eq!(right.bbox, Aabb::new((1.0, 0.0), (3.0, 1.0)));
            }
            Kind::Leaf(_) => panic!("rotation must keep an internal root"),
        }
    }

    #[test]
    fn left_chain_is_rebalanced() {
        // (((a b) c) d) has balance 2 at the root.
        let n = Node::internal(
            Node::internal(Node::internal(leaf(0.0), leaf(1.0)), leaf(2.0)),
            leaf(3.0),
        );
        assert_eq!(n.balance(), 2);
        let r = rebalance(n);
        assert_eq!(r.height, 2);
        assert_eq!(r.balance(), 0);
        let mut xs = Vec::new();
        leaf_xs(&r, &mut xs);
        assert_eq!(xs, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn zig_zag_uses_double_rotation() {
        // (a ((b c) d)): the right child leans left.
        let n = Node::internal(
            leaf(0.0),
            Node::internal(Node::internal(leaf(1.0), leaf(2.0)), leaf(3.0)),
        );
        assert_eq!(n.balance(), -2);
        let r = rebalance(n);
        assert_eq!(r.height, 2);
        assert!(r.balance().abs() <= 1);
        let mut xs = Vec::new();
        leaf_xs(&r, &mut xs);
        assert_eq!(xs, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn heavy_skew_is_rebuilt() {
        let deep = Node::internal(
            Node::internal(leaf(0.0), leaf(1.0)),
            Node::internal(leaf(2.0), leaf(3.0)),
        );
        let deep = Node::internal(deep, Node::internal(leaf(4.0), leaf(5.0)));
        let n = Node::internal(deep, leaf(6.0));
        assert_eq!(n.balance(), 3);
        let r = rebalance(n);
        assert_eq!(r.height, 3);
        let mut shapes = Vec::new();
        r.into_shapes(&mut shapes);
        assert_eq!(shapes.len(), 7);
    }
}
