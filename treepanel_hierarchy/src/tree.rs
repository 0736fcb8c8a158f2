// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-backed rooted tree with aggregate values.

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use smallvec::SmallVec;
use tracing::warn;

/// Index of a node inside a [`Tree`].
///
/// Indices follow the order nodes were handed to [`crate::stratify`], so they double as the
/// insertion order used for stable tie-breaks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of the node in the arena.
    pub const fn index(self) -> usize {
        self.0
    }
}

pub(crate) type Children = SmallVec<[NodeId; 4]>;

/// One node of a [`Tree`].
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    /// User payload.
    pub data: T,
    /// Aggregate value (`0` until [`Tree::sum`] runs).
    pub value: f64,
    /// Distance from the root (root = 0).
    pub depth: usize,
    /// Longest distance to a descendant leaf (leaf = 0).
    pub height: usize,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Children,
}

impl<T> Node<T> {
    pub(crate) fn new(data: T) -> Self {
        Self {
            data,
            value: 0.0,
            depth: 0,
            height: 0,
            parent: None,
            children: Children::new(),
        }
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in their current order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Returns `true` if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A rooted tree stored as a flat arena.
///
/// Built by [`crate::stratify`]; every node except the root has exactly one parent and every
/// node is reachable from the root.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree<T> {
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) root: NodeId,
}

impl<T> Tree<T> {
    /// The root node id.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the arena has no nodes (never the case for a stratified tree).
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Access a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    /// Access a node, returning `None` for foreign ids.
    pub fn get(&self, id: NodeId) -> Option<&Node<T>> {
        self.nodes.get(id.0)
    }

    /// Children of `id` in their current order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Iterates `(id, node)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node<T>)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Node ids in pre-order: every node precedes its descendants, siblings in child order.
    pub fn each_before(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::from([self.root]);
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    /// Node ids in post-order: every node follows its descendants, siblings in child order.
    pub fn each_after(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::from([self.root]);
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().copied());
        }
        out.reverse();
        out
    }

    /// Leaves in pre-order.
    pub fn leaves(&self) -> Vec<NodeId> {
        self.each_before()
            .into_iter()
            .filter(|id| self.nodes[id.0].is_leaf())
            .collect()
    }

    /// `id` followed by its ancestors up to the root.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::from([id]);
        let mut cur = self.nodes[id.0].parent;
        while let Some(p) = cur {
            out.push(p);
            cur = self.nodes[p.0].parent;
        }
        out
    }

    /// Computes every node's aggregate value bottom-up.
    ///
    /// A node's value is its own `value(data)` plus the values of its children. Own values that
    /// are not finite or are negative count as `0`.
    pub fn sum(&mut self, value: impl Fn(&T) -> f64) -> &mut Self {
        for id in self.each_after() {
            let own = value(&self.nodes[id.0].data);
            let own = if own.is_finite() && own >= 0.0 {
                own
            } else {
                if !own.is_nan() {
                    warn!("clamping node value {own} to 0");
                }
                0.0
            };
            let children: f64 = self.nodes[id.0]
                .children
                .iter()
                .map(|c| self.nodes[c.0].value)
                .sum();
            self.nodes[id.0].value = own + children;
        }
        self
    }

    /// Stably sorts every child list with `compare`.
    pub fn sort_by(&mut self, mut compare: impl FnMut(&Node<T>, &Node<T>) -> Ordering) -> &mut Self {
        for i in 0..self.nodes.len() {
            if self.nodes[i].children.len() < 2 {
                continue;
            }
            let mut children = core::mem::take(&mut self.nodes[i].children);
            children.sort_by(|a, b| compare(&self.nodes[a.0], &self.nodes[b.0]));
            self.nodes[i].children = children;
        }
        self
    }

    /// Orders every child list by descending aggregate value; ties keep insertion order.
    pub fn sort_by_value_desc(&mut self) -> &mut Self {
        self.sort_by(|a, b| b.value.total_cmp(&a.value))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::stratify::{StratifyItem, stratify};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: &'static str,
        parent: &'static str,
        value: f64,
    }

    impl StratifyItem for Item {
        fn id(&self) -> &str {
            self.id
        }

        fn parent_id(&self) -> Option<&str> {
            Some(self.parent)
        }
    }

    fn item(id: &'static str, parent: &'static str, value: f64) -> Item {
        Item { id, parent, value }
    }

    fn sample() -> Tree<Item> {
        stratify(vec![
            item("root", "", 0.0),
            item("a", "root", 0.0),
            item("b", "root", 0.0),
            item("a1", "a", 3.0),
            item("a2", "a", 4.0),
            item("b1", "b", 5.0),
            item("c", "root", 5.0),
        ])
        .unwrap()
    }

    fn ids(tree: &Tree<Item>, order: &[NodeId]) -> std::vec::Vec<&'static str> {
        order.iter().map(|id| tree.node(*id).data.id).collect()
    }

    #[test]
    fn traversals() {
        let tree = sample();
        assert_eq!(tree.len(), 7);
        assert!(!tree.is_empty());
        assert_eq!(
            ids(&tree, &tree.each_before()),
            ["root", "a", "a1", "a2", "b", "b1", "c"]
        );
        assert_eq!(
            ids(&tree, &tree.each_after()),
            ["a1", "a2", "a", "b1", "b", "c", "root"]
        );
        assert_eq!(ids(&tree, &tree.leaves()), ["a1", "a2", "b1", "c"]);
        let a2 = NodeId(4);
        assert_eq!(ids(&tree, &tree.ancestors(a2)), ["a2", "a", "root"]);
    }

    #[test]
    fn sum_aggregates_subtrees() {
        let mut tree = sample();
        tree.sum(|d| d.value);
        let value = |i: usize| tree.node(NodeId(i)).value;
        assert_eq!(value(0), 17.0);
        assert_eq!(value(1), 7.0);
        assert_eq!(value(2), 5.0);
    }

    #[test]
    fn sum_clamps_invalid_values() {
        let mut tree = stratify(vec![
            item("root", "", 0.0),
            item("neg", "root", -4.0),
            item("inf", "root", f64::INFINITY),
            item("nan", "root", f64::NAN),
            item("ok", "root", 2.0),
        ])
        .unwrap();
        tree.sum(|d| d.value);
        assert_eq!(tree.node(tree.root()).value, 2.0);
        assert!(tree.iter().all(|(_, n)| n.value >= 0.0));
    }

    #[test]
    fn sort_is_descending_and_stable() {
        let mut tree = sample();
        tree.sum(|d| d.value).sort_by_value_desc();
        let root = tree.root();
        // a = 7, b = 5, c = 5: b keeps its place ahead of c.
        assert_eq!(ids(&tree, tree.children(root)), ["a", "b", "c"]);
        let a = tree.children(root)[0];
        assert_eq!(ids(&tree, tree.children(a)), ["a2", "a1"]);
    }

    #[test]
    fn depth_and_height() {
        let tree = sample();
        let root = tree.node(tree.root());
        assert_eq!((root.depth, root.height), (0, 2));
        let c = tree.node(NodeId(6));
        assert_eq!((c.depth, c.height), (1, 0));
        assert_eq!(c.parent(), Some(tree.root()));
        assert!(c.is_leaf());
    }
}
