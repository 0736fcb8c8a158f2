// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tabular-to-tree conversion by parent-id linkage.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;

use crate::tree::{Node, NodeId, Tree};

/// An item that names itself and its parent.
pub trait StratifyItem {
    /// Unique identifier. Empty ids are never registered, so nothing can refer to them.
    fn id(&self) -> &str;

    /// Identifier of the parent. `None` (or an empty id) marks the root.
    fn parent_id(&self) -> Option<&str>;
}

/// Why a set of items does not form a single tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StratifyError {
    /// No item without a parent.
    NoRoot,
    /// More than one item without a parent.
    MultipleRoots,
    /// An item refers to a parent id that does not exist.
    MissingParent(String),
    /// An item refers to a parent id that several items share.
    AmbiguousParent(String),
    /// Some items are not reachable from the root.
    Cycle,
}

impl fmt::Display for StratifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRoot => f.write_str("no root"),
            Self::MultipleRoots => f.write_str("multiple roots"),
            Self::MissingParent(id) => write!(f, "missing: {id}"),
            Self::AmbiguousParent(id) => write!(f, "ambiguous: {id}"),
            Self::Cycle => f.write_str("cycle"),
        }
    }
}

impl core::error::Error for StratifyError {}

enum Slot {
    Unique(usize),
    Ambiguous,
}

/// Links `items` into a tree.
///
/// Children keep the relative order of `items`. An id shared by several items is only an error
/// when some item names it as its parent.
pub fn stratify<T: StratifyItem>(items: Vec<T>) -> Result<Tree<T>, StratifyError> {
    let n = items.len();
    let mut root = None;
    let mut parents = Vec::with_capacity(n);
    {
        let mut lookup: HashMap<&str, Slot> = HashMap::with_capacity(n);
        for (i, item) in items.iter().enumerate() {
            let id = item.id();
            if id.is_empty() {
                continue;
            }
            lookup
                .entry(id)
                .and_modify(|slot| *slot = Slot::Ambiguous)
                .or_insert(Slot::Unique(i));
        }

        for (i, item) in items.iter().enumerate() {
            match item.parent_id().filter(|p| !p.is_empty()) {
                None => {
                    if root.replace(NodeId(i)).is_some() {
                        return Err(StratifyError::MultipleRoots);
                    }
                    parents.push(None);
                }
                Some(pid) => match lookup.get(pid) {
                    None => return Err(StratifyError::MissingParent(pid.to_string())),
                    Some(Slot::Ambiguous) => {
                        return Err(StratifyError::AmbiguousParent(pid.to_string()));
                    }
                    Some(Slot::Unique(p)) => parents.push(Some(NodeId(*p))),
                },
            }
        }
    }
    let root = root.ok_or(StratifyError::NoRoot)?;

    let mut nodes: Vec<Node<T>> = items.into_iter().map(Node::new).collect();
    for (i, parent) in parents.into_iter().enumerate() {
        if let Some(p) = parent {
            nodes[i].parent = Some(p);
            nodes[p.0].children.push(NodeId(i));
        }
    }

    let mut tree = Tree { nodes, root };
    let order = tree.each_before_bounded(n);
    if order.len() != n {
        return Err(StratifyError::Cycle);
    }
    for id in &order {
        if let Some(p) = tree.nodes[id.0].parent {
            tree.nodes[id.0].depth = tree.nodes[p.0].depth + 1;
        }
    }
    for id in order.iter().rev() {
        if let Some(p) = tree.nodes[id.0].parent {
            let h = tree.nodes[id.0].height + 1;
            if tree.nodes[p.0].height < h {
                tree.nodes[p.0].height = h;
            }
        }
    }
    Ok(tree)
}

impl<T> Tree<T> {
    /// Pre-order walk that gives up after `limit` nodes.
    ///
    /// Nodes on a cycle are never reachable from the root (each has exactly one parent), so the
    /// bound only guards against malformed arenas.
    fn each_before_bounded(&self, limit: usize) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(limit);
        let mut stack = Vec::from([self.root]);
        while let Some(id) = stack.pop() {
            if out.len() == limit {
                break;
            }
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }
}
