// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchy construction and layout for treepanel.
//!
//! The pipeline this crate covers:
//! - [`stratify`] links flat items into a [`Tree`] by parent id,
//! - [`Tree::sum`] and [`Tree::sort_by_value_desc`] aggregate and order it,
//! - [`build_tree`] does all of the above for panel rows, grouping them under category nodes,
//! - [`TreemapLayout`] assigns rectangles with one of five [`Tiling`] strategies, and
//! - [`PieLayout`] assigns angles for the flat (pie/donut) presentation.
//!
//! Layouts return geometry; they do not touch the tree.

#![no_std]

mod build;
#[cfg(not(feature = "std"))]
mod float;
mod pie;
mod stratify;
mod tree;
mod treemap;

pub use build::{
    COLOR_NODE_PREFIX, Hierarchy, NodeKind, ORIGIN_ID, ROW_NODE_PREFIX, TreeDatum, UNGROUPED,
    build_tree, category_id, category_key, collect_categories, row_id, trim_category_id,
};
pub use pie::{PieArc, PieLayout};
pub use stratify::{StratifyError, StratifyItem, stratify};
pub use tree::{Node, NodeId, Tree};
pub use treemap::{GOLDEN_RATIO, TreemapCells, TreemapLayout, Tiling};
