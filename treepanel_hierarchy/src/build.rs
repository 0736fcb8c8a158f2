// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel hierarchy: rows grouped under category nodes beneath a synthetic root.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

use tracing::debug;
use treepanel_data::{FieldValue, Row};

use crate::stratify::{StratifyError, StratifyItem, stratify};
use crate::tree::Tree;

/// Id of the synthetic root node.
pub const ORIGIN_ID: &str = "Origin";

/// Category key for rows without a color value.
pub const UNGROUPED: &str = "Ungrouped";

/// Prefix of category node ids.
pub const COLOR_NODE_PREFIX: &str = "$color_";

/// Prefix of leaf node ids; the suffix is the source row index.
pub const ROW_NODE_PREFIX: &str = "$row_";

/// What a hierarchy node stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// The synthetic root.
    Root,
    /// A distinct color value, or [`UNGROUPED`].
    Category {
        /// Category key without [`COLOR_NODE_PREFIX`].
        key: String,
    },
    /// One input row.
    Leaf {
        /// Mapped label.
        name: String,
        /// Mapped weight.
        value: f64,
        /// The row's color value.
        category: FieldValue,
        /// Index of the source row.
        row: usize,
    },
}

/// Payload of a hierarchy node: its linkage plus what it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeDatum {
    id: String,
    parent: Option<String>,
    /// Node role.
    pub kind: NodeKind,
}

impl TreeDatum {
    fn root() -> Self {
        Self {
            id: ORIGIN_ID.to_string(),
            parent: None,
            kind: NodeKind::Root,
        }
    }

    fn category(key: &str) -> Self {
        Self {
            id: category_id(key),
            parent: Some(ORIGIN_ID.to_string()),
            kind: NodeKind::Category {
                key: key.to_string(),
            },
        }
    }

    /// Node id, as used for linkage.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label: the leaf name, the category key, or the root id.
    pub fn label(&self) -> &str {
        match &self.kind {
            NodeKind::Root => ORIGIN_ID,
            NodeKind::Category { key } => key,
            NodeKind::Leaf { name, .. } => name,
        }
    }

    /// The value this node contributes itself (only leaves carry one).
    pub fn own_value(&self) -> f64 {
        match self.kind {
            NodeKind::Leaf { value, .. } => value,
            _ => 0.0,
        }
    }

    /// Returns `true` for category nodes.
    pub fn is_category(&self) -> bool {
        matches!(self.kind, NodeKind::Category { .. })
    }
}

impl StratifyItem for TreeDatum {
    fn id(&self) -> &str {
        &self.id
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// An aggregated, sorted panel tree plus the category order used for coloring.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    /// The tree, summed and sorted by descending value.
    pub tree: Tree<TreeDatum>,
    /// Category keys in first-appearance order, [`UNGROUPED`] last. Empty when not grouped.
    pub categories: Vec<String>,
    /// Whether leaves hang below category nodes.
    pub grouped: bool,
}

/// Node id of the category `key`.
pub fn category_id(key: &str) -> String {
    format!("{COLOR_NODE_PREFIX}{key}")
}

/// Strips [`COLOR_NODE_PREFIX`] from an id for presentation.
pub fn trim_category_id(id: &str) -> &str {
    id.strip_prefix(COLOR_NODE_PREFIX).unwrap_or(id)
}

/// Node id of the leaf built from row `index`.
///
/// Leaves are never referenced as parents, so their ids only need to be unique; the row's text
/// stays in the [`NodeKind::Leaf`] name.
pub fn row_id(index: usize) -> String {
    format!("{ROW_NODE_PREFIX}{index}")
}

/// Category key of a color value, `None` when missing (null or empty text).
pub fn category_key(color: &FieldValue) -> Option<String> {
    (!color.is_missing()).then(|| color.to_string())
}

/// Distinct color keys in first-appearance order, followed by [`UNGROUPED`] (once).
pub fn collect_categories(rows: &[Row]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for key in rows.iter().filter_map(|r| category_key(&r.color)) {
        if !out.contains(&key) {
            out.push(key);
        }
    }
    if !out.iter().any(|k| k == UNGROUPED) {
        out.push(UNGROUPED.to_string());
    }
    out
}

/// Builds the panel tree from mapped rows.
///
/// When `grouped`, every row hangs below the category node of its color value (missing colors
/// go to [`UNGROUPED`]); otherwise rows hang directly below the root. The result is summed by
/// leaf value and every child list is sorted by descending value.
pub fn build_tree(rows: &[Row], grouped: bool) -> Result<Hierarchy, StratifyError> {
    let categories = if grouped {
        collect_categories(rows)
    } else {
        Vec::new()
    };

    let mut items = Vec::with_capacity(1 + categories.len() + rows.len());
    items.push(TreeDatum::root());
    items.extend(categories.iter().map(|k| TreeDatum::category(k)));
    items.extend(rows.iter().enumerate().map(|(i, row)| {
        let parent = if grouped {
            category_id(category_key(&row.color).as_deref().unwrap_or(UNGROUPED))
        } else {
            ORIGIN_ID.to_string()
        };
        TreeDatum {
            id: row_id(i),
            parent: Some(parent),
            kind: NodeKind::Leaf {
                name: row.name(),
                value: row.weight(),
                category: row.color.clone(),
                row: i,
            },
        }
    }));

    let mut tree = stratify(items)?;
    tree.sum(TreeDatum::own_value).sort_by_value_desc();
    debug!(
        "built tree: {} nodes, {} categories, total {}",
        tree.len(),
        categories.len(),
        tree.node(tree.root()).value
    );
    Ok(Hierarchy {
        tree,
        categories,
        grouped,
    })
}
