// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for panel marks.
//!
//! Marks carry an explicit `z_index`; [`treepanel_core::MarkList`] sorts by `(z_index, MarkId)`.
//! Within the tile layer, deeper treemap nodes add their depth so children paint over parents.

/// Category frames (grouped treemaps).
pub const CATEGORY_FRAMES: i32 = -10;
/// Treemap tiles; a node at depth `d` uses `TILES + d`.
pub const TILES: i32 = 0;
/// Pie / donut sectors.
pub const SECTORS: i32 = 0;
/// Connector lines from sectors to their labels.
pub const LABEL_LINES: i32 = 10;

/// Category header labels.
pub const HEADERS: i32 = 40;
/// Tile and sector value labels.
pub const LABELS: i32 = 50;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
