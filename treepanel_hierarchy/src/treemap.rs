// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treemap layout.
//!
//! Each node's rectangle is subdivided among its children in proportion to their values by a
//! [`Tiling`] strategy. Padding is applied the same way for every strategy:
//! - every non-root node is shrunk by half the inner padding on each side, and
//! - children are tiled inside their parent's rectangle inset by the outer padding (plus an
//!   optional header band on top of non-root parents), grown back by half the inner padding.
//!
//! When padding exceeds the available extent, the rectangle collapses to its midpoint.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Rect, Size};
use tracing::debug;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::tree::{NodeId, Tree};

/// The golden ratio, the default target aspect ratio for [`Tiling::Squarify`].
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// How a node's rectangle is divided among its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Tiling {
    /// Recursive halving by value, split along the longer side.
    #[cfg_attr(feature = "serde", serde(rename = "treemapBinary"))]
    Binary,
    /// Children side by side, left to right.
    #[cfg_attr(feature = "serde", serde(rename = "treemapDice"))]
    Dice,
    /// Children stacked, top to bottom.
    #[cfg_attr(feature = "serde", serde(rename = "treemapSlice"))]
    Slice,
    /// Slice at odd depths, dice at even depths.
    #[cfg_attr(feature = "serde", serde(rename = "treemapSliceDice"))]
    SliceDice,
    /// Rows of children chosen to keep aspect ratios near the target ratio.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "treemapSquarify"))]
    Squarify,
}

impl Tiling {
    /// All strategies, in identifier order.
    pub const ALL: [Self; 5] = [
        Self::Binary,
        Self::Dice,
        Self::Slice,
        Self::SliceDice,
        Self::Squarify,
    ];

    /// The host's identifier for this strategy (`treemapSquarify`, ...).
    pub fn id(self) -> &'static str {
        match self {
            Self::Binary => "treemapBinary",
            Self::Dice => "treemapDice",
            Self::Slice => "treemapSlice",
            Self::SliceDice => "treemapSliceDice",
            Self::Squarify => "treemapSquarify",
        }
    }

    /// Parses a host identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }
}

/// Node rectangles produced by [`TreemapLayout::layout`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreemapCells {
    rects: Vec<Rect>,
}

impl TreemapCells {
    /// Rectangle of node `id`.
    pub fn rect(&self, id: NodeId) -> Rect {
        self.rects.get(id.index()).copied().unwrap_or(Rect::ZERO)
    }

    /// All rectangles, indexed by [`NodeId::index`].
    pub fn as_slice(&self) -> &[Rect] {
        &self.rects
    }
}

/// Treemap layout configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreemapLayout {
    /// Overall extent; the root covers `(0, 0)..size`.
    pub size: Size,
    /// Tiling strategy.
    pub tiling: Tiling,
    /// Target aspect ratio for [`Tiling::Squarify`].
    pub ratio: f64,
    /// Gap between siblings.
    pub padding_inner: f64,
    /// Gap between a parent's edge and its children.
    pub padding_outer: f64,
    /// Extra top padding for non-root parents, reserving room for a header label.
    pub header: f64,
    /// Round coordinates to integers after layout.
    pub round: bool,
}

impl TreemapLayout {
    /// A squarified layout of `size` with no padding and no rounding.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            tiling: Tiling::default(),
            ratio: GOLDEN_RATIO,
            padding_inner: 0.0,
            padding_outer: 0.0,
            header: 0.0,
            round: false,
        }
    }

    /// Sets the tiling strategy.
    pub fn with_tiling(mut self, tiling: Tiling) -> Self {
        self.tiling = tiling;
        self
    }

    /// Sets the squarify target ratio (values below 1 are treated as 1).
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = if ratio > 1.0 { ratio } else { 1.0 };
        self
    }

    /// Sets inner and outer padding together.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding_inner = padding;
        self.padding_outer = padding;
        self
    }

    /// Sets the gap between siblings.
    pub fn with_padding_inner(mut self, padding: f64) -> Self {
        self.padding_inner = padding;
        self
    }

    /// Sets the gap between a parent's edge and its children.
    pub fn with_padding_outer(mut self, padding: f64) -> Self {
        self.padding_outer = padding;
        self
    }

    /// Reserves a header band of `height` on top of every non-root parent.
    pub fn with_header(mut self, height: f64) -> Self {
        self.header = height;
        self
    }

    /// Enables or disables integer rounding.
    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    /// Lays out `tree`, which must have been summed.
    pub fn layout<T>(&self, tree: &Tree<T>) -> TreemapCells {
        let mut rects = vec![Rect::ZERO; tree.len()];
        rects[tree.root().index()] = Rect::new(0.0, 0.0, self.size.width, self.size.height);
        // Half the inner padding, indexed by depth; the root is never shrunk.
        let mut shrink: Vec<f64> = vec![0.0];
        let mut values = Vec::new();
        let mut out = Vec::new();

        for id in tree.each_before() {
            let node = tree.node(id);
            let p = shrink.get(node.depth).copied().unwrap_or(0.0);
            let cell = rects[id.index()];
            let r = collapse(Rect::new(cell.x0 + p, cell.y0 + p, cell.x1 - p, cell.y1 - p));
            rects[id.index()] = r;
            if node.is_leaf() {
                continue;
            }

            let half = self.padding_inner / 2.0;
            if shrink.len() <= node.depth + 1 {
                shrink.resize(node.depth + 2, 0.0);
            }
            shrink[node.depth + 1] = half;
            let top = if node.depth > 0 {
                self.padding_outer + self.header
            } else {
                self.padding_outer
            };
            let inner = collapse(Rect::new(
                r.x0 + self.padding_outer - half,
                r.y0 + top - half,
                r.x1 - (self.padding_outer - half),
                r.y1 - (self.padding_outer - half),
            ));

            let children = node.children();
            values.clear();
            values.extend(children.iter().map(|c| tree.node(*c).value));
            out.clear();
            out.resize(children.len(), Rect::ZERO);
            self.tile(node.depth, &values, node.value, inner, &mut out);
            for (c, rect) in children.iter().zip(out.iter()) {
                rects[c.index()] = *rect;
            }
        }

        if self.round {
            for r in &mut rects {
                *r = Rect::new(r.x0.round(), r.y0.round(), r.x1.round(), r.y1.round());
            }
        }
        debug!(
            "treemap {:?}: {} nodes in {}x{}",
            self.tiling,
            rects.len(),
            self.size.width,
            self.size.height
        );
        TreemapCells { rects }
    }

    /// Splits `area` among children with `values` summing to `total`.
    pub fn tile(&self, depth: usize, values: &[f64], total: f64, area: Rect, out: &mut [Rect]) {
        debug_assert_eq!(values.len(), out.len());
        if values.is_empty() {
            return;
        }
        match self.tiling {
            Tiling::Binary => binary(values, total, area, out),
            Tiling::Dice => dice(values, total, area, out),
            Tiling::Slice => slice(values, total, area, out),
            Tiling::SliceDice if depth % 2 == 1 => slice(values, total, area, out),
            Tiling::SliceDice => dice(values, total, area, out),
            Tiling::Squarify => squarify(self.ratio, values, total, area, out),
        }
    }
}

/// Collapses an inverted axis to its midpoint.
fn collapse(r: Rect) -> Rect {
    let (mut x0, mut x1, mut y0, mut y1) = (r.x0, r.x1, r.y0, r.y1);
    if x1 < x0 {
        x0 = (x0 + x1) / 2.0;
        x1 = x0;
    }
    if y1 < y0 {
        y0 = (y0 + y1) / 2.0;
        y1 = y0;
    }
    Rect::new(x0, y0, x1, y1)
}

fn dice(values: &[f64], total: f64, area: Rect, out: &mut [Rect]) {
    let k = if total != 0.0 {
        (area.x1 - area.x0) / total
    } else {
        0.0
    };
    let mut x = area.x0;
    for (v, r) in values.iter().zip(out.iter_mut()) {
        let x1 = x + v * k;
        *r = Rect::new(x, area.y0, x1, area.y1);
        x = x1;
    }
}

fn slice(values: &[f64], total: f64, area: Rect, out: &mut [Rect]) {
    let k = if total != 0.0 {
        (area.y1 - area.y0) / total
    } else {
        0.0
    };
    let mut y = area.y0;
    for (v, r) in values.iter().zip(out.iter_mut()) {
        let y1 = y + v * k;
        *r = Rect::new(area.x0, y, area.x1, y1);
        y = y1;
    }
}

fn squarify(ratio: f64, values: &[f64], total: f64, area: Rect, out: &mut [Rect]) {
    let n = values.len();
    let (mut x0, mut y0, x1, y1) = (area.x0, area.y0, area.x1, area.y1);
    let mut value = total;
    let mut i0 = 0;
    let mut i1 = 0;

    while i0 < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        // Next non-empty node starts the row.
        let mut sum_value;
        loop {
            sum_value = values[i1];
            i1 += 1;
            if sum_value != 0.0 || i1 >= n {
                break;
            }
        }
        let mut min_value = sum_value;
        let mut max_value = sum_value;
        let alpha = f64::max(dy / dx, dx / dy) / (value * ratio);
        let mut beta = sum_value * sum_value * alpha;
        let mut min_ratio = f64::max(max_value / beta, beta / min_value);

        // Grow the row while the worst aspect ratio does not get worse.
        while i1 < n {
            let node_value = values[i1];
            sum_value += node_value;
            min_value = min_value.min(node_value);
            max_value = max_value.max(node_value);
            beta = sum_value * sum_value * alpha;
            let new_ratio = f64::max(max_value / beta, beta / min_value);
            if new_ratio > min_ratio {
                sum_value -= node_value;
                break;
            }
            min_ratio = new_ratio;
            i1 += 1;
        }

        // Share of the remaining area taken by this row; zero-valued tails get none.
        let share = if value > 0.0 { sum_value / value } else { 0.0 };
        let row = &values[i0..i1];
        let cells = &mut out[i0..i1];
        if dx < dy {
            let y = if dy != 0.0 { y0 + dy * share } else { y1 };
            dice(row, sum_value, Rect::new(x0, y0, x1, y), cells);
            y0 = y;
        } else {
            let x = if dx != 0.0 { x0 + dx * share } else { x1 };
            slice(row, sum_value, Rect::new(x0, y0, x, y1), cells);
            x0 = x;
        }
        value -= sum_value;
        i0 = i1;
    }
}

fn binary(values: &[f64], total: f64, area: Rect, out: &mut [Rect]) {
    let mut sums = Vec::with_capacity(values.len() + 1);
    sums.push(0.0);
    let mut acc = 0.0;
    for v in values {
        acc += v;
        sums.push(acc);
    }
    partition(&sums, 0, values.len(), total, area, out);
}

fn partition(sums: &[f64], i: usize, j: usize, value: f64, area: Rect, out: &mut [Rect]) {
    if i + 1 >= j {
        out[i] = area;
        return;
    }

    let offset = sums[i];
    let target = value / 2.0 + offset;
    let mut k = i + 1;
    let mut hi = j - 1;
    while k < hi {
        let mid = (k + hi) / 2;
        if sums[mid] < target {
            k = mid + 1;
        } else {
            hi = mid;
        }
    }
    if target - sums[k - 1] < sums[k] - target && i + 1 < k {
        k -= 1;
    }

    let left = sums[k] - offset;
    let right = value - left;
    let Rect { x0, y0, x1, y1 } = area;
    if x1 - x0 > y1 - y0 {
        let xk = if value != 0.0 {
            (x0 * right + x1 * left) / value
        } else {
            x1
        };
        partition(sums, i, k, left, Rect::new(x0, y0, xk, y1), out);
        partition(sums, k, j, right, Rect::new(xk, y0, x1, y1), out);
    } else {
        let yk = if value != 0.0 {
            (y0 * right + y1 * left) / value
        } else {
            y1
        };
        partition(sums, i, k, left, Rect::new(x0, y0, x1, yk), out);
        partition(sums, k, j, right, Rect::new(x0, yk, x1, y1), out);
    }
}
