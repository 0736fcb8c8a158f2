// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark generation for the two panel presentations.
//!
//! Treemap: one rect per visible node, category frames behind leaves, a header per category and
//! name/value labels on leaves that have room for them.
//!
//! Pie: a half-circle of sectors colored by slice index, a connector line and value label per
//! slice, and a legend centered along the bottom edge.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use peniko::Color;
use tracing::{debug, trace};
use treepanel_core::{Mark, MarkId, TextAnchor, TextBaseline};
use treepanel_data::DisplayProcessor;
use treepanel_hierarchy::{Hierarchy, NodeKind, PieArc, PieLayout, Tiling, TreemapLayout};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::color::ColorAssigner;
use crate::legend::{LegendItem, LegendSpec};
use crate::measure::TextMeasurer;
use crate::rect_mark::{RectMarkSpec, StrokeStyle};
use crate::rule_mark::RuleMarkSpec;
use crate::sector_mark::SectorMarkSpec;
use crate::text_mark::TextMarkSpec;
use crate::theme::{Theme, contrast_text};
use crate::z_order;

pub(crate) const TILES: u32 = 1;
pub(crate) const FRAMES: u32 = 2;
pub(crate) const TILE_NAMES: u32 = 3;
pub(crate) const TILE_VALUES: u32 = 4;
pub(crate) const HEADERS: u32 = 5;
pub(crate) const SECTORS: u32 = 10;
pub(crate) const SECTOR_LABELS: u32 = 11;
pub(crate) const LABEL_LINES: u32 = 12;
pub(crate) const LEGEND: u32 = 20;

/// Gap between siblings and between a parent's edge and its children.
pub(crate) const TREEMAP_PADDING: f64 = 4.0;
/// Extra band above grouped categories for their header label.
pub(crate) const HEADER_HEIGHT: f64 = 16.0;
const LABEL_FONT_SIZE: f64 = 12.0;
const LABEL_PADDING: f64 = 4.0;

pub(crate) const PIE_OUTER_RADIUS: f64 = 80.0;
/// Distance from the outer edge to a slice's value label.
const PIE_LABEL_OFFSET: f64 = 20.0;
const LEGEND_MARGIN: f64 = 4.0;

/// Tooltip text: `name: formatted value`.
fn tooltip(name: &str, value: f64, display: &DisplayProcessor) -> String {
    format!("{name}: {}", display.process_number(value).formatted())
}

/// Inputs shared by both presentations.
pub(crate) struct Style<'a, M> {
    pub(crate) theme: Theme,
    pub(crate) size: Size,
    pub(crate) display: &'a DisplayProcessor,
    pub(crate) measurer: &'a M,
}

// Manual impls: copying the references must not require `M: Copy`.
impl<M> Clone for Style<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for Style<'_, M> {}

/// Treemap marks for a summed, sorted hierarchy.
pub(crate) fn treemap_marks<M: TextMeasurer>(
    hierarchy: &Hierarchy,
    tiling: Tiling,
    colors: &ColorAssigner,
    style: Style<'_, M>,
) -> Vec<Mark> {
    let tree = &hierarchy.tree;
    let header = if hierarchy.grouped { HEADER_HEIGHT } else { 0.0 };
    let cells = TreemapLayout::new(style.size)
        .with_tiling(tiling)
        .with_padding(TREEMAP_PADDING)
        .with_header(header)
        .with_round(true)
        .layout(tree);

    let mut out = Vec::new();
    for id in tree.each_before() {
        let node = tree.node(id);
        let rect = cells.rect(id);
        if node.depth == 0 {
            continue;
        }
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            trace!("skipping empty tile for {:?}", node.data.label());
            continue;
        }
        let key = id.index() as u64;
        let label = node.data.label();

        match &node.data.kind {
            NodeKind::Root => {}
            NodeKind::Category { key: category } => {
                let color = colors.category(category);
                out.push(
                    RectMarkSpec::new(MarkId::for_node(FRAMES, key), rect)
                        .with_fill(color.with_alpha(0.15))
                        .with_stroke(StrokeStyle::solid(color, 1.0))
                        .with_tooltip(tooltip(label, node.value, style.display))
                        .with_z_index(z_order::CATEGORY_FRAMES)
                        .mark(),
                );
                let band = Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + TREEMAP_PADDING + header);
                if let Some(text) = TextMarkSpec::inside(
                    MarkId::for_node(HEADERS, key),
                    band,
                    label,
                    LABEL_FONT_SIZE,
                    LABEL_PADDING,
                    style.measurer,
                ) {
                    out.push(
                        text.with_fill(style.theme.text())
                            .with_z_index(z_order::HEADERS)
                            .mark(),
                    );
                }
            }
            NodeKind::Leaf { category, .. } => {
                let fill = colors.value(category);
                out.push(
                    RectMarkSpec::new(MarkId::for_node(TILES, key), rect)
                        .with_fill(fill)
                        .with_tooltip(tooltip(label, node.value, style.display))
                        .with_z_index(z_order::TILES + node.depth as i32)
                        .mark(),
                );
                out.extend(leaf_labels(key, rect, label, node.value, fill, style));
            }
        }
    }
    debug!("treemap: {} marks for {} nodes", out.len(), tree.len());
    out
}

/// Name label, then value label beneath it, each only if it fits.
fn leaf_labels<M: TextMeasurer>(
    key: u64,
    rect: Rect,
    name: &str,
    value: f64,
    fill: Color,
    style: Style<'_, M>,
) -> Vec<Mark> {
    let mut out = Vec::new();
    let text_fill = contrast_text(fill);
    let Some(name) = TextMarkSpec::inside(
        MarkId::for_node(TILE_NAMES, key),
        rect,
        name,
        LABEL_FONT_SIZE,
        LABEL_PADDING,
        style.measurer,
    ) else {
        return out;
    };
    out.push(name.with_fill(text_fill).mark());

    let below = Rect::new(rect.x0, rect.y0 + LABEL_FONT_SIZE + 2.0, rect.x1, rect.y1);
    let formatted = style.display.process_number(value).formatted();
    if let Some(value) = TextMarkSpec::inside(
        MarkId::for_node(TILE_VALUES, key),
        below,
        formatted,
        LABEL_FONT_SIZE,
        LABEL_PADDING,
        style.measurer,
    ) {
        out.push(value.with_fill(text_fill).mark());
    }
    out
}

/// Point at `radius` along `angle` (degrees, counter-clockwise, y up) around `center`.
fn polar(center: Point, radius: f64, angle: f64) -> Point {
    let a = angle.to_radians();
    Point::new(center.x + radius * a.cos(), center.y - radius * a.sin())
}

fn label_anchor(pos: Point, center: Point) -> TextAnchor {
    if pos.x > center.x + 1e-9 {
        TextAnchor::Start
    } else if pos.x < center.x - 1e-9 {
        TextAnchor::End
    } else {
        TextAnchor::Middle
    }
}

/// Pie or donut marks for `(name, value)` slices in input order.
pub(crate) fn pie_marks<M: TextMeasurer>(
    slices: &[(String, f64)],
    inner_radius: f64,
    style: Style<'_, M>,
) -> Vec<Mark> {
    let center = Point::new(style.size.width / 2.0, style.size.height / 2.0);
    let palette = style.theme.palette();
    let values: Vec<f64> = slices.iter().map(|(_, v)| *v).collect();
    let arcs = PieLayout::default().arcs(&values);

    let mut out = Vec::new();
    for (arc, (name, _)) in arcs.iter().zip(slices) {
        let fill = palette[arc.index % palette.len()];
        if arc.value > 0.0 {
            out.extend(slice_marks(arc, name, fill, center, inner_radius, style));
        }
    }

    let items = slices
        .iter()
        .enumerate()
        .map(|(i, (name, _))| LegendItem::solid(name.clone(), palette[i % palette.len()]))
        .collect();
    let legend = LegendSpec::new(LEGEND, items).with_text_fill(style.theme.text());
    let legend_size = legend.measure(style.size.width, style.measurer);
    let area = Rect::new(
        0.0,
        style.size.height - legend_size.height - LEGEND_MARGIN,
        style.size.width,
        style.size.height - LEGEND_MARGIN,
    );
    out.extend(legend.marks(area, style.measurer));
    debug!("pie: {} marks for {} slices", out.len(), slices.len());
    out
}

fn slice_marks<M: TextMeasurer>(
    arc: &PieArc,
    name: &str,
    fill: Color,
    center: Point,
    inner_radius: f64,
    style: Style<'_, M>,
) -> [Mark; 3] {
    let key = arc.index as u64;
    let sector = SectorMarkSpec::from_arc(
        MarkId::for_node(SECTORS, key),
        center,
        inner_radius,
        PIE_OUTER_RADIUS,
        arc,
    )
    .with_fill(fill)
    .with_stroke(StrokeStyle::solid(style.theme.background(), 1.0))
    .with_tooltip(tooltip(name, arc.value, style.display))
    .mark();

    let mid = arc.mid_angle();
    let edge = polar(center, PIE_OUTER_RADIUS, mid);
    let pos = polar(center, PIE_OUTER_RADIUS + PIE_LABEL_OFFSET, mid);
    let line = RuleMarkSpec::new(MarkId::for_node(LABEL_LINES, key), edge, pos)
        .with_stroke(fill, 1.0)
        .mark();
    let label = TextMarkSpec::new(
        MarkId::for_node(SECTOR_LABELS, key),
        pos,
        style.display.process_number(arc.value).formatted(),
    )
    .with_font_size(LABEL_FONT_SIZE)
    .with_anchor(label_anchor(pos, center))
    .with_baseline(TextBaseline::Middle)
    .with_fill(fill)
    .mark();
    [sector, line, label]
}
