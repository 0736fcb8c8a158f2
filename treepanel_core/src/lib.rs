// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `treepanel_core`: the retained mark model a panel render produces.
//!
//! This crate provides:
//! - stable mark identity ([`MarkId`])
//! - per-kind evaluated channels ([`MarkPayload`])
//! - a chainable [`MarkBuilder`]
//! - a z-ordered, id-indexed [`MarkList`] with hit testing for tooltips
//!
//! Everything here is a plain value. A render produces a fresh [`MarkList`] every time; there is
//! no incremental state and no identity carried across renders beyond what [`MarkId`] encodes.
//!
//! Conceptually, a panel:
//! - lays out its data (treemap rectangles, pie sectors)
//! - generates one [`Mark`] per visual item with a deterministic [`MarkId`]
//! - hands the resulting [`MarkList`] to a renderer, which paints it in order.

#![no_std]

extern crate alloc;

use alloc::{string::String, vec::Vec};
use hashbrown::HashMap;
use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

/// Stable identifier for a [`Mark`].
///
/// Ids are derived from the layout node (or slice) that produced the mark, so two renders of the
/// same input produce the same ids.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkId(pub u64);

impl MarkId {
    /// Create a mark id from a raw value.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Create a stable mark id for an item key within a namespace.
    ///
    /// Namespaces separate the mark families of one render (tiles, labels, sectors, legend) so
    /// that the same item key never collides across families.
    pub fn for_node(namespace: u32, key: u64) -> Self {
        // 64-bit mix based on golden ratio and some rotation; deterministic across runs.
        let ns = u64::from(namespace).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mixed = ns ^ key.rotate_left(17) ^ key.wrapping_mul(0xD6E8_FEB8_6659_FD93);
        Self(mixed)
    }
}

/// The geometric "kind" of a mark, which determines how channels are interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// An axis-aligned rectangle using [`RectChannels`].
    Rect,
    /// A text item positioned at a point.
    Text,
    /// A vector path.
    Path,
}

/// Evaluated per-kind channels for a mark.
///
/// This is the render-facing data model: it is what downstream renderers consume.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// An axis-aligned rectangle.
    Rect(RectChannels),
    /// A text item positioned at a point.
    Text(TextChannels),
    /// A vector path.
    Path(PathChannels),
}

impl MarkPayload {
    /// Return the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Text(_) => MarkKind::Text,
            Self::Path(_) => MarkKind::Path,
        }
    }

    /// Optional bounds hint for downstream damage calculation.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            // Text shaping is downstream; bounds are not known here.
            Self::Text(_) => None,
            Self::Path(p) => Some(p.path.bounding_box()),
        }
    }

    /// Returns `true` if `pt` falls inside the painted area of this payload.
    ///
    /// Text payloads never report a hit.
    pub fn contains(&self, pt: Point) -> bool {
        match self {
            Self::Rect(r) => r.rect.contains(pt),
            Self::Text(_) => false,
            Self::Path(p) => p.path.contains(pt),
        }
    }
}

/// Evaluated channels for [`MarkKind::Rect`].
#[derive(Clone, Debug, PartialEq)]
pub struct RectChannels {
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in scene coordinates (`0` disables the outline).
    pub stroke_width: f64,
}

/// Evaluated channels for [`MarkKind::Text`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextChannels {
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal text anchoring (how the glyphs align relative to [`TextChannels::pos`]).
    pub anchor: TextAnchor,
    /// Vertical alignment for text relative to [`TextChannels::pos`].
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
}

/// Horizontal anchoring for text.
///
/// In SVG terms, this maps to the `text-anchor` attribute. Treemap tile labels use
/// [`TextAnchor::Start`]; pie value labels pick a side based on the slice's mid angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// Anchor at the start (left in LTR).
    Start,
    /// Anchor in the middle.
    Middle,
    /// Anchor at the end (right in LTR).
    End,
}

/// Vertical alignment for text.
///
/// In SVG terms, this maps to the `dominant-baseline` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// Baseline is centered on the anchor point.
    Middle,
    /// Baseline is the font's alphabetic baseline.
    Alphabetic,
    /// Baseline is the font's hanging baseline.
    Hanging,
    /// Baseline is the font's ideographic baseline.
    Ideographic,
}

/// Evaluated channels for [`MarkKind::Path`].
#[derive(Clone, Debug, PartialEq)]
pub struct PathChannels {
    /// The vector path geometry.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

fn opaque_black() -> Brush {
    Brush::Solid(Color::from_rgba8(0, 0, 0, 255))
}

impl Default for RectChannels {
    fn default() -> Self {
        Self {
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            fill: opaque_black(),
            stroke: Brush::default(),
            stroke_width: 0.0,
        }
    }
}

impl Default for TextChannels {
    fn default() -> Self {
        Self {
            pos: Point::new(0.0, 0.0),
            text: String::new(),
            font_size: 12.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: opaque_black(),
        }
    }
}

impl Default for PathChannels {
    fn default() -> Self {
        Self {
            path: BezPath::new(),
            fill: opaque_black(),
            stroke: Brush::default(),
            stroke_width: 0.0,
        }
    }
}

/// A stable-identity visual item.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identifier.
    pub id: MarkId,
    /// Z-ordering for rendering; higher values are drawn above lower values.
    pub z_index: i32,
    /// Evaluated channels.
    pub payload: MarkPayload,
    /// Hover text shown by hosts that support tooltips.
    pub tooltip: Option<String>,
}

impl Mark {
    /// Create a default (black, empty) rect mark.
    pub fn new(id: MarkId) -> Self {
        Self {
            id,
            z_index: 0,
            payload: MarkPayload::Rect(RectChannels::default()),
            tooltip: None,
        }
    }

    /// Start building a mark with chainable channel setters.
    pub fn builder(id: MarkId) -> MarkBuilder {
        MarkBuilder {
            id,
            z_index: 0,
            tooltip: None,
            draft: Draft::Rect {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0,
                channels: RectChannels::default(),
            },
        }
    }

    /// Return the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Optional bounds hint (see [`MarkPayload::bounds`]).
    pub fn bounds(&self) -> Option<Rect> {
        self.payload.bounds()
    }
}

#[derive(Debug)]
enum Draft {
    // Rect geometry is collected per channel and assembled in `build`.
    Rect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        channels: RectChannels,
    },
    Text(TextChannels),
    Path(PathChannels),
}

/// A builder for [`Mark`].
///
/// Setters that do not apply to the current kind are ignored, so kind must be chosen first.
#[derive(Debug)]
pub struct MarkBuilder {
    id: MarkId,
    z_index: i32,
    tooltip: Option<String>,
    draft: Draft,
}

impl MarkBuilder {
    /// Set the mark z-index (rendering order).
    pub fn z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Set the mark kind, resetting all channels to their defaults.
    pub fn kind(mut self, kind: MarkKind) -> Self {
        self.draft = match kind {
            MarkKind::Rect => Draft::Rect {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0,
                channels: RectChannels::default(),
            },
            MarkKind::Text => Draft::Text(TextChannels::default()),
            MarkKind::Path => Draft::Path(PathChannels::default()),
        };
        self
    }

    /// Convenience for `MarkKind::Rect`.
    pub fn rect(self) -> Self {
        self.kind(MarkKind::Rect)
    }

    /// Convenience for `MarkKind::Text`.
    pub fn text(self) -> Self {
        self.kind(MarkKind::Text)
    }

    /// Convenience for `MarkKind::Path`.
    pub fn path(self) -> Self {
        self.kind(MarkKind::Path)
    }

    /// Set the `x` channel.
    pub fn x_const(mut self, v: f64) -> Self {
        match &mut self.draft {
            Draft::Rect { x, .. } => *x = v,
            Draft::Text(t) => t.pos.x = v,
            Draft::Path(_) => {}
        }
        self
    }

    /// Set the `y` channel.
    pub fn y_const(mut self, v: f64) -> Self {
        match &mut self.draft {
            Draft::Rect { y, .. } => *y = v,
            Draft::Text(t) => t.pos.y = v,
            Draft::Path(_) => {}
        }
        self
    }

    /// Set the `w` channel (rect marks only).
    pub fn w_const(mut self, v: f64) -> Self {
        if let Draft::Rect { w, .. } = &mut self.draft {
            *w = v;
        }
        self
    }

    /// Set the `h` channel (rect marks only).
    pub fn h_const(mut self, v: f64) -> Self {
        if let Draft::Rect { h, .. } = &mut self.draft {
            *h = v;
        }
        self
    }

    /// Set rect geometry in one call (rect marks only).
    pub fn rect_const(self, rect: Rect) -> Self {
        self.x_const(rect.x0)
            .y_const(rect.y0)
            .w_const(rect.width())
            .h_const(rect.height())
    }

    /// Set the fill to a solid color.
    pub fn fill_const(self, v: Color) -> Self {
        self.fill_brush_const(Brush::Solid(v))
    }

    /// Set the fill to a brush.
    pub fn fill_brush_const(mut self, v: impl Into<Brush>) -> Self {
        let v = v.into();
        match &mut self.draft {
            Draft::Rect { channels, .. } => channels.fill = v,
            Draft::Text(t) => t.fill = v,
            Draft::Path(p) => p.fill = v,
        }
        self
    }

    /// Set the text content (text marks only).
    pub fn text_const(mut self, v: impl Into<String>) -> Self {
        if let Draft::Text(t) = &mut self.draft {
            t.text = v.into();
        }
        self
    }

    /// Set the font size (text marks only).
    pub fn font_size_const(mut self, v: f64) -> Self {
        if let Draft::Text(t) = &mut self.draft {
            t.font_size = v;
        }
        self
    }

    /// Set the text anchor (text marks only).
    pub fn text_anchor(mut self, anchor: TextAnchor) -> Self {
        if let Draft::Text(t) = &mut self.draft {
            t.anchor = anchor;
        }
        self
    }

    /// Set the text baseline (text marks only).
    pub fn text_baseline(mut self, baseline: TextBaseline) -> Self {
        if let Draft::Text(t) = &mut self.draft {
            t.baseline = baseline;
        }
        self
    }

    /// Set the path geometry (path marks only).
    pub fn path_const(mut self, v: BezPath) -> Self {
        if let Draft::Path(p) = &mut self.draft {
            p.path = v;
        }
        self
    }

    /// Set the stroke to a brush (rect and path marks).
    pub fn stroke_brush_const(mut self, v: impl Into<Brush>) -> Self {
        let v = v.into();
        match &mut self.draft {
            Draft::Rect { channels, .. } => channels.stroke = v,
            Draft::Path(p) => p.stroke = v,
            Draft::Text(_) => {}
        }
        self
    }

    /// Set the stroke width (rect and path marks).
    pub fn stroke_width_const(mut self, v: f64) -> Self {
        match &mut self.draft {
            Draft::Rect { channels, .. } => channels.stroke_width = v,
            Draft::Path(p) => p.stroke_width = v,
            Draft::Text(_) => {}
        }
        self
    }

    /// Attach hover text.
    pub fn tooltip(mut self, text: impl Into<String>) -> Self {
        self.tooltip = Some(text.into());
        self
    }

    /// Finish building the mark.
    pub fn build(self) -> Mark {
        let payload = match self.draft {
            Draft::Rect {
                x,
                y,
                w,
                h,
                mut channels,
            } => {
                channels.rect = Rect::new(x, y, x + w, y + h);
                MarkPayload::Rect(channels)
            }
            Draft::Text(t) => MarkPayload::Text(t),
            Draft::Path(p) => MarkPayload::Path(p),
        };
        Mark {
            id: self.id,
            z_index: self.z_index,
            payload,
            tooltip: self.tooltip,
        }
    }
}

/// A render-ready set of marks, sorted by `(z_index, MarkId)`.
///
/// Ids are unique within a list: inserting a mark whose id is already present replaces the
/// earlier mark.
#[derive(Clone, Debug, Default)]
pub struct MarkList {
    marks: Vec<Mark>,
    index: HashMap<MarkId, usize>,
}

impl MarkList {
    /// Build a sorted list from marks in any order.
    pub fn from_marks(marks: impl IntoIterator<Item = Mark>) -> Self {
        let mut by_id: HashMap<MarkId, Mark> = HashMap::new();
        for mark in marks {
            by_id.insert(mark.id, mark);
        }
        let mut marks: Vec<Mark> = by_id.into_values().collect();
        marks.sort_by_key(|m| (m.z_index, m.id));
        let index = marks.iter().enumerate().map(|(i, m)| (m.id, i)).collect();
        Self { marks, index }
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if the list holds no marks.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Iterate marks in paint order (back to front).
    pub fn iter(&self) -> core::slice::Iter<'_, Mark> {
        self.marks.iter()
    }

    /// Marks in paint order.
    pub fn as_slice(&self) -> &[Mark] {
        &self.marks
    }

    /// Look up a mark by id.
    pub fn get(&self, id: MarkId) -> Option<&Mark> {
        self.index.get(&id).map(|&i| &self.marks[i])
    }

    /// Union of all known mark bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.marks
            .iter()
            .filter_map(Mark::bounds)
            .reduce(|a, b| a.union(b))
    }

    /// Returns the topmost mark under `pt` that carries a tooltip.
    pub fn hit_test(&self, pt: Point) -> Option<&Mark> {
        self.marks
            .iter()
            .rev()
            .find(|m| m.tooltip.is_some() && m.payload.contains(pt))
    }
}

impl<'a> IntoIterator for &'a MarkList {
    type Item = &'a Mark;
    type IntoIter = core::slice::Iter<'a, Mark>;

    fn into_iter(self) -> Self::IntoIter {
        self.marks.iter()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn builder_assembles_rect_geometry() {
        let mark = Mark::builder(MarkId(1))
            .rect()
            .x_const(10.0)
            .y_const(20.0)
            .w_const(30.0)
            .h_const(40.0)
            .fill_const(Color::from_rgba8(255, 0, 0, 255))
            .build();

        let MarkPayload::Rect(r) = &mark.payload else {
            panic!("expected rect payload");
        };
        assert_eq!(r.rect, Rect::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(r.stroke_width, 0.0);
        assert_eq!(mark.bounds(), Some(Rect::new(10.0, 20.0, 40.0, 60.0)));
    }

    #[test]
    fn text_bounds_are_unknown() {
        let mark = Mark::builder(MarkId(1))
            .text()
            .x_const(5.0)
            .y_const(6.0)
            .text_const("hello")
            .text_anchor(TextAnchor::Middle)
            .build();
        assert_eq!(mark.kind(), MarkKind::Text);
        assert_eq!(mark.bounds(), None);
        let MarkPayload::Text(t) = &mark.payload else {
            panic!("expected text payload");
        };
        assert_eq!(t.pos, Point::new(5.0, 6.0));
        assert_eq!(t.anchor, TextAnchor::Middle);
    }

    #[test]
    fn setters_for_other_kinds_are_ignored() {
        let mark = Mark::builder(MarkId(1))
            .text()
            .w_const(100.0)
            .stroke_width_const(3.0)
            .build();
        let MarkPayload::Text(t) = &mark.payload else {
            panic!("expected text payload");
        };
        assert_eq!(t.pos, Point::new(0.0, 0.0));
    }

    #[test]
    fn path_has_bounds() {
        let mut triangle = BezPath::new();
        triangle.move_to((0.0, 0.0));
        triangle.line_to((10.0, 0.0));
        triangle.line_to((5.0, 10.0));
        triangle.close_path();

        let mark = Mark::builder(MarkId(1)).path().path_const(triangle).build();
        assert_eq!(mark.kind(), MarkKind::Path);
        assert!(mark.bounds().is_some());
    }

    #[test]
    fn list_sorts_by_z_then_id() {
        let list = MarkList::from_marks([
            Mark::builder(MarkId(3)).z_index(10).build(),
            Mark::builder(MarkId(2)).z_index(0).build(),
            Mark::builder(MarkId(1)).z_index(10).build(),
        ]);
        let ids: Vec<u64> = list.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, [2, 1, 3]);
        assert_eq!(list.get(MarkId(3)).map(|m| m.z_index), Some(10));
    }

    #[test]
    fn duplicate_ids_keep_the_last_mark() {
        let list = MarkList::from_marks([
            Mark::builder(MarkId(1)).z_index(1).build(),
            Mark::builder(MarkId(1)).z_index(2).build(),
        ]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(MarkId(1)).map(|m| m.z_index), Some(2));
    }

    #[test]
    fn hit_test_prefers_topmost_mark_with_tooltip() {
        let back = Mark::builder(MarkId(1))
            .rect()
            .rect_const(Rect::new(0.0, 0.0, 100.0, 100.0))
            .tooltip("back")
            .build();
        let front = Mark::builder(MarkId(2))
            .rect()
            .z_index(5)
            .rect_const(Rect::new(10.0, 10.0, 20.0, 20.0))
            .tooltip("front")
            .build();
        let silent = Mark::builder(MarkId(3))
            .rect()
            .z_index(9)
            .rect_const(Rect::new(0.0, 0.0, 100.0, 100.0))
            .build();
        let list = MarkList::from_marks([back, front, silent]);

        let hit = list.hit_test(Point::new(15.0, 15.0)).and_then(|m| m.tooltip.as_deref());
        assert_eq!(hit, Some("front"));
        let hit = list.hit_test(Point::new(50.0, 50.0)).and_then(|m| m.tooltip.as_deref());
        assert_eq!(hit, Some("back"));
        assert!(list.hit_test(Point::new(500.0, 50.0)).is_none());
    }

    #[test]
    fn node_ids_are_namespaced() {
        assert_ne!(MarkId::for_node(1, 7), MarkId::for_node(2, 7));
        assert_eq!(MarkId::for_node(1, 7), MarkId::for_node(1, 7));
    }
}
