// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text mark generation.

extern crate alloc;

use alloc::string::String;

use kurbo::{Point, Rect};
use peniko::Brush;
use treepanel_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;

/// A text mark spec.
#[derive(Clone, Debug)]
pub struct TextMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Anchor position in scene coordinates.
    pub pos: Point,
    /// Text content (unshaped).
    pub text: String,
    /// Font size in scene coordinates.
    pub font_size: f64,
    /// Horizontal anchor.
    pub anchor: TextAnchor,
    /// Vertical baseline.
    pub baseline: TextBaseline,
    /// Fill paint.
    pub fill: Brush,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl TextMarkSpec {
    /// Creates a new text mark spec with default styling.
    pub fn new(id: MarkId, pos: Point, text: impl Into<String>) -> Self {
        Self {
            id,
            pos,
            text: text.into(),
            font_size: 12.0,
            anchor: TextAnchor::Start,
            baseline: TextBaseline::Middle,
            fill: Brush::default(),
            z_index: crate::z_order::LABELS,
        }
    }

    /// A label hanging from the top-left corner of `rect`, inset by `padding`.
    ///
    /// Returns `None` when the text does not fit inside the rectangle.
    pub fn inside(
        id: MarkId,
        rect: Rect,
        text: impl Into<String>,
        font_size: f64,
        padding: f64,
        measurer: &impl TextMeasurer,
    ) -> Option<Self> {
        let text = text.into();
        if text.is_empty() || !measurer.fits(&text, font_size, rect.size(), padding) {
            return None;
        }
        Some(
            Self::new(id, Point::new(rect.x0 + padding, rect.y0 + padding), text)
                .with_font_size(font_size)
                .with_baseline(TextBaseline::Hanging),
        )
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the text anchor.
    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Sets the text baseline.
    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Estimated extent of the text.
    pub fn bounds(&self, measurer: &impl TextMeasurer) -> Rect {
        let (w, h) = measurer.measure(&self.text, self.font_size);
        let Point { x, y } = self.pos;
        let (x0, x1) = match self.anchor {
            TextAnchor::Start => (x, x + w),
            TextAnchor::Middle => (x - w * 0.5, x + w * 0.5),
            TextAnchor::End => (x - w, x),
        };
        let (y0, y1) = match self.baseline {
            TextBaseline::Middle => (y - h * 0.5, y + h * 0.5),
            TextBaseline::Hanging => (y, y + h),
            TextBaseline::Alphabetic | TextBaseline::Ideographic => (y - h, y),
        };
        Rect::new(x0, y0, x1, y1)
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        Mark::builder(self.id)
            .text()
            .z_index(self.z_index)
            .x_const(self.pos.x)
            .y_const(self.pos.y)
            .text_const(self.text.clone())
            .font_size_const(self.font_size)
            .fill_brush_const(self.fill.clone())
            .text_anchor(self.anchor)
            .text_baseline(self.baseline)
            .build()
    }
}
