// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rectangle mark generation (treemap tiles and category frames).

extern crate alloc;

use alloc::string::String;

use kurbo::Rect;
use peniko::{Brush, Color};
use treepanel_core::{Mark, MarkId};

/// Outline paint and width.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// A solid-color stroke.
    pub fn solid(color: Color, stroke_width: f64) -> Self {
        Self {
            brush: Brush::Solid(color),
            stroke_width,
        }
    }
}

/// A rectangle mark spec.
#[derive(Clone, Debug)]
pub struct RectMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Rectangle geometry in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Optional outline.
    pub stroke: Option<StrokeStyle>,
    /// Hover text.
    pub tooltip: Option<String>,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl RectMarkSpec {
    /// Creates a new rectangle mark spec.
    pub fn new(id: MarkId, rect: Rect) -> Self {
        Self {
            id,
            rect,
            fill: Brush::default(),
            stroke: None,
            tooltip: None,
            z_index: crate::z_order::TILES,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline.
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Sets the hover text.
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut builder = Mark::builder(self.id)
            .rect()
            .z_index(self.z_index)
            .rect_const(self.rect)
            .fill_brush_const(self.fill.clone());
        if let Some(stroke) = &self.stroke {
            builder = builder
                .stroke_brush_const(stroke.brush.clone())
                .stroke_width_const(stroke.stroke_width);
        }
        if let Some(tooltip) = &self.tooltip {
            builder = builder.tooltip(tooltip.clone());
        }
        builder.build()
    }
}
