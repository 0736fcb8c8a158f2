// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rule mark generation.
//!
//! A rule is a stroked straight segment; the pie uses them to connect slices to their labels.

use kurbo::{BezPath, Point};
use peniko::{Brush, Color};
use treepanel_core::{Mark, MarkId};

use crate::z_order;

/// A stroked line segment.
#[derive(Clone, Debug)]
pub struct RuleMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Start point in scene coordinates.
    pub from: Point,
    /// End point in scene coordinates.
    pub to: Point,
    /// Stroke paint.
    pub stroke: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl RuleMarkSpec {
    /// Creates a new rule between two points.
    pub fn new(id: MarkId, from: Point, to: Point) -> Self {
        Self {
            id,
            from,
            to,
            stroke: Brush::default(),
            stroke_width: 1.0,
            z_index: z_order::LABEL_LINES,
        }
    }

    /// Sets stroke paint and width.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        self.stroke = stroke.into();
        self.stroke_width = stroke_width;
        self
    }

    /// Generates the mark.
    pub fn mark(&self) -> Mark {
        let mut p = BezPath::new();
        p.move_to(self.from);
        p.line_to(self.to);
        Mark::builder(self.id)
            .path()
            .path_const(p)
            .z_index(self.z_index)
            .fill_const(Color::TRANSPARENT)
            .stroke_brush_const(self.stroke.clone())
            .stroke_width_const(self.stroke_width)
            .build()
    }
}
