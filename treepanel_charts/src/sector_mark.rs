// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sector (arc) mark generation for pie and donut slices.

extern crate alloc;

use alloc::string::String;

use kurbo::{Circle, Point, Shape};
use peniko::Brush;
use treepanel_core::{Mark, MarkId};
use treepanel_hierarchy::PieArc;

use crate::rect_mark::StrokeStyle;

/// A sector (arc slice), suitable for pie/donut charts.
///
/// Angles are in radians in y-down screen space, as `kurbo::Circle::segment` expects.
#[derive(Clone, Debug)]
pub struct SectorMarkSpec {
    /// Stable mark id.
    pub id: MarkId,
    /// Center in scene coordinates.
    pub center: Point,
    /// Inner radius in scene coordinates (0 for a pie slice).
    pub inner_radius: f64,
    /// Outer radius in scene coordinates.
    pub outer_radius: f64,
    /// Start angle in radians.
    pub start_angle: f64,
    /// Signed sweep in radians.
    pub sweep_angle: f64,
    /// Fill paint for the sector.
    pub fill: Brush,
    /// Optional outline stroke.
    pub stroke: Option<StrokeStyle>,
    /// Hover text.
    pub tooltip: Option<String>,
    /// Curve flattening tolerance when converting the sector to a `BezPath`.
    pub tolerance: f64,
    /// Rendering order hint ([`Mark::z_index`]).
    pub z_index: i32,
}

impl SectorMarkSpec {
    /// Creates a sector spec for a pie layout arc.
    pub fn from_arc(
        id: MarkId,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        arc: &PieArc,
    ) -> Self {
        Self {
            id,
            center,
            inner_radius,
            outer_radius,
            start_angle: arc.screen_start(),
            sweep_angle: arc.screen_sweep(),
            fill: Brush::default(),
            stroke: None,
            tooltip: None,
            tolerance: 0.1,
            z_index: crate::z_order::SECTORS,
        }
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        self.fill = fill.into();
        self
    }

    /// Sets the outline stroke.
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
        let circle = Circle::new(self.center, self.outer_radius);
        let segment = circle.segment(self.inner_radius, self.start_angle, self.sweep_angle);
        let path = segment.path_elements(self.tolerance).collect();

        let mut builder = Mark::builder(self.id)
            .path()
            .path_const(path)
            .z_index(self.z_index)
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

#[cfg(test)]
mod tests {
    extern crate std;

    use peniko::color::palette::css;
    use treepanel_core::{MarkKind, MarkPayload};
    use treepanel_hierarchy::PieLayout;

    use super::*;

    #[test]
    fn upper_half_sector_stays_above_center() {
        let arcs = PieLayout::default().arcs(&[1.0]);
        let mark = SectorMarkSpec::from_arc(
            MarkId::from_raw(1),
            Point::new(100.0, 100.0),
            0.0,
            80.0,
            &arcs[0],
        )
        .with_fill(css::TEAL)
        .with_tooltip("a: 1")
        .mark();
        assert_eq!(mark.kind(), MarkKind::Path);
        let bounds = mark.bounds().unwrap();
        assert!((bounds.x0 - 20.0).abs() < 0.5, "{bounds:?}");
        assert!((bounds.x1 - 180.0).abs() < 0.5, "{bounds:?}");
        assert!((bounds.y0 - 20.0).abs() < 0.5, "{bounds:?}");
        assert!(bounds.y1 <= 100.0 + 1e-6, "{bounds:?}");
        assert!(mark.payload.contains(Point::new(100.0, 60.0)));
        assert!(!mark.payload.contains(Point::new(100.0, 140.0)));
        let MarkPayload::Path(p) = &mark.payload else {
            panic!("expected path");
        };
        assert_eq!(p.fill, Brush::Solid(css::TEAL));
    }

    #[test]
    fn donut_leaves_the_hole_empty() {
        let arcs = PieLayout::default().arcs(&[1.0]);
        let mark = SectorMarkSpec::from_arc(
            MarkId::from_raw(2),
            Point::new(0.0, 0.0),
            60.0,
            80.0,
            &arcs[0],
        )
        .mark();
        assert!(!mark.payload.contains(Point::new(0.0, -30.0)));
        assert!(mark.payload.contains(Point::new(0.0, -70.0)));
    }
}
