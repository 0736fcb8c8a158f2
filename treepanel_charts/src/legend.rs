// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation.
//!
//! A horizontal "swatch + label" legend: items flow left to right, wrap to new rows when they
//! run out of width, and every row is centered in the available area.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

use kurbo::{Rect, Size};
use peniko::color::palette::css;
use peniko::{Brush, Color};
use treepanel_core::{Mark, MarkId, TextAnchor, TextBaseline};

use crate::measure::TextMeasurer;
use crate::z_order;

/// A legend entry.
#[derive(Clone, Debug)]
pub struct LegendItem {
    /// The label string shown next to the swatch.
    pub label: String,
    /// The swatch fill paint.
    pub fill: Brush,
}

impl LegendItem {
    /// Convenience constructor for a solid-color swatch.
    pub fn solid(label: impl Into<String>, color: Color) -> Self {
        Self {
            label: label.into(),
            fill: Brush::Solid(color),
        }
    }
}

/// An unpositioned horizontal legend.
///
/// Use it in two passes: [`LegendSpec::measure`] to reserve space, then [`LegendSpec::marks`]
/// once the legend's area is known.
#[derive(Clone, Debug)]
pub struct LegendSpec {
    /// Id namespace of the swatches; labels use the next namespace.
    pub id_namespace: u32,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Horizontal gap between items.
    pub item_gap: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Label font size.
    pub font_size: f64,
    /// Label color.
    pub text_fill: Brush,
    /// Items in display order.
    pub items: Vec<LegendItem>,
}

impl LegendSpec {
    /// Creates a new legend specification with defaults.
    pub fn new(id_namespace: u32, items: Vec<LegendItem>) -> Self {
        Self {
            id_namespace,
            swatch_size: 14.0,
            label_dx: 4.0,
            item_gap: 10.0,
            row_gap: 4.0,
            font_size: 12.0,
            text_fill: css::BLACK.into(),
            items,
        }
    }

    /// Sets the label text paint.
    pub fn with_text_fill(mut self, text_fill: impl Into<Brush>) -> Self {
        self.text_fill = text_fill.into();
        self
    }

    /// Sets the label font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    fn row_height(&self) -> f64 {
        self.swatch_size.max(self.font_size)
    }

    fn item_width(&self, item: &LegendItem, measurer: &impl TextMeasurer) -> f64 {
        let (w, _) = measurer.measure(&item.label, self.font_size);
        self.swatch_size + self.label_dx + w
    }

    /// Splits items into rows no wider than `max_width` (a single item may exceed it).
    fn rows(&self, max_width: f64, measurer: &impl TextMeasurer) -> Vec<(Range<usize>, f64)> {
        let mut rows = Vec::new();
        let mut start = 0;
        let mut width = 0.0;
        for (i, item) in self.items.iter().enumerate() {
            let w = self.item_width(item, measurer);
            if i > start && width + self.item_gap + w > max_width {
                rows.push((start..i, width));
                start = i;
                width = 0.0;
            }
            width += if i > start { self.item_gap + w } else { w };
        }
        if start < self.items.len() {
            rows.push((start..self.items.len(), width));
        }
        rows
    }

    /// Size the legend needs when limited to `max_width`.
    pub fn measure(&self, max_width: f64, measurer: &impl TextMeasurer) -> Size {
        let rows = self.rows(max_width, measurer);
        if rows.is_empty() {
            return Size::ZERO;
        }
        let width = rows.iter().map(|(_, w)| *w).fold(0.0, f64::max);
        let n = rows.len() as f64;
        Size::new(width, n * self.row_height() + (n - 1.0) * self.row_gap)
    }

    /// Generates swatch and label marks, rows centered horizontally in `area`, starting at its top.
    pub fn marks(&self, area: Rect, measurer: &impl TextMeasurer) -> Vec<Mark> {
        let mut out = Vec::with_capacity(self.items.len() * 2);
        let row_height = self.row_height();
        let center = area.center().x;

        for (r, (range, width)) in self.rows(area.width(), measurer).into_iter().enumerate() {
            let y = area.y0 + r as f64 * (row_height + self.row_gap);
            let mut x = center - width / 2.0;
            for i in range {
                let item = &self.items[i];
                let key = i as u64;

                out.push(
                    Mark::builder(MarkId::for_node(self.id_namespace, key))
                        .rect()
                        .z_index(z_order::LEGEND_SWATCHES)
                        .rect_const(Rect::from_origin_size(
                            (x, y + (row_height - self.swatch_size) * 0.5),
                            (self.swatch_size, self.swatch_size),
                        ))
                        .fill_brush_const(item.fill.clone())
                        .build(),
                );

                out.push(
                    Mark::builder(MarkId::for_node(self.id_namespace + 1, key))
                        .text()
                        .z_index(z_order::LEGEND_LABELS)
                        .x_const(x + self.swatch_size + self.label_dx)
                        .y_const(y + row_height * 0.5)
                        .text_const(item.label.clone())
                        .font_size_const(self.font_size)
                        .fill_brush_const(self.text_fill.clone())
                        .text_anchor(TextAnchor::Start)
                        .text_baseline(TextBaseline::Middle)
                        .build(),
                );

                x += self.item_width(item, measurer) + self.item_gap;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use treepanel_core::MarkPayload;

    use super::*;
    use crate::measure::HeuristicTextMeasurer;

    fn spec() -> LegendSpec {
        // Each item: 14 + 4 + 0.6 * 10 * 2 = 30 wide.
        LegendSpec::new(
            9,
            vec![
                LegendItem::solid("aa", css::RED),
                LegendItem::solid("bb", css::GREEN),
                LegendItem::solid("cc", css::BLUE),
            ],
        )
        .with_font_size(10.0)
    }

    #[test]
    fn single_row_is_centered() {
        let m = HeuristicTextMeasurer;
        let legend = spec();
        assert_eq!(legend.measure(1000.0, &m), Size::new(110.0, 14.0));
        let marks = legend.marks(Rect::new(0.0, 100.0, 200.0, 120.0), &m);
        assert_eq!(marks.len(), 6);
        let MarkPayload::Rect(first) = &marks[0].payload else {
            panic!("expected swatch");
        };
        assert_eq!(first.rect, Rect::new(45.0, 100.0, 59.0, 114.0));
        let MarkPayload::Text(label) = &marks[1].payload else {
            panic!("expected label");
        };
        assert_eq!(label.text, "aa");
        assert_eq!(label.pos.x, 63.0);
    }

    #[test]
    fn wraps_when_out_of_width() {
        let m = HeuristicTextMeasurer;
        let legend = spec();
        // 70 fits two items (30 + 10 + 30) per row.
        assert_eq!(legend.measure(70.0, &m), Size::new(70.0, 32.0));
        assert_eq!(legend.measure(10.0, &m), Size::new(30.0, 50.0));
    }

    #[test]
    fn empty_legend_has_no_size() {
        let legend = LegendSpec::new(1, Vec::new());
        assert_eq!(legend.measure(100.0, &HeuristicTextMeasurer), Size::ZERO);
        assert!(legend.marks(Rect::new(0.0, 0.0, 10.0, 10.0), &HeuristicTextMeasurer).is_empty());
    }
}
