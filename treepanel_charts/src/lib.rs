// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Treemap and pie panel rendering on top of `treepanel_core` marks.
//!
//! This crate turns a host's query result into drawable marks:
//! - **Theme and scales** pick tile colors: an ordinal palette over categories, or a
//!   white-to-accent ramp for a numeric color field.
//! - **Mark specs** (rect, sector, rule, text, legend) generate `treepanel_core::Mark`s.
//! - **The panel** ([`TreemapPanel`], [`render`]) runs the whole pipeline: field resolution,
//!   value mapping, hierarchy construction, layout and mark generation.
//!
//! ```
//! use kurbo::Size;
//! use treepanel_charts::{PanelOptions, PanelView, Theme, render};
//! use treepanel_data::{DataFrame, Field, PanelData};
//!
//! let frame = DataFrame::new(vec![
//!     Field::string("host", ["web-1", "web-2", "db-1"]),
//!     Field::number("requests", [120.0, 80.0, 30.0]),
//!     Field::string("tier", ["web", "web", "db"]),
//! ])
//! .unwrap();
//! let options = PanelOptions::default().with_color_field("tier");
//! let view = render(&PanelData::single(frame), &options, Theme::Dark, Size::new(640.0, 480.0))
//!     .unwrap();
//! let PanelView::Chart(chart) = view else { panic!() };
//! assert_eq!(chart.categories, ["web", "db", "Ungrouped"]);
//! ```
//!
//! Text shaping is out of scope; text marks store unshaped strings and label fitting goes
//! through a [`TextMeasurer`].

#![no_std]

extern crate alloc;

mod color;
#[cfg(not(feature = "std"))]
mod float;
mod legend;
mod measure;
mod options;
mod panel;
mod presentation;
mod rect_mark;
mod rule_mark;
mod scale;
mod sector_mark;
mod text_mark;
mod theme;
pub mod z_order;

pub use color::ColorAssigner;
pub use legend::{LegendItem, LegendSpec};
pub use measure::{HeuristicTextMeasurer, TextMeasurer};
pub use options::{ChartMode, PanelOptions, PieRadius};
pub use panel::{
    ChartView, DOCS_URL, Guidance, NO_DATA_MESSAGE, PanelView, RenderError, TreemapPanel, render,
};
pub use rect_mark::{RectMarkSpec, StrokeStyle};
pub use rule_mark::RuleMarkSpec;
pub use scale::{ScaleColorLinear, ScaleLinear, ScaleOrdinal};
pub use sector_mark::SectorMarkSpec;
pub use text_mark::TextMarkSpec;
pub use theme::{Hue, Theme, contrast_text};
