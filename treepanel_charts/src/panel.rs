// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The panel render pipeline: frames and options in, a drawable view out.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Size;
use tracing::debug;
use treepanel_core::MarkList;
use treepanel_data::{PanelData, apply_mappings, resolve_fields, rows_from_fields};
use treepanel_hierarchy::{StratifyError, build_tree};

use crate::color::ColorAssigner;
use crate::measure::{HeuristicTextMeasurer, TextMeasurer};
use crate::options::{ChartMode, PanelOptions};
use crate::presentation::{Style, pie_marks, treemap_marks};
use crate::theme::Theme;

/// Message shown when the query produced no rows.
pub const NO_DATA_MESSAGE: &str = "Query returned an empty result.";

/// Where the "getting started" guidance points to.
pub const DOCS_URL: &str = "https://grafana.com/grafana/plugins/marcusolsson-treemap-panel";

/// A render failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The rows could not be linked into a single tree.
    Structure(StratifyError),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure(err) => write!(f, "invalid panel hierarchy: {err}"),
        }
    }
}

impl core::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Structure(err) => Some(err),
        }
    }
}

impl From<StratifyError> for RenderError {
    fn from(err: StratifyError) -> Self {
        Self::Structure(err)
    }
}

/// Which required fields were found, for the "getting started" view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Guidance {
    /// A label field resolved.
    pub has_text_field: bool,
    /// A weight field resolved.
    pub has_size_field: bool,
}

impl Guidance {
    /// Checklist lines, each with whether it is satisfied.
    pub fn lines(&self) -> [(&'static str, bool); 2] {
        [
            ("A text field", self.has_text_field),
            ("A number field", self.has_size_field),
        ]
    }

    /// Documentation link.
    pub fn docs_url(&self) -> &'static str {
        DOCS_URL
    }
}

/// The drawn chart.
#[derive(Debug, Clone)]
pub struct ChartView {
    /// Which presentation produced the marks.
    pub kind: ChartMode,
    /// Marks in paint order.
    pub marks: MarkList,
    /// Treemap category keys in color order, or pie slice names in input order.
    pub categories: Vec<String>,
    /// Extent the marks were laid out in.
    pub size: Size,
}

/// Result of a render.
#[derive(Debug, Clone)]
pub enum PanelView {
    /// No frames, or a frame without rows.
    NoData,
    /// Text or size field missing; tells the user what the query needs.
    Guidance(Guidance),
    /// A chart.
    Chart(ChartView),
}

impl PanelView {
    /// The chart, if one was drawn.
    pub fn chart(&self) -> Option<&ChartView> {
        match self {
            Self::Chart(chart) => Some(chart),
            _ => None,
        }
    }
}

/// Renders `data` with the heuristic text measurer.
///
/// See [`TreemapPanel::render`].
pub fn render(
    data: &PanelData,
    options: &PanelOptions,
    theme: Theme,
    size: Size,
) -> Result<PanelView, RenderError> {
    TreemapPanel::new(options.clone(), theme).render(data, size)
}

/// A configured panel.
#[derive(Debug, Clone)]
pub struct TreemapPanel<M = HeuristicTextMeasurer> {
    /// User options.
    pub options: PanelOptions,
    /// Dashboard theme.
    pub theme: Theme,
    measurer: M,
}

impl TreemapPanel {
    /// A panel measuring labels with [`HeuristicTextMeasurer`].
    pub fn new(options: PanelOptions, theme: Theme) -> Self {
        Self {
            options,
            theme,
            measurer: HeuristicTextMeasurer,
        }
    }
}

impl<M: TextMeasurer> TreemapPanel<M> {
    /// Replaces the text measurer used for label fitting and legend layout.
    pub fn with_measurer<N: TextMeasurer>(self, measurer: N) -> TreemapPanel<N> {
        TreemapPanel {
            options: self.options,
            theme: self.theme,
            measurer,
        }
    }

    /// Renders the first frame of `data` into `size`.
    ///
    /// Missing frames or rows yield [`PanelView::NoData`]; an unresolved text or size field
    /// yields [`PanelView::Guidance`]. Rows whose linkage cannot form a tree fail with
    /// [`RenderError::Structure`].
    pub fn render(&self, data: &PanelData, size: Size) -> Result<PanelView, RenderError> {
        let Some(frame) = data.primary() else {
            return Ok(PanelView::NoData);
        };
        let options = &self.options;
        let resolved = resolve_fields(
            frame,
            Some(options.text_field.as_str()),
            Some(options.size_field.as_str()),
            Some(options.color_field.as_str()),
        );
        let (Some(text), Some(weight)) = (resolved.text, resolved.size) else {
            debug!("missing fields: {:?}", resolved.missing());
            return Ok(PanelView::Guidance(Guidance {
                has_text_field: resolved.text.is_some(),
                has_size_field: resolved.size.is_some(),
            }));
        };
        if frame.is_empty() {
            return Ok(PanelView::NoData);
        }

        let text = apply_mappings(text);
        let weight = apply_mappings(weight);
        let color = resolved.color.map(apply_mappings);
        let rows = rows_from_fields(&text, &weight, color.as_ref());
        let display = weight.display_processor();
        let style = Style {
            theme: self.theme,
            size,
            display: &display,
            measurer: &self.measurer,
        };

        let (marks, categories) = match options.mode {
            ChartMode::Treemap => {
                let grouped = resolved.is_grouped();
                debug!("treemap: {} rows, grouped={grouped}", rows.len());
                let hierarchy = build_tree(&rows, grouped)?;
                let colors = if grouped {
                    ColorAssigner::categorical(&hierarchy.categories, self.theme)
                } else {
                    ColorAssigner::continuous(color.as_ref(), Some(&weight), self.theme)
                };
                let marks = treemap_marks(&hierarchy, options.tiling, &colors, style);
                (marks, hierarchy.categories)
            }
            ChartMode::Pie => {
                let slices: Vec<(String, f64)> =
                    rows.iter().map(|r| (r.name(), r.weight())).collect();
                let marks = pie_marks(&slices, options.pie_options.inner_radius(), style);
                (marks, slices.into_iter().map(|(name, _)| name).collect())
            }
        };

        Ok(PanelView::Chart(ChartView {
            kind: options.mode,
            marks: MarkList::from_marks(marks),
            categories,
            size,
        }))
    }
}
