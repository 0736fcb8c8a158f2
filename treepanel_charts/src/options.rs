// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! User-facing panel options.

extern crate alloc;

use alloc::string::String;

use treepanel_hierarchy::Tiling;

/// Which chart the panel draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ChartMode {
    /// Hierarchical proportional-area chart.
    #[default]
    Treemap,
    /// Half-circle proportional-angle chart.
    Pie,
}

/// Inner radius of the pie presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieRadius {
    /// A full pie (inner radius 0).
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "0"))]
    Pie,
    /// A donut with inner radius 60.
    #[cfg_attr(feature = "serde", serde(rename = "60"))]
    Donut,
}

impl PieRadius {
    /// Inner radius in scene units.
    pub fn inner_radius(self) -> f64 {
        match self {
            Self::Pie => 0.0,
            Self::Donut => 60.0,
        }
    }
}

/// Panel configuration.
///
/// Field names are matched exactly; an empty name means "pick the first field of the expected
/// type".
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct PanelOptions {
    /// Treemap tiling strategy.
    pub tiling: Tiling,
    /// Label field name.
    pub text_field: String,
    /// Weight field name.
    pub size_field: String,
    /// Grouping/color field name.
    pub color_field: String,
    /// Pie inner radius selector.
    pub pie_options: PieRadius,
    /// Chart kind.
    pub mode: ChartMode,
}

impl PanelOptions {
    /// Sets the tiling strategy.
    pub fn with_tiling(mut self, tiling: Tiling) -> Self {
        self.tiling = tiling;
        self
    }

    /// Sets the label field name.
    pub fn with_text_field(mut self, name: impl Into<String>) -> Self {
        self.text_field = name.into();
        self
    }

    /// Sets the weight field name.
    pub fn with_size_field(mut self, name: impl Into<String>) -> Self {
        self.size_field = name.into();
        self
    }

    /// Sets the grouping/color field name.
    pub fn with_color_field(mut self, name: impl Into<String>) -> Self {
        self.color_field = name.into();
        self
    }

    /// Sets the pie inner radius selector.
    pub fn with_pie_options(mut self, pie: PieRadius) -> Self {
        self.pie_options = pie;
        self
    }

    /// Sets the chart kind.
    pub fn with_mode(mut self, mode: ChartMode) -> Self {
        self.mode = mode;
        self
    }
}
