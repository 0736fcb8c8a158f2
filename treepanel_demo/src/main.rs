// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panel demos for `treepanel_charts`.
//!
//! Renders a fixed set of sample panels, plus any JSON panel files given on the command line,
//! into one HTML report.

mod html;
mod svg;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kurbo::Size;
use serde::Deserialize;
use treepanel_charts::{ChartMode, PanelOptions, PanelView, PieRadius, Theme, render};
use treepanel_data::{DataFrame, Field, FieldConfig, PanelData, ValueMapping};
use treepanel_hierarchy::Tiling;

use crate::html::HtmlSection;

#[derive(Parser, Debug)]
#[command(name = "treepanel_demo")]
#[command(about = "Render treemap and pie panels to an HTML report", long_about = None)]
struct Args {
    /// Panel files (`{"options", "theme", "width", "height", "data"}`) to render after the
    /// built-in samples.
    panels: Vec<PathBuf>,

    /// Where to write the report.
    #[arg(short, long, default_value = "treepanel_demo.html")]
    out: PathBuf,

    /// Skip the built-in samples.
    #[arg(long)]
    no_samples: bool,
}

/// A panel as stored on disk.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct PanelFile {
    title: Option<String>,
    options: PanelOptions,
    theme: Theme,
    width: f64,
    height: f64,
    data: PanelData,
}

impl Default for PanelFile {
    fn default() -> Self {
        Self {
            title: None,
            options: PanelOptions::default(),
            theme: Theme::default(),
            width: 480.0,
            height: 320.0,
            data: PanelData::default(),
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut sections = if args.no_samples {
        Vec::new()
    } else {
        samples()?
    };
    for path in &args.panels {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let panel: PanelFile = serde_json::from_str(&json)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let title = panel
            .title
            .clone()
            .unwrap_or_else(|| path.display().to_string());
        sections.push(section(title, "Loaded from a panel file.", &panel)?);
    }

    let report = html::render_report("Treepanel demo", &sections);
    fs::write(&args.out, report)
        .with_context(|| format!("failed to write {}", args.out.display()))?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn section(title: impl Into<String>, description: &str, panel: &PanelFile) -> Result<HtmlSection> {
    let size = Size::new(panel.width, panel.height);
    let view = render(&panel.data, &panel.options, panel.theme, size)
        .context("failed to render panel")?;
    let description = match &view {
        PanelView::Chart(chart) => format!(
            "{description} {} marks; categories: {}.",
            chart.marks.len(),
            chart.categories.join(", ")
        ),
        _ => description.to_string(),
    };
    Ok(HtmlSection {
        title: title.into(),
        description,
        svg: svg::view_to_svg(&view, panel.theme, panel.width, panel.height),
    })
}

fn services() -> Result<PanelData> {
    let frame = DataFrame::new(vec![
        Field::string(
            "service",
            [
                "checkout", "cart", "search", "catalog", "auth", "users", "billing", "ledger",
                "emails", "queue",
            ],
        ),
        Field::number(
            "requests",
            [420.0, 310.0, 260.0, 180.0, 150.0, 90.0, 75.0, 40.0, 30.0, 12.0],
        )
        .with_config(FieldConfig {
            unit: Some("req/s".into()),
            ..FieldConfig::default()
        }),
        Field::string(
            "team",
            [
                "storefront",
                "storefront",
                "discovery",
                "discovery",
                "identity",
                "identity",
                "payments",
                "payments",
                "",
                "platform",
            ],
        )
        .with_mappings(vec![ValueMapping::value("platform", "infra")]),
        Field::number(
            "error_rate",
            [0.2, 1.4, 0.1, 3.9, 0.0, 0.6, 2.2, 4.8, 0.3, 1.0],
        )
        .with_config(FieldConfig {
            min: Some(0.0),
            max: Some(5.0),
            ..FieldConfig::default()
        }),
    ])?;
    Ok(PanelData::single(frame))
}

fn samples() -> Result<Vec<HtmlSection>> {
    let data = services()?;
    let grouped = PanelOptions::default()
        .with_text_field("service")
        .with_size_field("requests")
        .with_color_field("team");
    let panel = |options: PanelOptions, theme: Theme| PanelFile {
        options,
        theme,
        data: data.clone(),
        ..PanelFile::default()
    };

    let mut out = vec![section(
        "Grouped treemap",
        "Services grouped by team; the row without a team lands in Ungrouped.",
        &panel(grouped.clone(), Theme::Dark),
    )?];
    for tiling in Tiling::ALL {
        out.push(section(
            format!("Tiling: {}", tiling.id()),
            "The same grouped data with another tiling strategy.",
            &panel(grouped.clone().with_tiling(tiling), Theme::Light),
        )?);
    }
    out.push(section(
        "Continuous colors",
        "A numeric color field (error rate, 0 to 5) drives a white-to-red ramp.",
        &panel(grouped.clone().with_color_field("error_rate"), Theme::Light),
    )?);
    out.push(section(
        "Pie",
        "A half-circle pie of the same rows, with value labels and a legend.",
        &panel(grouped.clone().with_mode(ChartMode::Pie), Theme::Dark),
    )?);
    out.push(section(
        "Donut",
        "The pie with an inner radius of 60.",
        &panel(
            grouped
                .clone()
                .with_mode(ChartMode::Pie)
                .with_pie_options(PieRadius::Donut),
            Theme::Light,
        ),
    )?);
    out.push(section(
        "Getting started",
        "A text field that does not exist shows the setup checklist.",
        &panel(grouped.with_text_field("hostname"), Theme::Dark),
    )?);
    out.push(section(
        "No data",
        "An empty result set.",
        &PanelFile::default(),
    )?);
    Ok(out)
}
