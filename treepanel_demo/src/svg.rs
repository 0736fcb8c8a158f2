// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for panel views.

use std::fmt::Write as _;

use kurbo::Rect;
use peniko::{Brush, Color};
use treepanel_charts::{NO_DATA_MESSAGE, PanelView, Theme};
use treepanel_core::{Mark, MarkList, MarkPayload, TextAnchor, TextBaseline};

/// A panel-sized SVG document with a themed background.
#[derive(Debug)]
pub(crate) struct SvgScene {
    view_box: Rect,
    background: Color,
    body: String,
}

impl SvgScene {
    pub(crate) fn new(width: f64, height: f64, theme: Theme) -> Self {
        Self {
            view_box: Rect::new(0.0, 0.0, width, height),
            background: theme.background(),
            body: String::new(),
        }
    }

    /// Appends marks in paint order.
    pub(crate) fn push_marks(&mut self, marks: &MarkList) {
        for mark in marks {
            self.push_mark(mark);
        }
    }

    fn push_mark(&mut self, mark: &Mark) {
        let out = &mut self.body;
        match &mark.payload {
            MarkPayload::Rect(r) => {
                let _ = write!(
                    out,
                    r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                    r.rect.x0,
                    r.rect.y0,
                    r.rect.width(),
                    r.rect.height(),
                );
                write_paint_attr(out, "fill", &r.fill);
                if r.stroke_width > 0.0 {
                    write_paint_attr(out, "stroke", &r.stroke);
                    let _ = write!(out, r#" stroke-width="{}""#, r.stroke_width);
                }
            }
            MarkPayload::Text(t) => {
                let baseline = match t.baseline {
                    TextBaseline::Middle => "middle",
                    TextBaseline::Alphabetic => "alphabetic",
                    TextBaseline::Hanging => "hanging",
                    TextBaseline::Ideographic => "ideographic",
                };
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" font-size="{}" font-family="sans-serif" dominant-baseline="{}""#,
                    t.pos.x, t.pos.y, t.font_size, baseline
                );
                out.push_str(match t.anchor {
                    TextAnchor::Start => r#" text-anchor="start""#,
                    TextAnchor::Middle => r#" text-anchor="middle""#,
                    TextAnchor::End => r#" text-anchor="end""#,
                });
                write_paint_attr(out, "fill", &t.fill);
                out.push('>');
                out.push_str(&escape_xml(&t.text));
                out.push_str("</text>\n");
                return;
            }
            MarkPayload::Path(p) => {
                let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
                write_paint_attr(out, "fill", &p.fill);
                if p.stroke_width > 0.0 {
                    write_paint_attr(out, "stroke", &p.stroke);
                    let _ = write!(out, r#" stroke-width="{}""#, p.stroke_width);
                }
            }
        }
        match &mark.tooltip {
            Some(tooltip) => {
                let tag = match mark.payload {
                    MarkPayload::Rect(_) => "rect",
                    _ => "path",
                };
                let _ = writeln!(out, "><title>{}</title></{tag}>", escape_xml(tooltip));
            }
            None => out.push_str("/>\n"),
        }
    }

    /// Appends a free-standing line of text.
    pub(crate) fn push_text(&mut self, x: f64, y: f64, text: &str, fill: Color) {
        let _ = write!(
            self.body,
            r#"<text x="{x}" y="{y}" font-size="14" font-family="sans-serif" dominant-baseline="hanging""#
        );
        write_paint_attr(&mut self.body, "fill", &Brush::Solid(fill));
        let _ = writeln!(self.body, ">{}</text>", escape_xml(text));
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let v = self.view_box;
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
            v.x0,
            v.y0,
            v.width(),
            v.height(),
            v.width(),
            v.height()
        );
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            v.x0,
            v.y0,
            v.width(),
            v.height()
        );
        write_paint_attr(&mut out, "fill", &Brush::Solid(self.background));
        out.push_str("/>\n");
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

/// Renders any panel view: the chart's marks, or the no-data / getting-started text.
pub(crate) fn view_to_svg(view: &PanelView, theme: Theme, width: f64, height: f64) -> String {
    let mut scene = SvgScene::new(width, height, theme);
    match view {
        PanelView::Chart(chart) => scene.push_marks(&chart.marks),
        PanelView::NoData => scene.push_text(8.0, 8.0, NO_DATA_MESSAGE, theme.text()),
        PanelView::Guidance(guidance) => {
            scene.push_text(8.0, 8.0, "To get started, create a query that returns:", theme.text());
            for (i, (line, done)) in guidance.lines().into_iter().enumerate() {
                let (mark, fill) = if done {
                    ("\u{2713}", theme.success())
                } else {
                    ("\u{25CB}", theme.text())
                };
                let y = 32.0 + 20.0 * i as f64;
                scene.push_text(16.0, y, &format!("{mark} {line}"), fill);
            }
            scene.push_text(8.0, 80.0, "Read the documentation", theme.link_external());
            scene.push_text(8.0, 100.0, guidance.docs_url(), theme.link_external());
        }
    }
    scene.to_svg_string()
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = if rgba.a == 255 {
                None
            } else {
                Some(f64::from(rgba.a) / 255.0)
            };
            (fill, fill_opacity)
        }
        _ => ("none".to_string(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
