// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-page HTML report around demo SVGs.

use std::fmt::Write as _;

use crate::svg::escape_xml;

/// One titled demo.
#[derive(Debug)]
pub(crate) struct HtmlSection {
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) svg: String,
}

pub(crate) fn render_report(title: &str, sections: &[HtmlSection]) -> String {
    let mut out = String::new();
    let title = escape_xml(title);
    let _ = writeln!(
        out,
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{title}</title>"
    );
    out.push_str(
        "<style>body{font-family:sans-serif;margin:24px;background:#f4f5f5}\
         section{margin-bottom:32px}p{color:#555;max-width:720px}</style>\n",
    );
    let _ = writeln!(out, "</head><body>\n<h1>{title}</h1>");
    for section in sections {
        let _ = writeln!(
            out,
            "<section><h2>{}</h2><p>{}</p>\n{}</section>",
            escape_xml(&section.title),
            escape_xml(&section.description),
            section.svg
        );
    }
    out.push_str("</body></html>\n");
    out
}
