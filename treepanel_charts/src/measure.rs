// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for label placement.
//!
//! Tile labels are only emitted when they fit inside their tile, and the pie legend is centered
//! under the chart, so the panel needs rough text extents before it generates marks. Shaping is
//! left to the renderer; the panel only asks a [`TextMeasurer`].

use kurbo::Size;

/// A minimal text measurement interface used by label placement.
pub trait TextMeasurer {
    /// Returns `(width, height)` in the same coordinate system as the marks.
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64);

    /// Returns `true` if `text` fits in `available` with `padding` on every side.
    fn fits(&self, text: &str, font_size: f64, available: Size, padding: f64) -> bool {
        let (w, h) = self.measure(text, font_size);
        w + 2.0 * padding <= available.width && h + 2.0 * padding <= available.height
    }
}

/// A heuristic measurer for a 14px sans-serif look, suitable for demos and tests.
///
/// It assumes an average glyph width of ~0.6em and a line height of 1em.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font_size: f64) -> (f64, f64) {
        let width = 0.6 * font_size * text.chars().count() as f64;
        (width, font_size)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_width_scales_with_length() {
        let m = HeuristicTextMeasurer;
        assert_eq!(m.measure("abcd", 10.0), (24.0, 10.0));
        assert_eq!(m.measure("", 10.0).0, 0.0);
    }

    #[test]
    fn fits_accounts_for_padding() {
        let m = HeuristicTextMeasurer;
        assert!(m.fits("abcd", 10.0, Size::new(32.0, 18.0), 4.0));
        assert!(!m.fits("abcd", 10.0, Size::new(31.0, 18.0), 4.0));
        assert!(!m.fits("abcd", 10.0, Size::new(32.0, 17.0), 4.0));
    }
}
