// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales: numeric, categorical-to-color, and numeric-to-color.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
    clamp: bool,
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain,
            range,
            clamp: false,
        }
    }

    /// Restricts outputs to the range.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Maps a value from domain space into range space.
    ///
    /// A degenerate domain maps everything to the middle of the range.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return (r0 + r1) / 2.0;
        }
        let mut t = (x - d0) / denom;
        if self.clamp {
            t = t.clamp(0.0, 1.0);
        }
        r0 + t * (r1 - r0)
    }

    /// Returns the minimum of the configured domain (as authored).
    pub fn domain_min(&self) -> f64 {
        self.domain.0
    }

    /// Returns the maximum of the configured domain (as authored).
    pub fn domain_max(&self) -> f64 {
        self.domain.1
    }
}

/// Maps discrete keys to palette colors by their position in the domain.
///
/// The `i`-th distinct domain key gets `range[i % range.len()]`. Keys outside the domain get
/// the first range entry, so lookups never fail.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleOrdinal {
    index: HashMap<String, usize>,
    range: Vec<Color>,
}

impl ScaleOrdinal {
    /// Creates a scale over `domain` (duplicates keep their first position).
    pub fn new<I, S>(domain: I, range: impl Into<Vec<Color>>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut index = HashMap::new();
        for key in domain {
            let next = index.len();
            index.entry(key.into()).or_insert(next);
        }
        Self {
            index,
            range: range.into(),
        }
    }

    /// Number of distinct domain keys.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` for an empty domain.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Color of `key`.
    pub fn map(&self, key: &str) -> Color {
        let i = self.index.get(key).copied().unwrap_or(0);
        self.nth(i)
    }

    /// Color at domain position `i`.
    pub fn nth(&self, i: usize) -> Color {
        if self.range.is_empty() {
            return Color::from_rgba8(0, 0, 0, 0xFF);
        }
        self.range[i % self.range.len()]
    }
}

/// Maps numbers to colors by interpolating two endpoint colors in sRGB.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleColorLinear {
    position: ScaleLinear,
    low: Color,
    high: Color,
}

impl ScaleColorLinear {
    /// A ramp from `low` at `domain.0` to `high` at `domain.1`, clamped at both ends.
    pub fn new(domain: (f64, f64), low: Color, high: Color) -> Self {
        Self {
            position: ScaleLinear::new(domain, (0.0, 1.0)).with_clamp(true),
            low,
            high,
        }
    }

    /// Color of `value`.
    ///
    /// Non-finite values map like the domain midpoint.
    pub fn map(&self, value: f64) -> Color {
        let t = if value.is_finite() {
            self.position.map(value)
        } else {
            0.5
        };
        lerp_rgba8(self.low, self.high, t)
    }

    /// Domain as `(min, max)`.
    pub fn domain(&self) -> (f64, f64) {
        (self.position.domain_min(), self.position.domain_max())
    }
}

fn lerp_rgba8(a: Color, b: Color, t: f64) -> Color {
    let a = a.to_rgba8();
    let b = b.to_rgba8();
    let mix = |x: u8, y: u8| -> u8 {
        let v = f64::from(x) + (f64::from(y) - f64::from(x)) * t;
        v.round().clamp(0.0, 255.0) as u8
    };
    Color::from_rgba8(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::theme::Theme;

    #[test]
    fn linear_maps_and_clamps() {
        let s = ScaleLinear::new((0.0, 10.0), (0.0, 100.0));
        assert_eq!(s.map(5.0), 50.0);
        assert_eq!(s.map(20.0), 200.0);
        assert_eq!(s.with_clamp(true).map(20.0), 100.0);
        assert_eq!(ScaleLinear::new((3.0, 3.0), (0.0, 1.0)).map(7.0), 0.5);
    }

    #[test]
    fn ordinal_indexes_by_first_position() {
        let palette = Theme::Light.palette();
        let s = ScaleOrdinal::new(["Origin", "x", "y", "x"], palette);
        assert_eq!(s.len(), 3);
        assert_eq!(s.map("x"), palette[1]);
        assert_eq!(s.map("y"), palette[2]);
        assert_eq!(s.map("unknown"), palette[0]);
    }

    #[test]
    fn ordinal_wraps_around_the_palette() {
        let palette = Theme::Dark.palette();
        let keys = ["a", "b", "c", "d", "e", "f", "g", "h"];
        let s = ScaleOrdinal::new(keys, palette);
        assert_eq!(s.map("g"), palette[0]);
        assert_eq!(s.map("h"), palette[1]);
    }

    #[test]
    fn color_ramp_interpolates_and_clamps() {
        let low = Color::from_rgba8(255, 255, 255, 255);
        let high = Color::from_rgba8(0, 0, 255, 255);
        let s = ScaleColorLinear::new((0.0, 100.0), low, high);
        assert_eq!(s.map(0.0).to_rgba8(), low.to_rgba8());
        assert_eq!(s.map(100.0).to_rgba8(), high.to_rgba8());
        assert_eq!(s.map(1000.0).to_rgba8(), high.to_rgba8());
        assert_eq!(s.map(-5.0).to_rgba8(), low.to_rgba8());
        let mid = s.map(50.0).to_rgba8();
        assert_eq!((mid.r, mid.g, mid.b), (128, 128, 255));
    }

    #[test]
    fn degenerate_ramp_uses_midpoint() {
        let low = Color::from_rgba8(0, 0, 0, 255);
        let high = Color::from_rgba8(200, 100, 0, 255);
        let s = ScaleColorLinear::new((0.0, 0.0), low, high);
        let c = s.map(42.0).to_rgba8();
        assert_eq!((c.r, c.g, c.b), (100, 50, 0));
    }
}
