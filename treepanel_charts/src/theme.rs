// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dashboard theme: named colors and the categorical palette.

use peniko::Color;

/// Hues of the named color palette, in palette order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hue {
    /// Red.
    Red,
    /// Orange.
    Orange,
    /// Yellow.
    Yellow,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Purple.
    Purple,
}

impl Hue {
    /// All hues in palette order.
    pub const ALL: [Self; 6] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Purple,
    ];

    /// Primary shade of this hue for `theme`.
    pub const fn color(self, theme: Theme) -> Color {
        match (theme, self) {
            (Theme::Light, Self::Red) => Color::from_rgba8(0xC4, 0x16, 0x2A, 0xFF),
            (Theme::Light, Self::Orange) => Color::from_rgba8(0xFA, 0x64, 0x00, 0xFF),
            (Theme::Light, Self::Yellow) => Color::from_rgba8(0xE0, 0xB4, 0x00, 0xFF),
            (Theme::Light, Self::Green) => Color::from_rgba8(0x37, 0x87, 0x2D, 0xFF),
            (Theme::Light, Self::Blue) => Color::from_rgba8(0x1F, 0x60, 0xC4, 0xFF),
            (Theme::Light, Self::Purple) => Color::from_rgba8(0x8F, 0x3B, 0xB8, 0xFF),
            (Theme::Dark, Self::Red) => Color::from_rgba8(0xF2, 0x49, 0x5C, 0xFF),
            (Theme::Dark, Self::Orange) => Color::from_rgba8(0xFF, 0x98, 0x30, 0xFF),
            (Theme::Dark, Self::Yellow) => Color::from_rgba8(0xFA, 0xDE, 0x2A, 0xFF),
            (Theme::Dark, Self::Green) => Color::from_rgba8(0x73, 0xBF, 0x69, 0xFF),
            (Theme::Dark, Self::Blue) => Color::from_rgba8(0x57, 0x94, 0xF2, 0xFF),
            (Theme::Dark, Self::Purple) => Color::from_rgba8(0xB8, 0x77, 0xD9, 0xFF),
        }
    }
}

/// Light or dark dashboard theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Theme {
    /// Dark text on a light background.
    Light,
    /// Light text on a dark background.
    #[default]
    Dark,
}

impl Theme {
    /// The categorical palette: the primary shade of every [`Hue`].
    pub fn palette(self) -> [Color; 6] {
        Hue::ALL.map(|h| h.color(self))
    }

    /// Primary text color.
    pub const fn text(self) -> Color {
        match self {
            Self::Light => Color::from_rgba8(0x46, 0x4C, 0x54, 0xFF),
            Self::Dark => Color::from_rgba8(0xC7, 0xD0, 0xD9, 0xFF),
        }
    }

    /// Panel background.
    pub const fn background(self) -> Color {
        match self {
            Self::Light => Color::from_rgba8(0xFF, 0xFF, 0xFF, 0xFF),
            Self::Dark => Color::from_rgba8(0x14, 0x16, 0x19, 0xFF),
        }
    }

    /// Outline color for frames.
    pub const fn border(self) -> Color {
        match self {
            Self::Light => Color::from_rgba8(0xDC, 0xE1, 0xE6, 0xFF),
            Self::Dark => Color::from_rgba8(0x2C, 0x32, 0x35, 0xFF),
        }
    }

    /// External link color.
    pub const fn link_external(self) -> Color {
        Color::from_rgba8(0x33, 0xA2, 0xE5, 0xFF)
    }

    /// Success accent (checked guidance items).
    pub const fn success(self) -> Color {
        match self {
            Self::Light => Color::from_rgba8(0x3E, 0xB1, 0x5B, 0xFF),
            Self::Dark => Color::from_rgba8(0x29, 0x9C, 0x46, 0xFF),
        }
    }

    /// Pure white, the low end of the continuous color ramp.
    pub const fn white(self) -> Color {
        Color::from_rgba8(0xFF, 0xFF, 0xFF, 0xFF)
    }

    /// Fill for tiles without a usable color value.
    pub const fn missing(self) -> Color {
        Color::from_rgba8(0x8E, 0x8E, 0x8E, 0xFF)
    }
}

/// Black or white, whichever reads better on `fill`.
pub fn contrast_text(fill: Color) -> Color {
    let c = fill.to_rgba8();
    // Rec. 601 luma on 8-bit channels.
    let luma = 299 * u32::from(c.r) + 587 * u32::from(c.g) + 114 * u32::from(c.b);
    if luma > 150_000 {
        Color::from_rgba8(0x20, 0x22, 0x26, 0xFF)
    } else {
        Color::from_rgba8(0xFF, 0xFF, 0xFF, 0xFF)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn palettes_have_six_distinct_hues() {
        for theme in [Theme::Light, Theme::Dark] {
            let palette = theme.palette();
            for (i, a) in palette.iter().enumerate() {
                for b in &palette[i + 1..] {
                    assert_ne!(a.to_rgba8(), b.to_rgba8());
                }
            }
        }
        assert_ne!(Theme::Light.palette()[0].to_rgba8(), Theme::Dark.palette()[0].to_rgba8());
    }

    #[test]
    fn contrast_prefers_dark_text_on_light_fills() {
        let white = Theme::Light.white();
        assert_eq!(contrast_text(white).to_rgba8().r, 0x20);
        let blue = Hue::Blue.color(Theme::Light);
        assert_eq!(contrast_text(blue).to_rgba8().r, 0xFF);
    }
}
