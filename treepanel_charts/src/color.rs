// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile color assignment.

use peniko::Color;
use tracing::debug;
use treepanel_data::{Field, FieldValue};
use treepanel_hierarchy::{NodeKind, ORIGIN_ID, TreeDatum, UNGROUPED, category_key};

use crate::scale::{ScaleColorLinear, ScaleOrdinal};
use crate::theme::Theme;

/// Picks a fill color for every hierarchy node.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorAssigner {
    /// One palette color per category, in first-appearance order after the root.
    Categorical(ScaleOrdinal),
    /// A white-to-`palette[0]` ramp over the numeric color field.
    Continuous {
        /// The ramp.
        scale: ScaleColorLinear,
        /// Fill for leaves without a numeric color value.
        missing: Color,
    },
}

impl ColorAssigner {
    /// Categorical assignment over `[Origin, categories...]`.
    pub fn categorical<S: AsRef<str>>(categories: &[S], theme: Theme) -> Self {
        let domain = core::iter::once(ORIGIN_ID).chain(categories.iter().map(|c| c.as_ref()));
        Self::Categorical(ScaleOrdinal::new(domain, theme.palette()))
    }

    /// Continuous assignment.
    ///
    /// Each bound of the domain comes from the color field's configuration, then the size
    /// field's, then `0`.
    pub fn continuous(color: Option<&Field>, size: Option<&Field>, theme: Theme) -> Self {
        let bound = |pick: fn(&Field) -> Option<f64>| {
            color
                .and_then(pick)
                .or_else(|| size.and_then(pick))
                .unwrap_or(0.0)
        };
        let domain = (bound(|f| f.config.min), bound(|f| f.config.max));
        debug!("continuous color domain {domain:?}");
        Self::Continuous {
            scale: ScaleColorLinear::new(domain, theme.white(), theme.palette()[0]),
            missing: theme.missing(),
        }
    }

    /// Color of a category key (categorical mode; the low end of the ramp otherwise).
    pub fn category(&self, key: &str) -> Color {
        match self {
            Self::Categorical(scale) => scale.map(key),
            Self::Continuous { scale, .. } => scale.map(scale.domain().0),
        }
    }

    /// Fill color of a hierarchy node.
    pub fn node(&self, datum: &TreeDatum) -> Color {
        match &datum.kind {
            NodeKind::Root => self.category(ORIGIN_ID),
            NodeKind::Category { key } => self.category(key),
            NodeKind::Leaf { category, .. } => self.value(category),
        }
    }

    /// Fill color of a raw color value, as used for leaves.
    pub fn value(&self, value: &FieldValue) -> Color {
        match self {
            Self::Categorical(scale) => {
                scale.map(&category_key(value).unwrap_or_else(|| UNGROUPED.into()))
            }
            Self::Continuous { scale, missing } => match value.as_f64() {
                Some(v) if v.is_finite() => scale.map(v),
                _ => *missing,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use treepanel_data::FieldConfig;

    use super::*;

    #[test]
    fn categories_skip_the_root_slot() {
        let theme = Theme::Light;
        let palette = theme.palette();
        let colors = ColorAssigner::categorical(&["x", "y", "Ungrouped"], theme);
        assert_eq!(colors.category("x"), palette[1]);
        assert_eq!(colors.category("y"), palette[2]);
        assert_eq!(colors.value(&FieldValue::Null), palette[3]);
        assert_eq!(colors.value(&FieldValue::from("x")), palette[1]);
    }

    #[test]
    fn assignment_is_stable_across_builds() {
        let a = ColorAssigner::categorical(&["b", "a", "c"], Theme::Dark);
        let b = ColorAssigner::categorical(&["b", "a", "c"], Theme::Dark);
        for key in ["a", "b", "c"] {
            assert_eq!(a.category(key), b.category(key));
        }
    }

    #[test]
    fn continuous_domain_falls_back_to_size_config() {
        let theme = Theme::Light;
        let color = Field::number("load", [1.0]).with_config(FieldConfig {
            max: Some(10.0),
            ..FieldConfig::default()
        });
        let size = Field::number("size", [1.0]).with_config(FieldConfig {
            min: Some(2.0),
            max: Some(99.0),
            ..FieldConfig::default()
        });
        let ColorAssigner::Continuous { scale, .. } =
            ColorAssigner::continuous(Some(&color), Some(&size), theme)
        else {
            panic!("expected continuous");
        };
        assert_eq!(scale.domain(), (2.0, 10.0));

        let ColorAssigner::Continuous { scale, .. } = ColorAssigner::continuous(None, None, theme)
        else {
            panic!("expected continuous");
        };
        assert_eq!(scale.domain(), (0.0, 0.0));
    }

    #[test]
    fn continuous_leaves() {
        let theme = Theme::Light;
        let field = Field::number("load", [0.0]).with_config(FieldConfig {
            min: Some(0.0),
            max: Some(10.0),
            ..FieldConfig::default()
        });
        let colors = ColorAssigner::continuous(Some(&field), None, theme);
        assert_eq!(
            colors.value(&FieldValue::Number(10.0)).to_rgba8(),
            theme.palette()[0].to_rgba8()
        );
        assert_eq!(
            colors.value(&FieldValue::Number(0.0)).to_rgba8(),
            theme.white().to_rgba8()
        );
        assert_eq!(colors.value(&FieldValue::Null), theme.missing());
    }
}
