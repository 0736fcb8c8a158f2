// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Value mappings.
//!
//! A mapping substitutes a raw cell value with a display value, either by exact match
//! ([`ValueMapping::ValueToText`]) or by numeric interval ([`ValueMapping::RangeToText`]).
//! Rules are evaluated in declared order and the last matching rule decides the result.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use tracing::trace;

use crate::display::plain_number;
use crate::frame::{Field, FieldValue};

/// A user-configured substitution rule.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum ValueMapping {
    /// Replace a value whose string form equals `value` with `text`.
    ///
    /// Numbers compare by their shortest decimal form, switching to an exponent (`1e+21`,
    /// `1e-7`) outside `[1e-6, 1e21)`.
    ///
    /// For numeric values `text` must parse as a number; otherwise the rule does not apply.
    ValueToText {
        /// Source value, compared against the cell's string form.
        value: String,
        /// Replacement.
        text: String,
    },
    /// Replace a numeric value in `[from, to)` with `to`.
    ///
    /// Text values never match a range.
    RangeToText {
        /// Inclusive lower bound.
        from: f64,
        /// Exclusive upper bound, also the mapped value.
        to: f64,
        /// Display text for the range.
        #[cfg_attr(feature = "serde", serde(default))]
        text: String,
    },
}

impl ValueMapping {
    /// Convenience constructor for [`ValueMapping::ValueToText`].
    pub fn value(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self::ValueToText {
            value: value.into(),
            text: text.into(),
        }
    }

    /// Convenience constructor for [`ValueMapping::RangeToText`].
    pub fn range(from: f64, to: f64, text: impl Into<String>) -> Self {
        Self::RangeToText {
            from,
            to,
            text: text.into(),
        }
    }

    /// Returns the replacement for `value` if this rule matches it.
    fn apply(&self, value: &FieldValue) -> Option<FieldValue> {
        match (value, self) {
            (FieldValue::Number(v), Self::ValueToText { value: src, text }) => {
                if plain_number(*v) != *src {
                    return None;
                }
                match text.trim().parse::<f64>() {
                    Ok(mapped) => Some(FieldValue::Number(mapped)),
                    Err(_) => {
                        trace!("mapping target {text:?} is not numeric; keeping {v}");
                        None
                    }
                }
            }
            (FieldValue::Number(v), Self::RangeToText { from, to, .. }) => {
                (*from <= *v && *v < *to).then_some(FieldValue::Number(*to))
            }
            (FieldValue::Text(s), Self::ValueToText { value: src, text }) => {
                (s == src).then(|| FieldValue::Text(text.clone()))
            }
            (FieldValue::Text(_), Self::RangeToText { .. }) | (FieldValue::Null, _) => None,
        }
    }
}

/// Maps a single value through `mappings`; the last matching rule wins.
pub fn map_value(value: &FieldValue, mappings: &[ValueMapping]) -> FieldValue {
    mappings
        .iter()
        .rev()
        .find_map(|m| m.apply(value))
        .unwrap_or_else(|| value.clone())
}

/// Maps every value through `mappings`, preserving length and order.
pub fn map_values(values: &[FieldValue], mappings: &[ValueMapping]) -> Vec<FieldValue> {
    if mappings.is_empty() {
        return values.to_vec();
    }
    values.iter().map(|v| map_value(v, mappings)).collect()
}

/// Returns a copy of `field` with its own mappings applied to its values.
///
/// Name, type and configuration (including display options) are carried over unchanged.
pub fn apply_mappings(field: &Field) -> Field {
    Field {
        name: field.name.clone(),
        field_type: field.field_type,
        values: map_values(&field.values, &field.config.mappings),
        config: field.config.clone(),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn empty_rules_are_identity() {
        let field = Field::number("size", [1.0, 2.5, -3.0]);
        assert_eq!(apply_mappings(&field), field);
    }

    #[test]
    fn later_matching_rule_wins() {
        let rules = [ValueMapping::value("1", "10"), ValueMapping::value("1", "20")];
        assert_eq!(
            map_value(&FieldValue::Number(1.0), &rules),
            FieldValue::Number(20.0)
        );
        let text_rules = [ValueMapping::value("a", "x"), ValueMapping::value("a", "y")];
        assert_eq!(
            map_value(&FieldValue::from("a"), &text_rules),
            FieldValue::from("y")
        );
    }

    #[test]
    fn non_matching_later_rule_keeps_earlier_match() {
        let rules = [ValueMapping::value("1", "10"), ValueMapping::value("2", "20")];
        assert_eq!(
            map_value(&FieldValue::Number(1.0), &rules),
            FieldValue::Number(10.0)
        );
    }

    #[test]
    fn range_is_half_open() {
        let rules = [ValueMapping::range(10.0, 20.0, "ten-ish")];
        assert_eq!(
            map_value(&FieldValue::Number(10.0), &rules),
            FieldValue::Number(20.0)
        );
        assert_eq!(
            map_value(&FieldValue::Number(20.0), &rules),
            FieldValue::Number(20.0)
        );
        assert_eq!(
            map_value(&FieldValue::Number(19.999), &rules),
            FieldValue::Number(20.0)
        );
        assert_eq!(
            map_value(&FieldValue::Number(9.0), &rules),
            FieldValue::Number(9.0)
        );
    }

    #[test]
    fn ranges_do_not_apply_to_text() {
        let rules = [ValueMapping::range(0.0, 100.0, "")];
        assert_eq!(map_value(&FieldValue::from("15"), &rules), FieldValue::from("15"));
    }

    #[test]
    fn non_numeric_target_passes_number_through() {
        let rules = [ValueMapping::value("3", "three")];
        assert_eq!(
            map_value(&FieldValue::Number(3.0), &rules),
            FieldValue::Number(3.0)
        );
    }

    #[test]
    fn extreme_numbers_match_their_exponent_form() {
        let rules = [
            ValueMapping::value("1e+21", "1"),
            ValueMapping::value("1e-7", "2"),
        ];
        assert_eq!(
            map_value(&FieldValue::Number(1e21), &rules),
            FieldValue::Number(1.0)
        );
        assert_eq!(
            map_value(&FieldValue::Number(1e-7), &rules),
            FieldValue::Number(2.0)
        );
    }

    #[test]
    fn null_passes_through() {
        let rules = [ValueMapping::value("", "x"), ValueMapping::range(0.0, 1.0, "")];
        assert_eq!(map_value(&FieldValue::Null, &rules), FieldValue::Null);
    }

    #[test]
    fn apply_mappings_leaves_source_untouched() {
        let field = Field::string("name", ["a", "b"])
            .with_mappings(vec![ValueMapping::value("a", "alpha")]);
        let mapped = apply_mappings(&field);
        assert_eq!(mapped.values, vec![FieldValue::from("alpha"), FieldValue::from("b")]);
        assert_eq!(field.values[0], FieldValue::from("a"));
        assert_eq!(mapped.config, field.config);
    }
}
