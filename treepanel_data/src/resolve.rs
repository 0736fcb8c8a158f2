// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Field resolution: choosing the text, size and color columns of a frame.

extern crate alloc;

use alloc::vec::Vec;

use tracing::debug;

use crate::frame::{DataFrame, Field, FieldType};

/// The columns a render works from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedFields<'a> {
    /// Labels (first `String` field by default).
    pub text: Option<&'a Field>,
    /// Weights (first `Number` field by default).
    pub size: Option<&'a Field>,
    /// Grouping or color values (first `Number` field by default).
    pub color: Option<&'a Field>,
}

impl ResolvedFields<'_> {
    /// Returns `true` when both required roles (text and size) resolved.
    pub fn is_complete(&self) -> bool {
        self.text.is_some() && self.size.is_some()
    }

    /// Names of the required roles that did not resolve, in `text`, `size` order.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.text.is_none() {
            out.push("text");
        }
        if self.size.is_none() {
            out.push("size");
        }
        out
    }

    /// Returns `true` when rows should be grouped by category.
    ///
    /// Any color column that is not numeric, including no color column at all, groups rows;
    /// a numeric color column drives a continuous color scale instead.
    pub fn is_grouped(&self) -> bool {
        self.color.is_none_or(|f| f.field_type != FieldType::Number)
    }
}

/// Returns the field named `name` when a non-empty name is configured, otherwise the first
/// field of type `fallback`.
///
/// A configured name that matches nothing resolves to `None`; it does not fall back to the type.
pub fn resolve_field<'a>(
    fields: &'a [Field],
    name: Option<&str>,
    fallback: FieldType,
) -> Option<&'a Field> {
    match name.filter(|n| !n.is_empty()) {
        Some(name) => fields.iter().find(|f| f.name == name),
        None => fields.iter().find(|f| f.field_type == fallback),
    }
}

/// Resolves the three panel roles against a frame.
pub fn resolve_fields<'a>(
    frame: &'a DataFrame,
    text: Option<&str>,
    size: Option<&str>,
    color: Option<&str>,
) -> ResolvedFields<'a> {
    let fields = frame.fields();
    let resolved = ResolvedFields {
        text: resolve_field(fields, text, FieldType::String),
        size: resolve_field(fields, size, FieldType::Number),
        color: resolve_field(fields, color, FieldType::Number),
    };
    debug!(
        "resolved fields: text={:?} size={:?} color={:?}",
        resolved.text.map(|f| f.name.as_str()),
        resolved.size.map(|f| f.name.as_str()),
        resolved.color.map(|f| f.name.as_str()),
    );
    resolved
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Field::number("count", [1.0, 2.0]),
            Field::string("host", ["a", "b"]),
            Field::string("region", ["eu", "us"]),
            Field::number("load", [0.5, 0.7]),
        ])
        .unwrap()
    }

    #[test]
    fn falls_back_to_first_field_of_type() {
        let frame = frame();
        let r = resolve_fields(&frame, None, None, None);
        assert_eq!(r.text.map(|f| f.name.as_str()), Some("host"));
        assert_eq!(r.size.map(|f| f.name.as_str()), Some("count"));
        assert_eq!(r.color.map(|f| f.name.as_str()), Some("count"));
        assert!(r.is_complete());
        assert!(r.missing().is_empty());
        assert!(!r.is_grouped());
    }

    #[test]
    fn configured_names_win() {
        let frame = frame();
        let r = resolve_fields(&frame, Some("region"), Some("load"), Some("host"));
        assert_eq!(r.text.map(|f| f.name.as_str()), Some("region"));
        assert_eq!(r.size.map(|f| f.name.as_str()), Some("load"));
        assert_eq!(r.color.map(|f| f.name.as_str()), Some("host"));
        assert!(r.is_grouped());
    }

    #[test]
    fn empty_name_means_unset() {
        let frame = frame();
        let r = resolve_fields(&frame, Some(""), Some(""), Some(""));
        assert_eq!(r.text.map(|f| f.name.as_str()), Some("host"));
    }

    #[test]
    fn unknown_name_does_not_fall_back() {
        let frame = frame();
        let r = resolve_fields(&frame, Some("nope"), None, Some("nope"));
        assert!(r.text.is_none());
        assert!(!r.is_complete());
        assert_eq!(r.missing(), ["text"]);
        assert!(r.color.is_none());
        assert!(r.is_grouped());
    }

    #[test]
    fn no_numeric_field_leaves_size_unresolved() {
        let frame = DataFrame::new(vec![Field::string("host", ["a"])]).unwrap();
        let r = resolve_fields(&frame, None, None, None);
        assert!(r.size.is_none());
        assert!(r.color.is_none());
    }
}
