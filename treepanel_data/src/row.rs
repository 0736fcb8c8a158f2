// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row assembly from the three resolved columns.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::frame::{Field, FieldValue};

/// One input record: label, weight and color/group value.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// Label value.
    pub text: FieldValue,
    /// Weight value.
    pub size: FieldValue,
    /// Color or grouping value (`Null` when there is no color column).
    pub color: FieldValue,
}

impl Row {
    /// Creates a row from anything convertible to field values.
    pub fn new(
        text: impl Into<FieldValue>,
        size: impl Into<FieldValue>,
        color: impl Into<FieldValue>,
    ) -> Self {
        Self {
            text: text.into(),
            size: size.into(),
            color: color.into(),
        }
    }

    /// Label as a string (`""` for a missing label).
    pub fn name(&self) -> String {
        self.text.to_string()
    }

    /// Numeric weight; unreadable sizes count as `0`.
    pub fn weight(&self) -> f64 {
        self.size.as_f64().filter(|v| !v.is_nan()).unwrap_or(0.0)
    }
}

/// Zips the selected columns by index.
///
/// The row count is the shortest of the text and size columns; a shorter (or absent) color
/// column yields `Null` colors. Row order always matches the source order.
pub fn rows_from_fields(text: &Field, size: &Field, color: Option<&Field>) -> Vec<Row> {
    let n = text.len().min(size.len());
    (0..n)
        .map(|i| Row {
            text: text.values[i].clone(),
            size: size.values[i].clone(),
            color: color
                .and_then(|c| c.get(i))
                .cloned()
                .unwrap_or(FieldValue::Null),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn zips_by_index() {
        let text = Field::string("name", ["a", "b"]);
        let size = Field::number("size", [1.0, 2.0]);
        let color = Field::string("group", ["x", "y"]);
        let rows = rows_from_fields(&text, &size, Some(&color));
        assert_eq!(rows, [Row::new("a", 1.0, "x"), Row::new("b", 2.0, "y")]);
    }

    #[test]
    fn missing_color_column_gives_null() {
        let text = Field::string("name", ["a"]);
        let size = Field::number("size", [1.0]);
        let rows = rows_from_fields(&text, &size, None);
        assert_eq!(rows[0].color, FieldValue::Null);
    }

    #[test]
    fn weights_read_text_and_default_to_zero() {
        assert_eq!(Row::new("a", "12", FieldValue::Null).weight(), 12.0);
        assert_eq!(Row::new("a", "n/a", FieldValue::Null).weight(), 0.0);
        assert_eq!(Row::new("a", f64::NAN, FieldValue::Null).weight(), 0.0);
        assert_eq!(Row::new(FieldValue::Null, 1.0, FieldValue::Null).name(), "");
    }
}
