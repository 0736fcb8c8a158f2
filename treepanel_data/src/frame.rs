// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Columnar frames of typed fields.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::display::{DisplayProcessor, DisplayValue, plain_number};
use crate::mapping::ValueMapping;

/// The semantic type of a [`Field`].
///
/// Resolution uses the type to pick default columns, and grouping is enabled whenever the color
/// column is not [`FieldType::Number`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FieldType {
    /// Numeric values.
    Number,
    /// Text values.
    String,
    /// Boolean values (stored as text or numbers).
    Boolean,
    /// Timestamps (stored as numbers).
    Time,
    /// Anything else.
    Other,
}

/// A single cell value.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum FieldValue {
    /// A number.
    Number(f64),
    /// A string.
    Text(String),
    /// An absent value.
    Null,
}

impl FieldValue {
    /// Returns the numeric reading of this value.
    ///
    /// Text is parsed as a decimal number (surrounding whitespace ignored); `Null` and
    /// unparseable text yield `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(*v),
            Self::Text(s) => s.trim().parse().ok(),
            Self::Null => None,
        }
    }

    /// Returns the string slice of a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns `true` for `Null` and for empty text.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(v) => f.write_str(&plain_number(*v)),
            Self::Text(s) => f.write_str(s),
            Self::Null => Ok(()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Self>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Per-field configuration: value mappings and display options.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct FieldConfig {
    /// Value mappings, applied in declared order.
    pub mappings: Vec<ValueMapping>,
    /// Configured minimum (used as the low end of continuous color scales).
    pub min: Option<f64>,
    /// Configured maximum (used as the high end of continuous color scales).
    pub max: Option<f64>,
    /// Fixed number of decimals for display.
    pub decimals: Option<u32>,
    /// Unit suffix for display (e.g. `"ms"`, `"%"`).
    pub unit: Option<String>,
}

/// A named, typed column.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// Field name.
    pub name: String,
    /// Semantic type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub field_type: FieldType,
    /// Values in row order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub values: Vec<FieldValue>,
    /// Mappings and display options.
    #[cfg_attr(feature = "serde", serde(default))]
    pub config: FieldConfig,
}

impl Field {
    /// Creates a field with default configuration.
    pub fn new(name: impl Into<String>, field_type: FieldType, values: Vec<FieldValue>) -> Self {
        Self {
            name: name.into(),
            field_type,
            values,
            config: FieldConfig::default(),
        }
    }

    /// Creates a [`FieldType::Number`] field.
    pub fn number(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self::new(
            name,
            FieldType::Number,
            values.into_iter().map(FieldValue::Number).collect(),
        )
    }

    /// Creates a [`FieldType::String`] field.
    pub fn string<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(
            name,
            FieldType::String,
            values.into_iter().map(|s| FieldValue::Text(s.into())).collect(),
        )
    }

    /// Replaces the field configuration.
    pub fn with_config(mut self, config: FieldConfig) -> Self {
        self.config = config;
        self
    }

    /// Replaces the value mappings.
    pub fn with_mappings(mut self, mappings: Vec<ValueMapping>) -> Self {
        self.config.mappings = mappings;
        self
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the field has no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `row`, if present.
    pub fn get(&self, row: usize) -> Option<&FieldValue> {
        self.values.get(row)
    }

    /// Returns the display processor built from this field's configuration.
    pub fn display_processor(&self) -> DisplayProcessor {
        DisplayProcessor::from_config(&self.config)
    }

    /// Formats the value at `row` for display.
    pub fn display(&self, row: usize) -> DisplayValue {
        let value = self.get(row).unwrap_or(&FieldValue::Null);
        self.display_processor().process(value)
    }
}

/// Errors returned when assembling a [`DataFrame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// A field's length differs from the first field's length.
    LengthMismatch {
        /// The offending field.
        field: String,
        /// Length of the first field.
        expected: usize,
        /// Length of the offending field.
        found: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthMismatch {
                field,
                expected,
                found,
            } => write!(
                f,
                "field `{field}` has {found} values, expected {expected}"
            ),
        }
    }
}

impl core::error::Error for FrameError {}

/// An ordered set of equal-length fields.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "FrameRepr"))]
pub struct DataFrame {
    /// Optional frame name (the query's ref id, typically).
    pub name: Option<String>,
    fields: Vec<Field>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct FrameRepr {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    fields: Vec<Field>,
}

#[cfg(feature = "serde")]
impl TryFrom<FrameRepr> for DataFrame {
    type Error = FrameError;

    fn try_from(repr: FrameRepr) -> Result<Self, Self::Error> {
        let mut frame = Self::new(repr.fields)?;
        frame.name = repr.name;
        Ok(frame)
    }
}

impl DataFrame {
    /// Creates a frame, checking that all fields have the same length.
    pub fn new(fields: Vec<Field>) -> Result<Self, FrameError> {
        if let Some(first) = fields.first() {
            let expected = first.len();
            if let Some(bad) = fields.iter().find(|f| f.len() != expected) {
                return Err(FrameError::LengthMismatch {
                    field: bad.name.clone(),
                    expected,
                    found: bad.len(),
                });
            }
        }
        Ok(Self { name: None, fields })
    }

    /// Sets the frame name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.fields.first().map_or(0, Field::len)
    }

    /// Returns `true` if the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fields in declared order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// The frames a host hands to a panel for one render.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PanelData {
    /// Result frames, in query order.
    pub series: Vec<DataFrame>,
}

impl PanelData {
    /// Wraps a single frame.
    pub fn single(frame: DataFrame) -> Self {
        Self {
            series: alloc::vec![frame],
        }
    }

    /// The frame a panel renders (the first one).
    pub fn primary(&self) -> Option<&DataFrame> {
        self.series.first()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    #[test]
    fn frame_rejects_ragged_fields() {
        let err = DataFrame::new(vec![
            Field::string("name", ["a", "b"]),
            Field::number("size", [1.0]),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            FrameError::LengthMismatch {
                field: "size".into(),
                expected: 2,
                found: 1,
            }
        );
        assert_eq!(err.to_string(), "field `size` has 1 values, expected 2");
    }

    #[test]
    fn empty_frame_has_no_rows() {
        let frame = DataFrame::new(Vec::new()).unwrap();
        assert!(frame.is_empty());
        assert_eq!(frame.len(), 0);
    }

    #[test]
    fn value_readings() {
        assert_eq!(FieldValue::from(" 12.5 ").as_f64(), Some(12.5));
        assert_eq!(FieldValue::from("abc").as_f64(), None);
        assert_eq!(FieldValue::Null.as_f64(), None);
        assert!(FieldValue::from("").is_missing());
        assert!(FieldValue::Null.is_missing());
        assert!(!FieldValue::Number(0.0).is_missing());
        assert_eq!(FieldValue::Number(10.0).to_string(), "10");
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::from(None::<f64>), FieldValue::Null);
    }

    #[test]
    fn field_lookup_by_name() {
        let frame = DataFrame::new(vec![
            Field::string("name", ["a"]),
            Field::number("size", [1.0]),
        ])
        .unwrap()
        .with_name("A");
        assert_eq!(frame.field("size").map(|f| f.field_type), Some(FieldType::Number));
        assert!(frame.field("missing").is_none());
        assert_eq!(frame.name.as_deref(), Some("A"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn frame_deserializes_and_validates() {
        let json = r#"{
            "name": "A",
            "fields": [
                {"name": "service", "type": "string", "values": ["api", null]},
                {"name": "latency", "type": "number", "values": [12, 7.5],
                 "config": {"unit": "ms", "mappings": [
                    {"type": "valueToText", "value": "12", "text": "10"}
                 ]}}
            ]
        }"#;
        let frame: DataFrame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.len(), 2);
        let service = frame.field("service").unwrap();
        assert_eq!(service.values[1], FieldValue::Null);
        let latency = frame.field("latency").unwrap();
        assert_eq!(latency.config.unit.as_deref(), Some("ms"));
        assert_eq!(latency.config.mappings.len(), 1);

        let ragged = r#"{"fields": [
            {"name": "a", "type": "string", "values": ["x"]},
            {"name": "b", "type": "number", "values": []}
        ]}"#;
        assert!(serde_json::from_str::<DataFrame>(ragged).is_err());
    }
}
