// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display formatting for labels and tooltips.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use crate::frame::{FieldConfig, FieldValue};

/// A value prepared for display.
#[derive(Clone, Debug, PartialEq)]
pub struct DisplayValue {
    /// Numeric reading (`NaN` when the value is not numeric).
    pub numeric: f64,
    /// Formatted text without unit.
    pub text: String,
    /// Unit suffix, if any.
    pub suffix: Option<String>,
}

impl DisplayValue {
    /// Text with the unit suffix appended.
    ///
    /// Percent signs attach directly; other units are separated by a space.
    pub fn formatted(&self) -> String {
        match &self.suffix {
            None => self.text.clone(),
            Some(unit) if unit.starts_with('%') => format!("{}{unit}", self.text),
            Some(unit) => format!("{} {unit}", self.text),
        }
    }
}

/// Formats values according to a field's display options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisplayProcessor {
    decimals: Option<u32>,
    unit: Option<String>,
}

impl DisplayProcessor {
    /// A processor with no decimals or unit configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a processor from field configuration.
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            decimals: config.decimals,
            unit: config.unit.clone().filter(|u| !u.is_empty()),
        }
    }

    /// Formats a raw cell value.
    pub fn process(&self, value: &FieldValue) -> DisplayValue {
        match value {
            FieldValue::Number(v) => self.process_number(*v),
            FieldValue::Text(s) => DisplayValue {
                numeric: value.as_f64().unwrap_or(f64::NAN),
                text: s.clone(),
                suffix: None,
            },
            FieldValue::Null => DisplayValue {
                numeric: f64::NAN,
                text: String::new(),
                suffix: None,
            },
        }
    }

    /// Formats a number (used for aggregated node values too).
    pub fn process_number(&self, v: f64) -> DisplayValue {
        DisplayValue {
            numeric: v,
            text: format_number(v, self.decimals),
            suffix: if v.is_finite() { self.unit.clone() } else { None },
        }
    }
}

/// Formats a number with a fixed number of decimals, or in shortest form when `decimals` is
/// `None`.
pub fn format_number(v: f64, decimals: Option<u32>) -> String {
    let Some(decimals) = decimals else {
        return plain_number(v);
    };
    if !v.is_finite() {
        return plain_number(v);
    }
    let decimals = decimals.min(20) as usize;
    let out = format!("{v:.decimals$}");
    // Normalize `-0`, `-0.00`.
    if out.starts_with('-') && out[1..].chars().all(|c| c == '0' || c == '.') {
        out[1..].to_string()
    } else {
        out
    }
}

/// Magnitudes at or above this print in exponent form.
const EXPONENT_ABOVE: f64 = 1e21;

/// Magnitudes below this print in exponent form.
const EXPONENT_BELOW: f64 = 1e-6;

/// Shortest round-trip decimal form, with integers printed without a fraction.
///
/// Magnitudes of `1e21` and up, or below `1e-6`, use an exponent with an explicit sign
/// (`1e+21`, `1.5e-7`). This is also the canonical string form value mappings compare against.
pub(crate) fn plain_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if v == 0.0 {
        "0".to_string()
    } else if !(EXPONENT_BELOW..EXPONENT_ABOVE).contains(&v.abs()) {
        let out = format!("{v:e}");
        match out.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
            _ => out,
        }
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn plain_numbers() {
        assert_eq!(plain_number(10.0), "10");
        assert_eq!(plain_number(-0.0), "0");
        assert_eq!(plain_number(19.999), "19.999");
        assert_eq!(plain_number(f64::NAN), "NaN");
        assert_eq!(plain_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn extreme_magnitudes_use_exponents() {
        assert_eq!(plain_number(1e21), "1e+21");
        assert_eq!(plain_number(-2.5e22), "-2.5e+22");
        assert_eq!(plain_number(1e-7), "1e-7");
        assert_eq!(plain_number(1.5e-7), "1.5e-7");
        assert_eq!(plain_number(1e20), "100000000000000000000");
        assert_eq!(plain_number(0.000001), "0.000001");
        assert_eq!(format_number(1e21, None), "1e+21");
    }

    #[test]
    fn fixed_decimals() {
        assert_eq!(format_number(1.005, Some(0)), "1");
        assert_eq!(format_number(2.5, Some(2)), "2.50");
        assert_eq!(format_number(-0.0001, Some(2)), "0.00");
        assert_eq!(format_number(3.0, None), "3");
    }

    #[test]
    fn units_attach_to_text() {
        let config = FieldConfig {
            decimals: Some(1),
            unit: Some("ms".into()),
            ..FieldConfig::default()
        };
        let p = DisplayProcessor::from_config(&config);
        assert_eq!(p.process(&FieldValue::Number(12.0)).formatted(), "12.0 ms");

        let percent = DisplayProcessor::from_config(&FieldConfig {
            unit: Some("%".into()),
            ..FieldConfig::default()
        });
        assert_eq!(percent.process_number(42.0).formatted(), "42%");
    }

    #[test]
    fn text_and_null_values() {
        let p = DisplayProcessor::new();
        let text = p.process(&FieldValue::from("7"));
        assert_eq!(text.numeric, 7.0);
        assert_eq!(text.formatted(), "7");
        let null = p.process(&FieldValue::Null);
        assert!(null.numeric.is_nan());
        assert_eq!(null.formatted(), "");
    }
}
