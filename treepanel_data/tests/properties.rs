// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for value mappings.

use proptest::prelude::*;
use treepanel_data::{Field, FieldValue, ValueMapping, apply_mappings, map_value, map_values};

proptest! {
    #[test]
    fn prop_no_rules_preserve_values(values in proptest::collection::vec(-1e6f64..1e6, 0..32)) {
        let field = Field::number("v", values.clone());
        let mapped = apply_mappings(&field);
        prop_assert_eq!(mapped.len(), values.len());
        for (a, b) in mapped.values.iter().zip(values.iter()) {
            prop_assert_eq!(a, &FieldValue::Number(*b));
        }
    }

    #[test]
    fn prop_mapping_preserves_length(
        values in proptest::collection::vec(0.0f64..50.0, 0..32),
        from in 0.0f64..25.0,
        width in 0.0f64..25.0,
    ) {
        let rules = [ValueMapping::range(from, from + width, "")];
        let input: Vec<FieldValue> = values.iter().copied().map(FieldValue::Number).collect();
        let mapped = map_values(&input, &rules);
        prop_assert_eq!(mapped.len(), values.len());
    }

    #[test]
    fn prop_range_maps_inside_values_to_upper_bound(
        from in -100.0f64..100.0,
        width in 0.001f64..100.0,
        t in 0.0f64..1.0,
    ) {
        let to = from + width;
        let v = from + t * width;
        prop_assume!(v < to);
        let rules = [ValueMapping::range(from, to, "")];
        prop_assert_eq!(map_value(&FieldValue::Number(v), &rules), FieldValue::Number(to));
        prop_assert_eq!(map_value(&FieldValue::Number(to), &rules), FieldValue::Number(to));
    }

    #[test]
    fn prop_last_matching_rule_wins(a in 0u32..1000, b in 0u32..1000) {
        let rules = [
            ValueMapping::value("7", a.to_string()),
            ValueMapping::value("7", b.to_string()),
        ];
        prop_assert_eq!(
            map_value(&FieldValue::Number(7.0), &rules),
            FieldValue::Number(f64::from(b))
        );
    }
}
