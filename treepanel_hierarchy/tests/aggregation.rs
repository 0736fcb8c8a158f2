// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for aggregation and layout.

use proptest::prelude::*;
use treepanel_data::{FieldValue, Row};
use treepanel_hierarchy::{Tiling, TreemapLayout, build_tree};

fn rows() -> impl Strategy<Value = Vec<Row>> {
    proptest::collection::vec(
        ("[a-e]{1,3}", 0.0f64..1000.0, prop_oneof![Just(""), Just("x"), Just("y"), Just("z")]),
        1..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(name, size, color)| {
                let color = if color.is_empty() {
                    FieldValue::Null
                } else {
                    FieldValue::from(color)
                };
                Row::new(name, size, color)
            })
            .collect()
    })
}

fn tiling() -> impl Strategy<Value = Tiling> {
    proptest::sample::select(Tiling::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_parents_sum_their_children(rows in rows(), grouped in any::<bool>()) {
        let h = build_tree(&rows, grouped).unwrap();
        for (id, node) in h.tree.iter() {
            if node.is_leaf() {
                continue;
            }
            let sum: f64 = h.tree.children(id).iter().map(|c| h.tree.node(*c).value).sum();
            prop_assert!((node.value - sum).abs() <= 1e-9 * node.value.max(1.0));
        }
        let total: f64 = rows.iter().map(Row::weight).sum();
        let root = h.tree.node(h.tree.root()).value;
        prop_assert!((root - total).abs() <= 1e-9 * total.max(1.0));
    }

    #[test]
    fn prop_siblings_descend(rows in rows()) {
        let h = build_tree(&rows, true).unwrap();
        for (id, _) in h.tree.iter() {
            let values: Vec<f64> = h.tree.children(id).iter().map(|c| h.tree.node(*c).value).collect();
            prop_assert!(values.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn prop_children_stay_inside_parents(rows in rows(), tiling in tiling()) {
        let h = build_tree(&rows, true).unwrap();
        let cells = TreemapLayout::new(kurbo::Size::new(640.0, 480.0))
            .with_tiling(tiling)
            .with_padding(4.0)
            .layout(&h.tree);
        for (id, node) in h.tree.iter() {
            let Some(parent) = node.parent() else { continue };
            let r = cells.rect(id);
            let p = cells.rect(parent);
            prop_assert!(r.x0 >= p.x0 - 1e-6 && r.x1 <= p.x1 + 1e-6, "{tiling:?} {r:?} in {p:?}");
            prop_assert!(r.y0 >= p.y0 - 1e-6 && r.y1 <= p.y1 + 1e-6, "{tiling:?} {r:?} in {p:?}");
        }
    }
}
