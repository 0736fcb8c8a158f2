// Copyright 2025 the Treepanel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed data frames for treepanel.
//!
//! This crate provides:
//! - a columnar [`DataFrame`] of named, typed [`Field`]s, as handed over by a dashboard host,
//! - field resolution ([`resolve_fields`]) picking the text/size/color columns,
//! - value mappings ([`ValueMapping`], [`apply_mappings`]) substituting raw values,
//! - display formatting ([`DisplayProcessor`]) for labels and tooltips, and
//! - row assembly ([`rows_from_fields`]) zipping the three selected columns.
//!
//! Every operation returns fresh values; input frames are only ever borrowed.

#![no_std]

extern crate alloc;

mod display;
mod frame;
mod mapping;
mod resolve;
mod row;

pub use display::{DisplayProcessor, DisplayValue, format_number};
pub use frame::{DataFrame, Field, FieldConfig, FieldType, FieldValue, FrameError, PanelData};
pub use mapping::{ValueMapping, apply_mappings, map_value, map_values};
pub use resolve::{ResolvedFields, resolve_field, resolve_fields};
pub use row::{Row, rows_from_fields};
