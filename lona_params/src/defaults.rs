// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Documented default parameter values.
//!
//! A key that is missing from a [`ParameterStore`] is read as its default. The
//! same table drives serialization: a stored value equal to its default is left
//! out of the encoded record, since decoding restores it for free.

use serde_json::{Map, Value};

use crate::keys;
use crate::store::ParameterStore;
use crate::value::values_equal;

/// A default value as it appears in the table.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DefaultValue {
    /// A string default.
    String(&'static str),
    /// A numeric default.
    Number(f64),
    /// A boolean default.
    Bool(bool),
}

impl DefaultValue {
    /// Converts the default into a wire value.
    #[must_use]
    pub fn to_value(self) -> Value {
        match self {
            Self::String(s) => Value::from(s),
            Self::Number(n) => crate::number_value(n),
            Self::Bool(b) => Value::from(b),
        }
    }

    /// Returns `true` if `value` is the same as this default.
    ///
    /// Numbers are compared by magnitude, so `0` and `0.0` both match `Number(0.0)`.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        values_equal(&self.to_value(), value)
    }
}

/// The documented defaults, sorted by key.
pub const DEFAULT_PARAMETERS: &[(&str, DefaultValue)] = &[
    (keys::ALIGN_ITEMS, DefaultValue::String("flex-start")),
    (keys::BORDER_RADIUS, DefaultValue::Number(0.0)),
    (keys::BORDER_WIDTH, DefaultValue::Number(0.0)),
    (keys::FLEX, DefaultValue::Number(0.0)),
    (keys::FLEX_DIRECTION, DefaultValue::String("column")),
    (keys::JUSTIFY_CONTENT, DefaultValue::String("flex-start")),
    (keys::MARGIN_BOTTOM, DefaultValue::Number(0.0)),
    (keys::MARGIN_LEFT, DefaultValue::Number(0.0)),
    (keys::MARGIN_RIGHT, DefaultValue::Number(0.0)),
    (keys::MARGIN_TOP, DefaultValue::Number(0.0)),
    (keys::PADDING_BOTTOM, DefaultValue::Number(0.0)),
    (keys::PADDING_LEFT, DefaultValue::Number(0.0)),
    (keys::PADDING_RIGHT, DefaultValue::Number(0.0)),
    (keys::PADDING_TOP, DefaultValue::Number(0.0)),
    (keys::TEXT_ALIGN, DefaultValue::String("left")),
    (keys::VISIBLE, DefaultValue::Bool(true)),
];

/// Looks up the documented default for `key`.
#[must_use]
pub fn default_for(key: &str) -> Option<DefaultValue> {
    DEFAULT_PARAMETERS
        .binary_search_by(|(k, _)| (*k).cmp(key))
        .ok()
        .map(|idx| DEFAULT_PARAMETERS[idx].1)
}

/// Returns `true` if `value` equals the documented default for `key`.
#[must_use]
pub fn is_default(key: &str, value: &Value) -> bool {
    default_for(key).is_some_and(|d| d.matches(value))
}

/// Produces the parameter record written to disk.
///
/// Explicit `null` values and values equal to their documented default are left
/// out. Everything else is copied through, in key order.
#[must_use]
pub fn elide_defaults(params: &ParameterStore) -> Map<String, Value> {
    params
        .iter()
        .filter(|(key, value)| !value.is_null() && !is_default(key, value))
        .map(|(key, value)| (key.to_owned(), value.clone()))
        .collect()
}
