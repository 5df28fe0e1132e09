// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer sparse parameter storage.
//!
//! # Implementation
//!
//! Like a small vector map, entries live in a vector sorted by key and are found
//! by binary search. Layers rarely carry more than a dozen parameters, so this
//! keeps lookups cheap, iteration deterministic, and the common case free of heap
//! allocation beyond the keys themselves.

use kurbo::Insets;
use serde_json::{Map, Value};
use smallvec::SmallVec;

use crate::defaults;
use crate::keys;
use crate::value::number_value;

/// Default inline capacity for parameter entries.
const INLINE_CAPACITY: usize = 8;

/// Sparse storage for the raw parameters of one layer.
///
/// The store accepts any key and any value. Setting a key to `null` removes it,
/// so "unset" has exactly one representation.
///
/// # Example
///
/// ```rust
/// use lona_params::{ParameterStore, keys};
/// use serde_json::json;
///
/// let mut params = ParameterStore::new();
/// params.set(keys::FLEX, json!(1));
/// assert_eq!(params.number(keys::FLEX), Some(1.0));
///
/// // Writing null is a removal.
/// params.set(keys::FLEX, json!(null));
/// assert!(!params.contains(keys::FLEX));
///
/// // Mistyped values read as absent through typed accessors.
/// params.set(keys::WIDTH, json!("wide"));
/// assert_eq!(params.number(keys::WIDTH), None);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterStore {
    /// Entries sorted by key for binary search lookup.
    entries: SmallVec<[(String, Value); INLINE_CAPACITY]>,
}

impl ParameterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a decoded record, dropping explicit `null`s.
    #[must_use]
    pub fn from_map(map: Map<String, Value>) -> Self {
        map.into_iter().collect()
    }

    /// Returns the stored parameters as a record, in key order.
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        self.iter()
            .map(|(k, v)| (k.to_owned(), v.clone()))
            .collect()
    }

    /// Returns `true` if no parameters are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of stored parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over stored parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over stored keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    #[inline]
    fn find(&self, key: &str) -> Result<usize, usize> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
    }

    /// Gets the stored value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.find(key).ok().map(|idx| &self.entries[idx].1)
    }

    /// Returns `true` if `key` has a stored value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_ok()
    }

    /// Stores `value` under `key`, returning the previous value.
    ///
    /// Storing `null` removes the key instead.
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        if value.is_null() {
            return self.remove(&key);
        }
        match self.find(&key) {
            Ok(idx) => Some(core::mem::replace(&mut self.entries[idx].1, value)),
            Err(idx) => {
                self.entries.insert(idx, (key, value));
                None
            }
        }
    }

    /// Removes `key`, returning its value if it was stored.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.find(key)
            .ok()
            .map(|idx| self.entries.remove(idx).1)
    }

    /// Removes every parameter.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    // =========================================================================
    // Typed accessors
    // =========================================================================

    /// Reads `key` as a number.
    #[must_use]
    pub fn number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    /// Reads `key` as a string.
    #[must_use]
    pub fn string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Reads `key` as a boolean.
    #[must_use]
    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    /// Writes a number, or removes `key` when `value` is `None`.
    pub fn set_number(&mut self, key: &str, value: Option<f64>) {
        match value {
            Some(n) => {
                self.set(key, number_value(n));
            }
            None => {
                self.remove(key);
            }
        }
    }

    /// Writes a string, or removes `key` when `value` is `None`.
    pub fn set_string(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(s) => {
                self.set(key, Value::from(s));
            }
            None => {
                self.remove(key);
            }
        }
    }

    /// Writes a boolean, or removes `key` when `value` is `None`.
    pub fn set_bool(&mut self, key: &str, value: Option<bool>) {
        match value {
            Some(b) => {
                self.set(key, Value::from(b));
            }
            None => {
                self.remove(key);
            }
        }
    }

    // =========================================================================
    // Effective values
    // =========================================================================

    /// Gets the stored value for `key`, falling back to its documented default.
    #[must_use]
    pub fn effective(&self, key: &str) -> Option<Value> {
        self.get(key)
            .cloned()
            .or_else(|| defaults::default_for(key).map(|d| d.to_value()))
    }

    /// Returns a copy without `null`s and without values equal to their default.
    ///
    /// Two stores that normalize to the same result describe the same layer.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self::from_map(defaults::elide_defaults(self))
    }

    /// Margins as insets (`x0` left, `y0` top, `x1` right, `y1` bottom).
    #[must_use]
    pub fn margin(&self) -> Insets {
        self.insets(
            keys::MARGIN_LEFT,
            keys::MARGIN_TOP,
            keys::MARGIN_RIGHT,
            keys::MARGIN_BOTTOM,
        )
    }

    /// Paddings as insets (`x0` left, `y0` top, `x1` right, `y1` bottom).
    #[must_use]
    pub fn padding(&self) -> Insets {
        self.insets(
            keys::PADDING_LEFT,
            keys::PADDING_TOP,
            keys::PADDING_RIGHT,
            keys::PADDING_BOTTOM,
        )
    }

    fn insets(&self, left: &str, top: &str, right: &str, bottom: &str) -> Insets {
        let side = |key: &str| self.number(key).unwrap_or(0.0);
        Insets::new(side(left), side(top), side(right), side(bottom))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ParameterStore {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl<K: Into<String>> Extend<(K, Value)> for ParameterStore {
    fn extend<I: IntoIterator<Item = (K, Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}
