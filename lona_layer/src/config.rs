// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Injected configuration and the collaborators the layer model queries.
//!
//! Nothing here is global. Callers pass a [`DecodeContext`] to decoding
//! operations and a [`DynamicConfiguration`] to visibility resolution.

use std::borrow::Cow;

use hashbrown::HashMap;
use serde_json::Value;

/// Settings that the layer model would otherwise look up in ambient state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayerSettings {
    /// Text style name reported for text layers that set none.
    pub default_text_style: Cow<'static, str>,
    /// Display name given to component references that failed to load.
    pub failed_to_load_name: Cow<'static, str>,
}

impl LayerSettings {
    /// `"regular"` text style, `"Failed to Load"` for broken references.
    pub const DEFAULT: Self = Self {
        default_text_style: Cow::Borrowed("regular"),
        failed_to_load_name: Cow::Borrowed("Failed to Load"),
    };
}

impl Default for LayerSettings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static DEFAULT_SETTINGS: LayerSettings = LayerSettings::DEFAULT;

/// Outcome of resolving a custom layer type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ComponentResolution {
    /// The referenced component exists.
    Loaded,
    /// The reference could not be resolved.
    Failed,
}

/// Resolves custom layer types to component definitions.
///
/// The layer model only needs to know whether resolution succeeded; loading and
/// caching the definition is the implementor's business.
pub trait ComponentLoader {
    /// Resolves the component named `component`, as written in a layer's `type`.
    fn resolve(&self, component: &str) -> ComponentResolution;
}

/// A loader that accepts every reference.
#[derive(Copy, Clone, Debug, Default)]
pub struct AcceptAll;

impl ComponentLoader for AcceptAll {
    fn resolve(&self, _component: &str) -> ComponentResolution {
        ComponentResolution::Loaded
    }
}

impl<F> ComponentLoader for F
where
    F: Fn(&str) -> ComponentResolution,
{
    fn resolve(&self, component: &str) -> ComponentResolution {
        self(component)
    }
}

/// Everything decoding needs beyond the record itself.
#[derive(Copy, Clone)]
pub struct DecodeContext<'a> {
    /// Resolves custom layer types.
    pub loader: &'a dyn ComponentLoader,
    /// Names substituted during decoding.
    pub settings: &'a LayerSettings,
}

impl<'a> DecodeContext<'a> {
    /// Bundles a loader with settings.
    #[must_use]
    pub fn new(loader: &'a dyn ComponentLoader, settings: &'a LayerSettings) -> Self {
        Self { loader, settings }
    }
}

impl Default for DecodeContext<'static> {
    /// Accepts every component reference and uses [`LayerSettings::DEFAULT`].
    fn default() -> Self {
        Self {
            loader: &AcceptAll,
            settings: &DEFAULT_SETTINGS,
        }
    }
}

impl core::fmt::Debug for DecodeContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DecodeContext")
            .field("settings", self.settings)
            .finish_non_exhaustive()
    }
}

/// Per-render overrides keyed by `(attribute, layer name)`.
///
/// The layer model queries two attributes: `"visible"` (a boolean overriding a
/// child's stored visibility) and `"children"` (an array of layer records
/// appended after a layer's static children). It never writes.
pub trait DynamicConfiguration {
    /// Returns the override for `attribute` on the layer named `layer`.
    fn get(&self, attribute: &str, layer: &str) -> Option<Value>;
}

/// No overrides.
impl DynamicConfiguration for () {
    fn get(&self, _attribute: &str, _layer: &str) -> Option<Value> {
        None
    }
}

/// A [`DynamicConfiguration`] backed by an in-memory map.
#[derive(Clone, Debug, Default)]
pub struct MapConfiguration {
    layers: HashMap<String, HashMap<String, Value>>,
}

impl MapConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `attribute` on the layer named `layer`, returning the previous value.
    pub fn set(
        &mut self,
        layer: impl Into<String>,
        attribute: impl Into<String>,
        value: Value,
    ) -> Option<Value> {
        self.layers
            .entry(layer.into())
            .or_default()
            .insert(attribute.into(), value)
    }

    /// Removes `attribute` from the layer named `layer`.
    pub fn remove(&mut self, layer: &str, attribute: &str) -> Option<Value> {
        let attributes = self.layers.get_mut(layer)?;
        let removed = attributes.remove(attribute);
        if attributes.is_empty() {
            self.layers.remove(layer);
        }
        removed
    }
}

impl DynamicConfiguration for MapConfiguration {
    fn get(&self, attribute: &str, layer: &str) -> Option<Value> {
        self.layers.get(layer)?.get(attribute).cloned()
    }
}
