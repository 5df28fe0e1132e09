// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Starting points for newly added layers.

use lona_params::{ParameterStore, keys, number_value};
use serde_json::Value;

use crate::kind::{BuiltInKind, LayerType};
use crate::sizing::SizingRule;
use crate::tree::{LayerId, LayerTree};

const PLACEHOLDER_SIZE: f64 = 100.0;
const PLACEHOLDER_COLOR: &str = "#D8D8D8";
const PLACEHOLDER_TEXT: &str = "Text goes here";

/// A name and parameters for a new built-in layer.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerPreset {
    /// Kind of layer to create.
    pub kind: BuiltInKind,
    /// Name before uniquing.
    pub base_name: &'static str,
    /// Initial parameters, possibly including construction sizing rules.
    pub parameters: ParameterStore,
}

impl LayerPreset {
    /// The preset for `kind`.
    ///
    /// Text hugs its content. Everything else is a 100×100 grey placeholder, and
    /// vector graphics additionally scale to fit.
    #[must_use]
    pub fn new(kind: BuiltInKind) -> Self {
        let mut parameters = ParameterStore::new();
        if kind == BuiltInKind::Text {
            parameters.set(keys::TEXT, Value::from(PLACEHOLDER_TEXT));
            parameters.set(
                keys::WIDTH_SIZING_RULE,
                Value::from(SizingRule::Shrink.as_str()),
            );
            parameters.set(
                keys::HEIGHT_SIZING_RULE,
                Value::from(SizingRule::Shrink.as_str()),
            );
        } else {
            parameters.set(keys::WIDTH, number_value(PLACEHOLDER_SIZE));
            parameters.set(keys::HEIGHT, number_value(PLACEHOLDER_SIZE));
            parameters.set(keys::BACKGROUND_COLOR, Value::from(PLACEHOLDER_COLOR));
            if kind == BuiltInKind::VectorGraphic {
                parameters.set(
                    keys::RESIZE_MODE,
                    Value::from(lona_params::ResizeMode::Contain.as_str()),
                );
            }
        }
        Self {
            kind,
            base_name: kind.as_str(),
            parameters,
        }
    }
}

impl LayerTree {
    /// A name based on `base` that no layer under `scope` uses.
    ///
    /// Returns `base` itself when it is free, otherwise `"{base} {n}"` for the
    /// smallest free `n` starting at 2.
    #[must_use]
    pub fn new_layer_name(&self, scope: LayerId, base: &str) -> String {
        let taken: hashbrown::HashSet<&str> = self
            .descendant_layers(scope)
            .into_iter()
            .filter_map(|id| self.get(id).map(|node| node.name.as_str()))
            .collect();
        if !taken.contains(base) {
            return base.to_owned();
        }
        (2_u64..)
            .map(|n| format!("{base} {n}"))
            .find(|candidate| !taken.contains(candidate.as_str()))
            .unwrap_or_else(|| base.to_owned())
    }

    /// Creates a detached layer from the preset for `kind`.
    ///
    /// With a `scope`, the name is made unique among the layers under it. The
    /// children slot always keeps its plain name, as a component has only one.
    pub fn create_preset_layer(&mut self, kind: BuiltInKind, scope: Option<LayerId>) -> LayerId {
        let preset = LayerPreset::new(kind);
        let name = match scope {
            Some(scope) if kind != BuiltInKind::Children => {
                self.new_layer_name(scope, preset.base_name)
            }
            _ => preset.base_name.to_owned(),
        };
        self.create_layer(name, LayerType::BuiltIn(kind), preset.parameters)
    }
}
