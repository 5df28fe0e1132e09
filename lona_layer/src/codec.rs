// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured-data encoding and decoding of layer trees.
//!
//! The wire shape of one layer is:
//!
//! ```text
//! {
//!   "id": "Title",
//!   "type": "Lona:Text",
//!   "params": { "text": "Hello" },
//!   "children": [ ... ],      // omitted when empty
//!   "metadata": { ... }       // omitted when empty
//! }
//! ```
//!
//! Decoding also accepts older documents: `name` for `id`, `parameters` for
//! `params`, and unprefixed built-in type names.

use lona_params::defaults::elide_defaults;
use lona_params::{Map, ParameterStore, Value};

use crate::config::{ComponentResolution, DecodeContext};
use crate::kind::{LayerRole, LayerType, LayerTypeError};
use crate::node::LayerNode;
use crate::tree::{LayerId, LayerTree, TreeError};

/// Errors from decoding or encoding layers.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The record is not an object.
    #[error("layer record must be an object, found {found}")]
    NotARecord {
        /// The JSON kind that was found instead.
        found: &'static str,
    },
    /// The record has no string `type`.
    #[error("layer record has no string `type`")]
    MissingType,
    /// The `type` names an unknown built-in kind.
    #[error(transparent)]
    UnknownBuiltIn(#[from] LayerTypeError),
    /// A structural operation failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// The input is not valid JSON.
    #[error("invalid layer JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl LayerTree {
    /// Decodes a layer record and its descendants into new detached layers.
    ///
    /// Errors in the record itself are fatal; a child record that fails to decode
    /// is dropped and its siblings still load. Custom types are resolved through
    /// `ctx.loader`; an unresolved reference is kept, flagged, and renamed to
    /// [`LayerSettings::failed_to_load_name`](crate::LayerSettings::failed_to_load_name).
    ///
    /// Parameters are stored as written. Keys elided at encode time read back
    /// through [`ParameterStore::effective`].
    pub fn decode_layer(
        &mut self,
        record: &Value,
        ctx: &DecodeContext<'_>,
    ) -> Result<LayerId, CodecError> {
        let object = record.as_object().ok_or(CodecError::NotARecord {
            found: kind_name(record),
        })?;
        let type_name = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(CodecError::MissingType)?;
        let layer_type = LayerType::parse(type_name)?;

        let mut name = object
            .get("id")
            .and_then(Value::as_str)
            .or_else(|| object.get("name").and_then(Value::as_str))
            .unwrap_or_default()
            .to_owned();
        let parameters = object
            .get("params")
            .and_then(Value::as_object)
            .or_else(|| object.get("parameters").and_then(Value::as_object))
            .cloned()
            .map(ParameterStore::from_map)
            .unwrap_or_default();
        let metadata = object
            .get("metadata")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        let children = self.decode_children(object.get("children"), ctx);

        let mut role = LayerRole::for_type(&layer_type);
        if let LayerType::Custom(component) = &layer_type {
            if ctx.loader.resolve(component.as_str()) == ComponentResolution::Failed {
                tracing::warn!(%component, layer = %name, "component failed to load");
                role = LayerRole::ComponentReference {
                    failed_to_load: true,
                };
                name = ctx.settings.failed_to_load_name.clone().into_owned();
            }
        }

        let mut node = LayerNode::new(name, layer_type, parameters);
        node.metadata = metadata;
        node.role = role;
        let id = self.alloc(node);
        for child in children {
            self.append_child(id, child)?;
        }
        Ok(id)
    }

    fn decode_children(&mut self, records: Option<&Value>, ctx: &DecodeContext<'_>) -> Vec<LayerId> {
        let Some(records) = records.and_then(Value::as_array) else {
            return Vec::new();
        };
        records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| match self.decode_layer(record, ctx) {
                Ok(id) => Some(id),
                Err(error) => {
                    tracing::warn!(index, %error, "dropping child layer that failed to decode");
                    None
                }
            })
            .collect()
    }

    /// Encodes `id` and its descendants.
    ///
    /// `null` parameters and parameters equal to their documented default are
    /// left out; `children` and `metadata` appear only when non-empty.
    pub fn encode_layer(&self, id: LayerId) -> Result<Value, TreeError> {
        let node = self.node(id)?;
        let mut record = Map::new();
        record.insert("id".into(), Value::String(node.name.clone()));
        record.insert("type".into(), Value::String(node.layer_type.to_string()));
        record.insert(
            "params".into(),
            Value::Object(elide_defaults(&node.parameters)),
        );
        if !node.children.is_empty() {
            let children = node
                .children
                .iter()
                .map(|&child| self.encode_layer(child))
                .collect::<Result<Vec<_>, _>>()?;
            record.insert("children".into(), Value::Array(children));
        }
        if !node.metadata.is_empty() {
            record.insert("metadata".into(), Value::Object(node.metadata.clone()));
        }
        Ok(Value::Object(record))
    }

    /// Parses `json` and decodes it with [`decode_layer`](Self::decode_layer).
    pub fn decode_json_str(
        &mut self,
        json: &str,
        ctx: &DecodeContext<'_>,
    ) -> Result<LayerId, CodecError> {
        let record: Value = serde_json::from_str(json)?;
        self.decode_layer(&record, ctx)
    }

    /// Encodes `id` as pretty-printed JSON.
    pub fn encode_json_string(&self, id: LayerId) -> Result<String, CodecError> {
        let record = self.encode_layer(id)?;
        Ok(serde_json::to_string_pretty(&record)?)
    }

    /// Deep-copies `id` and its subtree into new detached layers.
    ///
    /// The copy goes through [`encode_layer`](Self::encode_layer) and
    /// [`decode_layer`](Self::decode_layer), so it carries exactly what a saved
    /// document would: default-valued parameters are dropped and custom types are
    /// resolved again.
    pub fn copy_layer(
        &mut self,
        id: LayerId,
        ctx: &DecodeContext<'_>,
    ) -> Result<LayerId, CodecError> {
        let record = self.encode_layer(id)?;
        self.decode_layer(&record, ctx)
    }

    /// Copies `id` and inserts the copy directly after it under the same parent.
    ///
    /// A root's copy stays detached.
    pub fn duplicate_layer(
        &mut self,
        id: LayerId,
        ctx: &DecodeContext<'_>,
    ) -> Result<LayerId, CodecError> {
        let copy = self.copy_layer(id, ctx)?;
        if let Some(parent) = self.parent(id) {
            let index = self
                .children(parent)
                .iter()
                .position(|&child| child == id)
                .map_or(self.child_count(parent), |index| index + 1);
            self.insert_child(parent, copy, index)?;
        }
        Ok(copy)
    }
}
