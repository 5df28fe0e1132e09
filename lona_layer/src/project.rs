// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection of a layer into a typed record for rendering and code generation.
//!
//! The projection flattens a layer's effective appearance into a record whose
//! fields always exist (missing parameters become their neutral value) and
//! describes the record's shape alongside it. Decoding animation and vector
//! assets is delegated to an [`AssetDecoder`]; whatever it returns is merged in.

use kurbo::Insets;
use lona_params::{Map, Value, keys, number_value};

use crate::config::LayerSettings;
use crate::kind::BuiltInKind;
use crate::tree::{LayerId, LayerTree, TreeError};

/// The type of one projected field.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldType {
    /// `true` or `false`.
    Bool,
    /// A number.
    Number,
    /// A string.
    String,
    /// An event handler slot; projected as `null`.
    Function,
    /// A list of values of one type.
    Array(Box<FieldType>),
    /// A nested record.
    Record(RecordSchema),
    /// Any value.
    Any,
}

/// Ordered field names and types of a record.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordSchema {
    fields: Vec<(String, FieldType)>,
}

impl RecordSchema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `key`, or replaces its type if already present.
    pub fn merge(&mut self, key: impl Into<String>, ty: FieldType) {
        let key = key.into();
        match self.fields.iter_mut().find(|(name, _)| *name == key) {
            Some((_, existing)) => *existing = ty,
            None => self.fields.push((key, ty)),
        }
    }

    /// The type of `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldType> {
        self.fields
            .iter()
            .find_map(|(name, ty)| (name == key).then_some(ty))
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the schema has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A value together with its type, as returned by an [`AssetDecoder`].
#[derive(Clone, Debug, PartialEq)]
pub struct TypedValue {
    /// Shape of `data`.
    pub ty: FieldType,
    /// The value.
    pub data: Value,
}

/// A projected record and its schema.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerValue {
    /// Shape of `data`.
    pub schema: RecordSchema,
    /// Field values.
    pub data: Map<String, Value>,
}

impl LayerValue {
    fn insert(&mut self, key: &str, ty: FieldType, value: Value) {
        self.schema.merge(key, ty);
        self.data.insert(key.to_owned(), value);
    }
}

/// Decodes asset payloads referenced by animation and vector graphic layers.
///
/// Both methods default to `None`, meaning the asset contributes no fields.
pub trait AssetDecoder {
    /// Image assets of the animation at `url`, projected under `images`.
    fn animation_assets(&self, url: &str) -> Option<TypedValue> {
        let _ = url;
        None
    }

    /// Overridable parameters of the vector graphic at `url`, projected under `vector`.
    fn vector_parameters(&self, url: &str) -> Option<TypedValue> {
        let _ = url;
        None
    }
}

/// Decodes nothing.
impl AssetDecoder for () {}

fn number(value: Option<f64>) -> Value {
    number_value(value.unwrap_or(0.0))
}

fn string(value: Option<&str>, default: &str) -> Value {
    Value::String(value.unwrap_or(default).to_owned())
}

fn insert_insets(out: &mut LayerValue, prefix: &str, insets: Insets) {
    for (side, amount) in [
        ("Top", insets.y0),
        ("Right", insets.x1),
        ("Bottom", insets.y1),
        ("Left", insets.x0),
    ] {
        out.insert(&format!("{prefix}{side}"), FieldType::Number, number_value(amount));
    }
}

impl LayerTree {
    /// Projects `id` into a typed record.
    ///
    /// Every layer gets `name`, `visible`, box model, color, border and shadow
    /// fields, and an empty `children` list. View layers add interaction state,
    /// layers with `text` add `text` and `textStyle`, and image layers add
    /// `image`. Animation and vector graphic assets are decoded by `assets`.
    pub fn layer_value(
        &self,
        id: LayerId,
        settings: &LayerSettings,
        assets: &dyn AssetDecoder,
    ) -> Result<LayerValue, TreeError> {
        let node = self.node(id)?;
        let mut out = LayerValue {
            schema: RecordSchema::new(),
            data: Map::new(),
        };

        out.insert("name", FieldType::String, Value::String(node.name.clone()));
        out.insert("visible", FieldType::Bool, Value::Bool(node.visible()));

        out.insert("height", FieldType::Number, number(node.height()));
        out.insert("width", FieldType::Number, number(node.width()));
        insert_insets(&mut out, "margin", node.margin());
        insert_insets(&mut out, "padding", node.padding());

        out.insert(
            keys::BACKGROUND_COLOR,
            FieldType::String,
            string(node.background_color(), "transparent"),
        );

        out.insert(
            keys::BORDER_WIDTH,
            FieldType::Number,
            number(node.border_width()),
        );
        out.insert(
            keys::BORDER_RADIUS,
            FieldType::Number,
            number(node.border_radius()),
        );
        out.insert(
            keys::BORDER_COLOR,
            FieldType::String,
            string(node.border_color(), "transparent"),
        );

        out.insert(
            keys::SHADOW,
            FieldType::String,
            string(node.shadow(), ""),
        );

        out.insert(
            "children",
            FieldType::Array(Box::new(FieldType::Any)),
            Value::Array(Vec::new()),
        );

        let kind = node.layer_type().built_in();
        if kind == Some(BuiltInKind::View) {
            out.insert("pressed", FieldType::Bool, Value::Bool(false));
            out.insert("hovered", FieldType::Bool, Value::Bool(false));
            out.insert("onPress", FieldType::Function, Value::Null);
        }

        if let Some(text) = node.text() {
            out.insert(keys::TEXT, FieldType::String, Value::String(text.to_owned()));
            let style = node.text_style().unwrap_or(&*settings.default_text_style);
            out.insert(
                keys::TEXT_STYLE,
                FieldType::String,
                Value::String(style.to_owned()),
            );
        }

        match kind {
            Some(BuiltInKind::Image) => {
                out.insert(keys::IMAGE, FieldType::String, string(node.image(), ""));
            }
            Some(BuiltInKind::Animation) => {
                if let Some(asset) = node.animation().and_then(|url| assets.animation_assets(url)) {
                    out.insert("images", asset.ty, asset.data);
                }
            }
            Some(BuiltInKind::VectorGraphic) => {
                if let Some(asset) = node.image().and_then(|url| assets.vector_parameters(url)) {
                    out.insert("vector", asset.ty, asset.data);
                }
            }
            _ => {}
        }

        Ok(out)
    }

    /// Projects `id` as `{ type, parameters }`, with `parameters` from
    /// [`layer_value`](Self::layer_value).
    pub fn layer_record(
        &self,
        id: LayerId,
        settings: &LayerSettings,
        assets: &dyn AssetDecoder,
    ) -> Result<LayerValue, TreeError> {
        let parameters = self.layer_value(id, settings, assets)?;
        let layer_type = self.node(id)?.layer_type().to_string();

        let mut out = LayerValue {
            schema: RecordSchema::new(),
            data: Map::new(),
        };
        out.insert("type", FieldType::String, Value::String(layer_type));
        out.insert(
            "parameters",
            FieldType::Record(parameters.schema),
            Value::Object(parameters.data),
        );
        Ok(out)
    }
}
