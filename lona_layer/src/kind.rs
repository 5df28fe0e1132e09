// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer types: built-in kinds and references to other components.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Prefix that marks a built-in kind in the current document format.
pub const BUILT_IN_PREFIX: &str = "Lona:";

/// The closed set of layer kinds provided by the tool itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltInKind {
    /// A box with background, border, and children.
    View,
    /// A text run.
    Text,
    /// A raster image.
    Image,
    /// A vector graphic whose parameters can be overridden.
    VectorGraphic,
    /// A playing animation.
    Animation,
    /// The injection point for children supplied by a component's user.
    Children,
}

impl BuiltInKind {
    /// Every built-in kind, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::View,
        Self::Text,
        Self::Image,
        Self::VectorGraphic,
        Self::Animation,
        Self::Children,
    ];

    /// Returns the unprefixed kind name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::View => "View",
            Self::Text => "Text",
            Self::Image => "Image",
            Self::VectorGraphic => "VectorGraphic",
            Self::Animation => "Animation",
            Self::Children => "Children",
        }
    }

    /// Looks up a kind by its unprefixed name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }
}

impl fmt::Display for BuiltInKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for a `Lona:`-prefixed type string with an unknown suffix.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown built-in layer kind `{suffix}` in type `{BUILT_IN_PREFIX}{suffix}`")]
pub struct LayerTypeError {
    /// The text after the prefix.
    pub suffix: String,
}

/// Error returned for a component name that would not read back as a custom type.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ComponentNameError {
    /// The name is a built-in kind name, which parses as that kind.
    #[error("component name `{0}` is a built-in layer kind")]
    BuiltInName(String),
    /// The name starts with the built-in prefix.
    #[error("component name `{0}` starts with the reserved prefix `{BUILT_IN_PREFIX}`")]
    ReservedPrefix(String),
}

/// The name or path of a component referenced by a custom layer.
///
/// A name never collides with the built-in type strings, so it serializes as
/// itself and parses back as the same custom type.
///
/// ```rust
/// use lona_layer::{ComponentName, ComponentNameError};
///
/// assert_eq!(ComponentName::new("MyButton").unwrap().as_str(), "MyButton");
/// assert!(matches!(ComponentName::new("Text"), Err(ComponentNameError::BuiltInName(_))));
/// assert!(matches!(
///     ComponentName::new("Lona:Card"),
///     Err(ComponentNameError::ReservedPrefix(_))
/// ));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentName(String);

impl ComponentName {
    /// Checks that `name` reads back as a custom type.
    pub fn new(name: impl Into<String>) -> Result<Self, ComponentNameError> {
        let name = name.into();
        if BuiltInKind::from_name(&name).is_some() {
            return Err(ComponentNameError::BuiltInName(name));
        }
        if name.starts_with(BUILT_IN_PREFIX) {
            return Err(ComponentNameError::ReservedPrefix(name));
        }
        Ok(Self(name))
    }

    /// The name as written in documents.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ComponentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for ComponentName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ComponentName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<&str> for ComponentName {
    type Error = ComponentNameError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

/// What a layer is: a built-in primitive or a reference to another component.
///
/// # Parsing
///
/// Type strings are resolved in this order:
///
/// 1. An exact built-in name (`"Text"`) is accepted for older documents.
/// 2. A prefixed built-in name (`"Lona:Text"`) is the current format. An unknown
///    suffix is an error, since guessing a kind would corrupt layout.
/// 3. Anything else names a custom component.
///
/// Custom types are built with [`LayerType::custom`], which refuses names that
/// step 1 or 2 would claim, so every `LayerType` survives a write and re-read.
///
/// ```rust
/// use lona_layer::{BuiltInKind, LayerType};
///
/// assert_eq!(LayerType::parse("Lona:Text"), Ok(LayerType::BuiltIn(BuiltInKind::Text)));
/// assert_eq!(LayerType::parse("Text"), Ok(LayerType::BuiltIn(BuiltInKind::Text)));
/// assert_eq!(LayerType::parse("MyButton").unwrap(), LayerType::custom("MyButton").unwrap());
/// assert!(LayerType::parse("Lona:Sparkle").is_err());
///
/// assert_eq!(LayerType::BuiltIn(BuiltInKind::Text).to_string(), "Lona:Text");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// One of the tool's own layer kinds.
    BuiltIn(BuiltInKind),
    /// A reference to another component by name or path.
    Custom(ComponentName),
}

impl LayerType {
    /// A plain view.
    pub const VIEW: Self = Self::BuiltIn(BuiltInKind::View);
    /// A text layer.
    pub const TEXT: Self = Self::BuiltIn(BuiltInKind::Text);
    /// An image layer.
    pub const IMAGE: Self = Self::BuiltIn(BuiltInKind::Image);
    /// A vector graphic layer.
    pub const VECTOR_GRAPHIC: Self = Self::BuiltIn(BuiltInKind::VectorGraphic);
    /// An animation layer.
    pub const ANIMATION: Self = Self::BuiltIn(BuiltInKind::Animation);
    /// A children slot.
    pub const CHILDREN: Self = Self::BuiltIn(BuiltInKind::Children);

    /// Parses a serialized type string.
    pub fn parse(s: &str) -> Result<Self, LayerTypeError> {
        if let Some(kind) = BuiltInKind::from_name(s) {
            return Ok(Self::BuiltIn(kind));
        }
        if let Some(suffix) = s.strip_prefix(BUILT_IN_PREFIX) {
            return BuiltInKind::from_name(suffix)
                .map(Self::BuiltIn)
                .ok_or_else(|| LayerTypeError {
                    suffix: suffix.to_owned(),
                });
        }
        Ok(Self::Custom(ComponentName(s.to_owned())))
    }

    /// A reference to the component `name`.
    ///
    /// Fails for names that would serialize as a built-in type.
    pub fn custom(name: impl Into<String>) -> Result<Self, ComponentNameError> {
        ComponentName::new(name).map(Self::Custom)
    }

    /// Returns the built-in kind, if this is one.
    #[must_use]
    pub fn built_in(&self) -> Option<BuiltInKind> {
        match self {
            Self::BuiltIn(kind) => Some(*kind),
            Self::Custom(_) => None,
        }
    }

    /// Returns `true` for the given built-in kind.
    #[must_use]
    pub fn is(&self, kind: BuiltInKind) -> bool {
        self.built_in() == Some(kind)
    }

    /// Returns `true` for custom component references.
    #[must_use]
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl fmt::Display for LayerType {
    /// Writes the current serialized form: prefixed for built-ins, bare for custom.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BuiltIn(kind) => write!(f, "{BUILT_IN_PREFIX}{kind}"),
            Self::Custom(name) => f.write_str(name.as_str()),
        }
    }
}

impl FromStr for LayerType {
    type Err = LayerTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ComponentName> for LayerType {
    fn from(name: ComponentName) -> Self {
        Self::Custom(name)
    }
}

impl From<BuiltInKind> for LayerType {
    fn from(kind: BuiltInKind) -> Self {
        Self::BuiltIn(kind)
    }
}

/// How a layer participates in its document, beyond its type.
///
/// Most layers are concrete content. Two kinds of layer stand in for something
/// else and carry that as explicit state here rather than as a separate node type.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// A concrete built-in layer.
    #[default]
    Content,
    /// A built-in `Children` layer: where a component's user injects children.
    ParameterSlot,
    /// A custom type referring to another component.
    ComponentReference {
        /// Set when the component loader could not resolve the reference.
        failed_to_load: bool,
    },
}

impl LayerRole {
    /// The role a freshly constructed layer of `layer_type` starts with.
    #[must_use]
    pub fn for_type(layer_type: &LayerType) -> Self {
        match layer_type {
            LayerType::BuiltIn(BuiltInKind::Children) => Self::ParameterSlot,
            LayerType::BuiltIn(_) => Self::Content,
            LayerType::Custom(_) => Self::ComponentReference {
                failed_to_load: false,
            },
        }
    }

    /// Returns `true` if this is a component reference that failed to load.
    #[must_use]
    pub fn failed_to_load(self) -> bool {
        matches!(
            self,
            Self::ComponentReference {
                failed_to_load: true
            }
        )
    }
}
