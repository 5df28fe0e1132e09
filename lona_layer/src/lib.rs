// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lona Layer: the layer tree of a UI component document.
//!
//! A component is a tree of layers. Each layer has a name, a [`LayerType`], a
//! bag of raw parameters from [`lona_params`], opaque metadata, and ordered
//! children. This crate owns that tree, the editor-facing *sizing rule* view of
//! its flex parameters, and the backward-compatible document format.
//!
//! ## Core Concepts
//!
//! ### Layers and the tree
//!
//! Layers live in a [`LayerTree`] arena and are addressed by [`LayerId`]. Parent
//! links are ids, so a layer's parent is an O(1) lookup and there is no shared
//! ownership. Structural changes go through named operations
//! ([`LayerTree::insert_child`], [`LayerTree::remove_from_parent`], ...) that
//! keep every child listed exactly once under exactly one parent and refuse
//! cycles.
//!
//! ### Sizing rules
//!
//! Editors present a layer's width and height as [`SizingRule::Expand`],
//! [`SizingRule::Shrink`] or [`SizingRule::Fixed`]. Which parameters encode a
//! rule depends on the parent's [`FlexDirection`]: `flex = 1` expands along the
//! parent's main axis, `alignSelf = "stretch"` along its cross axis. The tree
//! resolves the parent for you ([`LayerTree::width_sizing_rule`]), and
//! [`LayerTree::set_flex_direction`] rewrites children so their rules survive a
//! change of direction.
//!
//! ### Documents
//!
//! [`LayerTree::decode_layer`] and [`LayerTree::encode_layer`] convert to and from
//! `serde_json::Value`. Encoding leaves out parameters equal to their documented
//! defaults; decoding accepts older field and type names.
//!
//! ## Quick Start
//!
//! ```rust
//! use lona_layer::{DecodeContext, FlexDirection, LayerTree, SizingRule};
//! use serde_json::json;
//!
//! let mut tree = LayerTree::new();
//! let root = tree
//!     .decode_layer(
//!         &json!({
//!             "id": "Card",
//!             "type": "Lona:View",
//!             "params": { "justifyContent": "flex-start" },
//!             "children": [
//!                 { "id": "Title", "type": "Lona:Text", "params": { "flex": 1 } }
//!             ]
//!         }),
//!         &DecodeContext::default(),
//!     )
//!     .unwrap();
//! let title = tree.child_at(root, 0).unwrap();
//! assert_eq!(tree.height_sizing_rule(title), Some(SizingRule::Expand));
//!
//! // Laying the card out in a row keeps the title expanding along the same axis.
//! tree.set_flex_direction(root, FlexDirection::Row).unwrap();
//! assert_eq!(tree.height_sizing_rule(title), Some(SizingRule::Expand));
//! assert_eq!(tree.get(title).unwrap().parameters.string("alignSelf"), Some("stretch"));
//!
//! // Default-valued parameters are left out of the document.
//! let encoded = tree.encode_layer(root).unwrap();
//! assert_eq!(encoded["params"], json!({ "flexDirection": "row" }));
//! ```

mod codec;
mod config;
mod kind;
mod layout;
mod node;
mod preset;
mod project;
pub mod sizing;
mod tree;
mod visibility;

pub use codec::CodecError;
pub use config::{
    AcceptAll, ComponentLoader, ComponentResolution, DecodeContext, DynamicConfiguration,
    LayerSettings, MapConfiguration,
};
pub use kind::{
    BUILT_IN_PREFIX, BuiltInKind, ComponentName, ComponentNameError, LayerRole, LayerType,
    LayerTypeError,
};
pub use node::LayerNode;
pub use preset::LayerPreset;
pub use project::{AssetDecoder, FieldType, LayerValue, RecordSchema, TypedValue};
pub use sizing::{Axis, FlexDirection, SizingRule};
pub use tree::{LayerId, LayerTree, TreeError};
pub use visibility::{CHILDREN_ATTRIBUTE, VISIBLE_ATTRIBUTE, VisibleChild, VisibleChildren};
