// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lona Params: raw parameter storage for component layers.
//!
//! Every layer in a component document carries a bag of style and content
//! attributes (`width`, `flex`, `backgroundColor`, `text`, ...). This crate holds
//! that bag and the small amount of vocabulary shared by everything that reads it.
//!
//! ## Core Concepts
//!
//! ### Parameter Storage
//!
//! [`ParameterStore`] is a sparse, key-sorted map from parameter name to a
//! [`serde_json::Value`]. It performs no validation: any key and any value are
//! accepted. Typed accessors ([`ParameterStore::number`], [`ParameterStore::string`],
//! [`ParameterStore::bool`]) coerce on read and return `None` when a key is absent
//! or holds a value of another shape.
//!
//! Writing `null` is the same as removing the key, so absence is the only
//! representation of "unset".
//!
//! ### Defaults
//!
//! The [`defaults`] module documents the values that a missing key stands for
//! (`flexDirection = "column"`, `visible = true`, margins and paddings of `0`, ...).
//! Serializers use [`defaults::elide_defaults`] to leave those keys out, and readers
//! use [`ParameterStore::effective`] to get them back.
//!
//! ## Quick Start
//!
//! ```rust
//! use lona_params::{ParameterStore, keys};
//! use serde_json::json;
//!
//! let mut params = ParameterStore::new();
//! params.set_number(keys::WIDTH, Some(50.0));
//! params.set(keys::JUSTIFY_CONTENT, json!("flex-start"));
//!
//! assert_eq!(params.number(keys::WIDTH), Some(50.0));
//! assert_eq!(params.get(keys::WIDTH), Some(&json!(50)));
//!
//! // Defaults are elided on the way out...
//! let encoded = lona_params::defaults::elide_defaults(&params);
//! assert_eq!(encoded.len(), 1);
//!
//! // ...and restored on the way in.
//! let decoded = ParameterStore::from_map(encoded);
//! assert_eq!(decoded.effective(keys::JUSTIFY_CONTENT), Some(json!("flex-start")));
//! ```

pub mod defaults;
mod enums;
pub mod keys;
mod store;
mod value;

pub use enums::{ParseEnumError, PositionType, ResizeMode};
pub use store::ParameterStore;
pub use value::{number_value, values_equal};

pub use serde_json::{Map, Value};
