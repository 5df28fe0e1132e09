// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving which children render under a dynamic configuration.

use lona_params::Value;

use crate::config::{DecodeContext, DynamicConfiguration};
use crate::node::LayerNode;
use crate::tree::{LayerId, LayerTree, TreeError};

/// Attribute holding extra child records for a layer.
pub const CHILDREN_ATTRIBUTE: &str = "children";
/// Attribute overriding a layer's visibility.
pub const VISIBLE_ATTRIBUTE: &str = "visible";

/// Where a visible child lives.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VisibleChild {
    /// A child stored in the queried tree.
    Static(LayerId),
    /// A child decoded from configuration, stored in [`VisibleChildren::dynamic`].
    Dynamic(LayerId),
}

/// The children of a layer that render, in order.
///
/// Dynamic children are decoded into a tree owned by this value, so the queried
/// tree is never modified.
#[derive(Clone, Debug, Default)]
pub struct VisibleChildren {
    /// Layers decoded from the `"children"` override.
    pub dynamic: LayerTree,
    /// Static children first, then dynamic ones, with hidden layers removed.
    pub entries: Vec<VisibleChild>,
}

impl VisibleChildren {
    /// Number of visible children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no child is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolves an entry to its layer, given the tree that was queried.
    #[must_use]
    pub fn node<'a>(&'a self, tree: &'a LayerTree, child: VisibleChild) -> Option<&'a LayerNode> {
        match child {
            VisibleChild::Static(id) => tree.get(id),
            VisibleChild::Dynamic(id) => self.dynamic.get(id),
        }
    }

    /// Visible layers in order.
    pub fn nodes<'a>(&'a self, tree: &'a LayerTree) -> impl Iterator<Item = &'a LayerNode> + 'a {
        self.entries
            .iter()
            .filter_map(move |&child| self.node(tree, child))
    }
}

impl LayerTree {
    /// The children of `id` that render under `config`.
    ///
    /// The list is the static children followed by any layer records that
    /// `config` supplies under `"children"` for this layer's name. Records that
    /// fail to decode are skipped. Each child is then kept if `config`'s
    /// `"visible"` override for its name is `true`, or, without a boolean
    /// override, if its own `visible` parameter is.
    pub fn visible_children(
        &self,
        id: LayerId,
        config: &dyn DynamicConfiguration,
        ctx: &DecodeContext<'_>,
    ) -> Result<VisibleChildren, TreeError> {
        let node = self.node(id)?;
        let mut dynamic = Self::new();
        let mut candidates: Vec<VisibleChild> =
            node.children().iter().copied().map(VisibleChild::Static).collect();

        if let Some(Value::Array(records)) = config.get(CHILDREN_ATTRIBUTE, &node.name) {
            tracing::debug!(layer = %node.name, count = records.len(), "decoding dynamic children");
            for record in &records {
                match dynamic.decode_layer(record, ctx) {
                    Ok(child) => candidates.push(VisibleChild::Dynamic(child)),
                    Err(error) => {
                        tracing::warn!(layer = %node.name, %error, "skipping dynamic child");
                    }
                }
            }
        }

        let mut resolved = VisibleChildren {
            dynamic,
            entries: Vec::with_capacity(candidates.len()),
        };
        for child in candidates {
            let Some(layer) = resolved.node(self, child) else {
                continue;
            };
            let visible = config
                .get(VISIBLE_ATTRIBUTE, &layer.name)
                .and_then(|value| value.as_bool())
                .unwrap_or_else(|| layer.visible());
            if visible {
                resolved.entries.push(child);
            }
        }
        Ok(resolved)
    }
}
