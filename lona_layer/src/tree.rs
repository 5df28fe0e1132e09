// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena storage for layers and the structural operations over it.

use core::fmt;

use lona_params::{ParameterStore, keys};

use crate::kind::LayerType;
use crate::node::LayerNode;
use crate::sizing::{self, Axis, FlexDirection, SizingRule};

/// Identifier for a layer in a [`LayerTree`].
///
/// A small, copyable handle made of a slot index and a generation counter.
/// Removing a layer frees its slot; when the slot is reused the generation is
/// incremented, so a stale `LayerId` never aliases a different live layer.
///
/// Layer identity is handle identity: two layers with identical contents are
/// still distinct layers.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub(crate) u32, pub(crate) u32);

impl LayerId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Returns the generation counter.
    #[must_use]
    #[inline]
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({}@gen{})", self.0, self.1)
    }
}

/// Errors from structural tree operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The handle does not refer to a live layer.
    #[error("{0:?} does not refer to a live layer")]
    StaleLayer(LayerId),
    /// The move would make a layer its own ancestor.
    #[error("cannot insert {child:?} under {parent:?}: it would become its own ancestor")]
    Cycle {
        /// The intended parent.
        parent: LayerId,
        /// The layer being inserted.
        child: LayerId,
    },
    /// The insertion index is past the end of the child list.
    #[error("child index {index} is out of bounds for a layer with {len} children")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The number of children after the moved layer was detached.
        len: usize,
    },
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    node: Option<LayerNode>,
}

/// Owning storage for any number of layer trees.
///
/// Each layer is owned by the arena and addressed by [`LayerId`]. Parent links
/// are plain ids, so there are no ownership cycles and parent lookup is O(1).
/// A layer with no parent is a root; the arena can hold many roots, and moving a
/// layer from one root's subtree to another is an ordinary [`insert_child`].
///
/// # Invariants
///
/// - Every non-root layer appears exactly once in its parent's `children`.
/// - No layer is its own ancestor.
///
/// # Example
///
/// ```rust
/// use lona_layer::{LayerTree, LayerType, SizingRule};
/// use lona_params::ParameterStore;
/// use serde_json::json;
///
/// let mut tree = LayerTree::new();
/// let root = tree.create_layer("Root", LayerType::VIEW, ParameterStore::new());
/// let child = tree.create_layer(
///     "Child",
///     LayerType::VIEW,
///     [("flex", json!(1))].into_iter().collect(),
/// );
/// tree.append_child(root, child).unwrap();
///
/// // In a column, `flex = 1` is vertical expansion.
/// assert_eq!(tree.height_sizing_rule(child), Some(SizingRule::Expand));
/// assert_eq!(tree.width_sizing_rule(child), Some(SizingRule::Shrink));
/// ```
///
/// [`insert_child`]: LayerTree::insert_child
#[derive(Clone, Debug, Default)]
pub struct LayerTree {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
}

impl LayerTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Returns `true` if no layers are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns whether `id` refers to a live layer.
    #[must_use]
    pub fn is_alive(&self, id: LayerId) -> bool {
        self.get(id).is_some()
    }

    /// Borrows a live layer.
    #[must_use]
    pub fn get(&self, id: LayerId) -> Option<&LayerNode> {
        self.slots
            .get(id.idx())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    /// Mutably borrows a live layer.
    ///
    /// Writes through this borrow are raw: they bypass the rewriting that
    /// [`set_flex_direction`](Self::set_flex_direction) and the sizing-rule setters perform.
    #[must_use]
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut LayerNode> {
        self.slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    pub(crate) fn node(&self, id: LayerId) -> Result<&LayerNode, TreeError> {
        self.get(id).ok_or(TreeError::StaleLayer(id))
    }

    pub(crate) fn node_mut(&mut self, id: LayerId) -> Result<&mut LayerNode, TreeError> {
        self.get_mut(id).ok_or(TreeError::StaleLayer(id))
    }

    pub(crate) fn alloc(&mut self, node: LayerNode) -> LayerId {
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.node = Some(node);
            LayerId::new(idx, slot.generation)
        } else {
            let idx = u32::try_from(self.slots.len()).expect("layer count exceeds u32::MAX");
            self.slots.push(Slot {
                generation: 1,
                node: Some(node),
            });
            LayerId::new(idx, 1)
        }
    }

    /// Creates a detached layer.
    ///
    /// The `widthSizingRule` and `heightSizingRule` pseudo-parameters, when present
    /// and valid, are applied as sizing rules in root context and removed. They are
    /// always removed, even if their value is not a rule name.
    ///
    /// # Panics
    ///
    /// Panics if the arena would hold more than `u32::MAX` slots.
    pub fn create_layer(
        &mut self,
        name: impl Into<String>,
        layer_type: LayerType,
        mut parameters: ParameterStore,
    ) -> LayerId {
        for (key, axis) in [
            (keys::WIDTH_SIZING_RULE, Axis::Horizontal),
            (keys::HEIGHT_SIZING_RULE, Axis::Vertical),
        ] {
            let Some(value) = parameters.remove(key) else {
                continue;
            };
            match value.as_str().map(str::parse::<SizingRule>) {
                Some(Ok(rule)) => {
                    sizing::apply_dimension_rule(
                        &mut parameters,
                        axis,
                        FlexDirection::Column,
                        rule,
                    );
                }
                _ => tracing::debug!(%key, %value, "ignoring invalid construction sizing rule"),
            }
        }
        self.alloc(LayerNode::new(name.into(), layer_type, parameters))
    }

    /// Creates a detached layer and attaches `children` to it in order.
    ///
    /// The first child that cannot be attached is reported as an error. The new
    /// layer then stays alive and detached, holding the children attached so far.
    pub fn create_layer_with_children(
        &mut self,
        name: impl Into<String>,
        layer_type: LayerType,
        parameters: ParameterStore,
        children: impl IntoIterator<Item = LayerId>,
    ) -> Result<LayerId, TreeError> {
        let id = self.create_layer(name, layer_type, parameters);
        for child in children {
            self.append_child(id, child)?;
        }
        Ok(id)
    }

    /// Live layers that have no parent.
    #[must_use]
    pub fn roots(&self) -> Vec<LayerId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                let node = slot.node.as_ref()?;
                let idx = u32::try_from(idx).ok()?;
                node.parent
                    .is_none()
                    .then_some(LayerId::new(idx, slot.generation))
            })
            .collect()
    }

    // =========================================================================
    // Topology
    // =========================================================================

    /// The parent of `id`, or `None` for roots and stale handles.
    #[must_use]
    pub fn parent(&self, id: LayerId) -> Option<LayerId> {
        self.get(id)?.parent
    }

    /// The children of `id` in order; empty for stale handles.
    #[must_use]
    pub fn children(&self, id: LayerId) -> &[LayerId] {
        self.get(id).map_or(&[], LayerNode::children)
    }

    /// Number of children of `id`.
    #[must_use]
    pub fn child_count(&self, id: LayerId) -> usize {
        self.children(id).len()
    }

    /// The child of `id` at `index`.
    #[must_use]
    pub fn child_at(&self, id: LayerId, index: usize) -> Option<LayerId> {
        self.children(id).get(index).copied()
    }

    /// Returns `true` if `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_ancestor_or_self(&self, ancestor: LayerId, id: LayerId) -> bool {
        let mut current = Some(id);
        while let Some(layer) = current {
            if layer == ancestor {
                return true;
            }
            current = self.parent(layer);
        }
        false
    }

    /// The root of the tree containing `id`.
    #[must_use]
    pub fn root_of(&self, id: LayerId) -> Option<LayerId> {
        let mut current = id;
        self.get(current)?;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        Some(current)
    }

    /// `id` and all its descendants in pre-order.
    ///
    /// The result is materialized, so the tree may be mutated while walking it.
    #[must_use]
    pub fn descendant_layers(&self, id: LayerId) -> Vec<LayerId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(layer) = stack.pop() {
            out.push(layer);
            stack.extend(self.children(layer).iter().rev().copied());
        }
        out
    }

    /// Detaches `id` from its parent, returning the index it occupied.
    ///
    /// Returns `None` when `id` has no parent (or is stale). The parent's child
    /// list is searched by identity, so a sibling with identical contents is never
    /// removed by mistake.
    pub fn remove_from_parent(&mut self, id: LayerId) -> Option<usize> {
        let parent = self.get(id)?.parent?;
        let siblings = &mut self.get_mut(parent)?.children;
        let index = siblings.iter().position(|&c| c == id)?;
        siblings.remove(index);
        if let Some(node) = self.get_mut(id) {
            node.parent = None;
        }
        Some(index)
    }

    /// Moves `child` to position `index` among `parent`'s children.
    ///
    /// `child` is first detached from wherever it is, so `index` is measured in
    /// the child list *without* `child`. Everything is validated before anything
    /// changes; on error the tree is untouched.
    pub fn insert_child(
        &mut self,
        parent: LayerId,
        child: LayerId,
        index: usize,
    ) -> Result<(), TreeError> {
        self.node(parent)?;
        let current_parent = self.node(child)?.parent;
        if self.is_ancestor_or_self(child, parent) {
            return Err(TreeError::Cycle { parent, child });
        }

        let len = self.child_count(parent) - usize::from(current_parent == Some(parent));
        if index > len {
            return Err(TreeError::IndexOutOfBounds { index, len });
        }

        self.remove_from_parent(child);
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Moves `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: LayerId, child: LayerId) -> Result<(), TreeError> {
        let len = self.child_count(parent);
        let already_child = self.parent(child) == Some(parent);
        self.insert_child(parent, child, len - usize::from(already_child))
    }

    /// Destroys `id` and its whole subtree, detaching it first.
    ///
    /// Returns the number of layers freed.
    pub fn remove_layer(&mut self, id: LayerId) -> Result<usize, TreeError> {
        self.node(id)?;
        self.remove_from_parent(id);
        let doomed = self.descendant_layers(id);
        for layer in &doomed {
            let slot = &mut self.slots[layer.idx()];
            slot.node = None;
            self.free_list.push(layer.0);
        }
        Ok(doomed.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn view(tree: &mut LayerTree, name: &str) -> LayerId {
        tree.create_layer(name, LayerType::VIEW, ParameterStore::new())
    }

    #[test]
    fn insert_sets_both_directions_of_the_link() {
        let mut tree = LayerTree::new();
        let root = view(&mut tree, "root");
        let a = view(&mut tree, "a");
        let b = view(&mut tree, "b");

        tree.append_child(root, a).unwrap();
        tree.insert_child(root, b, 0).unwrap();

        assert_eq!(tree.children(root), &[b, a]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(b), Some(root));
        assert_eq!(tree.child_at(root, 1), Some(a));
        assert_eq!(tree.child_count(root), 2);
        assert_eq!(tree.roots(), vec![root]);
    }

    #[test]
    fn moving_detaches_from_previous_parent() {
        let mut tree = LayerTree::new();
        let first = view(&mut tree, "first");
        let second = view(&mut tree, "second");
        let child = view(&mut tree, "child");

        tree.append_child(first, child).unwrap();
        tree.append_child(second, child).unwrap();

        assert!(tree.children(first).is_empty());
        assert_eq!(tree.children(second), &[child]);
        assert_eq!(tree.parent(child), Some(second));
    }

    #[test]
    fn moving_within_the_same_parent() {
        let mut tree = LayerTree::new();
        let root = view(&mut tree, "root");
        let kids: Vec<_> = ["a", "b", "c"].iter().map(|n| view(&mut tree, n)).collect();
        for &kid in &kids {
            tree.append_child(root, kid).unwrap();
        }

        tree.insert_child(root, kids[0], 2).unwrap();
        assert_eq!(tree.children(root), &[kids[1], kids[2], kids[0]]);

        // Appending an existing last child is a no-op move.
        tree.append_child(root, kids[0]).unwrap();
        assert_eq!(tree.children(root), &[kids[1], kids[2], kids[0]]);

        let err = tree.insert_child(root, kids[0], 3).unwrap_err();
        assert_eq!(err, TreeError::IndexOutOfBounds { index: 3, len: 2 });
        assert_eq!(tree.children(root).len(), 3);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut tree = LayerTree::new();
        let root = view(&mut tree, "root");
        let mid = view(&mut tree, "mid");
        let leaf = view(&mut tree, "leaf");
        tree.append_child(root, mid).unwrap();
        tree.append_child(mid, leaf).unwrap();

        assert_eq!(
            tree.append_child(leaf, root),
            Err(TreeError::Cycle {
                parent: leaf,
                child: root
            })
        );
        assert!(matches!(
            tree.append_child(mid, mid),
            Err(TreeError::Cycle { .. })
        ));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(leaf), &[] as &[LayerId]);
    }

    #[test]
    fn remove_from_parent_reports_index_or_none() {
        let mut tree = LayerTree::new();
        let root = view(&mut tree, "root");
        let a = view(&mut tree, "a");
        let b = view(&mut tree, "b");
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();

        assert_eq!(tree.remove_from_parent(b), Some(1));
        assert_eq!(tree.remove_from_parent(b), None);
        assert_eq!(tree.remove_from_parent(root), None);
        assert_eq!(tree.children(root), &[a]);
    }

    #[test]
    fn identical_siblings_are_distinct() {
        let mut tree = LayerTree::new();
        let root = view(&mut tree, "root");
        let a = view(&mut tree, "same");
        let b = view(&mut tree, "same");
        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();

        assert_eq!(tree.remove_from_parent(b), Some(1));
        assert_eq!(tree.children(root), &[a]);
    }

    #[test]
    fn descendants_are_pre_order() {
        let mut tree = LayerTree::new();
        let root = view(&mut tree, "root");
        let a = view(&mut tree, "a");
        let a1 = view(&mut tree, "a1");
        let b = view(&mut tree, "b");
        tree.append_child(root, a).unwrap();
        tree.append_child(a, a1).unwrap();
        tree.append_child(root, b).unwrap();

        assert_eq!(tree.descendant_layers(root), vec![root, a, a1, b]);
        assert_eq!(tree.descendant_layers(a1), vec![a1]);
        assert_eq!(tree.root_of(a1), Some(root));
    }

    #[test]
    fn removed_layers_leave_stale_handles() {
        let mut tree = LayerTree::new();
        let root = view(&mut tree, "root");
        let a = view(&mut tree, "a");
        let a1 = view(&mut tree, "a1");
        tree.append_child(root, a).unwrap();
        tree.append_child(a, a1).unwrap();

        assert_eq!(tree.remove_layer(a), Ok(2));
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(a1));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.len(), 1);

        let reused = view(&mut tree, "reused");
        assert!(tree.is_alive(reused));
        assert_ne!(reused, a1);
        assert_eq!(tree.insert_child(root, a1, 0), Err(TreeError::StaleLayer(a1)));
    }

    #[test]
    fn construction_sizing_rules_are_consumed() {
        let mut tree = LayerTree::new();
        let text = tree.create_layer(
            "Text",
            LayerType::TEXT,
            [
                ("text", json!("Hello")),
                ("widthSizingRule", json!("Fixed")),
                ("heightSizingRule", json!("Expand")),
            ]
            .into_iter()
            .collect(),
        );
        let node = tree.get(text).unwrap();
        assert!(!node.parameters.contains("widthSizingRule"));
        assert!(!node.parameters.contains("heightSizingRule"));
        assert_eq!(node.width(), Some(0.0));
        assert_eq!(node.flex(), Some(1.0));
        assert_eq!(tree.width_sizing_rule(text), Some(SizingRule::Fixed));
        assert_eq!(tree.height_sizing_rule(text), Some(SizingRule::Expand));
    }

    #[test]
    fn create_with_children_parents_immediately() {
        let mut tree = LayerTree::new();
        let a = view(&mut tree, "a");
        let b = view(&mut tree, "b");
        let root = tree
            .create_layer_with_children("root", LayerType::VIEW, ParameterStore::new(), [a, b])
            .unwrap();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(b), Some(root));
    }
}
