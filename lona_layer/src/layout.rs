// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sizing rules and container direction, resolved against a layer's position in the tree.

use crate::sizing::{self, Axis, FlexDirection, SizingRule};
use crate::tree::{LayerId, LayerTree, TreeError};

impl LayerTree {
    /// Direction of the container that lays out `id`.
    ///
    /// Roots are treated as children of a column.
    #[must_use]
    pub fn parent_direction(&self, id: LayerId) -> FlexDirection {
        self.parent(id)
            .and_then(|parent| self.get(parent))
            .map_or(FlexDirection::Column, |parent| parent.flex_direction())
    }

    /// Sizing rule of `id` along `axis`.
    #[must_use]
    pub fn sizing_rule(&self, id: LayerId, axis: Axis) -> Option<SizingRule> {
        let node = self.get(id)?;
        Some(sizing::dimension_rule(
            &node.parameters,
            axis,
            self.parent_direction(id),
        ))
    }

    /// Sets the sizing rule of `id` along `axis`, clearing parameters the rule makes irrelevant.
    pub fn set_sizing_rule(
        &mut self,
        id: LayerId,
        axis: Axis,
        rule: SizingRule,
    ) -> Result<(), TreeError> {
        let direction = self.parent_direction(id);
        let node = self.node_mut(id)?;
        sizing::apply_dimension_rule(&mut node.parameters, axis, direction, rule);
        Ok(())
    }

    /// Width sizing rule of `id`.
    #[must_use]
    pub fn width_sizing_rule(&self, id: LayerId) -> Option<SizingRule> {
        self.sizing_rule(id, Axis::Horizontal)
    }

    /// Sets the width sizing rule of `id`.
    pub fn set_width_sizing_rule(&mut self, id: LayerId, rule: SizingRule) -> Result<(), TreeError> {
        self.set_sizing_rule(id, Axis::Horizontal, rule)
    }

    /// Height sizing rule of `id`.
    #[must_use]
    pub fn height_sizing_rule(&self, id: LayerId) -> Option<SizingRule> {
        self.sizing_rule(id, Axis::Vertical)
    }

    /// Sets the height sizing rule of `id`.
    pub fn set_height_sizing_rule(
        &mut self,
        id: LayerId,
        rule: SizingRule,
    ) -> Result<(), TreeError> {
        self.set_sizing_rule(id, Axis::Vertical, rule)
    }

    /// Changes the direction `id` lays out its children in, preserving intent.
    ///
    /// The raw parameters behind a sizing rule depend on the parent's direction,
    /// so flipping a container would otherwise silently change what its children
    /// do. This operation:
    ///
    /// 1. Captures every direct child's width and height rules, and this layer's
    ///    horizontal and vertical alignment and item spacing rule.
    /// 2. Writes `flexDirection`.
    /// 3. Reapplies the captured child rules, then the alignments. An expanding
    ///    item spacing is reapplied last, since alignment writes would otherwise
    ///    overwrite the `space-between` justification it lives in.
    pub fn set_flex_direction(
        &mut self,
        id: LayerId,
        direction: FlexDirection,
    ) -> Result<(), TreeError> {
        let node = self.node(id)?;
        let horizontal = node.horizontal_alignment();
        let vertical = node.vertical_alignment();
        let spacing = node.item_spacing_rule();
        let children = node.children().to_vec();
        let child_rules: Vec<_> = children
            .iter()
            .map(|&child| {
                (
                    self.width_sizing_rule(child),
                    self.height_sizing_rule(child),
                )
            })
            .collect();

        let node = self.node_mut(id)?;
        let previous = node.flex_direction();
        node.parameters
            .set_string(lona_params::keys::FLEX_DIRECTION, Some(direction.as_str()));
        tracing::debug!(
            layer = %node.name,
            from = %previous,
            to = %direction,
            children = children.len(),
            "rewriting sizing rules for direction change"
        );

        for (&child, (width, height)) in children.iter().zip(child_rules) {
            if let Some(rule) = width {
                self.set_width_sizing_rule(child, rule)?;
            }
            if let Some(rule) = height {
                self.set_height_sizing_rule(child, rule)?;
            }
        }

        let node = self.node_mut(id)?;
        node.set_horizontal_alignment(&horizontal);
        node.set_vertical_alignment(&vertical);
        if spacing == SizingRule::Expand {
            node.set_item_spacing_rule(SizingRule::Expand);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use lona_params::{ParameterStore, keys};
    use serde_json::json;

    use super::*;
    use crate::kind::LayerType;

    fn layer(tree: &mut LayerTree, pairs: &[(&str, serde_json::Value)]) -> LayerId {
        tree.create_layer("layer", LayerType::VIEW, pairs.iter().cloned().collect())
    }

    #[test]
    fn roots_read_as_inside_a_column() {
        let mut tree = LayerTree::new();
        let root = layer(&mut tree, &[(keys::FLEX, json!(1))]);
        assert_eq!(tree.parent_direction(root), FlexDirection::Column);
        assert_eq!(tree.height_sizing_rule(root), Some(SizingRule::Expand));
        assert_eq!(tree.width_sizing_rule(root), Some(SizingRule::Shrink));
    }

    #[test]
    fn rules_depend_on_parent_direction() {
        let mut tree = LayerTree::new();
        let row = layer(&mut tree, &[(keys::FLEX_DIRECTION, json!("row"))]);
        let child = layer(&mut tree, &[(keys::FLEX, json!(1))]);
        tree.append_child(row, child).unwrap();

        assert_eq!(tree.width_sizing_rule(child), Some(SizingRule::Expand));
        assert_eq!(tree.height_sizing_rule(child), Some(SizingRule::Shrink));
    }

    #[test]
    fn setters_use_parent_direction() {
        let mut tree = LayerTree::new();
        let row = layer(&mut tree, &[(keys::FLEX_DIRECTION, json!("row"))]);
        let child = layer(&mut tree, &[(keys::WIDTH, json!(20))]);
        tree.append_child(row, child).unwrap();

        tree.set_width_sizing_rule(child, SizingRule::Expand).unwrap();
        let params = &tree.get(child).unwrap().parameters;
        assert_eq!(params.number(keys::FLEX), Some(1.0));
        assert!(!params.contains(keys::WIDTH));

        tree.set_height_sizing_rule(child, SizingRule::Expand).unwrap();
        let params = &tree.get(child).unwrap().parameters;
        assert_eq!(params.string(keys::ALIGN_SELF), Some("stretch"));
    }

    #[test]
    fn flipping_direction_keeps_child_rules() {
        let mut tree = LayerTree::new();
        let parent = layer(&mut tree, &[]);
        let child = layer(&mut tree, &[]);
        tree.append_child(parent, child).unwrap();
        tree.set_width_sizing_rule(child, SizingRule::Expand).unwrap();
        tree.set_height_sizing_rule(child, SizingRule::Fixed).unwrap();
        tree.get_mut(child)
            .unwrap()
            .parameters
            .set_number(keys::HEIGHT, Some(44.0));

        tree.set_flex_direction(parent, FlexDirection::Row).unwrap();
        assert_eq!(tree.width_sizing_rule(child), Some(SizingRule::Expand));
        assert_eq!(tree.height_sizing_rule(child), Some(SizingRule::Fixed));
        let expected: ParameterStore = [(keys::FLEX, json!(1)), (keys::HEIGHT, json!(44))]
            .into_iter()
            .collect();
        assert_eq!(tree.get(child).unwrap().parameters, expected);
    }

    #[test]
    fn flipping_direction_keeps_own_alignment() {
        let mut tree = LayerTree::new();
        let container = layer(
            &mut tree,
            &[
                (keys::ALIGN_ITEMS, json!("center")),
                (keys::JUSTIFY_CONTENT, json!("flex-end")),
            ],
        );
        let node = tree.get(container).unwrap();
        assert_eq!(node.horizontal_alignment(), "center");
        assert_eq!(node.vertical_alignment(), "flex-end");

        tree.set_flex_direction(container, FlexDirection::Row).unwrap();
        let node = tree.get(container).unwrap();
        assert_eq!(node.horizontal_alignment(), "center");
        assert_eq!(node.vertical_alignment(), "flex-end");
        assert_eq!(node.parameters.string(keys::JUSTIFY_CONTENT), Some("center"));
        assert_eq!(node.parameters.string(keys::ALIGN_ITEMS), Some("flex-end"));
    }

    #[test]
    fn flipping_direction_keeps_expanding_spacing() {
        let mut tree = LayerTree::new();
        let container = layer(
            &mut tree,
            &[
                (keys::JUSTIFY_CONTENT, json!("space-between")),
                (keys::ALIGN_ITEMS, json!("center")),
            ],
        );
        tree.set_flex_direction(container, FlexDirection::Row).unwrap();
        let node = tree.get(container).unwrap();
        assert_eq!(node.item_spacing_rule(), SizingRule::Expand);
        assert_eq!(
            node.parameters.string(keys::JUSTIFY_CONTENT),
            Some("space-between")
        );
        // The column's vertical alignment was hidden by the distribution.
        assert_eq!(node.vertical_alignment(), "flex-start");
    }

    #[test]
    fn flipping_twice_restores_every_child_rule() {
        for width in SizingRule::ALL {
            for height in SizingRule::ALL {
                let mut tree = LayerTree::new();
                let parent = layer(&mut tree, &[]);
                let child = layer(&mut tree, &[]);
                tree.append_child(parent, child).unwrap();
                tree.set_width_sizing_rule(child, width).unwrap();
                tree.set_height_sizing_rule(child, height).unwrap();

                for direction in [FlexDirection::Row, FlexDirection::Column] {
                    tree.set_flex_direction(parent, direction).unwrap();
                    assert_eq!(tree.width_sizing_rule(child), Some(width));
                    assert_eq!(tree.height_sizing_rule(child), Some(height));
                }
            }
        }
    }

    #[test]
    fn siblings_keep_their_own_rules_through_flips() {
        let mut tree = LayerTree::new();
        let parent = layer(&mut tree, &[]);
        let rules = [
            (SizingRule::Expand, SizingRule::Shrink, 0.0),
            (SizingRule::Fixed, SizingRule::Expand, 10.0),
            (SizingRule::Shrink, SizingRule::Fixed, 20.0),
            (SizingRule::Expand, SizingRule::Expand, 0.0),
            (SizingRule::Fixed, SizingRule::Fixed, 40.0),
        ];
        let children: Vec<_> = rules
            .into_iter()
            .map(|(width, height, side)| {
                let child = layer(&mut tree, &[]);
                tree.append_child(parent, child).unwrap();
                tree.set_width_sizing_rule(child, width).unwrap();
                tree.set_height_sizing_rule(child, height).unwrap();
                let node = tree.get_mut(child).unwrap();
                if width == SizingRule::Fixed {
                    node.parameters.set_number(keys::WIDTH, Some(side));
                }
                if height == SizingRule::Fixed {
                    node.parameters.set_number(keys::HEIGHT, Some(side));
                }
                (child, width, height, side)
            })
            .collect();

        for direction in [FlexDirection::Row, FlexDirection::Column, FlexDirection::Row] {
            tree.set_flex_direction(parent, direction).unwrap();
            for &(child, width, height, side) in &children {
                assert_eq!(tree.width_sizing_rule(child), Some(width), "{direction}");
                assert_eq!(tree.height_sizing_rule(child), Some(height), "{direction}");
                let node = tree.get(child).unwrap();
                if width == SizingRule::Fixed {
                    assert_eq!(node.width(), Some(side));
                }
                if height == SizingRule::Fixed {
                    assert_eq!(node.height(), Some(side));
                }
            }
        }
    }

    #[test]
    fn stale_handles() {
        let mut tree = LayerTree::new();
        let gone = layer(&mut tree, &[]);
        tree.remove_layer(gone).unwrap();
        assert_eq!(tree.width_sizing_rule(gone), None);
        assert_eq!(
            tree.set_flex_direction(gone, FlexDirection::Row),
            Err(TreeError::StaleLayer(gone))
        );
    }
}
