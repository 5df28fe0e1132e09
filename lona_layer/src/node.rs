// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-layer data stored in a [`LayerTree`](crate::LayerTree).

use kurbo::Insets;
use lona_params::{Map, ParameterStore, PositionType, ResizeMode, Value, keys};

use crate::kind::{LayerRole, LayerType};
use crate::sizing::{self, FlexDirection, SizingRule};
use crate::tree::LayerId;

/// Generates a getter and an `Option` setter for plain number or string parameters.
macro_rules! parameter_accessors {
    (@out number) => { f64 };
    (@out string) => { &str };
    (@in number) => { f64 };
    (@in string) => { &str };
    (@write $self:ident, number, $key:expr, $value:ident) => {
        $self.parameters.set_number($key, $value)
    };
    (@write $self:ident, string, $key:expr, $value:ident) => {
        $self.parameters.set_string($key, $value)
    };
    ($($(#[$doc:meta])* $get:ident, $set:ident: $kind:ident => $key:expr;)*) => {
        $(
            $(#[$doc])*
            #[must_use]
            pub fn $get(&self) -> Option<parameter_accessors!(@out $kind)> {
                self.parameters.$kind($key)
            }

            #[doc = concat!("Writes [`", stringify!($get), "`](Self::", stringify!($get), "); `None` removes it.")]
            pub fn $set(&mut self, value: Option<parameter_accessors!(@in $kind)>) {
                parameter_accessors!(@write self, $kind, $key, value);
            }
        )*
    };
}

/// One visual element of a component.
///
/// Topology (`parent`, `children`) is owned by the tree and only readable here;
/// use the [`LayerTree`](crate::LayerTree) operations to restructure. Everything
/// else is plain data.
///
/// Accessors on this type read parameters that do not depend on where the layer
/// sits. Sizing rules do, so they live on the tree.
#[derive(Clone, Debug)]
pub struct LayerNode {
    /// Identifier, unique among siblings. Also the lookup key for dynamic configuration.
    pub name: String,
    /// Raw style and content attributes.
    pub parameters: ParameterStore,
    /// Opaque data carried through load and save untouched.
    pub metadata: Map<String, Value>,
    pub(crate) layer_type: LayerType,
    pub(crate) role: LayerRole,
    pub(crate) parent: Option<LayerId>,
    pub(crate) children: Vec<LayerId>,
}

impl LayerNode {
    pub(crate) fn new(name: String, layer_type: LayerType, parameters: ParameterStore) -> Self {
        Self {
            name,
            parameters,
            metadata: Map::new(),
            role: LayerRole::for_type(&layer_type),
            layer_type,
            parent: None,
            children: Vec::new(),
        }
    }

    /// The layer's type.
    #[must_use]
    pub fn layer_type(&self) -> &LayerType {
        &self.layer_type
    }

    /// Whether this layer is content, a children slot, or a component reference.
    #[must_use]
    pub fn role(&self) -> LayerRole {
        self.role
    }

    /// The parent layer, or `None` for a root.
    #[must_use]
    pub fn parent(&self) -> Option<LayerId> {
        self.parent
    }

    /// Child layers in render order.
    #[must_use]
    pub fn children(&self) -> &[LayerId] {
        &self.children
    }

    // =========================================================================
    // Content
    // =========================================================================

    /// Whether the layer is rendered. Defaults to `true`.
    #[must_use]
    pub fn visible(&self) -> bool {
        self.parameters.bool(keys::VISIBLE).unwrap_or(true)
    }

    /// Sets the stored visibility flag.
    pub fn set_visible(&mut self, visible: bool) {
        self.parameters.set_bool(keys::VISIBLE, Some(visible));
    }

    parameter_accessors! {
        /// Text content.
        text, set_text: string => keys::TEXT;
        /// Text alignment, such as `left` or `center`.
        text_align, set_text_align: string => keys::TEXT_ALIGN;
        /// Image or vector graphic URL.
        image, set_image: string => keys::IMAGE;
        /// Animation URL.
        animation, set_animation: string => keys::ANIMATION;
        /// Animation playback speed.
        animation_speed, set_animation_speed: number => keys::ANIMATION_SPEED;
        /// Background color name or hex string.
        background_color, set_background_color: string => keys::BACKGROUND_COLOR;
        /// Background gradient name.
        background_gradient, set_background_gradient: string => keys::BACKGROUND_GRADIENT;
        /// Border stroke width.
        border_width, set_border_width: number => keys::BORDER_WIDTH;
        /// Corner radius.
        border_radius, set_border_radius: number => keys::BORDER_RADIUS;
        /// Border color name or hex string.
        border_color, set_border_color: string => keys::BORDER_COLOR;
        /// Shadow style name.
        shadow, set_shadow: string => keys::SHADOW;
    }

    /// Text style name. `textStyle` takes precedence over the older `font` key.
    #[must_use]
    pub fn text_style(&self) -> Option<&str> {
        self.parameters
            .string(keys::TEXT_STYLE)
            .or_else(|| self.parameters.string(keys::FONT))
    }

    /// Writes the text style name under `font`.
    pub fn set_text_style(&mut self, style: Option<&str>) {
        self.parameters.set_string(keys::FONT, style);
    }

    /// Maximum number of text lines. Fractional values truncate.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        reason = "line counts are small; fractions truncate"
    )]
    pub fn number_of_lines(&self) -> Option<i64> {
        let value = self.parameters.get(keys::NUMBER_OF_LINES)?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|n| n as i64))
    }

    /// Sets or clears the line limit.
    pub fn set_number_of_lines(&mut self, lines: Option<i64>) {
        match lines {
            Some(lines) => {
                self.parameters.set(keys::NUMBER_OF_LINES, Value::from(lines));
            }
            None => {
                self.parameters.remove(keys::NUMBER_OF_LINES);
            }
        }
    }

    /// How image content fills the frame. Unknown values read as `None`.
    #[must_use]
    pub fn resize_mode(&self) -> Option<ResizeMode> {
        self.parameters.string(keys::RESIZE_MODE)?.parse().ok()
    }

    /// Sets or clears the resize mode.
    pub fn set_resize_mode(&mut self, mode: Option<ResizeMode>) {
        self.parameters
            .set_string(keys::RESIZE_MODE, mode.map(ResizeMode::as_str));
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Positioning scheme. Unknown values read as `None`.
    #[must_use]
    pub fn position(&self) -> Option<PositionType> {
        self.parameters.string(keys::POSITION)?.parse().ok()
    }

    /// Sets or clears the positioning scheme.
    pub fn set_position(&mut self, position: Option<PositionType>) {
        self.parameters
            .set_string(keys::POSITION, position.map(PositionType::as_str));
    }

    parameter_accessors! {
        /// Offset from the top edge.
        top, set_top: number => keys::TOP;
        /// Offset from the right edge.
        right, set_right: number => keys::RIGHT;
        /// Offset from the bottom edge.
        bottom, set_bottom: number => keys::BOTTOM;
        /// Offset from the left edge.
        left, set_left: number => keys::LEFT;
        /// Explicit width.
        width, set_width: number => keys::WIDTH;
        /// Explicit height.
        height, set_height: number => keys::HEIGHT;
        /// Width to height ratio.
        aspect_ratio, set_aspect_ratio: number => keys::ASPECT_RATIO;
        /// Flex grow factor.
        flex, set_flex: number => keys::FLEX;
        /// Fixed spacing between children.
        item_spacing, set_item_spacing: number => keys::ITEM_SPACING;
        /// Raw cross-axis alignment of children.
        ///
        /// Prefer [`horizontal_alignment`](Self::horizontal_alignment) and
        /// [`vertical_alignment`](Self::vertical_alignment), which account for direction.
        align_items, set_align_items: string => keys::ALIGN_ITEMS;
        /// Raw main-axis distribution of children.
        justify_content, set_justify_content: string => keys::JUSTIFY_CONTENT;
        /// Raw cross-axis alignment of this layer within its parent.
        align_self, set_align_self: string => keys::ALIGN_SELF;
    }

    /// Margins, with missing sides as zero.
    #[must_use]
    pub fn margin(&self) -> Insets {
        self.parameters.margin()
    }

    /// Padding, with missing sides as zero.
    #[must_use]
    pub fn padding(&self) -> Insets {
        self.parameters.padding()
    }

    /// Direction this layer lays out its children in.
    #[must_use]
    pub fn flex_direction(&self) -> FlexDirection {
        FlexDirection::of(&self.parameters)
    }

    /// Rule for the spacing between this layer's children.
    #[must_use]
    pub fn item_spacing_rule(&self) -> SizingRule {
        sizing::item_spacing_rule(&self.parameters)
    }

    /// Sets the spacing rule; see [`sizing::apply_item_spacing_rule`].
    pub fn set_item_spacing_rule(&mut self, rule: SizingRule) {
        sizing::apply_item_spacing_rule(&mut self.parameters, rule);
    }

    /// How children are aligned horizontally.
    #[must_use]
    pub fn horizontal_alignment(&self) -> String {
        sizing::alignment(&self.parameters, sizing::Axis::Horizontal)
    }

    /// Sets horizontal alignment through whichever key the direction maps it to.
    pub fn set_horizontal_alignment(&mut self, value: &str) {
        sizing::set_alignment(&mut self.parameters, sizing::Axis::Horizontal, value);
    }

    /// How children are aligned vertically.
    #[must_use]
    pub fn vertical_alignment(&self) -> String {
        sizing::alignment(&self.parameters, sizing::Axis::Vertical)
    }

    /// Sets vertical alignment through whichever key the direction maps it to.
    pub fn set_vertical_alignment(&mut self, value: &str) {
        sizing::set_alignment(&mut self.parameters, sizing::Axis::Vertical, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(pairs: &[(&str, Value)]) -> LayerNode {
        LayerNode::new(
            "Layer".into(),
            LayerType::VIEW,
            pairs.iter().cloned().collect(),
        )
    }

    #[test]
    fn visible_defaults_to_true() {
        let mut n = node(&[]);
        assert!(n.visible());
        n.set_visible(false);
        assert!(!n.visible());
        assert_eq!(n.parameters.get(keys::VISIBLE), Some(&json!(false)));
    }

    #[test]
    fn text_style_prefers_current_key() {
        let mut n = node(&[(keys::FONT, json!("legacy"))]);
        assert_eq!(n.text_style(), Some("legacy"));
        n.parameters.set(keys::TEXT_STYLE, json!("body"));
        assert_eq!(n.text_style(), Some("body"));
        n.set_text_style(None);
        assert_eq!(n.parameters.get(keys::FONT), None);
    }

    #[test]
    fn enumerated_parameters() {
        let n = node(&[
            (keys::RESIZE_MODE, json!("cover")),
            (keys::POSITION, json!("sideways")),
            (keys::NUMBER_OF_LINES, json!(2.0)),
        ]);
        assert_eq!(n.resize_mode(), Some(ResizeMode::Cover));
        assert_eq!(n.position(), None);
        assert_eq!(n.number_of_lines(), Some(2));
    }

    #[test]
    fn positional_offsets() {
        let mut n = node(&[(keys::POSITION, json!("absolute")), (keys::TOP, json!(4))]);
        assert_eq!(n.position(), Some(PositionType::Absolute));
        assert_eq!(n.top(), Some(4.0));
        assert_eq!(n.left(), None);

        n.set_left(Some(12.5));
        n.set_right(Some(0.0));
        n.set_bottom(Some(8.0));
        n.set_top(None);
        assert_eq!(n.parameters.get(keys::LEFT), Some(&json!(12.5)));
        assert_eq!(n.parameters.get(keys::RIGHT), Some(&json!(0)));
        assert_eq!((n.right(), n.bottom(), n.top()), (Some(0.0), Some(8.0), None));

        n.set_position(Some(PositionType::Relative));
        assert_eq!(n.parameters.string(keys::POSITION), Some("relative"));
        n.set_position(None);
        assert_eq!(n.position(), None);
    }

    #[test]
    fn border_and_fill() {
        let mut n = node(&[(keys::BORDER_WIDTH, json!(1)), (keys::BORDER_COLOR, json!("red"))]);
        assert_eq!(n.border_width(), Some(1.0));
        assert_eq!(n.border_color(), Some("red"));
        assert_eq!(n.border_radius(), None);

        n.set_border_radius(Some(6.0));
        n.set_border_color(None);
        n.set_background_gradient(Some("sunset"));
        n.set_shadow(Some("elevation1"));
        assert_eq!(n.parameters.get(keys::BORDER_RADIUS), Some(&json!(6)));
        assert_eq!(n.border_color(), None);
        assert_eq!(n.background_gradient(), Some("sunset"));
        assert_eq!(n.background_color(), None);
        assert_eq!(n.shadow(), Some("elevation1"));
    }

    #[test]
    fn content_setters() {
        let mut n = node(&[]);
        n.set_text(Some("Hello"));
        n.set_text_align(Some("center"));
        n.set_number_of_lines(Some(3));
        n.set_resize_mode(Some(ResizeMode::Stretch));
        n.set_aspect_ratio(Some(1.5));
        assert_eq!(n.text(), Some("Hello"));
        assert_eq!(n.text_align(), Some("center"));
        assert_eq!(n.number_of_lines(), Some(3));
        assert_eq!(n.parameters.string(keys::RESIZE_MODE), Some("stretch"));
        assert_eq!(n.aspect_ratio(), Some(1.5));

        n.set_number_of_lines(None);
        n.set_resize_mode(None);
        assert_eq!(n.number_of_lines(), None);
        assert_eq!(n.resize_mode(), None);
    }

    #[test]
    fn raw_flex_keys_bypass_direction() {
        let mut n = node(&[(keys::FLEX_DIRECTION, json!("row"))]);
        n.set_align_items(Some("center"));
        n.set_justify_content(Some("flex-end"));
        n.set_align_self(Some("stretch"));
        assert_eq!(n.align_items(), Some("center"));
        assert_eq!(n.vertical_alignment(), "center");
        assert_eq!(n.horizontal_alignment(), "flex-end");
        assert_eq!(n.align_self(), Some("stretch"));
        assert_eq!(n.margin(), Insets::uniform(0.0));
    }

    #[test]
    fn alignment_accessors() {
        let mut n = node(&[(keys::FLEX_DIRECTION, json!("row"))]);
        n.set_vertical_alignment("center");
        assert_eq!(n.parameters.string(keys::ALIGN_ITEMS), Some("center"));
        assert_eq!(n.vertical_alignment(), "center");
        assert_eq!(n.horizontal_alignment(), "flex-start");
        n.set_item_spacing_rule(SizingRule::Expand);
        n.set_horizontal_alignment("flex-end");
        // Writing main-axis alignment in a row replaces the distribution.
        assert_eq!(n.item_spacing_rule(), SizingRule::Shrink);
        assert_eq!(n.horizontal_alignment(), "flex-end");
    }
}
