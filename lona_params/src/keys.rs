// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parameter names understood by the layer model.
//!
//! These are the wire names used in the `params` record of a serialized layer.
//! The store accepts any other key as well; these are only the ones that the
//! layer model reads or writes itself.

// Box model

/// Explicit width. Absence means "unset", not zero.
pub const WIDTH: &str = "width";
/// Explicit height. Absence means "unset", not zero.
pub const HEIGHT: &str = "height";
/// Flex grow factor along the parent's main axis.
pub const FLEX: &str = "flex";
/// Fixed distance between consecutive children.
pub const ITEM_SPACING: &str = "itemSpacing";
/// Width to height ratio.
pub const ASPECT_RATIO: &str = "aspectRatio";
/// Top margin.
pub const MARGIN_TOP: &str = "marginTop";
/// Right margin.
pub const MARGIN_RIGHT: &str = "marginRight";
/// Bottom margin.
pub const MARGIN_BOTTOM: &str = "marginBottom";
/// Left margin.
pub const MARGIN_LEFT: &str = "marginLeft";
/// Top padding.
pub const PADDING_TOP: &str = "paddingTop";
/// Right padding.
pub const PADDING_RIGHT: &str = "paddingRight";
/// Bottom padding.
pub const PADDING_BOTTOM: &str = "paddingBottom";
/// Left padding.
pub const PADDING_LEFT: &str = "paddingLeft";

// Positioning

/// `relative` or `absolute`.
pub const POSITION: &str = "position";
/// Offset from the top edge.
pub const TOP: &str = "top";
/// Offset from the right edge.
pub const RIGHT: &str = "right";
/// Offset from the bottom edge.
pub const BOTTOM: &str = "bottom";
/// Offset from the left edge.
pub const LEFT: &str = "left";

// Flex container

/// Children layout axis, `row` or `column`.
pub const FLEX_DIRECTION: &str = "flexDirection";
/// Cross-axis alignment of children.
pub const ALIGN_ITEMS: &str = "alignItems";
/// Main-axis distribution of children.
pub const JUSTIFY_CONTENT: &str = "justifyContent";
/// Cross-axis alignment override for this layer.
pub const ALIGN_SELF: &str = "alignSelf";

// Color, border and shadow

/// Background color name or hex string.
pub const BACKGROUND_COLOR: &str = "backgroundColor";
/// Background gradient name.
pub const BACKGROUND_GRADIENT: &str = "backgroundGradient";
/// Corner radius.
pub const BORDER_RADIUS: &str = "borderRadius";
/// Border color name or hex string.
pub const BORDER_COLOR: &str = "borderColor";
/// Border stroke width.
pub const BORDER_WIDTH: &str = "borderWidth";
/// Shadow style name.
pub const SHADOW: &str = "shadow";

// Content

/// Whether the layer is rendered.
pub const VISIBLE: &str = "visible";
/// Text content.
pub const TEXT: &str = "text";
/// Text style name (current key).
pub const TEXT_STYLE: &str = "textStyle";
/// Text style name (legacy key).
pub const FONT: &str = "font";
/// Text alignment.
pub const TEXT_ALIGN: &str = "textAlign";
/// Maximum number of text lines.
pub const NUMBER_OF_LINES: &str = "numberOfLines";
/// Image or vector graphic URL.
pub const IMAGE: &str = "image";
/// How image content fills its frame.
pub const RESIZE_MODE: &str = "resizeMode";
/// Animation URL.
pub const ANIMATION: &str = "animation";
/// Animation playback speed.
pub const ANIMATION_SPEED: &str = "animationSpeed";

// Construction-only pseudo parameters

/// Width sizing rule requested at construction; consumed, never stored.
pub const WIDTH_SIZING_RULE: &str = "widthSizingRule";
/// Height sizing rule requested at construction; consumed, never stored.
pub const HEIGHT_SIZING_RULE: &str = "heightSizingRule";
