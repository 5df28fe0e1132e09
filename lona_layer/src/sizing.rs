// Copyright 2025 the Lona Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sizing rules: an abstract view over flex parameters.
//!
//! Editors show a layer's width and height as one of three rules:
//!
//! - [`SizingRule::Expand`]: fill the space the parent offers.
//! - [`SizingRule::Shrink`]: hug the content.
//! - [`SizingRule::Fixed`]: use an explicit dimension.
//!
//! Which raw parameters encode a rule depends on the *parent's* flex direction.
//! Along the parent's main axis, expansion is `flex = 1`; along its cross axis it
//! is `alignSelf = "stretch"`. The functions here translate both ways for a single
//! [`ParameterStore`], given the direction of the layer's parent. They never store
//! anything beyond the parameters they touch.
//!
//! Item spacing has its own rule, independent of axis: a fixed `itemSpacing`,
//! `justifyContent = "space-between"` for expansion, or neither.

use core::fmt;
use core::str::FromStr;

use lona_params::{ParameterStore, ParseEnumError, keys};
use serde::{Deserialize, Serialize};

const STRETCH: &str = "stretch";
const SPACE_BETWEEN: &str = "space-between";
const FLEX_START: &str = "flex-start";

/// How a dimension or the spacing between children is determined.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizingRule {
    /// Fill the available space.
    Expand,
    /// Fit the content.
    Shrink,
    /// Use an explicit value.
    Fixed,
}

impl SizingRule {
    /// Every rule, in declaration order.
    pub const ALL: [Self; 3] = [Self::Expand, Self::Shrink, Self::Fixed];

    /// Returns the name used in construction parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Expand => "Expand",
            Self::Shrink => "Shrink",
            Self::Fixed => "Fixed",
        }
    }
}

impl FromStr for SizingRule {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("sizing rule", s))
    }
}

impl fmt::Display for SizingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The axis along which a container lays out its children.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    /// Children flow left to right.
    Row,
    /// Children flow top to bottom.
    #[default]
    Column,
}

impl FlexDirection {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::Column => "column",
        }
    }

    /// Reads the direction stored in `params`.
    ///
    /// Only `"row"` selects [`FlexDirection::Row`]; absence and any other value
    /// read as the default, [`FlexDirection::Column`].
    #[must_use]
    pub fn of(params: &ParameterStore) -> Self {
        if params.string(keys::FLEX_DIRECTION) == Some("row") {
            Self::Row
        } else {
            Self::Column
        }
    }

    /// The axis children are distributed along.
    #[must_use]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Row => Axis::Horizontal,
            Self::Column => Axis::Vertical,
        }
    }

    /// The other direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Row => Self::Column,
            Self::Column => Self::Row,
        }
    }
}

impl FromStr for FlexDirection {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "row" => Ok(Self::Row),
            "column" => Ok(Self::Column),
            _ => Err(ParseEnumError::new("flex direction", s)),
        }
    }
}

impl fmt::Display for FlexDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A layer dimension.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Width.
    Horizontal,
    /// Height.
    Vertical,
}

impl Axis {
    /// The parameter holding this axis' explicit dimension.
    #[must_use]
    pub const fn dimension_key(self) -> &'static str {
        match self {
            Self::Horizontal => keys::WIDTH,
            Self::Vertical => keys::HEIGHT,
        }
    }
}

/// Derives the sizing rule for `axis` of a layer whose parent lays out in `parent`.
///
/// Roots have no parent and are read as if inside a column.
#[must_use]
pub fn dimension_rule(params: &ParameterStore, axis: Axis, parent: FlexDirection) -> SizingRule {
    let has_dimension = params.number(axis.dimension_key()).is_some();
    let expands = if axis == parent.main_axis() {
        params.number(keys::FLEX) == Some(1.0)
    } else {
        params.string(keys::ALIGN_SELF) == Some(STRETCH)
    };

    if expands {
        SizingRule::Expand
    } else if has_dimension {
        SizingRule::Fixed
    } else {
        SizingRule::Shrink
    }
}

/// Rewrites `params` so that [`dimension_rule`] reports `rule`.
///
/// | rule     | main axis                          | cross axis                              |
/// |----------|------------------------------------|-----------------------------------------|
/// | `Expand` | `flex = 1`, dimension removed      | `alignSelf = "stretch"`, dimension removed |
/// | `Shrink` | `flex` and dimension removed       | `alignSelf` and dimension removed       |
/// | `Fixed`  | `flex` removed, dimension kept or 0 | `alignSelf` removed, dimension kept or 0 |
pub fn apply_dimension_rule(
    params: &mut ParameterStore,
    axis: Axis,
    parent: FlexDirection,
    rule: SizingRule,
) {
    let dimension = axis.dimension_key();
    let on_main_axis = axis == parent.main_axis();
    let expander = if on_main_axis {
        keys::FLEX
    } else {
        keys::ALIGN_SELF
    };

    match rule {
        SizingRule::Expand => {
            if on_main_axis {
                params.set_number(keys::FLEX, Some(1.0));
            } else {
                params.set_string(keys::ALIGN_SELF, Some(STRETCH));
            }
            params.remove(dimension);
        }
        SizingRule::Shrink => {
            params.remove(expander);
            params.remove(dimension);
        }
        SizingRule::Fixed => {
            params.remove(expander);
            let current = params.number(dimension).unwrap_or(0.0);
            params.set_number(dimension, Some(current));
        }
    }
}

/// Derives the rule for the spacing between a container's children.
#[must_use]
pub fn item_spacing_rule(params: &ParameterStore) -> SizingRule {
    if params.number(keys::ITEM_SPACING).is_some() {
        SizingRule::Fixed
    } else if params.string(keys::JUSTIFY_CONTENT) == Some(SPACE_BETWEEN) {
        SizingRule::Expand
    } else {
        SizingRule::Shrink
    }
}

/// Rewrites `params` so that [`item_spacing_rule`] reports `rule`.
///
/// - `Fixed`: `itemSpacing = 0`; a `"space-between"` justification becomes `"flex-start"`.
/// - `Expand`: `itemSpacing` removed, `justifyContent = "space-between"`.
/// - `Shrink`: `itemSpacing` removed, `justifyContent = "flex-start"`.
pub fn apply_item_spacing_rule(params: &mut ParameterStore, rule: SizingRule) {
    match rule {
        SizingRule::Fixed => {
            params.set_number(keys::ITEM_SPACING, Some(0.0));
            if params.string(keys::JUSTIFY_CONTENT) == Some(SPACE_BETWEEN) {
                params.set_string(keys::JUSTIFY_CONTENT, Some(FLEX_START));
            }
        }
        SizingRule::Shrink => {
            params.remove(keys::ITEM_SPACING);
            params.set_string(keys::JUSTIFY_CONTENT, Some(FLEX_START));
        }
        SizingRule::Expand => {
            params.remove(keys::ITEM_SPACING);
            params.set_string(keys::JUSTIFY_CONTENT, Some(SPACE_BETWEEN));
        }
    }
}

/// Which parameter carries alignment along `axis` of a container.
///
/// Main-axis alignment is `justifyContent`, cross-axis alignment is `alignItems`.
fn alignment_key(params: &ParameterStore, axis: Axis) -> &'static str {
    if axis == FlexDirection::of(params).main_axis() {
        keys::JUSTIFY_CONTENT
    } else {
        keys::ALIGN_ITEMS
    }
}

/// Reads how a container aligns its children along `axis`.
///
/// When item spacing expands, the main axis' `justifyContent` is spent on
/// distribution, so that axis reports `"flex-start"`.
#[must_use]
pub fn alignment(params: &ParameterStore, axis: Axis) -> String {
    let key = alignment_key(params, axis);
    if key == keys::JUSTIFY_CONTENT && item_spacing_rule(params) == SizingRule::Expand {
        return FLEX_START.to_owned();
    }
    params.string(key).unwrap_or(FLEX_START).to_owned()
}

/// Writes how a container aligns its children along `axis`.
pub fn set_alignment(params: &mut ParameterStore, axis: Axis, value: &str) {
    let key = alignment_key(params, axis);
    params.set_string(key, Some(value));
}
