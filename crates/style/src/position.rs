//! Positioning and box-model options resolved from an element's style.
use crate::dimension::Dimension;
use crate::text::{TextAlign, VerticalAlign};
use folio_types::Thickness;
use serde::{Deserialize, Serialize};

/// How a component takes part in the flow of its container.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PositionMode {
    #[default]
    Block,
    Inline,
    /// Offset from where it would sit in the flow, without taking up flow space.
    Relative,
    /// Placed against the page, independent of the flow.
    Absolute,
    /// Not laid out at all.
    Invisible,
}

impl PositionMode {
    pub fn is_positioned(self) -> bool {
        matches!(self, PositionMode::Relative | PositionMode::Absolute)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FloatMode {
    #[default]
    None,
    Left,
    Right,
}

/// Whether a block may be split across regions and pages.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OverflowSplit {
    /// The block moves as a whole, or not at all.
    Never,
    /// The block may break between its child components but not inside them.
    Component,
    #[default]
    Any,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PositionOptions {
    pub mode: PositionMode,
    pub float_mode: FloatMode,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<f32>,
    pub min_height: Option<f32>,
    pub max_width: Option<f32>,
    pub max_height: Option<f32>,
    /// Take the full available width instead of shrinking to the content.
    pub fill_width: bool,
    pub margins: Thickness,
    pub padding: Thickness,
    pub border: Thickness,
    pub h_align: TextAlign,
    pub v_align: VerticalAlign,
    pub overflow_split: OverflowSplit,
}

impl PositionOptions {
    /// Border plus padding: the distance from the border edge to the content edge.
    pub fn inner_insets(&self) -> Thickness {
        self.border + self.padding
    }

    /// Margins, border and padding together.
    pub fn insets(&self) -> Thickness {
        self.margins + self.border + self.padding
    }

    pub fn explicit_width(&self, available: f32) -> Option<f32> {
        self.width.and_then(|w| w.resolve(available))
    }

    pub fn explicit_height(&self, available: f32) -> Option<f32> {
        self.height.and_then(|h| h.resolve(available))
    }

    /// True when the height can not grow with the content, either because it is explicit or capped.
    pub fn has_fixed_height(&self) -> bool {
        self.height.is_some_and(|h| !h.is_auto()) || self.max_height.is_some()
    }

    pub fn is_float(&self) -> bool {
        self.float_mode != FloatMode::None
    }
}
