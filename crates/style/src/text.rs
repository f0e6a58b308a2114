use crate::font::FontSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
    Justify,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalAlign {
    #[default]
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

/// Everything the text layout needs to measure and place one run of characters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextOptions {
    pub font: FontSpec,
    /// Explicit line height. When unset the font's own line height is used.
    pub line_height: Option<f32>,
    /// Fixed extra spacing between words. A run with explicit spacing is left alone by justification.
    pub word_spacing: Option<f32>,
    pub char_spacing: Option<f32>,
    pub decoration: TextDecoration,
}

impl TextOptions {
    pub fn has_explicit_spacing(&self) -> bool {
        self.word_spacing.is_some() || self.char_spacing.is_some()
    }
}
