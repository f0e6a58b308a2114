//! List and heading numbering options.
use crate::text::TextAlign;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum NumberingStyle {
    #[default]
    Decimal,
    UpperRoman,
    LowerRoman,
    UpperAlpha,
    LowerAlpha,
    Bullet,
    /// Definition lists: each item supplies its own label text.
    Labels,
    None,
}

impl NumberingStyle {
    /// Counting styles are followed by a period unless the style says otherwise; bullets and
    /// labels stand alone.
    pub fn default_postfix(self) -> &'static str {
        match self {
            NumberingStyle::Bullet | NumberingStyle::Labels | NumberingStyle::None => "",
            _ => ".",
        }
    }
}

/// The resolved numbering configuration of a list, list item or heading.
#[derive(Debug, Clone, PartialEq)]
pub struct ListOptions {
    /// Named groups share their counter with every other list using the same name.
    pub group: Option<String>,
    pub style: NumberingStyle,
    pub prefix: String,
    pub postfix: String,
    /// Prefixes the label with the labels of the enclosing groups ("1.2.").
    pub concat: bool,
    pub start: u32,
    /// Width of the marker column. Falls back to the configured default inset.
    pub inset: Option<f32>,
    pub alignment: Option<TextAlign>,
    /// Gap between the marker column and the item content.
    pub alley: Option<f32>,
    /// Explicit marker text, used by definition-style items.
    pub label: Option<String>,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            group: None,
            style: NumberingStyle::Decimal,
            prefix: String::new(),
            postfix: ".".to_string(),
            concat: false,
            start: 1,
            inset: None,
            alignment: None,
            alley: None,
            label: None,
        }
    }
}
