//! The resolved style of a single component.

use crate::columns::{ColumnOptions, ColumnWidths};
use crate::dimension::Dimension;
use crate::font::{FontSpec, FontStyle, FontWeight};
use crate::list::{ListOptions, NumberingStyle};
use crate::parsers::{deserialize_dimension, deserialize_length, deserialize_thickness};
use crate::position::{FloatMode, OverflowSplit, PositionMode, PositionOptions};
use crate::text::{TextAlign, TextDecoration, TextOptions, VerticalAlign};
use folio_types::Thickness;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Default, Clone, PartialEq, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementStyle {
    // Font & Text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<VerticalAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_spacing: Option<f32>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_spacing: Option<f32>,

    // Box Model
    #[serde(deserialize_with = "deserialize_thickness")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Thickness>,
    #[serde(deserialize_with = "deserialize_thickness")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<Thickness>,
    #[serde(deserialize_with = "deserialize_thickness")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<Thickness>,
    #[serde(deserialize_with = "deserialize_dimension")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Dimension>,
    #[serde(deserialize_with = "deserialize_dimension")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<Dimension>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_width: Option<f32>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_height: Option<f32>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f32>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_width: Option<bool>,

    // Positioning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionMode>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f32>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub float: Option<FloatMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overflow_split: Option<OverflowSplit>,

    // Columns
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_widths: Option<ColumnWidths>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_flow: Option<bool>,

    // Numbering
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering_style: Option<NumberingStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numbering_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_postfix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_concat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_start: Option<u32>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_inset: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_alignment: Option<TextAlign>,
    #[serde(deserialize_with = "deserialize_length")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_alley: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_label: Option<String>,
}

impl ElementStyle {
    pub fn position_mode(&self) -> PositionMode {
        self.position.unwrap_or_default()
    }

    pub fn is_visible(&self) -> bool {
        self.position_mode() != PositionMode::Invisible
    }

    /// Resolves the positioning and box-model options, applying defaults for anything unset.
    pub fn position_options(&self) -> PositionOptions {
        PositionOptions {
            mode: self.position_mode(),
            float_mode: self.float.unwrap_or_default(),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            min_width: self.min_width,
            min_height: self.min_height,
            max_width: self.max_width,
            max_height: self.max_height,
            fill_width: self.fill_width.unwrap_or(false),
            margins: self.margin.unwrap_or_default(),
            padding: self.padding.unwrap_or_default(),
            border: self.border_width.unwrap_or_default(),
            h_align: self.text_align.unwrap_or_default(),
            v_align: self.vertical_align.unwrap_or_default(),
            overflow_split: self.overflow_split.unwrap_or_default(),
        }
    }

    pub fn column_options(&self) -> ColumnOptions {
        let defaults = ColumnOptions::default();
        ColumnOptions {
            count: self.column_count.unwrap_or(defaults.count),
            alley: self.column_gap.unwrap_or(defaults.alley),
            widths: self.column_widths.clone().unwrap_or_default(),
            auto_flow: self.column_flow.unwrap_or(defaults.auto_flow),
        }
    }

    /// Resolves the text options, falling back to `default_font` for unset font properties.
    pub fn text_options(&self, default_font: &FontSpec) -> TextOptions {
        TextOptions {
            font: FontSpec {
                family: self
                    .font_family
                    .clone()
                    .unwrap_or_else(|| default_font.family.clone()),
                size: self.font_size.unwrap_or(default_font.size),
                weight: self.font_weight.unwrap_or(default_font.weight),
                style: self.font_style.unwrap_or(default_font.style),
            },
            line_height: self.line_height,
            word_spacing: self.word_spacing,
            char_spacing: self.char_spacing,
            decoration: self.text_decoration.unwrap_or_default(),
        }
    }

    pub fn list_options(&self) -> ListOptions {
        let defaults = ListOptions::default();
        let style = self.numbering_style.unwrap_or(defaults.style);
        ListOptions {
            group: self.numbering_group.clone(),
            style,
            prefix: self.number_prefix.clone().unwrap_or(defaults.prefix),
            postfix: self
                .number_postfix
                .clone()
                .unwrap_or_else(|| style.default_postfix().to_string()),
            concat: self.number_concat.unwrap_or(defaults.concat),
            start: self.number_start.unwrap_or(defaults.start),
            inset: self.number_inset,
            alignment: self.number_alignment,
            alley: self.number_alley,
            label: self.number_label.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_shorthand_values() {
        let style: ElementStyle = serde_json::from_str(
            r#"{
                "padding": "10pt",
                "borderWidth": 1,
                "width": "300pt",
                "position": "relative",
                "x": "1in",
                "columnCount": 2,
                "numberingStyle": "upper-roman"
            }"#,
        )
        .unwrap();

        let pos = style.position_options();
        assert_eq!(pos.mode, PositionMode::Relative);
        assert_eq!(pos.padding, Thickness::uniform(10.0));
        assert_eq!(pos.border, Thickness::uniform(1.0));
        assert_eq!(pos.width, Some(Dimension::Pt(300.0)));
        assert_eq!(pos.x, Some(72.0));
        assert_eq!(style.column_options().count, 2);
        assert_eq!(style.list_options().style, NumberingStyle::UpperRoman);
    }

    #[test]
    fn defaults_when_unset() {
        let style = ElementStyle::default();
        let pos = style.position_options();
        assert_eq!(pos.mode, PositionMode::Block);
        assert_eq!(pos.overflow_split, OverflowSplit::Any);
        assert!(style.is_visible());

        let list = style.list_options();
        assert_eq!(list.style, NumberingStyle::Decimal);
        assert_eq!(list.postfix, ".");
        assert_eq!(list.start, 1);

        let text = style.text_options(&FontSpec::new("Courier", 10.0));
        assert_eq!(text.font.family, "Courier");
        assert_eq!(text.font.size, 10.0);
        assert!(!text.has_explicit_spacing());
    }

    #[test]
    fn bullets_have_no_default_postfix() {
        let style = ElementStyle {
            numbering_style: Some(NumberingStyle::Bullet),
            ..Default::default()
        };
        assert_eq!(style.list_options().postfix, "");

        let explicit = ElementStyle {
            numbering_style: Some(NumberingStyle::Bullet),
            number_postfix: Some(")".to_string()),
            ..Default::default()
        };
        assert_eq!(explicit.list_options().postfix, ")");
    }
}
