//! Page geometry handed to the layout engine whenever it starts a new page.
use crate::columns::ColumnOptions;
use crate::parsers::{deserialize_thickness, parse_page_size};
use folio_types::{Size, Thickness};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PageSize {
    #[default]
    A4,
    A5,
    Letter,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    pub fn dimensions_pt(&self) -> Size {
        match self {
            PageSize::A4 => Size::new(595.28, 841.89),
            PageSize::A5 => Size::new(419.53, 595.28),
            PageSize::Letter => Size::new(612.0, 792.0),
            PageSize::Legal => Size::new(612.0, 1008.0),
            PageSize::Custom { width, height } => Size::new(*width, *height),
        }
    }
}

impl Serialize for PageSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PageSize::A4 => serializer.serialize_str("A4"),
            PageSize::A5 => serializer.serialize_str("A5"),
            PageSize::Letter => serializer.serialize_str("Letter"),
            PageSize::Legal => serializer.serialize_str("Legal"),
            PageSize::Custom { width, height } => Size::new(*width, *height).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum PageSizeDef {
            Str(String),
            Map { width: f32, height: f32 },
        }

        match PageSizeDef::deserialize(deserializer)? {
            PageSizeDef::Str(s) => parse_page_size(&s).map_err(de::Error::custom),
            PageSizeDef::Map { width, height } => Ok(PageSize::Custom { width, height }),
        }
    }
}

/// The layout of one page: its size, its content margins and its column arrangement.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    #[serde(default)]
    pub size: PageSize,
    #[serde(default, deserialize_with = "deserialize_thickness")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margins: Option<Thickness>,
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<ColumnOptions>,
}

impl PageLayout {
    pub fn new(size: PageSize) -> Self {
        Self {
            size,
            margins: None,
            columns: None,
        }
    }

    pub fn with_margins(mut self, margins: Thickness) -> Self {
        self.margins = Some(margins);
        self
    }

    pub fn with_columns(mut self, columns: ColumnOptions) -> Self {
        self.columns = Some(columns);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_layout_from_json_shorthand() {
        let layout: PageLayout =
            serde_json::from_str(r#"{ "size": "letter", "margins": "36pt 72pt" }"#).unwrap();
        assert_eq!(layout.size, PageSize::Letter);
        assert_eq!(layout.margins, Some(Thickness::new(36.0, 72.0, 36.0, 72.0)));
        assert!(layout.columns.is_none());
    }

    #[test]
    fn custom_page_size_from_map() {
        let layout: PageLayout =
            serde_json::from_str(r#"{ "size": { "width": 200, "height": 100 } }"#).unwrap();
        assert_eq!(layout.size.dimensions_pt(), Size::new(200.0, 100.0));
    }
}
