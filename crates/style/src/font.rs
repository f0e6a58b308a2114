use serde::{Deserialize, Deserializer, Serialize, de};

/// A numeric font weight on the 100-900 scale.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const REGULAR: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const BLACK: FontWeight = FontWeight(900);

    fn from_name(s: &str) -> Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "thin" => Ok(Self::THIN),
            "light" => Ok(Self::LIGHT),
            "regular" | "normal" => Ok(Self::REGULAR),
            "medium" => Ok(Self::MEDIUM),
            "bold" => Ok(Self::BOLD),
            "black" => Ok(Self::BLACK),
            other => other
                .parse::<u16>()
                .map(FontWeight)
                .map_err(|_| format!("Invalid font weight: '{}'", s)),
        }
    }
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::REGULAR
    }
}

impl<'de> Deserialize<'de> for FontWeight {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum FontWeightDef {
            Str(String),
            Num(u16),
        }

        match FontWeightDef::deserialize(deserializer)? {
            FontWeightDef::Str(s) => Self::from_name(&s).map_err(de::Error::custom),
            FontWeightDef::Num(n) => Ok(FontWeight(n)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// The key used to look up font metrics: a family at a given size, weight and style.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    #[serde(default)]
    pub weight: FontWeight,
    #[serde(default)]
    pub style: FontStyle,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            weight: FontWeight::default(),
            style: FontStyle::default(),
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new("Helvetica", 12.0)
    }
}
