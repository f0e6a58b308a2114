use folio_style::FontSpec;
use serde::{Deserialize, Serialize};

/// How the engine reacts when content can not be laid out as requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConformanceMode {
    /// Any layout problem aborts the document with a [`crate::LayoutError`].
    Strict,
    /// Problems are recorded as diagnostics and the offending content is skipped or truncated.
    #[default]
    Lax,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    pub conformance: ConformanceMode,
    /// Width of a list's marker column when neither the list nor the item sets one.
    ///
    /// Defaults to `20.0` points.
    pub default_list_inset: f32,
    /// Gap between a list marker and the item content.
    ///
    /// Defaults to `10.0` points.
    pub default_list_alley: f32,
    /// Font used for text whose style does not name one.
    pub default_font: FontSpec,
    /// Upper bound on the number of pages a single document may create. Reaching it behaves as if
    /// the page provider refused another page.
    ///
    /// Defaults to `10000`.
    pub max_pages: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            conformance: ConformanceMode::Lax,
            default_list_inset: 20.0,
            default_list_alley: 10.0,
            default_font: FontSpec::default(),
            max_pages: 10_000,
        }
    }
}

impl LayoutConfig {
    pub fn strict() -> Self {
        Self {
            conformance: ConformanceMode::Strict,
            ..Default::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        self.conformance == ConformanceMode::Strict
    }
}
