//! Defines the length primitive used for explicit widths and heights.
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Pt(f32),
    Percent(f32),
    #[default]
    Auto,
}

impl Dimension {
    /// Resolves the dimension against the space available to it.
    ///
    /// Returns `None` for `Auto`, meaning the size is content-derived.
    pub fn resolve(&self, available: f32) -> Option<f32> {
        match self {
            Dimension::Pt(v) => Some(*v),
            Dimension::Percent(p) => Some(available * p / 100.0),
            Dimension::Auto => None,
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Dimension::Auto)
    }
}
