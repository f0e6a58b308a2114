use serde::{Deserialize, Serialize};

/// How the width of each column is decided.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ColumnWidths {
    /// Every column gets an equal share of the width left after the alleys.
    #[default]
    Equal,
    /// Fixed widths in points. A zero entry shares the remaining width with the other zero entries.
    Explicit(Vec<f32>),
    /// Fractions of the width left after the alleys, in percent.
    Percent(Vec<f32>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnOptions {
    pub count: u32,
    /// Gap between adjacent columns.
    pub alley: f32,
    pub widths: ColumnWidths,
    /// Content continues into the next column automatically when one fills up.
    pub auto_flow: bool,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            count: 1,
            alley: 10.0,
            widths: ColumnWidths::Equal,
            auto_flow: true,
        }
    }
}

impl ColumnOptions {
    pub fn single() -> Self {
        Self::default()
    }

    pub fn equal(count: u32, alley: f32) -> Self {
        Self {
            count,
            alley,
            ..Default::default()
        }
    }

    /// The number of columns actually laid out: explicit width lists win over the count.
    pub fn column_count(&self) -> usize {
        match &self.widths {
            ColumnWidths::Explicit(w) | ColumnWidths::Percent(w) if !w.is_empty() => w.len(),
            _ => self.count.max(1) as usize,
        }
    }
}
