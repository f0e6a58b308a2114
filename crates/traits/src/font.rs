//! Font metrics lookup.

use folio_style::FontSpec;
use std::fmt::Debug;
use thiserror::Error;

/// Error type for font metric lookups.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FontError {
    #[error("Font not found: {0}")]
    NotFound(String),

    #[error("Failed to parse font '{family}': {message}")]
    ParseFailed { family: String, message: String },
}

/// Vertical metrics of a font at a specific size, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Distance from the top of the line box to the baseline.
    pub ascent: f32,
    /// Distance below the baseline, as a positive number.
    pub descent: f32,
    pub line_height: f32,
    /// Offset of the underline below the baseline.
    pub underline_position: f32,
    pub underline_thickness: f32,
}

/// A source of font measurements keyed by family and size.
///
/// Implementations must be deterministic: the same query always yields the same numbers, since
/// the layout engine may measure a word several times while breaking lines.
pub trait FontMetricsProvider: Debug {
    fn metrics(&self, font: &FontSpec) -> Result<FontMetrics, FontError>;

    /// The advance width of `text` set in `font`, without any extra spacing.
    fn measure(&self, font: &FontSpec, text: &str) -> Result<f32, FontError>;
}

/// Metrics that treat every character as the same width.
///
/// Used as a fallback for unknown families and throughout the tests, where predictable widths
/// make the line breaking easy to reason about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    /// Advance of one character as a fraction of the font size.
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.5,
            ascent: 0.8,
            descent: 0.2,
            line_spacing: 1.2,
        }
    }
}

impl MonospaceMetrics {
    /// Metrics where every character is exactly `advance` points wide and a line is exactly
    /// the font size tall.
    pub fn fixed(advance_ratio: f32) -> Self {
        Self {
            advance: advance_ratio,
            ascent: 0.8,
            descent: 0.2,
            line_spacing: 1.0,
        }
    }
}

impl FontMetricsProvider for MonospaceMetrics {
    fn metrics(&self, font: &FontSpec) -> Result<FontMetrics, FontError> {
        Ok(FontMetrics {
            ascent: self.ascent * font.size,
            descent: self.descent * font.size,
            line_height: self.line_spacing * font.size,
            underline_position: self.descent * font.size * 0.5,
            underline_thickness: (font.size / 16.0).max(0.5),
        })
    }

    fn measure(&self, font: &FontSpec, text: &str) -> Result<f32, FontError> {
        Ok(text.chars().count() as f32 * self.advance * font.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monospace_width_scales_with_size() {
        let metrics = MonospaceMetrics::fixed(0.5);
        let font = FontSpec::new("Courier", 10.0);
        assert_eq!(metrics.measure(&font, "abcd").unwrap(), 20.0);
        assert_eq!(metrics.metrics(&font).unwrap().line_height, 10.0);
    }
}
