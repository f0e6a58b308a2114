use folio_layout::LayoutError;
use folio_style::StyleParseError;
use folio_traits::FontError;
use thiserror::Error;

/// Everything that can go wrong between reading a component tree and printing its layout.
#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Failed to parse the component tree: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Font error: {0}")]
    Font(#[from] FontError),

    #[error("Invalid style value: {0}")]
    Style(#[from] StyleParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
