//! folio lays out trees of styled components onto pages.
//!
//! The heavy lifting happens in [`folio_layout`]; this crate ties it together with font loading
//! and JSON input so a tree can be laid out in a single call:
//!
//! ```no_run
//! use folio::{LayoutConfig, PageLayout, PageSize};
//!
//! let tree = r#"{ "type": "panel", "children": [{ "type": "text", "content": "Hello" }] }"#;
//! let doc = folio::layout_json(tree, LayoutConfig::default(), PageLayout::new(PageSize::A4))?;
//! println!("{} page(s)", doc.pages.len());
//! # Ok::<(), folio::FolioError>(())
//! ```

pub mod error;

pub use error::FolioError;

pub use folio_idf::{Node, NodeMetadata};
pub use folio_layout::{
    Arrangement, ConformanceMode, Diagnostic, DiagnosticLevel, FontLibrary, LaidOutDocument,
    LaidOutPage, LayoutConfig, LayoutElement, LayoutError, LayoutOutcome, PositionedElement,
    TextElement, Typesetter,
};
pub use folio_style::{ColumnOptions, ElementStyle, PageLayout, PageSize};
pub use folio_traits::{FixedPages, FontMetricsProvider, MonospaceMetrics, PageProvider};
pub use folio_types::{Point, Rect, Size, Thickness};

use std::sync::Arc;

/// The font provider used when the caller does not bring one: every font registered on the
/// machine, with monospace metrics for anything else.
pub fn default_fonts() -> Arc<dyn FontMetricsProvider> {
    let library = FontLibrary::new();
    #[cfg(feature = "system-fonts")]
    let library = library.with_system_fonts();
    Arc::new(library)
}

/// Lays out `root` on pages that all share `page`.
pub fn layout_tree(
    root: &Node,
    config: LayoutConfig,
    page: PageLayout,
    fonts: Arc<dyn FontMetricsProvider>,
) -> Result<LaidOutDocument, FolioError> {
    let typesetter = Typesetter::new(config, fonts);
    let doc = typesetter.layout(root, Box::new(FixedPages::new(page)))?;
    Ok(doc)
}

/// Parses a JSON component tree and lays it out with [`default_fonts`].
pub fn layout_json(
    json: &str,
    config: LayoutConfig,
    page: PageLayout,
) -> Result<LaidOutDocument, FolioError> {
    let root: Node = serde_json::from_str(json)?;
    log::debug!("Parsed a '{}' tree with {} children", root.kind(), root.children().len());
    layout_tree(&root, config, page, default_fonts())
}
