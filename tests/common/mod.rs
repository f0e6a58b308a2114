#![allow(dead_code)]

pub mod fixtures;

use folio::{
    FolioError, FontMetricsProvider, LaidOutDocument, LayoutConfig, LayoutElement, MonospaceMetrics,
    Node, PageLayout, PageSize, PositionedElement,
};
use std::sync::Arc;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 6pt per character and 12pt per line at the default 12pt font.
pub fn monospace() -> Arc<dyn FontMetricsProvider> {
    Arc::new(MonospaceMetrics::fixed(0.5))
}

pub fn page(width: f32, height: f32) -> PageLayout {
    PageLayout::new(PageSize::Custom { width, height })
}

pub fn layout(root: &Node, page: PageLayout) -> Result<LaidOutDocument, FolioError> {
    layout_with(root, LayoutConfig::default(), page)
}

pub fn layout_with(
    root: &Node,
    config: LayoutConfig,
    page: PageLayout,
) -> Result<LaidOutDocument, FolioError> {
    init_logger();
    folio::layout_tree(root, config, page, monospace())
}

/// The text contents on one page, in arrangement order.
pub fn texts_on_page(doc: &LaidOutDocument, page: usize) -> Vec<String> {
    doc.pages[page]
        .elements
        .iter()
        .filter_map(|e| match &e.element {
            LayoutElement::Text(t) => Some(t.content.clone()),
            _ => None,
        })
        .collect()
}

pub fn text_element<'a>(doc: &'a LaidOutDocument, content: &str) -> Option<&'a PositionedElement> {
    doc.pages.iter().flat_map(|p| p.elements.iter()).find(
        |e| matches!(&e.element, LayoutElement::Text(t) if t.content == content),
    )
}

/// Checks a float against an expected value with the engine's tolerance.
#[macro_export]
macro_rules! assert_close {
    ($actual:expr, $expected:expr) => {{
        let (actual, expected): (f32, f32) = ($actual, $expected);
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {} to be close to {}",
            actual,
            expected
        );
    }};
}
