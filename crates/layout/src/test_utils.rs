use crate::config::LayoutConfig;
use crate::context::LayoutContext;
use crate::output::{LaidOutDocument, LayoutElement, PositionedElement};
use crate::tree::{BlockId, LineId, RegionContent, RegionId};
use crate::typesetter::Typesetter;
use crate::LayoutError;
use folio_idf::Node;
use folio_style::{Dimension, ElementStyle, PageLayout, PageSize};
use folio_traits::{FixedPages, FontMetricsProvider, MonospaceMetrics};
use folio_types::Thickness;
use std::sync::Arc;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every character is half the font size wide and a line is exactly the font size tall. With the
/// default 12pt font that is 6pt per character and 12pt per line.
pub fn test_fonts() -> Arc<dyn FontMetricsProvider> {
    Arc::new(MonospaceMetrics::fixed(0.5))
}

pub fn custom_page(width: f32, height: f32) -> PageLayout {
    PageLayout::new(PageSize::Custom { width, height })
}

/// A context with its first page already open.
pub fn context_with(
    config: LayoutConfig,
    layout: PageLayout,
    max_pages: Option<usize>,
) -> LayoutContext {
    init_logger();
    let mut pages = FixedPages::new(layout);
    pages.max_pages = max_pages;
    let mut ctx = LayoutContext::new(config, test_fonts(), Box::new(pages));
    ctx.start_first_page().unwrap();
    ctx
}

pub fn test_context(width: f32, height: f32) -> LayoutContext {
    context_with(LayoutConfig::default(), custom_page(width, height), None)
}

pub fn layout_document(
    config: LayoutConfig,
    layout: PageLayout,
    max_pages: Option<usize>,
    root: &Node,
) -> Result<LaidOutDocument, LayoutError> {
    init_logger();
    let mut pages = FixedPages::new(layout);
    pages.max_pages = max_pages;
    Typesetter::new(config, test_fonts()).layout(root, Box::new(pages))
}

pub fn sized(width: Option<f32>, height: Option<f32>) -> ElementStyle {
    ElementStyle {
        width: width.map(Dimension::Pt),
        height: height.map(Dimension::Pt),
        ..Default::default()
    }
}

pub fn boxed(width: f32, padding: f32, border: f32) -> ElementStyle {
    ElementStyle {
        width: Some(Dimension::Pt(width)),
        padding: Some(Thickness::uniform(padding)),
        border_width: Some(Thickness::uniform(border)),
        ..Default::default()
    }
}

/// The blocks placed directly in the first column of a page.
pub fn page_blocks(ctx: &LayoutContext, page: usize) -> Vec<BlockId> {
    let root = ctx.tree.pages()[page].root;
    let column = ctx.tree.block(root).columns[0];
    ctx.tree
        .region(column)
        .contents
        .iter()
        .filter_map(|c| match c {
            RegionContent::Block(b) => Some(*b),
            _ => None,
        })
        .collect()
}

pub fn region_lines(ctx: &LayoutContext, region: RegionId) -> Vec<LineId> {
    ctx.tree
        .region(region)
        .contents
        .iter()
        .filter_map(|c| match c {
            RegionContent::Line(l) => Some(*l),
            _ => None,
        })
        .collect()
}

pub fn page_texts(doc: &LaidOutDocument, page: usize) -> Vec<String> {
    doc.pages[page]
        .elements
        .iter()
        .filter_map(|e| match &e.element {
            LayoutElement::Text(t) => Some(t.content.clone()),
            _ => None,
        })
        .collect()
}

pub fn find_text<'a>(doc: &'a LaidOutDocument, content: &str) -> Option<(usize, &'a PositionedElement)> {
    doc.pages.iter().find_map(|p| {
        p.elements
            .iter()
            .find(|e| matches!(&e.element, LayoutElement::Text(t) if t.content.contains(content)))
            .map(|e| (p.index, e))
    })
}
