//! Per-component layout engines.
//!
//! Every node kind has an engine that knows how to place it into the current region. Containers
//! share one block driver, [`panel::drive_block`], and customise it through hook closures.

mod breaks;
mod form;
mod heading;
mod image;
mod list;
mod panel;
mod text;

pub use breaks::{BreakEngine, LineBreakEngine};
pub use form::FormEngine;
pub use heading::HeadingEngine;
pub use image::ImageEngine;
pub use list::ListEngine;
pub use panel::{drive_block, ensure_contents_fit, layout_box, BlockHooks, BlockSpec, PanelEngine};
pub use text::{layout_text, TextEngine};

use crate::context::LayoutContext;
use crate::LayoutError;
use folio_idf::Node;
use serde::Serialize;

/// How a subtree's layout ended.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "kebab-case")]
pub enum LayoutOutcome {
    Continue,
    /// Layout ran out of space and the rest of the subtree was dropped. Every enclosing driver
    /// stops after a truncated child.
    Truncated(String),
}

impl LayoutOutcome {
    pub fn is_truncated(&self) -> bool {
        matches!(self, LayoutOutcome::Truncated(_))
    }
}

pub trait LayoutEngine {
    fn layout(&self, ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError>;
}

/// Lays out one node with the engine for its kind. Invisible nodes are skipped.
pub fn layout_node(ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError> {
    if !node.style().is_visible() {
        return Ok(LayoutOutcome::Continue);
    }
    match node {
        Node::Panel { .. } | Node::ListItem { .. } => PanelEngine.layout(ctx, node),
        Node::Text { .. } => TextEngine.layout(ctx, node),
        Node::LineBreak { .. } => LineBreakEngine.layout(ctx, node),
        Node::Image { .. } => ImageEngine.layout(ctx, node),
        Node::FormField { .. } => FormEngine.layout(ctx, node),
        Node::List { .. } => ListEngine.layout(ctx, node),
        Node::Heading { .. } => HeadingEngine.layout(ctx, node),
        Node::PageBreak { .. } | Node::ColumnBreak { .. } => BreakEngine.layout(ctx, node),
    }
}

/// Lays out `children` in order, stopping at the first truncated one.
pub fn layout_children(
    ctx: &mut LayoutContext,
    children: &[Node],
) -> Result<LayoutOutcome, LayoutError> {
    for child in children {
        let outcome = layout_node(ctx, child)?;
        if outcome.is_truncated() {
            return Ok(outcome);
        }
    }
    Ok(LayoutOutcome::Continue)
}
