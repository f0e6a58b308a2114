use super::{LayoutEngine, LayoutOutcome};
use crate::context::{LayoutContext, OverflowMode};
use crate::tree::{NewLine, Run};
use crate::LayoutError;
use folio_idf::Node;

/// Ends the current line with a hard break. An empty line still takes up one line height.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBreakEngine;

impl LayoutEngine for LineBreakEngine {
    fn layout(&self, ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError> {
        let options = node.style().text_options(&ctx.config.default_font);
        let metrics = ctx.font_metrics(&options.font)?;
        let line_height = options.line_height.unwrap_or(metrics.line_height);

        let Some(line) = ctx.ensure_line(line_height)? else {
            return ctx.abandon(node.kind(), line_height, 0.0);
        };
        let height = if ctx.tree.line(line).height() > 0.0 {
            0.0
        } else {
            line_height
        };
        ctx.tree.line_mut(line).push_run(Run::NewLine(NewLine {
            hard: true,
            height,
            offset: 0.0,
            x: 0.0,
        }));
        ctx.tree.close_line(line)?;
        Ok(LayoutOutcome::Continue)
    }
}

/// Explicit page and column breaks.
///
/// A column break moves to the next column of the nearest block that has one and falls back to
/// a new page. A break with nowhere to go is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct BreakEngine;

impl LayoutEngine for BreakEngine {
    fn layout(&self, ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError> {
        let mode = match node {
            Node::ColumnBreak { .. } => OverflowMode::ColumnBreak,
            _ => OverflowMode::PageBreak,
        };
        ctx.close_current_line()?;
        if !ctx.overflow(0.0, mode)? {
            ctx.diagnostics.message(
                "break",
                format!("No region is available after the {}, it was ignored", node.kind()),
            );
        }
        Ok(LayoutOutcome::Continue)
    }
}
