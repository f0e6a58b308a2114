use super::{layout_box, BlockHooks, BlockSpec, LayoutEngine, LayoutOutcome};
use crate::context::LayoutContext;
use crate::tree::{ComponentRun, LineId, NewLine, Run};
use crate::LayoutError;
use folio_idf::Node;
use folio_style::{ColumnOptions, Dimension, PositionMode};
use folio_types::geometry::EPSILON;

/// Fixed-size replaced content. Inline images sit on the line as a single run; any other mode
/// gets a block of the image's size.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageEngine;

impl LayoutEngine for ImageEngine {
    fn layout(&self, ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError> {
        let Node::Image { width, height, .. } = node else {
            return Ok(LayoutOutcome::Continue);
        };
        let owner = ctx.register_component(node);
        let mut position = node.style().position_options();

        if position.mode == PositionMode::Inline {
            let Some(line) = place_inline_object(ctx, *width, *height)? else {
                let available = ctx
                    .current_region()
                    .map(|r| ctx.tree.region(r).remaining_height())
                    .unwrap_or(0.0);
                return ctx.abandon(node.kind(), *height, available);
            };
            ctx.tree.line_mut(line).push_run(Run::Component(ComponentRun {
                owner: Some(owner),
                width: *width,
                height: *height,
                x: 0.0,
            }));
            return Ok(LayoutOutcome::Continue);
        }

        position.width = position.width.or(Some(Dimension::Pt(*width)));
        position.height = position.height.or(Some(Dimension::Pt(*height)));
        let spec = BlockSpec {
            owner,
            position,
            columns: ColumnOptions::single(),
        };
        layout_box(ctx, node, spec, BlockHooks::default())
    }
}

/// Finds a line with room for an inline object of the given size, starting a new line when the
/// open one is too full or would grow past the bottom of its region.
pub(super) fn place_inline_object(
    ctx: &mut LayoutContext,
    width: f32,
    height: f32,
) -> Result<Option<LineId>, LayoutError> {
    let Some(line) = ctx.ensure_line(height)? else {
        return Ok(None);
    };
    let needs_new_line = {
        let l = ctx.tree.line(line);
        let region = ctx.tree.region(l.parent());
        let too_wide = width > l.available_width() + EPSILON;
        let too_tall =
            l.offset_y + l.height().max(height) > region.total_bounds.height + EPSILON;
        l.has_content() && (too_wide || too_tall)
    };
    if !needs_new_line {
        return Ok(Some(line));
    }
    // The paragraph goes on, so the closed line is not its last one.
    ctx.tree.line_mut(line).push_run(Run::NewLine(NewLine {
        hard: false,
        height: 0.0,
        offset: 0.0,
        x: 0.0,
    }));
    ctx.tree.close_line(line)?;
    ctx.ensure_line(height)
}
