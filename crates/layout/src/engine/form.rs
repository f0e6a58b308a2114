use super::image::place_inline_object;
use super::{layout_children, LayoutEngine, LayoutOutcome};
use crate::context::LayoutContext;
use crate::tree::{FormObjectRun, Run};
use crate::LayoutError;
use folio_idf::Node;
use folio_types::Size;

/// A form object: a fixed-size surface with its own content, placed on the line as one run.
///
/// The content is laid out in an isolated region and can not overflow out of it.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormEngine;

impl LayoutEngine for FormEngine {
    fn layout(&self, ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError> {
        let Node::FormField {
            width,
            height,
            children,
            ..
        } = node
        else {
            return Ok(LayoutOutcome::Continue);
        };
        let owner = ctx.register_component(node);

        let Some(line) = place_inline_object(ctx, *width, *height)? else {
            return ctx.abandon(node.kind(), *height, 0.0);
        };
        let block = ctx.tree.region(ctx.tree.line(line).parent()).parent();
        let region = ctx
            .tree
            .begin_form_region(block, Size::new(*width, *height), Some(owner));

        if let LayoutOutcome::Truncated(reason) = layout_children(ctx, children)? {
            ctx.diagnostics.message(
                "form-field",
                format!("The content of a form field was cut short: {reason}"),
            );
        }
        if !ctx.tree.region(region).is_closed() {
            ctx.tree.close_region(region)?;
        }

        ctx.tree.line_mut(line).push_run(Run::FormObject(FormObjectRun {
            owner: Some(owner),
            region,
            width: *width,
            height: *height,
            x: 0.0,
        }));
        Ok(LayoutOutcome::Continue)
    }
}
