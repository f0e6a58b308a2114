use super::{layout_box, layout_text, BlockHooks, BlockSpec, LayoutEngine, LayoutOutcome, PanelEngine};
use crate::context::LayoutContext;
use crate::tree::BlockId;
use crate::LayoutError;
use folio_idf::Node;
use folio_style::PositionMode;

/// Headings lay out like panels. A heading in a numbering group is prefixed with its outline
/// label ("2.3.1"). The label is laid out as the heading's first text and is not carried over to
/// the content that follows.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadingEngine;

impl LayoutEngine for HeadingEngine {
    fn layout(&self, ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError> {
        let Node::Heading { level, .. } = node else {
            return Ok(LayoutOutcome::Continue);
        };
        let style = node.style();
        if style.position_mode() == PositionMode::Inline {
            return PanelEngine.layout(ctx, node);
        }

        let label = match &style.numbering_group {
            Some(group) => {
                let options = style.list_options();
                let values =
                    ctx.headings
                        .begin_heading(*level, group, &options, &mut ctx.numbering)?;
                let postfix = style.number_postfix.as_deref().unwrap_or_default();
                Some(format!("{}{}{}", options.prefix, values, postfix))
            }
            None => None,
        };

        let spec = BlockSpec::from_node(ctx, node);
        let text_style = style.clone();
        let hooks = BlockHooks {
            pre_children: Some(Box::new(move |ctx: &mut LayoutContext, _block: BlockId| {
                match &label {
                    Some(label) => layout_text(ctx, None, &text_style, &format!("{label} ")),
                    None => Ok(LayoutOutcome::Continue),
                }
            })),
            ..Default::default()
        };
        layout_box(ctx, node, spec, hooks)
    }
}
