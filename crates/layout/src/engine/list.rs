use super::{layout_box, layout_node, layout_text, BlockHooks, BlockSpec, LayoutEngine, LayoutOutcome};
use crate::context::LayoutContext;
use crate::tree::BlockId;
use crate::LayoutError;
use folio_idf::Node;
use folio_style::{
    ColumnOptions, ColumnWidths, ElementStyle, ListOptions, NumberingStyle, OverflowSplit, TextAlign,
};

/// Ordered and unordered lists.
///
/// The list pushes its numbering group for the duration of its layout. Each visible item becomes
/// a two-column block: the marker in the first column, the item content in the second.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListEngine;

impl LayoutEngine for ListEngine {
    fn layout(&self, ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError> {
        let style = node.style();
        let options = style.list_options();
        let spec = BlockSpec {
            owner: ctx.register_component(node),
            position: style.position_options(),
            columns: ColumnOptions {
                auto_flow: false,
                ..ColumnOptions::single()
            },
        };

        ctx.with_numbering_group(options.group.as_deref(), &options, |ctx| {
            let hooks = BlockHooks {
                per_child: Some(Box::new(|ctx: &mut LayoutContext, child: &Node| {
                    layout_list_child(ctx, child, &options)
                })),
                ..Default::default()
            };
            layout_box(ctx, node, spec, hooks)
        })
    }
}

fn layout_list_child(
    ctx: &mut LayoutContext,
    child: &Node,
    list: &ListOptions,
) -> Result<LayoutOutcome, LayoutError> {
    if !matches!(child, Node::ListItem { .. }) {
        return layout_node(ctx, child);
    }
    let style = child.style();
    if !style.is_visible() {
        return Ok(LayoutOutcome::Continue);
    }

    let inset = style
        .number_inset
        .or(list.inset)
        .unwrap_or(ctx.config.default_list_inset);
    let alley = style
        .number_alley
        .or(list.alley)
        .unwrap_or(ctx.config.default_list_alley);
    let alignment = style
        .number_alignment
        .or(list.alignment)
        .unwrap_or(TextAlign::Right);
    let label = style.number_label.clone().or_else(|| list.label.clone());

    let mut position = style.position_options();
    position.overflow_split = style.overflow_split.unwrap_or(OverflowSplit::Never);
    let spec = BlockSpec {
        owner: ctx.register_component(child),
        position,
        columns: ColumnOptions {
            count: 2,
            alley,
            widths: ColumnWidths::Explicit(vec![inset, 0.0]),
            auto_flow: false,
        },
    };
    let marker_style = marker_style(style);

    let hooks = BlockHooks {
        pre_children: Some(Box::new(move |ctx: &mut LayoutContext, block: BlockId| {
            let marker = match &label {
                Some(label) => label.clone(),
                None if current_style(ctx) == Some(NumberingStyle::Labels) => String::new(),
                None => ctx.numbering.increment()?,
            };

            let marker_column = ctx.tree.block(block).columns[0];
            ctx.tree.region_mut(marker_column).h_align = alignment;
            if !marker.is_empty() {
                let outcome = layout_text(ctx, None, &marker_style, &marker)?;
                if outcome.is_truncated() {
                    return Ok(outcome);
                }
            }
            ctx.close_current_line()?;

            let block = ctx.tree.latest_occurrence(block);
            ctx.tree.advance_column(block)?;
            Ok(LayoutOutcome::Continue)
        })),
        ..Default::default()
    };
    layout_box(ctx, child, spec, hooks)
}

fn current_style(ctx: &LayoutContext) -> Option<NumberingStyle> {
    ctx.numbering.current_group().map(|g| g.style)
}

/// Markers are set in the item's font, without any of its box properties.
fn marker_style(item: &ElementStyle) -> ElementStyle {
    ElementStyle {
        font_family: item.font_family.clone(),
        font_size: item.font_size,
        font_weight: item.font_weight,
        font_style: item.font_style,
        line_height: item.line_height,
        ..Default::default()
    }
}
