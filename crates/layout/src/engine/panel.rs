//! The generic container engine and the block driver the specialised engines build on.

use super::{layout_node, LayoutEngine, LayoutOutcome};
use crate::context::LayoutContext;
use crate::tree::{BlockId, ComponentId, InlineMarker, PositionedRun, RegionContent, Run};
use crate::LayoutError;
use folio_idf::Node;
use folio_style::{ColumnOptions, FloatMode, PositionMode, PositionOptions};
use folio_types::geometry::EPSILON;
use folio_types::Rect;

pub type BlockHook<'a> =
    Box<dyn FnMut(&mut LayoutContext, BlockId) -> Result<LayoutOutcome, LayoutError> + 'a>;
pub type ChildHook<'a> =
    Box<dyn FnMut(&mut LayoutContext, &Node) -> Result<LayoutOutcome, LayoutError> + 'a>;

/// Customisation points of [`drive_block`].
///
/// `pre_children` and `post_children` receive the block's latest occurrence. `per_child` replaces
/// the default engine dispatch for each child.
#[derive(Default)]
pub struct BlockHooks<'a> {
    pub pre_children: Option<BlockHook<'a>>,
    pub per_child: Option<ChildHook<'a>>,
    pub post_children: Option<BlockHook<'a>>,
}

#[derive(Debug, Clone)]
pub struct BlockSpec {
    pub owner: ComponentId,
    pub position: PositionOptions,
    pub columns: ColumnOptions,
}

impl BlockSpec {
    pub fn from_node(ctx: &mut LayoutContext, node: &Node) -> Self {
        let style = node.style();
        Self {
            owner: ctx.register_component(node),
            position: style.position_options(),
            columns: style.column_options(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PanelEngine;

impl LayoutEngine for PanelEngine {
    fn layout(&self, ctx: &mut LayoutContext, node: &Node) -> Result<LayoutOutcome, LayoutError> {
        let spec = BlockSpec::from_node(ctx, node);
        if spec.position.mode == PositionMode::Inline {
            return layout_inline(ctx, node, spec.owner, &spec.position);
        }
        layout_box(ctx, node, spec, BlockHooks::default())
    }
}

/// Lays out a span: its children go onto the current line between a pair of marker runs whose
/// widths are the span's left and right insets.
fn layout_inline(
    ctx: &mut LayoutContext,
    node: &Node,
    owner: ComponentId,
    position: &PositionOptions,
) -> Result<LayoutOutcome, LayoutError> {
    let insets = position.insets();

    let Some(line) = ctx.ensure_line(0.0)? else {
        return ctx.abandon(node.kind(), 0.0, 0.0);
    };
    ctx.tree.line_mut(line).push_run(Run::InlineBegin(InlineMarker {
        owner: Some(owner),
        width: insets.left,
        x: 0.0,
    }));

    let outcome = super::layout_children(ctx, node.children())?;
    if outcome.is_truncated() {
        return Ok(outcome);
    }

    let Some(line) = ctx.ensure_line(0.0)? else {
        return ctx.abandon(node.kind(), 0.0, 0.0);
    };
    ctx.tree.line_mut(line).push_run(Run::InlineEnd(InlineMarker {
        owner: Some(owner),
        width: insets.right,
        x: 0.0,
    }));
    Ok(LayoutOutcome::Continue)
}

/// Lays out a block-level box, taking positioned and floated boxes out of the flow.
pub fn layout_box(
    ctx: &mut LayoutContext,
    node: &Node,
    mut spec: BlockSpec,
    hooks: BlockHooks<'_>,
) -> Result<LayoutOutcome, LayoutError> {
    let positioned = spec.position.mode.is_positioned() || spec.position.is_float();
    if !positioned {
        return drive_block(ctx, node, spec, hooks);
    }

    let region = ctx.current_region()?;
    if ctx.tree.region(region).is_form() {
        let message = format!(
            "a {} with {:?} positioning can not be placed inside a form field",
            node.kind(),
            spec.position.mode
        );
        if ctx.is_strict() {
            return Err(LayoutError::InvalidNestedPositioning(message));
        }
        ctx.diagnostics
            .warning("invalid-nested-positioning", format!("{message}, laying it out in flow"));
        spec.position.mode = PositionMode::Block;
        spec.position.float_mode = FloatMode::None;
        return drive_block(ctx, node, spec, hooks);
    }

    match spec.position.mode {
        PositionMode::Relative | PositionMode::Absolute => layout_positioned(ctx, node, spec, hooks),
        _ => layout_float(ctx, node, spec, hooks),
    }
}

/// Relative boxes are offset from where they would sit in the flow; absolute boxes are placed
/// against the page. Neither takes up space in the flow. A marker run on the open line (or a new
/// one) records where the box was met, and the box is arranged at that point.
fn layout_positioned(
    ctx: &mut LayoutContext,
    node: &Node,
    spec: BlockSpec,
    hooks: BlockHooks<'_>,
) -> Result<LayoutOutcome, LayoutError> {
    let Some(marker_line) = ctx.ensure_line(0.0)? else {
        return ctx.abandon(node.kind(), 0.0, 0.0);
    };
    let block = ctx.current_block()?;
    let column = ctx.tree.current_region(block);
    let x = spec.position.x.unwrap_or(0.0);
    let y = spec.position.y.unwrap_or(0.0);

    let bounds = if spec.position.mode == PositionMode::Absolute {
        let page = ctx
            .tree
            .last_page()
            .map(|p| p.size)
            .ok_or(LayoutError::NoPageAvailable)?;
        Rect::new(x, y, (page.width - x).max(0.0), (page.height - y).max(0.0))
    } else {
        let col = ctx.tree.region(column);
        let available = ctx.tree.block(block).available_bounds;
        let top = col.used.height + y;
        Rect::new(
            col.total_bounds.x + x,
            top,
            (col.total_bounds.width - x).max(0.0),
            (available.height - top).max(0.0),
        )
    };

    let region = ctx.tree.begin_positioned_region(
        block,
        spec.position.mode,
        FloatMode::None,
        bounds,
        Some(spec.owner),
    );
    ctx.tree
        .line_mut(marker_line)
        .push_run(Run::Positioned(PositionedRun { region, x: 0.0 }));

    let outcome = drive_block(ctx, node, spec, hooks)?;
    if !ctx.tree.region(region).is_closed() {
        ctx.tree.close_region(region)?;
    }
    Ok(outcome)
}

/// Floats are laid out beside the flow and then take their width out of every line they sit
/// next to.
fn layout_float(
    ctx: &mut LayoutContext,
    node: &Node,
    spec: BlockSpec,
    hooks: BlockHooks<'_>,
) -> Result<LayoutOutcome, LayoutError> {
    let block = ctx.current_block()?;
    let column = ctx.tree.current_region(block);
    let mode = spec.position.float_mode;

    let (col_bounds, y, left, right, width) = {
        let col = ctx.tree.region(column);
        let y = col.used.height;
        (
            col.total_bounds,
            y,
            col.left_inset(y, 0.0),
            col.right_inset(y, 0.0),
            col.available_width(y, 0.0),
        )
    };
    let bounds = Rect::new(
        col_bounds.x + left,
        y,
        width,
        (col_bounds.height - y).max(0.0),
    );
    let region = ctx.tree.begin_positioned_region(
        block,
        PositionMode::Block,
        mode,
        bounds,
        Some(spec.owner),
    );

    let outcome = drive_block(ctx, node, spec, hooks)?;
    if !ctx.tree.region(region).is_closed() {
        ctx.tree.close_region(region)?;
    }

    let size = ctx.tree.region(region).used;
    {
        let r = ctx.tree.region_mut(region);
        if mode == FloatMode::Right {
            r.total_bounds.x = col_bounds.x + col_bounds.width - right - size.width;
        }
        r.total_bounds.width = size.width;
        r.total_bounds.height = size.height;
    }
    ctx.tree
        .add_floating_inset(column, mode, size.width, y, size.height);
    Ok(outcome)
}

/// Opens a block for `node` in the current region, lays out its children and closes it again.
///
/// The block must at least fit its explicit or minimum height; if the current region can not
/// take that, layout moves on to the next region first. Hooks run before the children, for each
/// child and after the children. Layout stops at the first truncated child.
pub fn drive_block(
    ctx: &mut LayoutContext,
    node: &Node,
    spec: BlockSpec,
    mut hooks: BlockHooks<'_>,
) -> Result<LayoutOutcome, LayoutError> {
    ctx.close_current_line()?;

    let region = ctx.current_region()?;
    let (remaining, total_height, is_flow) = {
        let r = ctx.tree.region(region);
        (r.remaining_height(), r.total_bounds.height, r.is_flow())
    };
    let insets = spec.position.insets();
    let required = spec
        .position
        .explicit_height(total_height)
        .or(spec.position.min_height)
        .unwrap_or(0.0)
        + insets.vertical();
    if is_flow && required > remaining + EPSILON && !ctx.at_region_top()? {
        if !ctx.move_to_next_region(required)? {
            return ctx.abandon(node.kind(), required, remaining);
        }
    }

    let region = ctx.current_region()?;
    let block = ctx
        .tree
        .begin_block(region, Some(spec.owner), spec.position, spec.columns)?;

    let mut outcome = LayoutOutcome::Continue;
    if let Some(pre) = hooks.pre_children.as_mut() {
        outcome = pre(ctx, block)?;
    }
    if !outcome.is_truncated() {
        for child in node.children() {
            let result = match hooks.per_child.as_mut() {
                Some(per_child) => per_child(ctx, child)?,
                None => layout_node(ctx, child)?,
            };
            if result.is_truncated() {
                outcome = result;
                break;
            }
        }
    }

    let latest = ctx.tree.latest_occurrence(block);
    if !outcome.is_truncated() {
        if let Some(post) = hooks.post_children.as_mut() {
            outcome = post(ctx, latest)?;
        }
    }

    if outcome.is_truncated() {
        if !ctx.tree.block(latest).is_closed() {
            ctx.tree.close_block(latest)?;
        }
        return Ok(outcome);
    }
    ensure_contents_fit(ctx, latest, node.kind())
}

/// Closes `block` and makes sure it fits its parent region.
///
/// A block that overflows a region holding other content is moved to the next region. A block
/// with nothing above it is left where it is, since no other region would offer more room.
pub fn ensure_contents_fit(
    ctx: &mut LayoutContext,
    block: BlockId,
    context: &str,
) -> Result<LayoutOutcome, LayoutError> {
    if !ctx.tree.block(block).is_closed() {
        ctx.tree.close_block(block)?;
    }
    let Some(parent) = ctx.tree.block(block).parent() else {
        return Ok(LayoutOutcome::Continue);
    };
    let (used, total, is_flow) = {
        let r = ctx.tree.region(parent);
        (r.used.height, r.total_bounds.height, r.is_flow())
    };
    if !is_flow || used <= total + EPSILON {
        return Ok(LayoutOutcome::Continue);
    }

    let height = ctx.tree.block(block).total_bounds.height;
    ctx.tree.remove_item(parent, RegionContent::Block(block));
    let available = ctx.tree.region(parent).remaining_height();

    if ctx.at_region_top()? {
        ctx.tree.add_existing_block(parent, block);
        ctx.element_too_large(height, total)?;
        return Ok(LayoutOutcome::Continue);
    }

    if ctx.move_to_next_region(height)? {
        let region = ctx.current_region()?;
        ctx.tree.add_existing_block(region, block);
        log::debug!("Moved {} block {} to region {}", context, block.0, region.0);
        Ok(LayoutOutcome::Continue)
    } else {
        ctx.tree.add_existing_block(parent, block);
        ctx.abandon(context, height, available)
    }
}
