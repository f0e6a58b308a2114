use super::{BlockId, ComponentId, FloatAddition, LayoutTree, Line, LineId, RegionContent, RegionId};
use crate::LayoutError;
use folio_style::{FloatMode, PositionMode, TextAlign, VerticalAlign};
use folio_types::{Rect, Size};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionKind {
    /// A flow column of its block, by column index.
    Column(usize),
    /// Relative, absolute or floated content taken out of the flow. The index is negative and
    /// counts down from -1, keeping positioned regions apart from the column indices.
    Positioned {
        mode: PositionMode,
        float: FloatMode,
        index: i32,
    },
    /// The isolated surface of a form object.
    Form,
}

/// One column of flowable content inside a block.
#[derive(Debug, Clone)]
pub struct Region {
    pub(crate) parent: BlockId,
    pub(crate) closed: bool,
    pub kind: RegionKind,
    pub owner: Option<ComponentId>,
    /// Bounds relative to the content origin of the parent block. Absolute regions are relative
    /// to the page instead.
    pub total_bounds: Rect,
    pub used: Size,
    pub contents: Vec<RegionContent>,
    pub h_align: TextAlign,
    pub v_align: VerticalAlign,
    pub next: Option<RegionId>,
    pub auto_overflow: bool,
    pub floats: Option<Box<FloatAddition>>,
}

impl Region {
    pub(crate) fn new(parent: BlockId, kind: RegionKind, total_bounds: Rect) -> Self {
        Self {
            parent,
            closed: false,
            kind,
            owner: None,
            total_bounds,
            used: Size::zero(),
            contents: Vec::new(),
            h_align: TextAlign::Left,
            v_align: VerticalAlign::Top,
            next: None,
            auto_overflow: false,
            floats: None,
        }
    }

    pub fn parent(&self) -> BlockId {
        self.parent
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_positioned(&self) -> bool {
        matches!(self.kind, RegionKind::Positioned { .. })
    }

    pub fn is_absolute(&self) -> bool {
        matches!(
            self.kind,
            RegionKind::Positioned {
                mode: PositionMode::Absolute,
                ..
            }
        )
    }

    pub fn is_form(&self) -> bool {
        self.kind == RegionKind::Form
    }

    /// True for the flow columns of a block, which take part in overflow.
    pub fn is_flow(&self) -> bool {
        matches!(self.kind, RegionKind::Column(_))
    }

    pub fn remaining_height(&self) -> f32 {
        (self.total_bounds.height - self.used.height).max(0.0)
    }

    /// Width left for a line spanning `y..y + height` once active floats are taken out.
    pub fn available_width(&self, y: f32, height: f32) -> f32 {
        let reduction = self
            .floats
            .as_ref()
            .map_or(0.0, |f| f.width_reduction(y, height));
        (self.total_bounds.width - reduction).max(0.0)
    }

    /// Space taken by left floats at `y`: lines starting there are shifted right by this much.
    pub fn left_inset(&self, y: f32, height: f32) -> f32 {
        self.floats.as_ref().map_or(0.0, |f| f.left_inset(y, height))
    }

    pub fn right_inset(&self, y: f32, height: f32) -> f32 {
        self.floats.as_ref().map_or(0.0, |f| f.right_inset(y, height))
    }
}

impl LayoutTree {
    /// Appends a new open line to `region`.
    ///
    /// The line's width is the region width less the floats active at the current used height.
    pub fn begin_new_line(&mut self, region: RegionId) -> Result<LineId, LayoutError> {
        let r = self.region(region);
        if r.closed {
            return Err(LayoutError::ClosedItemReused(format!("region {}", region.0)));
        }
        if let Some(last) = r.contents.last() {
            if !self.is_closed(*last) {
                return Err(LayoutError::OpenItemPending(format!("region {}", region.0)));
            }
        }
        let y = r.used.height;
        let width = r.available_width(y, 0.0);
        let index = r
            .contents
            .iter()
            .filter(|c| matches!(c, RegionContent::Line(_)))
            .count();
        let line = Line::new(region, width, y, index, r.h_align, r.v_align);
        let id = self.push_line(line);
        self.region_mut(region).contents.push(RegionContent::Line(id));
        Ok(id)
    }

    /// Closes the trailing item of `region` when it is still open.
    pub fn close_current_item(&mut self, region: RegionId) -> Result<(), LayoutError> {
        match self.region(region).contents.last().copied() {
            Some(RegionContent::Line(id)) if !self.line(id).closed => self.close_line(id),
            Some(RegionContent::Block(id)) if !self.block(id).closed => self.close_block(id),
            _ => Ok(()),
        }
    }

    pub fn close_line(&mut self, id: LineId) -> Result<(), LayoutError> {
        let line = self.line_mut(id);
        if line.closed {
            return Err(LayoutError::ClosedItemReused(format!("line {}", id.0)));
        }
        line.closed = true;
        line.apply_alignment();
        let parent = line.parent;
        let size = Size::new(line.visual_width(), line.height());
        self.add_to_size(parent, size);
        Ok(())
    }

    /// Grows the used size of `region` by a closed child of the given size.
    pub fn add_to_size(&mut self, region: RegionId, size: Size) {
        let r = self.region_mut(region);
        r.used.height += size.height;
        r.used.width = r.used.width.max(size.width);
    }

    /// Registers a float that takes `inset` points of width from every line overlapping
    /// `y_offset..y_offset + height`. An open line loses `inset` from its current width straight
    /// away.
    pub fn add_floating_inset(
        &mut self,
        region: RegionId,
        mode: FloatMode,
        inset: f32,
        y_offset: f32,
        height: f32,
    ) {
        let r = self.region_mut(region);
        let mut float = FloatAddition::new(mode, inset, y_offset, height);
        float.prev = r.floats.take();
        r.floats = Some(Box::new(float));
        if let Some(line) = self.open_line(region) {
            let line = self.line_mut(line);
            let narrowed = line.full_width - inset;
            line.set_max_width(narrowed);
        }
    }

    /// Takes a child out of `region`, recomputing the used size from what remains.
    pub fn remove_item(&mut self, region: RegionId, item: RegionContent) {
        self.region_mut(region).contents.retain(|c| *c != item);
        let remaining = self.region(region).contents.clone();
        let used = remaining
            .into_iter()
            .filter(|c| self.is_closed(*c))
            .map(|c| self.content_size(c))
            .fold(Size::zero(), |acc, s| {
                Size::new(acc.width.max(s.width), acc.height + s.height)
            });
        self.region_mut(region).used = used;
    }

    /// Moves an existing block into `region`, below whatever the region already holds.
    ///
    /// An open block gets its available height reset to what the new region offers, so content
    /// laid out after the move flows against the new limits.
    pub fn add_existing_block(&mut self, region: RegionId, block: BlockId) {
        let (y, remaining) = {
            let r = self.region(region);
            (r.used.height, r.remaining_height())
        };
        {
            let b = self.block_mut(block);
            b.parent = Some(region);
            b.total_bounds.y = y;
        }
        self.region_mut(region).contents.push(RegionContent::Block(block));
        if self.block(block).closed {
            let size = self.block(block).total_bounds.size();
            self.add_to_size(region, size);
        } else {
            self.reset_available_height(block, remaining);
        }
    }

    /// Closes the region: its trailing item first, then every child is clipped to the region width.
    pub fn close_region(&mut self, region: RegionId) -> Result<(), LayoutError> {
        if self.region(region).closed {
            return Err(LayoutError::ClosedItemReused(format!("region {}", region.0)));
        }
        self.close_current_item(region)?;
        let width = self.region(region).total_bounds.width;
        let contents = self.region(region).contents.clone();
        for content in contents {
            match content {
                RegionContent::Line(id) => self.line_mut(id).set_max_width(width),
                RegionContent::Block(id) => {
                    let b = self.block_mut(id);
                    let max = (width - b.total_bounds.x).max(0.0);
                    if b.total_bounds.width > max {
                        b.total_bounds.width = max;
                    }
                }
            }
        }
        self.region_mut(region).closed = true;
        Ok(())
    }

    /// Whether the region's next column can take `required` more points of height.
    pub fn can_move_to_next_region(&self, region: RegionId, force: bool, required: f32) -> bool {
        let r = self.region(region);
        let Some(next) = r.next else {
            return false;
        };
        if !(r.auto_overflow || force) {
            return false;
        }
        let block = self.block(r.parent);
        let next_region = self.region(next);
        block.available_bounds.height >= required && next_region.remaining_height() >= required
    }
}
