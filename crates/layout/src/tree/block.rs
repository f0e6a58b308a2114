use super::{BlockId, ComponentId, LayoutTree, RegionContent, RegionId};
use super::region::{Region, RegionKind};
use crate::LayoutError;
use folio_style::{ColumnOptions, ColumnWidths, FloatMode, PositionMode, PositionOptions};
use folio_types::{Rect, Size};

/// The rectangular layout unit of one component occurrence.
#[derive(Debug, Clone)]
pub struct Block {
    pub(crate) parent: Option<RegionId>,
    pub(crate) closed: bool,
    pub owner: Option<ComponentId>,
    pub position: PositionOptions,
    pub column_options: ColumnOptions,
    pub columns: Vec<RegionId>,
    /// Relative, absolute, floated and form regions, in creation order.
    pub positioned: Vec<RegionId>,
    pub current_column: usize,
    /// Margin box, relative to the origin of the parent region.
    pub total_bounds: Rect,
    /// Content box, relative to the origin of `total_bounds`.
    pub available_bounds: Rect,
    pub explicit_width: Option<f32>,
    pub explicit_height: Option<f32>,
    /// Counts the occurrences of a component that spans several regions or pages.
    pub repeat_index: usize,
    pub is_page: bool,
    pub page_index: usize,
    pub continued_by: Option<BlockId>,
    /// Set once the block has been moved whole to a new region. A block is never moved twice.
    pub moved_whole: bool,
}

impl Block {
    pub(crate) fn new(
        parent: Option<RegionId>,
        owner: Option<ComponentId>,
        position: PositionOptions,
        column_options: ColumnOptions,
        total_bounds: Rect,
    ) -> Self {
        Self {
            parent,
            closed: false,
            owner,
            position,
            column_options,
            columns: Vec::new(),
            positioned: Vec::new(),
            current_column: 0,
            total_bounds,
            available_bounds: Rect::default(),
            explicit_width: None,
            explicit_height: None,
            repeat_index: 0,
            is_page: false,
            page_index: 0,
            continued_by: None,
            moved_whole: false,
        }
    }

    pub fn parent(&self) -> Option<RegionId> {
        self.parent
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Floats and positioned blocks shrink to their content; flow blocks keep the full width.
    fn shrinks_to_content(&self) -> bool {
        (self.position.is_float() || self.position.mode.is_positioned()) && !self.position.fill_width
    }
}

/// Splits `width` into columns, returning each column's x offset and width.
///
/// Explicit widths win, then percentages, then an equal split. Explicit zero entries share
/// whatever the fixed columns leave over.
pub fn distribute_columns(width: f32, options: &ColumnOptions) -> Vec<(f32, f32)> {
    let count = options.column_count();
    let alley = if count > 1 { options.alley } else { 0.0 };
    let content = (width - alley * (count - 1) as f32).max(0.0);

    let widths: Vec<f32> = match &options.widths {
        ColumnWidths::Explicit(list) if !list.is_empty() => {
            let fixed: f32 = list.iter().filter(|w| **w > 0.0).sum();
            let flexible = list.iter().filter(|w| **w <= 0.0).count();
            let share = if flexible > 0 {
                (content - fixed).max(0.0) / flexible as f32
            } else {
                0.0
            };
            list.iter()
                .map(|w| if *w > 0.0 { *w } else { share })
                .collect()
        }
        ColumnWidths::Percent(list) if !list.is_empty() => {
            list.iter().map(|p| content * p / 100.0).collect()
        }
        _ => vec![content / count as f32; count],
    };

    let mut x = 0.0;
    widths
        .into_iter()
        .map(|w| {
            let column = (x, w);
            x += w + alley;
            column
        })
        .collect()
}

impl LayoutTree {
    /// Opens a nested block at the bottom of `region`.
    ///
    /// The block starts with the full region width (or its explicit width plus insets) and all
    /// the height the region has left. Its regions are created straight away.
    pub fn begin_block(
        &mut self,
        region: RegionId,
        owner: Option<ComponentId>,
        position: PositionOptions,
        columns: ColumnOptions,
    ) -> Result<BlockId, LayoutError> {
        if position.mode == PositionMode::Inline {
            return Err(LayoutError::InlineBlock);
        }
        let r = self.region(region);
        if r.closed {
            return Err(LayoutError::ClosedItemReused(format!("region {}", region.0)));
        }
        if let Some(last) = r.contents.last() {
            if !self.is_closed(*last) {
                return Err(LayoutError::OpenItemPending(format!("region {}", region.0)));
            }
        }

        let insets = position.insets();
        let region_width = r.total_bounds.width;
        let explicit_width = position.explicit_width(region_width);
        let explicit_height = position.explicit_height(r.total_bounds.height);

        let mut width = explicit_width.map_or(region_width, |w| w + insets.horizontal());
        if let Some(max) = position.max_width {
            width = width.min(max + insets.horizontal());
        }
        let mut height = explicit_height.map_or(r.remaining_height(), |h| h + insets.vertical());
        if let Some(max) = position.max_height {
            height = height.min(max + insets.vertical());
        }
        let bounds = Rect::new(0.0, r.used.height, width, height);
        let page_index = self.block(r.parent).page_index;

        let mut block = Block::new(Some(region), owner, position, columns, bounds);
        block.explicit_width = explicit_width;
        block.explicit_height = explicit_height;
        block.page_index = page_index;
        let id = self.push_block(block);
        self.region_mut(region).contents.push(RegionContent::Block(id));
        self.init_regions(id);
        Ok(id)
    }

    /// Computes the content rectangle of `block` and carves it into column regions.
    pub fn init_regions(&mut self, block: BlockId) {
        let b = self.block(block);
        let insets = b.position.insets();
        let total = b.total_bounds;
        let mut available = Rect::new(
            insets.left,
            insets.top,
            (total.width - insets.horizontal()).max(0.0),
            (total.height - insets.vertical()).max(0.0),
        );
        if let Some(w) = b.explicit_width {
            available.width = w;
        }
        if let Some(h) = b.explicit_height {
            available.height = h;
        }
        let options = b.column_options.clone();
        let h_align = b.position.h_align;
        let v_align = b.position.v_align;

        let mut ids: Vec<RegionId> = Vec::new();
        for (index, (x, width)) in distribute_columns(available.width, &options)
            .into_iter()
            .enumerate()
        {
            let mut region = Region::new(
                block,
                RegionKind::Column(index),
                Rect::new(x, 0.0, width, available.height),
            );
            region.h_align = h_align;
            region.v_align = v_align;
            region.auto_overflow = options.auto_flow;
            let id = self.push_region(region);
            if let Some(prev) = ids.last() {
                self.region_mut(*prev).next = Some(id);
            }
            ids.push(id);
        }

        let b = self.block_mut(block);
        b.available_bounds = available;
        b.columns = ids;
        b.current_column = 0;
    }

    /// The region new content goes into: an open positioned region when there is one, otherwise
    /// the current column.
    pub fn current_region(&self, block: BlockId) -> RegionId {
        let b = self.block(block);
        if let Some(last) = b.positioned.last() {
            if !self.region(*last).closed {
                return *last;
            }
        }
        b.columns[b.current_column]
    }

    /// Opens a region outside the column flow of `block`.
    pub fn begin_positioned_region(
        &mut self,
        block: BlockId,
        mode: PositionMode,
        float: FloatMode,
        bounds: Rect,
        owner: Option<ComponentId>,
    ) -> RegionId {
        let index = -(self
            .block(block)
            .positioned
            .iter()
            .filter(|r| self.region(**r).is_positioned())
            .count() as i32)
            - 1;
        let mut region = Region::new(
            block,
            RegionKind::Positioned { mode, float, index },
            bounds,
        );
        region.owner = owner;
        let id = self.push_region(region);
        self.block_mut(block).positioned.push(id);
        id
    }

    /// Opens the isolated surface of a form object inside `block`.
    pub fn begin_form_region(
        &mut self,
        block: BlockId,
        size: Size,
        owner: Option<ComponentId>,
    ) -> RegionId {
        let mut region = Region::new(block, RegionKind::Form, Rect::from_size(size));
        region.owner = owner;
        let id = self.push_region(region);
        self.block_mut(block).positioned.push(id);
        id
    }

    /// Closes the block's current column and makes the next one current. Returns `None` when the
    /// current column is the last.
    pub fn advance_column(&mut self, block: BlockId) -> Result<Option<RegionId>, LayoutError> {
        let b = self.block(block);
        let current = b.columns[b.current_column];
        let Some(next) = self.region(current).next else {
            return Ok(None);
        };
        self.close_region(current)?;
        self.block_mut(block).current_column += 1;
        Ok(Some(next))
    }

    /// Gives an open block a new available height after it moved to another region, passing the
    /// change down to its open descendants.
    pub fn reset_available_height(&mut self, block: BlockId, height: f32) {
        let b = self.block(block);
        if b.is_page || b.explicit_height.is_some() {
            return;
        }
        let insets = b.position.insets();
        let mut total_height = height;
        if let Some(max) = b.position.max_height {
            total_height = total_height.min(max + insets.vertical());
        }
        let content_height = (total_height - insets.vertical()).max(0.0);
        let columns = b.columns.clone();

        let b = self.block_mut(block);
        b.total_bounds.height = total_height;
        b.available_bounds.height = content_height;
        for column in &columns {
            self.region_mut(*column).total_bounds.height = content_height;
        }

        let current = self.current_region(block);
        if let Some(RegionContent::Block(child)) = self.region(current).contents.last().copied() {
            if !self.block(child).closed {
                let y = self.block(child).total_bounds.y;
                let remaining = (self.region(current).total_bounds.height - y).max(0.0);
                self.reset_available_height(child, remaining);
            }
        }
    }

    /// Closes every region of `block`, fits the block to its content and reports its size to the
    /// parent region.
    pub fn close_block(&mut self, block: BlockId) -> Result<(), LayoutError> {
        if self.block(block).closed {
            return Err(LayoutError::ClosedItemReused(format!("block {}", block.0)));
        }
        let b = self.block(block);
        let regions: Vec<RegionId> = b.positioned.iter().chain(b.columns.iter()).copied().collect();
        for region in regions {
            if !self.region(region).closed {
                self.close_region(region)?;
            }
        }
        self.shrink_to_fit(block);

        let b = self.block_mut(block);
        b.closed = true;
        let parent = b.parent;
        let size = b.total_bounds.size();
        if let Some(parent) = parent {
            self.add_to_size(parent, size);
        }
        Ok(())
    }

    /// Fits a closed block's bounds to its content.
    ///
    /// Explicit sizes win. Otherwise the height is the tallest column and the width is the full
    /// available width, except for floats and positioned blocks with a single column, which take
    /// the width of their content. Min floors apply before max caps, and the insets are added
    /// back at the end.
    pub fn shrink_to_fit(&mut self, block: BlockId) {
        let b = self.block(block);
        if b.is_page {
            return;
        }
        let position = b.position.clone();
        let available = b.available_bounds;
        let single = b.columns.len() == 1;
        let shrinks = b.shrinks_to_content() && single;

        let column_used: Vec<Size> = b.columns.iter().map(|c| self.region(*c).used).collect();
        let mut content_width = match b.explicit_width {
            Some(w) => w,
            None if shrinks => column_used.first().map_or(0.0, |s| s.width),
            None => available.width,
        };
        let mut content_height = match b.explicit_height {
            Some(h) => h,
            None => column_used.iter().map(|s| s.height).fold(0.0, f32::max),
        };

        for region in &b.positioned {
            let r = self.region(*region);
            let enlarges = match r.kind {
                RegionKind::Positioned { mode, float, .. } => {
                    mode == PositionMode::Relative || float != FloatMode::None
                }
                _ => false,
            };
            if enlarges {
                if b.explicit_width.is_none() {
                    content_width = content_width.max(r.total_bounds.x + r.used.width);
                }
                if b.explicit_height.is_none() {
                    content_height = content_height.max(r.total_bounds.y + r.used.height);
                }
            }
        }

        if let Some(min) = position.min_width {
            content_width = content_width.max(min);
        }
        if let Some(min) = position.min_height {
            content_height = content_height.max(min);
        }
        if let Some(max) = position.max_width {
            content_width = content_width.min(max);
        }
        if let Some(max) = position.max_height {
            content_height = content_height.min(max);
        }

        let columns = b.columns.clone();
        for column in columns {
            let lines: Vec<_> = {
                let r = self.region_mut(column);
                r.total_bounds.height = content_height;
                if shrinks {
                    r.total_bounds.width = content_width;
                }
                r.contents.clone()
            };
            if shrinks {
                for content in lines {
                    if let RegionContent::Line(line) = content {
                        self.line_mut(line).set_max_width(content_width);
                    }
                }
            }
        }

        let insets = position.insets();
        let b = self.block_mut(block);
        b.available_bounds = Rect::new(insets.left, insets.top, content_width, content_height);
        b.total_bounds.width = content_width + insets.horizontal();
        b.total_bounds.height = content_height + insets.vertical();
    }
}
