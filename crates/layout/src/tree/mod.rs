//! The arena of layout items: blocks, the regions (columns) inside them and the lines inside
//! those regions.
//!
//! Items refer to each other through typed integer handles, never through references, so the
//! whole tree can be mutated freely by the engines and walked afterwards by the arrangement pass.

mod block;
mod floats;
mod line;
mod region;

pub use block::{distribute_columns, Block};
pub use floats::{FloatAddition, FloatIter};
pub use line::{
    count_letters_and_spaces, ComponentRun, FormObjectRun, InlineMarker, JustifySpacing, Line,
    NewLine, PositionedRun, Run, TextBegin, TextChars, WORD_SPACE_WEIGHT,
};
pub use region::{Region, RegionKind};

use crate::LayoutError;
use folio_style::{ColumnOptions, PageLayout, PositionOptions};
use folio_types::{Rect, Size};
use serde::Serialize;

macro_rules! handle {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        pub struct $name(pub(crate) u32);

        impl $name {
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

handle!(BlockId);
handle!(RegionId);
handle!(LineId);
handle!(ComponentId);

/// A child of a region: either a line of inline content or a nested block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionContent {
    Line(LineId),
    Block(BlockId),
}

/// The component a layout item was created for, kept so results can be reported per component.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentInfo {
    pub id: Option<String>,
    pub kind: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPage {
    pub index: usize,
    pub size: Size,
    pub root: BlockId,
}

#[derive(Debug, Default)]
pub struct LayoutTree {
    pub(crate) blocks: Vec<Block>,
    pub(crate) regions: Vec<Region>,
    pub(crate) lines: Vec<Line>,
    pub(crate) pages: Vec<LayoutPage>,
    pub(crate) components: Vec<ComponentInfo>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self, id: BlockId) -> &Block {
        &self.blocks[id.index()]
    }

    pub fn block_mut(&mut self, id: BlockId) -> &mut Block {
        &mut self.blocks[id.index()]
    }

    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id.index()]
    }

    pub fn region_mut(&mut self, id: RegionId) -> &mut Region {
        &mut self.regions[id.index()]
    }

    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.index()]
    }

    pub fn line_mut(&mut self, id: LineId) -> &mut Line {
        &mut self.lines[id.index()]
    }

    pub fn pages(&self) -> &[LayoutPage] {
        &self.pages
    }

    pub fn last_page(&self) -> Option<&LayoutPage> {
        self.pages.last()
    }

    pub fn component(&self, id: ComponentId) -> &ComponentInfo {
        &self.components[id.index()]
    }

    pub fn register_component(&mut self, id: Option<String>, kind: &'static str) -> ComponentId {
        let handle = ComponentId(self.components.len() as u32);
        self.components.push(ComponentInfo { id, kind });
        handle
    }

    pub(crate) fn push_block(&mut self, block: Block) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(block);
        id
    }

    pub(crate) fn push_region(&mut self, region: Region) -> RegionId {
        let id = RegionId(self.regions.len() as u32);
        self.regions.push(region);
        id
    }

    pub(crate) fn push_line(&mut self, line: Line) -> LineId {
        let id = LineId(self.lines.len() as u32);
        self.lines.push(line);
        id
    }

    /// Opens a new page: a root block covering the whole page whose margins come from the page
    /// layout and whose columns are the page columns.
    pub fn new_page(&mut self, layout: &PageLayout) -> BlockId {
        let index = self.pages.len();
        let size = layout.size.dimensions_pt();
        let position = PositionOptions {
            margins: layout.margins.unwrap_or_default(),
            ..Default::default()
        };
        let columns = layout.columns.clone().unwrap_or_else(ColumnOptions::single);
        let mut block = Block::new(None, None, position, columns, Rect::from_size(size));
        block.is_page = true;
        block.page_index = index;
        let root = self.push_block(block);
        self.init_regions(root);
        log::debug!(
            "Opened page {} ({:.1} x {:.1})",
            index + 1,
            size.width,
            size.height
        );
        self.pages.push(LayoutPage { index, size, root });
        root
    }

    /// The size an item reports to its parent region once closed.
    pub fn content_size(&self, content: RegionContent) -> Size {
        match content {
            RegionContent::Line(id) => {
                let line = self.line(id);
                Size::new(line.visual_width(), line.height())
            }
            RegionContent::Block(id) => self.block(id).total_bounds.size(),
        }
    }

    pub fn is_closed(&self, content: RegionContent) -> bool {
        match content {
            RegionContent::Line(id) => self.line(id).closed,
            RegionContent::Block(id) => self.block(id).closed,
        }
    }

    /// Follows the chain of open blocks down from `root` through each block's current region.
    pub fn last_open_block(&self, root: BlockId) -> BlockId {
        let mut current = root;
        loop {
            let region = self.current_region(current);
            match self.region(region).contents.last() {
                Some(RegionContent::Block(child)) if !self.block(*child).closed => {
                    current = *child;
                }
                _ => return current,
            }
        }
    }

    /// The open blocks from `root` down to the deepest one, outermost first.
    pub fn open_block_chain(&self, root: BlockId) -> Vec<BlockId> {
        let mut chain = vec![root];
        let mut current = root;
        loop {
            let region = self.current_region(current);
            match self.region(region).contents.last() {
                Some(RegionContent::Block(child)) if !self.block(*child).closed => {
                    chain.push(*child);
                    current = *child;
                }
                _ => return chain,
            }
        }
    }

    /// The trailing line of `region` when it is still open.
    pub fn open_line(&self, region: RegionId) -> Option<LineId> {
        match self.region(region).contents.last() {
            Some(RegionContent::Line(id)) if !self.line(*id).closed => Some(*id),
            _ => None,
        }
    }

    /// Closes every open item of every page, innermost first.
    pub fn close_all(&mut self) -> Result<(), LayoutError> {
        let roots: Vec<BlockId> = self.pages.iter().map(|p| p.root).collect();
        for root in roots {
            if !self.block(root).closed {
                self.close_block(root)?;
            }
        }
        Ok(())
    }

    /// The block's latest occurrence, following continuations across regions and pages.
    pub fn latest_occurrence(&self, block: BlockId) -> BlockId {
        let mut current = block;
        while let Some(next) = self.block(current).continued_by {
            current = next;
        }
        current
    }
}
