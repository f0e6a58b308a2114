//! The state of one layout pass: the item tree under construction, the numbering state and
//! the collaborators the engines call out to.

use crate::config::LayoutConfig;
use crate::diagnostics::Diagnostics;
use crate::engine::LayoutOutcome;
use crate::numbering::{HeadingNumbers, ListNumbering};
use crate::tree::{BlockId, ComponentId, LayoutTree, LineId, RegionContent, RegionId};
use crate::LayoutError;
use folio_idf::Node;
use folio_style::{FontSpec, ListOptions, OverflowSplit};
use folio_traits::{FontMetrics, FontMetricsProvider, PageProvider};
use folio_types::geometry::EPSILON;
use std::sync::Arc;

/// Why content is being moved on to a new region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowMode {
    /// The current region ran out of space.
    Flow,
    /// An explicit column break. Moves to the next column even without automatic column flow.
    ColumnBreak,
    /// An explicit page break. Never-split blocks are split like any other.
    PageBreak,
}

pub struct LayoutContext {
    pub tree: LayoutTree,
    pub numbering: ListNumbering,
    pub headings: HeadingNumbers,
    pub config: LayoutConfig,
    pub diagnostics: Diagnostics,
    fonts: Arc<dyn FontMetricsProvider>,
    pages: Box<dyn PageProvider>,
}

impl std::fmt::Debug for LayoutContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("pages", &self.tree.pages().len())
            .field("config", &self.config)
            .field("diagnostics", &self.diagnostics.entries().len())
            .finish()
    }
}

impl LayoutContext {
    pub fn new(
        config: LayoutConfig,
        fonts: Arc<dyn FontMetricsProvider>,
        pages: Box<dyn PageProvider>,
    ) -> Self {
        Self {
            tree: LayoutTree::new(),
            numbering: ListNumbering::new(),
            headings: HeadingNumbers::new(),
            config,
            diagnostics: Diagnostics::new(),
            fonts,
            pages,
        }
    }

    pub fn is_strict(&self) -> bool {
        self.config.is_strict()
    }

    pub fn font_metrics(&self, font: &FontSpec) -> Result<FontMetrics, LayoutError> {
        Ok(self.fonts.metrics(font)?)
    }

    pub fn measure(&self, font: &FontSpec, text: &str) -> Result<f32, LayoutError> {
        Ok(self.fonts.measure(font, text)?)
    }

    /// Requests the first page from the page provider.
    pub fn start_first_page(&mut self) -> Result<BlockId, LayoutError> {
        let layout = self
            .pages
            .next_page(0)
            .ok_or(LayoutError::NoPageAvailable)?;
        Ok(self.tree.new_page(&layout))
    }

    pub fn page_root(&self) -> Result<BlockId, LayoutError> {
        self.tree
            .last_page()
            .map(|p| p.root)
            .ok_or(LayoutError::NoPageAvailable)
    }

    /// The deepest open block on the current page.
    pub fn current_block(&self) -> Result<BlockId, LayoutError> {
        Ok(self.tree.last_open_block(self.page_root()?))
    }

    pub fn current_region(&self) -> Result<RegionId, LayoutError> {
        Ok(self.tree.current_region(self.current_block()?))
    }

    pub fn register_component(&mut self, node: &Node) -> ComponentId {
        self.tree
            .register_component(node.meta().id.clone(), node.kind())
    }

    /// Closes the open line of the current region, if there is one.
    pub fn close_current_line(&mut self) -> Result<(), LayoutError> {
        let region = self.current_region()?;
        if let Some(line) = self.tree.open_line(region) {
            self.tree.close_line(line)?;
        }
        Ok(())
    }

    /// Whether nothing has been placed above the current position, in the current region or in
    /// any flow region enclosing it. Moving on would not give content more room than it has here.
    ///
    /// Positioned and form regions are isolated: an empty one counts as a top.
    pub fn at_region_top(&self) -> Result<bool, LayoutError> {
        let root = self.page_root()?;
        for block in self.tree.open_block_chain(root).into_iter().rev() {
            let region = self.tree.region(self.tree.current_region(block));
            if region.used.height > EPSILON {
                return Ok(false);
            }
            if !region.is_flow() {
                return Ok(true);
            }
            if block != root && self.tree.block(block).total_bounds.y > EPSILON {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns the open line of the current region, or opens one that fits `line_height`.
    ///
    /// When the current region is full the content moves on to the next region or page. Content
    /// taller than an empty region is placed anyway. `None` means there is nowhere left to go and
    /// the caller should abandon.
    pub fn ensure_line(&mut self, line_height: f32) -> Result<Option<LineId>, LayoutError> {
        let region = self.current_region()?;
        if let Some(line) = self.tree.open_line(region) {
            return Ok(Some(line));
        }
        for _ in 0..2 {
            let region = self.current_region()?;
            let remaining = self.tree.region(region).remaining_height();
            if line_height <= remaining + EPSILON {
                return self.tree.begin_new_line(region).map(Some);
            }
            if self.at_region_top()? {
                let total = self.tree.region(region).total_bounds.height;
                self.element_too_large(line_height, total)?;
                return self.tree.begin_new_line(region).map(Some);
            }
            if !self.overflow(line_height, OverflowMode::Flow)? {
                return Ok(None);
            }
        }
        let region = self.current_region()?;
        self.tree.begin_new_line(region).map(Some)
    }

    /// Reports content taller than an empty region. Strict mode fails; lax mode warns and lets
    /// the content overflow the region.
    pub fn element_too_large(&mut self, height: f32, available: f32) -> Result<(), LayoutError> {
        if self.is_strict() {
            return Err(LayoutError::ElementTooLarge(height, available));
        }
        self.diagnostics.warning(
            "element-too-large",
            format!(
                "Content of height {:.2} exceeds the empty region height of {:.2} and overflows it",
                height, available
            ),
        );
        Ok(())
    }

    /// Gives up on laying out the rest of a subtree.
    pub fn abandon(
        &mut self,
        context: &str,
        required: f32,
        available: f32,
    ) -> Result<LayoutOutcome, LayoutError> {
        if self.is_strict() {
            return Err(LayoutError::CannotFitContent {
                context: context.to_string(),
                required,
                available,
            });
        }
        let reason = format!(
            "Content of height {:.2} does not fit the {:.2} available for {}, layout of the remaining content was abandoned",
            required, available, context
        );
        self.diagnostics.warning("cannot-fit-content", reason.clone());
        Ok(LayoutOutcome::Truncated(reason))
    }

    /// Runs `f` with a numbering group pushed, popping it again whatever `f` returns.
    pub fn with_numbering_group<T>(
        &mut self,
        name: Option<&str>,
        options: &ListOptions,
        f: impl FnOnce(&mut Self) -> Result<T, LayoutError>,
    ) -> Result<T, LayoutError> {
        self.numbering.push_group(name, options);
        let result = f(self);
        self.numbering.pop_group()?;
        result
    }

    /// Moves layout on to the next region with room for `required` points.
    pub fn move_to_next_region(&mut self, required: f32) -> Result<bool, LayoutError> {
        self.overflow(required, OverflowMode::Flow)
    }

    /// Continues the open blocks in a new region: the next column of the nearest block that has
    /// one, or a new page.
    ///
    /// Open blocks that may split are closed and continued by a new occurrence in the new region.
    /// The outermost never-split block is moved there whole instead, which happens at most once
    /// per block. Returns `false` when no region could be found; nothing is changed in that case.
    pub fn overflow(&mut self, required: f32, mode: OverflowMode) -> Result<bool, LayoutError> {
        let root = self.page_root()?;
        let chain = self.tree.open_block_chain(root);
        let Some(deepest) = chain.last().copied() else {
            return Ok(false);
        };
        if !self.tree.region(self.tree.current_region(deepest)).is_flow() {
            return Ok(false);
        }

        let mut stack: Vec<BlockId> = Vec::new();
        let mut to_move: Option<BlockId> = None;
        let mut host: Option<BlockId> = None;

        for &block in chain.iter().rev() {
            let region = self.tree.current_region(block);
            if mode != OverflowMode::PageBreak && self.tree.region(region).is_flow() {
                let forced = mode == OverflowMode::ColumnBreak;
                let needed = if forced { 0.0 } else { required };
                if self.tree.can_move_to_next_region(region, forced, needed) {
                    host = Some(block);
                    break;
                }
            }
            let b = self.tree.block(block);
            if b.is_page {
                break;
            }
            if b.position.has_fixed_height() {
                log::debug!("Block {} has a fixed height and can not overflow", block.0);
                return Ok(false);
            }
            match b.position.overflow_split {
                OverflowSplit::Never if mode != OverflowMode::PageBreak => {
                    to_move = Some(block);
                    stack.clear();
                }
                _ => stack.push(block),
            }
            if let Some(parent) = b.parent {
                if !self.tree.region(parent).is_flow() {
                    return Ok(false);
                }
            }
        }

        if let Some(block) = to_move {
            if self.tree.block(block).moved_whole {
                self.diagnostics.error(
                    "overflow",
                    format!(
                        "Block {} was already moved to a new region once and does not fit in this one either",
                        block.0
                    ),
                );
                return Ok(false);
            }
        }

        let next_page = match host {
            Some(_) => None,
            None => {
                let index = self.tree.pages().len();
                if index >= self.config.max_pages {
                    self.diagnostics.warning(
                        "overflow",
                        format!("The page limit of {} was reached", self.config.max_pages),
                    );
                    return Ok(false);
                }
                match self.pages.next_page(index) {
                    Some(layout) => Some(layout),
                    None => {
                        log::debug!("The page provider supplied no page {}", index + 1);
                        return Ok(false);
                    }
                }
            }
        };

        if let Some(block) = to_move {
            if let Some(parent) = self.tree.block(block).parent {
                self.tree.remove_item(parent, RegionContent::Block(block));
            }
        }
        let deepest_region = self.tree.current_region(stack.first().copied().unwrap_or(deepest));
        self.tree.close_current_item(deepest_region)?;
        for block in &stack {
            self.tree.close_block(*block)?;
        }

        let mut region = match (host, next_page) {
            (Some(host), _) => match self.tree.advance_column(host)? {
                Some(next) => next,
                None => return Ok(false),
            },
            (None, Some(layout)) => {
                self.tree.close_block(root)?;
                let new_root = self.tree.new_page(&layout);
                self.tree.current_region(new_root)
            }
            (None, None) => return Ok(false),
        };

        for old in stack.iter().rev() {
            let new = self.continue_block(*old, region)?;
            region = self.tree.current_region(new);
        }

        if let Some(block) = to_move {
            self.tree.add_existing_block(region, block);
            self.tree.block_mut(block).moved_whole = true;
            log::debug!("Moved block {} whole to region {}", block.0, region.0);
        }
        Ok(true)
    }

    /// Opens the next occurrence of a closed block in `region`.
    fn continue_block(&mut self, old: BlockId, region: RegionId) -> Result<BlockId, LayoutError> {
        let b = self.tree.block(old);
        let owner = b.owner;
        let mut position = b.position.clone();
        let columns = b.column_options.clone();
        let repeat_index = b.repeat_index + 1;
        // The continuation starts where the previous occurrence ended, so no top margin.
        position.margins.top = 0.0;
        let new = self.tree.begin_block(region, owner, position, columns)?;
        self.tree.block_mut(new).repeat_index = repeat_index;
        self.tree.block_mut(old).continued_by = Some(new);
        Ok(new)
    }
}
