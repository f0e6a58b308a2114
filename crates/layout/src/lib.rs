use folio_traits::FontError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Content of height {required:.2} does not fit the {available:.2} available for {context}.")]
    CannotFitContent {
        context: String,
        required: f32,
        available: f32,
    },
    #[error("Node has a height of {0:.2} which exceeds the total region height of {1:.2}.")]
    ElementTooLarge(f32, f32),
    #[error("Invalid nested positioning: {0}")]
    InvalidNestedPositioning(String),
    #[error("Layout item {0} is already closed and cannot be reused.")]
    ClosedItemReused(String),
    #[error("Layout item {0} still has an open child item.")]
    OpenItemPending(String),
    #[error("Inline position mode cannot start a new block.")]
    InlineBlock,
    #[error("The numbering stack has no current group.")]
    NoNumberingGroup,
    #[error("The page provider did not supply a first page.")]
    NoPageAvailable,
    #[error(transparent)]
    Font(#[from] FontError),
}

pub mod arrange;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod engine;
pub mod fonts;
pub mod numbering;
pub mod output;
pub mod tree;
pub mod typesetter;

pub use self::arrange::{Arrangement, ArrangementSink};
pub use self::config::{ConformanceMode, LayoutConfig};
pub use self::context::LayoutContext;
pub use self::diagnostics::{Diagnostic, DiagnosticLevel, Diagnostics};
pub use self::engine::{LayoutEngine, LayoutOutcome};
pub use self::fonts::FontLibrary;
pub use self::numbering::{HeadingNumbers, ListNumbering};
pub use self::output::{LaidOutDocument, LaidOutPage, LayoutElement, PositionedElement, TextElement};
pub use self::tree::{BlockId, ComponentId, LayoutTree, LineId, RegionId};
pub use self::typesetter::Typesetter;

// Re-export geometry types used throughout the public API
pub use folio_types::{Point, Rect, Size, Thickness};

#[cfg(test)]
mod overflow_test;
#[cfg(test)]
mod region_test;
#[cfg(test)]
mod test_utils;
#[cfg(test)]
mod text_test;
