//! The resolved style model consumed by the layout engine.
//!
//! Styles arrive fully resolved (no cascade or selector matching happens here); this crate only
//! describes the values and turns them into the option structs the layout engine works with.

pub mod columns;
pub mod dimension;
pub mod element;
pub mod font;
pub mod list;
pub mod page;
pub mod parsers;
pub mod position;
pub mod text;

pub use columns::{ColumnOptions, ColumnWidths};
pub use dimension::Dimension;
pub use element::ElementStyle;
pub use font::{FontSpec, FontStyle, FontWeight};
pub use list::{ListOptions, NumberingStyle};
pub use page::{PageLayout, PageSize};
pub use parsers::StyleParseError;
pub use position::{FloatMode, OverflowSplit, PositionMode, PositionOptions};
pub use text::{TextAlign, TextDecoration, TextOptions, VerticalAlign};
