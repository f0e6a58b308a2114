//! Contracts the layout engine expects from its collaborators.
//!
//! The engine never measures glyphs itself and never decides how many pages a document may have;
//! both questions are answered through the traits in this crate.

pub mod font;
pub mod pages;

pub use font::{FontError, FontMetrics, FontMetricsProvider, MonospaceMetrics};
pub use pages::{FixedPages, PageProvider};
