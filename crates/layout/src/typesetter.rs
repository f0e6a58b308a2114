//! The entry point of a layout pass.

use crate::arrange::arrange;
use crate::config::LayoutConfig;
use crate::context::LayoutContext;
use crate::engine::{LayoutOutcome, layout_node};
use crate::output::LaidOutDocument;
use crate::LayoutError;
use folio_idf::Node;
use folio_traits::{FontMetricsProvider, PageProvider};
use std::sync::Arc;

/// Lays out component trees onto pages.
///
/// A `Typesetter` holds no per-document state; each call to [`Typesetter::layout`] runs an
/// independent pass with its own page provider.
#[derive(Debug, Clone)]
pub struct Typesetter {
    config: LayoutConfig,
    fonts: Arc<dyn FontMetricsProvider>,
}

impl Typesetter {
    pub fn new(config: LayoutConfig, fonts: Arc<dyn FontMetricsProvider>) -> Self {
        Self { config, fonts }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn layout(
        &self,
        root: &Node,
        pages: Box<dyn PageProvider>,
    ) -> Result<LaidOutDocument, LayoutError> {
        let mut ctx = LayoutContext::new(self.config.clone(), self.fonts.clone(), pages);
        ctx.start_first_page()?;

        let outcome = layout_node(&mut ctx, root)?;
        if let LayoutOutcome::Truncated(reason) = &outcome {
            log::warn!("Layout was truncated: {}", reason);
        }
        ctx.tree.close_all()?;

        let mut arrangements = Vec::new();
        let pages = arrange(&ctx.tree, &mut arrangements);
        log::info!(
            "Laid out {} page(s) with {} diagnostic(s)",
            pages.len(),
            ctx.diagnostics.entries().len()
        );

        Ok(LaidOutDocument {
            pages,
            arrangements,
            diagnostics: ctx.diagnostics.into_entries(),
            outcome,
        })
    }
}
