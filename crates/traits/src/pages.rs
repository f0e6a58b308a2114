//! Page orchestration: deciding the geometry of each new page.

use folio_style::PageLayout;
use std::fmt::Debug;

/// Supplies pages to the layout engine on demand.
///
/// The engine asks for page `index` (zero based) when the document starts and again every time
/// content overflows the last region of the current page. Returning `None` means no further page
/// may be created, which makes the overflowing content unplaceable.
pub trait PageProvider: Debug {
    fn next_page(&mut self, index: usize) -> Option<PageLayout>;
}

/// Hands out identical pages, optionally up to a maximum count.
#[derive(Debug, Clone)]
pub struct FixedPages {
    pub layout: PageLayout,
    pub max_pages: Option<usize>,
}

impl FixedPages {
    pub fn new(layout: PageLayout) -> Self {
        Self {
            layout,
            max_pages: None,
        }
    }

    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = Some(max);
        self
    }
}

impl PageProvider for FixedPages {
    fn next_page(&mut self, index: usize) -> Option<PageLayout> {
        match self.max_pages {
            Some(max) if index >= max => None,
            _ => Some(self.layout.clone()),
        }
    }
}
