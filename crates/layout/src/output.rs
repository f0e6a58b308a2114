//! The positioned result of a layout pass, ready for a renderer.

use crate::arrange::Arrangement;
use crate::diagnostics::Diagnostic;
use crate::engine::LayoutOutcome;
use folio_style::TextDecoration;
use folio_types::{Rect, Size};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaidOutDocument {
    pub pages: Vec<LaidOutPage>,
    pub arrangements: Vec<Arrangement>,
    pub diagnostics: Vec<Diagnostic>,
    pub outcome: LayoutOutcome,
}

impl LaidOutDocument {
    /// Every text element of the document in page order.
    pub fn texts(&self) -> impl Iterator<Item = &TextElement> {
        self.pages
            .iter()
            .flat_map(|p| p.elements.iter())
            .filter_map(|e| match &e.element {
                LayoutElement::Text(t) => Some(t),
                _ => None,
            })
    }

    /// The arrangements recorded for the component with the given id, one per occurrence.
    pub fn arrangements_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Arrangement> {
        self.arrangements
            .iter()
            .filter(move |a| a.id.as_deref() == Some(id))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LaidOutPage {
    pub index: usize,
    pub size: Size,
    pub elements: Vec<PositionedElement>,
}

/// A single drawable item with its absolute position on the page.
#[derive(Debug, Clone, Serialize)]
pub struct PositionedElement {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Id of the component the element was laid out for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub element: LayoutElement,
}

impl PositionedElement {
    pub fn new(rect: Rect, component: Option<String>, element: LayoutElement) -> Self {
        Self {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
            component,
            element,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum LayoutElement {
    /// The border box of a block-level component.
    Block { kind: &'static str, repeat_index: usize },
    Text(TextElement),
    Image,
    FormObject,
    /// An underline or strike-through drawn for a run of text.
    Decoration { decoration: TextDecoration },
    /// The extent of an inline span on one line.
    InlineSpan,
}

impl fmt::Display for LayoutElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutElement::Block { kind, .. } => write!(f, "Block({kind})"),
            LayoutElement::Text(t) => write!(f, "Text(\"{}\")", t.content),
            LayoutElement::Image => write!(f, "Image"),
            LayoutElement::FormObject => write!(f, "FormObject"),
            LayoutElement::Decoration { decoration } => write!(f, "Decoration({decoration:?})"),
            LayoutElement::InlineSpan => write!(f, "InlineSpan"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    pub content: String,
    pub font_family: String,
    pub font_size: f32,
    /// Absolute y of the baseline.
    pub baseline: f32,
    /// Extra space after each character and word, set when the line was justified.
    pub char_space: f32,
    pub word_space: f32,
    pub decoration: TextDecoration,
}
