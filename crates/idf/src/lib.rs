//! Intermediate Document Format (IDF)
//! The styled component tree handed to the layout engine. Every node carries its fully resolved
//! style; nothing here knows about cascading or selectors.

use folio_style::ElementStyle;
use serde::{Deserialize, Serialize};

/// A string type for the document.
pub type TextStr = String;

/// A common metadata structure for all nodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TextStr>,
    pub style: ElementStyle,
}

impl NodeMetadata {
    pub fn styled(style: ElementStyle) -> Self {
        Self { id: None, style }
    }

    pub fn with_id(mut self, id: impl Into<TextStr>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// One component of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Node {
    /// A generic container. Whether it lays out as a block, an inline span or a positioned box
    /// is decided by the position mode of its style.
    Panel {
        #[serde(default)]
        meta: NodeMetadata,
        #[serde(default)]
        children: Vec<Node>,
    },
    /// A run of text, wrapped onto lines by the layout engine.
    Text {
        #[serde(default)]
        meta: NodeMetadata,
        content: TextStr,
    },
    /// A hard line break.
    LineBreak {
        #[serde(default)]
        meta: NodeMetadata,
    },
    /// A replaced element with a fixed intrinsic size, such as an image.
    Image {
        #[serde(default)]
        meta: NodeMetadata,
        width: f32,
        height: f32,
    },
    /// An isolated surface (for example an input field) with its own nested content.
    FormField {
        #[serde(default)]
        meta: NodeMetadata,
        width: f32,
        height: f32,
        #[serde(default)]
        children: Vec<Node>,
    },
    List {
        #[serde(default)]
        meta: NodeMetadata,
        #[serde(default)]
        children: Vec<Node>,
    },
    ListItem {
        #[serde(default)]
        meta: NodeMetadata,
        #[serde(default)]
        children: Vec<Node>,
    },
    Heading {
        #[serde(default)]
        meta: NodeMetadata,
        level: u8,
        #[serde(default)]
        children: Vec<Node>,
    },
    PageBreak {
        #[serde(default)]
        meta: NodeMetadata,
    },
    ColumnBreak {
        #[serde(default)]
        meta: NodeMetadata,
    },
}

impl Node {
    pub fn meta(&self) -> &NodeMetadata {
        match self {
            Node::Panel { meta, .. }
            | Node::Text { meta, .. }
            | Node::LineBreak { meta }
            | Node::Image { meta, .. }
            | Node::FormField { meta, .. }
            | Node::List { meta, .. }
            | Node::ListItem { meta, .. }
            | Node::Heading { meta, .. }
            | Node::PageBreak { meta }
            | Node::ColumnBreak { meta } => meta,
        }
    }

    pub fn style(&self) -> &ElementStyle {
        &self.meta().style
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Panel { children, .. }
            | Node::FormField { children, .. }
            | Node::List { children, .. }
            | Node::ListItem { children, .. }
            | Node::Heading { children, .. } => children,
            _ => &[],
        }
    }

    /// Returns a string identifier for the node type, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Panel { .. } => "panel",
            Node::Text { .. } => "text",
            Node::LineBreak { .. } => "line-break",
            Node::Image { .. } => "image",
            Node::FormField { .. } => "form-field",
            Node::List { .. } => "list",
            Node::ListItem { .. } => "list-item",
            Node::Heading { .. } => "heading",
            Node::PageBreak { .. } => "page-break",
            Node::ColumnBreak { .. } => "column-break",
        }
    }

    // --- Builders, mostly for programmatic construction and tests ---

    pub fn panel(style: ElementStyle, children: Vec<Node>) -> Node {
        Node::Panel {
            meta: NodeMetadata::styled(style),
            children,
        }
    }

    pub fn text(content: impl Into<TextStr>) -> Node {
        Node::Text {
            meta: NodeMetadata::default(),
            content: content.into(),
        }
    }

    pub fn styled_text(style: ElementStyle, content: impl Into<TextStr>) -> Node {
        Node::Text {
            meta: NodeMetadata::styled(style),
            content: content.into(),
        }
    }

    pub fn image(style: ElementStyle, width: f32, height: f32) -> Node {
        Node::Image {
            meta: NodeMetadata::styled(style),
            width,
            height,
        }
    }

    pub fn line_break() -> Node {
        Node::LineBreak {
            meta: NodeMetadata::default(),
        }
    }

    pub fn page_break() -> Node {
        Node::PageBreak {
            meta: NodeMetadata::default(),
        }
    }

    pub fn column_break() -> Node {
        Node::ColumnBreak {
            meta: NodeMetadata::default(),
        }
    }

    pub fn form_field(style: ElementStyle, width: f32, height: f32, children: Vec<Node>) -> Node {
        Node::FormField {
            meta: NodeMetadata::styled(style),
            width,
            height,
            children,
        }
    }

    pub fn list(style: ElementStyle, children: Vec<Node>) -> Node {
        Node::List {
            meta: NodeMetadata::styled(style),
            children,
        }
    }

    pub fn list_item(style: ElementStyle, children: Vec<Node>) -> Node {
        Node::ListItem {
            meta: NodeMetadata::styled(style),
            children,
        }
    }

    pub fn heading(level: u8, style: ElementStyle, children: Vec<Node>) -> Node {
        Node::Heading {
            meta: NodeMetadata::styled(style),
            level,
            children,
        }
    }

    /// Attaches an id to the node, used to find its arrangement after layout.
    pub fn with_id(mut self, id: impl Into<TextStr>) -> Node {
        let id = id.into();
        match &mut self {
            Node::Panel { meta, .. }
            | Node::Text { meta, .. }
            | Node::LineBreak { meta }
            | Node::Image { meta, .. }
            | Node::FormField { meta, .. }
            | Node::List { meta, .. }
            | Node::ListItem { meta, .. }
            | Node::Heading { meta, .. }
            | Node::PageBreak { meta }
            | Node::ColumnBreak { meta } => meta.id = Some(id),
        }
        self
    }
}
