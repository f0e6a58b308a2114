use folio::{ElementStyle, Node, Thickness};
use folio_style::Dimension;
use serde_json::{json, Value};

pub fn sized(width: Option<f32>, height: Option<f32>) -> ElementStyle {
    ElementStyle {
        width: width.map(Dimension::Pt),
        height: height.map(Dimension::Pt),
        ..Default::default()
    }
}

/// A panel with a 300pt content width, 10pt padding and a 1pt border around two stacked 20pt
/// children.
pub fn boxed_panel() -> Node {
    let style = ElementStyle {
        width: Some(Dimension::Pt(300.0)),
        padding: Some(Thickness::uniform(10.0)),
        border_width: Some(Thickness::uniform(1.0)),
        ..Default::default()
    };
    Node::panel(style, vec![spacer(20.0), spacer(20.0)]).with_id("box")
}

pub fn spacer(height: f32) -> Node {
    Node::panel(sized(None, Some(height)), vec![])
}

/// A numbered list whose items hold spacers of the given heights.
pub fn list_json(heights: &[f32]) -> Value {
    let items: Vec<Value> = heights
        .iter()
        .map(|h| {
            json!({
                "type": "list-item",
                "children": [{ "type": "panel", "meta": { "style": { "height": h } } }]
            })
        })
        .collect();
    json!({ "type": "list", "meta": { "id": "steps" }, "children": items })
}
