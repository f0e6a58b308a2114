mod common;

use common::fixtures::*;
use common::{layout, layout_with, page, text_element, texts_on_page, TestResult};
use folio::{
    ColumnOptions, DiagnosticLevel, ElementStyle, FolioError, LayoutConfig, LayoutElement,
    LayoutError, Node, Thickness,
};
use folio_style::{FloatMode, PositionMode, TextAlign};

#[test]
fn test_box_model_is_reported_at_the_border_box() -> TestResult {
    let doc = layout(&boxed_panel(), page(600.0, 600.0))?;

    let arrangement = doc.arrangements_of("box").next().ok_or("box was not arranged")?;
    assert_close!(arrangement.bounds.x, 0.0);
    assert_close!(arrangement.bounds.y, 0.0);
    assert_close!(arrangement.bounds.width, 322.0);
    assert_close!(arrangement.bounds.height, 62.0);
    assert_eq!(arrangement.kind, "panel");
    assert!(doc.diagnostics.is_empty());
    Ok(())
}

#[test]
fn test_text_flows_onto_following_pages() -> TestResult {
    let words = "aaaa bbbb cccc dddd eeee ffff gggg hhhh";
    let doc = layout(&Node::text(words), page(100.0, 30.0))?;

    assert_eq!(doc.pages.len(), 2);
    assert_eq!(texts_on_page(&doc, 0), vec!["aaaa bbbb cccc", "dddd eeee ffff"]);
    assert_eq!(texts_on_page(&doc, 1), vec!["gggg hhhh"]);
    let last = text_element(&doc, "gggg hhhh").ok_or("missing text")?;
    assert_close!(last.y, 0.0);
    Ok(())
}

#[test]
fn test_centered_text() -> TestResult {
    let style = ElementStyle {
        text_align: Some(TextAlign::Center),
        ..Default::default()
    };
    let doc = layout(&Node::panel(style, vec![Node::text("abcd")]), page(100.0, 100.0))?;

    let text = text_element(&doc, "abcd").ok_or("missing text")?;
    assert_close!(text.x, 38.0);
    Ok(())
}

#[test]
fn test_text_wraps_beside_a_float() -> TestResult {
    let float = Node::panel(
        ElementStyle {
            float: Some(FloatMode::Left),
            ..sized(Some(50.0), Some(20.0))
        },
        vec![],
    );
    let root = Node::panel(
        ElementStyle::default(),
        vec![float, Node::text("aaaa ".repeat(12))],
    );
    let doc = layout(&root, page(200.0, 200.0))?;

    // Two lines sit beside the 20pt float, the third is back at the left edge.
    let lines: Vec<_> = doc.pages[0]
        .elements
        .iter()
        .filter(|e| matches!(e.element, LayoutElement::Text(_)))
        .collect();
    assert!(lines.len() >= 3);
    assert_close!(lines[0].x, 50.0);
    for line in &lines {
        let expected = if line.y < 20.0 { 50.0 } else { 0.0 };
        assert_close!(line.x, expected);
    }
    Ok(())
}

#[test]
fn test_page_columns_fill_left_to_right() -> TestResult {
    let layout_page = page(140.0, 30.0).with_columns(ColumnOptions::equal(2, 20.0));
    let words = "aaaa bbbb cccc dddd eeee ffff";
    let doc = layout(&Node::text(words), layout_page)?;

    // Two 12pt lines fit in a 30pt column; the rest goes to the second column.
    assert_eq!(doc.pages.len(), 1);
    let third = text_element(&doc, "eeee ffff").ok_or("missing text")?;
    assert_close!(third.x, 80.0);
    assert_close!(third.y, 0.0);
    Ok(())
}

#[test]
fn test_form_field_content_stays_inside_the_field() -> TestResult {
    let field = Node::form_field(ElementStyle::default(), 60.0, 20.0, vec![Node::text("ok")]);
    let root = Node::panel(ElementStyle::default(), vec![Node::text("name "), field]);
    let doc = layout(&root, page(300.0, 100.0))?;

    let form = doc.pages[0]
        .elements
        .iter()
        .find(|e| matches!(e.element, LayoutElement::FormObject))
        .ok_or("form object was not placed")?;
    assert_close!(form.x, 30.0);
    assert_close!(form.width, 60.0);

    let ok = text_element(&doc, "ok").ok_or("form content was not placed")?;
    assert!(ok.x >= form.x && ok.x + ok.width <= form.x + form.width + 0.01);
    assert!(ok.y >= form.y && ok.y <= form.y + form.height);
    Ok(())
}

#[test]
fn test_absolute_panel_is_arranged_in_page_coordinates() -> TestResult {
    let stamp = ElementStyle {
        position: Some(PositionMode::Absolute),
        x: Some(120.0),
        y: Some(150.0),
        ..sized(Some(50.0), Some(20.0))
    };
    let frame = ElementStyle {
        padding: Some(Thickness::uniform(10.0)),
        ..Default::default()
    };
    let root = Node::panel(
        frame,
        vec![Node::text("aaaa"), Node::panel(stamp, vec![]).with_id("stamp")],
    )
    .with_id("frame");
    let doc = layout(&root, page(200.0, 300.0))?;

    let stamp = doc.arrangements_of("stamp").next().ok_or("stamp was not arranged")?;
    assert_close!(stamp.bounds.x, 120.0);
    assert_close!(stamp.bounds.y, 150.0);
    assert_close!(stamp.bounds.width, 50.0);
    assert_close!(stamp.bounds.height, 20.0);

    // The stamp takes no room in the flow of its panel.
    let frame = doc.arrangements_of("frame").next().ok_or("frame was not arranged")?;
    assert_close!(frame.bounds.height, 32.0);
    Ok(())
}

#[test]
fn test_relative_panel_is_drawn_where_it_occurs_in_the_flow() -> TestResult {
    let note = ElementStyle {
        position: Some(PositionMode::Relative),
        ..sized(Some(50.0), Some(20.0))
    };
    let root = Node::panel(
        ElementStyle::default(),
        vec![
            Node::text("first"),
            Node::panel(note, vec![Node::text("inside")]).with_id("note"),
            Node::text("last"),
        ],
    );
    let doc = layout(&root, page(200.0, 300.0))?;

    assert_eq!(texts_on_page(&doc, 0), vec!["first", "inside", "last"]);
    let inside = text_element(&doc, "inside").ok_or("missing text")?;
    assert_close!(inside.x, 0.0);
    assert_close!(inside.y, 0.0);
    Ok(())
}

#[test]
fn test_oversized_content_is_placed_with_a_warning() -> TestResult {
    let doc = layout(&Node::image(ElementStyle::default(), 50.0, 500.0), page(200.0, 200.0))?;

    assert_eq!(doc.pages.len(), 1);
    let warnings: Vec<_> = doc
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].category, "element-too-large");
    Ok(())
}

#[test]
fn test_oversized_content_fails_in_strict_mode() {
    let result = layout_with(
        &Node::image(ElementStyle::default(), 50.0, 500.0),
        LayoutConfig::strict(),
        page(200.0, 200.0),
    );
    assert!(matches!(
        result,
        Err(FolioError::Layout(LayoutError::ElementTooLarge(..)))
    ));
}
