use crate::config::LayoutConfig;
use crate::engine::layout_node;
use crate::test_utils::{context_with, custom_page, find_text, layout_document, page_texts, sized};
use crate::{DiagnosticLevel, LayoutError};
use folio_idf::Node;
use folio_style::{ColumnOptions, ElementStyle, OverflowSplit};

fn never_split(children: Vec<Node>) -> Node {
    Node::panel(
        ElementStyle {
            overflow_split: Some(OverflowSplit::Never),
            ..Default::default()
        },
        children,
    )
}

fn spacer(height: f32) -> Node {
    Node::panel(sized(None, Some(height)), vec![])
}

#[test]
fn test_never_split_block_moves_to_the_next_page_whole() {
    let root = Node::panel(
        ElementStyle::default(),
        vec![
            spacer(40.0),
            never_split(vec![spacer(30.0), spacer(50.0)]).with_id("keep"),
        ],
    );
    let doc =
        layout_document(LayoutConfig::default(), custom_page(200.0, 100.0), None, &root).unwrap();

    assert_eq!(doc.pages.len(), 2);
    let kept: Vec<_> = doc.arrangements_of("keep").collect();
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].page_index, 1);
    assert_eq!(kept[0].bounds.y, 0.0);
    assert_eq!(kept[0].bounds.height, 80.0);
    assert!(!doc.outcome.is_truncated());
}

#[test]
fn test_never_split_block_is_moved_only_once() {
    let root = Node::panel(
        ElementStyle::default(),
        vec![
            spacer(40.0),
            never_split(vec![spacer(30.0), spacer(50.0), spacer(50.0)]),
        ],
    );
    let doc =
        layout_document(LayoutConfig::default(), custom_page(200.0, 100.0), None, &root).unwrap();

    assert_eq!(doc.pages.len(), 2);
    assert!(doc.outcome.is_truncated());
    let errors: Vec<_> = doc
        .diagnostics
        .iter()
        .filter(|d| d.level == DiagnosticLevel::Error)
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].category, "overflow");
}

#[test]
fn test_never_split_block_fails_in_strict_mode() {
    let root = Node::panel(
        ElementStyle::default(),
        vec![
            spacer(40.0),
            never_split(vec![spacer(30.0), spacer(50.0), spacer(50.0)]),
        ],
    );
    let err = layout_document(LayoutConfig::strict(), custom_page(200.0, 100.0), None, &root)
        .unwrap_err();
    assert!(matches!(err, LayoutError::CannotFitContent { .. }));
}

#[test]
fn test_splitting_block_is_continued_on_the_next_page() {
    let root = Node::panel(
        ElementStyle::default(),
        vec![spacer(60.0), spacer(60.0), spacer(60.0)],
    )
    .with_id("body");
    let doc =
        layout_document(LayoutConfig::default(), custom_page(200.0, 100.0), None, &root).unwrap();

    assert_eq!(doc.pages.len(), 3);
    let occurrences: Vec<_> = doc.arrangements_of("body").collect();
    assert_eq!(occurrences.len(), 3);
    let repeats: Vec<_> = occurrences.iter().map(|a| a.repeat_index).collect();
    assert_eq!(repeats, vec![0, 1, 2]);
    assert!(doc.diagnostics.is_empty());
}

#[test]
fn test_fixed_height_block_does_not_overflow() {
    let mut ctx = context_with(LayoutConfig::default(), custom_page(200.0, 100.0), None);
    let fixed = Node::panel(sized(None, Some(50.0)), vec![Node::text("aaaa ".repeat(200))]);
    let outcome = layout_node(&mut ctx, &fixed).unwrap();

    assert!(outcome.is_truncated());
    assert_eq!(ctx.tree.pages().len(), 1);
    assert_eq!(ctx.diagnostics.in_category("cannot-fit-content").count(), 1);
}

#[test]
fn test_page_break_starts_a_new_page() {
    let root = Node::panel(
        ElementStyle::default(),
        vec![Node::text("first"), Node::page_break(), Node::text("second")],
    )
    .with_id("body");
    let doc =
        layout_document(LayoutConfig::default(), custom_page(200.0, 200.0), None, &root).unwrap();

    assert_eq!(doc.pages.len(), 2);
    assert_eq!(page_texts(&doc, 0), vec!["first"]);
    assert_eq!(page_texts(&doc, 1), vec!["second"]);

    let (_, second) = find_text(&doc, "second").unwrap();
    assert_eq!(second.y, 0.0);
    assert_eq!(doc.arrangements_of("body").count(), 2);
}

#[test]
fn test_column_break_moves_to_the_next_column() {
    let page = custom_page(200.0, 200.0).with_columns(ColumnOptions::equal(2, 0.0));
    let root = Node::panel(
        ElementStyle::default(),
        vec![Node::text("left"), Node::column_break(), Node::text("right")],
    );
    let doc = layout_document(LayoutConfig::default(), page, None, &root).unwrap();

    assert_eq!(doc.pages.len(), 1);
    let (_, left) = find_text(&doc, "left").unwrap();
    let (_, right) = find_text(&doc, "right").unwrap();
    assert_eq!(left.x, 0.0);
    assert_eq!(right.x, 100.0);
    assert_eq!(right.y, 0.0);
}

#[test]
fn test_column_break_in_last_column_starts_a_new_page() {
    let root = Node::panel(
        ElementStyle::default(),
        vec![Node::text("first"), Node::column_break(), Node::text("second")],
    );
    let doc =
        layout_document(LayoutConfig::default(), custom_page(200.0, 200.0), None, &root).unwrap();

    assert_eq!(doc.pages.len(), 2);
    assert_eq!(page_texts(&doc, 1), vec!["second"]);
}

#[test]
fn test_break_with_nowhere_to_go_is_ignored() {
    let mut ctx = context_with(LayoutConfig::default(), custom_page(200.0, 200.0), Some(1));
    layout_node(&mut ctx, &Node::text("first")).unwrap();
    let outcome = layout_node(&mut ctx, &Node::page_break()).unwrap();

    assert!(!outcome.is_truncated());
    assert_eq!(ctx.tree.pages().len(), 1);
    assert_eq!(ctx.diagnostics.in_category("break").count(), 1);
}

#[test]
fn test_page_limit_truncates_the_document() {
    let config = LayoutConfig {
        max_pages: 2,
        ..Default::default()
    };
    let root = Node::panel(ElementStyle::default(), (0..5).map(|_| spacer(80.0)).collect());
    let doc = layout_document(config, custom_page(200.0, 100.0), None, &root).unwrap();

    assert_eq!(doc.pages.len(), 2);
    assert!(doc.outcome.is_truncated());
    assert!(doc
        .diagnostics
        .iter()
        .any(|d| d.category == "overflow" && d.level == DiagnosticLevel::Warning));
}
