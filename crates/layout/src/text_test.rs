use crate::config::LayoutConfig;
use crate::engine::{layout_node, LayoutOutcome};
use crate::test_utils::{context_with, custom_page, page_blocks, region_lines, test_context};
use crate::tree::{Line, Run};
use crate::{DiagnosticLevel, LayoutContext, LayoutError};
use folio_idf::Node;
use folio_style::{ElementStyle, PositionMode, TextAlign};

fn line_text(line: &Line) -> String {
    line.runs
        .iter()
        .filter_map(|r| match r {
            Run::TextChars(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}

fn root_lines(ctx: &LayoutContext, page: usize) -> Vec<&Line> {
    let root = ctx.tree.pages()[page].root;
    let column = ctx.tree.block(root).columns[0];
    region_lines(ctx, column)
        .into_iter()
        .map(|l| ctx.tree.line(l))
        .collect()
}

#[test]
fn test_text_wraps_at_spaces() {
    let mut ctx = test_context(100.0, 400.0);
    layout_node(&mut ctx, &Node::text("aaaa bbbb cccc dddd")).unwrap();

    let lines = root_lines(&ctx, 0);
    assert_eq!(lines.len(), 2);
    assert_eq!(line_text(lines[0]), "aaaa bbbb cccc");
    assert_eq!(line_text(lines[1]), "dddd");
    assert!(matches!(lines[0].runs.last(), Some(Run::NewLine(n)) if !n.hard));
    assert_eq!(lines[1].offset_y, 12.0);
    assert!(matches!(&lines[1].runs[0], Run::TextBegin(b) if b.continuation));

    // The last line stays open for whatever inline content follows.
    assert!(lines[0].is_closed());
    assert!(!lines[1].is_closed());
}

#[test]
fn test_whitespace_collapses_and_leading_space_is_dropped() {
    let mut ctx = test_context(400.0, 400.0);
    layout_node(&mut ctx, &Node::text("  hello   big\n world ")).unwrap();

    let lines = root_lines(&ctx, 0);
    assert_eq!(lines.len(), 1);
    assert_eq!(line_text(lines[0]), "hello big world ");
}

#[test]
fn test_word_wider_than_line_gets_its_own_line() {
    let mut ctx = test_context(100.0, 400.0);
    layout_node(&mut ctx, &Node::text("ab abcdefghijklmnopqrstuvwxyz cd")).unwrap();

    let lines = root_lines(&ctx, 0);
    assert_eq!(lines.len(), 3);
    assert_eq!(line_text(lines[1]), "abcdefghijklmnopqrstuvwxyz");
    assert_eq!(lines[1].width(), 156.0);
    assert_eq!(line_text(lines[2]), "cd");
}

#[test]
fn test_consecutive_texts_share_a_line() {
    let mut ctx = test_context(400.0, 400.0);
    layout_node(&mut ctx, &Node::text("ab")).unwrap();
    layout_node(&mut ctx, &Node::text(" cd")).unwrap();

    let lines = root_lines(&ctx, 0);
    assert_eq!(lines.len(), 1);
    assert_eq!(line_text(lines[0]), "ab cd");
    let begins = lines[0]
        .runs
        .iter()
        .filter(|r| matches!(r, Run::TextBegin(_)))
        .count();
    assert_eq!(begins, 2);
}

#[test]
fn test_line_break_ends_the_line() {
    let mut ctx = test_context(400.0, 400.0);
    layout_node(&mut ctx, &Node::text("ab")).unwrap();
    layout_node(&mut ctx, &Node::line_break()).unwrap();
    layout_node(&mut ctx, &Node::line_break()).unwrap();
    layout_node(&mut ctx, &Node::text("cd")).unwrap();

    let lines = root_lines(&ctx, 0);
    assert_eq!(lines.len(), 3);
    assert!(matches!(lines[0].runs.last(), Some(Run::NewLine(n)) if n.hard));
    // An empty line still takes a line height.
    assert_eq!(lines[1].height(), 12.0);
    assert_eq!(lines[2].offset_y, 24.0);
}

#[test]
fn test_justified_paragraph_fills_all_but_last_line() {
    let mut ctx = test_context(100.0, 400.0);
    let style = ElementStyle {
        text_align: Some(TextAlign::Justify),
        ..Default::default()
    };
    let node = Node::panel(style, vec![Node::text("aaaa bbbb cccc dddd")]);
    layout_node(&mut ctx, &node).unwrap();

    let block = ctx.tree.block(page_blocks(&ctx, 0)[0]);
    let lines: Vec<_> = region_lines(&ctx, block.columns[0])
        .into_iter()
        .map(|l| ctx.tree.line(l))
        .collect();
    assert_eq!(lines.len(), 2);

    let spacing = lines[0].spacing.expect("first line is justified");
    assert!((spacing.char_space - 0.5).abs() < 0.01);
    assert!((lines[0].visual_width() - 100.0).abs() < 0.01);
    assert!(lines[1].spacing.is_none());
}

#[test]
fn test_line_wrapped_by_an_inline_image_is_justified() {
    let mut ctx = test_context(100.0, 400.0);
    let style = ElementStyle {
        text_align: Some(TextAlign::Justify),
        ..Default::default()
    };
    let image = Node::image(
        ElementStyle {
            position: Some(PositionMode::Inline),
            ..Default::default()
        },
        60.0,
        12.0,
    );
    let node = Node::panel(style, vec![Node::text("aaaa bbbb"), image]);
    layout_node(&mut ctx, &node).unwrap();

    let block = ctx.tree.block(page_blocks(&ctx, 0)[0]);
    let lines: Vec<_> = region_lines(&ctx, block.columns[0])
        .into_iter()
        .map(|l| ctx.tree.line(l))
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(line_text(lines[0]), "aaaa bbbb");
    assert!(lines[0].spacing.is_some());
    assert!((lines[0].visual_width() - 100.0).abs() < 0.01);
    assert!(lines[1].spacing.is_none());
}

#[test]
fn test_text_continues_on_a_new_page() {
    let mut ctx = test_context(100.0, 30.0);
    layout_node(&mut ctx, &Node::text("aaaa bbbb cccc dddd eeee ffff gggg hhhh")).unwrap();

    assert_eq!(ctx.tree.pages().len(), 2);
    assert_eq!(root_lines(&ctx, 0).len(), 2);
    let second = root_lines(&ctx, 1);
    assert_eq!(second.len(), 1);
    assert_eq!(line_text(second[0]), "gggg hhhh");
}

#[test]
fn test_text_is_truncated_when_pages_run_out() {
    let mut ctx = context_with(LayoutConfig::default(), custom_page(100.0, 30.0), Some(1));
    let outcome =
        layout_node(&mut ctx, &Node::text("aaaa bbbb cccc dddd eeee ffff gggg hhhh")).unwrap();

    assert!(outcome.is_truncated());
    assert_eq!(ctx.tree.pages().len(), 1);
    assert_eq!(ctx.diagnostics.in_category("cannot-fit-content").count(), 1);
    assert_eq!(ctx.diagnostics.count(DiagnosticLevel::Warning), 1);
}

#[test]
fn test_strict_mode_fails_when_pages_run_out() {
    let mut ctx = context_with(LayoutConfig::strict(), custom_page(100.0, 30.0), Some(1));
    let err =
        layout_node(&mut ctx, &Node::text("aaaa bbbb cccc dddd eeee ffff gggg hhhh")).unwrap_err();
    assert!(matches!(err, LayoutError::CannotFitContent { .. }));
}

#[test]
fn test_invisible_text_is_skipped() {
    let mut ctx = test_context(100.0, 100.0);
    let style = ElementStyle {
        position: Some(folio_style::PositionMode::Invisible),
        ..Default::default()
    };
    let outcome = layout_node(&mut ctx, &Node::styled_text(style, "hidden")).unwrap();
    assert_eq!(outcome, LayoutOutcome::Continue);
    assert!(root_lines(&ctx, 0).is_empty());
}
