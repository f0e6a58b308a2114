use crate::engine::layout_node;
use crate::test_utils::{region_lines, sized, test_context};
use crate::tree::{ComponentRun, RegionContent, RegionKind, Run};
use folio_idf::Node;
use folio_style::{ColumnOptions, FloatMode, PositionMode, PositionOptions};
use folio_types::Size;

fn component(width: f32, height: f32) -> Run {
    Run::Component(ComponentRun {
        owner: None,
        width,
        height,
        x: 0.0,
    })
}

#[test]
fn test_used_size_sums_heights_and_takes_widest_child() {
    let mut ctx = test_context(300.0, 300.0);
    let region = ctx.current_region().unwrap();

    for (w, h) in [(50.0, 10.0), (80.0, 20.0), (30.0, 5.0)] {
        let line = ctx.tree.begin_new_line(region).unwrap();
        ctx.tree.line_mut(line).push_run(component(w, h));
        ctx.tree.close_line(line).unwrap();
    }
    let block = ctx
        .tree
        .begin_block(region, None, PositionOptions::default(), ColumnOptions::single())
        .unwrap();
    ctx.tree.close_block(block).unwrap();

    let r = ctx.tree.region(region);
    assert_eq!(r.used, Size::new(300.0, 35.0));
    assert_eq!(ctx.tree.line(region_lines(&ctx, region)[2]).offset_y, 30.0);
}

#[test]
fn test_removing_an_item_recomputes_used_size() {
    let mut ctx = test_context(300.0, 300.0);
    let region = ctx.current_region().unwrap();
    let mut lines = Vec::new();
    for (w, h) in [(50.0, 10.0), (80.0, 20.0)] {
        let line = ctx.tree.begin_new_line(region).unwrap();
        ctx.tree.line_mut(line).push_run(component(w, h));
        ctx.tree.close_line(line).unwrap();
        lines.push(line);
    }

    ctx.tree.remove_item(region, RegionContent::Line(lines[1]));
    assert_eq!(ctx.tree.region(region).used, Size::new(50.0, 10.0));
}

#[test]
fn test_open_item_blocks_a_new_line() {
    let mut ctx = test_context(300.0, 300.0);
    let region = ctx.current_region().unwrap();
    ctx.tree.begin_new_line(region).unwrap();
    assert!(ctx.tree.begin_new_line(region).is_err());
}

#[test]
fn test_left_float_narrows_only_overlapping_lines() {
    let mut ctx = test_context(200.0, 300.0);
    let region = ctx.current_region().unwrap();
    ctx.tree
        .add_floating_inset(region, FloatMode::Left, 40.0, 0.0, 30.0);

    let mut widths = Vec::new();
    for _ in 0..4 {
        let line = ctx.tree.begin_new_line(region).unwrap();
        ctx.tree.line_mut(line).push_run(component(10.0, 10.0));
        widths.push(ctx.tree.line(line).full_width);
        ctx.tree.close_line(line).unwrap();
    }
    assert_eq!(widths, vec![160.0, 160.0, 160.0, 200.0]);
    assert_eq!(ctx.tree.region(region).left_inset(5.0, 10.0), 40.0);
    assert_eq!(ctx.tree.region(region).left_inset(30.0, 10.0), 0.0);
}

#[test]
fn test_float_narrows_the_open_line() {
    let mut ctx = test_context(200.0, 300.0);
    let region = ctx.current_region().unwrap();
    let line = ctx.tree.begin_new_line(region).unwrap();
    ctx.tree
        .add_floating_inset(region, FloatMode::Right, 50.0, 0.0, 30.0);
    assert_eq!(ctx.tree.line(line).full_width, 150.0);
}

#[test]
fn test_each_float_narrows_the_open_line_again() {
    let mut ctx = test_context(200.0, 300.0);
    let region = ctx.current_region().unwrap();
    let line = ctx.tree.begin_new_line(region).unwrap();
    ctx.tree
        .add_floating_inset(region, FloatMode::Left, 40.0, 0.0, 30.0);
    ctx.tree
        .add_floating_inset(region, FloatMode::Right, 30.0, 0.0, 30.0);

    let available = ctx.tree.region(region).available_width(0.0, 0.0);
    assert_eq!(available, 130.0);
    assert_eq!(ctx.tree.line(line).full_width, available);
}

#[test]
fn test_floated_panel_takes_width_from_following_text() {
    let mut ctx = test_context(200.0, 300.0);
    let float = Node::panel(
        folio_style::ElementStyle {
            float: Some(FloatMode::Left),
            ..sized(Some(50.0), Some(30.0))
        },
        vec![],
    );
    let text = "wxyz ".repeat(25);
    layout_node(&mut ctx, &float).unwrap();
    layout_node(&mut ctx, &Node::text(text)).unwrap();

    let root = ctx.tree.pages()[0].root;
    let column = ctx.tree.block(root).columns[0];
    let floated = ctx.tree.block(root).positioned[0];
    let r = ctx.tree.region(floated);
    assert!(matches!(
        r.kind,
        RegionKind::Positioned {
            float: FloatMode::Left,
            ..
        }
    ));
    assert_eq!(r.total_bounds.width, 50.0);
    assert_eq!(r.total_bounds.height, 30.0);

    // Floats do not take up flow height.
    let lines = region_lines(&ctx, column);
    assert_eq!(ctx.tree.line(lines[0]).offset_y, 0.0);
    for line in lines.iter().map(|l| ctx.tree.line(*l)) {
        let expected = if line.offset_y < 30.0 { 150.0 } else { 200.0 };
        assert_eq!(line.full_width, expected, "line at {}", line.offset_y);
    }
}

#[test]
fn test_right_float_sits_against_the_right_edge() {
    let mut ctx = test_context(200.0, 300.0);
    let float = Node::panel(
        folio_style::ElementStyle {
            float: Some(FloatMode::Right),
            ..sized(Some(60.0), Some(20.0))
        },
        vec![],
    );
    layout_node(&mut ctx, &float).unwrap();

    let root = ctx.tree.pages()[0].root;
    let r = ctx.tree.region(ctx.tree.block(root).positioned[0]);
    assert_eq!(r.total_bounds.x, 140.0);
    let column = ctx.tree.region(ctx.tree.block(root).columns[0]);
    assert_eq!(column.right_inset(0.0, 10.0), 60.0);
    assert_eq!(column.left_inset(0.0, 10.0), 0.0);
}

#[test]
fn test_relative_panel_does_not_take_flow_space() {
    let mut ctx = test_context(200.0, 300.0);
    let style = folio_style::ElementStyle {
        position: Some(PositionMode::Relative),
        x: Some(10.0),
        y: Some(15.0),
        ..sized(Some(40.0), Some(20.0))
    };
    layout_node(&mut ctx, &Node::panel(style, vec![])).unwrap();

    let root = ctx.tree.pages()[0].root;
    let column = ctx.tree.region(ctx.tree.block(root).columns[0]);
    assert_eq!(column.used.height, 0.0);

    let positioned = ctx.tree.region(ctx.tree.block(root).positioned[0]);
    assert!(positioned.is_positioned());
    assert!(!positioned.is_flow());
    assert_eq!(positioned.total_bounds.x, 10.0);
    assert_eq!(positioned.total_bounds.y, 15.0);
    assert!(positioned.is_closed());
}

#[test]
fn test_positioned_panel_leaves_a_marker_in_the_flow() {
    let mut ctx = test_context(200.0, 300.0);
    let style = folio_style::ElementStyle {
        position: Some(PositionMode::Relative),
        ..sized(Some(50.0), Some(20.0))
    };
    layout_node(&mut ctx, &Node::panel(style, vec![])).unwrap();

    let root = ctx.tree.pages()[0].root;
    let column = ctx.tree.block(root).columns[0];
    let positioned = ctx.tree.block(root).positioned[0];
    let lines = region_lines(&ctx, column);
    assert_eq!(lines.len(), 1);
    let markers: Vec<_> = ctx
        .tree
        .line(lines[0])
        .runs
        .iter()
        .filter_map(|run| match run {
            Run::Positioned(marker) => Some(marker.region),
            _ => None,
        })
        .collect();
    assert_eq!(markers, vec![positioned]);
}

#[test]
fn test_absolute_panel_is_bounded_by_the_page() {
    let mut ctx = test_context(200.0, 300.0);
    let style = folio_style::ElementStyle {
        position: Some(PositionMode::Absolute),
        x: Some(120.0),
        y: Some(150.0),
        ..sized(Some(50.0), Some(20.0))
    };
    layout_node(&mut ctx, &Node::text("aaaa")).unwrap();
    layout_node(&mut ctx, &Node::panel(style, vec![])).unwrap();
    ctx.close_current_line().unwrap();

    let root = ctx.tree.pages()[0].root;
    let column = ctx.tree.region(ctx.tree.block(root).columns[0]);
    assert_eq!(column.used.height, 12.0);

    let absolute = ctx.tree.region(ctx.tree.block(root).positioned[0]);
    assert!(absolute.is_absolute());
    assert!(absolute.is_closed());
    assert_eq!(absolute.total_bounds.x, 120.0);
    assert_eq!(absolute.total_bounds.y, 150.0);
    assert_eq!(absolute.total_bounds.width, 80.0);
    assert_eq!(absolute.total_bounds.height, 150.0);
    assert_eq!(absolute.used, Size::new(50.0, 20.0));
}

#[test]
fn test_column_overflow_requires_room_in_next_column() {
    let mut ctx = test_context(200.0, 100.0);
    let region = ctx.current_region().unwrap();
    let options = ColumnOptions::equal(2, 0.0);
    let block = ctx
        .tree
        .begin_block(region, None, PositionOptions::default(), options)
        .unwrap();
    let first = ctx.tree.block(block).columns[0];

    assert!(ctx.tree.can_move_to_next_region(first, false, 50.0));
    assert!(!ctx.tree.can_move_to_next_region(first, false, 150.0));

    let last = ctx.tree.block(block).columns[1];
    assert!(!ctx.tree.can_move_to_next_region(last, true, 0.0));
}
