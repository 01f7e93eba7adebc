//! Behavioural tests for the incremental flex engine.
//!
//! Covers dirty-bit propagation, the spacing modes, grow/shrink, wrapping and
//! enablement round trips, plus golden layouts checked against Taffy.
//!
//! Run with: cargo test --test flex_properties -- --nocapture

use spark_flex::{
    reference_layout, AlignContent, AlignItems, AlignSelf, Edges, FlexBasis, FlexDirection,
    FlexTree, FlexWrap, Geometry, JustifyContent, NodeId, Recalc,
};

// =============================================================================
// HELPERS
// =============================================================================

fn setup() -> FlexTree {
    let _ = env_logger::builder().is_test(true).try_init();
    FlexTree::new()
}

fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 0.01, "expected {expected}, got {actual}");
}

fn assert_geometry_close(actual: Geometry, expected: Geometry) {
    assert_close(actual.x, expected.x);
    assert_close(actual.y, expected.y);
    assert_close(actual.w, expected.w);
    assert_close(actual.h, expected.h);
}

fn container(tree: &mut FlexTree, parent: Option<NodeId>, w: f32, h: f32) -> NodeId {
    let id = tree.create_node();
    tree.set_parent(id, parent).unwrap();
    tree.set_container_enabled(id, true).unwrap();
    tree.set_source_w(id, w).unwrap();
    tree.set_source_h(id, h).unwrap();
    id
}

fn leaf(tree: &mut FlexTree, parent: NodeId, w: f32, h: f32) -> NodeId {
    let id = tree.create_node();
    tree.set_parent(id, Some(parent)).unwrap();
    tree.set_source_w(id, w).unwrap();
    tree.set_source_h(id, h).unwrap();
    id
}

/// Compare every node of a laid-out sub-tree with Taffy's result.
fn assert_matches_reference(tree: &FlexTree, root: NodeId) {
    let reference = reference_layout(tree, root).unwrap();
    for (&id, &expected) in &reference {
        if id == root {
            let actual = tree.layout_geometry(root).unwrap();
            assert_close(actual.w, expected.w);
            assert_close(actual.h, expected.h);
        } else {
            assert_geometry_close(tree.resolved(id).unwrap(), expected);
        }
    }
}

// =============================================================================
// DIRTY BITS
// =============================================================================

#[test]
fn test_force_layout_twice_is_idempotent() {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 100.0);
    leaf(&mut tree, root, 10.0, 10.0);
    tree.layout();

    tree.force_layout(root, true, true).unwrap();
    let after_first = tree.recalc(root).unwrap();
    tree.force_layout(root, true, true).unwrap();

    assert_eq!(tree.recalc(root).unwrap(), after_first);
}

#[test]
fn test_nested_fit_containers_request_once_at_root() {
    let mut tree = setup();
    let root = container(&mut tree, None, 0.0, 0.0);
    let mut parent = root;
    for _ in 0..4 {
        parent = container(&mut tree, Some(parent), 0.0, 0.0);
    }
    let item = leaf(&mut tree, parent, 10.0, 10.0);
    tree.layout();
    assert_eq!(tree.layout_geometry(root).unwrap().w, 10.0);

    let before = tree.layout_request_count();
    tree.force_layout(item, true, true).unwrap();

    assert_eq!(tree.layout_request_count(), before + 1);
    assert_eq!(tree.pending_requests(), &[root]);
    assert_eq!(tree.recalc(root).unwrap(), Recalc::all());
}

#[test]
fn test_request_signal_counts_requests() {
    let mut tree = setup();
    let root = container(&mut tree, None, 50.0, 50.0);
    tree.layout();

    let signal = tree.layout_request_signal();
    let before = signal.get();
    leaf(&mut tree, root, 10.0, 10.0);

    assert!(signal.get() > before);
    assert_eq!(signal.get(), tree.layout_request_count());
}

// =============================================================================
// SPACING
// =============================================================================

fn justified_row(justify: JustifyContent) -> (FlexTree, Vec<NodeId>) {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 10.0);
    tree.update_container(root, |c| c.justify_content = justify).unwrap();
    let items = (0..3).map(|_| leaf(&mut tree, root, 10.0, 10.0)).collect();
    tree.layout();
    (tree, items)
}

#[test]
fn test_justify_space_between() {
    let (tree, items) = justified_row(JustifyContent::SpaceBetween);
    let xs: Vec<f32> = items.iter().map(|&i| tree.layout_geometry(i).unwrap().x).collect();
    assert_eq!(xs, vec![0.0, 45.0, 90.0]);
}

#[test]
fn test_justify_space_around() {
    let (tree, items) = justified_row(JustifyContent::SpaceAround);
    assert_close(tree.layout_geometry(items[0]).unwrap().x, 11.67);
    assert_close(tree.layout_geometry(items[1]).unwrap().x, 45.0);
    assert_close(tree.layout_geometry(items[2]).unwrap().x, 78.33);
}

#[test]
fn test_align_content_stretch_grows_lines() {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 60.0);
    tree.update_container(root, |c| {
        c.wrap = FlexWrap::Wrap;
        c.align_content = AlignContent::Stretch;
        c.align_items = AlignItems::FlexStart;
    })
    .unwrap();
    let first = leaf(&mut tree, root, 60.0, 20.0);
    let second = leaf(&mut tree, root, 60.0, 20.0);
    tree.update_item(second, |i| i.align_self = AlignSelf::FlexEnd).unwrap();

    tree.layout();

    // Two lines of 20 grow to 30 each
    assert_eq!(tree.resolved(first).unwrap().y, 0.0);
    assert_eq!(tree.resolved(second).unwrap().y, 40.0);
}

// =============================================================================
// GROW / SHRINK
// =============================================================================

#[test]
fn test_shrink_stops_at_min_size() {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 10.0);
    let items: Vec<NodeId> = (0..2)
        .map(|_| {
            let item = leaf(&mut tree, root, 0.0, 10.0);
            tree.update_item(item, |i| {
                i.basis = FlexBasis::Fixed(60.0);
                i.min_width = 50.0;
            })
            .unwrap();
            item
        })
        .collect();

    tree.layout();

    assert_eq!(tree.resolved(items[0]).unwrap().w, 50.0);
    assert_eq!(tree.resolved(items[1]).unwrap().w, 50.0);
    assert_eq!(tree.resolved(items[1]).unwrap().x, 50.0);
    assert!(tree.container(root).unwrap().unwrap().shrunk());
}

#[test]
fn test_shrink_overflow_is_not_redistributed() {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 10.0);
    let clamped = leaf(&mut tree, root, 60.0, 10.0);
    let free = leaf(&mut tree, root, 60.0, 10.0);
    tree.update_item(clamped, |i| i.min_width = 58.0).unwrap();

    tree.layout();

    assert_eq!(tree.resolved(clamped).unwrap().w, 58.0);
    assert_eq!(tree.resolved(free).unwrap().w, 50.0);
    assert_eq!(tree.resolved(free).unwrap().x, 58.0);
}

// =============================================================================
// WRAPPING
// =============================================================================

#[test]
fn test_new_line_marks_cross_axis_dirty() {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 0.0);
    tree.update_container(root, |c| c.wrap = FlexWrap::Wrap).unwrap();
    leaf(&mut tree, root, 40.0, 10.0);
    leaf(&mut tree, root, 40.0, 10.0);
    tree.layout();
    assert_eq!(tree.layout_geometry(root).unwrap().h, 10.0);

    let third = leaf(&mut tree, root, 40.0, 10.0);
    assert!(tree.recalc(root).unwrap().contains(Recalc::HEIGHT));

    tree.layout();
    assert_eq!(tree.layout_geometry(root).unwrap().h, 20.0);
    assert_eq!(tree.resolved(third).unwrap(), Geometry::new(0.0, 10.0, 40.0, 10.0));
}

#[test]
fn test_item_growth_wraps_and_propagates_cross_size() {
    let mut tree = setup();
    let root = container(&mut tree, None, 0.0, 0.0);
    tree.update_container(root, |c| c.direction = FlexDirection::Column).unwrap();
    let row = container(&mut tree, Some(root), 100.0, 0.0);
    tree.update_container(row, |c| c.wrap = FlexWrap::Wrap).unwrap();
    leaf(&mut tree, row, 40.0, 10.0);
    let growing = leaf(&mut tree, row, 40.0, 10.0);
    tree.layout();
    assert_eq!(tree.layout_geometry(root).unwrap().h, 10.0);

    // No item's cross size changes, but a second line forms
    tree.set_source_w(growing, 70.0).unwrap();
    assert!(tree.recalc(row).unwrap().contains(Recalc::HEIGHT));
    assert!(tree.recalc(root).unwrap().contains(Recalc::HEIGHT));
    assert_eq!(tree.pending_requests(), &[root]);

    tree.layout();
    assert_eq!(tree.resolved(row).unwrap().h, 20.0);
    assert_eq!(tree.layout_geometry(root).unwrap().h, 20.0);
}

#[test]
fn test_stretched_wrap_keeps_justified_items_inside() {
    let mut tree = setup();
    let root = container(&mut tree, None, 20.0, 0.0);
    tree.update_container(root, |c| {
        c.direction = FlexDirection::Column;
        c.justify_content = JustifyContent::Center;
    })
    .unwrap();
    let row = container(&mut tree, Some(root), 0.0, 0.0);
    tree.update_container(row, |c| c.wrap = FlexWrap::Wrap).unwrap();
    for _ in 0..3 {
        leaf(&mut tree, row, 10.0, 10.0);
    }
    let after = leaf(&mut tree, root, 0.0, 5.0);

    tree.layout();

    assert_eq!(tree.layout_geometry(root).unwrap().h, 25.0);
    assert_eq!(tree.resolved(row).unwrap(), Geometry::new(0.0, 0.0, 20.0, 20.0));
    assert_eq!(tree.resolved(after).unwrap(), Geometry::new(0.0, 20.0, 20.0, 5.0));
}

// =============================================================================
// ENABLEMENT
// =============================================================================

#[test]
fn test_item_disable_enable_round_trip() {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 0.0);
    leaf(&mut tree, root, 20.0, 10.0);
    let item = leaf(&mut tree, root, 20.0, 10.0);
    tree.set_source_x(item, 5.0).unwrap();
    tree.set_source_y(item, 3.0).unwrap();
    tree.layout();

    let managed = tree.layout_geometry(item).unwrap();
    assert_eq!(managed, Geometry::new(25.0, 3.0, 20.0, 10.0));

    tree.set_item_enabled(item, false).unwrap();
    tree.layout();
    assert_eq!(tree.layout_geometry(item).unwrap(), Geometry::new(5.0, 3.0, 20.0, 10.0));

    tree.set_item_enabled(item, true).unwrap();
    tree.layout();
    assert_eq!(tree.layout_geometry(item).unwrap(), managed);
}

#[test]
fn test_nested_container_opt_out_round_trip() {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 50.0);
    leaf(&mut tree, root, 30.0, 0.0);
    let nested = container(&mut tree, Some(root), 20.0, 20.0);
    tree.set_source_x(nested, 5.0).unwrap();
    let inner = leaf(&mut tree, nested, 10.0, 10.0);
    tree.layout();

    let managed = tree.layout_geometry(nested).unwrap();
    assert_eq!(managed, Geometry::new(35.0, 0.0, 20.0, 20.0));

    tree.set_item_enabled(nested, false).unwrap();
    tree.layout();
    assert_eq!(tree.layout_geometry(nested).unwrap(), Geometry::new(5.0, 0.0, 20.0, 20.0));
    assert_eq!(tree.resolved(inner).unwrap(), Geometry::new(0.0, 0.0, 10.0, 10.0));

    tree.set_item_enabled(nested, true).unwrap();
    tree.layout();
    assert_eq!(tree.layout_geometry(nested).unwrap(), managed);
}

#[test]
fn test_disabled_parent_releases_nested_container() {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 50.0);
    leaf(&mut tree, root, 30.0, 0.0);
    let nested = container(&mut tree, Some(root), 20.0, 20.0);
    tree.set_source_x(nested, 5.0).unwrap();
    leaf(&mut tree, nested, 10.0, 10.0);
    tree.layout();
    assert_eq!(tree.layout_geometry(nested).unwrap().x, 35.0);

    tree.set_container_enabled(root, false).unwrap();
    tree.layout();

    assert_eq!(tree.layout_geometry(nested).unwrap(), Geometry::new(5.0, 0.0, 20.0, 20.0));
    assert!(tree.recalc(nested).unwrap().is_empty());
}

#[test]
fn test_hidden_item_leaves_the_line() {
    let mut tree = setup();
    let root = container(&mut tree, None, 0.0, 0.0);
    let first = leaf(&mut tree, root, 20.0, 10.0);
    let second = leaf(&mut tree, root, 20.0, 10.0);
    tree.layout();
    assert_eq!(tree.layout_geometry(root).unwrap().w, 40.0);

    tree.set_visible(first, false).unwrap();
    tree.layout();

    assert_eq!(tree.layout_geometry(root).unwrap().w, 20.0);
    assert_eq!(tree.resolved(second).unwrap().x, 0.0);
}

#[test]
fn test_removed_item_shrinks_container() {
    let mut tree = setup();
    let root = container(&mut tree, None, 0.0, 0.0);
    let first = leaf(&mut tree, root, 20.0, 10.0);
    leaf(&mut tree, root, 30.0, 10.0);
    tree.layout();

    tree.remove_node(first).unwrap();
    tree.layout();

    assert_eq!(tree.layout_geometry(root).unwrap().w, 30.0);
}

#[test]
fn test_rounded_layout() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut tree = FlexTree::with_config(spark_flex::LayoutConfig::new(
        spark_flex::LayoutFlags::ROUND_LAYOUT | spark_flex::LayoutFlags::CHECK_CYCLES,
    ));
    let root = container(&mut tree, None, 100.0, 10.0);
    tree.update_container(root, |c| c.justify_content = JustifyContent::SpaceAround).unwrap();
    let items: Vec<NodeId> = (0..3).map(|_| leaf(&mut tree, root, 10.0, 10.0)).collect();

    tree.layout();

    assert_eq!(tree.layout_geometry(items[0]).unwrap().x, 12.0);
    assert_eq!(tree.layout_geometry(items[2]).unwrap().x, 78.0);
    // Unrounded values stay available
    assert_close(tree.resolved(items[0]).unwrap().x, 11.67);
}

// =============================================================================
// GOLDEN LAYOUTS
// =============================================================================

#[test]
fn test_golden_grow_padding_and_nesting() {
    let mut tree = setup();
    let root = container(&mut tree, None, 200.0, 100.0);
    tree.update_container(root, |c| c.padding = Edges::all(10.0)).unwrap();

    let a = leaf(&mut tree, root, 30.0, 20.0);
    tree.update_item(a, |i| i.grow = 1.0).unwrap();
    let b = leaf(&mut tree, root, 50.0, 0.0);
    tree.update_item(b, |i| {
        i.grow = 2.0;
        i.margin = Edges::all(5.0);
    })
    .unwrap();

    let column = container(&mut tree, Some(root), 0.0, 0.0);
    tree.update_container(column, |c| c.direction = FlexDirection::Column).unwrap();
    leaf(&mut tree, column, 10.0, 10.0);
    leaf(&mut tree, column, 10.0, 10.0);

    tree.layout();

    assert_geometry_close(tree.resolved(b).unwrap(), Geometry::new(71.67, 15.0, 103.33, 70.0));
    assert_matches_reference(&tree, root);
}

#[test]
fn test_golden_wrapped_space_evenly() {
    let mut tree = setup();
    let root = container(&mut tree, None, 100.0, 0.0);
    tree.update_container(root, |c| {
        c.wrap = FlexWrap::Wrap;
        c.justify_content = JustifyContent::SpaceEvenly;
    })
    .unwrap();
    for _ in 0..5 {
        leaf(&mut tree, root, 30.0, 10.0);
    }

    tree.layout();

    assert_eq!(tree.layout_geometry(root).unwrap().h, 20.0);
    assert_matches_reference(&tree, root);
}

#[test]
fn test_golden_column_reverse_centered() {
    let mut tree = setup();
    let root = container(&mut tree, None, 50.0, 100.0);
    tree.update_container(root, |c| {
        c.direction = FlexDirection::ColumnReverse;
        c.align_items = AlignItems::Center;
    })
    .unwrap();
    let first = leaf(&mut tree, root, 10.0, 20.0);
    let second = leaf(&mut tree, root, 20.0, 20.0);

    tree.layout();

    assert_eq!(tree.resolved(first).unwrap(), Geometry::new(20.0, 80.0, 10.0, 20.0));
    assert_eq!(tree.resolved(second).unwrap(), Geometry::new(15.0, 60.0, 20.0, 20.0));
    assert_matches_reference(&tree, root);
}
