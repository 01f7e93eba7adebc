//! Taffy Bridge - reference layouts.
//!
//! Converts a flex sub-tree to a Taffy tree, runs Taffy's flexbox and returns
//! the geometry it computes per node. Used to check golden layouts for the
//! configurations where both engines agree (fixed sizes, grow, justify and
//! align without min-size clamping).

use std::collections::HashMap;

use taffy::prelude::TaffyMaxContent;
use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems, AlignSelf as TaffyAlignSelf,
    Dimension as TaffyDimension, Display, FlexDirection as TaffyFlexDirection,
    FlexWrap as TaffyFlexWrap, JustifyContent as TaffyJustifyContent, LengthPercentage,
    LengthPercentageAuto, NodeId as TaffyNodeId, Rect, Size, Style, TaffyTree,
};

use crate::engine::{FlexTree, NodeId};
use crate::error::{Result, TreeError};
use crate::types::{
    AlignContent, AlignItems, AlignSelf, Edges, FlexBasis, FlexDirection, FlexWrap, Geometry,
    JustifyContent,
};

// =============================================================================
// CONVERSIONS
// =============================================================================

fn to_taffy_dimension(size: Option<f32>) -> TaffyDimension {
    match size {
        Some(size) => TaffyDimension::Length(size),
        None => TaffyDimension::Auto,
    }
}

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> TaffyJustifyContent {
    match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    }
}

fn to_taffy_align_items(align: AlignItems) -> TaffyAlignItems {
    match align {
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
    }
}

fn to_taffy_align_self(align: AlignSelf) -> Option<TaffyAlignSelf> {
    align.to_align_items().map(to_taffy_align_items)
}

fn to_taffy_align_content(align: AlignContent) -> TaffyAlignContent {
    match align {
        AlignContent::FlexStart => TaffyAlignContent::FlexStart,
        AlignContent::Center => TaffyAlignContent::Center,
        AlignContent::FlexEnd => TaffyAlignContent::FlexEnd,
        AlignContent::SpaceBetween => TaffyAlignContent::SpaceBetween,
        AlignContent::SpaceAround => TaffyAlignContent::SpaceAround,
        AlignContent::SpaceEvenly => TaffyAlignContent::SpaceEvenly,
        AlignContent::Stretch => TaffyAlignContent::Stretch,
    }
}

fn to_taffy_padding(edges: Edges) -> Rect<LengthPercentage> {
    Rect {
        top: LengthPercentage::Length(edges.top),
        right: LengthPercentage::Length(edges.right),
        bottom: LengthPercentage::Length(edges.bottom),
        left: LengthPercentage::Length(edges.left),
    }
}

fn to_taffy_margin(edges: Edges) -> Rect<LengthPercentageAuto> {
    Rect {
        top: LengthPercentageAuto::Length(edges.top),
        right: LengthPercentageAuto::Length(edges.right),
        bottom: LengthPercentageAuto::Length(edges.bottom),
        left: LengthPercentageAuto::Length(edges.left),
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn build_style(tree: &FlexTree, id: NodeId) -> Style {
    let target = &tree.node(id).target;

    let mut style = Style {
        display: Display::Flex,
        size: Size {
            width: to_taffy_dimension(tree.explicit_size(id, true)),
            height: to_taffy_dimension(tree.explicit_size(id, false)),
        },
        // Items never shrink below their min size, not their content size
        min_size: Size {
            width: TaffyDimension::Length(0.0),
            height: TaffyDimension::Length(0.0),
        },
        ..Default::default()
    };

    if let Some(container) = &target.container {
        style.flex_direction = to_taffy_flex_direction(container.direction);
        style.flex_wrap = to_taffy_flex_wrap(container.wrap);
        style.justify_content = Some(to_taffy_justify_content(container.justify_content));
        style.align_items = Some(to_taffy_align_items(container.align_items));
        style.align_content = Some(to_taffy_align_content(container.align_content));
        style.padding = to_taffy_padding(container.padding);
    }

    if let (Some(item), Some(_)) = (&target.item, tree.resolve_flex_parent(id)) {
        style.flex_grow = item.grow;
        style.flex_shrink = item.shrink;
        style.flex_basis = match item.basis {
            FlexBasis::Auto => TaffyDimension::Auto,
            FlexBasis::Fixed(basis) => TaffyDimension::Length(basis),
        };
        style.align_self = to_taffy_align_self(item.align_self);
        style.margin = to_taffy_margin(item.margin);
        style.min_size = Size {
            width: TaffyDimension::Length(item.min_width),
            height: TaffyDimension::Length(item.min_height),
        };
        style.max_size = Size {
            width: to_taffy_dimension((item.max_width > 0.0).then_some(item.max_width)),
            height: to_taffy_dimension((item.max_height > 0.0).then_some(item.max_height)),
        };
    }

    style
}

fn build_node(
    tree: &FlexTree,
    taffy: &mut TaffyTree,
    id: NodeId,
    nodes: &mut Vec<(NodeId, TaffyNodeId)>,
) -> Result<TaffyNodeId> {
    let children = if tree.node(id).target.is_flex_enabled() {
        tree.collect_flex_items(id)
            .into_iter()
            .map(|child| build_node(tree, taffy, child, nodes))
            .collect::<Result<Vec<_>>>()?
    } else {
        Vec::new()
    };

    let style = build_style(tree, id);
    let node = taffy
        .new_with_children(style, &children)
        .map_err(|e| TreeError::Reference(format!("{e:?}")))?;
    nodes.push((id, node));
    Ok(node)
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Compute the layout of a flex sub-tree with Taffy.
///
/// The root is sized under max-content constraints. Returned geometry is
/// relative to each node's flex parent, like [`FlexTree::resolved`].
pub fn reference_layout(tree: &FlexTree, root: NodeId) -> Result<HashMap<NodeId, Geometry>> {
    tree.check(root)?;

    let mut taffy: TaffyTree = TaffyTree::new();
    taffy.disable_rounding();

    let mut nodes = Vec::new();
    let root_node = build_node(tree, &mut taffy, root, &mut nodes)?;
    taffy
        .compute_layout(root_node, Size::MAX_CONTENT)
        .map_err(|e| TreeError::Reference(format!("{e:?}")))?;

    let mut result = HashMap::with_capacity(nodes.len());
    for (id, node) in nodes {
        let layout = taffy
            .layout(node)
            .map_err(|e| TreeError::Reference(format!("{e:?}")))?;
        result.insert(
            id,
            Geometry::new(layout.location.x, layout.location.y, layout.size.width, layout.size.height),
        );
    }
    Ok(result)
}
