//! Flex container configuration.

use taffy::geometry::Size;

use crate::types::{AlignContent, AlignItems, Edges, FlexDirection, FlexWrap, JustifyContent};

/// Settings of a node that lays out its children as flex items.
///
/// Edit through [`FlexTree::update_container`](crate::engine::FlexTree::update_container)
/// so the change is propagated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlexContainer {
    pub direction: FlexDirection,
    pub wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
    pub padding: Edges,

    /// Whether an item was shrunk below its basis in the last pass.
    pub(crate) shrunk: bool,
    pub(crate) cache: Option<LayoutCache>,
    /// Size under no external constraints, valid until the next change.
    pub(crate) natural: Option<Size<f32>>,
}

/// Constraints and result of a container's last pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LayoutCache {
    pub(crate) avail: Size<Option<f32>>,
    pub(crate) size: Size<f32>,
}

impl FlexContainer {
    /// Whether the main axis is horizontal.
    pub fn horizontal(&self) -> bool {
        self.direction.is_row()
    }

    pub fn shrunk(&self) -> bool {
        self.shrunk
    }
}
