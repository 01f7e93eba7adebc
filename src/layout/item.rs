//! Flex item configuration and per-pass item state.

use crate::engine::NodeId;
use crate::types::{AlignItems, AlignSelf, Edges, FlexBasis};

/// Settings of a node as a child of a flex container.
///
/// The config survives the item being disabled, so user settings are kept
/// when a parent toggles flex layout off and on again.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexItem {
    pub grow: f32,
    pub shrink: f32,
    pub basis: FlexBasis,
    pub align_self: AlignSelf,
    pub margin: Edges,

    pub min_width: f32,
    /// 0 = unconstrained
    pub max_width: f32,
    pub min_height: f32,
    /// 0 = unconstrained
    pub max_height: f32,

    /// Container this item is active in.
    pub(crate) ctr: Option<NodeId>,
}

impl Default for FlexItem {
    fn default() -> Self {
        Self {
            grow: 0.0,
            shrink: 1.0,
            basis: FlexBasis::Auto,
            align_self: AlignSelf::Auto,
            margin: Edges::ZERO,
            min_width: 0.0,
            max_width: 0.0,
            min_height: 0.0,
            max_height: 0.0,
            ctr: None,
        }
    }
}

impl FlexItem {
    /// Container this item currently participates in, if any.
    pub fn container(&self) -> Option<NodeId> {
        self.ctr
    }

    pub fn min_size(&self, horizontal: bool) -> f32 {
        if horizontal { self.min_width } else { self.min_height }
    }

    pub fn max_size(&self, horizontal: bool) -> f32 {
        let max = if horizontal { self.max_width } else { self.max_height };
        if max > 0.0 { max } else { f32::INFINITY }
    }

    /// Apply min/max constraints. Min wins over max.
    pub fn clamp_size(&self, size: f32, horizontal: bool) -> f32 {
        size.min(self.max_size(horizontal)).max(self.min_size(horizontal))
    }

    pub fn resolve_align(&self, align_items: AlignItems) -> AlignItems {
        self.align_self.to_align_items().unwrap_or(align_items)
    }
}

/// Working values of one item during a container pass.
#[derive(Debug, Clone)]
pub(crate) struct ItemState {
    pub id: NodeId,
    pub config: FlexItem,
    /// Main axis of the container.
    pub horizontal: bool,

    /// Size before grow/shrink, clamped.
    pub basis: f32,
    /// Size the item would take without a flex parent.
    pub natural_main: f32,
    pub cross_auto: bool,
    pub is_container: bool,

    pub main_size: f32,
    pub cross_size: f32,
    pub main_pos: f32,
    pub cross_pos: f32,
}

impl ItemState {
    pub fn main_margin(&self) -> f32 {
        self.config.margin.sum(self.horizontal)
    }

    pub fn cross_margin(&self) -> f32 {
        self.config.margin.sum(!self.horizontal)
    }

    pub fn main_footprint(&self) -> f32 {
        self.main_size + self.main_margin()
    }

    pub fn basis_footprint(&self) -> f32 {
        self.basis + self.main_margin()
    }

    pub fn cross_footprint(&self) -> f32 {
        self.cross_size + self.cross_margin()
    }

    /// Whether the main size differs from what the item would take by itself.
    pub fn main_is_flexed(&self) -> bool {
        (self.main_size - self.natural_main).abs() > f32::EPSILON
    }
}
