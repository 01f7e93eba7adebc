//! LayoutTarget - per-node layout bookkeeping.
//!
//! Bridges a host node to the layout engine. Holds the flex configs, the
//! enablement state, the recalc bits and the last resolved geometry.

use super::{FlexTree, NodeId};
use crate::error::Result;
use crate::layout::{FlexContainer, FlexItem};
use crate::types::{FlexRole, Geometry, Recalc};

/// Layout data attached to every node.
#[derive(Debug, Default)]
pub struct LayoutTarget {
    pub(crate) recalc: Recalc,
    pub(crate) role: FlexRole,

    /// Present iff the node is a flex container.
    pub(crate) container: Option<FlexContainer>,
    /// Created on first item enablement, kept afterwards.
    pub(crate) item: Option<FlexItem>,
    pub(crate) item_disabled: bool,

    /// Visible, item-enabled children. Only meaningful while `items_valid`.
    pub(crate) items: Vec<NodeId>,
    pub(crate) items_valid: bool,

    /// Last resolved geometry (flex position, without source offset).
    pub(crate) geom: Geometry,
}

impl LayoutTarget {
    pub fn is_flex_enabled(&self) -> bool {
        self.container.is_some()
    }

    pub fn is_changed(&self) -> bool {
        self.recalc.contains(Recalc::CHANGED)
    }
}

impl FlexTree {
    // =========================================================================
    // Reads
    // =========================================================================

    pub fn recalc(&self, id: NodeId) -> Result<Recalc> {
        self.check(id)?;
        Ok(self.node(id).target.recalc)
    }

    pub fn flex_role(&self, id: NodeId) -> Result<FlexRole> {
        self.check(id)?;
        Ok(self.node(id).target.role)
    }

    /// The container this node is currently an item of.
    pub fn flex_parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        self.check(id)?;
        Ok(self.resolve_flex_parent(id))
    }

    pub fn container(&self, id: NodeId) -> Result<Option<&FlexContainer>> {
        self.check(id)?;
        Ok(self.node(id).target.container.as_ref())
    }

    pub fn item(&self, id: NodeId) -> Result<Option<&FlexItem>> {
        self.check(id)?;
        Ok(self.node(id).target.item.as_ref())
    }

    /// Geometry resolved by the last layout pass, relative to the flex parent's
    /// border box and without the source offset.
    pub fn resolved(&self, id: NodeId) -> Result<Geometry> {
        self.check(id)?;
        Ok(self.node(id).target.geom)
    }

    /// Visible, item-enabled children of a container, in child order.
    pub fn visible_flex_items(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        self.check(id)?;
        Ok(self.flex_items(id))
    }

    // =========================================================================
    // Derived state
    // =========================================================================

    pub(crate) fn resolve_flex_parent(&self, id: NodeId) -> Option<NodeId> {
        let node = self.node(id);
        if node.target.item_disabled {
            return None;
        }
        node.scene
            .parent
            .filter(|&parent| self.node(parent).target.is_flex_enabled())
    }

    pub(crate) fn is_flex_item_enabled(&self, id: NodeId) -> bool {
        self.resolve_flex_parent(id).is_some()
    }

    pub(crate) fn flex_items(&mut self, id: NodeId) -> Vec<NodeId> {
        if !self.node(id).target.items_valid {
            let items = self.collect_flex_items(id);
            let target = &mut self.node_mut(id).target;
            target.items = items;
            target.items_valid = true;
        }
        self.node(id).target.items.clone()
    }

    /// Uncached variant of [`FlexTree::flex_items`].
    pub(crate) fn collect_flex_items(&self, id: NodeId) -> Vec<NodeId> {
        self.node(id)
            .scene
            .children
            .iter()
            .copied()
            .filter(|&child| self.node(child).scene.visible && self.is_flex_item_enabled(child))
            .collect()
    }

    pub(crate) fn clear_items_cache(&mut self, id: NodeId) {
        self.node_mut(id).target.items_valid = false;
    }

    /// Re-derive the flex role and notify the host when enablement flips.
    pub(crate) fn check_enabled(&mut self, id: NodeId) {
        let role = FlexRole::new(
            self.node(id).target.is_flex_enabled(),
            self.is_flex_item_enabled(id),
        );
        let was_enabled = self.node(id).target.role.is_enabled();
        self.node_mut(id).target.role = role;

        if was_enabled != role.is_enabled() {
            if role.is_enabled() {
                self.node_mut(id).scene.flex_managed = true;
            } else {
                self.restore_source_layout(id);
                self.node_mut(id).scene.flex_managed = false;
            }
        }
    }

    /// Reset the resolved position to the source position.
    pub(crate) fn reset_offsets(&mut self, id: NodeId) {
        let x = self.source_offset(id, true);
        let y = self.source_offset(id, false);
        let geom = &mut self.node_mut(id).target.geom;
        geom.x = x;
        geom.y = y;
    }

    pub(crate) fn ensure_item(&mut self, id: NodeId) -> &mut FlexItem {
        self.node_mut(id).target.item.get_or_insert_with(FlexItem::default)
    }

    /// Whether a container's size along an axis is derived from its items.
    pub(crate) fn is_axis_fit_to_contents(&self, id: NodeId, horizontal: bool) -> bool {
        self.node(id).target.is_flex_enabled() && !self.has_explicit_size(id, horizontal)
    }
}
