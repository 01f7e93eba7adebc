//! Flex enablement state machine.
//!
//! A node is a container iff it holds a container config. It is an item iff
//! its parent is a container and it has not opted out. Every transition ends
//! in `check_enabled`, which re-derives the node's [`FlexRole`].
//!
//! [`FlexRole`]: crate::types::FlexRole

use log::debug;

use super::{FlexTree, NodeId};
use crate::error::Result;
use crate::layout::{FlexContainer, FlexItem};

impl FlexTree {
    // =========================================================================
    // Container enablement
    // =========================================================================

    /// Turn flex layout of a node's children on or off.
    pub fn set_container_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.check(id)?;
        match (enabled, self.node(id).target.is_flex_enabled()) {
            (true, false) => self.enable_flex(id),
            (false, true) => self.disable_flex(id),
            _ => {}
        }
        Ok(())
    }

    fn enable_flex(&mut self, id: NodeId) {
        debug!("enabling flex container {id:?}");
        self.node_mut(id).target.container = Some(FlexContainer::default());
        self.clear_items_cache(id);
        self.check_enabled(id);
        self.update_recalc(id, true, true);

        let children = self.node(id).scene.children.clone();
        for child in children {
            self.enable_flex_item(child);
        }
    }

    fn disable_flex(&mut self, id: NodeId) {
        debug!("disabling flex container {id:?}");
        self.update_recalc(id, true, true);
        self.node_mut(id).target.container = None;
        self.clear_items_cache(id);
        self.check_enabled(id);

        let children = self.node(id).scene.children.clone();
        for child in children {
            self.disable_flex_item(child);
        }
    }

    // =========================================================================
    // Item enablement
    // =========================================================================

    fn enable_flex_item(&mut self, id: NodeId) {
        let disabled = self.node(id).target.item_disabled;
        let parent = self.node(id).scene.parent;
        self.ensure_item(id).ctr = if disabled { None } else { parent };

        if let Some(parent) = parent {
            self.changed_children(parent);
        }
        self.check_enabled(id);
    }

    fn disable_flex_item(&mut self, id: NodeId) {
        // The item config stays: it holds user settings.
        if let Some(item) = self.node_mut(id).target.item.as_mut() {
            item.ctr = None;
        }
        self.check_enabled(id);
        self.detach_from_flex_parent(id);
    }

    /// Put a node that just lost its flex parent back at its source offset.
    ///
    /// A node that is still a container becomes a layout root of its own.
    fn detach_from_flex_parent(&mut self, id: NodeId) {
        self.reset_offsets(id);
        if self.node(id).target.role.is_container() {
            let g = self.node(id).target.geom;
            self.apply_layout(id, g.x, g.y, g.w, g.h);
            self.update_recalc(id, true, true);
        }
    }

    /// Opt a node in or out of its parent's flex layout.
    pub fn set_item_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.check(id)?;
        self.ensure_item(id);
        if enabled != self.node(id).target.item_disabled {
            return Ok(());
        }

        let prev_flex_parent = self.resolve_flex_parent(id);
        self.node_mut(id).target.item_disabled = !enabled;
        let new_flex_parent = self.resolve_flex_parent(id);
        self.ensure_item(id).ctr = new_flex_parent;
        self.check_enabled(id);
        if prev_flex_parent.is_some() && new_flex_parent.is_none() {
            self.detach_from_flex_parent(id);
        }

        if let Some(parent) = prev_flex_parent {
            self.changed_children(parent);
        }
        if let Some(parent) = new_flex_parent {
            self.changed_children(parent);
        }
        Ok(())
    }

    // =========================================================================
    // Host tree hooks
    // =========================================================================

    pub(crate) fn on_reparent(&mut self, id: NodeId, from: Option<NodeId>, to: Option<NodeId>) {
        let was_item = self.node(id).target.role.is_item();
        if let Some(from) = from {
            if self.node(from).target.is_flex_enabled() {
                self.changed_children(from);
            }
        }

        match to {
            Some(to) if self.node(to).target.is_flex_enabled() => self.enable_flex_item(id),
            _ => {
                if let Some(item) = self.node_mut(id).target.item.as_mut() {
                    item.ctr = None;
                }
            }
        }
        self.check_enabled(id);
        if was_item && !self.node(id).target.role.is_item() {
            self.detach_from_flex_parent(id);
        }
    }

    pub(crate) fn update_visible(&mut self, id: NodeId) {
        if let Some(parent) = self.resolve_flex_parent(id) {
            self.changed_children(parent);
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Edit a container's settings.
    ///
    /// Returns `Ok(false)` when the node is not a flex container.
    pub fn update_container(&mut self, id: NodeId, f: impl FnOnce(&mut FlexContainer)) -> Result<bool> {
        self.check(id)?;
        let Some(container) = self.node_mut(id).target.container.as_mut() else {
            return Ok(false);
        };

        let before = container.clone();
        f(container);
        if *container != before {
            self.update_recalc(id, true, true);
        }
        Ok(true)
    }

    /// Edit a node's item settings, creating them on first use.
    pub fn update_item(&mut self, id: NodeId, f: impl FnOnce(&mut FlexItem)) -> Result<()> {
        self.check(id)?;
        let item = self.ensure_item(id);
        let before = item.clone();
        f(item);
        if *item != before {
            if let Some(parent) = self.resolve_flex_parent(id) {
                self.update_recalc(parent, false, false);
            }
        }
        Ok(())
    }
}
