//! Dirty-bit propagation.
//!
//! A change marks the node's recalc bits. When the change adds size bits the
//! node did not have yet, it travels up the flex-parent chain, filtered by
//! the axes each ancestor derives from its items. Where it stops, a single
//! layout request is issued.

use log::trace;

use super::{FlexTree, NodeId};
use crate::error::Result;
use crate::types::Recalc;

impl FlexTree {
    // =========================================================================
    // Entry points
    // =========================================================================

    /// Mark a node as changed, optionally including its external size.
    pub fn force_layout(&mut self, id: NodeId, change_width: bool, change_height: bool) -> Result<()> {
        self.check(id)?;
        self.update_recalc(id, change_width, change_height);
        Ok(())
    }

    /// Mark a node's contents as changed.
    pub fn changed_contents(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        self.update_recalc(id, false, false);
        Ok(())
    }

    pub(crate) fn changed_children(&mut self, id: NodeId) {
        self.clear_items_cache(id);
        self.update_recalc(id, false, false);
    }

    pub(crate) fn updated_source_w(&mut self, id: NodeId) {
        self.update_recalc(id, true, false);
    }

    pub(crate) fn updated_source_h(&mut self, id: NodeId) {
        self.update_recalc(id, false, true);
    }

    // =========================================================================
    // Propagation
    // =========================================================================

    pub(crate) fn update_recalc(&mut self, id: NodeId, mut change_width: bool, mut change_height: bool) {
        if self.node(id).target.is_flex_enabled() {
            // Internal changes may change a fit-to-contents size.
            change_width |= self.is_axis_fit_to_contents(id, true);
            change_height |= self.is_axis_fit_to_contents(id, false);
        }

        let recalc = Recalc::for_change(change_width, change_height);
        let new_bits = self.mark_recalc(id, recalc);
        trace!("recalc {id:?}: +{recalc:?} (new {new_bits:?})");

        match self.resolve_flex_parent(id) {
            Some(parent) if new_bits.affects_size() => self.update_recalc_bottom_up(parent, recalc),
            _ => self.request_layout(id),
        }
    }

    fn update_recalc_bottom_up(&mut self, mut id: NodeId, mut child_recalc: Recalc) {
        loop {
            let recalc = self.recalc_from_child(id, child_recalc);
            let new_bits = self.mark_recalc(id, recalc);
            trace!("recalc {id:?} from child: +{recalc:?} (new {new_bits:?})");

            match self.resolve_flex_parent(id) {
                Some(parent) if new_bits.affects_size() => {
                    id = parent;
                    child_recalc = recalc;
                }
                _ => {
                    self.request_layout(id);
                    return;
                }
            }
        }
    }

    /// Translate an item's recalc bits into its container's bits.
    pub(crate) fn recalc_from_child(&self, id: NodeId, mut child_recalc: Recalc) -> Recalc {
        let Some(container) = self.node(id).target.container.as_ref() else {
            return Recalc::CHANGED;
        };

        let horizontal = container.horizontal();
        let main = Recalc::axis(horizontal);
        let cross = Recalc::axis(!horizontal);

        // Wrapping may move items to a new line, changing the cross size.
        if !child_recalc.contains(cross)
            && child_recalc.contains(main)
            && container.wrap.is_wrapping()
            && self.is_axis_fit_to_contents(id, !horizontal)
        {
            child_recalc |= cross;
        }

        let mut width_dynamic = self.is_axis_fit_to_contents(id, true);
        let mut height_dynamic = self.is_axis_fit_to_contents(id, false);

        // A shrunk main axis stays sensitive to item min sizes.
        if container.shrunk {
            if horizontal {
                width_dynamic = true;
            } else {
                height_dynamic = true;
            }
        }

        child_recalc & Recalc::for_change(width_dynamic, height_dynamic)
    }

    /// Union `recalc` into the node's bits, returning the bits that were new.
    fn mark_recalc(&mut self, id: NodeId, recalc: Recalc) -> Recalc {
        let target = &mut self.node_mut(id).target;
        let new_bits = recalc.difference(target.recalc);
        target.recalc |= recalc;
        new_bits
    }

    pub(crate) fn clear_recalc(&mut self, id: NodeId) {
        self.node_mut(id).target.recalc = Recalc::empty();
    }

    // =========================================================================
    // Layout requests
    // =========================================================================

    pub(crate) fn request_layout(&mut self, id: NodeId) {
        self.request_count += 1;
        if !self.pending.contains(&id) {
            self.pending.push(id);
        }
        trace!("layout requested at {id:?} (#{})", self.request_count);
        self.requests.set(self.request_count);
    }
}
