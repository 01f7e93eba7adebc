//! Layout Module - flexbox configuration and the layout pass.
//!
//! # Architecture
//!
//! A pass is rooted at the highest dirty container found from a pending
//! layout request:
//!
//! 1. [`FlexTree::layout`] drains the pending requests
//! 2. Each request resolves to its dirty layout root
//! 3. The root container runs the per-container pass, which builds
//!    [`LineLayout`]s, resolves grow/shrink, then hands the cross axis to the
//!    [`ContentAligner`] and each line's [`ItemAligner`]
//! 4. Nested containers are laid out recursively when their size is needed
//!
//! A root that still has a flex parent keeps its current size; only its
//! sub-tree is laid out again.
//!
//! [`LineLayout`]: line::LineLayout
//! [`ContentAligner`]: content_aligner::ContentAligner
//! [`ItemAligner`]: item_aligner::ItemAligner

mod container;
mod content_aligner;
mod item;
mod item_aligner;
mod layouter;
mod line;
pub mod spacing;
mod taffy_bridge;

pub use container::FlexContainer;
pub use item::FlexItem;
pub use spacing::{get_spacing, Distribution, Spacing};
pub use taffy_bridge::reference_layout;

use log::{debug, trace};
use taffy::geometry::Size;

use crate::engine::{FlexTree, NodeId};
use crate::types::Geometry;

use layouter::UNCONSTRAINED;

impl FlexTree {
    /// Run all pending layout work.
    ///
    /// Returns the number of sub-trees laid out. Requests issued while the
    /// pass runs are handled before it returns.
    pub fn layout(&mut self) -> usize {
        if self.in_progress {
            trace!("layout already in progress");
            return 0;
        }
        self.in_progress = true;

        let mut count = 0;
        while !self.pending.is_empty() {
            let pending = std::mem::take(&mut self.pending);
            for id in pending {
                if !self.contains(id) {
                    continue;
                }
                match self.dirty_layout_root(id) {
                    Some(root) => {
                        self.layout_tree(root);
                        count += 1;
                    }
                    None => self.clear_recalc(id),
                }
            }
        }

        self.in_progress = false;
        count
    }

    /// Highest flex-enabled node with the CHANGED bit along the flex-parent
    /// chain starting at `id`.
    pub(crate) fn dirty_layout_root(&self, id: NodeId) -> Option<NodeId> {
        let mut root = None;
        let mut current = Some(id);
        while let Some(node) = current {
            let target = &self.node(node).target;
            if target.role.is_enabled() && target.is_changed() {
                root = Some(node);
            }
            current = self.resolve_flex_parent(node);
        }
        root
    }

    fn layout_tree(&mut self, root: NodeId) {
        if !self.node(root).target.is_flex_enabled() {
            // Leaf item: positioned by its container
            self.clear_recalc(root);
            return;
        }

        match self.resolve_flex_parent(root) {
            None => {
                debug!("layout pass at {root:?}");
                let size = self.layout_container(root, UNCONSTRAINED);
                self.node_mut(root).target.geom = Geometry::new(0.0, 0.0, size.width, size.height);
                self.apply_layout(root, 0.0, 0.0, size.width, size.height);
            }
            Some(_) => {
                debug!("sub-tree layout at {root:?}");
                let geom = self.node(root).target.geom;
                let avail = Size { width: Some(geom.w), height: Some(geom.h) };
                self.layout_container(root, avail);
                self.apply_layout(root, geom.x, geom.y, geom.w, geom.h);
            }
        }
    }
}
