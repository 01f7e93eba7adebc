//! Layout engine - node arena, layout targets and invalidation.
//!
//! The engine owns the host tree and the per-node layout bookkeeping:
//! - Registry: node allocation with a free list for O(1) slot reuse
//! - SceneNode: the host-side node (children, visibility, source geometry)
//! - LayoutTarget: flex enablement, recalc flags, resolved geometry
//! - Invalidation: dirty-bit propagation and layout requests
//!
//! # Architecture
//!
//! Nodes are NOT objects pointing at each other. They are slots in one arena,
//! and every relationship (parent, children, flex parent) is a [`NodeId`]:
//!
//! ```text
//! Slot 0: root  (parent=None, children=[1, 2], container=Some(..))
//! Slot 1: item  (parent=0,    children=[],     item=Some(..))
//! Slot 2: item  (parent=0,    children=[3],    container=Some(..), item=Some(..))
//! Slot 3: leaf  (parent=2,    children=[],     item=Some(..))
//! ```

mod enablement;
mod invalidation;
mod node;
mod registry;
mod target;

pub use node::*;
pub use target::*;

use spark_signals::{signal, Signal};

use crate::config::LayoutConfig;
use crate::error::{Result, TreeError};

/// Stable handle to a node in a [`FlexTree`].
///
/// Handles of removed nodes may be reused by later allocations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn from_index(index: usize) -> Self {
        Self(index as u32)
    }
}

/// One arena slot: the host node and its layout bookkeeping.
pub(crate) struct Node {
    pub(crate) scene: SceneNode,
    pub(crate) target: LayoutTarget,
}

/// Arena of scene nodes with incremental flexbox layout.
///
/// Mutations only set dirty bits and request a layout; [`FlexTree::layout`]
/// performs the pending work.
pub struct FlexTree {
    pub(crate) nodes: Vec<Option<Node>>,
    pub(crate) free: Vec<usize>,
    pub(crate) config: LayoutConfig,

    /// Nodes that requested a layout pass since the last drain.
    pub(crate) pending: Vec<NodeId>,
    pub(crate) request_count: u64,
    pub(crate) requests: Signal<u64>,

    pub(crate) in_progress: bool,
}

impl Default for FlexTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FlexTree {
    pub fn new() -> Self {
        Self::with_config(LayoutConfig::default())
    }

    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            config,
            pending: Vec::new(),
            request_count: 0,
            requests: signal(0),
            in_progress: false,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Check whether a handle refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.index()), Some(Some(_)))
    }

    pub(crate) fn check(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(TreeError::UnknownNode(id))
        }
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(id.index()) {
            Some(Some(node)) => node,
            _ => unreachable!("stale node handle {id:?}"),
        }
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        match self.nodes.get_mut(id.index()) {
            Some(Some(node)) => node,
            _ => unreachable!("stale node handle {id:?}"),
        }
    }

    // =========================================================================
    // Layout requests
    // =========================================================================

    /// Total number of layout requests issued so far.
    pub fn layout_request_count(&self) -> u64 {
        self.request_count
    }

    /// Reactive view of the request counter.
    ///
    /// Effects reading this signal re-run every time a node requests layout.
    pub fn layout_request_signal(&self) -> Signal<u64> {
        self.requests.clone()
    }

    /// Nodes waiting for the next [`FlexTree::layout`] call.
    pub fn pending_requests(&self) -> &[NodeId] {
        &self.pending
    }

    /// Whether a layout pass is currently running.
    pub fn is_layout_in_progress(&self) -> bool {
        self.in_progress
    }
}
