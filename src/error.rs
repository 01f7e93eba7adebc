//! Error types for tree mutations.
//!
//! The layout algorithm itself is total; only handle validation and
//! structural mutations of the host tree can fail.

use crate::engine::NodeId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("node {0:?} cannot be its own parent")]
    SelfParent(NodeId),

    #[error("attaching {child:?} to {parent:?} would create a cycle")]
    Cycle { child: NodeId, parent: NodeId },

    /// The reference engine rejected the converted tree.
    #[error("reference layout failed: {0}")]
    Reference(String),
}

pub type Result<T> = std::result::Result<T, TreeError>;
