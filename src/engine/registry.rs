//! Node Registry - slot allocation for the arena.
//!
//! Manages the lifecycle of node slots:
//! - Free slot pool for O(1) reuse
//! - Recursive release of children
//! - Detaching released nodes from their (flex) parent

use log::trace;

use super::{FlexTree, LayoutTarget, Node, NodeId, SceneNode};
use crate::error::Result;

impl FlexTree {
    // =========================================================================
    // Allocation
    // =========================================================================

    /// Create a detached, visible node with zero source geometry.
    pub fn create_node(&mut self) -> NodeId {
        let node = Node {
            scene: SceneNode::new(),
            target: LayoutTarget::default(),
        };

        // Reuse free slot or allocate new
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        let id = NodeId::from_index(index);
        trace!("created node {id:?}");
        id
    }

    /// Remove a node and, recursively, all of its children.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;

        // Detach from the parent first so a flex parent sees its children change
        if self.node(id).scene.parent.is_some() {
            self.set_parent(id, None)?;
        }

        self.release(id);
        Ok(())
    }

    fn release(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.node_mut(id).scene.children);
        for child in children {
            self.release(child);
        }

        self.nodes[id.index()] = None;
        self.free.push(id.index());
        self.pending.retain(|&pending| pending != id);
        trace!("released node {id:?}");
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    /// Number of live nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// All live node handles, in slot order.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| NodeId::from_index(index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::FlexTree;
    use crate::error::TreeError;

    #[test]
    fn test_create_node() {
        let mut tree = FlexTree::new();

        let a = tree.create_node();
        let b = tree.create_node();

        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(tree.node_count(), 2);
        assert!(tree.contains(a));
    }

    #[test]
    fn test_remove_and_reuse() {
        let mut tree = FlexTree::new();

        let a = tree.create_node();
        let b = tree.create_node();

        tree.remove_node(a).unwrap();
        assert!(!tree.contains(a));
        assert!(tree.contains(b));

        // Should reuse the freed slot
        let c = tree.create_node();
        assert_eq!(c.index(), a.index());
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_remove_is_recursive() {
        let mut tree = FlexTree::new();

        let root = tree.create_node();
        let child = tree.create_node();
        let grandchild = tree.create_node();
        tree.set_parent(child, Some(root)).unwrap();
        tree.set_parent(grandchild, Some(child)).unwrap();

        tree.remove_node(child).unwrap();

        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree.children(root).unwrap().is_empty());
        assert_eq!(tree.node_ids(), vec![root]);
    }

    #[test]
    fn test_remove_unknown_node() {
        let mut tree = FlexTree::new();
        let a = tree.create_node();
        tree.remove_node(a).unwrap();

        assert_eq!(tree.remove_node(a), Err(TreeError::UnknownNode(a)));
    }
}
