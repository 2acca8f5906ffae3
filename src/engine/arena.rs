//! Arena storage for tree nodes
//!
//! All nodes of a tree are stored in one contiguous vector and addressed by
//! [`NodeId`]. Parent links are plain ids, so the tree has a single owner
//! (the arena) and no reference counting.

use super::node::{Node, NodeId};
use super::record::DecodedNode;

/// The node arena
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    /// Create an empty arena
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Create an arena with room for `capacity` nodes
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Create an arena sized for parser output of a given source length
    ///
    /// Parsers emit roughly one node per four to eight source bytes.
    #[inline]
    pub fn for_source(source_len: usize) -> Self {
        Self::with_capacity((source_len / 6).clamp(64, 100_000))
    }

    /// Number of allocated nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no node has been allocated
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a node and link it under `parent`
    ///
    /// # Panics
    /// Panics if `parent` does not belong to this arena.
    pub fn alloc(&mut self, decoded: DecodedNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::from_decoded(id, decoded, parent));
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    /// Get a node by id
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a node by id
    ///
    /// # Panics
    /// Panics if `id` does not belong to this arena.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Iterate nodes in allocation order
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(node_type: &str) -> DecodedNode {
        DecodedNode {
            node_type: node_type.to_string(),
            name: None,
            value: None,
            raw: None,
            operator: None,
            has_else_branch: false,
            has_finally_clause: false,
            start: 0,
            end: 0,
        }
    }

    #[test]
    fn test_alloc_links_children() {
        let mut arena = NodeArena::new();
        let root = arena.alloc(decoded("Program"), None);
        let a = arena.alloc(decoded("A"), Some(root));
        let b = arena.alloc(decoded("B"), Some(root));

        assert_eq!(arena.len(), 3);
        assert_eq!(arena.node(root).children, vec![a, b]);
        assert_eq!(arena.node(a).parent, Some(root));
        assert!(arena.node(root).is_root());
    }

    #[test]
    fn test_ids_are_indices() {
        let mut arena = NodeArena::new();
        let root = arena.alloc(decoded("Program"), None);
        let child = arena.alloc(decoded("X"), Some(root));
        assert_eq!(root.index(), 0);
        assert_eq!(child.index(), 1);
        assert!(arena.get(NodeId::new(2)).is_none());
    }
}
