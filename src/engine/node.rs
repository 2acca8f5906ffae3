//! Typed tree nodes
//!
//! Nodes live in a [`NodeArena`](super::arena::NodeArena) and refer to each
//! other by [`NodeId`]. A node's `parent` is a non-owning back-reference;
//! `children` lists the nodes it owns, in discovery order.

use super::record::{DecodedNode, Scalar};
use std::fmt;

/// Identity of a node: its index in the owning arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Create an id from an arena index
    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index)
    }

    /// Arena index of this node
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Byte range covered by a node in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a span; callers guarantee `start <= end`
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One node of the program tree
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identity within the tree
    pub id: NodeId,
    /// Grammar production name
    pub node_type: String,
    /// Identifier name
    pub name: Option<String>,
    /// Literal value
    pub value: Option<Scalar>,
    /// Literal source text
    pub raw: Option<String>,
    /// Operator token
    pub operator: Option<String>,
    /// The record had an `else` branch
    pub has_else_branch: bool,
    /// The record had a `finally` clause
    pub has_finally_clause: bool,
    /// Source range
    pub span: Span,
    /// Parent node, `None` only for the root
    pub parent: Option<NodeId>,
    /// Children in discovery order
    pub children: Vec<NodeId>,
}

impl Node {
    pub(crate) fn from_decoded(id: NodeId, decoded: DecodedNode, parent: Option<NodeId>) -> Self {
        Self {
            id,
            node_type: decoded.node_type,
            name: decoded.name,
            value: decoded.value,
            raw: decoded.raw,
            operator: decoded.operator,
            has_else_branch: decoded.has_else_branch,
            has_finally_clause: decoded.has_finally_clause,
            span: Span::new(decoded.start, decoded.end),
            parent,
            children: Vec::new(),
        }
    }

    /// Check if this is the root node
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Check if this node has no children
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_keeps_index() {
        let id = NodeId::new(42);
        assert_eq!(id.index(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_node_id_above_u32_range() {
        let index = u32::MAX as usize + 7;
        assert_eq!(NodeId::new(index).index(), index);
        assert!(NodeId::new(index) > NodeId::new(u32::MAX as usize));
    }
}
