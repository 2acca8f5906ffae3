//! Tree construction from parser output
//!
//! The builder walks a root record depth-first. Each record is decoded,
//! allocated under its parent and reported to a [`TreeObserver`] before any
//! of its own fields are visited. Fields are then visited in the record's
//! key order: nested records directly, sequences element by element (only
//! elements that are records).
//!
//! A record that fails to decode is dropped together with everything
//! nested under it. Dropping is never an error.

use super::arena::NodeArena;
use super::config::DEFAULT_MAX_RECURSION_DEPTH;
use super::error::{ExtractError, Result};
use super::node::{Node, NodeId};
use super::record::{self, DecodeError, Field, Record};
use serde_json::Value;

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

/// Receives build events as the tree grows
///
/// # Event Flow
///
/// ```text
/// on_node(Program, None)
///   on_node(VariableDeclaration, Some(Program))
///     on_node(VariableDeclarator, Some(VariableDeclaration))
///       on_dropped(MissingField { field: "start" })
///       on_node(Identifier, Some(VariableDeclarator))
/// ```
pub trait TreeObserver {
    /// Called once per accepted node, before its children are visited
    fn on_node(&mut self, node: &Node, parent: Option<&Node>) {
        let _ = (node, parent);
    }

    /// Called when a record is dropped because it could not be decoded
    fn on_dropped(&mut self, error: &DecodeError) {
        let _ = error;
    }
}

impl TreeObserver for () {}

/// An observer that only counts events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCounter {
    /// Accepted nodes
    pub accepted: usize,
    /// Dropped records (subtrees count once)
    pub dropped: usize,
}

impl TreeObserver for NodeCounter {
    fn on_node(&mut self, _node: &Node, _parent: Option<&Node>) {
        self.accepted += 1;
    }

    fn on_dropped(&mut self, _error: &DecodeError) {
        self.dropped += 1;
    }
}

/// A built program tree
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    arena: NodeArena,
    root: Option<NodeId>,
}

impl Tree {
    /// Build a tree without observing it
    pub fn build(root: &Value) -> Result<Self> {
        let mut observer = ();
        TreeBuilder::new(&mut observer).build(root)
    }

    /// The root node; `None` when the root record itself was malformed
    pub fn root(&self) -> Option<&Node> {
        self.root.map(|id| self.arena.node(id))
    }

    /// Number of nodes
    #[inline]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Check if the tree has no nodes
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Get a node by id
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    /// The underlying arena
    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// All nodes in pre-order
    pub fn all_nodes(&self) -> Vec<&Node> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let node = self.arena.node(id);
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    /// All `(parent, child)` pairs in pre-order of the child
    pub fn all_edges(&self) -> Vec<(&Node, &Node)> {
        self.all_nodes()
            .into_iter()
            .filter_map(|node| node.parent.map(|p| (self.arena.node(p), node)))
            .collect()
    }
}

/// Builds a [`Tree`] while reporting nodes to an observer
pub struct TreeBuilder<'o, O: TreeObserver + ?Sized> {
    arena: NodeArena,
    observer: &'o mut O,
    max_depth: usize,
}

impl<'o, O: TreeObserver + ?Sized> TreeBuilder<'o, O> {
    /// Create a builder reporting to `observer`
    pub fn new(observer: &'o mut O) -> Self {
        Self {
            arena: NodeArena::new(),
            observer,
            max_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }

    /// Set the maximum record nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Use a pre-sized arena
    pub fn with_arena(mut self, arena: NodeArena) -> Self {
        self.arena = arena;
        self
    }

    /// Build the tree rooted at `root`
    pub fn build(mut self, root: &Value) -> Result<Tree> {
        let record = match Field::classify(root) {
            Field::Record(record) => record,
            _ => {
                return Err(ExtractError::InvalidRoot {
                    found: json_kind(root).to_string(),
                })
            }
        };

        self.visit(record, None, 0)?;
        let root = (!self.arena.is_empty()).then(|| NodeId::new(0));
        log_debug!("Built tree with {} nodes", self.arena.len());

        Ok(Tree {
            arena: self.arena,
            root,
        })
    }

    fn visit(&mut self, record: &Record, parent: Option<NodeId>, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(ExtractError::RecursionLimitExceeded {
                depth,
                max_depth: self.max_depth,
            });
        }

        let decoded = match record::decode(record) {
            Ok(decoded) => decoded,
            Err(e) => {
                log_debug!("Dropping record at depth {}: {}", depth, e);
                self.observer.on_dropped(&e);
                return Ok(());
            }
        };

        let id = self.arena.alloc(decoded, parent);
        self.observer.on_node(
            self.arena.node(id),
            parent.map(|p| self.arena.node(p)),
        );

        for value in record.values() {
            match Field::classify(value) {
                Field::Record(child) => self.visit(child, Some(id), depth + 1)?,
                Field::Sequence(items) => {
                    for item in items {
                        if let Field::Record(child) = Field::classify(item) {
                            self.visit(child, Some(id), depth + 1)?;
                        }
                    }
                }
                Field::Absent | Field::Scalar(_) => {}
            }
        }

        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
