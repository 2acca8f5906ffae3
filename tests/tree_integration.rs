//! Integration tests for tree construction
//!
//! These tests cover:
//! - Pre-order traversal and edge listing
//! - Dropping of malformed records and their subtrees
//! - Observer events during building

use astfeat::engine::{NodeCounter, TreeBuilder, TreeObserver};
use astfeat::{Node, Scalar, Tree};
use serde_json::{json, Value};

fn fixture() -> Value {
    serde_json::from_str(include_str!("fixtures/try_eval.json")).unwrap()
}

// ============================================================================
// Traversal Tests
// ============================================================================

#[test]
fn test_fixture_preorder() {
    let tree = Tree::build(&fixture()).unwrap();
    let types: Vec<_> = tree.all_nodes().iter().map(|n| n.node_type.as_str()).collect();
    assert_eq!(
        types,
        vec![
            "Program",
            "TryStatement",
            "BlockStatement",
            "ExpressionStatement",
            "CallExpression",
            "Identifier",
            "CallExpression",
            "Identifier",
            "Literal",
            "BlockStatement",
            "ExpressionStatement",
            "AssignmentExpression",
            "Identifier",
            "Literal",
        ]
    );
}

#[test]
fn test_preorder_follows_arena_ids() {
    let tree = Tree::build(&fixture()).unwrap();
    for (i, node) in tree.all_nodes().iter().enumerate() {
        assert_eq!(node.id.index(), i);
    }
}

#[test]
fn test_edges_cover_every_non_root_node() {
    let tree = Tree::build(&fixture()).unwrap();
    let edges = tree.all_edges();
    assert_eq!(edges.len(), tree.len() - 1);
    for (parent, child) in edges {
        assert_eq!(child.parent, Some(parent.id));
        assert!(parent.children.contains(&child.id));
    }
}

#[test]
fn test_var_declaration_tree() {
    let ast = json!({
        "type": "Program", "start": 0, "end": 10,
        "body": [{"type": "VariableDeclaration", "start": 0, "end": 10, "kind": "var",
            "declarations": [{"type": "VariableDeclarator", "start": 4, "end": 9, "name": "x",
                "id": {"type": "Identifier", "start": 4, "end": 5},
                "init": {"type": "Literal", "start": 8, "end": 9, "value": 1, "raw": "1"}}]}]
    });
    let tree = Tree::build(&ast).unwrap();
    let declarator = tree.all_nodes()[2];
    assert_eq!(declarator.node_type, "VariableDeclarator");
    assert_eq!(declarator.name.as_deref(), Some("x"));
    assert_eq!(declarator.children.len(), 2);

    let literal = tree.get(declarator.children[1]).unwrap();
    assert_eq!(literal.value, Some(Scalar::Int(1)));
    assert!(literal.is_leaf());
}

// ============================================================================
// Malformed Record Tests
// ============================================================================

#[test]
fn test_comment_records_are_dropped() {
    let ast = json!({
        "type": "Program", "start": 0, "end": 20,
        "body": [{"type": "EmptyStatement", "start": 19, "end": 20}],
        "comments": [
            {"type": "Block", "value": " header "},
            {"type": "Line", "value": " todo", "start": 10}
        ]
    });
    let mut counter = NodeCounter::default();
    let tree = TreeBuilder::new(&mut counter).build(&ast).unwrap();
    assert_eq!(tree.len(), 2);
    assert_eq!(counter.dropped, 2);
}

#[test]
fn test_sequence_scalars_are_skipped() {
    let ast = json!({
        "type": "ArrayExpression", "start": 0, "end": 9,
        "elements": [null, 1, "two", [{"type": "Nested", "start": 0, "end": 1}],
                     {"type": "Literal", "start": 1, "end": 2, "value": 3, "raw": "3"}]
    });
    let tree = Tree::build(&ast).unwrap();
    let types: Vec<_> = tree.all_nodes().iter().map(|n| n.node_type.as_str()).collect();
    assert_eq!(types, vec!["ArrayExpression", "Literal"]);
}

// ============================================================================
// Observer Tests
// ============================================================================

#[derive(Default)]
struct PairRecorder {
    pairs: Vec<(Option<String>, String)>,
}

impl TreeObserver for PairRecorder {
    fn on_node(&mut self, node: &Node, parent: Option<&Node>) {
        self.pairs
            .push((parent.map(|p| p.node_type.clone()), node.node_type.clone()));
    }
}

#[test]
fn test_observer_sees_parent_before_children() {
    let mut recorder = PairRecorder::default();
    TreeBuilder::new(&mut recorder).build(&fixture()).unwrap();

    assert_eq!(recorder.pairs.len(), 14);
    assert_eq!(recorder.pairs[0], (None, "Program".to_string()));
    assert_eq!(
        recorder.pairs[1],
        (Some("Program".to_string()), "TryStatement".to_string())
    );
}

#[test]
fn test_identical_input_builds_identical_trees() {
    let a = Tree::build(&fixture()).unwrap();
    let b = Tree::build(&fixture()).unwrap();
    assert_eq!(a, b);
}
