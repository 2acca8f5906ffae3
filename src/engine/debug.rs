//! Tree pretty printer for debugging

use super::builder::Tree;
use super::node::Node;
use std::fmt::Write;

/// Renders a tree as an indented outline
///
/// ```text
/// Program [0..14]
///   VariableDeclaration [0..14]
///     VariableDeclarator [4..13]
///       Identifier name="x" [4..5]
///       Literal value=1 raw="1" [8..9]
/// ```
pub struct TreePrinter {
    /// Indentation string
    indent: String,
    /// Maximum depth to print
    max_depth: Option<usize>,
}

impl TreePrinter {
    /// Create a new tree printer
    pub fn new() -> Self {
        Self {
            indent: "  ".to_string(),
            max_depth: None,
        }
    }

    /// Set the indentation string
    pub fn indent(mut self, indent: &str) -> Self {
        self.indent = indent.to_string();
        self
    }

    /// Set the maximum depth to print
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Print a whole tree
    pub fn print(&self, tree: &Tree) -> String {
        let mut output = String::new();
        if let Some(root) = tree.root() {
            self.print_node(tree, root, 0, &mut output);
        }
        output
    }

    fn print_node(&self, tree: &Tree, node: &Node, depth: usize, output: &mut String) {
        let indent = self.indent.repeat(depth);

        if let Some(max) = self.max_depth {
            if depth > max {
                let _ = writeln!(output, "{}...", indent);
                return;
            }
        }

        let _ = write!(output, "{}{}", indent, node.node_type);
        if let Some(name) = &node.name {
            let _ = write!(output, " name={:?}", name);
        }
        if let Some(value) = &node.value {
            let _ = write!(output, " value={}", value);
        }
        if let Some(raw) = &node.raw {
            let _ = write!(output, " raw={:?}", raw);
        }
        if let Some(operator) = &node.operator {
            let _ = write!(output, " operator={:?}", operator);
        }
        if node.has_else_branch {
            output.push_str(" +else");
        }
        if node.has_finally_clause {
            output.push_str(" +finally");
        }
        let _ = writeln!(output, " [{}..{}]", node.span.start, node.span.end);

        for &child in &node.children {
            if let Some(child) = tree.get(child) {
                self.print_node(tree, child, depth + 1, output);
            }
        }
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}
