//! Tabular and document export
//!
//! # Tabular layout
//!
//! One header line followed by one row per node, in pre-order:
//!
//! ```text
//! file_hash,type,name,value,operator,raw,id,parent
//! "3f0a…","Identifier","x",,,,"2","1"
//! ```
//!
//! `file_hash` is the SHA-256 of the source identifier (usually a path).
//! Text fields have double quotes removed and are then wrapped in quotes.
//! Absent fields (and an empty node type) are written as empty columns.
//! `id` and `parent` are arena indices; the root has an empty `parent`.

use super::builder::Tree;
use super::error::Result;
use super::features::FeatureSet;
use super::node::Node;
use sha2::{Digest, Sha256};
use std::io::Write;

/// Column names of the tabular export
pub const CSV_COLUMNS: [&str; 8] = [
    "file_hash", "type", "name", "value", "operator", "raw", "id", "parent",
];

/// SHA-256 of a source identifier, hex encoded
pub fn source_hash(source_id: &str) -> String {
    hex::encode(Sha256::digest(source_id.as_bytes()))
}

fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('"', ""))
}

fn optional(text: Option<&str>) -> String {
    text.map(quoted).unwrap_or_default()
}

/// Render one node as a row (without line terminator)
pub fn csv_row(node: &Node, file_hash: &str) -> String {
    let node_type = (!node.node_type.is_empty()).then_some(node.node_type.as_str());
    let value = node.value.as_ref().map(|v| v.to_string());
    let parent = node.parent.map(|p| p.to_string());

    [
        quoted(file_hash),
        optional(node_type),
        optional(node.name.as_deref()),
        optional(value.as_deref()),
        optional(node.operator.as_deref()),
        optional(node.raw.as_deref()),
        quoted(&node.id.to_string()),
        optional(parent.as_deref()),
    ]
    .join(",")
}

/// Write the header and one row per node of `tree`
pub fn write_csv<W: Write>(tree: &Tree, source_id: &str, mut writer: W) -> Result<()> {
    let file_hash = source_hash(source_id);
    writeln!(writer, "{}", CSV_COLUMNS.join(","))?;
    for node in tree.all_nodes() {
        writeln!(writer, "{}", csv_row(node, &file_hash))?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the tabular export as a string
pub fn to_csv_string(tree: &Tree, source_id: &str) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_csv(tree, source_id, &mut out);
    String::from_utf8_lossy(&out).into_owned()
}

impl FeatureSet {
    /// Serialize as a compact JSON document
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize as an indented JSON document
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON document to `writer`
    pub fn write_json<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }

    /// Read a feature document written by [`FeatureSet::to_json`]
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Tree {
        Tree::build(&json!({
            "type": "Program", "start": 0, "end": 12,
            "body": [{"type": "ExpressionStatement", "start": 0, "end": 12,
                "expression": {"type": "Literal", "start": 0, "end": 11,
                               "value": "say \"hi\"", "raw": "'say \"hi\"'"}}]
        }))
        .unwrap()
    }

    #[test]
    fn test_source_hash_is_sha256() {
        assert_eq!(
            source_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_header_and_column_count() {
        let csv = to_csv_string(&tree(), "a.js");
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("file_hash,type,name,value,operator,raw,id,parent")
        );
        for line in lines {
            assert_eq!(line.split(',').count(), CSV_COLUMNS.len());
        }
    }

    #[test]
    fn test_row_strips_quotes() {
        let tree = tree();
        let hash = source_hash("a.js");
        let literal = tree.all_nodes()[2];
        assert_eq!(
            csv_row(literal, &hash),
            format!("\"{}\",\"Literal\",,\"say hi\",,\"'say hi'\",\"2\",\"1\"", hash)
        );
    }

    #[test]
    fn test_root_row_has_empty_parent() {
        let tree = tree();
        let row = csv_row(tree.root().unwrap(), "h");
        assert_eq!(row, "\"h\",\"Program\",,,,,\"0\",");
    }
}
