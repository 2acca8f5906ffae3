//! astfeat - Structural and lexical features of parsed programs
//!
//! This library turns the JSON syntax tree emitted by an ESTree parser
//! (such as acorn) into a fixed-schema feature document used to tell
//! obfuscated scripts from ordinary ones. It provides:
//! - Typed tree construction from loosely-structured parser output
//! - Frequency tables of node types, type pairs, names, values, raw
//!   literals, operators and keywords
//! - Entropy, character/value/name ratios and length quantiles with a
//!   fixed set of keys
//! - CSV export of the tree and JSON export of the features
//! - Ordered feature vectors for a trained classifier
//!
//! ## Quick Start
//!
//! ```rust
//! use astfeat::{Extractor, FeatureColumns};
//! use serde_json::json;
//!
//! let source = "var x = 1;";
//! let ast = json!({
//!     "type": "Program", "start": 0, "end": 10,
//!     "body": [{"type": "VariableDeclaration", "start": 0, "end": 10,
//!         "declarations": [{"type": "VariableDeclarator", "start": 4, "end": 9,
//!             "id": {"type": "Identifier", "start": 4, "end": 5, "name": "x"},
//!             "init": {"type": "Literal", "start": 8, "end": 9, "value": 1, "raw": "1"}}],
//!         "kind": "var"}]
//! });
//!
//! let extraction = Extractor::default().extract(source, &ast).unwrap();
//! assert_eq!(extraction.features.node_count(), 5);
//!
//! let columns = FeatureColumns::new(vec!["v_colors".into(), "ratios;values_numeric".into()]);
//! assert_eq!(columns.vectorize(&extraction.features).unwrap(), vec![5.0, 1.0]);
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate
//! - `parallel` - Run batch extraction on a rayon pool

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

// Prelude module for convenient imports
pub mod prelude;

// Extraction engine
pub mod engine;

/// Re-export commonly used types for convenience
pub use engine::{
    // Tree
    builder::{Tree, TreeBuilder, TreeObserver},
    node::{Node, NodeId},
    record::Scalar,
    // Statistics
    features::{EntropySummary, FeatureSet},
    frequency::{FrequencyCollector, FrequencyTables},
    // Output
    export::{to_csv_string, write_csv},
    vector::FeatureColumns,
    // Running
    config::ExtractorConfig,
    error::{ExtractError, Result},
    parser::{CommandParser, SourceParser, StaticParser},
    pipeline::{Extraction, Extractor},
};
