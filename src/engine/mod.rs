//! Feature extraction engine
//!
//! Data flows strictly downward:
//!
//! ```text
//! parser output -> record (decode) -> builder (+ frequency) -> features -> export
//! ```
//!
//! # Module Organization
//!
//! ## Tree
//! - [`record`] - Field classification and node decoding
//! - [`arena`] - Arena storage for nodes
//! - [`node`] - Node types
//! - [`builder`] - Tree construction and the observer trait
//!
//! ## Statistics
//! - [`frequency`] - Frequency tables collected during building
//! - [`entropy`] - Shannon entropy
//! - [`char_class`] - Character classes
//! - [`ratios`] - Fixed-schema ratio families
//! - [`quantiles`] - Length quantiles
//! - [`features`] - Aggregation into the published feature set
//!
//! ## Output
//! - [`export`] - Tabular and JSON export
//! - [`vector`] - Ordered feature vectors for classifiers
//!
//! ## Running
//! - [`config`] - Extractor configuration
//! - [`parser`] - External parser adapters
//! - [`pipeline`] - End-to-end extraction
//! - [`parallel`] - Batch extraction
//! - [`debug`] - Tree pretty printer

// ============================================================================
// Module Declarations
// ============================================================================

pub mod arena;
pub mod builder;
pub mod char_class;
pub mod config;
pub mod debug;
pub mod entropy;
pub mod error;
pub mod export;
pub mod features;
pub mod frequency;
pub mod node;
pub mod parallel;
pub mod parser;
pub mod pipeline;
pub mod quantiles;
pub mod ratios;
pub mod record;
pub mod table;
pub mod vector;

// ============================================================================
// Tree
// ============================================================================

pub use arena::NodeArena;
pub use builder::{NodeCounter, Tree, TreeBuilder, TreeObserver};
pub use node::{Node, NodeId, Span};
pub use record::{decode, DecodeError, DecodedNode, Field, Record, Scalar};

// ============================================================================
// Statistics
// ============================================================================

pub use char_class::CharClass;
pub use entropy::{shannon_entropy, CharHistogram};
pub use features::{ratio_keys, EntropySummary, FeatureSet, RATIO_KEY_COUNT};
pub use frequency::{pair_key, FrequencyCollector, FrequencyTables, Keyword, KeywordCounts};
pub use quantiles::{LengthQuantiles, PERCENTILES};
pub use ratios::{ClassCounts, OperatorClass, RatioClass, RawClass, ReservedName, ValueClass};
pub use table::{CountTable, OrderedTable};

// ============================================================================
// Output
// ============================================================================

pub use export::{csv_row, source_hash, to_csv_string, write_csv, CSV_COLUMNS};
pub use vector::{FeatureColumns, EDGE_COLORS, VERTEX_COLORS};

// ============================================================================
// Running
// ============================================================================

pub use config::ExtractorConfig;
pub use debug::TreePrinter;
pub use error::{ExtractError, Result};
pub use parallel::{extract_batch, BatchInput};
pub use parser::{read_parser_output, CommandParser, SourceParser, StaticParser};
pub use pipeline::{Extraction, Extractor};
