//! Extractor configuration

use super::features::FeatureSet;

/// Default maximum nesting depth of parser records
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 4096;

/// Default minimum node count for a tree to be worth classifying
pub const DEFAULT_MIN_NODE_COUNT: usize = 25;

/// Default external parser program
pub const DEFAULT_PARSER_PROGRAM: &str = "acorn";

/// Configuration for feature extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Maximum nesting depth of records before building fails
    pub max_recursion_depth: usize,

    /// Trees with fewer nodes are rejected by [`ExtractorConfig::admits`]
    ///
    /// This is a caller policy; the engine extracts features from trees of
    /// any size.
    pub min_node_count: usize,

    /// Program invoked by [`CommandParser`](super::parser::CommandParser)
    pub parser_program: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            min_node_count: DEFAULT_MIN_NODE_COUNT,
            parser_program: DEFAULT_PARSER_PROGRAM.to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum recursion depth
    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Set the minimum node count
    pub fn with_min_node_count(mut self, count: usize) -> Self {
        self.min_node_count = count;
        self
    }

    /// Set the external parser program
    pub fn with_parser_program(mut self, program: impl Into<String>) -> Self {
        self.parser_program = program.into();
        self
    }

    /// Check whether a feature set comes from a tree large enough to classify
    pub fn admits(&self, features: &FeatureSet) -> bool {
        features.node_count() >= self.min_node_count
    }
}
