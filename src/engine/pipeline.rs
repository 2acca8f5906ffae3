//! End-to-end extraction
//!
//! Building, frequency collection and aggregation run as one synchronous
//! pass. Every call owns its own tree and counters, so one [`Extractor`]
//! can be shared freely between threads.

use super::arena::NodeArena;
use super::builder::{Tree, TreeBuilder};
use super::config::ExtractorConfig;
use super::error::Result;
use super::features::FeatureSet;
use super::frequency::FrequencyCollector;
use super::parser::SourceParser;
use serde_json::Value;

/// A built tree and its features
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// The program tree
    pub tree: Tree,
    /// Published features of the tree
    pub features: FeatureSet,
}

/// Feature extractor
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    /// Create an extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Build the tree of `ast` and aggregate it against `source`
    pub fn extract(&self, source: &str, ast: &Value) -> Result<Extraction> {
        let mut collector = FrequencyCollector::new();
        let tree = TreeBuilder::new(&mut collector)
            .with_arena(NodeArena::for_source(source.len()))
            .with_max_depth(self.config.max_recursion_depth)
            .build(ast)?;
        let features = FeatureSet::aggregate(collector.into_tables(), source);
        Ok(Extraction { tree, features })
    }

    /// Parse `source` with `parser`, then extract
    pub fn extract_with(&self, parser: &dyn SourceParser, source: &str) -> Result<Extraction> {
        let ast = parser.parse(source)?;
        self.extract(source, &ast)
    }
}
