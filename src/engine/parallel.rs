//! Batch extraction
//!
//! Each input gets its own tree and counters, so inputs are independent and
//! can be processed on separate threads.
//!
//! # Feature Flag
//!
//! Work is spread over a rayon pool when the `parallel` feature is enabled:
//!
//! ```toml
//! [dependencies]
//! astfeat = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! Without it the batch runs sequentially. Results are in input order either
//! way.

use super::error::Result;
use super::pipeline::{Extraction, Extractor};
use serde_json::Value;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// One source text with its parser output
#[derive(Debug, Clone, Copy)]
pub struct BatchInput<'a> {
    /// Source text
    pub source: &'a str,
    /// Root record produced by the parser
    pub ast: &'a Value,
}

impl<'a> BatchInput<'a> {
    /// Pair a source with its parser output
    pub fn new(source: &'a str, ast: &'a Value) -> Self {
        Self { source, ast }
    }
}

/// Extract every input in parallel
#[cfg(feature = "rayon")]
pub fn extract_batch(extractor: &Extractor, inputs: &[BatchInput<'_>]) -> Vec<Result<Extraction>> {
    inputs
        .par_iter()
        .map(|input| extractor.extract(input.source, input.ast))
        .collect()
}

/// Extract every input sequentially (fallback when rayon is not available)
#[cfg(not(feature = "rayon"))]
pub fn extract_batch(extractor: &Extractor, inputs: &[BatchInput<'_>]) -> Vec<Result<Extraction>> {
    inputs
        .iter()
        .map(|input| extractor.extract(input.source, input.ast))
        .collect()
}
