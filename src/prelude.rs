//! Prelude module for convenient imports
//!
//! ```
//! use astfeat::prelude::*;
//! ```
//!
//! # Re-exported Items
//!
//! - [`Extractor`], [`ExtractorConfig`], [`Extraction`] - End-to-end extraction
//! - [`Tree`], [`Node`], [`NodeId`] - The built tree
//! - [`FeatureSet`] - Published features
//! - [`FeatureColumns`] - Classifier column resolution
//! - [`SourceParser`], [`CommandParser`] - External parser adapters
//! - [`ExtractError`] - Error type

pub use crate::engine::{
    CommandParser, ExtractError, Extraction, Extractor, ExtractorConfig, FeatureColumns,
    FeatureSet, Node, NodeId, SourceParser, Tree,
};
