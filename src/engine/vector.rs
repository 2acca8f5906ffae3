//! Ordered feature vectors for a downstream classifier
//!
//! A classifier is trained against a fixed list of column names. Each name
//! is resolved against a [`FeatureSet`]:
//!
//! | Column | Value |
//! |--------|-------|
//! | `v_colors` | number of distinct node types |
//! | `e_colors` | number of distinct parent/child pairs |
//! | `nodes;<type>` | count / total node count |
//! | `node_pairs;<pair>` | count / total pair count |
//! | `entropy;<key>` | entropy scalar as stored |
//! | `ratios;<key>` | ratio or quantile as stored |
//!
//! Keys missing from the feature set resolve to 0. The order and the
//! normalization must stay exactly as above for trained models to remain
//! valid.

use super::error::{ExtractError, Result};
use super::features::FeatureSet;
use serde::{Deserialize, Serialize};

/// Column resolving to the number of distinct node types
pub const VERTEX_COLORS: &str = "v_colors";

/// Column resolving to the number of distinct node pairs
pub const EDGE_COLORS: &str = "e_colors";

/// Separator between category and key
pub const CATEGORY_SEPARATOR: char = ';';

/// Ordered list of feature column names
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureColumns {
    names: Vec<String>,
}

impl FeatureColumns {
    /// Wrap a list of column names
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Parse a JSON array of column names
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Column names in order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if there are no columns
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolve every column against `features`, in column order
    pub fn vectorize(&self, features: &FeatureSet) -> Result<Vec<f64>> {
        let nodes_total = features.node_count();
        let pairs_total = features.pair_count();

        self.names
            .iter()
            .map(|name| resolve(name, features, nodes_total, pairs_total))
            .collect()
    }
}

fn relative(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn resolve(name: &str, features: &FeatureSet, nodes_total: usize, pairs_total: usize) -> Result<f64> {
    match name {
        VERTEX_COLORS => return Ok(features.nodes().len() as f64),
        EDGE_COLORS => return Ok(features.node_pairs().len() as f64),
        _ => {}
    }

    let (category, key) =
        name.split_once(CATEGORY_SEPARATOR)
            .ok_or_else(|| ExtractError::MalformedFeatureName {
                name: name.to_string(),
            })?;

    let value = match category {
        "nodes" => relative(features.nodes().count(key), nodes_total),
        "node_pairs" => relative(features.node_pairs().count(key), pairs_total),
        "entropy" => match key {
            "generic" => features.entropy().generic,
            "names" => features.entropy().names,
            "values" => features.entropy().values,
            _ => 0.0,
        },
        "ratios" => features.ratio(key).unwrap_or(0.0),
        _ => {
            return Err(ExtractError::UnknownFeatureCategory {
                category: category.to_string(),
            })
        }
    };
    Ok(value)
}
