//! Statistical aggregation into the published feature set
//!
//! The aggregator consumes the raw [`FrequencyTables`] of a tree together
//! with the source text. Only node counts, pair counts, entropy and the
//! ratio table survive: names, values, raw literals, operators and keyword
//! counters are dropped once their statistics are derived, so a feature
//! document never carries identifier or literal content.
//!
//! # Ratio table layout
//!
//! | Prefix | Family | Normalizer |
//! |--------|--------|------------|
//! | `chars_` | [`CharClass`] over the source | source length |
//! | `chars_values_` | [`CharClass`] over string values | their length |
//! | `chars_names_` | [`CharClass`] over names | their length |
//! | `values_` | [`ValueClass`] | captured values |
//! | `reserved_names_` | [`ReservedName`] | captured names |
//! | `raw_` | [`RawClass`] | captured raw literals |
//! | `operators_` | [`OperatorClass`] | captured operators |
//! | `keywords_` | [`Keyword`] | total node count |
//! | `names_quantile_` | name lengths | - |
//! | `values_quantile_` | value lengths | - |

use super::char_class::CharClass;
use super::entropy::CharHistogram;
use super::frequency::{FrequencyTables, Keyword};
use super::quantiles::LengthQuantiles;
use super::ratios::{ClassCounts, OperatorClass, RawClass, ReservedName, ValueClass};
use super::table::{CountTable, OrderedTable};
use serde::{Deserialize, Serialize};

/// Number of keys in every ratio table
pub const RATIO_KEY_COUNT: usize = 86;

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

/// Entropy of the three character sequences
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EntropySummary {
    /// Whole source text
    pub generic: f64,
    /// Captured names, each repeated by its count
    pub names: f64,
    /// Captured string values, each repeated by its count
    pub values: f64,
}

/// The reduced, published features of one tree
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    nodes: CountTable<String>,
    node_pairs: CountTable<String>,
    entropy: EntropySummary,
    ratios: OrderedTable<String, f64>,
}

impl FeatureSet {
    /// Derive the feature set from a tree's frequency tables and source text
    pub fn aggregate(tables: FrequencyTables, source: &str) -> Self {
        let FrequencyTables {
            nodes,
            node_pairs,
            names,
            values,
            raw,
            operators,
            keywords,
        } = tables;

        let source_chars = CharHistogram::of(source);
        let mut name_chars = CharHistogram::new();
        for (name, &count) in names.iter() {
            name_chars.observe(name, count);
        }
        let mut value_chars = CharHistogram::new();
        for (value, &count) in values.iter() {
            if let Some(s) = value.as_str() {
                value_chars.observe(s, count);
            }
        }

        let entropy = EntropySummary {
            generic: source_chars.entropy(),
            names: name_chars.entropy(),
            values: value_chars.entropy(),
        };

        let mut ratios = OrderedTable::with_capacity(RATIO_KEY_COUNT);
        write_char_ratios("chars_", &source_chars, &mut ratios);
        write_char_ratios("chars_values_", &value_chars, &mut ratios);
        write_char_ratios("chars_names_", &name_chars, &mut ratios);

        let mut value_classes: ClassCounts<ValueClass> = ClassCounts::new();
        for (value, &count) in values.iter() {
            value_classes.observe(value, count);
        }
        value_classes.write_ratios("values_", values.total(), &mut ratios);

        let mut reserved: ClassCounts<ReservedName> = ClassCounts::new();
        for (name, &count) in names.iter() {
            reserved.observe(name, count);
        }
        reserved.write_ratios("reserved_names_", names.total(), &mut ratios);

        let mut raw_classes: ClassCounts<RawClass> = ClassCounts::new();
        for (literal, &count) in raw.iter() {
            raw_classes.observe(literal, count);
        }
        raw_classes.write_ratios("raw_", raw.total(), &mut ratios);

        let mut operator_classes: ClassCounts<OperatorClass> = ClassCounts::new();
        for (operator, &count) in operators.iter() {
            operator_classes.observe(operator, count);
        }
        operator_classes.write_ratios("operators_", operators.total(), &mut ratios);

        let mut keyword_classes: ClassCounts<Keyword> = ClassCounts::new();
        for (keyword, count) in keywords.iter() {
            keyword_classes.observe(&keyword, count);
        }
        keyword_classes.write_ratios("keywords_", nodes.total(), &mut ratios);

        let name_lengths = repeated_lengths(names.iter().map(|(name, &n)| (name.chars().count(), n)));
        LengthQuantiles::from_lengths(name_lengths).write_into("names_", &mut ratios);

        let value_lengths = repeated_lengths(
            values
                .iter()
                .map(|(value, &n)| (value.to_string().chars().count(), n)),
        );
        LengthQuantiles::from_lengths(value_lengths).write_into("values_", &mut ratios);

        debug_assert_eq!(ratios.len(), RATIO_KEY_COUNT);
        log_debug!(
            "Aggregated {} node types, {} pairs, {} ratios",
            nodes.len(),
            node_pairs.len(),
            ratios.len()
        );

        Self {
            nodes,
            node_pairs,
            entropy,
            ratios,
        }
    }

    /// Node type -> count
    pub fn nodes(&self) -> &CountTable<String> {
        &self.nodes
    }

    /// `"parent->child"` -> count
    pub fn node_pairs(&self) -> &CountTable<String> {
        &self.node_pairs
    }

    /// Entropy scalars
    pub fn entropy(&self) -> &EntropySummary {
        &self.entropy
    }

    /// Ratio and quantile table
    pub fn ratios(&self) -> &OrderedTable<String, f64> {
        &self.ratios
    }

    /// Look up one ratio or quantile
    pub fn ratio(&self, key: &str) -> Option<f64> {
        self.ratios.get(key).copied()
    }

    /// Total number of nodes in the tree
    pub fn node_count(&self) -> usize {
        self.nodes.total()
    }

    /// Total number of parent/child pairs (node count minus one for a
    /// non-empty tree)
    pub fn pair_count(&self) -> usize {
        self.node_pairs.total()
    }
}

/// Every key of the ratio table, in output order
pub fn ratio_keys() -> Vec<String> {
    FeatureSet::aggregate(FrequencyTables::default(), "")
        .ratios
        .keys()
        .cloned()
        .collect()
}

fn write_char_ratios(prefix: &str, hist: &CharHistogram, out: &mut OrderedTable<String, f64>) {
    let mut classes: ClassCounts<CharClass> = ClassCounts::new();
    for (c, count) in hist.iter() {
        classes.observe(&c, count);
    }
    classes.write_ratios(prefix, hist.total(), out);
}

fn repeated_lengths(pairs: impl Iterator<Item = (usize, usize)>) -> Vec<usize> {
    let mut lengths = Vec::new();
    for (len, count) in pairs {
        lengths.extend(std::iter::repeat(len).take(count));
    }
    lengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::builder::TreeBuilder;
    use crate::engine::frequency::FrequencyCollector;
    use serde_json::json;

    fn features(value: serde_json::Value, source: &str) -> FeatureSet {
        let mut collector = FrequencyCollector::new();
        TreeBuilder::new(&mut collector).build(&value).unwrap();
        FeatureSet::aggregate(collector.into_tables(), source)
    }

    #[test]
    fn test_empty_tables_have_full_schema() {
        let set = FeatureSet::aggregate(FrequencyTables::default(), "");
        assert_eq!(set.ratios().len(), RATIO_KEY_COUNT);
        assert!(set.ratios().iter().all(|(_, &v)| v == 0.0));
        assert_eq!(set.entropy(), &EntropySummary::default());
    }

    #[test]
    fn test_ratio_keys_order() {
        let keys = ratio_keys();
        assert_eq!(keys.len(), RATIO_KEY_COUNT);
        assert_eq!(keys[0], "chars_digits");
        assert_eq!(keys[8], "chars_values_digits");
        assert_eq!(keys[16], "chars_names_digits");
        assert_eq!(keys[24], "values_true");
        assert_eq!(keys[29], "reserved_names_toString");
        assert_eq!(keys[39], "raw_null");
        assert_eq!(keys[40], "operators_instanceof");
        assert_eq!(keys[42], "keywords_else");
        assert_eq!(keys[44], "names_quantile_0");
        assert_eq!(keys[85], "values_quantile_100");
    }

    #[test]
    fn test_keywords_normalized_by_node_count() {
        let set = features(
            json!({
                "type": "IfStatement", "start": 0, "end": 20,
                "test": {"type": "Identifier", "start": 4, "end": 5, "name": "a"},
                "consequent": {"type": "EmptyStatement", "start": 7, "end": 8},
                "alternate": {"type": "EmptyStatement", "start": 14, "end": 15}
            }),
            "if (a) ; else ;",
        );
        assert_eq!(set.node_count(), 4);
        assert_eq!(set.ratio("keywords_else"), Some(0.25));
        assert_eq!(set.ratio("keywords_finally"), Some(0.0));
    }

    #[test]
    fn test_names_entropy_uses_counts() {
        let set = features(
            json!({
                "type": "Program", "start": 0, "end": 3,
                "body": [
                    {"type": "Identifier", "start": 0, "end": 1, "name": "ab"},
                    {"type": "Identifier", "start": 2, "end": 3, "name": "ab"}
                ]
            }),
            "",
        );
        assert!((set.entropy().names - 1.0).abs() < 1e-12);
        assert_eq!(set.ratio("chars_names_ascii_lowercase"), Some(1.0));
        assert_eq!(set.ratio("names_quantile_50"), Some(2.0));
    }

    #[test]
    fn test_values_string_form_lengths() {
        let set = features(
            json!({
                "type": "ArrayExpression", "start": 0, "end": 20,
                "elements": [
                    {"type": "Literal", "start": 1, "end": 4, "value": 100, "raw": "100"},
                    {"type": "Literal", "start": 5, "end": 10, "value": true, "raw": "true"}
                ]
            }),
            "[100, true]",
        );
        assert_eq!(set.ratio("values_quantile_0"), Some(3.0));
        assert_eq!(set.ratio("values_quantile_100"), Some(4.0));
        assert_eq!(set.ratio("values_numeric"), Some(1.0));
        assert_eq!(set.ratio("values_true"), Some(0.5));
        assert_eq!(set.entropy().values, 0.0);
    }

    #[test]
    fn test_raw_null_and_operators() {
        let set = features(
            json!({
                "type": "BinaryExpression", "start": 0, "end": 20, "operator": "instanceof",
                "left": {"type": "Literal", "start": 0, "end": 4, "value": null, "raw": "null"},
                "right": {"type": "Identifier", "start": 16, "end": 20, "name": "Date"}
            }),
            "null instanceof Date",
        );
        assert_eq!(set.ratio("raw_null"), Some(1.0));
        assert_eq!(set.ratio("operators_instanceof"), Some(1.0));
        assert_eq!(set.ratio("operators_typeof"), Some(0.0));
        assert_eq!(set.ratio("values_numeric"), Some(0.0));
    }

    #[test]
    fn test_source_char_ratios() {
        let set = features(json!({"type": "Program", "start": 0, "end": 4}), "aB1\n");
        assert_eq!(set.ratio("chars_digits"), Some(0.25));
        assert_eq!(set.ratio("chars_ascii_letters"), Some(0.5));
        assert_eq!(set.ratio("chars_newlines"), Some(0.25));
        assert_eq!(set.ratio("chars_whitespaces"), Some(0.25));
        assert_eq!(set.ratio("chars_another"), Some(0.25));
        assert!((set.entropy().generic - 2.0).abs() < 1e-12);
    }
}
