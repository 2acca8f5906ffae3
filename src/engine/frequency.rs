//! Frequency tables accumulated while the tree is built
//!
//! Counting is purely additive, so the visiting order only affects the
//! first-seen order of keys, never the counts.

use super::builder::TreeObserver;
use super::node::Node;
use super::record::Scalar;
use super::table::CountTable;

/// Keywords recorded from boolean node flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    /// An `if` with an `alternate` branch
    Else,
    /// A `try` with a `finalizer` block
    Finally,
}

impl Keyword {
    /// Every keyword, in output order
    pub const ALL: &'static [Keyword] = &[Keyword::Else, Keyword::Finally];

    /// Keyword text
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Else => "else",
            Keyword::Finally => "finally",
        }
    }
}

/// Occurrence counters for the fixed keywords
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordCounts {
    counts: [usize; 2],
}

impl KeywordCounts {
    /// Record one occurrence
    #[inline]
    pub fn increment(&mut self, keyword: Keyword) {
        self.counts[keyword as usize] += 1;
    }

    /// Occurrences of `keyword`
    #[inline]
    pub fn get(&self, keyword: Keyword) -> usize {
        self.counts[keyword as usize]
    }

    /// Iterate `(keyword, count)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (Keyword, usize)> + '_ {
        Keyword::ALL.iter().map(move |&k| (k, self.get(k)))
    }
}

/// The raw frequency tables of one tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTables {
    /// Node type -> count
    pub nodes: CountTable<String>,
    /// `"parentType->childType"` -> count
    pub node_pairs: CountTable<String>,
    /// Identifier name -> count
    pub names: CountTable<String>,
    /// Literal value -> count, keyed by exact type and value
    pub values: CountTable<Scalar>,
    /// Raw literal text -> count
    pub raw: CountTable<String>,
    /// Operator -> count
    pub operators: CountTable<String>,
    /// `else` / `finally` occurrences
    pub keywords: KeywordCounts,
}

impl FrequencyTables {
    /// Total number of nodes seen
    pub fn node_count(&self) -> usize {
        self.nodes.total()
    }

    /// Record one accepted node
    pub fn observe(&mut self, node: &Node, parent: Option<&Node>) {
        self.nodes.increment(node.node_type.as_str());

        if let Some(parent) = parent {
            let pair = pair_key(&parent.node_type, &node.node_type);
            self.node_pairs.increment(pair.as_str());
        }
        if let Some(name) = &node.name {
            self.names.increment(name.as_str());
        }
        if let Some(value) = &node.value {
            self.values.increment(value);
        }
        if let Some(raw) = &node.raw {
            self.raw.increment(raw.as_str());
        }
        if let Some(operator) = &node.operator {
            self.operators.increment(operator.as_str());
        }
        if node.has_else_branch {
            self.keywords.increment(Keyword::Else);
        }
        if node.has_finally_clause {
            self.keywords.increment(Keyword::Finally);
        }
    }
}

/// Key of a parent/child type pair
pub fn pair_key(parent_type: &str, child_type: &str) -> String {
    format!("{}->{}", parent_type, child_type)
}

/// Observer that fills [`FrequencyTables`] while the tree is built
#[derive(Debug, Clone, Default)]
pub struct FrequencyCollector {
    tables: FrequencyTables,
}

impl FrequencyCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables collected so far
    pub fn tables(&self) -> &FrequencyTables {
        &self.tables
    }

    /// Consume the collector
    pub fn into_tables(self) -> FrequencyTables {
        self.tables
    }
}

impl TreeObserver for FrequencyCollector {
    fn on_node(&mut self, node: &Node, parent: Option<&Node>) {
        self.tables.observe(node, parent);
    }
}
