//! Insertion-ordered tables
//!
//! Frequency tables are keyed by first observation: iteration and
//! serialization follow the order in which keys were first seen, so two
//! builds of the same input produce byte-identical documents.
//!
//! Lookups go through a `hashbrown` index using the `ahash` hasher; entries
//! live in a plain vector in insertion order.

use hashbrown::HashMap;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// A map that remembers the order in which keys were first inserted
#[derive(Clone)]
pub struct OrderedTable<K, V> {
    /// Key -> position in `entries`
    index: HashMap<K, usize, ahash::RandomState>,
    /// Entries in first-insertion order
    entries: Vec<(K, V)>,
}

/// A frequency table: key -> number of observations
pub type CountTable<K> = OrderedTable<K, usize>;

impl<K, V> Default for OrderedTable<K, V> {
    fn default() -> Self {
        Self {
            index: HashMap::with_hasher(ahash::RandomState::new()),
            entries: Vec::new(),
        }
    }
}

impl<K, V> OrderedTable<K, V> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no keys
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Iterate keys in first-insertion order
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl<K: Hash + Eq + Clone, V> OrderedTable<K, V> {
    /// Create an empty table with room for `capacity` keys
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, ahash::RandomState::new()),
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a value, keeping the original position of an existing key
    pub fn insert(&mut self, key: K, value: V) {
        match self.index.get(&key) {
            Some(&i) => self.entries[i].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    /// Look up a value by key
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Check if a key has been inserted
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }
}

impl<K: Hash + Eq + Clone> OrderedTable<K, usize> {
    /// Record one observation of `key`
    #[inline]
    pub fn increment<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        self.add(key, 1);
    }

    /// Record `count` observations of `key`
    ///
    /// The key is only cloned the first time it is seen.
    pub fn add<Q>(&mut self, key: &Q, count: usize)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ToOwned<Owned = K> + ?Sized,
    {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += count,
            None => {
                let owned = key.to_owned();
                self.index.insert(owned.clone(), self.entries.len());
                self.entries.push((owned, count));
            }
        }
    }

    /// Count for `key`, zero when never observed
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).copied().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedTable<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

// Order-sensitive: two tables are equal only if they saw keys in the same order
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedTable<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Serialize, V: Serialize> Serialize for OrderedTable<K, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

struct TableVisitor<K, V>(PhantomData<fn() -> OrderedTable<K, V>>);

impl<'de, K, V> Visitor<'de> for TableVisitor<K, V>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de>,
{
    type Value = OrderedTable<K, V>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut table = OrderedTable::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            table.insert(key, value);
        }
        Ok(table)
    }
}

impl<'de, K, V> Deserialize<'de> for OrderedTable<K, V>
where
    K: Deserialize<'de> + Hash + Eq + Clone,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increment_keeps_first_seen_order() {
        let mut table: CountTable<String> = CountTable::new();
        table.increment("b");
        table.increment("a");
        table.increment("b");

        let entries: Vec<_> = table.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        assert_eq!(entries, vec![("b", 2), ("a", 1)]);
        assert_eq!(table.total(), 3);
    }

    #[test]
    fn test_count_missing_key_is_zero() {
        let table: CountTable<String> = CountTable::new();
        assert_eq!(table.count("missing"), 0);
        assert!(table.is_empty());
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut table = OrderedTable::new();
        table.insert("x".to_string(), 1.0);
        table.insert("y".to_string(), 2.0);
        table.insert("x".to_string(), 3.0);

        let keys: Vec<_> = table.keys().cloned().collect();
        assert_eq!(keys, vec!["x", "y"]);
        assert_eq!(table.get("x"), Some(&3.0));
    }

    #[test]
    fn test_serde_preserves_order() {
        let mut table: CountTable<String> = CountTable::new();
        table.add("zeta", 2);
        table.add("alpha", 5);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"zeta":2,"alpha":5}"#);

        let back: CountTable<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
