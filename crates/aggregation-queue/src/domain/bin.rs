//! A single aggregation round.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::{self, HashMap};
use std::hash::Hash;

/// Collision-free mapping from key to value for one aggregation round.
///
/// INVARIANT: a key is either absent or holds exactly one value; the map
/// allows nothing else. A queue only places values under absent keys, so
/// nothing queued is ever overwritten. Bins built outside a queue (`new`,
/// `Default`, deserialization) start from whatever map they were given.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize, V: Serialize",
    deserialize = "K: Deserialize<'de> + Eq + Hash, V: Deserialize<'de>"
))]
pub struct Bin<K, V> {
    values: HashMap<K, V>,
}

impl<K: Eq + Hash, V> Bin<K, V> {
    /// Creates an empty bin.
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Places `value` under `key`. Callers must have checked `contains_key`.
    pub(crate) fn place(&mut self, key: K, value: V) {
        let previous = self.values.insert(key, value);
        debug_assert!(previous.is_none(), "bin already held a value for key");
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.values.get(key)
    }

    /// Returns true if this bin already holds a value for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    /// Number of keys in this bin.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the bin holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the keys in this bin (arbitrary order).
    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.values.keys()
    }

    /// Iterates over the key-value pairs in this bin (arbitrary order).
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.values.iter()
    }

    /// Consumes the bin, returning the underlying map.
    pub fn into_inner(self) -> HashMap<K, V> {
        self.values
    }
}

impl<K: Eq + Hash, V> Default for Bin<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for Bin<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<K: Eq + Hash, V: Eq> Eq for Bin<K, V> {}

impl<K, V> From<Bin<K, V>> for HashMap<K, V> {
    fn from(bin: Bin<K, V>) -> Self {
        bin.values
    }
}

impl<K, V> IntoIterator for Bin<K, V> {
    type Item = (K, V);
    type IntoIter = hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Bin<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
