use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Map with unique keys that enumerates in insertion order
///
/// Used for chart series, where insertion order is render order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(
    serialize = "K: Serialize + Hash + Eq, V: Serialize",
    deserialize = "K: Deserialize<'de> + Hash + Eq, V: Deserialize<'de>"
))]
pub struct NameCollection<K, V> {
    items: IndexMap<K, V>,
}

impl<K: Hash + Eq, V> NameCollection<K, V> {
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.items.get(key)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.items.get_mut(key)
    }

    /// Insert or replace a value
    ///
    /// Replacing keeps the original position. Returns the previous value.
    pub fn set(&mut self, key: K, value: V) -> Option<V> {
        self.items.insert(key, value)
    }

    /// Remove a value, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.items.shift_remove(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.items.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.items.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.items.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.items.values()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for NameCollection<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // IndexMap equality ignores order; series order matters here
        self.items.len() == other.items.len()
            && self.items.iter().zip(other.items.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Hash + Eq, V: Eq> Eq for NameCollection<K, V> {}

impl<K: Hash + Eq, V> Default for NameCollection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for NameCollection<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
