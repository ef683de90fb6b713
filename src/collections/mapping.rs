//! Mapping: an unordered, key-unique associative container.
//!
//! # Iteration Order
//!
//! Iteration order is unspecified. Callers must not depend on it, so
//! [`Mapping::reduce`] is only well defined for commutative reducers and
//! [`Mapping::find`] returns *a* match, not *the first* match.
//!
//! # Example
//!
//! ```rust
//! use tablekit::collections::Mapping;
//!
//! let scores: Mapping<&str, i32> = [("ann", 3), ("bob", 7), ("cy", 7)].into_iter().collect();
//!
//! let high = scores.filter(|_, v| *v > 5);
//! assert_eq!(high.size(), 2);
//!
//! let by_score = scores.invert();
//! assert_eq!(by_score.size(), 2); // 7 collides, one name survives
//! ```

use std::borrow::Borrow;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::sequence::Sequence;
use super::shared::Container;

/// Unordered key/value container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize + Eq + Hash, V: Serialize",
    deserialize = "K: Deserialize<'de> + Eq + Hash, V: Deserialize<'de>"
))]
pub struct Mapping<K, V> {
    entries: FxHashMap<K, V>,
}

/// Entry count of a possibly absent mapping.
pub fn size<K, V>(tbl: Option<&Mapping<K, V>>) -> usize {
    tbl.map_or(0, |m| m.entries.len())
}

impl<K, V> Mapping<K, V> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.entries.iter()
    }

    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for (k, v) in &self.entries {
            f(k, v);
        }
    }

    /// Folds every entry into `initial`. Order is unspecified.
    pub fn reduce<A>(&self, initial: A, mut reducer: impl FnMut(A, &K, &V) -> A) -> A {
        self.entries
            .iter()
            .fold(initial, |acc, (k, v)| reducer(acc, k, v))
    }

    pub fn some(&self, mut predicate: impl FnMut(&K, &V) -> bool) -> bool {
        self.entries.iter().any(|(k, v)| predicate(k, v))
    }

    pub fn every(&self, mut predicate: impl FnMut(&K, &V) -> bool) -> bool {
        self.entries.iter().all(|(k, v)| predicate(k, v))
    }

    /// A matching entry, or `None` when nothing matches.
    pub fn find(&self, mut predicate: impl FnMut(&K, &V) -> bool) -> Option<(&K, &V)> {
        self.entries.iter().find(|(k, v)| predicate(k, v))
    }
}

impl<K: Eq + Hash, V> Mapping<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get_mut(key)
    }

    /// Stores `value` under `key`, returning the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.remove(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// True when some entry holds `value`.
    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.entries.values().any(|v| v == value)
    }

    pub fn keys(&self) -> Sequence<K>
    where
        K: Clone,
    {
        self.entries.keys().cloned().collect()
    }

    pub fn values(&self) -> Sequence<V>
    where
        V: Clone,
    {
        self.entries.values().cloned().collect()
    }

    pub fn entries(&self) -> Sequence<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Builds a mapping from key/value pairs; later pairs win on duplicate keys.
    pub fn from_entries(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        entries.into_iter().collect()
    }

    pub fn filter(&self, mut predicate: impl FnMut(&K, &V) -> bool) -> Self
    where
        K: Clone,
        V: Clone,
    {
        self.entries
            .iter()
            .filter(|(k, v)| predicate(k, v))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Same keys, values replaced by `transform`.
    pub fn map<U>(&self, mut transform: impl FnMut(&K, &V) -> U) -> Mapping<K, U>
    where
        K: Clone,
    {
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), transform(k, v)))
            .collect()
    }

    /// Buckets values by the key `group_fn` computes for each entry.
    ///
    /// Order inside a bucket follows traversal order, which is unspecified.
    pub fn group_by<G>(&self, mut group_fn: impl FnMut(&K, &V) -> G) -> Mapping<G, Sequence<V>>
    where
        G: Eq + Hash,
        V: Clone,
    {
        let mut groups: Mapping<G, Sequence<V>> = Mapping::new();
        for (k, v) in &self.entries {
            groups
                .entries
                .entry(group_fn(k, v))
                .or_default()
                .push(v.clone());
        }
        groups
    }

    /// Sub-mapping restricted to `keys`. Absent keys are ignored.
    pub fn pick<'a>(&self, keys: impl IntoIterator<Item = &'a K>) -> Self
    where
        K: Clone + 'a,
        V: Clone,
    {
        keys.into_iter()
            .filter_map(|k| self.entries.get(k).map(|v| (k.clone(), v.clone())))
            .collect()
    }

    /// Sub-mapping without `keys`. Absent keys are ignored.
    pub fn omit<'a>(&self, keys: impl IntoIterator<Item = &'a K>) -> Self
    where
        K: Clone + 'a,
        V: Clone,
    {
        let mut result = self.clone();
        for k in keys {
            result.entries.remove(k);
        }
        result
    }

    /// Swaps keys and values.
    ///
    /// Lossy: when several keys hold the same value only one of them survives,
    /// and which one is unspecified.
    pub fn invert(&self) -> Mapping<V, K>
    where
        K: Clone,
        V: Clone + Eq + Hash,
    {
        self.entries
            .iter()
            .map(|(k, v)| (v.clone(), k.clone()))
            .collect()
    }
}

impl<K, V> Default for Mapping<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V: PartialEq> PartialEq for Mapping<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq + Hash, V> FromIterator<(K, V)> for Mapping<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: Eq + Hash, V> Extend<(K, V)> for Mapping<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K, V> IntoIterator for Mapping<K, V> {
    type Item = (K, V);
    type IntoIter = std::collections::hash_map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Mapping<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = std::collections::hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K, V> Container for Mapping<K, V> {
    const KIND: &'static str = "mapping";

    fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
