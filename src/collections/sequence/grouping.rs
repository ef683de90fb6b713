//! Grouping, set-like and alignment operations.
//!
//! Every output keeps the relative order elements had in the source. The set
//! operations (`unique`, `intersect`, `difference`, `union`) emit each distinct
//! element once, at its first occurrence.

use std::hash::Hash;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::Sequence;
use crate::collections::mapping::Mapping;
use crate::error::{Error, Result};

impl<T> Sequence<T> {
    /// Buckets elements by `group_fn`. Within a bucket, source order is kept.
    pub fn group_by<K>(&self, mut group_fn: impl FnMut(&T) -> K) -> Mapping<K, Sequence<T>>
    where
        K: Eq + Hash,
        T: Clone,
    {
        let mut groups: Mapping<K, Sequence<T>> = Mapping::new();
        for item in &self.items {
            let key = group_fn(item);
            match groups.get_mut(&key) {
                Some(bucket) => bucket.push(item.clone()),
                None => {
                    groups.insert(key, Sequence::from(vec![item.clone()]));
                }
            }
        }
        groups
    }

    /// Splits into `(matched, unmatched)` in one pass.
    pub fn partition(&self, mut predicate: impl FnMut(&T) -> bool) -> (Self, Self)
    where
        T: Clone,
    {
        let mut matched = Self::new();
        let mut unmatched = Self::new();
        for item in &self.items {
            if predicate(item) {
                matched.push(item.clone());
            } else {
                unmatched.push(item.clone());
            }
        }
        (matched, unmatched)
    }

    /// Consecutive runs of `size` elements; the last run may be shorter.
    pub fn chunk(&self, size: usize) -> Result<Sequence<Self>>
    where
        T: Clone,
    {
        if size == 0 {
            return Err(Error::validation("chunk size must be greater than zero"));
        }
        Ok(self
            .items
            .chunks(size)
            .map(|run| Self::from(run.to_vec()))
            .collect())
    }

    /// First occurrence of each distinct element.
    pub fn unique(&self) -> Self
    where
        T: Clone + Eq + Hash,
    {
        self.unique_by(|item| item.clone())
    }

    /// First element for each distinct key computed by `key_fn`.
    pub fn unique_by<K>(&self, mut key_fn: impl FnMut(&T) -> K) -> Self
    where
        K: Eq + Hash,
        T: Clone,
    {
        let mut seen = FxHashSet::default();
        self.items
            .iter()
            .filter(|item| seen.insert(key_fn(item)))
            .cloned()
            .collect()
    }

    /// Distinct elements of `self` that also appear in `other`.
    pub fn intersect(&self, other: &Self) -> Self
    where
        T: Clone + Eq + Hash,
    {
        let wanted: FxHashSet<&T> = other.items.iter().collect();
        let mut seen = FxHashSet::default();
        self.items
            .iter()
            .filter(|item| wanted.contains(item) && seen.insert(*item))
            .cloned()
            .collect()
    }

    /// Distinct elements of `self` that do not appear in `other`.
    pub fn difference(&self, other: &Self) -> Self
    where
        T: Clone + Eq + Hash,
    {
        let excluded: FxHashSet<&T> = other.items.iter().collect();
        let mut seen = FxHashSet::default();
        self.items
            .iter()
            .filter(|item| !excluded.contains(item) && seen.insert(*item))
            .cloned()
            .collect()
    }

    /// Distinct elements of `self` followed by the new ones from `other`.
    pub fn union(&self, other: &Self) -> Self
    where
        T: Clone + Eq + Hash,
    {
        let mut seen = FxHashSet::default();
        self.items
            .iter()
            .chain(other.items.iter())
            .filter(|item| seen.insert(*item))
            .cloned()
            .collect()
    }

    /// Copy with every occurrence of `values` removed. Duplicates of other elements stay.
    pub fn without(&self, values: &[T]) -> Self
    where
        T: Clone + PartialEq,
    {
        self.filter(|item| !values.contains(item))
    }

    /// Aligns `self` with `others` position by position.
    ///
    /// The result is as long as the longest input; shorter inputs contribute
    /// `None` at the positions they lack.
    pub fn zip(&self, others: &[&Self]) -> Sequence<Sequence<Option<T>>>
    where
        T: Clone,
    {
        let mut inputs: SmallVec<[&Self; 4]> = SmallVec::with_capacity(others.len() + 1);
        inputs.push(self);
        inputs.extend(others.iter().copied());

        let width = inputs.iter().map(|s| s.len()).max().unwrap_or(0);
        (0..width)
            .map(|offset| {
                inputs
                    .iter()
                    .map(|s| s.items.get(offset).cloned())
                    .collect()
            })
            .collect()
    }
}

impl<T: Clone> Sequence<Sequence<T>> {
    /// Swaps rows and columns. Ragged rows are padded with `None`.
    pub fn transpose(&self) -> Sequence<Sequence<Option<T>>> {
        let columns = self.items.iter().map(Sequence::len).max().unwrap_or(0);
        (0..columns)
            .map(|column| {
                self.items
                    .iter()
                    .map(|row| row.items.get(column).cloned())
                    .collect()
            })
            .collect()
    }

    /// Concatenates the rows.
    pub fn flatten(&self) -> Sequence<T> {
        self.items.iter().flat_map(|row| row.items.iter().cloned()).collect()
    }
}
