//! Sequence: a dense, 1-indexed ordered container.
//!
//! # Indexing
//!
//! Every public position is **1-based**. Negative positions count from the
//! end: `-1` is the last element, `-len` the first. Storage is a plain `Vec`,
//! so there are never gaps; removing an element re-packs the positions after it.
//!
//! Reads outside `1..=len` (after normalization) return `None` or an empty
//! sequence rather than failing. Writes validate their position and fail with
//! [`Error::Validation`].
//!
//! # In-place vs. Copy
//!
//! Operations come in pairs where it matters:
//!
//! | In place (`&mut self`) | Returns new |
//! |------------------------|-------------|
//! | [`Sequence::sort`]     | [`Sequence::to_sorted`] |
//! | [`Sequence::reverse`]  | [`Sequence::to_reversed`] |
//! | [`Sequence::splice`]   | [`Sequence::to_spliced`] |
//!
//! `rotate`, `shuffle`, `slice` and the set/grouping operations always return new sequences.
//!
//! # Example
//!
//! ```rust
//! use tablekit::sequence;
//!
//! let mut letters = sequence!["a", "b", "c", "d"];
//! assert_eq!(letters.at(-1), Some(&"d"));
//!
//! let removed = letters.splice(2, Some(2), ["x"]);
//! assert_eq!(removed.to_vec(), vec!["b", "c"]);
//! assert_eq!(letters.to_vec(), vec!["a", "x", "d"]);
//! ```

mod grouping;
mod numeric;
mod random;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use numeric::Numeric;

use super::mapping::Mapping;
use super::shared::Container;
use crate::error::{Error, Result};

/// Ordered, gap-free container with 1-based positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sequence<T> {
    items: Vec<T>,
}

impl<T> Sequence<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Drains a pull-style producer until it reports exhaustion with `None`.
    pub fn from_producer(producer: impl FnMut() -> Option<T>) -> Self {
        std::iter::from_fn(producer).collect()
    }

    /// Collects positions `1, 2, 3, ...` of `mapping`, stopping at the first gap.
    pub fn from_mapping(mapping: &Mapping<i64, T>) -> Self
    where
        T: Clone,
    {
        (1..)
            .map_while(|position: i64| mapping.get(&position).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.clone()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    // ------------------------------------------------------------------
    // Index arithmetic
    // ------------------------------------------------------------------

    /// Maps a negative position onto `len + index + 1`. Non-negative positions pass through.
    fn normalize(&self, index: i64) -> i64 {
        if index < 0 {
            self.items.len() as i64 + index + 1
        } else {
            index
        }
    }

    /// Storage offset for a public position, or `None` when out of range.
    fn offset_of(&self, index: i64) -> Option<usize> {
        let position = self.normalize(index);
        if position >= 1 && position <= self.items.len() as i64 {
            Some((position - 1) as usize)
        } else {
            None
        }
    }

    /// Normalized `[start, finish]` clamped into `1..=len`, as a storage range.
    fn clamped_range(&self, start: i64, finish: Option<i64>) -> Option<std::ops::Range<usize>> {
        let len = self.items.len() as i64;
        if len == 0 {
            return None;
        }
        let start = self.normalize(start).clamp(1, len);
        let finish = finish.map_or(len, |f| self.normalize(f)).clamp(1, len);
        if start > finish {
            return None;
        }
        Some((start - 1) as usize..finish as usize)
    }

    pub(crate) fn raw_mut(&mut self, offset: usize) -> Option<&mut T> {
        self.items.get_mut(offset)
    }

    // ------------------------------------------------------------------
    // Element access and mutation
    // ------------------------------------------------------------------

    /// Element at `index`, counting from the end when negative.
    pub fn at(&self, index: i64) -> Option<&T> {
        self.offset_of(index).map(|offset| &self.items[offset])
    }

    pub fn at_mut(&mut self, index: i64) -> Option<&mut T> {
        self.offset_of(index).map(move |offset| &mut self.items[offset])
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Replaces the element at `index`, or appends when `index` is `len + 1`.
    pub fn set(&mut self, index: i64, value: T) -> Result<()> {
        let position = self.normalize(index);
        let len = self.items.len() as i64;
        match position {
            p if p >= 1 && p <= len => self.items[(p - 1) as usize] = value,
            p if p == len + 1 => self.items.push(value),
            _ => {
                return Err(Error::validation(format!(
                    "position {index} is outside 1..={}",
                    len + 1
                )))
            }
        }
        Ok(())
    }

    /// Inserts before `index`, shifting later elements right. `len + 1` appends.
    pub fn insert(&mut self, index: i64, value: T) -> Result<()> {
        let position = self.normalize(index);
        let len = self.items.len() as i64;
        if position < 1 || position > len + 1 {
            return Err(Error::validation(format!(
                "insert position {index} is outside 1..={}",
                len + 1
            )));
        }
        self.items.insert((position - 1) as usize, value);
        Ok(())
    }

    /// Removes and returns the element at `index`, closing the gap.
    pub fn remove(&mut self, index: i64) -> Option<T> {
        self.offset_of(index).map(|offset| self.items.remove(offset))
    }

    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Removes the first element.
    pub fn shift(&mut self) -> Option<T> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.items.remove(0))
        }
    }

    /// Prepends `value`.
    pub fn unshift(&mut self, value: T) {
        self.items.insert(0, value);
    }

    /// Overwrites positions `start..=finish` (clamped) with clones of `value`.
    pub fn fill(&mut self, value: T, start: i64, finish: Option<i64>) -> &mut Self
    where
        T: Clone,
    {
        if let Some(range) = self.clamped_range(start, finish) {
            self.items[range].fill(value);
        }
        self
    }

    // ------------------------------------------------------------------
    // Slicing and splicing
    // ------------------------------------------------------------------

    /// Copy of positions `start..=finish`.
    ///
    /// Both bounds are negative-normalized and clamped into `1..=len`;
    /// `finish` defaults to the last position. `start > finish` is empty.
    pub fn slice(&self, start: i64, finish: Option<i64>) -> Self
    where
        T: Clone,
    {
        self.clamped_range(start, finish)
            .map(|range| self.items[range].to_vec().into())
            .unwrap_or_default()
    }

    /// Removes `delete_count` elements starting at `start` and inserts `inserted` there.
    ///
    /// `start` is clamped to `1..=len + 1`; `delete_count` defaults to the rest
    /// of the sequence and is clamped to `0..=len - start + 1`. Returns the
    /// removed elements in their original order.
    pub fn splice(
        &mut self,
        start: i64,
        delete_count: Option<i64>,
        inserted: impl IntoIterator<Item = T>,
    ) -> Self {
        let len = self.items.len() as i64;
        let start = self.normalize(start).clamp(1, len + 1);
        let available = len - start + 1;
        let delete = delete_count.map_or(available, |count| count.clamp(0, available));
        let from = (start - 1) as usize;
        self.items
            .splice(from..from + delete as usize, inserted)
            .collect()
    }

    /// [`Sequence::splice`] applied to a copy. Returns the spliced copy.
    pub fn to_spliced(
        &self,
        start: i64,
        delete_count: Option<i64>,
        inserted: impl IntoIterator<Item = T>,
    ) -> Self
    where
        T: Clone,
    {
        let mut copy = self.clone();
        copy.splice(start, delete_count, inserted);
        copy
    }

    /// Elements of `self` followed by elements of `other`.
    pub fn concat(&self, other: &Self) -> Self
    where
        T: Clone,
    {
        self.items.iter().chain(other.items.iter()).cloned().collect()
    }

    // ------------------------------------------------------------------
    // Reordering
    // ------------------------------------------------------------------

    pub fn reverse(&mut self) -> &mut Self {
        self.items.reverse();
        self
    }

    pub fn to_reversed(&self) -> Self
    where
        T: Clone,
    {
        self.items.iter().rev().cloned().collect()
    }

    /// Copy rotated right by `amount` (left when negative), modulo the length.
    pub fn rotate(&self, amount: i64) -> Self
    where
        T: Clone,
    {
        let mut copy = self.items.clone();
        if copy.len() > 1 {
            let shift = amount.rem_euclid(copy.len() as i64) as usize;
            copy.rotate_right(shift);
        }
        copy.into()
    }

    // ------------------------------------------------------------------
    // Traversal
    // ------------------------------------------------------------------

    /// Folds the sequence, optionally from the end.
    ///
    /// Without `initial`, the first element (the last when `reverse`) seeds
    /// the accumulator and folding starts from the element after it. An empty
    /// sequence without `initial` yields `None`.
    pub fn reduce(
        &self,
        mut reducer: impl FnMut(T, &T) -> T,
        initial: Option<T>,
        reverse: bool,
    ) -> Option<T>
    where
        T: Clone,
    {
        let mut ordered: Box<dyn Iterator<Item = &T>> = if reverse {
            Box::new(self.items.iter().rev())
        } else {
            Box::new(self.items.iter())
        };
        let mut acc = match initial {
            Some(seed) => seed,
            None => ordered.next()?.clone(),
        };
        for item in ordered {
            acc = reducer(acc, item);
        }
        Some(acc)
    }

    /// Fold with an explicit accumulator of any type.
    pub fn fold<A>(&self, initial: A, mut f: impl FnMut(A, &T) -> A, reverse: bool) -> A {
        if reverse {
            self.items.iter().rev().fold(initial, |acc, item| f(acc, item))
        } else {
            self.items.iter().fold(initial, |acc, item| f(acc, item))
        }
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Sequence<U> {
        self.items.iter().map(f).collect()
    }

    pub fn filter(&self, mut predicate: impl FnMut(&T) -> bool) -> Self
    where
        T: Clone,
    {
        self.items
            .iter()
            .filter(|item| predicate(item))
            .cloned()
            .collect()
    }

    pub fn flat_map<U, I>(&self, f: impl FnMut(&T) -> I) -> Sequence<U>
    where
        I: IntoIterator<Item = U>,
    {
        self.items.iter().flat_map(f).collect()
    }

    pub fn for_each(&self, f: impl FnMut(&T)) {
        self.items.iter().for_each(f);
    }

    pub fn some(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.items.iter().any(predicate)
    }

    pub fn every(&self, predicate: impl FnMut(&T) -> bool) -> bool {
        self.items.iter().all(predicate)
    }

    pub fn count(&self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        self.items.iter().filter(|item| predicate(item)).count()
    }

    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items.iter().find(|item| predicate(item))
    }

    pub fn find_last(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&T> {
        self.items.iter().rev().find(|item| predicate(item))
    }

    /// 1-based position of the first match.
    pub fn find_index(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(predicate).map(|offset| offset + 1)
    }

    /// 1-based position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.find_index(|item| item == value)
    }

    /// 1-based position of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items
            .iter()
            .rposition(|item| item == value)
            .map(|offset| offset + 1)
    }

    pub fn includes(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(value)
    }

    /// Displays every element separated by `separator`.
    pub fn join(&self, separator: &str) -> String
    where
        T: fmt::Display,
    {
        self.items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl Sequence<char> {
    /// Splits text into single characters.
    pub fn from_text(text: &str) -> Self {
        text.chars().collect()
    }
}

impl<T> Default for Sequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for Sequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Sequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<T> IntoIterator for Sequence<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Sequence<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> Container for Sequence<T> {
    const KIND: &'static str = "sequence";

    fn entry_count(&self) -> usize {
        self.items.len()
    }
}
