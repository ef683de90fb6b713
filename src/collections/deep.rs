//! Deep clone, structural equality and merge primitives.
//!
//! These three traits are implemented for scalars, `Option`, [`Mapping`],
//! [`Sequence`], [`Shared`] handles and the dynamic [`Value`](super::Value),
//! recursing through nested containers. Cyclic structures built from shared
//! handles are not supported and recurse without bound.

use std::hash::Hash;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::mapping::Mapping;
use super::sequence::Sequence;
use super::shared::{Container, Shared};
use crate::error::Result;

/// Recursive full copy. The result shares no nested container with the input.
pub trait DeepClone {
    fn deep_clone(&self) -> Self;
}

/// Recursive structural equality.
pub trait DeepMatch {
    fn deep_matches(&self, other: &Self) -> bool;
}

/// How colliding numeric values are combined during a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MergePolicy {
    /// Colliding numbers are added together. This is what `merge` does by default.
    #[default]
    AddNumbers,
    /// The source value always replaces the target value.
    Overwrite,
}

impl MergePolicy {
    pub fn from_add_flag(add_duplicate_numbers: bool) -> Self {
        if add_duplicate_numbers {
            MergePolicy::AddNumbers
        } else {
            MergePolicy::Overwrite
        }
    }
}

/// Recursive merge of `source` into `self`.
///
/// Nested containers on both sides recurse; numbers follow the [`MergePolicy`];
/// anything else is overwritten by the source value.
pub trait Merge: Sized {
    fn merge_from(&mut self, source: Self, policy: MergePolicy) -> Result<()>;
}

macro_rules! integer_impls {
    ($($ty:ty),*) => { $(
        impl DeepClone for $ty {
            fn deep_clone(&self) -> Self { *self }
        }
        impl DeepMatch for $ty {
            fn deep_matches(&self, other: &Self) -> bool { self == other }
        }
        impl Merge for $ty {
            fn merge_from(&mut self, source: Self, policy: MergePolicy) -> Result<()> {
                *self = match policy {
                    MergePolicy::AddNumbers => self.wrapping_add(source),
                    MergePolicy::Overwrite => source,
                };
                Ok(())
            }
        }
    )* };
}

macro_rules! float_impls {
    ($($ty:ty),*) => { $(
        impl DeepClone for $ty {
            fn deep_clone(&self) -> Self { *self }
        }
        impl DeepMatch for $ty {
            fn deep_matches(&self, other: &Self) -> bool { self == other }
        }
        impl Merge for $ty {
            fn merge_from(&mut self, source: Self, policy: MergePolicy) -> Result<()> {
                *self = match policy {
                    MergePolicy::AddNumbers => *self + source,
                    MergePolicy::Overwrite => source,
                };
                Ok(())
            }
        }
    )* };
}

macro_rules! opaque_impls {
    ($($ty:ty),*) => { $(
        impl DeepClone for $ty {
            fn deep_clone(&self) -> Self { self.clone() }
        }
        impl DeepMatch for $ty {
            fn deep_matches(&self, other: &Self) -> bool { self == other }
        }
        impl Merge for $ty {
            fn merge_from(&mut self, source: Self, _policy: MergePolicy) -> Result<()> {
                *self = source;
                Ok(())
            }
        }
    )* };
}

integer_impls!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
float_impls!(f32, f64);
opaque_impls!(bool, char, String, Rc<str>, ());

impl<'a> DeepClone for &'a str {
    fn deep_clone(&self) -> Self {
        self
    }
}

impl<'a> DeepMatch for &'a str {
    fn deep_matches(&self, other: &Self) -> bool {
        self == other
    }
}

impl<'a> Merge for &'a str {
    fn merge_from(&mut self, source: Self, _policy: MergePolicy) -> Result<()> {
        *self = source;
        Ok(())
    }
}

impl<T: DeepClone> DeepClone for Option<T> {
    fn deep_clone(&self) -> Self {
        self.as_ref().map(DeepClone::deep_clone)
    }
}

impl<T: DeepMatch> DeepMatch for Option<T> {
    fn deep_matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.deep_matches(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Merge> Merge for Option<T> {
    /// An absent source leaves the target untouched.
    fn merge_from(&mut self, source: Self, policy: MergePolicy) -> Result<()> {
        if let Some(source) = source {
            match self {
                Some(target) => target.merge_from(source, policy)?,
                None => *self = Some(source),
            }
        }
        Ok(())
    }
}

impl<K, V> DeepClone for Mapping<K, V>
where
    K: Eq + Hash + DeepClone,
    V: DeepClone,
{
    fn deep_clone(&self) -> Self {
        self.iter()
            .map(|(k, v)| (k.deep_clone(), v.deep_clone()))
            .collect()
    }
}

impl<K, V> DeepMatch for Mapping<K, V>
where
    K: Eq + Hash,
    V: DeepMatch,
{
    fn deep_matches(&self, other: &Self) -> bool {
        // Keys are unique, so equal sizes plus a one-way key check covers both directions.
        self.size() == other.size()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| v.deep_matches(o)))
    }
}

impl<K, V> Merge for Mapping<K, V>
where
    K: Eq + Hash,
    V: Merge,
{
    fn merge_from(&mut self, source: Self, policy: MergePolicy) -> Result<()> {
        for (key, value) in source {
            match self.get_mut(&key) {
                Some(target) => target.merge_from(value, policy)?,
                None => {
                    self.insert(key, value);
                }
            }
        }
        Ok(())
    }
}

impl<T: DeepClone> DeepClone for Sequence<T> {
    fn deep_clone(&self) -> Self {
        self.iter().map(DeepClone::deep_clone).collect()
    }
}

impl<T: DeepMatch> DeepMatch for Sequence<T> {
    fn deep_matches(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.deep_matches(b))
    }
}

impl<T: Merge> Merge for Sequence<T> {
    /// Positions present on both sides merge pairwise; extra source positions are appended.
    fn merge_from(&mut self, source: Self, policy: MergePolicy) -> Result<()> {
        let shared = self.len();
        for (offset, value) in source.into_iter().enumerate() {
            if offset < shared {
                if let Some(target) = self.raw_mut(offset) {
                    target.merge_from(value, policy)?;
                }
            } else {
                self.push(value);
            }
        }
        Ok(())
    }
}

impl<C: Container + DeepClone> DeepClone for Shared<C> {
    /// The copy is a new, live handle even when `self` is frozen.
    fn deep_clone(&self) -> Self {
        Shared::new(self.read(DeepClone::deep_clone))
    }
}

impl<C: Container + DeepMatch> DeepMatch for Shared<C> {
    fn deep_matches(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.read(|a| other.read(|b| a.deep_matches(b)))
    }
}

impl<C: Container + Merge + Clone> Merge for Shared<C> {
    /// Merges into a shallow copy of the target and stores it back in one
    /// write. No borrow is held while nested handles, which may alias `self`,
    /// are read or written.
    fn merge_from(&mut self, source: Self, policy: MergePolicy) -> Result<()> {
        self.write(|_| ())?;
        let incoming = source.snapshot();
        let mut merged = self.snapshot();
        merged.merge_from(incoming, policy)?;
        self.write(|target| *target = merged)
    }
}
