//! Numeric reductions and the sort family.

use std::cmp::Ordering;
use std::fmt::Debug;

use super::Sequence;
use crate::error::{Error, Result};

/// Elements that can be summed and averaged.
pub trait Numeric: Copy {
    const ZERO: Self;

    fn to_f64(&self) -> f64;

    /// Addition in the element's own type. Integers wrap on overflow.
    fn plus(self, other: Self) -> Self;
}

macro_rules! integer_numeric_impls {
    ($($ty:ty),*) => { $(
        impl Numeric for $ty {
            const ZERO: Self = 0;
            fn to_f64(&self) -> f64 { *self as f64 }
            fn plus(self, other: Self) -> Self { self.wrapping_add(other) }
        }
    )* };
}

macro_rules! float_numeric_impls {
    ($($ty:ty),*) => { $(
        impl Numeric for $ty {
            const ZERO: Self = 0.0;
            fn to_f64(&self) -> f64 { *self as f64 }
            fn plus(self, other: Self) -> Self { self + other }
        }
    )* };
}

integer_numeric_impls!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
float_numeric_impls!(f32, f64);

/// Stable bottom-up merge sort over positions, so a failed comparison leaves
/// the elements untouched.
fn sorted_order<T: PartialOrd + Debug>(items: &[T]) -> Result<Vec<usize>> {
    let len = items.len();
    let mut order: Vec<usize> = (0..len).collect();
    let mut buffer = order.clone();
    let mut width = 1;
    while width < len {
        for start in (0..len).step_by(2 * width) {
            let mid = (start + width).min(len);
            let end = (start + 2 * width).min(len);
            let (mut left, mut right, mut out) = (start, mid, start);
            while left < mid && right < end {
                let (a, b) = (&items[order[left]], &items[order[right]]);
                match b.partial_cmp(a) {
                    Some(Ordering::Less) => {
                        buffer[out] = order[right];
                        right += 1;
                    }
                    Some(_) => {
                        buffer[out] = order[left];
                        left += 1;
                    }
                    None => return Err(Error::ordering(a, b)),
                }
                out += 1;
            }
            let rest = mid - left;
            buffer[out..out + rest].copy_from_slice(&order[left..mid]);
            out += rest;
            buffer[out..end].copy_from_slice(&order[right..end]);
        }
        std::mem::swap(&mut order, &mut buffer);
        width *= 2;
    }
    Ok(order)
}

/// Scans for the element that wins against every other under `wins`.
fn extreme<'a, T: PartialOrd + Debug>(items: &'a [T], wins: Ordering) -> Result<Option<&'a T>> {
    let mut iter = items.iter();
    let Some(mut best) = iter.next() else {
        return Ok(None);
    };
    for item in iter {
        match item.partial_cmp(best) {
            Some(ordering) if ordering == wins => best = item,
            Some(_) => {}
            None => return Err(Error::ordering(item, best)),
        }
    }
    Ok(Some(best))
}

impl<T> Sequence<T> {
    /// Smallest element under the natural order; the first one wins ties.
    pub fn min(&self) -> Result<Option<&T>>
    where
        T: PartialOrd + Debug,
    {
        extreme(&self.items, Ordering::Less)
    }

    /// Largest element under the natural order; the first one wins ties.
    pub fn max(&self) -> Result<Option<&T>>
    where
        T: PartialOrd + Debug,
    {
        extreme(&self.items, Ordering::Greater)
    }

    /// Element with the smallest key. NaN keys never win.
    pub fn min_by_key(&self, mut key: impl FnMut(&T) -> f64) -> Option<&T> {
        let mut best: Option<(&T, f64)> = None;
        for item in &self.items {
            let k = key(item);
            if best.map_or(!k.is_nan(), |(_, current)| k < current) {
                best = Some((item, k));
            }
        }
        best.map(|(item, _)| item)
    }

    /// Element with the largest key. NaN keys never win.
    pub fn max_by_key(&self, mut key: impl FnMut(&T) -> f64) -> Option<&T> {
        let mut best: Option<(&T, f64)> = None;
        for item in &self.items {
            let k = key(item);
            if best.map_or(!k.is_nan(), |(_, current)| k > current) {
                best = Some((item, k));
            }
        }
        best.map(|(item, _)| item)
    }

    /// Total in the element type, so integer sums stay exact.
    pub fn sum(&self) -> T
    where
        T: Numeric,
    {
        self.items.iter().fold(T::ZERO, |total, item| total.plus(*item))
    }

    pub fn sum_by(&self, key: impl FnMut(&T) -> f64) -> f64 {
        self.items.iter().map(key).sum()
    }

    /// Arithmetic mean, or `None` for an empty sequence. The mean is
    /// computed in `f64`, so integer inputs beyond 2^53 lose precision.
    pub fn average(&self) -> Option<f64>
    where
        T: Numeric,
    {
        self.average_by(Numeric::to_f64)
    }

    pub fn average_by(&self, key: impl FnMut(&T) -> f64) -> Option<f64> {
        if self.items.is_empty() {
            None
        } else {
            Some(self.sum_by(key) / self.items.len() as f64)
        }
    }

    /// Sorts in place under the natural order and returns `self`.
    ///
    /// Fails with [`Error::OrderingFailure`] when two compared elements are not
    /// mutually ordered; the sequence is unchanged in that case.
    pub fn sort(&mut self) -> Result<&mut Self>
    where
        T: PartialOrd + Debug,
    {
        let order = sorted_order(&self.items)?;
        let mut slots: Vec<Option<T>> = std::mem::take(&mut self.items)
            .into_iter()
            .map(Some)
            .collect();
        self.items = order.iter().filter_map(|&i| slots[i].take()).collect();
        Ok(self)
    }

    /// Stable in-place sort with a caller-supplied comparator.
    pub fn sort_by(&mut self, compare: impl FnMut(&T, &T) -> Ordering) -> &mut Self {
        self.items.sort_by(compare);
        self
    }

    pub fn sort_by_key<K: Ord>(&mut self, key: impl FnMut(&T) -> K) -> &mut Self {
        self.items.sort_by_key(key);
        self
    }

    /// Sorted copy; `self` is untouched.
    pub fn to_sorted(&self) -> Result<Self>
    where
        T: Clone + PartialOrd + Debug,
    {
        let order = sorted_order(&self.items)?;
        Ok(order.iter().map(|&i| self.items[i].clone()).collect())
    }

    pub fn to_sorted_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Self
    where
        T: Clone,
    {
        let mut copy = self.clone();
        copy.sort_by(compare);
        copy
    }
}
