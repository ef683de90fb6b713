//! Random sampling and shuffling.
//!
//! The plain methods draw from `rand::rng()`, the thread-local generator.
//! Each has a `*_with` twin taking any [`Rng`], which is how callers get
//! reproducible draws (see [`LibraryConfig::rng`](crate::config::LibraryConfig::rng)).

use rand::Rng;
use tracing::trace;

use super::Sequence;

impl<T> Sequence<T> {
    /// One uniformly chosen element, or `None` when empty.
    pub fn sample_one(&self) -> Option<&T> {
        self.sample_one_with(&mut rand::rng())
    }

    pub fn sample_one_with<R: Rng>(&self, rng: &mut R) -> Option<&T> {
        if self.items.is_empty() {
            None
        } else {
            Some(&self.items[rng.random_range(0..self.items.len())])
        }
    }

    /// Draws `count` elements.
    ///
    /// Without replacement this is a partial Fisher-Yates draw: at most `len`
    /// elements, no position drawn twice, in draw order. With replacement every
    /// draw is independent and duplicates are possible.
    pub fn sample(&self, count: usize, replace: bool) -> Self
    where
        T: Clone,
    {
        self.sample_with(count, replace, &mut rand::rng())
    }

    pub fn sample_with<R: Rng>(&self, count: usize, replace: bool, rng: &mut R) -> Self
    where
        T: Clone,
    {
        let len = self.items.len();
        if len == 0 {
            return Self::new();
        }

        if replace {
            trace!("sampling {} of {} with replacement", count, len);
            return (0..count)
                .map(|_| self.items[rng.random_range(0..len)].clone())
                .collect();
        }

        let draws = count.min(len);
        trace!("sampling {} of {} without replacement", draws, len);
        let mut remaining: Vec<usize> = (0..len).collect();
        let mut drawn = Self::with_capacity(draws);
        for round in 0..draws {
            let pick = rng.random_range(round..len);
            remaining.swap(round, pick);
            drawn.push(self.items[remaining[round]].clone());
        }
        drawn
    }

    /// Uniformly shuffled copy (Fisher-Yates). `self` is untouched.
    pub fn shuffle(&self) -> Self
    where
        T: Clone,
    {
        self.shuffle_with(&mut rand::rng())
    }

    pub fn shuffle_with<R: Rng>(&self, rng: &mut R) -> Self
    where
        T: Clone,
    {
        let mut copy = self.items.clone();
        for i in (1..copy.len()).rev() {
            let j = rng.random_range(0..=i);
            copy.swap(i, j);
        }
        copy.into()
    }
}
