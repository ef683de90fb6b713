//! Read-only views.
//!
//! [`into_frozen`](Freeze::into_frozen) turns an owned [`Mapping`] or [`Sequence`] into a
//! [`FrozenView`], which only exposes `&self` accessors through `Deref`. Writes
//! are unrepresentable rather than checked at runtime.
//!
//! Shared handles ([`Shared`], and tables/lists inside a
//! [`Value`](super::Value)) freeze in place instead, so every holder of the
//! handle sees the change; see [`shared`](super::shared).
//!
//! Freezing is shallow for both forms. A `FrozenView<Mapping<_, Shared<_>>>`
//! still lets callers write through the nested handles.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use super::mapping::Mapping;
use super::sequence::Sequence;
use super::shared::{Container, Shared};

/// Immutable façade over a container snapshot.
pub struct FrozenView<C> {
    snapshot: Rc<C>,
}

impl<C> FrozenView<C> {
    fn new(container: C) -> Self {
        Self {
            snapshot: Rc::new(container),
        }
    }

    /// Shallow, mutable copy of the frozen contents.
    pub fn to_live(&self) -> C
    where
        C: Clone,
    {
        C::clone(&self.snapshot)
    }
}

impl<C> Deref for FrozenView<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.snapshot
    }
}

impl<C> Clone for FrozenView<C> {
    fn clone(&self) -> Self {
        Self {
            snapshot: Rc::clone(&self.snapshot),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for FrozenView<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FrozenView").field(&*self.snapshot).finish()
    }
}

impl<C: Container> Container for FrozenView<C> {
    const KIND: &'static str = C::KIND;

    fn entry_count(&self) -> usize {
        self.snapshot.entry_count()
    }
}

/// Conversion into a read-only form. Freezing something already frozen is a no-op.
pub trait Freeze {
    type Frozen;

    fn into_frozen(self) -> Self::Frozen;
}

/// O(1) check for frozen containers.
pub trait IsFrozen {
    fn is_frozen(&self) -> bool;
}

impl<K, V> Freeze for Mapping<K, V> {
    type Frozen = FrozenView<Self>;

    fn into_frozen(self) -> Self::Frozen {
        FrozenView::new(self)
    }
}

impl<T> Freeze for Sequence<T> {
    type Frozen = FrozenView<Self>;

    fn into_frozen(self) -> Self::Frozen {
        FrozenView::new(self)
    }
}

impl<C> Freeze for FrozenView<C> {
    type Frozen = Self;

    fn into_frozen(self) -> Self {
        self
    }
}

impl<C: Container> Freeze for Shared<C> {
    type Frozen = Self;

    fn into_frozen(self) -> Self {
        Shared::freeze(&self);
        self
    }
}

impl<K, V> IsFrozen for Mapping<K, V> {
    fn is_frozen(&self) -> bool {
        false
    }
}

impl<T> IsFrozen for Sequence<T> {
    fn is_frozen(&self) -> bool {
        false
    }
}

impl<C> IsFrozen for FrozenView<C> {
    fn is_frozen(&self) -> bool {
        true
    }
}

impl<C: Container> IsFrozen for Shared<C> {
    fn is_frozen(&self) -> bool {
        Shared::is_frozen(self)
    }
}
