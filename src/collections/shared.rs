//! Shared container handles with in-place freezing.
//!
//! A [`Shared`] handle is a reference to a container. Cloning the handle
//! aliases the container, the same way two variables can hold one table.
//! Freezing switches the storage behind the handle to a frozen snapshot, so
//! every holder of the handle observes the frozen behaviour:
//!
//! - reads forward to the snapshot taken at freeze time
//! - writes fail with [`Error::ImmutabilityViolation`] and change nothing
//! - the reported count is the snapshot's count
//!
//! Freezing is shallow. Handles stored *inside* a frozen container are still
//! live and can be mutated; the change is visible through the frozen one.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Common surface of the containers a handle can hold.
pub trait Container {
    /// Human-readable container kind used in error messages.
    const KIND: &'static str;

    fn entry_count(&self) -> usize;
}

/// Storage behind a handle. Once `frozen` is set the contents are the
/// read-only snapshot and are never handed out mutably again.
struct Slot<C> {
    contents: C,
    frozen: bool,
}

/// Reference-counted container handle. Single-threaded (`!Send`).
pub struct Shared<C> {
    cell: Rc<RefCell<Slot<C>>>,
}

impl<C: Container> Shared<C> {
    pub fn new(container: C) -> Self {
        Self {
            cell: Rc::new(RefCell::new(Slot {
                contents: container,
                frozen: false,
            })),
        }
    }

    /// Runs `f` against the current contents (the snapshot once frozen).
    pub fn read<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.cell.borrow().contents)
    }

    /// Runs `f` against the live contents.
    ///
    /// Fails with [`Error::ImmutabilityViolation`] without calling `f` when the
    /// handle is frozen.
    pub fn write<R>(&self, f: impl FnOnce(&mut C) -> R) -> Result<R> {
        let mut slot = self.cell.borrow_mut();
        if slot.frozen {
            debug!("rejected write to frozen {}", C::KIND);
            return Err(Error::ImmutabilityViolation { kind: C::KIND });
        }
        Ok(f(&mut slot.contents))
    }

    /// Freezes the container for every holder of this handle.
    ///
    /// The live storage becomes the read-only snapshot. Calling this on an
    /// already frozen handle does nothing.
    pub fn freeze(&self) {
        let mut slot = self.cell.borrow_mut();
        if !slot.frozen {
            slot.frozen = true;
            trace!("froze {} with {} entries", C::KIND, slot.contents.entry_count());
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.cell.borrow().frozen
    }

    /// Element count, taken from the snapshot once frozen.
    pub fn len(&self) -> usize {
        self.read(Container::entry_count)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when both handles refer to the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    /// Shallow copy of the current contents. Nested handles stay aliased.
    pub fn snapshot(&self) -> C
    where
        C: Clone,
    {
        self.read(Clone::clone)
    }
}

impl<C> Clone for Shared<C> {
    /// Aliases the container; use `deep_clone` for an independent copy.
    fn clone(&self) -> Self {
        Self {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for Shared<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.cell.borrow();
        if slot.frozen {
            f.debug_tuple("Frozen").field(&slot.contents).finish()
        } else {
            slot.contents.fmt(f)
        }
    }
}
