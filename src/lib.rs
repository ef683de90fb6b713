//! Table and sequence utilities: typed mapping and sequence containers,
//! deep clone/merge/match, and shallow freezing.

pub mod collections;
pub mod config;
pub mod error;

pub use collections::{
    DeepClone, DeepMatch, Freeze, FrozenView, IsFrozen, Key, Mapping, Merge, MergePolicy,
    Sequence, Shared, Value,
};
pub use error::{Error, Result};

// ============================================================================
// Construction Macros
// ============================================================================

/// Builds a [`Sequence`] from a list of elements, like `vec!`.
///
/// # Example
/// ```
/// let s = tablekit::sequence![1, 2, 3];
/// assert_eq!(s.at(-1), Some(&3));
/// ```
#[macro_export]
macro_rules! sequence {
    () => {
        $crate::collections::Sequence::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::collections::Sequence::from(::std::vec![$elem; $n])
    };
    ($($x:expr),+ $(,)?) => {
        $crate::collections::Sequence::from(::std::vec![$($x),+])
    };
}

// ============================================================================
// Deep Operations
// ============================================================================

/// Independent recursive copy of `value`.
pub fn deepclone<T: DeepClone>(value: &T) -> T {
    value.deep_clone()
}

/// Recursively merges `source` into `target`; the source wins every collision
/// that is not two nested containers. Returns `target`.
pub fn deep_merge<T: Merge>(target: &mut T, source: T) -> Result<&mut T> {
    target.merge_from(source, MergePolicy::Overwrite)?;
    Ok(target)
}

/// Like [`deep_merge`], but colliding numbers are added when
/// `add_duplicate_numbers` is set (pass `true` for the usual behaviour).
pub fn merge<T: Merge>(target: &mut T, source: T, add_duplicate_numbers: bool) -> Result<&mut T> {
    target.merge_from(source, MergePolicy::from_add_flag(add_duplicate_numbers))?;
    Ok(target)
}

/// Deep structural equality.
pub fn matches<T: DeepMatch>(left: &T, right: &T) -> bool {
    left.deep_matches(right)
}

/// Shallow, one-time freeze. See [`collections::frozen`].
pub fn freeze<F: Freeze>(value: F) -> F::Frozen {
    value.into_frozen()
}

pub fn is_frozen<T: IsFrozen + ?Sized>(value: &T) -> bool {
    value.is_frozen()
}

/// True when `value` is array-shaped: a list, or a table keyed exactly `1..=len`.
pub fn is_array(value: &Value) -> bool {
    value.is_array()
}
