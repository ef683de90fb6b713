//! Container types and the deep operations over them.
//!
//! Two families live here:
//!
//! - Typed containers: [`Mapping`] (unordered, key-unique) and [`Sequence`]
//!   (1-indexed, dense). Owned values; freezing one yields a [`FrozenView`].
//! - The dynamic [`Value`], whose tables and lists are [`Shared`] handles that
//!   freeze in place for every holder.
//!
//! [`DeepClone`], [`DeepMatch`] and [`Merge`] recurse through both families.
//!
//! # Example: Quick Start
//!
//! ```rust
//! use tablekit::collections::{DeepClone, DeepMatch, Value};
//!
//! let defaults = Value::from_pairs([("volume", Value::from(5)), ("muted", Value::from(false))]);
//! let copy = defaults.deep_clone();
//! assert!(copy.deep_matches(&defaults));
//! assert!(copy != defaults); // different tables
//!
//! defaults.freeze();
//! assert!(defaults.set("volume", 11).is_err());
//! assert!(copy.set("volume", 11).is_ok());
//! ```

pub mod deep;
pub mod frozen;
pub mod mapping;
pub mod sequence;
pub mod shared;
pub mod value;

#[cfg(test)]
mod tests;

pub use deep::{DeepClone, DeepMatch, Merge, MergePolicy};
pub use frozen::{Freeze, FrozenView, IsFrozen};
pub use mapping::{size, Mapping};
pub use sequence::{Numeric, Sequence};
pub use shared::{Container, Shared};
pub use value::{Key, List, Table, Value};
