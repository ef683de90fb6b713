//! Library configuration and RON-backed default tables.
//!
//! [`LibraryConfig`] holds the knobs that callers usually want to set once:
//! how merges treat colliding numbers and whether random draws are seeded.
//! Loading never fails hard; a missing or malformed file logs an error and
//! falls back to [`LibraryConfig::default`].

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::collections::{DeepClone, Merge, MergePolicy, Value};
use crate::error::Result;

/// Process-wide defaults for merge and sampling behaviour.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LibraryConfig {
    /// Whether `merge` adds colliding numbers (the usual behaviour) or overwrites them.
    pub add_duplicate_numbers: bool,
    /// Seed for [`LibraryConfig::rng`]. `None` seeds from the thread-local generator.
    pub rng_seed: Option<u64>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            add_duplicate_numbers: true,
            rng_seed: None,
        }
    }
}

impl LibraryConfig {
    /// Reads a RON config file, falling back to defaults on any failure.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_ron_str(&contents) {
                Ok(config) => {
                    info!("Loaded library config from {}", path.display());
                    config
                }
                Err(e) => {
                    error!("Failed to parse library config: {}", e);
                    error!("Using default LibraryConfig");
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                error!("Using default LibraryConfig");
                Self::default()
            }
        }
    }

    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn merge_policy(&self) -> MergePolicy {
        MergePolicy::from_add_flag(self.add_duplicate_numbers)
    }

    /// Generator for the `*_with` sampling methods. Reproducible when `rng_seed` is set.
    pub fn rng(&self) -> StdRng {
        match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Merges `source` into `target` under this config's merge policy.
    pub fn merge<'a, T: Merge>(&self, target: &'a mut T, source: T) -> Result<&'a mut T> {
        target.merge_from(source, self.merge_policy())?;
        Ok(target)
    }
}

/// Reads a RON document of defaults and returns it frozen.
pub fn load_defaults(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let defaults = Value::from_ron(&contents)?;
    defaults.freeze();
    info!("Loaded {} default entries from {}", defaults.len(), path.display());
    Ok(defaults)
}

/// Live copy of `defaults` with `overrides` deep-merged on top.
///
/// Overrides replace values rather than adding to them, and `defaults` is
/// left untouched, so it can stay frozen.
pub fn with_overrides(defaults: &Value, overrides: Value) -> Result<Value> {
    let mut settings = defaults.deep_clone();
    settings.merge_from(overrides, MergePolicy::Overwrite)?;
    Ok(settings)
}
