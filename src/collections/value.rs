//! Dynamic values: scalars mixed with shared tables and lists.
//!
//! `Value` is the "any" type callers use when keys and values are intermixed
//! (configuration records, option tables). Tables and lists are [`Shared`]
//! handles:
//!
//! - `value.clone()` aliases the container, like holding the same reference
//! - `deep_clone` produces an independent copy
//! - `freeze` freezes the container for every holder of the handle
//!
//! `==` is raw equality: scalars by value (`Int(1) == Float(1.0)`), containers
//! by identity. Use [`DeepMatch`] for structural equality.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::deep::{DeepClone, DeepMatch, Merge, MergePolicy};
use super::frozen::{Freeze, IsFrozen};
use super::mapping::Mapping;
use super::sequence::Sequence;
use super::shared::Shared;
use crate::error::{Error, Result};

/// Shared handle to a key/value table.
pub type Table = Shared<Mapping<Key, Value>>;

/// Shared handle to a list.
pub type List = Shared<Sequence<Value>>;

/// Hashable subset of [`Value`] usable as a table key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Bool(bool),
    Int(i64),
    Str(Rc<str>),
}

impl Key {
    pub fn type_name(&self) -> &'static str {
        match self {
            Key::Bool(_) => "boolean",
            Key::Int(_) => "integer",
            Key::Str(_) => "string",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Bool(b) => write!(f, "{b}"),
            Key::Int(i) => write!(f, "{i}"),
            Key::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Key {
    fn from(b: bool) -> Self {
        Key::Bool(b)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Int(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Int(i64::from(i))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(Rc::from(s))
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(Rc::from(s))
    }
}

impl DeepClone for Key {
    fn deep_clone(&self) -> Self {
        self.clone()
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Rc<str>),
    Table(Table),
    List(List),
}

impl Value {
    /// New empty, live table.
    pub fn table() -> Self {
        Value::Table(Shared::new(Mapping::new()))
    }

    /// New empty, live list.
    pub fn list() -> Self {
        Value::List(Shared::new(Sequence::new()))
    }

    /// Table built from key/value pairs. `Nil` values are dropped.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<Key>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mapping: Mapping<Key, Value> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .filter(|(_, v)| !v.is_nil())
            .collect();
        Value::Table(Shared::new(mapping))
    }

    /// List built from items. `Nil` items are dropped, so positions stay gap-free.
    pub fn from_items<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::List(Shared::new(
            items
                .into_iter()
                .map(Into::into)
                .filter(|v: &Value| !v.is_nil())
                .collect(),
        ))
    }

    /// Table built from a list of `[key, value]` lists.
    ///
    /// Entries with fewer than two elements, or whose first element cannot be
    /// a key, are skipped.
    pub fn from_entries(entries: &Value) -> Result<Self> {
        match entries {
            Value::List(list) => Ok(Value::Table(Shared::new(
                list.read(Mapping::from_entry_values),
            ))),
            other => Err(Error::validation(format!(
                "entries must be a list, got {}",
                other.type_name()
            ))),
        }
    }

    /// Parses a RON document.
    pub fn from_ron(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Table(_) => "table",
            Value::List(_) => "list",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// True for lists, and for tables whose keys are exactly `1..=len`
    /// (including the empty table).
    pub fn is_array(&self) -> bool {
        match self {
            Value::List(_) => true,
            Value::Table(t) => t.read(|m| {
                (1..=m.size() as i64).all(|position| m.contains_key(&Key::Int(position)))
            }),
            _ => false,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value of an `Int` or `Float`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// The key form of this value. Integral floats become integer keys.
    pub fn to_key(&self) -> Option<Key> {
        match self {
            Value::Bool(b) => Some(Key::Bool(*b)),
            Value::Int(i) => Some(Key::Int(*i)),
            Value::Float(x) if x.fract() == 0.0 && x.abs() < i64::MAX as f64 => {
                Some(Key::Int(*x as i64))
            }
            Value::Str(s) => Some(Key::Str(Rc::clone(s))),
            _ => None,
        }
    }

    /// Entry count for containers, character count for strings, 0 otherwise.
    pub fn len(&self) -> usize {
        match self {
            Value::Table(t) => t.len(),
            Value::List(l) => l.len(),
            Value::Str(s) => s.chars().count(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reads `key`. Missing keys, non-integer list keys and scalars read as `Nil`.
    pub fn get(&self, key: impl Into<Key>) -> Value {
        let key = key.into();
        match self {
            Value::Table(t) => t.read(|m| m.get(&key).cloned().unwrap_or_default()),
            Value::List(l) => match key {
                Key::Int(i) => l.read(|s| s.at(i).cloned().unwrap_or_default()),
                _ => Value::Nil,
            },
            _ => Value::Nil,
        }
    }

    /// Writes `value` under `key`. Writing `Nil` removes the key; on a list it
    /// removes the position and re-packs the rest.
    ///
    /// Fails with [`Error::ImmutabilityViolation`] on frozen containers,
    /// [`Error::TypeMismatch`] for non-integer list keys and
    /// [`Error::Validation`] for scalars or out-of-range list positions.
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        match self {
            Value::Table(t) => t.write(|m| {
                if value.is_nil() {
                    m.remove(&key);
                } else {
                    m.insert(key, value);
                }
            }),
            Value::List(l) => l.write(|s| match key {
                Key::Int(i) if value.is_nil() => {
                    s.remove(i);
                    Ok(())
                }
                Key::Int(i) => s.set(i, value),
                other => Err(Error::TypeMismatch {
                    got: other.type_name(),
                }),
            })?,
            other => Err(Error::validation(format!(
                "cannot index a {} value",
                other.type_name()
            ))),
        }
    }

    /// Freezes a table or list in place for every holder of the handle.
    /// Scalars are already immutable and are left alone.
    pub fn freeze(&self) {
        match self {
            Value::Table(t) => t.freeze(),
            Value::List(l) => l.freeze(),
            _ => {}
        }
    }

    pub fn is_frozen(&self) -> bool {
        match self {
            Value::Table(t) => t.is_frozen(),
            Value::List(l) => l.is_frozen(),
            _ => false,
        }
    }

    fn numeric_sum(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(Value::Int(a.wrapping_add(*b))),
            (a, b) => Some(Value::Float(a.as_f64()? + b.as_f64()?)),
        }
    }
}

impl Mapping<Key, Value> {
    /// Dynamic counterpart of [`Mapping::from_entries`] that tolerates malformed entries.
    pub fn from_entry_values(entries: &Sequence<Value>) -> Self {
        let mut mapping = Mapping::new();
        for entry in entries {
            let Value::List(pair) = entry else { continue };
            let parsed = pair.read(|p| {
                if p.len() < 2 {
                    return None;
                }
                let key = p.at(1)?.to_key()?;
                let value = p.at(2)?.clone();
                Some((key, value))
            });
            if let Some((key, value)) = parsed {
                if !value.is_nil() {
                    mapping.insert(key, value);
                }
            }
        }
        mapping
    }
}

impl TryFrom<&Value> for Sequence<Value> {
    type Error = Error;

    /// Accepts a list (shallow copy), a table (positions `1, 2, ...` up to the
    /// first gap) or a string (one element per character).
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::List(l) => Ok(l.snapshot()),
            Value::Table(t) => Ok(t.read(|m| {
                (1..)
                    .map_while(|i: i64| m.get(&Key::Int(i)).cloned())
                    .collect()
            })),
            Value::Str(s) => Ok(s.chars().map(|c| Value::from(c.to_string())).collect()),
            other => Err(Error::validation(format!(
                "cannot build a sequence from a {} value",
                other.type_name()
            ))),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Table(a), Value::Table(b)) => a.ptr_eq(b),
            (Value::List(a), Value::List(b)) => a.ptr_eq(b),
            (Value::Int(a), Value::Int(b)) => a == b,
            (a, b) if a.is_number() && b.is_number() => a.as_f64() == b.as_f64(),
            _ => false,
        }
    }
}

impl PartialOrd for Value {
    /// Numbers compare numerically and strings lexically; anything else is unordered.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
            (a, b) if a.is_number() && b.is_number() => a.as_f64()?.partial_cmp(&b.as_f64()?),
            (a, b) if a == b => Some(Ordering::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Table(t) => write!(f, "table({} entries)", t.len()),
            Value::List(l) => write!(f, "list({} items)", l.len()),
        }
    }
}

impl DeepClone for Value {
    fn deep_clone(&self) -> Self {
        match self {
            Value::Table(t) => Value::Table(t.deep_clone()),
            Value::List(l) => Value::List(l.deep_clone()),
            scalar => scalar.clone(),
        }
    }
}

impl DeepMatch for Value {
    fn deep_matches(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Table(a), Value::Table(b)) => a.deep_matches(b),
            (Value::List(a), Value::List(b)) => a.deep_matches(b),
            (a, b) => a == b,
        }
    }
}

impl Merge for Value {
    fn merge_from(&mut self, source: Self, policy: MergePolicy) -> Result<()> {
        match (&mut *self, source) {
            (Value::Table(target), Value::Table(source)) => target.merge_from(source, policy),
            (Value::List(target), Value::List(source)) => target.merge_from(source, policy),
            (target, source) if policy == MergePolicy::AddNumbers => {
                *target = target.numeric_sum(&source).unwrap_or(source);
                Ok(())
            }
            (target, source) => {
                *target = source;
                Ok(())
            }
        }
    }
}

impl Freeze for Value {
    type Frozen = Value;

    fn into_frozen(self) -> Value {
        Value::freeze(&self);
        self
    }
}

impl IsFrozen for Value {
    fn is_frozen(&self) -> bool {
        Value::is_frozen(self)
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident via $conv:expr),* $(,)?) => { $(
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant($conv(v))
            }
        }
    )* };
}

value_from! {
    bool => Bool via std::convert::identity,
    i32 => Int via i64::from,
    i64 => Int via std::convert::identity,
    u32 => Int via i64::from,
    f32 => Float via f64::from,
    f64 => Float via std::convert::identity,
    &str => Str via Rc::<str>::from,
    String => Str via Rc::<str>::from,
    Rc<str> => Str via std::convert::identity,
    Table => Table via std::convert::identity,
    List => List via std::convert::identity,
    Mapping<Key, Value> => Table via Shared::new,
    Sequence<Value> => List via Shared::new,
}

impl From<Key> for Value {
    fn from(key: Key) -> Self {
        match key {
            Key::Bool(b) => Value::Bool(b),
            Key::Int(i) => Value::Int(i),
            Key::Str(s) => Value::Str(s),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Nil, Into::into)
    }
}

// ----------------------------------------------------------------------------
// Serde
// ----------------------------------------------------------------------------

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Key::Bool(b) => serializer.serialize_bool(*b),
            Key::Int(i) => serializer.serialize_i64(*i),
            Key::Str(s) => serializer.serialize_str(s),
        }
    }
}

struct KeyVisitor;

impl<'de> Visitor<'de> for KeyVisitor {
    type Value = Key;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a boolean, integer or string key")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Key, E> {
        Ok(Key::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Key, E> {
        Ok(Key::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Key, E> {
        i64::try_from(v)
            .map(Key::Int)
            .map_err(|_| E::custom(format!("integer key {v} is out of range")))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Key, E> {
        Ok(Key::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Key, E> {
        Ok(Key::from(v))
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(KeyVisitor)
    }
}

impl Serialize for Value {
    /// Table entries are written in key order so output is deterministic.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(x) => serializer.serialize_f64(*x),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Table(t) => t.read(|m| {
                let mut entries: Vec<_> = m.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }),
            Value::List(l) => l.read(|s| {
                let mut seq = serializer.serialize_seq(Some(s.len()))?;
                for item in s {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any value")
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Value, E> {
        Ok(Value::Nil)
    }

    fn visit_some<D: Deserializer<'de>>(self, d: D) -> std::result::Result<Value, D::Error> {
        Value::deserialize(d)
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Value, E> {
        Ok(Value::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Value, E> {
        Ok(i64::try_from(v).map_or(Value::Float(v as f64), Value::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut items = Sequence::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(item) = access.next_element::<Value>()? {
            if !item.is_nil() {
                items.push(item);
            }
        }
        Ok(Value::from(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Value, A::Error> {
        let mut mapping = Mapping::new();
        while let Some((key, value)) = access.next_entry::<Key, Value>()? {
            if !value.is_nil() {
                mapping.insert(key, value);
            }
        }
        Ok(Value::from(mapping))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}
