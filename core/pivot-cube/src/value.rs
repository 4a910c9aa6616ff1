//! FILENAME: core/pivot-cube/src/value.rs
//! Row model - keys, tag values and key-addressable records.
//!
//! The core slicing machinery never looks inside a row: predicates do the
//! real work. These types exist for two things:
//! - Tagging each criterion with the column and value it tests
//! - Backing the "property lookup by key" defaults through `Record`

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

// ============================================================================
// KEY
// ============================================================================

/// Identifies a logical column: a field name or a positional index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    Name(String),
    Index(usize),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => write!(f, "{}", name),
            Key::Index(index) => write!(f, "#{}", index),
        }
    }
}

// ============================================================================
// VALUE
// ============================================================================

/// Wrapper around f64 that implements Eq and Hash.
/// NaN values are treated as equal to each other.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedFloat(pub f64);

impl PartialEq for OrderedFloat {
    fn eq(&self, other: &Self) -> bool {
        if self.0.is_nan() && other.0.is_nan() {
            true
        } else {
            self.0 == other.0
        }
    }
}

impl Eq for OrderedFloat {}

impl std::hash::Hash for OrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        if self.0.is_nan() {
            u64::MAX.hash(state);
        } else if self.0 == 0.0 {
            // -0.0 == 0.0, so both must hash alike
            0u64.hash(state);
        } else {
            self.0.to_bits().hash(state);
        }
    }
}

impl PartialOrd for OrderedFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedFloat {
    /// NaN sorts after every number.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.0.is_nan(), other.0.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.0.partial_cmp(&other.0).unwrap_or(Ordering::Equal),
        }
    }
}

/// A normalized, hashable scalar used to tag criteria and to read
/// fields out of `Record` rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Value {
    #[default]
    Empty,
    Number(OrderedFloat),
    Text(String),
    Boolean(bool),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Numeric view of the value. Only `Number` converts.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.0),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Display label used for view headers.
    pub fn label(&self) -> String {
        match self {
            Value::Empty => "(blank)".to_string(),
            Value::Number(n) => {
                if n.0.fract() == 0.0 && n.0.abs() < 1e15 {
                    format!("{}", n.0 as i64)
                } else {
                    format!("{}", n.0)
                }
            }
            Value::Text(s) => s.clone(),
            Value::Boolean(b) => if *b { "TRUE".to_string() } else { "FALSE".to_string() },
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::Empty => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
            Value::Boolean(_) => 3,
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    /// Empty < Number < Text < Boolean, then by natural order within a type.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => a.cmp(b),
            _ => self.type_rank().cmp(&other.type_rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(OrderedFloat(n))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(OrderedFloat(n as f64))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(OrderedFloat(n as f64))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(OrderedFloat(n as f64))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(OrderedFloat(n as f64))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(OrderedFloat(n as f64))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Empty, Into::into)
    }
}

// ============================================================================
// RECORD
// ============================================================================

/// A row whose fields can be read by `Key`.
/// Missing fields (and keys of the wrong kind) read as `Value::Empty`.
pub trait Record {
    fn field(&self, key: &Key) -> Value;
}

impl Record for [Value] {
    fn field(&self, key: &Key) -> Value {
        match key {
            Key::Index(i) => self.get(*i).cloned().unwrap_or_default(),
            Key::Name(_) => Value::Empty,
        }
    }
}

impl Record for Vec<Value> {
    fn field(&self, key: &Key) -> Value {
        self.as_slice().field(key)
    }
}

impl<S: BuildHasher> Record for HashMap<String, Value, S> {
    fn field(&self, key: &Key) -> Value {
        match key {
            Key::Name(name) => self.get(name).cloned().unwrap_or_default(),
            Key::Index(_) => Value::Empty,
        }
    }
}

impl Record for BTreeMap<String, Value> {
    fn field(&self, key: &Key) -> Value {
        match key {
            Key::Name(name) => self.get(name).cloned().unwrap_or_default(),
            Key::Index(_) => Value::Empty,
        }
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, key: &Key) -> Value {
        (**self).field(key)
    }
}
