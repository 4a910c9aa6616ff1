//! FILENAME: core/pivot-cube/src/criteria.rs
//! Criteria - tagged row predicates that define one slice of a dimension.
//!
//! A `Criterion` pairs descriptive metadata (which column, which value) with
//! the predicate that actually decides membership. A `Criteria` is the AND of
//! one or more criteria; combining dimensions concatenates them, so each cell
//! of an axis remembers every tag that produced it.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::value::{Key, Value};

/// Transforms a row into a derived value. Shared behind an `Arc` by every
/// slice a dimension builds from one accessor:
///
/// ```
/// use std::sync::Arc;
/// use pivot_cube::Selector;
///
/// let length: Arc<Selector<String, usize>> = Arc::new(|s: &String| s.len());
/// assert_eq!(length(&"north".to_string()), 5);
/// ```
pub type Selector<R, T> = dyn Fn(&R) -> T + Send + Sync;

/// Tests whether a row belongs to a slice.
pub type Predicate<R> = dyn Fn(&R) -> bool + Send + Sync;

// ============================================================================
// CRITERION
// ============================================================================

/// A single tagged test: `key`/`value` describe it, `predicate` decides it.
pub struct Criterion<R> {
    pub key: Key,
    pub value: Value,
    predicate: Arc<Predicate<R>>,
}

impl<R> Criterion<R> {
    pub fn new<P>(key: impl Into<Key>, value: impl Into<Value>, predicate: P) -> Self
    where
        P: Fn(&R) -> bool + Send + Sync + 'static,
    {
        Criterion {
            key: key.into(),
            value: value.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Builds a criterion from an already shared predicate.
    pub fn from_shared(key: Key, value: Value, predicate: Arc<Predicate<R>>) -> Self {
        Criterion { key, value, predicate }
    }

    /// Returns true if the row satisfies this criterion.
    pub fn matches(&self, row: &R) -> bool {
        (self.predicate)(row)
    }
}

impl<R> Clone for Criterion<R> {
    fn clone(&self) -> Self {
        Criterion {
            key: self.key.clone(),
            value: self.value.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<R> fmt::Debug for Criterion<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Criterion")
            .field("key", &self.key)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// CRITERIA
// ============================================================================

/// The AND of one or more criteria. Most cells come from one or two
/// dimensions, so the list is kept inline.
pub struct Criteria<R> {
    items: SmallVec<[Criterion<R>; 2]>,
}

impl<R> Criteria<R> {
    pub fn new(criterion: Criterion<R>) -> Self {
        let mut items = SmallVec::new();
        items.push(criterion);
        Criteria { items }
    }

    /// Returns None for an empty list: a slice must be defined by at least one test.
    pub fn from_vec(items: Vec<Criterion<R>>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Criteria { items: SmallVec::from_vec(items) })
        }
    }

    /// Returns true if every criterion holds for the row.
    pub fn matches(&self, row: &R) -> bool {
        self.items.iter().all(|c| c.matches(row))
    }

    /// Concatenates the tags of `self` and `other`, `self` first.
    pub fn and(&self, other: &Criteria<R>) -> Criteria<R> {
        let mut items: SmallVec<[Criterion<R>; 2]> =
            SmallVec::with_capacity(self.items.len() + other.items.len());
        items.extend(self.items.iter().cloned());
        items.extend(other.items.iter().cloned());
        Criteria { items }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criterion<R>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The tag values in order, one per contributing dimension.
    pub fn values(&self) -> Vec<Value> {
        self.items.iter().map(|c| c.value.clone()).collect()
    }

    /// Human-readable label, e.g. "North / Widget".
    pub fn label(&self) -> String {
        self.items
            .iter()
            .map(|c| c.value.label())
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

impl<R> Clone for Criteria<R> {
    fn clone(&self) -> Self {
        Criteria { items: self.items.clone() }
    }
}

impl<R> fmt::Debug for Criteria<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

impl<R> From<Criterion<R>> for Criteria<R> {
    fn from(criterion: Criterion<R>) -> Self {
        Criteria::new(criterion)
    }
}

impl<'a, R> IntoIterator for &'a Criteria<R> {
    type Item = &'a Criterion<R>;
    type IntoIter = std::slice::Iter<'a, Criterion<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
