//! FILENAME: core/pivot-cube/src/dimension.rs
//! Dimensions and axes.
//!
//! A dimension is an ordered list of slices (`Criteria`), one per partition
//! value. Order is significant: it becomes the row/column order of the cube.
//! Dimensions are built either from an explicit value domain or from the
//! distinct values found in a table; both paths share the criteria builder.
//!
//! An axis has the same shape as a dimension. Combining dimensions takes the
//! cartesian product of their slices, first operand varying slowest.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;
use std::sync::Arc;

use crate::criteria::{Criteria, Criterion};
use crate::distinct::{distinct, distinct_by_key};
use crate::error::{PivotError, PivotResult};
use crate::value::{Key, Record, Value};

/// Label of the catch-all slice used when a side of a pivot has no fields.
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

/// An ordered list of mutually exclusive slices.
/// Mutual exclusivity is the caller's responsibility and is not checked.
pub struct Dimension<R> {
    criteria: Vec<Criteria<R>>,
}

/// One or more dimensions merged into a single list of slices.
pub type Axis<R> = Dimension<R>;

impl<R> Dimension<R> {
    pub fn new(criteria: Vec<Criteria<R>>) -> Self {
        Dimension { criteria }
    }

    /// Builds one slice per value, testing `accessor(row) == value`.
    pub fn from_values<V, I, F>(values: I, key: impl Into<Key>, accessor: F) -> Self
    where
        I: IntoIterator<Item = V>,
        V: PartialEq + Clone + Into<Value> + Send + Sync + 'static,
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        let accessor = Arc::new(accessor);
        Self::from_values_with(values, key, |key, value: V| {
            let accessor = Arc::clone(&accessor);
            let expected = value.clone();
            Criteria::new(Criterion::new(key.clone(), value, move |row: &R| {
                accessor(row) == expected
            }))
        })
    }

    /// Builds one slice per value using a caller-supplied criteria builder.
    pub fn from_values_with<V, I, G>(values: I, key: impl Into<Key>, mut get_criteria: G) -> Self
    where
        I: IntoIterator<Item = V>,
        G: FnMut(&Key, V) -> Criteria<R>,
    {
        let key = key.into();
        values
            .into_iter()
            .map(|value| get_criteria(&key, value))
            .collect()
    }

    /// Discovers the partition values from the data, in first-occurrence order.
    pub fn from_table<V, F>(table: &[R], key: impl Into<Key>, selector: F) -> Self
    where
        V: PartialEq + Clone + Into<Value> + Send + Sync + 'static,
        F: Fn(&R) -> V + Send + Sync + 'static,
    {
        let values = distinct(table, &selector);
        Self::from_values(values, key, selector)
    }

    /// Like `from_table`, with the discovered values sorted by `comparator`.
    pub fn from_table_sorted<V, F, C>(
        table: &[R],
        key: impl Into<Key>,
        selector: F,
        comparator: C,
    ) -> Self
    where
        V: PartialEq + Clone + Into<Value> + Send + Sync + 'static,
        F: Fn(&R) -> V + Send + Sync + 'static,
        C: FnMut(&V, &V) -> Ordering,
    {
        let mut values = distinct(table, &selector);
        values.sort_by(comparator);
        Self::from_values(values, key, selector)
    }

    /// A single slice that accepts every row.
    pub fn grand_total() -> Self {
        Dimension::new(vec![Criteria::new(Criterion::new(
            GRAND_TOTAL_LABEL,
            GRAND_TOTAL_LABEL,
            |_: &R| true,
        ))])
    }

    /// Cartesian product of `self` and `other`.
    /// The result is row-major: `self` is the slower-varying index, so
    /// slice `i * other.len() + j` is `self[i] AND other[j]`.
    pub fn combine(&self, other: &Dimension<R>) -> Dimension<R> {
        let mut criteria = Vec::with_capacity(self.len() * other.len());
        for outer in &self.criteria {
            for inner in &other.criteria {
                criteria.push(outer.and(inner));
            }
        }
        log::trace!(
            target: "PIVOT",
            "combine {}x{} -> {} slices",
            self.len(),
            other.len(),
            criteria.len()
        );
        Dimension { criteria }
    }

    /// Left fold of `combine` over `dimensions`, first dimension slowest.
    pub fn combine_all<I>(dimensions: I) -> PivotResult<Axis<R>>
    where
        I: IntoIterator<Item = Dimension<R>>,
    {
        let mut iter = dimensions.into_iter();
        let first = iter.next().ok_or(PivotError::NoDimensions)?;
        Ok(iter.fold(first, |acc, next| acc.combine(&next)))
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Criteria<R>> {
        self.criteria.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Criteria<R>> {
        self.criteria.iter()
    }

    pub fn criteria(&self) -> &[Criteria<R>] {
        &self.criteria
    }

    /// Labels of every slice, in order.
    pub fn labels(&self) -> Vec<String> {
        self.criteria.iter().map(Criteria::label).collect()
    }

    /// Index of the first slice the row falls into, if any.
    pub fn position(&self, row: &R) -> Option<usize> {
        self.criteria.iter().position(|c| c.matches(row))
    }

    pub(crate) fn remove(&mut self, index: usize) -> Criteria<R> {
        self.criteria.remove(index)
    }
}

impl<R: Record> Dimension<R> {
    /// Builds one slice per value, testing `row.field(key) == value`.
    pub fn by_key<V, I>(values: I, key: impl Into<Key>) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::from_values_with(values, key, |key, value| {
            let field = key.clone();
            let expected: Value = value.into();
            let tag = expected.clone();
            Criteria::new(Criterion::new(key.clone(), tag, move |row: &R| {
                row.field(&field) == expected
            }))
        })
    }

    /// Discovers the values of `key` from the data, in first-occurrence order.
    pub fn from_records(table: &[R], key: impl Into<Key>) -> Self {
        let key = key.into();
        let values = distinct_by_key(table, &key);
        Self::by_key(values, key)
    }

    /// Like `from_records`, with the discovered values sorted by `comparator`.
    pub fn from_records_sorted<C>(table: &[R], key: impl Into<Key>, comparator: C) -> Self
    where
        C: FnMut(&Value, &Value) -> Ordering,
    {
        let key = key.into();
        let mut values = distinct_by_key(table, &key);
        values.sort_by(comparator);
        Self::by_key(values, key)
    }
}

impl<R> Clone for Dimension<R> {
    fn clone(&self) -> Self {
        Dimension { criteria: self.criteria.clone() }
    }
}

impl<R> fmt::Debug for Dimension<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.criteria.iter()).finish()
    }
}

impl<R> FromIterator<Criteria<R>> for Dimension<R> {
    fn from_iter<T: IntoIterator<Item = Criteria<R>>>(iter: T) -> Self {
        Dimension { criteria: iter.into_iter().collect() }
    }
}

impl<R> Index<usize> for Dimension<R> {
    type Output = Criteria<R>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.criteria[index]
    }
}

impl<'a, R> IntoIterator for &'a Dimension<R> {
    type Item = &'a Criteria<R>;
    type IntoIter = std::slice::Iter<'a, Criteria<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.criteria.iter()
    }
}
