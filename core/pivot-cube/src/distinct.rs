//! FILENAME: core/pivot-cube/src/distinct.rs
//! Distinct value discovery, preserving first-occurrence order.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::value::{Key, Record, Value};

/// Returns the unique outputs of `selector` over `table`, in order of first
/// appearance. Uses plain equality, so it works for any `PartialEq` value
/// (floats included) at O(rows x distinct) cost.
pub fn distinct<R, V, F>(table: &[R], selector: F) -> Vec<V>
where
    V: PartialEq,
    F: Fn(&R) -> V,
{
    let mut unique: Vec<V> = Vec::new();
    for row in table {
        let value = selector(row);
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

/// Same contract as `distinct`, backed by a hash set for large tables.
pub fn distinct_hashed<R, V, F>(table: &[R], selector: F) -> Vec<V>
where
    V: Eq + Hash + Clone,
    F: Fn(&R) -> V,
{
    let mut seen: FxHashSet<V> = FxHashSet::default();
    let mut unique = Vec::new();
    for row in table {
        let value = selector(row);
        if seen.insert(value.clone()) {
            unique.push(value);
        }
    }
    unique
}

/// Distinct values of one field of key-addressable rows.
pub fn distinct_by_key<R: Record>(table: &[R], key: &Key) -> Vec<Value> {
    distinct_hashed(table, |row| row.field(key))
}
