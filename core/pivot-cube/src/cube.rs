//! FILENAME: core/pivot-cube/src/cube.rs
//! Cube construction - slicing a table along one or more axes.
//!
//! `slice` partitions a table by one axis. `pivot` applies `slice`
//! recursively, one axis per level, so the leaf at `[i1][i2]..[iN]` holds
//! the rows satisfying `axis1[i1] AND axis2[i2] AND .. axisN[iN]`.
//!
//! Rows keep their source order inside every leaf. Rows that match no slice
//! of some axis are dropped; rows matching several slices of one axis are
//! duplicated. Neither case is an error.

use serde::{Serialize, Serializer};

use crate::dimension::Axis;
use crate::error::{PivotError, PivotResult};

/// An ordered list of rows.
pub type Table<R> = Vec<R>;

// ============================================================================
// CUBE
// ============================================================================

/// An N-level nested structure. Built by `pivot`, every leaf sits at the
/// same depth. `map` keeps the shape and replaces the leaves.
///
/// A nested level records its own depth, so a level with no children
/// (an empty axis) still knows how many levels it stands for.
///
/// Serializes as plain nested arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum Cube<T> {
    Leaf(T),
    Nested { depth: usize, children: Vec<Cube<T>> },
}

impl<T> Cube<T> {
    /// A nested level over `children`, one level above the first child.
    /// With no children the level has depth 1; use `empty` for deeper ones.
    pub fn nested(children: Vec<Cube<T>>) -> Self {
        let depth = 1 + children.first().map_or(0, Cube::depth);
        Cube::Nested { depth, children }
    }

    /// A childless level standing for `depth` levels.
    pub fn empty(depth: usize) -> Self {
        Cube::Nested { depth: depth.max(1), children: Vec::new() }
    }

    /// Number of nesting levels above the leaves.
    pub fn depth(&self) -> usize {
        match self {
            Cube::Leaf(_) => 0,
            Cube::Nested { depth, .. } => *depth,
        }
    }

    /// Number of children at this level (0 for a leaf).
    pub fn len(&self) -> usize {
        self.children().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn children(&self) -> &[Cube<T>] {
        match self {
            Cube::Leaf(_) => &[],
            Cube::Nested { children, .. } => children,
        }
    }

    pub fn as_leaf(&self) -> Option<&T> {
        match self {
            Cube::Leaf(value) => Some(value),
            Cube::Nested { .. } => None,
        }
    }

    /// Total number of leaves.
    pub fn leaf_count(&self) -> usize {
        match self {
            Cube::Leaf(_) => 1,
            Cube::Nested { children, .. } => children.iter().map(Cube::leaf_count).sum(),
        }
    }

    /// All leaves in depth-first (row-major) order.
    pub fn leaves(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a T>) {
        match self {
            Cube::Leaf(value) => out.push(value),
            Cube::Nested { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Leaf at the given coordinates, one index per level.
    pub fn get(&self, coords: &[usize]) -> Option<&T> {
        match (self, coords.split_first()) {
            (Cube::Leaf(value), None) => Some(value),
            (Cube::Nested { children, .. }, Some((&i, rest))) => children.get(i)?.get(rest),
            _ => None,
        }
    }

    /// Unpacks a depth-2 cube into `[y][x]` rows, or None for any other shape.
    pub fn into_grid(self) -> Option<Vec<Vec<T>>> {
        let Cube::Nested { depth: 2, children: rows } = self else {
            return None;
        };
        rows.into_iter()
            .map(|row| match row {
                Cube::Nested { depth: 1, children: cells } => cells
                    .into_iter()
                    .map(|cell| match cell {
                        Cube::Leaf(value) => Some(value),
                        Cube::Nested { .. } => None,
                    })
                    .collect(),
                _ => None,
            })
            .collect()
    }

    /// Applies `f` to every leaf, preserving nesting and order.
    pub fn map<U, F>(&self, f: F) -> Cube<U>
    where
        F: Fn(&T) -> U,
    {
        self.map_ref(&f)
    }

    fn map_ref<U, F>(&self, f: &F) -> Cube<U>
    where
        F: Fn(&T) -> U,
    {
        match self {
            Cube::Leaf(value) => Cube::Leaf(f(value)),
            Cube::Nested { depth, children } => Cube::Nested {
                depth: *depth,
                children: children.iter().map(|c| c.map_ref(f)).collect(),
            },
        }
    }

    /// Consuming variant of `map`.
    pub fn into_map<U, F>(self, mut f: F) -> Cube<U>
    where
        F: FnMut(T) -> U,
    {
        self.into_map_mut(&mut f)
    }

    fn into_map_mut<U, F>(self, f: &mut F) -> Cube<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Cube::Leaf(value) => Cube::Leaf(f(value)),
            Cube::Nested { depth, children } => Cube::Nested {
                depth,
                children: children.into_iter().map(|c| c.into_map_mut(f)).collect(),
            },
        }
    }
}

impl<T: Serialize> Serialize for Cube<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cube::Leaf(value) => value.serialize(serializer),
            Cube::Nested { children, .. } => serializer.collect_seq(children),
        }
    }
}

// ============================================================================
// SLICING
// ============================================================================

/// Partitions `table` by `axis`: one table per slice, in axis order.
pub fn slice<R: Clone>(table: &[R], axis: &Axis<R>) -> Vec<Table<R>> {
    axis.iter()
        .map(|criteria| table.iter().filter(|row| criteria.matches(row)).cloned().collect())
        .collect()
}

/// Builds an N-level cube, one level per axis in the order given.
/// At least one axis is required.
pub fn pivot<R: Clone>(table: &[R], axes: &[Axis<R>]) -> PivotResult<Cube<Table<R>>> {
    if axes.is_empty() {
        return Err(PivotError::NoAxes);
    }

    let rows: Vec<&R> = table.iter().collect();
    let cube = build_level(&rows, axes);

    if log::log_enabled!(target: "PIVOT", log::Level::Debug) {
        let sizes: Vec<usize> = axes.iter().map(Axis::len).collect();
        let placed: usize = cube.leaves().iter().map(|t| t.len()).sum();
        log::debug!(
            target: "PIVOT",
            "pivot rows={} axes={:?} leaves={} placed={}",
            table.len(),
            sizes,
            cube.leaf_count(),
            placed
        );
    }
    if log::log_enabled!(target: "PIVOT", log::Level::Warn) {
        let dropped = dropped_rows(table, axes);
        if dropped > 0 {
            log::warn!(
                target: "PIVOT",
                "{} of {} rows matched no slice and were dropped",
                dropped,
                table.len()
            );
        }
    }

    Ok(cube)
}

/// Rows that land in no leaf. A row reaches some leaf exactly when every
/// axis has at least one slice matching it; duplicates do not offset drops.
pub(crate) fn dropped_rows<R>(table: &[R], axes: &[Axis<R>]) -> usize {
    table
        .iter()
        .filter(|row| axes.iter().any(|axis| axis.position(row).is_none()))
        .count()
}

/// Slices by reference at every level, cloning rows only into the leaves.
fn build_level<R: Clone>(rows: &[&R], axes: &[Axis<R>]) -> Cube<Table<R>> {
    match axes.split_first() {
        None => Cube::Leaf(rows.iter().map(|row| (*row).clone()).collect()),
        Some((axis, rest)) => {
            log::trace!(target: "PIVOT", "slice level rows={} slices={}", rows.len(), axis.len());
            let children = axis
                .iter()
                .map(|criteria| {
                    let cell: Vec<&R> = rows
                        .iter()
                        .copied()
                        .filter(|row| criteria.matches(row))
                        .collect();
                    build_level(&cell, rest)
                })
                .collect();
            Cube::Nested { depth: axes.len(), children }
        }
    }
}
