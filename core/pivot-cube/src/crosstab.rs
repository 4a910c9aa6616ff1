//! FILENAME: core/pivot-cube/src/crosstab.rs
//! CrossTab - a two-axis cube owned together with its axes.
//!
//! Keeping the cells and both axes in one structure lets `compact` remove
//! empty rows and columns without the axes drifting out of alignment.
//! Invariant: `cells.len() == rows.len()` and every row of cells has
//! `columns.len()` entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cube::{pivot, Cube, Table};
use crate::dimension::Axis;
use crate::error::{PivotError, PivotResult};

/// What a `compact` pass removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactSummary {
    pub removed_rows: usize,
    pub removed_columns: usize,
}

impl CompactSummary {
    pub fn is_unchanged(&self) -> bool {
        self.removed_rows == 0 && self.removed_columns == 0
    }
}

pub struct CrossTab<R> {
    rows: Axis<R>,
    columns: Axis<R>,
    cells: Vec<Vec<Table<R>>>,
}

impl<R: Clone> CrossTab<R> {
    /// Pivots `table` by `rows` (outer, y) then `columns` (inner, x).
    pub fn build(table: &[R], rows: Axis<R>, columns: Axis<R>) -> PivotResult<Self> {
        let axes = [rows, columns];
        let cube = pivot(table, &axes)?;
        let [rows, columns] = axes;
        Self::from_cube(cube, rows, columns)
    }
}

impl<R> CrossTab<R> {
    /// Pairs an existing depth-2 cube with the axes that produced it.
    pub fn from_cube(cube: Cube<Table<R>>, rows: Axis<R>, columns: Axis<R>) -> PivotResult<Self> {
        let depth = cube.depth();
        let cells = match cube.into_grid() {
            Some(cells) => cells,
            None => return Err(PivotError::DepthMismatch { expected: 2, actual: depth }),
        };

        if cells.len() != rows.len() {
            return Err(PivotError::ShapeMismatch(format!(
                "{} cube rows for {} row slices",
                cells.len(),
                rows.len()
            )));
        }
        if let Some(bad) = cells.iter().position(|row| row.len() != columns.len()) {
            return Err(PivotError::ShapeMismatch(format!(
                "row {} has {} cells for {} column slices",
                bad,
                cells[bad].len(),
                columns.len()
            )));
        }

        Ok(CrossTab { rows, columns, cells })
    }

    pub fn rows(&self) -> &Axis<R> {
        &self.rows
    }

    pub fn columns(&self) -> &Axis<R> {
        &self.columns
    }

    pub fn cells(&self) -> &[Vec<Table<R>>] {
        &self.cells
    }

    /// Cell at row `y`, column `x`.
    pub fn cell(&self, y: usize, x: usize) -> Option<&Table<R>> {
        self.cells.get(y)?.get(x)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Applies `selector` to every cell, indexed `[y][x]`.
    pub fn query<U, F>(&self, selector: F) -> Vec<Vec<U>>
    where
        F: Fn(&[R]) -> U,
    {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| selector(cell)).collect())
            .collect()
    }

    /// Removes every row whose cells are all empty, then every column whose
    /// remaining cells are all empty. Both axes are spliced in step with the
    /// cells. Running it again changes nothing.
    ///
    /// When every row is removed, every column goes with it.
    pub fn compact(&mut self) -> CompactSummary {
        let counts: Vec<Vec<usize>> = self
            .cells
            .iter()
            .map(|row| row.iter().map(Vec::len).collect())
            .collect();
        let mut summary = CompactSummary::default();

        // Highest index first so pending indices stay valid
        for y in (0..counts.len()).rev() {
            if counts[y].iter().all(|&n| n == 0) {
                self.cells.remove(y);
                self.rows.remove(y);
                summary.removed_rows += 1;
            }
        }

        for x in (0..self.columns.len()).rev() {
            if self.cells.iter().all(|row| row[x].is_empty()) {
                for row in &mut self.cells {
                    row.remove(x);
                }
                self.columns.remove(x);
                summary.removed_columns += 1;
            }
        }

        log::debug!(
            target: "COMPACT",
            "removed rows={} columns={} remaining={}x{}",
            summary.removed_rows,
            summary.removed_columns,
            self.rows.len(),
            self.columns.len()
        );
        summary
    }

    /// Releases the cells as a depth-2 cube, together with both axes.
    pub fn into_parts(self) -> (Cube<Table<R>>, Axis<R>, Axis<R>) {
        let cube = Cube::Nested {
            depth: 2,
            children: self
                .cells
                .into_iter()
                .map(|row| Cube::Nested {
                    depth: 1,
                    children: row.into_iter().map(Cube::Leaf).collect(),
                })
                .collect(),
        };
        (cube, self.rows, self.columns)
    }

    pub fn into_cube(self) -> Cube<Table<R>> {
        self.into_parts().0
    }
}

impl<R: fmt::Debug> fmt::Debug for CrossTab<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossTab")
            .field("rows", &self.rows)
            .field("columns", &self.columns)
            .field("cells", &self.cells)
            .finish()
    }
}

impl<R> Clone for CrossTab<R>
where
    R: Clone,
{
    fn clone(&self) -> Self {
        CrossTab {
            rows: self.rows.clone(),
            columns: self.columns.clone(),
            cells: self.cells.clone(),
        }
    }
}
