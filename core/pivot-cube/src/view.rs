//! FILENAME: core/pivot-cube/src/view.rs
//! Pivot View - the calculated, serializable output of a definition.
//!
//! Headers carry the tag values of every slice so callers can render or
//! re-query them; value grids are indexed `[row][column]` in header order.

use serde::{Deserialize, Serialize};

use crate::criteria::Criteria;
use crate::error::{PivotError, PivotResult};
use crate::query::Aggregation;
use crate::value::Value;

/// One row or column slice as shown to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisHeader {
    /// One tag value per contributing field, outermost first.
    pub values: Vec<Value>,
    pub label: String,
}

impl AxisHeader {
    pub fn from_criteria<R>(criteria: &Criteria<R>) -> Self {
        AxisHeader {
            values: criteria.values(),
            label: criteria.label(),
        }
    }
}

/// Aggregated values of a single value field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueGrid {
    pub name: String,
    pub aggregation: Aggregation,
    /// None marks a cell with no data.
    pub cells: Vec<Vec<Option<f64>>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotView {
    pub row_headers: Vec<AxisHeader>,
    pub column_headers: Vec<AxisHeader>,
    /// Number of source rows in each cell.
    pub row_counts: Vec<Vec<usize>>,
    pub values: Vec<ValueGrid>,
    /// Number of rows in the source table.
    pub source_rows: usize,
}

impl PivotView {
    pub fn row_count(&self) -> usize {
        self.row_headers.len()
    }

    pub fn column_count(&self) -> usize {
        self.column_headers.len()
    }

    pub fn grid(&self, value_field: usize) -> PivotResult<&ValueGrid> {
        self.values
            .get(value_field)
            .ok_or(PivotError::UnknownValueField(value_field))
    }

    /// Aggregate of `value_field` at (`row`, `column`).
    pub fn value(&self, value_field: usize, row: usize, column: usize) -> PivotResult<Option<f64>> {
        let grid = self.grid(value_field)?;
        grid.cells
            .get(row)
            .and_then(|r| r.get(column))
            .copied()
            .ok_or(PivotError::CellOutOfRange {
                row,
                column,
                rows: self.row_count(),
                columns: self.column_count(),
            })
    }
}
