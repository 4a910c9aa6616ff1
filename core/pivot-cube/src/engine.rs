//! FILENAME: core/pivot-cube/src/engine.rs
//! Pivot Engine - turns a definition and a table into a view.
//!
//! Algorithm:
//! 1. Build the row and column axes from the definition's fields
//! 2. Slice the table into a cross-tab (rows outer, columns inner)
//! 3. Optionally compact away empty rows and columns
//! 4. Aggregate every value field over every cell

use crate::crosstab::CrossTab;
use crate::definition::PivotDefinition;
use crate::error::{PivotError, PivotResult};
use crate::view::{AxisHeader, PivotView, ValueGrid};
use crate::value::Record;

/// Builds the cross-tab described by `definition`, compacted if requested.
pub fn build_crosstab<R: Record + Clone>(
    definition: &PivotDefinition,
    table: &[R],
) -> PivotResult<CrossTab<R>> {
    let rows = definition.row_axis(table);
    let columns = definition.column_axis(table);
    let mut tab = CrossTab::build(table, rows, columns)?;
    if definition.compact {
        tab.compact();
    }
    Ok(tab)
}

/// Calculates a pivot view from definition and table.
/// This is the main entry point for the calculation engine.
pub fn calculate_pivot<R: Record + Clone>(
    definition: &PivotDefinition,
    table: &[R],
) -> PivotResult<PivotView> {
    let tab = build_crosstab(definition, table)?;

    let values = definition
        .value_fields
        .iter()
        .map(|field| ValueGrid {
            name: field.name.clone(),
            aggregation: field.aggregation,
            cells: tab.query(|cell| field.evaluate(cell)),
        })
        .collect();

    let view = PivotView {
        row_headers: tab.rows().iter().map(AxisHeader::from_criteria).collect(),
        column_headers: tab.columns().iter().map(AxisHeader::from_criteria).collect(),
        row_counts: tab.query(|cell| cell.len()),
        values,
        source_rows: table.len(),
    };

    log::debug!(
        target: "PIVOT",
        "calculated view {}x{} value_fields={} source_rows={}",
        view.row_count(),
        view.column_count(),
        view.values.len(),
        view.source_rows
    );
    Ok(view)
}

/// Returns the source rows behind one cell of the calculated view.
pub fn drill_down<R: Record + Clone>(
    definition: &PivotDefinition,
    table: &[R],
    row: usize,
    column: usize,
) -> PivotResult<Vec<R>> {
    let tab = build_crosstab(definition, table)?;
    tab.cell(row, column)
        .cloned()
        .ok_or(PivotError::CellOutOfRange {
            row,
            column,
            rows: tab.row_count(),
            columns: tab.column_count(),
        })
}
