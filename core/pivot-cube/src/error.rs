//! FILENAME: core/pivot-cube/src/error.rs

use thiserror::Error;

pub type PivotResult<T> = Result<T, PivotError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PivotError {
    #[error("pivot requires at least one axis")]
    NoAxes,

    #[error("cannot combine an empty list of dimensions")]
    NoDimensions,

    #[error("expected a cube of depth {expected}, got depth {actual}")]
    DepthMismatch { expected: usize, actual: usize },

    #[error("cube shape does not match its axes: {0}")]
    ShapeMismatch(String),

    #[error("cell ({row}, {column}) is outside a {rows}x{columns} pivot")]
    CellOutOfRange { row: usize, column: usize, rows: usize, columns: usize },

    #[error("value field {0} does not exist")]
    UnknownValueField(usize),
}
