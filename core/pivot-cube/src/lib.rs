//! FILENAME: core/pivot-cube/src/lib.rs
//! In-memory pivot cubes.
//!
//! Partitions a table of rows along one or more dimensions into an
//! N-level cube of row subsets, then aggregates every cell.
//!
//! Layers:
//! - `value`, `criteria`: row model and tagged predicates
//! - `distinct`, `dimension`: building dimensions and combining them into axes
//! - `cube`, `crosstab`: slicing tables into cubes (N-level and paired 2D)
//! - `query`: per-cell aggregation
//! - `definition`, `engine`, `view`: declarative pivots over `Record` rows

pub mod criteria;
pub mod crosstab;
pub mod cube;
pub mod definition;
pub mod dimension;
pub mod distinct;
pub mod engine;
pub mod error;
pub mod query;
pub mod value;
pub mod view;

pub use criteria::{Criteria, Criterion, Predicate, Selector};
pub use crosstab::{CompactSummary, CrossTab};
pub use cube::{pivot, slice, Cube, Table};
pub use definition::{DimensionField, PivotDefinition, SortOrder, ValueField};
pub use dimension::{Axis, Dimension, GRAND_TOTAL_LABEL};
pub use distinct::{distinct, distinct_by_key, distinct_hashed};
pub use engine::{build_crosstab, calculate_pivot, drill_down};
pub use error::{PivotError, PivotResult};
pub use query::{average, count, filter, measure, query, select, sum, Accumulator, Aggregation};
pub use value::{Key, OrderedFloat, Record, Value};
pub use view::{AxisHeader, PivotView, ValueGrid};
