//! FILENAME: core/pivot-cube/src/query.rs
//! Query layer - per-cell aggregation over a cube.
//!
//! `query` maps a leaf function over every table of a cube. The generators
//! below build those leaf functions. Aggregates return `None` for an empty
//! table so "no rows" stays distinguishable from "rows summing to zero".

use serde::{Deserialize, Serialize};

use crate::cube::{Cube, Table};

/// Applies `selector` to every leaf table, keeping the cube's shape.
pub fn query<R, U, F>(cube: &Cube<Table<R>>, selector: F) -> Cube<U>
where
    F: Fn(&[R]) -> U,
{
    cube.map(|table| selector(table))
}

// ============================================================================
// GENERATORS
// ============================================================================

/// Row count, or None for an empty table.
pub fn count<R>(table: &[R]) -> Option<usize> {
    if table.is_empty() {
        None
    } else {
        Some(table.len())
    }
}

/// Sums `value(row)` over a table; None for an empty table.
pub fn sum<R, F>(value: F) -> impl Fn(&[R]) -> Option<f64>
where
    F: Fn(&R) -> f64,
{
    move |table: &[R]| {
        if table.is_empty() {
            None
        } else {
            Some(table.iter().map(&value).sum())
        }
    }
}

/// Mean of `value(row)` over a table; None for an empty table.
pub fn average<R, F>(value: F) -> impl Fn(&[R]) -> Option<f64>
where
    F: Fn(&R) -> f64,
{
    let total = sum(value);
    move |table: &[R]| {
        let n = count(table)?;
        total(table).map(|s| s / n as f64)
    }
}

/// Projects every row through `transform`.
pub fn select<R, U, F>(transform: F) -> impl Fn(&[R]) -> Vec<U>
where
    F: Fn(&R) -> U,
{
    move |table: &[R]| table.iter().map(&transform).collect()
}

/// Keeps the rows satisfying `predicate`, in order.
pub fn filter<R, P>(predicate: P) -> impl Fn(&[R]) -> Table<R>
where
    R: Clone,
    P: Fn(&R) -> bool,
{
    move |table: &[R]| table.iter().filter(|row| predicate(row)).cloned().collect()
}

/// Aggregates `value(row)` with the given function.
/// Rows for which `value` returns None are skipped by the numeric
/// aggregations but still counted by `Count`.
pub fn measure<R, F>(aggregation: Aggregation, value: F) -> impl Fn(&[R]) -> Option<f64>
where
    F: Fn(&R) -> Option<f64>,
{
    move |table: &[R]| {
        let mut acc = Accumulator::new();
        for row in table {
            match value(row) {
                Some(n) => acc.add_number(n),
                None => acc.add_non_number(),
            }
        }
        acc.compute(aggregation)
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions for value fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Aggregation {
    #[default]
    Sum,
    Count,
    CountNumbers,
    Average,
    Min,
    Max,
    Product,
    /// Sample standard deviation.
    StdDev,
    /// Population standard deviation.
    StdDevP,
    /// Sample variance.
    Var,
    /// Population variance.
    VarP,
}

/// Incremental aggregate state, one pass over a cell.
/// Variance uses Welford's algorithm.
#[derive(Debug, Clone)]
pub struct Accumulator {
    count: u64,
    count_numbers: u64,
    sum: f64,
    product: f64,
    min: Option<f64>,
    max: Option<f64>,
    mean: f64,
    m2: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Accumulator {
            count: 0,
            count_numbers: 0,
            sum: 0.0,
            product: 1.0,
            min: None,
            max: None,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Adds a numeric value.
    pub fn add_number(&mut self, value: f64) {
        self.count += 1;
        self.count_numbers += 1;
        self.sum += value;
        self.product *= value;
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));

        let delta = value - self.mean;
        self.mean += delta / self.count_numbers as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Counts a row that carries no numeric value.
    pub fn add_non_number(&mut self) {
        self.count += 1;
    }

    /// Final value, or None when the aggregation has nothing to work with.
    pub fn compute(&self, aggregation: Aggregation) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        let n = self.count_numbers as f64;
        match aggregation {
            Aggregation::Count => Some(self.count as f64),
            Aggregation::CountNumbers => Some(n),
            _ if self.count_numbers == 0 => None,
            Aggregation::Sum => Some(self.sum),
            Aggregation::Average => Some(self.sum / n),
            Aggregation::Min => self.min,
            Aggregation::Max => self.max,
            Aggregation::Product => Some(self.product),
            Aggregation::VarP => Some(self.m2 / n),
            Aggregation::StdDevP => Some((self.m2 / n).sqrt()),
            Aggregation::Var | Aggregation::StdDev if self.count_numbers < 2 => None,
            Aggregation::Var => Some(self.m2 / (n - 1.0)),
            Aggregation::StdDev => Some((self.m2 / (n - 1.0)).sqrt()),
        }
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Accumulator::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cube::pivot;
    use crate::dimension::Dimension;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        g: &'static str,
        v: f64,
    }

    fn rows(values: &[f64]) -> Vec<Row> {
        values.iter().map(|&v| Row { g: "a", v }).collect()
    }

    #[test]
    fn test_average() {
        let avg = average(|row: &Row| row.v);
        assert_eq!(avg(&[]), None);
        assert_eq!(avg(&rows(&[4.0, 6.0])), Some(5.0));
    }

    #[test]
    fn test_sum_distinguishes_empty_from_zero() {
        let total = sum(|row: &Row| row.v);
        assert_eq!(total(&[]), None);
        assert_eq!(total(&rows(&[-2.0, 2.0])), Some(0.0));
        assert_eq!(total(&rows(&[1.5, 2.5, 3.0])), Some(7.0));
    }

    #[test]
    fn test_count() {
        assert_eq!(count::<Row>(&[]), None);
        assert_eq!(count(&rows(&[1.0, 1.0, 1.0])), Some(3));
    }

    #[test]
    fn test_select_and_filter() {
        let table = rows(&[1.0, 5.0, 3.0]);
        assert_eq!(select(|row: &Row| row.v * 2.0)(&table), vec![2.0, 10.0, 6.0]);
        assert_eq!(filter(|row: &Row| row.v > 2.0)(&table), rows(&[5.0, 3.0]));
        assert!(select(|row: &Row| row.v)(&[]).is_empty());
    }

    #[test]
    fn test_query_over_cube() {
        let table = vec![
            Row { g: "a", v: 1.0 },
            Row { g: "b", v: 2.0 },
            Row { g: "a", v: 3.0 },
        ];
        let dim = Dimension::from_values(vec!["a", "b", "c"], "g", |row: &Row| row.g);
        let cube = pivot(&table, &[dim]).unwrap();

        let totals = query(&cube, sum(|row: &Row| row.v));
        assert_eq!(totals.leaves(), vec![&Some(4.0), &Some(2.0), &None]);

        let counts = query(&cube, count);
        assert_eq!(counts.leaves(), vec![&Some(2), &Some(1), &None]);

        let big = query(&cube, |t: &[Row]| sum(|row: &Row| row.v)(&filter(|row: &Row| row.v > 1.0)(t)));
        assert_eq!(big.leaves(), vec![&Some(3.0), &Some(2.0), &None]);
    }

    #[test]
    fn test_measure_aggregations() {
        let table = rows(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        let value = |row: &Row| Some(row.v);

        assert_eq!(measure(Aggregation::Sum, value)(&table), Some(40.0));
        assert_eq!(measure(Aggregation::Average, value)(&table), Some(5.0));
        assert_eq!(measure(Aggregation::Min, value)(&table), Some(2.0));
        assert_eq!(measure(Aggregation::Max, value)(&table), Some(9.0));
        assert_eq!(measure(Aggregation::Count, value)(&table), Some(8.0));
        let var_p = measure(Aggregation::VarP, value)(&table).unwrap();
        assert!((var_p - 4.0).abs() < 1e-9);
        let std_p = measure(Aggregation::StdDevP, value)(&table).unwrap();
        assert!((std_p - 2.0).abs() < 1e-9);

        let var = measure(Aggregation::Var, value)(&table).unwrap();
        assert!((var - 32.0 / 7.0).abs() < 1e-9);
        assert_eq!(measure(Aggregation::Product, value)(&rows(&[2.0, 3.0])), Some(6.0));
    }

    #[test]
    fn test_measure_empty_and_non_numeric() {
        let value = |row: &Row| if row.v.is_nan() { None } else { Some(row.v) };
        for agg in [Aggregation::Sum, Aggregation::Average, Aggregation::Count, Aggregation::StdDev] {
            assert_eq!(measure(agg, value)(&[]), None);
        }

        let mixed = rows(&[f64::NAN, 3.0]);
        assert_eq!(measure(Aggregation::Count, value)(&mixed), Some(2.0));
        assert_eq!(measure(Aggregation::CountNumbers, value)(&mixed), Some(1.0));
        assert_eq!(measure(Aggregation::Sum, value)(&mixed), Some(3.0));
        assert_eq!(measure(Aggregation::StdDev, value)(&mixed), None);

        let blanks = rows(&[f64::NAN]);
        assert_eq!(measure(Aggregation::Sum, value)(&blanks), None);
        assert_eq!(measure(Aggregation::CountNumbers, value)(&blanks), Some(0.0));
    }
}
