//! FILENAME: core/pivot-cube/src/definition.rs
//! Pivot Definition - the serializable configuration.
//!
//! Describes a pivot over key-addressable rows (`Record`) without holding
//! any closures, so it can be saved, loaded and sent across process
//! boundaries. The engine turns it into dimensions and axes at calculation
//! time.

use serde::{Deserialize, Serialize};

use crate::dimension::{Axis, Dimension};
use crate::distinct::distinct_by_key;
use crate::query::{measure, Aggregation};
use crate::value::{Key, Record, Value};

// ============================================================================
// FIELD DEFINITIONS
// ============================================================================

/// Order of the slices of a dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// First-occurrence order in the source table (or the order of `items`).
    #[default]
    DataSourceOrder,
    Ascending,
    Descending,
}

/// A field used to partition rows (row or column area).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionField {
    /// Source column.
    pub key: Key,

    #[serde(default)]
    pub sort_order: SortOrder,

    /// Fixed value domain. When set, values are not discovered from data and
    /// values missing from the table still get a (possibly empty) slice.
    #[serde(default)]
    pub items: Option<Vec<Value>>,

    /// Values whose slices are left out of the dimension.
    #[serde(default)]
    pub hidden_items: Vec<Value>,
}

impl DimensionField {
    pub fn new(key: impl Into<Key>) -> Self {
        DimensionField {
            key: key.into(),
            sort_order: SortOrder::DataSourceOrder,
            items: None,
            hidden_items: Vec::new(),
        }
    }

    pub fn with_items<V: Into<Value>>(mut self, items: impl IntoIterator<Item = V>) -> Self {
        self.items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn sorted(mut self, order: SortOrder) -> Self {
        self.sort_order = order;
        self
    }

    pub fn hide(mut self, value: impl Into<Value>) -> Self {
        self.hidden_items.push(value.into());
        self
    }

    /// The ordered, visible values of this field for `table`.
    pub fn values<R: Record>(&self, table: &[R]) -> Vec<Value> {
        let mut values = match &self.items {
            Some(items) => items.clone(),
            None => distinct_by_key(table, &self.key),
        };
        match self.sort_order {
            SortOrder::DataSourceOrder => {}
            SortOrder::Ascending => values.sort(),
            SortOrder::Descending => values.sort_by(|a, b| b.cmp(a)),
        }
        values.retain(|v| !self.hidden_items.contains(v));
        values
    }

    pub fn dimension<R: Record>(&self, table: &[R]) -> Dimension<R> {
        Dimension::by_key(self.values(table), self.key.clone())
    }
}

/// A field to aggregate in every cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueField {
    pub key: Key,

    /// Display name (e.g., "Sum of Sales").
    pub name: String,

    #[serde(default)]
    pub aggregation: Aggregation,
}

impl ValueField {
    pub fn new(key: impl Into<Key>, name: impl Into<String>, aggregation: Aggregation) -> Self {
        ValueField {
            key: key.into(),
            name: name.into(),
            aggregation,
        }
    }

    /// Aggregates this field over one cell. Non-numeric fields only count.
    pub fn evaluate<R: Record>(&self, table: &[R]) -> Option<f64> {
        measure(self.aggregation, |row: &R| row.field(&self.key).as_number())(table)
    }
}

// ============================================================================
// PIVOT DEFINITION
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PivotDefinition {
    /// Fields combined into the row axis, outermost first.
    #[serde(default)]
    pub row_fields: Vec<DimensionField>,

    /// Fields combined into the column axis, outermost first.
    #[serde(default)]
    pub column_fields: Vec<DimensionField>,

    #[serde(default)]
    pub value_fields: Vec<ValueField>,

    /// Drop rows and columns whose cells are all empty.
    #[serde(default)]
    pub compact: bool,
}

impl PivotDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_axis<R: Record>(&self, table: &[R]) -> Axis<R> {
        build_axis(&self.row_fields, table)
    }

    pub fn column_axis<R: Record>(&self, table: &[R]) -> Axis<R> {
        build_axis(&self.column_fields, table)
    }
}

/// Combines the fields' dimensions; no fields means a single grand-total slice.
fn build_axis<R: Record>(fields: &[DimensionField], table: &[R]) -> Axis<R> {
    match Dimension::combine_all(fields.iter().map(|f| f.dimension(table))) {
        Ok(axis) => axis,
        Err(_) => Dimension::grand_total(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<Value>> {
        vec![
            vec![Value::from("South"), Value::from("Q2"), Value::from(10)],
            vec![Value::from("North"), Value::from("Q1"), Value::from(20)],
            vec![Value::from("South"), Value::from("Q1"), Value::from("n/a")],
        ]
    }

    #[test]
    fn test_field_values_sorting_and_hiding() {
        let table = rows();
        assert_eq!(
            DimensionField::new(0usize).values(&table),
            vec![Value::from("South"), Value::from("North")]
        );
        assert_eq!(
            DimensionField::new(0usize).sorted(SortOrder::Ascending).values(&table),
            vec![Value::from("North"), Value::from("South")]
        );
        assert_eq!(
            DimensionField::new(1usize).sorted(SortOrder::Descending).hide("Q2").values(&table),
            vec![Value::from("Q1")]
        );
        assert_eq!(
            DimensionField::new(0usize).with_items(["East", "South"]).values(&table),
            vec![Value::from("East"), Value::from("South")]
        );
    }

    #[test]
    fn test_value_field_skips_text() {
        let table = rows();
        let sum = ValueField::new(2usize, "Sum of Sales", Aggregation::Sum);
        assert_eq!(sum.evaluate(&table), Some(30.0));

        let count = ValueField::new(2usize, "Count of Sales", Aggregation::Count);
        assert_eq!(count.evaluate(&table), Some(3.0));
        assert_eq!(count.evaluate::<Vec<Value>>(&[]), None);
    }

    #[test]
    fn test_axes() {
        let table = rows();
        let mut def = PivotDefinition::new();
        def.row_fields.push(DimensionField::new(0usize));
        def.row_fields.push(DimensionField::new(1usize).sorted(SortOrder::Ascending));

        let rows_axis = def.row_axis(&table);
        assert_eq!(rows_axis.labels(), vec!["South / Q1", "South / Q2", "North / Q1", "North / Q2"]);

        let columns_axis = def.column_axis(&table);
        assert_eq!(columns_axis.len(), 1);
        assert!(table.iter().all(|row| columns_axis[0].matches(row)));
    }

    #[test]
    fn test_definition_serde_defaults() {
        let json = r#"{
            "row_fields": [{ "key": { "Name": "Region" } }],
            "value_fields": [{ "key": { "Index": 3 }, "name": "Sales" }]
        }"#;
        let def: PivotDefinition = serde_json::from_str(json).unwrap();

        assert_eq!(def.row_fields[0].key, Key::from("Region"));
        assert_eq!(def.row_fields[0].sort_order, SortOrder::DataSourceOrder);
        assert!(def.column_fields.is_empty());
        assert_eq!(def.value_fields[0].aggregation, Aggregation::Sum);
        assert!(!def.compact);

        let back: PivotDefinition =
            serde_json::from_str(&serde_json::to_string(&def).unwrap()).unwrap();
        assert_eq!(back, def);
    }
}
