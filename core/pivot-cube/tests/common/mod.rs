//! FILENAME: tests/common/mod.rs
//! Fixtures and assertion helpers for pivot-cube integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use pivot_cube::{Cube, Table, Value};

/// A typed sales record.
#[derive(Debug, Clone, PartialEq)]
pub struct Sale {
    pub region: &'static str,
    pub product: &'static str,
    pub quarter: &'static str,
    pub sales: f64,
    pub quantity: f64,
}

pub struct SalesFixture;

impl SalesFixture {
    pub fn headers() -> Vec<&'static str> {
        vec!["Region", "Product", "Quarter", "Sales", "Quantity"]
    }

    pub fn data() -> Vec<(&'static str, &'static str, &'static str, f64, f64)> {
        vec![
            ("North", "Widget", "Q1", 10000.0, 100.0),
            ("North", "Widget", "Q2", 12000.0, 120.0),
            ("North", "Gadget", "Q1", 8000.0, 80.0),
            ("North", "Gadget", "Q2", 9000.0, 90.0),
            ("South", "Widget", "Q1", 15000.0, 150.0),
            ("South", "Widget", "Q2", 14000.0, 140.0),
            ("South", "Gadget", "Q1", 11000.0, 110.0),
            ("South", "Gadget", "Q2", 13000.0, 130.0),
            ("East", "Widget", "Q1", 9000.0, 90.0),
            ("East", "Widget", "Q2", 11000.0, 110.0),
            ("East", "Gadget", "Q1", 7000.0, 70.0),
            ("East", "Gadget", "Q2", 8500.0, 85.0),
        ]
    }

    pub fn sales() -> Vec<Sale> {
        Self::data()
            .into_iter()
            .map(|(region, product, quarter, sales, quantity)| Sale {
                region,
                product,
                quarter,
                sales,
                quantity,
            })
            .collect()
    }

    /// The same data as positional `Value` rows.
    pub fn records() -> Vec<Vec<Value>> {
        Self::data()
            .into_iter()
            .map(|(region, product, quarter, sales, quantity)| {
                vec![
                    Value::from(region),
                    Value::from(product),
                    Value::from(quarter),
                    Value::from(sales),
                    Value::from(quantity),
                ]
            })
            .collect()
    }

    /// The same data as name-keyed rows.
    pub fn named_records() -> Vec<BTreeMap<String, Value>> {
        Self::records()
            .into_iter()
            .map(|row| {
                Self::headers()
                    .into_iter()
                    .map(str::to_string)
                    .zip(row)
                    .collect()
            })
            .collect()
    }
}

/// Assert that an aggregate is present and close to `expected`.
pub fn assert_close(actual: Option<f64>, expected: f64) {
    match actual {
        Some(n) => assert!(
            (n - expected).abs() < 0.001,
            "expected {} but got {}",
            expected,
            n
        ),
        None => panic!("expected {} but got no data", expected),
    }
}

/// Every row placed in a cube, in leaf order.
pub fn flatten<R: Clone>(cube: &Cube<Table<R>>) -> Vec<R> {
    cube.leaves().into_iter().flatten().cloned().collect()
}
