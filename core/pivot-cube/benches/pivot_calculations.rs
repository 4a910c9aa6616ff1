//! FILENAME: core/pivot-cube/benches/pivot_calculations.rs
//! Benchmarks for cube construction and cell aggregation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pivot_cube::{
    calculate_pivot, distinct, distinct_hashed, pivot, query, sum, Aggregation, CrossTab,
    Dimension, DimensionField, PivotDefinition, SortOrder, Value, ValueField,
};

#[derive(Debug, Clone)]
struct Sale {
    region: u32,
    product: u32,
    month: u32,
    amount: f64,
}

fn generate_sales(rows: usize) -> Vec<Sale> {
    (0..rows)
        .map(|i| Sale {
            region: (i % 8) as u32,
            product: ((i / 8) % 25) as u32,
            month: ((i / 200) % 12) as u32,
            amount: (i % 1000) as f64 * 1.5,
        })
        .collect()
}

fn generate_records(rows: usize) -> Vec<Vec<Value>> {
    generate_sales(rows)
        .into_iter()
        .map(|s| {
            vec![
                Value::from(format!("R{}", s.region)),
                Value::from(format!("P{}", s.product)),
                Value::from(s.month),
                Value::from(s.amount),
            ]
        })
        .collect()
}

fn bench_distinct(c: &mut Criterion) {
    let mut group = c.benchmark_group("distinct");
    for rows in [1_000, 10_000, 100_000] {
        let table = generate_sales(rows);
        group.bench_with_input(BenchmarkId::new("equality", rows), &table, |b, t| {
            b.iter(|| distinct(black_box(t), |s| s.product))
        });
        group.bench_with_input(BenchmarkId::new("hashed", rows), &table, |b, t| {
            b.iter(|| distinct_hashed(black_box(t), |s| s.product))
        });
    }
    group.finish();
}

fn bench_pivot(c: &mut Criterion) {
    let mut group = c.benchmark_group("pivot");
    for rows in [1_000, 10_000, 100_000] {
        let table = generate_sales(rows);
        let regions = Dimension::from_table(&table, "region", |s: &Sale| s.region);
        let products = Dimension::from_table(&table, "product", |s: &Sale| s.product);
        let months = Dimension::from_table(&table, "month", |s: &Sale| s.month);

        group.bench_with_input(BenchmarkId::new("three_axes", rows), &table, |b, t| {
            let axes = [regions.clone(), products.clone(), months.clone()];
            b.iter(|| {
                let cube = pivot(black_box(t), &axes).unwrap();
                query(&cube, sum(|s: &Sale| s.amount))
            })
        });

        group.bench_with_input(BenchmarkId::new("crosstab_compact", rows), &table, |b, t| {
            let combined = regions.combine(&products);
            b.iter(|| {
                let mut tab = CrossTab::build(black_box(t), combined.clone(), months.clone()).unwrap();
                tab.compact()
            })
        });
    }
    group.finish();
}

fn bench_definition(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_pivot");
    let mut def = PivotDefinition::new();
    def.row_fields.push(DimensionField::new(0usize).sorted(SortOrder::Ascending));
    def.row_fields.push(DimensionField::new(1usize));
    def.column_fields.push(DimensionField::new(2usize).sorted(SortOrder::Ascending));
    def.value_fields.push(ValueField::new(3usize, "Sum of Amount", Aggregation::Sum));
    def.value_fields.push(ValueField::new(3usize, "StdDev of Amount", Aggregation::StdDev));

    for rows in [1_000, 10_000] {
        let table = generate_records(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &table, |b, t| {
            b.iter(|| calculate_pivot(&def, black_box(t)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_distinct, bench_pivot, bench_definition);
criterion_main!(benches);
