//! Benchmarks for the DiVI command pipeline

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use divi::plan::LogicalPlan;
use divi::Bucket;

fn pipeline_benchmarks(c: &mut Criterion) {
    let text: String = (0..25)
        .flat_map(|i| {
            [
                format!("PUT key{} value{}", i, i),
                format!("INC counter{}", i % 4),
            ]
        })
        .collect::<Vec<_>>()
        .join("\n");

    c.bench_function("compile_50_line_plan", |b| {
        b.iter(|| LogicalPlan::from_text(black_box(&text)).unwrap())
    });

    c.bench_function("execute_50_line_plan", |b| {
        let bucket = Bucket::new();
        b.iter(|| {
            LogicalPlan::from_text(black_box(&text))
                .unwrap()
                .execute(&bucket)
        })
    });

    c.bench_function("single_get_round_trip", |b| {
        let bucket = Bucket::new();
        LogicalPlan::from_text("PUT key value")
            .unwrap()
            .execute(&bucket);

        b.iter(|| LogicalPlan::from_text("GET key").unwrap().execute(&bucket))
    });
}

criterion_group!(benches, pipeline_benchmarks);
criterion_main!(benches);
