//! Render Benchmark
//!
//! Measures whole-interface render throughput on synthetic protocols.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use mockgen::{InterfaceModel, Member, RenderOptions, render_interface};
use mockgen::model::{MethodModel, ParamModel, TypeAliasModel, VariableModel};

// =============================================================================
// Synthetic Interfaces
// =============================================================================

fn synthetic_interface(methods: usize) -> InterfaceModel {
    let mut members: Vec<Member> = Vec::with_capacity(methods * 3);
    let mut offset = 0;
    for i in 0..methods {
        offset += 1;
        members.push(
            VariableModel::new(&format!("value{i}"), "Int")
                .read_write()
                .at(offset)
                .into(),
        );
        offset += 1;
        members.push(MethodModel::new("fetch").returning("String").at(offset).into());
        offset += 1;
        members.push(
            MethodModel::new("fetch")
                .with_params(vec![
                    ParamModel::new("id", "String"),
                    ParamModel::new(
                        "completion",
                        "@escaping (Result<[String], Error>) -> Void",
                    ),
                ])
                .at(offset)
                .into(),
        );
    }
    members.push(TypeAliasModel::new("Handler", "() -> Void").at(offset + 1).into());
    InterfaceModel::new("Synthetic", members)
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_interface");
    for size in [10usize, 100, 500] {
        let interface = synthetic_interface(size);
        group.throughput(Throughput::Elements((size * 3) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &interface, |b, interface| {
            b.iter(|| render_interface(black_box(interface), &RenderOptions::default()));
        });
    }
    group.finish();
}

fn bench_template_func(c: &mut Criterion) {
    let interface = synthetic_interface(100);
    let options = RenderOptions {
        use_template_func: true,
        enable_func_args_history: true,
        ..RenderOptions::default()
    };
    c.bench_function("render_interface_template_func", |b| {
        b.iter(|| render_interface(black_box(&interface), &options));
    });
}

criterion_group!(benches, bench_render, bench_template_func);
criterion_main!(benches);
