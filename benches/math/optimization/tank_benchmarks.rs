use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::array;
use tankopt::math::optimization::finite_difference;
use tankopt::tank::{DesignPoint, TankProblem};
use tankopt::{Method, OptimizationConfig};

fn bench_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("tank_optimize");
    let problem = TankProblem::default();
    let config = OptimizationConfig::default();
    let start = DesignPoint::new(0.5, 1.0);

    for method in Method::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(method), &method, |b, &method| {
            b.iter(|| problem.optimize(black_box(method), black_box(start), &config))
        });
    }

    group.finish();
}

fn bench_finite_differences(c: &mut Criterion) {
    let problem = TankProblem::default();
    let point = array![0.9, 1.1];

    c.bench_function("tank_gradient", |b| {
        b.iter(|| finite_difference::gradient(problem.objective(), black_box(&point), 1e-6))
    });
    c.bench_function("tank_hessian", |b| {
        b.iter(|| finite_difference::hessian(problem.objective(), black_box(&point), 1e-5))
    });
}

criterion_group!(benches, bench_methods, bench_finite_differences);
criterion_main!(benches);
