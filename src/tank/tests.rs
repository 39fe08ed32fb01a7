use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Error;
use crate::math::optimization::dfp::{self, Dfp};
use crate::math::optimization::{Method, ObjectiveFunction, OptimizationConfig, Status};
use crate::tank::{DesignPoint, TankProblem};

fn start() -> DesignPoint {
    DesignPoint::new(0.5, 1.0)
}

#[test]
fn test_every_method_reaches_the_volume_band() {
    let problem = TankProblem::default();
    let results = problem
        .compare(start(), &OptimizationConfig::default())
        .unwrap();
    let initial_value = problem.objective().evaluate(start().to_array().view());

    assert_eq!(results.len(), 3);
    for result in &results {
        let design = DesignPoint::try_from(&result.optimal_point).unwrap();
        let volume = problem
            .cost_model()
            .internal_volume(design.diameter, design.length);

        // The penalty lets the volume sit a hair below 0.72.
        assert!(
            (0.719..=0.881).contains(&volume),
            "{}: volume = {volume}",
            result.method
        );
        assert!(design.length <= 2.0);
        assert!(result.optimal_value < initial_value);
        assert!(result.iterations <= 100);

        assert_eq!(result.x_history.len(), result.iterations + 1);
        assert_eq!(result.f_history.len(), result.iterations + 1);
        assert_eq!(result.gradient_norms.len(), result.iterations + 1);
        for pair in result.f_history.windows(2) {
            assert!(pair[1] <= pair[0], "{}: f increased", result.method);
        }
    }

    // Final costs agree within 1%.
    let best = results
        .iter()
        .map(|r| r.optimal_value)
        .fold(f64::INFINITY, f64::min);
    for result in &results {
        assert!(
            (result.optimal_value - best) / best < 0.01,
            "{}: {} vs best {best}",
            result.method,
            result.optimal_value
        );
    }
}

#[test]
fn test_newton_converges_on_tank_at_default_tolerance() {
    let problem = TankProblem::default();
    let config = OptimizationConfig::default();
    let result = problem.optimize(Method::Newton, start(), &config).unwrap();

    assert!(result.converged);
    assert_eq!(result.status, Status::Converged);
    assert!(result.iterations < config.max_iterations);
    assert!(result.final_gradient_norm() < 1e-6);
    assert!((result.optimal_value - 5353.7974).abs() / 5353.7974 < 1e-4);

    let design = DesignPoint::try_from(&result.optimal_point).unwrap();
    let volume = problem
        .cost_model()
        .internal_volume(design.diameter, design.length);
    assert!((volume - 0.719765).abs() < 1e-3);
    assert!(design.diameter > 0.9 && design.diameter < 1.0);

    let summary = problem.summarize(&result).unwrap();
    assert!((summary.cost - result.optimal_value).abs() < 5.0);
}

#[test]
fn test_dfp_inverse_hessian_stays_positive_definite_on_tank() {
    let problem = TankProblem::default();
    let mut approximation = Dfp::new(2);
    let result = dfp::minimize_with(
        problem.objective(),
        &[0.5, 1.0],
        &OptimizationConfig::default(),
        &mut approximation,
    )
    .unwrap();

    assert_eq!(
        approximation.updates() + approximation.skipped_updates(),
        result.iterations
    );
    assert!(approximation.updates() > 0);

    let h = approximation.inverse_hessian();
    assert_eq!(h[[0, 1]], h[[1, 0]]);
    assert!(h[[0, 0]] > 0.0 && h[[1, 1]] > 0.0);
    assert!(h[[0, 0]] * h[[1, 1]] > h[[0, 1]] * h[[1, 0]]);
}

#[test]
fn test_restart_from_optimum_takes_no_steps() {
    let problem = TankProblem::default();
    let config = OptimizationConfig::default();
    let first = problem.optimize(Method::Newton, start(), &config).unwrap();
    assert!(first.converged);

    let optimum = DesignPoint::try_from(&first.optimal_point).unwrap();
    for method in Method::ALL {
        let again = problem.optimize(method, optimum, &config).unwrap();
        assert!(again.converged);
        assert_eq!(again.iterations, 0);
        assert_eq!(again.x_history.len(), 1);
        assert_eq!(again.gradient_norms.len(), 1);
        // f(x0) plus one central-difference gradient
        assert_eq!(again.function_evaluations, 5);
        assert_eq!(again.optimal_point, first.optimal_point);
    }
}

#[test]
fn test_runs_are_reproducible() {
    let problem = TankProblem::default();
    let config = OptimizationConfig::default();
    for method in Method::ALL {
        let a = problem.optimize(method, start(), &config).unwrap();
        let b = problem.optimize(method, start(), &config).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn test_evaluation_counts_cover_all_work() {
    let problem = TankProblem::default();
    let config = OptimizationConfig::default();
    for method in Method::ALL {
        let result = problem.optimize(method, start(), &config).unwrap();
        let k = result.iterations;
        // f(x0), a 4-evaluation gradient per iterate and one trial per step
        let mut lower = 1 + 4 * (k + 1) + k;
        if method == Method::Newton {
            lower += 16 * k;
        }
        assert!(
            result.function_evaluations >= lower,
            "{}: {} < {lower}",
            method,
            result.function_evaluations
        );
    }
}

#[test]
fn test_infeasible_start_does_not_panic() {
    let problem = TankProblem::default();
    let config = OptimizationConfig {
        max_iterations: 3,
        ..OptimizationConfig::default()
    };
    for method in Method::ALL {
        let result = problem
            .optimize(method, DesignPoint::new(-0.5, 1.0), &config)
            .unwrap();
        assert!(!result.converged);
        assert_eq!(result.status, Status::MaxIterations);
        assert_eq!(result.iterations, 3);
        assert_eq!(result.x_history.len(), 4);
        assert_eq!(result.f_history[0], f64::INFINITY);
    }
}

#[test]
fn test_methods_by_name() {
    let problem = TankProblem::default();
    let config = OptimizationConfig::default();
    let by_name = problem
        .optimize_named("newton", start(), &config)
        .unwrap();
    let by_enum = problem.optimize(Method::Newton, start(), &config).unwrap();
    assert_eq!(by_name, by_enum);

    let sd = problem
        .optimize_named("Steepest Descent", start(), &config)
        .unwrap();
    assert_eq!(sd.method, Method::SteepestDescent);

    assert_eq!(
        problem.optimize_named("simplex", start(), &config),
        Err(Error::UnknownMethod("simplex".to_string()))
    );
}

#[test]
fn test_compare_keeps_method_order() {
    let problem = TankProblem::default();
    let config = OptimizationConfig {
        max_iterations: 5,
        ..OptimizationConfig::default()
    };
    let results = problem.compare(start(), &config).unwrap();
    let methods: Vec<Method> = results.iter().map(|r| r.method).collect();
    assert_eq!(methods, Method::ALL.to_vec());

    let text = crate::tank::report::render_all(problem.cost_model(), &results).unwrap();
    assert!(text.starts_with("SteepestDescent:"));
    assert!(text.contains("\n\nNewton:"));
    assert!(text.contains("\n\nDFP:"));
}

#[test]
fn test_invalid_config_is_reported() {
    let problem = TankProblem::default();
    let config = OptimizationConfig {
        tolerance: 0.0,
        ..OptimizationConfig::default()
    };
    assert_eq!(
        problem.optimize(Method::Dfp, start(), &config),
        Err(Error::NonPositive {
            name: "tolerance",
            value: 0.0
        })
    );
}

#[test]
fn test_random_feasible_starts_improve() {
    let problem = TankProblem::default();
    let config = OptimizationConfig {
        max_iterations: 30,
        ..OptimizationConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..5 {
        let design = DesignPoint::new(rng.gen_range(0.6..1.0), rng.gen_range(0.8..1.8));
        for method in Method::ALL {
            let result = problem.optimize(method, design, &config).unwrap();
            assert_eq!(result.x_history.len(), result.iterations + 1);
            assert!(result.optimal_value.is_finite());
            assert!(result.optimal_value <= result.f_history[0] * (1.0 + 1e-9));
        }
    }
}
