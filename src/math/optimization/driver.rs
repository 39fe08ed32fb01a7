use log::{debug, info, warn};
use ndarray::Array1;

use super::{finite_difference, line_search};
use super::{
    norm, Method, ObjectiveFunction, OptimizationConfig, OptimizationResult, Scalar,
    SearchDirection, Status,
};
use crate::error::{Error, Result};

/// Shared iteration loop behind every optimizer.
///
/// The gradient norm is checked at the top of each pass, before any step is
/// taken, so a starting point that already satisfies the tolerance returns
/// with zero iterations. The gradient at each accepted point is computed once
/// and reused by the next pass, which keeps `gradient_norms` parallel to
/// `x_history`.
pub(crate) fn run<T, F, S>(
    method: Method,
    f: &F,
    initial_point: &[T],
    config: &OptimizationConfig<T>,
    strategy: &mut S,
) -> Result<OptimizationResult<T>>
where
    T: Scalar,
    F: ObjectiveFunction<T>,
    S: SearchDirection<T>,
{
    config.validate()?;
    if initial_point.is_empty() {
        return Err(Error::EmptyStartingPoint);
    }

    let mut point = Array1::from(initial_point.to_vec());
    let mut value = f.evaluate(point.view());
    let mut evaluations = 1;

    let (mut gradient, gradient_evaluations) =
        finite_difference::gradient(f, &point, config.gradient_step);
    evaluations += gradient_evaluations;

    let mut x_history = vec![point.clone()];
    let mut f_history = vec![value];
    let mut gradient_norms = Vec::with_capacity(config.max_iterations + 1);
    let mut iterations = 0;

    let status = loop {
        let gradient_norm = norm(&gradient);
        gradient_norms.push(gradient_norm);

        if gradient_norm < config.tolerance {
            break Status::Converged;
        }
        if iterations == config.max_iterations {
            break Status::MaxIterations;
        }

        let (direction, direction_evaluations) =
            strategy.direction(f, &point, &gradient, config);
        evaluations += direction_evaluations;

        let outcome = line_search::search(
            f,
            &point,
            value,
            &direction,
            &gradient,
            &config.line_search,
        );
        evaluations += outcome.evaluations;
        if !outcome.satisfied {
            warn!(
                "{}: line search exhausted {} trials at iteration {}, accepting alpha = {}",
                method, outcome.evaluations, iterations, outcome.alpha
            );
        }

        let (next_gradient, gradient_evaluations) =
            finite_difference::gradient(f, &outcome.point, config.gradient_step);
        evaluations += gradient_evaluations;

        let gradient_change = &next_gradient - &gradient;
        strategy.observe(&outcome.step, &gradient_change);

        point = outcome.point;
        value = outcome.value;
        gradient = next_gradient;
        iterations += 1;

        debug!(
            "{}: iteration {} f = {} |g| = {} alpha = {}",
            method,
            iterations,
            value,
            norm(&gradient),
            outcome.alpha
        );

        x_history.push(point.clone());
        f_history.push(value);
    };

    let converged = status == Status::Converged;
    info!(
        "{}: {:?} after {} iterations and {} evaluations, f = {}",
        method, status, iterations, evaluations, value
    );

    Ok(OptimizationResult {
        method,
        x_history,
        f_history,
        gradient_norms,
        iterations,
        function_evaluations: evaluations,
        optimal_point: point,
        optimal_value: value,
        converged,
        status,
    })
}
