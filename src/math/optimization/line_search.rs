//! Backtracking line search with the Armijo sufficient-decrease condition.

use ndarray::Array1;

use super::{constant, to_f64, ObjectiveFunction, Scalar};
use crate::error::{ensure_positive, Error, Result};

/// Settings for [`search`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchConfig<T>
where
    T: Scalar,
{
    /// First step length tried
    pub initial_step: T,
    /// Armijo constant c₁
    pub sufficient_decrease: T,
    /// Factor applied to the step after each rejected trial
    pub shrink: T,
    /// Maximum number of trial steps
    pub max_trials: usize,
}

impl<T> Default for LineSearchConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            initial_step: T::one(),
            sufficient_decrease: constant(1e-4),
            shrink: constant(0.5),
            max_trials: 50,
        }
    }
}

impl<T> LineSearchConfig<T>
where
    T: Scalar,
{
    /// # Errors
    ///
    /// Returns an error unless `initial_step > 0`, `0 < sufficient_decrease < 1`,
    /// `0 < shrink < 1` and `max_trials >= 1`.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("initial_step", to_f64(self.initial_step))?;
        let c1 = to_f64(self.sufficient_decrease);
        if !(c1 > 0.0 && c1 < 1.0) {
            return Err(Error::InvalidSufficientDecrease(c1));
        }
        let shrink = to_f64(self.shrink);
        if !(shrink > 0.0 && shrink < 1.0) {
            return Err(Error::InvalidShrink(shrink));
        }
        if self.max_trials == 0 {
            return Err(Error::ZeroLineSearchTrials);
        }
        Ok(())
    }
}

/// The step a line search settled on.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSearchOutcome<T>
where
    T: Scalar,
{
    /// Accepted step length
    pub alpha: T,
    /// `alpha * direction`
    pub step: Array1<T>,
    /// `point + step`
    pub point: Array1<T>,
    /// Objective value at `point`
    pub value: T,
    /// Objective evaluations spent
    pub evaluations: usize,
    /// Whether the Armijo condition held. When false, the search ran out of
    /// trials and `alpha` is the smallest step it tried.
    pub satisfied: bool,
}

/// Finds a step along `direction` that satisfies
///
/// ```text
/// f(x + α·d) ≤ f(x) + c₁·α·∇f(x)ᵀd
/// ```
///
/// starting from `config.initial_step` and shrinking by `config.shrink` after
/// every rejection. `value` must be `f(point)`; it is not recomputed, so the
/// evaluation count equals the number of trial steps.
///
/// If no trial is accepted within `config.max_trials`, the last (smallest)
/// trial is returned unchecked with `satisfied == false`. This can happen
/// when `direction` is not a descent direction.
///
/// # Examples
///
/// ```
/// use ndarray::{array, ArrayView1};
/// use tankopt::math::optimization::ObjectiveFunction;
/// use tankopt::math::optimization::line_search::{search, LineSearchConfig};
///
/// struct Quadratic;
///
/// impl ObjectiveFunction<f64> for Quadratic {
///     fn evaluate(&self, point: ArrayView1<'_, f64>) -> f64 {
///         point[0] * point[0]
///     }
/// }
///
/// let x = array![1.0];
/// let g = array![2.0];
/// let d = array![-2.0];
/// let outcome = search(&Quadratic, &x, 1.0, &d, &g, &LineSearchConfig::default());
/// assert!(outcome.satisfied);
/// assert_eq!(outcome.alpha, 0.5);
/// assert_eq!(outcome.evaluations, 2);
/// ```
pub fn search<T, F>(
    f: &F,
    point: &Array1<T>,
    value: T,
    direction: &Array1<T>,
    gradient: &Array1<T>,
    config: &LineSearchConfig<T>,
) -> LineSearchOutcome<T>
where
    T: Scalar,
    F: ObjectiveFunction<T>,
{
    let slope = gradient.dot(direction);
    let mut alpha = config.initial_step;
    let mut evaluations = 0;

    loop {
        let step = direction * alpha;
        let trial = point + &step;
        let trial_value = f.evaluate(trial.view());
        evaluations += 1;

        let satisfied = trial_value <= value + config.sufficient_decrease * alpha * slope;
        if satisfied || evaluations >= config.max_trials {
            return LineSearchOutcome {
                alpha,
                step,
                point: trial,
                value: trial_value,
                evaluations,
                satisfied,
            };
        }

        alpha = alpha * config.shrink;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, ArrayView1};

    // f(x, y) = x^2 + y^2
    struct Quadratic;

    impl ObjectiveFunction<f64> for Quadratic {
        fn evaluate(&self, point: ArrayView1<'_, f64>) -> f64 {
            point.iter().map(|x| x * x).sum()
        }
    }

    // f(x, y) = (x - 1)^2 + 100(y - x^2)^2
    struct Rosenbrock;

    impl ObjectiveFunction<f64> for Rosenbrock {
        fn evaluate(&self, point: ArrayView1<'_, f64>) -> f64 {
            let (x, y) = (point[0], point[1]);
            (x - 1.0).powi(2) + 100.0 * (y - x.powi(2)).powi(2)
        }
    }

    fn armijo_holds<F: ObjectiveFunction<f64>>(
        f: &F,
        x: &Array1<f64>,
        d: &Array1<f64>,
        g: &Array1<f64>,
        outcome: &LineSearchOutcome<f64>,
    ) -> bool {
        let fx = f.evaluate(x.view());
        outcome.value <= fx + 1e-4 * outcome.alpha * g.dot(d)
    }

    #[test]
    fn test_full_step_accepted() {
        // Newton direction on a quadratic lands exactly on the minimum.
        let x = array![1.0, 1.0];
        let g = array![2.0, 2.0];
        let d = array![-1.0, -1.0];
        let outcome = search(&Quadratic, &x, 2.0, &d, &g, &LineSearchConfig::default());
        assert!(outcome.satisfied);
        assert_eq!(outcome.alpha, 1.0);
        assert_eq!(outcome.evaluations, 1);
        assert_eq!(outcome.point, array![0.0, 0.0]);
        assert_eq!(outcome.value, 0.0);
    }

    #[test]
    fn test_backtracks_until_armijo_holds() {
        let x = array![1.0, 1.0];
        let g = array![2.0, 2.0];
        let d = array![-2.0, -2.0];
        let outcome = search(&Quadratic, &x, 2.0, &d, &g, &LineSearchConfig::default());
        assert!(outcome.satisfied);
        assert_eq!(outcome.alpha, 0.5);
        assert_eq!(outcome.evaluations, 2);
        assert_eq!(outcome.step, array![-1.0, -1.0]);
        assert!(armijo_holds(&Quadratic, &x, &d, &g, &outcome));
    }

    #[test]
    fn test_steepest_direction_on_rosenbrock() {
        let x = array![-1.2, 1.0];
        let g = array![-215.6, -88.0];
        let d = g.mapv(|v: f64| -v);
        let fx = Rosenbrock.evaluate(x.view());
        let outcome = search(&Rosenbrock, &x, fx, &d, &g, &LineSearchConfig::default());
        assert!(outcome.satisfied);
        assert!(outcome.alpha < 1.0);
        assert!(outcome.value < fx);
        assert!(armijo_holds(&Rosenbrock, &x, &d, &g, &outcome));
        assert_relative_eq!(outcome.point[0], x[0] + outcome.alpha * d[0]);
    }

    #[test]
    fn test_non_descent_direction_gives_up_after_max_trials() {
        let x = array![1.0, 1.0];
        let g = array![2.0, 2.0];
        let d = array![1.0, 1.0];
        let config = LineSearchConfig::default();
        let outcome = search(&Quadratic, &x, 2.0, &d, &g, &config);
        assert!(!outcome.satisfied);
        assert_eq!(outcome.evaluations, 50);
        // The returned step is the last one actually tried.
        assert_eq!(outcome.alpha, 0.5f64.powi(49));
        assert_eq!(outcome.point, &x + &(&d * outcome.alpha));
    }

    #[test]
    fn test_custom_trial_budget() {
        let x = array![1.0, 1.0];
        let g = array![2.0, 2.0];
        let d = array![1.0, 1.0];
        let config = LineSearchConfig {
            max_trials: 3,
            ..LineSearchConfig::default()
        };
        let outcome = search(&Quadratic, &x, 2.0, &d, &g, &config);
        assert!(!outcome.satisfied);
        assert_eq!(outcome.evaluations, 3);
        assert_eq!(outcome.alpha, 0.25);
    }

    #[test]
    fn test_validate() {
        assert!(LineSearchConfig::<f64>::default().validate().is_ok());
        let bad_shrink = LineSearchConfig::<f64> {
            shrink: 1.0,
            ..LineSearchConfig::default()
        };
        assert_eq!(bad_shrink.validate(), Err(Error::InvalidShrink(1.0)));
        let bad_c1 = LineSearchConfig::<f64> {
            sufficient_decrease: 0.0,
            ..LineSearchConfig::default()
        };
        assert_eq!(
            bad_c1.validate(),
            Err(Error::InvalidSufficientDecrease(0.0))
        );
        let no_trials = LineSearchConfig::<f64> {
            max_trials: 0,
            ..LineSearchConfig::default()
        };
        assert_eq!(no_trials.validate(), Err(Error::ZeroLineSearchTrials));
    }
}
