use log::{debug, trace};
use ndarray::{Array1, Array2};

use crate::error::Result;
use crate::math::optimization::{constant, driver, finite_difference};
use crate::math::optimization::{
    Method, ObjectiveFunction, OptimizationConfig, OptimizationResult, Scalar, SearchDirection,
};

/// Levenberg–Marquardt shift schedule for the Newton system.
///
/// The shift starts at `initial` and is multiplied by `growth` after each
/// failed solve. Once it exceeds `max`, the step falls back to the negative
/// gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Regularization<T>
where
    T: Scalar,
{
    /// First shift added to the Hessian diagonal
    pub initial: T,
    /// Factor applied to the shift after each failed solve
    pub growth: T,
    /// Largest shift tried before falling back to the negative gradient
    pub max: T,
}

impl<T> Default for Regularization<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            initial: constant(1e-8),
            growth: constant(10.0),
            max: constant(1e2),
        }
    }
}

/// Outcome of solving `(H + shift·I)·d = -g`.
#[derive(Debug, Clone, PartialEq)]
pub enum Solve<T>
where
    T: Scalar,
{
    /// `d` solves the system and points downhill (`d·g < 0`).
    Ok(Array1<T>),
    /// The shifted matrix could not be factored.
    Singular,
    /// The system was solved but `d` does not decrease the objective.
    NonDescent,
}

/// Solves `(hessian + shift·I)·d = -gradient` and classifies the result.
pub fn solve_shifted<T>(hessian: &Array2<T>, gradient: &Array1<T>, shift: T) -> Solve<T>
where
    T: Scalar,
{
    let mut shifted = hessian.clone();
    shifted.diag_mut().mapv_inplace(|v| v + shift);
    let rhs = gradient.mapv(|g| -g);

    match solve_linear_system(shifted, rhs) {
        None => Solve::Singular,
        Some(direction) if direction.dot(gradient) < T::zero() => Solve::Ok(direction),
        Some(_) => Solve::NonDescent,
    }
}

/// Solves `a·x = b` by Gaussian elimination with partial pivoting.
///
/// Returns `None` when a pivot is negligible relative to the largest entry of
/// `a`, or when the solution is not finite.
fn solve_linear_system<T>(mut a: Array2<T>, mut b: Array1<T>) -> Option<Array1<T>>
where
    T: Scalar,
{
    let n = b.len();
    let scale = a.iter().fold(T::zero(), |acc, v| acc.max(v.abs()));
    let threshold = scale * T::epsilon();

    for col in 0..n {
        let pivot_row = (col + 1..n).fold(col, |best, row| {
            if a[[row, col]].abs() > a[[best, col]].abs() {
                row
            } else {
                best
            }
        });
        if pivot_row != col {
            for k in 0..n {
                a.swap([col, k], [pivot_row, k]);
            }
            b.swap(col, pivot_row);
        }

        let pivot = a[[col, col]];
        // Also rejects NaN pivots.
        if !(pivot.abs() > threshold) {
            return None;
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / pivot;
            for k in col..n {
                a[[row, k]] = a[[row, k]] - factor * a[[col, k]];
            }
            b[row] = b[row] - factor * b[col];
        }
    }

    let mut x = Array1::zeros(n);
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in row + 1..n {
            sum = sum - a[[row, k]] * x[k];
        }
        x[row] = sum / a[[row, row]];
    }

    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}

/// Regularized Newton steps from a finite-difference Hessian.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Newton<T>
where
    T: Scalar,
{
    pub regularization: Regularization<T>,
}

impl<T> Newton<T>
where
    T: Scalar,
{
    #[must_use]
    pub fn new(regularization: Regularization<T>) -> Self {
        Self { regularization }
    }

    /// Picks the least-shifted Newton direction that is a descent direction,
    /// or the negative gradient if every shift fails.
    pub fn regularized_direction(&self, hessian: &Array2<T>, gradient: &Array1<T>) -> Array1<T> {
        let Regularization {
            initial,
            growth,
            max,
        } = self.regularization;

        let mut shift = initial;
        while shift <= max {
            match solve_shifted(hessian, gradient, shift) {
                Solve::Ok(direction) => return direction,
                Solve::Singular => trace!("Newton: singular system at shift {}", shift),
                Solve::NonDescent => trace!("Newton: non-descent direction at shift {}", shift),
            }
            shift = shift * growth;
        }

        debug!("Newton: regularization exhausted, using steepest descent direction");
        gradient.mapv(|g| -g)
    }
}

impl<T> SearchDirection<T> for Newton<T>
where
    T: Scalar,
{
    fn direction<F>(
        &mut self,
        f: &F,
        point: &Array1<T>,
        gradient: &Array1<T>,
        config: &OptimizationConfig<T>,
    ) -> (Array1<T>, usize)
    where
        F: ObjectiveFunction<T>,
    {
        let (hessian, evaluations) = finite_difference::hessian(f, point, config.hessian_step);
        (self.regularized_direction(&hessian, gradient), evaluations)
    }
}

/// Minimizes an objective function using Newton's method.
///
/// Newton's method uses both first and second derivatives to find the minimum of a function.
/// It typically converges faster than gradient descent for well-behaved functions.
/// Both derivatives are estimated by central differences, and the Hessian is
/// shifted towards the identity whenever it does not yield a descent direction.
///
/// # Arguments
///
/// * `f` - The objective function to minimize
/// * `initial_point` - The starting point for optimization
/// * `config` - Configuration options for the optimization process
///
/// # Returns
///
/// Returns an `OptimizationResult` containing the optimal point found and optimization statistics.
///
/// # Errors
///
/// Returns an error if `config` is invalid or `initial_point` is empty.
///
/// # Examples
///
/// ```
/// use ndarray::ArrayView1;
/// use tankopt::math::optimization::{ObjectiveFunction, OptimizationConfig};
/// use tankopt::math::optimization::newton::minimize;
///
/// struct Quadratic;
///
/// impl ObjectiveFunction<f64> for Quadratic {
///     fn evaluate(&self, point: ArrayView1<'_, f64>) -> f64 {
///         point.iter().map(|x| x * x).sum()
///     }
/// }
///
/// let result = minimize(&Quadratic, &[1.0, 1.0], &OptimizationConfig::default()).unwrap();
/// assert!(result.converged);
/// ```
pub fn minimize<T, F>(
    f: &F,
    initial_point: &[T],
    config: &OptimizationConfig<T>,
) -> Result<OptimizationResult<T>>
where
    T: Scalar,
    F: ObjectiveFunction<T>,
{
    minimize_with(f, initial_point, config, Regularization::default())
}

/// Like [`minimize`], with a custom regularization schedule.
///
/// # Errors
///
/// Returns an error if `config` is invalid or `initial_point` is empty.
pub fn minimize_with<T, F>(
    f: &F,
    initial_point: &[T],
    config: &OptimizationConfig<T>,
    regularization: Regularization<T>,
) -> Result<OptimizationResult<T>>
where
    T: Scalar,
    F: ObjectiveFunction<T>,
{
    driver::run(
        Method::Newton,
        f,
        initial_point,
        config,
        &mut Newton::new(regularization),
    )
}
