use ndarray::Array1;

use crate::error::Result;
use crate::math::optimization::driver;
use crate::math::optimization::{
    Method, ObjectiveFunction, OptimizationConfig, OptimizationResult, Scalar, SearchDirection,
};

/// Moves along the negative gradient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteepestDescent;

impl<T> SearchDirection<T> for SteepestDescent
where
    T: Scalar,
{
    fn direction<F>(
        &mut self,
        _f: &F,
        _point: &Array1<T>,
        gradient: &Array1<T>,
        _config: &OptimizationConfig<T>,
    ) -> (Array1<T>, usize)
    where
        F: ObjectiveFunction<T>,
    {
        (gradient.mapv(|g| -g), 0)
    }
}

/// Minimizes an objective function using steepest descent.
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
/// use tankopt::math::optimization::gradient_descent::minimize;
///
/// // Define a simple quadratic function
/// struct Quadratic;
///
/// impl ObjectiveFunction<f64> for Quadratic {
///     fn evaluate(&self, point: ArrayView1<'_, f64>) -> f64 {
///         point.iter().map(|x| x * x).sum()
///     }
/// }
///
/// let f = Quadratic;
/// let initial_point = vec![1.0, 1.0];
/// let config = OptimizationConfig::default();
///
/// let result = minimize(&f, &initial_point, &config).unwrap();
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
    driver::run(
        Method::SteepestDescent,
        f,
        initial_point,
        config,
        &mut SteepestDescent,
    )
}
