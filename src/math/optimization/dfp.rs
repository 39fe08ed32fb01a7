use log::trace;
use ndarray::{Array1, Array2};

use crate::error::{Error, Result};
use crate::math::optimization::{constant, driver};
use crate::math::optimization::{
    Method, ObjectiveFunction, OptimizationConfig, OptimizationResult, Scalar, SearchDirection,
};

/// Davidon–Fletcher–Powell inverse-Hessian approximation.
///
/// Starts from the identity and receives one rank-two correction per
/// accepted step:
///
/// ```text
/// H ← H + s·sᵀ/(sᵀy) − (H·y)(H·y)ᵀ/(yᵀ·H·y)
/// ```
///
/// The correction is skipped whenever `sᵀy` does not exceed the curvature
/// threshold, which keeps `H` symmetric positive definite.
#[derive(Debug, Clone, PartialEq)]
pub struct Dfp<T>
where
    T: Scalar,
{
    inverse_hessian: Array2<T>,
    curvature_threshold: T,
    updates: usize,
    skipped: usize,
}

impl<T> Dfp<T>
where
    T: Scalar,
{
    /// Creates an approximation for `dimension` variables with the default
    /// curvature threshold of `1e-12`.
    #[must_use]
    pub fn new(dimension: usize) -> Self {
        Self {
            inverse_hessian: Array2::eye(dimension),
            curvature_threshold: constant(1e-12),
            updates: 0,
            skipped: 0,
        }
    }

    #[must_use]
    pub fn with_curvature_threshold(mut self, threshold: T) -> Self {
        self.curvature_threshold = threshold;
        self
    }

    /// Number of variables the approximation covers.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.inverse_hessian.nrows()
    }

    /// Current approximation of the inverse Hessian.
    #[must_use]
    pub fn inverse_hessian(&self) -> &Array2<T> {
        &self.inverse_hessian
    }

    /// Number of corrections applied so far.
    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Number of steps whose correction was skipped.
    #[must_use]
    pub fn skipped_updates(&self) -> usize {
        self.skipped
    }

    /// Applies the DFP correction for step `s` and gradient change `y`.
    ///
    /// Returns `false` and leaves `H` untouched when the curvature condition
    /// `sᵀy > threshold` fails.
    pub fn update(&mut self, s: &Array1<T>, y: &Array1<T>) -> bool {
        let sy = s.dot(y);
        if !(sy > self.curvature_threshold) {
            trace!("DFP: curvature condition failed (s·y = {}), skipping update", sy);
            self.skipped += 1;
            return false;
        }

        let hy = self.inverse_hessian.dot(y);
        let yhy = y.dot(&hy);
        for ((i, j), h) in self.inverse_hessian.indexed_iter_mut() {
            *h = *h + s[i] * s[j] / sy - hy[i] * hy[j] / yhy;
        }
        self.updates += 1;
        true
    }
}

impl<T> SearchDirection<T> for Dfp<T>
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
        (self.inverse_hessian.dot(gradient).mapv(|v| -v), 0)
    }

    fn observe(&mut self, step: &Array1<T>, gradient_change: &Array1<T>) {
        self.update(step, gradient_change);
    }
}

/// Minimizes an objective function using the DFP (Davidon–Fletcher–Powell) method.
///
/// DFP is a quasi-Newton method that maintains an approximation of the inverse
/// Hessian built from successive steps and gradient changes, so no second
/// derivatives are ever evaluated.
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
/// use tankopt::math::optimization::dfp::minimize;
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
    minimize_with(f, initial_point, config, &mut Dfp::new(initial_point.len()))
}

/// Like [`minimize`], but drives a caller-owned [`Dfp`] so its final state can
/// be inspected afterwards.
///
/// # Errors
///
/// Returns an error if `config` is invalid, `initial_point` is empty, or
/// `dfp` was created for a different number of variables.
pub fn minimize_with<T, F>(
    f: &F,
    initial_point: &[T],
    config: &OptimizationConfig<T>,
    dfp: &mut Dfp<T>,
) -> Result<OptimizationResult<T>>
where
    T: Scalar,
    F: ObjectiveFunction<T>,
{
    if !initial_point.is_empty() && dfp.dimension() != initial_point.len() {
        return Err(Error::DimensionMismatch {
            expected: dfp.dimension(),
            found: initial_point.len(),
        });
    }
    driver::run(Method::Dfp, f, initial_point, config, dfp)
}
