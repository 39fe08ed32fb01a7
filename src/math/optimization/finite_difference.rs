//! Central finite-difference estimates of gradients and Hessians.
//!
//! Both routines return the number of objective evaluations they performed so
//! callers can account for the cost of differentiation.

use ndarray::{Array1, Array2};

use super::{ObjectiveFunction, Scalar};

/// Estimates the gradient of `f` at `point`.
///
/// Each component uses the central difference
///
/// ```text
/// ∂f/∂xᵢ ≈ (f(x + h·eᵢ) − f(x − h·eᵢ)) / 2h
/// ```
///
/// which costs `2n` evaluations and has `O(h²)` truncation error.
///
/// # Examples
///
/// ```
/// use ndarray::{array, ArrayView1};
/// use tankopt::math::optimization::ObjectiveFunction;
/// use tankopt::math::optimization::finite_difference::gradient;
///
/// struct Quadratic;
///
/// impl ObjectiveFunction<f64> for Quadratic {
///     fn evaluate(&self, point: ArrayView1<'_, f64>) -> f64 {
///         point[0] * point[0] + 3.0 * point[1] * point[1]
///     }
/// }
///
/// let (g, evaluations) = gradient(&Quadratic, &array![1.0, 1.0], 1e-6);
/// assert!((g[0] - 2.0).abs() < 1e-6);
/// assert!((g[1] - 6.0).abs() < 1e-6);
/// assert_eq!(evaluations, 4);
/// ```
pub fn gradient<T, F>(f: &F, point: &Array1<T>, step: T) -> (Array1<T>, usize)
where
    T: Scalar,
    F: ObjectiveFunction<T>,
{
    let n = point.len();
    let two = T::one() + T::one();
    let mut gradient = Array1::zeros(n);
    let mut probe = point.clone();

    for i in 0..n {
        let origin = point[i];
        probe[i] = origin + step;
        let forward = f.evaluate(probe.view());
        probe[i] = origin - step;
        let backward = f.evaluate(probe.view());
        probe[i] = origin;
        gradient[i] = (forward - backward) / (two * step);
    }

    (gradient, 2 * n)
}

/// Estimates the Hessian of `f` at `point`.
///
/// Every entry, diagonal included, uses the four-point stencil
///
/// ```text
/// ∂²f/∂xᵢ∂xⱼ ≈ (f(x+heᵢ+heⱼ) − f(x+heᵢ−heⱼ) − f(x−heᵢ+heⱼ) + f(x−heᵢ−heⱼ)) / 4h²
/// ```
///
/// evaluated separately for each ordered pair `(i, j)`, so the cost is `4n²`
/// evaluations. The result is symmetric up to rounding.
pub fn hessian<T, F>(f: &F, point: &Array1<T>, step: T) -> (Array2<T>, usize)
where
    T: Scalar,
    F: ObjectiveFunction<T>,
{
    let n = point.len();
    let two = T::one() + T::one();
    let four = two + two;
    let denominator = four * (step * step);
    let mut hessian = Array2::zeros((n, n));

    let shifted = |i: usize, di: T, j: usize, dj: T| {
        let mut probe = point.clone();
        probe[i] = probe[i] + di;
        probe[j] = probe[j] + dj;
        f.evaluate(probe.view())
    };

    for i in 0..n {
        for j in 0..n {
            let pp = shifted(i, step, j, step);
            let pm = shifted(i, step, j, -step);
            let mp = shifted(i, -step, j, step);
            let mm = shifted(i, -step, j, -step);
            hessian[[i, j]] = (pp - pm - mp + mm) / denominator;
        }
    }

    (hessian, 4 * n * n)
}
