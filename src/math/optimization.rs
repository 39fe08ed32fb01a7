//! Unconstrained minimization with numerically estimated derivatives.
//!
//! Every optimizer in this module runs the same loop: estimate the gradient by
//! central differences, pick a search direction, run a backtracking line
//! search along it, and stop once the gradient norm drops below the
//! tolerance or the iteration budget runs out. The methods only differ in the
//! [`SearchDirection`] they plug into that loop:
//!
//! - [`gradient_descent`]: the negative gradient
//! - [`newton`]: a regularized Newton step from a finite-difference Hessian
//! - [`dfp`]: a Davidon–Fletcher–Powell quasi-Newton step

pub mod dfp;
mod driver;
pub mod finite_difference;
pub mod gradient_descent;
pub mod line_search;
pub mod newton;

use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use ndarray::{Array1, ArrayView1, LinalgScalar, ScalarOperand};
use num_traits::Float;

use crate::error::{ensure_positive, Error, Result};

pub use dfp::minimize as dfp_minimize;
pub use gradient_descent::minimize as gradient_descent_minimize;
pub use line_search::{LineSearchConfig, LineSearchOutcome};
pub use newton::minimize as newton_minimize;

/// Floating point types the optimizers can work with.
pub trait Scalar: Float + LinalgScalar + ScalarOperand + Debug + Display {}

impl<T> Scalar for T where T: Float + LinalgScalar + ScalarOperand + Debug + Display {}

/// Converts an `f64` literal into `T`.
pub(crate) fn constant<T: Scalar>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

pub(crate) fn to_f64<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Euclidean norm of a vector.
pub(crate) fn norm<T: Scalar>(v: &Array1<T>) -> T {
    v.dot(v).sqrt()
}

/// A trait for objective functions that can be optimized.
///
/// Only values are required; derivatives are always estimated numerically.
pub trait ObjectiveFunction<T>
where
    T: Scalar,
{
    /// Evaluates the objective function at the given point.
    fn evaluate(&self, point: ArrayView1<'_, T>) -> T;
}

/// Chooses the direction each iteration moves along.
pub trait SearchDirection<T>
where
    T: Scalar,
{
    /// Returns a search direction at `point` together with the number of
    /// objective evaluations spent computing it.
    fn direction<F>(
        &mut self,
        f: &F,
        point: &Array1<T>,
        gradient: &Array1<T>,
        config: &OptimizationConfig<T>,
    ) -> (Array1<T>, usize)
    where
        F: ObjectiveFunction<T>;

    /// Called after every accepted step with `s = x' - x` and `y = g' - g`.
    fn observe(&mut self, _step: &Array1<T>, _gradient_change: &Array1<T>) {}
}

/// The three supported optimization methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    SteepestDescent,
    Newton,
    Dfp,
}

impl Method {
    /// All methods, in the order [`compare`] runs them.
    pub const ALL: [Method; 3] = [Method::SteepestDescent, Method::Newton, Method::Dfp];

    /// Canonical name, used as the result tag.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::SteepestDescent => "SteepestDescent",
            Method::Newton => "Newton",
            Method::Dfp => "DFP",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Method {
    type Err = Error;

    /// Parses a method name. Case, spaces, `-` and `_` are ignored, so
    /// `"Steepest Descent"` and `"steepest_descent"` both work.
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "steepestdescent" => Ok(Method::SteepestDescent),
            "newton" => Ok(Method::Newton),
            "dfp" => Ok(Method::Dfp),
            _ => Err(Error::UnknownMethod(s.to_string())),
        }
    }
}

/// Configuration options for optimization algorithms.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationConfig<T>
where
    T: Scalar,
{
    /// Maximum number of iterations
    pub max_iterations: usize,
    /// Convergence tolerance on the gradient norm
    pub tolerance: T,
    /// Finite-difference step for gradients
    pub gradient_step: T,
    /// Finite-difference step for Hessians
    pub hessian_step: T,
    /// Backtracking line search settings
    pub line_search: LineSearchConfig<T>,
}

impl<T> Default for OptimizationConfig<T>
where
    T: Scalar,
{
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: constant(1e-6),
            gradient_step: constant(1e-6),
            hessian_step: constant(1e-5),
            line_search: LineSearchConfig::default(),
        }
    }
}

impl<T> OptimizationConfig<T>
where
    T: Scalar,
{
    /// Checks every setting before a run starts.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_iterations` is zero, if a tolerance or step is
    /// not finite and positive, or if the line search settings are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 {
            return Err(Error::ZeroIterations);
        }
        ensure_positive("tolerance", to_f64(self.tolerance))?;
        ensure_positive("gradient_step", to_f64(self.gradient_step))?;
        ensure_positive("hessian_step", to_f64(self.hessian_step))?;
        self.line_search.validate()
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The gradient norm fell below the tolerance.
    Converged,

    /// The iteration budget ran out first.
    MaxIterations,
}

/// Result of an optimization process.
///
/// `x_history`, `f_history` and `gradient_norms` are parallel: entry `k` of
/// each describes the same iterate, so all three hold `iterations + 1`
/// entries.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult<T>
where
    T: Scalar,
{
    /// Method that produced this result
    pub method: Method,
    /// Every iterate, starting with the initial point
    pub x_history: Vec<Array1<T>>,
    /// Objective value at each iterate
    pub f_history: Vec<T>,
    /// Gradient norm at each iterate
    pub gradient_norms: Vec<T>,
    /// Number of iterations performed
    pub iterations: usize,
    /// Total objective evaluations, including finite differences
    pub function_evaluations: usize,
    /// The optimal point found
    pub optimal_point: Array1<T>,
    /// The value of the objective function at the optimal point
    pub optimal_value: T,
    /// Whether the optimization converged
    pub converged: bool,
    /// Why the run stopped
    pub status: Status,
}

impl<T> OptimizationResult<T>
where
    T: Scalar,
{
    /// Gradient norm at the optimal point.
    #[must_use]
    pub fn final_gradient_norm(&self) -> T {
        self.gradient_norms.last().copied().unwrap_or_else(T::nan)
    }
}

/// Minimizes `f` from `initial_point` with the given method.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the starting point is
/// empty.
pub fn minimize<T, F>(
    method: Method,
    f: &F,
    initial_point: &[T],
    config: &OptimizationConfig<T>,
) -> Result<OptimizationResult<T>>
where
    T: Scalar,
    F: ObjectiveFunction<T>,
{
    match method {
        Method::SteepestDescent => gradient_descent::minimize(f, initial_point, config),
        Method::Newton => newton::minimize(f, initial_point, config),
        Method::Dfp => dfp::minimize(f, initial_point, config),
    }
}

/// Runs every method from the same starting point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the starting point is
/// empty.
pub fn compare<T, F>(
    f: &F,
    initial_point: &[T],
    config: &OptimizationConfig<T>,
) -> Result<Vec<OptimizationResult<T>>>
where
    T: Scalar,
    F: ObjectiveFunction<T>,
{
    Method::ALL
        .iter()
        .map(|&method| minimize(method, f, initial_point, config))
        .collect()
}
