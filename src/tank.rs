//! Minimum-cost design of a cylindrical pressure tank.
//!
//! A tank of diameter `D` and length `L` is rolled from plate of thickness
//! `t` and closed by two flat end plates welded on both sides. Its cost is
//! the material cost of the shell plus the welding cost of the seams. The
//! internal volume must stay within ±10% of a target and both dimensions are
//! capped. Constraints are folded into the objective as a quadratic penalty
//! (see [`PenaltyObjective`]), which turns the problem into an unconstrained
//! one for the optimizers in [`crate::math::optimization`].
//!
//! # Examples
//!
//! ```
//! use tankopt::math::optimization::{Method, OptimizationConfig};
//! use tankopt::tank::{DesignPoint, TankProblem};
//!
//! let problem = TankProblem::default();
//! let config = OptimizationConfig::default();
//! let result = problem
//!     .optimize(Method::Newton, DesignPoint::new(0.5, 1.0), &config)
//!     .unwrap();
//! assert!(result.converged);
//! let best = DesignPoint::try_from(&result.optimal_point).unwrap();
//! assert!(problem.cost_model().internal_volume(best.diameter, best.length) > 0.71);
//! ```

mod cost;
pub mod landscape;
mod parameters;
mod penalty;
pub mod report;

#[cfg(test)]
mod tests;

use ndarray::Array1;

use crate::error::{Error, Result};
use crate::math::optimization::{self, Method, OptimizationConfig, OptimizationResult};

pub use cost::{ConstraintReport, CostModel};
pub use parameters::Parameters;
pub use penalty::PenaltyObjective;
pub use report::Summary;

/// Tank dimensions in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignPoint {
    pub diameter: f64,
    pub length: f64,
}

impl DesignPoint {
    #[must_use]
    pub fn new(diameter: f64, length: f64) -> Self {
        Self { diameter, length }
    }

    /// The `[diameter, length]` vector the optimizers work on.
    #[must_use]
    pub fn to_array(self) -> Array1<f64> {
        Array1::from(vec![self.diameter, self.length])
    }

    /// Reads a design back from an optimizer vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] unless `values` has exactly two
    /// entries.
    pub fn from_slice(values: &[f64]) -> Result<Self> {
        match values {
            [diameter, length] => Ok(Self::new(*diameter, *length)),
            _ => Err(Error::DimensionMismatch {
                expected: 2,
                found: values.len(),
            }),
        }
    }
}

impl From<DesignPoint> for Array1<f64> {
    fn from(design: DesignPoint) -> Self {
        design.to_array()
    }
}

impl TryFrom<&Array1<f64>> for DesignPoint {
    type Error = Error;

    fn try_from(values: &Array1<f64>) -> Result<Self> {
        Self::from_slice(&values.to_vec())
    }
}

/// The tank problem: parameters, cost model and penalized objective.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TankProblem {
    objective: PenaltyObjective,
}

impl TankProblem {
    #[must_use]
    pub fn new(params: Parameters) -> Self {
        Self {
            objective: PenaltyObjective::new(CostModel::new(params)),
        }
    }

    /// Uses a custom penalty factor instead of the default `1e7`.
    ///
    /// # Errors
    ///
    /// Returns an error unless `factor` is finite and positive.
    pub fn with_penalty_factor(self, factor: f64) -> Result<Self> {
        Ok(Self {
            objective: self.objective.with_penalty_factor(factor)?,
        })
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        self.objective.cost_model().parameters()
    }

    #[must_use]
    pub fn cost_model(&self) -> &CostModel {
        self.objective.cost_model()
    }

    #[must_use]
    pub fn objective(&self) -> &PenaltyObjective {
        &self.objective
    }

    /// Minimizes the penalized cost from `start` with one method.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn optimize(
        &self,
        method: Method,
        start: DesignPoint,
        config: &OptimizationConfig<f64>,
    ) -> Result<OptimizationResult<f64>> {
        optimization::minimize(
            method,
            &self.objective,
            &[start.diameter, start.length],
            config,
        )
    }

    /// Like [`TankProblem::optimize`], with the method given by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMethod`] for an unrecognized name, or an error
    /// if `config` is invalid.
    pub fn optimize_named(
        &self,
        method: &str,
        start: DesignPoint,
        config: &OptimizationConfig<f64>,
    ) -> Result<OptimizationResult<f64>> {
        self.optimize(method.parse()?, start, config)
    }

    /// Runs every method from `start`, in [`Method::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn compare(
        &self,
        start: DesignPoint,
        config: &OptimizationConfig<f64>,
    ) -> Result<Vec<OptimizationResult<f64>>> {
        optimization::compare(&self.objective, &[start.diameter, start.length], config)
    }

    /// Builds the printable summary of a finished run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the result does not hold a
    /// two-dimensional design.
    pub fn summarize(&self, result: &OptimizationResult<f64>) -> Result<Summary> {
        Summary::new(self.cost_model(), result)
    }
}
