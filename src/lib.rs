//! Minimum-cost cylindrical pressure tank design.
//!
//! [`math::optimization`] holds a generic unconstrained minimizer with three
//! direction strategies (steepest descent, Newton and DFP) sharing one
//! finite-difference and line search layer. [`tank`] models the tank problem
//! on top of it.

pub mod error;
pub mod math;
pub mod tank;

pub use error::{Error, Result};
pub use math::optimization::{
    Method, ObjectiveFunction, OptimizationConfig, OptimizationResult, Status,
};
pub use tank::{DesignPoint, Parameters, TankProblem};
