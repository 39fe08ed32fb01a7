use thiserror::Error;

/// Errors raised while validating a run before any iteration happens.
///
/// Numerical trouble inside the loop (singular Hessians, exhausted line
/// searches, skipped quasi-Newton updates) is never reported here; the
/// optimizers recover from it and signal non-success through
/// `OptimizationResult::converged`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("unknown optimization method `{0}` (expected SteepestDescent, Newton or DFP)")]
    UnknownMethod(String),

    #[error("max_iterations must be at least 1")]
    ZeroIterations,

    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("line search shrink factor must lie in (0, 1), got {0}")]
    InvalidShrink(f64),

    #[error("sufficient decrease constant must lie in (0, 1), got {0}")]
    InvalidSufficientDecrease(f64),

    #[error("line search needs at least one trial step")]
    ZeroLineSearchTrials,

    #[error("starting point must have at least one coordinate")]
    EmptyStartingPoint,

    #[error("starting point has {found} coordinates, expected {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Checks that `value` is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::NonPositive { name, value })
    }
}
