use ndarray::ArrayView1;

use super::{CostModel, DesignPoint};
use crate::error::{ensure_positive, Result};
use crate::math::optimization::ObjectiveFunction;

/// Offset added to non-positive dimensions so a zero dimension is still
/// penalized.
const DIMENSION_MARGIN: f64 = 1e-3;

/// Manufacturing cost plus a quadratic penalty on every violated constraint.
///
/// This is the function the optimizers actually minimize. Points are
/// `[diameter, length]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyObjective {
    model: CostModel,
    penalty_factor: f64,
}

impl Default for PenaltyObjective {
    fn default() -> Self {
        Self::new(CostModel::default())
    }
}

impl PenaltyObjective {
    pub const DEFAULT_PENALTY_FACTOR: f64 = 1e7;

    #[must_use]
    pub fn new(model: CostModel) -> Self {
        Self {
            model,
            penalty_factor: Self::DEFAULT_PENALTY_FACTOR,
        }
    }

    /// Replaces the penalty factor.
    ///
    /// # Errors
    ///
    /// Returns an error unless `factor` is finite and positive.
    pub fn with_penalty_factor(mut self, factor: f64) -> Result<Self> {
        ensure_positive("penalty_factor", factor)?;
        self.penalty_factor = factor;
        Ok(self)
    }

    #[must_use]
    pub fn penalty_factor(&self) -> f64 {
        self.penalty_factor
    }

    #[must_use]
    pub fn cost_model(&self) -> &CostModel {
        &self.model
    }

    /// Sum of `k·violation²` over the volume band, the dimension limits and
    /// the positivity of both dimensions. Zero for feasible designs.
    #[must_use]
    pub fn penalty(&self, design: DesignPoint) -> f64 {
        let k = self.penalty_factor;
        let params = self.model.parameters();
        let (min_volume, max_volume) = params.volume_bounds();
        let DesignPoint { diameter, length } = design;
        let volume = self.model.internal_volume(diameter, length);

        let mut penalty = 0.0;
        if volume < min_volume {
            penalty += k * (min_volume - volume).powi(2);
        }
        if volume > max_volume {
            penalty += k * (volume - max_volume).powi(2);
        }
        if length > params.max_length() {
            penalty += k * (length - params.max_length()).powi(2);
        }
        if diameter > params.max_diameter() {
            penalty += k * (diameter - params.max_diameter()).powi(2);
        }
        if diameter <= 0.0 {
            penalty += k * (-diameter + DIMENSION_MARGIN).powi(2);
        }
        if length <= 0.0 {
            penalty += k * (-length + DIMENSION_MARGIN).powi(2);
        }
        penalty
    }

    /// Cost plus penalty at `design`.
    #[must_use]
    pub fn penalized_cost(&self, design: DesignPoint) -> f64 {
        self.model.cost(design.diameter, design.length) + self.penalty(design)
    }
}

impl ObjectiveFunction<f64> for PenaltyObjective {
    /// Penalized cost at `[diameter, length]`, or `+∞` for a point of any
    /// other dimension.
    fn evaluate(&self, point: ArrayView1<'_, f64>) -> f64 {
        match (point.len(), point.get(0), point.get(1)) {
            (2, Some(&diameter), Some(&length)) => {
                self.penalized_cost(DesignPoint::new(diameter, length))
            }
            _ => f64::INFINITY,
        }
    }
}
