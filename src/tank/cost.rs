use std::f64::consts::PI;

use super::{DesignPoint, Parameters};

/// Manufacturing cost and constraint quantities of a tank design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    params: Parameters,
}

/// Constraint quantities evaluated at one design.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintReport {
    pub volume: f64,
    pub min_volume: f64,
    pub max_volume: f64,
    pub diameter: f64,
    pub max_diameter: f64,
    pub length: f64,
    pub max_length: f64,
}

impl ConstraintReport {
    #[must_use]
    pub fn volume_ok(&self) -> bool {
        self.min_volume <= self.volume && self.volume <= self.max_volume
    }

    #[must_use]
    pub fn diameter_ok(&self) -> bool {
        self.diameter <= self.max_diameter
    }

    #[must_use]
    pub fn length_ok(&self) -> bool {
        self.length <= self.max_length
    }

    #[must_use]
    pub fn is_feasible(&self) -> bool {
        self.volume_ok() && self.diameter_ok() && self.length_ok()
    }
}

impl Default for CostModel {
    fn default() -> Self {
        Self::new(Parameters::default())
    }
}

impl CostModel {
    #[must_use]
    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// Shell mass: the cylindrical wall plus two end plates.
    #[must_use]
    pub fn mass(&self, diameter: f64, length: f64) -> f64 {
        let t = self.params.wall_thickness();
        let inner = diameter / 2.0;
        let outer = inner + t;
        let wall = length * PI * (outer.powi(2) - inner.powi(2));
        let plates = 2.0 * PI * outer.powi(2) * t;
        self.params.density() * (wall + plates)
    }

    /// Weld length: inner and outer seams on both end plates.
    #[must_use]
    pub fn weld_length(&self, diameter: f64) -> f64 {
        4.0 * PI * (diameter + self.params.wall_thickness())
    }

    /// Material plus welding cost, or `+∞` for non-positive dimensions.
    #[must_use]
    pub fn cost(&self, diameter: f64, length: f64) -> f64 {
        if diameter <= 0.0 || length <= 0.0 {
            return f64::INFINITY;
        }
        self.params.material_cost() * self.mass(diameter, length)
            + self.params.weld_cost() * self.weld_length(diameter)
    }

    #[must_use]
    pub fn internal_volume(&self, diameter: f64, length: f64) -> f64 {
        PI * diameter.powi(2) * length / 4.0
    }

    #[must_use]
    pub fn constraints(&self, design: DesignPoint) -> ConstraintReport {
        let (min_volume, max_volume) = self.params.volume_bounds();
        ConstraintReport {
            volume: self.internal_volume(design.diameter, design.length),
            min_volume,
            max_volume,
            diameter: design.diameter,
            max_diameter: self.params.max_diameter(),
            length: design.length,
            max_length: self.params.max_length(),
        }
    }

    #[must_use]
    pub fn is_feasible(&self, diameter: f64, length: f64) -> bool {
        self.constraints(DesignPoint::new(diameter, length))
            .is_feasible()
    }
}
