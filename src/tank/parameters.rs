use crate::error::{ensure_positive, Result};

/// Physical and economic constants of the tank design problem.
///
/// All values are finite and strictly positive; [`Parameters::new`] enforces
/// this and the fields cannot be changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    volume: f64,
    wall_thickness: f64,
    density: f64,
    max_length: f64,
    max_diameter: f64,
    material_cost: f64,
    weld_cost: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            volume: 0.8,
            wall_thickness: 0.03,
            density: 8000.0,
            max_length: 2.0,
            max_diameter: 1.0,
            material_cost: 4.5,
            weld_cost: 20.0,
        }
    }
}

impl Parameters {
    /// Creates a validated parameter set.
    ///
    /// # Arguments
    ///
    /// * `volume` - Required internal volume `V0` (m³)
    /// * `wall_thickness` - Wall and end plate thickness `t` (m)
    /// * `density` - Material density `rho` (kg/m³)
    /// * `max_length` - Largest admissible length `Lmax` (m)
    /// * `max_diameter` - Largest admissible diameter `Dmax` (m)
    /// * `material_cost` - Material cost `cm` ($/kg)
    /// * `weld_cost` - Welding cost `cw` ($/m)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonPositive`](crate::Error::NonPositive) naming the
    /// first value that is not finite and positive.
    pub fn new(
        volume: f64,
        wall_thickness: f64,
        density: f64,
        max_length: f64,
        max_diameter: f64,
        material_cost: f64,
        weld_cost: f64,
    ) -> Result<Self> {
        ensure_positive("volume", volume)?;
        ensure_positive("wall_thickness", wall_thickness)?;
        ensure_positive("density", density)?;
        ensure_positive("max_length", max_length)?;
        ensure_positive("max_diameter", max_diameter)?;
        ensure_positive("material_cost", material_cost)?;
        ensure_positive("weld_cost", weld_cost)?;

        Ok(Self {
            volume,
            wall_thickness,
            density,
            max_length,
            max_diameter,
            material_cost,
            weld_cost,
        })
    }

    #[must_use]
    pub fn volume(&self) -> f64 {
        self.volume
    }

    #[must_use]
    pub fn wall_thickness(&self) -> f64 {
        self.wall_thickness
    }

    #[must_use]
    pub fn density(&self) -> f64 {
        self.density
    }

    #[must_use]
    pub fn max_length(&self) -> f64 {
        self.max_length
    }

    #[must_use]
    pub fn max_diameter(&self) -> f64 {
        self.max_diameter
    }

    #[must_use]
    pub fn material_cost(&self) -> f64 {
        self.material_cost
    }

    #[must_use]
    pub fn weld_cost(&self) -> f64 {
        self.weld_cost
    }

    /// Admissible internal volume range, ±10% around the target.
    #[must_use]
    pub fn volume_bounds(&self) -> (f64, f64) {
        (0.9 * self.volume, 1.1 * self.volume)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_defaults() {
        let p = Parameters::default();
        assert_eq!(p.volume(), 0.8);
        assert_eq!(p.wall_thickness(), 0.03);
        assert_eq!(p.density(), 8000.0);
        assert_eq!(p.max_length(), 2.0);
        assert_eq!(p.max_diameter(), 1.0);
        assert_eq!(p.material_cost(), 4.5);
        assert_eq!(p.weld_cost(), 20.0);
        assert_eq!(
            Parameters::new(0.8, 0.03, 8000.0, 2.0, 1.0, 4.5, 20.0),
            Ok(p)
        );
    }

    #[test]
    fn test_volume_bounds() {
        let (lower, upper) = Parameters::default().volume_bounds();
        assert_eq!(lower, 0.9 * 0.8);
        assert_eq!(upper, 1.1 * 0.8);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert_eq!(
            Parameters::new(0.8, 0.0, 8000.0, 2.0, 1.0, 4.5, 20.0),
            Err(Error::NonPositive {
                name: "wall_thickness",
                value: 0.0
            })
        );
        assert_eq!(
            Parameters::new(0.8, 0.03, 8000.0, 2.0, -1.0, 4.5, 20.0),
            Err(Error::NonPositive {
                name: "max_diameter",
                value: -1.0
            })
        );
        assert!(Parameters::new(f64::INFINITY, 0.03, 8000.0, 2.0, 1.0, 4.5, 20.0).is_err());
        assert!(Parameters::new(0.8, 0.03, 8000.0, 2.0, 1.0, 4.5, f64::NAN).is_err());
    }
}
