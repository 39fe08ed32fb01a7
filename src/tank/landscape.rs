//! Sampled views of the tank cost function for plotting.
//!
//! Nothing here feeds back into the optimizers; these are the arrays a
//! presentation layer needs to draw cost contours, the feasible region and
//! optimizer trajectories on the same axes.

use std::f64::consts::PI;

use ndarray::{Array1, Array2};

use super::{CostModel, DesignPoint, Parameters};

/// Rectangular sampling grid over `(D, L)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub diameter_range: (f64, f64),
    pub length_range: (f64, f64),
    pub resolution: usize,
}

impl Grid {
    /// 80×80 samples over `[0.1, 1.1·Dmax] × [0.1, 1.1·Lmax]`.
    #[must_use]
    pub fn around(params: &Parameters) -> Self {
        Self {
            diameter_range: (0.1, 1.1 * params.max_diameter()),
            length_range: (0.1, 1.1 * params.max_length()),
            resolution: 80,
        }
    }
}

/// Raw cost sampled on a [`Grid`]; `costs[[i, j]]` is the cost at
/// `(diameters[i], lengths[j])`.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSurface {
    pub diameters: Array1<f64>,
    pub lengths: Array1<f64>,
    pub costs: Array2<f64>,
}

impl CostSurface {
    #[must_use]
    pub fn sample(model: &CostModel, grid: &Grid) -> Self {
        let (d0, d1) = grid.diameter_range;
        let (l0, l1) = grid.length_range;
        let diameters = Array1::linspace(d0, d1, grid.resolution);
        let lengths = Array1::linspace(l0, l1, grid.resolution);
        let costs = Array2::from_shape_fn((diameters.len(), lengths.len()), |(i, j)| {
            model.cost(diameters[i], lengths[j])
        });

        Self {
            diameters,
            lengths,
            costs,
        }
    }

    /// Cheapest grid point that satisfies every constraint.
    #[must_use]
    pub fn cheapest_feasible(&self, model: &CostModel) -> Option<(DesignPoint, f64)> {
        self.costs
            .indexed_iter()
            .map(|((i, j), &cost)| (DesignPoint::new(self.diameters[i], self.lengths[j]), cost))
            .filter(|(design, cost)| {
                cost.is_finite() && model.is_feasible(design.diameter, design.length)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// `count` contour levels spaced logarithmically from `10^3.5` to `10^5`.
#[must_use]
pub fn contour_levels(count: usize) -> Array1<f64> {
    Array1::logspace(10.0, 3.5, 5.0, count)
}

/// Lengths that keep the volume inside its band, per diameter.
///
/// Both bounds are clipped to `[0, Lmax]`, so where the band lies entirely
/// above `Lmax` the two curves meet.
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibleBand {
    pub diameters: Array1<f64>,
    pub min_lengths: Array1<f64>,
    pub max_lengths: Array1<f64>,
}

impl FeasibleBand {
    /// Samples `D ∈ [0.1, Dmax]` at `samples` points.
    #[must_use]
    pub fn new(params: &Parameters, samples: usize) -> Self {
        let diameters = Array1::linspace(0.1, params.max_diameter(), samples);
        let (min_volume, max_volume) = params.volume_bounds();
        let max_length = params.max_length();
        let bound = |volume: f64| {
            diameters.mapv(|d| (volume / (PI * d.powi(2) / 4.0)).clamp(0.0, max_length))
        };
        let min_lengths = bound(min_volume);
        let max_lengths = bound(max_volume);

        Self {
            diameters,
            min_lengths,
            max_lengths,
        }
    }

    /// Diameters where some admissible length exists.
    pub fn open_diameters(&self) -> impl Iterator<Item = f64> + '_ {
        self.diameters
            .iter()
            .zip(self.min_lengths.iter().zip(self.max_lengths.iter()))
            .filter(|(_, (lo, hi))| lo < hi)
            .map(|(&d, _)| d)
    }
}

impl Default for FeasibleBand {
    fn default() -> Self {
        Self::new(&Parameters::default(), 200)
    }
}
