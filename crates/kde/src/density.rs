//! Kernel density estimation over a grid.

use serde::Serialize;

use crate::kernel::Kernel;

/// One evaluated grid point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DensityPoint {
    /// Grid position.
    pub x: f64,
    /// Smoothed density at `x`.
    pub density: f64,
}

/// A density curve, one point per grid position, in grid order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DensityCurve {
    points: Vec<DensityPoint>,
}

impl DensityCurve {
    /// The evaluated points.
    pub fn points(&self) -> &[DensityPoint] {
        &self.points
    }

    /// Number of grid points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the grid was empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The grid point with the highest density, first one on ties.
    pub fn mode(&self) -> Option<DensityPoint> {
        self.points
            .iter()
            .copied()
            .reduce(|best, p| if p.density > best.density { p } else { best })
    }

    /// Trapezoidal area under the curve.
    ///
    /// The curve is not normalised; this is a diagnostic for how much of the
    /// kernel mass the grid captured.
    pub fn area(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| 0.5 * (w[0].density + w[1].density) * (w[1].x - w[0].x))
            .sum()
    }
}

/// Evaluates `(1/n) * Σ kernel(x - s)` at every grid point `x`.
///
/// An empty sample set yields a zero density at every grid point.
///
/// # Example
///
/// ```
/// use cageside_kde::{Kernel, estimate_density};
///
/// let kernel = Kernel::epanechnikov(0.05);
/// let curve = estimate_density(&[0.5], &[0.4, 0.5, 0.6], |u| kernel.evaluate(u));
/// assert_eq!(curve.points()[0].density, 0.0);
/// assert!(curve.points()[1].density > 0.0);
/// ```
pub fn estimate_density<K>(samples: &[f64], grid: &[f64], kernel: K) -> DensityCurve
where
    K: Fn(f64) -> f64,
{
    let n = samples.len();
    let points = grid
        .iter()
        .map(|&x| {
            let density = if n == 0 {
                0.0
            } else {
                samples.iter().map(|&s| kernel(x - s)).sum::<f64>() / n as f64
            };
            DensityPoint { x, density }
        })
        .collect();
    DensityCurve { points }
}

/// [`estimate_density`] with one of the built-in kernels.
#[tracing::instrument(skip_all, fields(kernel = kernel.name(), n_samples = samples.len(), n_grid = grid.len()))]
pub fn estimate_with(samples: &[f64], grid: &[f64], kernel: Kernel) -> DensityCurve {
    estimate_density(samples, grid, |u| kernel.evaluate(u))
}
