//! Configuration for density curves.

use crate::density::{DensityCurve, estimate_with};
use crate::error::KdeError;
use crate::grid::GridSpec;
use crate::kernel::Kernel;

/// Kernel and grid for a density curve.
///
/// # Example
///
/// ```
/// use cageside_kde::{GridSpec, KdeConfig, Kernel};
///
/// let config = KdeConfig::new()
///     .with_kernel(Kernel::gaussian(0.05))
///     .with_grid(GridSpec::Ticks { start: 0.0, stop: 1.0, count: 100 });
///
/// let curve = config.estimate(&[0.42, 0.47, 0.51]).unwrap();
/// assert_eq!(curve.len(), 101);
/// ```
#[derive(Clone, Debug, Default)]
pub struct KdeConfig {
    kernel: Kernel,
    grid: GridSpec,
}

impl KdeConfig {
    /// Creates a configuration with defaults: Epanechnikov kernel with
    /// bandwidth 0.05 over `0..1` in steps of `0.01`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the kernel.
    pub fn with_kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Sets the grid specification.
    pub fn with_grid(mut self, grid: GridSpec) -> Self {
        self.grid = grid;
        self
    }

    /// Returns the kernel.
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Returns the grid specification.
    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    /// Validates the kernel bandwidth and that the grid can be built.
    pub fn validate(&self) -> Result<(), KdeError> {
        self.kernel.validate()?;
        self.grid.resolve().map(|_| ())
    }

    /// Builds the grid and evaluates the density of `samples` over it.
    ///
    /// # Errors
    ///
    /// Returns [`KdeError`] if the kernel or grid is invalid.
    pub fn estimate(&self, samples: &[f64]) -> Result<DensityCurve, KdeError> {
        self.kernel.validate()?;
        let grid = self.grid.resolve()?;
        Ok(estimate_with(samples, &grid, self.kernel))
    }
}
