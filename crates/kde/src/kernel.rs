//! Smoothing kernels.

use std::f64::consts::PI;

use crate::error::KdeError;

/// Bandwidth used by the posterior charts for both kernel shapes.
pub const DEFAULT_BANDWIDTH: f64 = 0.05;

/// Kernel shape and its fixed bandwidth.
///
/// | Shape | `K(u)` |
/// |-------|--------|
/// | Epanechnikov | `0.75 (1 - (u/h)²) / h` for `|u| <= h`, else 0 |
/// | Gaussian | `exp(-u² / 2σ²) / (σ √(2π))` |
///
/// The bandwidth is a fixed caller-supplied constant; no automatic selection
/// is performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kernel {
    /// Quadratic kernel with compact support `[-h, h]`.
    Epanechnikov {
        /// Half-width of the support.
        bandwidth: f64,
    },
    /// Normal kernel.
    Gaussian {
        /// Standard deviation.
        sigma: f64,
    },
}

impl Kernel {
    /// Epanechnikov kernel with half-width `bandwidth`.
    pub fn epanechnikov(bandwidth: f64) -> Self {
        Self::Epanechnikov { bandwidth }
    }

    /// Gaussian kernel with standard deviation `sigma`.
    pub fn gaussian(sigma: f64) -> Self {
        Self::Gaussian { sigma }
    }

    /// The bandwidth (Epanechnikov) or sigma (Gaussian).
    pub fn bandwidth(&self) -> f64 {
        match *self {
            Self::Epanechnikov { bandwidth } => bandwidth,
            Self::Gaussian { sigma } => sigma,
        }
    }

    /// Short lowercase name, as used in config files and reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Epanechnikov { .. } => "epanechnikov",
            Self::Gaussian { .. } => "gaussian",
        }
    }

    /// Checks that the bandwidth is finite and positive.
    pub fn validate(&self) -> Result<(), KdeError> {
        let value = self.bandwidth();
        if !value.is_finite() || value <= 0.0 {
            return Err(KdeError::InvalidBandwidth { value });
        }
        Ok(())
    }

    /// Evaluates the kernel at offset `u`. Always non-negative.
    pub fn evaluate(&self, u: f64) -> f64 {
        match *self {
            Self::Epanechnikov { bandwidth } => {
                let v = u / bandwidth;
                if v.abs() <= 1.0 {
                    0.75 * (1.0 - v * v) / bandwidth
                } else {
                    0.0
                }
            }
            Self::Gaussian { sigma } => {
                (-(u * u) / (2.0 * sigma * sigma)).exp() / (sigma * (2.0 * PI).sqrt())
            }
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::epanechnikov(DEFAULT_BANDWIDTH)
    }
}
