//! Single-level HDI computation.

use serde::Serialize;

use crate::error::HdiError;
use crate::samples::SampleSet;

/// A highest-density interval at a given coverage level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HdiInterval {
    coverage: f64,
    lower: f64,
    upper: f64,
}

impl HdiInterval {
    pub(crate) fn new(coverage: f64, lower: f64, upper: f64) -> Self {
        Self {
            coverage,
            lower,
            upper,
        }
    }

    /// The coverage level this interval was computed for.
    pub fn coverage(&self) -> f64 {
        self.coverage
    }

    /// Lower bound (a sample value).
    pub fn lower(&self) -> f64 {
        self.lower
    }

    /// Upper bound (a sample value).
    pub fn upper(&self) -> f64 {
        self.upper
    }

    /// `upper - lower`.
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Returns `true` if `x` lies within the closed interval.
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    /// Returns `true` if `other` lies entirely within this interval.
    pub fn encloses(&self, other: &HdiInterval) -> bool {
        self.lower <= other.lower && other.upper <= self.upper
    }
}

/// Returns the start index of the narrowest window spanning `k + 1`
/// consecutive elements of `sorted`.
///
/// Ties resolve to the earliest window. Requires `k < sorted.len()`.
pub(crate) fn narrowest_window(sorted: &[f64], k: usize) -> usize {
    let mut best = 0;
    let mut best_width = f64::INFINITY;
    for i in 0..sorted.len() - k {
        let width = sorted[i + k] - sorted[i];
        if width < best_width {
            best_width = width;
            best = i;
        }
    }
    best
}

/// Computes the narrowest interval containing `floor(coverage * n) + 1` of
/// the given samples.
///
/// Samples need not be sorted. For several levels over the same samples,
/// build a [`SampleSet`] once and call [`SampleSet::hdi`] or
/// [`compute_hdis`](crate::compute_hdis).
///
/// # Errors
///
/// - [`HdiError::InvalidCoverage`] if `coverage` is outside (0, 1).
/// - [`HdiError::EmptySampleSet`] if `samples` is empty.
/// - [`HdiError::NonFiniteData`] if any sample is NaN or infinite.
///
/// # Example
///
/// ```
/// use cageside_hdi::compute_hdi;
///
/// let samples: Vec<f64> = (1..=10).map(f64::from).collect();
/// let hdi = compute_hdi(&samples, 0.5).unwrap();
/// assert_eq!((hdi.lower(), hdi.upper()), (1.0, 6.0));
/// ```
pub fn compute_hdi(samples: &[f64], coverage: f64) -> Result<HdiInterval, HdiError> {
    crate::config::validate_coverage(coverage)?;
    SampleSet::new(samples)?.hdi(coverage)
}
