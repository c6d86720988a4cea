//! Multi-level HDI computation and nesting diagnostics.

use serde::Serialize;
use tracing::warn;

use crate::error::HdiError;
use crate::interval::HdiInterval;
use crate::samples::SampleSet;

/// Intervals for several coverage levels over one sample set, ordered by
/// ascending coverage.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HdiSet {
    intervals: Vec<HdiInterval>,
}

/// A pair of levels whose intervals break the expected nesting.
///
/// For `narrow < wide`, the narrow interval is expected to sit inside the
/// wide one and to be no wider. Sample sets with several separated modes can
/// violate this; the violation is reported, never corrected.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NestingViolation {
    /// The lower coverage level.
    pub narrow: f64,
    /// The higher coverage level.
    pub wide: f64,
    /// `true` if the narrow interval sticks out of the wide one.
    pub escapes: bool,
    /// `true` if the wide interval is strictly narrower than the narrow one.
    pub shrinks: bool,
}

impl HdiSet {
    pub(crate) fn from_sorted(intervals: Vec<HdiInterval>) -> Self {
        Self { intervals }
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if no intervals were computed (empty sample set).
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Iterates over intervals in ascending coverage order.
    pub fn iter(&self) -> impl Iterator<Item = &HdiInterval> {
        self.intervals.iter()
    }

    /// Looks up the interval for a coverage level (exact match within 1e-12).
    pub fn get(&self, coverage: f64) -> Option<&HdiInterval> {
        self.intervals
            .iter()
            .find(|iv| (iv.coverage() - coverage).abs() < 1e-12)
    }

    /// Lists every pair of levels whose intervals are not nested or whose
    /// widths do not grow with coverage.
    pub fn nesting_violations(&self) -> Vec<NestingViolation> {
        let mut out = Vec::new();
        for (i, narrow) in self.intervals.iter().enumerate() {
            for wide in &self.intervals[i + 1..] {
                let escapes = !wide.encloses(narrow);
                let shrinks = wide.width() < narrow.width();
                if escapes || shrinks {
                    out.push(NestingViolation {
                        narrow: narrow.coverage(),
                        wide: wide.coverage(),
                        escapes,
                        shrinks,
                    });
                }
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a HdiSet {
    type Item = &'a HdiInterval;
    type IntoIter = std::slice::Iter<'a, HdiInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}

/// Computes HDIs for every coverage level in `levels`, sorting `samples` once.
///
/// Levels are de-duplicated and returned in ascending order. An empty sample
/// slice yields an empty [`HdiSet`].
///
/// # Errors
///
/// - [`HdiError::InvalidCoverage`] if any level is outside (0, 1).
/// - [`HdiError::NonFiniteData`] if any sample is NaN or infinite.
///
/// # Example
///
/// ```
/// use cageside_hdi::compute_hdis;
///
/// let samples = [0.41, 0.44, 0.47, 0.52, 0.55, 0.58, 0.61, 0.72];
/// let set = compute_hdis(&samples, &[0.5, 0.95]).unwrap();
/// assert_eq!(set.len(), 2);
/// assert!(set.nesting_violations().is_empty());
/// ```
#[tracing::instrument(skip(samples), fields(n_samples = samples.len()))]
pub fn compute_hdis(samples: &[f64], levels: &[f64]) -> Result<HdiSet, HdiError> {
    compute_set_hdis(&SampleSet::new(samples)?, levels)
}

/// Like [`compute_hdis`], for draws that are already held in a
/// [`SampleSet`]. The existing sort is reused and nesting violations are
/// logged as warnings.
///
/// # Errors
///
/// Returns [`HdiError::InvalidCoverage`] if any level is outside (0, 1).
#[tracing::instrument(skip(samples), fields(n_samples = samples.len()))]
pub fn compute_set_hdis(samples: &SampleSet, levels: &[f64]) -> Result<HdiSet, HdiError> {
    let set = samples.hdis(levels)?;
    for v in set.nesting_violations() {
        warn!(
            narrow = v.narrow,
            wide = v.wide,
            escapes = v.escapes,
            shrinks = v.shrinks,
            "HDI levels are not nested"
        );
    }
    Ok(set)
}
