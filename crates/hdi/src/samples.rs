//! Sorted, finite posterior sample sets.

use crate::batch::HdiSet;
use crate::error::HdiError;
use crate::interval::{HdiInterval, narrowest_window};

/// An immutable set of posterior draws, stored sorted ascending.
///
/// Sorting happens once at construction, so any number of coverage levels
/// can be evaluated against the same set without re-sorting.
#[derive(Debug, Clone, Default)]
pub struct SampleSet {
    sorted: Vec<f64>,
}

impl SampleSet {
    /// Builds a sample set from a flat slice of draws.
    ///
    /// # Errors
    ///
    /// Returns [`HdiError::NonFiniteData`] if any draw is NaN or infinite.
    pub fn new(samples: &[f64]) -> Result<Self, HdiError> {
        Self::from_vec(samples.to_vec())
    }

    /// Builds a sample set from nested draws (e.g. chains × draws), flattening
    /// rows in order.
    ///
    /// # Errors
    ///
    /// Returns [`HdiError::NonFiniteData`] with the index in the flattened
    /// sequence if any draw is NaN or infinite.
    pub fn from_nested<I, R>(rows: I) -> Result<Self, HdiError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[f64]>,
    {
        let mut flat = Vec::new();
        for row in rows {
            flat.extend_from_slice(row.as_ref());
        }
        Self::from_vec(flat)
    }

    fn from_vec(mut samples: Vec<f64>) -> Result<Self, HdiError> {
        if let Some(index) = cageside_stats::first_non_finite(&samples) {
            return Err(HdiError::NonFiniteData {
                index,
                value: samples[index],
            });
        }
        cageside_stats::sort_ascending(&mut samples);
        Ok(Self { sorted: samples })
    }

    /// Number of draws.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Returns `true` if there are no draws.
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// The draws, sorted ascending.
    pub fn sorted(&self) -> &[f64] {
        &self.sorted
    }

    /// Computes the highest-density interval at one coverage level.
    ///
    /// # Errors
    ///
    /// - [`HdiError::InvalidCoverage`] if `coverage` is outside (0, 1), or if
    ///   the window would need more samples than the set holds.
    /// - [`HdiError::EmptySampleSet`] if the set is empty.
    pub fn hdi(&self, coverage: f64) -> Result<HdiInterval, HdiError> {
        crate::config::validate_coverage(coverage)?;
        let n = self.sorted.len();
        if n == 0 {
            return Err(HdiError::EmptySampleSet);
        }
        let k = (coverage * n as f64).floor() as usize;
        if k >= n {
            return Err(HdiError::InvalidCoverage {
                coverage,
                reason: format!("window of {} samples exceeds the {n} available", k + 1),
            });
        }
        let start = narrowest_window(&self.sorted, k);
        Ok(HdiInterval::new(
            coverage,
            self.sorted[start],
            self.sorted[start + k],
        ))
    }

    /// Computes intervals for several coverage levels using the shared sort.
    ///
    /// An empty set yields an empty [`HdiSet`] once the levels have been
    /// validated, so charts can render a "no data yet" state.
    ///
    /// # Errors
    ///
    /// Returns [`HdiError::InvalidCoverage`] for any rejected level.
    pub fn hdis(&self, levels: &[f64]) -> Result<HdiSet, HdiError> {
        let mut levels = levels.to_vec();
        for &p in &levels {
            crate::config::validate_coverage(p)?;
        }
        cageside_stats::sort_ascending(&mut levels);
        levels.dedup();

        if self.is_empty() {
            return Ok(HdiSet::default());
        }
        let intervals = levels
            .iter()
            .map(|&p| self.hdi(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(HdiSet::from_sorted(intervals))
    }
}
