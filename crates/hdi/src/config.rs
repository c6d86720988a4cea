//! Configuration for HDI summaries.

use crate::error::HdiError;

/// Coverage levels drawn on the posterior charts.
pub const DEFAULT_COVERAGE_LEVELS: [f64; 4] = [0.5, 0.75, 0.9, 0.95];

/// Configuration for a batch of HDI computations.
///
/// # Example
///
/// ```
/// use cageside_hdi::HdiConfig;
///
/// let config = HdiConfig::new().with_coverage_levels(vec![0.8, 0.95]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct HdiConfig {
    coverage_levels: Vec<f64>,
}

impl HdiConfig {
    /// Creates a new configuration with the default levels 0.5, 0.75, 0.9, 0.95.
    pub fn new() -> Self {
        Self {
            coverage_levels: DEFAULT_COVERAGE_LEVELS.to_vec(),
        }
    }

    /// Replaces the coverage levels.
    pub fn with_coverage_levels(mut self, levels: Vec<f64>) -> Self {
        self.coverage_levels = levels;
        self
    }

    /// Returns the coverage levels in the order they were supplied.
    pub fn coverage_levels(&self) -> &[f64] {
        &self.coverage_levels
    }

    /// Validates this configuration.
    ///
    /// At least one level is required and every level must lie in (0, 1).
    pub fn validate(&self) -> Result<(), HdiError> {
        if self.coverage_levels.is_empty() {
            return Err(HdiError::InvalidCoverage {
                coverage: f64::NAN,
                reason: "at least one coverage level is required".to_string(),
            });
        }
        self.coverage_levels
            .iter()
            .try_for_each(|&p| validate_coverage(p))
    }
}

impl Default for HdiConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks that a coverage level is finite and strictly inside (0, 1).
pub(crate) fn validate_coverage(coverage: f64) -> Result<(), HdiError> {
    if !coverage.is_finite() || coverage <= 0.0 || coverage >= 1.0 {
        return Err(HdiError::InvalidCoverage {
            coverage,
            reason: "must be in (0, 1)".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = HdiConfig::new();
        assert_eq!(cfg.coverage_levels(), &[0.5, 0.75, 0.9, 0.95]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_rejects_bounds() {
        for bad in [0.0, 1.0, -0.2, 1.2, f64::NAN, f64::INFINITY] {
            let cfg = HdiConfig::new().with_coverage_levels(vec![0.5, bad]);
            assert!(
                matches!(cfg.validate(), Err(HdiError::InvalidCoverage { .. })),
                "coverage {bad} should be rejected"
            );
        }
    }

    #[test]
    fn validate_rejects_empty() {
        let cfg = HdiConfig::new().with_coverage_levels(Vec::new());
        assert!(cfg.validate().is_err());
    }
}
