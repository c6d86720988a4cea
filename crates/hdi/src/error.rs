//! Error types for the cageside-hdi crate.

/// Error type for all fallible operations in the cageside-hdi crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HdiError {
    /// Returned when a coverage level cannot be honoured for the sample set.
    ///
    /// Covers both levels outside the open interval (0, 1) and levels whose
    /// window would need more samples than are available.
    #[error("invalid coverage {coverage}: {reason}")]
    InvalidCoverage {
        /// The rejected coverage level.
        coverage: f64,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when an interval is requested from zero samples.
    #[error("sample set is empty")]
    EmptySampleSet,

    /// Returned when a sample is NaN or infinite.
    #[error("sample {index} is not finite: {value}")]
    NonFiniteData {
        /// Position of the offending sample in the flattened input.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_invalid_coverage() {
        let e = HdiError::InvalidCoverage {
            coverage: 1.5,
            reason: "must be in (0, 1)".to_string(),
        };
        assert_eq!(e.to_string(), "invalid coverage 1.5: must be in (0, 1)");
    }

    #[test]
    fn error_empty_sample_set() {
        assert_eq!(HdiError::EmptySampleSet.to_string(), "sample set is empty");
    }

    #[test]
    fn error_non_finite() {
        let e = HdiError::NonFiniteData {
            index: 3,
            value: f64::INFINITY,
        };
        assert_eq!(e.to_string(), "sample 3 is not finite: inf");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<HdiError>();
    }
}
