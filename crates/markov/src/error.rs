//! Error types for the cageside-markov crate.

/// Error type for all fallible operations in the cageside-markov crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MarkovError {
    /// Returned when Q and R do not fit together as `[[Q, O], [R, I]]`.
    #[error("dimension mismatch in {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Which dimension was checked.
        what: &'static str,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when matrix rows have different lengths.
    #[error("ragged matrix: row {row} has {got} columns, expected {expected}")]
    RaggedMatrix {
        /// Index of the offending row.
        row: usize,
        /// Column count of the first row.
        expected: usize,
        /// Column count of the offending row.
        got: usize,
    },

    /// Returned when a matrix with no rows or no columns is supplied where
    /// at least one state is required.
    #[error("matrix is empty")]
    EmptyMatrix,

    /// Returned when a column is not a probability distribution.
    #[error("column {column} is not stochastic: {reason}")]
    NotStochastic {
        /// Index of the offending column.
        column: usize,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when `I - Q` cannot be inverted (a transient class never
    /// reaches an absorbing state).
    #[error("matrix is singular at pivot {pivot}")]
    SingularMatrix {
        /// Column where no usable pivot was found.
        pivot: usize,
    },

    /// Returned when a state index does not exist in the chain.
    #[error("state {state} is out of range for a chain with {n_states} states")]
    StateOutOfRange {
        /// The requested state.
        state: usize,
        /// Total number of states.
        n_states: usize,
    },

    /// Returned when fast-forward is requested from a simulator variant
    /// that does not offer it.
    #[error("fast-forward is not available for this simulator variant")]
    FastForwardUnavailable,

    /// Returned when a trajectory has not been absorbed within the limit.
    #[error("no absorption within {max_steps} steps")]
    StepLimitExceeded {
        /// The step limit that was hit.
        max_steps: usize,
    },

    /// Returned when a configuration value is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_dimension_mismatch() {
        let e = MarkovError::DimensionMismatch {
            what: "R columns",
            expected: 3,
            got: 2,
        };
        assert_eq!(
            e.to_string(),
            "dimension mismatch in R columns: expected 3, got 2"
        );
    }

    #[test]
    fn error_ragged() {
        let e = MarkovError::RaggedMatrix {
            row: 1,
            expected: 3,
            got: 2,
        };
        assert_eq!(
            e.to_string(),
            "ragged matrix: row 1 has 2 columns, expected 3"
        );
    }

    #[test]
    fn error_not_stochastic() {
        let e = MarkovError::NotStochastic {
            column: 0,
            reason: "sums to 0.9".to_string(),
        };
        assert_eq!(e.to_string(), "column 0 is not stochastic: sums to 0.9");
    }

    #[test]
    fn error_singular() {
        let e = MarkovError::SingularMatrix { pivot: 2 };
        assert_eq!(e.to_string(), "matrix is singular at pivot 2");
    }

    #[test]
    fn error_state_out_of_range() {
        let e = MarkovError::StateOutOfRange {
            state: 7,
            n_states: 5,
        };
        assert_eq!(
            e.to_string(),
            "state 7 is out of range for a chain with 5 states"
        );
    }

    #[test]
    fn error_step_limit() {
        let e = MarkovError::StepLimitExceeded { max_steps: 100 };
        assert_eq!(e.to_string(), "no absorption within 100 steps");
    }

    #[test]
    fn error_fast_forward() {
        assert_eq!(
            MarkovError::FastForwardUnavailable.to_string(),
            "fast-forward is not available for this simulator variant"
        );
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<MarkovError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<MarkovError>();
    }
}
