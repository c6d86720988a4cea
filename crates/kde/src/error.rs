//! Error types for the cageside-kde crate.

/// Error type for all fallible operations in the cageside-kde crate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum KdeError {
    /// Returned when a kernel bandwidth is non-finite or non-positive.
    #[error("bandwidth must be finite and positive, got {value}")]
    InvalidBandwidth {
        /// The invalid bandwidth.
        value: f64,
    },

    /// Returned when a grid specification cannot produce a grid.
    #[error("invalid grid: {reason}")]
    InvalidGrid {
        /// Description of the problem.
        reason: String,
    },
}
