//! Block assembly of absorbing chains.

use tracing::debug;

use crate::error::MarkovError;
use crate::fundamental::{AbsorptionAnalysis, analyze};
use crate::labels::{MatrixCell, numeric_from_cells};
use crate::matrix::Matrix;
use crate::state::{StateKind, is_absorbing};

/// Tolerance for column sums in [`AbsorbingChain::validate`].
pub const COLUMN_SUM_TOLERANCE: f64 = 1e-9;

/// Assembles the full transition matrix `[[Q, O], [R, I]]`.
///
/// `q` is `n x n` (transient to transient) and `r` is `m x n` (transient to
/// absorbing). Column `j` of the result holds the probabilities of leaving
/// state `j`. The result is `(n + m) x (n + m)`.
///
/// # Errors
///
/// - [`MarkovError::EmptyMatrix`] if `q` has no rows.
/// - [`MarkovError::DimensionMismatch`] if `q` is not square or `r` does
///   not have `n` columns.
///
/// # Example
///
/// ```
/// use cageside_markov::{Matrix, assemble_full_matrix};
///
/// let q = Matrix::from_rows(&[[0.6]]).unwrap();
/// let r = Matrix::from_rows(&[[0.4]]).unwrap();
/// let p = assemble_full_matrix(&q, &r).unwrap();
/// assert_eq!(p.to_rows(), vec![vec![0.6, 0.0], vec![0.4, 1.0]]);
/// ```
pub fn assemble_full_matrix(q: &Matrix, r: &Matrix) -> Result<Matrix, MarkovError> {
    let n = q.rows();
    if n == 0 {
        return Err(MarkovError::EmptyMatrix);
    }
    if !q.is_square() {
        return Err(MarkovError::DimensionMismatch {
            what: "Q columns",
            expected: n,
            got: q.cols(),
        });
    }
    let m = r.rows();
    if m > 0 && r.cols() != n {
        return Err(MarkovError::DimensionMismatch {
            what: "R columns",
            expected: n,
            got: r.cols(),
        });
    }

    let mut full = Matrix::zeros(n + m, n + m);
    full.place(0, 0, q);
    full.place(n, 0, r);
    full.place(n, n, &Matrix::identity(m));
    debug!(n_transient = n, n_absorbing = m, "assembled block matrix");
    Ok(full)
}

/// An absorbing chain in canonical block form.
///
/// Holds `Q`, `R` and the assembled matrix together so the counts can never
/// disagree with the blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsorbingChain {
    q: Matrix,
    r: Matrix,
    full: Matrix,
}

impl AbsorbingChain {
    /// Builds a chain from its transient and absorbing blocks.
    ///
    /// # Errors
    ///
    /// Same as [`assemble_full_matrix`].
    pub fn new(q: Matrix, r: Matrix) -> Result<Self, MarkovError> {
        let full = assemble_full_matrix(&q, &r)?;
        Ok(Self { q, r, full })
    }

    /// Builds a chain from config cells, coercing symbolic labels to 0.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::RaggedMatrix`] for ragged input, otherwise the
    /// same errors as [`assemble_full_matrix`].
    pub fn from_cells(q: &[Vec<MatrixCell>], r: &[Vec<MatrixCell>]) -> Result<Self, MarkovError> {
        Self::new(numeric_from_cells(q)?, numeric_from_cells(r)?)
    }

    /// The transient block `Q`.
    pub fn q(&self) -> &Matrix {
        &self.q
    }

    /// The transient-to-absorbing block `R`.
    pub fn r(&self) -> &Matrix {
        &self.r
    }

    /// The assembled `[[Q, O], [R, I]]` matrix.
    pub fn matrix(&self) -> &Matrix {
        &self.full
    }

    /// Number of transient states `n`.
    pub fn n_transient(&self) -> usize {
        self.q.rows()
    }

    /// Number of absorbing states `m`.
    pub fn n_absorbing(&self) -> usize {
        self.r.rows()
    }

    /// Total number of states `n + m`.
    pub fn n_states(&self) -> usize {
        self.full.rows()
    }

    /// Returns `true` if `state` is absorbing in this chain.
    pub fn is_absorbing(&self, state: usize) -> bool {
        is_absorbing(state, self.n_transient())
    }

    /// Classifies `state`.
    pub fn state_kind(&self, state: usize) -> StateKind {
        StateKind::classify(state, self.n_transient())
    }

    /// Checks that `state` exists in this chain.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::StateOutOfRange`] otherwise.
    pub fn check_state(&self, state: usize) -> Result<(), MarkovError> {
        if state >= self.n_states() {
            return Err(MarkovError::StateOutOfRange {
                state,
                n_states: self.n_states(),
            });
        }
        Ok(())
    }

    /// Checks that the assembled matrix is column-stochastic.
    ///
    /// Every entry must be finite and in `[0, 1]`, and every column must sum
    /// to 1 within [`COLUMN_SUM_TOLERANCE`].
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::NotStochastic`] naming the first bad column.
    pub fn validate(&self) -> Result<(), MarkovError> {
        for col in 0..self.full.cols() {
            let mut sum = 0.0;
            for (row, p) in self.full.column(col).enumerate() {
                if !p.is_finite() || !(0.0..=1.0).contains(&p) {
                    return Err(MarkovError::NotStochastic {
                        column: col,
                        reason: format!("entry at row {row} is {p}, outside [0, 1]"),
                    });
                }
                sum += p;
            }
            if (sum - 1.0).abs() > COLUMN_SUM_TOLERANCE {
                return Err(MarkovError::NotStochastic {
                    column: col,
                    reason: format!("sums to {sum}"),
                });
            }
        }
        Ok(())
    }

    /// Closed-form analysis: fundamental matrix, absorption probabilities
    /// and expected steps to absorption.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::SingularMatrix`] if `I - Q` is not invertible.
    pub fn analyze(&self) -> Result<AbsorptionAnalysis, MarkovError> {
        analyze(&self.q, &self.r)
    }
}
