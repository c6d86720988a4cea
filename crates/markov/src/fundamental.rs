//! Fundamental matrix and absorption probabilities.
//!
//! With `n` transient states, `N = (I - Q)^-1` holds in entry `(i, j)` the
//! expected number of visits to transient state `i` starting from transient
//! state `j`. In the column convention used throughout this crate the
//! absorption probabilities are `B = R N` (`m x n`), so column `j` is the
//! distribution over absorbing states when starting from `j`.

use serde::Serialize;
use tracing::debug;

use crate::error::MarkovError;
use crate::matrix::Matrix;

/// Pivots with magnitude at or below this are treated as zero.
const PIVOT_EPSILON: f64 = 1e-12;

/// Inverts a square matrix by Gauss-Jordan elimination with partial
/// pivoting.
///
/// # Errors
///
/// - [`MarkovError::DimensionMismatch`] if `m` is not square.
/// - [`MarkovError::SingularMatrix`] if a pivot column has no usable entry.
pub fn invert(m: &Matrix) -> Result<Matrix, MarkovError> {
    if !m.is_square() {
        return Err(MarkovError::DimensionMismatch {
            what: "inverse columns",
            expected: m.rows(),
            got: m.cols(),
        });
    }
    let n = m.rows();
    let mut a = m.to_rows();
    let mut inv = Matrix::identity(n).to_rows();

    for col in 0..n {
        let (pivot_row, pivot_abs) = (col..n)
            .map(|r| (r, a[r][col].abs()))
            .fold((col, -1.0), |best, cur| if cur.1 > best.1 { cur } else { best });
        if pivot_abs <= PIVOT_EPSILON {
            return Err(MarkovError::SingularMatrix { pivot: col });
        }
        a.swap(col, pivot_row);
        inv.swap(col, pivot_row);

        let pivot = a[col][col];
        for c in 0..n {
            a[col][c] /= pivot;
            inv[col][c] /= pivot;
        }

        for r in 0..n {
            if r == col {
                continue;
            }
            let factor = a[r][col];
            if factor == 0.0 {
                continue;
            }
            for c in 0..n {
                a[r][c] -= factor * a[col][c];
                inv[r][c] -= factor * inv[col][c];
            }
        }
    }
    Matrix::from_rows(&inv)
}

/// `N = (I - Q)^-1`.
///
/// # Errors
///
/// - [`MarkovError::EmptyMatrix`] if `q` has no rows.
/// - [`MarkovError::DimensionMismatch`] if `q` is not square.
/// - [`MarkovError::SingularMatrix`] if some transient class can never be
///   absorbed.
pub fn fundamental_matrix(q: &Matrix) -> Result<Matrix, MarkovError> {
    if q.rows() == 0 {
        return Err(MarkovError::EmptyMatrix);
    }
    let i_minus_q = Matrix::identity(q.rows()).difference(q)?;
    invert(&i_minus_q)
}

/// `B = R N`: column `j` is the absorption distribution from transient `j`.
///
/// # Errors
///
/// Returns [`MarkovError::DimensionMismatch`] if `r` does not have as many
/// columns as `n` has rows.
pub fn absorption_probabilities(r: &Matrix, n: &Matrix) -> Result<Matrix, MarkovError> {
    r.matmul(n)
}

/// Expected number of steps before absorption from each transient state:
/// the column sums of `N`.
pub fn expected_steps(n: &Matrix) -> Vec<f64> {
    n.column_sums()
}

/// Closed-form results for one chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsorptionAnalysis {
    /// `N = (I - Q)^-1`, `n x n`.
    pub fundamental: Matrix,
    /// `B = R N`, `m x n`.
    pub absorption: Matrix,
    /// Expected steps to absorption per transient starting state.
    pub expected_steps: Vec<f64>,
}

impl AbsorptionAnalysis {
    /// Probability of ending in absorbing state `absorbing` (counted from 0
    /// among the absorbing states) when starting from transient `start`.
    pub fn probability(&self, start: usize, absorbing: usize) -> f64 {
        self.absorption.get(absorbing, start)
    }
}

#[tracing::instrument(skip_all, fields(n_transient = q.rows(), n_absorbing = r.rows()))]
pub(crate) fn analyze(q: &Matrix, r: &Matrix) -> Result<AbsorptionAnalysis, MarkovError> {
    let fundamental = fundamental_matrix(q)?;
    let absorption = absorption_probabilities(r, &fundamental)?;
    let expected_steps = expected_steps(&fundamental);
    debug!(?expected_steps, "fundamental matrix solved");
    Ok(AbsorptionAnalysis {
        fundamental,
        absorption,
        expected_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_matrix_eq(actual: &Matrix, expected: &[&[f64]]) {
        assert_eq!(actual.rows(), expected.len());
        for (r, row) in expected.iter().enumerate() {
            assert_eq!(actual.cols(), row.len());
            for (c, &v) in row.iter().enumerate() {
                assert_abs_diff_eq!(actual.get(r, c), v, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn invert_two_by_two() {
        let m = Matrix::from_rows(&[[4.0, 7.0], [2.0, 6.0]]).unwrap();
        let inv = invert(&m).unwrap();
        assert_matrix_eq(&inv, &[&[0.6, -0.7], &[-0.2, 0.4]]);
        assert_matrix_eq(&m.matmul(&inv).unwrap(), &[&[1.0, 0.0], &[0.0, 1.0]]);
    }

    #[test]
    fn invert_needs_pivoting() {
        let m = Matrix::from_rows(&[[0.0, 1.0], [1.0, 0.0]]).unwrap();
        assert_matrix_eq(&invert(&m).unwrap(), &[&[0.0, 1.0], &[1.0, 0.0]]);
    }

    #[test]
    fn invert_singular() {
        let m = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
        assert!(matches!(
            invert(&m),
            Err(MarkovError::SingularMatrix { pivot: 1 })
        ));
    }

    #[test]
    fn invert_non_square() {
        assert!(matches!(
            invert(&Matrix::zeros(2, 3)),
            Err(MarkovError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn single_transient_state() {
        let q = Matrix::from_rows(&[[0.6]]).unwrap();
        let r = Matrix::from_rows(&[[0.4]]).unwrap();
        let a = analyze(&q, &r).unwrap();
        assert_matrix_eq(&a.fundamental, &[&[2.5]]);
        assert_matrix_eq(&a.absorption, &[&[1.0]]);
        assert_abs_diff_eq!(a.expected_steps[0], 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(a.probability(0, 0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn two_transient_two_absorbing() {
        let q = Matrix::from_rows(&[[0.0, 0.5], [0.5, 0.0]]).unwrap();
        let r = Matrix::from_rows(&[[0.5, 0.0], [0.0, 0.5]]).unwrap();
        let a = analyze(&q, &r).unwrap();
        let (t, s) = (4.0 / 3.0, 2.0 / 3.0);
        assert_matrix_eq(&a.fundamental, &[&[t, s], &[s, t]]);
        assert_matrix_eq(&a.absorption, &[&[2.0 / 3.0, 1.0 / 3.0], &[1.0 / 3.0, 2.0 / 3.0]]);
        for steps in &a.expected_steps {
            assert_abs_diff_eq!(*steps, 2.0, epsilon = 1e-12);
        }
        for total in a.absorption.column_sums() {
            assert_abs_diff_eq!(total, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn never_absorbed_is_singular() {
        let q = Matrix::from_rows(&[[1.0]]).unwrap();
        assert!(matches!(
            fundamental_matrix(&q),
            Err(MarkovError::SingularMatrix { pivot: 0 })
        ));
    }

    #[test]
    fn empty_q() {
        assert!(matches!(
            fundamental_matrix(&Matrix::zeros(0, 0)),
            Err(MarkovError::EmptyMatrix)
        ));
    }
}
