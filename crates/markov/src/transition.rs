//! Single-step sampling over a column-stochastic matrix.

use rand::Rng;

use crate::matrix::Matrix;

/// Samples the state following `current`.
///
/// Reads column `current`, draws `u` uniformly from `[0, 1)` and walks the
/// rows accumulating probability, returning the first row whose cumulative
/// sum exceeds `u`. If rounding leaves the column total at or below `u`, the
/// chain stays at `current`.
///
/// # Panics
///
/// Panics if `current` is not a column of `matrix`.
pub fn sample_next_state(matrix: &Matrix, current: usize, rng: &mut impl Rng) -> usize {
    let u: f64 = rng.random();
    let mut cumulative = 0.0;
    for (row, p) in matrix.column(current).enumerate() {
        cumulative += p;
        if cumulative > u {
            return row;
        }
    }
    current
}
