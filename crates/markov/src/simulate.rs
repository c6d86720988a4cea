//! Whole-trajectory simulation and Monte-Carlo absorption estimates.

use rand::Rng;
use tracing::debug;

use crate::chain::AbsorbingChain;
use crate::error::MarkovError;
use crate::transition::sample_next_state;

/// Samples states from `initial` until an absorbing state is reached.
///
/// The returned trajectory starts with `initial` and ends with the absorbing
/// state. Starting in an absorbing state yields `[initial]`.
///
/// # Errors
///
/// - [`MarkovError::StateOutOfRange`] if `initial` is not a state of `chain`.
/// - [`MarkovError::StepLimitExceeded`] if absorption takes more than
///   `max_steps` steps.
pub fn simulate_trajectory(
    chain: &AbsorbingChain,
    initial: usize,
    rng: &mut impl Rng,
    max_steps: usize,
) -> Result<Vec<usize>, MarkovError> {
    chain.check_state(initial)?;
    let mut trajectory = vec![initial];
    let mut current = initial;
    while !chain.is_absorbing(current) {
        if trajectory.len() > max_steps {
            return Err(MarkovError::StepLimitExceeded { max_steps });
        }
        current = sample_next_state(chain.matrix(), current, rng);
        trajectory.push(current);
    }
    Ok(trajectory)
}

/// Monte-Carlo estimate of the absorption distribution from `initial`.
///
/// Runs `runs` trajectories and returns, for each absorbing state in order,
/// the fraction of runs that ended there. Comparable to column `initial` of
/// [`AbsorptionAnalysis::absorption`](crate::AbsorptionAnalysis).
///
/// # Errors
///
/// - [`MarkovError::InvalidConfig`] if `runs` is zero.
/// - Any error from [`simulate_trajectory`].
#[tracing::instrument(skip(chain, rng))]
pub fn estimate_absorption(
    chain: &AbsorbingChain,
    initial: usize,
    runs: usize,
    rng: &mut impl Rng,
    max_steps: usize,
) -> Result<Vec<f64>, MarkovError> {
    if runs == 0 {
        return Err(MarkovError::InvalidConfig {
            reason: "runs must be positive".to_string(),
        });
    }
    let n = chain.n_transient();
    let mut counts = vec![0usize; chain.n_absorbing()];
    let mut total_steps = 0usize;
    for _ in 0..runs {
        let trajectory = simulate_trajectory(chain, initial, rng, max_steps)?;
        total_steps += trajectory.len() - 1;
        if let Some(&last) = trajectory.last() {
            counts[last - n] += 1;
        }
    }
    debug!(
        mean_steps = total_steps as f64 / runs as f64,
        "monte-carlo absorption estimated"
    );
    Ok(counts
        .into_iter()
        .map(|c| c as f64 / runs as f64)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn single() -> AbsorbingChain {
        AbsorbingChain::new(
            Matrix::from_rows(&[[0.6]]).unwrap(),
            Matrix::from_rows(&[[0.4]]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn trajectory_ends_absorbed() {
        let chain = single();
        let mut rng = StdRng::seed_from_u64(42);
        let t = simulate_trajectory(&chain, 0, &mut rng, 10_000).unwrap();
        assert_eq!(t[0], 0);
        assert_eq!(*t.last().unwrap(), 1);
        assert!(t[..t.len() - 1].iter().all(|&s| s == 0));
    }

    #[test]
    fn absorbing_start_is_immediate() {
        let chain = single();
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(simulate_trajectory(&chain, 1, &mut rng, 10).unwrap(), vec![1]);
    }

    #[test]
    fn out_of_range_start() {
        let chain = single();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            simulate_trajectory(&chain, 2, &mut rng, 10),
            Err(MarkovError::StateOutOfRange { state: 2, .. })
        ));
    }

    #[test]
    fn step_limit() {
        // Q = [[1]] never leaves state 0.
        let chain = AbsorbingChain::new(
            Matrix::from_rows(&[[1.0]]).unwrap(),
            Matrix::from_rows(&[[0.0]]).unwrap(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            simulate_trajectory(&chain, 0, &mut rng, 50),
            Err(MarkovError::StepLimitExceeded { max_steps: 50 })
        ));
    }

    #[test]
    fn zero_runs_rejected() {
        let chain = single();
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            estimate_absorption(&chain, 0, 0, &mut rng, 100),
            Err(MarkovError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn single_absorbing_state_always_wins() {
        let chain = single();
        let mut rng = StdRng::seed_from_u64(42);
        let freq = estimate_absorption(&chain, 0, 500, &mut rng, 10_000).unwrap();
        assert_eq!(freq, vec![1.0]);
    }
}
