//! Simulate command: step-wise, fast-forwarded, animated or Monte-Carlo runs.

use std::io::Write;
use std::time::Instant;

use anyhow::{Context, Result, anyhow, bail};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span, warn};

use cageside_markov::{
    AbsorbingChain, Phase, SimulationConfig, Simulator, StepEvent, estimate_absorption,
};

use crate::cli::SimulateArgs;
use crate::config;
use crate::convert;
use crate::report::{self, MonteCarloOutput, TrajectoryOutput};

/// How a single trajectory is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Step,
    FastForward,
    Animate,
}

impl Mode {
    fn as_str(self) -> &'static str {
        match self {
            Self::Step => "step",
            Self::FastForward => "fast_forward",
            Self::Animate => "animate",
        }
    }
}

/// Run the simulation.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();

    // 1. Load config and build chain + simulator settings
    let config = config::load(&args.config)?;
    let chain_toml = config
        .chain
        .as_ref()
        .ok_or_else(|| anyhow!("no chain: set [chain] q and r in config"))?;
    let chain = convert::build_chain(chain_toml)?;
    let sim_cfg = convert::build_simulation_config(&config.simulation)?;
    let names = &chain_toml.state_names;

    // 2. Create seeded RNG
    let seed = args.seed.or(config.seed);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    // 3. Dispatch on mode
    if let Some(runs) = args.runs {
        let output = monte_carlo(&chain, &sim_cfg, runs, &mut rng, names, seed)?;
        return report::write_json(&output, args.output.as_deref());
    }

    let mode = if args.fast_forward {
        Mode::FastForward
    } else if args.animate {
        Mode::Animate
    } else {
        Mode::Step
    };
    let mut sim = Simulator::new(chain, sim_cfg, rng).context("failed to create simulator")?;
    let events = match mode {
        Mode::FastForward => {
            sim.fast_forward().context("fast-forward failed")?;
            Vec::new()
        }
        Mode::Animate => animate(&mut sim)?,
        Mode::Step => step_to_absorption(&mut sim)?,
    };

    let trajectory = sim.trajectory().to_vec();
    info!(
        mode = mode.as_str(),
        steps = trajectory.len().saturating_sub(1),
        final_state = ?sim.current_state(),
        "simulation finished"
    );
    let output = TrajectoryOutput {
        mode: mode.as_str(),
        seed,
        highlight_rule: sim.config().highlight(),
        phase: sim.phase(),
        steps: trajectory.len().saturating_sub(1),
        named_trajectory: (!names.is_empty())
            .then(|| report::state_names(names, trajectory.iter().copied())),
        trajectory,
        highlight: sim.highlight(),
        events,
    };
    report::write_json(&output, args.output.as_deref())
}

/// Steps without delay until absorption, bounded by `max_steps`.
pub fn step_to_absorption(sim: &mut Simulator<StdRng>) -> Result<Vec<StepEvent>> {
    let max_steps = sim.config().max_steps();
    sim.start(Instant::now());
    sim.stop();
    let mut events = Vec::new();
    while sim.phase() == Phase::Running {
        if events.len() == max_steps {
            bail!("no absorption within {max_steps} steps");
        }
        if let Some(event) = sim.step() {
            events.push(event);
        }
    }
    Ok(events)
}

/// Steps in real time at the configured interval, printing each step as a
/// JSON line on stdout.
fn animate(sim: &mut Simulator<StdRng>) -> Result<Vec<StepEvent>> {
    let max_steps = sim.config().max_steps();
    let mut out = std::io::stdout().lock();
    let mut events = Vec::new();
    sim.start(Instant::now());
    while let Some(due) = sim.next_due() {
        std::thread::sleep(due.saturating_duration_since(Instant::now()));
        for event in sim.poll(Instant::now()) {
            let line = serde_json::to_string(&event).context("failed to serialise step")?;
            writeln!(out, "{line}").context("failed to write step")?;
            events.push(event);
        }
    }
    if sim.phase() == Phase::Running {
        bail!("no absorption within {max_steps} steps");
    }
    Ok(events)
}

/// Monte-Carlo absorption frequencies next to the closed-form values.
fn monte_carlo(
    chain: &AbsorbingChain,
    sim_cfg: &SimulationConfig,
    runs: usize,
    rng: &mut StdRng,
    names: &[String],
    seed: Option<u64>,
) -> Result<MonteCarloOutput> {
    let initial = sim_cfg.initial_state();
    chain
        .check_state(initial)
        .context("invalid [simulation] initial_state")?;
    let simulated = estimate_absorption(chain, initial, runs, rng, sim_cfg.max_steps())
        .context("monte-carlo estimate failed")?;

    let analytic = if chain.is_absorbing(initial) {
        None
    } else {
        match chain.analyze() {
            Ok(a) => Some(
                (0..chain.n_absorbing())
                    .map(|j| a.probability(initial, j))
                    .collect(),
            ),
            Err(e) => {
                warn!(error = %e, "closed-form absorption probabilities unavailable");
                None
            }
        }
    };

    Ok(MonteCarloOutput {
        seed,
        runs,
        initial_state: initial,
        absorbing_states: report::state_names(names, chain.n_transient()..chain.n_states()),
        simulated,
        analytic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cageside_markov::{AbsorptionHighlight, Highlight, Matrix};

    fn ladder() -> AbsorbingChain {
        AbsorbingChain::new(
            Matrix::from_rows(&[[0.0, 0.0], [1.0, 0.0]]).unwrap(),
            Matrix::from_rows(&[[0.0, 1.0]]).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn step_mode_records_every_transition() {
        let mut sim = Simulator::new(
            ladder(),
            SimulationConfig::explainer(),
            StdRng::seed_from_u64(1),
        )
        .unwrap();
        let events = step_to_absorption(&mut sim).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(sim.trajectory(), &[0, 1, 2]);
        assert_eq!(sim.config().highlight(), AbsorptionHighlight::LastTransition);
        assert_eq!(sim.highlight(), Some(Highlight { row: 2, col: 1 }));
        assert!(!sim.is_ticking());
    }

    #[test]
    fn step_mode_is_bounded() {
        let trapped = AbsorbingChain::new(
            Matrix::from_rows(&[[1.0]]).unwrap(),
            Matrix::from_rows(&[[0.0]]).unwrap(),
        )
        .unwrap();
        let cfg = SimulationConfig::interactive().with_max_steps(10);
        let mut sim = Simulator::new(trapped, cfg, StdRng::seed_from_u64(1)).unwrap();
        assert!(step_to_absorption(&mut sim).is_err());
    }

    #[test]
    fn monte_carlo_reports_both_estimates() {
        let chain = AbsorbingChain::new(
            Matrix::from_rows(&[[0.5]]).unwrap(),
            Matrix::from_rows(&[[0.3], [0.2]]).unwrap(),
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(99);
        let names = vec!["standing".to_string(), "blue".to_string(), "red".to_string()];
        let out = monte_carlo(
            &chain,
            &SimulationConfig::new(),
            5000,
            &mut rng,
            &names,
            Some(99),
        )
        .unwrap();
        assert_eq!(out.absorbing_states, vec!["blue", "red"]);
        let analytic = out.analytic.unwrap();
        assert!((analytic[0] - 0.6).abs() < 1e-12);
        assert!((out.simulated[0] - 0.6).abs() < 0.03);
        assert!((out.simulated.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn monte_carlo_from_absorbing_state_has_no_analytic() {
        let mut rng = StdRng::seed_from_u64(5);
        let cfg = SimulationConfig::new().with_initial_state(2);
        let out = monte_carlo(&ladder(), &cfg, 10, &mut rng, &[], None).unwrap();
        assert_eq!(out.simulated, vec![1.0]);
        assert!(out.analytic.is_none());
    }
}
