//! Step-wise simulation state machine.
//!
//! ```text
//!            start                 step (absorbing)
//!   Idle ───────────▶ Running ─────────────────────▶ Absorbed
//!    ▲                   │ ▲                            │
//!    │                   └─┘ step                       │
//!    └──────────────────── reset ───────────────────────┘
//! ```
//!
//! The periodic step is a single owned [`Ticker`] that the caller's event
//! loop drives through [`Simulator::poll`]. Cancelling it is an
//! `Option::take`, so stopping twice or stopping while idle does nothing.

use std::time::{Duration, Instant};

use rand::Rng;
use serde::Serialize;
use tracing::{debug, warn};

use crate::chain::AbsorbingChain;
use crate::config::{AbsorptionHighlight, SimulationConfig};
use crate::error::MarkovError;
use crate::transition::sample_next_state;

/// Lifecycle phase of a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No trajectory.
    Idle,
    /// Trajectory in progress.
    Running,
    /// The last state is absorbing.
    Absorbed,
}

/// Matrix cell traversed by a step: row is the arrival state, column the
/// departure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Highlight {
    /// Arrival state.
    pub row: usize,
    /// Departure state.
    pub col: usize,
}

/// One sampled transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepEvent {
    /// State before the step.
    pub from: usize,
    /// State after the step.
    pub to: usize,
    /// Cell to highlight after this step.
    pub highlight: Highlight,
    /// Whether `to` is absorbing.
    pub absorbed: bool,
}

/// A periodic deadline.
#[derive(Debug, Clone, Copy)]
struct Ticker {
    interval: Duration,
    next_due: Instant,
}

impl Ticker {
    fn armed(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }

    /// Consumes one elapsed deadline, if any.
    fn fire(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        true
    }
}

/// Step-wise simulator over an [`AbsorbingChain`].
///
/// Owns its trajectory, its random source and its ticker; nothing else
/// mutates them.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use cageside_markov::{AbsorbingChain, Matrix, Phase, SimulationConfig, Simulator};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let chain = AbsorbingChain::new(
///     Matrix::from_rows(&[[0.6]]).unwrap(),
///     Matrix::from_rows(&[[0.4]]).unwrap(),
/// )
/// .unwrap();
/// let config = SimulationConfig::interactive().with_step_interval(Duration::from_millis(10));
/// let mut sim = Simulator::new(chain, config, StdRng::seed_from_u64(7)).unwrap();
///
/// let t0 = Instant::now();
/// sim.start(t0);
/// while sim.phase() == Phase::Running {
///     sim.step();
/// }
/// assert_eq!(sim.current_state(), Some(1));
/// ```
#[derive(Debug)]
pub struct Simulator<R> {
    chain: AbsorbingChain,
    config: SimulationConfig,
    rng: R,
    phase: Phase,
    trajectory: Vec<usize>,
    highlight: Option<Highlight>,
    ticker: Option<Ticker>,
}

impl<R: Rng> Simulator<R> {
    /// Creates an idle simulator.
    ///
    /// # Errors
    ///
    /// - [`MarkovError::InvalidConfig`] if `config` does not validate.
    /// - [`MarkovError::StateOutOfRange`] if the initial state is not in
    ///   `chain`.
    pub fn new(chain: AbsorbingChain, config: SimulationConfig, rng: R) -> Result<Self, MarkovError> {
        config.validate()?;
        chain.check_state(config.initial_state())?;
        Ok(Self {
            chain,
            config,
            rng,
            phase: Phase::Idle,
            trajectory: Vec::new(),
            highlight: None,
            ticker: None,
        })
    }

    /// Starts (or restarts) a trajectory from the initial state and arms the
    /// ticker for `now + step_interval`.
    ///
    /// An absorbing initial state goes straight to [`Phase::Absorbed`]
    /// without a ticker.
    pub fn start(&mut self, now: Instant) {
        self.begin();
        if self.phase == Phase::Running {
            self.ticker = Some(Ticker::armed(self.config.step_interval(), now));
        }
    }

    fn begin(&mut self) {
        self.ticker = None;
        let initial = self.config.initial_state();
        self.trajectory.clear();
        self.trajectory.push(initial);
        if self.chain.is_absorbing(initial) {
            self.phase = Phase::Absorbed;
            self.highlight = match self.config.highlight() {
                AbsorptionHighlight::SelfLoop => Some(Highlight {
                    row: initial,
                    col: initial,
                }),
                AbsorptionHighlight::LastTransition => None,
            };
        } else {
            self.phase = Phase::Running;
            self.highlight = None;
        }
        debug!(initial, phase = ?self.phase, "simulation started");
    }

    /// Samples one transition.
    ///
    /// Returns `None` unless the simulator is [`Phase::Running`]. Reaching an
    /// absorbing state moves to [`Phase::Absorbed`] and cancels the ticker.
    pub fn step(&mut self) -> Option<StepEvent> {
        if self.phase != Phase::Running {
            return None;
        }
        let from = *self.trajectory.last()?;
        let to = sample_next_state(self.chain.matrix(), from, &mut self.rng);
        self.trajectory.push(to);
        let absorbed = self.chain.is_absorbing(to);
        let highlight = self.highlight_for(from, to, absorbed);
        self.highlight = Some(highlight);
        if absorbed {
            self.phase = Phase::Absorbed;
            self.ticker = None;
        }
        debug!(from, to, absorbed, "step");
        Some(StepEvent {
            from,
            to,
            highlight,
            absorbed,
        })
    }

    fn highlight_for(&self, from: usize, to: usize, absorbed: bool) -> Highlight {
        match (absorbed, self.config.highlight()) {
            (true, AbsorptionHighlight::SelfLoop) => Highlight { row: to, col: to },
            _ => Highlight { row: to, col: from },
        }
    }

    /// Fires every step whose deadline is at or before `now`.
    ///
    /// Several steps fire if several intervals have elapsed. Nothing fires
    /// once the ticker is cancelled by [`stop`](Self::stop),
    /// [`reset`](Self::reset) or absorption.
    ///
    /// A run never takes more than `max_steps` steps through the ticker: once
    /// the limit is reached the ticker is cancelled and the phase stays
    /// [`Phase::Running`].
    pub fn poll(&mut self, now: Instant) -> Vec<StepEvent> {
        let max_steps = self.config.max_steps();
        let mut events = Vec::new();
        while let Some(ticker) = self.ticker.as_mut() {
            if !ticker.fire(now) {
                break;
            }
            if self.trajectory.len() > max_steps {
                warn!(max_steps, "step limit reached, ticker cancelled");
                self.stop();
                break;
            }
            match self.step() {
                Some(event) => events.push(event),
                None => break,
            }
        }
        events
    }

    /// Cancels the ticker. The trajectory and phase are kept, so a stopped
    /// run can still be advanced with [`step`](Self::step) or re-armed with
    /// [`resume`](Self::resume).
    pub fn stop(&mut self) {
        if self.ticker.take().is_some() {
            debug!("ticker cancelled");
        }
    }

    /// Re-arms the ticker of a stopped run. Does nothing unless the
    /// simulator is running without a ticker.
    pub fn resume(&mut self, now: Instant) {
        if self.phase == Phase::Running && self.ticker.is_none() {
            self.ticker = Some(Ticker::armed(self.config.step_interval(), now));
        }
    }

    /// Clears the trajectory and highlight, cancels the ticker and returns
    /// to [`Phase::Idle`].
    pub fn reset(&mut self) {
        self.stop();
        self.trajectory.clear();
        self.highlight = None;
        self.phase = Phase::Idle;
    }

    /// Samples until absorption without delay, returning the number of steps
    /// taken. Only the final state is highlighted.
    ///
    /// An idle simulator is started first; an absorbed one takes no steps.
    ///
    /// # Errors
    ///
    /// - [`MarkovError::FastForwardUnavailable`] if the configuration
    ///   disables fast-forward.
    /// - [`MarkovError::StepLimitExceeded`] if absorption takes more than
    ///   `max_steps` steps. The partial trajectory is kept.
    pub fn fast_forward(&mut self) -> Result<usize, MarkovError> {
        if !self.config.fast_forward() {
            return Err(MarkovError::FastForwardUnavailable);
        }
        match self.phase {
            Phase::Absorbed => return Ok(0),
            Phase::Idle => self.begin(),
            Phase::Running => self.stop(),
        }

        let max_steps = self.config.max_steps();
        let mut steps = 0;
        let mut last = None;
        while let Some(&from) = self.trajectory.last() {
            if self.chain.is_absorbing(from) {
                break;
            }
            if steps == max_steps {
                return Err(MarkovError::StepLimitExceeded { max_steps });
            }
            let to = sample_next_state(self.chain.matrix(), from, &mut self.rng);
            self.trajectory.push(to);
            last = Some((from, to));
            steps += 1;
        }

        if let Some((from, to)) = last {
            self.highlight = Some(self.highlight_for(from, to, true));
        }
        self.phase = Phase::Absorbed;
        debug!(steps, final_state = ?self.current_state(), "fast-forwarded");
        Ok(steps)
    }

    // --- Accessors ---

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// States visited so far, starting with the initial state.
    pub fn trajectory(&self) -> &[usize] {
        &self.trajectory
    }

    /// Last visited state, `None` while idle.
    pub fn current_state(&self) -> Option<usize> {
        self.trajectory.last().copied()
    }

    /// Cell to highlight, `None` before the first step.
    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    /// Returns `true` while a periodic step is pending.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Deadline of the next periodic step, if one is pending.
    pub fn next_due(&self) -> Option<Instant> {
        self.ticker.map(|t| t.next_due)
    }

    /// The simulated chain.
    pub fn chain(&self) -> &AbsorbingChain {
        &self.chain
    }

    /// The simulator configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
