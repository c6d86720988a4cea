//! Configuration for the step-wise simulator.

use std::time::Duration;

use serde::Serialize;

use crate::error::MarkovError;

/// Default delay between periodic steps.
pub const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(1000);

/// Default bound on steps taken by a single fast-forward.
pub const DEFAULT_MAX_STEPS: usize = 100_000;

/// Which matrix cell is highlighted once the chain is absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AbsorptionHighlight {
    /// The absorbing state's own diagonal cell `(s, s)`.
    SelfLoop,
    /// The edge just traversed, `(arrival, departure)`, like any other step.
    LastTransition,
}

/// Configuration for a [`Simulator`](crate::Simulator).
///
/// Two presets cover the two existing simulator screens; see
/// [`SimulationConfig::interactive`] and [`SimulationConfig::explainer`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use cageside_markov::{AbsorptionHighlight, SimulationConfig};
///
/// let config = SimulationConfig::explainer()
///     .with_step_interval(Duration::from_millis(250))
///     .with_initial_state(1);
///
/// assert_eq!(config.highlight(), AbsorptionHighlight::LastTransition);
/// assert!(!config.fast_forward());
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    step_interval: Duration,
    initial_state: usize,
    highlight: AbsorptionHighlight,
    fast_forward: bool,
    max_steps: usize,
}

impl SimulationConfig {
    /// Creates a new configuration with the [`interactive`](Self::interactive)
    /// defaults.
    ///
    /// Defaults: `step_interval = 1000 ms`, `initial_state = 0`,
    /// `highlight = SelfLoop`, `fast_forward = true`, `max_steps = 100_000`.
    pub fn new() -> Self {
        Self {
            step_interval: DEFAULT_STEP_INTERVAL,
            initial_state: 0,
            highlight: AbsorptionHighlight::SelfLoop,
            fast_forward: true,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// The interactive simulator: self-loop highlight, fast-forward enabled.
    pub fn interactive() -> Self {
        Self::new()
    }

    /// The explainer simulator: last-transition highlight, no fast-forward.
    pub fn explainer() -> Self {
        Self::new()
            .with_highlight(AbsorptionHighlight::LastTransition)
            .with_fast_forward(false)
    }

    /// Sets the delay between periodic steps.
    pub fn with_step_interval(mut self, interval: Duration) -> Self {
        self.step_interval = interval;
        self
    }

    /// Sets the starting state.
    pub fn with_initial_state(mut self, state: usize) -> Self {
        self.initial_state = state;
        self
    }

    /// Sets the absorption highlight rule.
    pub fn with_highlight(mut self, highlight: AbsorptionHighlight) -> Self {
        self.highlight = highlight;
        self
    }

    /// Enables or disables fast-forward.
    pub fn with_fast_forward(mut self, enabled: bool) -> Self {
        self.fast_forward = enabled;
        self
    }

    /// Sets the fast-forward step bound.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    // --- Accessors ---

    /// Returns the delay between periodic steps.
    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    /// Returns the starting state.
    pub fn initial_state(&self) -> usize {
        self.initial_state
    }

    /// Returns the absorption highlight rule.
    pub fn highlight(&self) -> AbsorptionHighlight {
        self.highlight
    }

    /// Returns `true` if fast-forward is available.
    pub fn fast_forward(&self) -> bool {
        self.fast_forward
    }

    /// Returns the fast-forward step bound.
    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    /// Validates this configuration.
    ///
    /// The step interval and `max_steps` must be non-zero. Whether
    /// `initial_state` exists is checked against the chain by
    /// [`Simulator::new`](crate::Simulator::new).
    pub fn validate(&self) -> Result<(), MarkovError> {
        if self.step_interval.is_zero() {
            return Err(MarkovError::InvalidConfig {
                reason: "step_interval must be positive".to_string(),
            });
        }
        if self.max_steps == 0 {
            return Err(MarkovError::InvalidConfig {
                reason: "max_steps must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
