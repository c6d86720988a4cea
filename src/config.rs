use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use cageside_markov::MatrixCell;

/// Top-level Cageside configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CagesideConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// HDI settings.
    #[serde(default)]
    pub hdi: HdiToml,

    /// Density curve settings.
    #[serde(default)]
    pub kde: KdeToml,

    /// Absorbing chain definition.
    #[serde(default)]
    pub chain: Option<ChainToml>,

    /// Step-wise simulation settings.
    #[serde(default)]
    pub simulation: SimulationToml,
}

/// Reads and parses a TOML configuration file.
pub fn load(path: &Path) -> Result<CagesideConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HdiToml {
    #[serde(default = "default_coverage_levels")]
    pub coverage_levels: Vec<f64>,
    #[serde(default = "default_true")]
    pub equal_tailed: bool,
}

impl Default for HdiToml {
    fn default() -> Self {
        Self {
            coverage_levels: default_coverage_levels(),
            equal_tailed: true,
        }
    }
}

fn default_coverage_levels() -> Vec<f64> {
    cageside_hdi::DEFAULT_COVERAGE_LEVELS.to_vec()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KdeToml {
    #[serde(default = "default_kernel")]
    pub kernel: String,
    #[serde(default = "default_bandwidth")]
    pub bandwidth: f64,
    #[serde(default)]
    pub grid: GridToml,
}

impl Default for KdeToml {
    fn default() -> Self {
        Self {
            kernel: default_kernel(),
            bandwidth: default_bandwidth(),
            grid: GridToml::default(),
        }
    }
}

fn default_kernel() -> String {
    "epanechnikov".to_string()
}
fn default_bandwidth() -> f64 {
    cageside_kde::DEFAULT_BANDWIDTH
}

/// Grid specification: at most one of `step`, `ticks` or `points`; none
/// means `step = 0.01`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridToml {
    #[serde(default)]
    pub start: f64,
    #[serde(default = "default_grid_stop")]
    pub stop: f64,
    pub step: Option<f64>,
    pub ticks: Option<usize>,
    pub points: Option<Vec<f64>>,
}

impl Default for GridToml {
    fn default() -> Self {
        Self {
            start: 0.0,
            stop: default_grid_stop(),
            step: None,
            ticks: None,
            points: None,
        }
    }
}

fn default_grid_stop() -> f64 {
    1.0
}

/// Chain blocks. Cells are numbers or strings; non-numeric strings count as
/// zero probability.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainToml {
    pub q: Vec<Vec<MatrixCell>>,
    pub r: Vec<Vec<MatrixCell>>,
    #[serde(default)]
    pub state_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationToml {
    #[serde(default = "default_variant")]
    pub variant: String,
    #[serde(default)]
    pub highlight: Option<String>,
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,
    #[serde(default)]
    pub initial_state: usize,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for SimulationToml {
    fn default() -> Self {
        Self {
            variant: default_variant(),
            highlight: None,
            step_interval_ms: default_step_interval_ms(),
            initial_state: 0,
            max_steps: default_max_steps(),
        }
    }
}

fn default_variant() -> String {
    "interactive".to_string()
}
fn default_step_interval_ms() -> u64 {
    1000
}
fn default_max_steps() -> usize {
    cageside_markov::DEFAULT_MAX_STEPS
}
