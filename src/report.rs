//! JSON report structures for the subcommands.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use cageside_hdi::{HdiSet, NestingViolation};
use cageside_kde::{DensityCurve, Kernel};
use cageside_markov::{
    AbsorptionAnalysis, AbsorptionHighlight, Highlight, LabelMatrix, Matrix, Phase, StepEvent,
};

/// Output of `summarize`, keyed by series name.
pub type SummarizeOutput = BTreeMap<String, SeriesReport>;

/// Summary of one posterior series.
#[derive(Debug, Serialize)]
pub struct SeriesReport {
    pub n: usize,
    pub stats: Option<StatsOutput>,
    pub hdi: HdiSet,
    pub equal_tailed: Vec<IntervalOutput>,
    pub nesting_violations: Vec<NestingViolation>,
    pub kernel: KernelOutput,
    pub density: DensityCurve,
}

/// Location and spread of a series.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StatsOutput {
    pub mean: f64,
    pub sd: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl From<cageside_stats::Summary> for StatsOutput {
    fn from(s: cageside_stats::Summary) -> Self {
        Self {
            mean: s.mean,
            sd: s.sd,
            median: s.median,
            min: s.min,
            max: s.max,
        }
    }
}

/// An interval at one coverage level.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct IntervalOutput {
    pub coverage: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Kernel used for a density curve.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KernelOutput {
    pub name: &'static str,
    pub bandwidth: f64,
}

impl From<Kernel> for KernelOutput {
    fn from(k: Kernel) -> Self {
        Self {
            name: k.name(),
            bandwidth: k.bandwidth(),
        }
    }
}

/// Output of `absorb`.
#[derive(Debug, Serialize)]
pub struct AbsorbOutput {
    pub n_transient: usize,
    pub n_absorbing: usize,
    pub state_names: Vec<String>,
    pub matrix: Matrix,
    pub q_labels: LabelMatrix,
    pub block_form: LabelMatrix,
    pub limit_form: LabelMatrix,
    #[serde(flatten)]
    pub analysis: AbsorptionAnalysis,
}

/// Output of `simulate` in step, fast-forward or animate mode.
#[derive(Debug, Serialize)]
pub struct TrajectoryOutput {
    pub mode: &'static str,
    pub seed: Option<u64>,
    pub highlight_rule: AbsorptionHighlight,
    pub phase: Phase,
    pub steps: usize,
    pub trajectory: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub named_trajectory: Option<Vec<String>>,
    pub highlight: Option<Highlight>,
    pub events: Vec<StepEvent>,
}

/// Output of `simulate --runs`.
#[derive(Debug, Serialize)]
pub struct MonteCarloOutput {
    pub seed: Option<u64>,
    pub runs: usize,
    pub initial_state: usize,
    pub absorbing_states: Vec<String>,
    pub simulated: Vec<f64>,
    pub analytic: Option<Vec<f64>>,
}

/// Looks up display names for state indices, falling back to the index.
pub fn state_names(names: &[String], states: impl IntoIterator<Item = usize>) -> Vec<String> {
    states
        .into_iter()
        .map(|s| names.get(s).cloned().unwrap_or_else(|| s.to_string()))
        .collect()
}

/// Writes `value` as pretty JSON to `path`, or to stdout if `None`.
pub fn write_json<T: Serialize>(value: &T, path: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialise report")?;
    match path {
        Some(p) => {
            std::fs::write(p, &json)
                .with_context(|| format!("failed to write report: {}", p.display()))?;
            info!(path = %p.display(), "report written");
        }
        None => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{json}").context("failed to write report to stdout")?;
        }
    }
    Ok(())
}
