//! Summarize command: HDIs, equal-tailed intervals and density curves.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use cageside_hdi::{HdiConfig, SampleSet, compute_set_hdis};
use cageside_kde::KdeConfig;
use cageside_stats::{quantile_type7, summarize_sorted};

use crate::cli::SummarizeArgs;
use crate::config::{self, CagesideConfig};
use crate::convert;
use crate::report::{self, IntervalOutput, SeriesReport, SummarizeOutput};

/// Run the summarize pipeline.
pub fn run(args: SummarizeArgs) -> Result<()> {
    let _cmd = info_span!("summarize").entered();

    // 1. Load config, or fall back to defaults
    let config = match args.config.as_deref() {
        Some(path) => config::load(path)?,
        None => CagesideConfig::default(),
    };
    let hdi_cfg = convert::build_hdi_config(&config.hdi)?;
    let kde_cfg = convert::build_kde_config(&config.kde)?;

    // 2. Read samples
    let sets = crate::samples::read_samples(&args.samples)?;

    // 3. Summarise each series
    let mut output = SummarizeOutput::new();
    for (name, set) in &sets {
        let _series = info_span!("series", name = %name).entered();
        let summary = summarize_series(set, &hdi_cfg, &kde_cfg, config.hdi.equal_tailed)
            .with_context(|| format!("failed to summarise series {name:?}"))?;
        info!(
            n = summary.n,
            n_intervals = summary.hdi.len(),
            n_violations = summary.nesting_violations.len(),
            "series summarised"
        );
        output.insert(name.clone(), summary);
    }

    // 4. Write report
    report::write_json(&output, args.output.as_deref())
}

/// Summarises one sample set.
///
/// Empty sets produce an empty interval list and a zero density curve.
pub fn summarize_series(
    set: &SampleSet,
    hdi_cfg: &HdiConfig,
    kde_cfg: &KdeConfig,
    equal_tailed: bool,
) -> Result<SeriesReport> {
    let sorted = set.sorted();
    let hdi =
        compute_set_hdis(set, hdi_cfg.coverage_levels()).context("HDI computation failed")?;
    let nesting_violations = hdi.nesting_violations();

    let equal_tailed = if equal_tailed && !sorted.is_empty() {
        hdi.iter()
            .map(|iv| {
                let p = iv.coverage();
                IntervalOutput {
                    coverage: p,
                    lower: quantile_type7(sorted, (1.0 - p) / 2.0),
                    upper: quantile_type7(sorted, (1.0 + p) / 2.0),
                }
            })
            .collect()
    } else {
        Vec::new()
    };

    let density = kde_cfg.estimate(sorted).context("density estimation failed")?;

    Ok(SeriesReport {
        n: set.len(),
        stats: summarize_sorted(sorted).map(Into::into),
        hdi,
        equal_tailed,
        nesting_violations,
        kernel: kde_cfg.kernel().into(),
        density,
    })
}
