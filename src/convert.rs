//! Pure conversion functions: TOML config structs -> crate API config types.

use std::time::Duration;

use anyhow::{Context, Result, bail};

use crate::config::*;

use cageside_hdi::HdiConfig;
use cageside_kde::{GridSpec, KdeConfig, Kernel};
use cageside_markov::{AbsorbingChain, AbsorptionHighlight, SimulationConfig};

/// Parses a kernel name and bandwidth into a [`Kernel`].
pub fn parse_kernel(name: &str, bandwidth: f64) -> Result<Kernel> {
    match name.to_lowercase().as_str() {
        "epanechnikov" => Ok(Kernel::epanechnikov(bandwidth)),
        "gaussian" => Ok(Kernel::gaussian(bandwidth)),
        other => bail!("unknown kernel: {other:?}"),
    }
}

/// Converts a TOML grid into a [`GridSpec`].
///
/// At most one of `step`, `ticks` or `points` may be set.
pub fn parse_grid(g: &GridToml) -> Result<GridSpec> {
    match (g.step, g.ticks, &g.points) {
        (None, None, None) => Ok(GridSpec::Step {
            start: g.start,
            stop: g.stop,
            step: 0.01,
        }),
        (Some(step), None, None) => Ok(GridSpec::Step {
            start: g.start,
            stop: g.stop,
            step,
        }),
        (None, Some(count), None) => Ok(GridSpec::Ticks {
            start: g.start,
            stop: g.stop,
            count,
        }),
        (None, None, Some(points)) => Ok(GridSpec::Explicit(points.clone())),
        _ => bail!("grid must have at most one of step, ticks or points"),
    }
}

/// Parses a simulator variant name into its preset.
pub fn parse_variant(s: &str) -> Result<SimulationConfig> {
    match s.to_lowercase().as_str() {
        "interactive" => Ok(SimulationConfig::interactive()),
        "explainer" => Ok(SimulationConfig::explainer()),
        other => bail!("unknown simulator variant: {other:?}"),
    }
}

/// Parses an absorption highlight name.
pub fn parse_highlight(s: &str) -> Result<AbsorptionHighlight> {
    match s.to_lowercase().replace('-', "_").as_str() {
        "self_loop" => Ok(AbsorptionHighlight::SelfLoop),
        "last_transition" => Ok(AbsorptionHighlight::LastTransition),
        other => bail!("unknown absorption highlight: {other:?}"),
    }
}

/// Builds a validated [`HdiConfig`] from the TOML HDI configuration.
pub fn build_hdi_config(hdi: &HdiToml) -> Result<HdiConfig> {
    let cfg = HdiConfig::new().with_coverage_levels(hdi.coverage_levels.clone());
    cfg.validate().context("invalid [hdi] configuration")?;
    Ok(cfg)
}

/// Builds a validated [`KdeConfig`] from the TOML density configuration.
pub fn build_kde_config(kde: &KdeToml) -> Result<KdeConfig> {
    let kernel = parse_kernel(&kde.kernel, kde.bandwidth)?;
    let grid = parse_grid(&kde.grid)?;
    let cfg = KdeConfig::new().with_kernel(kernel).with_grid(grid);
    cfg.validate().context("invalid [kde] configuration")?;
    Ok(cfg)
}

/// Builds a validated [`AbsorbingChain`] from the TOML chain definition.
///
/// The chain must be column-stochastic, and `state_names`, if given, must
/// name every state.
pub fn build_chain(chain: &ChainToml) -> Result<AbsorbingChain> {
    let built = AbsorbingChain::from_cells(&chain.q, &chain.r)
        .context("failed to assemble chain from [chain] q and r")?;
    built
        .validate()
        .context("[chain] is not column-stochastic")?;
    if !chain.state_names.is_empty() && chain.state_names.len() != built.n_states() {
        bail!(
            "[chain] state_names has {} entries, chain has {} states",
            chain.state_names.len(),
            built.n_states()
        );
    }
    Ok(built)
}

/// Builds a [`SimulationConfig`] from the variant preset plus overrides.
pub fn build_simulation_config(sim: &SimulationToml) -> Result<SimulationConfig> {
    let mut cfg = parse_variant(&sim.variant)?
        .with_step_interval(Duration::from_millis(sim.step_interval_ms))
        .with_initial_state(sim.initial_state)
        .with_max_steps(sim.max_steps);
    if let Some(ref h) = sim.highlight {
        cfg = cfg.with_highlight(parse_highlight(h)?);
    }
    cfg.validate().context("invalid [simulation] configuration")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cageside_markov::MatrixCell;

    fn chain_toml(q: Vec<Vec<MatrixCell>>, r: Vec<Vec<MatrixCell>>) -> ChainToml {
        ChainToml {
            q,
            r,
            state_names: Vec::new(),
        }
    }

    #[test]
    fn kernels() {
        assert_eq!(parse_kernel("Gaussian", 0.1).unwrap(), Kernel::gaussian(0.1));
        assert_eq!(
            parse_kernel("epanechnikov", 0.05).unwrap(),
            Kernel::epanechnikov(0.05)
        );
        assert!(parse_kernel("box", 0.05).is_err());
    }

    #[test]
    fn grids() {
        let mut g = GridToml::default();
        assert_eq!(parse_grid(&g).unwrap(), GridSpec::Step {
            start: 0.0,
            stop: 1.0,
            step: 0.01
        });
        g.ticks = Some(100);
        assert!(matches!(
            parse_grid(&g).unwrap(),
            GridSpec::Ticks { count: 100, .. }
        ));
        g.points = Some(vec![0.1, 0.2]);
        assert!(parse_grid(&g).is_err());
    }

    #[test]
    fn kde_config_rejects_bad_bandwidth() {
        let kde = KdeToml {
            bandwidth: 0.0,
            ..KdeToml::default()
        };
        assert!(build_kde_config(&kde).is_err());
    }

    #[test]
    fn hdi_config_rejects_bad_level() {
        let hdi = HdiToml {
            coverage_levels: vec![0.5, 1.0],
            equal_tailed: true,
        };
        let err = build_hdi_config(&hdi).unwrap_err();
        assert!(format!("{err:#}").contains("invalid [hdi] configuration"));
    }

    #[test]
    fn variants_and_highlight_override() {
        let mut sim = SimulationToml::default();
        let cfg = build_simulation_config(&sim).unwrap();
        assert!(cfg.fast_forward());
        assert_eq!(cfg.highlight(), AbsorptionHighlight::SelfLoop);

        sim.variant = "explainer".to_string();
        sim.step_interval_ms = 250;
        let cfg = build_simulation_config(&sim).unwrap();
        assert!(!cfg.fast_forward());
        assert_eq!(cfg.highlight(), AbsorptionHighlight::LastTransition);
        assert_eq!(cfg.step_interval(), Duration::from_millis(250));

        sim.highlight = Some("self-loop".to_string());
        let cfg = build_simulation_config(&sim).unwrap();
        assert_eq!(cfg.highlight(), AbsorptionHighlight::SelfLoop);
        assert!(!cfg.fast_forward());

        sim.variant = "duplicate".to_string();
        assert!(build_simulation_config(&sim).is_err());
    }

    #[test]
    fn zero_interval_rejected() {
        let sim = SimulationToml {
            step_interval_ms: 0,
            ..SimulationToml::default()
        };
        assert!(build_simulation_config(&sim).is_err());
    }

    #[test]
    fn chain_builds_and_validates() {
        let ok = chain_toml(vec![vec![0.6.into()]], vec![vec![0.4.into()]]);
        let chain = build_chain(&ok).unwrap();
        assert_eq!(chain.n_states(), 2);

        let bad = chain_toml(vec![vec![0.6.into()]], vec![vec!["R".into()]]);
        let err = build_chain(&bad).unwrap_err();
        assert!(format!("{err:#}").contains("not column-stochastic"));
    }

    #[test]
    fn chain_state_names_must_cover_states() {
        let mut c = chain_toml(vec![vec![0.6.into()]], vec![vec![0.4.into()]]);
        c.state_names = vec!["standing".to_string()];
        assert!(build_chain(&c).is_err());
        c.state_names.push("finished".to_string());
        assert!(build_chain(&c).is_ok());
    }

    #[test]
    fn bundled_config_builds() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("cageside.toml");
        let config = crate::config::load(&path).unwrap();
        let chain = build_chain(config.chain.as_ref().unwrap()).unwrap();
        assert_eq!(chain.n_transient(), 3);
        assert_eq!(chain.n_absorbing(), 3);
        let sim = build_simulation_config(&config.simulation).unwrap();
        assert_eq!(sim.step_interval(), Duration::from_millis(500));
        assert_eq!(sim.max_steps(), 10_000);
        build_hdi_config(&config.hdi).unwrap();
        build_kde_config(&config.kde).unwrap();
    }
}
