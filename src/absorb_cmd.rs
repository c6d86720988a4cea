//! Absorb command: closed-form analysis of an absorbing chain.

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span};

use cageside_markov::{AbsorbingChain, LabelMatrix};

use crate::cli::AbsorbArgs;
use crate::config::{self, ChainToml};
use crate::convert;
use crate::report::{self, AbsorbOutput};

/// Run the absorbing-chain analysis.
pub fn run(args: AbsorbArgs) -> Result<()> {
    let _cmd = info_span!("absorb").entered();

    let config = config::load(&args.config)?;
    let chain_toml = config
        .chain
        .as_ref()
        .ok_or_else(|| anyhow!("no chain: set [chain] q and r in config"))?;
    let chain = convert::build_chain(chain_toml)?;
    info!(
        n_transient = chain.n_transient(),
        n_absorbing = chain.n_absorbing(),
        "chain loaded"
    );

    let output = analyze_chain(&chain, chain_toml)?;
    info!(expected_steps = ?output.analysis.expected_steps, "chain solved");
    report::write_json(&output, args.output.as_deref())
}

/// Builds the absorb report for a validated chain.
pub fn analyze_chain(chain: &AbsorbingChain, chain_toml: &ChainToml) -> Result<AbsorbOutput> {
    let analysis = chain
        .analyze()
        .context("fundamental matrix is undefined for this chain")?;
    Ok(AbsorbOutput {
        n_transient: chain.n_transient(),
        n_absorbing: chain.n_absorbing(),
        state_names: report::state_names(&chain_toml.state_names, 0..chain.n_states()),
        matrix: chain.matrix().clone(),
        q_labels: LabelMatrix::from_cells(&chain_toml.q)?,
        block_form: LabelMatrix::block_form(),
        limit_form: LabelMatrix::limit_form(),
        analysis,
    })
}
