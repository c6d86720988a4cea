use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cageside posterior summaries and Markov-chain explainers.
#[derive(Parser)]
#[command(
    name = "cageside",
    version,
    about = "Posterior summaries and absorbing Markov-chain explainers"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Summarise posterior samples: HDIs, equal-tailed intervals and a density curve.
    Summarize(SummarizeArgs),
    /// Solve an absorbing chain: full matrix, fundamental matrix and absorption probabilities.
    Absorb(AbsorbArgs),
    /// Simulate an absorbing chain step by step.
    Simulate(SimulateArgs),
}

/// Arguments for the `summarize` subcommand.
#[derive(clap::Args)]
pub struct SummarizeArgs {
    /// Path to posterior samples JSON.
    #[arg(short, long)]
    pub samples: PathBuf,

    /// Path to TOML configuration file; built-in defaults if omitted.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `absorb` subcommand.
#[derive(clap::Args)]
pub struct AbsorbArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cageside.toml")]
    pub config: PathBuf,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "cageside.toml")]
    pub config: PathBuf,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Jump straight to absorption instead of stepping.
    #[arg(long, conflicts_with_all = ["runs", "animate"])]
    pub fast_forward: bool,

    /// Run this many trajectories and compare absorption frequencies with
    /// the closed-form probabilities.
    #[arg(long, conflicts_with = "animate")]
    pub runs: Option<usize>,

    /// Step in real time at the configured interval, printing each step.
    #[arg(long)]
    pub animate: bool,

    /// Write the JSON report here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
