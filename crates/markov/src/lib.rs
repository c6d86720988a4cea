//! Absorbing Markov chains for fight-outcome explainers.
//!
//! States are ordered transient first. With `n` transient and `m` absorbing
//! states the chain is written in block form
//!
//! ```text
//!        ┌       ┐
//!   P =  │ Q   O │   Q: n x n   O: n x m (zeros)
//!        │ R   I │   R: m x n   I: m x m (identity)
//!        └       ┘
//! ```
//!
//! and column `j` of `P` holds the probabilities of leaving state `j`.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  labels      │────▶│  chain         │────▶│  fundamental     │
//!  │ (cells → Q,R)│     │ (assemble P)   │     │ (N, B, steps)    │
//!  └──────────────┘     └───────┬────────┘     └──────────────────┘
//!                               │
//!                               ▼
//!                      ┌────────────────┐     ┌──────────────────┐
//!                      │  transition    │────▶│  simulator       │
//!                      │ (sample next)  │     │ (step / poll)    │
//!                      └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use cageside_markov::{AbsorbingChain, Matrix};
//!
//! let chain = AbsorbingChain::new(
//!     Matrix::from_rows(&[[0.6]]).unwrap(),
//!     Matrix::from_rows(&[[0.4]]).unwrap(),
//! )
//! .unwrap();
//! assert!(chain.validate().is_ok());
//!
//! let analysis = chain.analyze().unwrap();
//! assert!((analysis.fundamental.get(0, 0) - 2.5).abs() < 1e-12);
//! assert!((analysis.probability(0, 0) - 1.0).abs() < 1e-12);
//! ```

pub mod chain;
pub mod config;
pub mod error;
pub mod fundamental;
pub mod labels;
pub mod matrix;
pub mod simulate;
pub mod simulator;
pub mod state;
pub mod transition;

pub use chain::{AbsorbingChain, COLUMN_SUM_TOLERANCE, assemble_full_matrix};
pub use config::{AbsorptionHighlight, DEFAULT_MAX_STEPS, DEFAULT_STEP_INTERVAL, SimulationConfig};
pub use error::MarkovError;
pub use fundamental::{
    AbsorptionAnalysis, absorption_probabilities, expected_steps, fundamental_matrix, invert,
};
pub use labels::{LabelMatrix, MatrixCell, numeric_from_cells};
pub use matrix::Matrix;
pub use simulate::{estimate_absorption, simulate_trajectory};
pub use simulator::{Highlight, Phase, Simulator, StepEvent};
pub use state::{StateKind, is_absorbing};
pub use transition::sample_next_state;
