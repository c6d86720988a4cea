//! Highest-density intervals (HDIs) over sampled posteriors.
//!
//! An HDI at coverage `p` is the narrowest contiguous window of the sorted
//! samples holding `floor(p * n) + 1` draws. Ties go to the leftmost window.
//!
//! # Pipeline
//!
//! ```text
//!  ┌──────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  SampleSet   │────▶│  hdi / hdis    │────▶│  HdiSet          │
//!  │  (flatten,   │     │  (narrowest    │     │  (per level,     │
//!  │   sort once) │     │   window)      │     │   nesting check) │
//!  └──────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use cageside_hdi::{HdiConfig, SampleSet};
//!
//! let draws = [0.52, 0.61, 0.58, 0.49, 0.55, 0.63, 0.57, 0.60];
//! let set = SampleSet::new(&draws).unwrap();
//! let config = HdiConfig::new();
//!
//! let hdis = set.hdis(config.coverage_levels()).unwrap();
//! for iv in &hdis {
//!     assert!(iv.lower() <= iv.upper());
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod interval;
pub mod samples;

pub use batch::{HdiSet, NestingViolation, compute_hdis, compute_set_hdis};
pub use config::{DEFAULT_COVERAGE_LEVELS, HdiConfig};
pub use error::HdiError;
pub use interval::{HdiInterval, compute_hdi};
pub use samples::SampleSet;
