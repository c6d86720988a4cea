//! Fixed-bandwidth kernel density curves for posterior charts.
//!
//! Each grid point `x` gets `(1/n) * Σ K(x - s)` over the samples `s`.
//! Bandwidth is a caller-supplied constant; nothing here picks one
//! automatically, because chart shapes are tuned against fixed values.
//!
//! | Kernel | Support | Default bandwidth |
//! |--------|---------|-------------------|
//! | Epanechnikov | `[-h, h]` | 0.05 |
//! | Gaussian | unbounded | 0.05 (σ) |
//!
//! # Quick start
//!
//! ```
//! use cageside_kde::{Kernel, estimate_with, step_range};
//!
//! let grid = step_range(0.0, 1.0, 0.01).unwrap();
//! let curve = estimate_with(&[0.55, 0.58, 0.61], &grid, Kernel::gaussian(0.05));
//! assert!(curve.points().iter().all(|p| p.density >= 0.0));
//! ```

pub mod config;
pub mod density;
pub mod error;
pub mod grid;
pub mod kernel;

pub use config::KdeConfig;
pub use density::{DensityCurve, DensityPoint, estimate_density, estimate_with};
pub use error::KdeError;
pub use grid::{GridSpec, step_range, ticks};
pub use kernel::{DEFAULT_BANDWIDTH, Kernel};
