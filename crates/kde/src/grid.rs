//! Evaluation grids for density curves.
//!
//! Density estimation accepts any explicit grid; these helpers produce the
//! two shapes chart axes use: a fixed-step range and "nice" round ticks.

use crate::error::KdeError;

/// Largest grid any helper will build.
const MAX_GRID_LEN: usize = 1_000_000;

/// How to build the evaluation grid.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSpec {
    /// `start + i * step` for every value below `stop`.
    Step {
        /// First grid point.
        start: f64,
        /// Exclusive upper bound.
        stop: f64,
        /// Spacing.
        step: f64,
    },
    /// Round-number ticks over `[start, stop]`, about `count` of them.
    Ticks {
        /// Axis domain start.
        start: f64,
        /// Axis domain end.
        stop: f64,
        /// Approximate number of ticks.
        count: usize,
    },
    /// A caller-supplied grid, used as-is.
    Explicit(Vec<f64>),
}

impl GridSpec {
    /// Builds the concrete grid.
    ///
    /// # Errors
    ///
    /// Returns [`KdeError::InvalidGrid`] for non-finite bounds, a
    /// non-positive step, a zero tick count, or a grid that would be
    /// unreasonably large.
    pub fn resolve(&self) -> Result<Vec<f64>, KdeError> {
        match self {
            Self::Step { start, stop, step } => step_range(*start, *stop, *step),
            Self::Ticks { start, stop, count } => ticks(*start, *stop, *count),
            Self::Explicit(points) => {
                if points.iter().any(|x| !x.is_finite()) {
                    return Err(KdeError::InvalidGrid {
                        reason: "explicit grid contains non-finite points".to_string(),
                    });
                }
                Ok(points.clone())
            }
        }
    }
}

impl Default for GridSpec {
    /// `0..1` in steps of `0.01`.
    fn default() -> Self {
        Self::Step {
            start: 0.0,
            stop: 1.0,
            step: 0.01,
        }
    }
}

fn check_finite(start: f64, stop: f64) -> Result<(), KdeError> {
    if !start.is_finite() || !stop.is_finite() {
        return Err(KdeError::InvalidGrid {
            reason: format!("bounds must be finite, got [{start}, {stop}]"),
        });
    }
    Ok(())
}

/// Evenly spaced values `start, start + step, ...` strictly below `stop`.
///
/// Points are computed by index, not by repeated addition, so they do not
/// drift. `stop <= start` yields an empty grid.
///
/// # Errors
///
/// Returns [`KdeError::InvalidGrid`] if the bounds are not finite, `step` is
/// not finite and positive, or the grid would exceed one million points.
pub fn step_range(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, KdeError> {
    check_finite(start, stop)?;
    if !step.is_finite() || step <= 0.0 {
        return Err(KdeError::InvalidGrid {
            reason: format!("step must be finite and positive, got {step}"),
        });
    }
    let n = ((stop - start) / step).ceil().max(0.0);
    if n > MAX_GRID_LEN as f64 {
        return Err(KdeError::InvalidGrid {
            reason: format!("{n} points exceeds the limit of {MAX_GRID_LEN}"),
        });
    }
    Ok((0..n as usize).map(|i| start + i as f64 * step).collect())
}

/// Tick spacing as `(first index, last index, increment)`.
///
/// A negative increment means "divide by `-inc`", which keeps sub-unit
/// ticks such as 0.01 exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let e10 = 50f64.sqrt();
    let e5 = 10f64.sqrt();
    let e2 = 2f64.sqrt();

    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= e10 {
        10.0
    } else if error >= e5 {
        5.0
    } else if error >= e2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let inv = 10f64.powf(-power) / factor;
        i1 = (start * inv).round();
        i2 = (stop * inv).round();
        if i1 / inv < start {
            i1 += 1.0;
        }
        if i2 / inv > stop {
            i2 -= 1.0;
        }
        inc = -inv;
    } else {
        let fwd = 10f64.powf(power) * factor;
        i1 = (start / fwd).round();
        i2 = (stop / fwd).round();
        if i1 * fwd < start {
            i1 += 1.0;
        }
        if i2 * fwd > stop {
            i2 -= 1.0;
        }
        inc = fwd;
    }
    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Round-number ticks covering `[start, stop]`, roughly `count` of them.
///
/// Spacing is 1, 2 or 5 times a power of ten. Reversed domains produce
/// descending ticks. `ticks(0.0, 1.0, 100)` is `0.00, 0.01, ..., 1.00`.
///
/// # Errors
///
/// Returns [`KdeError::InvalidGrid`] if the bounds are not finite or
/// `count` is zero.
pub fn ticks(start: f64, stop: f64, count: usize) -> Result<Vec<f64>, KdeError> {
    check_finite(start, stop)?;
    if count == 0 {
        return Err(KdeError::InvalidGrid {
            reason: "tick count must be >= 1".to_string(),
        });
    }
    if start == stop {
        return Ok(vec![start]);
    }
    let reverse = stop < start;
    let (lo, hi) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(lo, hi, count as f64);
    if i2 < i1 {
        return Ok(Vec::new());
    }
    let n = (i2 - i1 + 1.0) as usize;
    if n > MAX_GRID_LEN {
        return Err(KdeError::InvalidGrid {
            reason: format!("{n} ticks exceeds the limit of {MAX_GRID_LEN}"),
        });
    }
    let mut out: Vec<f64> = (0..n)
        .map(|i| {
            let idx = i1 + i as f64;
            if inc < 0.0 { idx / -inc } else { idx * inc }
        })
        .collect();
    if reverse {
        out.reverse();
    }
    Ok(out)
}
