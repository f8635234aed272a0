//! Frame timing: beat periods and animation time axes.
//!
//! Two modes of angular frequencies $\omega_1 \neq \omega_2$ return to the
//! same relative phase after the beat period
//!
//! $$
//! T_\text{beat} = \frac{2\pi}{|\omega_1 - \omega_2|}.
//! $$
//!
//! A two-mode animation spanning one beat period therefore loops seamlessly.
//! With more modes the frames only repeat after a common period of all the
//! pairwise beats, which [`TimeSpan::Beat`] does not compute.

use std::f64::consts::PI;

use ndarray::Array1;

use crate::error::FieldError;
use crate::grid::linspace;

/// Frequencies closer than this are treated as equal.
const FREQUENCY_TOLERANCE: f64 = 1e-12;

/// Beat period for the smallest non-zero pairwise frequency difference.
pub fn beat_period(omegas: &[f64]) -> Result<f64, FieldError> {
    let mut min_delta = f64::INFINITY;
    for (i, a) in omegas.iter().enumerate() {
        for b in &omegas[i + 1..] {
            let delta = (a - b).abs();
            if delta > FREQUENCY_TOLERANCE && delta < min_delta {
                min_delta = delta;
            }
        }
    }
    if min_delta.is_finite() {
        Ok(2.0 * PI / min_delta)
    } else {
        Err(FieldError::NoBeat)
    }
}

/// Period of the slowest oscillating mode, $2\pi / \min\omega$.
pub fn slowest_period(omegas: &[f64]) -> Result<f64, FieldError> {
    omegas
        .iter()
        .copied()
        .filter(|w| *w > FREQUENCY_TOLERANCE)
        .fold(None, |acc: Option<f64>, w| Some(acc.map_or(w, |m| m.min(w))))
        .map(|w| 2.0 * PI / w)
        .ok_or(FieldError::NoPeriod)
}

/// Time range covered by an animation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeSpan {
    /// One period of the slowest beat.
    #[default]
    Beat,
    /// One period of the slowest mode.
    SlowestPeriod,
    /// `[0, 2π]`.
    FullCycle,
    /// Explicit `[start, end]`.
    Fixed { start: f64, end: f64 },
}

impl TimeSpan {
    /// Resolve to a concrete `(start, end)` range.
    ///
    /// A span that cannot be derived from the given frequencies (one mode,
    /// degenerate frequencies) falls back to `[0, 2π]`.
    pub fn resolve(&self, omegas: &[f64]) -> Result<(f64, f64), FieldError> {
        let derived = match self {
            Self::Fixed { start, end } => {
                if !(start.is_finite() && end.is_finite()) || end < start {
                    return Err(FieldError::InvalidTimeSpan { start: *start, end: *end });
                }
                return Ok((*start, *end));
            }
            Self::FullCycle => return Ok((0.0, 2.0 * PI)),
            Self::Beat => beat_period(omegas),
            Self::SlowestPeriod => slowest_period(omegas),
        };

        match derived {
            Ok(period) => {
                log::debug!("Animation spans {:.4} time units", period);
                Ok((0.0, period))
            }
            Err(e) => {
                log::warn!("{}; falling back to [0, 2π]", e);
                Ok((0.0, 2.0 * PI))
            }
        }
    }
}

/// Sample `frames` instants over the resolved span.
pub fn time_axis(span: &TimeSpan, omegas: &[f64], frames: usize) -> Result<Array1<f64>, FieldError> {
    if frames == 0 {
        return Err(FieldError::NoFrames);
    }
    let (start, end) = span.resolve(omegas)?;
    Ok(linspace(start, end, frames))
}
