//! Errors raised while building scenes and evaluating fields.

use thiserror::Error;

/// Errors that can occur while constructing modes, grids or frames.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("Polarisation vector {0:?} has zero or non-finite length")]
    DegeneratePolarisation([f64; 2]),

    #[error("Grid has no points")]
    EmptyGrid,

    #[error("Subsample step must be at least 1")]
    InvalidStep,

    #[error("Expected {expected} coefficients, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Cannot renormalise: all amplitudes are zero")]
    ZeroNorm,

    #[error("No beat frequency: need at least two modes with distinct frequencies")]
    NoBeat,

    #[error("No non-zero frequency to derive a period from")]
    NoPeriod,

    #[error("Frame count must be at least 1")]
    NoFrames,

    #[error("Invalid time span [{start}, {end}]")]
    InvalidTimeSpan { start: f64, end: f64 },

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
}
