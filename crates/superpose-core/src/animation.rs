//! Precomputed animation frames.
//!
//! Frames are computed sequentially for the whole time axis before anything
//! is rendered, so every renderer (Plotly HTML, GIF, egui playback) works from
//! the same data.

use ndarray::Array1;
use serde::Serialize;

use crate::error::FieldError;
use crate::grid::Grid1d;
use crate::superposition::{complex_parts, polarised_field, ComplexParts};
use crate::timing::{time_axis, TimeSpan};
use crate::types::{FieldConvention, Mode1d, DEFAULT_WAVE_SPEED};

/// Colours cycled over modes when drawing probe arrows.
pub const MODE_PALETTE: [(&str, [u8; 3]); 5] = [
    ("red", [220, 40, 40]),
    ("green", [40, 170, 60]),
    ("orange", [255, 150, 0]),
    ("magenta", [220, 0, 220]),
    ("cyan", [0, 200, 220]),
];

/// Colour of the total-field probe arrow.
pub const TOTAL_COLOUR: (&str, [u8; 3]) = ("magenta", [220, 0, 220]);

/// Palette entry for mode `idx`.
pub fn mode_colour(idx: usize) -> (&'static str, [u8; 3]) {
    MODE_PALETTE[idx % MODE_PALETTE.len()]
}

/// A straight segment from `tail` to `head` in `(x, y, z)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Arrow {
    pub tail: [f64; 3],
    pub head: [f64; 3],
}

/// Whether frames carry the full field-tip trace or only the probe arrows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceMode {
    #[default]
    Full,
    ProbeOnly,
}

/// How plot ranges are chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisRanges {
    /// Fixed transverse ranges; x always spans the grid.
    Fixed { y: [f64; 2], z: [f64; 2] },
    /// Ranges that contain every point of every frame.
    Fitted,
}

impl Default for AxisRanges {
    fn default() -> Self {
        Self::Fixed { y: [-4.0, 4.0], z: [-4.0, 4.0] }
    }
}

/// Resolved `[min, max]` range of each axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds3 {
    pub x: [f64; 2],
    pub y: [f64; 2],
    pub z: [f64; 2],
}

/// Parameters of a polarised animation.
#[derive(Debug, Clone)]
pub struct AnimationSettings {
    pub frames: usize,
    pub span: TimeSpan,
    pub trace: TraceMode,
    pub axes: AxisRanges,
    /// Length scale applied to field vectors when drawn.
    pub scale: f64,
    pub wave_speed: f64,
    /// Draw every `step`-th grid point.
    pub step: usize,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            frames: 100,
            span: TimeSpan::Beat,
            trace: TraceMode::Full,
            axes: AxisRanges::default(),
            scale: 1.0,
            wave_speed: DEFAULT_WAVE_SPEED,
            step: 1,
        }
    }
}

/// One precomputed frame of the polarised animation.
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub t: f64,
    /// Frame name, the time with two decimals.
    pub label: String,
    /// Heads of the total field vectors along the grid.
    pub trace: Option<Vec<[f64; 3]>>,
    /// Per-mode field at the probe point, in mode order.
    pub mode_arrows: Vec<Arrow>,
    /// Total field at the probe point.
    pub total_arrow: Arrow,
}

impl Frame {
    fn points(&self) -> impl Iterator<Item = &[f64; 3]> {
        self.trace
            .iter()
            .flatten()
            .chain(self.mode_arrows.iter().flat_map(|a| [&a.tail, &a.head]))
            .chain([&self.total_arrow.tail, &self.total_arrow.head])
    }
}

/// Every frame of a polarised 1D animation plus the plot ranges.
#[derive(Debug, Clone, Serialize)]
pub struct PolarisedAnimation {
    pub times: Array1<f64>,
    pub frames: Vec<Frame>,
    pub bounds: Bounds3,
    pub mode_count: usize,
}

impl PolarisedAnimation {
    pub fn build(
        modes: &[Mode1d],
        grid: &Grid1d,
        settings: &AnimationSettings,
    ) -> Result<Self, FieldError> {
        let grid = grid.subsample(settings.step)?;
        let probe_x = grid.origin().ok_or(FieldError::EmptyGrid)?;
        let omegas: Vec<f64> = modes.iter().map(|m| m.omega(settings.wave_speed)).collect();
        let times = time_axis(&settings.span, &omegas, settings.frames)?;
        let s = settings.scale;

        let mut frames = Vec::with_capacity(times.len());
        for &t in times.iter() {
            let field = polarised_field(modes, &grid, t, settings.wave_speed)?;

            let trace = match settings.trace {
                TraceMode::Full => Some(
                    grid.x
                        .iter()
                        .enumerate()
                        .map(|(i, &x)| [x, s * field.v[i], s * field.w[i]])
                        .collect(),
                ),
                TraceMode::ProbeOnly => None,
            };

            let tail = [probe_x, 0.0, 0.0];
            let mode_arrows = field
                .modes
                .iter()
                .map(|m| {
                    let [vy, vz] = m.vector_at(0);
                    Arrow { tail, head: [probe_x, s * vy, s * vz] }
                })
                .collect();
            let [ty, tz] = field.total_at(0);
            let total_arrow = Arrow { tail, head: [probe_x, s * ty, s * tz] };

            frames.push(Frame { t, label: format!("{t:.2}"), trace, mode_arrows, total_arrow });
        }

        let (x_min, x_max) = grid.bounds().ok_or(FieldError::EmptyGrid)?;
        let bounds = match settings.axes {
            AxisRanges::Fixed { y, z } => Bounds3 { x: [x_min, x_max], y, z },
            AxisRanges::Fitted => fitted_bounds(&frames, [x_min, x_max]),
        };
        log::debug!("Precomputed {} frames over {} grid points", frames.len(), grid.len());

        Ok(Self { times, frames, bounds, mode_count: modes.len() })
    }
}

fn fitted_bounds(frames: &[Frame], x: [f64; 2]) -> Bounds3 {
    // The zero baseline is always part of the drawing.
    let mut y = [0.0_f64, 0.0_f64];
    let mut z = [0.0_f64, 0.0_f64];
    for p in frames.iter().flat_map(Frame::points) {
        y = [y[0].min(p[1]), y[1].max(p[1])];
        z = [z[0].min(p[2]), z[1].max(p[2])];
    }
    Bounds3 { x, y, z }
}

/// Direction of travel of a 1D mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Static,
}

impl Direction {
    pub fn of(mode: &Mode1d) -> Self {
        if mode.k > 0.0 {
            Self::Right
        } else if mode.k < 0.0 {
            Self::Left
        } else {
            Self::Static
        }
    }
}

/// Parameters of a scalar complex-field animation.
#[derive(Debug, Clone)]
pub struct ComplexSettings {
    pub frames: usize,
    pub span: TimeSpan,
    pub wave_speed: f64,
    pub convention: FieldConvention,
}

impl Default for ComplexSettings {
    fn default() -> Self {
        Self {
            frames: 100,
            span: TimeSpan::Fixed { start: 0.0, end: 10.0 },
            wave_speed: DEFAULT_WAVE_SPEED,
            convention: FieldConvention::Complex,
        }
    }
}

/// Precomputed frames of a scalar complex-field animation.
#[derive(Debug, Clone)]
pub struct ComplexAnimation {
    pub frames: Vec<ComplexParts>,
    pub directions: Vec<Direction>,
    pub x_range: [f64; 2],
}

impl ComplexAnimation {
    pub fn build(
        modes: &[Mode1d],
        grid: &Grid1d,
        settings: &ComplexSettings,
    ) -> Result<Self, FieldError> {
        let omegas: Vec<f64> = modes.iter().map(|m| m.omega(settings.wave_speed)).collect();
        let times = time_axis(&settings.span, &omegas, settings.frames)?;
        let frames = times
            .iter()
            .map(|&t| complex_parts(modes, grid, t, settings.wave_speed, settings.convention))
            .collect::<Result<Vec<_>, _>>()?;
        let (lo, hi) = grid.bounds().ok_or(FieldError::EmptyGrid)?;

        Ok(Self {
            frames,
            directions: modes.iter().map(Direction::of).collect(),
            x_range: [lo, hi],
        })
    }

    /// Indices of the modes travelling in `direction`.
    pub fn modes_moving(&self, direction: Direction) -> Vec<usize> {
        self.directions
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == direction)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Polarisation;
    use num_complex::Complex64;
    use std::f64::consts::PI;

    fn modes() -> Vec<Mode1d> {
        vec![
            Mode1d::new(1.0, Polarisation::first(), Complex64::new(1.0, 0.0)),
            Mode1d::new(1.3, Polarisation::second(), Complex64::new(1.0, 0.0)),
        ]
    }

    #[test]
    fn test_frame_count_and_labels() {
        let grid = Grid1d::new(-10.0, 10.0, 200).unwrap();
        let settings = AnimationSettings { frames: 25, ..Default::default() };
        let anim = PolarisedAnimation::build(&modes(), &grid, &settings).unwrap();
        assert_eq!(anim.frames.len(), 25);
        assert_eq!(anim.frames[0].label, "0.00");
        let last = anim.frames.last().unwrap();
        assert_eq!(last.label, format!("{:.2}", 2.0 * PI / 0.3));
        assert_eq!(last.mode_arrows.len(), 2);
        assert_eq!(last.trace.as_ref().unwrap().len(), 200);
    }

    #[test]
    fn test_probe_arrows_anchor_at_first_point() {
        let grid = Grid1d::new(-10.0, 10.0, 50).unwrap();
        let settings = AnimationSettings {
            frames: 3,
            trace: TraceMode::ProbeOnly,
            ..Default::default()
        };
        let anim = PolarisedAnimation::build(&modes(), &grid, &settings).unwrap();
        for frame in &anim.frames {
            assert!(frame.trace.is_none());
            assert_eq!(frame.total_arrow.tail, [-10.0, 0.0, 0.0]);
            // Orthogonal polarisations: the total is the sum of the mode arrows.
            let sum_y: f64 = frame.mode_arrows.iter().map(|a| a.head[1]).sum();
            let sum_z: f64 = frame.mode_arrows.iter().map(|a| a.head[2]).sum();
            assert!((sum_y - frame.total_arrow.head[1]).abs() < 1e-12);
            assert!((sum_z - frame.total_arrow.head[2]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_fitted_bounds_contain_all_points() {
        let grid = Grid1d::new(0.0, 4.0 * PI, 100).unwrap();
        let settings = AnimationSettings {
            frames: 10,
            axes: AxisRanges::Fitted,
            scale: 1.5,
            ..Default::default()
        };
        let anim = PolarisedAnimation::build(&modes(), &grid, &settings).unwrap();
        let b = anim.bounds;
        assert!(b.y[0] <= 0.0 && b.y[1] >= 0.0);
        for p in anim.frames.iter().flat_map(Frame::points) {
            assert!(p[1] >= b.y[0] && p[1] <= b.y[1]);
            assert!(p[2] >= b.z[0] && p[2] <= b.z[1]);
        }
        assert_eq!(b.x, [0.0, 4.0 * PI]);
    }

    #[test]
    fn test_step_thins_trace() {
        let grid = Grid1d::new(0.0, 1.0, 10).unwrap();
        let settings = AnimationSettings { frames: 1, step: 4, ..Default::default() };
        let anim = PolarisedAnimation::build(&modes(), &grid, &settings).unwrap();
        assert_eq!(anim.frames[0].trace.as_ref().unwrap().len(), 3);
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(mode_colour(0).0, "red");
        assert_eq!(mode_colour(5).0, "red");
        assert_eq!(mode_colour(7).0, "orange");
    }

    #[test]
    fn test_complex_animation_directions() {
        let grid = Grid1d::new(-10.0, 10.0, 20).unwrap();
        let modes = vec![
            Mode1d::scalar(1.0, Complex64::new(2.0, 1.0)),
            Mode1d::scalar(-1.0, Complex64::new(2.0, -1.0)),
            Mode1d::scalar(1.0, Complex64::new(0.5, 0.0)),
        ];
        let settings = ComplexSettings { frames: 5, ..Default::default() };
        let anim = ComplexAnimation::build(&modes, &grid, &settings).unwrap();
        assert_eq!(anim.frames.len(), 5);
        assert_eq!(anim.modes_moving(Direction::Right), vec![0, 2]);
        assert_eq!(anim.modes_moving(Direction::Left), vec![1]);
        assert_eq!(anim.x_range, [-10.0, 10.0]);
        assert_eq!(anim.frames[4].t, 10.0);
    }
}
