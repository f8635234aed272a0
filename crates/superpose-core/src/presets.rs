//! Scenes and the built-in presets.

use std::f64::consts::{FRAC_PI_2, PI};

use num_complex::Complex64;

use crate::animation::{AnimationSettings, AxisRanges, ComplexSettings, TraceMode};
use crate::error::FieldError;
use crate::grid::{Grid1d, Grid2d};
use crate::timing::TimeSpan;
use crate::types::{normalise_amplitudes, with_reality_partners, Mode1d, Mode2d, Polarisation};

/// A ready-to-run scene.
#[derive(Debug, Clone)]
pub enum Scene {
    /// Polarised 1D animation of the real field.
    Polarised {
        modes: Vec<Mode1d>,
        grid: Grid1d,
        settings: AnimationSettings,
    },
    /// Scalar 1D animation of the complex field.
    Complex {
        modes: Vec<Mode1d>,
        grid: Grid1d,
        settings: ComplexSettings,
    },
    /// 2D quiver; mode amplitudes are the combination coefficients.
    Quiver { modes: Vec<Mode2d>, grid: Grid2d },
}

impl Scene {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Polarised { .. } => "polarised_1d",
            Self::Complex { .. } => "complex_1d",
            Self::Quiver { .. } => "quiver_2d",
        }
    }

    pub fn mode_count(&self) -> usize {
        match self {
            Self::Polarised { modes, .. } | Self::Complex { modes, .. } => modes.len(),
            Self::Quiver { modes, .. } => modes.len(),
        }
    }
}

/// Name and one-line description of every preset.
pub const PRESETS: [(&str, &str); 7] = [
    ("single", "One x-polarised travelling wave"),
    ("circular", "Two orthogonal modes a quarter period apart: circular polarisation"),
    ("standing", "Counter-propagating modes of equal amplitude: standing wave"),
    ("mixed", "Standing wave plus a fast orthogonal mode"),
    ("beat", "Orthogonal modes at k = 1 and 1.3, animated over one beat period"),
    ("counter-propagating", "Complex field of a +k mode and its conjugate partner"),
    ("four-orientation", "2D quiver basis with four wavevector orientations"),
];

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Unit phasor $e^{i\phi}$.
fn phase(phi: f64) -> Complex64 {
    Complex64::from_polar(1.0, phi)
}

fn polarised(mut modes: Vec<Mode1d>) -> Result<Scene, FieldError> {
    normalise_amplitudes(&mut modes)?;
    Ok(Scene::Polarised {
        modes,
        grid: Grid1d::new(0.0, 4.0 * PI, 1000)?,
        settings: AnimationSettings { span: TimeSpan::SlowestPeriod, ..Default::default() },
    })
}

/// Look up a preset by name.
pub fn preset(name: &str) -> Result<Scene, FieldError> {
    let x = Polarisation::first();
    let y = Polarisation::second();

    match name {
        "single" => polarised(vec![Mode1d::new(1.0, x, c(1.0, 0.0))]),
        "circular" => polarised(vec![
            Mode1d::new(1.0, x, phase(-FRAC_PI_2)),
            Mode1d::new(1.0, y, c(1.0, 0.0)),
        ]),
        "standing" => polarised(vec![
            Mode1d::new(1.0, x, c(1.0, 0.0)),
            Mode1d::new(-1.0, x, c(1.0, 0.0)),
        ]),
        "mixed" => polarised(vec![
            Mode1d::new(1.0, x, c(1.0, 0.0)),
            Mode1d::new(-1.0, x, c(1.0, 0.0)),
            Mode1d::new(10.0, y, phase(-FRAC_PI_2)),
        ]),
        "beat" => Ok(Scene::Polarised {
            modes: vec![Mode1d::new(1.0, x, c(1.0, 0.0)), Mode1d::new(1.3, y, c(1.0, 0.0))],
            grid: Grid1d::new(-10.0, 10.0, 200)?,
            settings: AnimationSettings {
                trace: TraceMode::ProbeOnly,
                axes: AxisRanges::Fitted,
                ..Default::default()
            },
        }),
        "counter-propagating" => Ok(Scene::Complex {
            modes: with_reality_partners(&[Mode1d::scalar(1.0, c(2.0, 1.0))]),
            grid: Grid1d::new(-10.0, 10.0, 200)?,
            settings: ComplexSettings::default(),
        }),
        "four-orientation" => {
            let wavevectors = [[1.0, 0.0], [0.0, 1.0], [1.0, 1.0], [-1.0, 1.0]];
            let polarisations = [[0.0, 1.0], [1.0, 0.0], [1.0, -1.0], [1.0, 1.0]];
            // Only the first mode is switched on initially.
            let modes = wavevectors
                .iter()
                .zip(polarisations)
                .enumerate()
                .map(|(i, (&k, p))| {
                    let j = if i == 0 { c(1.0, 0.0) } else { c(0.0, 0.0) };
                    Ok(Mode2d::new(k, Polarisation::new(p)?, j))
                })
                .collect::<Result<Vec<_>, FieldError>>()?;
            Ok(Scene::Quiver { modes, grid: Grid2d::square(10.0, 50)? })
        }
        other => Err(FieldError::UnknownPreset(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_preset_builds() {
        for (name, _) in PRESETS {
            assert!(preset(name).is_ok(), "preset '{}' failed to build", name);
        }
    }

    #[test]
    fn test_scene_kinds() {
        assert_eq!(preset("single").unwrap().kind(), "polarised_1d");
        assert_eq!(preset("counter-propagating").unwrap().mode_count(), 2);
    }

    #[test]
    fn test_polarised_presets_span_slowest_period() {
        for name in ["single", "circular", "standing", "mixed"] {
            let Scene::Polarised { modes, settings, .. } = preset(name).unwrap() else {
                panic!("'{}' is not polarised", name);
            };
            assert_eq!(settings.span, TimeSpan::SlowestPeriod, "{}", name);
            let omegas: Vec<f64> = modes.iter().map(|m| m.omega(settings.wave_speed)).collect();
            assert_eq!(settings.span.resolve(&omegas).unwrap(), (0.0, 2.0 * PI), "{}", name);
        }
        match preset("beat").unwrap() {
            Scene::Polarised { settings, .. } => assert_eq!(settings.span, TimeSpan::Beat),
            other => panic!("unexpected preset {:?}", other),
        }
    }

    #[test]
    fn test_mixed_preset_loops() {
        let Scene::Polarised { modes, grid, settings } = preset("mixed").unwrap() else {
            panic!("'mixed' is not polarised");
        };
        let anim = crate::animation::PolarisedAnimation::build(&modes, &grid, &settings).unwrap();
        let first = anim.frames[0].total_arrow.head;
        let last = anim.frames[anim.frames.len() - 1].total_arrow.head;
        for axis in 0..3 {
            assert!((first[axis] - last[axis]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_unknown_preset() {
        assert!(matches!(preset("nope"), Err(FieldError::UnknownPreset(_))));
    }

    #[test]
    fn test_quiver_preset_shape() {
        match preset("four-orientation").unwrap() {
            Scene::Quiver { modes, grid } => {
                assert_eq!(modes.len(), 4);
                assert_eq!(modes[0].amplitude, c(1.0, 0.0));
                assert_eq!(modes[3].amplitude, c(0.0, 0.0));
                assert_eq!(grid.dim(), (50, 50));
            }
            other => panic!("unexpected preset {:?}", other),
        }
    }
}
