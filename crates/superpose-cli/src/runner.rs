//! Job runner: builds a scene from configuration, computes it and writes outputs.

use std::path::Path;

use anyhow::{Context, Result};

use superpose_core::animation::{
    mode_colour, AnimationSettings, AxisRanges, ComplexAnimation, ComplexSettings,
    PolarisedAnimation,
};
use superpose_core::grid::{linspace, Grid1d, Grid2d};
use superpose_core::presets::Scene;
use superpose_core::quiver::{QuiverBasis, QuiverField};
use superpose_core::timing::TimeSpan;
use superpose_core::types::{
    normalise_amplitudes, with_reality_partners, Mode1d, Mode2d, Polarisation,
};

use crate::config::{AxesConfig, JobConfig, ModeConfig, OutputConfig, SceneKind, WaveVector};
use crate::{plotly, render};

/// Default half-height of the fixed transverse axes of the polarised view.
const POLARISED_LIMIT: f64 = 4.0;
/// Default half-height of the complex-field panels.
pub const COMPLEX_LIMIT: f64 = 3.0;

/// Computed data of a scene, ready to export.
pub enum SceneOutput {
    Polarised(PolarisedAnimation),
    Complex(ComplexAnimation),
    Quiver(QuiverField),
}

/// Rendering parameters not carried by the scene itself.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub fps: u32,
    pub limit: f64,
    pub width: u32,
    pub height: u32,
}

impl RenderOptions {
    pub fn new(job_limit: Option<f64>, fps: u32, output: &OutputConfig) -> Self {
        Self {
            fps,
            limit: job_limit.unwrap_or(COMPLEX_LIMIT),
            width: output.width,
            height: output.height,
        }
    }
}

/// Build a core scene from a parsed job configuration.
pub fn build_scene(job: &JobConfig) -> Result<Scene> {
    if job.modes.is_empty() {
        anyhow::bail!("No modes defined; add at least one [[mode]] table");
    }
    let g = &job.grid;
    let anim = &job.animation;
    let wave_speed = job.scene.wave_speed;

    match job.scene.kind {
        SceneKind::Polarised1d => {
            let mut modes = build_modes_1d(&job.modes)?;
            if job.scene.reality_partners {
                modes = with_reality_partners(&modes);
            }
            if job.scene.normalise {
                normalise_amplitudes(&mut modes).context("Cannot renormalise amplitudes")?;
            }
            let limit = anim.limit.unwrap_or(POLARISED_LIMIT);
            let settings = AnimationSettings {
                frames: anim.frames,
                span: anim.span.map(TimeSpan::from).unwrap_or(TimeSpan::Beat),
                trace: anim.trace.into(),
                axes: match anim.axes {
                    AxesConfig::Fixed => AxisRanges::Fixed { y: [-limit, limit], z: [-limit, limit] },
                    AxesConfig::Fitted => AxisRanges::Fitted,
                },
                scale: anim.scale,
                wave_speed,
                step: g.step,
            };
            let grid = Grid1d::new(g.min, g.max, g.points).context("Invalid [grid]")?;
            Ok(Scene::Polarised { modes, grid, settings })
        }
        SceneKind::Complex1d => {
            let mut modes = build_modes_1d(&job.modes)?;
            if job.scene.reality_partners {
                modes = with_reality_partners(&modes);
            }
            if job.scene.normalise {
                normalise_amplitudes(&mut modes).context("Cannot renormalise amplitudes")?;
            }
            let settings = ComplexSettings {
                frames: anim.frames,
                span: anim
                    .span
                    .map(TimeSpan::from)
                    .unwrap_or(ComplexSettings::default().span),
                wave_speed,
                convention: job.scene.convention,
            };
            let grid = Grid1d::new(g.min, g.max, g.points).context("Invalid [grid]")?;
            Ok(Scene::Complex { modes, grid, settings })
        }
        SceneKind::Quiver2d => {
            let modes = job
                .modes
                .iter()
                .enumerate()
                .map(|(i, m)| {
                    let k = match m.k {
                        WaveVector::Vector(k) => k,
                        WaveVector::Scalar(_) => anyhow::bail!(
                            "Mode {}: quiver_2d scenes need a wavevector 'k = [kx, ky]'",
                            i + 1
                        ),
                    };
                    Ok(Mode2d::new(k, polarisation(m, i)?, m.amplitude.to_complex()))
                })
                .collect::<Result<Vec<_>>>()?;
            let axis = linspace(g.min, g.max, g.points);
            let grid = Grid2d::new(&axis, &axis).context("Invalid [grid]")?;
            Ok(Scene::Quiver { modes, grid })
        }
    }
}

fn polarisation(mode: &ModeConfig, index: usize) -> Result<Polarisation> {
    Polarisation::new(mode.polarisation)
        .with_context(|| format!("Mode {}: invalid polarisation", index + 1))
}

fn build_modes_1d(modes: &[ModeConfig]) -> Result<Vec<Mode1d>> {
    modes
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let k = match m.k {
                WaveVector::Scalar(k) => k,
                WaveVector::Vector(_) => anyhow::bail!(
                    "Mode {}: 1D scenes need a scalar wavenumber 'k = <number>'",
                    i + 1
                ),
            };
            Ok(Mode1d::new(k, polarisation(m, i)?, m.amplitude.to_complex()))
        })
        .collect()
}

/// Compute every frame (or the single quiver field) of a scene.
pub fn compute(scene: &Scene) -> Result<SceneOutput> {
    match scene {
        Scene::Polarised { modes, grid, settings } => {
            let anim = PolarisedAnimation::build(modes, grid, settings)
                .context("Failed to compute polarised animation")?;
            let t0 = anim.frames.first().map_or(0.0, |f| f.t);
            let t1 = anim.frames.last().map_or(0.0, |f| f.t);
            println!(
                "  {} modes, {} frames over t=[{:.3}, {:.3}]",
                anim.mode_count,
                anim.frames.len(),
                t0,
                t1
            );
            Ok(SceneOutput::Polarised(anim))
        }
        Scene::Complex { modes, grid, settings } => {
            let anim = ComplexAnimation::build(modes, grid, settings)
                .context("Failed to compute complex animation")?;
            println!("  {} modes, {} frames", modes.len(), anim.frames.len());
            Ok(SceneOutput::Complex(anim))
        }
        Scene::Quiver { modes, grid } => {
            let basis = QuiverBasis::new(modes, grid.clone());
            let coeffs: Vec<_> = modes.iter().map(|m| m.amplitude).collect();
            let field = basis.combine(&coeffs).context("Failed to combine basis fields")?;
            let (ny, nx) = grid.dim();
            println!("  {} basis modes on a {}x{} mesh", modes.len(), nx, ny);
            Ok(SceneOutput::Quiver(field))
        }
    }
}

/// Write every enabled output of a computed scene into `out_dir`.
pub fn write_outputs(
    output: &SceneOutput,
    out_dir: &Path,
    flags: &OutputConfig,
    options: &RenderOptions,
) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Cannot create output directory {}", out_dir.display()))?;

    match output {
        SceneOutput::Polarised(anim) => {
            if flags.html {
                plotly::write_html(anim, &out_dir.join("Efield_plot_animated.html"))?;
            }
            if flags.csv {
                write_polarised_csv(anim, &out_dir.join("frames.csv"))?;
            }
            if flags.json {
                write_polarised_json(anim, &out_dir.join("frames.json"))?;
            }
        }
        SceneOutput::Complex(anim) => {
            if flags.gif {
                render::write_complex_gif(anim, &out_dir.join("1Dwaves_animation.gif"), options)?;
            }
            if flags.csv {
                write_complex_csv(anim, &out_dir.join("frames.csv"))?;
            }
        }
        SceneOutput::Quiver(field) => {
            if flags.png {
                render::write_quiver_png(field, &out_dir.join("quiver.png"), options)?;
            }
            if flags.csv {
                write_quiver_csv(field, &out_dir.join("quiver.csv"))?;
            }
        }
    }
    Ok(())
}

/// Write the polarised frames to CSV: trace points and probe arrow heads.
pub fn write_polarised_csv(anim: &PolarisedAnimation, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    writeln!(file, "# Superpose: polarised 1D animation frames")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "# modes: {}, frames: {}", anim.mode_count, anim.frames.len())?;
    for i in 0..anim.mode_count {
        writeln!(file, "# mode{} colour: {}", i, mode_colour(i).0)?;
    }
    writeln!(file, "#")?;
    writeln!(file, "frame,t,series,x,y,z")?;

    for (fi, frame) in anim.frames.iter().enumerate() {
        for p in frame.trace.iter().flatten() {
            writeln!(file, "{},{:.4},trace,{:.6},{:.6e},{:.6e}", fi, frame.t, p[0], p[1], p[2])?;
        }
        for (mi, arrow) in frame.mode_arrows.iter().enumerate() {
            let h = arrow.head;
            writeln!(file, "{},{:.4},mode{},{:.6},{:.6e},{:.6e}", fi, frame.t, mi, h[0], h[1], h[2])?;
        }
        let h = frame.total_arrow.head;
        writeln!(file, "{},{:.4},total,{:.6},{:.6e},{:.6e}", fi, frame.t, h[0], h[1], h[2])?;
    }

    println!("Frames written to: {}", path.display());
    Ok(())
}

/// Write the polarised animation to a JSON file.
pub fn write_polarised_json(anim: &PolarisedAnimation, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(anim)
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Frames (JSON) written to: {}", path.display());
    Ok(())
}

/// Write the complex-field frames to CSV, one row per grid point and frame.
pub fn write_complex_csv(anim: &ComplexAnimation, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    let modes = anim.directions.len();
    writeln!(file, "# Superpose: complex 1D animation frames")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    for (i, d) in anim.directions.iter().enumerate() {
        writeln!(file, "# mode{}: {:?}", i, d)?;
    }
    writeln!(file, "#")?;

    let mut header = String::from("frame,t,x");
    for i in 0..modes {
        header.push_str(&format!(",mode{i}_re,mode{i}_im"));
    }
    header.push_str(",total_re,total_im");
    writeln!(file, "{}", header)?;

    // Grid positions are not stored per frame; rebuild them from the range.
    let n = anim.frames.first().map_or(0, |f| f.total.len());
    let xs = linspace(anim.x_range[0], anim.x_range[1], n);
    for (fi, frame) in anim.frames.iter().enumerate() {
        for (i, x) in xs.iter().enumerate() {
            write!(file, "{},{:.4},{:.6}", fi, frame.t, x)?;
            for part in &frame.parts {
                write!(file, ",{:.6e},{:.6e}", part[i].re, part[i].im)?;
            }
            writeln!(file, ",{:.6e},{:.6e}", frame.total[i].re, frame.total[i].im)?;
        }
    }

    println!("Frames written to: {}", path.display());
    Ok(())
}

/// Write a quiver field to CSV.
pub fn write_quiver_csv(field: &QuiverField, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    let (ny, nx) = field.x.dim();
    writeln!(file, "# Superpose: 2D quiver field")?;
    writeln!(file, "# Mesh: {}x{}", nx, ny)?;
    writeln!(file, "# max |E|: {:.6e}", field.max_magnitude())?;
    writeln!(file, "#")?;
    writeln!(file, "x,y,Ex,Ey")?;

    for [x, y, u, v] in field.rows() {
        writeln!(file, "{:.4},{:.4},{:.6e},{:.6e}", x, y, u, v)?;
    }

    println!("Quiver field written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use approx::assert_abs_diff_eq;

    const COMPLEX: &str = r#"
        [scene]
        kind = "complex_1d"
        reality_partners = true

        [grid]
        min = -10.0
        max = 10.0
        points = 50

        [[mode]]
        k = 1.0
        amplitude = { re = 2.0, im = 1.0 }

        [animation]
        frames = 5
    "#;

    #[test]
    fn test_complex_scene_from_config() {
        let job = parse_config(COMPLEX).unwrap();
        let scene = build_scene(&job).unwrap();
        match &scene {
            Scene::Complex { modes, settings, .. } => {
                assert_eq!(modes.len(), 2);
                assert_eq!(modes[1].k, -1.0);
                assert_eq!(settings.span, TimeSpan::Fixed { start: 0.0, end: 10.0 });
            }
            other => panic!("unexpected scene {}", other.kind()),
        }
        match compute(&scene).unwrap() {
            SceneOutput::Complex(anim) => {
                assert_eq!(anim.frames.len(), 5);
                // Partners cancel the imaginary part of the total.
                for z in anim.frames[3].total.iter() {
                    assert_abs_diff_eq!(z.im, 0.0, epsilon = 1e-12);
                }
            }
            _ => panic!("expected complex output"),
        }
    }

    #[test]
    fn test_polarised_limit_and_normalisation() {
        let job = parse_config(
            r#"
            [scene]
            kind = "polarised_1d"
            normalise = true
            [grid]
            min = 0.0
            max = 1.0
            points = 10
            [[mode]]
            k = 1.0
            amplitude = 3.0
            [animation]
            limit = 2.5
            "#,
        )
        .unwrap();
        match build_scene(&job).unwrap() {
            Scene::Polarised { modes, settings, .. } => {
                assert_abs_diff_eq!(modes[0].amplitude.norm(), 1.0 / 0.618, epsilon = 1e-12);
                assert_eq!(settings.axes, AxisRanges::Fixed { y: [-2.5, 2.5], z: [-2.5, 2.5] });
                assert_eq!(settings.span, TimeSpan::Beat);
            }
            other => panic!("unexpected scene {}", other.kind()),
        }
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let job = parse_config(
            r#"
            [scene]
            kind = "quiver_2d"
            [grid]
            min = -1.0
            max = 1.0
            points = 4
            [[mode]]
            k = 1.0
            "#,
        )
        .unwrap();
        let err = build_scene(&job).unwrap_err();
        assert!(err.to_string().contains("wavevector"));
    }

    #[test]
    fn test_bundled_jobs_build() {
        let jobs = [
            ("circular", include_str!("../../../jobs/circular.toml"), "polarised_1d"),
            ("beat", include_str!("../../../jobs/beat.toml"), "polarised_1d"),
            ("counter_propagating", include_str!("../../../jobs/counter_propagating.toml"), "complex_1d"),
            ("quiver", include_str!("../../../jobs/quiver.toml"), "quiver_2d"),
        ];
        for (name, text, kind) in jobs {
            let job = parse_config(text).unwrap_or_else(|e| panic!("{name}: {e}"));
            let scene = build_scene(&job).unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(scene.kind(), kind, "{name}");
            assert!(compute(&scene).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_no_modes_rejected() {
        let job = parse_config(
            "[scene]\nkind = \"polarised_1d\"\n[grid]\nmin = 0.0\nmax = 1.0\npoints = 2\n",
        )
        .unwrap();
        assert!(build_scene(&job).is_err());
    }

    #[test]
    fn test_quiver_csv_written() {
        let job = parse_config(
            r#"
            [scene]
            kind = "quiver_2d"
            [grid]
            min = -1.0
            max = 1.0
            points = 3
            [[mode]]
            k = [1.0, 0.0]
            polarisation = [0.0, 1.0]
            "#,
        )
        .unwrap();
        let SceneOutput::Quiver(field) = compute(&build_scene(&job).unwrap()).unwrap() else {
            panic!("expected quiver output");
        };
        let path = std::env::temp_dir().join(format!("superpose-quiver-{}.csv", std::process::id()));
        write_quiver_csv(&field, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let data_rows = text.lines().filter(|l| !l.starts_with('#')).count();
        assert_eq!(data_rows, 1 + 9);
        std::fs::remove_file(&path).ok();
    }
}
