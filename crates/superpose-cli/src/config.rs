//! TOML configuration deserialisation for visualisation jobs.

use num_complex::Complex64;
use serde::Deserialize;
use superpose_core::animation::TraceMode;
use superpose_core::timing::TimeSpan;
use superpose_core::types::FieldConvention;

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub scene: SceneConfig,
    pub grid: GridConfig,
    /// `[[mode]]` tables, in order.
    #[serde(default, rename = "mode")]
    pub modes: Vec<ModeConfig>,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which visualisation to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneKind {
    #[serde(alias = "polarized_1d")]
    Polarised1d,
    Complex1d,
    Quiver2d,
}

/// Scene-wide physics settings.
#[derive(Debug, Deserialize)]
pub struct SceneConfig {
    pub kind: SceneKind,
    #[serde(default = "default_wave_speed")]
    pub wave_speed: f64,
    /// Renormalise amplitudes before animating (polarised scenes).
    #[serde(default)]
    pub normalise: bool,
    /// Append the conjugate `-k` partner of every mode.
    #[serde(default)]
    pub reality_partners: bool,
    /// Field convention for complex scenes. Default: "complex".
    #[serde(default = "default_convention")]
    pub convention: FieldConvention,
}

fn default_wave_speed() -> f64 {
    superpose_core::types::DEFAULT_WAVE_SPEED
}
fn default_convention() -> FieldConvention {
    FieldConvention::Complex
}

/// Sampling grid. 2D scenes use the same axis for x and y.
#[derive(Debug, Deserialize)]
pub struct GridConfig {
    pub min: f64,
    pub max: f64,
    pub points: usize,
    /// Draw every `step`-th point (polarised scenes).
    #[serde(default = "default_step")]
    pub step: usize,
}

fn default_step() -> usize {
    1
}

/// A single mode.
#[derive(Debug, Deserialize)]
pub struct ModeConfig {
    pub k: WaveVector,
    #[serde(default = "default_polarisation")]
    pub polarisation: [f64; 2],
    #[serde(default)]
    pub amplitude: AmplitudeSpec,
}

fn default_polarisation() -> [f64; 2] {
    [1.0, 0.0]
}

/// Wavenumber (1D) or wavevector (2D).
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum WaveVector {
    Scalar(f64),
    Vector([f64; 2]),
}

/// Complex amplitude: a real number, Cartesian or polar form.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum AmplitudeSpec {
    Real(f64),
    Cartesian {
        re: f64,
        #[serde(default)]
        im: f64,
    },
    Polar {
        magnitude: f64,
        /// Phase in radians.
        #[serde(default)]
        phase: f64,
    },
}

impl Default for AmplitudeSpec {
    fn default() -> Self {
        Self::Real(1.0)
    }
}

impl AmplitudeSpec {
    pub fn to_complex(self) -> Complex64 {
        match self {
            Self::Real(re) => Complex64::new(re, 0.0),
            Self::Cartesian { re, im } => Complex64::new(re, im),
            Self::Polar { magnitude, phase } => Complex64::from_polar(magnitude, phase),
        }
    }
}

/// Animation timing and framing.
#[derive(Debug, Deserialize)]
pub struct AnimationConfig {
    #[serde(default = "default_frames")]
    pub frames: usize,
    /// Default: "beat" (polarised), `{ start = 0, end = 10 }` (complex).
    #[serde(default)]
    pub span: Option<SpanConfig>,
    #[serde(default)]
    pub trace: TraceConfig,
    #[serde(default)]
    pub axes: AxesConfig,
    /// Half-height of fixed axes. Default: 4 (polarised), 3 (complex).
    #[serde(default)]
    pub limit: Option<f64>,
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// GIF frame rate.
    #[serde(default = "default_fps")]
    pub fps: u32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            span: None,
            trace: TraceConfig::default(),
            axes: AxesConfig::default(),
            limit: None,
            scale: default_scale(),
            fps: default_fps(),
        }
    }
}

fn default_frames() -> usize {
    100
}
fn default_scale() -> f64 {
    1.0
}
fn default_fps() -> u32 {
    30
}

/// Time span: a named span or an explicit range.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum SpanConfig {
    Named(NamedSpan),
    Fixed { start: f64, end: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedSpan {
    Beat,
    SlowestPeriod,
    FullCycle,
}

impl From<SpanConfig> for TimeSpan {
    fn from(span: SpanConfig) -> Self {
        match span {
            SpanConfig::Named(NamedSpan::Beat) => TimeSpan::Beat,
            SpanConfig::Named(NamedSpan::SlowestPeriod) => TimeSpan::SlowestPeriod,
            SpanConfig::Named(NamedSpan::FullCycle) => TimeSpan::FullCycle,
            SpanConfig::Fixed { start, end } => TimeSpan::Fixed { start, end },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceConfig {
    #[default]
    Full,
    ProbeOnly,
}

impl From<TraceConfig> for TraceMode {
    fn from(trace: TraceConfig) -> Self {
        match trace {
            TraceConfig::Full => TraceMode::Full,
            TraceConfig::ProbeOnly => TraceMode::ProbeOnly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxesConfig {
    #[default]
    Fixed,
    Fitted,
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Plotly HTML animation for polarised scenes (default: true).
    #[serde(default = "default_true")]
    pub html: bool,
    /// Animated GIF for complex scenes (default: true).
    #[serde(default = "default_true")]
    pub gif: bool,
    /// PNG image for quiver scenes (default: true).
    #[serde(default = "default_true")]
    pub png: bool,
    /// Frame data as CSV (default: false).
    #[serde(default)]
    pub csv: bool,
    /// Frame data as JSON (default: false).
    #[serde(default)]
    pub json: bool,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            html: true,
            gif: true,
            png: true,
            csv: false,
            json: false,
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}
fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    800
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> anyhow::Result<JobConfig> {
    let config: JobConfig = toml::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLARISED: &str = r#"
        [scene]
        kind = "polarised_1d"
        normalise = true

        [grid]
        min = 0.0
        max = 12.566
        points = 1000

        [[mode]]
        k = 1.0
        polarisation = [1.0, 0.0]
        amplitude = { magnitude = 1.0, phase = -1.5707963 }

        [[mode]]
        k = 1.0
        polarisation = [0.0, 1.0]
    "#;

    #[test]
    fn test_defaults_applied() {
        let job = parse_config(POLARISED).unwrap();
        assert_eq!(job.scene.kind, SceneKind::Polarised1d);
        assert_eq!(job.scene.wave_speed, 1.0);
        assert_eq!(job.grid.step, 1);
        assert_eq!(job.modes.len(), 2);
        assert_eq!(job.animation.frames, 100);
        assert_eq!(job.animation.fps, 30);
        assert!(job.animation.span.is_none());
        assert_eq!(job.output.directory, "./output");
        assert!(job.output.html && !job.output.csv);
    }

    #[test]
    fn test_amplitude_forms() {
        let job = parse_config(POLARISED).unwrap();
        let polar = job.modes[0].amplitude.to_complex();
        assert!(polar.re.abs() < 1e-6 && (polar.im + 1.0).abs() < 1e-6);
        assert_eq!(job.modes[1].amplitude.to_complex(), Complex64::new(1.0, 0.0));

        let cartesian: ModeConfig = toml::from_str("k = -1.0\namplitude = { re = 2.0, im = 1.0 }").unwrap();
        assert_eq!(cartesian.amplitude.to_complex(), Complex64::new(2.0, 1.0));
        let real: ModeConfig = toml::from_str("k = 1\namplitude = 0.5").unwrap();
        assert_eq!(real.amplitude.to_complex(), Complex64::new(0.5, 0.0));
    }

    #[test]
    fn test_wavevector_forms() {
        let m: ModeConfig = toml::from_str("k = [1.0, -1.0]").unwrap();
        assert!(matches!(m.k, WaveVector::Vector(k) if k == [1.0, -1.0]));
        let m: ModeConfig = toml::from_str("k = 1.3").unwrap();
        assert!(matches!(m.k, WaveVector::Scalar(k) if k == 1.3));
    }

    #[test]
    fn test_span_forms() {
        let a: AnimationConfig = toml::from_str(r#"span = "slowest_period""#).unwrap();
        assert!(matches!(a.span.map(TimeSpan::from), Some(TimeSpan::SlowestPeriod)));
        let a: AnimationConfig = toml::from_str("span = { start = 0.0, end = 10.0 }").unwrap();
        assert_eq!(a.span.map(TimeSpan::from), Some(TimeSpan::Fixed { start: 0.0, end: 10.0 }));
        let a: AnimationConfig = toml::from_str(r#"trace = "probe_only""#).unwrap();
        assert_eq!(TraceMode::from(a.trace), TraceMode::ProbeOnly);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let bad = POLARISED.replace("polarised_1d", "spherical_3d");
        assert!(parse_config(&bad).is_err());
    }

    #[test]
    fn test_american_spelling_alias() {
        let job = parse_config(&POLARISED.replace("polarised_1d", "polarized_1d")).unwrap();
        assert_eq!(job.scene.kind, SceneKind::Polarised1d);
    }
}
