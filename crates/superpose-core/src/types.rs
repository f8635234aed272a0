//! Core types shared across the Superpose workspace.
//!
//! This module defines the fundamental data structures of the superposition
//! pipeline: polarisation directions, 1D and 2D plane-wave modes, and the
//! convention used when turning a complex mode sum into a drawable field.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::FieldError;

/// Default wave speed $c$ in the dispersion relation $\omega = c|k|$.
pub const DEFAULT_WAVE_SPEED: f64 = 1.0;

/// Scale applied to the amplitude norm when renormalising a mode set.
///
/// Amplitudes are divided by `RENORMALISATION_FACTOR * ‖a‖₂`, which keeps the
/// superposed field of the bundled presets within the default ±4 axes.
pub const RENORMALISATION_FACTOR: f64 = 0.618;

/// Unit vector giving the direction of field oscillation.
///
/// In the 1D scenes the two components are the transverse (y, z) axes; in the
/// 2D quiver scene they are the in-plane (x, y) axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct Polarisation([f64; 2]);

impl Polarisation {
    /// Build a polarisation from an arbitrary (non-zero) direction, normalising it.
    pub fn new(components: [f64; 2]) -> Result<Self, FieldError> {
        let norm = components[0].hypot(components[1]);
        if !norm.is_finite() || norm < 1e-12 {
            return Err(FieldError::DegeneratePolarisation(components));
        }
        Ok(Self([components[0] / norm, components[1] / norm]))
    }

    /// Polarised along the first transverse axis.
    pub fn first() -> Self {
        Self([1.0, 0.0])
    }

    /// Polarised along the second transverse axis.
    pub fn second() -> Self {
        Self([0.0, 1.0])
    }

    pub fn components(&self) -> [f64; 2] {
        self.0
    }
}

impl TryFrom<[f64; 2]> for Polarisation {
    type Error = FieldError;

    fn try_from(components: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(components)
    }
}

impl From<Polarisation> for [f64; 2] {
    fn from(p: Polarisation) -> Self {
        p.0
    }
}

/// A single 1D plane-wave mode $a\,\hat{\mathbf{p}}\,e^{i(kx - \omega t)}$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mode1d {
    /// Wavenumber; the sign gives the direction of travel.
    pub k: f64,
    /// Transverse polarisation of the mode.
    pub polarisation: Polarisation,
    /// Complex amplitude coefficient.
    pub amplitude: Complex64,
}

impl Mode1d {
    pub fn new(k: f64, polarisation: Polarisation, amplitude: Complex64) -> Self {
        Self { k, polarisation, amplitude }
    }

    /// Scalar mode with unit polarisation along the first axis.
    pub fn scalar(k: f64, amplitude: Complex64) -> Self {
        Self::new(k, Polarisation::first(), amplitude)
    }

    /// Angular frequency $\omega = c|k|$.
    pub fn omega(&self, wave_speed: f64) -> f64 {
        wave_speed * self.k.abs()
    }
}

/// A single 2D plane-wave mode $a\,\hat{\mathbf{p}}\,e^{i(\mathbf{k}\cdot\mathbf{r} - \omega t)}$.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mode2d {
    /// Wavevector $(k_x, k_y)$.
    pub k: [f64; 2],
    /// In-plane polarisation.
    pub polarisation: Polarisation,
    /// Complex amplitude coefficient.
    pub amplitude: Complex64,
}

impl Mode2d {
    pub fn new(k: [f64; 2], polarisation: Polarisation, amplitude: Complex64) -> Self {
        Self { k, polarisation, amplitude }
    }

    /// Angular frequency $\omega = c\|\mathbf{k}\|$.
    pub fn omega(&self, wave_speed: f64) -> f64 {
        wave_speed * self.k[0].hypot(self.k[1])
    }

    /// Phase $\mathbf{k}\cdot\mathbf{r}$ at a point.
    pub fn k_dot_r(&self, x: f64, y: f64) -> f64 {
        self.k[0] * x + self.k[1] * y
    }
}

/// How a complex mode sum is turned into something drawable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldConvention {
    /// Add the complex conjugate, giving the physical field $2\,\mathrm{Re}[\ldots]$.
    #[default]
    Real,
    /// Keep the raw phasor; real and imaginary parts are shown separately.
    Complex,
}

/// Divide every amplitude by `RENORMALISATION_FACTOR * ‖a‖₂`.
pub fn normalise_amplitudes(modes: &mut [Mode1d]) -> Result<(), FieldError> {
    let norm = modes
        .iter()
        .map(|m| m.amplitude.norm_sqr())
        .sum::<f64>()
        .sqrt();
    if norm < 1e-15 {
        return Err(FieldError::ZeroNorm);
    }
    let scale = RENORMALISATION_FACTOR * norm;
    for mode in modes.iter_mut() {
        mode.amplitude /= scale;
    }
    Ok(())
}

/// Append the $-k$ partner with conjugate amplitude for every mode.
///
/// The resulting phasor sum $\sum_n j_n e^{i k_n x}$ is real for every $x$,
/// which is the reality constraint of a physical electric field.
pub fn with_reality_partners(modes: &[Mode1d]) -> Vec<Mode1d> {
    let mut out = Vec::with_capacity(modes.len() * 2);
    out.extend_from_slice(modes);
    out.extend(
        modes
            .iter()
            .map(|m| Mode1d::new(-m.k, m.polarisation, m.amplitude.conj())),
    );
    out
}
