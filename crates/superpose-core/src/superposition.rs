//! Evaluation of mode sums over a spatial grid.
//!
//! Every scene reduces to the same discretised sum
//!
//! $$
//! \mathbf{E}(x, t) = \sum_n a_n\,\hat{\mathbf{p}}_n\,e^{i(k_n x - \omega_n t)} \;(+\;\text{c.c.})
//! $$
//!
//! where the conjugate term is added under [`FieldConvention::Real`] and
//! omitted under [`FieldConvention::Complex`].

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::FieldError;
use crate::grid::Grid1d;
use crate::types::{FieldConvention, Mode1d, Polarisation};

/// Time-advanced phasor $a\,e^{i(kx - \omega t)}$ of a single mode.
pub fn mode_phasor(mode: &Mode1d, x: f64, t: f64, wave_speed: f64) -> Complex64 {
    let phase = mode.k * x - mode.omega(wave_speed) * t;
    mode.amplitude * Complex64::new(0.0, phase).exp()
}

/// Real field of a single mode: phasor plus its complex conjugate.
pub fn real_mode_field(mode: &Mode1d, x: f64, t: f64, wave_speed: f64) -> f64 {
    let p = mode_phasor(mode, x, t, wave_speed);
    (p + p.conj()).re
}

/// Unit-amplitude basis function $e^{ikx}$ sampled on the grid.
pub fn basis_function(k: f64, grid: &Grid1d) -> Array1<Complex64> {
    grid.x.mapv(|x| Complex64::new(0.0, k * x).exp())
}

/// Field of one mode projected on its polarisation.
#[derive(Debug, Clone)]
pub struct ModeContribution {
    /// Real scalar field of the mode at each grid point.
    pub field: Array1<f64>,
    pub polarisation: Polarisation,
}

impl ModeContribution {
    /// Transverse vector `(y, z)` of this mode at grid index `i`.
    pub fn vector_at(&self, i: usize) -> [f64; 2] {
        let [py, pz] = self.polarisation.components();
        let e = self.field[i];
        [e * py, e * pz]
    }
}

/// Real transverse vector field of a polarised 1D scene at one instant.
#[derive(Debug, Clone)]
pub struct PolarisedField {
    pub t: f64,
    /// Per-mode contributions, in mode order.
    pub modes: Vec<ModeContribution>,
    /// Total first transverse component.
    pub v: Array1<f64>,
    /// Total second transverse component.
    pub w: Array1<f64>,
}

impl PolarisedField {
    pub fn total_at(&self, i: usize) -> [f64; 2] {
        [self.v[i], self.w[i]]
    }
}

/// Evaluate the real polarised field of `modes` at time `t`.
pub fn polarised_field(
    modes: &[Mode1d],
    grid: &Grid1d,
    t: f64,
    wave_speed: f64,
) -> Result<PolarisedField, FieldError> {
    if grid.is_empty() {
        return Err(FieldError::EmptyGrid);
    }

    let n = grid.len();
    let mut v = Array1::<f64>::zeros(n);
    let mut w = Array1::<f64>::zeros(n);
    let mut contributions = Vec::with_capacity(modes.len());

    for mode in modes {
        let field = grid.x.mapv(|x| real_mode_field(mode, x, t, wave_speed));
        let [py, pz] = mode.polarisation.components();
        v.scaled_add(py, &field);
        w.scaled_add(pz, &field);
        contributions.push(ModeContribution { field, polarisation: mode.polarisation });
    }

    Ok(PolarisedField { t, modes: contributions, v, w })
}

/// Per-mode phasors and their sum for a scalar 1D scene.
#[derive(Debug, Clone)]
pub struct ComplexParts {
    pub t: f64,
    /// `j_n e^{-iω_n t} e^{i k_n x}` for each mode.
    pub parts: Vec<Array1<Complex64>>,
    pub total: Array1<Complex64>,
}

/// Evaluate every mode's time-advanced phasor and their sum.
///
/// Polarisation is ignored; these scenes are scalar. Under
/// [`FieldConvention::Real`] each part has its conjugate added and is
/// therefore purely real.
pub fn complex_parts(
    modes: &[Mode1d],
    grid: &Grid1d,
    t: f64,
    wave_speed: f64,
    convention: FieldConvention,
) -> Result<ComplexParts, FieldError> {
    if grid.is_empty() {
        return Err(FieldError::EmptyGrid);
    }

    let mut total = Array1::<Complex64>::zeros(grid.len());
    let mut parts = Vec::with_capacity(modes.len());
    for mode in modes {
        let part = grid.x.mapv(|x| {
            let p = mode_phasor(mode, x, t, wave_speed);
            match convention {
                FieldConvention::Complex => p,
                FieldConvention::Real => p + p.conj(),
            }
        });
        total += &part;
        parts.push(part);
    }

    Ok(ComplexParts { t, parts, total })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_single_mode_real_field() {
        // 2|a| cos(kx - ωt + arg a)
        let a = c(0.0, 1.5);
        let mode = Mode1d::scalar(2.0, a);
        for &(x, t) in &[(0.0, 0.0), (0.3, 1.1), (-2.0, 4.0)] {
            let expected = 2.0 * a.norm() * (2.0 * x - 2.0 * t + a.arg()).cos();
            assert_abs_diff_eq!(real_mode_field(&mode, x, t, 1.0), expected, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_phasor_period() {
        let mode = Mode1d::scalar(1.0, c(1.0, 0.0));
        let p0 = mode_phasor(&mode, 0.7, 0.0, 1.0);
        let p1 = mode_phasor(&mode, 0.7, 2.0 * PI, 1.0);
        assert_abs_diff_eq!(p0.re, p1.re, epsilon = 1e-12);
        assert_abs_diff_eq!(p0.im, p1.im, epsilon = 1e-12);
    }

    #[test]
    fn test_polarised_components_follow_polarisation() {
        let grid = Grid1d::new(0.0, 4.0 * PI, 50).unwrap();
        let modes = [
            Mode1d::new(1.0, Polarisation::first(), c(1.0, 0.0)),
            Mode1d::new(3.0, Polarisation::second(), c(0.5, 0.0)),
        ];
        let f = polarised_field(&modes, &grid, 0.4, 1.0).unwrap();
        assert_eq!(f.modes.len(), 2);
        for i in 0..grid.len() {
            assert_abs_diff_eq!(f.v[i], f.modes[0].field[i], epsilon = 1e-12);
            assert_abs_diff_eq!(f.w[i], f.modes[1].field[i], epsilon = 1e-12);
            assert_eq!(f.modes[1].vector_at(i)[0], 0.0);
        }
    }

    #[test]
    fn test_diagonal_polarisation_splits_evenly() {
        let grid = Grid1d::new(0.0, 1.0, 5).unwrap();
        let pol = Polarisation::new([1.0, 1.0]).unwrap();
        let f = polarised_field(&[Mode1d::new(1.0, pol, c(1.0, 0.0))], &grid, 0.0, 1.0).unwrap();
        for i in 0..grid.len() {
            assert_abs_diff_eq!(f.v[i], f.w[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_complex_parts_sum_to_total() {
        let grid = Grid1d::new(-10.0, 10.0, 64).unwrap();
        let modes = [Mode1d::scalar(1.0, c(2.0, 0.0)), Mode1d::scalar(-1.0, c(1.0, 0.5))];
        let parts = complex_parts(&modes, &grid, 0.8, 1.0, FieldConvention::Complex).unwrap();
        for i in 0..grid.len() {
            let sum = parts.parts[0][i] + parts.parts[1][i];
            assert_abs_diff_eq!(sum.re, parts.total[i].re, epsilon = 1e-12);
            assert_abs_diff_eq!(sum.im, parts.total[i].im, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_real_convention_has_no_imaginary_part() {
        let grid = Grid1d::new(-1.0, 1.0, 16).unwrap();
        let modes = [Mode1d::scalar(1.0, c(0.3, -0.7))];
        let parts = complex_parts(&modes, &grid, 2.0, 1.0, FieldConvention::Real).unwrap();
        assert!(parts.total.iter().all(|z| z.im.abs() < 1e-12));
    }

    #[test]
    fn test_basis_function_unit_modulus() {
        let grid = Grid1d::new(-10.0, 10.0, 32).unwrap();
        let b = basis_function(-1.0, &grid);
        assert!(b.iter().all(|z| (z.norm() - 1.0).abs() < 1e-12));
        // Im[e^{-ix}] = -sin x
        assert_abs_diff_eq!(b[5].im, -grid.x[5].sin(), epsilon = 1e-12);
    }

    #[test]
    fn test_empty_grid_is_an_error() {
        let grid = Grid1d { x: Array1::zeros(0) };
        assert!(polarised_field(&[], &grid, 0.0, 1.0).is_err());
        assert!(complex_parts(&[], &grid, 0.0, 1.0, FieldConvention::Complex).is_err());
    }
}
