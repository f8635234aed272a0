//! 2D in-plane field built from a fixed set of plane-wave basis modes.
//!
//! Each basis mode contributes $\hat{\mathbf{p}}_n e^{i\mathbf{k}_n\cdot\mathbf{r}}$;
//! the drawn field is $\mathrm{Re}\sum_n j_n \hat{\mathbf{p}}_n e^{i\mathbf{k}_n\cdot\mathbf{r}}$
//! for user-chosen coefficients $j_n$. No reality constraint is imposed.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::FieldError;
use crate::grid::Grid2d;
use crate::types::Mode2d;

/// Precomputed basis fields on a mesh.
#[derive(Debug, Clone)]
pub struct QuiverBasis {
    pub grid: Grid2d,
    /// `(E_x, E_y)` of each basis mode.
    fields: Vec<(Array2<Complex64>, Array2<Complex64>)>,
}

impl QuiverBasis {
    /// Sample every mode's unit-amplitude basis field on `grid`.
    ///
    /// Mode amplitudes are not used here; coefficients are supplied to
    /// [`QuiverBasis::combine`].
    pub fn new(modes: &[Mode2d], grid: Grid2d) -> Self {
        let fields = modes
            .iter()
            .map(|mode| {
                let [px, py] = mode.polarisation.components();
                let phase = ndarray::Zip::from(&grid.x)
                    .and(&grid.y)
                    .map_collect(|&x, &y| Complex64::new(0.0, mode.k_dot_r(x, y)).exp());
                (phase.mapv(|p| p * px), phase.mapv(|p| p * py))
            })
            .collect();
        Self { grid, fields }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Real part of $\sum_n j_n \mathbf{E}_n$.
    pub fn combine(&self, coeffs: &[Complex64]) -> Result<QuiverField, FieldError> {
        if coeffs.len() != self.fields.len() {
            return Err(FieldError::LengthMismatch {
                expected: self.fields.len(),
                actual: coeffs.len(),
            });
        }

        let shape = self.grid.dim();
        let mut ex = Array2::<Complex64>::zeros(shape);
        let mut ey = Array2::<Complex64>::zeros(shape);
        for (&j, (bx, by)) in coeffs.iter().zip(&self.fields) {
            ex.scaled_add(j, bx);
            ey.scaled_add(j, by);
        }

        Ok(QuiverField {
            x: self.grid.x.clone(),
            y: self.grid.y.clone(),
            u: ex.mapv(|z| z.re),
            v: ey.mapv(|z| z.re),
        })
    }
}

/// Real vector field sampled on a mesh.
#[derive(Debug, Clone)]
pub struct QuiverField {
    pub x: Array2<f64>,
    pub y: Array2<f64>,
    pub u: Array2<f64>,
    pub v: Array2<f64>,
}

impl QuiverField {
    /// Largest arrow length, used to scale arrows to the mesh spacing.
    pub fn max_magnitude(&self) -> f64 {
        ndarray::Zip::from(&self.u)
            .and(&self.v)
            .fold(0.0_f64, |acc, &u, &v| acc.max(u.hypot(v)))
    }

    /// `(x, y, u, v)` rows in mesh order.
    pub fn rows(&self) -> impl Iterator<Item = [f64; 4]> + '_ {
        self.x
            .iter()
            .zip(self.y.iter())
            .zip(self.u.iter().zip(self.v.iter()))
            .map(|((&x, &y), (&u, &v))| [x, y, u, v])
    }
}
