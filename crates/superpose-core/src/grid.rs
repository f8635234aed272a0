//! Uniform sampling grids.
//!
//! 1D scenes are evaluated on a [`Grid1d`]; the 2D quiver scene uses a
//! [`Grid2d`] meshgrid whose arrays are indexed `[row, col] = [y, x]`.

use ndarray::{Array1, Array2};

use crate::error::FieldError;

/// `n` evenly spaced samples over the closed interval `[start, end]`.
///
/// `n == 1` yields `[start]` and `n == 0` an empty array.
pub fn linspace(start: f64, end: f64, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            Array1::from_shape_fn(n, |i| if i == n - 1 { end } else { start + step * i as f64 })
        }
    }
}

/// Points along a line.
#[derive(Debug, Clone)]
pub struct Grid1d {
    pub x: Array1<f64>,
}

impl Grid1d {
    pub fn new(x_min: f64, x_max: f64, n: usize) -> Result<Self, FieldError> {
        if n == 0 {
            return Err(FieldError::EmptyGrid);
        }
        Ok(Self { x: linspace(x_min, x_max, n) })
    }

    /// Keep every `step`-th point, starting from the first.
    pub fn subsample(&self, step: usize) -> Result<Self, FieldError> {
        if step == 0 {
            return Err(FieldError::InvalidStep);
        }
        let x: Array1<f64> = self.x.iter().step_by(step).copied().collect();
        Ok(Self { x })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// First grid point, where probe arrows are anchored.
    pub fn origin(&self) -> Option<f64> {
        self.x.get(0).copied()
    }

    pub fn bounds(&self) -> Option<(f64, f64)> {
        let last = self.x.len().checked_sub(1)?;
        Some((self.x[0], self.x[last]))
    }
}

/// A rectangular meshgrid.
#[derive(Debug, Clone)]
pub struct Grid2d {
    /// x coordinate at each mesh point, shape `(ny, nx)`.
    pub x: Array2<f64>,
    /// y coordinate at each mesh point, shape `(ny, nx)`.
    pub y: Array2<f64>,
}

impl Grid2d {
    pub fn new(xs: &Array1<f64>, ys: &Array1<f64>) -> Result<Self, FieldError> {
        if xs.is_empty() || ys.is_empty() {
            return Err(FieldError::EmptyGrid);
        }
        let shape = (ys.len(), xs.len());
        let x = Array2::from_shape_fn(shape, |(_, j)| xs[j]);
        let y = Array2::from_shape_fn(shape, |(i, _)| ys[i]);
        Ok(Self { x, y })
    }

    /// Square mesh over `[-half_width, half_width]²` with `n` points per side.
    pub fn square(half_width: f64, n: usize) -> Result<Self, FieldError> {
        let axis = linspace(-half_width, half_width, n);
        Self::new(&axis, &axis)
    }

    pub fn dim(&self) -> (usize, usize) {
        self.x.dim()
    }
}
