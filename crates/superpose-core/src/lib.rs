//! # Superpose Core
//!
//! The numerical backbone of Superpose. This crate evaluates superpositions
//! of electromagnetic plane-wave modes on 1D and 2D grids and precomputes
//! animation frames for the front ends.
//!
//! ## Architecture
//!
//! A scene is a list of modes ([`types::Mode1d`] or [`types::Mode2d`]),
//! each carrying a wavenumber, a polarisation and a complex amplitude. The
//! field at `(x, t)` is the sum of the mode phasors, optionally with the
//! complex conjugate added so the result is a real field.
//!
//! ## Modules
//!
//! - [`types`]: Modes, polarisations, amplitude renormalisation.
//! - [`grid`]: 1D grids and 2D meshgrids.
//! - [`superposition`]: Mode sums over a grid at one instant.
//! - [`timing`]: Beat periods and animation time axes.
//! - [`animation`]: Precomputed frames for the polarised and complex scenes.
//! - [`quiver`]: 2D basis fields combined by user coefficients.
//! - [`presets`]: Built-in scenes.
//! - [`error`]: [`FieldError`](error::FieldError).

pub mod animation;
pub mod error;
pub mod grid;
pub mod presets;
pub mod quiver;
pub mod superposition;
pub mod timing;
pub mod types;
