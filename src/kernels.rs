//! Interpolation and extrapolation kernels used by [`march`](fn@crate::march)
//!
//! # Traits
//!  - [`Interpolator`] evaluate a target bracketed by two source points
//!  - [`Extrapolator`] evaluate a target beyond the first or last source point
//!
//! # Kernels
//!  - [`Interpolation`] the closed set of interpolation kernels
//!  - [`Extrapolation`] the closed set of extrapolation kernels
//!  - [`Linear`], [`Nearest`], [`NanFill`] the concrete kernels

use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1};

use crate::InterpolateError;

mod linear;
mod nearest;

pub use linear::Linear;
pub use nearest::Nearest;

/// The side of the source coordinate a target lies on when extrapolating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// before the first source point
    Below,
    /// after the last source point
    Above,
}

pub trait Interpolator {
    /// Interpolate at `target` into `out`, one value per data row.
    ///
    /// `index` names the bracket `(index - 1, index)` of `coord`; the
    /// target lies between those points or exactly on `coord[index]`.
    /// `data` has shape `(rows, coord.len())`, `out` has length `rows`.
    ///
    /// Only `index == 0` with `target == coord[0]` may be passed without
    /// a left neighbour.
    fn interp_into(
        &self,
        index: usize,
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
        target: f64,
        out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), InterpolateError>;
}

pub trait Extrapolator {
    /// Extrapolate at `target` into `out`, one value per data row.
    ///
    /// `data` has shape `(rows, coord.len())`, `out` has length `rows`.
    fn extrap_into(
        &self,
        direction: Direction,
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
        target: f64,
        out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), InterpolateError>;
}

/// Extrapolation kernel that fills the output with NaN
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NanFill;

impl Extrapolator for NanFill {
    fn extrap_into(
        &self,
        _direction: Direction,
        _coord: ArrayView1<'_, f64>,
        _data: ArrayView2<'_, f64>,
        _target: f64,
        mut out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), InterpolateError> {
        out.fill(f64::NAN);
        Ok(())
    }
}

/// Interpolation kernels
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// See [`Linear`]
    #[default]
    Linear,
    /// See [`Nearest`]
    Nearest,
}

impl Interpolator for Interpolation {
    #[inline]
    fn interp_into(
        &self,
        index: usize,
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
        target: f64,
        out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), InterpolateError> {
        match self {
            Interpolation::Linear => Linear.interp_into(index, coord, data, target, out),
            Interpolation::Nearest => Nearest.interp_into(index, coord, data, target, out),
        }
    }
}

/// Extrapolation kernels
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Extrapolation {
    /// See [`NanFill`]
    #[default]
    Nan,
    /// See [`Nearest`]
    Nearest,
    /// See [`Linear`]
    Linear,
}

impl Extrapolator for Extrapolation {
    #[inline]
    fn extrap_into(
        &self,
        direction: Direction,
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
        target: f64,
        out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), InterpolateError> {
        match self {
            Extrapolation::Nan => NanFill.extrap_into(direction, coord, data, target, out),
            Extrapolation::Nearest => Nearest.extrap_into(direction, coord, data, target, out),
            Extrapolation::Linear => Linear.extrap_into(direction, coord, data, target, out),
        }
    }
}
