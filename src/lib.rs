//! The ndarray-stratify crate interpolates _n_-dimensional data onto
//! target levels along one axis, where the source coordinate itself may
//! vary across the other dimensions (e.g. fields on model levels whose
//! pressure differs at every grid point).
//!
//! [`VInterpBuilder`](vinterp::VInterpBuilder) validates and prepares the
//! source arrays, [`VInterp`](vinterp::VInterp) interpolates them onto any
//! number of target coordinates. [`interpolate`](vinterp::interpolate) does
//! both in one call.
//!
//! ```rust
//! # use ndarray::*;
//! # use ndarray_stratify::*;
//! let z_src = array![2.0, 4.0, 6.0];
//! let fz_src = array![[2.0f64, 4.0, 6.0]];
//! let result = VInterpBuilder::new(z_src.view(), fz_src.view())
//!     .build()
//!     .unwrap()
//!     .interp(&array![3.0, 5.0])
//!     .unwrap();
//! assert_eq!(result, array![[3.0, 5.0]]);
//! ```
use thiserror::Error;

mod element;
pub mod kernels;
mod layout;
mod march;
pub mod vinterp;

pub use element::Element;
pub use kernels::{Direction, Extrapolation, Extrapolator, Interpolation, Interpolator};
pub use march::march;
pub use vinterp::{interpolate, VInterp, VInterpBuilder};

/// Errors raised while validating and preparing the source arrays
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuilderError {
    /// the trailing shape of the data does not equal the coordinate shape
    #[error("{0}")]
    ShapeMismatch(String),
    /// the resolved axis is outside the data or coordinate rank
    #[error("{0}")]
    AxisOutOfRange(String),
    /// the direction was not given and can not be derived
    #[error("{0}")]
    AmbiguousDirection(String),
}

/// Errors raised while interpolating
#[derive(Debug, Error)]
pub enum InterpolateError {
    /// a target coordinate value is NaN
    #[error("{0}")]
    InvalidTarget(String),
    /// the source coordinate mixes NaN and non NaN values
    #[error("{0}")]
    InvalidSource(String),
    /// linear extrapolation needs at least two source points
    #[error("{0}")]
    InsufficientData(String),
    /// the target coordinate does not fit the source coordinate
    #[error("{0}")]
    ShapeMismatch(String),
    #[error(transparent)]
    Builder(#[from] BuilderError),
    #[error(transparent)]
    Shape(#[from] ndarray::ShapeError),
}
