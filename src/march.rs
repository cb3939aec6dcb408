use std::cmp::Ordering;

use ndarray::{ArrayView1, ArrayView2, ArrayViewMut2};

use crate::{
    kernels::{Direction, Extrapolator, Interpolator},
    InterpolateError,
};

/// Where the search window currently sits relative to the source points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// the window never advanced past the first source point
    Before,
    /// the window is bracketed by two source points
    Within,
    /// the window ran off the last source point
    After,
}

#[inline]
fn sign(value: f64) -> Ordering {
    value.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
}

#[inline]
fn source_point(coord: ArrayView1<'_, f64>, index: usize) -> Result<f64, InterpolateError> {
    let z = coord[index];
    if z.is_nan() {
        return Err(InterpolateError::InvalidSource(format!(
            "The source coordinate may not contain NaN values, found NaN at index {index}"
        )));
    }
    Ok(z)
}

/// Interpolate one column of data onto `targets`.
///
/// `coord` is the source coordinate of the column, `data` holds one row per
/// co-located quantity with shape `(rows, coord.len())` and `out` must have
/// shape `(rows, targets.len())`. `rising` is the general direction of
/// `coord`.
///
/// The targets are processed in the given order, marching forward through
/// `coord`: once a target has been handled, the search never returns to
/// source points before it. Ascending targets on a rising coordinate (or
/// descending targets on a falling one) give the plain interpolation result,
/// other orders give results that depend on that order.
///
/// A coordinate made only of NaN values fills `out` with NaN.
///
/// ```rust
/// # use ndarray::*;
/// # use ndarray_stratify::*;
/// let coord = array![2.0, 4.0, 6.0];
/// let data = array![[2.0, 4.0, 6.0]];
/// let mut out = Array2::zeros((1, 2));
///
/// march(
///     array![5.0, 3.0].view(),
///     coord.view(),
///     data.view(),
///     true,
///     &Interpolation::Linear,
///     &Extrapolation::Nan,
///     out.view_mut(),
/// ).unwrap();
/// // 3.0 lies behind the window after 5.0 was handled
/// assert_eq!(out[[0, 0]], 5.0);
/// assert!(out[[0, 1]].is_nan());
/// ```
///
/// # Panics
/// When `data` or `out` do not have the shapes described above
pub fn march<I, E>(
    targets: ArrayView1<'_, f64>,
    coord: ArrayView1<'_, f64>,
    data: ArrayView2<'_, f64>,
    rising: bool,
    interpolation: &I,
    extrapolation: &E,
    mut out: ArrayViewMut2<'_, f64>,
) -> Result<(), InterpolateError>
where
    I: Interpolator + ?Sized,
    E: Extrapolator + ?Sized,
{
    assert_eq!(data.dim(), (out.nrows(), coord.len()), "data shape");
    assert_eq!(out.ncols(), targets.len(), "output shape");

    let n_src = coord.len();

    if coord.first().map_or(true, |z| z.is_nan()) && coord.iter().all(|z| z.is_nan()) {
        out.fill(f64::NAN);
        return Ok(());
    }

    let mut z_before = if rising {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let z_last = -z_before;

    let mut i_src = 0;
    let mut cursor = Cursor::Before;
    let mut z_after = source_point(coord, 0)?;

    for (i_target, (&z_target, fz_target)) in targets.iter().zip(out.columns_mut()).enumerate() {
        if z_target.is_nan() {
            return Err(InterpolateError::InvalidTarget(format!(
                "The target coordinate may not contain NaN values, found NaN at index {i_target}"
            )));
        }

        let sign_before = sign(z_before - z_target);
        let mut sign_after = sign(z_after - z_target);

        // move the window forward until the target lies inside
        while sign_before == sign_after {
            i_src = (i_src + 1).min(n_src);
            if i_src < n_src {
                cursor = Cursor::Within;
                z_after = source_point(coord, i_src)?;
                sign_after = sign(z_after - z_target);
            } else {
                cursor = Cursor::After;
                z_after = z_last;
                sign_after = sign(z_after - z_target);
                break;
            }
        }

        if cursor == Cursor::Within || (sign_after == Ordering::Equal && i_src < n_src) {
            interpolation.interp_into(i_src, coord, data, z_target, fz_target)?;
        } else {
            let direction = match cursor {
                Cursor::Before => Direction::Below,
                _ => Direction::Above,
            };
            extrapolation.extrap_into(direction, coord, data, z_target, fz_target)?;
        }

        z_before = z_target;
    }
    Ok(())
}
