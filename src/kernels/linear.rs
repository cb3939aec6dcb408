use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1, Zip};

use crate::InterpolateError;

use super::{Direction, Extrapolator, Interpolator};

/// Linear kernel
///
/// Interpolates between the two bracketing source points. As extrapolator
/// it continues the line through the two outermost points on the relevant
/// edge, which needs at least two source points.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Linear;

impl Interpolator for Linear {
    fn interp_into(
        &self,
        index: usize,
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
        target: f64,
        mut out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), InterpolateError> {
        if target == coord[index] {
            out.assign(&data.column(index));
            return Ok(());
        }
        let left = index - 1;
        Self::lerp_into((left, index), coord, data, target, out);
        Ok(())
    }
}

impl Extrapolator for Linear {
    fn extrap_into(
        &self,
        direction: Direction,
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
        target: f64,
        out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), InterpolateError> {
        let len = coord.len();
        if len < 2 {
            return Err(InterpolateError::InsufficientData(format!(
                "Linear extrapolation requires at least 2 source points, got {len}"
            )));
        }
        let edge = match direction {
            Direction::Below => (0, 1),
            Direction::Above => (len - 2, len - 1),
        };
        Self::lerp_into(edge, coord, data, target, out);
        Ok(())
    }
}

impl Linear {
    /// evaluate the line through the points `p0` and `p1` at `target`
    fn lerp_into(
        (p0, p1): (usize, usize),
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
        target: f64,
        out: ArrayViewMut1<'_, f64>,
    ) {
        let frac = (target - coord[p0]) / (coord[p1] - coord[p0]);
        Zip::from(out)
            .and(data.column(p0))
            .and(data.column(p1))
            .for_each(|t, &y0, &y1| {
                *t = y0 + frac * (y1 - y0);
            });
    }
}
