use ndarray::{ArrayView1, ArrayView2, ArrayViewMut1};

use crate::InterpolateError;

use super::{Direction, Extrapolator, Interpolator};

/// Nearest neighbour kernel
///
/// Copies the data of the closer bracketing point, ties go to the right
/// point of the bracket. As extrapolator it copies the first or last source
/// point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Nearest;

impl Interpolator for Nearest {
    fn interp_into(
        &self,
        index: usize,
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
        target: f64,
        mut out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), InterpolateError> {
        let nearest = if target == coord[index] {
            index
        } else {
            let from_prior = (target - coord[index - 1]).abs();
            let from_next = (target - coord[index]).abs();
            if from_next <= from_prior {
                index
            } else {
                index - 1
            }
        };
        out.assign(&data.column(nearest));
        Ok(())
    }
}

impl Extrapolator for Nearest {
    fn extrap_into(
        &self,
        direction: Direction,
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
        _target: f64,
        mut out: ArrayViewMut1<'_, f64>,
    ) -> Result<(), InterpolateError> {
        let edge = match direction {
            Direction::Below => 0,
            Direction::Above => coord.len() - 1,
        };
        out.assign(&data.column(edge));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{array, Array1};

    use super::*;

    #[test]
    fn interp_closer_point() {
        let coord = array![10.0, 20.0];
        let data = array![[1.0, 2.0], [-1.0, -2.0]];
        let mut out = Array1::zeros(2);
        Nearest
            .interp_into(1, coord.view(), data.view(), 12.0, out.view_mut())
            .unwrap();
        assert_eq!(out, array![1.0, -1.0]);
        Nearest
            .interp_into(1, coord.view(), data.view(), 17.0, out.view_mut())
            .unwrap();
        assert_eq!(out, array![2.0, -2.0]);
    }

    #[test]
    fn interp_tie_goes_right() {
        let coord = array![10.0, 20.0];
        let data = array![[1.0, 2.0]];
        let mut out = Array1::zeros(1);
        Nearest
            .interp_into(1, coord.view(), data.view(), 15.0, out.view_mut())
            .unwrap();
        assert_eq!(out[0], 2.0);

        // falling coordinate
        let coord = array![20.0, 10.0];
        Nearest
            .interp_into(1, coord.view(), data.view(), 15.0, out.view_mut())
            .unwrap();
        assert_eq!(out[0], 2.0);
    }

    #[test]
    fn interp_first_point() {
        let coord = array![10.0, 20.0];
        let data = array![[1.0, 2.0]];
        let mut out = Array1::zeros(1);
        Nearest
            .interp_into(0, coord.view(), data.view(), 10.0, out.view_mut())
            .unwrap();
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn extrap_edges() {
        let coord = array![1000.0, 850.0, 500.0];
        let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let mut out = Array1::zeros(2);
        Nearest
            .extrap_into(Direction::Below, coord.view(), data.view(), 1100.0, out.view_mut())
            .unwrap();
        assert_eq!(out, array![1.0, 4.0]);
        Nearest
            .extrap_into(Direction::Above, coord.view(), data.view(), 100.0, out.view_mut())
            .unwrap();
        assert_eq!(out, array![3.0, 6.0]);
    }
}
