use ndarray::{Array1, Array2, Array3, ArrayD, ArrayView3, ArrayViewD, Axis, IxDyn, ShapeError};
use num_traits::{Float, NumCast};

use crate::{BuilderError, Element, InterpolateError};

/// How target coordinates are laid out relative to the source coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TargetLayout {
    /// one 1D target sequence used by every column
    Shared(usize),
    /// one target sequence per column, same rank as the source coordinate
    Columnwise(usize),
}

impl TargetLayout {
    pub(crate) fn len(&self) -> usize {
        match *self {
            TargetLayout::Shared(len) | TargetLayout::Columnwise(len) => len,
        }
    }
}

/// The canonical working layout of a source coordinate and its data.
///
/// The coordinate is viewed as `(leading, n_src, trailing)` and the data as
/// `(rows, leading, n_src, trailing)`, where `rows` folds every data axis in
/// front of the coordinate shape. Columns are numbered
/// `leading_index * trailing + trailing_index`.
///
/// The working buffers are column major: each column owns one contiguous
/// block, `(columns, n_src)` for the coordinate and `(columns, rows, n_src)`
/// for the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    data_shape: Vec<usize>,
    coord_shape: Vec<usize>,
    /// interpolation axis in the data rank
    axis: usize,
    /// interpolation axis in the coordinate rank
    coord_axis: usize,
    rows: usize,
    leading: usize,
    n_src: usize,
    trailing: usize,
}

impl Layout {
    pub(crate) fn new(
        coord_shape: &[usize],
        data_shape: &[usize],
        axis: isize,
    ) -> Result<Self, BuilderError> {
        use BuilderError::*;

        let data_ndim = data_shape.len() as isize;
        let resolved = if axis < 0 { axis + data_ndim } else { axis };
        if !(0..data_ndim).contains(&resolved) {
            return Err(AxisOutOfRange(format!(
                "axis {axis} is out of range for data with {data_ndim} dimensions"
            )));
        }

        if coord_shape.len() > data_shape.len() {
            return Err(ShapeMismatch(format!(
                "the source coordinate has more dimensions than the data, got {coord_shape:?} \
                 and {data_shape:?}"
            )));
        }
        let offset = data_shape.len() - coord_shape.len();
        let coord_axis = resolved - offset as isize;
        if !(0..coord_shape.len() as isize).contains(&coord_axis) {
            return Err(AxisOutOfRange(format!(
                "axis {axis} is not an axis of the source coordinate with shape {coord_shape:?}"
            )));
        }
        if &data_shape[offset..] != coord_shape {
            return Err(ShapeMismatch(format!(
                "the trailing shape of the data {:?} must equal the shape of the source \
                 coordinate {coord_shape:?}",
                &data_shape[offset..]
            )));
        }

        let coord_axis = coord_axis as usize;
        Ok(Layout {
            data_shape: data_shape.to_vec(),
            coord_shape: coord_shape.to_vec(),
            axis: resolved as usize,
            coord_axis,
            rows: data_shape[..offset].iter().product(),
            leading: coord_shape[..coord_axis].iter().product(),
            n_src: coord_shape[coord_axis],
            trailing: coord_shape[coord_axis + 1..].iter().product(),
        })
    }

    pub(crate) fn axis(&self) -> usize {
        self.axis
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn n_src(&self) -> usize {
        self.n_src
    }

    pub(crate) fn columns(&self) -> usize {
        self.leading * self.trailing
    }

    /// column number and position along the axis of the element at
    /// `flat` in row major `(leading, len, trailing)` order
    #[inline]
    fn locate(&self, flat: usize, len: usize) -> (usize, usize) {
        let leading = flat / (len * self.trailing);
        let along = (flat / self.trailing) % len;
        let trailing = flat % self.trailing;
        (leading * self.trailing + trailing, along)
    }

    /// gather the source coordinate into `(columns, n_src)`
    pub(crate) fn gather_coord<A: Element>(&self, z_src: ArrayViewD<'_, A>) -> Array2<f64> {
        debug_assert_eq!(z_src.shape(), self.coord_shape.as_slice());
        self.gather_columns(z_src, self.n_src)
    }

    /// gather the source data into `(columns, rows, n_src)`
    pub(crate) fn gather_data<A: Element>(&self, fz_src: ArrayViewD<'_, A>) -> Array3<f64> {
        debug_assert_eq!(fz_src.shape(), self.data_shape.as_slice());
        let mut arena = Array3::zeros((self.columns(), self.rows, self.n_src));
        if arena.is_empty() {
            return arena;
        }
        let per_row = self.leading * self.n_src * self.trailing;
        for (flat, &value) in fz_src.iter().enumerate() {
            let row = flat / per_row;
            let (column, along) = self.locate(flat % per_row, self.n_src);
            arena[[column, row, along]] = value.to_f64();
        }
        arena
    }

    fn gather_columns<A: Element>(&self, values: ArrayViewD<'_, A>, len: usize) -> Array2<f64> {
        let mut arena = Array2::zeros((self.columns(), len));
        if arena.is_empty() {
            return arena;
        }
        for (flat, &value) in values.iter().enumerate() {
            let (column, along) = self.locate(flat, len);
            arena[[column, along]] = value.to_f64();
        }
        arena
    }

    /// Classify the shape of a target coordinate.
    ///
    /// A 1D target is shared by all columns. A target with the rank of the
    /// source coordinate must match its shape on every other axis.
    pub(crate) fn target_layout(&self, shape: &[usize]) -> Result<TargetLayout, InterpolateError> {
        if shape.len() == 1 {
            return Ok(TargetLayout::Shared(shape[0]));
        }
        let matches_coord = shape.len() == self.coord_shape.len()
            && shape
                .iter()
                .zip(&self.coord_shape)
                .enumerate()
                .all(|(axis, (t, z))| axis == self.coord_axis || t == z);
        if !matches_coord {
            return Err(InterpolateError::ShapeMismatch(format!(
                "the target coordinate must be 1D or match the source coordinate shape \
                 {:?} outside axis {}, got {shape:?}",
                self.coord_shape, self.coord_axis
            )));
        }
        Ok(TargetLayout::Columnwise(shape[self.coord_axis]))
    }

    /// Gather a target coordinate into `(columns, n_target)`.
    ///
    /// Shared targets are flattened and stay a single row, the dispatch
    /// broadcasts them.
    pub(crate) fn gather_targets<A: Element>(
        &self,
        z_target: ArrayViewD<'_, A>,
        layout: TargetLayout,
    ) -> Array2<f64> {
        match layout {
            TargetLayout::Shared(len) => {
                debug_assert_eq!(z_target.len(), len);
                let targets: Array1<f64> = z_target.iter().map(|v| v.to_f64()).collect();
                targets.insert_axis(Axis(0))
            }
            TargetLayout::Columnwise(len) => self.gather_columns(z_target, len),
        }
    }

    /// shape of the interpolated data for `n_target` target points
    pub(crate) fn output_shape(&self, n_target: usize) -> Vec<usize> {
        let mut shape = self.data_shape.clone();
        shape[self.axis] = n_target;
        shape
    }

    /// Scatter a `(columns, rows, n_target)` working buffer back into the
    /// caller's layout, casting every value to `O`.
    pub(crate) fn scatter<O: Float>(
        &self,
        work: ArrayView3<'_, f64>,
        n_target: usize,
    ) -> Result<ArrayD<O>, ShapeError> {
        debug_assert_eq!(work.dim(), (self.columns(), self.rows, n_target));
        let mut values = Vec::with_capacity(work.len());
        for row in 0..self.rows {
            for leading in 0..self.leading {
                for along in 0..n_target {
                    for trailing in 0..self.trailing {
                        let column = leading * self.trailing + trailing;
                        let value = work[[column, row, along]];
                        values.push(<O as NumCast>::from(value).unwrap_or_else(O::nan));
                    }
                }
            }
        }
        ArrayD::from_shape_vec(IxDyn(&self.output_shape(n_target)), values)
    }
}
