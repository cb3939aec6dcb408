//! Interpolation of _n_-dimensional data along one axis onto target levels
//!
//! # Interpolator
//!  - [`VInterp`] The prepared interpolator, reusable for any number of targets
//!  - [`VInterpBuilder`] Configure and validate the interpolator
//!  - [`interpolate`] Build and interpolate in one call
//!
//! # Layout
//! The source coordinate `z_src` must have the same shape as the trailing
//! dimensions of the source data `fz_src`. Every data dimension in front of
//! that shape is a separate quantity sharing the coordinate. Given
//! `fz_src.shape() == (2, 10, 40, 50)` and `z_src.shape() == (10, 40, 50)`
//! interpolating along `axis = 1` onto 3 target levels returns `(2, 3, 40, 50)`.

use std::marker::PhantomData;

use log::{debug, trace, warn};
use ndarray::{
    Array, Array2, Array3, ArrayBase, ArrayView1, ArrayView2, ArrayViewMut2, ArrayViewMut3, Data,
    Dimension, Zip,
};

use crate::{
    kernels::{Extrapolation, Interpolation},
    layout::Layout,
    march, BuilderError, Element, InterpolateError,
};

/// Vertical interpolator
///
/// Holds the source coordinate and data in a column major working layout
/// together with the chosen kernels. `O` is the output element type and
/// `D` the dimension of the source data.
#[derive(Debug, Clone)]
pub struct VInterp<O, D> {
    layout: Layout,
    /// `(columns, n_src)`
    z_src: Array2<f64>,
    /// `(columns, rows, n_src)`
    fz_src: Array3<f64>,
    rising: bool,
    interpolation: Interpolation,
    extrapolation: Extrapolation,
    output: PhantomData<fn() -> (O, D)>,
}

impl<O, D> VInterp<O, D>
where
    O: num_traits::Float + Send + Sync,
    D: Dimension,
{
    /// Interpolate the source data onto `z_target`.
    ///
    /// A 1D `z_target` is used for every column. A `z_target` with the same
    /// rank as the source coordinate provides separate targets per column and
    /// must match the coordinate shape on every axis except the
    /// interpolation axis.
    ///
    /// The result has the shape of the source data, with the length of the
    /// interpolation axis replaced by the number of targets.
    ///
    /// ```rust
    /// # use ndarray::*;
    /// # use ndarray_stratify::*;
    /// // two columns with different coordinate values
    /// let z_src = array![[10.0f64, 20.0, 30.0], [0.0, 10.0, 20.0]];
    /// let fz_src = z_src.clone();
    /// let interpolator = VInterpBuilder::new(z_src, fz_src).build().unwrap();
    ///
    /// // the same targets for both columns
    /// let result: Array2<f64> = interpolator.interp(&array![15.0, 25.0]).unwrap();
    /// assert!(result[[1, 1]].is_nan());
    /// assert_eq!(result.row(0), array![15.0, 25.0]);
    ///
    /// // one set of targets per column
    /// let result = interpolator.interp(&array![[15.0], [5.0]]).unwrap();
    /// assert_eq!(result, array![[15.0], [5.0]]);
    /// ```
    pub fn interp<St, Dt>(&self, z_target: &ArrayBase<St, Dt>) -> Result<Array<O, D>, InterpolateError>
    where
        St: Data,
        St::Elem: Element,
        Dt: Dimension,
    {
        let target_layout = self.layout.target_layout(z_target.shape())?;
        if let Some(index) = z_target.iter().position(|z| z.to_f64().is_nan()) {
            return Err(InterpolateError::InvalidTarget(format!(
                "The target coordinate may not contain NaN values, found NaN at flat index {index}"
            )));
        }

        let n_target = target_layout.len();
        let columns = self.layout.columns();
        let gathered = self
            .layout
            .gather_targets(z_target.view().into_dyn(), target_layout);
        let targets = gathered.broadcast((columns, n_target)).ok_or_else(|| {
            InterpolateError::ShapeMismatch(format!(
                "can not broadcast targets of shape {:?} to {:?}",
                gathered.shape(),
                (columns, n_target)
            ))
        })?;

        trace!(
            "interpolating {columns} columns of {} rows onto {n_target} targets ({target_layout:?})",
            self.layout.rows()
        );
        let mut work = Array3::zeros((columns, self.layout.rows(), n_target));
        self.dispatch(targets, work.view_mut())?;

        let result = self.layout.scatter::<O>(work.view(), n_target)?;
        Ok(result.into_dimensionality::<D>()?)
    }

    #[cfg(not(feature = "rayon"))]
    fn dispatch(
        &self,
        targets: ArrayView2<'_, f64>,
        mut work: ArrayViewMut3<'_, f64>,
    ) -> Result<(), InterpolateError> {
        use ndarray::FoldWhile;

        Zip::from(work.outer_iter_mut())
            .and(targets.outer_iter())
            .and(self.z_src.outer_iter())
            .and(self.fz_src.outer_iter())
            .fold_while(Ok(()), |_, out, targets, coord, data| {
                match self.march_column(out, targets, coord, data) {
                    Ok(_) => FoldWhile::Continue(Ok(())),
                    Err(e) => FoldWhile::Done(Err(e)),
                }
            })
            .into_inner()
    }

    #[cfg(feature = "rayon")]
    fn dispatch(
        &self,
        targets: ArrayView2<'_, f64>,
        mut work: ArrayViewMut3<'_, f64>,
    ) -> Result<(), InterpolateError> {
        use ndarray::parallel::prelude::*;

        Zip::from(work.outer_iter_mut())
            .and(targets.outer_iter())
            .and(self.z_src.outer_iter())
            .and(self.fz_src.outer_iter())
            .into_par_iter()
            .try_for_each(|(out, targets, coord, data)| {
                self.march_column(out, targets, coord, data)
            })
    }

    #[inline]
    fn march_column(
        &self,
        out: ArrayViewMut2<'_, f64>,
        targets: ArrayView1<'_, f64>,
        coord: ArrayView1<'_, f64>,
        data: ArrayView2<'_, f64>,
    ) -> Result<(), InterpolateError> {
        march(
            targets,
            coord,
            data,
            self.rising,
            &self.interpolation,
            &self.extrapolation,
            out,
        )
    }

    /// whether the source coordinate is treated as rising
    pub fn rising(&self) -> bool {
        self.rising
    }

    /// the interpolation axis, resolved against the data dimensions
    pub fn axis(&self) -> usize {
        self.layout.axis()
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn extrapolation(&self) -> Extrapolation {
        self.extrapolation
    }
}

/// Create and configure a [`VInterp`] interpolator.
///
/// # Default configuration
/// Interpolation happens along the last axis (`axis = -1`) with
/// [`Interpolation::Linear`] and [`Extrapolation::Nan`]. The direction of
/// the source coordinate is derived from its first two values.
pub struct VInterpBuilder<Sz, Sd, Dz, D>
where
    Sz: Data,
    Sd: Data,
    Dz: Dimension,
    D: Dimension,
{
    z_src: ArrayBase<Sz, Dz>,
    fz_src: ArrayBase<Sd, D>,
    axis: isize,
    rising: Option<bool>,
    interpolation: Interpolation,
    extrapolation: Extrapolation,
}

impl<Sz, Sd, Dz, D> VInterpBuilder<Sz, Sd, Dz, D>
where
    Sz: Data,
    Sz::Elem: Element,
    Sd: Data,
    Sd::Elem: Element,
    Dz: Dimension,
    D: Dimension,
{
    /// Create a new [`VInterpBuilder`] from the source coordinate and the
    /// source data. The shape of `z_src` must equal the trailing dimensions
    /// of `fz_src`.
    pub fn new(z_src: ArrayBase<Sz, Dz>, fz_src: ArrayBase<Sd, D>) -> Self {
        VInterpBuilder {
            z_src,
            fz_src,
            axis: -1,
            rising: None,
            interpolation: Interpolation::default(),
            extrapolation: Extrapolation::default(),
        }
    }

    /// Set the interpolation axis of the data. Negative values count from
    /// the last axis. Default is `-1`.
    pub fn axis(mut self, axis: isize) -> Self {
        self.axis = axis;
        self
    }

    /// Set whether the source coordinate generally rises along the axis.
    /// When not set it is derived from the first two values of the first
    /// column where neither is NaN.
    pub fn rising(mut self, rising: bool) -> Self {
        self.rising = Some(rising);
        self
    }

    /// Set the interpolation kernel, default is [`Interpolation::Linear`]
    pub fn interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the extrapolation kernel, default is [`Extrapolation::Nan`]
    pub fn extrapolation(mut self, extrapolation: Extrapolation) -> Self {
        self.extrapolation = extrapolation;
        self
    }

    /// Validate the input and create the configured [`VInterp`]
    pub fn build(self) -> Result<VInterp<<Sd::Elem as Element>::Output, D>, BuilderError> {
        let VInterpBuilder {
            z_src,
            fz_src,
            axis,
            rising,
            interpolation,
            extrapolation,
        } = self;

        let layout = Layout::new(z_src.shape(), fz_src.shape(), axis)?;
        if rising.is_none() && layout.n_src() < 2 {
            return Err(BuilderError::AmbiguousDirection(format!(
                "rising must be set when the source coordinate has less than 2 values along \
                 the axis, got {}",
                layout.n_src()
            )));
        }
        debug!("canonical layout {layout:?}");

        let z_src = layout.gather_coord(z_src.view().into_dyn());
        let rising = match rising {
            Some(rising) => rising,
            None => derive_rising(&z_src),
        };
        let fz_src = layout.gather_data(fz_src.view().into_dyn());

        Ok(VInterp {
            layout,
            z_src,
            fz_src,
            rising,
            interpolation,
            extrapolation,
            output: PhantomData,
        })
    }
}

/// Compare the first two values of the first column where neither is NaN.
/// Without such a column the coordinate is taken as rising.
fn derive_rising(z_src: &Array2<f64>) -> bool {
    let mut directions = z_src
        .outer_iter()
        .filter(|column| !column[0].is_nan() && !column[1].is_nan())
        .map(|column| column[0] <= column[1]);
    let Some(rising) = directions.next() else {
        debug!("no column with two valid leading values, assuming rising");
        return true;
    };
    let disagreeing = directions.filter(|&other| other != rising).count();
    if disagreeing > 0 {
        warn!(
            "{disagreeing} columns of the source coordinate disagree with the direction of the \
             first one, treating all as rising = {rising}"
        );
    }
    debug!("derived rising = {rising}");
    rising
}

/// Interpolate `fz_src`, sampled at `z_src`, onto `z_target` along `axis`.
///
/// Convenience wrapper around [`VInterpBuilder`] and [`VInterp::interp`].
/// When `rising` is `None` the direction is derived from the source
/// coordinate.
///
/// ```rust
/// # use ndarray::*;
/// # use ndarray_stratify::*;
/// // pressure falls with the level index
/// let pressure = array![1000.0, 850.0, 500.0];
/// let temperature = array![[288.0f64, 281.0, 252.0]];
///
/// let result = interpolate(
///     &array![1100.0, 700.0],
///     &pressure,
///     &temperature,
///     -1,
///     Some(false),
///     Interpolation::Linear,
///     Extrapolation::Nearest,
/// ).unwrap();
/// assert_eq!(result[[0, 0]], 288.0);
/// ```
pub fn interpolate<St, Sz, Sd, Dt, Dz, D>(
    z_target: &ArrayBase<St, Dt>,
    z_src: &ArrayBase<Sz, Dz>,
    fz_src: &ArrayBase<Sd, D>,
    axis: isize,
    rising: Option<bool>,
    interpolation: Interpolation,
    extrapolation: Extrapolation,
) -> Result<Array<<Sd::Elem as Element>::Output, D>, InterpolateError>
where
    St: Data,
    St::Elem: Element,
    Sz: Data,
    Sz::Elem: Element,
    Sd: Data,
    Sd::Elem: Element,
    Dt: Dimension,
    Dz: Dimension,
    D: Dimension,
{
    let mut builder = VInterpBuilder::new(z_src.view(), fz_src.view())
        .axis(axis)
        .interpolation(interpolation)
        .extrapolation(extrapolation);
    if let Some(rising) = rising {
        builder = builder.rising(rising);
    }
    builder.build()?.interp(z_target)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array, Array1, Axis, IxDyn};
    use rand::{
        distr::{uniform::SampleUniform, Uniform},
        rngs::StdRng,
        Rng, SeedableRng,
    };

    use super::{derive_rising, VInterpBuilder};
    use crate::{BuilderError, Extrapolation, InterpolateError};

    fn rand_arr<T: SampleUniform>(size: usize, range: (T, T), seed: u64) -> Array1<T> {
        Array::from_iter(
            StdRng::seed_from_u64(seed)
                .sample_iter(Uniform::new_inclusive(range.0, range.1).unwrap())
                .take(size),
        )
    }

    macro_rules! test_dim {
        ($name:ident, $dim:expr, $shape:expr) => {
            #[test]
            fn $name() {
                let data = rand_arr(4usize.pow($dim), (0.0f64, 1.0), 64)
                    .into_shape_with_order($shape)
                    .unwrap();
                let z_src = Array::linspace(0.0, 3.0, 4);
                let interp = VInterpBuilder::new(z_src, data.view()).build().unwrap();
                let res = interp.interp(&array![0.5, 1.0, 2.5]).unwrap();
                assert_eq!(res.ndim(), $dim);
                assert_eq!(res.shape()[$dim - 1], 3);
                assert!(res.shape()[..$dim - 1].iter().all(|&len| len == 4));

                // exact matches copy the data
                let res = interp.interp(&array![1.0, 2.0]).unwrap();
                assert_abs_diff_eq!(
                    res.index_axis(Axis($dim - 1), 0),
                    data.index_axis(Axis($dim - 1), 1),
                    epsilon = 0.0
                );
            }
        };
    }

    test_dim!(vinterp_1d, 1, 4);
    test_dim!(vinterp_2d, 2, (4, 4));
    test_dim!(vinterp_3d, 3, (4, 4, 4));
    test_dim!(vinterp_4d, 4, (4, 4, 4, 4));
    test_dim!(vinterp_5d, 5, (4, 4, 4, 4, 4));
    test_dim!(vinterp_6d, 6, (4, 4, 4, 4, 4, 4));
    test_dim!(vinterp_7d, 7, IxDyn(&[4, 4, 4, 4, 4, 4, 4]));

    #[test]
    fn derive_direction() {
        assert!(derive_rising(&array![[1.0, 2.0], [3.0, 3.0]]));
        assert!(!derive_rising(&array![[2.0, 1.0], [3.0, 4.0]]));
        assert!(derive_rising(&array![[1.0, 2.0], [4.0, 3.0], [5.0, 3.0]]));
        // columns with a NaN in the first two values are skipped
        assert!(!derive_rising(&array![[f64::NAN, 1.0], [3.0, 2.0], [1.0, 2.0]]));
        assert!(derive_rising(&array![[f64::NAN, f64::NAN]]));
    }

    #[test]
    fn derive_direction_needs_two_values() {
        let res = VInterpBuilder::new(array![1.0], array![[1.0f64], [2.0]]).build();
        assert!(matches!(res, Err(BuilderError::AmbiguousDirection(_))));

        let interp = VInterpBuilder::new(array![1.0], array![[1.0f64], [2.0]])
            .rising(true)
            .extrapolation(Extrapolation::Nearest)
            .build()
            .unwrap();
        assert_eq!(interp.interp(&array![0.0, 1.0, 2.0]).unwrap(), array![[1.0, 1.0, 1.0], [2.0, 2.0, 2.0]]);
    }

    #[test]
    fn nan_target_before_any_work() {
        let interp = VInterpBuilder::new(array![1.0, 2.0], array![1.0f64, 2.0]).build().unwrap();
        assert!(matches!(
            interp.interp(&array![1.5, f64::NAN]),
            Err(InterpolateError::InvalidTarget(_))
        ));
    }

    #[test]
    fn accessors() {
        let interp = VInterpBuilder::new(array![3.0, 2.0], array![[1.0f64, 2.0]])
            .axis(1)
            .build()
            .unwrap();
        assert!(!interp.rising());
        assert_eq!(interp.axis(), 1);
        assert_eq!(interp.extrapolation(), Extrapolation::Nan);
    }
}
