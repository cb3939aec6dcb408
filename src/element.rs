use num_traits::Float;

/// Numeric element types accepted as source coordinate, source data or
/// target coordinate.
///
/// Computation always happens in `f64`. Interpolated values are returned as
/// [`Element::Output`]: floats keep their own type, integers are promoted
/// to `f64`.
pub trait Element: Copy + Send + Sync {
    /// element type of interpolated values
    type Output: Float + Send + Sync;

    /// the value as `f64`, used in every computation
    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    ($output:ty; $($elem:ty),+) => {
        $(
            impl Element for $elem {
                type Output = $output;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )+
    };
}

impl_element!(f32; f32);
impl_element!(f64; f64, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

#[cfg(test)]
mod tests {
    use super::Element;

    fn output_of<T: Element>(value: T) -> T::Output {
        num_traits::cast(value.to_f64()).unwrap_or_else(|| unreachable!())
    }

    #[test]
    fn integers_promote_to_f64() {
        let promoted: f64 = output_of(7i32);
        assert_eq!(promoted, 7.0);
        let promoted: f64 = output_of(250u8);
        assert_eq!(promoted, 250.0);
    }

    #[test]
    fn floats_keep_their_type() {
        let kept: f32 = output_of(1.5f32);
        assert_eq!(kept, 1.5);
        assert!(output_of(f64::NAN).is_nan());
    }
}
