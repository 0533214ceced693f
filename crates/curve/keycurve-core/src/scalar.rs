//! Floating-point abstraction shared by the full and reduced precision curves.

use std::fmt::{Debug, Display};
use std::ops::AddAssign;
use std::str::FromStr;

use num_traits::Float;

/// Scalar type a [`Curve`](crate::Curve) stores its keys and compiled
/// coefficients in. Implemented for `f64` (`HermiteCurve`) and `f32`
/// (`FastFloatCurve`).
pub trait CurveFloat:
    Float + Debug + Display + Default + FromStr + AddAssign + Send + Sync + 'static
{
    const ZERO: Self;
    const TWO: Self;
    const THREE: Self;
    const HALF: Self;
    const INFINITY: Self;

    /// Narrowing conversion used for parsed records and host keyframes.
    fn from_f64(v: f64) -> Self;
    fn as_f64(self) -> f64;
}

macro_rules! impl_curve_float {
    ($t:ty) => {
        impl CurveFloat for $t {
            const ZERO: Self = 0.0;
            const TWO: Self = 2.0;
            const THREE: Self = 3.0;
            const HALF: Self = 0.5;
            const INFINITY: Self = <$t>::INFINITY;

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn as_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_curve_float!(f32);
impl_curve_float!(f64);
