//! Geodesic interpolation between two transformations.

use crate::batch::{SE3BatchF32, SE3BatchF64};
use crate::error::SE3Error;

macro_rules! impl_batch_interpolate {
    ($name:ident, $scalar:ty) => {
        impl $name {
            /// Interpolate along the screw motion from `a` to `b`.
            ///
            /// Computes `a * exp(t * log(a⁻¹ * b))`. `t` is usually in `[0, 1]`,
            /// other values extrapolate.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::NotSingleElement`] unless both `a` and `b` hold
            /// exactly one transformation.
            pub fn interpolate(a: &Self, b: &Self, t: $scalar) -> Result<Self, SE3Error> {
                let a = a.single()?;
                let b = b.single()?;
                Ok(Self::from(a.interpolate(&b, t)))
            }
        }
    };
}

impl_batch_interpolate!(SE3BatchF32, f32);
impl_batch_interpolate!(SE3BatchF64, f64);
