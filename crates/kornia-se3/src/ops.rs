//! Broadcasting group algebra on transformation batches.
//!
//! Two batches of sizes `a` and `b` compose only if one of them has size 1:
//!
//! | `a` | `b` | result |
//! |-----|-----|--------|
//! | N | 1 | `[A[i] * B[0]]`, size N |
//! | 1 | N | `[A[0] * B[i]]`, size N |
//! | N | M (N, M > 1) | [`SE3Error::IncompatibleBatchSizes`], even when N == M |

use crate::batch::{SE3BatchF32, SE3BatchF64};
use crate::error::SE3Error;

macro_rules! impl_batch_ops {
    ($name:ident, $scalar:ty, $vec3:ty) => {
        impl $name {
            /// Compose two batches with the 1-to-N broadcasting rule.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::IncompatibleBatchSizes`] if neither batch has size 1.
            pub fn compose(&self, other: &Self) -> Result<Self, SE3Error> {
                let elements = match (self.elements.as_slice(), other.elements.as_slice()) {
                    (lhs, [rhs]) => lhs.iter().map(|a| *a * *rhs).collect(),
                    ([lhs], rhs) => rhs.iter().map(|b| *lhs * *b).collect(),
                    (lhs, rhs) => {
                        return Err(SE3Error::IncompatibleBatchSizes {
                            lhs: lhs.len(),
                            rhs: rhs.len(),
                        })
                    }
                };
                Ok(Self { elements })
            }

            /// Compose `other` onto `self` in place.
            ///
            /// - If `self` has size 1, every element of `other` is chained onto it:
            ///   `self[0] = self[0] * other[0] * ... * other[N - 1]`.
            /// - Otherwise, if `other` has size 1, every element becomes
            ///   `self[i] * other[0]`.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::IncompatibleBatchSizes`] if neither batch has size 1.
            /// `self` is left untouched on error.
            pub fn compose_in_place(&mut self, other: &Self) -> Result<(), SE3Error> {
                match (self.elements.as_mut_slice(), other.elements.as_slice()) {
                    ([lhs], rhs) => {
                        *lhs = rhs.iter().fold(*lhs, |acc, b| acc * *b);
                    }
                    (lhs, [rhs]) => {
                        for a in lhs.iter_mut() {
                            *a *= *rhs;
                        }
                    }
                    (lhs, rhs) => {
                        return Err(SE3Error::IncompatibleBatchSizes {
                            lhs: lhs.len(),
                            rhs: rhs.len(),
                        })
                    }
                }
                Ok(())
            }

            /// Invert every transformation, keeping the batch size and order.
            pub fn inverse(&self) -> Self {
                Self {
                    elements: self.elements.iter().map(|x| x.inverse()).collect(),
                }
            }

            /// Apply a single transformation to a set of 3D points.
            ///
            /// # Errors
            ///
            /// - [`SE3Error::NotSingleElement`] if the batch size is not 1.
            /// - [`SE3Error::EmptyPoints`] if `points` is empty.
            pub fn apply(&self, points: &[[$scalar; 3]]) -> Result<Vec<[$scalar; 3]>, SE3Error> {
                let transform = self.single()?;
                if points.is_empty() {
                    return Err(SE3Error::EmptyPoints);
                }
                Ok(points
                    .iter()
                    .map(|p| transform.transform_point(<$vec3>::from_array(*p)).to_array())
                    .collect())
            }
        }
    };
}

impl_batch_ops!(SE3BatchF32, f32, glam::Vec3);
impl_batch_ops!(SE3BatchF64, f64, glam::DVec3);
