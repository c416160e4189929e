//! Iterative (Karcher) mean of a batch of transformations.
//!
//! The mean is computed on the manifold rather than by averaging matrices:
//! starting from the first element, the tangent-space displacements towards
//! every element are averaged and the estimate is moved along that average until
//! the step becomes negligible.

use crate::batch::{SE3BatchF32, SE3BatchF64};
use crate::error::SE3Error;
use crate::se3::{SE3F32, SE3F64};

/// Maximum number of iterations of [`SE3BatchF64::mean`] and [`SE3BatchF32::mean`].
pub const MAX_AVERAGE_ITERATIONS: usize = 10_000;

macro_rules! impl_batch_mean {
    ($name:ident, $se3:ident, $scalar:ty) => {
        impl $name {
            /// Compute the iterative mean of the batch.
            ///
            /// Runs at most [`MAX_AVERAGE_ITERATIONS`] iterations.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::NotConverged`] if the mean does not converge.
            pub fn mean(&self) -> Result<Self, SE3Error> {
                self.mean_with_max_iterations(MAX_AVERAGE_ITERATIONS)
            }

            /// Compute the iterative mean of the batch with a custom iteration cap.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::NotConverged`] if the step norm is still above
            /// the precision epsilon after `max_iterations` iterations.
            pub fn mean_with_max_iterations(&self, max_iterations: usize) -> Result<Self, SE3Error> {
                let weight = 1.0 / self.len() as $scalar;
                let mut estimate = self.elements[0];

                for iteration in 0..max_iterations {
                    let estimate_inv = estimate.inverse();

                    let mut average = [0.0; 6];
                    for element in self.elements.iter() {
                        let delta = (estimate_inv * *element).log();
                        for (acc, d) in average.iter_mut().zip(delta) {
                            *acc += weight * d;
                        }
                    }

                    estimate *= <$se3>::exp(&average);

                    let step = average.iter().map(|x| x * x).sum::<$scalar>().sqrt();
                    if step < <$se3>::EPSILON {
                        log::debug!(
                            "iterative mean of {} transformations converged after {} iterations",
                            self.len(),
                            iteration + 1
                        );
                        return Ok(Self::from(estimate));
                    }
                }

                log::warn!(
                    "iterative mean of {} transformations did not converge after {} iterations",
                    self.len(),
                    max_iterations
                );
                Err(SE3Error::NotConverged(max_iterations))
            }
        }
    };
}

impl_batch_mean!(SE3BatchF32, SE3F32, f32);
impl_batch_mean!(SE3BatchF64, SE3F64, f64);
