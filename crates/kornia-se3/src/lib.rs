#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia SE(3) Batches
//!
//! A batch is an ordered, non-empty sequence of rigid body transformations.
//! Batches of size 1 broadcast against batches of any size, which makes it easy
//! to apply one transformation to many poses (or many transformations to one pose).
//!
//! Transformations can be built from and exported to:
//!
//! - 4×4 homogeneous matrices
//! - row-major 3×4 matrices
//! - a unit quaternion `(w, x, y, z)` plus a translation
//! - 6-vector tangent coordinates `[translational part, rotation vector]`
//!
//! On top of the group algebra the crate offers geodesic interpolation and an
//! iterative (Karcher) mean.
//!
//! ## Example
//!
//! ```rust
//! use kornia_se3::SE3BatchF64;
//!
//! let a = SE3BatchF64::exp([1.0, 0.0, 0.0], [0.0, 0.0, std::f64::consts::FRAC_PI_2]);
//! let b = SE3BatchF64::exp_batch(&[[0.0; 3]; 4], &[[0.1, 0.0, 0.0]; 4])?;
//!
//! // one to many
//! let c = a.compose(&b)?;
//! assert_eq!(c.len(), 4);
//!
//! let mid = SE3BatchF64::interpolate(&a, &c.at(0)?, 0.5)?;
//! let mean = c.mean()?;
//! # let _ = (mid, mean);
//! # Ok::<(), kornia_se3::SE3Error>(())
//! ```

pub mod average;
pub mod batch;
pub mod error;
pub mod interpolate;
pub mod linalg;
pub mod ops;
pub mod se3;
pub mod so3;

pub use average::MAX_AVERAGE_ITERATIONS;
pub use batch::{SE3BatchF32, SE3BatchF64};
pub use error::{ErrorKind, SE3Error};
pub use se3::{SE3F32, SE3F64};
pub use so3::{SO3BatchF32, SO3BatchF64, SO3F32, SO3F64};
