//! # SO(3): The Special Orthogonal Group in 3D
//!
//! SO(3) is the group of 3D rotations: 3×3 orthogonal matrices with determinant +1.
//! Rotations are stored as unit quaternions, which keeps them on the manifold under
//! repeated composition (the product is renormalised after every multiplication).
//!
//! The Lie algebra **so(3)** is isomorphic to R³ via the hat operator. A vector
//! `v ∈ R³` represents an axis-angle rotation: the direction is the rotation axis,
//! the magnitude is the angle in radians.
//!
//! Both precisions are generated from a single definition:
//!
//! | Type | Batch type | Scalar | Internal repr |
//! |------|------------|--------|---------------|
//! | [`SO3F32`] | [`SO3BatchF32`] | `f32` | `glam::Quat` |
//! | [`SO3F64`] | [`SO3BatchF64`] | `f64` | `glam::DQuat` |

use crate::error::SE3Error;
use rand::Rng;

macro_rules! define_so3_type {
    (
        $(#[$meta:meta])*
        $name:ident,
        $batch:ident,
        $scalar:ty,
        $quat:ty,
        $vec3:ty,
        $mat3:ty,
        $epsilon:expr
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            /// The unit quaternion holding the rotation.
            pub q: $quat,
        }

        impl $name {
            /// The identity rotation.
            pub const IDENTITY: Self = Self {
                q: <$quat>::IDENTITY,
            };

            /// Precision-scaled tolerance used for validation and small-angle branches.
            pub const EPSILON: $scalar = $epsilon;

            /// Create a new rotation from a quaternion.
            /// NOTE: quaternion should be normalized
            #[inline]
            pub fn new(q: $quat) -> Self {
                Self { q }
            }

            /// Create a rotation from an arbitrary 3x3 matrix.
            ///
            /// The matrix is projected onto the closest rotation matrix first, so the
            /// input does not need to be orthonormal.
            pub fn from_matrix(mat: &$mat3) -> Self {
                let cols = mat.to_cols_array().map(|x| x as f64);
                let fitted = crate::linalg::fit_to_so3(&glam::DMat3::from_cols_array(&cols));
                let rot = <$mat3>::from_cols_array(&fitted.to_cols_array().map(|x| x as $scalar));
                Self {
                    q: <$quat>::from_mat3(&rot).normalize(),
                }
            }

            /// Create a uniformly distributed random rotation (Shoemake method).
            pub fn from_random() -> Self {
                let mut rng = rand::rng();

                let r1: $scalar = rng.random();
                let r2: $scalar = rng.random();
                let r3: $scalar = rng.random();

                let two_pi = 2.0 * std::f64::consts::PI as $scalar;
                let one_minus_r1_sqrt = (1.0 - r1).sqrt();
                let r1_sqrt = r1.sqrt();

                let w = one_minus_r1_sqrt * (two_pi * r2).cos();
                let x = one_minus_r1_sqrt * (two_pi * r2).sin();
                let y = r1_sqrt * (two_pi * r3).cos();
                let z = r1_sqrt * (two_pi * r3).sin();

                Self {
                    q: <$quat>::from_xyzw(x, y, z, w).normalize(),
                }
            }

            /// The unit quaternion of the rotation.
            #[inline]
            pub fn unit_quaternion(&self) -> $quat {
                self.q
            }

            /// The rotation as an orthonormal 3x3 matrix.
            #[inline]
            pub fn matrix(&self) -> $mat3 {
                <$mat3>::from_quat(self.q)
            }

            /// The inverse rotation.
            #[inline]
            pub fn inverse(&self) -> Self {
                Self {
                    q: self.q.conjugate(),
                }
            }

            /// Lie algebra -> Lie group
            pub fn exp(omega: $vec3) -> Self {
                let theta_sq = omega.length_squared();
                let theta = theta_sq.sqrt();

                let (imag_factor, real_factor) = if theta < Self::EPSILON {
                    // taylor series of sin(x/2)/x and cos(x/2) around 0
                    let theta_po4 = theta_sq * theta_sq;
                    (
                        0.5 - theta_sq / 48.0 + theta_po4 / 3840.0,
                        1.0 - theta_sq / 8.0 + theta_po4 / 384.0,
                    )
                } else {
                    let half_theta = 0.5 * theta;
                    (half_theta.sin() / theta, half_theta.cos())
                };

                let xyz = omega * imag_factor;

                Self {
                    q: <$quat>::from_xyzw(xyz.x, xyz.y, xyz.z, real_factor),
                }
            }

            /// Lie group -> Lie algebra
            #[inline]
            pub fn log(&self) -> $vec3 {
                self.log_and_theta().0
            }

            /// Lie group -> Lie algebra, also returning the rotation angle.
            ///
            /// The angle is in `[0, π]`.
            pub fn log_and_theta(&self) -> ($vec3, $scalar) {
                let vec = <$vec3>::new(self.q.x, self.q.y, self.q.z);
                let w = self.q.w;
                let squared_n = vec.length_squared();

                let two_atan_nbyw_by_n = if squared_n < Self::EPSILON * Self::EPSILON {
                    // small-angle approximation of 2 * atan(n / w) / n
                    let squared_w = w * w;
                    2.0 / w - 2.0 / 3.0 * squared_n / (w * squared_w)
                } else {
                    let n = squared_n.sqrt();
                    // q and -q are the same rotation, keep the angle within [-π, π]
                    let atan_nbyw = if w < 0.0 { (-n).atan2(-w) } else { n.atan2(w) };
                    2.0 * atan_nbyw / n
                };

                let omega = vec * two_atan_nbyw_by_n;
                (omega, omega.length())
            }

            /// Vector space -> Lie algebra
            pub fn hat(v: $vec3) -> $mat3 {
                let (a, b, c) = (v.x, v.y, v.z);
                <$mat3>::from_cols_array(&[0.0, c, -b, -c, 0.0, a, b, -a, 0.0])
            }

            /// Lie algebra -> vector space
            pub fn vee(omega: $mat3) -> $vec3 {
                <$vec3>::new(omega.y_axis.z, omega.z_axis.x, omega.x_axis.y)
            }

            /// Left Jacobian of SO(3) evaluated at `omega`.
            ///
            /// This is the matrix `V` coupling rotation and translation in the SE(3)
            /// exponential: `t = V(ω) · υ`.
            pub fn left_jacobian(omega: $vec3) -> $mat3 {
                let skew = Self::hat(omega);
                let theta_sq = omega.length_squared();
                let theta = theta_sq.sqrt();
                let ident = <$mat3>::IDENTITY;

                let (a, b) = if theta < Self::EPSILON.sqrt() {
                    // taylor series of (1 - cos x)/x² and (x - sin x)/x³ around 0
                    let theta_po4 = theta_sq * theta_sq;
                    (
                        0.5 - theta_sq / 24.0 + theta_po4 / 720.0,
                        1.0 / 6.0 - theta_sq / 120.0 + theta_po4 / 5040.0,
                    )
                } else {
                    // 1 - cos x = 2 sin²(x/2)
                    let half_sin = (0.5 * theta).sin();
                    (
                        2.0 * half_sin * half_sin / theta_sq,
                        (theta - theta.sin()) / (theta_sq * theta),
                    )
                };

                ident + skew * a + (skew * skew) * b
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::IDENTITY
            }
        }

        impl std::ops::Mul<$name> for $name {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: Self) -> Self::Output {
                Self {
                    q: (self.q * rhs.q).normalize(),
                }
            }
        }

        impl std::ops::MulAssign<$name> for $name {
            #[inline]
            fn mul_assign(&mut self, rhs: $name) {
                *self = *self * rhs;
            }
        }

        impl std::ops::Mul<$vec3> for $name {
            type Output = $vec3;

            #[inline]
            fn mul(self, rhs: $vec3) -> Self::Output {
                self.q * rhs
            }
        }

        /// An ordered, non-empty sequence of rotations.
        #[derive(Debug, Clone, PartialEq)]
        pub struct $batch {
            pub(crate) elements: Vec<$name>,
        }

        impl $batch {
            /// A batch holding one identity rotation.
            pub fn identity() -> Self {
                Self {
                    elements: vec![<$name>::IDENTITY],
                }
            }

            /// Create a batch from a list of rotations.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::EmptyBatch`] if `elements` is empty.
            pub fn from_elements(elements: Vec<$name>) -> Result<Self, SE3Error> {
                if elements.is_empty() {
                    return Err(SE3Error::EmptyBatch);
                }
                Ok(Self { elements })
            }

            /// Number of rotations in the batch.
            #[inline]
            pub fn len(&self) -> usize {
                self.elements.len()
            }

            /// Always false, a batch holds at least one rotation.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.elements.is_empty()
            }

            /// Get a reference to the rotation at `index`.
            #[inline]
            pub fn get(&self, index: usize) -> Option<&$name> {
                self.elements.get(index)
            }

            /// Get a batch holding only the rotation at `index`.
            pub fn at(&self, index: usize) -> Result<Self, SE3Error> {
                let element = self.elements.get(index).ok_or(SE3Error::IndexOutOfRange {
                    index,
                    len: self.len(),
                })?;
                Ok(Self::from(*element))
            }

            /// Iterate over the rotations.
            pub fn iter(&self) -> std::slice::Iter<'_, $name> {
                self.elements.iter()
            }

            /// The rotations as a slice.
            #[inline]
            pub fn as_slice(&self) -> &[$name] {
                &self.elements
            }

            /// The rotations as 3x3 matrices.
            pub fn to_matrix(&self) -> Vec<$mat3> {
                self.elements.iter().map(|r| r.matrix()).collect()
            }

            /// The rotations as `[w, x, y, z]` rows.
            pub fn to_quaternion(&self) -> Vec<[$scalar; 4]> {
                self.elements
                    .iter()
                    .map(|r| [r.q.w, r.q.x, r.q.y, r.q.z])
                    .collect()
            }
        }

        impl Default for $batch {
            fn default() -> Self {
                Self::identity()
            }
        }

        impl From<$name> for $batch {
            fn from(rotation: $name) -> Self {
                Self {
                    elements: vec![rotation],
                }
            }
        }

        impl<'a> IntoIterator for &'a $batch {
            type Item = &'a $name;
            type IntoIter = std::slice::Iter<'a, $name>;

            fn into_iter(self) -> Self::IntoIter {
                self.elements.iter()
            }
        }
    };
}

define_so3_type!(
    /// A 3D rotation in single precision, stored as a unit quaternion.
    SO3F32,
    SO3BatchF32,
    f32,
    glam::Quat,
    glam::Vec3,
    glam::Mat3,
    1e-5
);

define_so3_type!(
    /// A 3D rotation in double precision, stored as a unit quaternion.
    SO3F64,
    SO3BatchF64,
    f64,
    glam::DQuat,
    glam::DVec3,
    glam::DMat3,
    1e-10
);
