//! # SE(3): The Special Euclidean Group in 3D
//!
//! SE(3) is the group of rigid body transformations: a rotation followed by a
//! translation. It is the semi-direct product SO(3) ⋉ R³ with 6 degrees of freedom.
//!
//! ## Tangent coordinates
//!
//! The tangent vector is laid out as `[υ₀, υ₁, υ₂, ω₀, ω₁, ω₂]`:
//!
//! - `ω` is the rotation vector (axis-angle, magnitude in radians).
//! - `υ` is the *translational part*. It is **not** the translation of the
//!   transform: the exponential map couples both through the left Jacobian of
//!   SO(3), `t = J(ω) · υ`.
//!
//! ## Matrix layouts
//!
//! - 4×4 homogeneous matrices use the glam matrix types (column-major storage,
//!   translation in the last column, bottom row `[0, 0, 0, 1]`).
//! - 3×4 matrices are row-major arrays `[[s; 4]; 3]`: the rotation block followed
//!   by the translation column.

use crate::error::SE3Error;
use crate::so3::{SO3F32, SO3F64};
use rand::Rng;

macro_rules! define_se3_type {
    (
        $(#[$meta:meta])*
        $name:ident,
        $so3:ident,
        $scalar:ty,
        $quat:ty,
        $vec3:ty,
        $mat3:ty,
        $mat4:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            /// The rotation component.
            pub rotation: $so3,
            /// The translation component.
            pub translation: $vec3,
        }

        impl $name {
            /// The identity transformation.
            pub const IDENTITY: Self = Self {
                rotation: <$so3>::IDENTITY,
                translation: <$vec3>::ZERO,
            };

            /// Precision-scaled tolerance used for validation and convergence checks.
            pub const EPSILON: $scalar = <$so3>::EPSILON;

            /// Create a transformation from a rotation and a translation.
            #[inline]
            pub fn new(rotation: $so3, translation: $vec3) -> Self {
                Self {
                    rotation,
                    translation,
                }
            }

            /// Create a transformation from a quaternion `(w, x, y, z)` and a translation.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::NonUnitQuaternion`] if the quaternion norm differs
            /// from 1 by more than [`Self::EPSILON`] or is NaN. The quaternion is never
            /// renormalised silently.
            pub fn from_quaternion_and_translation(
                w: $scalar,
                xyz: [$scalar; 3],
                translation: [$scalar; 3],
            ) -> Result<Self, SE3Error> {
                let q = <$quat>::from_xyzw(xyz[0], xyz[1], xyz[2], w);
                let norm = q.length();
                if norm.is_nan() || (norm - 1.0).abs() > Self::EPSILON {
                    return Err(SE3Error::NonUnitQuaternion {
                        index: 0,
                        norm: norm as f64,
                    });
                }
                Ok(Self {
                    rotation: <$so3>::new(q),
                    translation: <$vec3>::from_array(translation),
                })
            }

            /// Fit a 4x4 homogeneous matrix to the closest transformation.
            ///
            /// The rotation block is projected onto SO(3) and the translation is
            /// taken from the last column as is.
            pub fn from_matrix(mat: &$mat4) -> Self {
                Self {
                    rotation: <$so3>::from_matrix(&<$mat3>::from_mat4(*mat)),
                    translation: mat.w_axis.truncate(),
                }
            }

            /// Fit a row-major 3x4 matrix `[R | t]` to the closest transformation.
            pub fn from_matrix3x4(mat: &[[$scalar; 4]; 3]) -> Self {
                let rotation = <$mat3>::from_cols(
                    <$vec3>::new(mat[0][0], mat[1][0], mat[2][0]),
                    <$vec3>::new(mat[0][1], mat[1][1], mat[2][1]),
                    <$vec3>::new(mat[0][2], mat[1][2], mat[2][2]),
                );
                Self {
                    rotation: <$so3>::from_matrix(&rotation),
                    translation: <$vec3>::new(mat[0][3], mat[1][3], mat[2][3]),
                }
            }

            /// Create a uniformly distributed random rotation with a translation
            /// in `[-1, 1)³`.
            pub fn from_random() -> Self {
                let mut rng = rand::rng();
                let t = <$vec3>::new(
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                    rng.random_range(-1.0..1.0),
                );
                Self::new(<$so3>::from_random(), t)
            }

            /// Lie algebra -> Lie group
            ///
            /// `tangent` is `[translational part, rotation vector]`.
            pub fn exp(tangent: &[$scalar; 6]) -> Self {
                let upsilon = <$vec3>::new(tangent[0], tangent[1], tangent[2]);
                let omega = <$vec3>::new(tangent[3], tangent[4], tangent[5]);
                Self {
                    rotation: <$so3>::exp(omega),
                    translation: <$so3>::left_jacobian(omega) * upsilon,
                }
            }

            /// Lie group -> Lie algebra
            ///
            /// Inverse of [`Self::exp`] for rotation angles within `[0, π)`.
            pub fn log(&self) -> [$scalar; 6] {
                let (omega, theta) = self.rotation.log_and_theta();
                let omega_hat = <$so3>::hat(omega);
                let omega_hat_sq = omega_hat * omega_hat;
                let ident = <$mat3>::IDENTITY;

                let v_inv = if theta < Self::EPSILON.sqrt() {
                    // taylor series of (1 - x cot(x/2) / 2)/x² around 0
                    let theta_sq = theta * theta;
                    ident - omega_hat * 0.5
                        + omega_hat_sq
                            * (1.0 / 12.0 + theta_sq / 720.0 + theta_sq * theta_sq / 30240.0)
                } else {
                    let half_theta = 0.5 * theta;
                    ident - omega_hat * 0.5
                        + omega_hat_sq
                            * ((1.0 - theta * half_theta.cos() / (2.0 * half_theta.sin()))
                                / (theta * theta))
                };

                let upsilon = v_inv * self.translation;
                [upsilon.x, upsilon.y, upsilon.z, omega.x, omega.y, omega.z]
            }

            /// Inverse transformation: `(R⁻¹, -R⁻¹ t)`.
            pub fn inverse(&self) -> Self {
                let inv_rot = self.rotation.inverse();
                Self {
                    rotation: inv_rot,
                    translation: -(inv_rot * self.translation),
                }
            }

            /// The 3x3 rotation matrix.
            #[inline]
            pub fn rotation_matrix(&self) -> $mat3 {
                self.rotation.matrix()
            }

            /// Convert to a 4x4 homogeneous transformation matrix.
            pub fn matrix(&self) -> $mat4 {
                let r = self.rotation.matrix();
                <$mat4>::from_cols(
                    r.x_axis.extend(0.0),
                    r.y_axis.extend(0.0),
                    r.z_axis.extend(0.0),
                    self.translation.extend(1.0),
                )
            }

            /// Convert to a row-major 3x4 matrix `[R | t]`.
            pub fn matrix3x4(&self) -> [[$scalar; 4]; 3] {
                let r = self.rotation.matrix();
                std::array::from_fn(|i| [r.x_axis[i], r.y_axis[i], r.z_axis[i], self.translation[i]])
            }

            /// The transformation as `[w, x, y, z, tx, ty, tz]`.
            pub fn quaternion_and_translation(&self) -> [$scalar; 7] {
                let q = self.rotation.unit_quaternion();
                let t = self.translation;
                [q.w, q.x, q.y, q.z, t.x, t.y, t.z]
            }

            /// Apply the transformation to a point.
            #[inline]
            pub fn transform_point(&self, point: $vec3) -> $vec3 {
                self.rotation * point + self.translation
            }

            /// Geodesic interpolation towards `other`.
            ///
            /// Computes `self * exp(t * log(self⁻¹ * other))`. `t = 0` gives `self`,
            /// `t = 1` gives `other`, values outside `[0, 1]` extrapolate along the
            /// same screw motion.
            pub fn interpolate(&self, other: &Self, t: $scalar) -> Self {
                let delta = (self.inverse() * *other).log();
                *self * Self::exp(&delta.map(|x| x * t))
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
                    rotation: self.rotation * rhs.rotation,
                    translation: self.translation + self.rotation * rhs.translation,
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
                self.transform_point(rhs)
            }
        }
    };
}

define_se3_type!(
    /// A rigid body transformation in single precision.
    SE3F32,
    SO3F32,
    f32,
    glam::Quat,
    glam::Vec3,
    glam::Mat3,
    glam::Mat4
);

define_se3_type!(
    /// A rigid body transformation in double precision.
    SE3F64,
    SO3F64,
    f64,
    glam::DQuat,
    glam::DVec3,
    glam::DMat3,
    glam::DMat4
);
