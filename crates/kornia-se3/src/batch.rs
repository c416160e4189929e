//! Batches of rigid body transformations and their conversions.
//!
//! A batch is an ordered, non-empty sequence of transformations. A batch of
//! size 1 acts as a single transformation that broadcasts against batches of
//! any size (see the composition rules in [`crate::ops`]).
//!
//! | Representation | Input | Output |
//! |----------------|-------|--------|
//! | 4×4 homogeneous matrix | [`SE3BatchF64::from_matrix`], [`SE3BatchF64::from_matrices`] | [`SE3BatchF64::to_matrix`] |
//! | 3×4 row-major matrix | [`SE3BatchF64::from_matrix3x4`], [`SE3BatchF64::from_matrices3x4`] | [`SE3BatchF64::to_matrix3x4`] |
//! | quaternion + translation | [`SE3BatchF64::from_quaternion_and_translation`], [`SE3BatchF64::from_quaternions_and_translations`] | [`SE3BatchF64::to_quaternion_and_translation`] |
//! | tangent vector | [`SE3BatchF64::exp`], [`SE3BatchF64::exp_batch`] | [`SE3BatchF64::log`] |

use crate::error::SE3Error;
use crate::se3::{SE3F32, SE3F64};
use crate::so3::{SO3BatchF32, SO3BatchF64};

macro_rules! define_se3_batch_type {
    (
        $(#[$meta:meta])*
        $name:ident,
        $se3:ident,
        $so3_batch:ident,
        $scalar:ty,
        $mat4:ty
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            pub(crate) elements: Vec<$se3>,
        }

        impl $name {
            /// A batch holding one identity transformation.
            pub fn identity() -> Self {
                Self {
                    elements: vec![<$se3>::IDENTITY],
                }
            }

            /// Create a batch from a list of transformations.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::EmptyBatch`] if `elements` is empty.
            pub fn from_elements(elements: Vec<$se3>) -> Result<Self, SE3Error> {
                if elements.is_empty() {
                    return Err(SE3Error::EmptyBatch);
                }
                Ok(Self { elements })
            }

            /// Create a batch of one transformation fitted from a 4x4 matrix.
            pub fn from_matrix(matrix: &$mat4) -> Self {
                Self::from(<$se3>::from_matrix(matrix))
            }

            /// Create a batch by fitting every 4x4 matrix, keeping the input order.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::EmptyBatch`] if `matrices` is empty.
            pub fn from_matrices(matrices: &[$mat4]) -> Result<Self, SE3Error> {
                Self::from_elements(matrices.iter().map(<$se3>::from_matrix).collect())
            }

            /// Create a batch of one transformation fitted from a row-major 3x4 matrix.
            pub fn from_matrix3x4(matrix: &[[$scalar; 4]; 3]) -> Self {
                Self::from(<$se3>::from_matrix3x4(matrix))
            }

            /// Create a batch by fitting every row-major 3x4 matrix.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::EmptyBatch`] if `matrices` is empty.
            pub fn from_matrices3x4(matrices: &[[[$scalar; 4]; 3]]) -> Result<Self, SE3Error> {
                Self::from_elements(matrices.iter().map(<$se3>::from_matrix3x4).collect())
            }

            /// Create a batch of one transformation from its tangent coordinates.
            ///
            /// NOTE: `translational_part` is not the translation of the result.
            pub fn exp(translational_part: [$scalar; 3], rotation_vector: [$scalar; 3]) -> Self {
                let [u0, u1, u2] = translational_part;
                let [w0, w1, w2] = rotation_vector;
                Self::from(<$se3>::exp(&[u0, u1, u2, w0, w1, w2]))
            }

            /// Create a batch from `N` translational parts and `N` rotation vectors.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::MismatchedInputLengths`] if the inputs differ in
            /// length, or [`SE3Error::EmptyBatch`] if they are empty.
            pub fn exp_batch(
                translational_parts: &[[$scalar; 3]],
                rotation_vectors: &[[$scalar; 3]],
            ) -> Result<Self, SE3Error> {
                if translational_parts.len() != rotation_vectors.len() {
                    return Err(SE3Error::MismatchedInputLengths {
                        expected: rotation_vectors.len(),
                        got: translational_parts.len(),
                    });
                }
                let elements = translational_parts
                    .iter()
                    .zip(rotation_vectors.iter())
                    .map(|(&[u0, u1, u2], &[w0, w1, w2])| <$se3>::exp(&[u0, u1, u2, w0, w1, w2]))
                    .collect();
                Self::from_elements(elements)
            }

            /// Create a batch of one transformation from a quaternion `(w, xyz)` and
            /// a translation.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::NonUnitQuaternion`] if the quaternion is not unit norm.
            pub fn from_quaternion_and_translation(
                w: $scalar,
                xyz: [$scalar; 3],
                translation: [$scalar; 3],
            ) -> Result<Self, SE3Error> {
                Ok(Self::from(<$se3>::from_quaternion_and_translation(
                    w,
                    xyz,
                    translation,
                )?))
            }

            /// Create a batch from parallel arrays of quaternion scalar parts,
            /// quaternion vector parts and translations.
            ///
            /// # Errors
            ///
            /// - [`SE3Error::MismatchedInputLengths`] if the arrays differ in length.
            /// - [`SE3Error::NonUnitQuaternion`] with the offending index if any
            ///   quaternion is not unit norm.
            /// - [`SE3Error::EmptyBatch`] if the arrays are empty.
            pub fn from_quaternions_and_translations(
                w: &[$scalar],
                xyz: &[[$scalar; 3]],
                translations: &[[$scalar; 3]],
            ) -> Result<Self, SE3Error> {
                for len in [xyz.len(), translations.len()] {
                    if len != w.len() {
                        return Err(SE3Error::MismatchedInputLengths {
                            expected: w.len(),
                            got: len,
                        });
                    }
                }

                let elements = w
                    .iter()
                    .zip(xyz.iter())
                    .zip(translations.iter())
                    .enumerate()
                    .map(|(index, ((&w, &xyz), &translation))| {
                        <$se3>::from_quaternion_and_translation(w, xyz, translation).map_err(
                            |err| match err {
                                SE3Error::NonUnitQuaternion { norm, .. } => {
                                    SE3Error::NonUnitQuaternion { index, norm }
                                }
                                other => other,
                            },
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Self::from_elements(elements)
            }

            /// Convert every transformation to a 4x4 homogeneous matrix.
            pub fn to_matrix(&self) -> Vec<$mat4> {
                self.elements.iter().map(|x| x.matrix()).collect()
            }

            /// Convert every transformation to a row-major 3x4 matrix.
            pub fn to_matrix3x4(&self) -> Vec<[[$scalar; 4]; 3]> {
                self.elements.iter().map(|x| x.matrix3x4()).collect()
            }

            /// Return one `[w, x, y, z, tx, ty, tz]` row per transformation.
            pub fn to_quaternion_and_translation(&self) -> Vec<[$scalar; 7]> {
                self.elements
                    .iter()
                    .map(|x| x.quaternion_and_translation())
                    .collect()
            }

            /// Return one `[translational part, rotation vector]` row per transformation.
            pub fn log(&self) -> Vec<[$scalar; 6]> {
                self.elements.iter().map(|x| x.log()).collect()
            }

            /// The rotation component of every transformation.
            pub fn rotation(&self) -> $so3_batch {
                $so3_batch {
                    elements: self.elements.iter().map(|x| x.rotation).collect(),
                }
            }

            /// The translation component of every transformation.
            pub fn translation(&self) -> Vec<[$scalar; 3]> {
                self.elements
                    .iter()
                    .map(|x| x.translation.to_array())
                    .collect()
            }

            /// Number of transformations in the batch.
            #[inline]
            pub fn len(&self) -> usize {
                self.elements.len()
            }

            /// Always false, a batch holds at least one transformation.
            #[inline]
            pub fn is_empty(&self) -> bool {
                self.elements.is_empty()
            }

            /// Get a reference to the transformation at `index`.
            #[inline]
            pub fn get(&self, index: usize) -> Option<&$se3> {
                self.elements.get(index)
            }

            /// Get a batch holding only the transformation at `index`.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::IndexOutOfRange`] if `index >= len`.
            pub fn at(&self, index: usize) -> Result<Self, SE3Error> {
                let element = self.elements.get(index).ok_or(SE3Error::IndexOutOfRange {
                    index,
                    len: self.len(),
                })?;
                Ok(Self::from(*element))
            }

            /// Iterate over the transformations.
            pub fn iter(&self) -> std::slice::Iter<'_, $se3> {
                self.elements.iter()
            }

            /// The transformations as a slice.
            #[inline]
            pub fn as_slice(&self) -> &[$se3] {
                &self.elements
            }

            /// Unwrap a batch of size 1 into its transformation.
            ///
            /// # Errors
            ///
            /// Returns [`SE3Error::NotSingleElement`] if the batch size is not 1.
            pub fn single(&self) -> Result<$se3, SE3Error> {
                match self.elements.as_slice() {
                    [element] => Ok(*element),
                    elements => Err(SE3Error::NotSingleElement(elements.len())),
                }
            }

            /// A tabular dump of `[w, x, y, z, tx, ty, tz]` per transformation.
            pub fn describe(&self) -> String {
                let rows = self
                    .elements
                    .iter()
                    .map(|x| {
                        let [qw, qx, qy, qz, tx, ty, tz] = x.quaternion_and_translation();
                        format!("[{qw}, {qx}, {qy}, {qz}, {tx}, {ty}, {tz}]")
                    })
                    .collect::<Vec<_>>();
                format!(
                    "SE3 (quaternion(w,x,y,z), translation (x,y,z)) (x{})\n[{}]",
                    self.len(),
                    rows.join(",\n")
                )
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::identity()
            }
        }

        impl From<$se3> for $name {
            fn from(transform: $se3) -> Self {
                Self {
                    elements: vec![transform],
                }
            }
        }

        impl TryFrom<&$name> for $se3 {
            type Error = SE3Error;

            fn try_from(batch: &$name) -> Result<Self, Self::Error> {
                batch.single()
            }
        }

        impl TryFrom<Vec<$se3>> for $name {
            type Error = SE3Error;

            fn try_from(elements: Vec<$se3>) -> Result<Self, Self::Error> {
                Self::from_elements(elements)
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $se3;
            type IntoIter = std::slice::Iter<'a, $se3>;

            fn into_iter(self) -> Self::IntoIter {
                self.elements.iter()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "SE3 (x{})", self.len())
            }
        }
    };
}

define_se3_batch_type!(
    /// An ordered, non-empty batch of single precision transformations.
    SE3BatchF32,
    SE3F32,
    SO3BatchF32,
    f32,
    glam::Mat4
);

define_se3_batch_type!(
    /// An ordered, non-empty batch of double precision transformations.
    SE3BatchF64,
    SE3F64,
    SO3BatchF64,
    f64,
    glam::DMat4
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;
    use glam::{DMat4, DQuat, DVec3};

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_identity() {
        let batch = SE3BatchF64::default();
        assert_eq!(batch.len(), 1);
        assert!(!batch.is_empty());
        assert_eq!(batch.to_matrix(), vec![DMat4::IDENTITY]);
        assert_eq!(
            batch.to_quaternion_and_translation(),
            vec![[1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]]
        );
        assert_eq!(batch, SE3BatchF64::identity());
    }

    #[test]
    fn test_from_elements_empty() {
        assert_eq!(SE3BatchF64::from_elements(vec![]), Err(SE3Error::EmptyBatch));
        assert_eq!(SE3BatchF64::from_matrices(&[]), Err(SE3Error::EmptyBatch));
        assert_eq!(
            SE3BatchF64::try_from(Vec::<SE3F64>::new()),
            Err(SE3Error::EmptyBatch)
        );
    }

    #[test]
    fn test_from_matrices_preserves_order() -> Result<(), SE3Error> {
        let matrices = (0..4)
            .map(|i| {
                DMat4::from_rotation_translation(
                    DQuat::from_rotation_y(0.1 * i as f64),
                    DVec3::new(i as f64, 0.0, 0.0),
                )
            })
            .collect::<Vec<_>>();
        let batch = SE3BatchF64::from_matrices(&matrices)?;
        assert_eq!(batch.len(), 4);
        for (out, expected) in batch.to_matrix().iter().zip(matrices.iter()) {
            assert!(out.abs_diff_eq(*expected, EPSILON));
        }
        assert_eq!(
            batch.translation(),
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [2.0, 0.0, 0.0],
                [3.0, 0.0, 0.0]
            ]
        );
        Ok(())
    }

    #[test]
    fn test_from_matrices3x4() -> Result<(), SE3Error> {
        let rows = [
            [0.0, -1.0, 0.0, 1.0],
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 0.0, 1.0, 3.0],
        ];
        let batch = SE3BatchF64::from_matrices3x4(&[rows, rows])?;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.translation()[1], [1.0, 2.0, 3.0]);
        let single = SE3BatchF64::from_matrix3x4(&rows);
        for (row, expected) in single.to_matrix3x4()[0].iter().zip(rows.iter()) {
            for (a, b) in row.iter().zip(expected.iter()) {
                assert_relative_eq!(a, b, epsilon = EPSILON);
            }
        }
        Ok(())
    }

    #[test]
    fn test_exp_batch() -> Result<(), SE3Error> {
        let upsilon = [[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [0.0, 0.0, 3.0]];
        let omega = [[0.1, 0.0, 0.0], [0.0, 0.2, 0.0], [0.0, 0.0, 0.3]];
        let batch = SE3BatchF64::exp_batch(&upsilon, &omega)?;
        assert_eq!(batch.len(), 3);

        for (i, row) in batch.log().iter().enumerate() {
            let expected = SE3BatchF64::exp(upsilon[i], omega[i]).log()[0];
            for (a, b) in row.iter().zip(expected.iter()) {
                assert_relative_eq!(a, b, epsilon = EPSILON);
            }
        }

        assert_eq!(
            SE3BatchF64::exp_batch(&upsilon[..2], &omega),
            Err(SE3Error::MismatchedInputLengths {
                expected: 3,
                got: 2
            })
        );
        Ok(())
    }

    #[test]
    fn test_from_quaternions_and_translations() -> Result<(), SE3Error> {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let batch = SE3BatchF64::from_quaternions_and_translations(
            &[1.0, h],
            &[[0.0, 0.0, 0.0], [h, 0.0, 0.0]],
            &[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]],
        )?;
        assert_eq!(
            batch.to_quaternion_and_translation(),
            vec![
                [1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 3.0],
                [h, h, 0.0, 0.0, 4.0, 5.0, 6.0]
            ]
        );
        assert_eq!(
            batch.rotation().to_quaternion(),
            vec![[1.0, 0.0, 0.0, 0.0], [h, h, 0.0, 0.0]]
        );
        Ok(())
    }

    #[test]
    fn test_from_quaternions_reports_index() {
        let res = SE3BatchF64::from_quaternions_and_translations(
            &[1.0, 1.0, 0.5],
            &[[0.0; 3], [0.0; 3], [0.0; 3]],
            &[[0.0; 3], [0.0; 3], [0.0; 3]],
        );
        match res {
            Err(err @ SE3Error::NonUnitQuaternion { index: 2, .. }) => {
                assert_eq!(err.kind(), ErrorKind::Validation);
            }
            other => panic!("unexpected result {other:?}"),
        }

        let res = SE3BatchF64::from_quaternions_and_translations(
            &[1.0, 1.0],
            &[[0.0; 3], [0.0; 3]],
            &[[0.0; 3]],
        );
        assert_eq!(
            res,
            Err(SE3Error::MismatchedInputLengths {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn test_at_and_single() -> Result<(), SE3Error> {
        let elements = vec![SE3F64::from_random(), SE3F64::from_random()];
        let batch = SE3BatchF64::from_elements(elements.clone())?;

        assert_eq!(batch.at(1)?.single()?, elements[1]);
        assert_eq!(batch.get(0), Some(&elements[0]));
        assert_eq!(batch.iter().count(), 2);
        assert_eq!((&batch).into_iter().count(), 2);

        let err = batch.at(2).unwrap_err();
        assert_eq!(err, SE3Error::IndexOutOfRange { index: 2, len: 2 });
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);

        assert_eq!(batch.single(), Err(SE3Error::NotSingleElement(2)));
        assert_eq!(SE3F64::try_from(&batch.at(0)?)?, elements[0]);
        Ok(())
    }

    #[test]
    fn test_display() -> Result<(), SE3Error> {
        let batch = SE3BatchF64::from_elements(vec![SE3F64::IDENTITY; 2])?;
        assert_eq!(batch.to_string(), "SE3 (x2)");
        assert_eq!(
            batch.describe(),
            "SE3 (quaternion(w,x,y,z), translation (x,y,z)) (x2)\n\
             [[1, 0, 0, 0, 0, 0, 0],\n[1, 0, 0, 0, 0, 0, 0]]"
        );
        Ok(())
    }

    #[test]
    fn test_copy_is_independent() {
        let batch = SE3BatchF64::identity();
        let mut copy = batch.clone();
        copy.elements[0] = SE3F64::from_random();
        assert_eq!(batch, SE3BatchF64::identity());
    }

    #[test]
    fn test_f32_batch() -> Result<(), SE3Error> {
        let batch = SE3BatchF32::exp_batch(&[[1.0, 0.0, 0.0]; 3], &[[0.0, 0.0, 0.5]; 3])?;
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.rotation().len(), 3);
        assert!(SE3BatchF32::from_quaternion_and_translation(0.9, [0.0; 3], [0.0; 3]).is_err());
        Ok(())
    }
}
