//! Error types for the SE(3) batch operations.

/// The category an [`SE3Error`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input representation.
    Validation,
    /// Incompatible batch lengths between operands.
    Broadcast,
    /// Indexing beyond the batch bounds.
    IndexOutOfRange,
    /// The iterative mean did not converge.
    Convergence,
}

/// An error type for the SE(3) batch operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SE3Error {
    /// The quaternion handed to a constructor is not unit norm.
    #[error("The norm of the quaternion at index {index} is not 1 (norm = {norm})")]
    NonUnitQuaternion {
        /// Position of the offending quaternion in the input.
        index: usize,
        /// Norm of the offending quaternion.
        norm: f64,
    },

    /// Parallel input arrays of a bulk constructor have different lengths.
    #[error("Size of the input variables are not the same: expected {expected}, got {got}")]
    MismatchedInputLengths {
        /// Length of the leading input.
        expected: usize,
        /// Length of the mismatching input.
        got: usize,
    },

    /// A batch must always hold at least one element.
    #[error("A batch requires at least one element")]
    EmptyBatch,

    /// Neither operand has size 1 so no broadcasting rule applies.
    #[error("Only allows transformations of size 1 to N (or N to 1), got {lhs} and {rhs}")]
    IncompatibleBatchSizes {
        /// Size of the left operand.
        lhs: usize,
        /// Size of the right operand.
        rhs: usize,
    },

    /// The operation requires a batch of exactly one element.
    #[error("An element of size 1 is required here. Input has {0} elements")]
    NotSingleElement(usize),

    /// There are no points to transform.
    #[error("At least one point is required")]
    EmptyPoints,

    /// Index is outside `[0, len)`.
    #[error("Index {index} out of range for a batch of size {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The size of the batch.
        len: usize,
    },

    /// The iterative mean hit its iteration cap.
    #[error("Iterative mean did not converge after {0} iterations")]
    NotConverged(usize),
}

impl SE3Error {
    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SE3Error::NonUnitQuaternion { .. }
            | SE3Error::MismatchedInputLengths { .. }
            | SE3Error::EmptyBatch => ErrorKind::Validation,
            SE3Error::IncompatibleBatchSizes { .. }
            | SE3Error::NotSingleElement(_)
            | SE3Error::EmptyPoints => ErrorKind::Broadcast,
            SE3Error::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            SE3Error::NotConverged(_) => ErrorKind::Convergence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let err = SE3Error::NonUnitQuaternion {
            index: 2,
            norm: 1.1,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(
            err.to_string(),
            "The norm of the quaternion at index 2 is not 1 (norm = 1.1)"
        );

        assert_eq!(SE3Error::EmptyBatch.kind(), ErrorKind::Validation);
        assert_eq!(
            SE3Error::IncompatibleBatchSizes { lhs: 3, rhs: 3 }.kind(),
            ErrorKind::Broadcast
        );
        assert_eq!(SE3Error::EmptyPoints.kind(), ErrorKind::Broadcast);
        assert_eq!(
            SE3Error::IndexOutOfRange { index: 4, len: 4 }.kind(),
            ErrorKind::IndexOutOfRange
        );
        assert_eq!(SE3Error::NotConverged(10).kind(), ErrorKind::Convergence);
    }
}
