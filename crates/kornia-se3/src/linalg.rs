//! Projection of arbitrary 3x3 matrices onto SO(3).

// The fit runs in f64 regardless of the caller's precision, then gets cast back.
use glam::{DMat3, DVec3};

/// Convert a faer 3x3 matrix view into a glam matrix.
fn faer_to_dmat3(m: faer::MatRef<'_, f64>) -> DMat3 {
    // glam is column-major: element k lives at row k % 3, column k / 3
    DMat3::from_cols_array(&std::array::from_fn(|k| m.read(k % 3, k / 3)))
}

/// Find the rotation matrix closest to `mat` in the Frobenius norm.
///
/// Given the decomposition `M = U Σ Vᵀ`, the closest rotation is
/// `R = U · diag(1, 1, d) · Vᵀ` with `d = sign(det(U Vᵀ))`, which keeps
/// `det(R) = +1` even when the input contains a reflection.
///
/// # Arguments
///
/// * `mat` - The matrix to fit, not necessarily orthonormal.
///
/// # Returns
///
/// An orthonormal matrix with determinant +1.
pub fn fit_to_so3(mat: &DMat3) -> DMat3 {
    let a = faer::Mat::<f64>::from_fn(3, 3, |i, j| mat.col(j)[i]);

    let svd = a.svd();
    let u = faer_to_dmat3(svd.u());
    let v = faer_to_dmat3(svd.v());

    let d = (u * v.transpose()).determinant();

    if d < 0.0 {
        // Handle Reflection: R = U * diag(1, 1, -1) * V^T
        let correction = DMat3::from_diagonal(DVec3::new(1.0, 1.0, -1.0));
        u * correction * v.transpose()
    } else {
        u * v.transpose()
    }
}
