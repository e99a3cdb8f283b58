//! Small dense linear solves.
//!
//! The trainer repeatedly solves Newton systems `H Δ = g` where `H` is the
//! (regularized) Hessian of the logistic loss. `H` is symmetric positive
//! definite in exact arithmetic, so Cholesky is tried first. When rounding
//! pushes it to the edge of definiteness we fall back to an SVD solve with
//! progressively looser tolerances.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    for &tol in &[1e-12, 1e-10, 1e-8] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Solve `a x = b` for symmetric positive (semi-)definite `a`.
pub fn solve_spd(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    if let Some(chol) = a.clone().cholesky() {
        let x = chol.solve(b);
        if x.iter().all(|v| v.is_finite()) {
            return Some(x);
        }
    }
    solve_least_squares(a, b)
}
