//! Weighted least squares solver.
//!
//! Calibration repeatedly solves small regression problems of the form:
//!
//! ```text
//! minimize Σ w_i (z_i - x_i^T β)^2
//! ```
//!
//! one per IRLS step of the logistic fit. The parameter dimension is tiny
//! (one column per risk feature plus an intercept), so we favor robustness
//! over speed:
//!
//! - Rows are scaled by `sqrt(w_i)` and the problem is solved as ordinary
//!   least squares.
//! - SVD handles tall design matrices and near-collinear feature columns
//!   (e.g. `f_liq` vs `f_liq_total` when a caller fits both) without
//!   panicking the way a square-only QR solve would.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails; binary
    // features (f_aud) and saturated features can make columns of the design
    // matrix nearly dependent on the intercept.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Solve `minimize Σ w_i (y_i - x_i^T β)^2` by row scaling + OLS.
///
/// Weights must be non-negative; zero-weight rows drop out of the objective.
pub fn solve_weighted_least_squares(
    x: &DMatrix<f64>,
    y: &DVector<f64>,
    weights: &[f64],
) -> Option<DVector<f64>> {
    debug_assert_eq!(x.nrows(), weights.len());
    debug_assert_eq!(y.len(), weights.len());

    let mut xw = x.clone();
    let mut yw = y.clone();
    for (i, &w) in weights.iter().enumerate() {
        let s = w.max(0.0).sqrt();
        for j in 0..xw.ncols() {
            xw[(i, j)] *= s;
        }
        yw[i] *= s;
    }

    solve_least_squares(&xw, &yw)
}
