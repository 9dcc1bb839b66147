//! Minimum-norm least squares.
//!
//! Every pursuit step solves
//!
//! ```text
//! minimize ||y - A_Γ α||₂
//! ```
//!
//! where `A_Γ` is the dictionary restricted to the columns of a support set.
//! The restriction can be wide (more atoms than measurements) or rank
//! deficient, so we solve through the SVD and zero out singular values below a
//! relative cutoff. That yields the minimum-norm solution instead of a failure.

use nalgebra::{DMatrix, DVector};

/// Relative cutoffs tried, in order, when the default cutoff yields a non-finite solution.
const FALLBACK_RCOND: [f64; 3] = [1e-10, 1e-8, 1e-6];

/// Solve `min ||x β - y||₂` returning the minimum-norm `β`.
///
/// Never fails: a degenerate system (no rows, zero matrix, non-finite SVD)
/// resolves to the all-zero coefficient vector, which is the minimum-norm
/// solution of the fully degenerate case.
pub fn solve_min_norm(x: &DMatrix<f64>, y: &DVector<f64>) -> DVector<f64> {
    let (rows, cols) = x.shape();
    if cols == 0 || rows == 0 {
        return DVector::zeros(cols);
    }

    let svd = x.clone().svd(true, true);
    let sigma_max = svd.singular_values.max();
    if !(sigma_max.is_finite() && sigma_max > 0.0) {
        return DVector::zeros(cols);
    }

    // Same default as LAPACK's gelsd: eps * max(rows, cols), relative to σ_max.
    let default_rcond = f64::EPSILON * rows.max(cols) as f64;
    let cutoffs = std::iter::once(default_rcond).chain(FALLBACK_RCOND);

    for rcond in cutoffs {
        if let Ok(beta) = svd.solve(y, rcond * sigma_max) {
            if beta.iter().all(|v| v.is_finite()) {
                return beta;
            }
        }
    }

    DVector::zeros(cols)
}
