//! Residue evaluation for a support set.
//!
//! Given a dictionary `A`, an observation `y` and a support Γ, we fit `y` on
//! the columns `A_Γ` and return the residual `y - A_Γ α`. Its ℓ2 norm is the
//! score every decision in the search is based on.

use nalgebra::{DMatrix, DVector};

use crate::error::{PursuitError, Result};
use crate::math::{Support, solve_min_norm};

/// Check that the observation matches the dictionary row count.
pub fn validate_problem(dictionary: &DMatrix<f64>, observation: &DVector<f64>) -> Result<()> {
    if dictionary.nrows() != observation.len() {
        return Err(PursuitError::DimensionMismatch {
            rows: dictionary.nrows(),
            observation: observation.len(),
        });
    }
    Ok(())
}

/// Least-squares coefficients of `observation` on the columns in `support`.
///
/// Coefficients are ordered like `support.as_slice()`.
pub fn fit_coefficients(
    dictionary: &DMatrix<f64>,
    observation: &DVector<f64>,
    support: &Support,
) -> DVector<f64> {
    if support.is_empty() {
        return DVector::zeros(0);
    }
    let restricted = dictionary.select_columns(support.as_slice());
    solve_min_norm(&restricted, observation)
}

/// Residual of the least-squares fit restricted to `support`.
///
/// The empty support returns the observation unchanged.
pub fn residue(
    dictionary: &DMatrix<f64>,
    observation: &DVector<f64>,
    support: &Support,
) -> DVector<f64> {
    if support.is_empty() {
        return observation.clone();
    }
    let restricted = dictionary.select_columns(support.as_slice());
    let alpha = solve_min_norm(&restricted, observation);
    observation - restricted * alpha
}

/// `||residue(support)||₂`.
pub fn score(dictionary: &DMatrix<f64>, observation: &DVector<f64>, support: &Support) -> f64 {
    residue(dictionary, observation, support).norm()
}

/// Length-n estimate: least-squares coefficients on `support`, zero elsewhere.
pub fn sparse_estimate(
    dictionary: &DMatrix<f64>,
    observation: &DVector<f64>,
    support: &Support,
) -> DVector<f64> {
    let alpha = fit_coefficients(dictionary, observation, support);
    let mut estimate = DVector::zeros(dictionary.ncols());
    for (coef, idx) in alpha.iter().zip(support.iter()) {
        estimate[idx] = *coef;
    }
    estimate
}

/// ℓ1 norm of the restricted least-squares coefficients.
pub fn coefficient_l1_norm(
    dictionary: &DMatrix<f64>,
    observation: &DVector<f64>,
    support: &Support,
) -> f64 {
    fit_coefficients(dictionary, observation, support).lp_norm(1)
}

/// Correlation magnitudes `|Aᵀ r|`, one per atom.
pub fn correlations(dictionary: &DMatrix<f64>, residual: &DVector<f64>) -> DVector<f64> {
    dictionary.tr_mul(residual).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_problem() -> (DMatrix<f64>, DVector<f64>) {
        let s = 0.5_f64.sqrt();
        let a = DMatrix::from_row_slice(3, 4, &[
            1.0, 0.0, 0.0, s,
            0.0, 1.0, 0.0, s,
            0.0, 0.0, 1.0, 0.0,
        ]);
        let y = DVector::from_row_slice(&[1.0, -2.0, 0.5]);
        (a, y)
    }

    #[test]
    fn empty_support_returns_observation_exactly() {
        let (a, y) = small_problem();
        assert_eq!(residue(&a, &y, &Support::empty()), y);
        assert_eq!(score(&a, &y, &Support::empty()), y.norm());
    }

    #[test]
    fn residue_is_order_independent() {
        let (a, y) = small_problem();
        let r1 = residue(&a, &y, &Support::from([3, 1, 2]));
        let r2 = residue(&a, &y, &Support::from([1, 2, 3]));
        assert_eq!(r1, r2);
    }

    #[test]
    fn residue_is_orthogonal_to_selected_atoms() {
        let (a, y) = small_problem();
        let support = Support::from([0, 2]);
        let r = residue(&a, &y, &support);
        for idx in support.iter() {
            assert!(a.column(idx).dot(&r).abs() < 1e-12);
        }
        assert!((r[1] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn overcomplete_support_uses_min_norm_fit() {
        let (a, y) = small_problem();
        let support = Support::from([0, 1, 2, 3]);
        let r = residue(&a, &y, &support);
        assert!(r.norm() < 1e-10, "residual {r}");
        let coeffs = fit_coefficients(&a, &y, &support);
        assert!(coeffs.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn sparse_estimate_places_coefficients_on_support() {
        let (a, y) = small_problem();
        let x_hat = sparse_estimate(&a, &y, &Support::from([2, 0]));
        assert_eq!(x_hat.len(), 4);
        assert!((x_hat[0] - 1.0).abs() < 1e-12);
        assert!((x_hat[2] - 0.5).abs() < 1e-12);
        assert_eq!(x_hat[1], 0.0);
        assert_eq!(x_hat[3], 0.0);
        assert!((coefficient_l1_norm(&a, &y, &Support::from([0, 2])) - 1.5).abs() < 1e-12);
    }

    #[test]
    fn validate_problem_rejects_length_mismatch() {
        let (a, _) = small_problem();
        let y = DVector::from_row_slice(&[1.0, 2.0]);
        assert_eq!(
            validate_problem(&a, &y),
            Err(PursuitError::DimensionMismatch { rows: 3, observation: 2 })
        );
    }
}
