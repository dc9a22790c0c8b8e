//! inference::hessian — covariance matrices from the observed information.
//!
//! Purpose
//! -------
//! Turn derivatives of the negative log-likelihood at the optimum into a
//! parameter covariance matrix. This module handles conversion between
//! `ndarray` and `nalgebra` types and supports the classical inverse of the
//! observed information, the robust (sandwich) estimator built from
//! per-observation scores, and validation of an optimizer-supplied inverse
//! Hessian.
//!
//! Key behaviors
//! -------------
//! - Call [`compute_hessian`] on the gradient of the negative
//!   log-likelihood to obtain the observed information matrix `J(θ̂)`.
//! - Copy the resulting `ndarray` matrix into a `nalgebra::DMatrix`
//!   (`fill_dmatrix`) for eigen-based linear algebra.
//! - Invert `J(θ̂)` through its symmetric eigendecomposition, refusing to
//!   do so when it is singular or indefinite ([`information_covariance`]).
//! - Form `J⁻¹ S J⁻¹` with `S = Σ_i s_i s_iᵀ` when per-observation scores
//!   are supplied ([`calc_covariance`]).
//! - Check shape, finiteness and diagonal positivity of a quasi-Newton
//!   inverse Hessian ([`validate_inverse_hessian`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - `J(θ̂)` is declared singular when its smallest eigenvalue is
//!   non-positive or at most `EIGEN_EPS · max(1, λ_max)`. No
//!   pseudoinverse is formed: a singular information matrix is an error,
//!   never a silently regularized covariance.
//! - Per-observation scores are on the **total** log-likelihood scale
//!   (rows sum to the score of `ℓ(θ)`), matching a Hessian of the total
//!   negative log-likelihood.
//!
//! Conventions
//! -----------
//! - Parameters `θ` are the raw regression coefficients; covariance rows
//!   and columns follow the order of `θ`.
//! - Returned covariance matrices are exactly symmetric.
//!
//! Downstream usage
//! ----------------
//! - `betareg::results` calls [`calc_covariance`] with the negative score of
//!   the fitted model, and [`validate_inverse_hessian`] when the BFGS
//!   approximation is requested.
//!
//! Testing notes
//! -------------
//! - Unit tests cover `ndarray` → `DMatrix` copying, the classical and
//!   robust estimators on quadratics with known information, singular
//!   rejection, and inverse-Hessian validation.
use crate::{
    inference::errors::{InferenceError, InferenceResult},
    optimization::{
        loglik_optimizer::{Grad, Hessian, Theta, finite_diff::{compute_hessian, symmetrize}},
        numerical_stability::EIGEN_EPS,
    },
};
use nalgebra::DMatrix;
use ndarray::Array2;

/// calc_covariance — covariance of `θ̂` from the observed information.
///
/// Parameters
/// ----------
/// - `f`: `&F`
///   Gradient map of the **negative** log-likelihood, `θ ↦ −∇ℓ(θ)`. Must
///   be C¹ near `theta_hat` so that [`compute_hessian`] succeeds.
/// - `theta_hat`: `&Theta`
///   Point at which `J(θ̂) = ∂f/∂θ` is evaluated.
/// - `scores`: `Option<&Array2<f64>>`
///   `n × p` per-observation scores at `θ̂`. `None` gives the classical
///   covariance `J⁻¹`; `Some(s)` gives the sandwich `J⁻¹ (sᵀs) J⁻¹`.
///
/// Returns
/// -------
/// `InferenceResult<Array2<f64>>`, a symmetric `p × p` matrix.
///
/// Errors
/// ------
/// - `InferenceError::Optimization` when the finite-difference Hessian
///   fails validation.
/// - `InferenceError::SingularInformation` when `J(θ̂)` is not safely
///   positive definite.
/// - `InferenceError::DimensionMismatch` when `scores` does not have `p`
///   columns.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_betareg::inference::hessian::calc_covariance;
/// // Negative log-likelihood gradient g(θ) = A θ with A = diag(4, 1).
/// let a = array![[4.0, 0.0], [0.0, 1.0]];
/// let f = |theta: &ndarray::Array1<f64>| a.dot(theta);
/// let cov = calc_covariance(&f, &array![1.0, -1.0], None).unwrap();
/// assert!((cov[[0, 0]] - 0.25).abs() < 1e-6);
/// assert!((cov[[1, 1]] - 1.0).abs() < 1e-6);
/// ```
pub fn calc_covariance<F: Fn(&Theta) -> Grad>(
    f: &F, theta_hat: &Theta, scores: Option<&Array2<f64>>,
) -> InferenceResult<Array2<f64>> {
    let p = theta_hat.len();
    let obs_info = compute_hessian(f, theta_hat)?;
    let j_inv = information_covariance(&obs_info)?;
    match scores {
        None => Ok(j_inv),
        Some(s) => {
            if s.ncols() != p {
                return Err(InferenceError::DimensionMismatch { expected: p, found: s.dim() });
            }
            let meat = s.t().dot(s);
            let mut sandwich = j_inv.dot(&meat).dot(&j_inv);
            symmetrize(&mut sandwich);
            Ok(sandwich)
        }
    }
}

/// Invert a symmetric information matrix through its eigendecomposition.
///
/// # Errors
/// - `DimensionMismatch` for a non-square input.
/// - `SingularInformation` when `λ_min ≤ 0` or
///   `λ_min ≤ EIGEN_EPS · max(1, λ_max)`, or when an eigenvalue is NaN.
pub fn information_covariance(info: &Array2<f64>) -> InferenceResult<Array2<f64>> {
    let p = info.nrows();
    if info.ncols() != p {
        return Err(InferenceError::DimensionMismatch { expected: p, found: info.dim() });
    }
    let mut info_nalg = DMatrix::<f64>::zeros(p, p);
    fill_dmatrix(info, &mut info_nalg);
    invert_symmetric(info_nalg)
}

/// Check an optimizer inverse Hessian before using it as a covariance.
///
/// # Errors
/// - `InverseHessianUnavailable` for `None`.
/// - `DimensionMismatch` when it is not `dim × dim`.
/// - `NonPositiveVariance` for the first diagonal entry that is not
///   strictly positive, or any non-finite entry on its row.
pub fn validate_inverse_hessian(inv_hessian: Option<&Hessian>, dim: usize) -> InferenceResult<Array2<f64>> {
    let inv = inv_hessian.ok_or(InferenceError::InverseHessianUnavailable)?;
    if inv.dim() != (dim, dim) {
        return Err(InferenceError::DimensionMismatch { expected: dim, found: inv.dim() });
    }
    for (index, row) in inv.outer_iter().enumerate() {
        let value = row[index];
        if !(value > 0.0) || row.iter().any(|v| !v.is_finite()) {
            return Err(InferenceError::NonPositiveVariance { index, value });
        }
    }
    let mut cov = inv.clone();
    symmetrize(&mut cov);
    Ok(cov)
}

// ---- Helper methods ----

fn fill_dmatrix(info: &Array2<f64>, info_nalg: &mut DMatrix<f64>) {
    let n = info.ncols();
    for j in 0..n {
        for i in j..n {
            if j == i {
                info_nalg[(i, i)] = info[[i, i]];
            } else {
                info_nalg[(i, j)] = info[[i, j]];
                info_nalg[(j, i)] = info[[j, i]];
            }
        }
    }
}

fn invert_symmetric(info_nalg: DMatrix<f64>) -> InferenceResult<Array2<f64>> {
    let p = info_nalg.nrows();
    let eigen_decomp = info_nalg.symmetric_eigen();
    let q = eigen_decomp.eigenvectors;
    let eigenvals = eigen_decomp.eigenvalues;

    let lambda_min = eigenvals.iter().copied().fold(f64::INFINITY, f64::min);
    let lambda_max = eigenvals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let has_nan = eigenvals.iter().any(|v| v.is_nan());
    if has_nan || !(lambda_min > 0.0) || lambda_min <= EIGEN_EPS * lambda_max.max(1.0) {
        return Err(InferenceError::SingularInformation { min_eigenvalue: lambda_min });
    }

    let mut cov = Array2::<f64>::zeros((p, p));
    for i in 0..p {
        for j in i..p {
            let v: f64 = eigenvals
                .iter()
                .enumerate()
                .map(|(k, &lambda)| q[(i, k)] * q[(j, k)] / lambda)
                .sum();
            cov[[i, j]] = v;
            cov[[j, i]] = v;
        }
    }
    Ok(cov)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Correct copying of matrices from `ndarray` into `DMatrix`.
    // - Classical covariance for quadratics with known information.
    // - Robust covariance when per-observation scores are larger than the
    //   information implies.
    // - Rejection of singular information and malformed inverse Hessians.
    //
    // They intentionally DO NOT cover:
    // - Beta regression scores (see `betareg::results`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `fill_dmatrix` copies entries without altering values.
    //
    // Given
    // -----
    // - A 2×2 symmetric `Array2<f64>` with distinct entries.
    //
    // Expect
    // ------
    // - The `DMatrix` has identical entries at all positions.
    fn fill_dmatrix_copies_ndarray_into_dmatrix_without_modification() {
        // Arrange
        let info: Array2<f64> = array![[2.0, 0.5], [0.5, 1.0]];
        let mut info_nalg = DMatrix::<f64>::zeros(2, 2);

        // Act
        fill_dmatrix(&info, &mut info_nalg);

        // Assert
        assert_eq!(info_nalg[(0, 0)], 2.0);
        assert_eq!(info_nalg[(0, 1)], 0.5);
        assert_eq!(info_nalg[(1, 0)], 0.5);
        assert_eq!(info_nalg[(1, 1)], 1.0);
    }

    #[test]
    // Purpose
    // -------
    // The classical covariance equals the analytic inverse of a
    // non-diagonal information matrix.
    //
    // Given
    // -----
    // - `g(θ) = A θ` with `A = [[2, 1], [1, 2]]`, whose inverse is
    //   `[[2, −1], [−1, 2]] / 3`.
    //
    // Expect
    // ------
    // - Entries within 1e-6 and an exactly symmetric result.
    fn calc_covariance_inverts_observed_information() {
        // Arrange
        let a = array![[2.0, 1.0], [1.0, 2.0]];
        let f = |theta: &Array1<f64>| a.dot(theta);

        // Act
        let cov = calc_covariance(&f, &array![0.3, -0.7], None).unwrap();

        // Assert
        assert!((cov[[0, 0]] - 2.0 / 3.0).abs() < 1e-6);
        assert!((cov[[0, 1]] + 1.0 / 3.0).abs() < 1e-6);
        assert!((cov[[1, 1]] - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(cov[[0, 1]], cov[[1, 0]]);
    }

    #[test]
    // Purpose
    // -------
    // The sandwich inflates variances when the scores carry more variation
    // than the information matrix.
    //
    // Given
    // -----
    // - Identity information and scores with `sᵀs = 2 I`.
    //
    // Expect
    // ------
    // - Classical diagonal 1, robust diagonal 2.
    fn calc_covariance_robust_inflates_variance_when_scores_are_larger() {
        // Arrange
        let f = |theta: &Array1<f64>| theta.clone();
        let theta_hat = array![0.0, 0.0];
        let scores = array![[1.0, 0.0], [0.0, 1.0], [1.0, 0.0], [0.0, 1.0]];

        // Act
        let classical = calc_covariance(&f, &theta_hat, None).unwrap();
        let robust = calc_covariance(&f, &theta_hat, Some(&scores)).unwrap();

        // Assert
        assert!((classical[[0, 0]] - 1.0).abs() < 1e-6);
        assert!((robust[[0, 0]] - 2.0).abs() < 1e-5);
        assert!((robust[[1, 1]] - 2.0).abs() < 1e-5);
        assert!(robust[[0, 1]].abs() < 1e-8);
    }

    #[test]
    // Purpose
    // -------
    // Singular and indefinite information matrices are rejected.
    //
    // Given
    // -----
    // - `[[1, 1], [1, 1]]` (rank one) and `diag(1, −1)`.
    //
    // Expect
    // ------
    // - `SingularInformation` in both cases.
    fn information_covariance_rejects_singular_and_indefinite_matrices() {
        // Act / Assert
        assert!(matches!(
            information_covariance(&array![[1.0, 1.0], [1.0, 1.0]]),
            Err(InferenceError::SingularInformation { .. })
        ));
        assert!(matches!(
            information_covariance(&array![[1.0, 0.0], [0.0, -1.0]]),
            Err(InferenceError::SingularInformation { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Inverse-Hessian validation reports missing, misshapen and
    // non-positive inputs.
    //
    // Given
    // -----
    // - `None`, a 2×2 matrix for dim 3, a matrix with a negative diagonal,
    //   and a valid one.
    //
    // Expect
    // ------
    // - `InverseHessianUnavailable`, `DimensionMismatch`,
    //   `NonPositiveVariance { index: 1 }`, then `Ok`.
    fn validate_inverse_hessian_checks_presence_shape_and_diagonal() {
        // Arrange
        let small = Array2::<f64>::eye(2);
        let negative = array![[1.0, 0.0], [0.0, -0.5]];
        let valid = array![[1.0, 0.2], [0.2, 0.5]];

        // Act / Assert
        assert_eq!(validate_inverse_hessian(None, 2), Err(InferenceError::InverseHessianUnavailable));
        assert!(matches!(
            validate_inverse_hessian(Some(&small), 3),
            Err(InferenceError::DimensionMismatch { expected: 3, .. })
        ));
        assert_eq!(
            validate_inverse_hessian(Some(&negative), 2),
            Err(InferenceError::NonPositiveVariance { index: 1, value: -0.5 })
        );
        assert_eq!(validate_inverse_hessian(Some(&valid), 2).unwrap(), valid);
    }
}
