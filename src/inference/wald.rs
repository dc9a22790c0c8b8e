//! inference::wald — standard errors, z-statistics and two-sided p-values.
//!
//! Given estimates `θ̂` and their covariance `V`, a [`WaldTable`] holds
//! `bse_i = sqrt(V_ii)`, `z_i = θ̂_i / bse_i` and
//! `p_i = 2 · (1 − Φ(|z_i|))`. The p-value is computed through the normal
//! survival function so tiny tail probabilities do not cancel to zero.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::{Array1, Array2};
use statrs::distribution::{ContinuousCDF, Normal};

/// Per-parameter Wald statistics, ordered like the parameter vector.
#[derive(Debug, Clone, PartialEq)]
pub struct WaldTable {
    pub bse: Array1<f64>,
    pub zvalues: Array1<f64>,
    pub pvalues: Array1<f64>,
}

impl WaldTable {
    /// Build the table from estimates and their covariance matrix.
    ///
    /// # Errors
    /// - `DimensionMismatch` when `cov` is not `p × p`.
    /// - `NonPositiveVariance` for the first diagonal entry that is not a
    ///   finite positive number.
    pub fn new(params: &Array1<f64>, cov: &Array2<f64>) -> InferenceResult<Self> {
        let p = params.len();
        if cov.dim() != (p, p) {
            return Err(InferenceError::DimensionMismatch { expected: p, found: cov.dim() });
        }

        let variances = cov.diag();
        if let Some((index, &value)) =
            variances.iter().enumerate().find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(InferenceError::NonPositiveVariance { index, value });
        }

        let std_normal = Normal::standard();
        let bse = variances.mapv(f64::sqrt);
        let zvalues = params / &bse;
        let pvalues = zvalues.mapv(|z| 2.0 * std_normal.sf(z.abs()));
        Ok(WaldTable { bse, zvalues, pvalues })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Standard errors, z and p for a diagonal covariance.
    // - Rejection of zero / negative / NaN variances and shape mismatches.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // The table matches hand-computed Wald statistics.
    //
    // Given
    // -----
    // - θ̂ = (1.96, −1, 0) with variances (1, 0.25, 4).
    //
    // Expect
    // ------
    // - bse = (1, 0.5, 2), z = (1.96, −2, 0), p ≈ (0.05, 0.0455, 1).
    fn wald_table_matches_hand_computed_values() {
        // Arrange
        let params = array![1.96, -1.0, 0.0];
        let cov = Array2::from_diag(&array![1.0, 0.25, 4.0]);

        // Act
        let table = WaldTable::new(&params, &cov).unwrap();

        // Assert
        assert_eq!(table.bse, array![1.0, 0.5, 2.0]);
        assert_eq!(table.zvalues, array![1.96, -2.0, 0.0]);
        assert!((table.pvalues[0] - 0.049_995_790).abs() < 1e-6);
        assert!((table.pvalues[1] - 0.045_500_264).abs() < 1e-6);
        assert!((table.pvalues[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Undefined standard errors are reported instead of fabricated.
    //
    // Given
    // -----
    // - Diagonals containing 0, a negative value and NaN; a 1×1 covariance
    //   for two parameters.
    //
    // Expect
    // ------
    // - `NonPositiveVariance` at the offending index, then
    //   `DimensionMismatch`.
    fn wald_table_rejects_invalid_variances() {
        // Arrange
        let params = array![0.1, 0.2];

        // Act / Assert
        assert!(matches!(
            WaldTable::new(&params, &Array2::from_diag(&array![1.0, 0.0])),
            Err(InferenceError::NonPositiveVariance { index: 1, .. })
        ));
        assert!(matches!(
            WaldTable::new(&params, &Array2::from_diag(&array![-1.0, 1.0])),
            Err(InferenceError::NonPositiveVariance { index: 0, .. })
        ));
        assert!(matches!(
            WaldTable::new(&params, &Array2::from_diag(&array![1.0, f64::NAN])),
            Err(InferenceError::NonPositiveVariance { index: 1, .. })
        ));
        assert!(matches!(
            WaldTable::new(&params, &Array2::eye(1)),
            Err(InferenceError::DimensionMismatch { expected: 2, .. })
        ));
    }
}
