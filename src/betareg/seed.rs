//! Starting values for the Beta likelihood optimizer.
//!
//! Purpose
//! -------
//! Produce a cheap starting vector for `BetaModel::fit` when the caller
//! supplies none: a quasi-binomial logistic fit of the responses on the
//! mean design gives the mean block, and every precision coefficient
//! starts at `0.5`.
//!
//! Key behaviors
//! -------------
//! - [`QuasiBinomialFit`] abstracts "fit a logistic regression of `y` on
//!   `X`" so callers can swap in their own seed.
//! - [`IrlsLogit`] is the default: iteratively reweighted least squares
//!   with clamped means and a Cholesky solve that falls back to LU.
//! - [`seed_start_params`] never fails. Any seed error (singular system,
//!   non-finite coefficients, no convergence) degrades to `zeros(k)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Responses are treated as proportions in (0, 1). They are not 0/1
//!   outcomes, so the quasi-likelihood has an interior optimum whenever
//!   `X` has full column rank.
//! - Fitted means are clamped to `[IRLS_MU_EPS, 1 − IRLS_MU_EPS]` so the
//!   IRLS weights never vanish.
//!
//! Testing notes
//! -------------
//! - Unit tests recover known logistic coefficients from noiseless
//!   proportions, check the singular-design error, and check the zero
//!   fallback of [`seed_start_params`].
use crate::optimization::numerical_stability::safe_logistic;
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};

/// Clamp applied to fitted means inside the IRLS loop.
pub const IRLS_MU_EPS: f64 = 1e-10;

/// Default IRLS iteration cap.
pub const IRLS_MAX_ITER: usize = 100;

/// Default IRLS convergence tolerance on the largest coefficient change.
pub const IRLS_TOL: f64 = 1e-8;

/// Starting value for every precision coefficient.
pub const PRECISION_START: f64 = 0.5;

/// Errors reported by a quasi-binomial seed fit.
#[derive(Debug, Clone, PartialEq)]
pub enum SeedError {
    /// `y` and `X` are not row-aligned, or `X` has no columns.
    ShapeMismatch { rows: usize, len: usize, cols: usize },

    /// The weighted normal equations could not be solved.
    SingularSystem { iteration: usize },

    /// A coefficient became NaN/±inf.
    NonFiniteCoefficients { iteration: usize },

    /// The iteration cap was reached before the tolerance was met.
    NotConverged { max_iter: usize, max_change: f64 },
}

impl std::error::Error for SeedError {}

impl std::fmt::Display for SeedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeedError::ShapeMismatch { rows, len, cols } => write!(
                f,
                "Seed fit shape mismatch: design is {rows}x{cols}, response has length {len}"
            ),
            SeedError::SingularSystem { iteration } => {
                write!(f, "Seed fit normal equations are singular at iteration {iteration}")
            }
            SeedError::NonFiniteCoefficients { iteration } => {
                write!(f, "Seed fit produced non-finite coefficients at iteration {iteration}")
            }
            SeedError::NotConverged { max_iter, max_change } => write!(
                f,
                "Seed fit did not converge in {max_iter} iterations (last change {max_change})"
            ),
        }
    }
}

/// Capability: fit a logistic regression of proportions `y` on `x`.
pub trait QuasiBinomialFit {
    /// Return the `x.ncols()` logistic coefficients.
    fn fit(&self, y: &Array1<f64>, x: &Array2<f64>) -> Result<Array1<f64>, SeedError>;
}

/// IRLS logistic regression for quasi-binomial proportions.
///
/// Each iteration forms `η = Xβ`, `μ = logistic(η)` (clamped), weights
/// `w = μ(1 − μ)` and working response `η + (y − μ)/w`, then solves
/// `XᵀWX β = XᵀW z`. Iteration stops once the largest absolute change in
/// `β` drops below `tol`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrlsLogit {
    pub max_iter: usize,
    pub tol: f64,
}

impl Default for IrlsLogit {
    fn default() -> Self {
        Self { max_iter: IRLS_MAX_ITER, tol: IRLS_TOL }
    }
}

impl QuasiBinomialFit for IrlsLogit {
    fn fit(&self, y: &Array1<f64>, x: &Array2<f64>) -> Result<Array1<f64>, SeedError> {
        let (n, k) = x.dim();
        if n != y.len() || k == 0 {
            return Err(SeedError::ShapeMismatch { rows: n, len: y.len(), cols: k });
        }

        let mut beta = Array1::<f64>::zeros(k);
        let mut max_change = f64::INFINITY;
        for iteration in 0..self.max_iter {
            let eta = x.dot(&beta);
            let mut xtwx = DMatrix::<f64>::zeros(k, k);
            let mut xtwz = DVector::<f64>::zeros(k);

            for (i, row) in x.outer_iter().enumerate() {
                let mu = safe_logistic(eta[i]).clamp(IRLS_MU_EPS, 1.0 - IRLS_MU_EPS);
                let w = mu * (1.0 - mu);
                let working = eta[i] + (y[i] - mu) / w;
                for a in 0..k {
                    let wxa = w * row[a];
                    xtwz[a] += wxa * working;
                    for b in a..k {
                        xtwx[(a, b)] += wxa * row[b];
                    }
                }
            }
            for a in 0..k {
                for b in 0..a {
                    xtwx[(a, b)] = xtwx[(b, a)];
                }
            }

            let solved = solve_normal_equations(xtwx, &xtwz)
                .ok_or(SeedError::SingularSystem { iteration })?;
            if solved.iter().any(|v| !v.is_finite()) {
                return Err(SeedError::NonFiniteCoefficients { iteration });
            }

            max_change = solved
                .iter()
                .zip(beta.iter())
                .map(|(new, old)| (new - old).abs())
                .fold(0.0, f64::max);
            beta = Array1::from_iter(solved.iter().copied());
            if max_change < self.tol {
                return Ok(beta);
            }
        }

        Err(SeedError::NotConverged { max_iter: self.max_iter, max_change })
    }
}

/// Cholesky solve of a symmetric system, falling back to LU.
fn solve_normal_equations(lhs: DMatrix<f64>, rhs: &DVector<f64>) -> Option<DVector<f64>> {
    match lhs.clone().cholesky() {
        Some(chol) => Some(chol.solve(rhs)),
        None => lhs.lu().solve(rhs),
    }
}

/// Full starting vector `[β_seed; 0.5, …, 0.5]` of length `k + m`.
///
/// Parameters
/// ----------
/// - `y`, `x`: responses and mean design handed to `fitter`.
/// - `k_precision`: number of precision coefficients `m`.
/// - `fitter`: any [`QuasiBinomialFit`].
///
/// Returns
/// -------
/// `Array1<f64>`. When the seed fails, or returns a vector of the wrong
/// length, the mean block is `zeros(k)`.
pub fn seed_start_params<Q: QuasiBinomialFit + ?Sized>(
    y: &Array1<f64>, x: &Array2<f64>, k_precision: usize, fitter: &Q,
) -> Array1<f64> {
    let k = x.ncols();
    let mean_block = match fitter.fit(y, x) {
        Ok(beta) if beta.len() == k && beta.iter().all(|v| v.is_finite()) => beta,
        _ => Array1::zeros(k),
    };

    let mut start = Array1::from_elem(k + k_precision, PRECISION_START);
    start.slice_mut(ndarray::s![..k]).assign(&mean_block);
    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Coefficient recovery by `IrlsLogit` on noiseless proportions.
    // - Failure reporting for singular and misaligned designs.
    // - `seed_start_params` layout and its zero fallback.
    // -------------------------------------------------------------------------

    struct AlwaysFails;

    impl QuasiBinomialFit for AlwaysFails {
        fn fit(&self, _y: &Array1<f64>, _x: &Array2<f64>) -> Result<Array1<f64>, SeedError> {
            Err(SeedError::SingularSystem { iteration: 0 })
        }
    }

    #[test]
    // Purpose
    // -------
    // IRLS recovers the generating coefficients when `y` equals the
    // logistic curve exactly.
    //
    // Given
    // -----
    // - `y_i = logistic(−0.4 + 1.3 x_i)` on a grid of 25 points.
    //
    // Expect
    // ------
    // - Coefficients within 1e-6 of (−0.4, 1.3).
    fn irls_recovers_noiseless_logistic_coefficients() {
        // Arrange
        let n = 25;
        let x = Array2::from_shape_fn((n, 2), |(i, j)| {
            if j == 0 { 1.0 } else { -2.0 + 4.0 * i as f64 / (n - 1) as f64 }
        });
        let y = x.column(1).mapv(|xi| safe_logistic(-0.4 + 1.3 * xi));

        // Act
        let beta = IrlsLogit::default().fit(&y, &x).unwrap();

        // Assert
        assert!((beta[0] + 0.4).abs() < 1e-6, "{beta}");
        assert!((beta[1] - 1.3).abs() < 1e-6, "{beta}");
    }

    #[test]
    // Purpose
    // -------
    // A rank-deficient design and a misaligned design are reported, not
    // silently solved.
    //
    // Given
    // -----
    // - X with two identical columns; X with one row fewer than `y`.
    //
    // Expect
    // ------
    // - An error (singular or non-finite) for the first, `ShapeMismatch`
    //   for the second.
    fn irls_reports_singular_and_misaligned_designs() {
        // Arrange
        let y = array![0.2, 0.4, 0.6];
        let collinear = array![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]];
        let short = array![[1.0], [1.0]];

        // Act / Assert
        assert!(IrlsLogit::default().fit(&y, &collinear).is_err());
        assert_eq!(
            IrlsLogit::default().fit(&y, &short),
            Err(SeedError::ShapeMismatch { rows: 2, len: 3, cols: 1 })
        );
    }

    #[test]
    // Purpose
    // -------
    // The start vector carries the seed in front of `m` copies of 0.5, and
    // falls back to zeros when the seed fails.
    //
    // Given
    // -----
    // - An intercept-only design with constant `y = 0.25`, m = 2.
    // - A fitter that always fails.
    //
    // Expect
    // ------
    // - `[logit(0.25), 0.5, 0.5]` and `[0.0, 0.5, 0.5]`.
    fn seed_start_params_appends_precision_block_and_falls_back() {
        // Arrange
        let y = array![0.25, 0.25, 0.25, 0.25];
        let x = Array2::ones((4, 1));

        // Act
        let seeded = seed_start_params(&y, &x, 2, &IrlsLogit::default());
        let fallback = seed_start_params(&y, &x, 2, &AlwaysFails);

        // Assert
        assert_eq!(seeded.len(), 3);
        assert!((seeded[0] - (0.25f64 / 0.75).ln()).abs() < 1e-8);
        assert_eq!(seeded.slice(ndarray::s![1..]), array![0.5, 0.5]);
        assert_eq!(fallback, array![0.0, 0.5, 0.5]);
    }
}
