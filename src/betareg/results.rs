//! Fitted Beta regression results and their inferential statistics.
//!
//! Purpose
//! -------
//! Package the optimizer outcome for a Beta regression together with the
//! parameter covariance and the derived standard errors, z-values and
//! p-values.
//!
//! Key behaviors
//! -------------
//! - [`BetaResults::from_outcome`] copies the optimizer diagnostics,
//!   computes information criteria, and runs inference with the requested
//!   [`CovarianceType`].
//! - Inference never fails the fit: when the covariance cannot be formed
//!   (singular information, missing inverse Hessian, non-positive
//!   variances) `cov_params`, `bse`, `zvalues` and `pvalues` return `None`
//!   and [`BetaResults::inference_error`] explains why.
//!
//! Invariants & assumptions
//! ------------------------
//! - `params` has length `k_mean + k_precision`; index `i < k_mean` is the
//!   `i`-th column of `X`, the rest follow the columns of `Z`.
//! - `llf` is the maximized total log-likelihood (finite by construction of
//!   `OptimOutcome`).
//!
//! Conventions
//! -----------
//! - `aic = −2 llf + 2 p`, `bic = −2 llf + p ln n`, with `p = k + m`.
//! - `df_model = p − 1`, `df_resid = n − p`.
use crate::{
    betareg::{model::BetaModel, options::CovarianceType},
    inference::{
        InferenceError, InferenceResult, WaldTable, calc_covariance, validate_inverse_hessian,
    },
    optimization::loglik_optimizer::{FnEvalMap, OptimOutcome, Theta},
};
use ndarray::{Array1, Array2, ArrayView1, s};

/// Covariance-based statistics, present when inference succeeded.
#[derive(Debug, Clone, PartialEq)]
struct Inference {
    cov_params: Array2<f64>,
    wald: WaldTable,
}

/// BetaResults — outcome of `BetaModel::fit`.
///
/// Fields
/// ------
/// - `params`: estimated coefficients `[β; γ]`.
/// - `k_mean`, `k_precision`, `nobs`: model dimensions.
/// - `converged`, `status`, `iterations`, `fn_evals`, `grad_norm`:
///   optimizer diagnostics.
/// - `llf`, `aic`, `bic`, `df_model`, `df_resid`: fit statistics.
/// - `covariance_type`: the estimator requested for inference.
#[derive(Debug, Clone, PartialEq)]
pub struct BetaResults {
    pub params: Array1<f64>,
    pub k_mean: usize,
    pub k_precision: usize,
    pub nobs: usize,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
    pub llf: f64,
    pub aic: f64,
    pub bic: f64,
    pub df_model: f64,
    pub df_resid: f64,
    pub covariance_type: CovarianceType,
    inference: Result<Inference, InferenceError>,
}

impl BetaResults {
    /// Assemble results for `model` from an optimizer outcome.
    ///
    /// Covariance by `covariance`:
    /// - `ObservedInformation`: inverse of the finite-difference Jacobian
    ///   of the negative analytic score at `θ̂`.
    /// - `OptimizerInverseHessian`: the BFGS inverse Hessian of the cost.
    /// - `Robust`: `J⁻¹ S J⁻¹` with `S` from [`BetaModel::score_obs`].
    pub fn from_outcome(model: &BetaModel, outcome: OptimOutcome, covariance: CovarianceType) -> Self {
        let OptimOutcome { theta_hat, value, converged, status, iterations, fn_evals, grad_norm, inv_hessian } =
            outcome;
        let inference = estimate_covariance(model, &theta_hat, inv_hessian.as_ref(), covariance)
            .and_then(|cov_params| {
                let wald = WaldTable::new(&theta_hat, &cov_params)?;
                Ok(Inference { cov_params, wald })
            });

        let nobs = model.nobs();
        let p = model.n_params() as f64;
        BetaResults {
            params: theta_hat,
            k_mean: model.k_mean(),
            k_precision: model.k_precision(),
            nobs,
            converged,
            status,
            iterations,
            fn_evals,
            grad_norm,
            llf: value,
            aic: -2.0 * value + 2.0 * p,
            bic: -2.0 * value + p * (nobs as f64).ln(),
            df_model: p - 1.0,
            df_resid: nobs as f64 - p,
            covariance_type: covariance,
            inference,
        }
    }

    /// Mean-model coefficients (first `k_mean` entries).
    pub fn mean_params(&self) -> ArrayView1<'_, f64> {
        self.params.slice(s![..self.k_mean])
    }

    /// Precision-model coefficients (last `k_precision` entries).
    pub fn precision_params(&self) -> ArrayView1<'_, f64> {
        self.params.slice(s![self.k_mean..])
    }

    pub fn cov_params(&self) -> Option<&Array2<f64>> {
        self.inference.as_ref().ok().map(|inf| &inf.cov_params)
    }

    pub fn bse(&self) -> Option<&Array1<f64>> {
        self.inference.as_ref().ok().map(|inf| &inf.wald.bse)
    }

    pub fn zvalues(&self) -> Option<&Array1<f64>> {
        self.inference.as_ref().ok().map(|inf| &inf.wald.zvalues)
    }

    pub fn pvalues(&self) -> Option<&Array1<f64>> {
        self.inference.as_ref().ok().map(|inf| &inf.wald.pvalues)
    }

    /// Why standard errors are unavailable, if they are.
    pub fn inference_error(&self) -> Option<&InferenceError> {
        self.inference.as_ref().err()
    }
}

fn estimate_covariance(
    model: &BetaModel, theta_hat: &Theta, inv_hessian: Option<&Array2<f64>>, covariance: CovarianceType,
) -> InferenceResult<Array2<f64>> {
    // Score failures (e.g. a step into the degenerate region) become NaN
    // and are caught by Hessian validation.
    let neg_score = |theta: &Theta| match model.score(theta) {
        Ok(score) => -score,
        Err(_) => Array1::from_elem(theta.len(), f64::NAN),
    };
    match covariance {
        CovarianceType::ObservedInformation => calc_covariance(&neg_score, theta_hat, None),
        CovarianceType::Robust => {
            let scores = model
                .score_obs(theta_hat)
                .map_err(|err| InferenceError::Optimization(err.to_string()))?;
            calc_covariance(&neg_score, theta_hat, Some(&scores))
        }
        CovarianceType::OptimizerInverseHessian => {
            validate_inverse_hessian(inv_hessian, theta_hat.len())
        }
    }
}
