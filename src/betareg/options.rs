//! Beta regression fit options — optimizer budgets, solver choice, and the
//! covariance estimator used for inference.
//!
//! Purpose
//! -------
//! Collect every knob of `BetaModel::fit` in one plain data carrier with
//! documented defaults, and translate it into the optimizer's validated
//! [`MLEOptions`].
//!
//! Key behaviors
//! -------------
//! - [`BetaFitOptions::default`] reproduces the documented defaults:
//!   seeded start, 100 000 iterations, 5 000 cost evaluations, BFGS with a
//!   line search chosen from the precision link, gradient tolerance `1e-6`,
//!   silent, observed information covariance.
//! - [`BetaFitOptions::to_mle_options`] validates budgets and tolerances
//!   through `Tolerances::new` / `MLEOptions::new`, filling an unset line
//!   search with the model's fallback.
//! - [`CovarianceType`] parses from strings for front-ends.
//!
//! Invariants & assumptions
//! ------------------------
//! - Options are validated when a fit starts, not when fields are assigned;
//!   an invalid value surfaces as `BetaError::Optimization`.
//! - `start_params` length is checked against the model by the fit itself.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the defaults, the translation into `MLEOptions`, and
//!   string parsing of `CovarianceType`.
use crate::{
    betareg::errors::{BetaError, BetaResult},
    optimization::loglik_optimizer::{LineSearcher, MLEOptions, Method, Tolerances},
};
use ndarray::Array1;
use std::str::FromStr;

/// Default iteration cap.
pub const DEFAULT_MAX_ITER: usize = 100_000;

/// Default cap on cost-function evaluations.
pub const DEFAULT_MAX_FUN: usize = 5_000;

/// Default gradient-norm tolerance.
pub const DEFAULT_TOL_GRAD: f64 = 1e-6;

/// Estimator used for the parameter covariance matrix.
///
/// - `ObservedInformation`: inverse of the negative Hessian of ℓ at θ̂,
///   computed from finite differences of the analytic score.
/// - `OptimizerInverseHessian`: the BFGS inverse-Hessian approximation at
///   termination; unavailable for L-BFGS.
/// - `Robust`: sandwich `J⁻¹ S J⁻¹` with `S` the outer product of the
///   per-observation scores.
///
/// Parsing accepts `"observed"`, `"inverse_hessian"` and `"robust"`
/// (case-insensitive; `-` and `_` are interchangeable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CovarianceType {
    #[default]
    ObservedInformation,
    OptimizerInverseHessian,
    Robust,
}

impl FromStr for CovarianceType {
    type Err = BetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "observed" | "observed_information" | "oim" => Ok(CovarianceType::ObservedInformation),
            "inverse_hessian" | "optimizer" => Ok(CovarianceType::OptimizerInverseHessian),
            "robust" | "sandwich" => Ok(CovarianceType::Robust),
            _ => Err(BetaError::InvalidCovarianceType { name: s.to_string() }),
        }
    }
}

/// BetaFitOptions — configuration for a single call to `BetaModel::fit`.
///
/// Fields
/// ------
/// - `start_params`: `Option<Array1<f64>>`
///   Starting vector of length `k + m`; `None` derives it from a
///   quasi-binomial logistic fit of the mean model.
/// - `max_iter`: `usize` — iteration cap [100 000].
/// - `max_fun`: `usize` — cost-evaluation cap [5 000].
/// - `method`: [`Method`] — [`Method::Bfgs`].
/// - `line_searcher`: `Option<LineSearcher>` — [None, chosen by the model:
///   More–Thuente, or Backtracking for a real-valued precision link].
/// - `tol_grad`: `Option<f64>` — [1e-6].
/// - `tol_cost`: `Option<f64>` — [None, solver default].
/// - `lbfgs_mem`: `Option<usize>` — [None, 7].
/// - `verbose`: `bool` — print start/end diagnostics to stderr [false].
/// - `covariance`: [`CovarianceType`] — [`CovarianceType::ObservedInformation`].
///
/// Notes
/// -----
/// - With the identity precision link a trial step can leave `φ > 0` and
///   produce an infinite cost. Backtracking only shrinks the step in that
///   case, while More–Thuente stops the run at the last accepted iterate.
#[derive(Debug, Clone, PartialEq)]
pub struct BetaFitOptions {
    pub start_params: Option<Array1<f64>>,
    pub max_iter: usize,
    pub max_fun: usize,
    pub method: Method,
    pub line_searcher: Option<LineSearcher>,
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub lbfgs_mem: Option<usize>,
    pub verbose: bool,
    pub covariance: CovarianceType,
}

impl Default for BetaFitOptions {
    fn default() -> Self {
        Self {
            start_params: None,
            max_iter: DEFAULT_MAX_ITER,
            max_fun: DEFAULT_MAX_FUN,
            method: Method::Bfgs,
            line_searcher: None,
            tol_grad: Some(DEFAULT_TOL_GRAD),
            tol_cost: None,
            lbfgs_mem: None,
            verbose: false,
            covariance: CovarianceType::ObservedInformation,
        }
    }
}

impl BetaFitOptions {
    /// Defaults with an explicit starting vector.
    pub fn with_start_params(start_params: Array1<f64>) -> Self {
        Self { start_params: Some(start_params), ..Self::default() }
    }

    /// Translate into validated optimizer options. `fallback_line_searcher`
    /// is used when `line_searcher` is `None`.
    ///
    /// # Errors
    /// `BetaError::Optimization` wrapping `InvalidTolGrad`, `InvalidTolCost`,
    /// `InvalidMaxIter`, `InvalidMaxFun` or `InvalidLBFGSMem`.
    pub fn to_mle_options(&self, fallback_line_searcher: LineSearcher) -> BetaResult<MLEOptions> {
        let tols = Tolerances::new(self.tol_grad, self.tol_cost, Some(self.max_iter))
            .map_err(BetaError::Optimization)?;
        MLEOptions::new(
            tols,
            self.method,
            self.line_searcher.unwrap_or(fallback_line_searcher),
            Some(self.max_fun),
            self.verbose,
            self.lbfgs_mem,
        )
        .map_err(BetaError::Optimization)
    }
}
