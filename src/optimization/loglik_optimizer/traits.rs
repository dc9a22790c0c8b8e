//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`Method`]: quasi-Newton family (BFGS or L-BFGS).
//! - [`LineSearcher`]: choice of line search used by the quasi-Newton step.
//! - [`OptimOutcome`]: normalized result returned by the high-level `maximize` API.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)`. If an analytic gradient is provided, it should be the gradient
//! of the log-likelihood (`∇ℓ(θ)`); the adapter flips the sign as needed.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        types::Hessian,
        validation::{
            validate_theta_hat, validate_value, verify_lbfgs_mem, verify_max_fun, verify_max_iter,
            verify_tol_cost, verify_tol_grad,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
/// If you provide an analytic gradient, return the gradient of the
/// log-likelihood `∇ℓ(θ)` (the adapter flips the sign to match the cost).
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
///   - `f64::NEG_INFINITY` is an admissible value and marks an infeasible
///     region the line search must back away from.
///   - Errors: return a descriptive `OptError` for invalid inputs or model failures.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇ℓ(θ)`.
///   If not implemented, robust finite differences are used automatically.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Quasi-Newton family used to drive the search.
///
/// - `Bfgs`: dense BFGS; keeps an inverse-Hessian approximation that is
///   returned in [`OptimOutcome::inv_hessian`].
/// - `Lbfgs`: limited-memory BFGS; no inverse Hessian is available.
///
/// Parsing is case-insensitive (`"bfgs"`, `"lbfgs"`, `"l-bfgs"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Bfgs,
    Lbfgs,
}

impl FromStr for Method {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bfgs" => Ok(Method::Bfgs),
            "lbfgs" | "l-bfgs" => Ok(Method::Lbfgs),
            _ => Err(OptError::InvalidMethod {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'bfgs' or 'lbfgs'.",
            }),
        }
    }
}

/// Choice of line search used inside the quasi-Newton solver.
///
/// Variants:
/// - `MoreThuente`: More–Thuente line search (strong Wolfe).
/// - `HagerZhang`: Hager–Zhang line search (approximate Wolfe).
/// - `Backtracking`: Armijo backtracking. It only compares costs, so trial
///   points where the cost is `+∞` are simply rejected; prefer it when the
///   parameterization can step into an infeasible region.
///
/// Parsing:
/// This enum implements `FromStr` and accepts case-insensitive names
/// (`"MoreThuente"`, `"HagerZhang"`, `"Backtracking"`). Unknown names return
/// `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
    Backtracking,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    /// Parse a line-search choice from a string (case-insensitive).
    ///
    /// Any other value returns `OptError::InvalidLineSearch` with a helpful message.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            "backtracking" => Ok(LineSearcher::Backtracking),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente', 'HagerZhang' or \
                         'Backtracking'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits.
/// - `method: Method` — BFGS or L-BFGS.
/// - `line_searcher: LineSearcher` — line-search algorithm.
/// - `max_fun: Option<usize>` — cap on cost evaluations (line-search trials
///   included); `None` means unbounded.
/// - `verbose: bool` — if `true`, writes initial/final diagnostics to stderr
///   and, behind the `obs_slog` feature, attaches a per-iteration observer.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size (ignored by BFGS).
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = None`, `max_iter = 300`
/// - `method`: `Bfgs`
/// - `line_searcher`: `MoreThuente`
/// - `max_fun`: `None`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None` (uses default of 7)
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub method: Method,
    pub line_searcher: LineSearcher,
    pub max_fun: Option<usize>,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    /// - [`OptError::InvalidMaxFun`] if `max_fun == Some(0)`.
    pub fn new(
        tols: Tolerances, method: Method, line_searcher: LineSearcher, max_fun: Option<usize>,
        verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        verify_lbfgs_mem(lbfgs_mem)?;
        verify_max_fun(max_fun)?;
        Ok(Self { tols, method, line_searcher, max_fun, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            method: Method::Bfgs,
            line_searcher: LineSearcher::MoreThuente,
            max_fun: None,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for non-finite or non-positive tolerances.
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        verify_max_iter(max_iter)?;
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` only when the solver's own stopping rule fired
///   (gradient / cost-change tolerance or target cost). Running out of
///   iterations or of the evaluation budget reports `false`.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
///   Keys follow argmin’s counters, e.g., cost_count, gradient_count, etc.
/// - `grad_norm`: norm of the last available gradient, if present.
/// - `inv_hessian`: final inverse-Hessian approximation of the **cost**
///   (BFGS only).
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
    pub inv_hessian: Option<Hessian>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>, inv_hessian: Option<Hessian>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = describe_termination(&termination);
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm, inv_hessian })
    }
}

/// Split an argmin termination status into `(converged, status text)`.
fn describe_termination(termination: &TerminationStatus) -> (bool, String) {
    match termination {
        TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
        TerminationStatus::Terminated(reason) => {
            let converged = matches!(
                reason,
                TerminationReason::SolverConverged | TerminationReason::TargetCostReached
            );
            (converged, format!("{reason:?}"))
        }
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
    // - Parsing of `Method` and `LineSearcher`.
    // - Validation in `Tolerances::new` and `MLEOptions::new`.
    // - The mapping from argmin termination reasons to the convergence flag.
    //
    // They intentionally DO NOT cover:
    // - Running a solver (see `api` and `run`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Method and line-search names parse case-insensitively and reject
    // unknown names with the dedicated error variants.
    //
    // Given
    // -----
    // - Mixed-case valid names and one invalid name per enum.
    //
    // Expect
    // ------
    // - Valid names map to the right variants; invalid names error.
    fn selectors_parse_case_insensitively() {
        // Act / Assert
        assert_eq!("BFGS".parse::<Method>().unwrap(), Method::Bfgs);
        assert_eq!("L-BFGS".parse::<Method>().unwrap(), Method::Lbfgs);
        assert!(matches!("newton".parse::<Method>(), Err(OptError::InvalidMethod { .. })));

        assert_eq!("morethuente".parse::<LineSearcher>().unwrap(), LineSearcher::MoreThuente);
        assert_eq!("BACKTRACKING".parse::<LineSearcher>().unwrap(), LineSearcher::Backtracking);
        assert!(matches!(
            "wolfe".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `Tolerances::new` enforces "at least one criterion" and positivity.
    //
    // Given
    // -----
    // - All-`None`, a negative gradient tolerance, and `max_iter = 0`.
    //
    // Expect
    // ------
    // - The matching error variant for each case.
    fn tolerances_reject_invalid_configurations() {
        // Act / Assert
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(
            Tolerances::new(Some(-1.0), None, None),
            Err(OptError::InvalidTolGrad { .. })
        ));
        assert!(matches!(
            Tolerances::new(None, None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `MLEOptions::new` rejects zero budgets and zero L-BFGS memory.
    //
    // Given
    // -----
    // - Valid tolerances with `max_fun = Some(0)` or `lbfgs_mem = Some(0)`.
    //
    // Expect
    // ------
    // - `InvalidMaxFun` and `InvalidLBFGSMem` respectively.
    fn mle_options_reject_zero_budgets() {
        // Arrange
        let tols = Tolerances::new(Some(1e-6), None, Some(10)).unwrap();

        // Act
        let zero_fun =
            MLEOptions::new(tols, Method::Bfgs, LineSearcher::MoreThuente, Some(0), false, None);
        let zero_mem =
            MLEOptions::new(tols, Method::Lbfgs, LineSearcher::HagerZhang, None, false, Some(0));

        // Assert
        assert!(matches!(zero_fun, Err(OptError::InvalidMaxFun { .. })));
        assert!(matches!(zero_mem, Err(OptError::InvalidLBFGSMem { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Only genuine convergence sets `converged`; budget exhaustion does not.
    //
    // Given
    // -----
    // - Outcomes built from `SolverConverged`, `MaxItersReached`, and a
    //   `SolverExit` produced by an evaluation budget.
    //
    // Expect
    // ------
    // - `converged` is true, false, false respectively.
    fn outcome_converged_flag_tracks_termination_reason() {
        // Arrange
        let build = |status: TerminationStatus| {
            OptimOutcome::new(
                Some(array![0.5, -1.0]),
                -3.0,
                status,
                12,
                FnEvalMap::new(),
                Some(array![0.0, 0.0]),
                None,
            )
            .unwrap()
        };

        // Act
        let converged = build(TerminationStatus::Terminated(TerminationReason::SolverConverged));
        let max_iters = build(TerminationStatus::Terminated(TerminationReason::MaxItersReached));
        let budget = build(TerminationStatus::Terminated(TerminationReason::SolverExit(
            "budget".to_string(),
        )));

        // Assert
        assert!(converged.converged);
        assert!(!max_iters.converged);
        assert!(!budget.converged);
        assert_eq!(converged.iterations, 12);
        assert_eq!(converged.grad_norm, Some(0.0));
    }
}
