//! Validation helpers for log-likelihood optimization.
//!
//! This module centralizes the consistency checks of the optimizer layer,
//! on both sides of a solver run:
//!
//! - **Configuration** (before a run): [`verify_tol_grad`],
//!   [`verify_tol_cost`], [`verify_max_iter`], [`verify_max_fun`] and
//!   [`verify_lbfgs_mem`] reject tolerances that are not finite and
//!   positive and budgets of zero.
//! - **Derivatives** (during a run): [`validate_grad`] and
//!   [`validate_hessian`] enforce dimensions and finite entries on analytic
//!   or finite-difference derivatives.
//! - **Outcome** (after a run): [`validate_theta_hat`] and
//!   [`validate_value`] make sure the reported optimum is usable. A best
//!   log-likelihood of `−∞` (every visited point degenerate) is rejected
//!   here, not passed on as an estimate.
//!
//! Every helper returns a specific [`OptError`] variant carrying the
//! offending value.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// Reason attached to a tolerance that is not a usable threshold, if any.
fn tolerance_problem(tol: f64) -> Option<&'static str> {
    if !tol.is_finite() {
        Some("Tolerance must be finite.")
    } else if tol <= 0.0 {
        Some("Tolerance must be positive.")
    } else {
        None
    }
}

/// Validate the optional gradient-norm tolerance.
///
/// # Errors
/// [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_problem(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolGrad { tol, reason }),
        None => Ok(()),
    }
}

/// Validate the optional cost-change tolerance.
///
/// # Errors
/// [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_problem(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolCost { tol, reason }),
        None => Ok(()),
    }
}

/// Validate the optional iteration cap.
///
/// # Errors
/// [`OptError::InvalidMaxIter`] for `Some(0)`.
pub fn verify_max_iter(max_iter: Option<usize>) -> OptResult<()> {
    match max_iter {
        Some(0) => Err(OptError::InvalidMaxIter {
            max_iter: 0,
            reason: "Maximum iterations must be greater than zero.",
        }),
        _ => Ok(()),
    }
}

/// Validate the optional cost-evaluation budget.
///
/// # Errors
/// [`OptError::InvalidMaxFun`] for `Some(0)`.
pub fn verify_max_fun(max_fun: Option<usize>) -> OptResult<()> {
    match max_fun {
        Some(0) => Err(OptError::InvalidMaxFun {
            max_fun: 0,
            reason: "The evaluation budget must be greater than zero.",
        }),
        _ => Ok(()),
    }
}

/// Validate the optional L-BFGS history length.
///
/// # Errors
/// [`OptError::InvalidLBFGSMem`] for `Some(0)`.
pub fn verify_lbfgs_mem(mem: Option<usize>) -> OptResult<()> {
    match mem {
        Some(0) => Err(OptError::InvalidLBFGSMem {
            mem: 0,
            reason: "L-BFGS memory must be greater than zero.",
        }),
        _ => Ok(()),
    }
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match grad.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        Some((index, &value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// Validate and unwrap the best parameter vector reported by a solver.
///
/// # Errors
/// - [`OptError::MissingThetaHat`] if the solver never recorded one.
/// - [`OptError::InvalidThetaHat`] if any element is non-finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta)
}

/// Validate that the best log-likelihood is finite.
///
/// # Errors
/// [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate the shape and entries of a Hessian matrix.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] if it is not `dim × dim`.
/// - [`OptError::InvalidHessian`] for the first non-finite entry.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    match hessian.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(OptError::InvalidHessian { row, col, value }),
        None => Ok(()),
    }
}
