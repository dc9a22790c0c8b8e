//! loglik_optimizer::builders — quasi-Newton solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the BFGS and L-BFGS solvers used by
//! the log-likelihood optimizer. These helpers hide Argmin’s generic wiring
//! and apply crate-level options (tolerances, memory size) so that
//! higher-level code can request a configured solver without touching
//! Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct each of the three supported line searches
//!   ([`more_thuente`], [`hager_zhang`], [`backtracking`]).
//! - Wrap a line search into BFGS ([`build_bfgs`]) or L-BFGS
//!   ([`build_lbfgs`]) and apply optional gradient and cost-change
//!   tolerances from [`MLEOptions`].
//! - Leave the initial parameter vector, the initial inverse Hessian and
//!   the iteration/evaluation budgets to the runner layer, keeping these
//!   builders side-effect free.
//!
//! Invariants & assumptions
//! ------------------------
//! - All solvers operate on the canonical optimizer numeric types
//!   `Theta`, `Grad`, and `Cost`.
//! - The L-BFGS memory (`m`) is either provided via `opts.lbfgs_mem` or
//!   defaults to [`DEFAULT_LBFGS_MEM`]; BFGS ignores it.
//! - Any invalid tolerance passed into Argmin’s
//!   `with_tolerance_grad` / `with_tolerance_cost` is surfaced as an
//!   [`OptError`](crate::optimization::errors::OptError) via the crate’s
//!   `From<Error>` implementation.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that every (method, line search) pairing builds
//!   with and without tolerances.
//! - The runner and `maximize` tests exercise the built solvers end to end.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            ARMIJO_C, BACKTRACKING_RHO, BacktrackingLS, Bfgs, DEFAULT_LBFGS_MEM, HagerZhangLS,
            Lbfgs, MoreThuenteLS,
        },
    },
};
use argmin::solver::linesearch::condition::ArmijoCondition;

/// More–Thuente line search with Argmin’s default constants.
pub fn more_thuente() -> MoreThuenteLS {
    MoreThuenteLS::new()
}

/// Hager–Zhang line search with Argmin’s default constants.
pub fn hager_zhang() -> HagerZhangLS {
    HagerZhangLS::new()
}

/// backtracking — Armijo backtracking line search.
///
/// Uses the sufficient-decrease constant [`ARMIJO_C`] and contraction
/// factor [`BACKTRACKING_RHO`]. Only costs are compared while searching,
/// so a trial step whose cost is `+∞` is shrunk rather than accepted.
///
/// # Errors
/// Propagates Argmin’s validation of the Armijo constant or `rho`.
pub fn backtracking() -> OptResult<BacktrackingLS> {
    let condition = ArmijoCondition::new(ARMIJO_C)?;
    Ok(BacktrackingLS::new(condition).rho(BACKTRACKING_RHO)?)
}

/// build_lbfgs — construct L-BFGS over the given line search.
///
/// Parameters
/// ----------
/// - `linesearch`: `L`
///   Any Argmin line search over `(Theta, Grad, Cost)`.
/// - `opts`: `&MLEOptions`
///   Consulted for `lbfgs_mem`, `tols.tol_grad` and `tols.tol_cost`.
///
/// Returns
/// -------
/// `OptResult<Lbfgs<L>>` with any configured tolerances applied.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
///   tolerance.
pub fn build_lbfgs<L>(linesearch: L, opts: &MLEOptions) -> OptResult<Lbfgs<L>> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let mut solver = Lbfgs::new(linesearch, mem);
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

/// build_bfgs — construct dense BFGS over the given line search.
///
/// Purpose
/// -------
/// BFGS keeps a full inverse-Hessian approximation, which the runner
/// returns so callers can use it as a covariance estimate. The initial
/// approximation (identity) is seeded by the runner, not here.
///
/// Parameters
/// ----------
/// - `linesearch`: `L`
///   Any Argmin line search over `(Theta, Grad, Cost)`.
/// - `opts`: `&MLEOptions`
///   Consulted for `tols.tol_grad` and `tols.tol_cost`.
///
/// Returns
/// -------
/// `OptResult<Bfgs<L>>` with any configured tolerances applied.
///
/// Errors
/// ------
/// - `OptError` (via `From<argmin::core::Error>`) when Argmin rejects a
///   tolerance.
///
/// Notes
/// -----
/// - When a tolerance is `None`, Argmin’s default stays in effect
///   (`sqrt(ε)` for the gradient norm, `ε` for the cost change).
pub fn build_bfgs<L>(linesearch: L, opts: &MLEOptions) -> OptResult<Bfgs<L>> {
    let mut solver = Bfgs::new(linesearch);
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
