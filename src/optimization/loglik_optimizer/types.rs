//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the core numeric types and solver aliases used by the
//! log-likelihood optimizer. By defining these in one place, the rest of
//! the optimization code can stay agnostic to `ndarray` and Argmin
//! generics and can more easily evolve if the backend changes.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors, gradients,
//!   Hessians, and scalar costs (`Theta`, `Grad`, `Hessian`, `Cost`).
//! - Provide a standard map type for Argmin function-evaluation counters
//!   (`FnEvalMap`) and the counter key used for evaluation budgets.
//! - Expose the three line searches specialized to `(Theta, Grad, Cost)`
//!   and the BFGS / L-BFGS solver shapes built on top of them.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors and matrices are represented as `ndarray`
//!   containers over `f64`.
//! - `Cost` is always a scalar `f64`; higher layers handle any sign flips
//!   between cost and log-likelihood.
//! - BFGS carries its inverse-Hessian approximation as a dense [`Hessian`]
//!   in the iteration state; L-BFGS carries none.
//!
//! Testing notes
//! -------------
//! - This module only defines type aliases and constants; correctness is
//!   exercised by the builders and runner tests that instantiate them.
use argmin::core::IterState;
use argmin::solver::{
    linesearch::{
        BacktrackingLineSearch, HagerZhangLineSearch, MoreThuenteLineSearch,
        condition::ArmijoCondition,
    },
    quasinewton::{BFGS, LBFGS},
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ` for log-likelihood optimization.
///
/// Alias for `ndarray::Array1<f64>`, used as the canonical parameter type
/// throughout the optimizer.
pub type Theta = Array1<f64>;

/// Gradient vector `∇ℓ(θ)` or `∇c(θ)` for optimization.
///
/// Alias for `ndarray::Array1<f64>`, matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Dense Hessian matrix for second-order information.
///
/// Alias for `ndarray::Array2<f64>`; `n × n` for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value used by the optimizer.
///
/// In this crate, this is the cost `c(θ) = -ℓ(θ)` derived from a
/// log-likelihood `ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps human-readable counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Counter key argmin uses for cost-function evaluations.
pub const COST_COUNT_KEY: &str = "cost_count";

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Armijo sufficient-decrease constant for the backtracking line search.
pub const ARMIJO_C: f64 = 1e-4;

/// Step contraction factor for the backtracking line search.
pub const BACKTRACKING_RHO: f64 = 0.5;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// Backtracking line search with the Armijo condition.
pub type BacktrackingLS = BacktrackingLineSearch<Theta, Grad, ArmijoCondition<Cost>, Cost>;

/// L-BFGS solver over an arbitrary line search `L`.
pub type Lbfgs<L> = LBFGS<L, Theta, Grad, Cost>;

/// BFGS solver over an arbitrary line search `L`.
pub type Bfgs<L> = BFGS<L, Cost>;

/// Iteration state used by L-BFGS (no Hessian slot).
pub type LbfgsState = IterState<Theta, Grad, (), (), (), Cost>;

/// Iteration state used by BFGS (inverse Hessian stored in the Hessian slot).
pub type BfgsState = IterState<Theta, Grad, (), Hessian, (), Cost>;
