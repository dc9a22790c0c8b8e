//! loglik_optimizer — MLE-friendly, argmin-powered log-likelihood optimizer.
//!
//! Purpose
//! -------
//! Provide a high-level, Argmin-backed optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)`. Callers implement a single trait,
//! [`LogLikelihood`], and invoke [`maximize`] to run BFGS or L-BFGS with a
//! configurable line search, tolerances, iteration and evaluation budgets,
//! and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Convert user-supplied log-likelihoods `ℓ(θ)` into Argmin-compatible
//!   cost functions `c(θ) = -ℓ(θ)` via [`adapter::ArgMinAdapter`]. An
//!   infeasible point (`ℓ = -∞`) becomes a cost of `+∞`.
//! - Expose a single, user-facing entrypoint [`maximize`] that:
//!   - validates the initial guess with [`LogLikelihood::check`],
//!   - selects the solver via [`builders`] based on [`Method`] and
//!     [`LineSearcher`],
//!   - executes it via [`run::run_bfgs`] / [`run::run_lbfgs`] under an
//!     [`budget::EvalBudget`], and
//!   - normalizes results into an [`OptimOutcome`].
//! - Provide finite-difference helpers in [`finite_diff`] for gradients and
//!   Hessians when analytic derivatives are missing.
//! - Centralize optimizer configuration ([`Tolerances`], [`MLEOptions`]) and
//!   validation logic ([`validation`]).
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** a log-likelihood `ℓ(θ)` by minimizing
//!   a cost `c(θ) = -ℓ(θ)`; user code implements `ℓ(θ)` and `∇ℓ(θ)`
//!   (when available), **never** the cost directly.
//! - [`LogLikelihood::value`] and [`LogLikelihood::grad`] must treat invalid
//!   inputs as recoverable [`OptError`](crate::optimization::errors::OptError)
//!   values, not panics.
//! - [`OptimOutcome::converged`] is `true` only when the solver's own
//!   stopping rule fired; exhausted budgets are reported, not raised.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained optimizer space as [`Theta`]
//!   (`Array1<f64>`). Any mapping from constrained → unconstrained space
//!   happens in the model layer (for Beta regression, through link
//!   functions).
//! - All user-facing values (including [`OptimOutcome::value`]) are
//!   expressed in terms of `ℓ`; the BFGS inverse Hessian in
//!   [`OptimOutcome::inv_hessian`] refers to the cost `-ℓ`.
//!
//! Downstream usage
//! ----------------
//! - `betareg::BetaModel` implements [`LogLikelihood`] and calls
//!   [`maximize`] from `fit` with options derived from its fit options.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover sign conventions ([`adapter`]), solver
//!   construction ([`builders`]), the evaluation cap ([`budget`]),
//!   configuration and outcome invariants ([`traits`]), finite differences
//!   ([`finite_diff`]), option and outcome checks ([`validation`]), and
//!   end-to-end solves on toy objectives ([`api`]).

pub mod adapter;
pub mod api;
pub mod budget;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, Method, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Hessian, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_betareg::optimization::loglik_optimizer::prelude::*;
//
// to import the main optimizer surface in a single line.

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{
        LineSearcher, LogLikelihood, MLEOptions, Method, OptimOutcome, Tolerances,
    };
    pub use super::types::{Cost, Grad, Hessian, Theta};
}
