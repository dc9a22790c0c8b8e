//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the optimization layer used to fit Beta regressions: an
//! Argmin-backed log-likelihood maximizer, numerically stable transforms,
//! and a single error/result surface. Callers implement a log-likelihood,
//! choose tolerances and budgets, and obtain fitted parameters and
//! diagnostics without touching backend solver details.
//!
//! Key behaviors
//! -------------
//! - Expose a high-level API for **maximizing log-likelihoods** `ℓ(θ)`
//!   (`loglik_optimizer`) with BFGS or L-BFGS, three line searches, an
//!   iteration cap and a cost-evaluation cap.
//! - Supply shared numerical primitives (`numerical_stability`) such as an
//!   overflow-safe logistic and the tolerances guarding degenerate
//!   precisions and singular information matrices.
//! - Normalize configuration issues, numerical failures, model errors and
//!   backend solver errors into a single enum (`errors::OptError`) with a
//!   common result alias (`OptResult<T>`).
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained parameter space `θ`; invalid
//!   states are reported as `OptError`, not panics.
//! - A log-likelihood may return `-∞` to mark an infeasible point; any other
//!   non-finite value is an error.
//!
//! Conventions
//! -----------
//! - All solvers conceptually maximize a log-likelihood `ℓ(θ)` by minimizing
//!   an internal cost `c(θ) = -ℓ(θ)`; user-facing APIs and outcomes are
//!   expressed in terms of `ℓ`.
//! - This module performs no logging unless `MLEOptions::verbose` is set.
//!
//! Downstream usage
//! ----------------
//! - `betareg` implements `LogLikelihood` for `BetaModel` and calls
//!   `maximize`; `links` and `inference` reuse `numerical_stability`.
//! - Front-ends typically import the curated surface via
//!   `optimization::prelude::*`.
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each submodule; end-to-end fits are exercised
//!   by the integration tests under `tests/`.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_betareg::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
