//! inference — covariance matrices and Wald statistics for fitted models.
//!
//! Purpose
//! -------
//! Provide post-estimation uncertainty quantification on top of a fitted
//! parameter vector: covariance from the observed information (classical
//! or sandwich), validation of an optimizer-supplied inverse Hessian, and
//! the standard errors, z-statistics and p-values derived from either.
//!
//! Key behaviors
//! -------------
//! - Define a unified error and result type, [`InferenceError`] and
//!   [`InferenceResult`], for inference-specific failures (singular
//!   information, non-positive variances, missing inverse Hessian).
//! - Build `J(θ̂)⁻¹` or `J⁻¹ S J⁻¹` via [`calc_covariance`].
//! - Accept a BFGS inverse Hessian through [`validate_inverse_hessian`].
//! - Summarize a covariance as a [`WaldTable`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Nothing is regularized: a singular or indefinite information matrix,
//!   or a non-positive variance, is an error. Callers decide what to report
//!   in its place.
//! - Covariance matrices are `p × p` symmetric objects in parameter order.
//!
//! Conventions
//! -----------
//! - All functions are pure: no logging, no global state, no `unsafe`.
//!   Failures are reported via [`InferenceResult`] only.
//!
//! Downstream usage
//! ----------------
//! - `betareg::BetaResults` calls into this module once per fit and stores
//!   either the covariance and Wald table or the error explaining why they
//!   are unavailable.
//!
//! Testing notes
//! -------------
//! - Unit tests in `hessian` and `wald` use quadratics and diagonal
//!   covariances with closed-form answers; the Beta regression integration
//!   tests compare standard errors and p-values to reference fits.

pub mod errors;
pub mod hessian;
pub mod wald;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::{calc_covariance, information_covariance, validate_inverse_hessian};
pub use self::wald::WaldTable;

// ---- Optional convenience prelude for downstream crates ------------------

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hessian::{calc_covariance, validate_inverse_hessian};
    pub use super::wald::WaldTable;
}
