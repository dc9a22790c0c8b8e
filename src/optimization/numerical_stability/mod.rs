//! numerical_stability — overflow-safe transforms and shared tolerances.
//!
//! Purpose
//! -------
//! Collect the numerically stable scalar transforms and the small numeric
//! tolerances shared by the link functions, the Beta likelihood and the
//! inference layer, so every component guards the same boundaries in the
//! same way.
//!
//! Key behaviors
//! -------------
//! - Provide an overflow-free logistic (`safe_logistic`) and a clamped
//!   logit (`safe_logit`).
//! - Centralize tolerances: `LOGIT_EPS` (probability clamp),
//!   `PRECISION_EPS` (degenerate precision threshold) and `EIGEN_EPS`
//!   (relative eigenvalue floor for information matrices).
//!
//! Conventions
//! -----------
//! - Pure `f64` helpers with no I/O, logging or global state.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] cover agreement with naïve formulas
//!   on safe grids and finite behavior in the tails.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{EIGEN_EPS, LOGIT_EPS, PRECISION_EPS, safe_logistic, safe_logit};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, LOGIT_EPS, PRECISION_EPS, safe_logistic, safe_logit,
    };
}
