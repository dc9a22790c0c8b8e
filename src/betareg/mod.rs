//! betareg — maximum-likelihood Beta regression.
//!
//! Purpose
//! -------
//! Model a response in the open interval (0, 1) through a mean `μ` and a
//! precision `φ`, each with its own design matrix and link function, and
//! estimate all coefficients by maximum likelihood.
//!
//! Key behaviors
//! -------------
//! - [`BetaData`] validates `y`, `X` and `Z` once, at construction.
//! - [`BetaModel`] evaluates the log-likelihood, its analytic score and
//!   predictions, and fits through the `optimization` layer.
//! - [`BetaFitOptions`] carries budgets, solver choice and the covariance
//!   estimator; [`BetaResults`] carries estimates, diagnostics and Wald
//!   statistics.
//! - Starting values come from a [`QuasiBinomialFit`] (default
//!   [`IrlsLogit`]) unless the caller supplies them.
//!
//! Invariants & assumptions
//! ------------------------
//! - `θ = [β; γ]` with `β` the `k` mean coefficients and `γ` the `m`
//!   precision coefficients.
//! - A precision at or below machine epsilon anywhere makes the
//!   log-likelihood `−∞`; it is never reported as NaN.
//! - Non-convergence is a flag on [`BetaResults`], not an error.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! # use ndarray::array;
//! # use rust_betareg::betareg::{BetaFitOptions, BetaModel};
//! let y = array![0.21, 0.34, 0.48, 0.52, 0.63, 0.71, 0.29, 0.44];
//! let x = array![[1.0, 0.0], [1.0, 0.1], [1.0, 0.3], [1.0, 0.4],
//!                [1.0, 0.6], [1.0, 0.9], [1.0, 0.2], [1.0, 0.5]];
//! let model = BetaModel::with_default_links(y, x, None)?;
//! let fit = model.fit(&BetaFitOptions::default())?;
//! assert_eq!(fit.params.len(), 3);
//! # Ok::<(), rust_betareg::betareg::BetaError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Each submodule has unit tests; `tests/integration_betareg_pipeline.rs`
//!   fits the FoodExpenditure data and synthetic variable-precision data.

pub mod data;
pub mod errors;
pub mod model;
pub mod options;
pub mod results;
pub mod seed;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::BetaData;
pub use self::errors::{BetaError, BetaResult};
pub use self::model::BetaModel;
pub use self::options::{BetaFitOptions, CovarianceType};
pub use self::results::BetaResults;
pub use self::seed::{IrlsLogit, QuasiBinomialFit, SeedError};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::data::BetaData;
    pub use super::errors::{BetaError, BetaResult};
    pub use super::model::BetaModel;
    pub use super::options::{BetaFitOptions, CovarianceType};
    pub use super::results::BetaResults;
}
