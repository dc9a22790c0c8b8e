//! links — link functions for the mean and precision submodels.
//!
//! Purpose
//! -------
//! Provide the `Link` capability used by the Beta likelihood: a stateless,
//! object-safe transform between an unconstrained linear predictor and a
//! constrained parameter, implemented directly for each supported link.
//!
//! Key behaviors
//! -------------
//! - Mean links (`Logit`, `Probit`, `CLogLog`) map ℝ → (0, 1) without
//!   overflow and never return the boundaries.
//! - Precision links (`Log`, `Sqrt`, `Identity`) map ℝ into the precision
//!   domain; only `Log` is strictly positive for every input.
//! - [`link_from_name`] resolves case-insensitive names for front-ends.
//!
//! Conventions
//! -----------
//! - Models hold links as `Arc<dyn Link>`; links carry no state, so sharing
//!   them across threads and fitted models is free.
//! - Defaults: [`default_mean_link`] is logit, [`default_precision_link`]
//!   is log.
//!
//! Downstream usage
//! ----------------
//! - `betareg::BetaModel::new` takes a pair of links and checks their
//!   [`LinkRange`] against the role they are used in.

pub mod errors;
pub mod functions;

use std::sync::Arc;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{LinkError, LinkResult};
pub use self::functions::{CLogLog, Identity, Link, LinkRange, Log, Logit, Probit, Sqrt};

/// Resolve a link by its case-insensitive name.
///
/// Accepted names: `"logit"`, `"probit"`, `"cloglog"`, `"log"`,
/// `"identity"`, `"sqrt"`.
///
/// # Errors
/// [`LinkError::UnknownLink`] for any other name.
pub fn link_from_name(name: &str) -> LinkResult<Arc<dyn Link>> {
    match name.trim().to_lowercase().as_str() {
        "logit" => Ok(Arc::new(Logit)),
        "probit" => Ok(Arc::new(Probit)),
        "cloglog" => Ok(Arc::new(CLogLog)),
        "log" => Ok(Arc::new(Log)),
        "identity" => Ok(Arc::new(Identity)),
        "sqrt" => Ok(Arc::new(Sqrt)),
        _ => Err(LinkError::UnknownLink { name: name.to_string() }),
    }
}

/// The logistic mean link.
pub fn default_mean_link() -> Arc<dyn Link> {
    Arc::new(Logit)
}

/// The exponential (log) precision link.
pub fn default_precision_link() -> Arc<dyn Link> {
    Arc::new(Log)
}

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        Link, LinkError, LinkRange, default_mean_link, default_precision_link, link_from_name,
    };
}
