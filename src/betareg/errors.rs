//! Errors for Beta regression models (data validation, link pairing,
//! parameter checks, and optimizer failures).
//!
//! This module defines the model error type, [`BetaError`], used across the
//! Rust core and the optional Python-facing API. It implements
//! `Display`/`Error` and converts to `PyErr` when the `python-bindings`
//! feature is enabled.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Responses must be **finite and strictly inside (0, 1)**.
//! - Design matrices are named `"X"` (mean) and `"Z"` (precision) in error
//!   payloads.
//! - Optimizer/backend errors are carried unchanged in
//!   [`BetaError::Optimization`].
use crate::{links::LinkError, optimization::errors::OptError};
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for Beta regression operations that may produce [`BetaError`].
pub type BetaResult<T> = Result<T, BetaError>;

/// Unified error type for Beta regression.
#[derive(Debug, Clone, PartialEq)]
pub enum BetaError {
    // ---- Input/data validation ----
    /// No observations were supplied.
    EmptyData,

    /// A response is NaN/±inf.
    NonFiniteResponse { index: usize, value: f64 },

    /// A response is outside the open interval (0, 1).
    ResponseOutOfRange { index: usize, value: f64 },

    /// A design matrix has no columns.
    EmptyDesign { matrix: &'static str },

    /// A design matrix entry is NaN/±inf.
    NonFiniteCovariate { matrix: &'static str, row: usize, col: usize, value: f64 },

    /// A design matrix is not row-aligned with the response.
    RowMismatch { matrix: &'static str, expected: usize, found: usize },

    /// A new design matrix has the wrong number of columns.
    ColumnMismatch { matrix: &'static str, expected: usize, found: usize },

    // ---- Links ----
    /// The mean link does not map into (0, 1).
    InvalidMeanLink { name: &'static str },

    /// The precision link does not map into the precision domain.
    InvalidPrecisionLink { name: &'static str },

    /// A link name could not be resolved.
    Link(LinkError),

    // ---- Parameters ----
    /// Parameter vector length does not equal `k + m`.
    ParamLengthMismatch { expected: usize, actual: usize },

    /// A parameter is NaN/±inf.
    NonFiniteParam { index: usize, value: f64 },

    /// The precision at an observation is at or below machine epsilon.
    DegeneratePrecision { index: usize, value: f64 },

    // ---- Options ----
    /// Unknown covariance estimator name.
    InvalidCovarianceType { name: String },

    // ---- Estimation ----
    /// Optimizer failure.
    Optimization(OptError),
}

impl std::error::Error for BetaError {}

impl std::fmt::Display for BetaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input/data validation ----
            BetaError::EmptyData => write!(f, "Response vector is empty"),
            BetaError::NonFiniteResponse { index, value } => {
                write!(f, "Non-finite response at index {index}: {value}")
            }
            BetaError::ResponseOutOfRange { index, value } => {
                write!(f, "Response at index {index} is {value}, must lie strictly inside (0, 1)")
            }
            BetaError::EmptyDesign { matrix } => {
                write!(f, "Design matrix {matrix} has no columns")
            }
            BetaError::NonFiniteCovariate { matrix, row, col, value } => {
                write!(f, "Non-finite entry in {matrix} at ({row}, {col}): {value}")
            }
            BetaError::RowMismatch { matrix, expected, found } => {
                write!(f, "Design matrix {matrix} has {found} rows, expected {expected}")
            }
            BetaError::ColumnMismatch { matrix, expected, found } => {
                write!(f, "Design matrix {matrix} has {found} columns, expected {expected}")
            }

            // ---- Links ----
            BetaError::InvalidMeanLink { name } => {
                write!(f, "Link '{name}' cannot be used for the mean: it must map into (0, 1)")
            }
            BetaError::InvalidPrecisionLink { name } => {
                write!(f, "Link '{name}' cannot be used for the precision")
            }
            BetaError::Link(err) => write!(f, "{err}"),

            // ---- Parameters ----
            BetaError::ParamLengthMismatch { expected, actual } => {
                write!(f, "Parameter vector has length {actual}, expected {expected}")
            }
            BetaError::NonFiniteParam { index, value } => {
                write!(f, "Non-finite parameter at index {index}: {value}")
            }
            BetaError::DegeneratePrecision { index, value } => {
                write!(
                    f,
                    "Degenerate precision at observation {index}: phi = {value}, must exceed machine epsilon"
                )
            }

            // ---- Options ----
            BetaError::InvalidCovarianceType { name } => write!(
                f,
                "Invalid covariance type '{name}': expected 'observed', 'inverse_hessian' or 'robust'"
            ),

            // ---- Estimation ----
            BetaError::Optimization(err) => write!(f, "Optimization failed: {err}"),
        }
    }
}

impl From<OptError> for BetaError {
    fn from(err: OptError) -> Self {
        match err {
            OptError::ThetaLengthMismatch { expected, actual } => {
                BetaError::ParamLengthMismatch { expected, actual }
            }
            OptError::InvalidThetaInput { index, value } => {
                BetaError::NonFiniteParam { index, value }
            }
            OptError::DegeneratePrecision { index, value } => {
                BetaError::DegeneratePrecision { index, value }
            }
            other => BetaError::Optimization(other),
        }
    }
}

impl From<LinkError> for BetaError {
    fn from(err: LinkError) -> Self {
        BetaError::Link(err)
    }
}

#[cfg(feature = "python-bindings")]
impl From<BetaError> for PyErr {
    fn from(err: BetaError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
