//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the error type used when turning a
//! fitted parameter vector into a covariance matrix and Wald statistics.
//! It separates numerical failures of the information matrix (singular,
//! non-positive variances) from configuration problems (an inverse Hessian
//! requested from a solver that does not keep one). An alias
//! `InferenceResult<T>` standardizes the return type across inference code.
use crate::optimization::errors::OptError;

/// Unified error type for inference routines.
///
/// Covers information-matrix degeneracies, unavailable or malformed
/// covariance inputs, and optimizer-layer failures raised while
/// differentiating the score. Provides readable diagnostics through
/// `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Information matrix ----
    /// The information matrix is singular or not positive definite.
    SingularInformation {
        min_eigenvalue: f64,
    },

    /// A covariance diagonal entry is zero, negative or non-finite.
    NonPositiveVariance {
        index: usize,
        value: f64,
    },

    // ---- Covariance inputs ----
    /// The optimizer did not return an inverse-Hessian approximation.
    InverseHessianUnavailable,

    /// A matrix does not match the parameter dimension.
    DimensionMismatch {
        expected: usize,
        found: (usize, usize),
    },

    // ---- Optimizer passthrough ----
    Optimization(String),
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl From<OptError> for InferenceError {
    fn from(err: OptError) -> Self {
        InferenceError::Optimization(err.to_string())
    }
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Information matrix ----
            InferenceError::SingularInformation { min_eigenvalue } => write!(
                f,
                "Inference Error: Information matrix is singular or indefinite (min eigenvalue = {})",
                min_eigenvalue
            ),
            InferenceError::NonPositiveVariance { index, value } => write!(
                f,
                "Inference Error: Non-positive variance for parameter {} ({})",
                index, value
            ),

            // ---- Covariance inputs ----
            InferenceError::InverseHessianUnavailable => write!(
                f,
                "Inference Error: Optimizer inverse Hessian is unavailable (BFGS only)"
            ),
            InferenceError::DimensionMismatch { expected, found } => write!(
                f,
                "Inference Error: Expected a {}x{} matrix, found {}x{}",
                expected, expected, found.0, found.1
            ),

            // ---- Optimizer passthrough ----
            InferenceError::Optimization(msg) => write!(f, "Inference Error: {}", msg),
        }
    }
}
