//! Errors raised while selecting link functions.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for link selection.
pub type LinkResult<T> = Result<T, LinkError>;

/// Failures when resolving or pairing link functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// The name does not match any known link.
    UnknownLink { name: String },
}

impl std::error::Error for LinkError {}

impl std::fmt::Display for LinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkError::UnknownLink { name } => write!(
                f,
                "Unknown link '{name}': expected one of 'logit', 'probit', 'cloglog', 'log', \
                 'identity' or 'sqrt'"
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<LinkError> for PyErr {
    fn from(err: LinkError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
