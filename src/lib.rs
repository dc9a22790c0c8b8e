//! rust_betareg — Beta regression by maximum likelihood, with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! Beta regression to Python via the `_rust_betareg` extension module. When the
//! `python-bindings` feature is enabled, this module defines the Python-facing
//! classes and the submodule used by the `rust_betareg` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`links`, `betareg`, `inference`,
//!   `optimization`) as the public crate surface.
//! - Define `#[pyclass]` wrappers (`BetaRegression`, `BetaFit`) and the
//!   `#[pymodule]` initializer for the `_rust_betareg` Python extension.
//! - Create and register the `beta_regression` submodule under
//!   `rust_betareg` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, input conversion, and error mapping.
//! - Python-visible types mirror the invariants of their Rust counterparts
//!   (`BetaModel`, `BetaResults`).
//!
//! Conventions
//! -----------
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` (`ValueError`) at the PyO3 boundary.
//! - Parameter vectors returned to Python keep the Rust order: mean
//!   coefficients first, then precision coefficients.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend on [`betareg`] directly and can ignore
//!   the items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports `_rust_betareg` and wraps its classes
//!   in user-facing APIs (formula handling, summaries).
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by `tests/integration_betareg_pipeline.rs`.

pub mod betareg;
pub mod inference;
pub mod links;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;

#[cfg(feature = "python-bindings")]
use crate::{
    betareg::{model::BetaModel, results::BetaResults},
    links::link_from_name,
    utils::{extract_fit_options, extract_matrix, extract_vector},
};

/// BetaRegression — Python-facing wrapper for [`BetaModel`].
///
/// Purpose
/// -------
/// Build a Beta regression from Python arrays and link names, and forward
/// likelihood evaluation, prediction and fitting to the Rust model.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `BetaRegression(y, x, z=None, link="logit", link_phi="log")`:
/// - `y`: 1-D array-like of responses strictly inside (0, 1).
/// - `x`: 2-D array-like mean design (include an intercept column yourself).
/// - `z`: optional 2-D array-like precision design; `None` means a constant
///   precision.
/// - `link`, `link_phi`: link names accepted by [`link_from_name`].
///
/// Fields
/// ------
/// - `inner`: [`BetaModel`]
///   Immutable model; every `fit` returns a fresh [`BetaFit`].
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_betareg.beta_regression")]
pub struct BetaRegression {
    inner: BetaModel,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BetaRegression {
    #[new]
    #[pyo3(
        signature = (y, x, z = None, link = "logit", link_phi = "log"),
        text_signature = "(y, x, /, z=None, link='logit', link_phi='log')"
    )]
    pub fn new<'py>(
        py: Python<'py>, y: &Bound<'py, PyAny>, x: &Bound<'py, PyAny>, z: Option<&Bound<'py, PyAny>>,
        link: &str, link_phi: &str,
    ) -> PyResult<Self> {
        let y = extract_vector(py, y)?;
        let x = extract_matrix(x)?;
        let z = z.map(extract_matrix).transpose()?;
        let mean_link = link_from_name(link)?;
        let precision_link = link_from_name(link_phi)?;
        let inner = BetaModel::new(y, x, z, mean_link, precision_link)?;
        Ok(BetaRegression { inner })
    }

    #[pyo3(
        signature = (
            start_params = None,
            max_iter = None,
            max_fun = None,
            method = None,
            line_searcher = None,
            tol_grad = None,
            tol_cost = None,
            lbfgs_mem = None,
            verbose = None,
            covariance = None,
        ),
        text_signature = "(self, /, start_params=None, max_iter=100000, max_fun=5000, \
                          method='bfgs', line_searcher=None, tol_grad=1e-6, \
                          tol_cost=None, lbfgs_mem=None, verbose=False, covariance='observed')"
    )]
    pub fn fit<'py>(
        &self, py: Python<'py>, start_params: Option<&Bound<'py, PyAny>>, max_iter: Option<usize>,
        max_fun: Option<usize>, method: Option<&str>, line_searcher: Option<&str>,
        tol_grad: Option<f64>, tol_cost: Option<f64>, lbfgs_mem: Option<usize>,
        verbose: Option<bool>, covariance: Option<&str>,
    ) -> PyResult<BetaFit> {
        let opts = extract_fit_options(
            py,
            start_params,
            max_iter,
            max_fun,
            method,
            line_searcher,
            tol_grad,
            tol_cost,
            lbfgs_mem,
            verbose,
            covariance,
        )?;
        let inner = self.inner.fit(&opts)?;
        Ok(BetaFit { inner })
    }

    /// Total log-likelihood at `params` (`-inf` in the degenerate region).
    pub fn loglike<'py>(&self, py: Python<'py>, params: &Bound<'py, PyAny>) -> PyResult<f64> {
        let params = extract_vector(py, params)?;
        Ok(self.inner.loglike(&params)?)
    }

    /// Per-observation log-likelihood at `params`.
    pub fn loglikeobs<'py>(&self, py: Python<'py>, params: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
        let params = extract_vector(py, params)?;
        Ok(self.inner.loglikeobs(&params)?.to_vec())
    }

    /// Score vector at `params`.
    pub fn score<'py>(&self, py: Python<'py>, params: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
        let params = extract_vector(py, params)?;
        Ok(self.inner.score(&params)?.to_vec())
    }

    /// Predicted means; `x_new = None` predicts in-sample.
    #[pyo3(signature = (params, x_new = None))]
    pub fn predict<'py>(
        &self, py: Python<'py>, params: &Bound<'py, PyAny>, x_new: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Vec<f64>> {
        let params = extract_vector(py, params)?;
        let mu = match x_new {
            Some(raw) => self.inner.predict_mean(&params, &extract_matrix(raw)?)?,
            None => self.inner.mean(&params)?,
        };
        Ok(mu.to_vec())
    }

    /// Predicted precisions; `z_new = None` predicts in-sample.
    #[pyo3(signature = (params, z_new = None))]
    pub fn predict_precision<'py>(
        &self, py: Python<'py>, params: &Bound<'py, PyAny>, z_new: Option<&Bound<'py, PyAny>>,
    ) -> PyResult<Vec<f64>> {
        let params = extract_vector(py, params)?;
        let phi = match z_new {
            Some(raw) => self.inner.predict_precision(&params, &extract_matrix(raw)?)?,
            None => self.inner.precision(&params)?,
        };
        Ok(phi.to_vec())
    }

    /// Seeded starting vector used when `fit` gets no `start_params`.
    pub fn start_params(&self) -> Vec<f64> {
        self.inner.start_params().to_vec()
    }

    #[getter]
    pub fn nobs(&self) -> usize {
        self.inner.nobs()
    }

    #[getter]
    pub fn k_mean(&self) -> usize {
        self.inner.k_mean()
    }

    #[getter]
    pub fn k_precision(&self) -> usize {
        self.inner.k_precision()
    }
}

/// BetaFit — read-only view of a fitted Beta regression.
///
/// Inference accessors (`bse`, `zvalues`, `pvalues`, `cov_params`) return
/// `None` when the covariance could not be formed; `inference_error` then
/// holds the reason.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_betareg.beta_regression")]
pub struct BetaFit {
    pub inner: BetaResults,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl BetaFit {
    #[getter]
    pub fn params(&self) -> Vec<f64> {
        self.inner.params.to_vec()
    }

    #[getter]
    pub fn mean_params(&self) -> Vec<f64> {
        self.inner.mean_params().to_vec()
    }

    #[getter]
    pub fn precision_params(&self) -> Vec<f64> {
        self.inner.precision_params().to_vec()
    }

    #[getter]
    pub fn bse(&self) -> Option<Vec<f64>> {
        self.inner.bse().map(|v| v.to_vec())
    }

    #[getter]
    pub fn zvalues(&self) -> Option<Vec<f64>> {
        self.inner.zvalues().map(|v| v.to_vec())
    }

    #[getter]
    pub fn pvalues(&self) -> Option<Vec<f64>> {
        self.inner.pvalues().map(|v| v.to_vec())
    }

    #[getter]
    pub fn cov_params(&self) -> Option<Vec<Vec<f64>>> {
        self.inner.cov_params().map(|cov| cov.outer_iter().map(|row| row.to_vec()).collect())
    }

    #[getter]
    pub fn inference_error(&self) -> Option<String> {
        self.inner.inference_error().map(|e| e.to_string())
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn grad_norm(&self) -> Option<f64> {
        self.inner.grad_norm
    }

    #[getter]
    pub fn fn_evals(&self) -> Vec<(String, u64)> {
        self.inner.fn_evals.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[getter]
    pub fn llf(&self) -> f64 {
        self.inner.llf
    }

    #[getter]
    pub fn aic(&self) -> f64 {
        self.inner.aic
    }

    #[getter]
    pub fn bic(&self) -> f64 {
        self.inner.bic
    }

    #[getter]
    pub fn nobs(&self) -> usize {
        self.inner.nobs
    }

    #[getter]
    pub fn df_model(&self) -> f64 {
        self.inner.df_model
    }

    #[getter]
    pub fn df_resid(&self) -> f64 {
        self.inner.df_resid
    }
}

/// _rust_betareg — PyO3 module initializer for the Python extension.
///
/// Creates the `beta_regression` submodule, attaches it to the parent
/// module and registers it in `sys.modules` so that
/// `rust_betareg.beta_regression` is importable by dotted path.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_betareg<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let beta_regression_mod = PyModule::new(_py, "beta_regression")?;
    beta_regression(_py, m, &beta_regression_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_betareg.beta_regression", beta_regression_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn beta_regression<'py>(
    _py: Python, rust_betareg: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<BetaRegression>()?;
    m.add_class::<BetaFit>()?;
    rust_betareg.add_submodule(m)?;
    Ok(())
}
