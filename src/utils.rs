#[cfg(feature = "python-bindings")]
use ndarray::{Array1, Array2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    betareg::{
        errors::BetaError,
        options::{BetaFitOptions, CovarianceType},
    },
    optimization::loglik_optimizer::{LineSearcher, Method},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
    PyReadonlyArray2,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Copy a 1-D array-like into an owned `Array1<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_vector<'py>(py: Python<'py>, raw_data: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    let arr = extract_f64_array(py, raw_data)?;
    Ok(arr.as_array().to_owned())
}

/// Copy a 2-D array-like (ndarray, DataFrame, or list of rows) into an
/// owned `Array2<f64>`.
#[cfg(feature = "python-bindings")]
pub fn extract_matrix<'py>(raw_data: &Bound<'py, PyAny>) -> PyResult<Array2<f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (), None) {
        if let Ok(frame_ro) = obj.extract::<PyReadonlyArray2<f64>>() {
            return Ok(frame_ro.as_array().to_owned());
        }
    }

    let rows: Vec<Vec<f64>> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 2-D numpy.ndarray, pandas.DataFrame, or sequence of float64 rows",
        )
    })?;
    let ncols = rows.first().map_or(0, Vec::len);
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(PyValueError::new_err("design matrix rows must all have the same length"));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((flat.len() / ncols.max(1), ncols), flat)
        .map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Build `BetaFitOptions` from optional Python keyword arguments; `None`
/// keeps the documented default.
#[cfg(feature = "python-bindings")]
pub fn extract_fit_options<'py>(
    py: Python<'py>, start_params: Option<&Bound<'py, PyAny>>, max_iter: Option<usize>,
    max_fun: Option<usize>, method: Option<&str>, line_searcher: Option<&str>,
    tol_grad: Option<f64>, tol_cost: Option<f64>, lbfgs_mem: Option<usize>, verbose: Option<bool>,
    covariance: Option<&str>,
) -> PyResult<BetaFitOptions> {
    use std::str::FromStr;

    let defaults = BetaFitOptions::default();
    let start_params = start_params.map(|s| extract_vector(py, s)).transpose()?;

    // Selector parse errors are OptError -> BetaError -> PyErr
    let method = match method {
        Some(name) => Method::from_str(name).map_err(BetaError::from)?,
        None => defaults.method,
    };
    let line_searcher =
        line_searcher.map(LineSearcher::from_str).transpose().map_err(BetaError::from)?;
    let covariance = match covariance {
        Some(name) => CovarianceType::from_str(name)?,
        None => defaults.covariance,
    };

    Ok(BetaFitOptions {
        start_params,
        max_iter: max_iter.unwrap_or(defaults.max_iter),
        max_fun: max_fun.unwrap_or(defaults.max_fun),
        method,
        line_searcher,
        tol_grad: tol_grad.or(defaults.tol_grad),
        tol_cost,
        lbfgs_mem,
        verbose: verbose.unwrap_or(defaults.verbose),
        covariance,
    })
}
