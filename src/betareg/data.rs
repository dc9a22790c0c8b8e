//! Validated data container for Beta regression.
//!
//! Purpose
//! -------
//! Hold the response vector and the two design matrices of a Beta
//! regression, validated once at construction so the likelihood can assume
//! clean inputs on every evaluation.
//!
//! Key behaviors
//! -------------
//! - [`BetaData::new`] enforces the data invariants eagerly and reports the
//!   first violation with its location.
//! - A missing precision design becomes a single column of ones (constant
//!   precision shared by all observations).
//!
//! Invariants & assumptions
//! ------------------------
//! - `y` is non-empty and every `y_i` is finite with `0 < y_i < 1`, so
//!   `ln(y_i)` and `ln(1 − y_i)` are always finite.
//! - `x` is `n × k` and `z` is `n × m` with `k, m ≥ 1`, all entries finite.
//! - No intercept is added to `x`; callers include one if they want it.
//!
//! Downstream usage
//! ----------------
//! - `BetaModel` owns one `BetaData` and passes it to the optimizer as the
//!   `LogLikelihood::Data` payload.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, the default precision design, and each
//!   rejection (empty, non-finite, out-of-range, row mismatch, empty design).
use crate::betareg::errors::{BetaError, BetaResult};
use ndarray::{Array1, Array2};

/// Name used for the mean design in error payloads.
pub const MEAN_DESIGN: &str = "X";

/// Name used for the precision design in error payloads.
pub const PRECISION_DESIGN: &str = "Z";

/// `BetaData` — response plus mean and precision designs.
///
/// Fields
/// ------
/// - `y`: `Array1<f64>`, responses strictly inside (0, 1).
/// - `x`: `Array2<f64>`, `n × k` mean design.
/// - `z`: `Array2<f64>`, `n × m` precision design.
/// - `ln_y`, `ln_1m_y`: cached `ln(y)` and `ln(1 − y)`, which every
///   likelihood and score evaluation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct BetaData {
    pub y: Array1<f64>,
    pub x: Array2<f64>,
    pub z: Array2<f64>,
    pub ln_y: Array1<f64>,
    pub ln_1m_y: Array1<f64>,
}

impl BetaData {
    /// Construct validated Beta regression data.
    ///
    /// Parameters
    /// ----------
    /// - `y`: `Array1<f64>`
    ///   Responses; finite and strictly inside (0, 1).
    /// - `x`: `Array2<f64>`
    ///   Mean design, one row per response, at least one column.
    /// - `z`: `Option<Array2<f64>>`
    ///   Precision design; `None` means a single column of ones.
    ///
    /// Returns
    /// -------
    /// `BetaResult<BetaData>`
    ///
    /// Errors
    /// ------
    /// - `BetaError::EmptyData` when `y` is empty.
    /// - `BetaError::NonFiniteResponse` / `BetaError::ResponseOutOfRange`
    ///   for the first invalid response.
    /// - `BetaError::RowMismatch` when `x` or `z` is not row-aligned with `y`.
    /// - `BetaError::EmptyDesign` when `x` or `z` has no columns.
    /// - `BetaError::NonFiniteCovariate` for the first non-finite design entry.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_betareg::betareg::data::BetaData;
    /// let data = BetaData::new(array![0.2, 0.5, 0.7], array![[1.0], [1.0], [1.0]], None).unwrap();
    /// assert_eq!(data.z.ncols(), 1);
    /// ```
    pub fn new(y: Array1<f64>, x: Array2<f64>, z: Option<Array2<f64>>) -> BetaResult<Self> {
        if y.is_empty() {
            return Err(BetaError::EmptyData);
        }
        for (index, &value) in y.iter().enumerate() {
            if !value.is_finite() {
                return Err(BetaError::NonFiniteResponse { index, value });
            }
            if value <= 0.0 || value >= 1.0 {
                return Err(BetaError::ResponseOutOfRange { index, value });
            }
        }

        let n = y.len();
        let z = z.unwrap_or_else(|| Array2::ones((n, 1)));
        validate_design(&x, MEAN_DESIGN, n)?;
        validate_design(&z, PRECISION_DESIGN, n)?;

        let ln_y = y.mapv(f64::ln);
        let ln_1m_y = y.mapv(|v| (-v).ln_1p());
        Ok(BetaData { y, x, z, ln_y, ln_1m_y })
    }

    /// Number of observations `n`.
    pub fn nobs(&self) -> usize {
        self.y.len()
    }

    /// Number of mean coefficients `k`.
    pub fn k_mean(&self) -> usize {
        self.x.ncols()
    }

    /// Number of precision coefficients `m`.
    pub fn k_precision(&self) -> usize {
        self.z.ncols()
    }
}

/// Check shape and finiteness of one design matrix.
pub(crate) fn validate_design(design: &Array2<f64>, matrix: &'static str, n: usize) -> BetaResult<()> {
    if design.nrows() != n {
        return Err(BetaError::RowMismatch { matrix, expected: n, found: design.nrows() });
    }
    if design.ncols() == 0 {
        return Err(BetaError::EmptyDesign { matrix });
    }
    for ((row, col), &value) in design.indexed_iter() {
        if !value.is_finite() {
            return Err(BetaError::NonFiniteCovariate { matrix, row, col, value });
        }
    }
    Ok(())
}
