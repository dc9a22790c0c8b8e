//! Beta regression model — likelihood, score, prediction and fitting.
//!
//! Purpose
//! -------
//! Own the validated data and the two link functions of a Beta regression,
//! evaluate the mean/precision-parameterized Beta log-likelihood and its
//! analytic score, and drive the optimizer to the maximum-likelihood
//! estimate.
//!
//! Key behaviors
//! -------------
//! - `μ_i = g⁻¹(x_iᵀβ)`, `φ_i = h⁻¹(z_iᵀγ)` with `θ = [β; γ]`, `β ∈ ℝᵏ`
//!   and `γ ∈ ℝᵐ`.
//! - `ℓ_i = lnΓ(φ) − lnΓ(μφ) − lnΓ((1−μ)φ) + (μφ−1) ln y + ((1−μ)φ−1) ln(1−y)`
//!   with `lnΓ` from `statrs`, never through `Γ` itself.
//! - Degenerate region: if any `φ_i ≤ PRECISION_EPS` (or is non-finite)
//!   every `ℓ_i` is `−∞`, so the optimizer sees a cost of `+∞` and rejects
//!   the step. No `lnΓ` call is made on such a point.
//! - [`BetaModel::fit`] seeds, maximizes, and hands the outcome to
//!   [`BetaResults`] for inference. The model itself is never mutated.
//!
//! Invariants & assumptions
//! ------------------------
//! - The mean link maps into (0, 1) ([`LinkRange::UnitInterval`]); the
//!   precision link is `Positive` or `Real`. Other pairings are rejected at
//!   construction.
//! - Data invariants are those of [`BetaData`]; in particular `ln y` and
//!   `ln(1 − y)` are finite, so a finite `φ > PRECISION_EPS` always gives a
//!   finite `ℓ_i` up to overflow of `lnΓ` at astronomically large `φ`.
//!
//! Conventions
//! -----------
//! - Parameter order: the `k` mean coefficients in the column order of `X`,
//!   then the `m` precision coefficients in the column order of `Z`.
//! - Scores are on the total (not average) log-likelihood scale.
//!
//! Downstream usage
//! ----------------
//! - Construct with [`BetaModel::new`] or [`BetaModel::with_default_links`],
//!   then call [`BetaModel::fit`] with [`BetaFitOptions`].
//! - `BetaModel` is `Send + Sync` and cheap to clone; separate fits may run
//!   on separate threads.
//!
//! Testing notes
//! -------------
//! - Unit tests check the log-likelihood against `statrs`'s Beta density,
//!   the analytic score against finite differences, the degenerate-region
//!   policy, link validation and prediction shapes. End-to-end fits live in
//!   `tests/`.
use crate::{
    betareg::{
        data::{BetaData, MEAN_DESIGN, PRECISION_DESIGN, validate_design},
        errors::{BetaError, BetaResult},
        options::BetaFitOptions,
        results::BetaResults,
        seed::{IrlsLogit, QuasiBinomialFit, seed_start_params},
    },
    links::{Link, LinkRange, default_mean_link, default_precision_link},
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Cost, Grad, LineSearcher, LogLikelihood, Theta, maximize},
        numerical_stability::PRECISION_EPS,
    },
};
use ndarray::{Array1, Array2, ArrayView1, s};
use statrs::function::gamma::{digamma, ln_gamma};
use std::sync::Arc;

/// BetaModel — Beta regression with a mean link and a precision link.
///
/// Fields
/// ------
/// - `data`: validated [`BetaData`] (`y`, `X`, `Z`).
/// - `mean_link`: link for `μ`, range `UnitInterval`.
/// - `precision_link`: link for `φ`, range `Positive` or `Real`.
#[derive(Debug, Clone)]
pub struct BetaModel {
    data: BetaData,
    mean_link: Arc<dyn Link>,
    precision_link: Arc<dyn Link>,
}

/// Linear predictors and fitted parameters at one `θ`.
struct Fitted {
    eta_mean: Array1<f64>,
    eta_precision: Array1<f64>,
    mu: Array1<f64>,
    phi: Array1<f64>,
}

impl BetaModel {
    /// Construct a model from raw inputs and a link pair.
    ///
    /// Parameters
    /// ----------
    /// - `y`: `Array1<f64>` — responses strictly inside (0, 1).
    /// - `x`: `Array2<f64>` — `n × k` mean design (no intercept is added).
    /// - `z`: `Option<Array2<f64>>` — `n × m` precision design; `None`
    ///   means an intercept-only precision.
    /// - `mean_link`, `precision_link`: `Arc<dyn Link>`.
    ///
    /// Errors
    /// ------
    /// - Every [`BetaData::new`] error.
    /// - `BetaError::InvalidMeanLink` when the mean link does not map into
    ///   (0, 1).
    /// - `BetaError::InvalidPrecisionLink` when the precision link maps into
    ///   (0, 1).
    pub fn new(
        y: Array1<f64>, x: Array2<f64>, z: Option<Array2<f64>>, mean_link: Arc<dyn Link>,
        precision_link: Arc<dyn Link>,
    ) -> BetaResult<Self> {
        if mean_link.range() != LinkRange::UnitInterval {
            return Err(BetaError::InvalidMeanLink { name: mean_link.name() });
        }
        if precision_link.range() == LinkRange::UnitInterval {
            return Err(BetaError::InvalidPrecisionLink { name: precision_link.name() });
        }
        let data = BetaData::new(y, x, z)?;
        Ok(BetaModel { data, mean_link, precision_link })
    }

    /// Construct a model with the logit mean link and log precision link.
    pub fn with_default_links(y: Array1<f64>, x: Array2<f64>, z: Option<Array2<f64>>) -> BetaResult<Self> {
        Self::new(y, x, z, default_mean_link(), default_precision_link())
    }

    pub fn data(&self) -> &BetaData {
        &self.data
    }

    pub fn mean_link(&self) -> &dyn Link {
        self.mean_link.as_ref()
    }

    pub fn precision_link(&self) -> &dyn Link {
        self.precision_link.as_ref()
    }

    pub fn nobs(&self) -> usize {
        self.data.nobs()
    }

    pub fn k_mean(&self) -> usize {
        self.data.k_mean()
    }

    pub fn k_precision(&self) -> usize {
        self.data.k_precision()
    }

    /// Total number of coefficients `k + m`.
    pub fn n_params(&self) -> usize {
        self.k_mean() + self.k_precision()
    }

    /// Split `θ` into its mean block (first `k`) and precision block (last `m`).
    ///
    /// # Errors
    /// `BetaError::ParamLengthMismatch` when `params.len() != k + m`.
    pub fn split_params<'a>(
        &self, params: &'a Array1<f64>,
    ) -> BetaResult<(ArrayView1<'a, f64>, ArrayView1<'a, f64>)> {
        if params.len() != self.n_params() {
            return Err(BetaError::ParamLengthMismatch { expected: self.n_params(), actual: params.len() });
        }
        let k = self.k_mean();
        Ok((params.slice(s![..k]), params.slice(s![k..])))
    }

    /// Fitted means `μ_i`.
    pub fn mean(&self, params: &Array1<f64>) -> BetaResult<Array1<f64>> {
        Ok(self.fitted(params, &self.data)?.mu)
    }

    /// Fitted precisions `φ_i`.
    pub fn precision(&self, params: &Array1<f64>) -> BetaResult<Array1<f64>> {
        Ok(self.fitted(params, &self.data)?.phi)
    }

    /// Per-observation log-likelihood `ℓ_i(θ)`.
    ///
    /// In the degenerate region every entry is `−∞`.
    ///
    /// # Errors
    /// `ParamLengthMismatch` / `NonFiniteParam` for a malformed `θ`.
    pub fn loglikeobs(&self, params: &Array1<f64>) -> BetaResult<Array1<f64>> {
        self.loglikeobs_on(params, &self.data)
    }

    /// Per-observation negative log-likelihood `−ℓ_i(θ)`; `+∞` entries in
    /// the degenerate region.
    pub fn nloglikeobs(&self, params: &Array1<f64>) -> BetaResult<Array1<f64>> {
        Ok(-self.loglikeobs(params)?)
    }

    /// Total log-likelihood `ℓ(θ) = Σ ℓ_i(θ)`; `−∞` in the degenerate region.
    pub fn loglike(&self, params: &Array1<f64>) -> BetaResult<f64> {
        Ok(self.loglikeobs(params)?.sum())
    }

    /// Total negative log-likelihood; `+∞` in the degenerate region.
    pub fn nloglike(&self, params: &Array1<f64>) -> BetaResult<f64> {
        Ok(-self.loglike(params)?)
    }

    /// Analytic score `∇ℓ(θ)` of length `k + m`.
    ///
    /// # Errors
    /// `DegeneratePrecision` in the degenerate region, plus the parameter
    /// checks of [`BetaModel::loglikeobs`].
    pub fn score(&self, params: &Array1<f64>) -> BetaResult<Array1<f64>> {
        Ok(self.score_obs_on(params, &self.data)?.sum_axis(ndarray::Axis(0)))
    }

    /// Per-observation scores, an `n × (k + m)` matrix whose column sums
    /// are [`BetaModel::score`].
    ///
    /// With `y* = ln y − ln(1−y)` and `μ* = ψ(μφ) − ψ((1−μ)φ)`:
    /// - `∂ℓ_i/∂μ = φ (y* − μ*)`,
    /// - `∂ℓ_i/∂φ = μ (y* − μ*) + ln(1−y) − ψ((1−μ)φ) + ψ(φ)`,
    ///
    /// chained through each link's `inverse_deriv` into `x_i` and `z_i`.
    pub fn score_obs(&self, params: &Array1<f64>) -> BetaResult<Array2<f64>> {
        self.score_obs_on(params, &self.data)
    }

    /// Means for new mean-design rows.
    ///
    /// # Errors
    /// `ColumnMismatch` when `x_new` does not have `k` columns;
    /// `NonFiniteCovariate` for a non-finite entry.
    pub fn predict_mean(&self, params: &Array1<f64>, x_new: &Array2<f64>) -> BetaResult<Array1<f64>> {
        let (beta, _) = self.split_params(params)?;
        check_new_design(x_new, MEAN_DESIGN, self.k_mean())?;
        Ok(x_new.dot(&beta).mapv(|eta| self.mean_link.inverse(eta)))
    }

    /// Precisions for new precision-design rows.
    ///
    /// # Errors
    /// `ColumnMismatch` when `z_new` does not have `m` columns;
    /// `NonFiniteCovariate` for a non-finite entry.
    pub fn predict_precision(&self, params: &Array1<f64>, z_new: &Array2<f64>) -> BetaResult<Array1<f64>> {
        let (_, gamma) = self.split_params(params)?;
        check_new_design(z_new, PRECISION_DESIGN, self.k_precision())?;
        Ok(z_new.dot(&gamma).mapv(|eta| self.precision_link.inverse(eta)))
    }

    /// Seeded starting vector using the default [`IrlsLogit`] fit.
    pub fn start_params(&self) -> Array1<f64> {
        self.start_params_with(&IrlsLogit::default())
    }

    /// Seeded starting vector using a caller-supplied logistic fitter.
    ///
    /// The mean block comes from `fitter` (or zeros if it fails); each
    /// precision coefficient starts at `0.5`.
    pub fn start_params_with<Q: QuasiBinomialFit + ?Sized>(&self, fitter: &Q) -> Array1<f64> {
        seed_start_params(&self.data.y, &self.data.x, self.k_precision(), fitter)
    }

    /// Line search used when [`BetaFitOptions::line_searcher`] is `None`.
    ///
    /// More–Thuente interpolates between trial costs and cannot continue
    /// from an infinite one, which a real-valued precision link produces
    /// whenever a step drives some `φ_i` to zero or below. Backtracking only
    /// shrinks such a step, so it is chosen for [`LinkRange::Real`].
    pub fn default_line_searcher(&self) -> LineSearcher {
        match self.precision_link.range() {
            LinkRange::Real => LineSearcher::Backtracking,
            _ => LineSearcher::MoreThuente,
        }
    }

    /// Fit by maximum likelihood.
    ///
    /// Parameters
    /// ----------
    /// - `opts`: [`BetaFitOptions`]. `start_params = None` seeds via
    ///   [`BetaModel::start_params`]; `line_searcher = None` uses
    ///   [`BetaModel::default_line_searcher`].
    ///
    /// Returns
    /// -------
    /// [`BetaResults`]. Budget exhaustion is not an error: the result
    /// carries `converged = false` and the best point found. Inference
    /// failures (singular information) leave the estimates intact and are
    /// reported through `BetaResults::inference_error`.
    ///
    /// Errors
    /// ------
    /// - `ParamLengthMismatch` / `NonFiniteParam` / `DegeneratePrecision`
    ///   for an unusable starting vector.
    /// - `Optimization` for invalid options or a solver failure.
    pub fn fit(&self, opts: &BetaFitOptions) -> BetaResult<BetaResults> {
        let mle_opts = opts.to_mle_options(self.default_line_searcher())?;
        let theta0 = match &opts.start_params {
            Some(start) => start.clone(),
            None => self.start_params(),
        };
        let outcome = maximize(self, theta0, &self.data, &mle_opts)?;
        Ok(BetaResults::from_outcome(self, outcome, opts.covariance))
    }

    // ---- Evaluation on an explicit data payload ----

    fn fitted(&self, params: &Array1<f64>, data: &BetaData) -> BetaResult<Fitted> {
        let (beta, gamma) = self.split_params(params)?;
        if let Some((index, &value)) = params.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(BetaError::NonFiniteParam { index, value });
        }
        let eta_mean = data.x.dot(&beta);
        let eta_precision = data.z.dot(&gamma);
        let mu = eta_mean.mapv(|eta| self.mean_link.inverse(eta));
        let phi = eta_precision.mapv(|eta| self.precision_link.inverse(eta));
        Ok(Fitted { eta_mean, eta_precision, mu, phi })
    }

    fn loglikeobs_on(&self, params: &Array1<f64>, data: &BetaData) -> BetaResult<Array1<f64>> {
        let fitted = self.fitted(params, data)?;
        if first_degenerate(&fitted.phi).is_some() {
            return Ok(Array1::from_elem(data.nobs(), f64::NEG_INFINITY));
        }

        let ll = ndarray::Zip::from(&fitted.mu)
            .and(&fitted.phi)
            .and(&data.ln_y)
            .and(&data.ln_1m_y)
            .map_collect(|&mu, &phi, &ln_y, &ln_1m_y| {
                let a = mu * phi;
                let b = (1.0 - mu) * phi;
                ln_gamma(phi) - ln_gamma(a) - ln_gamma(b) + (a - 1.0) * ln_y + (b - 1.0) * ln_1m_y
            });
        Ok(ll)
    }

    fn score_obs_on(&self, params: &Array1<f64>, data: &BetaData) -> BetaResult<Array2<f64>> {
        let fitted = self.fitted(params, data)?;
        if let Some((index, value)) = first_degenerate(&fitted.phi) {
            return Err(BetaError::DegeneratePrecision { index, value });
        }

        let (k, m) = (data.k_mean(), data.k_precision());
        let mut scores = Array2::<f64>::zeros((data.nobs(), k + m));
        for (i, mut row) in scores.outer_iter_mut().enumerate() {
            let (mu, phi) = (fitted.mu[i], fitted.phi[i]);
            let a = mu * phi;
            let b = (1.0 - mu) * phi;
            let ystar = data.ln_y[i] - data.ln_1m_y[i];
            let mustar = digamma(a) - digamma(b);

            let d_mu = phi * (ystar - mustar);
            let d_phi = mu * (ystar - mustar) + data.ln_1m_y[i] - digamma(b) + digamma(phi);
            let w_mean = d_mu * self.mean_link.inverse_deriv(fitted.eta_mean[i]);
            let w_precision = d_phi * self.precision_link.inverse_deriv(fitted.eta_precision[i]);

            row.slice_mut(s![..k]).assign(&(&data.x.row(i) * w_mean));
            row.slice_mut(s![k..]).assign(&(&data.z.row(i) * w_precision));
        }
        Ok(scores)
    }
}

impl LogLikelihood for BetaModel {
    type Data = BetaData;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        let total = self.loglikeobs_on(theta, data)?.sum();
        // lnΓ overflow at huge φ gives inf − inf; treat it like the degenerate region.
        if total.is_nan() { Ok(f64::NEG_INFINITY) } else { Ok(total) }
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        let fitted = self.fitted(theta, data)?;
        if let Some((index, value)) = first_degenerate(&fitted.phi) {
            return Err(OptError::DegeneratePrecision { index, value });
        }
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        match self.score_obs_on(theta, data) {
            Ok(scores) => Ok(scores.sum_axis(ndarray::Axis(0))),
            // The cost is +∞ here; a flat gradient lets the line search back off.
            Err(BetaError::DegeneratePrecision { .. }) => Ok(Array1::zeros(theta.len())),
            Err(err) => Err(err.into()),
        }
    }
}

/// First observation whose precision is non-finite or at most `PRECISION_EPS`.
fn first_degenerate(phi: &Array1<f64>) -> Option<(usize, f64)> {
    phi.iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > PRECISION_EPS))
        .map(|(index, &value)| (index, value))
}

fn check_new_design(design: &Array2<f64>, matrix: &'static str, expected: usize) -> BetaResult<()> {
    if design.ncols() != expected {
        return Err(BetaError::ColumnMismatch { matrix, expected, found: design.ncols() });
    }
    validate_design(design, matrix, design.nrows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::{Identity, Probit, Sqrt};
    use ndarray::array;
    use statrs::distribution::{Beta, Continuous};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The log-likelihood against an independent Beta density.
    // - The degenerate-precision policy for every evaluation entry point.
    // - The analytic score against central differences, for several links.
    // - Link validation, parameter splitting and prediction.
    //
    // They intentionally DO NOT cover:
    // - Running the optimizer (see `tests/integration_betareg_pipeline.rs`).
    // -------------------------------------------------------------------------

    fn small_model(precision_link: Arc<dyn Link>) -> BetaModel {
        let y = array![0.12, 0.35, 0.5, 0.61, 0.83, 0.27];
        let x = array![[1.0, -1.0], [1.0, -0.4], [1.0, 0.1], [1.0, 0.5], [1.0, 1.2], [1.0, -0.7]];
        let z = array![[1.0, 0.2], [1.0, 0.9], [1.0, 0.4], [1.0, 0.7], [1.0, 0.1], [1.0, 0.6]];
        BetaModel::new(y, x, Some(z), default_mean_link(), precision_link).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // `loglikeobs` equals the log of the Beta(μφ, (1−μ)φ) density.
    //
    // Given
    // -----
    // - The small model with logit / log links and θ = (0.2, 0.8, 2.0, 0.5).
    //
    // Expect
    // ------
    // - Each ℓ_i within 1e-10 of `statrs::Beta::ln_pdf(y_i)`.
    fn loglikeobs_matches_beta_log_density() {
        // Arrange
        let model = small_model(default_precision_link());
        let params = array![0.2, 0.8, 2.0, 0.5];
        let mu = model.mean(&params).unwrap();
        let phi = model.precision(&params).unwrap();

        // Act
        let ll = model.loglikeobs(&params).unwrap();

        // Assert
        for i in 0..model.nobs() {
            let dist = Beta::new(mu[i] * phi[i], (1.0 - mu[i]) * phi[i]).unwrap();
            let expected = dist.ln_pdf(model.data().y[i]);
            assert!((ll[i] - expected).abs() < 1e-10, "obs {i}: {} vs {expected}", ll[i]);
        }
        assert!((model.loglike(&params).unwrap() - ll.sum()).abs() < 1e-12);
        assert_eq!(model.nloglike(&params).unwrap(), -model.loglike(&params).unwrap());
    }

    #[test]
    // Purpose
    // -------
    // A precision at or below machine epsilon yields ±∞, never NaN.
    //
    // Given
    // -----
    // - The identity precision link with γ = (0, 0) (φ = 0 everywhere) and
    //   γ = (−1, 0) (φ < 0).
    //
    // Expect
    // ------
    // - `nloglikeobs` all `+∞`, `loglike` `−∞`, `score` fails with
    //   `DegeneratePrecision` at index 0, the optimizer gradient is zero.
    fn degenerate_precision_gives_infinite_penalty() {
        // Arrange
        let model = small_model(Arc::new(Identity));
        let zero = array![0.1, 0.3, 0.0, 0.0];
        let negative = array![0.1, 0.3, -1.0, 0.0];

        for params in [&zero, &negative] {
            // Act
            let nll = model.nloglikeobs(params).unwrap();

            // Assert
            assert!(nll.iter().all(|v| *v == f64::INFINITY));
            assert_eq!(model.loglike(params).unwrap(), f64::NEG_INFINITY);
            assert!(matches!(
                model.score(params),
                Err(BetaError::DegeneratePrecision { index: 0, .. })
            ));
            assert_eq!(LogLikelihood::value(&model, params, model.data()).unwrap(), f64::NEG_INFINITY);
            assert_eq!(LogLikelihood::grad(&model, params, model.data()).unwrap(), Array1::zeros(4));
        }
    }

    #[test]
    // Purpose
    // -------
    // The analytic score agrees with central differences of `loglike`.
    //
    // Given
    // -----
    // - Link pairs (logit, log), (probit, sqrt), (cloglog, identity) at a
    //   non-degenerate θ; step h = 1e-6.
    //
    // Expect
    // ------
    // - Relative error below 1e-5 in every coordinate.
    fn score_matches_central_differences() {
        // Arrange
        let cases: Vec<(Arc<dyn Link>, Arc<dyn Link>, Array1<f64>)> = vec![
            (default_mean_link(), default_precision_link(), array![0.2, 0.8, 2.0, 0.5]),
            (Arc::new(Probit), Arc::new(Sqrt), array![-0.1, 0.6, 2.5, 0.4]),
            (Arc::new(crate::links::CLogLog), Arc::new(Identity), array![-0.5, 0.3, 6.0, 2.0]),
        ];
        let h = 1e-6;

        for (mean_link, precision_link, params) in cases {
            let base = small_model(default_precision_link());
            let d = base.data().clone();
            let model = BetaModel::new(d.y, d.x, Some(d.z), mean_link, precision_link).unwrap();

            // Act
            let analytic = model.score(&params).unwrap();

            // Assert
            for j in 0..params.len() {
                let mut up = params.clone();
                let mut down = params.clone();
                up[j] += h;
                down[j] -= h;
                let fd = (model.loglike(&up).unwrap() - model.loglike(&down).unwrap()) / (2.0 * h);
                let tol = 1e-5 * fd.abs().max(1.0);
                assert!((analytic[j] - fd).abs() < tol, "coord {j}: {} vs {fd}", analytic[j]);
            }
            let per_obs = model.score_obs(&params).unwrap();
            assert_eq!(per_obs.dim(), (6, 4));
        }
    }

    #[test]
    // Purpose
    // -------
    // Links that cannot serve their role are rejected at construction.
    //
    // Given
    // -----
    // - Log as the mean link; logit as the precision link.
    //
    // Expect
    // ------
    // - `InvalidMeanLink { "log" }` and `InvalidPrecisionLink { "logit" }`.
    fn new_rejects_links_with_wrong_range() {
        // Arrange
        let y = array![0.2, 0.7];
        let x = array![[1.0], [1.0]];

        // Act / Assert
        assert_eq!(
            BetaModel::new(y.clone(), x.clone(), None, default_precision_link(), default_precision_link())
                .unwrap_err(),
            BetaError::InvalidMeanLink { name: "log" }
        );
        assert_eq!(
            BetaModel::new(y, x, None, default_mean_link(), default_mean_link()).unwrap_err(),
            BetaError::InvalidPrecisionLink { name: "logit" }
        );
    }

    #[test]
    // Purpose
    // -------
    // Parameter splitting and prediction respect the k / m layout.
    //
    // Given
    // -----
    // - The small model (k = 2, m = 2) and new designs with 3 rows.
    //
    // Expect
    // ------
    // - Views of length 2 and 2; predictions of length 3 equal to the link
    //   inverses; wrong lengths or widths are rejected.
    fn split_and_predict_respect_parameter_layout() {
        // Arrange
        let model = small_model(default_precision_link());
        let params = array![0.2, 0.8, 2.0, 0.5];
        let x_new = array![[1.0, 0.0], [1.0, 1.0], [1.0, -1.0]];
        let z_new = array![[1.0, 0.0], [1.0, 1.0], [1.0, 2.0]];

        // Act
        let (beta, gamma) = model.split_params(&params).unwrap();
        let mu = model.predict_mean(&params, &x_new).unwrap();
        let phi = model.predict_precision(&params, &z_new).unwrap();

        // Assert
        assert_eq!(beta, array![0.2, 0.8]);
        assert_eq!(gamma, array![2.0, 0.5]);
        assert_eq!(model.n_params(), 4);
        assert!((mu[1] - default_mean_link().inverse(1.0)).abs() < 1e-15);
        assert!((phi[2] - 3.0f64.exp()).abs() < 1e-12);
        assert_eq!(
            model.split_params(&array![1.0, 2.0, 3.0]).unwrap_err(),
            BetaError::ParamLengthMismatch { expected: 4, actual: 3 }
        );
        assert_eq!(
            model.predict_mean(&params, &Array2::ones((3, 3))).unwrap_err(),
            BetaError::ColumnMismatch { matrix: "X", expected: 2, found: 3 }
        );
        assert!(matches!(
            model.loglike(&array![f64::NAN, 0.0, 0.0, 0.0]),
            Err(BetaError::NonFiniteParam { index: 0, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // The optimizer `check` hook rejects unusable starting vectors.
    //
    // Given
    // -----
    // - A short vector, and an identity-precision start with φ ≤ 0.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch`, then `DegeneratePrecision`.
    fn check_rejects_malformed_and_degenerate_starts() {
        // Arrange
        let model = small_model(Arc::new(Identity));

        // Act / Assert
        assert_eq!(
            LogLikelihood::check(&model, &array![0.0, 0.0], model.data()),
            Err(OptError::ThetaLengthMismatch { expected: 4, actual: 2 })
        );
        assert!(matches!(
            LogLikelihood::check(&model, &array![0.0, 0.0, -1.0, 0.0], model.data()),
            Err(OptError::DegeneratePrecision { index: 0, .. })
        ));
        assert!(LogLikelihood::check(&model, &array![0.0, 0.0, 5.0, 1.0], model.data()).is_ok());
    }

    #[test]
    // Purpose
    // -------
    // The fallback line search follows the precision link's range.
    //
    // Given
    // -----
    // - The same data with log, sqrt and identity precision links.
    //
    // Expect
    // ------
    // - More–Thuente for log and sqrt, Backtracking for identity.
    fn default_line_searcher_backtracks_for_real_valued_precision_link() {
        // Arrange
        let log = small_model(default_precision_link());
        let sqrt = small_model(Arc::new(Sqrt));
        let identity = small_model(Arc::new(Identity));

        // Act / Assert
        assert_eq!(log.default_line_searcher(), LineSearcher::MoreThuente);
        assert_eq!(sqrt.default_line_searcher(), LineSearcher::MoreThuente);
        assert_eq!(identity.default_line_searcher(), LineSearcher::Backtracking);
    }
}
