//! Numerical stability utilities.
//!
//! Provides safe implementations of the logistic transform and its inverse,
//! which are prone to overflow/underflow in naïve form, together with the
//! small tolerances shared by the link, model and inference layers.
//!
//! # Provided items
//! - [`LOGIT_EPS`]: clamp applied to probabilities so they stay strictly
//!   inside (0, 1).
//! - [`PRECISION_EPS`]: precision values at or below this are degenerate.
//! - [`EIGEN_EPS`]: relative floor on eigenvalues of an information matrix.
//! - [`safe_logistic(x)`]: `1 / (1 + exp(-x))` without overflow.
//! - [`safe_logit(p)`]: `ln(p / (1 - p))` on a clamped argument.

/// Distance kept between a probability and the boundaries 0 and 1.
pub const LOGIT_EPS: f64 = f64::EPSILON;

/// Precision threshold for a valid Beta distribution.
///
/// A precision `φ ≤ PRECISION_EPS` makes `lgamma(μφ)` or `lgamma((1−μ)φ)`
/// blow up; such points are treated as infeasible.
pub const PRECISION_EPS: f64 = f64::EPSILON;

/// Relative eigenvalue floor used when inverting information matrices.
///
/// An information matrix whose smallest eigenvalue is below
/// `EIGEN_EPS * max(1, λ_max)` is reported as singular.
pub const EIGEN_EPS: f64 = 1e-10;

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// - For `x >= 0`, evaluates `1 / (1 + exp(-x))`, where `exp(-x) ≤ 1`.
/// - For `x < 0`, evaluates `exp(x) / (1 + exp(x))`, where `exp(x) < 1`.
///
/// Neither branch can overflow, and `σ(0) == 0.5` exactly. Saturation to
/// exactly `0.0` / `1.0` for huge `|x|` is left to the caller to clamp.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Inverse of the logistic function on a clamped argument.
///
/// `p` is first clamped into `[LOGIT_EPS, 1 − LOGIT_EPS]`, so the result is
/// always finite.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    (p / (1.0 - p)).ln()
}
