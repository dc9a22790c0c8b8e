//! links::functions — the `Link` capability and its implementations.
//!
//! Purpose
//! -------
//! Define the stateless transforms between an unconstrained linear
//! predictor `η` and a constrained model parameter: the mean `μ ∈ (0, 1)`
//! or the precision `φ ∈ (0, ∞)` of a Beta regression.
//!
//! Key behaviors
//! -------------
//! - [`Link::inverse`] maps `η ↦ parameter` and is the only transform used
//!   on the likelihood path.
//! - [`Link::forward`] maps `parameter ↦ η`; it converts starting values
//!   given in natural units into linear-predictor units.
//! - [`Link::inverse_deriv`] is `d inverse / d η`, used by the analytic
//!   score.
//! - [`Link::range`] declares the image of `inverse`, which the model uses
//!   to decide where a link may be plugged in.
//!
//! Invariants & assumptions
//! ------------------------
//! - Mean links never return `0` or `1`: results are clamped into
//!   `[LOGIT_EPS, 1 − LOGIT_EPS]` and are finite for any finite `η`,
//!   including `|η|` far beyond `1e6`.
//! - Where that clamp is active `inverse` is flat, so `inverse_deriv` of a
//!   mean link is `0` there, matching the value the likelihood sees.
//! - `Logit::inverse(0.0) == 0.5` and `Log::inverse(0.0) == 1.0` exactly.
//! - `Log::inverse` is floored at `f64::MIN_POSITIVE`, so it is strictly
//!   positive for every finite input.
//! - `Identity` may return any real and `Sqrt` may return `0`; the model
//!   treats such precisions as degenerate.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the exact midpoints, tail behavior, forward/inverse
//!   round trips over several orders of magnitude and derivatives against
//!   central differences.
use crate::optimization::numerical_stability::{LOGIT_EPS, safe_logistic, safe_logit};
use statrs::distribution::{Continuous, ContinuousCDF, Normal};

/// Derivative of a clamped mean link: `deriv` while the unclamped value
/// `mu` lies in `[LOGIT_EPS, 1 − LOGIT_EPS]`, `0` once the clamp takes over.
fn clamped_deriv(mu: f64, deriv: f64) -> f64 {
    if (LOGIT_EPS..=1.0 - LOGIT_EPS).contains(&mu) { deriv } else { 0.0 }
}

/// Image of a link's inverse transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRange {
    /// The open unit interval `(0, 1)`; valid for the mean.
    UnitInterval,
    /// Non-negative reals; valid for the precision.
    Positive,
    /// The whole real line; accepted for the precision under the degenerate
    /// precision guard.
    Real,
}

/// Invertible transform between a linear predictor and a model parameter.
pub trait Link: std::fmt::Debug + Send + Sync {
    /// `η ↦ parameter`.
    fn inverse(&self, eta: f64) -> f64;

    /// `parameter ↦ η`.
    fn forward(&self, value: f64) -> f64;

    /// Derivative of [`Link::inverse`] with respect to `η`.
    fn inverse_deriv(&self, eta: f64) -> f64;

    /// Image of [`Link::inverse`].
    fn range(&self) -> LinkRange;

    /// Lower-case name accepted by [`link_from_name`](super::link_from_name).
    fn name(&self) -> &'static str;
}

/// Logistic mean link, `μ = 1 / (1 + e^{−η})`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Logit;

impl Link for Logit {
    fn inverse(&self, eta: f64) -> f64 {
        safe_logistic(eta).clamp(LOGIT_EPS, 1.0 - LOGIT_EPS)
    }

    fn forward(&self, value: f64) -> f64 {
        safe_logit(value)
    }

    fn inverse_deriv(&self, eta: f64) -> f64 {
        let mu = safe_logistic(eta);
        clamped_deriv(mu, mu * (1.0 - mu))
    }

    fn range(&self) -> LinkRange {
        LinkRange::UnitInterval
    }

    fn name(&self) -> &'static str {
        "logit"
    }
}

/// Probit mean link, `μ = Φ(η)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Probit;

impl Probit {
    fn standard_normal() -> Normal {
        Normal::standard()
    }
}

impl Link for Probit {
    fn inverse(&self, eta: f64) -> f64 {
        Self::standard_normal().cdf(eta).clamp(LOGIT_EPS, 1.0 - LOGIT_EPS)
    }

    fn forward(&self, value: f64) -> f64 {
        Self::standard_normal().inverse_cdf(value.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS))
    }

    fn inverse_deriv(&self, eta: f64) -> f64 {
        let normal = Self::standard_normal();
        clamped_deriv(normal.cdf(eta), normal.pdf(eta))
    }

    fn range(&self) -> LinkRange {
        LinkRange::UnitInterval
    }

    fn name(&self) -> &'static str {
        "probit"
    }
}

/// Complementary log-log mean link, `μ = 1 − exp(−e^η)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CLogLog;

impl Link for CLogLog {
    fn inverse(&self, eta: f64) -> f64 {
        // -expm1(-x) keeps precision for small x = e^η.
        (-(-eta.exp()).exp_m1()).clamp(LOGIT_EPS, 1.0 - LOGIT_EPS)
    }

    fn forward(&self, value: f64) -> f64 {
        let p = value.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
        (-(-p).ln_1p()).ln()
    }

    fn inverse_deriv(&self, eta: f64) -> f64 {
        let d = (eta - eta.exp()).exp();
        let mu = -(-eta.exp()).exp_m1();
        if d.is_finite() { clamped_deriv(mu, d) } else { 0.0 }
    }

    fn range(&self) -> LinkRange {
        LinkRange::UnitInterval
    }

    fn name(&self) -> &'static str {
        "cloglog"
    }
}

/// Log precision link, `φ = e^η`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Log;

impl Link for Log {
    fn inverse(&self, eta: f64) -> f64 {
        eta.exp().max(f64::MIN_POSITIVE)
    }

    fn forward(&self, value: f64) -> f64 {
        value.ln()
    }

    fn inverse_deriv(&self, eta: f64) -> f64 {
        eta.exp()
    }

    fn range(&self) -> LinkRange {
        LinkRange::Positive
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

/// Identity precision link, `φ = η`.
///
/// Meant for precision designs whose linear predictor is already a valid
/// precision. Non-positive values are not transformed; the likelihood
/// reports them as degenerate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Identity;

impl Link for Identity {
    fn inverse(&self, eta: f64) -> f64 {
        eta
    }

    fn forward(&self, value: f64) -> f64 {
        value
    }

    fn inverse_deriv(&self, _eta: f64) -> f64 {
        1.0
    }

    fn range(&self) -> LinkRange {
        LinkRange::Real
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Square-root precision link, `φ = η²`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sqrt;

impl Link for Sqrt {
    fn inverse(&self, eta: f64) -> f64 {
        eta * eta
    }

    fn forward(&self, value: f64) -> f64 {
        value.sqrt()
    }

    fn inverse_deriv(&self, eta: f64) -> f64 {
        2.0 * eta
    }

    fn range(&self) -> LinkRange {
        LinkRange::Positive
    }

    fn name(&self) -> &'static str {
        "sqrt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Exact midpoints and tail behavior of the inverse transforms.
    // - `forward(inverse(z)) ≈ z` across several orders of magnitude.
    // - `inverse_deriv` against central differences.
    //
    // They intentionally DO NOT cover:
    // - Name parsing (see `links::tests`).
    // -------------------------------------------------------------------------

    fn all_links() -> Vec<Box<dyn Link>> {
        vec![
            Box::new(Logit),
            Box::new(Probit),
            Box::new(CLogLog),
            Box::new(Log),
            Box::new(Identity),
            Box::new(Sqrt),
        ]
    }

    #[test]
    // Purpose
    // -------
    // The canonical links hit their documented values at η = 0.
    //
    // Given
    // -----
    // - `Logit`, `Probit`, `Log` and `Identity`.
    //
    // Expect
    // ------
    // - Exactly 0.5, 0.5, 1.0 and 0.0.
    fn inverse_at_zero_is_exact() {
        // Act / Assert
        assert_eq!(Logit.inverse(0.0), 0.5);
        assert_eq!(Probit.inverse(0.0), 0.5);
        assert_eq!(Log.inverse(0.0), 1.0);
        assert_eq!(Identity.inverse(0.0), 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Mean links stay strictly inside (0, 1) and finite for huge |η|.
    //
    // Given
    // -----
    // - η ∈ {±1e6, ±1e300, ±f64::MAX}.
    //
    // Expect
    // ------
    // - 0 < μ < 1 and no NaN / ∞ for every unit-interval link.
    fn mean_links_saturate_without_overflow() {
        // Arrange
        let etas = [-f64::MAX, -1e300, -1e6, 1e6, 1e300, f64::MAX];

        for link in all_links().iter().filter(|l| l.range() == LinkRange::UnitInterval) {
            for &eta in &etas {
                // Act
                let mu = link.inverse(eta);

                // Assert
                assert!(mu.is_finite(), "{} at {eta}", link.name());
                assert!(mu > 0.0 && mu < 1.0, "{} at {eta}: {mu}", link.name());
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The log link is strictly positive for every finite input.
    //
    // Given
    // -----
    // - η ∈ {-1e6, -745, 0, 10}.
    //
    // Expect
    // ------
    // - φ > 0 for each η.
    fn log_link_is_strictly_positive() {
        // Act / Assert
        for eta in [-1e6, -745.0, 0.0, 10.0] {
            assert!(Log.inverse(eta) > 0.0, "eta = {eta}");
        }
    }

    #[test]
    // Purpose
    // -------
    // `forward` undoes `inverse` over several orders of magnitude.
    //
    // Given
    // -----
    // - z ∈ {±1e-4, ±1e-2, ±0.5, ±3} for mean links, plus larger z for the
    //   precision links.
    //
    // Expect
    // ------
    // - Relative (or absolute near zero) error below 1e-8.
    fn forward_inverts_inverse() {
        // Arrange
        let mean_z = [-3.0, -0.5, -1e-2, -1e-4, 1e-4, 1e-2, 0.5, 3.0];
        let precision_z = [1e-4, 1e-2, 0.5, 3.0, 50.0, 300.0];

        // Act / Assert
        for link in all_links() {
            let zs: &[f64] = match link.range() {
                LinkRange::UnitInterval => &mean_z,
                _ => &precision_z,
            };
            for &z in zs {
                let back = link.forward(link.inverse(z));
                let tol = 1e-8 * z.abs().max(1e-4);
                assert!((back - z).abs() <= tol, "{}: z = {z}, back = {back}", link.name());
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Analytic derivatives agree with central differences.
    //
    // Given
    // -----
    // - η ∈ {-2, -0.3, 0.7, 2.5}, step h = 1e-6.
    //
    // Expect
    // ------
    // - Absolute error below 1e-6.
    fn inverse_deriv_matches_central_difference() {
        // Arrange
        let h = 1e-6;

        for link in all_links() {
            for eta in [-2.0, -0.3, 0.7, 2.5] {
                // Act
                let fd = (link.inverse(eta + h) - link.inverse(eta - h)) / (2.0 * h);
                let analytic = link.inverse_deriv(eta);

                // Assert
                assert!((fd - analytic).abs() < 1e-6, "{} at {eta}", link.name());
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Once a mean link's clamp is active, its derivative is zero, so the
    // score agrees with the flat likelihood in the tails.
    //
    // Given
    // -----
    // - η ∈ {−50, −40, 40, 50} for logit, probit and cloglog; every value
    //   saturates `inverse` at LOGIT_EPS or 1 − LOGIT_EPS.
    //
    // Expect
    // ------
    // - `inverse` is at a clamp bound and `inverse_deriv` is exactly 0.
    fn mean_link_deriv_is_zero_where_inverse_is_clamped() {
        // Arrange
        let etas = [-50.0, -40.0, 40.0, 50.0];

        for link in all_links().iter().filter(|l| l.range() == LinkRange::UnitInterval) {
            for eta in etas {
                // Act
                let mu = link.inverse(eta);
                let deriv = link.inverse_deriv(eta);

                // Assert
                assert!(mu == LOGIT_EPS || mu == 1.0 - LOGIT_EPS, "{} at {eta}: {mu}", link.name());
                assert_eq!(deriv, 0.0, "{} at {eta}", link.name());
            }
        }
    }
}
