//! loglik_optimizer::finite_diff — numerical derivatives for the optimizer
//! and for inference.
//!
//! Purpose
//! -------
//! Wrap the `finitediff` crate behind two validated entry points: a cost
//! gradient for models that do not implement an analytic one, and a
//! Jacobian of a gradient map (the observed information when the map is
//! the negative score).
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries a central difference first and falls back to a
//!   forward difference when the central stencil touches a failing or
//!   non-finite evaluation. Near the degenerate-precision boundary one side
//!   of the stencil may be `+∞` while the other is finite.
//! - [`compute_hessian`] applies the same central → forward fallback to the
//!   Jacobian of a gradient map and returns it symmetrized.
//! - [`symmetrize`] averages mirrored off-diagonal pairs in place.
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors raised inside a cost closure are parked in a shared
//!   `RefCell<Option<Error>>` and the closure returns `NaN`; the first parked
//!   error wins and is reported after differencing.
//! - Every returned gradient passes [`validate_grad`] and every returned
//!   matrix passes [`validate_hessian`].
//!
//! Downstream usage
//! ----------------
//! - `adapter` calls [`fd_gradient`] when a `LogLikelihood` reports
//!   `GradientNotImplemented`.
//! - `inference::hessian` calls [`compute_hessian`] on `θ ↦ −score(θ)` and
//!   reuses [`symmetrize`] for sandwich products.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Finite-difference gradient of a scalar cost at `theta`.
///
/// `func` must write any evaluation error into `closure_err` and return
/// `NaN`. The cell is cleared on entry.
///
/// # Errors
/// - The parked error, converted to `OptError`, if the forward pass also
///   failed to evaluate.
/// - `OptError::InvalidGradient` / `OptError::GradientDimMismatch` when the
///   forward-difference gradient is unusable.
///
/// ```rust
/// # use std::cell::RefCell;
/// # use ndarray::array;
/// # use rust_betareg::optimization::loglik_optimizer::finite_diff::fd_gradient;
/// let closure_err = RefCell::new(None);
/// let g = fd_gradient(&array![1.0, -2.0], &|t: &ndarray::Array1<f64>| t.dot(t), &closure_err)?;
/// assert!((g[0] - 2.0).abs() < 1e-5 && (g[1] + 4.0).abs() < 1e-5);
/// # Ok::<(), rust_betareg::optimization::errors::OptError>(())
/// ```
pub fn fd_gradient<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    let dim = theta.len();
    closure_err.replace(None);
    let central = theta.central_diff(func);
    if closure_err.borrow().is_none() && validate_grad(&central, dim).is_ok() {
        return Ok(central);
    }

    closure_err.replace(None);
    let forward = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&forward, dim)?;
    Ok(forward)
}

/// Jacobian of the gradient map `f` at `theta`, symmetrized.
///
/// Central differences are used unless they produce a non-finite entry, in
/// which case forward differences are tried and their validation result is
/// what the caller sees.
///
/// # Errors
/// `OptError::InvalidHessian` or `OptError::HessianDimMismatch` from the
/// forward-difference attempt.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize(&mut hess);
    Ok(hess)
}

/// Replace each off-diagonal pair with its average; the diagonal is kept.
/// `m` must be square.
pub fn symmetrize(m: &mut Hessian) {
    for i in 0..m.nrows() {
        for j in 0..i {
            let avg = 0.5 * (m[[i, j]] + m[[j, i]]);
            m[[i, j]] = avg;
            m[[j, i]] = avg;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptError;
    use argmin::core::ArgminError;
    use ndarray::{Array1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Central differencing on smooth costs and the forward fallback at a
    //   one-sided boundary.
    // - Propagation of errors parked by the cost closure.
    // - Jacobians of gradient maps, including a non-finite map.
    //
    // They intentionally DO NOT cover:
    // - Solver behavior (see `api` and `run`).
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A smooth cost gets an accurate central-difference gradient.
    //
    // Given
    // -----
    // - c(θ) = ln(1 + e^{θ₀}) − θ₀θ₁ + θ₁², a logistic-style cost.
    //
    // Expect
    // ------
    // - The gradient matches (σ(θ₀) − θ₁, −θ₀ + 2θ₁) to 1e-6.
    fn fd_gradient_matches_analytic_gradient_of_logistic_cost() {
        // Arrange
        let theta = array![0.3, -0.7];
        let closure_err = RefCell::new(None);
        let cost = |t: &Theta| (1.0 + t[0].exp()).ln() - t[0] * t[1] + t[1] * t[1];
        let sigma = 1.0 / (1.0 + (-0.3_f64).exp());

        // Act
        let grad = fd_gradient(&theta, &cost, &closure_err).unwrap();

        // Assert
        assert!((grad[0] - (sigma + 0.7)).abs() < 1e-6);
        assert!((grad[1] - (-0.3 - 1.4)).abs() < 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // At a boundary where the cost is `+∞` on the left, the forward stencil
    // is used instead of failing.
    //
    // Given
    // -----
    // - c(θ) = +∞ for θ < 1, (θ − 1)² + 3θ otherwise; evaluated at θ = 1.
    //
    // Expect
    // ------
    // - A finite gradient close to 3.
    fn fd_gradient_falls_back_to_forward_difference_at_boundary() {
        // Arrange
        let theta = array![1.0];
        let closure_err = RefCell::new(None);
        let cost = |t: &Theta| {
            if t[0] < 1.0 { f64::INFINITY } else { (t[0] - 1.0).powi(2) + 3.0 * t[0] }
        };

        // Act
        let grad = fd_gradient(&theta, &cost, &closure_err).unwrap();

        // Assert
        assert!((grad[0] - 3.0).abs() < 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // An error parked by the cost closure is returned, not swallowed.
    //
    // Given
    // -----
    // - A cost that always parks `ArgminError::NotImplemented`.
    //
    // Expect
    // ------
    // - `OptError::NotImplemented` carrying the parked text.
    fn fd_gradient_returns_parked_closure_error() {
        // Arrange
        let theta = array![0.5, 0.5];
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let cost = |_: &Theta| {
            let mut slot = closure_err.borrow_mut();
            if slot.is_none() {
                *slot = Some(ArgminError::NotImplemented { text: "cost".to_string() }.into());
            }
            f64::NAN
        };

        // Act
        let err = fd_gradient(&theta, &cost, &closure_err).unwrap_err();

        // Assert
        assert_eq!(err, OptError::NotImplemented { text: "cost".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // The Jacobian of a non-symmetric linear map is its symmetric part, and a
    // map that is never finite is rejected.
    //
    // Given
    // -----
    // - g(θ) = Aθ with A = [[2, 1], [0, 4]].
    // - A map returning NaN.
    //
    // Expect
    // ------
    // - [[2, 0.5], [0.5, 4]] to 1e-6; `InvalidHessian` for the NaN map.
    fn compute_hessian_symmetrizes_and_rejects_non_finite_maps() {
        // Arrange
        let theta = array![0.2, -0.1];
        let map = |t: &Theta| array![2.0 * t[0] + t[1], 4.0 * t[1]];
        let nan_map = |_: &Theta| Array1::from_elem(2, f64::NAN);

        // Act
        let hess = compute_hessian(&map, &theta).unwrap();
        let bad = compute_hessian(&nan_map, &theta);

        // Assert
        let expected = array![[2.0, 0.5], [0.5, 4.0]];
        assert!(hess.iter().zip(expected.iter()).all(|(a, b)| (a - b).abs() < 1e-6));
        assert!(matches!(bad, Err(OptError::InvalidHessian { .. })));
    }
}
