//! Adapter that exposes a user `LogLikelihood` as an `argmin` problem.
//!
//! We convert a *maximization* of a log-likelihood `ℓ(θ)` into a *minimization*
//! problem by defining the cost as `c(θ) = -ℓ(θ)`. Analytic gradients (if
//! provided by the user) are negated accordingly. If a gradient is not
//! provided, we finite-difference the **cost** closure, so no sign flip is
//! needed in that branch.
//!
//! A log-likelihood of `-∞` marks an infeasible point (for Beta regression, a
//! precision at or below machine epsilon). It is passed to the solver as a
//! cost of `+∞` so the line search rejects the step; every other non-finite
//! value is an error.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    loglik_optimizer::{
        finite_diff::fd_gradient,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::validate_grad,
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Bridges a user `LogLikelihood` to `argmin`'s `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns `-ℓ(θ)` (negative log-likelihood).
/// - `Gradient::gradient` returns:
///   - `-∇ℓ(θ)` if the user provides an analytic gradient, or
///   - a finite-difference gradient of the cost (no sign flip needed).
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = -ℓ(θ)`.
    ///
    /// - `ℓ(θ) = -∞` maps to `c(θ) = +∞`.
    /// - `NaN` and `+∞` are rejected with `NonFiniteCost`.
    ///
    /// # Errors
    /// Propagates any `OptError` from the user’s `value` via `?`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let output = self.f.value(theta, self.data)?;
        if output == f64::NEG_INFINITY {
            return Ok(f64::INFINITY);
        }
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(-output)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// Evaluate the gradient of the cost at `θ`.
    ///
    /// Behavior:
    /// - If the user implements `grad(θ, data)`, we validate it and return `-grad`
    ///   (because the cost is `-ℓ`).
    /// - Otherwise, we finite-difference the **cost** with [`fd_gradient`]
    ///   (central first, forward when the central stencil fails).
    ///
    /// The FD closure must return `f64`, so the first error raised inside it
    /// is parked in `closure_err` and the closure returns `NaN`.
    ///
    /// # Errors
    /// - Propagates user errors from `grad` (non-`GradientNotImplemented`).
    /// - Propagates any error raised by cost evaluations performed during FD.
    /// - Returns validation errors if the gradient has wrong dimension or
    ///   non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, dim)?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let cost_func = |theta: &Theta| -> f64 {
                    match self.cost(theta) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                Ok(fd_gradient(theta, &cost_func, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `LogLikelihood` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::errors::OptResult;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The sign flip between log-likelihood and cost.
    // - The `-∞` → `+∞` mapping for infeasible points.
    // - Analytic versus finite-difference gradients.
    // -------------------------------------------------------------------------

    /// ℓ(θ) = -(θ·θ), infeasible (ℓ = -∞) whenever θ₀ < -10.
    struct Bowl {
        analytic: bool,
    }

    impl LogLikelihood for Bowl {
        type Data = ();

        fn value(&self, theta: &Theta, _: &()) -> OptResult<Cost> {
            if theta[0] < -10.0 {
                return Ok(f64::NEG_INFINITY);
            }
            if theta[0] > 10.0 {
                return Ok(f64::NAN);
            }
            Ok(-theta.dot(theta))
        }

        fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
            Ok(())
        }

        fn grad(&self, theta: &Theta, _: &()) -> OptResult<Grad> {
            if self.analytic {
                Ok(theta.mapv(|t| -2.0 * t))
            } else {
                Err(OptError::GradientNotImplemented)
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // The adapter reports the negated log-likelihood and maps `-∞` to `+∞`.
    //
    // Given
    // -----
    // - A feasible point, an infeasible point, and a point where ℓ is NaN.
    //
    // Expect
    // ------
    // - Cost `θ·θ`, cost `+∞`, and a `NonFiniteCost` error respectively.
    fn cost_flips_sign_and_maps_negative_infinity() {
        // Arrange
        let model = Bowl { analytic: true };
        let adapter = ArgMinAdapter::new(&model, &());

        // Act
        let feasible = adapter.cost(&array![1.0, 2.0]).unwrap();
        let infeasible = adapter.cost(&array![-20.0, 0.0]).unwrap();
        let nan = adapter.cost(&array![20.0, 0.0]);

        // Assert
        assert_eq!(feasible, 5.0);
        assert_eq!(infeasible, f64::INFINITY);
        let err = OptError::from(nan.unwrap_err());
        assert!(matches!(err, OptError::NonFiniteCost { .. }));
    }

    #[test]
    // Purpose
    // -------
    // Analytic and finite-difference gradients of the cost agree.
    //
    // Given
    // -----
    // - The same bowl with and without an analytic gradient.
    //
    // Expect
    // ------
    // - Both equal `2θ` within FD accuracy.
    fn gradient_analytic_and_fd_agree() {
        // Arrange
        let theta = array![0.5, -1.5];
        let analytic = Bowl { analytic: true };
        let numeric = Bowl { analytic: false };

        // Act
        let g_a = ArgMinAdapter::new(&analytic, &()).gradient(&theta).unwrap();
        let g_n = ArgMinAdapter::new(&numeric, &()).gradient(&theta).unwrap();

        // Assert
        for i in 0..2 {
            assert!((g_a[i] - 2.0 * theta[i]).abs() < 1e-12);
            assert!((g_n[i] - 2.0 * theta[i]).abs() < 1e-5);
        }
    }
}
