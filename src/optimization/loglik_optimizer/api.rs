//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! This selects a BFGS or L-BFGS solver with one of three line searches,
//! wraps the model in an `ArgMinAdapter` (which *minimizes* `-ℓ(θ)`), and
//! delegates the run to `run_bfgs` / `run_lbfgs`.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{backtracking, build_bfgs, build_lbfgs, hager_zhang, more_thuente},
        run::{run_bfgs, run_lbfgs},
        traits::{LineSearcher, LogLikelihood, MLEOptions, Method},
    },
};

/// Maximize a log-likelihood `ℓ(θ)` with a quasi-Newton method.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes a *minimization*
///   problem `c(θ) = -ℓ(θ)` to `argmin`.
/// - Builds BFGS or L-BFGS (`opts.method`) over the line search selected by
///   `opts.line_searcher`.
/// - Runs it under the iteration cap (`opts.tols.max_iter`) and the
///   evaluation cap (`opts.max_fun`) and returns an `OptimOutcome`.
///
/// # Parameters
/// - `f`: Your model implementing [`LogLikelihood`].
/// - `theta0`: Initial parameter vector.
/// - `data`: Model data passed through to `value`/`grad`.
/// - `opts`: Optimizer options.
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - Propagates builder errors (invalid tolerances rejected by argmin).
/// - Propagates runtime errors from the runner (e.g., line search failures).
///
/// Exhausting a budget is **not** an error: the outcome is returned with
/// `converged == false`.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_betareg::optimization::errors::OptResult;
/// use rust_betareg::optimization::loglik_optimizer::{
///     maximize, LogLikelihood, MLEOptions, Theta,
/// };
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, array![0.1, -0.2, 0.3], &(), &MLEOptions::default())?;
/// println!("θ̂ = {:?}", out.theta_hat);
/// # Ok::<(), rust_betareg::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match (opts.method, opts.line_searcher) {
        (Method::Bfgs, LineSearcher::MoreThuente) => {
            run_bfgs(theta0, opts, problem, build_bfgs(more_thuente(), opts)?)
        }
        (Method::Bfgs, LineSearcher::HagerZhang) => {
            run_bfgs(theta0, opts, problem, build_bfgs(hager_zhang(), opts)?)
        }
        (Method::Bfgs, LineSearcher::Backtracking) => {
            run_bfgs(theta0, opts, problem, build_bfgs(backtracking()?, opts)?)
        }
        (Method::Lbfgs, LineSearcher::MoreThuente) => {
            run_lbfgs(theta0, opts, problem, build_lbfgs(more_thuente(), opts)?)
        }
        (Method::Lbfgs, LineSearcher::HagerZhang) => {
            run_lbfgs(theta0, opts, problem, build_lbfgs(hager_zhang(), opts)?)
        }
        (Method::Lbfgs, LineSearcher::Backtracking) => {
            run_lbfgs(theta0, opts, problem, build_lbfgs(backtracking()?, opts)?)
        }
    }
}
