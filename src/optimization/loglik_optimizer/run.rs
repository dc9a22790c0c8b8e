//! Execution helpers that run an `argmin` solver on a log-likelihood problem and
//! return a crate-friendly [`OptimOutcome`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        budget::EvalBudget,
        types::{BfgsState, Hessian, LbfgsState},
    },
};
use argmin::core::{CostFunction, Executor, Gradient, IterState, Solver, State};
use argmin_math::ArgminL2Norm;

/// Inverse-Hessian slot of an argmin iteration state.
///
/// BFGS keeps a dense approximation (`Hessian`), seeded with the identity and
/// handed back in [`OptimOutcome::inv_hessian`]; L-BFGS has no slot (`()`).
pub trait InvHessianSlot: Clone {
    /// Value placed in the state before the first iteration, if any.
    fn initial(dim: usize) -> Option<Self>;

    /// Final approximation to report.
    fn into_hessian(self) -> Option<Hessian>;
}

impl InvHessianSlot for () {
    fn initial(_dim: usize) -> Option<Self> {
        None
    }

    fn into_hessian(self) -> Option<Hessian> {
        None
    }
}

impl InvHessianSlot for Hessian {
    fn initial(dim: usize) -> Option<Self> {
        Some(Hessian::eye(dim))
    }

    fn into_hessian(self) -> Option<Hessian> {
        Some(self)
    }
}

/// Run an `argmin` quasi-Newton solver for a log-likelihood problem.
///
/// This is the shared runner behind [`run_bfgs`] and [`run_lbfgs`]. It wires up:
/// - the user model via [`ArgMinAdapter`],
/// - the chosen `Solver`, wrapped in an [`EvalBudget`] for `opts.max_fun`,
/// - initial parameter `theta0` and, for BFGS, an identity inverse Hessian,
/// - optional observers (behind the `obs_slog` feature),
/// - optional `max_iters`,
///
/// then executes the solver and converts the result into [`OptimOutcome`].
///
/// # Type Parameters
/// - `F`: the log-likelihood type implementing [`LogLikelihood`].
/// - `S`: any `argmin` solver over `IterState<Theta, Grad, (), H, (), f64>`.
/// - `H`: the state's inverse-Hessian slot, see [`InvHessianSlot`].
///
/// # Verbosity
/// With `opts.verbose`, one line with ℓ(θ₀) and ‖∇ℓ(θ₀)‖ is written to stderr
/// before the run and one status line after it. If the `obs_slog` feature is
/// enabled as well, a terminal slog observer reports every iteration.
///
/// # Errors
/// - Propagates any `argmin` runtime error (observer failures, solver errors,
///   model errors raised inside the cost) via the crate’s
///   `From<argmin::core::Error>` conversion. A line search that gives up is
///   not an error; see [`EvalBudget`].
/// - Propagates any validation errors encountered when constructing
///   [`OptimOutcome`].
pub fn run_solver<'a, F, S, H>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    H: InvHessianSlot,
    S: Solver<ArgMinAdapter<'a, F>, IterState<Theta, Grad, (), H, (), f64>> + Send + 'static,
{
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let init_inv_hessian = H::initial(theta0.len());
    let budgeted = EvalBudget::new(solver, opts.max_fun);
    let mut optimizer = Executor::new(problem, budgeted).configure(|state| {
        let state = state.param(theta0);
        match init_inv_hessian {
            Some(inv) => state.inv_hessian(inv),
            None => state,
        }
    });
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    let inv_hessian = result.take_inv_hessian().and_then(H::into_hessian);
    let outcome = OptimOutcome::new(
        result.take_best_param(),
        -result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
        inv_hessian,
    )?;
    if opts.verbose {
        log_final_state(&outcome);
    }
    Ok(outcome)
}

/// Run L-BFGS (no inverse-Hessian slot); see [`run_solver`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, LbfgsState> + Send + 'static,
{
    run_solver::<F, S, ()>(theta0, opts, problem, solver)
}

/// Run BFGS; the final approximation (inverse Hessian of the **cost** `-ℓ`,
/// i.e. an approximate covariance of θ̂) is returned in
/// [`OptimOutcome::inv_hessian`]. See [`run_solver`].
pub fn run_bfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, BfgsState> + Send + 'static,
{
    run_solver::<F, S, Hessian>(theta0, opts, problem, solver)
}

// ---- Helper Methods ----

fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: ell(theta0) = {:.6}{}",
        ll0,
        g0n.map(|n| format!(", ||grad|| = {:.6}", n)).unwrap_or_default()
    );
    Ok(())
}

fn log_final_state(outcome: &OptimOutcome) {
    eprintln!(
        "done: ell(theta_hat) = {:.6}, iterations = {}, converged = {}, status = {}",
        outcome.value, outcome.iterations, outcome.converged, outcome.status
    );
}
