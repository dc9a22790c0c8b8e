//! loglik_optimizer::budget — evaluation cap and line-search breakdown guard.
//!
//! Purpose
//! -------
//! Argmin's executor bounds iterations but not objective evaluations, and a
//! single quasi-Newton iteration may evaluate the cost many times inside its
//! line search. [`EvalBudget`] wraps any solver and stops the run once the
//! executor's `cost_count` counter reaches the configured cap.
//!
//! Key behaviors
//! -------------
//! - Delegates `init`, `next_iter` and the inner solver's own stopping rule
//!   unchanged; the wrapped solver keeps all of its state.
//! - The inner stopping rule is consulted first, so a run that converges on
//!   the same iteration the budget runs out is still reported as converged.
//! - Budget exhaustion terminates with `TerminationReason::SolverExit`, which
//!   `OptimOutcome` reports as *not converged*.
//! - A line search that gives up inside an iteration (argmin reports
//!   `ConditionViolated`, e.g. More–Thuente meeting a `+∞` trial cost in the
//!   degenerate-precision region) ends the run with `SolverExit` at the last
//!   accepted iterate instead of failing the whole run.
//!
//! Invariants & assumptions
//! ------------------------
//! - The executor refreshes function counters after each iteration and
//!   before consulting the stopping rule, so the check sees current counts.
//! - The cap is checked between iterations; the final count can exceed it by
//!   the evaluations of one line search.
//! - Errors raised by the model itself (`OptError` values travelling through
//!   argmin) are not line-search breakdowns and still propagate.
use crate::optimization::loglik_optimizer::types::COST_COUNT_KEY;
use argmin::core::{
    ArgminError, Error, KV, Problem, Solver, State, TerminationReason, TerminationStatus,
};

/// Solver wrapper enforcing an optional cap on cost evaluations.
#[derive(Debug, Clone)]
pub struct EvalBudget<S> {
    inner: S,
    max_fun: Option<u64>,
}

impl<S> EvalBudget<S> {
    /// Wrap `inner`; `max_fun = None` leaves the run unbounded.
    pub fn new(inner: S, max_fun: Option<usize>) -> Self {
        Self { inner, max_fun: max_fun.map(|m| m as u64) }
    }

    /// Status text reported when the budget is exhausted.
    fn exhausted_message(max_fun: u64) -> String {
        format!("Maximum number of cost function evaluations ({max_fun}) exceeded")
    }
}

/// Text of an argmin `ConditionViolated` error, the way line searches report
/// that they cannot make progress.
fn line_search_breakdown(err: &Error) -> Option<String> {
    match err.downcast_ref::<ArgminError>() {
        Some(ArgminError::ConditionViolated { text }) => Some(text.clone()),
        _ => None,
    }
}

impl<O, I, S> Solver<O, I> for EvalBudget<S>
where
    I: State + Clone,
    S: Solver<O, I>,
{
    const NAME: &'static str = "EvalBudget";

    fn init(&mut self, problem: &mut Problem<O>, state: I) -> Result<(I, Option<KV>), Error> {
        self.inner.init(problem, state)
    }

    fn next_iter(&mut self, problem: &mut Problem<O>, state: I) -> Result<(I, Option<KV>), Error> {
        let last_accepted = state.clone();
        match self.inner.next_iter(problem, state) {
            Ok(step) => Ok(step),
            Err(err) => match line_search_breakdown(&err) {
                Some(text) => {
                    let reason = TerminationReason::SolverExit(format!("Line search failed: {text}"));
                    Ok((last_accepted.terminate_with(reason), None))
                }
                None => Err(err),
            },
        }
    }

    fn terminate(&mut self, state: &I) -> TerminationStatus {
        let inner_status = self.inner.terminate(state);
        if inner_status.terminated() {
            return inner_status;
        }
        if let Some(max_fun) = self.max_fun {
            let used = state.get_func_counts().get(COST_COUNT_KEY).copied().unwrap_or(0);
            if used >= max_fun {
                return TerminationStatus::Terminated(TerminationReason::SolverExit(
                    Self::exhausted_message(max_fun),
                ));
            }
        }
        TerminationStatus::NotTerminated
    }
}
