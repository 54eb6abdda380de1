//! Execution helper that runs an `argmin` solver on a residual problem and
//! returns a crate-friendly [`SolveReport`].
use crate::optimization::{
    errors::OptResult,
    residual_solver::{
        adapter::ArgMinAdapter,
        traits::{Residual, SolveReport, Tolerances},
        types::{SolverState, Theta},
        validation::validate_estimate,
    },
};
use argmin::core::{Executor, Solver, State};

/// Run an `argmin` solver for a scalar residual problem.
///
/// This is the shared runner used by both strategies. It wires up:
/// - the user residual via [`ArgMinAdapter`],
/// - the chosen `Solver` (`SecantNewton` or Nelder–Mead),
/// - the optional starting parameter `theta0` (Nelder–Mead carries its own
///   simplex and passes `None`),
/// - the iteration cap `tols.max_iter`,
///
/// then executes the solver, re-evaluates the signed residual at the best
/// parameter and converts the result into a [`SolveReport`].
///
/// # Errors
/// - Propagates any `argmin` runtime error, including residual failures
///   raised inside the problem, via `From<argmin::core::Error>`.
/// - Propagates validation errors raised while building the report.
pub fn run_solver<'a, F, S>(
    theta0: Option<Theta>, tols: &Tolerances, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<SolveReport>
where
    F: Residual,
    S: Solver<ArgMinAdapter<'a, F>, SolverState>,
{
    let evaluator = ArgMinAdapter::new(problem.f, problem.data);
    let max_iter = tols.max_iter as u64;
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| {
        let state = state.max_iters(max_iter);
        match theta0 {
            Some(theta) => state.param(theta),
            None => state,
        }
    });

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let theta_hat = result.take_best_param();
    let h_hat = validate_estimate(theta_hat.clone())?;
    let residual = evaluator.residual_at(h_hat)?;
    SolveReport::new(theta_hat, residual, termination, iterations, function_counts)
}
