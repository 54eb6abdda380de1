//! High-level entry points for solving a user-provided `Residual`.
//!
//! - [`find_root`]: damped secant-Newton iteration from a single start.
//! - [`minimize_abs_residual`]: Nelder–Mead over `|r(h)|`.
//!
//! Both wrap the model in an `ArgMinAdapter` and delegate to `run_solver`.
use crate::optimization::{
    errors::{OptError, OptResult},
    residual_solver::{
        adapter::ArgMinAdapter,
        builders::{build_nelder_mead, build_secant_newton, initial_simplex},
        run::run_solver,
        traits::{Residual, SolveReport, Tolerances},
        validation::verify_initial_guess,
    },
};
use argmin::core::CostFunction;
use ndarray::Array1;

/// Find `h` with `r(h) ≈ 0` starting from `h0`.
///
/// # Behavior
/// - Validates `h0`.
/// - Builds a [`SecantNewton`](super::secant::SecantNewton) solver from
///   `tols` and runs it with `max_iter = tols.max_iter`.
/// - The report is converged only if `|r(h_hat)| ≤ tols.tol_residual`.
///
/// # Errors
/// - `OptError::InvalidInitialGuess` for a non-finite `h0`.
/// - Any residual failure raised while solving (e.g. the model rejecting
///   its inputs).
pub fn find_root<F: Residual>(
    f: &F, h0: f64, data: &F::Data, tols: &Tolerances,
) -> OptResult<SolveReport> {
    verify_initial_guess(h0)?;
    let problem = ArgMinAdapter::new(f, data);
    let solver = build_secant_newton(tols)?;
    run_solver(Some(Array1::from_elem(1, h0)), tols, problem, solver)
}

/// Minimize `|r(h)|` with a Nelder–Mead simplex seeded at `h0`.
///
/// # Behavior
/// - Builds a two-vertex simplex around `h0` (see
///   [`initial_simplex`](super::builders::initial_simplex)).
/// - The report is converged only if the simplex spread fell below
///   `tols.tol_sd` before `tols.max_iter` iterations.
///
/// - Every vertex of the initial simplex is evaluated before the run;
///   argmin's Nelder–Mead unwraps vertex costs in its own initialization.
///
/// # Errors
/// - `OptError::InvalidInitialGuess` for a non-finite `h0`.
/// - Any residual failure raised while evaluating vertices.
pub fn minimize_abs_residual<F: Residual>(
    f: &F, h0: f64, data: &F::Data, tols: &Tolerances,
) -> OptResult<SolveReport> {
    let problem = ArgMinAdapter::new(f, data);
    let solver = build_nelder_mead(h0, tols)?;
    for vertex in initial_simplex(h0) {
        problem.cost(&vertex).map_err(OptError::from)?;
    }
    run_solver(None, tols, problem, solver)
}
