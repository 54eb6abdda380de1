//! residual_solver::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for the two residual strategies. These
//! helpers hide Argmin's generic wiring and apply crate-level
//! [`Tolerances`] so higher-level code can request a configured solver
//! without touching Argmin-specific types.
//!
//! Key behaviors
//! -------------
//! - Construct a [`SecantNewton`] root finder with the residual and step
//!   tolerances.
//! - Construct a Nelder–Mead simplex around a starting point, with the
//!   spread tolerance applied.
//! - Leave the starting parameter and `max_iters` of the root finder to the
//!   runner, keeping these builders side-effect free.
//!
//! Invariants & assumptions
//! ------------------------
//! - The initial simplex for a scalar problem has two vertices:
//!   `h0` and `h0·(1 + SIMPLEX_REL_STEP)`, or `SIMPLEX_ZERO_STEP` when
//!   `h0 == 0`.
//! - Invalid tolerances are surfaced as [`OptError`](crate::optimization::errors::OptError)
//!   via the crate's `From<Error>` implementation.
use argmin::solver::neldermead::NelderMead;
use ndarray::Array1;

use crate::optimization::{
    errors::OptResult,
    residual_solver::{
        secant::SecantNewton,
        traits::Tolerances,
        types::{NelderMeadSolver, SIMPLEX_REL_STEP, SIMPLEX_ZERO_STEP, Theta},
        validation::verify_initial_guess,
    },
};

/// build_secant_newton — construct the direct-strategy root finder.
///
/// # Errors
/// Propagates tolerance validation failures from [`SecantNewton::new`].
pub fn build_secant_newton(tols: &Tolerances) -> OptResult<SecantNewton> {
    SecantNewton::new(tols.tol_residual, tols.tol_step)
}

/// build_nelder_mead — construct the global-search simplex around `h0`.
///
/// Parameters
/// ----------
/// - `h0`: `f64`
///   Starting point; must be finite.
/// - `tols`: `&Tolerances`
///   Only `tol_sd` is consulted here; `max_iter` is applied by the runner.
///
/// Returns
/// -------
/// `OptResult<NelderMeadSolver>`
///   A Nelder–Mead instance over [`initial_simplex`]`(h0)`.
///
/// Errors
/// ------
/// - `OptError::InvalidInitialGuess` if `h0` is non-finite.
/// - `OptError` (via `From<argmin::core::Error>`) if Argmin rejects the
///   spread tolerance.
pub fn build_nelder_mead(h0: f64, tols: &Tolerances) -> OptResult<NelderMeadSolver> {
    verify_initial_guess(h0)?;
    let solver = NelderMead::new(initial_simplex(h0)).with_sd_tolerance(tols.tol_sd)?;
    Ok(solver)
}

/// Two-vertex starting simplex for a scalar problem.
pub fn initial_simplex(h0: f64) -> Vec<Theta> {
    let second = if h0 == 0.0 { SIMPLEX_ZERO_STEP } else { h0 * (1.0 + SIMPLEX_REL_STEP) };
    vec![Array1::from_elem(1, h0), Array1::from_elem(1, second)]
}
