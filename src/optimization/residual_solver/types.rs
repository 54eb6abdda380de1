//! residual_solver::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types, solver aliases and default constants used
//! by the scalar residual solvers. The rest of the solver code stays
//! agnostic to `ndarray` and Argmin generics by importing from here.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for the latent parameter vector, its slope
//!   and scalar costs (`Theta`, `Grad`, `Cost`).
//! - Provide the Argmin state alias shared by both strategies
//!   ([`SolverState`]) and the Nelder–Mead alias ([`NelderMeadSolver`]).
//! - Collect default tolerances and iteration caps.
//!
//! Invariants & assumptions
//! ------------------------
//! - The latent variable `h` is scalar; `Theta` and `Grad` always have
//!   length 1 when produced by this crate.
//! - `Cost` is always a non-negative `|residual|` inside Argmin; signed
//!   residuals only appear at the `Operator` seam.
//!
//! Testing notes
//! -------------
//! - Type aliases and constants only; exercised by the surrounding solver
//!   modules.
use argmin::{core::IterState, solver::neldermead::NelderMead};
use ndarray::Array1;
use std::collections::HashMap;

/// Parameter vector `θ = (h)` holding the latent distance.
pub type Theta = Array1<f64>;

/// Slope `∂r/∂h` of the residual, shaped like [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar value seen by Argmin (`|r(h)|` for costs, `r(h)` for operators).
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
pub type FnEvalMap = HashMap<String, u64>;

/// Argmin iteration state used by both residual strategies.
pub type SolverState = IterState<Theta, (), (), (), (), Cost>;

/// Nelder–Mead simplex specialized to this crate's numeric types.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;

/// Default iteration cap per solve.
pub const DEFAULT_MAX_ITER: usize = 200;

/// Default `|r(h)|` level accepted as a root.
pub const DEFAULT_TOL_RESIDUAL: f64 = 1e-10;

/// Default relative step below which the root finder stops moving.
pub const DEFAULT_TOL_STEP: f64 = 1.49012e-8;

/// Default standard deviation of simplex costs accepted as converged.
pub const DEFAULT_TOL_SD: f64 = 1e-12;

/// Step halvings tried per Newton iteration before giving up.
pub const MAX_HALVINGS: usize = 30;

/// Relative offset of the second simplex vertex.
pub const SIMPLEX_REL_STEP: f64 = 0.05;

/// Absolute offset of the second simplex vertex when `h0 == 0`.
pub const SIMPLEX_ZERO_STEP: f64 = 0.00025;
