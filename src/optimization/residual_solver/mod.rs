//! residual_solver — scalar root finding on top of `argmin`.
//!
//! Purpose
//! -------
//! Solve one-dimensional equations `r(h) = 0` for a caller-supplied
//! residual, either by a damped finite-difference Newton iteration from a
//! single start ([`find_root`]) or by a derivative-free Nelder–Mead search
//! over `|r(h)|` ([`minimize_abs_residual`]). Both run under `argmin`'s
//! `Executor` and return a [`SolveReport`].
//!
//! Key behaviors
//! -------------
//! - Callers implement [`Residual`] on a model type with a `Data` payload
//!   holding the per-call quantities; the solver never captures state.
//! - [`adapter::ArgMinAdapter`] exposes the residual as an `Operator`
//!   (signed value), `Jacobian` (finite-difference slope) and
//!   `CostFunction` (absolute value).
//! - Every run carries an iteration cap, so each solve terminates.
//! - Convergence is reported only when the underlying solver terminates
//!   with `SolverConverged`; all other exits carry the solver's message.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters are 1-vectors (`Theta`) holding the scalar `h`.
//! - Residuals must be finite; non-finite values abort the solve with an
//!   `OptError`, which the caller is expected to turn into a per-call
//!   failure rather than a crash.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover:
//!   - slope and cost plumbing in [`adapter`],
//!   - convergence, exit messages and caps in [`secant`],
//!   - simplex construction in [`builders`],
//!   - tolerance validation and report mapping in [`traits`] and
//!     [`validation`],
//!   - end-to-end runs in [`api`].

pub mod adapter;
pub mod api;
pub mod builders;
pub mod run;
pub mod secant;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::{find_root, minimize_abs_residual};
pub use self::secant::SecantNewton;
pub use self::traits::{Residual, SolveReport, Tolerances};
pub use self::types::{Cost, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::{find_root, minimize_abs_residual};
    pub use super::traits::{Residual, SolveReport, Tolerances};
    pub use super::types::{Cost, Theta};
}
