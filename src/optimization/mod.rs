//! optimization — argmin-backed residual solvers and their error surface.
//!
//! Purpose
//! -------
//! Provide the numerical layer the distance estimator builds on: scalar
//! root finding and absolute-residual minimization (`residual_solver`),
//! plus a single error/result surface (`errors::OptError`, `OptResult<T>`).
//!
//! Conventions
//! -----------
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//! - This module does no I/O and no logging. Reporting of non-convergence
//!   and failures is the job of the distance layer.
//!
//! Testing notes
//! -------------
//! - `residual_solver` submodules test solver wiring on closed-form
//!   residuals; `errors` tests conversions from backend and pricing errors.

pub mod errors;
pub mod residual_solver;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use peg_distance::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::residual_solver::prelude::*;
}
