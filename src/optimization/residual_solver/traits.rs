//! Public API surface for scalar residual solving.
//!
//! - [`Residual`]: trait users implement for their pricing equation.
//! - [`Tolerances`]: stopping rules shared by both strategies.
//! - [`SolveReport`]: normalized result returned by `find_root` and
//!   `minimize_abs_residual`.
//!
//! Convention: a residual `r(h)` is signed. The root finder drives `r(h)`
//! to zero; the simplex minimizes the cost `c(h) = |r(h)|`. Either way the
//! reported `residual` is the signed value at the returned `h`.
use crate::optimization::{
    errors::OptResult,
    residual_solver::{
        types::{
            Cost, DEFAULT_MAX_ITER, DEFAULT_TOL_RESIDUAL, DEFAULT_TOL_SD, DEFAULT_TOL_STEP,
            FnEvalMap, Theta,
        },
        validation::{
            validate_estimate, validate_residual, verify_max_iter, verify_tol_residual,
            verify_tol_sd, verify_tol_step,
        },
    },
};
use argmin::core::{TerminationReason, TerminationStatus};

/// User-implemented scalar residual interface.
///
/// - `type Data`: per-call quantities (observed price, volatility, ...) bound
///   explicitly for each evaluation instead of being captured.
///
/// Required:
/// - `value(h, &Data) -> OptResult<Cost>`: evaluate the signed residual
///   `r(h)`. Return a descriptive `OptError` for inputs the model cannot
///   price; never panic.
pub trait Residual {
    type Data;

    fn value(&self, h: f64, data: &Self::Data) -> OptResult<Cost>;
}

/// Numerical tolerances and iteration limits used by the residual solvers.
///
/// - `tol_residual`: root finder stops once `|r(h)|` falls below this.
/// - `tol_step`: root finder gives up once its relative step falls below
///   this without meeting `tol_residual`.
/// - `tol_sd`: simplex stops once the standard deviation of its vertex
///   costs falls below this.
/// - `max_iter`: hard cap on iterations for either strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_residual: f64,
    pub tol_step: f64,
    pub tol_sd: f64,
    pub max_iter: usize,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - All tolerances must be **finite and strictly positive**.
    /// - `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::InvalidTolResidual`](crate::optimization::errors::OptError::InvalidTolResidual),
    ///   `InvalidTolStep`, `InvalidTolSd` for bad tolerances.
    /// - `InvalidMaxIter` if `max_iter == 0`.
    pub fn new(tol_residual: f64, tol_step: f64, tol_sd: f64, max_iter: usize) -> OptResult<Self> {
        verify_tol_residual(tol_residual)?;
        verify_tol_step(tol_step)?;
        verify_tol_sd(tol_sd)?;
        verify_max_iter(max_iter)?;
        Ok(Self { tol_residual, tol_step, tol_sd, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            tol_residual: DEFAULT_TOL_RESIDUAL,
            tol_step: DEFAULT_TOL_STEP,
            tol_sd: DEFAULT_TOL_SD,
            max_iter: DEFAULT_MAX_ITER,
        }
    }
}

/// Canonical result returned by the residual solvers.
///
/// - `h_hat`: best latent value found.
/// - `residual`: signed residual `r(h_hat)`.
/// - `converged`: `true` only if the solver reported `SolverConverged`.
/// - `status`: the solver's own diagnostic (termination reason or exit
///   message).
/// - `iterations`: number of solver iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveReport {
    pub h_hat: f64,
    pub residual: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl SolveReport {
    /// Build a validated [`SolveReport`] from raw solver state.
    ///
    /// Performs:
    /// - best-parameter check via `validate_estimate` (present, scalar, finite).
    /// - residual check via `validate_residual` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`; only
    ///   `SolverConverged` counts as convergence, exit messages are kept
    ///   verbatim.
    ///
    /// # Errors
    /// - Propagates any validation errors for the estimate or residual.
    pub fn new(
        theta_hat: Option<Theta>, residual: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let h_hat = validate_estimate(theta_hat)?;
        validate_residual(residual)?;
        let (converged, status) = match termination {
            TerminationStatus::Terminated(TerminationReason::SolverConverged) => {
                (true, "Solver converged".to_string())
            }
            TerminationStatus::Terminated(TerminationReason::SolverExit(msg)) => (false, msg),
            TerminationStatus::Terminated(TerminationReason::MaxItersReached) => {
                (false, format!("Maximum number of iterations ({iterations}) reached"))
            }
            TerminationStatus::Terminated(reason) => (false, format!("{reason:?}")),
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
        };
        let iterations = iterations as usize;
        Ok(Self { h_hat, residual, converged, status, iterations, fn_evals })
    }

    /// Total residual evaluations over all argmin counters (operator, cost
    /// and finite-difference slope calls).
    pub fn evaluations(&self) -> u64 {
        self.fn_evals.values().sum()
    }
}
