//! residual_solver::secant — damped secant-Newton root finder as an Argmin solver.
//!
//! Purpose
//! -------
//! Drive a scalar residual `r(h)` to zero from a single starting point. The
//! first iteration takes a Newton step `Δh = r(h) / r'(h)` with the slope
//! from central finite differences; later iterations use the secant slope
//! through the last two iterates. Each step is halved until `|r|` decreases.
//!
//! Key behaviors
//! -------------
//! - Implements [`argmin::core::Solver`] so it runs under the same
//!   [`Executor`](argmin::core::Executor), iteration caps and counters as the
//!   Nelder–Mead strategy.
//! - Secant slopes span whole steps, so they stay resolvable in `f64` on
//!   residual tails where an `√ε`-wide finite difference rounds to zero.
//!   If the secant direction yields no decrease, the finite-difference slope
//!   is tried before giving up.
//! - Stores `|r(h)|` as the Argmin cost, so the best-parameter bookkeeping
//!   tracks the smallest residual seen.
//! - Reports convergence only through `SolverConverged`, which requires
//!   `|r(h)| ≤ tol_residual`.
//! - Stops with `SolverExit(message)` when it can no longer make progress:
//!   vanishing slope, no decrease after `MAX_HALVINGS` step halvings, or a
//!   relative step below `tol_step` while the residual is still large.
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters are 1-vectors (`Theta`); the problem implements
//!   `Operator<Output = f64>` and `Jacobian<Jacobian = Grad>`.
//! - No retries with perturbed starting points are attempted.
//!
//! Testing notes
//! -------------
//! - Unit tests run the solver through `Executor` on closed-form residuals
//!   (cubic, flat) to check convergence, exit messages and the iteration cap.
use crate::optimization::{
    errors::OptResult,
    residual_solver::{
        types::{MAX_HALVINGS, Grad, SolverState, Theta},
        validation::{
            scalar_param, validate_residual, validate_slope, verify_tol_residual, verify_tol_step,
        },
    },
};
use argmin::core::{
    ArgminError, Error, Jacobian, KV, Operator, Problem, Solver, State, TerminationReason,
    TerminationStatus,
};
use ndarray::Array1;

/// SecantNewton — damped secant-Newton iteration for `r(h) = 0`.
///
/// Fields
/// ------
/// - `tol_residual`: `|r(h)|` accepted as a root.
/// - `tol_step`: relative step `|Δh| / max(|h|, 1)` below which the
///   iteration is considered stalled.
/// - `last_rel_step`: relative size of the last accepted step.
/// - `previous`: `(h, r(h))` of the previous iterate, feeding the secant.
#[derive(Debug, Clone, PartialEq)]
pub struct SecantNewton {
    tol_residual: f64,
    tol_step: f64,
    last_rel_step: Option<f64>,
    previous: Option<(f64, f64)>,
}

impl SecantNewton {
    /// Construct a solver with validated tolerances.
    ///
    /// # Errors
    /// - `OptError::InvalidTolResidual` / `OptError::InvalidTolStep` for
    ///   non-finite or non-positive tolerances.
    pub fn new(tol_residual: f64, tol_step: f64) -> OptResult<Self> {
        verify_tol_residual(tol_residual)?;
        verify_tol_step(tol_step)?;
        Ok(Self {
            tol_residual,
            tol_step,
            last_rel_step: None,
            previous: None,
        })
    }

    pub fn tol_residual(&self) -> f64 {
        self.tol_residual
    }

    /// Slope through the previous iterate, if it is usable.
    fn secant_slope(&self, h: f64, r: f64) -> Option<f64> {
        let (h_prev, r_prev) = self.previous?;
        let slope = (r - r_prev) / (h - h_prev);
        (slope.is_finite() && slope != 0.0).then_some(slope)
    }

    /// Halve the step `r / slope` until `|r|` decreases.
    ///
    /// Returns the accepted `(h_new, r_new)` or `None` if every halving
    /// failed. A candidate the model cannot price counts as a rejected step.
    fn damped_step<O>(
        &self, problem: &mut Problem<O>, h: f64, r: f64, slope: f64,
    ) -> Option<(f64, f64)>
    where
        O: Operator<Param = Theta, Output = f64>,
    {
        let step = r / slope;
        if !step.is_finite() {
            return None;
        }
        let mut lambda = 1.0;
        for _ in 0..=MAX_HALVINGS {
            let h_new = h - lambda * step;
            if let Ok(r_new) = problem.apply(&Array1::from_elem(1, h_new)) {
                if r_new.is_finite() && r_new.abs() < r.abs() {
                    return Some((h_new, r_new));
                }
            }
            lambda *= 0.5;
        }
        None
    }
}

fn missing_param() -> ArgminError {
    ArgminError::NotInitialized {
        text: "SecantNewton requires an initial parameter vector.".to_string(),
    }
}

impl<O> Solver<O, SolverState> for SecantNewton
where
    O: Operator<Param = Theta, Output = f64> + Jacobian<Param = Theta, Jacobian = Grad>,
{
    const NAME: &'static str = "Secant-Newton";

    fn init(
        &mut self, problem: &mut Problem<O>, state: SolverState,
    ) -> Result<(SolverState, Option<KV>), Error> {
        let theta0 = state.get_param().ok_or_else(missing_param)?.clone();
        scalar_param(&theta0)?;
        let r0 = problem.apply(&theta0)?;
        validate_residual(r0)?;
        self.last_rel_step = None;
        self.previous = None;
        Ok((state.param(theta0).cost(r0.abs()), None))
    }

    fn next_iter(
        &mut self, problem: &mut Problem<O>, mut state: SolverState,
    ) -> Result<(SolverState, Option<KV>), Error> {
        let theta = state.take_param().ok_or_else(missing_param)?;
        let h = scalar_param(&theta)?;
        let r = problem.apply(&theta)?;
        validate_residual(r)?;
        if r.abs() <= self.tol_residual {
            return Ok((state.param(theta).cost(r.abs()), None));
        }

        let mut accepted = match self.secant_slope(h, r) {
            Some(slope) => self.damped_step(problem, h, r, slope),
            None => None,
        };
        if accepted.is_none() {
            let slope = validate_slope(&problem.jacobian(&theta)?)?;
            if slope == 0.0 {
                let reason = TerminationReason::SolverExit(format!(
                    "Residual slope vanished at h = {h}; the iteration is not making good progress"
                ));
                return Ok((state.param(theta).cost(r.abs()).terminate_with(reason), None));
            }
            accepted = self.damped_step(problem, h, r, slope);
        }

        match accepted {
            Some((h_new, r_new)) => {
                self.last_rel_step = Some((h_new - h).abs() / h_new.abs().max(1.0));
                self.previous = Some((h, r));
                Ok((state.param(Array1::from_elem(1, h_new)).cost(r_new.abs()), None))
            }
            None => {
                let reason = TerminationReason::SolverExit(format!(
                    "No decrease in |residual| along the Newton direction after {MAX_HALVINGS} step halvings at h = {h}"
                ));
                Ok((state.param(theta).cost(r.abs()).terminate_with(reason), None))
            }
        }
    }

    fn terminate(&mut self, state: &SolverState) -> TerminationStatus {
        let cost = state.get_cost();
        if cost <= self.tol_residual {
            return TerminationStatus::Terminated(TerminationReason::SolverConverged);
        }
        if let Some(rel_step) = self.last_rel_step {
            if rel_step <= self.tol_step {
                return TerminationStatus::Terminated(TerminationReason::SolverExit(format!(
                    "Relative step {rel_step:e} fell below tolerance while |residual| = {cost:e}"
                )));
            }
        }
        TerminationStatus::NotTerminated
    }
}
