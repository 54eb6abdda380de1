//! Adapter that exposes a user `Residual` as an `argmin` problem.
//!
//! One adapter serves both strategies:
//! - as an `Operator` it returns the signed residual `r(h)` (root finder);
//! - as a `Jacobian` it returns the finite-difference slope `∂r/∂h`;
//! - as a `CostFunction` it returns `|r(h)|` (simplex).
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    residual_solver::{
        traits::Residual,
        types::{Cost, Grad, Theta},
        validation::{scalar_param, validate_residual, validate_slope},
    },
};
use argmin::core::{CostFunction, Error, Jacobian, Operator};
use finitediff::FiniteDiff;
use ndarray::Array1;

/// Bridges a user `Residual` to `argmin`'s `Operator`, `Jacobian` and
/// `CostFunction` traits.
///
/// The day-specific quantities live in `data` and are bound once per solve;
/// the adapter never mutates them.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: Residual> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: Residual> ArgMinAdapter<'a, F> {
    /// Construct a new adapter over a user `Residual` and its data.
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }

    /// Evaluate the signed residual at a scalar `h`.
    ///
    /// # Errors
    /// Propagates user errors and rejects non-finite residuals.
    pub fn residual_at(&self, h: f64) -> Result<Cost, OptError> {
        let value = self.f.value(h, self.data)?;
        validate_residual(value)?;
        Ok(value)
    }
}

impl<'a, F: Residual> Operator for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate `r(θ₀)`.
    fn apply(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let h = scalar_param(theta)?;
        Ok(self.residual_at(h)?)
    }
}

impl<'a, F: Residual> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the cost `c(θ) = |r(θ₀)|`.
    ///
    /// # Errors
    /// Propagates any `OptError` from the user's `value` via `?`.
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let h = scalar_param(theta)?;
        let output = self.residual_at(h)?.abs();
        if !output.is_finite() {
            return Err((OptError::NonFiniteCost { value: output }).into());
        }
        Ok(output)
    }
}

impl<'a, F: Residual> Jacobian for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Jacobian = Grad;

    /// Finite-difference slope `∂r/∂h` at `θ`.
    ///
    /// Behavior:
    /// - Try *central* differences first.
    /// - If any residual evaluation failed inside the FD closure (captured
    ///   via `closure_err`) or the slope is not finite, retry once with
    ///   *forward* differences.
    ///
    /// The FD closure must return `f64`, so errors are parked in
    /// `closure_err` and the closure returns `NaN`.
    fn jacobian(&self, theta: &Self::Param) -> Result<Self::Jacobian, Error> {
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let residual_func = |theta: &Theta| -> f64 {
            match self.apply(theta) {
                Ok(val) => val,
                Err(e) => {
                    let mut slot = closure_err.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(e);
                    }
                    f64::NAN
                }
            }
        };
        let slope = theta.central_diff(&residual_func);
        if closure_err.borrow().is_none() && validate_slope(&slope).is_ok() {
            return Ok(slope);
        }
        run_forward_slope(theta, &residual_func, &closure_err)
    }
}

/// Forward-difference slope with error capture.
///
/// Clears `closure_err`, runs `forward_diff`, returns the first captured
/// error if any, then validates the slope.
fn run_forward_slope<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let slope = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    let value = validate_slope(&slope)?;
    Ok(Array1::from_elem(1, value))
}
