//! residual_solver::validation — guards for tolerances, slopes and estimates.
//!
//! Every check returns an [`OptError`] describing the first offending value;
//! nothing here panics.
use crate::optimization::{
    errors::{OptError, OptResult},
    residual_solver::types::{Grad, Theta},
};

/// Verify a residual tolerance is finite and strictly positive.
pub fn verify_tol_residual(tol: f64) -> OptResult<()> {
    if !tol.is_finite() || tol <= 0.0 {
        return Err(OptError::InvalidTolResidual {
            tol,
            reason: "Residual tolerance must be finite and greater than zero.",
        });
    }
    Ok(())
}

/// Verify a relative step tolerance is finite and strictly positive.
pub fn verify_tol_step(tol: f64) -> OptResult<()> {
    if !tol.is_finite() || tol <= 0.0 {
        return Err(OptError::InvalidTolStep {
            tol,
            reason: "Step tolerance must be finite and greater than zero.",
        });
    }
    Ok(())
}

/// Verify a simplex spread tolerance is finite and strictly positive.
pub fn verify_tol_sd(tol: f64) -> OptResult<()> {
    if !tol.is_finite() || tol <= 0.0 {
        return Err(OptError::InvalidTolSd {
            tol,
            reason: "Simplex spread tolerance must be finite and greater than zero.",
        });
    }
    Ok(())
}

/// Verify an iteration cap is at least one.
pub fn verify_max_iter(max_iter: usize) -> OptResult<()> {
    if max_iter == 0 {
        return Err(OptError::InvalidMaxIter {
            max_iter,
            reason: "Maximum iterations must be greater than zero.",
        });
    }
    Ok(())
}

/// Verify an initial guess is finite.
pub fn verify_initial_guess(h0: f64) -> OptResult<()> {
    if !h0.is_finite() {
        return Err(OptError::InvalidInitialGuess { value: h0 });
    }
    Ok(())
}

/// Validate that a signed residual is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteResidual`] if the value is `NaN` or infinite.
pub fn validate_residual(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteResidual { value });
    }
    Ok(())
}

/// Extract the scalar latent value from a parameter vector.
///
/// # Errors
/// - [`OptError::ParamDimMismatch`] unless `theta.len() == 1`.
pub fn scalar_param(theta: &Theta) -> OptResult<f64> {
    if theta.len() != 1 {
        return Err(OptError::ParamDimMismatch { expected: 1, found: theta.len() });
    }
    Ok(theta[0])
}

/// Validate a finite-difference slope and return its scalar value.
///
/// # Errors
/// - [`OptError::ParamDimMismatch`] unless `slope.len() == 1`.
/// - [`OptError::InvalidSlope`] if the slope is `NaN` or infinite.
pub fn validate_slope(slope: &Grad) -> OptResult<f64> {
    let value = scalar_param(slope)?;
    if !value.is_finite() {
        return Err(OptError::InvalidSlope { value, reason: "Residual slope must be finite." });
    }
    Ok(value)
}

/// Validate and unwrap the best parameter reported by a solver.
///
/// # Errors
/// - [`OptError::MissingEstimate`] if no parameter was recorded.
/// - [`OptError::ParamDimMismatch`] if the vector is not scalar.
/// - [`OptError::InvalidEstimate`] if the value is non-finite.
pub fn validate_estimate(theta_hat: Option<Theta>) -> OptResult<f64> {
    let theta = theta_hat.ok_or(OptError::MissingEstimate)?;
    let value = scalar_param(&theta)?;
    if !value.is_finite() {
        return Err(OptError::InvalidEstimate { value });
    }
    Ok(value)
}
