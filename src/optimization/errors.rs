use argmin::core::{ArgminError, Error};

use crate::distance::errors::PricingError;

/// Crate-wide result alias for solver operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Tolerances ----
    /// Residual tolerance needs to be positive and finite.
    InvalidTolResidual {
        tol: f64,
        reason: &'static str,
    },
    /// Relative step tolerance needs to be positive and finite.
    InvalidTolStep {
        tol: f64,
        reason: &'static str,
    },
    /// Simplex spread tolerance needs to be positive and finite.
    InvalidTolSd {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// Initial guess for the latent variable must be finite.
    InvalidInitialGuess {
        value: f64,
    },

    // ---- Residual / cost ----
    /// Residual function returned a non-finite value.
    NonFiniteResidual {
        value: f64,
    },
    /// Cost function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },
    /// Finite-difference slope of the residual is not finite.
    InvalidSlope {
        value: f64,
        reason: &'static str,
    },
    /// Parameter vector has the wrong dimension for a scalar solve.
    ParamDimMismatch {
        expected: usize,
        found: usize,
    },

    // ---- Solver outcome ----
    /// Solver finished without a best parameter.
    MissingEstimate,
    /// Solver finished with a non-finite best parameter.
    InvalidEstimate {
        value: f64,
    },

    // ---- Pricing model ----
    /// The pricing model rejected its inputs.
    PricingFailed {
        text: String,
    },

    // ---- Backend ----
    /// Error raised by argmin itself; `kind` names the argmin variant.
    Backend {
        kind: &'static str,
        text: String,
    },
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Tolerances ----
            OptError::InvalidTolResidual { tol, reason } => {
                write!(f, "Invalid residual tolerance {tol}: {reason}")
            }
            OptError::InvalidTolStep { tol, reason } => {
                write!(f, "Invalid relative step tolerance {tol}: {reason}")
            }
            OptError::InvalidTolSd { tol, reason } => {
                write!(f, "Invalid simplex spread tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::InvalidInitialGuess { value } => {
                write!(f, "Invalid initial guess {value}, must be finite")
            }

            // ---- Residual / cost ----
            OptError::NonFiniteResidual { value } => {
                write!(f, "Non-finite residual value: {value}")
            }
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite cost value: {value}")
            }
            OptError::InvalidSlope { value, reason } => {
                write!(f, "Invalid residual slope {value}: {reason}")
            }
            OptError::ParamDimMismatch { expected, found } => {
                write!(f, "Parameter dimension mismatch: expected {expected}, found {found}")
            }

            // ---- Solver outcome ----
            OptError::MissingEstimate => {
                write!(f, "Solver finished without a best estimate")
            }
            OptError::InvalidEstimate { value } => {
                write!(f, "Invalid estimate {value}, must be finite")
            }

            // ---- Pricing model ----
            OptError::PricingFailed { text } => {
                write!(f, "Pricing model failed: {text}")
            }

            // ---- Backend ----
            OptError::Backend { kind, text } => {
                write!(f, "Solver backend error ({kind}): {text}")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Errors raised by our own residual/cost code travel through argmin
        // boxed; unwrap them before falling back to the argmin variants.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast::<ArgminError>() {
            Ok(err) => OptError::Backend { kind: argmin_kind(&err), text: err.to_string() },
            Err(err) => OptError::Backend { kind: "other", text: err.to_string() },
        }
    }
}

fn argmin_kind(err: &ArgminError) -> &'static str {
    match err {
        ArgminError::InvalidParameter { .. } => "invalid parameter",
        ArgminError::NotImplemented { .. } => "not implemented",
        ArgminError::NotInitialized { .. } => "not initialized",
        ArgminError::ConditionViolated { .. } => "condition violated",
        ArgminError::CheckpointNotFound { .. } => "checkpoint not found",
        ArgminError::PotentialBug { .. } => "potential bug",
        ArgminError::ImpossibleError { .. } => "impossible error",
        _ => "unknown",
    }
}

impl From<PricingError> for OptError {
    fn from(err: PricingError) -> Self {
        OptError::PricingFailed { text: err.to_string() }
    }
}
