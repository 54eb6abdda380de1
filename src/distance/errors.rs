//! Errors for the distance estimator (pricing faults, volatility windows,
//! panel validation, configuration checks and run-level failures).
//!
//! Two tiers of failure exist:
//! - **Per-day** errors ([`PricingError`], [`VolatilityError`], and the
//!   umbrella [`DayError`]) never abort a run. The estimator turns them into
//!   an undefined outcome and reports them at error severity.
//! - **Fatal** errors ([`PanelError`], [`ConfigError`], and the umbrella
//!   [`DistanceError`]) are raised before the per-day loop starts.
//!
//! ## Conventions
//! - **Day indices are 0-based** positions in the panel's date axis.
//! - All types implement `Display`/`Error`; fatal errors convert to `PyErr`
//!   when the `python-bindings` feature is enabled.
use crate::optimization::errors::OptError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for run-level operations that may produce [`DistanceError`].
pub type DistanceResult<T> = Result<T, DistanceError>;

/// Result alias for pricing evaluations.
pub type PricingResult<T> = Result<T, PricingError>;

/// Arithmetic faults raised by the pricing equation.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingError {
    /// An input to the equation is NaN/±inf.
    NonFiniteInput { name: &'static str, value: f64 },

    /// `1 + r == 0`, so the discounted face value is undefined.
    SingularDiscount { rate: f64 },

    /// The implied price came out NaN/±inf.
    NonFinitePrice { value: f64 },
}

impl std::error::Error for PricingError {}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::NonFiniteInput { name, value } => {
                write!(f, "Pricing input `{name}` is non-finite: {value}")
            }
            PricingError::SingularDiscount { rate } => {
                write!(f, "Discount factor 1 / (1 + r) is undefined for r = {rate}")
            }
            PricingError::NonFinitePrice { value } => {
                write!(f, "Implied price is non-finite: {value}")
            }
        }
    }
}

/// Failures of the trailing-window volatility estimate.
#[derive(Debug, Clone, PartialEq)]
pub enum VolatilityError {
    /// Fewer than `window` prices precede `day`.
    InsufficientHistory { day: usize, window: usize },

    /// A percentage change inside the window is NaN/±inf (zero or
    /// infinite price). Missing prices are forward-filled, not reported here.
    NonFiniteChange { index: usize, value: f64 },

    /// The sample standard deviation is not finite and strictly positive.
    DegenerateVolatility { day: usize, value: f64 },
}

impl std::error::Error for VolatilityError {}

impl std::fmt::Display for VolatilityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolatilityError::InsufficientHistory { day, window } => {
                write!(f, "Day {day} has fewer than {window} prior observations.")
            }
            VolatilityError::NonFiniteChange { index, value } => {
                write!(f, "Percentage change at index {index} is non-finite: {value}")
            }
            VolatilityError::DegenerateVolatility { day, value } => {
                write!(
                    f,
                    "Trailing volatility for day {day} must be finite and > 0; got: {value}"
                )
            }
        }
    }
}

/// Any computation exception raised while solving one (asset, day) unit.
#[derive(Debug, Clone, PartialEq)]
pub enum DayError {
    Volatility(VolatilityError),
    Pricing(PricingError),
    Solver(OptError),
}

impl std::error::Error for DayError {}

impl std::fmt::Display for DayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DayError::Volatility(err) => write!(f, "Volatility estimate failed: {err}"),
            DayError::Pricing(err) => write!(f, "Pricing failed: {err}"),
            DayError::Solver(err) => write!(f, "Solver failed: {err}"),
        }
    }
}

impl From<VolatilityError> for DayError {
    fn from(err: VolatilityError) -> Self {
        DayError::Volatility(err)
    }
}

impl From<PricingError> for DayError {
    fn from(err: PricingError) -> Self {
        DayError::Pricing(err)
    }
}

impl From<OptError> for DayError {
    fn from(err: OptError) -> Self {
        DayError::Solver(err)
    }
}

/// Structural problems with an input panel.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelError {
    /// The risk-free-rate column is absent from the source.
    MissingRateColumn { column: String },

    /// A column's length differs from the date axis.
    LengthMismatch { column: String, expected: usize, found: usize },

    /// Dates are not strictly increasing at `index` (covers duplicates).
    NonIncreasingDates { index: usize },

    /// An asset id is empty.
    EmptyAssetId { position: usize },

    /// Two asset columns share an id.
    DuplicateAsset { asset: String },

    /// A date cell could not be parsed.
    InvalidDate { row: usize, text: String },

    /// A numeric cell could not be parsed.
    InvalidNumber { row: usize, column: String, text: String },
}

impl std::error::Error for PanelError {}

impl std::fmt::Display for PanelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PanelError::MissingRateColumn { column } => {
                write!(f, "Risk-free-rate column `{column}` is missing.")
            }
            PanelError::LengthMismatch { column, expected, found } => {
                write!(
                    f,
                    "Column `{column}` has {found} rows; the date axis has {expected}."
                )
            }
            PanelError::NonIncreasingDates { index } => {
                write!(f, "Dates must be strictly increasing; violation at index {index}.")
            }
            PanelError::EmptyAssetId { position } => {
                write!(f, "Asset column at position {position} has an empty id.")
            }
            PanelError::DuplicateAsset { asset } => {
                write!(f, "Asset `{asset}` appears more than once.")
            }
            PanelError::InvalidDate { row, text } => {
                write!(f, "Row {row}: cannot parse date `{text}`.")
            }
            PanelError::InvalidNumber { row, column, text } => {
                write!(f, "Row {row}, column `{column}`: cannot parse number `{text}`.")
            }
        }
    }
}

/// Invalid estimator configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Rolling window is too short for a sample standard deviation.
    InvalidWindow { window: usize, reason: &'static str },

    /// Face value `D` must be finite and > 0.
    InvalidFaceValue { value: f64 },

    /// Market value `V` must be finite.
    InvalidMarketValue { value: f64 },

    /// A strategy's starting point must be finite.
    InvalidInitialGuess { strategy: &'static str, value: f64 },

    /// Solver tolerances were rejected.
    InvalidTolerances { text: String },
}

impl std::error::Error for ConfigError {}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidWindow { window, reason } => {
                write!(f, "Invalid rolling window {window}. {reason}")
            }
            ConfigError::InvalidFaceValue { value } => {
                write!(f, "Face value must be finite and > 0; got: {value}")
            }
            ConfigError::InvalidMarketValue { value } => {
                write!(f, "Market value must be finite; got: {value}")
            }
            ConfigError::InvalidInitialGuess { strategy, value } => {
                write!(f, "Initial guess for {strategy} must be finite; got: {value}")
            }
            ConfigError::InvalidTolerances { text } => {
                write!(f, "Invalid solver tolerances: {text}")
            }
        }
    }
}

impl From<OptError> for ConfigError {
    fn from(err: OptError) -> Self {
        ConfigError::InvalidTolerances { text: err.to_string() }
    }
}

/// Fatal, run-level errors.
#[derive(Debug, Clone, PartialEq)]
pub enum DistanceError {
    Panel(PanelError),
    Config(ConfigError),

    /// A requested asset is not in the panel.
    UnknownAsset { asset: String },
}

impl std::error::Error for DistanceError {}

impl std::fmt::Display for DistanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceError::Panel(err) => write!(f, "Invalid panel: {err}"),
            DistanceError::Config(err) => write!(f, "Invalid configuration: {err}"),
            DistanceError::UnknownAsset { asset } => {
                write!(f, "Asset `{asset}` is not present in the panel.")
            }
        }
    }
}

impl From<PanelError> for DistanceError {
    fn from(err: PanelError) -> Self {
        DistanceError::Panel(err)
    }
}

impl From<ConfigError> for DistanceError {
    fn from(err: ConfigError) -> Self {
        DistanceError::Config(err)
    }
}

/// Convert a [`DistanceError`] into a Python `ValueError` with the error
/// message.
#[cfg(feature = "python-bindings")]
impl From<DistanceError> for PyErr {
    fn from(err: DistanceError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(feature = "python-bindings")]
impl From<ConfigError> for PyErr {
    fn from(err: ConfigError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Layer conversions wrap the source error without losing its message.
    fn conversions_keep_source_messages() {
        let day = DayError::from(VolatilityError::DegenerateVolatility { day: 90, value: 0.0 });
        let fatal = DistanceError::from(PanelError::NonIncreasingDates { index: 3 });
        let config = ConfigError::from(OptError::InvalidMaxIter {
            max_iter: 0,
            reason: "Maximum iterations must be greater than zero.",
        });

        assert!(day.to_string().contains("day 90"));
        assert!(fatal.to_string().contains("index 3"));
        assert!(matches!(config, ConfigError::InvalidTolerances { .. }));
    }
}
