//! distance::core — building blocks of the latent-distance estimate.
//!
//! Purpose
//! -------
//! Hold the leaf components the estimator composes: the trailing volatility
//! estimate, the pricing equation, asset classification, run options, the
//! input panel, tagged outcomes and the failure sink.
//!
//! Key behaviors
//! -------------
//! - [`volatility`]: sample standard deviation of percentage changes over the
//!   `W` prices before a day.
//! - [`pricing`]: `P̂(h)` with the stablecoin fold, and the residual the
//!   solvers drive to zero (implements `Residual`).
//! - [`classifier`]: static membership lists → [`AssetClass`].
//! - [`options`]: validated [`DistanceOptions`] and per-strategy options.
//! - [`panel`]: validated dates × (assets, rate) input.
//! - [`outcome`]: [`SolverOutcome`], per-asset columns and the result table.
//! - [`reporter`]: [`FailureReporter`] and its implementations.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nothing here mutates shared state; the only interior mutability is the
//!   mutex inside `RecordingReporter`.
//! - Per-day faults are values (`VolatilityError`, `PricingError`), never
//!   panics.
//!
//! Testing notes
//! -------------
//! - Each submodule carries unit tests for its closed-form behavior
//!   (window alignment, fold, list precedence, validation, counters).

pub mod classifier;
pub mod options;
pub mod outcome;
pub mod panel;
pub mod pricing;
pub mod reporter;
pub mod volatility;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::classifier::{AssetClass, AssetClassifier, ClassifierLists};
pub use self::options::{DistanceOptions, StrategyOptions};
pub use self::outcome::{AssetColumn, AssetSummary, Diagnostic, ResultTable, SolverOutcome};
pub use self::panel::{AssetSeries, Panel};
pub use self::pricing::{DayInputs, PricingModel};
pub use self::reporter::{
    FailureReporter, NullReporter, RecordingReporter, ReportEntry, Severity, TracingReporter,
};
pub use self::volatility::VolatilityEstimator;
