//! distance — latent "distance to default" estimates for pegged assets.
//!
//! Purpose
//! -------
//! For each asset in a daily panel (fiat currencies, stablecoins, selected
//! cryptocurrencies), estimate a latent distance `h` that solves a modified
//! structural credit-risk pricing equation given the observed price, the
//! trailing realized volatility and the contemporaneous risk-free rate. The
//! resulting date-indexed table serves as a confidence proxy for a peg.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds the leaf components (volatility, pricing, classifier,
//!   options, panel, outcomes, reporter).
//! - [`strategy`] maps each asset class to its fixed solver policy: root
//!   finding for plain assets and stablecoins, global search for
//!   heavy-tailed assets.
//! - [`models`] provides [`DistanceEstimator`], the per-asset / per-day
//!   orchestration loop.
//! - [`errors`] separates per-day faults (reported, run continues) from
//!   fatal input and configuration errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - Each (asset, day) unit is stateless: no warm start from the previous
//!   day's solution.
//! - Classification and strategy selection are fixed for the whole run.
//! - Undefined results stay tagged until export, where they become `NaN`.
//!
//! Downstream usage
//! ----------------
//! - Build a `Panel` (or read one with `crate::io`), construct a
//!   `DistanceEstimator` from `DistanceOptions`, and call `estimate` with a
//!   `FailureReporter` (`TracingReporter` in production).
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each component; the full pipeline is exercised
//!   in `tests/integration_distance_pipeline.rs`.

pub mod core;
pub mod errors;
pub mod models;
pub mod strategy;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    AssetClass, AssetClassifier, AssetColumn, AssetSeries, AssetSummary, ClassifierLists,
    DistanceOptions, FailureReporter, NullReporter, Panel, PricingModel, RecordingReporter,
    ResultTable, Severity, SolverOutcome, StrategyOptions, TracingReporter,
};
pub use self::errors::{
    ConfigError, DayError, DistanceError, DistanceResult, PanelError, PricingError,
    VolatilityError,
};
pub use self::models::DistanceEstimator;
pub use self::strategy::StrategyKind;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use peg_distance::distance::prelude::*;
//
// to import the main estimator surface in a single line.

pub mod prelude {
    pub use super::{
        AssetClass, AssetColumn, AssetSeries, ClassifierLists, DistanceError, DistanceEstimator,
        DistanceOptions, DistanceResult, FailureReporter, Panel, RecordingReporter, ResultTable,
        Severity, SolverOutcome, TracingReporter,
    };
}
