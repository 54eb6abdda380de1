//! models — the run-level estimator.
//!
//! [`DistanceEstimator`] ties `distance::core` and `distance::strategy`
//! together: it classifies each asset once, walks its days after the
//! warm-up window, and collects tagged outcomes into a `ResultTable`.

pub mod estimator;

pub use self::estimator::DistanceEstimator;
