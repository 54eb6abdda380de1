//! Distance options — configuration for one estimation run.
//!
//! Purpose
//! -------
//! Collect every knob of a run in one validated value: the rolling window,
//! the pricing model's `V` and `D`, the per-strategy starting point and
//! tolerances, the classifier lists, and whether assets run in parallel.
//!
//! Key behaviors
//! -------------
//! - [`StrategyOptions`] bundles a fixed initial guess with [`Tolerances`].
//!   Every day of every asset in that strategy starts from the same guess.
//! - [`DistanceOptions::new`] validates cross-field constraints; components
//!   validate themselves in their own constructors.
//! - `Default` reproduces the reference run: `W = 90`, `V = 100`, `D = 1`,
//!   direct guess `2.0`, global guess `75`, default lists, serial execution.
//!
//! Invariants & assumptions
//! ------------------------
//! - `rolling_window ≥ 3` so each volatility estimate has at least two
//!   percentage changes.
//! - Initial guesses are finite.
use crate::{
    distance::{
        core::{classifier::ClassifierLists, pricing::PricingModel},
        errors::ConfigError,
    },
    optimization::residual_solver::traits::Tolerances,
};

/// Default trailing window for the volatility estimate.
pub const DEFAULT_ROLLING_WINDOW: usize = 90;

/// Default starting point of the direct root finder.
pub const DEFAULT_DIRECT_GUESS: f64 = 2.0;

/// Default starting point of the global search.
pub const DEFAULT_GLOBAL_GUESS: f64 = 75.0;

/// Smallest admissible rolling window.
pub const MIN_ROLLING_WINDOW: usize = 3;

/// Starting point and stopping rules for one solver strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOptions {
    pub initial_guess: f64,
    pub tols: Tolerances,
}

impl StrategyOptions {
    /// Construct strategy options with a finite starting point.
    ///
    /// # Errors
    /// `ConfigError::InvalidInitialGuess` if `initial_guess` is NaN/±inf.
    pub fn new(
        strategy: &'static str, initial_guess: f64, tols: Tolerances,
    ) -> Result<Self, ConfigError> {
        if !initial_guess.is_finite() {
            return Err(ConfigError::InvalidInitialGuess { strategy, value: initial_guess });
        }
        Ok(Self { initial_guess, tols })
    }
}

/// DistanceOptions — run-level configuration for `DistanceEstimator`.
///
/// Fields
/// ------
/// - `rolling_window`: trailing window `W` of the volatility estimate.
/// - `pricing`: validated pricing model (`V`, `D`).
/// - `direct`: options of the root finder (plain assets and stablecoins).
/// - `global`: options of the global search (heavy-tailed assets).
/// - `classifier`: membership lists used to classify assets.
/// - `parallel`: run assets on the rayon pool.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceOptions {
    pub rolling_window: usize,
    pub pricing: PricingModel,
    pub direct: StrategyOptions,
    pub global: StrategyOptions,
    pub classifier: ClassifierLists,
    pub parallel: bool,
}

impl DistanceOptions {
    /// Construct validated options from already-validated components.
    ///
    /// # Errors
    /// `ConfigError::InvalidWindow` if `rolling_window < 3`.
    pub fn new(
        rolling_window: usize, pricing: PricingModel, direct: StrategyOptions,
        global: StrategyOptions, classifier: ClassifierLists, parallel: bool,
    ) -> Result<Self, ConfigError> {
        if rolling_window < MIN_ROLLING_WINDOW {
            return Err(ConfigError::InvalidWindow {
                window: rolling_window,
                reason: "The window must hold at least three prices (two percentage changes).",
            });
        }
        Ok(Self { rolling_window, pricing, direct, global, classifier, parallel })
    }

    /// Same options with parallel execution toggled.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for DistanceOptions {
    fn default() -> Self {
        Self {
            rolling_window: DEFAULT_ROLLING_WINDOW,
            pricing: PricingModel::default(),
            direct: StrategyOptions { initial_guess: DEFAULT_DIRECT_GUESS, tols: Tolerances::default() },
            global: StrategyOptions { initial_guess: DEFAULT_GLOBAL_GUESS, tols: Tolerances::default() },
            classifier: ClassifierLists::default(),
            parallel: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Defaults match the documented reference run.
    fn default_matches_documented_values() {
        let opts = DistanceOptions::default();

        assert_eq!(opts.rolling_window, 90);
        assert_eq!(opts.pricing.market_value(), 100.0);
        assert_eq!(opts.pricing.face_value(), 1.0);
        assert_eq!(opts.direct.initial_guess, 2.0);
        assert_eq!(opts.global.initial_guess, 75.0);
        assert_eq!(opts.direct.tols.max_iter, 200);
        assert!(!opts.parallel);
    }

    #[test]
    // Purpose
    // -------
    // Windows shorter than three prices are rejected; the default passes
    // `new` unchanged.
    fn new_validates_window() {
        let d = DistanceOptions::default();

        let short = DistanceOptions::new(
            2,
            d.pricing,
            d.direct.clone(),
            d.global.clone(),
            d.classifier.clone(),
            false,
        );
        let rebuilt = DistanceOptions::new(
            d.rolling_window,
            d.pricing,
            d.direct.clone(),
            d.global.clone(),
            d.classifier.clone(),
            d.parallel,
        );

        assert!(matches!(short, Err(ConfigError::InvalidWindow { window: 2, .. })));
        assert_eq!(rebuilt, Ok(d));
    }

    #[test]
    // Purpose
    // -------
    // Non-finite starting points are rejected.
    fn strategy_options_reject_nan_guess() {
        let err = StrategyOptions::new("direct", f64::NAN, Tolerances::default());

        assert!(matches!(err, Err(ConfigError::InvalidInitialGuess { strategy: "direct", .. })));
    }
}
