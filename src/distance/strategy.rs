//! Solver strategies for the per-day pricing equation.
//!
//! Purpose
//! -------
//! Select how `h` is found for a given asset class:
//! - [`StrategyKind::Direct`] runs the damped secant-Newton root finder from
//!   a fixed starting point and converges only if `|residual| ≤ tol_residual`.
//! - [`StrategyKind::GlobalSearch`] runs Nelder–Mead on `|residual|` from a
//!   fixed starting point and converges only if the simplex spread falls
//!   below `tol_sd`.
//!
//! Key behaviors
//! -------------
//! - Both strategies bind the day quantities as [`DayInputs`] and evaluate
//!   the residual through the checked pricing path.
//! - Both carry an iteration cap; no retries with alternate guesses are made.
//! - The choice is fixed per asset class (see `AssetClass::strategy`).
use crate::{
    distance::core::{
        options::StrategyOptions,
        pricing::{DayInputs, PricingModel},
    },
    optimization::{
        errors::OptResult,
        residual_solver::{SolveReport, find_root, minimize_abs_residual},
    },
};

/// Numerical method used for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    /// Root finding on the signed residual.
    Direct,
    /// Derivative-free minimization of the absolute residual.
    GlobalSearch,
}

impl StrategyKind {
    /// Solve `residual(h) = 0` for one day.
    ///
    /// # Errors
    /// Any `OptError` raised while solving, including pricing faults, which
    /// the caller turns into a failed outcome.
    pub fn solve(
        self, model: &PricingModel, day: &DayInputs, opts: &StrategyOptions,
    ) -> OptResult<SolveReport> {
        match self {
            StrategyKind::Direct => find_root(model, opts.initial_guess, day, &opts.tols),
            StrategyKind::GlobalSearch => {
                minimize_abs_residual(model, opts.initial_guess, day, &opts.tols)
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::Direct => "direct",
            StrategyKind::GlobalSearch => "global-search",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        distance::core::{classifier::AssetClass, options::DistanceOptions},
        optimization::errors::OptError,
    };
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The documented worked example through the direct strategy.
    // - Round trips for both strategies on a price the model can reach.
    // - Pricing faults surfacing as errors.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Worked example: V = 100, D = 1, r = 0, σ = 0.05, P = 1 on a plain asset.
    //
    // Given
    // -----
    // - Direct strategy from h0 = 2 with default tolerances.
    //
    // Expect
    // ------
    // - Convergence, and re-substituting h reproduces P within 1e-6.
    fn direct_solves_worked_example() {
        let opts = DistanceOptions::default();
        let day = DayInputs { observed_price: 1.0, sigma: 0.05, rate: 0.0, class: AssetClass::Plain };

        let report = StrategyKind::Direct.solve(&opts.pricing, &day, &opts.direct).unwrap();

        assert!(report.converged, "status: {}", report.status);
        let price = opts.pricing.implied_price(report.h_hat, 0.05, 0.0, AssetClass::Plain);
        assert_relative_eq!(price, 1.0, epsilon = 1e-6);
    }

    #[test]
    // Purpose
    // -------
    // Both strategies recover a latent distance from the price it implies.
    //
    // Given
    // -----
    // - A stablecoin price generated at h = 3, σ = 0.5, r = 0.02 (fold
    //   applied), solved directly from the default guess.
    // - A plain price generated at h = 1.6, σ = 0.4, r = 0, solved by global
    //   search from a guess of 2.0.
    //
    // Expect
    // ------
    // - Direct converges with |residual| ≤ tol_residual.
    // - Global search converges near h = 1.6 with a small residual.
    fn strategies_round_trip_generated_prices() {
        let opts = DistanceOptions::default();
        let model = opts.pricing;
        let coin_price = model.implied_price(3.0, 0.5, 0.02, AssetClass::Stablecoin);
        let coin = DayInputs {
            observed_price: coin_price,
            sigma: 0.5,
            rate: 0.02,
            class: AssetClass::Stablecoin,
        };
        let heavy_price = model.implied_price(1.6, 0.4, 0.0, AssetClass::HeavyTailed);
        let heavy = DayInputs {
            observed_price: heavy_price,
            sigma: 0.4,
            rate: 0.0,
            class: AssetClass::HeavyTailed,
        };
        let near = StrategyOptions::new("global search", 2.0, opts.global.tols.clone()).unwrap();

        let direct = StrategyKind::Direct.solve(&model, &coin, &opts.direct).unwrap();
        let global = StrategyKind::GlobalSearch.solve(&model, &heavy, &near).unwrap();

        assert!(direct.converged, "status: {}", direct.status);
        assert!(direct.residual.abs() <= opts.direct.tols.tol_residual);
        assert!(global.converged, "status: {}", global.status);
        assert_relative_eq!(global.h_hat, 1.6, epsilon = 1e-6);
        assert!(global.residual.abs() < 1e-9);
    }

    #[test]
    // Purpose
    // -------
    // Around the default global guess of 75 the implied price is flat at
    // 1 / (1 + r) in f64, so the simplex spread is zero from the start.
    //
    // Given
    // -----
    // - Observed price 0.98, r = 0, σ = 0.2, default global options.
    //
    // Expect
    // ------
    // - Reported as converged inside the initial simplex [75, 78.75] with
    //   residual 1 − 0.98.
    fn global_search_reports_flat_region_at_default_guess() {
        let opts = DistanceOptions::default();
        let day = DayInputs {
            observed_price: 0.98,
            sigma: 0.2,
            rate: 0.0,
            class: AssetClass::HeavyTailed,
        };

        let report = StrategyKind::GlobalSearch.solve(&opts.pricing, &day, &opts.global).unwrap();

        assert!(report.converged);
        assert!((75.0..=78.75).contains(&report.h_hat));
        assert_relative_eq!(report.residual, 0.02, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A singular discount factor aborts the solve with a pricing error.
    fn pricing_faults_surface_as_errors() {
        let opts = DistanceOptions::default();
        let day = DayInputs { observed_price: 1.0, sigma: 0.1, rate: -1.0, class: AssetClass::Plain };

        let err = StrategyKind::Direct.solve(&opts.pricing, &day, &opts.direct).unwrap_err();

        assert!(matches!(err, OptError::PricingFailed { .. }));
    }
}
