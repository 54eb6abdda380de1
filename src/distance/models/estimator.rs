//! DistanceEstimator — per-asset, per-day orchestration of the solve.
//!
//! Purpose
//! -------
//! Walk every asset column of a [`Panel`], classify it once, and solve the
//! pricing equation for each day after the warm-up window. Each (asset, day)
//! unit is independent: it reads the trailing volatility, the observed price
//! and the contemporaneous rate, and always starts from the fixed per-class
//! initial guess.
//!
//! Key behaviors
//! -------------
//! - Entries `0..W` are [`SolverOutcome::WarmUp`]; the pricing model is never
//!   invoked for them.
//! - Non-convergence is reported at [`Severity::Info`] and computation
//!   exceptions (degenerate volatility, pricing faults, backend errors) at
//!   [`Severity::Error`]; both leave an undefined entry and the run goes on.
//! - With `options.parallel` set, assets are solved on the rayon pool. Output
//!   columns are always in panel order and bit-identical to a serial run.
//! - A per-asset summary is emitted at info level once a column finishes.
//!
//! Invariants & assumptions
//! ------------------------
//! - Options were validated by `DistanceOptions::new` (or are the defaults).
//! - Panels were validated by `Panel::new`; single-series callers go through
//!   [`DistanceEstimator::estimate_series`], which checks lengths itself.
//! - The rate column is never treated as an asset.
use ndarray::ArrayView1;
use rayon::prelude::*;

use crate::distance::{
    core::{
        classifier::{AssetClass, AssetClassifier},
        options::{DistanceOptions, StrategyOptions},
        outcome::{AssetColumn, Diagnostic, ResultTable, SolverOutcome},
        panel::{AssetSeries, Panel, RATE_COLUMN_LABEL},
        pricing::DayInputs,
        reporter::{FailureReporter, Severity},
        volatility::VolatilityEstimator,
    },
    errors::{DayError, DistanceError, DistanceResult, PanelError},
    strategy::StrategyKind,
};

/// Latent-distance estimator configured by [`DistanceOptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceEstimator {
    options: DistanceOptions,
    classifier: AssetClassifier,
    volatility: VolatilityEstimator,
}

impl DistanceEstimator {
    pub fn new(options: DistanceOptions) -> Self {
        let classifier = AssetClassifier::new(options.classifier.clone());
        let volatility = VolatilityEstimator::new(options.rolling_window);
        Self { options, classifier, volatility }
    }

    pub fn options(&self) -> &DistanceOptions {
        &self.options
    }

    pub fn classify(&self, asset: &str) -> AssetClass {
        self.classifier.classify(asset)
    }

    /// Solve every asset column of `panel`.
    pub fn estimate(&self, panel: &Panel, reporter: &dyn FailureReporter) -> ResultTable {
        let assets: Vec<&AssetSeries> = panel.assets().iter().collect();
        self.run(panel, &assets, reporter)
    }

    /// Solve the listed assets only, in the listed order.
    ///
    /// # Errors
    /// `DistanceError::UnknownAsset` if a requested id is not in the panel.
    /// No asset is solved in that case.
    pub fn estimate_assets(
        &self, panel: &Panel, assets: &[&str], reporter: &dyn FailureReporter,
    ) -> DistanceResult<ResultTable> {
        let selected = assets
            .iter()
            .map(|id| {
                panel.asset(id).ok_or_else(|| DistanceError::UnknownAsset { asset: id.to_string() })
            })
            .collect::<DistanceResult<Vec<_>>>()?;
        Ok(self.run(panel, &selected, reporter))
    }

    /// Solve a single price series against its rate series.
    ///
    /// # Errors
    /// `PanelError::LengthMismatch` if `rates` and `prices` differ in length.
    pub fn estimate_series(
        &self, asset: &str, prices: ArrayView1<f64>, rates: ArrayView1<f64>,
        reporter: &dyn FailureReporter,
    ) -> DistanceResult<AssetColumn> {
        if rates.len() != prices.len() {
            return Err(PanelError::LengthMismatch {
                column: RATE_COLUMN_LABEL.to_string(),
                expected: prices.len(),
                found: rates.len(),
            }
            .into());
        }
        Ok(self.solve_column(asset, prices, rates, reporter))
    }

    /// Solve one (asset, day) unit.
    ///
    /// Never fails: warm-up days give `WarmUp`; non-convergence and
    /// computation exceptions are reported and give undefined outcomes.
    pub fn solve_day(
        &self, asset: &str, class: AssetClass, prices: ArrayView1<f64>, rates: ArrayView1<f64>,
        day: usize, reporter: &dyn FailureReporter,
    ) -> SolverOutcome {
        if day < self.volatility.window() {
            return SolverOutcome::WarmUp;
        }
        let strategy = class.strategy();
        let solved = self.day_inputs(class, prices, rates, day).and_then(|inputs| {
            strategy
                .solve(&self.options.pricing, &inputs, self.strategy_options(strategy))
                .map_err(DayError::from)
        });
        match solved {
            Ok(report) if report.converged => SolverOutcome::Converged(report.h_hat),
            Ok(report) => {
                let message = format!(
                    "{} solver did not converge ({} iterations, {} evaluations): {}",
                    strategy.as_str(),
                    report.iterations,
                    report.evaluations(),
                    report.status
                );
                reporter.report(Severity::Info, asset, day, &message);
                SolverOutcome::NonConvergent(Diagnostic::new(asset, day, message))
            }
            Err(err) => {
                let message = err.to_string();
                reporter.report(Severity::Error, asset, day, &message);
                SolverOutcome::Failed(Diagnostic::new(asset, day, message))
            }
        }
    }

    fn strategy_options(&self, strategy: StrategyKind) -> &StrategyOptions {
        match strategy {
            StrategyKind::Direct => &self.options.direct,
            StrategyKind::GlobalSearch => &self.options.global,
        }
    }

    fn day_inputs(
        &self, class: AssetClass, prices: ArrayView1<f64>, rates: ArrayView1<f64>, day: usize,
    ) -> Result<DayInputs, DayError> {
        let sigma = self.volatility.sigma_at(prices, day)?;
        Ok(DayInputs { observed_price: prices[day], sigma, rate: rates[day], class })
    }

    fn run(
        &self, panel: &Panel, assets: &[&AssetSeries], reporter: &dyn FailureReporter,
    ) -> ResultTable {
        let rates = panel.rate();
        let solve = |series: &&AssetSeries| {
            self.solve_column(&series.id, series.prices.view(), rates, reporter)
        };
        let columns: Vec<AssetColumn> = if self.options.parallel {
            assets.par_iter().map(solve).collect()
        } else {
            assets.iter().map(solve).collect()
        };
        ResultTable { dates: panel.dates().to_vec(), columns }
    }

    fn solve_column(
        &self, asset: &str, prices: ArrayView1<f64>, rates: ArrayView1<f64>,
        reporter: &dyn FailureReporter,
    ) -> AssetColumn {
        let class = self.classify(asset);
        tracing::debug!(asset, class = %class, strategy = class.strategy().as_str(), "solving asset");
        let outcomes = (0..prices.len())
            .map(|day| self.solve_day(asset, class, prices, rates, day, reporter))
            .collect();
        let column = AssetColumn { asset: asset.to_string(), class, outcomes };
        let summary = column.summary();
        tracing::info!(
            asset,
            class = %class,
            converged = summary.converged,
            non_convergent = summary.non_convergent,
            failed = summary.failed,
            warm_up = summary.warm_up,
            "asset finished"
        );
        column
    }
}

impl Default for DistanceEstimator {
    fn default() -> Self {
        Self::new(DistanceOptions::default())
    }
}
