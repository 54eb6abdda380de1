//! Outcomes of the per-day solve and the result table they populate.
//!
//! Purpose
//! -------
//! Carry every (asset, day) result as a tagged [`SolverOutcome`] so that
//! warm-up, non-convergence and failures stay distinguishable until the
//! export boundary, where [`SolverOutcome::as_f64`] maps every undefined
//! entry to `NaN`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every [`AssetColumn`] in a [`ResultTable`] has one outcome per date.
//! - The first `rolling_window` outcomes of every column are `WarmUp`.
//! - Columns appear in panel order and never include the rate column.
use chrono::NaiveDate;
use ndarray::Array1;

use crate::distance::core::classifier::AssetClass;

/// Context attached to a non-converged or failed solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub asset: String,
    pub day: usize,
    pub message: String,
}

impl Diagnostic {
    pub fn new(asset: &str, day: usize, message: impl Into<String>) -> Self {
        Self { asset: asset.to_string(), day, message: message.into() }
    }
}

/// Result of one (asset, day) unit.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverOutcome {
    /// Not enough history for a volatility estimate.
    WarmUp,
    /// Solver converged to `h`.
    Converged(f64),
    /// Solver terminated without converging.
    NonConvergent(Diagnostic),
    /// A computation exception occurred.
    Failed(Diagnostic),
}

impl SolverOutcome {
    /// The latent distance, defined only for converged solves.
    pub fn value(&self) -> Option<f64> {
        match self {
            SolverOutcome::Converged(h) => Some(*h),
            _ => None,
        }
    }

    /// Export form: the latent distance or `NaN`.
    pub fn as_f64(&self) -> f64 {
        self.value().unwrap_or(f64::NAN)
    }

    pub fn is_converged(&self) -> bool {
        matches!(self, SolverOutcome::Converged(_))
    }

    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            SolverOutcome::NonConvergent(diag) | SolverOutcome::Failed(diag) => Some(diag),
            _ => None,
        }
    }
}

/// Per-column tallies of outcome variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssetSummary {
    pub converged: usize,
    pub non_convergent: usize,
    pub failed: usize,
    pub warm_up: usize,
}

impl AssetSummary {
    pub fn total(&self) -> usize {
        self.converged + self.non_convergent + self.failed + self.warm_up
    }
}

/// One asset's outcomes over the full date axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetColumn {
    pub asset: String,
    pub class: AssetClass,
    pub outcomes: Vec<SolverOutcome>,
}

impl AssetColumn {
    pub fn summary(&self) -> AssetSummary {
        let mut summary = AssetSummary::default();
        for outcome in &self.outcomes {
            match outcome {
                SolverOutcome::WarmUp => summary.warm_up += 1,
                SolverOutcome::Converged(_) => summary.converged += 1,
                SolverOutcome::NonConvergent(_) => summary.non_convergent += 1,
                SolverOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// Outcomes as a `NaN`-padded numeric column.
    pub fn values(&self) -> Array1<f64> {
        self.outcomes.iter().map(SolverOutcome::as_f64).collect()
    }
}

/// Date-indexed table of latent distances, one column per asset.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub dates: Vec<NaiveDate>,
    pub columns: Vec<AssetColumn>,
}

impl ResultTable {
    pub fn column(&self, asset: &str) -> Option<&AssetColumn> {
        self.columns.iter().find(|c| c.asset == asset)
    }

    pub fn asset_ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.asset.as_str())
    }
}
