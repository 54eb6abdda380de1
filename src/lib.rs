//! peg_distance — latent distance-to-default estimates for currency pegs.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the estimator to Python via the `_peg_distance` extension module.
//! For each asset in a daily panel the crate solves a modified structural
//! credit-risk pricing equation for a latent distance `h`, giving a
//! date-indexed table usable as a risk / confidence proxy for a peg.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules: `distance` (pricing, volatility,
//!   classification, orchestration), `optimization` (argmin-backed residual
//!   solvers), and `io` (CSV panel reader and result writer).
//! - Define the `#[pyclass]` wrapper `PegDistance` and the `#[pymodule]`
//!   initializer when the `python-bindings` feature is enabled.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - Library code never installs a `tracing` subscriber; the `peg-distance`
//!   binary does.
//!
//! Conventions
//! -----------
//! - Day indices are 0-based positions on the panel's date axis.
//! - Undefined results (warm-up, non-convergent, failed) stay tagged inside
//!   Rust and become `NaN` only at export (CSV writer, Python arrays).
//! - Fatal errors are rich error types internally and become `ValueError`
//!   at the PyO3 boundary.
//!
//! Testing notes
//! -------------
//! - Numerical behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_distance_pipeline.rs`.

pub mod distance;
pub mod io;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::ArrayView1;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    distance::{
        core::reporter::{RecordingReporter, Severity},
        models::estimator::DistanceEstimator,
    },
    utils::{build_distance_options, extract_f64_vec},
};

/// PegDistance — Python-facing wrapper for [`DistanceEstimator`].
///
/// Constructed from Python via
/// `PegDistance(rolling_window=90, market_value=100.0, face_value=1.0,
/// direct_guess=2.0, global_guess=75.0, non_stablecoins=None,
/// global_search=None, max_iter=200)`; unset values use the Rust defaults.
///
/// `estimate_series` returns the `NaN`-padded distances together with the
/// failure log as `(severity, day, message)` tuples, so Python callers get
/// the diagnostics without a tracing subscriber.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "peg_distance.distance")]
pub struct PegDistance {
    inner: DistanceEstimator,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PegDistance {
    #[new]
    #[pyo3(signature = (
        rolling_window = None, market_value = None, face_value = None, direct_guess = None,
        global_guess = None, non_stablecoins = None, global_search = None, max_iter = None
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rolling_window: Option<usize>, market_value: Option<f64>, face_value: Option<f64>,
        direct_guess: Option<f64>, global_guess: Option<f64>,
        non_stablecoins: Option<Vec<String>>, global_search: Option<Vec<String>>,
        max_iter: Option<usize>,
    ) -> PyResult<PegDistance> {
        let opts = build_distance_options(
            rolling_window,
            market_value,
            face_value,
            direct_guess,
            global_guess,
            non_stablecoins,
            global_search,
            max_iter,
            Some(false),
        )?;
        Ok(PegDistance { inner: DistanceEstimator::new(opts) })
    }

    /// Asset class used for `asset`: "stablecoin", "plain" or "heavy-tailed".
    pub fn classify(&self, asset: &str) -> &'static str {
        self.inner.classify(asset).as_str()
    }

    /// Model price at latent distance `h` for `asset`'s class.
    pub fn implied_price(&self, asset: &str, h: f64, sigma: f64, rate: f64) -> f64 {
        let class = self.inner.classify(asset);
        self.inner.options().pricing.implied_price(h, sigma, rate, class)
    }

    /// Solve one price series against its rate series.
    pub fn estimate_series<'py>(
        &self, asset: &str, prices: &Bound<'py, PyAny>,
        rates: &Bound<'py, PyAny>,
    ) -> PyResult<(Vec<f64>, Vec<(String, usize, String)>)> {
        let prices = extract_f64_vec(prices, "prices")?;
        let rates = extract_f64_vec(rates, "rates")?;
        let reporter = RecordingReporter::new();
        let column = self.inner.estimate_series(
            asset,
            ArrayView1::from(prices.as_slice()),
            ArrayView1::from(rates.as_slice()),
            &reporter,
        )?;
        let log = reporter
            .entries()
            .into_iter()
            .map(|e| {
                let severity = match e.severity {
                    Severity::Info => "info",
                    Severity::Error => "error",
                };
                (severity.to_string(), e.day, e.message)
            })
            .collect();
        Ok((column.values().to_vec(), log))
    }
}

/// Python module initializer for `_peg_distance`.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _peg_distance<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let distance_mod = PyModule::new(_py, "distance")?;
    distance_mod.add_class::<PegDistance>()?;
    m.add_submodule(&distance_mod)?;

    // Manually add the submodule into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("peg_distance.distance", distance_mod)?;
    Ok(())
}
