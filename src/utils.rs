//! Python-boundary helpers.
//!
//! Converts Python inputs into the crate's validated Rust types. Compiled
//! only with the `python-bindings` feature.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    distance::{
        core::{
            classifier::ClassifierLists,
            options::{DistanceOptions, StrategyOptions},
            pricing::PricingModel,
        },
        errors::ConfigError,
    },
    optimization::residual_solver::traits::Tolerances,
};

#[cfg(feature = "python-bindings")]
use numpy::{PyArrayMethods, PyReadonlyArray1};

/// Copy a Python price or rate series into an owned `Vec<f64>`.
///
/// Accepts a contiguous 1-D `float64` ndarray, anything with a
/// `to_numpy()` method returning one (pandas `Series`), or a plain
/// sequence of floats. Missing values arrive as `NaN` and are kept.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vec<'py>(raw_data: &Bound<'py, PyAny>, name: &str) -> PyResult<Vec<f64>> {
    let contiguous = |arr: PyReadonlyArray1<'py, f64>| arr.as_slice().ok().map(<[f64]>::to_vec);

    if let Some(values) = raw_data.extract::<PyReadonlyArray1<f64>>().ok().and_then(contiguous) {
        return Ok(values);
    }
    if let Ok(series) = raw_data.call_method0("to_numpy") {
        if let Some(values) = series.extract::<PyReadonlyArray1<f64>>().ok().and_then(contiguous) {
            return Ok(values);
        }
    }
    raw_data.extract::<Vec<f64>>().map_err(|_| {
        PyTypeError::new_err(format!(
            "{name} must be a 1-D float64 ndarray, pandas Series, or sequence of floats"
        ))
    })
}

/// Build validated [`DistanceOptions`] from optional Python keyword values.
///
/// Unset values fall back to `DistanceOptions::default()`; the same
/// tolerances are applied to both strategies when `max_iter` is given.
#[cfg(feature = "python-bindings")]
#[allow(clippy::too_many_arguments)]
pub fn build_distance_options(
    rolling_window: Option<usize>, market_value: Option<f64>, face_value: Option<f64>,
    direct_guess: Option<f64>, global_guess: Option<f64>, non_stablecoins: Option<Vec<String>>,
    global_search: Option<Vec<String>>, max_iter: Option<usize>, parallel: Option<bool>,
) -> PyResult<DistanceOptions> {
    let d = DistanceOptions::default();
    let pricing = PricingModel::new(
        market_value.unwrap_or(d.pricing.market_value()),
        face_value.unwrap_or(d.pricing.face_value()),
    )?;
    let tols = match max_iter {
        Some(max_iter) => {
            let t = Tolerances::default();
            Tolerances::new(t.tol_residual, t.tol_step, t.tol_sd, max_iter)
                .map_err(ConfigError::from)?
        }
        None => Tolerances::default(),
    };
    let direct =
        StrategyOptions::new("direct", direct_guess.unwrap_or(d.direct.initial_guess), tols.clone())?;
    let global = StrategyOptions::new(
        "global search",
        global_guess.unwrap_or(d.global.initial_guess),
        tols,
    )?;
    let lists = ClassifierLists {
        non_stablecoins: non_stablecoins.unwrap_or(d.classifier.non_stablecoins),
        global_search: global_search.unwrap_or(d.classifier.global_search),
    };
    let opts = DistanceOptions::new(
        rolling_window.unwrap_or(d.rolling_window),
        pricing,
        direct,
        global,
        lists,
        parallel.unwrap_or(d.parallel),
    )?;
    Ok(opts)
}
