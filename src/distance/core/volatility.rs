//! Trailing realized volatility of daily percentage changes.
//!
//! Purpose
//! -------
//! Estimate `sigma` for day `i` from the `W` prices strictly before it,
//! `price[i-W .. i)`. Inside that slice the day-over-day percentage changes
//! `(p[k] - p[k-1]) / p[k-1]` are formed (W − 1 of them) and their sample
//! standard deviation (denominator `n - 1`) is returned.
//!
//! Key behaviors
//! -------------
//! - Days with `i < W` have no estimate ([`VolatilityError::InsufficientHistory`]);
//!   the estimator treats them as warm-up and never prices them.
//! - Missing (`NaN`) prices are carried forward from the last observed price
//!   in the window, so they contribute a zero change; leading missing prices
//!   contribute nothing. Only the defined changes enter the sample.
//! - A zero or infinite price inside the window makes a change non-finite
//!   and is rejected with [`VolatilityError::NonFiniteChange`].
//! - A standard deviation that is not finite and strictly positive (e.g. a
//!   constant-price window, or fewer than two defined changes) is rejected with
//!   [`VolatilityError::DegenerateVolatility`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `window ≥ 3`, so a fully observed window yields at least two changes.
//!   This is enforced by `DistanceOptions::new`.
//! - The price at day `i` itself never enters its own volatility estimate.
use ndarray::ArrayView1;

use crate::distance::errors::VolatilityError;

/// Rolling-window volatility estimator with a fixed window length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolatilityEstimator {
    window: usize,
}

impl VolatilityEstimator {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Volatility for `day` from `prices[day - W .. day)`.
    ///
    /// # Errors
    /// - `InsufficientHistory` if `day < W`.
    /// - `NonFiniteChange` for a zero or infinite price in the window.
    /// - `DegenerateVolatility` if the standard deviation is not finite and
    ///   strictly positive.
    pub fn sigma_at(&self, prices: ArrayView1<f64>, day: usize) -> Result<f64, VolatilityError> {
        if day < self.window || day > prices.len() {
            return Err(VolatilityError::InsufficientHistory { day, window: self.window });
        }
        let start = day - self.window;
        let mut changes = Vec::with_capacity(self.window.saturating_sub(1));
        // Last observed price; `None` until the first non-missing price.
        let mut last: Option<f64> = None;
        for k in start..day {
            let price = prices[k];
            if price.is_nan() {
                // Missing cell: carry the last price forward (zero change).
                if last.is_some() {
                    changes.push(0.0);
                }
                continue;
            }
            if let Some(prev) = last {
                let change = (price - prev) / prev;
                if !change.is_finite() {
                    return Err(VolatilityError::NonFiniteChange { index: k, value: change });
                }
                changes.push(change);
            }
            last = Some(price);
        }

        let sigma = sample_std(&changes);
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(VolatilityError::DegenerateVolatility { day, value: sigma });
        }
        Ok(sigma)
    }
}

/// Sample standard deviation with denominator `n - 1`; `NaN` for `n < 2`.
fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (n - 1) as f64).sqrt()
}
