//! Modified structural (Merton-style) pricing equation.
//!
//! Purpose
//! -------
//! Map a latent distance `h` to an implied price for one asset on one day,
//! and expose the residual `P̂(h) − P_obs` the solvers drive to zero.
//!
//! Key behaviors
//! -------------
//! With market value `V`, face value `D`, `N1 = Φ(h)` and `N2 = Φ(h + σ)`:
//!
//! ```text
//! PEx = (V·(1 − N2) + D·N1 / (1 + r)) / D
//! P̂   = 1 / PEx   if the asset is a stablecoin and PEx > 1
//! P̂   = PEx       otherwise
//! ```
//!
//! - [`PricingModel::residual`] is the plain, pure form.
//! - [`PricingModel::checked_residual`] evaluates the same expression but
//!   reports arithmetic faults (non-finite inputs, `1 + r == 0`, non-finite
//!   result) as [`PricingError`]. Solvers go through this form, via the
//!   [`Residual`] impl, so faults become per-day failures.
//!
//! Invariants & assumptions
//! ------------------------
//! - `D` is finite and strictly positive and `V` is finite (checked by
//!   [`PricingModel::new`]).
//! - `1 − N2` is evaluated as the upper tail `Φ(−(h + σ))`, which keeps
//!   precision for large `h`.
//! - The stablecoin fold maps any `PEx > 1` into `(0, 1)`.
use std::f64::consts::SQRT_2;

use statrs::function::erf::erfc;

use crate::{
    distance::{
        core::classifier::AssetClass,
        errors::{ConfigError, PricingError, PricingResult},
    },
    optimization::{
        errors::OptResult,
        residual_solver::{traits::Residual, types::Cost},
    },
};

/// Default market value `V`.
pub const DEFAULT_MARKET_VALUE: f64 = 100.0;

/// Default face value `D`.
pub const DEFAULT_FACE_VALUE: f64 = 1.0;

/// Day-specific quantities bound to the residual for one solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayInputs {
    pub observed_price: f64,
    pub sigma: f64,
    pub rate: f64,
    pub class: AssetClass,
}

/// Pricing equation with fixed market and face values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingModel {
    market_value: f64,
    face_value: f64,
}

impl PricingModel {
    /// Construct a model with validated `V` and `D`.
    ///
    /// # Errors
    /// - `ConfigError::InvalidMarketValue` if `V` is non-finite.
    /// - `ConfigError::InvalidFaceValue` if `D` is non-finite or `≤ 0`.
    pub fn new(market_value: f64, face_value: f64) -> Result<Self, ConfigError> {
        if !market_value.is_finite() {
            return Err(ConfigError::InvalidMarketValue { value: market_value });
        }
        if !face_value.is_finite() || face_value <= 0.0 {
            return Err(ConfigError::InvalidFaceValue { value: face_value });
        }
        Ok(Self { market_value, face_value })
    }

    pub fn market_value(&self) -> f64 {
        self.market_value
    }

    pub fn face_value(&self) -> f64 {
        self.face_value
    }

    /// Unfolded price `PEx` at latent distance `h`.
    pub fn implied_parity(&self, h: f64, sigma: f64, rate: f64) -> f64 {
        let n1 = std_normal_cdf(h);
        let upper_n2 = std_normal_cdf(-(h + sigma));
        (self.market_value * upper_n2 + self.face_value * n1 / (1.0 + rate)) / self.face_value
    }

    /// Model price `P̂` after the class-dependent fold.
    pub fn implied_price(&self, h: f64, sigma: f64, rate: f64, class: AssetClass) -> f64 {
        let parity = self.implied_parity(h, sigma, rate);
        if class.folds() && parity > 1.0 { 1.0 / parity } else { parity }
    }

    /// `P̂(h) − observed_price`.
    pub fn residual(
        &self, h: f64, observed_price: f64, sigma: f64, rate: f64, class: AssetClass,
    ) -> f64 {
        self.implied_price(h, sigma, rate, class) - observed_price
    }

    /// Same as [`residual`](Self::residual), with arithmetic faults reported.
    ///
    /// # Errors
    /// - `PricingError::NonFiniteInput` if any of `h`, `observed_price`,
    ///   `sigma`, `rate` is NaN/±inf.
    /// - `PricingError::SingularDiscount` if `1 + rate == 0`.
    /// - `PricingError::NonFinitePrice` if the implied price is NaN/±inf.
    pub fn checked_residual(
        &self, h: f64, observed_price: f64, sigma: f64, rate: f64, class: AssetClass,
    ) -> PricingResult<f64> {
        for (name, value) in
            [("h", h), ("observed_price", observed_price), ("sigma", sigma), ("rate", rate)]
        {
            if !value.is_finite() {
                return Err(PricingError::NonFiniteInput { name, value });
            }
        }
        if 1.0 + rate == 0.0 {
            return Err(PricingError::SingularDiscount { rate });
        }
        let price = self.implied_price(h, sigma, rate, class);
        if !price.is_finite() {
            return Err(PricingError::NonFinitePrice { value: price });
        }
        Ok(price - observed_price)
    }
}

impl Default for PricingModel {
    fn default() -> Self {
        Self { market_value: DEFAULT_MARKET_VALUE, face_value: DEFAULT_FACE_VALUE }
    }
}

impl Residual for PricingModel {
    type Data = DayInputs;

    fn value(&self, h: f64, day: &DayInputs) -> OptResult<Cost> {
        let r = self.checked_residual(h, day.observed_price, day.sigma, day.rate, day.class)?;
        Ok(r)
    }
}

/// Standard normal CDF `Φ(x) = erfc(−x / √2) / 2`.
fn std_normal_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}
