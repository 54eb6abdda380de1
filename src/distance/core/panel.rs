//! Panel — validated multi-asset daily input.
//!
//! Purpose
//! -------
//! Hold the shared date axis, one price column per asset and exactly one
//! risk-free-rate column. The estimator only reads a panel.
//!
//! Invariants & assumptions
//! ------------------------
//! - Dates are strictly increasing (no duplicates).
//! - Every column, including the rate column, has one entry per date.
//! - Asset ids are non-empty and unique; the rate column is not an asset.
//! - Values may be NaN (missing cells); the per-day pipeline handles them.
use chrono::NaiveDate;
use ndarray::{Array1, ArrayView1};

use crate::distance::errors::PanelError;

/// Name used for the rate column in diagnostics.
pub const RATE_COLUMN_LABEL: &str = "risk-free rate";

/// One asset's price column.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSeries {
    pub id: String,
    pub prices: Array1<f64>,
}

impl AssetSeries {
    pub fn new(id: impl Into<String>, prices: impl Into<Array1<f64>>) -> Self {
        Self { id: id.into(), prices: prices.into() }
    }
}

/// Validated panel of dates × (assets, rate).
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    dates: Vec<NaiveDate>,
    rate: Array1<f64>,
    assets: Vec<AssetSeries>,
}

impl Panel {
    /// Build a panel after checking dates, lengths and ids.
    ///
    /// # Errors
    /// - `PanelError::NonIncreasingDates` at the first out-of-order date.
    /// - `PanelError::LengthMismatch` for a ragged column.
    /// - `PanelError::EmptyAssetId` / `PanelError::DuplicateAsset` for bad ids.
    pub fn new(
        dates: Vec<NaiveDate>, rate: impl Into<Array1<f64>>, assets: Vec<AssetSeries>,
    ) -> Result<Self, PanelError> {
        let rate = rate.into();
        if let Some(index) = dates.windows(2).position(|w| w[1] <= w[0]) {
            return Err(PanelError::NonIncreasingDates { index: index + 1 });
        }
        let n = dates.len();
        check_length(RATE_COLUMN_LABEL, n, rate.len())?;
        for (position, asset) in assets.iter().enumerate() {
            if asset.id.is_empty() {
                return Err(PanelError::EmptyAssetId { position });
            }
            if assets[..position].iter().any(|prior| prior.id == asset.id) {
                return Err(PanelError::DuplicateAsset { asset: asset.id.clone() });
            }
            check_length(&asset.id, n, asset.prices.len())?;
        }
        Ok(Self { dates, rate, assets })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn rate(&self) -> ArrayView1<'_, f64> {
        self.rate.view()
    }

    pub fn assets(&self) -> &[AssetSeries] {
        &self.assets
    }

    pub fn asset(&self, id: &str) -> Option<&AssetSeries> {
        self.assets.iter().find(|a| a.id == id)
    }

    pub fn asset_ids(&self) -> impl Iterator<Item = &str> {
        self.assets.iter().map(|a| a.id.as_str())
    }
}

fn check_length(column: &str, expected: usize, found: usize) -> Result<(), PanelError> {
    if expected != found {
        return Err(PanelError::LengthMismatch { column: column.to_string(), expected, found });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // A well-formed panel keeps assets in the given order.
    fn new_accepts_consistent_panel() {
        let panel = Panel::new(
            vec![day(1), day(2), day(3)],
            vec![0.01, 0.01, 0.02],
            vec![AssetSeries::new("usdt", vec![1.0, 0.99, 1.0]), AssetSeries::new("eth", vec![3.0, 3.1, 2.9])],
        )
        .unwrap();

        assert_eq!(panel.len(), 3);
        assert_eq!(panel.asset_ids().collect::<Vec<_>>(), vec!["usdt", "eth"]);
        assert!(panel.asset("eth").is_some());
        assert!(panel.asset("bit").is_none());
    }

    #[test]
    // Purpose
    // -------
    // Duplicate or decreasing dates are rejected at the offending index.
    fn new_rejects_non_increasing_dates() {
        let err = Panel::new(vec![day(1), day(2), day(2)], vec![0.0; 3], vec![]).unwrap_err();

        assert_eq!(err, PanelError::NonIncreasingDates { index: 2 });
    }

    #[test]
    // Purpose
    // -------
    // Ragged columns and duplicate ids are rejected.
    fn new_rejects_ragged_and_duplicate_columns() {
        let dates = vec![day(1), day(2)];

        let ragged = Panel::new(dates.clone(), vec![0.0; 2], vec![AssetSeries::new("a", vec![1.0])]);
        let short_rate = Panel::new(dates.clone(), vec![0.0], vec![]);
        let duplicate = Panel::new(
            dates,
            vec![0.0; 2],
            vec![AssetSeries::new("a", vec![1.0; 2]), AssetSeries::new("a", vec![1.0; 2])],
        );

        assert!(matches!(ragged, Err(PanelError::LengthMismatch { found: 1, .. })));
        assert!(matches!(short_rate, Err(PanelError::LengthMismatch { expected: 2, found: 1, .. })));
        assert_eq!(duplicate, Err(PanelError::DuplicateAsset { asset: "a".to_string() }));
    }
}
