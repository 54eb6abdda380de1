//! Asset classification by static membership lists.
//!
//! An asset is classified once per run:
//! - listed in `global_search` → [`AssetClass::HeavyTailed`];
//! - else listed in `non_stablecoins` → [`AssetClass::Plain`];
//! - else → [`AssetClass::Stablecoin`].
//!
//! The lists are immutable configuration handed to the classifier at
//! construction; matching is exact and case-sensitive.
use crate::distance::strategy::StrategyKind;

/// Pricing/solver regime of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    /// Pegged token: stablecoin fold applied, direct solve.
    Stablecoin,
    /// Fiat currency or liquid crypto: no fold, direct solve.
    Plain,
    /// Crypto with heavy-tailed returns: no fold, global search.
    HeavyTailed,
}

impl AssetClass {
    /// Whether the stablecoin fold applies to implied prices.
    pub fn folds(self) -> bool {
        matches!(self, AssetClass::Stablecoin)
    }

    /// Fixed solver policy for the class.
    pub fn strategy(self) -> StrategyKind {
        match self {
            AssetClass::HeavyTailed => StrategyKind::GlobalSearch,
            AssetClass::Stablecoin | AssetClass::Plain => StrategyKind::Direct,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AssetClass::Stablecoin => "stablecoin",
            AssetClass::Plain => "plain",
            AssetClass::HeavyTailed => "heavy-tailed",
        }
    }
}

impl std::fmt::Display for AssetClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Membership lists driving classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierLists {
    /// Assets priced without the stablecoin fold.
    pub non_stablecoins: Vec<String>,
    /// Assets solved by global search instead of root finding.
    pub global_search: Vec<String>,
}

impl ClassifierLists {
    pub fn new<S: Into<String>>(
        non_stablecoins: impl IntoIterator<Item = S>, global_search: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            non_stablecoins: non_stablecoins.into_iter().map(Into::into).collect(),
            global_search: global_search.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ClassifierLists {
    fn default() -> Self {
        Self::new(["bit", "eth", "xrp", "NGN", "Lira"], ["bit", "eth"])
    }
}

/// Classifier over an immutable [`ClassifierLists`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssetClassifier {
    lists: ClassifierLists,
}

impl AssetClassifier {
    pub fn new(lists: ClassifierLists) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &ClassifierLists {
        &self.lists
    }

    pub fn classify(&self, asset: &str) -> AssetClass {
        if self.lists.global_search.iter().any(|a| a == asset) {
            AssetClass::HeavyTailed
        } else if self.lists.non_stablecoins.iter().any(|a| a == asset) {
            AssetClass::Plain
        } else {
            AssetClass::Stablecoin
        }
    }
}
