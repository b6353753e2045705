//! Ratio registry for discovery and introspection.
//!
//! The registry holds the ratio definitions in reporting order. The engine
//! builds each category table from the ratios registered under it.

use crate::{Ratio, traits::RatioUnit};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ratio category for grouping related ratios.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioCategory {
    /// Margins and returns on capital
    #[display("profitability")]
    Profitability,
    /// Short-term solvency
    #[display("liquidity")]
    Liquidity,
    /// Capital structure and debt service
    #[display("leverage")]
    Leverage,
    /// Asset utilisation
    #[display("efficiency")]
    Efficiency,
    /// Cash generation, needs a cash flow statement
    #[display("cash_flow")]
    #[serde(rename = "cash_flow")]
    CashFlow,
}

impl RatioCategory {
    /// All categories in reporting order.
    pub const ALL: [Self; 5] = [
        Self::Profitability,
        Self::Liquidity,
        Self::Leverage,
        Self::Efficiency,
        Self::CashFlow,
    ];
}

/// Metadata for ratio introspection.
#[derive(Debug, Clone, Serialize)]
pub struct RatioInfo {
    /// Ratio name (unique identifier)
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Ratio category
    pub category: RatioCategory,
    /// Required input columns
    pub required_columns: Vec<String>,
    /// Years of history needed
    pub lookback: usize,
    /// Unit of the values
    pub unit: RatioUnit,
}

impl RatioInfo {
    fn from_ratio(ratio: &dyn Ratio) -> Self {
        Self {
            name: ratio.name().to_string(),
            description: ratio.description().to_string(),
            category: ratio.category(),
            required_columns: ratio
                .required_columns()
                .iter()
                .map(|s| s.to_string())
                .collect(),
            lookback: ratio.lookback(),
            unit: ratio.unit(),
        }
    }
}

/// Ordered registry of ratio definitions.
#[derive(Debug, Default, Clone)]
pub struct RatioRegistry {
    ratios: Vec<Arc<dyn Ratio>>,
}

impl RatioRegistry {
    /// Create a new empty registry.
    pub const fn new() -> Self {
        Self { ratios: Vec::new() }
    }

    /// Register all standard ratios.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        // Profitability
        registry.register(Arc::new(crate::profitability::GrossMargin));
        registry.register(Arc::new(crate::profitability::EbitMargin));
        registry.register(Arc::new(crate::profitability::NetMargin));
        registry.register(Arc::new(crate::profitability::Roa));
        registry.register(Arc::new(crate::profitability::Roe));

        // Liquidity
        registry.register(Arc::new(crate::liquidity::CurrentRatio));
        registry.register(Arc::new(crate::liquidity::WorkingCapital));
        registry.register(Arc::new(crate::liquidity::WorkingCapitalToRevenue));

        // Leverage
        registry.register(Arc::new(crate::leverage::DebtToEquity));
        registry.register(Arc::new(crate::leverage::DebtToAssets));
        registry.register(Arc::new(crate::leverage::EquityMultiplier));
        registry.register(Arc::new(crate::leverage::InterestCoverage));

        // Efficiency
        registry.register(Arc::new(crate::efficiency::AssetTurnover));
        registry.register(Arc::new(crate::efficiency::FixedAssetTurnover));
        registry.register(Arc::new(crate::efficiency::AssetTurnoverChange));

        // Cash flow
        registry.register(Arc::new(crate::cash_flow::OcfToNetIncome));
        registry.register(Arc::new(crate::cash_flow::FcfMargin));

        registry
    }

    /// Register a ratio, replacing any existing ratio with the same name in place.
    pub fn register(&mut self, ratio: Arc<dyn Ratio>) {
        match self.ratios.iter().position(|r| r.name() == ratio.name()) {
            Some(idx) => self.ratios[idx] = ratio,
            None => self.ratios.push(ratio),
        }
    }

    /// Get a ratio by name.
    pub fn get(&self, name: &str) -> Option<&dyn Ratio> {
        self.ratios
            .iter()
            .find(|r| r.name() == name)
            .map(|r| r.as_ref())
    }

    /// Get ratios by category, in registration order.
    pub fn by_category(&self, category: RatioCategory) -> Vec<&dyn Ratio> {
        self.ratios
            .iter()
            .filter(|r| r.category() == category)
            .map(|r| r.as_ref())
            .collect()
    }

    /// Get all ratio names.
    pub fn names(&self) -> Vec<&str> {
        self.ratios.iter().map(|r| r.name()).collect()
    }

    /// Get metadata for all ratios.
    pub fn all_info(&self) -> Vec<RatioInfo> {
        self.ratios
            .iter()
            .map(|r| RatioInfo::from_ratio(r.as_ref()))
            .collect()
    }

    /// Get metadata for a single ratio.
    pub fn info(&self, name: &str) -> Option<RatioInfo> {
        self.get(name).map(RatioInfo::from_ratio)
    }

    /// Number of registered ratios.
    pub fn len(&self) -> usize {
        self.ratios.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.ratios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_defaults() {
        let registry = RatioRegistry::with_defaults();
        assert_eq!(registry.len(), 17);
        assert!(registry.get("ROE_%").is_some());
        assert!(registry.get("roe").is_none());
    }

    #[test]
    fn test_by_category_preserves_order() {
        let registry = RatioRegistry::with_defaults();
        let names: Vec<_> = registry
            .by_category(RatioCategory::Profitability)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Gross_Margin_%", "EBIT_Margin_%", "Net_Margin_%", "ROA_%", "ROE_%"]
        );
    }

    #[test]
    fn test_every_category_populated() {
        let registry = RatioRegistry::with_defaults();
        for category in RatioCategory::ALL {
            assert!(!registry.by_category(category).is_empty(), "{category}");
        }
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = RatioRegistry::with_defaults();
        registry.register(Arc::new(crate::profitability::Roe));
        assert_eq!(registry.len(), 17);
    }

    #[test]
    fn test_all_info() {
        let registry = RatioRegistry::with_defaults();
        for info in registry.all_info() {
            assert!(!info.name.is_empty());
            assert!(!info.description.is_empty());
            assert!(!info.required_columns.is_empty());
        }

        let change = registry.info("Asset_Turnover_Change_%").unwrap();
        assert_eq!(change.lookback, 2);
        assert_eq!(change.category, RatioCategory::Efficiency);
    }

    #[test]
    fn test_cash_flow_category_serializes_snake_case() {
        assert_eq!(RatioCategory::CashFlow.to_string(), "cash_flow");
        assert_eq!(
            serde_json::to_string(&RatioCategory::CashFlow).unwrap(),
            "\"cash_flow\""
        );
        let names: Vec<_> = RatioRegistry::with_defaults()
            .by_category(RatioCategory::CashFlow)
            .iter()
            .map(|r| r.name().to_string())
            .collect();
        assert_eq!(names, vec!["OCF_to_NI", "FCF_Margin_%"]);
    }
}
