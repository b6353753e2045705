//! Debt ratios.
//!
//! Both ratios use long-term debt only; current liabilities are covered by
//! the liquidity ratios.

use crate::{
    formula::safe_div,
    registry::RatioCategory,
    traits::{Ratio, RatioUnit},
};
use polars::prelude::*;

/// Debt to Equity ratio.
///
/// ```text
/// Debt to Equity = Long-Term Debt / Shareholders' Equity
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DebtToEquity;

impl Ratio for DebtToEquity {
    fn name(&self) -> &str {
        "Debt_to_Equity"
    }

    fn description(&self) -> &str {
        "Debt to Equity - long-term debt divided by shareholders' equity"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Leverage
    }

    fn required_columns(&self) -> &[&str] {
        &["long_term_debt", "shareholders_equity"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Multiple
    }

    fn expr(&self) -> Expr {
        safe_div(col("long_term_debt"), col("shareholders_equity"))
    }
}

/// Debt to Assets ratio.
///
/// ```text
/// Debt to Assets = Long-Term Debt / Total Assets
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DebtToAssets;

impl Ratio for DebtToAssets {
    fn name(&self) -> &str {
        "Debt_to_Assets"
    }

    fn description(&self) -> &str {
        "Debt to Assets - long-term debt divided by total assets"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Leverage
    }

    fn required_columns(&self) -> &[&str] {
        &["long_term_debt", "total_assets"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Multiple
    }

    fn expr(&self) -> Expr {
        safe_div(col("long_term_debt"), col("total_assets"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debt_ratios_computation() {
        let df = df![
            "year" => [2015, 2018, 2019],
            "long_term_debt" => [570.0, 530.0, 100.0],
            "shareholders_equity" => [300.0, 160.0, 0.0],
            "total_assets" => [1250.0, 980.0, 400.0]
        ]
        .unwrap()
        .lazy();

        let de = DebtToEquity.compute_raw(&df).unwrap();
        let de = de.column("Debt_to_Equity").unwrap().f64().unwrap();
        assert!((de.get(0).unwrap() - 1.9).abs() < 1e-9);
        assert!((de.get(1).unwrap() - 3.3125).abs() < 1e-9);
        assert_eq!(de.get(2), None);

        let da = DebtToAssets.compute_raw(&df).unwrap();
        let da = da.column("Debt_to_Assets").unwrap().f64().unwrap();
        assert!((da.get(0).unwrap() - 0.456).abs() < 1e-9);
        assert!((da.get(2).unwrap() - 0.25).abs() < 1e-9);
    }
}
