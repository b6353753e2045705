//! Margin ratios.
//!
//! Gross, EBIT and net margins express successive profit lines as a
//! percentage of revenue.

use crate::{
    formula::{percent, safe_div},
    registry::RatioCategory,
    traits::{Ratio, RatioUnit},
};
use polars::prelude::*;

/// Gross Margin ratio.
///
/// ```text
/// Gross Margin % = Gross Profit / Revenue * 100
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GrossMargin;

impl Ratio for GrossMargin {
    fn name(&self) -> &str {
        "Gross_Margin_%"
    }

    fn description(&self) -> &str {
        "Gross Margin - gross profit as a percentage of revenue"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Profitability
    }

    fn required_columns(&self) -> &[&str] {
        &["gross_profit", "revenue"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Percent
    }

    fn expr(&self) -> Expr {
        percent(safe_div(col("gross_profit"), col("revenue")))
    }
}

/// EBIT (operating) Margin ratio.
///
/// ```text
/// EBIT Margin % = EBIT / Revenue * 100
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EbitMargin;

impl Ratio for EbitMargin {
    fn name(&self) -> &str {
        "EBIT_Margin_%"
    }

    fn description(&self) -> &str {
        "EBIT Margin - earnings before interest and tax as a percentage of revenue"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Profitability
    }

    fn required_columns(&self) -> &[&str] {
        &["ebit", "revenue"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Percent
    }

    fn expr(&self) -> Expr {
        percent(safe_div(col("ebit"), col("revenue")))
    }
}

/// Net Margin ratio.
///
/// ```text
/// Net Margin % = Net Income / Revenue * 100
/// ```
///
/// Also the first factor of the DuPont decomposition.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetMargin;

impl Ratio for NetMargin {
    fn name(&self) -> &str {
        "Net_Margin_%"
    }

    fn description(&self) -> &str {
        "Net Margin - net income as a percentage of revenue"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Profitability
    }

    fn required_columns(&self) -> &[&str] {
        &["net_income", "revenue"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Percent
    }

    fn expr(&self) -> Expr {
        percent(safe_div(col("net_income"), col("revenue")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RatioError;

    fn frame() -> LazyFrame {
        df![
            "year" => [2015, 2016, 2017],
            "revenue" => [784.9, 826.6, 0.0],
            "gross_profit" => [460.2, 484.2, 10.0],
            "ebit" => [24.7, 19.0, 5.0],
            "net_income" => [2.5, 18.4, 1.0]
        ]
        .unwrap()
        .lazy()
    }

    #[test]
    fn test_gross_margin_metadata() {
        let ratio = GrossMargin;
        assert_eq!(ratio.name(), "Gross_Margin_%");
        assert_eq!(ratio.lookback(), 1);
        assert_eq!(ratio.unit(), RatioUnit::Percent);
        assert_eq!(ratio.category(), RatioCategory::Profitability);
    }

    #[test]
    fn test_gross_margin_computation() {
        let result = GrossMargin.compute_raw(&frame()).unwrap();
        assert_eq!(result.shape(), (3, 2));

        let values = result.column("Gross_Margin_%").unwrap().f64().unwrap();
        assert!((values.get(0).unwrap() - 460.2 / 784.9 * 100.0).abs() < 1e-9);
        assert!((values.get(1).unwrap() - 484.2 / 826.6 * 100.0).abs() < 1e-9);
        // zero revenue
        assert_eq!(values.get(2), None);
    }

    #[test]
    fn test_ebit_and_net_margin_computation() {
        let ebit = EbitMargin.compute_raw(&frame()).unwrap();
        let ebit = ebit.column("EBIT_Margin_%").unwrap().f64().unwrap();
        assert!((ebit.get(0).unwrap() - 3.146897).abs() < 1e-6); // 24.7 / 784.9

        let net = NetMargin.compute_raw(&frame()).unwrap();
        let net = net.column("Net_Margin_%").unwrap().f64().unwrap();
        assert!((net.get(1).unwrap() - 2.225986).abs() < 1e-6); // 18.4 / 826.6
        assert_eq!(net.get(2), None);
    }

    #[test]
    fn test_missing_column_reported() {
        let df = df![
            "year" => [2015],
            "revenue" => [100.0]
        ]
        .unwrap();

        let err = GrossMargin.compute_raw(&df.lazy()).unwrap_err();
        assert!(matches!(err, RatioError::MissingColumn(c) if c == "gross_profit"));
    }
}
