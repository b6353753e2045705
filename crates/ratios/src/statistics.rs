//! Summary statistics across the analysis window.

use crate::{
    Result,
    formula::{defined, pct_change, percent, safe_div},
    statements::{FinancialStatements, YEAR},
    table::RatioTable,
};
use polars::prelude::*;
use serde::Serialize;

/// Distribution and overall change of revenue.
///
/// Years with non-finite revenue are left out of every figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RevenueSummary {
    /// Mean revenue
    pub mean: f64,
    /// Sample standard deviation; undefined for a single year
    pub std_dev: Option<f64>,
    /// Smallest revenue
    pub min: f64,
    /// Largest revenue
    pub max: f64,
    /// Last year minus first year; undefined if either end is missing
    pub total_change: Option<f64>,
    /// `(last / first - 1) * 100`; undefined for zero first-year revenue
    pub pct_change: Option<f64>,
}

/// Average margins in percent, ignoring undefined years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginAverages {
    /// Average gross margin
    pub gross: Option<f64>,
    /// Average EBIT margin
    pub ebit: Option<f64>,
    /// Average net margin
    pub net: Option<f64>,
}

/// Revenue statistics and average margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStatistics {
    /// Revenue distribution
    pub revenue: RevenueSummary,
    /// Average margins
    pub margins: MarginAverages,
}

fn finite(column: &str) -> Expr {
    col(column).fill_nan(lit(NULL))
}

fn average_margin(numerator: &str) -> Expr {
    percent(safe_div(finite(numerator), finite("revenue")))
        .fill_nan(lit(NULL))
        .mean()
}

impl SummaryStatistics {
    /// Compute summary statistics over all years.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RatioError::Computation`] if no year has a finite revenue.
    pub fn compute(statements: &FinancialStatements) -> Result<Self> {
        let revenue = finite("revenue");
        let frame = statements
            .to_lazy()?
            .select([
                revenue.clone().mean().alias("mean"),
                revenue.clone().std(1).alias("std_dev"),
                revenue.clone().min().alias("min"),
                revenue.clone().max().alias("max"),
                (revenue.clone().last() - revenue.clone().first()).alias("total_change"),
                percent(safe_div(revenue.clone().last(), revenue.first()) - lit(1.0))
                    .alias("pct_change"),
                average_margin("gross_profit").alias("gross"),
                average_margin("ebit").alias("ebit"),
                average_margin("net_income").alias("net"),
            ])
            .collect()?;

        let scalar = |name: &str| -> Result<Option<f64>> {
            Ok(defined(frame.column(name)?.f64()?.get(0)))
        };
        let required = |name: &str| -> Result<f64> {
            scalar(name)?.ok_or_else(|| {
                crate::RatioError::Computation(format!("revenue {name} is undefined"))
            })
        };

        Ok(Self {
            revenue: RevenueSummary {
                mean: required("mean")?,
                std_dev: scalar("std_dev")?,
                min: required("min")?,
                max: required("max")?,
                total_change: scalar("total_change")?,
                pct_change: scalar("pct_change")?,
            },
            margins: MarginAverages {
                gross: scalar("gross")?,
                ebit: scalar("ebit")?,
                net: scalar("net")?,
            },
        })
    }
}

/// Year-over-year revenue growth in percent; the first year is undefined.
pub fn revenue_growth(statements: &FinancialStatements) -> Result<RatioTable> {
    let frame = statements
        .to_lazy()?
        .select([col(YEAR), pct_change(col("revenue")).alias("Revenue_Growth_%")])
        .collect()?;
    RatioTable::from_frame("growth", &frame, &["Revenue_Growth_%"])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample;
    use approx::assert_relative_eq;

    #[test]
    fn test_revenue_summary() {
        let statements = sample::statements().unwrap();
        let stats = SummaryStatistics::compute(&statements).unwrap();
        let revenue = stats.revenue;

        assert_relative_eq!(revenue.mean, 755.225, epsilon = 1e-9);
        assert_relative_eq!(revenue.min, 573.1, epsilon = 1e-9);
        assert_relative_eq!(revenue.max, 836.3, epsilon = 1e-9);
        assert_relative_eq!(revenue.total_change.unwrap(), -211.8, epsilon = 1e-9);
        assert_relative_eq!(revenue.pct_change.unwrap(), -26.98433, epsilon = 1e-4);
        assert_relative_eq!(revenue.std_dev.unwrap(), 123.44725, epsilon = 1e-4);
    }

    #[test]
    fn test_non_finite_revenue_year_is_skipped() {
        let mut income = sample::income_statement();
        income[1].revenue = f64::NAN;
        let statements = FinancialStatements::new(income, sample::balance_sheet()).unwrap();
        let stats = SummaryStatistics::compute(&statements).unwrap();
        let revenue = stats.revenue;

        assert_relative_eq!(revenue.mean, (784.9 + 836.3 + 573.1) / 3.0, epsilon = 1e-9);
        assert_relative_eq!(revenue.min, 573.1, epsilon = 1e-9);
        assert_relative_eq!(revenue.max, 836.3, epsilon = 1e-9);
        assert_relative_eq!(revenue.total_change.unwrap(), -211.8, epsilon = 1e-9);
        assert!(revenue.std_dev.is_some());

        let expected_gross = (460.2 / 784.9 + 483.1 / 836.3 + 224.2 / 573.1) / 3.0 * 100.0;
        assert_relative_eq!(stats.margins.gross.unwrap(), expected_gross, epsilon = 1e-9);
    }

    #[test]
    fn test_undefined_first_revenue() {
        let mut income = sample::income_statement();
        income[0].revenue = f64::NAN;
        let statements = FinancialStatements::new(income, sample::balance_sheet()).unwrap();
        let revenue = SummaryStatistics::compute(&statements).unwrap().revenue;

        assert_eq!(revenue.total_change, None);
        assert_eq!(revenue.pct_change, None);
        assert_relative_eq!(revenue.max, 836.3, epsilon = 1e-9);
    }

    #[test]
    fn test_margin_averages() {
        let statements = sample::statements().unwrap();
        let stats = SummaryStatistics::compute(&statements).unwrap();

        let expected_net = (2.5 / 784.9 + 18.4 / 826.6 + 14.7 / 836.3 + 2.2 / 573.1) / 4.0 * 100.0;
        assert_relative_eq!(stats.margins.net.unwrap(), expected_net, epsilon = 1e-9);
        assert!(stats.margins.gross.unwrap() > 50.0);
    }

    #[test]
    fn test_revenue_growth() {
        let statements = sample::statements().unwrap();
        let growth = revenue_growth(&statements).unwrap();

        assert_eq!(growth.value("Revenue_Growth_%", 2015), None);
        assert_relative_eq!(
            growth.value("Revenue_Growth_%", 2016).unwrap(),
            (826.6 / 784.9 - 1.0) * 100.0,
            epsilon = 1e-9
        );
    }
}
