//! Working capital, in absolute terms and relative to revenue.

use crate::{
    formula::{percent, safe_div},
    registry::RatioCategory,
    traits::{Ratio, RatioUnit},
};
use polars::prelude::*;

fn working_capital() -> Expr {
    col("current_assets") - col("current_liabilities")
}

/// Working Capital.
///
/// ```text
/// Working Capital = Current Assets - Current Liabilities
/// ```
///
/// Expressed in the statement currency, so it is always defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkingCapital;

impl Ratio for WorkingCapital {
    fn name(&self) -> &str {
        "Working_Capital"
    }

    fn description(&self) -> &str {
        "Working Capital - current assets less current liabilities"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Liquidity
    }

    fn required_columns(&self) -> &[&str] {
        &["current_assets", "current_liabilities"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Currency
    }

    fn expr(&self) -> Expr {
        working_capital()
    }
}

/// Working Capital to Revenue.
///
/// ```text
/// WC to Revenue % = (Current Assets - Current Liabilities) / Revenue * 100
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkingCapitalToRevenue;

impl Ratio for WorkingCapitalToRevenue {
    fn name(&self) -> &str {
        "WC_to_Revenue_%"
    }

    fn description(&self) -> &str {
        "Working Capital to Revenue - working capital as a percentage of revenue"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Liquidity
    }

    fn required_columns(&self) -> &[&str] {
        &["current_assets", "current_liabilities", "revenue"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Percent
    }

    fn expr(&self) -> Expr {
        percent(safe_div(working_capital(), col("revenue")))
    }
}
