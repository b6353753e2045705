//! Cash conversion ratios.
//!
//! Both compare a cash figure against an accrual figure from the income
//! statement for the same year.

use crate::{
    formula::{percent, safe_div},
    registry::RatioCategory,
    traits::{Ratio, RatioUnit},
};
use polars::prelude::*;

/// Operating Cash Flow to Net Income.
///
/// ```text
/// OCF to NI = Operating Cash Flow / Net Income
/// ```
///
/// Values well above 1.0 mean reported profit is backed by cash. Undefined
/// in a break-even year.
#[derive(Debug, Clone, Copy, Default)]
pub struct OcfToNetIncome;

impl Ratio for OcfToNetIncome {
    fn name(&self) -> &str {
        "OCF_to_NI"
    }

    fn description(&self) -> &str {
        "OCF to Net Income - operating cash flow divided by net income"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::CashFlow
    }

    fn required_columns(&self) -> &[&str] {
        &["operating_cash_flow", "net_income"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Multiple
    }

    fn expr(&self) -> Expr {
        safe_div(col("operating_cash_flow"), col("net_income"))
    }
}

/// Free Cash Flow Margin.
///
/// ```text
/// FCF Margin % = Free Cash Flow / Revenue * 100
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FcfMargin;

impl Ratio for FcfMargin {
    fn name(&self) -> &str {
        "FCF_Margin_%"
    }

    fn description(&self) -> &str {
        "FCF Margin - free cash flow as a percentage of revenue"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::CashFlow
    }

    fn required_columns(&self) -> &[&str] {
        &["free_cash_flow", "revenue"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Percent
    }

    fn expr(&self) -> Expr {
        percent(safe_div(col("free_cash_flow"), col("revenue")))
    }
}
