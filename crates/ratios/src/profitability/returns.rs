//! Return on assets and return on equity.

use crate::{
    formula::{percent, safe_div},
    registry::RatioCategory,
    traits::{Ratio, RatioUnit},
};
use polars::prelude::*;

/// Return on Assets ratio.
///
/// ```text
/// ROA % = Net Income / Total Assets * 100
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Roa;

impl Ratio for Roa {
    fn name(&self) -> &str {
        "ROA_%"
    }

    fn description(&self) -> &str {
        "Return on Assets - net income as a percentage of total assets"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Profitability
    }

    fn required_columns(&self) -> &[&str] {
        &["net_income", "total_assets"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Percent
    }

    fn expr(&self) -> Expr {
        percent(safe_div(col("net_income"), col("total_assets")))
    }
}

/// Return on Equity ratio.
///
/// ```text
/// ROE % = Net Income / Shareholders' Equity * 100
/// ```
///
/// Undefined for years with zero equity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Roe;

impl Ratio for Roe {
    fn name(&self) -> &str {
        "ROE_%"
    }

    fn description(&self) -> &str {
        "Return on Equity - net income as a percentage of shareholders' equity"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Profitability
    }

    fn required_columns(&self) -> &[&str] {
        &["net_income", "shareholders_equity"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Percent
    }

    fn expr(&self) -> Expr {
        percent(safe_div(col("net_income"), col("shareholders_equity")))
    }
}
