//! Equity Multiplier.
//!
//! The financial-leverage factor of the DuPont decomposition.

use crate::{
    formula::safe_div,
    registry::RatioCategory,
    traits::{Ratio, RatioUnit},
};
use polars::prelude::*;

/// Equity Multiplier.
///
/// ```text
/// Equity Multiplier = Total Assets / Shareholders' Equity
/// ```
///
/// A multiplier of 4 means every unit of equity supports four units of assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct EquityMultiplier;

impl Ratio for EquityMultiplier {
    fn name(&self) -> &str {
        "Equity_Multiplier"
    }

    fn description(&self) -> &str {
        "Equity Multiplier - total assets divided by shareholders' equity"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Leverage
    }

    fn required_columns(&self) -> &[&str] {
        &["total_assets", "shareholders_equity"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Multiple
    }

    fn expr(&self) -> Expr {
        safe_div(col("total_assets"), col("shareholders_equity"))
    }
}
