//! Current Ratio.
//!
//! Current Ratio measures a company's ability to pay short-term obligations.
//! Higher ratios indicate better liquidity.

use crate::{
    formula::safe_div,
    registry::RatioCategory,
    traits::{Ratio, RatioUnit},
};
use polars::prelude::*;

/// Current Ratio.
///
/// Current Ratio is calculated as:
/// ```text
/// Current Ratio = Current Assets / Current Liabilities
/// ```
///
/// A ratio above 1.0 indicates the company can cover its short-term
/// liabilities with short-term assets.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentRatio;

impl Ratio for CurrentRatio {
    fn name(&self) -> &str {
        "Current_Ratio"
    }

    fn description(&self) -> &str {
        "Current Ratio - current assets divided by current liabilities"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Liquidity
    }

    fn required_columns(&self) -> &[&str] {
        &["current_assets", "current_liabilities"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Multiple
    }

    fn expr(&self) -> Expr {
        safe_div(col("current_assets"), col("current_liabilities"))
    }
}
