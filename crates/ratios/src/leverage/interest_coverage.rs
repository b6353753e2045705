//! Interest Coverage ratio.
//!
//! Interest Coverage measures a company's ability to pay interest on its debt.
//! Higher coverage ratios indicate lower default risk.

use crate::{
    formula::safe_div,
    registry::RatioCategory,
    traits::{Ratio, RatioUnit},
};
use polars::prelude::*;

/// Interest Coverage ratio.
///
/// Interest Coverage is calculated as:
/// ```text
/// Interest Coverage = EBIT / Interest Expense
/// ```
///
/// Measures how many times operating earnings cover the interest bill.
/// Negative when EBIT is a loss; undefined when there is no interest expense.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterestCoverage;

impl Ratio for InterestCoverage {
    fn name(&self) -> &str {
        "Interest_Coverage"
    }

    fn description(&self) -> &str {
        "Interest Coverage - EBIT divided by interest expense"
    }

    fn category(&self) -> RatioCategory {
        RatioCategory::Leverage
    }

    fn required_columns(&self) -> &[&str] {
        &["ebit", "interest_expense"]
    }

    fn unit(&self) -> RatioUnit {
        RatioUnit::Multiple
    }

    fn expr(&self) -> Expr {
        safe_div(col("ebit"), col("interest_expense"))
    }
}
