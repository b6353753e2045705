//! Core trait definitions for ratios.
//!
//! All ratios implement the [`Ratio`] trait, which provides a unified interface
//! for computing a per-year ratio series from statement data.

use crate::{RatioCategory, RatioError, Result, statements::YEAR};
use derive_more::Display;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Unit a ratio is expressed in.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioUnit {
    /// Percentage points (already multiplied by 100)
    #[display("percent")]
    Percent,
    /// Dimensionless multiple, e.g. 1.18x
    #[display("multiple")]
    Multiple,
    /// Same currency unit as the input statements
    #[display("currency")]
    Currency,
}

/// A financial ratio computed year by year from statement data.
///
/// Implementations only describe the formula; evaluation happens over the
/// frame produced by [`FinancialStatements::to_lazy`](crate::FinancialStatements::to_lazy),
/// which holds one row per year in increasing year order.
pub trait Ratio: Send + Sync + std::fmt::Debug {
    /// Series name used in tables, trend reports and benchmark maps.
    ///
    /// Stable across versions, e.g. `Gross_Margin_%`.
    fn name(&self) -> &str;

    /// Human-readable description of what this ratio measures.
    fn description(&self) -> &str;

    /// Category the ratio is reported under.
    fn category(&self) -> RatioCategory;

    /// Statement columns the formula reads.
    fn required_columns(&self) -> &[&str];

    /// Number of years of history needed for one value.
    ///
    /// Same-year ratios need 1. Year-over-year changes need 2 and are
    /// undefined for the first year.
    fn lookback(&self) -> usize {
        1
    }

    /// Unit of the resulting values.
    fn unit(&self) -> RatioUnit;

    /// Polars expression computing the ratio for every row.
    ///
    /// Zero denominators must evaluate to null rather than infinity.
    fn expr(&self) -> Expr;

    /// Evaluate the ratio over a statements frame.
    ///
    /// Returns a DataFrame with columns: `year` and the ratio name.
    fn compute_raw(&self, data: &LazyFrame) -> Result<DataFrame> {
        let mut frame = data.clone();
        let schema = frame.collect_schema()?;
        for column in self.required_columns() {
            if !schema.contains(column) {
                return Err(RatioError::MissingColumn((*column).to_string()));
            }
        }

        let result = frame
            .select([col(YEAR), self.expr().alias(self.name())])
            .collect()?;

        Ok(result)
    }
}
