//! DuPont decomposition of return on equity.
//!
//! ```text
//! ROE = Net Margin * Asset Turnover * Equity Multiplier
//!     = (NI / Revenue) * (Revenue / TA) * (TA / Equity)
//! ```
//!
//! The product is algebraically identical to `NI / Equity`, so the
//! decomposed and directly computed ROE must agree. A disagreement points at
//! inconsistent input figures and is reported as a [`DupontWarning`].

use crate::{
    Result,
    efficiency::AssetTurnover,
    formula::percent,
    leverage::EquityMultiplier,
    profitability::{NetMargin, Roe},
    statements::FinancialStatements,
    table::RatioTable,
    traits::Ratio,
};
use derive_more::Display;
use polars::prelude::*;
use serde::Serialize;

/// Decomposed ROE, in percent.
pub const ROE_CALCULATED: &str = "ROE_Calculated_%";
/// Directly computed ROE, in percent.
pub const ROE_ACTUAL: &str = "ROE_Actual_%";

/// Why a year failed the DuPont cross-check.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DupontIssue {
    /// Both values defined but outside tolerance
    #[display("decomposed ROE disagrees with actual ROE")]
    Mismatch,
    /// Actual ROE defined but a decomposition factor is not
    #[display("ROE cannot be decomposed")]
    Undecomposable,
}

/// Data-consistency warning raised by the DuPont cross-check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DupontWarning {
    /// Year the warning applies to
    pub year: i32,
    /// Kind of inconsistency
    pub issue: DupontIssue,
    /// Decomposed ROE in percent
    pub calculated: Option<f64>,
    /// Directly computed ROE in percent
    pub actual: Option<f64>,
}

/// DuPont table plus any consistency warnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DupontAnalysis {
    /// Columns: `Net_Margin_%`, `Asset_Turnover`, `Equity_Multiplier`,
    /// [`ROE_CALCULATED`], [`ROE_ACTUAL`]
    pub table: RatioTable,
    /// Years where the two ROE figures disagree
    pub warnings: Vec<DupontWarning>,
}

impl DupontAnalysis {
    /// Run the decomposition and cross-check with the given relative tolerance.
    pub fn compute(statements: &FinancialStatements, tolerance: f64) -> Result<Self> {
        let net_margin = NetMargin;
        let turnover = AssetTurnover;
        let multiplier = EquityMultiplier;

        let frame = statements
            .to_lazy()?
            .with_columns([
                net_margin.expr().alias(net_margin.name()),
                turnover.expr().alias(turnover.name()),
                multiplier.expr().alias(multiplier.name()),
                Roe.expr().alias(ROE_ACTUAL),
            ])
            .with_column(
                percent(
                    col(net_margin.name()) / lit(100.0)
                        * col(turnover.name())
                        * col(multiplier.name()),
                )
                .alias(ROE_CALCULATED),
            )
            .collect()?;

        let table = RatioTable::from_frame(
            "dupont",
            &frame,
            &[
                net_margin.name(),
                turnover.name(),
                multiplier.name(),
                ROE_CALCULATED,
                ROE_ACTUAL,
            ],
        )?;

        let warnings = cross_check(&table, tolerance);
        for w in &warnings {
            tracing::warn!(
                year = w.year,
                calculated = ?w.calculated,
                actual = ?w.actual,
                "DuPont consistency check failed: {}",
                w.issue
            );
        }

        Ok(Self { table, warnings })
    }

    /// True when every year passed the cross-check.
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }
}

fn cross_check(table: &RatioTable, tolerance: f64) -> Vec<DupontWarning> {
    let empty = Vec::new();
    let calculated = table.get(ROE_CALCULATED).map_or(&empty, |s| &s.values);
    let actual = table.get(ROE_ACTUAL).map_or(&empty, |s| &s.values);

    table
        .years()
        .iter()
        .zip(calculated.iter().zip(actual))
        .filter_map(|(year, (calc, act))| check_year(*year, *calc, *act, tolerance))
        .collect()
}

/// Compare decomposed and actual ROE for one year.
///
/// Two defined values agree when `|calc - actual| <= tolerance * max(|calc|, |actual|)`.
/// A year where both are undefined (e.g. zero equity) is not a warning.
pub fn check_year(
    year: i32,
    calculated: Option<f64>,
    actual: Option<f64>,
    tolerance: f64,
) -> Option<DupontWarning> {
    let issue = match (calculated, actual) {
        (Some(c), Some(a)) if (c - a).abs() <= tolerance * c.abs().max(a.abs()) => return None,
        (None, None) => return None,
        (None, Some(_)) => DupontIssue::Undecomposable,
        _ => DupontIssue::Mismatch,
    };

    Some(DupontWarning {
        year,
        issue,
        calculated,
        actual,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        sample,
        statements::{BalanceSheetRecord, IncomeStatementRecord},
    };
    use approx::assert_relative_eq;

    #[test]
    fn test_dupont_identity_holds_for_sample() {
        let statements = sample::statements().unwrap();
        let dupont = DupontAnalysis::compute(&statements, 1e-6).unwrap();

        assert!(dupont.is_consistent());
        for year in statements.years() {
            let calc = dupont.table.value(ROE_CALCULATED, year).unwrap();
            let actual = dupont.table.value(ROE_ACTUAL, year).unwrap();
            assert_relative_eq!(calc, actual, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_dupont_2018_components() {
        let statements = sample::statements().unwrap();
        let dupont = DupontAnalysis::compute(&statements, 1e-6).unwrap();
        let t = &dupont.table;

        assert_relative_eq!(t.value("Net_Margin_%", 2018).unwrap(), 0.38388, epsilon = 1e-4);
        assert_relative_eq!(t.value("Asset_Turnover", 2018).unwrap(), 0.58480, epsilon = 1e-4);
        assert_relative_eq!(t.value("Equity_Multiplier", 2018).unwrap(), 6.125, epsilon = 1e-12);
        assert_relative_eq!(t.value(ROE_CALCULATED, 2018).unwrap(), 1.375, epsilon = 1e-9);
        assert_relative_eq!(t.value(ROE_ACTUAL, 2018).unwrap(), 1.375, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_revenue_is_undecomposable() {
        let mut income: Vec<IncomeStatementRecord> = sample::income_statement();
        income[1].revenue = 0.0;
        let statements = FinancialStatements::new(income, sample::balance_sheet()).unwrap();

        let dupont = DupontAnalysis::compute(&statements, 1e-6).unwrap();
        assert_eq!(dupont.warnings.len(), 1);
        assert_eq!(dupont.warnings[0].year, 2016);
        assert_eq!(dupont.warnings[0].issue, DupontIssue::Undecomposable);
        assert!(dupont.warnings[0].actual.is_some());
    }

    #[test]
    fn test_zero_equity_is_not_a_warning() {
        let mut balance: Vec<BalanceSheetRecord> = sample::balance_sheet();
        balance[0].shareholders_equity = 0.0;
        let statements = FinancialStatements::new(sample::income_statement(), balance).unwrap();

        let dupont = DupontAnalysis::compute(&statements, 1e-6).unwrap();
        assert!(dupont.is_consistent());
        assert_eq!(dupont.table.value(ROE_ACTUAL, 2015), None);
        assert_eq!(dupont.table.value(ROE_CALCULATED, 2015), None);
    }

    #[test]
    fn test_check_year() {
        assert_eq!(check_year(2015, Some(1.0), Some(1.0 + 1e-9), 1e-6), None);
        assert_eq!(check_year(2015, Some(0.0), Some(0.0), 1e-6), None);
        assert_eq!(check_year(2015, None, None, 1e-6), None);

        let w = check_year(2016, Some(1.0), Some(1.1), 1e-6).unwrap();
        assert_eq!(w.issue, DupontIssue::Mismatch);
        assert_eq!(w.year, 2016);

        let w = check_year(2017, Some(2.0), None, 1e-6).unwrap();
        assert_eq!(w.issue, DupontIssue::Mismatch);
    }
}
