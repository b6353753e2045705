//! Data quality checks on validated statements.
//!
//! Structural problems are rejected by [`FinancialStatements::new`]. The
//! checks here are advisory: they report suspicious figures without stopping
//! the analysis.

use crate::statements::FinancialStatements;
use serde::Serialize;

/// Outcome of the data quality checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Every field holds a finite number
    pub completeness: bool,
    /// Every year satisfies the accounting identity
    pub consistency: bool,
    /// Human-readable description of each problem found
    pub issues: Vec<String>,
}

impl ValidationReport {
    /// True when no issue was found.
    pub const fn passed(&self) -> bool {
        self.completeness && self.consistency
    }
}

/// Check field completeness and `total assets = total liabilities + equity`.
///
/// Cash flow fields are checked for completeness when a cash flow statement
/// is attached.
///
/// A year fails the identity when the two sides differ by more than `tolerance`.
pub fn validate(statements: &FinancialStatements, tolerance: f64) -> ValidationReport {
    let mut report = ValidationReport {
        completeness: true,
        consistency: true,
        issues: Vec::new(),
    };

    for record in statements.records() {
        let inc = &record.income;
        let bal = &record.balance;
        let mut fields = vec![
            ("revenue", inc.revenue),
            ("cogs", inc.cogs),
            ("gross_profit", inc.gross_profit),
            ("operating_expenses", inc.operating_expenses),
            ("ebit", inc.ebit),
            ("interest_expense", inc.interest_expense),
            ("tax", inc.tax),
            ("net_income", inc.net_income),
            ("total_assets", bal.total_assets),
            ("current_assets", bal.current_assets),
            ("fixed_assets", bal.fixed_assets),
            ("total_liabilities", bal.total_liabilities),
            ("current_liabilities", bal.current_liabilities),
            ("long_term_debt", bal.long_term_debt),
            ("shareholders_equity", bal.shareholders_equity),
        ];
        if let Some(cf) = &record.cash_flow {
            fields.extend([
                ("operating_cash_flow", cf.operating_cash_flow),
                ("investing_cash_flow", cf.investing_cash_flow),
                ("financing_cash_flow", cf.financing_cash_flow),
                ("net_cash_change", cf.net_cash_change),
                ("free_cash_flow", cf.free_cash_flow),
            ]);
        }
        for (name, value) in fields {
            if !value.is_finite() {
                report.completeness = false;
                report
                    .issues
                    .push(format!("Missing value for {name} in {}", record.year));
            }
        }

        let liabilities_and_equity = bal.total_liabilities + bal.shareholders_equity;
        // NaN fields already reported as incomplete
        if (bal.total_assets - liabilities_and_equity).abs() > tolerance {
            report.consistency = false;
            report
                .issues
                .push(format!("Balance sheet imbalance in {}", record.year));
        }
    }

    for issue in &report.issues {
        tracing::warn!("data quality: {issue}");
    }

    report
}
