//! Income statement, balance sheet and cash flow records.
//!
//! [`FinancialStatements`] is the validated, row-aligned pair that every ratio
//! computation consumes. Construction fails fast on structural problems so
//! that no ratio table is ever produced from misaligned rows.

use crate::{RatioError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Column holding the fiscal year in every frame built from statements.
pub const YEAR: &str = "year";

/// One fiscal year of income statement figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementRecord {
    /// Fiscal year
    pub year: i32,
    /// Total revenue
    pub revenue: f64,
    /// Cost of goods sold
    pub cogs: f64,
    /// Revenue less cost of goods sold
    pub gross_profit: f64,
    /// Operating expenses
    pub operating_expenses: f64,
    /// Earnings before interest and tax
    pub ebit: f64,
    /// Interest expense
    pub interest_expense: f64,
    /// Tax charge (negative for a credit)
    pub tax: f64,
    /// Net income
    pub net_income: f64,
}

/// One fiscal year of balance sheet figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetRecord {
    /// Fiscal year
    pub year: i32,
    /// Total assets
    pub total_assets: f64,
    /// Current assets
    pub current_assets: f64,
    /// Fixed (non-current) assets
    pub fixed_assets: f64,
    /// Total liabilities
    pub total_liabilities: f64,
    /// Current liabilities
    pub current_liabilities: f64,
    /// Long-term debt
    pub long_term_debt: f64,
    /// Shareholders' equity
    pub shareholders_equity: f64,
}

/// One fiscal year of cash flow figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlowRecord {
    /// Fiscal year
    pub year: i32,
    /// Cash generated by operations
    pub operating_cash_flow: f64,
    /// Cash used in (negative) or raised by investing
    pub investing_cash_flow: f64,
    /// Cash used in (negative) or raised by financing
    pub financing_cash_flow: f64,
    /// Net change in cash over the year
    pub net_cash_change: f64,
    /// Operating cash flow less capital expenditure
    pub free_cash_flow: f64,
}

/// All statements for a single year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearRecord {
    /// Fiscal year
    pub year: i32,
    /// Income statement figures
    pub income: IncomeStatementRecord,
    /// Balance sheet figures
    pub balance: BalanceSheetRecord,
    /// Cash flow figures, when a cash flow statement was attached
    pub cash_flow: Option<CashFlowRecord>,
}

/// Validated income statement and balance sheet, aligned year for year,
/// with an optional cash flow statement on the same years.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialStatements {
    income: Vec<IncomeStatementRecord>,
    balance: Vec<BalanceSheetRecord>,
    cash_flow: Option<Vec<CashFlowRecord>>,
}

impl FinancialStatements {
    /// Validate and pair the two statements.
    ///
    /// # Errors
    ///
    /// Returns an error if either statement is empty, if the row counts differ,
    /// if a statement repeats a year or lists years out of order, or if the
    /// years of a row disagree between the two statements.
    pub fn new(
        income: Vec<IncomeStatementRecord>,
        balance: Vec<BalanceSheetRecord>,
    ) -> Result<Self> {
        if income.is_empty() || balance.is_empty() {
            return Err(RatioError::EmptyStatements {
                income: income.len(),
                balance: balance.len(),
            });
        }
        if income.len() != balance.len() {
            return Err(RatioError::RowCountMismatch {
                income: income.len(),
                balance: balance.len(),
            });
        }

        check_years("income statement", income.iter().map(|r| r.year))?;
        check_years("balance sheet", balance.iter().map(|r| r.year))?;

        for (row, (inc, bal)) in income.iter().zip(&balance).enumerate() {
            if inc.year != bal.year {
                return Err(RatioError::YearMismatch {
                    row,
                    income: inc.year,
                    balance: bal.year,
                });
            }
        }

        Ok(Self {
            income,
            balance,
            cash_flow: None,
        })
    }

    /// Attach a cash flow statement covering the same years.
    ///
    /// # Errors
    ///
    /// Returns an error if the cash flow statement has a different number of
    /// rows, or if any row's year differs from the other statements.
    pub fn with_cash_flow(mut self, cash_flow: Vec<CashFlowRecord>) -> Result<Self> {
        if cash_flow.len() != self.len() {
            return Err(RatioError::CashFlowRowCountMismatch {
                statements: self.len(),
                cash_flow: cash_flow.len(),
            });
        }
        for (row, (inc, cf)) in self.income.iter().zip(&cash_flow).enumerate() {
            if inc.year != cf.year {
                return Err(RatioError::CashFlowYearMismatch {
                    row,
                    statements: inc.year,
                    cash_flow: cf.year,
                });
            }
        }

        self.cash_flow = Some(cash_flow);
        Ok(self)
    }

    /// Income statement rows in year order.
    pub fn income(&self) -> &[IncomeStatementRecord] {
        &self.income
    }

    /// Balance sheet rows in year order.
    pub fn balance(&self) -> &[BalanceSheetRecord] {
        &self.balance
    }

    /// Cash flow rows in year order, if attached.
    pub fn cash_flow(&self) -> Option<&[CashFlowRecord]> {
        self.cash_flow.as_deref()
    }

    /// True when a cash flow statement is attached.
    pub const fn has_cash_flow(&self) -> bool {
        self.cash_flow.is_some()
    }

    /// Number of years covered.
    pub fn len(&self) -> usize {
        self.income.len()
    }

    /// Always false for validated statements.
    pub fn is_empty(&self) -> bool {
        self.income.is_empty()
    }

    /// Covered years in increasing order.
    pub fn years(&self) -> Vec<i32> {
        self.income.iter().map(|r| r.year).collect()
    }

    /// Iterate the statements year by year.
    pub fn records(&self) -> impl Iterator<Item = YearRecord> + '_ {
        self.income
            .iter()
            .zip(&self.balance)
            .enumerate()
            .map(|(row, (income, balance))| YearRecord {
                year: income.year,
                income: *income,
                balance: *balance,
                cash_flow: self.cash_flow.as_ref().and_then(|cf| cf.get(row).copied()),
            })
    }

    /// Build a single frame with one row per year and one column per field.
    ///
    /// Column names are the snake_case field names, plus [`YEAR`]. Cash flow
    /// columns are present only when a cash flow statement is attached.
    pub fn to_frame(&self) -> Result<DataFrame> {
        let inc = &self.income;
        let bal = &self.balance;
        let field = |f: fn(&IncomeStatementRecord) -> f64| inc.iter().map(f).collect::<Vec<_>>();
        let bfield = |f: fn(&BalanceSheetRecord) -> f64| bal.iter().map(f).collect::<Vec<_>>();

        let mut frame = df![
            YEAR => self.years(),
            "revenue" => field(|r| r.revenue),
            "cogs" => field(|r| r.cogs),
            "gross_profit" => field(|r| r.gross_profit),
            "operating_expenses" => field(|r| r.operating_expenses),
            "ebit" => field(|r| r.ebit),
            "interest_expense" => field(|r| r.interest_expense),
            "tax" => field(|r| r.tax),
            "net_income" => field(|r| r.net_income),
            "total_assets" => bfield(|r| r.total_assets),
            "current_assets" => bfield(|r| r.current_assets),
            "fixed_assets" => bfield(|r| r.fixed_assets),
            "total_liabilities" => bfield(|r| r.total_liabilities),
            "current_liabilities" => bfield(|r| r.current_liabilities),
            "long_term_debt" => bfield(|r| r.long_term_debt),
            "shareholders_equity" => bfield(|r| r.shareholders_equity)
        ]?;

        let Some(cash_flow) = &self.cash_flow else {
            return Ok(frame);
        };
        let cfield = |f: fn(&CashFlowRecord) -> f64| cash_flow.iter().map(f).collect::<Vec<_>>();
        for column in [
            Column::new("operating_cash_flow".into(), cfield(|r| r.operating_cash_flow)),
            Column::new("investing_cash_flow".into(), cfield(|r| r.investing_cash_flow)),
            Column::new("financing_cash_flow".into(), cfield(|r| r.financing_cash_flow)),
            Column::new("net_cash_change".into(), cfield(|r| r.net_cash_change)),
            Column::new("free_cash_flow".into(), cfield(|r| r.free_cash_flow)),
        ] {
            frame.with_column(column)?;
        }

        Ok(frame)
    }

    /// Lazy view of [`Self::to_frame`].
    pub fn to_lazy(&self) -> Result<LazyFrame> {
        Ok(self.to_frame()?.lazy())
    }
}

fn check_years(statement: &'static str, years: impl Iterator<Item = i32>) -> Result<()> {
    let mut previous: Option<i32> = None;
    for year in years {
        match previous {
            Some(prev) if prev == year => {
                return Err(RatioError::DuplicateYear { statement, year });
            }
            Some(prev) if prev > year => {
                return Err(RatioError::NonIncreasingYears {
                    statement,
                    previous: prev,
                    next: year,
                });
            }
            _ => {}
        }
        previous = Some(year);
    }
    Ok(())
}
