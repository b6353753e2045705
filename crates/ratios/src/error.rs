//! Error types for ratio computations.

use thiserror::Error;

/// Result type for ratio operations.
pub type Result<T> = std::result::Result<T, RatioError>;

/// Errors that can occur while validating statements or computing ratios.
///
/// Zero denominators are not errors: they produce undefined cells in the
/// resulting [`RatioTable`](crate::RatioTable).
#[derive(Debug, Error)]
pub enum RatioError {
    /// One or both statements contain no rows
    #[error("Empty statements: income has {income} rows, balance sheet has {balance} rows")]
    EmptyStatements {
        /// Rows in the income statement
        income: usize,
        /// Rows in the balance sheet
        balance: usize,
    },

    /// Income statement and balance sheet cover a different number of years
    #[error("Row count mismatch: income statement has {income} years, balance sheet has {balance}")]
    RowCountMismatch {
        /// Rows in the income statement
        income: usize,
        /// Rows in the balance sheet
        balance: usize,
    },

    /// The same year appears twice in one statement
    #[error("Duplicate year {year} in {statement}")]
    DuplicateYear {
        /// Statement containing the duplicate
        statement: &'static str,
        /// Repeated year
        year: i32,
    },

    /// Years are not in strictly increasing order
    #[error("Years not increasing in {statement}: {previous} followed by {next}")]
    NonIncreasingYears {
        /// Statement with the ordering violation
        statement: &'static str,
        /// Year of the earlier row
        previous: i32,
        /// Year of the later row
        next: i32,
    },

    /// Row-aligned years differ between the two statements
    #[error("Year mismatch at row {row}: income statement {income}, balance sheet {balance}")]
    YearMismatch {
        /// Zero-based row index
        row: usize,
        /// Income statement year
        income: i32,
        /// Balance sheet year
        balance: i32,
    },

    /// Cash flow statement covers a different number of years
    #[error("Row count mismatch: statements have {statements} years, cash flow has {cash_flow}")]
    CashFlowRowCountMismatch {
        /// Rows in the income statement and balance sheet
        statements: usize,
        /// Rows in the cash flow statement
        cash_flow: usize,
    },

    /// Row-aligned years differ between the cash flow statement and the others
    #[error("Year mismatch at row {row}: statements {statements}, cash flow {cash_flow}")]
    CashFlowYearMismatch {
        /// Zero-based row index
        row: usize,
        /// Income statement and balance sheet year
        statements: i32,
        /// Cash flow statement year
        cash_flow: i32,
    },

    /// Missing required column in input data
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Ratio not found in registry
    #[error("Ratio not found: {0}")]
    NotFound(String),

    /// Computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Invalid engine configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Polars DataFrame error
    #[error("DataFrame error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}
