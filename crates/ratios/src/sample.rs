//! Embedded sample data: House of Fraser, fiscal years 2015 to 2018 (GBP millions).

use crate::{
    Result,
    statements::{BalanceSheetRecord, CashFlowRecord, FinancialStatements, IncomeStatementRecord},
};

/// Company the sample figures describe.
pub const COMPANY: &str = "House of Fraser";

const YEARS: [i32; 4] = [2015, 2016, 2017, 2018];

/// Sample income statement rows.
pub fn income_statement() -> Vec<IncomeStatementRecord> {
    const REVENUE: [f64; 4] = [784.9, 826.6, 836.3, 573.1];
    const COGS: [f64; 4] = [324.7, 342.4, 353.2, 348.9];
    const GROSS_PROFIT: [f64; 4] = [460.2, 484.2, 483.1, 224.2];
    const OPERATING_EXPENSES: [f64; 4] = [435.5, 465.2, 451.3, 451.3];
    const EBIT: [f64; 4] = [24.7, 19.0, 31.8, -0.4];
    const INTEREST_EXPENSE: [f64; 4] = [15.5, 18.5, 19.7, 19.8];
    const TAX: [f64; 4] = [6.7, -17.9, -2.6, -22.0];
    const NET_INCOME: [f64; 4] = [2.5, 18.4, 14.7, 2.2];

    (0..YEARS.len())
        .map(|i| IncomeStatementRecord {
            year: YEARS[i],
            revenue: REVENUE[i],
            cogs: COGS[i],
            gross_profit: GROSS_PROFIT[i],
            operating_expenses: OPERATING_EXPENSES[i],
            ebit: EBIT[i],
            interest_expense: INTEREST_EXPENSE[i],
            tax: TAX[i],
            net_income: NET_INCOME[i],
        })
        .collect()
}

/// Sample balance sheet rows.
pub fn balance_sheet() -> Vec<BalanceSheetRecord> {
    const TOTAL_ASSETS: [f64; 4] = [1250.0, 1320.0, 1290.0, 980.0];
    const CURRENT_ASSETS: [f64; 4] = [450.0, 480.0, 460.0, 320.0];
    const FIXED_ASSETS: [f64; 4] = [800.0, 840.0, 830.0, 660.0];
    const TOTAL_LIABILITIES: [f64; 4] = [950.0, 1020.0, 1010.0, 820.0];
    const CURRENT_LIABILITIES: [f64; 4] = [380.0, 410.0, 395.0, 290.0];
    const LONG_TERM_DEBT: [f64; 4] = [570.0, 610.0, 615.0, 530.0];
    const SHAREHOLDERS_EQUITY: [f64; 4] = [300.0, 300.0, 280.0, 160.0];

    (0..YEARS.len())
        .map(|i| BalanceSheetRecord {
            year: YEARS[i],
            total_assets: TOTAL_ASSETS[i],
            current_assets: CURRENT_ASSETS[i],
            fixed_assets: FIXED_ASSETS[i],
            total_liabilities: TOTAL_LIABILITIES[i],
            current_liabilities: CURRENT_LIABILITIES[i],
            long_term_debt: LONG_TERM_DEBT[i],
            shareholders_equity: SHAREHOLDERS_EQUITY[i],
        })
        .collect()
}

/// Sample cash flow statement rows.
pub fn cash_flow_statement() -> Vec<CashFlowRecord> {
    const OPERATING: [f64; 4] = [45.0, 52.0, 48.0, 15.0];
    const INVESTING: [f64; 4] = [-35.0, -42.0, -38.0, -12.0];
    const FINANCING: [f64; 4] = [-15.0, -8.0, -12.0, -5.0];
    const NET_CASH_CHANGE: [f64; 4] = [-5.0, 2.0, -2.0, -2.0];
    const FREE_CASH_FLOW: [f64; 4] = [10.0, 10.0, 10.0, 3.0];

    (0..YEARS.len())
        .map(|i| CashFlowRecord {
            year: YEARS[i],
            operating_cash_flow: OPERATING[i],
            investing_cash_flow: INVESTING[i],
            financing_cash_flow: FINANCING[i],
            net_cash_change: NET_CASH_CHANGE[i],
            free_cash_flow: FREE_CASH_FLOW[i],
        })
        .collect()
}

/// Sample statements, validated, with the cash flow statement attached.
pub fn statements() -> Result<FinancialStatements> {
    FinancialStatements::new(income_statement(), balance_sheet())?
        .with_cash_flow(cash_flow_statement())
}
