//! Liquidity ratios - short-term solvency
//!
//! Liquidity ratios compare current assets with the obligations falling due
//! within a year.

pub mod current_ratio;
pub mod working_capital;

pub use current_ratio::CurrentRatio;
pub use working_capital::{WorkingCapital, WorkingCapitalToRevenue};
