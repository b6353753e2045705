//! Leverage ratios - capital structure and debt service
//!
//! Leverage ratios relate long-term debt and total assets to the equity
//! base, and operating earnings to the interest bill.

pub mod debt;
pub mod equity_multiplier;
pub mod interest_coverage;

pub use debt::{DebtToAssets, DebtToEquity};
pub use equity_multiplier::EquityMultiplier;
pub use interest_coverage::InterestCoverage;
