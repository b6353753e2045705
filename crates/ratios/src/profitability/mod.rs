//! Profitability ratios - margins and returns on capital
//!
//! Margins measure how much of each unit of revenue survives each layer of
//! cost. Returns relate net income to the capital that produced it.

pub mod margins;
pub mod returns;

pub use margins::{EbitMargin, GrossMargin, NetMargin};
pub use returns::{Roa, Roe};
