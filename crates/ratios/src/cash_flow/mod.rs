//! Cash flow ratios - quality of earnings and cash generation
//!
//! These ratios need a cash flow statement attached to the statements.
//! Without one the category is simply absent from the analysis.

pub mod conversion;

pub use conversion::{FcfMargin, OcfToNetIncome};
