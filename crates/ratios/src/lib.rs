#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ratios/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod benchmark;
pub mod cash_flow;
pub mod config;
pub mod dupont;
pub mod efficiency;
pub mod engine;
pub mod error;
pub mod formula;
pub mod leverage;
pub mod liquidity;
pub mod profitability;
pub mod registry;
pub mod sample;
pub mod statements;
pub mod statistics;
pub mod table;
pub mod traits;
pub mod trend;
pub mod validation;

// Re-export core types
pub use benchmark::{BenchmarkComparison, Benchmarks, MetricComparison, Performance};
pub use config::EngineConfig;
pub use dupont::{DupontAnalysis, DupontIssue, DupontWarning};
pub use engine::{RatioEngine, RatioReport};
pub use error::{RatioError, Result};
pub use registry::{RatioCategory, RatioInfo, RatioRegistry};
pub use statements::{
    BalanceSheetRecord, CashFlowRecord, FinancialStatements, IncomeStatementRecord, YearRecord,
};
pub use statistics::{SummaryStatistics, revenue_growth};
pub use table::{RatioSeries, RatioTable};
pub use traits::{Ratio, RatioUnit};
pub use trend::{Trend, TrendReport};
pub use validation::ValidationReport;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
