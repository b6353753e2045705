//! The ratio engine.
//!
//! [`RatioEngine`] evaluates the registered ratios over a validated pair of
//! statements. Every method returns a fresh immutable value; nothing is cached
//! between calls, so categories can be computed in any order.

use crate::{
    RatioError, Result,
    benchmark::{BenchmarkComparison, Benchmarks},
    config::EngineConfig,
    dupont::DupontAnalysis,
    registry::{RatioCategory, RatioRegistry},
    statements::{FinancialStatements, YEAR},
    table::{RatioSeries, RatioTable},
    trend::TrendReport,
    validation::{ValidationReport, validate},
};
use polars::prelude::*;
use serde::Serialize;

/// Key ratios collected into the summary table.
pub const SUMMARY_COLUMNS: [&str; 6] = [
    "Gross_Margin_%",
    "EBIT_Margin_%",
    "ROE_%",
    "Current_Ratio",
    "Debt_to_Equity",
    "Asset_Turnover",
];

/// Computes ratio tables, DuPont analysis, trends and benchmark comparisons.
#[derive(Debug, Clone)]
pub struct RatioEngine {
    statements: FinancialStatements,
    registry: RatioRegistry,
    config: EngineConfig,
}

impl RatioEngine {
    /// Create an engine with the default registry and configuration.
    pub fn new(statements: FinancialStatements) -> Self {
        Self {
            statements,
            registry: RatioRegistry::with_defaults(),
            config: EngineConfig::default(),
        }
    }

    /// Create an engine with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RatioError::Config`] if a threshold is negative or not finite.
    pub fn with_config(statements: FinancialStatements, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(statements)
        })
    }

    /// Replace the ratio registry.
    pub fn with_registry(mut self, registry: RatioRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Current configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Statements being analysed.
    pub const fn statements(&self) -> &FinancialStatements {
        &self.statements
    }

    /// Registered ratios.
    pub const fn registry(&self) -> &RatioRegistry {
        &self.registry
    }

    /// Compute every registered ratio of one category.
    ///
    /// # Errors
    ///
    /// Returns [`RatioError::MissingColumn`] if a ratio needs an input the
    /// statements lack, e.g. a cash flow ratio without a cash flow statement.
    pub fn category(&self, category: RatioCategory) -> Result<RatioTable> {
        let ratios = self.registry.by_category(category);
        let names: Vec<&str> = ratios.iter().map(|r| r.name()).collect();

        let mut data = self.statements.to_lazy()?;
        let schema = data.collect_schema()?;
        if let Some(column) = ratios
            .iter()
            .flat_map(|r| r.required_columns())
            .find(|c| !schema.contains(c))
        {
            return Err(RatioError::MissingColumn((*column).to_string()));
        }

        let mut exprs = Vec::with_capacity(ratios.len() + 1);
        exprs.push(col(YEAR));
        exprs.extend(ratios.iter().map(|r| r.expr().alias(r.name())));

        let frame = data.select(exprs).collect()?;
        let table = RatioTable::from_frame(category.to_string(), &frame, &names)?;

        tracing::debug!(%category, ratios = names.len(), "computed ratio table");
        Ok(table)
    }

    /// Gross, EBIT and net margins, ROA and ROE.
    pub fn profitability(&self) -> Result<RatioTable> {
        self.category(RatioCategory::Profitability)
    }

    /// Current ratio, working capital and working capital to revenue.
    pub fn liquidity(&self) -> Result<RatioTable> {
        self.category(RatioCategory::Liquidity)
    }

    /// Debt to equity, debt to assets, equity multiplier and interest coverage.
    pub fn leverage(&self) -> Result<RatioTable> {
        self.category(RatioCategory::Leverage)
    }

    /// Asset turnover, fixed asset turnover and asset turnover change.
    pub fn efficiency(&self) -> Result<RatioTable> {
        self.category(RatioCategory::Efficiency)
    }

    /// OCF to net income and FCF margin, or `None` without a cash flow statement.
    pub fn cash_flow(&self) -> Result<Option<RatioTable>> {
        if !self.statements.has_cash_flow() {
            return Ok(None);
        }
        self.category(RatioCategory::CashFlow).map(Some)
    }

    /// Compute a single registered ratio by name.
    pub fn ratio(&self, name: &str) -> Result<RatioSeries> {
        let ratio = self
            .registry
            .get(name)
            .ok_or_else(|| RatioError::NotFound(name.to_string()))?;
        let frame = ratio.compute_raw(&self.statements.to_lazy()?)?;
        let table = RatioTable::from_frame(ratio.category().to_string(), &frame, &[name])?;
        table
            .series()
            .first()
            .cloned()
            .ok_or_else(|| RatioError::NotFound(name.to_string()))
    }

    /// DuPont decomposition with the configured tolerance.
    pub fn dupont(&self) -> Result<DupontAnalysis> {
        DupontAnalysis::compute(&self.statements, self.config.dupont_tolerance)
    }

    /// Classify every series of `tables` with the configured threshold.
    pub fn trends<'a>(&self, tables: impl IntoIterator<Item = &'a RatioTable>) -> TrendReport {
        TrendReport::from_tables(tables, self.config.trend_threshold)
    }

    /// Compare `tables` against `benchmarks`.
    pub fn benchmark<'a>(
        &self,
        tables: impl IntoIterator<Item = &'a RatioTable> + Clone,
        benchmarks: &Benchmarks,
    ) -> BenchmarkComparison {
        BenchmarkComparison::compare(tables, &self.statements.years(), benchmarks)
    }

    /// Data quality checks with the configured balance tolerance.
    pub fn validate(&self) -> ValidationReport {
        validate(&self.statements, self.config.balance_tolerance)
    }

    /// Run the full analysis.
    pub fn analyze(&self, benchmarks: &Benchmarks) -> Result<RatioReport> {
        let validation = self.validate();

        let profitability = self.profitability()?;
        let liquidity = self.liquidity()?;
        let leverage = self.leverage()?;
        let efficiency = self.efficiency()?;
        let cash_flow = self.cash_flow()?;
        let dupont = self.dupont()?;

        let mut tables = vec![&profitability, &liquidity, &leverage, &efficiency];
        tables.extend(cash_flow.as_ref());
        let summary = RatioTable::select(
            "summary",
            self.statements.years(),
            tables.iter().copied(),
            &SUMMARY_COLUMNS,
        )?;
        let trends = self.trends(tables.iter().copied());
        let benchmarks = self.benchmark(tables.iter().copied(), benchmarks);

        tracing::info!(
            years = self.statements.len(),
            improving = trends.improving.len(),
            declining = trends.declining.len(),
            dupont_warnings = dupont.warnings.len(),
            "ratio analysis complete"
        );

        Ok(RatioReport {
            profitability,
            liquidity,
            leverage,
            efficiency,
            cash_flow,
            dupont,
            summary,
            trends,
            benchmarks,
            validation,
        })
    }
}

/// Everything produced by [`RatioEngine::analyze`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatioReport {
    /// Profitability table
    pub profitability: RatioTable,
    /// Liquidity table
    pub liquidity: RatioTable,
    /// Leverage table
    pub leverage: RatioTable,
    /// Efficiency table
    pub efficiency: RatioTable,
    /// Cash flow table, when a cash flow statement was supplied
    pub cash_flow: Option<RatioTable>,
    /// DuPont decomposition and cross-check
    pub dupont: DupontAnalysis,
    /// Key ratios across categories
    pub summary: RatioTable,
    /// Trend classification of the category tables
    pub trends: TrendReport,
    /// Benchmark comparison
    pub benchmarks: BenchmarkComparison,
    /// Data quality checks
    pub validation: ValidationReport,
}

impl RatioReport {
    /// Table for one category, if it was computed.
    pub const fn table(&self, category: RatioCategory) -> Option<&RatioTable> {
        match category {
            RatioCategory::Profitability => Some(&self.profitability),
            RatioCategory::Liquidity => Some(&self.liquidity),
            RatioCategory::Leverage => Some(&self.leverage),
            RatioCategory::Efficiency => Some(&self.efficiency),
            RatioCategory::CashFlow => self.cash_flow.as_ref(),
        }
    }

    /// The computed category tables in reporting order.
    pub fn tables(&self) -> Vec<&RatioTable> {
        RatioCategory::ALL
            .into_iter()
            .filter_map(|category| self.table(category))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        benchmark::Performance,
        sample,
        statements::{BalanceSheetRecord, IncomeStatementRecord},
        trend::Trend,
    };
    use approx::assert_relative_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn engine() -> RatioEngine {
        RatioEngine::new(sample::statements().unwrap())
    }

    #[rstest]
    fn test_gross_margin_matches_formula(engine: RatioEngine) {
        let table = engine.profitability().unwrap();
        for record in engine.statements().income() {
            let expected = record.gross_profit / record.revenue * 100.0;
            let actual = table.value("Gross_Margin_%", record.year).unwrap();
            assert_relative_eq!(actual, expected, max_relative = 1e-12);
        }
    }

    #[rstest]
    fn test_category_tables_shape(engine: RatioEngine) {
        assert_eq!(engine.profitability().unwrap().series().len(), 5);
        assert_eq!(engine.liquidity().unwrap().series().len(), 3);
        assert_eq!(engine.leverage().unwrap().series().len(), 4);
        assert_eq!(engine.efficiency().unwrap().series().len(), 3);

        let liquidity = engine.liquidity().unwrap();
        assert_eq!(liquidity.name(), "liquidity");
        assert_eq!(liquidity.years(), &[2015, 2016, 2017, 2018]);
        assert_relative_eq!(
            liquidity.value("Current_Ratio", 2015).unwrap(),
            1.1842,
            epsilon = 1e-4
        );
        assert_relative_eq!(liquidity.value("Working_Capital", 2018).unwrap(), 30.0);
    }

    #[rstest]
    fn test_leverage_and_efficiency_values(engine: RatioEngine) {
        let leverage = engine.leverage().unwrap();
        assert_relative_eq!(leverage.value("Equity_Multiplier", 2018).unwrap(), 6.125);
        assert_relative_eq!(
            leverage.value("Interest_Coverage", 2015).unwrap(),
            24.7 / 15.5,
            max_relative = 1e-12
        );

        let efficiency = engine.efficiency().unwrap();
        assert_eq!(efficiency.value("Asset_Turnover_Change_%", 2015), None);
        assert!(efficiency.value("Asset_Turnover_Change_%", 2016).is_some());
    }

    #[rstest]
    fn test_single_ratio_lookup(engine: RatioEngine) {
        let roe = engine.ratio("ROE_%").unwrap();
        assert_eq!(roe.values.len(), 4);
        assert_relative_eq!(roe.values[3].unwrap(), 1.375, max_relative = 1e-12);

        assert!(matches!(engine.ratio("nope"), Err(RatioError::NotFound(_))));
    }

    #[test]
    fn test_zero_equity_leaves_roe_undefined() {
        let mut balance: Vec<BalanceSheetRecord> = sample::balance_sheet();
        balance[2].shareholders_equity = 0.0;
        let engine = RatioEngine::new(
            FinancialStatements::new(sample::income_statement(), balance).unwrap(),
        );

        let profitability = engine.profitability().unwrap();
        assert_eq!(profitability.value("ROE_%", 2017), None);
        assert!(profitability.value("ROE_%", 2016).is_some());
        assert!(profitability.value("ROA_%", 2017).is_some());

        let leverage = engine.leverage().unwrap();
        assert_eq!(leverage.value("Debt_to_Equity", 2017), None);
        assert_eq!(leverage.value("Equity_Multiplier", 2017), None);

        // the full pipeline still runs
        let report = engine.analyze(&Benchmarks::uk_retail()).unwrap();
        assert_eq!(
            report.benchmarks.get("ROE_%").unwrap().performance[2],
            Performance::Below
        );
    }

    #[test]
    fn test_zero_interest_expense() {
        let mut income: Vec<IncomeStatementRecord> = sample::income_statement();
        income[0].interest_expense = 0.0;
        let engine = RatioEngine::new(
            FinancialStatements::new(income, sample::balance_sheet()).unwrap(),
        );
        let leverage = engine.leverage().unwrap();
        assert_eq!(leverage.value("Interest_Coverage", 2015), None);
    }

    #[rstest]
    fn test_analyze_sample(engine: RatioEngine) {
        let report = engine.analyze(&Benchmarks::new()).unwrap();

        assert!(report.validation.passed());
        assert!(report.dupont.is_consistent());
        assert_eq!(report.summary.series().len(), SUMMARY_COLUMNS.len());
        assert_eq!(report.table(RatioCategory::Leverage), Some(&report.leverage));
        assert_eq!(report.tables().len(), 5);

        // 58.6% -> 39.1%
        assert_eq!(
            report.trends.trend_of("profitability.Gross_Margin_%"),
            Some(Trend::Declining)
        );
        // 1.184 -> 1.103
        assert_eq!(
            report.trends.trend_of("liquidity.Current_Ratio"),
            Some(Trend::Stable)
        );
        assert_eq!(
            report.trends.trend_of("leverage.Debt_to_Equity"),
            Some(Trend::Improving)
        );
        // 18.0 -> 6.8
        assert_eq!(
            report.trends.trend_of("cash_flow.OCF_to_NI"),
            Some(Trend::Declining)
        );
        // 17 series, all with at least two defined values
        assert_eq!(report.trends.len(), 17);

        // default UK retail benchmarks
        assert_eq!(report.benchmarks.metrics.len(), 6);
        let gross = report.benchmarks.get("Gross_Margin_%").unwrap();
        assert!(gross.performance.iter().all(|p| *p == Performance::Above));
        let ebit = report.benchmarks.get("EBIT_Margin_%").unwrap();
        assert_eq!(ebit.performance[3], Performance::Below);
    }

    #[rstest]
    fn test_cash_flow_table(engine: RatioEngine) {
        let table = engine.cash_flow().unwrap().unwrap();
        assert_eq!(table.name(), "cash_flow");
        assert_relative_eq!(table.value("OCF_to_NI", 2015).unwrap(), 18.0, max_relative = 1e-12);
        assert_relative_eq!(
            table.value("FCF_Margin_%", 2018).unwrap(),
            3.0 / 573.1 * 100.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_break_even_year_leaves_ocf_to_ni_undefined() {
        let mut income = sample::income_statement();
        income[1].net_income = 0.0;
        let statements = FinancialStatements::new(income, sample::balance_sheet())
            .unwrap()
            .with_cash_flow(sample::cash_flow_statement())
            .unwrap();
        let engine = RatioEngine::new(statements);

        let table = engine.cash_flow().unwrap().unwrap();
        assert_eq!(table.value("OCF_to_NI", 2016), None);
        assert!(table.value("FCF_Margin_%", 2016).is_some());
    }

    #[test]
    fn test_without_cash_flow_statement() {
        let engine = RatioEngine::new(
            FinancialStatements::new(sample::income_statement(), sample::balance_sheet()).unwrap(),
        );
        assert_eq!(engine.cash_flow().unwrap(), None);
        assert!(matches!(
            engine.category(RatioCategory::CashFlow),
            Err(RatioError::MissingColumn(_))
        ));

        let report = engine.analyze(&Benchmarks::uk_retail()).unwrap();
        assert!(report.cash_flow.is_none());
        assert_eq!(report.table(RatioCategory::CashFlow), None);
        assert_eq!(report.tables().len(), 4);
        assert_eq!(report.trends.len(), 15);
    }

    #[test]
    fn test_custom_registry() {
        let mut registry = RatioRegistry::new();
        registry.register(std::sync::Arc::new(crate::profitability::Roe));
        registry.register(std::sync::Arc::new(crate::leverage::DebtToEquity));
        let engine = RatioEngine::new(sample::statements().unwrap()).with_registry(registry);

        assert_eq!(engine.registry().len(), 2);
        let profitability = engine.profitability().unwrap();
        assert_eq!(profitability.series().len(), 1);
        assert!(profitability.get("ROE_%").is_some());
        assert!(engine.liquidity().unwrap().series().is_empty());
        assert!(matches!(engine.ratio("Gross_Margin_%"), Err(RatioError::NotFound(_))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig {
            dupont_tolerance: -1.0,
            ..Default::default()
        };
        let err = RatioEngine::with_config(sample::statements().unwrap(), config).unwrap_err();
        assert!(matches!(err, RatioError::Config(_)));
    }

    #[test]
    fn test_trend_threshold_from_config() {
        let config = EngineConfig {
            trend_threshold: 1.0,
            ..Default::default()
        };
        let engine = RatioEngine::with_config(sample::statements().unwrap(), config).unwrap();
        let profitability = engine.profitability().unwrap();
        let trends = engine.trends([&profitability]);
        assert_eq!(
            trends.trend_of("profitability.Gross_Margin_%"),
            Some(Trend::Stable)
        );
    }

    #[test]
    fn test_report_serializes() {
        let engine = RatioEngine::new(sample::statements().unwrap());
        let report = engine.analyze(&Benchmarks::uk_retail()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["profitability"]["name"], "profitability");
        assert!(json["efficiency"]["series"][2]["values"][0].is_null());
    }
}
