//! CLI for the ratios financial ratio engine.
//!
//! This binary lists the available ratios and runs the full analysis on the
//! embedded sample statements.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use ratios::{
    Benchmarks, EngineConfig, RatioCategory, RatioEngine, RatioRegistry, RatioReport, RatioTable,
    SummaryStatistics, Trend, dupont::ROE_CALCULATED, revenue_growth, sample,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ratios")]
#[command(about = "Financial ratio analysis for multi-year company statements", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all available ratios
    List,
    /// Show information about a specific ratio
    Info {
        /// Ratio name, e.g. ROE_%
        ratio: String,
    },
    /// Run the full ratio analysis on the sample statements
    Analyze {
        /// JSON file with engine configuration overrides
        #[arg(long)]
        config: Option<PathBuf>,
        /// JSON file mapping ratio names to benchmark values
        #[arg(long)]
        benchmarks: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print revenue statistics and the key-ratio summary
    Summary,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let registry = RatioRegistry::with_defaults();

    match cli.command {
        Commands::List => list_ratios(&registry),
        Commands::Info { ratio } => show_ratio_info(&registry, &ratio)?,
        Commands::Analyze {
            config,
            benchmarks,
            json,
        } => analyze(config.as_deref(), benchmarks.as_deref(), json)?,
        Commands::Summary => summary()?,
    }

    Ok(())
}

/// List all available ratios grouped by category.
fn list_ratios(registry: &RatioRegistry) {
    println!("Available Ratios ({} total)\n", registry.len());

    for category in RatioCategory::ALL {
        println!("{}:", category);
        for ratio in registry.by_category(category) {
            println!("  {} - {}", ratio.name(), ratio.description());
        }
        println!();
    }
}

/// Show detailed information about a specific ratio.
fn show_ratio_info(registry: &RatioRegistry, ratio_name: &str) -> anyhow::Result<()> {
    let Some(info) = registry.info(ratio_name) else {
        eprintln!("Available ratios:");
        for name in registry.names() {
            eprintln!("  {}", name);
        }
        bail!("ratio '{}' not found", ratio_name);
    };

    println!("Ratio: {}", info.name);
    println!("Category: {}", info.category);
    println!("Description: {}", info.description);
    println!("Unit: {}", info.unit);
    println!("Lookback: {} years", info.lookback);
    println!("Required columns:");
    for col in &info.required_columns {
        println!("  - {}", col);
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Run the full pipeline on the sample statements.
fn analyze(config: Option<&Path>, benchmarks: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let config: EngineConfig = config.map(read_json::<EngineConfig>).transpose()?.unwrap_or_default();
    let benchmarks: Benchmarks = benchmarks
        .map(read_json::<Benchmarks>)
        .transpose()?
        .unwrap_or_else(Benchmarks::uk_retail);

    let engine = RatioEngine::with_config(sample::statements()?, config)?;
    let report = engine.analyze(&benchmarks)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} Financial Ratio Analysis\n", sample::COMPANY);
    print_report(&report)
}

fn print_table(title: &str, table: &RatioTable) -> anyhow::Result<()> {
    println!("{}:", title);
    println!("{}\n", table.to_dataframe()?);
    Ok(())
}

fn print_report(report: &RatioReport) -> anyhow::Result<()> {
    if !report.validation.passed() {
        println!("Data quality issues:");
        for issue in &report.validation.issues {
            println!("  - {}", issue);
        }
        println!();
    }

    for table in report.tables() {
        print_table(&format!("{} ratios", table.name()), table)?;
    }

    print_table("DuPont analysis", &report.dupont.table)?;
    if let Some(last) = report.dupont.table.years().last()
        && let Some(roe) = report.dupont.table.value(ROE_CALCULATED, *last)
    {
        println!("DuPont ROE ({}): {:.2}%\n", last, roe);
    }
    for warning in &report.dupont.warnings {
        println!(
            "  warning: {} in {} (calculated {:?}, actual {:?})",
            warning.issue, warning.year, warning.calculated, warning.actual
        );
    }

    println!("Ratio trends:");
    for trend in [Trend::Improving, Trend::Declining, Trend::Stable] {
        let names = report.trends.get(trend);
        println!("  {} ({}): {}", trend, names.len(), names.join(", "));
    }
    println!();

    println!("Benchmark comparison:");
    println!("{}", report.benchmarks.to_dataframe()?);
    Ok(())
}

/// Print revenue statistics and the key-ratio summary.
fn summary() -> anyhow::Result<()> {
    let statements = sample::statements()?;
    let stats = SummaryStatistics::compute(&statements)?;
    let revenue = stats.revenue;

    println!("{} Revenue Summary", sample::COMPANY);
    println!("  Average: £{:.1}M", revenue.mean);
    if let Some(std_dev) = revenue.std_dev {
        println!("  Std dev: £{:.1}M", std_dev);
    }
    println!("  Range: £{:.1}M - £{:.1}M", revenue.min, revenue.max);
    match (revenue.total_change, revenue.pct_change) {
        (Some(change), Some(pct)) => println!("  Total Change: £{:.1}M ({:.1}%)", change, pct),
        (Some(change), None) => println!("  Total Change: £{:.1}M", change),
        _ => println!("  Total Change: undefined"),
    }
    println!();

    print_table("Revenue growth", &revenue_growth(&statements)?)?;

    let engine = RatioEngine::new(statements);
    let report = engine.analyze(&Benchmarks::uk_retail())?;
    print_table("Key ratios", &report.summary)?;
    Ok(())
}
