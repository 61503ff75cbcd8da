use analytics::MetricsEngine;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{Config, OutputFormat, init_tracing, load_config_from};
use ecom_insights::{render, run_analysis};
use loader::DatasetLoader;
use std::path::PathBuf;

/// The main entry point for the e-commerce analytics CLI.
fn main() -> Result<()> {
    // Load ECOM__* overrides from a .env file if present
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = load_config_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_source.path = data_dir;
    }

    let _log_guard = init_tracing(&config.logging).context("Failed to initialise logging")?;

    // Execute the appropriate command
    match cli.command {
        Commands::Report(args) => handle_report(args, &config),
        Commands::Info => handle_info(&config),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Business KPIs over an e-commerce order dataset.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Directory holding the CSV feeds. Overrides `data_source.path`.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every metric group for the configured period.
    Report(ReportArgs),
    /// Show row, column and missing-value counts of every feed.
    Info,
}

#[derive(Parser)]
struct ReportArgs {
    /// The year under analysis. Overrides `analysis.target_year`.
    #[arg(long)]
    year: Option<i32>,

    /// Restrict both periods to one month (1-12).
    #[arg(long)]
    month: Option<u32>,

    /// Order status to keep, e.g. "delivered". Matched case-insensitively.
    #[arg(long)]
    status: Option<String>,

    /// Include every order status, ignoring `analysis.order_status`.
    #[arg(long, conflicts_with = "status")]
    all_statuses: bool,

    /// Year to compute revenue growth against.
    #[arg(long)]
    compare_year: Option<i32>,

    /// Skip the comparison even if one is configured.
    #[arg(long, conflicts_with = "compare_year")]
    no_compare: bool,

    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

// ==============================================================================
// Report Command Logic
// ==============================================================================

/// Loads the feeds, builds both sales tables and prints every metric group.
fn handle_report(args: ReportArgs, config: &Config) -> Result<()> {
    let mut analysis = config.analysis.clone();
    if let Some(year) = args.year {
        analysis.target_year = year;
    }
    if args.month.is_some() {
        analysis.target_month = args.month;
    }
    if args.status.is_some() {
        analysis.order_status = args.status;
    }
    if args.all_statuses {
        analysis.order_status = None;
    }
    if args.compare_year.is_some() {
        analysis.comparison_year = args.compare_year;
    }
    if args.no_compare {
        analysis.comparison_year = None;
    }

    let current_filter = analysis.current_filter()?;
    let comparison_filter = analysis.comparison_filter()?;

    let datasets = DatasetLoader::from_config(&config.data_source)
        .load_all_datasets()
        .with_context(|| format!("Failed to load feeds from {:?}", config.data_source.path))?;

    let engine = MetricsEngine::new();
    let output = run_analysis(
        &engine,
        &datasets,
        &current_filter,
        comparison_filter.as_ref(),
    );
    let summary = output.summary(&engine)?;

    let format = args.format.unwrap_or(config.report.format);
    match format {
        OutputFormat::Table => println!("{}", render::tables(&output)),
        OutputFormat::Text => println!("{}", summary.render_text()),
        OutputFormat::Json => {
            let json = serde_json::json!({ "analysis": output, "summary": summary });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(())
}

// ==============================================================================
// Info Command Logic
// ==============================================================================

fn handle_info(config: &Config) -> Result<()> {
    let datasets = DatasetLoader::from_config(&config.data_source)
        .load_all_datasets()
        .with_context(|| format!("Failed to load feeds from {:?}", config.data_source.path))?;

    println!("{}", render::dataset_info(datasets.get_dataset_info()));
    Ok(())
}
