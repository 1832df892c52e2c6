//! Sectoral CLI: run the sector analysis pipeline and inspect the universe.
//!
//! Commands:
//! - `run`: fetch prices, compute sector metrics, write the CSV files, print the summary
//! - `universe`: print the configured sectors and their tickers

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sectoral_core::data::{CsvProvider, DataProvider, StdoutProgress, YahooProvider};
use sectoral_runner::{format_summary, run_pipeline, ConfigOverrides, PipelineConfig};

#[derive(Parser)]
#[command(
    name = "sectoral",
    about = "Sectoral: equal-weight sector performance, risk and correlation report"
)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write sectoral_*.csv.
    Run {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory for the CSV outputs. Defaults to the current directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Trailing window in calendar days. Defaults to 365.
        #[arg(long)]
        lookback_days: Option<u32>,

        /// Last day of the window (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        end: Option<String>,

        /// Read {SYMBOL}.csv files from this directory instead of Yahoo Finance.
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Print the configured sectors.
    Universe {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            output_dir,
            lookback_days,
            end,
            data_dir,
        } => run_cmd(config, output_dir, lookback_days, end, data_dir),
        Commands::Universe { config } => universe_cmd(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("pipeline failed: {e:#}");
            eprintln!("Pipeline failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Structured logs go to stderr; stdout is reserved for progress and the report.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn resolve_config(
    config: Option<PathBuf>,
    overrides: &ConfigOverrides,
) -> Result<PipelineConfig> {
    PipelineConfig::resolve(config.as_deref(), overrides, today())
        .context("failed to load configuration")
}

fn run_cmd(
    config: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    lookback_days: Option<u32>,
    end: Option<String>,
    data_dir: Option<PathBuf>,
) -> Result<()> {
    let end = end
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("--end must be YYYY-MM-DD")?;

    let overrides = ConfigOverrides {
        lookback_days,
        output_dir,
        end,
    };
    let cfg = resolve_config(config, &overrides)?;
    let start = cfg.start()?;

    let provider: Box<dyn DataProvider> = match data_dir {
        Some(dir) => Box::new(CsvProvider::new(dir)),
        None => Box::new(YahooProvider::new()?),
    };

    println!("SECTORAL - sector analysis pipeline");
    println!(
        "{} sectors, {} tickers, {} to {} ({})",
        cfg.universe.sectors.len(),
        cfg.universe.all_tickers().len(),
        start,
        cfg.end,
        provider.name()
    );
    println!();
    info!(
        provider = provider.name(),
        output_dir = %cfg.output_dir.display(),
        "starting run"
    );

    let output = run_pipeline(&cfg, provider.as_ref(), &StdoutProgress)?;

    println!();
    print!(
        "{}",
        format_summary(
            &output.analysis.aggregates,
            &output.analysis.insights,
            &output.files.all(),
        )
    );
    Ok(())
}

fn universe_cmd(config: Option<PathBuf>) -> Result<()> {
    let cfg = resolve_config(config, &ConfigOverrides::default())?;

    println!("=== Universe ===");
    for sector in &cfg.universe.sectors {
        println!("{:12} {}", sector.name, sector.tickers.join(", "));
    }
    println!();
    println!(
        "{} sectors, {} unique tickers",
        cfg.universe.sectors.len(),
        cfg.universe.all_tickers().len()
    );
    Ok(())
}
