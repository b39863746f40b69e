use anyhow::Context;
use api_client::error::ApiError;
use api_client::{SnapshotSource, create_source, normalize_symbol};
use clap::{Args, Parser, Subcommand};
use configuration::{Config, OutputFormat, init_tracing, load_config};
use core_types::{EvaluationReport, MetricSnapshot};
use engine::{EngineError, EvaluationEngine};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use profiles::{InvestorProfile, ProfileRegistry};
use render::BatchRow;
use std::path::PathBuf;

mod render;

/// The main entry point for the Tenet investor-profile evaluator.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Optional: secrets and TENET_* overrides may live in a .env file.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    // Keep the guard alive so the file writer flushes on exit.
    let _log_guard = init_tracing(&config.logging)?;

    let registry =
        ProfileRegistry::from_config(&config).context("Failed to build the profile registry")?;
    tracing::debug!(profiles = registry.len(), "Profile registry ready");

    // Execute the appropriate command
    match cli.command {
        Commands::Evaluate(args) => handle_evaluate(args, &config, &registry).await,
        Commands::Batch(args) => handle_batch(args, &config, &registry).await,
        Commands::Profiles => {
            println!("{}", render::profiles_table(&registry));
            Ok(())
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Evaluates companies against investor profiles built from fundamental criteria.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. A missing file means built-in defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one company against one or more investor profiles.
    Evaluate(EvaluateArgs),
    /// Evaluate several companies. Results are listed in input order.
    Batch(BatchArgs),
    /// List the registered investor profiles and their criteria.
    Profiles,
}

#[derive(Args)]
struct SelectionArgs {
    /// Profile to apply (repeatable, e.g. "value"). Defaults to every registered profile.
    #[arg(long = "profile", short = 'p')]
    profiles: Vec<String>,

    /// Read snapshots from `<DIR>/<SYMBOL>.json` instead of the live provider.
    #[arg(long)]
    snapshot_dir: Option<PathBuf>,

    /// Output format. Overrides `output.format` from the configuration.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Parser)]
struct EvaluateArgs {
    /// The ticker symbol to evaluate (e.g., "KO").
    symbol: String,

    #[command(flatten)]
    selection: SelectionArgs,
}

#[derive(Parser)]
struct BatchArgs {
    /// The ticker symbols to evaluate (e.g., "KO MSFT AAPL").
    #[arg(required = true, num_args = 1..)]
    symbols: Vec<String>,

    #[command(flatten)]
    selection: SelectionArgs,
}

// ==============================================================================
// Evaluate Command Logic
// ==============================================================================

async fn handle_evaluate(
    args: EvaluateArgs,
    config: &Config,
    registry: &ProfileRegistry,
) -> anyhow::Result<()> {
    let selected = registry.select(&args.selection.profiles)?;
    let source = create_source(&config.data_source, args.selection.snapshot_dir)?;

    // No snapshot, no evaluation: acquisition failures are surfaced as-is.
    let snapshot = source.fetch_snapshot(&args.symbol).await?;

    let engine = EvaluationEngine::new();
    let evaluations = selected
        .iter()
        .map(|profile| {
            engine
                .evaluate(profile, &snapshot)
                .map(|report| (*profile, report))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match args.selection.format.unwrap_or(config.output.format) {
        OutputFormat::Table => render::print_evaluation(&snapshot, &evaluations),
        OutputFormat::Json => {
            let reports: Vec<&EvaluationReport> =
                evaluations.iter().map(|(_, report)| report).collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}

// ==============================================================================
// Batch Command Logic
// ==============================================================================

/// Fetches every snapshot concurrently, then evaluates them in parallel.
///
/// A symbol whose data is unavailable is reported in its row; the others continue.
async fn handle_batch(
    args: BatchArgs,
    config: &Config,
    registry: &ProfileRegistry,
) -> anyhow::Result<()> {
    let selected = registry.select(&args.selection.profiles)?;
    let source = create_source(&config.data_source, args.selection.snapshot_dir)?;
    let symbols = args
        .symbols
        .iter()
        .map(|symbol| normalize_symbol(symbol))
        .collect::<Result<Vec<_>, _>>()?;

    // Set up the progress bar
    let progress_bar = ProgressBar::new(symbols.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let results = join_all(symbols.iter().map(|symbol| {
        fetch_with_progress(source.as_ref(), symbol, progress_bar.clone())
    }))
    .await;
    progress_bar.finish_with_message("Snapshots fetched");

    let fetched = symbols.into_iter().zip(results).collect();
    let rows = evaluate_fetched(&selected, fetched).await?;

    match args.selection.format.unwrap_or(config.output.format) {
        OutputFormat::Table => render::print_batch(&selected, &rows),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&batch_json(&rows))?),
    }
    Ok(())
}

/// Evaluates the fetched snapshots and lines each one up with its input symbol.
///
/// Symbols without data keep their acquisition error. The rayon batch runs on
/// tokio's blocking pool so it does not stall the async workers.
async fn evaluate_fetched(
    profiles: &[&InvestorProfile],
    fetched: Vec<(String, Result<MetricSnapshot, ApiError>)>,
) -> anyhow::Result<Vec<BatchRow>> {
    let mut snapshots = Vec::new();
    let mut order = Vec::with_capacity(fetched.len());
    for (symbol, result) in fetched {
        match result {
            Ok(snapshot) => {
                snapshots.push(snapshot);
                order.push((symbol, None));
            }
            Err(e) => {
                tracing::warn!(%symbol, error = %e, "Skipping symbol without data");
                order.push((symbol, Some(e.to_string())));
            }
        }
    }

    let owned: Vec<InvestorProfile> = profiles.iter().map(|profile| (*profile).clone()).collect();
    let evaluated = tokio::task::spawn_blocking(move || -> Result<_, EngineError> {
        let profiles: Vec<&InvestorProfile> = owned.iter().collect();
        let reports = EvaluationEngine::new().evaluate_batch(&profiles, &snapshots)?;
        Ok(snapshots.into_iter().zip(reports).collect::<Vec<_>>())
    })
    .await
    .context("Batch evaluation task failed")??;

    let mut evaluated = evaluated.into_iter();
    order
        .into_iter()
        .map(|(symbol, failure)| -> anyhow::Result<BatchRow> {
            let outcome = match failure {
                Some(reason) => Err(reason),
                None => {
                    let (snapshot, reports) = evaluated
                        .next()
                        .context("Batch evaluation returned fewer results than snapshots")?;
                    anyhow::ensure!(
                        snapshot.symbol() == symbol,
                        "Batch results out of order: expected {symbol}, got {}",
                        snapshot.symbol()
                    );
                    Ok(reports)
                }
            };
            Ok(BatchRow { symbol, outcome })
        })
        .collect()
}

async fn fetch_with_progress(
    source: &dyn SnapshotSource,
    symbol: &str,
    progress_bar: ProgressBar,
) -> Result<MetricSnapshot, ApiError> {
    progress_bar.set_message(format!("Fetching {symbol}..."));
    let result = source.fetch_snapshot(symbol).await;
    progress_bar.inc(1);
    result
}

fn batch_json(rows: &[BatchRow]) -> serde_json::Value {
    rows.iter()
        .map(|row| match &row.outcome {
            Ok(reports) => serde_json::json!({ "symbol": row.symbol, "reports": reports }),
            Err(reason) => serde_json::json!({ "symbol": row.symbol, "error": reason }),
        })
        .collect()
}
