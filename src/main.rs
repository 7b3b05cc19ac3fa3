//! Suggest-Harvest main entry point
//!
//! This is the command-line interface for the suggestion harvester.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use std::path::{Path, PathBuf};
use suggest_harvest::checkpoint::FileCheckpoint;
use suggest_harvest::config::{load_config_with_hash, Config};
use suggest_harvest::crawler::{harvest, shutdown_channel};
use suggest_harvest::output::{format_duration, load_statistics, print_statistics, print_summary};
use suggest_harvest::prefix::expected_count;
use suggest_harvest::storage::open_storage;
use tracing_subscriber::EnvFilter;

/// Suggest-Harvest: exhaustive search-suggestion harvester
///
/// Queries the configured search-as-you-type endpoint with every 1-3
/// character prefix and stores the suggestions it has not seen before.
/// Interrupted runs resume from the checkpoint file.
#[derive(Parser, Debug)]
#[command(name = "suggest-harvest")]
#[command(version)]
#[command(about = "Exhaustive search-suggestion harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Ignore the checkpoint and query the full prefix space
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be queried without querying
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the database and checkpoint and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else {
        handle_harvest(config, cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("suggest_harvest=info,warn"),
            1 => EnvFilter::new("suggest_harvest=debug,info"),
            2 => EnvFilter::new("suggest_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Suggest-Harvest Dry Run ===\n");

    println!("Endpoint:");
    println!("  URL: {}", config.endpoint.url);
    println!("  Query field: {}", config.endpoint.query_field);
    println!("  Suggestions field: {}", config.endpoint.suggestions_field);
    println!("  Request timeout: {}ms", config.endpoint.request_timeout);

    println!("\nCrawler:");
    println!("  Alphabet: {}", config.crawler.alphabet);
    println!("  Batch size: {}", config.crawler.batch_size);
    println!("  User agent: {}", config.user_agent.header_value());

    println!("\nOutput:");
    println!("  Database: {}", config.output.database_path);
    println!("  Table: {}({})", config.output.table, config.output.column);
    println!("  Checkpoint: {}", config.output.checkpoint_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Full prefix space is {} queries",
        expected_count(config.crawler.alphabet.chars().count())
    );
}

/// Handles the --stats mode: shows what is stored and what is pending
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.output.database_path);

    let store = open_storage(&config.output)?;
    let checkpoint = FileCheckpoint::new(Path::new(&config.output.checkpoint_path));

    let stats = load_statistics(
        &store,
        &config.output.table,
        &checkpoint,
        &config.crawler.alphabet,
    )?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the main harvest; Ctrl+C cancels the run but still waits for
/// results and the checkpoint to be written
async fn handle_harvest(config: Config, fresh: bool) -> anyhow::Result<()> {
    let started = Local::now();
    println!("START {}", started.format("%Y-%m-%d %H:%M:%S"));

    let (handle, mut signal) = shutdown_channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Received Ctrl+C, finishing up");
                handle.shutdown();
            }
            Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
        }
    });

    let result = harvest(&config, fresh, &mut signal).await;

    let finished = Local::now();
    println!("END {}", finished.format("%Y-%m-%d %H:%M:%S"));
    println!(
        "TIME {}",
        format_duration((finished - started).to_std().unwrap_or_default())
    );

    let summary = result.context("Harvest failed")?;
    print_summary(&summary);

    Ok(())
}
