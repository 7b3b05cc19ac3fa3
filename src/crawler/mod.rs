//! Crawler module for harvesting suggestions
//!
//! This module contains the core harvesting logic, including:
//! - HTTP querying of the suggestion endpoint
//! - The prefix work queue
//! - Round-based crawl orchestration with cancellation
//! - End-of-run reconciliation

mod engine;
mod fetcher;
mod queue;
mod reconcile;
mod shutdown;

pub use engine::{CrawlEngine, EngineSettings, EngineState, RoundOutcome};
pub use fetcher::{
    build_http_client, fetch_suggestions, parse_suggestions, FetchOutcome, HttpSuggestionSource,
    SuggestionSource,
};
pub use queue::PrefixQueue;
pub use reconcile::reconcile;
pub use shutdown::{shutdown_channel, ShutdownHandle, ShutdownSignal};

use crate::config::Config;
use crate::output::RunSummary;
use crate::HarvestError;

/// Runs a complete harvest
///
/// This is the main entry point for a run. It will:
/// 1. Open the suggestion store and checkpoint
/// 2. Load known suggestions and the starting prefix queue
/// 3. Query prefixes round by round until the queue is empty or shutdown is
///    requested
/// 4. Persist new suggestions and the remaining queue
///
/// # Example
///
/// ```no_run
/// use suggest_harvest::config::load_config;
/// use suggest_harvest::crawler::{harvest, shutdown_channel};
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let (_handle, mut signal) = shutdown_channel();
/// let summary = harvest(&config, false, &mut signal).await?;
/// println!("{} new suggestions", summary.persisted);
/// # Ok(())
/// # }
/// ```
pub async fn harvest(
    config: &Config,
    fresh: bool,
    shutdown: &mut ShutdownSignal,
) -> Result<RunSummary, HarvestError> {
    let mut engine = CrawlEngine::from_config(config, fresh)?;
    engine.run(shutdown).await
}
