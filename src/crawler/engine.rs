//! Crawl engine - round-based harvest orchestration
//!
//! This module contains the main harvest loop, including:
//! - Loading known suggestions and the starting prefix queue
//! - Running bounded-concurrency rounds of prefix queries
//! - Requeueing rate-limited prefixes
//! - Handling cancellation
//! - Reconciling and persisting results at the end of the run

use crate::checkpoint::{CheckpointStore, FileCheckpoint};
use crate::config::Config;
use crate::crawler::fetcher::{FetchOutcome, HttpSuggestionSource, SuggestionSource};
use crate::crawler::queue::PrefixQueue;
use crate::crawler::reconcile::reconcile;
use crate::crawler::shutdown::ShutdownSignal;
use crate::output::RunSummary;
use crate::prefix::{generate, Prefix};
use crate::storage::{open_storage, SuggestionStore};
use crate::{ConfigError, HarvestError};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Lifecycle of a crawl engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Ready,
    Running,
    Finalizing,
    Done,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Every fetch of the round concluded
    Completed,
    /// Shutdown was requested; in-flight fetches were abandoned
    Cancelled,
}

/// Engine parameters taken from the configuration
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub alphabet: String,
    pub batch_size: usize,
    pub table: String,
    pub column: String,
    /// Ignore any checkpoint and enumerate the full prefix space
    pub fresh: bool,
}

impl EngineSettings {
    pub fn from_config(config: &Config, fresh: bool) -> Self {
        Self {
            alphabet: config.crawler.alphabet.clone(),
            batch_size: config.crawler.batch_size,
            table: config.output.table.clone(),
            column: config.output.column.clone(),
            fresh,
        }
    }
}

/// Harvest orchestrator
///
/// Owns the prefix queue and the suggestions found during the run. Fetch
/// tasks never touch either; they hand their outcome back to the round loop.
pub struct CrawlEngine {
    settings: EngineSettings,
    source: Arc<dyn SuggestionSource>,
    store: Box<dyn SuggestionStore>,
    checkpoint: Box<dyn CheckpointStore>,
    state: EngineState,
    queue: PrefixQueue,
    known: HashSet<String>,
    found: HashSet<String>,
    rounds: u64,
    cancelled: bool,
    started_at: Option<Instant>,
}

impl CrawlEngine {
    /// Creates an engine from its collaborators
    pub fn new(
        settings: EngineSettings,
        source: Arc<dyn SuggestionSource>,
        store: Box<dyn SuggestionStore>,
        checkpoint: Box<dyn CheckpointStore>,
    ) -> Self {
        Self {
            settings,
            source,
            store,
            checkpoint,
            state: EngineState::Ready,
            queue: PrefixQueue::default(),
            known: HashSet::new(),
            found: HashSet::new(),
            rounds: 0,
            cancelled: false,
            started_at: None,
        }
    }

    /// Creates an engine wired to the HTTP endpoint, SQLite store and
    /// checkpoint file named in the configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The harvester configuration
    /// * `fresh` - Whether to ignore an existing checkpoint
    pub fn from_config(config: &Config, fresh: bool) -> Result<Self, HarvestError> {
        let source = HttpSuggestionSource::new(&config.endpoint, &config.user_agent)?;
        let store = open_storage(&config.output)?;
        let checkpoint = FileCheckpoint::new(&config.output.checkpoint_path);

        Ok(Self::new(
            EngineSettings::from_config(config, fresh),
            Arc::new(source),
            Box::new(store),
            Box::new(checkpoint),
        ))
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn queue(&self) -> &PrefixQueue {
        &self.queue
    }

    /// Suggestions collected so far in this run
    pub fn found(&self) -> &HashSet<String> {
        &self.found
    }

    /// Suggestions that were stored before this run
    pub fn known(&self) -> &HashSet<String> {
        &self.known
    }

    /// Number of completed rounds
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Loads known suggestions and the starting queue
    ///
    /// The queue comes from the checkpoint when it holds anything, otherwise
    /// from a full enumeration of the alphabet.
    pub fn start(&mut self) -> Result<(), HarvestError> {
        self.expect_state("start", EngineState::Ready)?;

        if self.settings.batch_size == 0 {
            return Err(ConfigError::Validation("batch_size must be at least 1".to_string()).into());
        }

        self.known = self.store.read_all(&self.settings.table)?;
        tracing::info!("Loaded {} known suggestions", self.known.len());

        let resumed = if self.settings.fresh {
            tracing::info!("Fresh run requested, ignoring checkpoint");
            Vec::new()
        } else {
            self.checkpoint.load()
        };

        let prefixes = if resumed.is_empty() {
            let prefixes = generate(&self.settings.alphabet);
            tracing::info!("Enumerated {} prefixes", prefixes.len());
            prefixes
        } else {
            tracing::info!("Resuming with {} prefixes from checkpoint", resumed.len());
            resumed
        };

        self.queue = PrefixQueue::new(prefixes);
        self.started_at = Some(Instant::now());
        self.state = EngineState::Running;
        Ok(())
    }

    /// Runs one round: queries up to `batch_size` prefixes from the front of
    /// the queue concurrently and waits for all of them
    ///
    /// Returns [`RoundOutcome::Cancelled`] as soon as shutdown is requested;
    /// outcomes of fetches still in flight at that point are discarded.
    pub async fn run_round(
        &mut self,
        shutdown: &mut ShutdownSignal,
    ) -> Result<RoundOutcome, HarvestError> {
        self.expect_state("run a round", EngineState::Running)?;

        if shutdown.is_shutdown() {
            self.cancelled = true;
            return Ok(RoundOutcome::Cancelled);
        }

        let batch = self.queue.front_batch(self.settings.batch_size);
        let mut pending = batch.clone();
        let mut tasks = JoinSet::new();

        for prefix in batch {
            let source = Arc::clone(&self.source);
            tasks.spawn(async move {
                let outcome = source.fetch(&prefix).await;
                (prefix, outcome)
            });
        }

        loop {
            tokio::select! {
                biased;

                _ = shutdown.recv() => {
                    tracing::info!(
                        "Shutdown requested, abandoning {} in-flight requests",
                        tasks.len()
                    );
                    tasks.abort_all();
                    self.cancelled = true;
                    return Ok(RoundOutcome::Cancelled);
                }

                joined = tasks.join_next() => match joined {
                    Some(Ok((prefix, outcome))) => {
                        if let Some(index) = pending.iter().position(|p| *p == prefix) {
                            pending.swap_remove(index);
                        }
                        self.handle_outcome(prefix, outcome);
                    }
                    Some(Err(e)) => {
                        tracing::error!("Fetch task failed: {}", e);
                    }
                    None => break,
                },
            }
        }

        // A task that panicked never reported back; drop its prefix like any
        // other failed attempt so it cannot stall the queue.
        for prefix in pending {
            tracing::warn!("No outcome for prefix '{}', dropping it", prefix);
            self.queue.conclude(&prefix, false);
        }

        self.rounds += 1;
        tracing::info!(
            "Round {} complete: {} prefixes remaining, {} suggestions found",
            self.rounds,
            self.queue.len(),
            self.found.len()
        );

        Ok(RoundOutcome::Completed)
    }

    /// Applies the outcome of one fetch to the queue and the accumulator
    fn handle_outcome(&mut self, prefix: Prefix, outcome: FetchOutcome) {
        match &outcome {
            FetchOutcome::Suggestions(suggestions) => {
                tracing::debug!("'{}': {} suggestions", prefix, suggestions.len());
                self.found.extend(suggestions.iter().cloned());
            }
            FetchOutcome::NoSuggestions => {
                tracing::trace!("'{}': no suggestions", prefix);
            }
            FetchOutcome::RateLimited => {
                tracing::warn!("Too many requests, requeueing '{}'", prefix);
            }
            FetchOutcome::Malformed(reason) => {
                tracing::debug!("'{}': ignoring malformed response: {}", prefix, reason);
            }
            FetchOutcome::TransportFailure(error) => {
                tracing::debug!("'{}': dropping after transport failure: {}", prefix, error);
            }
        }

        self.queue.conclude(&prefix, outcome.needs_retry());
    }

    /// Reconciles the run's findings, persists them and writes the checkpoint
    ///
    /// A failed suggestion insert is reported in the summary and does not
    /// stop the checkpoint from being written. A failed checkpoint write is
    /// returned as an error. Either way the engine ends up `Done`.
    pub fn finalize(&mut self) -> Result<RunSummary, HarvestError> {
        self.expect_state("finalize", EngineState::Running)?;
        self.state = EngineState::Finalizing;

        let known = std::mem::take(&mut self.known);
        let found = std::mem::take(&mut self.found);
        let delta = reconcile(&known, &found);

        let persist_error = match self.store.insert_many(
            &self.settings.table,
            &self.settings.column,
            &delta,
        ) {
            Ok(written) => {
                tracing::info!("Stored {} new suggestions", written);
                None
            }
            Err(e) => {
                tracing::error!("Failed to store {} suggestions: {}", delta.len(), e);
                Some(e.to_string())
            }
        };

        let remaining = self.queue.to_vec();
        let saved = self.checkpoint.save(&remaining);
        self.state = EngineState::Done;
        saved?;

        if remaining.is_empty() {
            tracing::info!("Prefix space exhausted, checkpoint cleared");
        } else {
            tracing::info!("Checkpointed {} remaining prefixes", remaining.len());
        }

        Ok(RunSummary {
            rounds: self.rounds,
            known: known.len(),
            found: found.len(),
            persisted: delta.len(),
            remaining: remaining.len(),
            cancelled: self.cancelled,
            persist_error,
            elapsed: self.started_at.map(|t| t.elapsed()).unwrap_or_default(),
        })
    }

    /// Runs the whole harvest: start, rounds until the queue is empty or
    /// shutdown is requested, then finalize
    pub async fn run(&mut self, shutdown: &mut ShutdownSignal) -> Result<RunSummary, HarvestError> {
        self.start()?;
        tracing::info!(
            "Starting harvest: {} prefixes queued, batch size {}",
            self.queue.len(),
            self.settings.batch_size
        );

        while !self.queue.is_empty() {
            if self.run_round(shutdown).await? == RoundOutcome::Cancelled {
                break;
            }
        }

        self.finalize()
    }

    fn expect_state(&self, action: &'static str, expected: EngineState) -> Result<(), HarvestError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(HarvestError::InvalidState {
                action,
                state: self.state,
            })
        }
    }
}
