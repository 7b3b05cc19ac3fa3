//! Shared test doubles

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use suggest_harvest::config::{Config, EndpointConfig};
use suggest_harvest::crawler::{EngineSettings, FetchOutcome, SuggestionSource};
use suggest_harvest::prefix::Prefix;
use suggest_harvest::storage::{StorageError, StorageResult, SuggestionStore};

/// How a scripted prefix answers
#[derive(Clone)]
pub enum Script {
    Answer(FetchOutcome),
    /// Never completes
    Hang,
}

/// Source answering from per-prefix scripts, consumed in order
///
/// Prefixes without a script (or with an exhausted one) get no suggestions.
/// Every call sleeps for `delay` while counted as in flight.
pub struct ScriptedSource {
    scripts: Mutex<HashMap<String, Vec<Script>>>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new(delay: Duration) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn script(self, prefix: &str, steps: Vec<Script>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(prefix.to_string(), steps);
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == prefix).count()
    }
}

#[async_trait]
impl SuggestionSource for ScriptedSource {
    async fn fetch(&self, prefix: &Prefix) -> FetchOutcome {
        self.calls.lock().unwrap().push(prefix.to_string());

        let step = {
            let mut scripts = self.scripts.lock().unwrap();
            match scripts.get_mut(prefix.as_str()) {
                Some(steps) if !steps.is_empty() => steps.remove(0),
                _ => Script::Answer(FetchOutcome::NoSuggestions),
            }
        };

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        tokio::time::sleep(self.delay).await;

        let outcome = match step {
            Script::Answer(outcome) => outcome,
            Script::Hang => std::future::pending().await,
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        outcome
    }
}

/// Store whose writes always fail
pub struct FailingStore;

impl SuggestionStore for FailingStore {
    fn read_all(&self, _table: &str) -> StorageResult<HashSet<String>> {
        Ok(HashSet::new())
    }

    fn insert_many(
        &mut self,
        _table: &str,
        _column: &str,
        _values: &HashSet<String>,
    ) -> StorageResult<usize> {
        Err(StorageError::Database("disk full".to_string()))
    }

    fn count(&self, _table: &str) -> StorageResult<u64> {
        Ok(0)
    }
}

pub fn suggestions(values: &[&str]) -> Script {
    Script::Answer(FetchOutcome::Suggestions(
        values.iter().map(|v| v.to_string()).collect(),
    ))
}

pub fn set(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn settings(alphabet: &str, batch_size: usize) -> EngineSettings {
    EngineSettings {
        alphabet: alphabet.to_string(),
        batch_size,
        table: "hints".to_string(),
        column: "hint".to_string(),
        fresh: false,
    }
}

/// Configuration pointing at a mock endpoint and files under `dir`
pub fn test_config(endpoint_url: &str, dir: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.endpoint = EndpointConfig {
        url: endpoint_url.to_string(),
        request_timeout: 500,
        ..EndpointConfig::default()
    };
    config.crawler.alphabet = "ab".to_string();
    config.crawler.batch_size = 4;
    config.output.database_path = dir.join("hints.db").display().to_string();
    config.output.checkpoint_path = dir.join("chars_file.txt").display().to_string();
    config
}

pub fn shared(source: ScriptedSource) -> Arc<ScriptedSource> {
    Arc::new(source)
}
