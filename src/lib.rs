//! Suggest-Harvest: an exhaustive search-suggestion harvester
//!
//! This crate queries a search-as-you-type endpoint with every 1-3 character
//! prefix over a fixed alphabet, collects the suggestions it returns, and
//! persists the ones that were not already known. Runs are resumable through
//! a checkpoint of the prefixes still waiting to be queried.

pub mod checkpoint;
pub mod config;
pub mod crawler;
pub mod output;
pub mod prefix;
pub mod storage;

use thiserror::Error;

/// Main error type for Suggest-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] checkpoint::CheckpointError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Engine cannot {action} while {state:?}")]
    InvalidState {
        action: &'static str,
        state: crawler::EngineState,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Suggest-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use checkpoint::{CheckpointStore, FileCheckpoint};
pub use config::Config;
pub use crawler::{CrawlEngine, EngineState, FetchOutcome, ShutdownHandle, SuggestionSource};
pub use prefix::{generate, Prefix};
pub use storage::{SqliteSuggestionStore, SuggestionStore};
