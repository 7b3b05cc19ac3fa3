//! Storage module for persisting harvested suggestions
//!
//! This module handles the suggestion store, including:
//! - The `SuggestionStore` trait the crawl engine depends on
//! - SQLite database initialization and schema management
//! - Reading the known suggestion set and bulk-inserting new ones

mod schema;
mod sqlite;
mod traits;

pub use schema::check_identifier;
pub use sqlite::SqliteSuggestionStore;
pub use traits::{StorageError, StorageResult, SuggestionStore};

use crate::config::OutputConfig;
use crate::HarvestError;
use std::path::Path;

/// Opens the suggestion store described by the output configuration
pub fn open_storage(config: &OutputConfig) -> Result<SqliteSuggestionStore, HarvestError> {
    SqliteSuggestionStore::new(
        Path::new(&config.database_path),
        &config.table,
        &config.column,
    )
}
