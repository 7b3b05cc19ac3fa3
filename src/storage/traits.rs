//! Storage traits and error types
//!
//! This module defines the trait interface for suggestion store backends and
//! associated error types.

use std::collections::HashSet;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable store of previously discovered suggestions
pub trait SuggestionStore: Send {
    /// Reads every suggestion stored in `table`
    fn read_all(&self, table: &str) -> StorageResult<HashSet<String>>;

    /// Appends `values` to `column` of `table`
    ///
    /// Values are inserted as given; callers are responsible for not
    /// inserting suggestions that are already stored.
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn insert_many(
        &mut self,
        table: &str,
        column: &str,
        values: &HashSet<String>,
    ) -> StorageResult<usize>;

    /// Counts the rows in `table`
    fn count(&self, table: &str) -> StorageResult<u64>;
}
