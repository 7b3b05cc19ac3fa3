//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the SuggestionStore trait.

use crate::storage::schema::{check_identifier, initialize_schema};
use crate::storage::traits::{StorageResult, SuggestionStore};
use crate::HarvestError;
use rusqlite::{params, Connection};
use std::collections::HashSet;
use std::path::Path;

/// SQLite suggestion store
pub struct SqliteSuggestionStore {
    conn: Connection,
}

impl SqliteSuggestionStore {
    /// Opens (or creates) the database and ensures the suggestion table exists
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `table` - Name of the suggestion table
    /// * `column` - Name of its text column
    pub fn new(path: &Path, table: &str, column: &str) -> Result<Self, HarvestError> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn, table, column)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory(table: &str, column: &str) -> Result<Self, HarvestError> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn, table, column)?;
        Ok(Self { conn })
    }
}

impl SuggestionStore for SqliteSuggestionStore {
    fn read_all(&self, table: &str) -> StorageResult<HashSet<String>> {
        let table = check_identifier(table)?;
        let mut stmt = self.conn.prepare(&format!("SELECT * FROM {}", table))?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut known = HashSet::new();
        for row in rows {
            known.insert(row?);
        }

        Ok(known)
    }

    fn insert_many(
        &mut self,
        table: &str,
        column: &str,
        values: &HashSet<String>,
    ) -> StorageResult<usize> {
        let sql = format!(
            "INSERT INTO {}({}) VALUES (?1)",
            check_identifier(table)?,
            check_identifier(column)?
        );

        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(&sql)?;
            for value in values {
                stmt.execute(params![value])?;
            }
        }
        tx.commit()?;

        Ok(values.len())
    }

    fn count(&self, table: &str) -> StorageResult<u64> {
        let table = check_identifier(table)?;
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })?;
        Ok(count as u64)
    }
}
