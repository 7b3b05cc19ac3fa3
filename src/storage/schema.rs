//! Database schema definitions
//!
//! The suggestion table has a single text column. Its name and the column
//! name come from configuration, so the DDL is built at runtime.

use crate::storage::traits::{StorageError, StorageResult};

/// Checks that `ident` can be interpolated into SQL as-is
pub fn check_identifier(ident: &str) -> StorageResult<&str> {
    let mut chars = ident.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(ident)
    } else {
        Err(StorageError::InvalidIdentifier(ident.to_string()))
    }
}

/// Builds the DDL for the suggestion table
pub fn suggestion_table_sql(table: &str, column: &str) -> StorageResult<String> {
    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} ({} TEXT NOT NULL);",
        check_identifier(table)?,
        check_identifier(column)?
    ))
}

/// Creates the suggestion table if it does not exist yet
pub fn initialize_schema(
    conn: &rusqlite::Connection,
    table: &str,
    column: &str,
) -> StorageResult<()> {
    conn.execute_batch(&suggestion_table_sql(table, column)?)?;
    Ok(())
}
