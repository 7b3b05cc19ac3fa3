//! Statistics about stored suggestions and the pending checkpoint
//!
//! This module provides functionality for extracting and displaying
//! harvest statistics without running a crawl.

use crate::checkpoint::CheckpointStore;
use crate::prefix::expected_count;
use crate::storage::SuggestionStore;
use crate::HarvestError;

/// Harvest statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestStatistics {
    /// Rows in the suggestion table
    pub stored_suggestions: u64,

    /// Distinct suggestions in the table
    pub distinct_suggestions: u64,

    /// Prefixes waiting in the checkpoint
    pub pending_prefixes: usize,

    /// Size of the full prefix space for the configured alphabet
    pub total_prefixes: usize,
}

impl HarvestStatistics {
    /// Share of the prefix space already processed, in percent
    ///
    /// An empty checkpoint means no run is in progress, which reads as 0%.
    pub fn progress_percent(&self) -> f64 {
        if self.pending_prefixes == 0 || self.total_prefixes == 0 {
            return 0.0;
        }
        let done = self.total_prefixes.saturating_sub(self.pending_prefixes);
        (done as f64 / self.total_prefixes as f64) * 100.0
    }
}

/// Loads statistics from the store and checkpoint
///
/// # Arguments
///
/// * `store` - The suggestion store to query
/// * `table` - Suggestion table name
/// * `checkpoint` - The checkpoint holding pending prefixes
/// * `alphabet` - The configured prefix alphabet
pub fn load_statistics(
    store: &dyn SuggestionStore,
    table: &str,
    checkpoint: &dyn CheckpointStore,
    alphabet: &str,
) -> Result<HarvestStatistics, HarvestError> {
    let stored_suggestions = store.count(table)?;
    let distinct_suggestions = store.read_all(table)?.len() as u64;
    let pending_prefixes = checkpoint.load().len();

    Ok(HarvestStatistics {
        stored_suggestions,
        distinct_suggestions,
        pending_prefixes,
        total_prefixes: expected_count(alphabet.chars().count()),
    })
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &HarvestStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Suggestions:");
    println!("  Stored rows: {}", stats.stored_suggestions);
    println!("  Distinct: {}", stats.distinct_suggestions);
    println!();

    println!("Prefixes:");
    println!("  Prefix space: {}", stats.total_prefixes);
    if stats.pending_prefixes == 0 {
        println!("  Checkpoint: empty (next run starts fresh)");
    } else {
        println!(
            "  Checkpoint: {} pending ({:.1}% done)",
            stats.pending_prefixes,
            stats.progress_percent()
        );
    }
}
