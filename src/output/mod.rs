//! Output module for run summaries and statistics
//!
//! This module handles:
//! - The summary a finished run reports
//! - Statistics over the stored suggestions and pending checkpoint

pub mod stats;

pub use stats::{load_statistics, print_statistics, HarvestStatistics};

use std::time::Duration;

/// Result of one harvest run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rounds that ran to completion
    pub rounds: u64,

    /// Suggestions known before the run
    pub known: usize,

    /// Distinct suggestions collected during the run
    pub found: usize,

    /// Suggestions handed to the store after reconciliation
    pub persisted: usize,

    /// Prefixes left in the checkpoint
    pub remaining: usize,

    /// Whether the run was cut short by a shutdown request
    pub cancelled: bool,

    /// Set when storing suggestions failed; the run itself still finished
    pub persist_error: Option<String>,

    /// Time from start to finalize
    pub elapsed: Duration,
}

impl RunSummary {
    /// Whether the whole prefix space was processed
    pub fn is_complete(&self) -> bool {
        self.remaining == 0 && !self.cancelled
    }
}

/// Formats a duration as `H:MM:SS.mmm`
pub fn format_duration(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let hours = millis / 3_600_000;
    let minutes = (millis / 60_000) % 60;
    let seconds = (millis / 1000) % 60;
    format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis % 1000)
}

/// Prints a run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Harvest Summary ===\n");

    println!("  Rounds: {}", summary.rounds);
    println!("  Elapsed: {}", format_duration(summary.elapsed));
    println!("  Known before run: {}", summary.known);
    println!("  Found this run: {}", summary.found);
    println!("  Stored: {}", summary.persisted);

    if let Some(error) = &summary.persist_error {
        println!("  Storing suggestions failed: {}", error);
    }

    if summary.cancelled {
        println!(
            "  Interrupted with {} prefixes left (run again to resume)",
            summary.remaining
        );
    } else if summary.remaining > 0 {
        println!("  {} prefixes left", summary.remaining);
    } else {
        println!("  Prefix space exhausted");
    }
}
