//! Checkpoint persistence for the prefix work queue
//!
//! The checkpoint holds the prefixes a run has not yet processed so that an
//! interrupted run can pick up where it left off. An absent or empty
//! checkpoint means there is nothing to resume.

mod file;

pub use file::FileCheckpoint;

use crate::prefix::Prefix;
use thiserror::Error;

/// Separator between prefixes in the serialized checkpoint
pub const CHECKPOINT_DELIMITER: char = ',';

/// Errors raised while writing a checkpoint
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Failed to write checkpoint {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Storage for the remaining prefix queue
pub trait CheckpointStore: Send {
    /// Returns the persisted queue, or an empty sequence if there is none
    ///
    /// Read failures are reported and treated as "no checkpoint".
    fn load(&self) -> Vec<Prefix>;

    /// Overwrites the checkpoint with `queue`
    ///
    /// An empty queue writes an empty checkpoint.
    fn save(&mut self, queue: &[Prefix]) -> Result<(), CheckpointError>;
}

/// Serializes a queue into the delimiter-joined checkpoint form
pub fn encode(queue: &[Prefix]) -> String {
    queue
        .iter()
        .map(Prefix::as_str)
        .collect::<Vec<_>>()
        .join(CHECKPOINT_DELIMITER.to_string().as_str())
}

/// Parses the delimiter-joined checkpoint form
///
/// Empty segments (an empty blob or a trailing delimiter) are skipped.
pub fn decode(blob: &str) -> Vec<Prefix> {
    blob.trim_end_matches(&['\n', '\r'][..])
        .split(CHECKPOINT_DELIMITER)
        .filter(|segment| !segment.is_empty())
        .map(Prefix::from)
        .collect()
}
