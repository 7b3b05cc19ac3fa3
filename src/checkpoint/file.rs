//! File-backed checkpoint

use crate::checkpoint::{decode, encode, CheckpointError, CheckpointStore};
use crate::prefix::Prefix;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Checkpoint stored as a single delimiter-joined text file
#[derive(Debug, Clone)]
pub struct FileCheckpoint {
    path: PathBuf,
}

impl FileCheckpoint {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file the next checkpoint is staged in before replacing `path`
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CheckpointStore for FileCheckpoint {
    fn load(&self) -> Vec<Prefix> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let queue = decode(&content);
                tracing::debug!(
                    "Read {} prefixes from checkpoint {}",
                    queue.len(),
                    self.path.display()
                );
                queue
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No checkpoint at {}", self.path.display());
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read checkpoint {}, starting fresh: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&mut self, queue: &[Prefix]) -> Result<(), CheckpointError> {
        let staging = self.staging_path();
        let write_error = |source: std::io::Error| CheckpointError::Write {
            path: self.path.display().to_string(),
            source,
        };

        // The previous checkpoint stays intact until the new one is complete
        std::fs::write(&staging, encode(queue)).map_err(write_error)?;
        if let Err(e) = std::fs::rename(&staging, &self.path) {
            let _ = std::fs::remove_file(&staging);
            return Err(write_error(e));
        }

        tracing::debug!(
            "Wrote {} prefixes to checkpoint {}",
            queue.len(),
            self.path.display()
        );
        Ok(())
    }
}
