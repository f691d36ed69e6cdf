//! File-backed resume store

use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

use crate::core::RemovalJob;
use crate::utils::error::{Result, SweepError};

/// Durable single-job store: one JSON document at a fixed path.
///
/// Survives process restarts, which is the whole point; the persisted
/// cursor is what turns a page reload into a resumable checkpoint.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store over the given document path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load the persisted job, if any.
    ///
    /// A missing file means no job. A corrupt or unreadable record is
    /// treated as absent so a damaged document can never wedge startup.
    pub async fn get(&self) -> Result<Option<RemovalJob>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SweepError::Storage(format!(
                    "failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        match serde_json::from_str::<RemovalJob>(&content) {
            Ok(job) => Ok(Some(job)),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "corrupt resume record, treating as absent"
                );
                Ok(None)
            }
        }
    }

    /// Persist the job, replacing any previous record.
    ///
    /// Written to a sibling temp file and renamed so a crash mid-write
    /// leaves either the old record or the new one, never a torn file.
    pub async fn put(&self, job: &RemovalJob) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    SweepError::Storage(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let content = serde_json::to_string_pretty(job)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, content).await.map_err(|e| {
            SweepError::Storage(format!("failed to write {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            SweepError::Storage(format!("failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), completed = job.completed, "resume record saved");
        Ok(())
    }

    /// Remove the persisted record; absent is fine
    pub async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "resume record cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SweepError::Storage(format!(
                "failed to remove {}: {}",
                self.path.display(),
                e
            ))),
        }
    }
}
