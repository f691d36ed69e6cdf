//! In-memory resume store

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::core::RemovalJob;
use crate::utils::error::Result;

/// Volatile single-job store for tests and dry runs.
///
/// Clones share the same slot, so a test can keep a probe handle on the
/// store it hands to the coordinator.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<RemovalJob>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the stored job, if any
    pub async fn get(&self) -> Result<Option<RemovalJob>> {
        Ok(self.slot.lock().await.clone())
    }

    /// Replace the stored job
    pub async fn put(&self, job: &RemovalJob) -> Result<()> {
        *self.slot.lock().await = Some(job.clone());
        Ok(())
    }

    /// Drop the stored job
    pub async fn clear(&self) -> Result<()> {
        *self.slot.lock().await = None;
        Ok(())
    }
}
